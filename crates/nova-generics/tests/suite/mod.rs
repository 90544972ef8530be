// Consolidated integration test suite, compiled by `tests/generics.rs`.
mod capture;
mod cast_convert;
mod fixture;
mod lub_glb;
mod options;
mod properties;
mod subtyping;
