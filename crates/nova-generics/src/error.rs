use thiserror::Error;

use crate::TypeVarId;

/// Failure to load [`crate::RelationOptions`].
#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("failed to parse relation options: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid value for `{field}`: {message}")]
    InvalidValue {
        field: &'static str,
        message: String,
    },
}

/// Failure to unify a supertype instantiation with a target type while computing `as_sub`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdaptError {
    #[error("type variable {var:?} would be mapped to two incompatible types")]
    IncompatibleMapping { var: TypeVarId },
}
