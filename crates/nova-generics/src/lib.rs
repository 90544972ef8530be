//! Generic type relations for Java-like nominal type systems.
//!
//! Declarations live in a [`TypeEnv`] (usually a [`TypeStore`]); every algorithm runs on a
//! [`TyContext`], which owns the capture variables, renamed type parameters, inference
//! variables and caches a checking session allocates. The free functions at the crate root
//! are one-shot conveniences that build a throwaway context.
//!
//! ```
//! use nova_generics::{Type, TypeEnv, TypeStore, TyContext};
//!
//! let store = TypeStore::with_minimal_jdk();
//! let list = store.class_id("java.util.List").unwrap();
//! let number = Type::class(store.well_known().number, vec![]);
//! let integer = Type::class(store.well_known().integer, vec![]);
//!
//! let mut cx = TyContext::new(&store);
//! let list_of_integer = Type::class(list, vec![integer]);
//! let list_of_extends_number = Type::class(list, vec![Type::extends(number)]);
//! assert!(cx.is_subtype(&list_of_integer, &list_of_extends_number));
//! assert!(!cx.is_subtype(&list_of_extends_number, &list_of_integer));
//! ```

mod bounds;
mod capture;
pub(crate) mod context;
mod error;
mod format;
mod infer;
mod jdk;
mod members;
mod options;
mod relations;
mod store;
mod subst;
pub(crate) mod supertypes;
mod ty;

pub use context::{CapturedVar, TyContext};
pub use error::{AdaptError, OptionsError};
pub use format::TypeDisplay;
pub use infer::{InferenceBound, InferenceSession, InferenceSnapshot, UndetVar};
pub use members::Member;
pub use options::RelationOptions;
pub use relations::{LintCategory, Warner};
pub use store::{
    ClassDef, ClassKind, FieldDef, MethodDef, Modifiers, TypeEnv, TypeParamDef, TypeStore,
    WellKnownTypes,
};
pub use ty::{
    CapturedVarId, ClassId, ClassType, ForAll, MethodType, PrimitiveType, Type, TypeVarId,
    UndetVarId, WildcardBound, WildcardType,
};

/// `t <: s` in a fresh context.
pub fn is_subtype(env: &dyn TypeEnv, t: &Type, s: &Type) -> bool {
    TyContext::new(env).is_subtype(t, s)
}

pub fn is_same_type(env: &dyn TypeEnv, t: &Type, s: &Type) -> bool {
    TyContext::new(env).is_same_type(t, s)
}

pub fn is_assignable(env: &dyn TypeEnv, t: &Type, s: &Type) -> bool {
    TyContext::new(env).is_assignable(t, s)
}

pub fn is_castable(env: &dyn TypeEnv, t: &Type, s: &Type) -> bool {
    TyContext::new(env).is_castable(t, s)
}

pub fn is_convertible(env: &dyn TypeEnv, t: &Type, s: &Type) -> bool {
    TyContext::new(env).is_convertible(t, s)
}

pub fn erasure(env: &dyn TypeEnv, ty: &Type) -> Type {
    TyContext::new(env).erasure(ty)
}

/// Least upper bound in a fresh context. The result must not mention capture variables if
/// it is to outlive the call; see [`TyContext::lub`].
pub fn lub(env: &dyn TypeEnv, ts: &[Type]) -> Type {
    TyContext::new(env).lub(ts)
}

pub fn glb(env: &dyn TypeEnv, t: &Type, s: &Type) -> Type {
    TyContext::new(env).glb(t, s)
}
