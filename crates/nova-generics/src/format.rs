//! Java-like rendering of types for logs, diagnostics and tests.
//!
//! Classes print by simple name, capture variables as `CAP#n` (1-based), inference variables
//! as their originating parameter's name, and method signatures as `(A, B)R`.

use std::fmt;

use crate::{MethodType, Type, TyContext, TypeVarId, WildcardBound};

/// [`fmt::Display`] adapter returned by [`TyContext::display`].
pub struct TypeDisplay<'a, 'env> {
    cx: &'a TyContext<'env>,
    ty: &'a Type,
}

impl<'env> TyContext<'env> {
    pub fn display<'a>(&'a self, ty: &'a Type) -> TypeDisplay<'a, 'env> {
        TypeDisplay { cx: self, ty }
    }

    /// Shorthand for `self.display(ty).to_string()`.
    pub fn format_type(&self, ty: &Type) -> String {
        self.display(ty).to_string()
    }
}

impl fmt::Display for TypeDisplay<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_type(self.cx, self.ty, f)
    }
}

impl fmt::Debug for TypeDisplay<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

fn write_type(cx: &TyContext<'_>, ty: &Type, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match ty {
        Type::Void => f.write_str("void"),
        Type::Primitive(prim) => f.write_str(prim.name()),
        Type::Null => f.write_str("null"),
        Type::Class(ct) => {
            let name = cx
                .class_def(ct.def)
                .map(|def| def.simple_name().to_string())
                .unwrap_or_else(|| format!("<class#{}>", ct.def.to_raw()));
            if let Some(outer) = ct.outer.as_deref() {
                write_type(cx, outer, f)?;
                f.write_str(".")?;
            }
            f.write_str(&name)?;
            if !ct.args.is_empty() {
                f.write_str("<")?;
                write_list(cx, &ct.args, ", ", f)?;
                f.write_str(">")?;
            }
            Ok(())
        }
        Type::Array(elem) => {
            write_type(cx, elem, f)?;
            f.write_str("[]")
        }
        Type::TypeVar(id) => f.write_str(&cx.type_param_name(*id)),
        Type::Captured(id) => write!(f, "CAP#{}", id.index() + 1),
        Type::Wildcard(w) => match &w.bound {
            WildcardBound::Unbounded => f.write_str("?"),
            WildcardBound::Extends(bound) => {
                f.write_str("? extends ")?;
                write_type(cx, bound, f)
            }
            WildcardBound::Super(bound) => {
                f.write_str("? super ")?;
                write_type(cx, bound, f)
            }
        },
        Type::Intersection(parts) => write_list(cx, parts, " & ", f),
        Type::Undet(id) => match cx.undet(*id) {
            Some(var) => f.write_str(&cx.type_param_name(var.origin)),
            None => write!(f, "<undet#{}>", id.index()),
        },
        Type::Method(m) => write_method(cx, m, f),
        Type::ForAll(g) => {
            f.write_str("<")?;
            write_type_params(cx, &g.type_params, f)?;
            f.write_str(">")?;
            write_method(cx, &g.method, f)
        }
        Type::Error(_) => f.write_str("<error>"),
    }
}

fn write_list(
    cx: &TyContext<'_>,
    tys: &[Type],
    sep: &str,
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    for (idx, ty) in tys.iter().enumerate() {
        if idx > 0 {
            f.write_str(sep)?;
        }
        write_type(cx, ty, f)?;
    }
    Ok(())
}

fn write_type_params(
    cx: &TyContext<'_>,
    params: &[TypeVarId],
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    for (idx, param) in params.iter().enumerate() {
        if idx > 0 {
            f.write_str(", ")?;
        }
        f.write_str(&cx.type_param_name(*param))?;
    }
    Ok(())
}

fn write_method(cx: &TyContext<'_>, m: &MethodType, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("(")?;
    write_list(cx, &m.params, ", ", f)?;
    f.write_str(")")?;
    write_type(cx, &m.return_type, f)
}
