use crate::{ClassId, PrimitiveType, Type, TyContext, TypeEnv};

/// Categories of warnings a relation can report instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LintCategory {
    /// A raw type was accepted where a parameterization was expected, or a cast cannot be
    /// checked at runtime.
    Unchecked,
}

/// Collects warnings raised while a relation is evaluated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Warner {
    warnings: Vec<LintCategory>,
}

impl Warner {
    pub fn warn(&mut self, category: LintCategory) {
        if !self.warnings.contains(&category) {
            self.warnings.push(category);
        }
    }

    pub fn has_warning(&self, category: LintCategory) -> bool {
        self.warnings.contains(&category)
    }

    pub fn warnings(&self) -> &[LintCategory] {
        &self.warnings
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn clear(&mut self) {
        self.warnings.clear();
    }
}

impl TyContext<'_> {
    pub fn boxed_class(&self, prim: PrimitiveType) -> ClassId {
        crate::jdk::box_class(self.well_known(), prim)
    }

    pub fn boxed_type(&self, prim: PrimitiveType) -> Type {
        Type::class(self.boxed_class(prim), vec![])
    }

    /// The primitive a reference type unboxes to, if any. Works through type variables and
    /// subclasses of the box classes.
    pub fn unboxed_type(&mut self, ty: &Type) -> Option<PrimitiveType> {
        if !ty.is_reference() || ty.is_null() {
            return None;
        }
        PrimitiveType::ALL.into_iter().find(|prim| {
            let box_class = self.boxed_class(*prim);
            self.as_super(ty, box_class).is_some_and(|t| !t.is_error())
        })
    }

    /// Boxes primitives; leaves reference types unchanged.
    pub fn boxed_type_or_type(&self, ty: &Type) -> Type {
        match ty {
            Type::Primitive(prim) => self.boxed_type(*prim),
            other => other.clone(),
        }
    }

    /// Method invocation conversion: subtyping, or boxing/unboxing followed by subtyping when
    /// exactly one side is primitive.
    pub fn is_convertible(&mut self, t: &Type, s: &Type) -> bool {
        let mut warner = Warner::default();
        self.is_convertible_with(t, s, &mut warner)
    }

    pub fn is_convertible_with(&mut self, t: &Type, s: &Type, warner: &mut Warner) -> bool {
        if t.is_error() || s.is_error() {
            return true;
        }
        let t_primitive = t.is_primitive();
        let s_primitive = s.is_primitive();
        if t_primitive == s_primitive {
            return self.is_subtype_unchecked(t, s, warner);
        }
        if !self.options().allow_boxing {
            return false;
        }
        match t {
            Type::Primitive(prim) => {
                let boxed = self.boxed_type(*prim);
                self.is_subtype(&boxed, s)
            }
            _ => match self.unboxed_type(t) {
                Some(prim) => self.is_subtype(&Type::Primitive(prim), s),
                None => false,
            },
        }
    }

    /// Subtyping extended with unchecked conversion: a type whose supertype of `s`'s class is
    /// raw is accepted, recording [`LintCategory::Unchecked`] unless `s` is reifiable.
    pub fn is_subtype_unchecked(&mut self, t: &Type, s: &Type, warner: &mut Warner) -> bool {
        if let (Type::Array(t_elem), Type::Array(s_elem)) = (t, s) {
            return if t_elem.is_primitive() {
                self.is_same_type(t_elem, s_elem)
            } else {
                self.is_subtype_unchecked(t_elem, s_elem, warner)
            };
        }
        if self.is_subtype(t, s) {
            return true;
        }
        if t.is_type_var() {
            let upper = self.upper_bound(t);
            if &upper == t {
                return false;
            }
            return self.is_subtype_unchecked(&upper, s, warner);
        }
        if !self.options().allow_unchecked_conversion {
            return false;
        }
        let Type::Class(sc) = s else {
            return false;
        };
        if self.is_raw(s) {
            return false;
        }
        match self.as_super(t, sc.def) {
            Some(sup) if self.is_raw(&sup) => {
                if !self.is_reifiable(s) {
                    tracing::trace!(
                        target: "nova.generics",
                        "unchecked conversion from raw supertype"
                    );
                    warner.warn(LintCategory::Unchecked);
                }
                true
            }
            _ => false,
        }
    }

    /// Assignment conversion. Same as [`Self::is_convertible`] for non-constant expressions.
    pub fn is_assignable(&mut self, t: &Type, s: &Type) -> bool {
        let mut warner = Warner::default();
        self.is_assignable_with(t, s, &mut warner)
    }

    pub fn is_assignable_with(&mut self, t: &Type, s: &Type, warner: &mut Warner) -> bool {
        self.is_convertible_with(t, s, warner)
    }

    /// Assignment conversion of a compile-time constant of type `t` (an `int` or narrower)
    /// with value `value`: narrowing to `byte`, `short` and `char` (or their boxes) is
    /// allowed when the value fits.
    pub fn is_assignable_constant(&mut self, t: &Type, value: i64, s: &Type) -> bool {
        if t.is_error() || s.is_error() {
            return true;
        }
        if let Type::Primitive(tp) = t {
            if tp.is_int_subrange() {
                match s {
                    Type::Primitive(sp) if sp.is_int_subrange() && sp.accepts_constant(value) => {
                        return true;
                    }
                    Type::Class(_) => {
                        if let Some(sp) = self.unboxed_type(s) {
                            if matches!(
                                sp,
                                PrimitiveType::Byte | PrimitiveType::Short | PrimitiveType::Char
                            ) && sp.accepts_constant(value)
                            {
                                return true;
                            }
                        }
                    }
                    _ => {}
                }
            }
        }
        self.is_assignable(t, s)
    }

    /// Types whose full runtime representation is available: primitives, non-generic and raw
    /// classes, classes whose arguments are all unbounded wildcards, and arrays of those.
    pub fn is_reifiable(&self, ty: &Type) -> bool {
        match ty {
            Type::Void | Type::Primitive(_) | Type::Null | Type::Error(_) => true,
            Type::Class(ct) => {
                let outer_ok = ct.outer.as_deref().map_or(true, |o| self.is_reifiable(o));
                outer_ok
                    && ct
                        .args
                        .iter()
                        .all(|a| matches!(a, Type::Wildcard(w) if w.is_unbound()))
            }
            Type::Array(elem) => self.is_reifiable(elem),
            _ => false,
        }
    }

    /// Parameterized types whose arguments are all `?` (or `? extends` the formal's bound).
    pub fn is_unbounded(&mut self, ty: &Type) -> bool {
        let Type::Class(ct) = ty else {
            return false;
        };
        let formals = self.class_def(ct.def).map(|d| d.type_params.clone()).unwrap_or_default();
        ct.args.iter().enumerate().all(|(idx, arg)| match arg {
            Type::Wildcard(w) if w.is_unbound() => true,
            Type::Wildcard(w) if w.is_extends_bound() => {
                let Some(bound) = w.bound_type() else {
                    return true;
                };
                let formal_bound = match formals.get(idx) {
                    Some(formal) => self.type_var_bound(*formal),
                    None => self.object_type(),
                };
                !formal_bound.mentions_any(&formals) && self.is_same_type(bound, &formal_bound)
            }
            _ => false,
        })
    }
}
