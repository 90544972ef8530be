//! Member types seen through a receiver, `as_sub`, and signature/override relations.

use indexmap::IndexMap;

use crate::{
    AdaptError, ClassId, FieldDef, ForAll, MethodDef, Type, TyContext, TypeVarId, Warner,
    WildcardBound, WildcardType,
};

/// A field or method together with its declaring class.
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub owner: ClassId,
    pub ty: Type,
    pub is_static: bool,
}

impl Member {
    pub fn method(owner: ClassId, def: &MethodDef) -> Self {
        Self {
            owner,
            ty: def.signature(),
            is_static: def.is_static,
        }
    }

    pub fn field(owner: ClassId, def: &FieldDef) -> Self {
        Self {
            owner,
            ty: def.ty.clone(),
            is_static: def.is_static,
        }
    }
}

impl TyContext<'_> {
    /// The type of `member` as seen from a receiver of type `site`.
    ///
    /// `List<String>` sees `E get(int)` as `String get(int)`; a raw `List` sees the erased
    /// `Object get(int)`. Static members are returned unchanged.
    pub fn member_type(&mut self, site: &Type, member: &Member) -> Type {
        if member.is_static {
            return member.ty.clone();
        }
        match site {
            Type::TypeVar(_) | Type::Captured(_) | Type::Wildcard(_) => {
                let upper = self.upper_bound(site);
                if &upper == site {
                    return member.ty.clone();
                }
                self.member_type(&upper, member)
            }
            Type::Error(_) => site.clone(),
            Type::Class(_) | Type::Intersection(_) | Type::Array(_) => {
                let owner_params = self.declared_all_params(member.owner);
                if owner_params.is_empty() {
                    return member.ty.clone();
                }
                let base = match site {
                    Type::Intersection(_) => self
                        .as_outer_super(site, member.owner)
                        .map(|base| self.capture(&base)),
                    _ => self.as_outer_super(site, member.owner),
                };
                let Some(base) = base else {
                    return member.ty.clone();
                };
                let base_params = self.all_params(&base);
                if base_params.is_empty() {
                    return self.erasure(&member.ty);
                }
                self.subst(&member.ty, &owner_params, &base_params)
            }
            _ => member.ty.clone(),
        }
    }

    /// The instantiation of subclass `sym` that is a subtype of `ty`, if one exists.
    ///
    /// `as_sub(List<String>, ArrayList)` is `ArrayList<String>`. Type parameters of `sym`
    /// that `ty` does not determine become `?`, or the whole result is erased when `ty` is
    /// raw.
    pub fn as_sub(&mut self, ty: &Type, sym: ClassId) -> Option<Type> {
        match ty {
            Type::Error(_) => Some(ty.clone()),
            Type::Class(ct) => {
                if ct.def == sym {
                    return Some(ty.clone());
                }
                let sym_type = self.declared_type(sym)?;
                let base = self.as_super(&sym_type, ct.def)?;
                let mapping = match self.adapt(&base, ty) {
                    Ok(mapping) => mapping,
                    Err(err) => {
                        tracing::debug!(
                            target: "nova.generics",
                            error = %err,
                            "as_sub adapt failed"
                        );
                        return None;
                    }
                };
                let (from, to): (Vec<TypeVarId>, Vec<Type>) = mapping.into_iter().unzip();
                let mut res = self.subst(&sym_type, &from, &to);
                if !self.is_subtype(&res, ty) {
                    return None;
                }
                let open: Vec<TypeVarId> = self
                    .declared_all_params(sym)
                    .into_iter()
                    .filter(|v| res.mentions_var(*v) && !ty.mentions_var(*v))
                    .collect();
                if !open.is_empty() {
                    if self.is_raw(ty) {
                        res = self.erasure(&res);
                    } else {
                        let wildcards: Vec<Type> = open
                            .iter()
                            .map(|v| {
                                Type::Wildcard(WildcardType {
                                    bound: WildcardBound::Unbounded,
                                    formal: Some(*v),
                                })
                            })
                            .collect();
                        res = self.subst(&res, &open, &wildcards);
                    }
                }
                Some(res)
            }
            _ => None,
        }
    }

    /// Match `source` (which mentions type variables) against `target`, producing a mapping
    /// from the variables to the parts of `target` at the same positions.
    ///
    /// A variable met twice keeps the more specific wildcard when both occurrences are
    /// `extends` (or both `super`) wildcards; otherwise both occurrences must be the same
    /// type.
    pub fn adapt(
        &mut self,
        source: &Type,
        target: &Type,
    ) -> Result<Vec<(TypeVarId, Type)>, AdaptError> {
        let mut mapping = IndexMap::new();
        self.adapt_recursive(&mut mapping, source, target)?;
        Ok(mapping.into_iter().collect())
    }

    fn adapt_recursive(
        &mut self,
        mapping: &mut IndexMap<TypeVarId, Type>,
        source: &Type,
        target: &Type,
    ) -> Result<(), AdaptError> {
        match (source, target) {
            (Type::Class(_), Type::Class(_)) => {
                let sources = self.all_params(source);
                let targets = self.all_params(target);
                for (s, t) in sources.iter().zip(&targets) {
                    self.adapt_recursive(mapping, s, t)?;
                }
                Ok(())
            }
            (Type::Array(s), Type::Array(t)) => self.adapt_recursive(mapping, s, t),
            (Type::Wildcard(w), _) => {
                if w.is_extends_bound() {
                    let s = self.wild_upper_bound(source);
                    let t = self.wild_upper_bound(target);
                    self.adapt_recursive(mapping, &s, &t)
                } else {
                    let s = self.wild_lower_bound(source);
                    let t = self.wild_lower_bound(target);
                    self.adapt_recursive(mapping, &s, &t)
                }
            }
            (Type::TypeVar(var), _) => {
                let Some(existing) = mapping.get(var).cloned() else {
                    mapping.insert(*var, target.clone());
                    return Ok(());
                };
                let updated = if existing.is_super_bound() && target.is_super_bound() {
                    let existing_lower = self.wild_lower_bound(&existing);
                    let target_lower = self.wild_lower_bound(target);
                    if self.is_subtype(&existing_lower, &target_lower) {
                        target.clone()
                    } else {
                        existing
                    }
                } else if existing.is_extends_bound() && target.is_extends_bound() {
                    let existing_upper = self.wild_upper_bound(&existing);
                    let target_upper = self.wild_upper_bound(target);
                    if self.is_subtype(&existing_upper, &target_upper) {
                        existing
                    } else {
                        target.clone()
                    }
                } else if self.is_same_type(&existing, target) {
                    existing
                } else {
                    return Err(AdaptError::IncompatibleMapping { var: *var });
                };
                mapping.insert(*var, updated);
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Same parameter types (after renaming the type parameters of generic signatures).
    /// A generic and a non-generic signature never have the same arguments.
    pub fn has_same_args(&mut self, t: &Type, s: &Type) -> bool {
        match (t, s) {
            (Type::Method(m), Type::Method(n)) => {
                self.contains_type_equivalent_all(&m.params, &n.params)
            }
            (Type::ForAll(f), Type::ForAll(g)) => {
                if !self.has_same_bounds(f, g) {
                    return false;
                }
                let renamed: Vec<Type> = f.type_params.iter().map(|v| Type::TypeVar(*v)).collect();
                let g_params = self.subst_all(&g.method.params, &g.type_params, &renamed);
                self.contains_type_equivalent_all(&f.method.params, &g_params)
            }
            _ => false,
        }
    }

    /// Same number of type parameters with pairwise equal bounds once `g`'s parameters are
    /// renamed to `f`'s.
    pub fn has_same_bounds(&mut self, f: &ForAll, g: &ForAll) -> bool {
        if f.type_params.len() != g.type_params.len() {
            return false;
        }
        let renamed: Vec<Type> = f.type_params.iter().map(|v| Type::TypeVar(*v)).collect();
        f.type_params
            .iter()
            .zip(&g.type_params)
            .all(|(fv, gv)| {
                let f_bound = self.type_var_bound(*fv);
                let g_bound = self.type_var_bound(*gv);
                let g_bound = self.subst(&g_bound, &g.type_params, &renamed);
                self.is_same_type(&f_bound, &g_bound)
            })
    }

    /// JLS 8.4.2: `t` has the same arguments as `s` or as the erasure of `s`.
    pub fn is_sub_signature(&mut self, t: &Type, s: &Type) -> bool {
        if self.has_same_args(t, s) {
            return true;
        }
        let s_erased = self.erasure(s);
        self.has_same_args(t, &s_erased)
    }

    /// Either signature is a subsignature of the other.
    pub fn override_equivalent(&mut self, t: &Type, s: &Type) -> bool {
        if self.has_same_args(t, s) {
            return true;
        }
        let s_erased = self.erasure(s);
        if self.has_same_args(t, &s_erased) {
            return true;
        }
        let t_erased = self.erasure(t);
        self.has_same_args(&t_erased, s)
    }

    /// JLS 8.4.8.3: whether a method with signature `r1` may override one with `r2` as far as
    /// return types go.
    pub fn return_type_substitutable(&mut self, r1: &Type, r2: &Type) -> bool {
        let mut warner = Warner::default();
        self.return_type_substitutable_with(r1, r2, &mut warner)
    }

    pub fn return_type_substitutable_with(
        &mut self,
        r1: &Type,
        r2: &Type,
        warner: &mut Warner,
    ) -> bool {
        let (Some(m1), Some(m2)) = (r1.method_type(), r2.method_type()) else {
            return false;
        };
        let t_res = m1.return_type.clone();
        if self.has_same_args(r1, r2) {
            let s_res = match (r1, r2) {
                (Type::ForAll(f), Type::ForAll(g)) => {
                    let renamed: Vec<Type> =
                        f.type_params.iter().map(|v| Type::TypeVar(*v)).collect();
                    self.subst(&g.method.return_type, &g.type_params, &renamed)
                }
                _ => m2.return_type.clone(),
            };
            return self.covariant_return_type(&t_res, &s_res, warner);
        }
        let s_res = self.erasure(&m2.return_type);
        self.covariant_return_type(&t_res, &s_res, warner)
    }

    /// Same type, or both references and `t` assignable to `s` (possibly unchecked).
    pub fn covariant_return_type(&mut self, t: &Type, s: &Type, warner: &mut Warner) -> bool {
        if self.is_same_type(t, s) {
            return true;
        }
        !t.is_primitive()
            && !s.is_primitive()
            && !matches!(t, Type::Void)
            && !matches!(s, Type::Void)
            && self.is_assignable_with(t, s, warner)
    }
}
