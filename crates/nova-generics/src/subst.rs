//! Type variable substitution and erasure.

use crate::{ClassType, ForAll, MethodType, Type, TyContext, TypeEnv, TypeParamDef, TypeVarId};

/// Align `from` and `to` at their tails: when the lists differ in length the longer one loses
/// its leading entries. Class formals list the enclosing class's parameters first, so this
/// maps a class's own parameters even when the actual type omits its enclosing instance.
fn align<'a>(from: &'a [TypeVarId], to: &'a [Type]) -> (&'a [TypeVarId], &'a [Type]) {
    let len = from.len().min(to.len());
    (&from[from.len() - len..], &to[to.len() - len..])
}

impl TyContext<'_> {
    /// Simultaneously replace each variable in `from` with the type at the same position in
    /// `to`.
    pub fn subst(&mut self, ty: &Type, from: &[TypeVarId], to: &[Type]) -> Type {
        let (from, to) = align(from, to);
        if from.is_empty() || !ty.mentions_any(from) && !matches!(ty, Type::ForAll(_)) {
            return ty.clone();
        }
        self.subst_aligned(ty, from, to)
    }

    pub fn subst_all(&mut self, tys: &[Type], from: &[TypeVarId], to: &[Type]) -> Vec<Type> {
        tys.iter().map(|t| self.subst(t, from, to)).collect()
    }

    fn subst_aligned(&mut self, ty: &Type, from: &[TypeVarId], to: &[Type]) -> Type {
        match ty {
            Type::TypeVar(id) => match from.iter().position(|v| v == id) {
                Some(idx) => to[idx].clone(),
                None => ty.clone(),
            },
            Type::Class(ct) => Type::Class(ClassType {
                def: ct.def,
                outer: ct
                    .outer
                    .as_deref()
                    .map(|outer| Box::new(self.subst_aligned(outer, from, to))),
                args: ct
                    .args
                    .iter()
                    .map(|a| self.subst_aligned(a, from, to))
                    .collect(),
                erased_supertypes: ct.erased_supertypes,
            }),
            Type::Array(elem) => Type::array(self.subst_aligned(elem, from, to)),
            Type::Wildcard(w) => Type::Wildcard(w.map_bound(|b| self.subst_aligned(b, from, to))),
            Type::Intersection(parts) => Type::Intersection(
                parts
                    .iter()
                    .map(|p| self.subst_aligned(p, from, to))
                    .collect(),
            ),
            Type::Method(m) => Type::Method(Box::new(self.subst_method(m, from, to))),
            Type::ForAll(forall) => Type::ForAll(Box::new(self.subst_for_all(forall, from, to))),
            Type::Error(Some(original)) => {
                Type::error_of(self.subst_aligned(original, from, to))
            }
            Type::Void
            | Type::Primitive(_)
            | Type::Null
            | Type::Captured(_)
            | Type::Undet(_)
            | Type::Error(None) => ty.clone(),
        }
    }

    fn subst_method(&mut self, m: &MethodType, from: &[TypeVarId], to: &[Type]) -> MethodType {
        MethodType {
            params: m
                .params
                .iter()
                .map(|p| self.subst_aligned(p, from, to))
                .collect(),
            return_type: self.subst_aligned(&m.return_type, from, to),
            thrown: m
                .thrown
                .iter()
                .map(|t| self.subst_aligned(t, from, to))
                .collect(),
        }
    }

    fn subst_for_all(&mut self, forall: &ForAll, from: &[TypeVarId], to: &[Type]) -> ForAll {
        let mut forall = forall.clone();

        // The method's own type parameters shadow any outer mapping for the same variable.
        let (from, to): (Vec<TypeVarId>, Vec<Type>) = from
            .iter()
            .zip(to)
            .filter(|(v, _)| !forall.type_params.contains(v))
            .map(|(v, t)| (*v, t.clone()))
            .unzip();
        if from.is_empty() {
            return forall;
        }

        // Rename first if an incoming type would be captured by the method's own parameters.
        if to.iter().any(|t| t.mentions_any(&forall.type_params)) {
            let fresh = self.new_instances(&forall.type_params);
            let fresh_tys: Vec<Type> = fresh.iter().map(|v| Type::TypeVar(*v)).collect();
            forall.method = self.subst_method(&forall.method, &forall.type_params, &fresh_tys);
            forall.type_params = fresh;
        }

        let type_params = self.subst_bounds(&forall.type_params, &from, &to);
        let mut method = self.subst_method(&forall.method, &from, &to);
        if type_params != forall.type_params {
            let renamed: Vec<Type> = type_params.iter().map(|v| Type::TypeVar(*v)).collect();
            method = self.subst_method(&method, &forall.type_params, &renamed);
        }
        ForAll {
            type_params,
            method,
        }
    }

    /// Substitute inside the bounds of `tvars`. Returns `tvars` unchanged when no bound
    /// changes; otherwise fresh variables whose bounds refer to each other instead of the
    /// originals.
    pub fn subst_bounds(
        &mut self,
        tvars: &[TypeVarId],
        from: &[TypeVarId],
        to: &[Type],
    ) -> Vec<TypeVarId> {
        let mut changed = false;
        let mut new_bounds = Vec::with_capacity(tvars.len());
        for tv in tvars {
            let bounds = self.declared_bounds(*tv);
            let substituted = self.subst_all(&bounds, from, to);
            changed |= substituted != bounds;
            new_bounds.push(substituted);
        }
        if !changed {
            return tvars.to_vec();
        }

        let fresh: Vec<TypeVarId> = tvars
            .iter()
            .map(|tv| {
                let name = self.type_param_name(*tv);
                self.add_local_type_param(TypeParamDef::new(name, Vec::new()))
            })
            .collect();
        let fresh_tys: Vec<Type> = fresh.iter().map(|v| Type::TypeVar(*v)).collect();
        for (var, bounds) in fresh.iter().zip(new_bounds) {
            let bounds = self.subst_all(&bounds, tvars, &fresh_tys);
            self.set_local_upper_bounds(*var, bounds);
        }
        fresh
    }

    /// Fresh copies of `tvars` whose bounds mention the copies instead of the originals.
    pub fn new_instances(&mut self, tvars: &[TypeVarId]) -> Vec<TypeVarId> {
        let fresh: Vec<TypeVarId> = tvars
            .iter()
            .map(|tv| {
                let name = self.type_param_name(*tv);
                self.add_local_type_param(TypeParamDef::new(name, Vec::new()))
            })
            .collect();
        let fresh_tys: Vec<Type> = fresh.iter().map(|v| Type::TypeVar(*v)).collect();
        for (old, new) in tvars.iter().zip(&fresh) {
            let bounds = self.declared_bounds(*old);
            let bounds = self.subst_all(&bounds, tvars, &fresh_tys);
            self.set_local_upper_bounds(*new, bounds);
        }
        fresh
    }

    pub(crate) fn declared_bounds(&self, id: TypeVarId) -> Vec<Type> {
        self.type_param(id)
            .map(|def| def.upper_bounds.clone())
            .unwrap_or_default()
    }

    pub(crate) fn type_param_name(&self, id: TypeVarId) -> String {
        self.type_param(id)
            .map(|def| def.name.clone())
            .unwrap_or_else(|| format!("T#{}", id.to_raw()))
    }

    /// Type erasure (JLS 4.6).
    pub fn erasure(&self, ty: &Type) -> Type {
        self.erase(ty, false)
    }

    /// Erasure whose supertypes are erased as well.
    pub fn erasure_recursive(&self, ty: &Type) -> Type {
        self.erase(ty, true)
    }

    fn erase(&self, ty: &Type, recurse: bool) -> Type {
        match ty {
            Type::Class(ct) => {
                let static_member = self
                    .class_def(ct.def)
                    .is_some_and(|c| c.modifiers.is_static);
                let outer = match ct.outer.as_deref() {
                    Some(outer) if !static_member => Some(Box::new(self.erase(outer, false))),
                    _ => None,
                };
                Type::Class(ClassType {
                    def: ct.def,
                    outer,
                    args: Vec::new(),
                    erased_supertypes: recurse || ct.erased_supertypes,
                })
            }
            Type::Array(elem) => Type::array(self.erase(elem, recurse)),
            Type::TypeVar(_) | Type::Captured(_) => {
                let bound = self.skip_type_vars(ty);
                if bound.is_type_var() {
                    // Unresolvable cycle of bounds.
                    return self.object_type();
                }
                self.erase(&bound, recurse)
            }
            Type::Wildcard(_) => {
                let bound = self.wild_upper_bound(ty);
                self.erase(&bound, recurse)
            }
            Type::Intersection(parts) => match parts.first() {
                Some(first) => self.erase(first, recurse),
                None => self.object_type(),
            },
            Type::Method(m) => Type::Method(Box::new(self.erase_method(m))),
            Type::ForAll(forall) => Type::Method(Box::new(self.erase_method(&forall.method))),
            Type::Undet(id) => match self.infer.var(*id).and_then(|v| v.inst.clone()) {
                Some(inst) => self.erase(&inst, recurse),
                None => ty.clone(),
            },
            Type::Void | Type::Primitive(_) | Type::Null | Type::Error(_) => ty.clone(),
        }
    }

    fn erase_method(&self, m: &MethodType) -> MethodType {
        MethodType {
            params: m.params.iter().map(|p| self.erasure(p)).collect(),
            return_type: self.erasure(&m.return_type),
            thrown: m.thrown.iter().map(|t| self.erasure(t)).collect(),
        }
    }
}
