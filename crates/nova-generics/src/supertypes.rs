//! Direct supertypes, supertype closures and `as_super` views.

use std::cmp::Ordering;

use crate::context::RankKey;
use crate::{ClassId, Type, TyContext, TypeEnv};

impl TyContext<'_> {
    /// The direct superclass of `ty` with the type's arguments substituted in.
    ///
    /// Raw types (and recursively erased types) have erased supertypes. Interfaces report
    /// `Object`. Returns `None` for `Object`, primitives and other non-reference types.
    pub fn supertype(&mut self, ty: &Type) -> Option<Type> {
        match ty {
            Type::Class(_) => {
                if let Some(hit) = self.cache.supertype.get(ty) {
                    return hit.clone();
                }
                let computed = self.compute_class_supertype(ty);
                self.cache.supertype.insert(ty.clone(), computed.clone());
                computed
            }
            Type::Intersection(parts) => {
                match parts.iter().find(|p| !self.is_interface(p)) {
                    Some(class_part) => Some(class_part.clone()),
                    None => Some(self.object_type()),
                }
            }
            Type::TypeVar(_) | Type::Captured(_) => {
                let bound = self.upper_bound(ty);
                match &bound {
                    Type::TypeVar(_) | Type::Captured(_) => Some(bound),
                    Type::Class(ct) if !self.is_interface_class(ct.def) => Some(bound),
                    _ => self.supertype(&bound),
                }
            }
            Type::Array(elem) => {
                if elem.is_primitive() || self.is_object(elem) {
                    Some(self.array_super_type())
                } else {
                    self.supertype(elem).map(Type::array)
                }
            }
            _ => None,
        }
    }

    fn compute_class_supertype(&mut self, ty: &Type) -> Option<Type> {
        let Type::Class(ct) = ty else {
            return None;
        };
        let def = self.class_def(ct.def)?;
        if ct.def == self.well_known().object {
            return None;
        }
        let declared = match (&def.super_class, def.is_interface()) {
            (Some(sc), false) => sc.clone(),
            _ => return Some(self.object_type()),
        };
        if ct.erased_supertypes || self.is_raw_class(ct) {
            return Some(self.erasure_recursive(&declared));
        }
        let formals = self.declared_all_params(ct.def);
        let actuals = self.all_params(ty);
        Some(self.subst(&declared, &formals, &actuals))
    }

    /// The direct superinterfaces of `ty`, instantiated like [`Self::supertype`].
    pub fn interfaces(&mut self, ty: &Type) -> Vec<Type> {
        match ty {
            Type::Class(ct) => {
                if let Some(hit) = self.cache.interfaces.get(ty) {
                    return hit.clone();
                }
                let Some(def) = self.class_def(ct.def) else {
                    return Vec::new();
                };
                let computed = if ct.erased_supertypes || self.is_raw_class(ct) {
                    def.interfaces
                        .iter()
                        .map(|i| self.erasure_recursive(i))
                        .collect()
                } else {
                    let formals = self.declared_all_params(ct.def);
                    let actuals = self.all_params(ty);
                    self.subst_all(&def.interfaces, &formals, &actuals)
                };
                self.cache.interfaces.insert(ty.clone(), computed.clone());
                computed
            }
            Type::Intersection(parts) => {
                if parts.iter().all(|p| self.is_interface(p)) {
                    parts.clone()
                } else {
                    parts
                        .iter()
                        .filter(|p| self.is_interface(p))
                        .cloned()
                        .collect()
                }
            }
            Type::TypeVar(_) | Type::Captured(_) => {
                let bound = self.upper_bound(ty);
                match &bound {
                    Type::Intersection(_) => self.interfaces(&bound),
                    Type::Class(ct) if self.is_interface_class(ct.def) => vec![bound],
                    _ => Vec::new(),
                }
            }
            _ => Vec::new(),
        }
    }

    /// `supertype` followed by `interfaces`, skipping absent supertypes.
    pub fn direct_supertypes(&mut self, ty: &Type) -> Vec<Type> {
        let mut out = Vec::new();
        if let Some(st) = self.supertype(ty) {
            if !matches!(ty, Type::Intersection(_)) || !self.is_object(&st) {
                out.push(st);
            }
        }
        out.extend(self.interfaces(ty));
        out
    }

    /// The compound supertype of every array type: `Object & Serializable & Cloneable`.
    pub fn array_super_type(&self) -> Type {
        let wk = self.well_known();
        Type::Intersection(vec![
            Type::class(wk.object, vec![]),
            Type::class(wk.serializable, vec![]),
            Type::class(wk.cloneable, vec![]),
        ])
    }

    /// Length of the longest supertype path to `Object` (`Object` itself is 0).
    pub fn rank(&mut self, ty: &Type) -> u32 {
        match ty {
            Type::Class(ct) => {
                let key = RankKey::Class(ct.def);
                if let Some(rank) = self.cache.rank.get(&key) {
                    return *rank;
                }
                if ct.def == self.well_known().object {
                    return 0;
                }
                // Provisional entry so malformed cyclic hierarchies terminate.
                self.cache.rank.insert(key, 0);
                let erased = self.erasure(ty);
                let mut rank = match self.supertype(&erased) {
                    Some(st) => self.rank(&st),
                    None => 0,
                };
                for iface in self.interfaces(&erased) {
                    rank = rank.max(self.rank(&iface));
                }
                let rank = rank + 1;
                self.cache.rank.insert(key, rank);
                rank
            }
            Type::TypeVar(id) => self.var_rank(RankKey::TypeVar(*id), ty),
            Type::Captured(id) => self.var_rank(RankKey::Captured(*id), ty),
            Type::Intersection(_) => self.bound_rank(ty),
            _ => 0,
        }
    }

    fn var_rank(&mut self, key: RankKey, ty: &Type) -> u32 {
        if let Some(rank) = self.cache.rank.get(&key) {
            return *rank;
        }
        self.cache.rank.insert(key, 0);
        let rank = self.bound_rank(ty);
        self.cache.rank.insert(key, rank);
        rank
    }

    /// One more than the highest rank among the supertypes of `ty`.
    fn bound_rank(&mut self, ty: &Type) -> u32 {
        let mut rank = match self.supertype(ty) {
            Some(st) if &st != ty => self.rank(&st),
            _ => 0,
        };
        for iface in self.interfaces(ty) {
            rank = rank.max(self.rank(&iface));
        }
        rank + 1
    }

    /// Total order on closure elements: type variables first (a subtype before its
    /// supertypes), then classes by descending rank and then by name.
    pub(crate) fn precedes(&mut self, a: &Type, b: &Type) -> bool {
        self.closure_order(a, b) == Ordering::Less
    }

    fn closure_order(&mut self, a: &Type, b: &Type) -> Ordering {
        match (a, b) {
            (Type::Array(ea), Type::Array(eb)) => self.closure_order(ea, eb),
            (Type::Array(_), _) => Ordering::Less,
            (_, Type::Array(_)) => Ordering::Greater,
            (a, b) if a.is_type_var() && b.is_type_var() => {
                if same_symbol(a, b) {
                    Ordering::Equal
                } else if self.is_subtype_no_capture(a, b) {
                    Ordering::Less
                } else if self.is_subtype_no_capture(b, a) {
                    Ordering::Greater
                } else {
                    var_key(a).cmp(&var_key(b))
                }
            }
            (a, _) if a.is_type_var() => Ordering::Less,
            (_, b) if b.is_type_var() => Ordering::Greater,
            (Type::Class(ca), Type::Class(cb)) => {
                if ca.def == cb.def {
                    return Ordering::Equal;
                }
                let (ra, rb) = (self.rank(a), self.rank(b));
                rb.cmp(&ra)
                    .then_with(|| self.class_name(ca.def).cmp(self.class_name(cb.def)))
                    .then_with(|| ca.def.cmp(&cb.def))
            }
            (Type::Class(_), _) => Ordering::Less,
            (_, Type::Class(_)) => Ordering::Greater,
            _ => Ordering::Equal,
        }
    }

    fn class_name(&self, id: ClassId) -> &str {
        self.class_def(id).map(|c| c.name.as_str()).unwrap_or("")
    }

    /// All supertypes of `ty` including `ty`, one entry per class or type variable, ordered
    /// by [`Self::precedes`].
    pub fn closure(&mut self, ty: &Type) -> Vec<Type> {
        if let Some(hit) = self.cache.closure.get(ty) {
            return hit.clone();
        }
        let mut cl = if let Type::Intersection(_) = ty {
            match self.supertype(ty) {
                Some(st) => self.closure(&st),
                None => Vec::new(),
            }
        } else {
            match self.supertype(ty) {
                Some(st) if st.is_type_var() => {
                    let mut cl = vec![ty.clone()];
                    cl.extend(self.closure(&st));
                    cl
                }
                Some(st @ (Type::Class(_) | Type::Intersection(_) | Type::Array(_))) => {
                    let cl = self.closure(&st);
                    self.insert(cl, ty)
                }
                _ => vec![ty.clone()],
            }
        };
        for iface in self.interfaces(ty) {
            let iface_cl = self.closure(&iface);
            cl = self.union(cl, iface_cl);
        }
        self.cache.closure.insert(ty.clone(), cl.clone());
        cl
    }

    /// Insert `ty` into an ordered closure unless an entry for the same symbol is present.
    pub fn insert(&mut self, cl: Vec<Type>, ty: &Type) -> Vec<Type> {
        let mut out = Vec::with_capacity(cl.len() + 1);
        let mut placed = false;
        for existing in cl {
            if !placed {
                if same_symbol(&existing, ty) {
                    placed = true;
                } else if self.precedes(ty, &existing) {
                    out.push(ty.clone());
                    placed = true;
                }
            }
            out.push(existing);
        }
        if !placed {
            out.push(ty.clone());
        }
        out
    }

    /// Merge two ordered closures; on a symbol present in both, the entry of `a` wins.
    pub fn union(&mut self, a: Vec<Type>, b: Vec<Type>) -> Vec<Type> {
        let mut out = Vec::with_capacity(a.len() + b.len());
        let mut a = a.into_iter().peekable();
        let mut b = b.into_iter().peekable();
        loop {
            let (Some(x), Some(y)) = (a.peek(), b.peek()) else {
                break;
            };
            if same_symbol(x, y) {
                out.extend(a.next());
                b.next();
            } else if self.precedes(x, y) {
                out.extend(a.next());
            } else if self.precedes(y, x) {
                out.extend(b.next());
            } else {
                out.extend(a.next());
            }
        }
        out.extend(a);
        out.extend(b);
        out
    }

    /// `ty` viewed as an instance of `sym`: the supertype of `ty` whose class is `sym`.
    pub fn as_super(&mut self, ty: &Type, sym: ClassId) -> Option<Type> {
        if sym == self.well_known().object && ty.is_reference() && !ty.is_null() {
            return Some(self.object_type());
        }
        match ty {
            Type::Class(ct) if ct.def == sym => Some(ty.clone()),
            Type::Class(_) | Type::Intersection(_) => {
                let key = (ty.clone(), Type::class(sym, Vec::new()));
                if !self.enter_pair(crate::context::Relation::AsSuper, &key.0, &key.1) {
                    return None;
                }
                let found = self.as_super_via_supertypes(ty, sym);
                self.leave_pair(crate::context::Relation::AsSuper, &key.0, &key.1);
                found
            }
            Type::Array(_) => {
                let target = Type::class(sym, Vec::new());
                let wk = self.well_known();
                let array_super = sym == wk.cloneable || sym == wk.serializable;
                array_super.then_some(target)
            }
            Type::TypeVar(_) | Type::Captured(_) => {
                let bound = self.upper_bound(ty);
                if bound.is_type_var() && same_symbol(&bound, ty) {
                    return None;
                }
                self.nested_option(|cx| cx.as_super(&bound, sym))
            }
            Type::Undet(id) => {
                let inst = self.infer.var(*id).and_then(|v| v.inst.clone())?;
                self.as_super(&inst, sym)
            }
            Type::Error(_) => Some(ty.clone()),
            _ => None,
        }
    }

    fn as_super_via_supertypes(&mut self, ty: &Type, sym: ClassId) -> Option<Type> {
        if let Some(st) = self.supertype(ty) {
            if let Some(found) = self.as_super(&st, sym) {
                return Some(found);
            }
        }
        if self.is_interface_class(sym) {
            for iface in self.interfaces(ty) {
                if let Some(found) = self.as_super(&iface, sym) {
                    return Some(found);
                }
            }
        }
        None
    }

    fn nested_option(&mut self, f: impl FnOnce(&mut Self) -> Option<Type>) -> Option<Type> {
        let mut out = None;
        self.nested(false, |cx| {
            out = f(cx);
            true
        });
        out
    }

    /// Like [`Self::as_super`], but also searches the enclosing instance types of `ty`.
    pub fn as_outer_super(&mut self, ty: &Type, sym: ClassId) -> Option<Type> {
        match ty {
            Type::Class(ct) => {
                let mut current = Some(ty.clone());
                let mut outer = ct.outer.as_deref().cloned();
                while let Some(t) = current {
                    if let Some(found) = self.as_super(&t, sym) {
                        return Some(found);
                    }
                    current = outer.take();
                    if let Some(Type::Class(next)) = &current {
                        outer = next.outer.as_deref().cloned();
                    }
                }
                None
            }
            Type::Array(_) | Type::Intersection(_) | Type::TypeVar(_) | Type::Captured(_) => {
                self.as_super(ty, sym)
            }
            Type::Error(_) => Some(ty.clone()),
            _ => None,
        }
    }

    /// Like [`Self::as_outer_super`], but when a type has no explicit enclosing instance the
    /// declaration of its lexically enclosing class is searched instead.
    pub fn as_enclosing_super(&mut self, ty: &Type, sym: ClassId) -> Option<Type> {
        match ty {
            Type::Class(_) => {
                let mut current = ty.clone();
                for _ in 0..self.options().max_depth {
                    if let Some(found) = self.as_super(&current, sym) {
                        return Some(found);
                    }
                    let Type::Class(ct) = &current else {
                        return None;
                    };
                    current = match ct.outer.as_deref() {
                        Some(outer @ Type::Class(_)) => outer.clone(),
                        _ => {
                            let enclosing = self.class_def(ct.def).and_then(|d| d.outer)?;
                            self.declared_type(enclosing)?
                        }
                    };
                }
                None
            }
            Type::TypeVar(_) | Type::Captured(_) => self.as_super(ty, sym),
            Type::Error(_) => Some(ty.clone()),
            _ => None,
        }
    }
}

/// Whether two closure entries stand for the same class (or the same variable).
pub(crate) fn same_symbol(a: &Type, b: &Type) -> bool {
    match (a, b) {
        (Type::Class(ca), Type::Class(cb)) => ca.def == cb.def,
        (Type::TypeVar(x), Type::TypeVar(y)) => x == y,
        (Type::Captured(x), Type::Captured(y)) => x == y,
        (Type::Array(x), Type::Array(y)) => same_symbol(x, y),
        (Type::Primitive(x), Type::Primitive(y)) => x == y,
        _ => a == b,
    }
}

fn var_key(ty: &Type) -> (u8, u32) {
    match ty {
        Type::TypeVar(id) => (0, id.to_raw()),
        Type::Captured(id) => (1, id.0),
        _ => (2, 0),
    }
}
