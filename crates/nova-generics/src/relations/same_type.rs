use crate::context::Relation;
use crate::{InferenceBound, Type, TyContext, WildcardBound};

impl TyContext<'_> {
    /// Type equality.
    ///
    /// Class types are equal when they name the same class and their arguments are pairwise
    /// equivalent under containment, so `List<?>` equals `List<? extends Object>`.
    pub fn is_same_type(&mut self, t: &Type, s: &Type) -> bool {
        if t == s || t.is_error() || s.is_error() {
            return true;
        }
        if let Some(inst) = self.inst_of(t) {
            return self.is_same_type(&inst, s);
        }
        if let Some(inst) = self.inst_of(s) {
            return self.is_same_type(t, &inst);
        }
        if let (Type::Undet(id), false) = (s, t.is_wildcard() || matches!(t, Type::Undet(_))) {
            self.record_bound(*id, InferenceBound::Eq, t);
            return true;
        }

        match t {
            Type::Void | Type::Primitive(_) | Type::Null => false,
            Type::TypeVar(_) | Type::Captured(_) => match s {
                Type::Wildcard(w) if w.is_super_bound() && !w.is_extends_bound() => {
                    let upper = self.wild_upper_bound(s);
                    self.is_same_type(t, &upper)
                }
                _ => false,
            },
            Type::Wildcard(w) => {
                let Type::Wildcard(v) = s else {
                    return false;
                };
                match (&w.bound, &v.bound) {
                    (WildcardBound::Unbounded, WildcardBound::Unbounded) => true,
                    (WildcardBound::Extends(a), WildcardBound::Extends(b))
                    | (WildcardBound::Super(a), WildcardBound::Super(b)) => {
                        self.is_same_type(a, b)
                    }
                    _ => false,
                }
            }
            Type::Class(ct) => match s {
                Type::Wildcard(w) if w.is_super_bound() && !w.is_extends_bound() => {
                    let upper = self.wild_upper_bound(s);
                    let lower = self.wild_lower_bound(s);
                    self.is_same_type(t, &upper) && self.is_same_type(t, &lower)
                }
                Type::Class(sc) => {
                    if ct.def != sc.def || ct.args.len() != sc.args.len() {
                        return false;
                    }
                    self.guarded(Relation::SameType, t, s, true, |cx| {
                        let outer_same = match (ct.outer.as_deref(), sc.outer.as_deref()) {
                            (Some(a), Some(b)) => cx.is_same_type(a, b),
                            _ => true,
                        };
                        outer_same && cx.contains_type_equivalent_all(&ct.args, &sc.args)
                    })
                }
                _ => false,
            },
            Type::Intersection(parts) => {
                let Type::Intersection(other) = s else {
                    return false;
                };
                if parts.len() != other.len() {
                    return false;
                }
                let (Some(st), Some(ss)) = (self.supertype(t), self.supertype(s)) else {
                    return false;
                };
                if !self.is_same_type(&st, &ss) {
                    return false;
                }
                let t_ifaces = self.interfaces(t);
                let s_ifaces = self.interfaces(s);
                t_ifaces.len() == s_ifaces.len()
                    && t_ifaces
                        .iter()
                        .all(|i| s_ifaces.iter().any(|j| self.is_same_type(i, j)))
            }
            Type::Array(elem) => match s {
                Type::Array(s_elem) => self.contains_type_equivalent(elem, s_elem),
                _ => false,
            },
            Type::Method(_) => match s {
                Type::Method(_) => {
                    let (Some(m), Some(n)) = (t.method_type(), s.method_type()) else {
                        return false;
                    };
                    let (r1, r2) = (m.return_type.clone(), n.return_type.clone());
                    self.has_same_args(t, s) && self.is_same_type(&r1, &r2)
                }
                _ => false,
            },
            Type::ForAll(f) => {
                let Type::ForAll(g) = s else {
                    return false;
                };
                if !self.has_same_bounds(f, g) {
                    return false;
                }
                let renamed: Vec<Type> = f.type_params.iter().map(|v| Type::TypeVar(*v)).collect();
                let g_method = Type::Method(Box::new(g.method.clone()));
                let g_method = self.subst(&g_method, &g.type_params, &renamed);
                let f_method = Type::Method(Box::new(f.method.clone()));
                self.is_same_type(&f_method, &g_method)
            }
            Type::Undet(id) => {
                if s.is_wildcard() {
                    return false;
                }
                self.record_bound(*id, InferenceBound::Eq, s);
                true
            }
            Type::Error(_) => true,
        }
    }

    /// Pairwise [`Self::is_same_type`] over two lists of equal length.
    pub fn is_same_types(&mut self, ts: &[Type], ss: &[Type]) -> bool {
        ts.len() == ss.len() && ts.iter().zip(ss).all(|(t, s)| self.is_same_type(t, s))
    }
}
