use crate::context::Relation;
use crate::{InferenceBound, Type, TyContext, WildcardType};

impl TyContext<'_> {
    /// Type argument containment (JLS 4.5.1): whether argument `t` contains argument `s`.
    ///
    /// A non-wildcard only contains an equal type. `? extends U` contains anything whose
    /// upper bound is a subtype of `U`; `? super L` contains anything whose lower bound is a
    /// supertype of `L`; `?` contains everything.
    pub fn contains_type(&mut self, t: &Type, s: &Type) -> bool {
        if t.is_error() || s.is_error() {
            return true;
        }
        if let Some(inst) = self.inst_of(s) {
            return self.contains_type(t, &inst);
        }
        match t {
            Type::Wildcard(w) => {
                if let Type::Undet(id) = s {
                    self.undet_contained_by(*id, t);
                    return true;
                }
                if self.is_same_wildcard(w, s) || self.is_capture_of(s, w) {
                    return true;
                }
                let lower_ok = w.is_extends_bound() || {
                    let t_lower = self.wild_lower_bound(t);
                    let s_lower = self.wild_lower_bound(s);
                    self.is_subtype_no_capture(&t_lower, &s_lower)
                };
                lower_ok
                    && (w.is_super_bound() || {
                        let s_upper = self.wild_upper_bound(s);
                        let t_upper = self.wild_upper_bound(t);
                        self.is_subtype_no_capture(&s_upper, &t_upper)
                    })
            }
            _ => {
                if let Type::Undet(id) = s {
                    self.record_bound(*id, InferenceBound::Eq, t);
                    return true;
                }
                !s.is_wildcard() && self.is_same_type(t, s)
            }
        }
    }

    /// Pairwise containment over two argument lists; lists of different lengths never
    /// contain each other.
    pub fn contains_type_all(&mut self, ts: &[Type], ss: &[Type]) -> bool {
        ts.len() == ss.len() && ts.iter().zip(ss).all(|(t, s)| self.contains_type(t, s))
    }

    /// Mutual containment.
    pub fn contains_type_equivalent(&mut self, t: &Type, s: &Type) -> bool {
        self.is_same_type(t, s) || (self.contains_type(t, s) && self.contains_type(s, t))
    }

    pub fn contains_type_equivalent_all(&mut self, ts: &[Type], ss: &[Type]) -> bool {
        ts.len() == ss.len()
            && ts
                .iter()
                .zip(ss)
                .all(|(t, s)| self.contains_type_equivalent(t, s))
    }

    /// Argument containment between two instantiations of the same class. A pair that is
    /// already being compared further up the stack is assumed to be contained.
    pub(crate) fn contains_type_recursive(&mut self, t: &Type, s: &Type) -> bool {
        let (Type::Class(tc), Type::Class(sc)) = (t, s) else {
            return false;
        };
        self.guarded(Relation::Contains, t, s, true, |cx| {
            cx.contains_type_all(&tc.args, &sc.args)
        })
    }

    fn is_same_wildcard(&self, w: &WildcardType, s: &Type) -> bool {
        matches!(s, Type::Wildcard(v) if v.bound == w.bound)
    }

    fn undet_contained_by(&mut self, id: crate::UndetVarId, wildcard: &Type) {
        let Type::Wildcard(w) = wildcard else {
            return;
        };
        if w.is_extends_bound() {
            let upper = self.wild_upper_bound(wildcard);
            self.record_bound(id, InferenceBound::Upper, &upper);
        }
        if w.is_super_bound() {
            let lower = self.wild_lower_bound(wildcard);
            if !lower.is_null() {
                self.record_bound(id, InferenceBound::Lower, &lower);
            }
        }
    }

    /// Whether two type arguments provably have no common instantiation.
    ///
    /// Used by cast checking: `List<String>` cannot be cast to `List<Integer>` because
    /// `String` and `Integer` are disjoint.
    pub fn disjoint_type(&mut self, t: &Type, s: &Type) -> bool {
        self.guarded(Relation::Disjoint, t, s, false, |cx| match (t, s) {
            (Type::Wildcard(w), _) => cx.disjoint_wildcard(w, s),
            (_, Type::Wildcard(w)) => cx.disjoint_wildcard(w, t),
            _ => cx.not_soft_subtype_recursive(t, s) || cx.not_soft_subtype_recursive(s, t),
        })
    }

    /// Whether any pair of arguments at the same position is disjoint.
    pub fn disjoint_types(&mut self, ts: &[Type], ss: &[Type]) -> bool {
        ts.iter().zip(ss).any(|(t, s)| self.disjoint_type(t, s))
    }

    fn disjoint_wildcard(&mut self, w: &WildcardType, s: &Type) -> bool {
        let Some(bound) = w.bound_type().cloned() else {
            return false;
        };
        match s {
            Type::Wildcard(v) => {
                if v.is_unbound() {
                    return false;
                }
                if w.is_extends_bound() {
                    if v.is_extends_bound() {
                        let s_upper = self.wild_upper_bound(s);
                        !self.is_castable_recursive(&bound, &s_upper)
                    } else {
                        let s_lower = self.wild_lower_bound(s);
                        self.not_soft_subtype_recursive(&s_lower, &bound)
                    }
                } else if v.is_extends_bound() {
                    let s_upper = self.wild_upper_bound(s);
                    self.not_soft_subtype_recursive(&bound, &s_upper)
                } else {
                    // Two `? super` wildcards always share `Object`.
                    false
                }
            }
            _ => {
                if w.is_extends_bound() {
                    self.not_soft_subtype_recursive(s, &bound)
                } else {
                    self.not_soft_subtype_recursive(&bound, s)
                }
            }
        }
    }

    fn is_castable_recursive(&mut self, t: &Type, s: &Type) -> bool {
        self.guarded(Relation::Castable, t, s, true, |cx| cx.is_castable(t, s))
    }

    fn not_soft_subtype_recursive(&mut self, t: &Type, s: &Type) -> bool {
        self.guarded(Relation::NotSoftSubtype, t, s, false, |cx| {
            cx.not_soft_subtype(t, s)
        })
    }

    /// Whether `t` can never be a subtype of `s`, treating type variables by their bounds
    /// and comparing through casts instead of subtyping.
    fn not_soft_subtype(&mut self, t: &Type, s: &Type) -> bool {
        if t == s {
            return false;
        }
        if t.is_type_var() {
            let upper = self.upper_bound(t);
            let relaxed = self.relax_bound(s);
            return !self.is_castable(&upper, &relaxed);
        }
        let s = if s.is_wildcard() {
            s.clone()
        } else {
            self.cvar_upper_bound(s)
        };
        let relaxed = self.relax_bound(&s);
        !self.is_subtype(t, &relaxed)
    }

    /// Type variables are approximated by the erasure of their bound.
    fn relax_bound(&self, ty: &Type) -> Type {
        if ty.is_type_var() {
            let bound = self.skip_type_vars(ty);
            self.erasure(&bound)
        } else {
            ty.clone()
        }
    }
}
