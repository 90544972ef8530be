use crate::{InferenceBound, Type, TyContext, TypeEnv};

impl TyContext<'_> {
    /// `t <: s` (JLS 4.10), applying capture conversion to `t` first.
    pub fn is_subtype(&mut self, t: &Type, s: &Type) -> bool {
        self.is_subtype_inner(t, s, true)
    }

    /// `t <: s` without capturing `t`.
    pub fn is_subtype_no_capture(&mut self, t: &Type, s: &Type) -> bool {
        self.is_subtype_inner(t, s, false)
    }

    /// Element-wise `is_subtype` over two lists of equal length.
    pub fn is_subtypes(&mut self, ts: &[Type], ss: &[Type]) -> bool {
        ts.len() == ss.len() && ts.iter().zip(ss).all(|(t, s)| self.is_subtype(t, s))
    }

    /// `t :> s`, where `s` may be a type variable whose lower bound decides.
    pub fn is_super_type(&mut self, t: &Type, s: &Type) -> bool {
        match s {
            Type::Undet(id) => {
                self.record_bound(*id, InferenceBound::Upper, t);
                true
            }
            _ => self.is_subtype(s, t),
        }
    }

    fn is_subtype_inner(&mut self, t: &Type, s: &Type, capture: bool) -> bool {
        if t == s || t.is_error() || s.is_error() {
            return true;
        }
        if let Some(inst) = self.inst_of(t) {
            return self.is_subtype_inner(&inst, s, capture);
        }
        if let Some(inst) = self.inst_of(s) {
            return self.is_subtype_inner(t, &inst, capture);
        }
        if let Type::Undet(id) = s {
            if t.is_wildcard() {
                return false;
            }
            self.record_bound(*id, InferenceBound::Lower, t);
            return true;
        }
        if let Type::Intersection(parts) = s {
            return parts
                .iter()
                .all(|part| self.is_subtype_inner(t, part, capture));
        }

        let lower = self.cvar_lower_bound(&self.wild_lower_bound(s));
        if &lower != s && !lower.is_null() {
            let t = if capture { self.capture(t) } else { t.clone() };
            return self.nested(true, |cx| cx.is_subtype_no_capture(&t, &lower));
        }

        let t = if capture { self.capture(t) } else { t.clone() };
        self.nested(true, |cx| cx.subtype_structural(&t, s))
    }

    fn subtype_structural(&mut self, t: &Type, s: &Type) -> bool {
        match t {
            Type::Primitive(p) => matches!(s, Type::Primitive(q) if p.widens_to(*q)),
            Type::Void => matches!(s, Type::Void),
            Type::Null => matches!(
                s,
                Type::Null | Type::Class(_) | Type::Array(_) | Type::TypeVar(_) | Type::Captured(_)
            ),
            Type::TypeVar(_) | Type::Captured(_) => {
                let upper = self.upper_bound(t);
                if &upper == t {
                    return false;
                }
                self.is_subtype_no_capture(&upper, s)
            }
            Type::Wildcard(_) => {
                let upper = self.wild_upper_bound(t);
                self.is_subtype_no_capture(&upper, s)
            }
            Type::Class(_) => self.class_subtype(t, s),
            Type::Intersection(parts) => {
                parts
                    .iter()
                    .any(|part| self.is_subtype_no_capture(part, s))
            }
            Type::Array(elem) => match s {
                Type::Array(s_elem) => {
                    if elem.is_primitive() {
                        self.is_same_type(elem, s_elem)
                    } else {
                        self.is_subtype_no_capture(elem, s_elem)
                    }
                }
                Type::Class(sc) => {
                    let wk = self.well_known();
                    sc.args.is_empty()
                        && (sc.def == wk.object
                            || sc.def == wk.cloneable
                            || sc.def == wk.serializable)
                }
                _ => false,
            },
            Type::Undet(id) => {
                self.record_bound(*id, InferenceBound::Upper, s);
                true
            }
            Type::Method(_) | Type::ForAll(_) => false,
            Type::Error(_) => true,
        }
    }

    fn class_subtype(&mut self, t: &Type, s: &Type) -> bool {
        let Type::Class(sc) = s else {
            return false;
        };
        let Some(sup) = self.as_super(t, sc.def) else {
            return false;
        };
        let Type::Class(sup_ct) = &sup else {
            return sup.is_error();
        };
        if sup_ct.def != sc.def {
            return false;
        }
        if !sc.args.is_empty() && !self.contains_type_recursive(s, &sup) {
            return false;
        }
        match (sup_ct.outer.as_deref(), sc.outer.as_deref()) {
            (Some(sup_outer), Some(s_outer)) => self.is_subtype_no_capture(sup_outer, s_outer),
            _ => true,
        }
    }
}
