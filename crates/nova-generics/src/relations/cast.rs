use crate::{ClassType, Type, TyContext, Warner};

use super::conversion::LintCategory;

impl TyContext<'_> {
    /// Casting conversion (JLS 5.5): whether a cast from `t` to `s` is statically legal.
    pub fn is_castable(&mut self, t: &Type, s: &Type) -> bool {
        let mut warner = Warner::default();
        self.is_castable_with(t, s, &mut warner)
    }

    /// Like [`Self::is_castable`], recording [`LintCategory::Unchecked`] for casts that
    /// cannot be fully checked at runtime.
    pub fn is_castable_with(&mut self, t: &Type, s: &Type, warner: &mut Warner) -> bool {
        if t == s || t.is_error() || s.is_error() {
            return true;
        }
        if t.is_primitive() != s.is_primitive() {
            if !self.options().allow_boxing {
                return false;
            }
            let t = self.skip_type_vars(t);
            if self.is_convertible_with(&t, s, warner) {
                return true;
            }
            // Object -> int by unboxing through the box class.
            return match s {
                Type::Primitive(prim) => {
                    let boxed = self.boxed_type(*prim);
                    self.is_subtype(&boxed, &t)
                }
                _ => false,
            };
        }
        self.nested(true, |cx| cx.cast_structural(t, s, warner))
    }

    fn cast_structural(&mut self, t: &Type, s: &Type, warner: &mut Warner) -> bool {
        match t {
            Type::Primitive(p) => match s {
                Type::Primitive(q) => p.is_numeric() == q.is_numeric(),
                _ => false,
            },
            Type::Void | Type::Method(_) | Type::ForAll(_) => false,
            Type::Null => s.is_reference(),
            Type::Error(_) | Type::Undet(_) => true,
            Type::Wildcard(_) => {
                let upper = self.wild_upper_bound(t);
                self.is_castable_with(&upper, s, warner)
            }
            Type::TypeVar(_) | Type::Captured(_) => match s {
                Type::Null => true,
                Type::TypeVar(_) | Type::Captured(_) => {
                    if self.is_subtype(t, s) {
                        return true;
                    }
                    let upper = self.upper_bound(t);
                    if self.is_castable(&upper, s) {
                        warner.warn(LintCategory::Unchecked);
                        return true;
                    }
                    false
                }
                _ => {
                    let upper = self.upper_bound(t);
                    self.is_castable_with(&upper, s, warner)
                }
            },
            Type::Array(t_elem) => match s {
                Type::Null => true,
                Type::TypeVar(_) | Type::Captured(_) => {
                    if self.is_castable(s, t) {
                        warner.warn(LintCategory::Unchecked);
                        true
                    } else {
                        false
                    }
                }
                Type::Class(_) | Type::Intersection(_) => self.is_subtype(t, s),
                Type::Array(s_elem) => {
                    if t_elem.is_primitive() || s_elem.is_primitive() {
                        t_elem == s_elem
                    } else {
                        self.is_castable_with(t_elem, s_elem, warner)
                    }
                }
                _ => false,
            },
            Type::Class(_) | Type::Intersection(_) => self.cast_from_class(t, s, warner),
        }
    }

    fn cast_from_class(&mut self, t: &Type, s: &Type, warner: &mut Warner) -> bool {
        match s {
            Type::Null => return true,
            Type::TypeVar(_) | Type::Captured(_) => {
                let upper = self.upper_bound(s);
                if self.is_castable(t, &upper) {
                    warner.warn(LintCategory::Unchecked);
                    return true;
                }
                return false;
            }
            Type::Intersection(parts) => {
                return parts.iter().all(|part| self.is_castable_with(t, part, warner));
            }
            Type::Class(_) | Type::Array(_) => {}
            _ => return false,
        }
        if let Type::Intersection(parts) = t {
            return parts.iter().all(|part| self.is_castable_with(part, s, warner));
        }

        let t_erased = self.erasure(t);
        let s_erased = self.erasure(s);
        let upcast = self.is_subtype(&t_erased, &s_erased);
        if upcast || self.is_subtype(&s_erased, &t_erased) {
            if !upcast && matches!(s, Type::Array(_)) {
                if !self.is_reifiable(s) {
                    warner.warn(LintCategory::Unchecked);
                }
                return true;
            }
            if self.is_raw(s) {
                return true;
            }
            if self.is_raw(t) {
                if !self.is_unbounded(s) {
                    warner.warn(LintCategory::Unchecked);
                }
                return true;
            }
            // Compare arguments after viewing the subclass side as the superclass.
            let (sub, sup) = if upcast { (t, s) } else { (s, t) };
            let Type::Class(sup_ct) = sup else {
                return true;
            };
            let Some(viewed) = self.as_super(sub, sup_ct.def) else {
                return true;
            };
            let viewed_args = self.all_params(&viewed);
            let sup_args = self.all_params(sup);
            if self.disjoint_types(&viewed_args, &sup_args) {
                return false;
            }
            if self.gives_warning(t, s) {
                warner.warn(LintCategory::Unchecked);
            }
            return true;
        }

        // Unrelated after erasure: only a side cast between an interface and a non-final
        // class (or a final class implementing the interface generically) can succeed.
        let (Type::Class(tc), Type::Class(sc)) = (t, s) else {
            return false;
        };
        let t_interface = self.is_interface_class(tc.def);
        let s_interface = self.is_interface_class(sc.def);
        if s_interface {
            if !self.is_final_class(tc.def) {
                return self.side_cast(t, s, warner);
            }
            return self.side_cast_final(t, s, warner);
        }
        if t_interface {
            if !self.is_final_class(sc.def) {
                return self.side_cast(t, s, warner);
            }
            return self.side_cast_final(t, s, warner);
        }
        false
    }

    /// Cast between two non-final unrelated types one of which is an interface: rejected
    /// only when a common generic superinterface would need disjoint arguments.
    fn side_cast(&mut self, from: &Type, to: &Type, warner: &mut Warner) -> bool {
        let target = to.clone();
        let (from, to, reverse) = match to {
            Type::Class(ct) if !self.is_interface_class(ct.def) => (to.clone(), from.clone(), true),
            _ => (from.clone(), to.clone(), false),
        };
        let from_erased = self.erasure(&from);
        let common = self.super_closure(&to, &from_erased);
        let mut gives_warning = common.is_empty();
        for sup in &common {
            let Type::Class(sup_ct) = sup else {
                continue;
            };
            let Some(viewed) = self.as_super(&from, sup_ct.def) else {
                continue;
            };
            if self.disjoint_types(&self.all_params(&viewed), &self.all_params(sup)) {
                return false;
            }
            gives_warning = gives_warning
                || if reverse {
                    self.gives_warning(sup, &viewed)
                } else {
                    self.gives_warning(&viewed, sup)
                };
        }
        let checked = if reverse { &from } else { &target };
        if gives_warning && !self.is_reifiable(checked) {
            warner.warn(LintCategory::Unchecked);
        }
        true
    }

    /// Cast between a final class and an interface it does not implement after erasure.
    fn side_cast_final(&mut self, from: &Type, to: &Type, warner: &mut Warner) -> bool {
        let target = to.clone();
        let (from, to, reverse) = match to {
            Type::Class(ct) if !self.is_interface_class(ct.def) => (to.clone(), from.clone(), true),
            _ => (from.clone(), to.clone(), false),
        };
        let Type::Class(to_ct) = &to else {
            return false;
        };
        let Some(viewed) = self.as_super(&from, to_ct.def) else {
            return false;
        };
        if self.disjoint_types(&self.all_params(&viewed), &self.all_params(&to)) {
            return false;
        }
        let gives_warning = if reverse {
            self.gives_warning(&to, &viewed)
        } else {
            self.gives_warning(&viewed, &to)
        };
        if !self.is_reifiable(&target) && gives_warning {
            warner.warn(LintCategory::Unchecked);
        }
        true
    }

    /// Superinterfaces of `t` (transitively) whose erasure is a supertype of `s`, keeping
    /// only the most specific ones.
    fn super_closure(&mut self, t: &Type, s: &Type) -> Vec<Type> {
        let mut cl = Vec::new();
        for iface in self.interfaces(t) {
            let erased = self.erasure(&iface);
            if self.is_subtype(s, &erased) {
                cl = self.insert(cl, &iface);
            } else {
                let nested = self.super_closure(&iface, s);
                cl = self.union(cl, nested);
            }
        }
        cl
    }

    /// Whether converting `from` to the parameterized type `to` cannot be checked at runtime.
    fn gives_warning(&mut self, from: &Type, to: &Type) -> bool {
        let Type::Class(ClassType { def, .. }) = to else {
            return false;
        };
        if !self.is_parameterized(to) || self.is_unbounded(to) || self.is_subtype(from, to) {
            return false;
        }
        match self.as_sub(from, *def) {
            Some(sub) => {
                let to_args = self.all_params(to);
                let sub_args = self.all_params(&sub);
                !self.contains_type_all(&to_args, &sub_args)
            }
            None => true,
        }
    }
}
