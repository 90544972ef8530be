//! Least upper bound and greatest lower bound (JLS 4.9, 15.25).

use std::collections::HashSet;

use crate::context::Relation;
use crate::supertypes::same_symbol;
use crate::{Type, TyContext, WildcardBound, WildcardType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BoundKind {
    Unknown,
    Array,
    Class,
}

impl TyContext<'_> {
    /// Least upper bound of `ts`.
    ///
    /// Arrays of references lub element-wise; arrays of different primitives (or arrays mixed
    /// with classes) fall back to the array supertype `Object & Serializable & Cloneable`.
    /// For classes the erased candidates common to every input are reduced to their minimal
    /// elements and each is re-instantiated with merged arguments, so `lub(List<Integer>,
    /// List<String>)` is `List<? extends Comparable<...> & Serializable>`. The null type is
    /// ignored; an error anywhere yields that error.
    pub fn lub(&mut self, ts: &[Type]) -> Type {
        if let Some(err) = ts.iter().find(|t| t.is_error()) {
            return err.clone();
        }
        let mut kinds = Vec::with_capacity(ts.len());
        let mut seen_array = false;
        let mut seen_class = false;
        for t in ts {
            let kind = match t {
                Type::Array(_) => BoundKind::Array,
                Type::Class(_) | Type::Intersection(_) => BoundKind::Class,
                Type::TypeVar(_) | Type::Captured(_) => {
                    if matches!(self.skip_type_vars(t), Type::Array(_)) {
                        BoundKind::Array
                    } else {
                        BoundKind::Class
                    }
                }
                Type::Primitive(_) | Type::Void => return Type::error(),
                _ => BoundKind::Unknown,
            };
            seen_array |= kind == BoundKind::Array;
            seen_class |= kind == BoundKind::Class;
            kinds.push(kind);
        }

        match (seen_array, seen_class) {
            (false, false) => Type::Null,
            (true, false) => {
                let arrays: Vec<Type> = ts
                    .iter()
                    .zip(&kinds)
                    .filter(|(_, k)| **k == BoundKind::Array)
                    .map(|(t, _)| self.skip_type_vars(t))
                    .collect();
                let elems: Vec<Type> = arrays
                    .iter()
                    .filter_map(|a| a.elem_type().cloned())
                    .collect();
                if let Some(first) = elems.iter().find(|e| e.is_primitive()) {
                    if elems.iter().all(|e| e == first) {
                        return arrays[0].clone();
                    }
                    return self.array_super_type();
                }
                Type::array(self.lub(&elems))
            }
            (false, true) => {
                let classes: Vec<Type> = ts
                    .iter()
                    .zip(&kinds)
                    .filter(|(_, k)| **k == BoundKind::Class)
                    .map(|(t, _)| t.clone())
                    .collect();
                self.lub_classes(&classes)
            }
            (true, true) => {
                let mut classes: Vec<Type> = ts
                    .iter()
                    .zip(&kinds)
                    .filter(|(_, k)| **k == BoundKind::Class)
                    .map(|(t, _)| t.clone())
                    .collect();
                classes.push(self.array_super_type());
                self.lub(&classes)
            }
        }
    }

    fn lub_classes(&mut self, ts: &[Type]) -> Type {
        let Some((first, rest)) = ts.split_first() else {
            return self.object_type();
        };
        let mut cl = self.erased_supertypes(first);
        for t in rest {
            let other = self.erased_supertypes(t);
            cl = self.intersect(cl, other);
        }
        let mec = self.closure_min(cl);
        tracing::trace!(
            target: "nova.generics",
            candidates = ?mec,
            "lub minimal erased candidates"
        );

        let mut candidates = Vec::new();
        for erased in &mec {
            let mut lci: Vec<Type> = self.as_super_of(first, erased).into_iter().collect();
            for t in rest {
                let other: Vec<Type> = self.as_super_of(t, erased).into_iter().collect();
                lci = self.intersect(lci, other);
            }
            candidates.extend(lci);
        }
        self.compound_min(candidates)
    }

    /// Closure of `ty` with class entries erased.
    fn erased_supertypes(&mut self, ty: &Type) -> Vec<Type> {
        self.closure(ty)
            .into_iter()
            .map(|t| if t.is_type_var() { t } else { self.erasure(&t) })
            .collect()
    }

    /// `ty` viewed as the class (or type variable) named by `target`.
    fn as_super_of(&mut self, ty: &Type, target: &Type) -> Option<Type> {
        match target {
            Type::Class(ct) => self.as_super(ty, ct.def),
            Type::TypeVar(_) | Type::Captured(_) => {
                let mut current = ty.clone();
                for _ in 0..self.options().max_depth {
                    if same_symbol(&current, target) {
                        return Some(current);
                    }
                    if !current.is_type_var() {
                        return None;
                    }
                    current = self.upper_bound(&current);
                }
                None
            }
            _ => None,
        }
    }

    /// Intersection of two ordered closures. Entries for the same class are merged: equal
    /// instantiations are kept, differing ones become one instantiation with wildcard
    /// arguments, and raw meets anything as raw.
    pub fn intersect(&mut self, a: Vec<Type>, b: Vec<Type>) -> Vec<Type> {
        let mut out = Vec::new();
        let mut a = a.into_iter().peekable();
        let mut b = b.into_iter().peekable();
        loop {
            let (Some(x), Some(y)) = (a.peek(), b.peek()) else {
                break;
            };
            if same_symbol(x, y) {
                let (x, y) = (x.clone(), y.clone());
                a.next();
                b.next();
                let both_parameterized = matches!((&x, &y), (Type::Class(xc), Type::Class(yc))
                    if !xc.args.is_empty() && !yc.args.is_empty());
                let merged = if both_parameterized {
                    if self.is_same_type(&x, &y) {
                        x
                    } else {
                        self.merge(&x, &y)
                    }
                } else if self.is_raw(&x) || self.is_raw(&y) {
                    self.erasure(&x)
                } else {
                    x
                };
                out.push(merged);
            } else if self.precedes(x, y) {
                a.next();
            } else {
                b.next();
            }
        }
        out
    }

    /// One instantiation of a generic class that both `c1` and `c2` are subtypes of.
    fn merge(&mut self, c1: &Type, c2: &Type) -> Type {
        let (Type::Class(ct1), Type::Class(ct2)) = (c1, c2) else {
            return c1.clone();
        };
        let formals = self
            .class_def(ct1.def)
            .map(|d| d.type_params.clone())
            .unwrap_or_default();
        let mut merged = Vec::with_capacity(ct1.args.len());
        for (idx, (a1, a2)) in ct1.args.iter().zip(&ct2.args).enumerate() {
            let arg = if self.contains_type(a1, a2) {
                a1.clone()
            } else if self.contains_type(a2, a1) {
                a2.clone()
            } else if self.enter_pair(Relation::Merge, c1, c2) {
                let upper1 = self.wild_upper_bound(a1);
                let upper2 = self.wild_upper_bound(a2);
                let lub = self.lub(&[upper1, upper2]);
                self.leave_pair(Relation::Merge, c1, c2);
                Type::Wildcard(WildcardType {
                    bound: WildcardBound::Extends(Box::new(lub)),
                    formal: formals.get(idx).copied(),
                })
            } else {
                Type::Wildcard(WildcardType {
                    bound: WildcardBound::Unbounded,
                    formal: formals.get(idx).copied(),
                })
            };
            merged.push(arg);
        }
        Type::Class(crate::ClassType {
            def: ct1.def,
            outer: ct1.outer.clone(),
            args: merged,
            erased_supertypes: false,
        })
    }

    /// Minimal elements of an ordered closure: entries that are not a supertype of an earlier
    /// entry. Classes come before interfaces in the result.
    pub fn closure_min(&mut self, cl: Vec<Type>) -> Vec<Type> {
        let mut classes = Vec::new();
        let mut interfaces = Vec::new();
        let mut skip: HashSet<Type> = HashSet::new();
        for (idx, current) in cl.iter().enumerate() {
            if skip.contains(current) {
                continue;
            }
            if self.is_interface(current) {
                interfaces.push(current.clone());
            } else {
                classes.push(current.clone());
            }
            for later in &cl[idx + 1..] {
                if !skip.contains(later) && self.is_subtype_no_capture(current, later) {
                    skip.insert(later.clone());
                }
            }
        }
        classes.extend(interfaces);
        classes
    }

    /// The minimal elements of `ts` as a single type: `Object` if empty, the element itself
    /// if there is one, an intersection otherwise.
    pub fn compound_min(&mut self, ts: Vec<Type>) -> Type {
        if ts.is_empty() {
            return self.object_type();
        }
        let mut sorted = Vec::new();
        for t in ts {
            sorted = self.insert(sorted, &t);
        }
        let min = self.closure_min(sorted);
        self.make_intersection(min)
    }

    /// Build an intersection with the class component (if any) first.
    pub fn make_intersection(&self, mut bounds: Vec<Type>) -> Type {
        match bounds.len() {
            0 => self.object_type(),
            1 => bounds.remove(0),
            _ => {
                if let Some(pos) = bounds.iter().position(|b| !self.is_interface(b)) {
                    let class_part = bounds.remove(pos);
                    bounds.insert(0, class_part);
                }
                Type::Intersection(bounds)
            }
        }
    }

    /// Greatest lower bound of two types.
    ///
    /// If one is a subtype of the other that one is returned. Otherwise the union of both
    /// closures is reduced to its minimal elements; more than one class among them is an
    /// error unless some are capture variables whose lower bounds can stand in for them.
    pub fn glb(&mut self, t: &Type, s: &Type) -> Type {
        if t.is_error() {
            return t.clone();
        }
        if s.is_error() {
            return s.clone();
        }
        if t.is_primitive() || s.is_primitive() {
            return Type::error();
        }
        if self.is_subtype_no_capture(t, s) {
            return t.clone();
        }
        if self.is_subtype_no_capture(s, t) {
            return s.clone();
        }

        let t_closure = self.closure(t);
        let s_closure = self.closure(s);
        let flat = self.union(t_closure, s_closure);
        let bounds = self.closure_min(flat);
        match bounds.len() {
            0 => self.object_type(),
            1 => bounds[0].clone(),
            _ => {
                let mut class_count = 0;
                let mut capture_vars = Vec::new();
                let mut lower_bounds = Vec::new();
                for bound in &bounds {
                    if self.is_interface(bound) {
                        continue;
                    }
                    class_count += 1;
                    let lower = self.cvar_lower_bound(bound);
                    if &lower != bound && !lower.is_null() {
                        capture_vars.push(bound.clone());
                        lower_bounds.push(lower);
                    }
                }
                if class_count > 1 {
                    if lower_bounds.is_empty() {
                        tracing::debug!(
                            target: "nova.generics",
                            class_count,
                            "glb of unrelated classes"
                        );
                        return Type::error_of(t.clone());
                    }
                    let retry: Vec<Type> = bounds
                        .into_iter()
                        .filter(|b| !capture_vars.contains(b))
                        .chain(lower_bounds)
                        .collect();
                    return self.glb_all(&retry);
                }
                self.make_intersection(bounds)
            }
        }
    }

    /// Fold [`Self::glb`] over `ts`; `Object` for an empty slice.
    pub fn glb_all(&mut self, ts: &[Type]) -> Type {
        let Some((first, rest)) = ts.split_first() else {
            return self.object_type();
        };
        let mut acc = first.clone();
        for t in rest {
            acc = self.glb(&acc, t);
            if acc.is_error() {
                return acc;
            }
        }
        acc
    }
}
