use crate::{ClassType, Type, TyContext, WildcardBound, WildcardType};

impl TyContext<'_> {
    /// Capture conversion (JLS 5.1.10).
    ///
    /// Every wildcard argument of a parameterized class type is replaced by a fresh capture
    /// variable allocated in this context. Bounds follow the usual rules:
    /// - `?` gets the formal's bound,
    /// - `? extends T` gets `glb(T, formal bound)`,
    /// - `? super T` gets the formal's bound and lower bound `T`.
    ///
    /// Formal bounds are substituted with the new arguments, so F-bounds refer to the capture
    /// variables. A variable whose upper and lower bounds coincide collapses to that type.
    /// The enclosing instance type is captured first. Types without wildcard arguments are
    /// returned unchanged.
    pub fn capture(&mut self, ty: &Type) -> Type {
        let Type::Class(ct) = ty else {
            return ty.clone();
        };

        let mut current = ct.clone();
        if let Some(outer) = ct.outer.as_deref() {
            let captured_outer = self.capture(outer);
            if &captured_outer != outer {
                current.outer = Some(Box::new(captured_outer));
            }
        }

        if !current.args.iter().any(Type::is_wildcard) {
            return Type::Class(current);
        }
        let Some(def) = self.class_def(current.def) else {
            return Type::Class(current);
        };
        let formals = def.type_params.clone();
        if formals.len() != current.args.len() {
            tracing::debug!(
                target: "nova.generics",
                class = %def.name,
                expected = formals.len(),
                found = current.args.len(),
                "skipping capture of type with mismatched argument count"
            );
            return Type::Class(current);
        }

        let mut captured_args = Vec::with_capacity(current.args.len());
        let mut pending = Vec::new();
        for (idx, arg) in current.args.iter().enumerate() {
            match arg {
                Type::Wildcard(w) => {
                    let wildcard = WildcardType {
                        bound: w.bound.clone(),
                        formal: w.formal.or(Some(formals[idx])),
                    };
                    let id = self.alloc_capture(wildcard);
                    captured_args.push(Type::Captured(id));
                    pending.push((idx, id));
                }
                other => captured_args.push(other.clone()),
            }
        }

        for (idx, id) in pending {
            let formal_bound = self.type_var_bound(formals[idx]);
            let declared = self.subst(&formal_bound, &formals, &captured_args);
            let Type::Wildcard(w) = &current.args[idx] else {
                continue;
            };
            let (upper, lower) = match &w.bound {
                WildcardBound::Unbounded => (declared, Type::Null),
                WildcardBound::Extends(bound) => (self.glb(bound, &declared), Type::Null),
                WildcardBound::Super(bound) => (declared, (**bound).clone()),
            };
            let collapses = !lower.is_null()
                && !upper.is_error()
                && !lower.is_error()
                && self.is_same_type(&upper, &lower);
            if collapses {
                captured_args[idx] = upper;
            } else {
                self.set_capture_bounds(id, upper, lower);
            }
        }

        tracing::trace!(target: "nova.generics", class = %def.name, "captured wildcard arguments");
        Type::Class(ClassType {
            args: captured_args,
            ..current
        })
    }

    /// Capture every type in `tys`.
    pub fn capture_all(&mut self, tys: &[Type]) -> Vec<Type> {
        tys.iter().map(|t| self.capture(t)).collect()
    }

    /// Whether `ty` is a capture variable created from `wildcard`.
    pub fn is_capture_of(&self, ty: &Type, wildcard: &WildcardType) -> bool {
        let Type::Captured(id) = ty else {
            return false;
        };
        self.captured(*id)
            .is_some_and(|var| var.wildcard.bound == wildcard.bound)
    }
}
