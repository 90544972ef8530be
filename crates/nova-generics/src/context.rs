use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::{
    CapturedVarId, ClassDef, ClassId, ClassType, InferenceSession, RelationOptions, Type, TypeEnv,
    TypeParamDef, TypeVarId, WellKnownTypes, WildcardBound, WildcardType,
};

/// A capture variable introduced by capture conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedVar {
    pub upper: Type,
    /// `Type::Null` when the wildcard had no `super` bound.
    pub lower: Type,
    /// The wildcard this variable was captured from.
    pub wildcard: WildcardType,
}

/// Relations that keep an in-progress set of type pairs to terminate on recursive types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Relation {
    AsSuper,
    SameType,
    Contains,
    Disjoint,
    Castable,
    NotSoftSubtype,
    Merge,
}

#[derive(Debug, Default)]
pub(crate) struct Caches {
    pub(crate) supertype: HashMap<Type, Option<Type>>,
    pub(crate) interfaces: HashMap<Type, Vec<Type>>,
    pub(crate) closure: HashMap<Type, Vec<Type>>,
    pub(crate) rank: HashMap<RankKey, u32>,
}

/// Declaring symbol a memoized rank belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum RankKey {
    Class(ClassId),
    TypeVar(TypeVarId),
    Captured(CapturedVarId),
}

/// Per-session typing context.
///
/// Owns everything an algorithm may allocate or memoize while it runs: capture variables,
/// fresh type variables for renamed generic signatures, inference variables, the
/// supertype/closure caches, and the in-progress pair sets that make relations terminate on
/// F-bounded types. The shared [`TypeEnv`] is never mutated, so one environment can back any
/// number of contexts.
///
/// Every subtype check on a type with wildcard arguments captures it, allocating fresh
/// capture variables that live until [`TyContext::reset`]. The caches keyed by captured
/// types grow with them, so a long-lived context should be reset between unrelated queries.
pub struct TyContext<'env> {
    base: &'env dyn TypeEnv,
    options: RelationOptions,
    locals: Vec<TypeParamDef>,
    captures: Vec<CapturedVar>,
    pub(crate) infer: InferenceSession,
    pub(crate) cache: Caches,
    in_progress: HashSet<(Relation, Type, Type)>,
    depth: usize,
}

impl fmt::Debug for TyContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TyContext")
            .field("options", &self.options)
            .field("locals", &self.locals)
            .field("captures", &self.captures)
            .finish_non_exhaustive()
    }
}

impl<'env> TyContext<'env> {
    pub fn new(base: &'env dyn TypeEnv) -> Self {
        Self::with_options(base, RelationOptions::default())
    }

    pub fn with_options(base: &'env dyn TypeEnv, options: RelationOptions) -> Self {
        Self {
            base,
            options,
            locals: Vec::new(),
            captures: Vec::new(),
            infer: InferenceSession::default(),
            cache: Caches::default(),
            in_progress: HashSet::new(),
            depth: 0,
        }
    }

    pub fn options(&self) -> &RelationOptions {
        &self.options
    }

    /// Clear all context-local allocations and caches.
    ///
    /// Types produced before the reset may mention capture or local variables that no longer
    /// resolve.
    pub fn reset(&mut self) {
        self.locals.clear();
        self.captures.clear();
        self.infer = InferenceSession::default();
        self.cache = Caches::default();
        self.in_progress.clear();
        self.depth = 0;
    }

    pub(crate) fn env(&self) -> &'env dyn TypeEnv {
        self.base
    }

    pub(crate) fn class_def(&self, id: ClassId) -> Option<&'env ClassDef> {
        self.base.class(id)
    }

    pub fn object_type(&self) -> Type {
        Type::class(self.well_known().object, vec![])
    }

    pub(crate) fn is_object(&self, ty: &Type) -> bool {
        matches!(ty, Type::Class(ct) if ct.def == self.well_known().object)
    }

    pub fn captured(&self, id: CapturedVarId) -> Option<&CapturedVar> {
        self.captures.get(id.index())
    }

    pub(crate) fn alloc_capture(&mut self, wildcard: WildcardType) -> CapturedVarId {
        let idx: u32 = self
            .captures
            .len()
            .try_into()
            .expect("too many capture variables");
        let id = CapturedVarId(idx);
        let object = self.object_type();
        self.captures.push(CapturedVar {
            upper: object,
            lower: Type::Null,
            wildcard,
        });
        id
    }

    pub(crate) fn set_capture_bounds(&mut self, id: CapturedVarId, upper: Type, lower: Type) {
        if let Some(var) = self.captures.get_mut(id.index()) {
            var.upper = upper;
            var.lower = lower;
        }
        self.cache.rank.remove(&RankKey::Captured(id));
    }

    /// Allocate a context-local type variable.
    pub(crate) fn add_local_type_param(&mut self, def: TypeParamDef) -> TypeVarId {
        let idx: u32 = self
            .locals
            .len()
            .try_into()
            .expect("too many context-local type params");
        let id = TypeVarId::new_context_local(idx);
        self.locals.push(def);
        id
    }

    pub(crate) fn set_local_upper_bounds(&mut self, id: TypeVarId, upper_bounds: Vec<Type>) {
        if let Some(def) = id.context_local_index().and_then(|idx| self.locals.get_mut(idx)) {
            def.upper_bounds = upper_bounds;
        }
        self.cache.rank.remove(&RankKey::TypeVar(id));
    }

    /// Declared bound of a type variable: `Object`, the single bound, or an intersection.
    pub fn type_var_bound(&self, id: TypeVarId) -> Type {
        let Some(def) = self.type_param(id) else {
            return self.object_type();
        };
        match def.upper_bounds.as_slice() {
            [] => self.object_type(),
            [single] => single.clone(),
            bounds => Type::Intersection(bounds.to_vec()),
        }
    }

    /// The upper bound of a type variable or capture variable; other types are returned as-is.
    pub fn upper_bound(&self, ty: &Type) -> Type {
        match ty {
            Type::TypeVar(id) => self.type_var_bound(*id),
            Type::Captured(id) => self
                .captured(*id)
                .map(|c| c.upper.clone())
                .unwrap_or_else(|| self.object_type()),
            Type::Wildcard(_) => self.wild_upper_bound(ty),
            other => other.clone(),
        }
    }

    /// `? extends T` gives `T` (recursively); `?` and `? super T` give the bound of the formal
    /// (or `Object`). Non-wildcards are unchanged.
    pub fn wild_upper_bound(&self, ty: &Type) -> Type {
        let Type::Wildcard(w) = ty else {
            return ty.clone();
        };
        match &w.bound {
            WildcardBound::Extends(bound) => self.wild_upper_bound(bound),
            WildcardBound::Unbounded | WildcardBound::Super(_) => match w.formal {
                // The formal's bound may mention the formal itself (F-bounds); keep it opaque.
                Some(formal) => match self.type_var_bound(formal) {
                    bound if bound.mentions_var(formal) => self.object_type(),
                    bound => bound,
                },
                None => self.object_type(),
            },
        }
    }

    /// `? super T` gives `T` (recursively); other wildcards give the null type. Non-wildcards
    /// are unchanged.
    pub fn wild_lower_bound(&self, ty: &Type) -> Type {
        let Type::Wildcard(w) = ty else {
            return ty.clone();
        };
        match &w.bound {
            WildcardBound::Super(bound) => self.wild_lower_bound(bound),
            _ => Type::Null,
        }
    }

    pub fn cvar_upper_bound(&self, ty: &Type) -> Type {
        match ty {
            Type::Captured(id) => self
                .captured(*id)
                .map(|c| c.upper.clone())
                .unwrap_or_else(|| ty.clone()),
            _ => ty.clone(),
        }
    }

    /// Lower bound of a capture variable (or a type variable declared with one).
    pub fn cvar_lower_bound(&self, ty: &Type) -> Type {
        match ty {
            Type::Captured(id) => match self.captured(*id) {
                Some(var) if !var.lower.is_null() => self.cvar_lower_bound(&var.lower),
                Some(_) => Type::Null,
                None => ty.clone(),
            },
            Type::TypeVar(id) => match self.type_param(*id).and_then(|d| d.lower_bound.clone()) {
                Some(lower) => self.cvar_lower_bound(&lower),
                None => ty.clone(),
            },
            _ => ty.clone(),
        }
    }

    /// Follow type variable bounds until a non-variable type is reached.
    pub fn skip_type_vars(&self, ty: &Type) -> Type {
        let mut current = ty.clone();
        for _ in 0..self.options.max_depth {
            if !current.is_type_var() {
                return current;
            }
            current = self.upper_bound(&current);
        }
        current
    }

    pub(crate) fn is_interface_class(&self, id: ClassId) -> bool {
        self.class_def(id).is_some_and(ClassDef::is_interface)
    }

    pub(crate) fn is_final_class(&self, id: ClassId) -> bool {
        self.class_def(id).is_some_and(|c| c.modifiers.is_final)
    }

    /// Interfaces (and intersections made only of interfaces).
    pub fn is_interface(&self, ty: &Type) -> bool {
        match ty {
            Type::Class(ct) => self.is_interface_class(ct.def),
            Type::Intersection(parts) => parts.iter().all(|p| self.is_interface(p)),
            _ => false,
        }
    }

    /// Type parameters of `def` and, for inner classes, of every enclosing instance class,
    /// outermost first.
    pub fn declared_all_params(&self, def: ClassId) -> Vec<TypeVarId> {
        let Some(class_def) = self.class_def(def) else {
            return Vec::new();
        };
        let mut params = match class_def.outer {
            Some(outer) if !class_def.modifiers.is_static => self.declared_all_params(outer),
            _ => Vec::new(),
        };
        params.extend(class_def.type_params.iter().copied());
        params
    }

    /// Actual type arguments of `ty` including those of its enclosing instance types.
    pub fn all_params(&self, ty: &Type) -> Vec<Type> {
        let Type::Class(ct) = ty else {
            return Vec::new();
        };
        let mut params = match ct.outer.as_deref() {
            Some(outer) => self.all_params(outer),
            None => Vec::new(),
        };
        params.extend(ct.args.iter().cloned());
        params
    }

    pub fn is_parameterized(&self, ty: &Type) -> bool {
        !self.all_params(ty).is_empty()
    }

    /// A generic class used without any type arguments.
    pub fn is_raw(&self, ty: &Type) -> bool {
        let Type::Class(ct) = ty else {
            return false;
        };
        self.is_raw_class(ct)
    }

    pub(crate) fn is_raw_class(&self, ct: &ClassType) -> bool {
        if !ct.args.is_empty() {
            return false;
        }
        if ct
            .outer
            .as_deref()
            .is_some_and(|outer| self.is_parameterized(outer))
        {
            return false;
        }
        !self.declared_all_params(ct.def).is_empty()
    }

    /// The generic declaration of `def` as a type: `List<E>`.
    pub fn declared_type(&self, def: ClassId) -> Option<Type> {
        let class_def = self.class_def(def)?;
        let outer = match class_def.outer {
            Some(outer) if !class_def.modifiers.is_static => {
                self.declared_type(outer).map(Box::new)
            }
            _ => None,
        };
        Some(Type::Class(ClassType {
            def,
            outer,
            args: class_def.type_params.iter().map(|v| Type::TypeVar(*v)).collect(),
            erased_supertypes: false,
        }))
    }

    /// Run `f` unless the `(relation, t, s)` pair is already being evaluated further up the
    /// stack or the depth limit is reached; in both cases `on_cycle` is returned instead.
    pub(crate) fn guarded(
        &mut self,
        relation: Relation,
        t: &Type,
        s: &Type,
        on_cycle: bool,
        f: impl FnOnce(&mut Self) -> bool,
    ) -> bool {
        let key = (relation, t.clone(), s.clone());
        if self.in_progress.contains(&key) {
            tracing::debug!(target: "nova.generics", ?relation, on_cycle, "recursive type pair");
            return on_cycle;
        }
        if self.depth >= self.options.max_depth {
            tracing::debug!(
                target: "nova.generics",
                ?relation,
                max_depth = self.options.max_depth,
                "relation depth limit reached"
            );
            return on_cycle;
        }
        self.in_progress.insert(key.clone());
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        self.in_progress.remove(&key);
        result
    }

    /// Like [`Self::guarded`] for relations without a pair set: only the depth limit applies.
    pub(crate) fn nested(&mut self, on_limit: bool, f: impl FnOnce(&mut Self) -> bool) -> bool {
        if self.depth >= self.options.max_depth {
            tracing::debug!(
                target: "nova.generics",
                max_depth = self.options.max_depth,
                "relation depth limit reached"
            );
            return on_limit;
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// Mark `pair` as in progress for a non-boolean computation. Returns `false` if it already
    /// was.
    pub(crate) fn enter_pair(&mut self, relation: Relation, t: &Type, s: &Type) -> bool {
        self.in_progress.insert((relation, t.clone(), s.clone()))
    }

    pub(crate) fn leave_pair(&mut self, relation: Relation, t: &Type, s: &Type) {
        self.in_progress.remove(&(relation, t.clone(), s.clone()));
    }
}

impl TypeEnv for TyContext<'_> {
    fn class(&self, id: ClassId) -> Option<&ClassDef> {
        self.base.class(id)
    }

    fn type_param(&self, id: TypeVarId) -> Option<&TypeParamDef> {
        if let Some(idx) = id.context_local_index() {
            return self.locals.get(idx);
        }
        self.base.type_param(id)
    }

    fn lookup_class(&self, name: &str) -> Option<ClassId> {
        self.base.lookup_class(name)
    }

    fn well_known(&self) -> &WellKnownTypes {
        self.base.well_known()
    }
}
