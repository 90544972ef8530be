//! Inference variables and the bounds relations record on them.
//!
//! Only the bookkeeping lives here: relations that meet a [`Type::Undet`] add a bound
//! instead of failing, and callers decide when to instantiate. The inference search itself
//! is out of scope.

use crate::{Type, TyContext, TypeVarId, UndetVarId};

/// Which side of an inference variable a recorded bound constrains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InferenceBound {
    /// `bound <: var`
    Lower,
    /// `var <: bound`
    Upper,
    /// `var == bound`
    Eq,
}

/// An inference variable standing in for the type parameter `origin`.
#[derive(Debug, Clone, PartialEq)]
pub struct UndetVar {
    pub origin: TypeVarId,
    pub lower: Vec<Type>,
    pub upper: Vec<Type>,
    pub eq: Vec<Type>,
    pub inst: Option<Type>,
}

impl UndetVar {
    fn new(origin: TypeVarId) -> Self {
        Self {
            origin,
            lower: Vec::new(),
            upper: Vec::new(),
            eq: Vec::new(),
            inst: None,
        }
    }

    fn bounds_mut(&mut self, kind: InferenceBound) -> &mut Vec<Type> {
        match kind {
            InferenceBound::Lower => &mut self.lower,
            InferenceBound::Upper => &mut self.upper,
            InferenceBound::Eq => &mut self.eq,
        }
    }

    pub fn bounds(&self, kind: InferenceBound) -> &[Type] {
        match kind {
            InferenceBound::Lower => &self.lower,
            InferenceBound::Upper => &self.upper,
            InferenceBound::Eq => &self.eq,
        }
    }
}

/// Opaque marker returned by [`InferenceSession::snapshot`].
#[derive(Debug, Clone, PartialEq)]
pub struct InferenceSnapshot {
    vars: Vec<UndetVar>,
}

/// The inference variables of one inference episode.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InferenceSession {
    vars: Vec<UndetVar>,
}

impl InferenceSession {
    pub fn var(&self, id: UndetVarId) -> Option<&UndetVar> {
        self.vars.get(id.index())
    }

    pub fn add_var(&mut self, origin: TypeVarId) -> UndetVarId {
        let idx: u32 = self
            .vars
            .len()
            .try_into()
            .expect("too many inference variables");
        let id = UndetVarId(idx);
        self.vars.push(UndetVar::new(origin));
        id
    }

    /// Returns `false` when the bound was already present (or the variable is unknown).
    pub fn add_bound(&mut self, id: UndetVarId, kind: InferenceBound, ty: Type) -> bool {
        let Some(var) = self.vars.get_mut(id.index()) else {
            return false;
        };
        let bounds = var.bounds_mut(kind);
        if bounds.contains(&ty) {
            return false;
        }
        bounds.push(ty);
        true
    }

    pub fn snapshot(&self) -> InferenceSnapshot {
        InferenceSnapshot {
            vars: self.vars.clone(),
        }
    }

    /// Restore the bounds (and instantiations) recorded at `snapshot`. Variables allocated
    /// after the snapshot are dropped.
    pub fn rollback(&mut self, snapshot: InferenceSnapshot) {
        self.vars = snapshot.vars;
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (UndetVarId, &UndetVar)> {
        (0u32..).zip(&self.vars).map(|(idx, var)| (UndetVarId(idx), var))
    }
}

impl TyContext<'_> {
    /// Allocate a fresh inference variable for `origin` and return it as a type.
    pub fn new_undet_var(&mut self, origin: TypeVarId) -> Type {
        Type::Undet(self.infer.add_var(origin))
    }

    pub fn undet(&self, id: UndetVarId) -> Option<&UndetVar> {
        self.infer.var(id)
    }

    pub fn inference(&self) -> &InferenceSession {
        &self.infer
    }

    pub fn inference_mut(&mut self) -> &mut InferenceSession {
        &mut self.infer
    }

    /// End the current inference episode, returning its variables.
    pub fn take_inference_session(&mut self) -> InferenceSession {
        std::mem::take(&mut self.infer)
    }

    /// The instantiation of an instantiated inference variable.
    pub(crate) fn inst_of(&self, ty: &Type) -> Option<Type> {
        let Type::Undet(id) = ty else {
            return None;
        };
        self.infer.var(*id).and_then(|var| var.inst.clone())
    }

    pub(crate) fn record_bound(&mut self, id: UndetVarId, kind: InferenceBound, ty: &Type) {
        if matches!(ty, Type::Undet(other) if *other == id) {
            return;
        }
        if self.infer.add_bound(id, kind, ty.clone()) {
            tracing::trace!(target: "nova.generics", var = id.index(), ?kind, "inference bound");
        }
    }

    /// Resolve `id` from its bounds and record the result.
    ///
    /// Lower bounds win (their lub), then an equality bound, then the glb of the upper
    /// bounds, and finally the declared bound of the originating type parameter.
    pub fn instantiate_undet(&mut self, id: UndetVarId) -> Option<Type> {
        let var = self.infer.var(id)?.clone();
        if let Some(inst) = var.inst {
            return Some(inst);
        }
        let inst = if !var.lower.is_empty() {
            self.lub(&var.lower)
        } else if let Some(eq) = var.eq.first() {
            eq.clone()
        } else if !var.upper.is_empty() {
            self.glb_all(&var.upper)
        } else {
            self.type_var_bound(var.origin)
        };
        tracing::debug!(
            target: "nova.generics",
            var = id.index(),
            "instantiated inference variable"
        );
        if let Some(slot) = self.infer.vars.get_mut(id.index()) {
            slot.inst = Some(inst.clone());
        }
        Some(inst)
    }
}
