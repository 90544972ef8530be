use nova_generics::{ClassId, Type, TypeEnv, TypeStore, TypeVarId};

/// A minimal JDK plus shortcuts for the types most tests need.
pub(crate) struct Jdk {
    pub(crate) store: TypeStore,
}

impl Jdk {
    pub(crate) fn new() -> Self {
        Self {
            store: TypeStore::with_minimal_jdk(),
        }
    }

    pub(crate) fn id(&self, name: &str) -> ClassId {
        self.store
            .class_id(name)
            .unwrap_or_else(|| panic!("missing class {name}"))
    }

    pub(crate) fn class(&self, name: &str, args: Vec<Type>) -> Type {
        Type::class(self.id(name), args)
    }

    pub(crate) fn object(&self) -> Type {
        Type::class(self.store.well_known().object, vec![])
    }

    pub(crate) fn string(&self) -> Type {
        Type::class(self.store.well_known().string, vec![])
    }

    pub(crate) fn integer(&self) -> Type {
        Type::class(self.store.well_known().integer, vec![])
    }

    pub(crate) fn number(&self) -> Type {
        Type::class(self.store.well_known().number, vec![])
    }

    pub(crate) fn serializable(&self) -> Type {
        Type::class(self.store.well_known().serializable, vec![])
    }

    pub(crate) fn cloneable(&self) -> Type {
        Type::class(self.store.well_known().cloneable, vec![])
    }

    pub(crate) fn list(&self, arg: Type) -> Type {
        self.class("java.util.List", vec![arg])
    }

    pub(crate) fn array_list(&self, arg: Type) -> Type {
        self.class("java.util.ArrayList", vec![arg])
    }

    pub(crate) fn raw(&self, name: &str) -> Type {
        self.class(name, vec![])
    }

    /// Declare a fresh type parameter in the store.
    pub(crate) fn type_param(&mut self, name: &str, bounds: Vec<Type>) -> TypeVarId {
        self.store.add_type_param(name, bounds)
    }
}
