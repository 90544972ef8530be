//! Declaration-side model: classes, type parameters and members, plus the
//! [`TypeEnv`] lookup trait and its owning implementation [`TypeStore`].

use std::collections::HashMap;

use crate::{ClassId, ForAll, MethodType, Type, TypeVarId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassKind {
    Class,
    Interface,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub is_final: bool,
    pub is_abstract: bool,
    /// Only meaningful for member classes: static nested classes have no enclosing instance.
    pub is_static: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeParamDef {
    pub name: String,
    /// Declared bounds in source order. Empty means `Object`.
    pub upper_bounds: Vec<Type>,
    pub lower_bound: Option<Type>,
}

impl TypeParamDef {
    pub fn new(name: impl Into<String>, upper_bounds: Vec<Type>) -> Self {
        Self {
            name: name.into(),
            upper_bounds,
            lower_bound: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    pub name: String,
    pub ty: Type,
    pub is_static: bool,
    pub is_final: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodDef {
    pub name: String,
    pub type_params: Vec<TypeVarId>,
    pub params: Vec<Type>,
    pub return_type: Type,
    pub thrown: Vec<Type>,
    pub is_static: bool,
    pub is_varargs: bool,
    pub is_abstract: bool,
}

impl MethodDef {
    /// The declared signature: a `ForAll` for generic methods, a plain method type otherwise.
    pub fn signature(&self) -> Type {
        let method = MethodType {
            params: self.params.clone(),
            return_type: self.return_type.clone(),
            thrown: self.thrown.clone(),
        };
        if self.type_params.is_empty() {
            Type::Method(Box::new(method))
        } else {
            Type::ForAll(Box::new(ForAll {
                type_params: self.type_params.clone(),
                method,
            }))
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassDef {
    /// Binary name, e.g. `java.util.Map$Entry` is spelled `java.util.Map.Entry` here.
    pub name: String,
    pub kind: ClassKind,
    pub modifiers: Modifiers,
    /// Lexically enclosing class for member classes.
    pub outer: Option<ClassId>,
    pub type_params: Vec<TypeVarId>,
    /// `None` means `Object` (or nothing at all for `Object` itself).
    pub super_class: Option<Type>,
    pub interfaces: Vec<Type>,
    pub fields: Vec<FieldDef>,
    pub methods: Vec<MethodDef>,
}

impl ClassDef {
    pub fn class(name: impl Into<String>) -> Self {
        Self::new(name, ClassKind::Class)
    }

    pub fn interface(name: impl Into<String>) -> Self {
        let mut def = Self::new(name, ClassKind::Interface);
        def.modifiers.is_abstract = true;
        def
    }

    fn new(name: impl Into<String>, kind: ClassKind) -> Self {
        Self {
            name: name.into(),
            kind,
            modifiers: Modifiers::default(),
            outer: None,
            type_params: Vec::new(),
            super_class: None,
            interfaces: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn with_type_params(mut self, type_params: Vec<TypeVarId>) -> Self {
        self.type_params = type_params;
        self
    }

    pub fn extends(mut self, super_class: Type) -> Self {
        self.super_class = Some(super_class);
        self
    }

    pub fn implements(mut self, interfaces: Vec<Type>) -> Self {
        self.interfaces = interfaces;
        self
    }

    pub fn final_(mut self) -> Self {
        self.modifiers.is_final = true;
        self
    }

    pub fn is_interface(&self) -> bool {
        self.kind == ClassKind::Interface
    }

    /// Simple name: the part after the last `.`.
    pub fn simple_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }
}

/// Ids of the classes the relations need to know about by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WellKnownTypes {
    pub object: ClassId,
    pub string: ClassId,
    pub number: ClassId,
    pub cloneable: ClassId,
    pub serializable: ClassId,
    pub comparable: ClassId,
    pub void: ClassId,
    pub boolean: ClassId,
    pub byte: ClassId,
    pub character: ClassId,
    pub short: ClassId,
    pub integer: ClassId,
    pub long: ClassId,
    pub float: ClassId,
    pub double: ClassId,
}

/// Read-only view of class and type-parameter declarations.
pub trait TypeEnv {
    fn class(&self, id: ClassId) -> Option<&ClassDef>;
    fn type_param(&self, id: TypeVarId) -> Option<&TypeParamDef>;
    fn lookup_class(&self, name: &str) -> Option<ClassId>;
    fn well_known(&self) -> &WellKnownTypes;
}

/// Owning, mutable [`TypeEnv`].
///
/// Class ids can be interned before the class is defined, which is how mutually recursive
/// declarations (`Enum<E extends Enum<E>>`) are built.
#[derive(Debug, Clone)]
pub struct TypeStore {
    classes: Vec<Option<ClassDef>>,
    class_by_name: HashMap<String, ClassId>,
    type_params: Vec<TypeParamDef>,
    well_known: WellKnownTypes,
}

impl Default for TypeStore {
    /// A store pre-populated with the `java.lang` core.
    fn default() -> Self {
        crate::jdk::core_store()
    }
}

impl TypeStore {
    /// An empty store whose well-known ids are interned but not yet defined.
    pub(crate) fn with_interned_well_known() -> Self {
        let mut store = TypeStore {
            classes: Vec::new(),
            class_by_name: HashMap::new(),
            type_params: Vec::new(),
            well_known: WellKnownTypes {
                object: ClassId::from_raw(0),
                string: ClassId::from_raw(0),
                number: ClassId::from_raw(0),
                cloneable: ClassId::from_raw(0),
                serializable: ClassId::from_raw(0),
                comparable: ClassId::from_raw(0),
                void: ClassId::from_raw(0),
                boolean: ClassId::from_raw(0),
                byte: ClassId::from_raw(0),
                character: ClassId::from_raw(0),
                short: ClassId::from_raw(0),
                integer: ClassId::from_raw(0),
                long: ClassId::from_raw(0),
                float: ClassId::from_raw(0),
                double: ClassId::from_raw(0),
            },
        };
        store.well_known = WellKnownTypes {
            object: store.intern_class_id("java.lang.Object"),
            string: store.intern_class_id("java.lang.String"),
            number: store.intern_class_id("java.lang.Number"),
            cloneable: store.intern_class_id("java.lang.Cloneable"),
            serializable: store.intern_class_id("java.io.Serializable"),
            comparable: store.intern_class_id("java.lang.Comparable"),
            void: store.intern_class_id("java.lang.Void"),
            boolean: store.intern_class_id("java.lang.Boolean"),
            byte: store.intern_class_id("java.lang.Byte"),
            character: store.intern_class_id("java.lang.Character"),
            short: store.intern_class_id("java.lang.Short"),
            integer: store.intern_class_id("java.lang.Integer"),
            long: store.intern_class_id("java.lang.Long"),
            float: store.intern_class_id("java.lang.Float"),
            double: store.intern_class_id("java.lang.Double"),
        };
        store
    }

    /// The `java.lang` core plus a handful of `java.util` collection types.
    pub fn with_minimal_jdk() -> Self {
        let mut store = Self::default();
        crate::jdk::define_minimal_util(&mut store);
        store
    }

    /// Reserve an id for `name` without defining the class.
    pub fn intern_class_id(&mut self, name: &str) -> ClassId {
        if let Some(id) = self.class_by_name.get(name) {
            return *id;
        }
        let idx: u32 = self
            .classes
            .len()
            .try_into()
            .expect("too many classes");
        let id = ClassId::from_raw(idx);
        self.classes.push(None);
        self.class_by_name.insert(name.to_string(), id);
        id
    }

    /// Define (or overwrite) the class previously interned as `id`.
    pub fn define_class(&mut self, id: ClassId, def: ClassDef) {
        if let Some(slot) = self.classes.get_mut(id.to_raw() as usize) {
            self.class_by_name.insert(def.name.clone(), id);
            *slot = Some(def);
        }
    }

    pub fn add_class(&mut self, def: ClassDef) -> ClassId {
        let id = self.intern_class_id(&def.name);
        self.define_class(id, def);
        id
    }

    /// Define `def` under its name, replacing any previous definition.
    pub fn upsert_class(&mut self, def: ClassDef) -> ClassId {
        self.add_class(def)
    }

    pub fn class_mut(&mut self, id: ClassId) -> Option<&mut ClassDef> {
        self.classes.get_mut(id.to_raw() as usize)?.as_mut()
    }

    pub fn class_id(&self, name: &str) -> Option<ClassId> {
        self.class_by_name.get(name).copied()
    }

    pub fn add_type_param(
        &mut self,
        name: impl Into<String>,
        upper_bounds: Vec<Type>,
    ) -> TypeVarId {
        let idx: u32 = self
            .type_params
            .len()
            .try_into()
            .expect("too many type params");
        let id = TypeVarId::from_raw(idx);
        self.type_params.push(TypeParamDef::new(name, upper_bounds));
        id
    }

    /// Replace the definition of an existing type parameter, e.g. to patch in an F-bound that
    /// mentions the parameter itself.
    pub fn define_type_param(&mut self, id: TypeVarId, def: TypeParamDef) {
        if let Some(slot) = self.type_params.get_mut(id.to_raw() as usize) {
            *slot = def;
        }
    }
}

impl TypeEnv for TypeStore {
    fn class(&self, id: ClassId) -> Option<&ClassDef> {
        self.classes.get(id.to_raw() as usize)?.as_ref()
    }

    fn type_param(&self, id: TypeVarId) -> Option<&TypeParamDef> {
        if id.is_context_local() {
            return None;
        }
        self.type_params.get(id.to_raw() as usize)
    }

    fn lookup_class(&self, name: &str) -> Option<ClassId> {
        if let Some(id) = self.class_by_name.get(name) {
            return Some(*id);
        }
        // Implicit `java.lang` import.
        if !name.contains('.') {
            return self.class_by_name.get(&format!("java.lang.{name}")).copied();
        }
        None
    }

    fn well_known(&self) -> &WellKnownTypes {
        &self.well_known
    }
}
