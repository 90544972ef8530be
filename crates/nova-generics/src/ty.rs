//! The closed set of type shapes every relation in this crate operates on.
//!
//! `Type` is a plain value: it is cheap to clone (boxed children), hashable and
//! structurally comparable. Structural equality implies type equality, but two
//! equal types may still differ structurally (e.g. `List<?>` and
//! `List<? extends Object>`); use [`crate::TyContext::is_same_type`] for the
//! semantic relation.

/// Handle of a class or interface declaration inside a [`crate::TypeEnv`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(u32);

impl ClassId {
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn to_raw(self) -> u32 {
        self.0
    }
}

/// Handle of a declared type variable.
///
/// Ids with the high bit set are allocated by a [`crate::TyContext`] (fresh
/// variables introduced while renaming generic method signatures) and are only
/// meaningful inside that context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeVarId(pub(crate) u32);

impl TypeVarId {
    const CONTEXT_LOCAL_BIT: u32 = 1 << 31;

    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn to_raw(self) -> u32 {
        self.0
    }

    pub(crate) fn new_context_local(index: u32) -> Self {
        Self(Self::CONTEXT_LOCAL_BIT | index)
    }

    pub(crate) fn context_local_index(self) -> Option<usize> {
        if (self.0 & Self::CONTEXT_LOCAL_BIT) == 0 {
            return None;
        }
        Some((self.0 & !Self::CONTEXT_LOCAL_BIT) as usize)
    }

    pub fn is_context_local(self) -> bool {
        self.context_local_index().is_some()
    }
}

/// Handle of a capture variable allocated by capture conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CapturedVarId(pub(crate) u32);

impl CapturedVarId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Handle of an inference variable inside an [`crate::InferenceSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UndetVarId(pub(crate) u32);

impl UndetVarId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    Boolean,
    Byte,
    Short,
    Char,
    Int,
    Long,
    Float,
    Double,
}

impl PrimitiveType {
    pub const ALL: [PrimitiveType; 8] = [
        PrimitiveType::Boolean,
        PrimitiveType::Byte,
        PrimitiveType::Short,
        PrimitiveType::Char,
        PrimitiveType::Int,
        PrimitiveType::Long,
        PrimitiveType::Float,
        PrimitiveType::Double,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Byte => "byte",
            PrimitiveType::Short => "short",
            PrimitiveType::Char => "char",
            PrimitiveType::Int => "int",
            PrimitiveType::Long => "long",
            PrimitiveType::Float => "float",
            PrimitiveType::Double => "double",
        }
    }

    pub fn is_numeric(self) -> bool {
        self != PrimitiveType::Boolean
    }

    /// Position in the widening order `byte < char < short < int < long < float < double`.
    fn widening_rank(self) -> Option<u8> {
        match self {
            PrimitiveType::Boolean => None,
            PrimitiveType::Byte => Some(1),
            PrimitiveType::Char => Some(2),
            PrimitiveType::Short => Some(3),
            PrimitiveType::Int => Some(4),
            PrimitiveType::Long => Some(5),
            PrimitiveType::Float => Some(6),
            PrimitiveType::Double => Some(7),
        }
    }

    /// Identity or widening primitive conversion.
    ///
    /// `byte` and `char` skip two ranks so that neither widens to the other (nor `char` to
    /// `short`).
    pub fn widens_to(self, target: PrimitiveType) -> bool {
        if self == target {
            return true;
        }
        let (Some(from), Some(to)) = (self.widening_rank(), target.widening_rank()) else {
            return false;
        };
        let skip = match self {
            PrimitiveType::Byte | PrimitiveType::Char => 2,
            _ => 0,
        };
        from + skip <= to
    }

    /// Whether this type is `int` or narrower.
    pub fn is_int_subrange(self) -> bool {
        matches!(
            self,
            PrimitiveType::Byte | PrimitiveType::Short | PrimitiveType::Char | PrimitiveType::Int
        )
    }

    /// Whether a compile-time `int` constant fits into this type.
    pub fn accepts_constant(self, value: i64) -> bool {
        let (min, max) = match self {
            PrimitiveType::Byte => (i8::MIN as i64, i8::MAX as i64),
            PrimitiveType::Short => (i16::MIN as i64, i16::MAX as i64),
            PrimitiveType::Char => (0, u16::MAX as i64),
            PrimitiveType::Int => (i32::MIN as i64, i32::MAX as i64),
            _ => return false,
        };
        (min..=max).contains(&value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum WildcardBound {
    Unbounded,
    Extends(Box<Type>),
    Super(Box<Type>),
}

/// A use-site type argument.
///
/// `formal` records the type parameter the wildcard instantiates when it is known; it is
/// used to recover the implicit upper bound of `?` and `? super T`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WildcardType {
    pub bound: WildcardBound,
    pub formal: Option<TypeVarId>,
}

impl WildcardType {
    pub fn new(bound: WildcardBound) -> Self {
        Self {
            bound,
            formal: None,
        }
    }

    pub fn with_formal(mut self, formal: TypeVarId) -> Self {
        self.formal = Some(formal);
        self
    }

    pub fn is_unbound(&self) -> bool {
        matches!(self.bound, WildcardBound::Unbounded)
    }

    /// `?` or `? extends T`.
    pub fn is_extends_bound(&self) -> bool {
        !matches!(self.bound, WildcardBound::Super(_))
    }

    /// `?` or `? super T`.
    pub fn is_super_bound(&self) -> bool {
        !matches!(self.bound, WildcardBound::Extends(_))
    }

    /// The explicit bound, if any.
    pub fn bound_type(&self) -> Option<&Type> {
        match &self.bound {
            WildcardBound::Unbounded => None,
            WildcardBound::Extends(ty) | WildcardBound::Super(ty) => Some(ty),
        }
    }

    pub(crate) fn map_bound(&self, f: impl FnOnce(&Type) -> Type) -> WildcardType {
        let bound = match &self.bound {
            WildcardBound::Unbounded => WildcardBound::Unbounded,
            WildcardBound::Extends(ty) => WildcardBound::Extends(Box::new(f(ty))),
            WildcardBound::Super(ty) => WildcardBound::Super(Box::new(f(ty))),
        };
        WildcardType {
            bound,
            formal: self.formal,
        }
    }
}

/// A use of a class or interface: parameterized (`List<String>`), raw (`List`) or
/// non-generic (`String`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassType {
    pub def: ClassId,
    /// Enclosing instance type for inner classes (`Outer<String>.Inner`).
    pub outer: Option<Box<Type>>,
    pub args: Vec<Type>,
    /// Set on recursively erased types; their supertypes are erased as well.
    pub erased_supertypes: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodType {
    pub params: Vec<Type>,
    pub return_type: Type,
    pub thrown: Vec<Type>,
}

/// A generic method signature `<T1..Tn> (params) -> return`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ForAll {
    pub type_params: Vec<TypeVarId>,
    pub method: MethodType,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    Void,
    Primitive(PrimitiveType),
    /// The null type; subtype of every reference type.
    Null,
    Class(ClassType),
    Array(Box<Type>),
    TypeVar(TypeVarId),
    Captured(CapturedVarId),
    Wildcard(WildcardType),
    /// Compound type: a class or type-variable bound first, then interface bounds.
    Intersection(Vec<Type>),
    Undet(UndetVarId),
    Method(Box<MethodType>),
    ForAll(Box<ForAll>),
    /// Absorbing element; wraps the offending type when known.
    Error(Option<Box<Type>>),
}

impl Type {
    pub fn class(def: ClassId, args: Vec<Type>) -> Type {
        Type::Class(ClassType {
            def,
            outer: None,
            args,
            erased_supertypes: false,
        })
    }

    pub fn inner_class(outer: Type, def: ClassId, args: Vec<Type>) -> Type {
        Type::Class(ClassType {
            def,
            outer: Some(Box::new(outer)),
            args,
            erased_supertypes: false,
        })
    }

    pub fn array(elem: Type) -> Type {
        Type::Array(Box::new(elem))
    }

    pub fn unbounded() -> Type {
        Type::Wildcard(WildcardType::new(WildcardBound::Unbounded))
    }

    pub fn extends(bound: Type) -> Type {
        Type::Wildcard(WildcardType::new(WildcardBound::Extends(Box::new(bound))))
    }

    pub fn super_of(bound: Type) -> Type {
        Type::Wildcard(WildcardType::new(WildcardBound::Super(Box::new(bound))))
    }

    pub fn method(params: Vec<Type>, return_type: Type) -> Type {
        Type::Method(Box::new(MethodType {
            params,
            return_type,
            thrown: Vec::new(),
        }))
    }

    pub fn error() -> Type {
        Type::Error(None)
    }

    pub fn error_of(original: Type) -> Type {
        Type::Error(Some(Box::new(original)))
    }

    pub fn int() -> Type {
        Type::Primitive(PrimitiveType::Int)
    }

    pub fn boolean() -> Type {
        Type::Primitive(PrimitiveType::Boolean)
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, Type::Primitive(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Type::Error(_))
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, Type::Wildcard(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Type::Null)
    }

    /// Type variables, including capture variables.
    pub fn is_type_var(&self) -> bool {
        matches!(self, Type::TypeVar(_) | Type::Captured(_))
    }

    pub fn is_reference(&self) -> bool {
        matches!(
            self,
            Type::Null
                | Type::Class(_)
                | Type::Array(_)
                | Type::TypeVar(_)
                | Type::Captured(_)
                | Type::Intersection(_)
                | Type::Undet(_)
        )
    }

    pub(crate) fn is_extends_bound(&self) -> bool {
        matches!(self, Type::Wildcard(w) if w.is_extends_bound())
    }

    pub(crate) fn is_super_bound(&self) -> bool {
        matches!(self, Type::Wildcard(w) if w.is_super_bound())
    }

    pub fn as_class(&self) -> Option<&ClassType> {
        match self {
            Type::Class(ct) => Some(ct),
            _ => None,
        }
    }

    pub fn elem_type(&self) -> Option<&Type> {
        match self {
            Type::Array(elem) => Some(elem),
            _ => None,
        }
    }

    /// Parameters of a method or generic method signature.
    pub fn method_type(&self) -> Option<&MethodType> {
        match self {
            Type::Method(m) => Some(m),
            Type::ForAll(f) => Some(&f.method),
            _ => None,
        }
    }

    /// Whether `var` occurs anywhere inside this type.
    pub fn mentions_var(&self, var: TypeVarId) -> bool {
        match self {
            Type::TypeVar(id) => *id == var,
            Type::Class(ct) => {
                ct.outer.as_deref().is_some_and(|o| o.mentions_var(var))
                    || ct.args.iter().any(|a| a.mentions_var(var))
            }
            Type::Array(elem) => elem.mentions_var(var),
            Type::Wildcard(w) => w.bound_type().is_some_and(|b| b.mentions_var(var)),
            Type::Intersection(parts) => parts.iter().any(|p| p.mentions_var(var)),
            Type::Method(m) => m.mentions_var(var),
            Type::ForAll(f) => f.method.mentions_var(var),
            Type::Error(Some(original)) => original.mentions_var(var),
            Type::Void
            | Type::Primitive(_)
            | Type::Null
            | Type::Captured(_)
            | Type::Undet(_)
            | Type::Error(None) => false,
        }
    }

    pub fn mentions_any(&self, vars: &[TypeVarId]) -> bool {
        vars.iter().any(|v| self.mentions_var(*v))
    }

    pub fn contains_error(&self) -> bool {
        match self {
            Type::Error(_) => true,
            Type::Class(ct) => {
                ct.outer.as_deref().is_some_and(Type::contains_error)
                    || ct.args.iter().any(Type::contains_error)
            }
            Type::Array(elem) => elem.contains_error(),
            Type::Wildcard(w) => w.bound_type().is_some_and(Type::contains_error),
            Type::Intersection(parts) => parts.iter().any(Type::contains_error),
            Type::Method(m) => {
                m.params.iter().any(Type::contains_error) || m.return_type.contains_error()
            }
            Type::ForAll(f) => {
                f.method.params.iter().any(Type::contains_error)
                    || f.method.return_type.contains_error()
            }
            _ => false,
        }
    }
}

impl MethodType {
    fn mentions_var(&self, var: TypeVarId) -> bool {
        self.params.iter().any(|p| p.mentions_var(var))
            || self.return_type.mentions_var(var)
            || self.thrown.iter().any(|t| t.mentions_var(var))
    }
}

impl From<PrimitiveType> for Type {
    fn from(value: PrimitiveType) -> Self {
        Type::Primitive(value)
    }
}
