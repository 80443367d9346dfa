//! Type representation for the selector engine.
//!
//! Every type is a `TypeData` value interned into a [`TypeInterner`]
//! and referenced through a `TypeId` handle. Because interning deduplicates
//! structure, two `TypeId`s are equal exactly when the types are structurally
//! identical, and identity checks for nominal links (`DeclId`) and template
//! variables (`VarId`) are integer comparisons.
//!
//! [`TypeInterner`]: crate::TypeInterner

use crate::def::DeclId;
use wyil_common::Atom;

/// Handle to an interned type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub u32);

impl TypeId {
    /// Sentinel for "no type". Never produced by the interner.
    pub const NONE: TypeId = TypeId(0);

    pub const VOID: TypeId = TypeId(1);
    pub const NULL: TypeId = TypeId(2);
    pub const BOOL: TypeId = TypeId(3);
    pub const BYTE: TypeId = TypeId(4);
    pub const INT: TypeId = TypeId(5);
    pub const ANY: TypeId = TypeId(6);

    /// First id handed out for interned (non-intrinsic) types.
    pub const FIRST_USER: u32 = 100;
}

/// The primitive types. None of them has children.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum IntrinsicKind {
    Void,
    Null,
    Bool,
    Byte,
    Int,
    Any,
}

impl IntrinsicKind {
    pub const fn to_type_id(self) -> TypeId {
        match self {
            IntrinsicKind::Void => TypeId::VOID,
            IntrinsicKind::Null => TypeId::NULL,
            IntrinsicKind::Bool => TypeId::BOOL,
            IntrinsicKind::Byte => TypeId::BYTE,
            IntrinsicKind::Int => TypeId::INT,
            IntrinsicKind::Any => TypeId::ANY,
        }
    }

    pub const fn from_type_id(id: TypeId) -> Option<Self> {
        match id.0 {
            1 => Some(IntrinsicKind::Void),
            2 => Some(IntrinsicKind::Null),
            3 => Some(IntrinsicKind::Bool),
            4 => Some(IntrinsicKind::Byte),
            5 => Some(IntrinsicKind::Int),
            6 => Some(IntrinsicKind::Any),
            _ => None,
        }
    }

    /// Source keyword for this primitive.
    pub const fn keyword(self) -> &'static str {
        match self {
            IntrinsicKind::Void => "void",
            IntrinsicKind::Null => "null",
            IntrinsicKind::Bool => "bool",
            IntrinsicKind::Byte => "byte",
            IntrinsicKind::Int => "int",
            IntrinsicKind::Any => "any",
        }
    }
}

/// Interned list of types (union alternatives, intersection operands).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeListId(pub u32);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct RecordShapeId(pub u32);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct CallableShapeId(pub u32);

/// Identity of a template-variable binder.
///
/// Two variables with the same name bound by different templates get
/// different `VarId`s, so they never compare equal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarId(pub u32);

/// A named record field.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct FieldInfo {
    pub name: Atom,
    pub type_id: TypeId,
}

impl FieldInfo {
    pub const fn new(name: Atom, type_id: TypeId) -> Self {
        Self { name, type_id }
    }
}

/// Record fields in declared order.
///
/// `is_open` records permit extra, unnamed fields (`{int x, ...}`).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RecordShape {
    pub is_open: bool,
    pub fields: Vec<FieldInfo>,
}

/// A reference type.
///
/// `lifetime == None` is a static reference (`&T`); `Some(l)` is `&l:T`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ReferenceShape {
    pub element: TypeId,
    pub lifetime: Option<Atom>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CallableKind {
    Function,
    Method,
    Property,
}

impl CallableKind {
    pub const fn keyword(self) -> &'static str {
        match self {
            CallableKind::Function => "function",
            CallableKind::Method => "method",
            CallableKind::Property => "property",
        }
    }
}

/// Signature of a function, method or property.
///
/// Only methods carry lifetimes: `lifetime_params` are the lifetimes the
/// method is generic over and `captured_lifetimes` the ones it closes over.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CallableShape {
    pub kind: CallableKind,
    pub params: Vec<TypeId>,
    pub returns: Vec<TypeId>,
    pub captured_lifetimes: Vec<Atom>,
    pub lifetime_params: Vec<Atom>,
}

/// Structural description of a type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeData {
    Intrinsic(IntrinsicKind),
    Array(TypeId),
    Record(RecordShapeId),
    Reference(ReferenceShape),
    Callable(CallableShapeId),
    Union(TypeListId),
    Intersection(TypeListId),
    Negation(TypeId),
    /// Link to a named declaration; see [`crate::DeclarationStore`].
    Nominal(DeclId),
    Variable(VarId),
    /// A name that never got linked to a declaration.
    Unresolved(Atom),
}
