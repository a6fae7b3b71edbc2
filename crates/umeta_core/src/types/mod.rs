//! Type descriptors.
//!
//! Every type the registry knows about is one immutable `TypeNode` behind an
//! `Arc`. `AnyType` is the kind-erased handle; kind handles (`ClassType`,
//! `PointerType`, ...) wrap the same `Arc` and expose kind-specific queries.
//!
//! # Design
//!
//! Equality, ordering and hashing of handles go through the `TypeId`, which is
//! the shared hash of the descriptor. Two registries that independently resolve
//! the same type produce handles that compare equal.
//!
//! Class and enum descriptors carry interior tables (methods, members, upcast
//! edges, enumerators) behind `parking_lot::RwLock`. Those tables point back at
//! descriptors, so the owning `Registry` clears them when it is dropped.

mod array;
mod class;
mod description;
mod enums;
mod scalar;
mod signature;

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::id::TypeId;
use crate::kind::TypeKind;
use crate::value::ValueOps;

pub use array::{ArrayType, SliceViews};
pub use class::ClassType;
pub use description::Description;
pub use enums::EnumType;
pub use scalar::{NullptrType, NumberType, PointerType, ReferenceType, VoidType};
pub use signature::{ConstructorType, DestructorType, FunctionType, MemberType, MethodType};

pub(crate) use array::{ArrayAccess, ArrayData};
pub(crate) use class::{ClassData, ClassTables};
pub(crate) use enums::EnumData;
pub(crate) use scalar::{NumberData, PointerData, ReferenceData};
pub(crate) use signature::{
    ConstructorData, DestructorData, FunctionData, MemberData, MethodData,
};

/// Kind-specific payload of a descriptor.
pub(crate) enum TypeData {
    Array(ArrayData),
    Class(ClassData),
    Constructor(ConstructorData),
    Destructor(DestructorData),
    Enum(EnumData),
    Function(FunctionData),
    Member(MemberData),
    Method(MethodData),
    Nullptr,
    Number(NumberData),
    Pointer(PointerData),
    Reference(ReferenceData),
    Void,
}

impl TypeData {
    pub(crate) fn kind(&self) -> TypeKind {
        match self {
            TypeData::Array(_) => TypeKind::Array,
            TypeData::Class(_) => TypeKind::Class,
            TypeData::Constructor(_) => TypeKind::Constructor,
            TypeData::Destructor(_) => TypeKind::Destructor,
            TypeData::Enum(_) => TypeKind::Enum,
            TypeData::Function(_) => TypeKind::Function,
            TypeData::Member(_) => TypeKind::Member,
            TypeData::Method(_) => TypeKind::Method,
            TypeData::Nullptr => TypeKind::Nullptr,
            TypeData::Number(_) => TypeKind::Number,
            TypeData::Pointer(_) => TypeKind::Pointer,
            TypeData::Reference(_) => TypeKind::Reference,
            TypeData::Void => TypeKind::Void,
        }
    }

    /// Shared hash of the descriptor this payload would produce.
    pub(crate) fn shared_hash(&self) -> TypeId {
        use crate::id::TypeHasher;

        let kind = self.kind();
        match self {
            TypeData::Array(data) => data.shared_hash(kind),
            TypeData::Class(data) => data.shared_hash(kind),
            TypeData::Constructor(data) => data.shared_hash(kind),
            TypeData::Destructor(data) => data.shared_hash(kind),
            TypeData::Enum(data) => data.shared_hash(kind),
            TypeData::Function(data) => data.shared_hash(kind),
            TypeData::Member(data) => data.shared_hash(kind),
            TypeData::Method(data) => data.shared_hash(kind),
            TypeData::Number(data) => data.shared_hash(kind),
            TypeData::Pointer(data) => data.shared_hash(kind),
            TypeData::Reference(data) => data.shared_hash(kind),
            TypeData::Nullptr => TypeHasher::new(kind).mix_str("nullptr").finish(),
            TypeData::Void => TypeHasher::new(kind).mix_str("void").finish(),
        }
    }
}

/// One interned descriptor.
pub(crate) struct TypeNode {
    id: TypeId,
    ops: Option<&'static ValueOps>,
    data: TypeData,
}

/// Kind-erased handle to a type descriptor.
#[derive(Clone)]
pub struct AnyType(Arc<TypeNode>);

impl AnyType {
    pub(crate) fn new(data: TypeData, ops: Option<&'static ValueOps>) -> Self {
        AnyType(Arc::new(TypeNode {
            id: data.shared_hash(),
            ops,
            data,
        }))
    }

    #[inline]
    pub fn id(&self) -> TypeId {
        self.0.id
    }

    #[inline]
    pub fn kind(&self) -> TypeKind {
        self.0.data.kind()
    }

    /// Whether this descriptor has kind `K`.
    #[inline]
    pub fn is<K: KindHandle>(&self) -> bool {
        self.kind() == K::KIND
    }

    /// Convert to the kind handle `K`, if the kind matches.
    pub fn as_kind<K: KindHandle>(&self) -> Option<K> {
        self.is::<K>().then(|| K::wrap(self.clone()))
    }

    #[inline]
    pub fn as_array(&self) -> Option<ArrayType> {
        self.as_kind()
    }

    #[inline]
    pub fn as_class(&self) -> Option<ClassType> {
        self.as_kind()
    }

    #[inline]
    pub fn as_enum(&self) -> Option<EnumType> {
        self.as_kind()
    }

    #[inline]
    pub fn as_pointer(&self) -> Option<PointerType> {
        self.as_kind()
    }

    #[inline]
    pub fn as_reference(&self) -> Option<ReferenceType> {
        self.as_kind()
    }

    #[inline]
    pub fn is_class(&self) -> bool {
        self.is::<ClassType>()
    }

    #[inline]
    pub fn is_void(&self) -> bool {
        self.is::<VoidType>()
    }

    #[inline]
    pub fn is_nullptr(&self) -> bool {
        self.is::<NullptrType>()
    }

    /// Whether values of this type can be copied into a by-value parameter.
    pub fn is_copyable(&self) -> bool {
        match self.0.ops {
            Some(ops) => ops.is_clonable(),
            None => matches!(self.kind(), TypeKind::Pointer | TypeKind::Nullptr),
        }
    }

    /// Operation table shared by values of this type, for value-carrying kinds.
    #[inline]
    pub(crate) fn value_ops(&self) -> Option<&'static ValueOps> {
        self.0.ops
    }

    #[inline]
    pub(crate) fn data(&self) -> &TypeData {
        &self.0.data
    }

    /// Drop interior tables so descriptors that point at each other can be freed.
    pub(crate) fn release(&self) {
        match &self.0.data {
            TypeData::Class(data) => *data.tables_mut() = ClassTables::default(),
            TypeData::Enum(data) => data.clear_evalues(),
            _ => {}
        }
    }

    fn write_name(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0.data {
            TypeData::Array(data) => match data.extent() {
                Some(extent) => write!(f, "[{}; {extent}]", data.element()),
                None => write!(f, "[{}]", data.element()),
            },
            TypeData::Class(data) => f.write_str(data.name()),
            TypeData::Enum(data) => f.write_str(data.name()),
            TypeData::Number(data) => f.write_str(data.name()),
            TypeData::Constructor(data) => {
                write!(f, "{}::new(", data.owner().as_any())?;
                write_list(f, data.arguments())?;
                f.write_str(")")
            }
            TypeData::Destructor(data) => write!(f, "drop({})", data.owner().as_any()),
            TypeData::Function(data) => {
                f.write_str("fn(")?;
                write_list(f, data.arguments())?;
                write!(f, ") -> {}", data.return_type())
            }
            TypeData::Member(data) => {
                write!(f, "{}::<{}>", data.owner().as_any(), data.value_type())
            }
            TypeData::Method(data) => {
                let receiver = match data.qualifiers() {
                    q if q.contains(crate::flags::MethodFlags::IS_CONST) => "&",
                    q if q.contains(crate::flags::MethodFlags::IS_MUT) => "&mut ",
                    _ => "",
                };
                write!(f, "fn({receiver}{}", data.owner().as_any())?;
                for argument in data.arguments() {
                    write!(f, ", {argument}")?;
                }
                write!(f, ") -> {}", data.return_type())
            }
            TypeData::Pointer(data) => {
                let qualifier = if data.is_readonly() { "const" } else { "mut" };
                write!(f, "*{qualifier} {}", data.pointee())
            }
            TypeData::Reference(data) => {
                let prefix = match (data.is_rvalue(), data.is_readonly()) {
                    (false, true) => "&",
                    (false, false) => "&mut ",
                    (true, true) => "const &&",
                    (true, false) => "&&",
                };
                write!(f, "{prefix}{}", data.pointee())
            }
            TypeData::Nullptr => f.write_str("nullptr"),
            TypeData::Void => f.write_str("()"),
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, types: &[AnyType]) -> fmt::Result {
    for (index, ty) in types.iter().enumerate() {
        if index > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{ty}")?;
    }
    Ok(())
}

impl PartialEq for AnyType {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for AnyType {}

impl PartialOrd for AnyType {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for AnyType {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.id().cmp(&other.id())
    }
}

impl Hash for AnyType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

impl fmt::Display for AnyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_name(f)
    }
}

impl fmt::Debug for AnyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({self})", self.kind())
    }
}

mod sealed {
    pub trait Sealed {}
}

/// Typed view of one descriptor kind.
///
/// Implemented by every kind handle; the conversion from `AnyType` is checked
/// by `AnyType::as_kind`.
pub trait KindHandle: sealed::Sealed + Clone + Eq + Ord + Hash + fmt::Debug {
    const KIND: TypeKind;

    #[doc(hidden)]
    fn wrap(ty: AnyType) -> Self;

    fn as_any(&self) -> &AnyType;

    #[inline]
    fn id(&self) -> TypeId {
        self.as_any().id()
    }
}

/// Declares a kind handle newtype over `AnyType`.
///
/// The generated `data()` accessor matches on the node payload; `wrap` is only
/// reachable through `as_kind`, which checks the kind first.
macro_rules! kind_handle {
    ($(#[$meta:meta])* $name:ident => $variant:ident) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(crate::types::AnyType);

        impl crate::types::sealed::Sealed for $name {}

        impl crate::types::KindHandle for $name {
            const KIND: crate::kind::TypeKind = crate::kind::TypeKind::$variant;

            #[inline]
            fn wrap(ty: crate::types::AnyType) -> Self {
                $name(ty)
            }

            #[inline]
            fn as_any(&self) -> &crate::types::AnyType {
                &self.0
            }
        }

        impl From<$name> for crate::types::AnyType {
            #[inline]
            fn from(handle: $name) -> Self {
                handle.0
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Debug::fmt(&self.0, f)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Display::fmt(&self.0, f)
            }
        }
    };
    ($(#[$meta:meta])* $name:ident => $variant:ident($data:ty)) => {
        kind_handle!($(#[$meta])* $name => $variant);

        impl $name {
            #[inline]
            pub(crate) fn data(&self) -> &$data {
                match self.0.data() {
                    crate::types::TypeData::$variant(data) => data,
                    _ => unreachable!(concat!(stringify!($name), " wraps a foreign kind")),
                }
            }
        }
    };
}

pub(crate) use kind_handle;

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests can panic")]
mod tests;
