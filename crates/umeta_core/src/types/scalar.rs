//! Numbers, pointers, references, void and nullptr.

use crate::flags::{NumberFlags, PointerFlags, ReferenceFlags};
use crate::id::{TypeHasher, TypeId};
use crate::kind::TypeKind;

use super::{kind_handle, AnyType};

pub(crate) struct NumberData {
    name: &'static str,
    flags: NumberFlags,
    size: usize,
    align: usize,
}

impl NumberData {
    pub(crate) fn new(name: &'static str, flags: NumberFlags, size: usize, align: usize) -> Self {
        NumberData {
            name,
            flags,
            size,
            align,
        }
    }

    pub(crate) fn name(&self) -> &'static str {
        self.name
    }

    pub(crate) fn shared_hash(&self, kind: TypeKind) -> TypeId {
        TypeHasher::new(kind)
            .mix_str(self.name)
            .mix(u64::from(self.flags.bits()))
            .mix_usize(self.size)
            .finish()
    }
}

pub(crate) struct PointerData {
    flags: PointerFlags,
    pointee: AnyType,
}

impl PointerData {
    pub(crate) fn new(pointee: AnyType, readonly: bool) -> Self {
        let flags = if readonly {
            PointerFlags::IS_READONLY
        } else {
            PointerFlags::empty()
        };
        PointerData { flags, pointee }
    }

    pub(crate) fn is_readonly(&self) -> bool {
        self.flags.contains(PointerFlags::IS_READONLY)
    }

    pub(crate) fn pointee(&self) -> &AnyType {
        &self.pointee
    }

    pub(crate) fn shared_hash(&self, kind: TypeKind) -> TypeId {
        TypeHasher::new(kind)
            .mix(u64::from(self.flags.bits()))
            .mix_id(self.pointee.id())
            .finish()
    }
}

pub(crate) struct ReferenceData {
    flags: ReferenceFlags,
    pointee: AnyType,
}

impl ReferenceData {
    pub(crate) fn new(pointee: AnyType, flags: ReferenceFlags) -> Self {
        ReferenceData { flags, pointee }
    }

    pub(crate) fn is_readonly(&self) -> bool {
        self.flags.contains(ReferenceFlags::IS_READONLY)
    }

    pub(crate) fn is_rvalue(&self) -> bool {
        self.flags.contains(ReferenceFlags::IS_RVALUE)
    }

    pub(crate) fn pointee(&self) -> &AnyType {
        &self.pointee
    }

    pub(crate) fn shared_hash(&self, kind: TypeKind) -> TypeId {
        TypeHasher::new(kind)
            .mix(u64::from(self.flags.bits()))
            .mix_id(self.pointee.id())
            .finish()
    }
}

kind_handle! {
    /// Handle to an arithmetic, boolean or character type.
    NumberType => Number(NumberData)
}

impl NumberType {
    pub fn name(&self) -> &'static str {
        self.data().name
    }

    pub fn flags(&self) -> NumberFlags {
        self.data().flags
    }

    pub fn size(&self) -> usize {
        self.data().size
    }

    pub fn align(&self) -> usize {
        self.data().align
    }
}

kind_handle! {
    /// Handle to a pointer type (`Option<&T>` / `Option<&mut T>` at the Rust level).
    PointerType => Pointer(PointerData)
}

impl PointerType {
    pub fn flags(&self) -> PointerFlags {
        self.data().flags
    }

    pub fn is_readonly(&self) -> bool {
        self.data().is_readonly()
    }

    pub fn pointee_type(&self) -> &AnyType {
        &self.data().pointee
    }
}

kind_handle! {
    /// Handle to a reference type.
    ReferenceType => Reference(ReferenceData)
}

impl ReferenceType {
    pub fn flags(&self) -> ReferenceFlags {
        self.data().flags
    }

    pub fn is_readonly(&self) -> bool {
        self.data().is_readonly()
    }

    pub fn is_lvalue(&self) -> bool {
        self.data().flags.contains(ReferenceFlags::IS_LVALUE)
    }

    pub fn is_rvalue(&self) -> bool {
        self.data().is_rvalue()
    }

    pub fn pointee_type(&self) -> &AnyType {
        &self.data().pointee
    }
}

kind_handle! {
    /// Handle to the void type.
    VoidType => Void
}

kind_handle! {
    /// Handle to the type of the null pointer literal.
    NullptrType => Nullptr
}
