//! Signature descriptors: functions, methods, constructors, destructors and
//! members.
//!
//! These are structural: two signatures with the same components are the same
//! descriptor, whichever callable produced them.

use crate::flags::{ConstructorFlags, DestructorFlags, FunctionFlags, MemberFlags, MethodFlags};
use crate::id::{TypeHasher, TypeId};
use crate::kind::TypeKind;

use super::{kind_handle, AnyType, ClassType, KindHandle};

pub(crate) struct FunctionData {
    flags: FunctionFlags,
    return_type: AnyType,
    arguments: Vec<AnyType>,
}

impl FunctionData {
    pub(crate) fn new(return_type: AnyType, arguments: Vec<AnyType>) -> Self {
        let mut flags = FunctionFlags::empty();
        if return_type.is_void() {
            flags |= FunctionFlags::RETURNS_VOID;
        }
        FunctionData {
            flags,
            return_type,
            arguments,
        }
    }

    pub(crate) fn return_type(&self) -> &AnyType {
        &self.return_type
    }

    pub(crate) fn arguments(&self) -> &[AnyType] {
        &self.arguments
    }

    pub(crate) fn shared_hash(&self, kind: TypeKind) -> TypeId {
        TypeHasher::new(kind)
            .mix(u64::from(self.flags.bits()))
            .mix_id(self.return_type.id())
            .mix_ids(self.arguments.iter().map(AnyType::id))
            .finish()
    }
}

pub(crate) struct MethodData {
    flags: MethodFlags,
    owner: ClassType,
    return_type: AnyType,
    arguments: Vec<AnyType>,
}

impl MethodData {
    pub(crate) fn new(
        owner: ClassType,
        qualifiers: MethodFlags,
        return_type: AnyType,
        arguments: Vec<AnyType>,
    ) -> Self {
        let mut flags = qualifiers.qualifiers();
        if return_type.is_void() {
            flags |= MethodFlags::RETURNS_VOID;
        }
        MethodData {
            flags,
            owner,
            return_type,
            arguments,
        }
    }

    pub(crate) fn owner(&self) -> &ClassType {
        &self.owner
    }

    pub(crate) fn qualifiers(&self) -> MethodFlags {
        self.flags.qualifiers()
    }

    pub(crate) fn return_type(&self) -> &AnyType {
        &self.return_type
    }

    pub(crate) fn arguments(&self) -> &[AnyType] {
        &self.arguments
    }

    pub(crate) fn shared_hash(&self, kind: TypeKind) -> TypeId {
        TypeHasher::new(kind)
            .mix(u64::from(self.flags.bits()))
            .mix_id(self.owner.id())
            .mix_id(self.return_type.id())
            .mix_ids(self.arguments.iter().map(AnyType::id))
            .finish()
    }
}

pub(crate) struct ConstructorData {
    flags: ConstructorFlags,
    owner: ClassType,
    arguments: Vec<AnyType>,
}

impl ConstructorData {
    pub(crate) fn new(owner: ClassType, arguments: Vec<AnyType>) -> Self {
        let mut flags = ConstructorFlags::empty();
        match arguments.as_slice() {
            [] => flags |= ConstructorFlags::IS_DEFAULT,
            [only]
                if only == owner.as_any()
                    || only
                        .as_reference()
                        .is_some_and(|reference| reference.pointee_type() == owner.as_any()) =>
            {
                flags |= ConstructorFlags::IS_COPY;
            }
            _ => {}
        }
        ConstructorData {
            flags,
            owner,
            arguments,
        }
    }

    pub(crate) fn owner(&self) -> &ClassType {
        &self.owner
    }

    pub(crate) fn arguments(&self) -> &[AnyType] {
        &self.arguments
    }

    pub(crate) fn shared_hash(&self, kind: TypeKind) -> TypeId {
        TypeHasher::new(kind)
            .mix(u64::from(self.flags.bits()))
            .mix_id(self.owner.id())
            .mix_ids(self.arguments.iter().map(AnyType::id))
            .finish()
    }
}

pub(crate) struct DestructorData {
    flags: DestructorFlags,
    owner: ClassType,
}

impl DestructorData {
    pub(crate) fn new(owner: ClassType, flags: DestructorFlags) -> Self {
        DestructorData { flags, owner }
    }

    pub(crate) fn owner(&self) -> &ClassType {
        &self.owner
    }

    pub(crate) fn shared_hash(&self, kind: TypeKind) -> TypeId {
        TypeHasher::new(kind)
            .mix(u64::from(self.flags.bits()))
            .mix_id(self.owner.id())
            .finish()
    }
}

pub(crate) struct MemberData {
    flags: MemberFlags,
    owner: ClassType,
    value: AnyType,
}

impl MemberData {
    pub(crate) fn new(owner: ClassType, value: AnyType, flags: MemberFlags) -> Self {
        MemberData {
            flags,
            owner,
            value,
        }
    }

    pub(crate) fn owner(&self) -> &ClassType {
        &self.owner
    }

    pub(crate) fn value_type(&self) -> &AnyType {
        &self.value
    }

    pub(crate) fn shared_hash(&self, kind: TypeKind) -> TypeId {
        TypeHasher::new(kind)
            .mix(u64::from(self.flags.bits()))
            .mix_id(self.owner.id())
            .mix_id(self.value.id())
            .finish()
    }
}

kind_handle! {
    /// Handle to a free function signature.
    FunctionType => Function(FunctionData)
}

impl FunctionType {
    pub fn flags(&self) -> FunctionFlags {
        self.data().flags
    }

    pub fn arity(&self) -> usize {
        self.data().arguments.len()
    }

    pub fn return_type(&self) -> &AnyType {
        &self.data().return_type
    }

    pub fn argument_types(&self) -> &[AnyType] {
        &self.data().arguments
    }

    pub fn argument_type(&self, position: usize) -> Option<&AnyType> {
        self.data().arguments.get(position)
    }
}

kind_handle! {
    /// Handle to a method signature.
    MethodType => Method(MethodData)
}

impl MethodType {
    pub fn flags(&self) -> MethodFlags {
        self.data().flags
    }

    pub fn owner_type(&self) -> &ClassType {
        &self.data().owner
    }

    pub fn arity(&self) -> usize {
        self.data().arguments.len()
    }

    pub fn return_type(&self) -> &AnyType {
        &self.data().return_type
    }

    pub fn argument_types(&self) -> &[AnyType] {
        &self.data().arguments
    }

    pub fn argument_type(&self, position: usize) -> Option<&AnyType> {
        self.data().arguments.get(position)
    }

    pub fn is_const(&self) -> bool {
        self.data().flags.contains(MethodFlags::IS_CONST)
    }
}

kind_handle! {
    /// Handle to a constructor signature.
    ConstructorType => Constructor(ConstructorData)
}

impl ConstructorType {
    pub fn flags(&self) -> ConstructorFlags {
        self.data().flags
    }

    pub fn owner_type(&self) -> &ClassType {
        &self.data().owner
    }

    pub fn arity(&self) -> usize {
        self.data().arguments.len()
    }

    pub fn argument_types(&self) -> &[AnyType] {
        &self.data().arguments
    }

    pub fn argument_type(&self, position: usize) -> Option<&AnyType> {
        self.data().arguments.get(position)
    }
}

kind_handle! {
    /// Handle to a destructor signature.
    DestructorType => Destructor(DestructorData)
}

impl DestructorType {
    pub fn flags(&self) -> DestructorFlags {
        self.data().flags
    }

    pub fn owner_type(&self) -> &ClassType {
        &self.data().owner
    }
}

kind_handle! {
    /// Handle to a member (field) signature.
    MemberType => Member(MemberData)
}

impl MemberType {
    pub fn flags(&self) -> MemberFlags {
        self.data().flags
    }

    pub fn owner_type(&self) -> &ClassType {
        &self.data().owner
    }

    pub fn value_type(&self) -> &AnyType {
        &self.data().value
    }

    pub fn is_readonly(&self) -> bool {
        self.data().flags.contains(MemberFlags::IS_READONLY)
    }
}
