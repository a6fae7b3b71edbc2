//! Keys of the entity tables.

use crate::types::{
    ConstructorType, DestructorType, EnumType, FunctionType, KindHandle, MemberType, MethodType,
    PointerType,
};

/// Name plus type of a registered entity.
///
/// Two entities with the same name and different types (overloads) are
/// distinct keys; registering an equal key replaces the previous entity.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateIndex<K: KindHandle> {
    name: String,
    ty: K,
}

impl<K: KindHandle> StateIndex<K> {
    pub fn new(name: impl Into<String>, ty: K) -> Self {
        StateIndex {
            name: name.into(),
            ty,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn get_type(&self) -> &K {
        &self.ty
    }
}

pub type ConstructorIndex = StateIndex<ConstructorType>;
pub type DestructorIndex = StateIndex<DestructorType>;
pub type EvalueIndex = StateIndex<EnumType>;
pub type FunctionIndex = StateIndex<FunctionType>;
pub type MemberIndex = StateIndex<MemberType>;
pub type MethodIndex = StateIndex<MethodType>;
pub type VariableIndex = StateIndex<PointerType>;
