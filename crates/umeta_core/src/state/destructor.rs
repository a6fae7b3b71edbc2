//! Bound destructors.

use std::sync::Arc;

use crate::error::{raise, ErrorCode, MetaResult};
use crate::flags::DestructorFlags;
use crate::reflect::Reflect;
use crate::registry::Registry;
use crate::types::{DestructorType, KindHandle};
use crate::value::Uvalue;

use super::DestructorIndex;

pub type Destructor = Arc<DestructorState>;

type DestroyFn = dyn Fn(Uvalue) -> MetaResult<()> + Send + Sync;

/// Consumes a value of its owner class.
///
/// The value is dropped normally unless a hook was registered, in which case
/// the hook receives it by value and decides what happens to it.
pub struct DestructorState {
    index: DestructorIndex,
    destroy: Box<DestroyFn>,
}

impl DestructorState {
    /// Destructor that drops the value.
    pub fn make<T: Reflect>(registry: &Registry) -> MetaResult<Destructor> {
        DestructorState::build::<T>(registry, DestructorFlags::empty(), Box::new(drop::<T>))
    }

    /// Destructor that hands the value to `hook`.
    pub fn make_with<T, H>(registry: &Registry, hook: H) -> MetaResult<Destructor>
    where
        T: Reflect,
        H: Fn(T) + Send + Sync + 'static,
    {
        DestructorState::build::<T>(registry, DestructorFlags::IS_CUSTOM, Box::new(hook))
    }

    fn build<T: Reflect>(
        registry: &Registry,
        flags: DestructorFlags,
        hook: Box<dyn Fn(T) + Send + Sync>,
    ) -> MetaResult<Destructor> {
        let owner = registry.resolve::<T>().as_class().ok_or(ErrorCode::BadCast)?;
        let ty = registry.destructor_type(&owner, flags);
        Ok(Arc::new(DestructorState {
            index: DestructorIndex::new(owner.name(), ty),
            destroy: Box::new(move |value: Uvalue| {
                if value.is_empty() {
                    return Err(ErrorCode::BadUvalueAccess);
                }
                let value = value.into_inner::<T>().map_err(|_| ErrorCode::BadCast)?;
                hook(value);
                Ok(())
            }),
        }))
    }

    #[inline]
    pub fn index(&self) -> &DestructorIndex {
        &self.index
    }

    #[inline]
    pub fn get_type(&self) -> &DestructorType {
        self.index.get_type()
    }

    /// Whether `value` holds exactly the owner class.
    pub fn is_invocable_with(&self, registry: &Registry, value: &Uvalue) -> bool {
        value
            .get_type(registry)
            .is_some_and(|ty| &ty == self.get_type().owner_type().as_any())
    }

    #[track_caller]
    pub fn destroy(&self, value: Uvalue) {
        self.try_destroy(value).unwrap_or_else(|code| raise(code));
    }

    /// Consume `value`; an empty or foreign value is rejected and dropped untouched.
    pub fn try_destroy(&self, value: Uvalue) -> MetaResult<()> {
        (self.destroy)(value)
    }
}

impl std::fmt::Debug for DestructorState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DestructorState")
            .field("type", self.get_type().as_any())
            .finish_non_exhaustive()
    }
}
