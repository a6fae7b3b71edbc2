//! Enum binding.

use std::marker::PhantomData;

use parking_lot::ReentrantMutexGuard;
use umeta_core::{EnumType, ErrorCode, EvalueState, MetaResult, Reflect, Registry};

/// Start binding the enum `E`.
///
/// The builder is poisoned with `BadCast` when `E` was not declared as an enum.
#[must_use = "call `finish` to observe binding errors"]
pub fn enum_<E: Reflect>(registry: &Registry) -> EnumBind<'_, E> {
    let guard = registry.bind_lock();
    let ty = registry.resolve::<E>().as_enum().ok_or(ErrorCode::BadCast);
    EnumBind {
        registry,
        ty,
        _guard: guard,
        _marker: PhantomData,
    }
}

/// Builder returned by [`enum_`].
pub struct EnumBind<'r, E: Reflect> {
    registry: &'r Registry,
    ty: MetaResult<EnumType>,
    _guard: ReentrantMutexGuard<'r, ()>,
    _marker: PhantomData<fn() -> E>,
}

impl<E: Reflect> EnumBind<'_, E> {
    /// Add the enumerator `value` under `name`.
    #[must_use]
    pub fn evalue(mut self, name: &str, value: E) -> Self {
        if let Ok(ty) = &self.ty {
            let added = EvalueState::make(self.registry, name, value)
                .and_then(|evalue| ty.add_evalue(evalue));
            if let Err(code) = added {
                tracing::debug!(enum_ = ty.name(), name, %code, "binding step failed");
                self.ty = Err(code);
            }
        }
        self
    }

    pub fn finish(self) -> MetaResult<EnumType> {
        self.ty
    }
}
