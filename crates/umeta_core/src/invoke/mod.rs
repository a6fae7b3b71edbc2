//! Type-erased call thunks and the checks that guard them.
//!
//! A bound callable is turned into a thunk once, at registration, through
//! `IntoFunction` or `IntoMethod`. The thunk extracts each parameter from its
//! `Uarg` with `Param::extract` and wraps the result through `ReturnValue`.
//!
//! # Design
//!
//! Thunks assume the caller already ran the checks in this module:
//!
//! 1. arity (`ArityMismatch`);
//! 2. instance, for methods (`InstanceTypeMismatch`);
//! 3. arguments, left to right (`ArgumentTypeMismatch`).
//!
//! The checks are pure predicates over `UargBase`/`UinstBase`, so the same code
//! answers `is_invocable_with` for live values and for type-only argument lists.
//! The thunk still propagates cast failures instead of assuming success.

mod function;
mod method;
mod ret;

pub use function::{FunctionThunk, IntoFunction};
pub use method::{IntoMethod, MethodThunk};
pub use ret::ReturnValue;

use crate::arg::{Formal, UargBase};
use crate::error::{ErrorCode, MetaResult};

pub(crate) fn check_arity(formals: &[Formal], actual: usize) -> MetaResult<()> {
    if formals.len() == actual {
        Ok(())
    } else {
        tracing::trace!(expected = formals.len(), actual, "arity mismatch");
        Err(ErrorCode::ArityMismatch)
    }
}

/// Per-argument compatibility, once the arity is known to match.
pub(crate) fn check_arguments<'x>(
    formals: &[Formal],
    bases: impl Iterator<Item = &'x UargBase>,
) -> MetaResult<()> {
    for (position, (base, formal)) in bases.zip(formals).enumerate() {
        if !base.can_cast_to(formal) {
            tracing::trace!(
                position,
                category = %base.category(),
                formal = %formal.declared_type(),
                "argument type mismatch"
            );
            return Err(ErrorCode::ArgumentTypeMismatch);
        }
    }
    Ok(())
}

/// Receiver compatibility, as computed by `Uinst::can_cast_to` or `UinstBase::can_cast_to`.
pub(crate) fn check_instance(receiver: &Formal, binds: bool) -> MetaResult<()> {
    if binds {
        Ok(())
    } else {
        tracing::trace!(receiver = %receiver.declared_type(), "instance type mismatch");
        Err(ErrorCode::InstanceTypeMismatch)
    }
}
