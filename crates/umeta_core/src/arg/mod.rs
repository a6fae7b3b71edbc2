//! Arguments and receivers of dynamic calls.
//!
//! # Design
//!
//! A dynamic call sees each argument as a `(RefCategory, raw type)` pair plus
//! a borrowed or owned value. Whether the argument binds to a formal parameter
//! is decided in two steps:
//!
//! 1. `ParamShape::accepts` gates on the category alone;
//! 2. `compat::can_bind` compares the raw type with the formal's target,
//!    consulting registered upcast edges for classes.
//!
//! Both steps are pure, so `is_invocable_with` can answer without touching
//! the values, and the cast that follows a successful check cannot fail for
//! type reasons.

mod category;
pub mod compat;
mod data;
mod formal;
mod param;
mod shape;
mod uarg;
mod uinst;

pub use category::RefCategory;
pub use formal::Formal;
pub use param::{
    ConstRvalueRef, IntoUarg, IntoUargs, IntoUinst, Param, Receiver, RvalueRef, UargBases, Uargs,
};
pub use shape::ParamShape;
pub use uarg::{Uarg, UargBase};
pub use uinst::{Uinst, UinstBase};
