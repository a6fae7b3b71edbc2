//! Type-erased values.
//!
//! `Uvalue` owns at most one value of any reflected type. Small scalars are
//! stored inline, everything else is boxed. Copy, equality, hashing and
//! formatting go through the per-type `ValueOps` table captured when the value
//! was boxed; moving and dropping are plain Rust moves and drops.

mod ops;
mod storage;
mod uvalue;

pub use ops::ValueOps;
pub use storage::{Scalar, Storage};
pub use uvalue::Uvalue;

/// Erased object reference used across the crate.
pub type AnyObject = dyn std::any::Any + Send + Sync;
