//! Declarative binding surface for `umeta_core`.
//!
//! ```ignore
//! let registry = Registry::new();
//! umeta_bind::class::<Circle>(&registry)
//!     .base::<Shape>()
//!     .constructor(Circle::new)
//!     .method("area", Circle::area)
//!     .member("radius", |c| &c.radius, |c| &mut c.radius)
//!     .finish()?;
//! umeta_bind::function(&registry, "unit_circle", Circle::unit);
//! ```
//!
//! Builders hold the registry's bind lock for their whole lifetime, so one
//! binding sequence is never interleaved with another thread's. The lock is
//! reentrant: a builder may be created while another is alive on the same
//! thread.

mod class;
mod enums;
mod scope;

pub use class::{class, ClassBind};
pub use enums::{enum_, EnumBind};
pub use scope::{function, function_with, variable, variable_readonly};
