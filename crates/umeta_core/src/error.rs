//! Error codes for casting and invocation.
//!
//! Every failure the core can report maps to one `ErrorCode` with a fixed
//! diagnostic. Low-level primitives return `MetaResult` and never produce a
//! partial result; the raising entry points (`invoke`, `create`, `get`, `set`)
//! panic with the same diagnostic.

use thiserror::Error;

/// Result of a fallible reflection operation.
pub type MetaResult<T> = Result<T, ErrorCode>;

/// Closed set of failure kinds.
///
/// The `Display` strings are stable and used verbatim by the raising
/// entry points.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Error)]
pub enum ErrorCode {
    #[error("no error")]
    NoError,
    #[error("bad cast")]
    BadCast,
    #[error("bad const access")]
    BadConstAccess,
    #[error("bad uvalue access")]
    BadUvalueAccess,
    #[error("bad argument cast")]
    BadArgumentCast,
    #[error("bad instance cast")]
    BadInstanceCast,
    #[error("arity mismatch")]
    ArityMismatch,
    #[error("instance type mismatch")]
    InstanceTypeMismatch,
    #[error("argument type mismatch")]
    ArgumentTypeMismatch,
}

impl ErrorCode {
    /// All codes, in declaration order.
    pub const ALL: [ErrorCode; 9] = [
        ErrorCode::NoError,
        ErrorCode::BadCast,
        ErrorCode::BadConstAccess,
        ErrorCode::BadUvalueAccess,
        ErrorCode::BadArgumentCast,
        ErrorCode::BadInstanceCast,
        ErrorCode::ArityMismatch,
        ErrorCode::InstanceTypeMismatch,
        ErrorCode::ArgumentTypeMismatch,
    ];

    /// Whether this code signals success.
    #[inline]
    pub const fn is_ok(self) -> bool {
        matches!(self, ErrorCode::NoError)
    }
}

/// Panic with the diagnostic of `code`.
///
/// Shared by the raising entry points so the message format stays identical.
#[cold]
#[track_caller]
pub(crate) fn raise(code: ErrorCode) -> ! {
    panic!("umeta: {code}")
}
