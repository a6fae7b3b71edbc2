//! Value categories of call arguments.

use std::fmt;

/// How an argument was supplied to a call.
///
/// Fixed when a `Uarg` or `Uinst` is built and never reassigned.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum RefCategory {
    /// A live `&mut T`.
    Lvalue,
    /// A live `&T`.
    ConstLvalue,
    /// An owned `T` handed over for the call.
    Rvalue,
    /// An owned `T` that must not be mutated.
    ConstRvalue,
}

impl RefCategory {
    pub const ALL: [RefCategory; 4] = [
        RefCategory::Lvalue,
        RefCategory::ConstLvalue,
        RefCategory::Rvalue,
        RefCategory::ConstRvalue,
    ];

    #[inline]
    pub const fn is_const(self) -> bool {
        matches!(self, RefCategory::ConstLvalue | RefCategory::ConstRvalue)
    }

    #[inline]
    pub const fn is_lvalue(self) -> bool {
        matches!(self, RefCategory::Lvalue | RefCategory::ConstLvalue)
    }

    #[inline]
    pub const fn is_rvalue(self) -> bool {
        !self.is_lvalue()
    }
}

impl fmt::Display for RefCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RefCategory::Lvalue => "lvalue",
            RefCategory::ConstLvalue => "const lvalue",
            RefCategory::Rvalue => "rvalue",
            RefCategory::ConstRvalue => "const rvalue",
        })
    }
}
