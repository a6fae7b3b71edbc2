//! Formal parameter shapes and the category gating table.
//!
//! `ParamShape::accepts` is the single place that decides which argument
//! categories may bind to which parameter shape. Type compatibility is checked
//! separately in `compat`.

use crate::flags::{MethodFlags, ReferenceFlags};

use super::RefCategory;

/// Reference and constness qualification of a formal parameter.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ParamShape {
    /// `T`
    Value,
    /// `Option<&T>` (`readonly`) or `Option<&mut T>`.
    Pointer { readonly: bool },
    /// `&mut T`
    LvalueRef,
    /// `&T`
    ConstLvalueRef,
    /// `RvalueRef<T>`
    RvalueRef,
    /// `ConstRvalueRef<T>`
    ConstRvalueRef,
    /// `&mut self`: a non-const receiver, which binds temporaries too.
    MutSelf,
}

impl ParamShape {
    pub const ALL: [ParamShape; 8] = [
        ParamShape::Value,
        ParamShape::Pointer { readonly: true },
        ParamShape::Pointer { readonly: false },
        ParamShape::LvalueRef,
        ParamShape::ConstLvalueRef,
        ParamShape::RvalueRef,
        ParamShape::ConstRvalueRef,
        ParamShape::MutSelf,
    ];

    /// Whether binding needs mutable access to the argument.
    #[inline]
    pub const fn requires_mutable(self) -> bool {
        matches!(
            self,
            ParamShape::LvalueRef
                | ParamShape::RvalueRef
                | ParamShape::MutSelf
                | ParamShape::Pointer { readonly: false }
        )
    }

    /// Category gating: can an argument of `category` bind to this shape at all?
    ///
    /// Pointer shapes are gated on the pointee's constness instead, so every
    /// category passes here.
    pub const fn accepts(self, category: RefCategory) -> bool {
        match self {
            ParamShape::Value | ParamShape::ConstLvalueRef | ParamShape::ConstRvalueRef => true,
            ParamShape::Pointer { .. } => true,
            ParamShape::LvalueRef => matches!(category, RefCategory::Lvalue),
            ParamShape::RvalueRef | ParamShape::MutSelf => !category.is_const(),
        }
    }

    /// Reference flags of the declared parameter type, for reference shapes.
    pub(crate) fn reference_flags(self) -> Option<ReferenceFlags> {
        match self {
            ParamShape::Value | ParamShape::Pointer { .. } => None,
            ParamShape::LvalueRef | ParamShape::MutSelf => Some(ReferenceFlags::IS_LVALUE),
            ParamShape::ConstLvalueRef => {
                Some(ReferenceFlags::IS_LVALUE | ReferenceFlags::IS_READONLY)
            }
            ParamShape::RvalueRef => Some(ReferenceFlags::IS_RVALUE),
            ParamShape::ConstRvalueRef => {
                Some(ReferenceFlags::IS_RVALUE | ReferenceFlags::IS_READONLY)
            }
        }
    }

    /// Method qualifier implied by a receiver of this shape.
    pub(crate) fn qualifier(self) -> MethodFlags {
        match self {
            ParamShape::Value => MethodFlags::IS_BY_VALUE,
            ParamShape::ConstLvalueRef
            | ParamShape::ConstRvalueRef
            | ParamShape::Pointer { readonly: true } => MethodFlags::IS_CONST,
            ParamShape::LvalueRef
            | ParamShape::RvalueRef
            | ParamShape::MutSelf
            | ParamShape::Pointer { readonly: false } => MethodFlags::IS_MUT,
        }
    }
}

#[cfg(test)]
mod tests;
