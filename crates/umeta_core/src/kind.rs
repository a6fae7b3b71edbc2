//! Type kind discriminant.
//!
//! Every descriptor carries exactly one `TypeKind`. The discriminant is also
//! mixed into the shared hash so structurally similar descriptors of different
//! kinds never collide.

use std::fmt;

/// Kind of a type descriptor.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum TypeKind {
    Array = 0,
    Class = 1,
    Constructor = 2,
    Destructor = 3,
    Enum = 4,
    Function = 5,
    Member = 6,
    Method = 7,
    Nullptr = 8,
    Number = 9,
    Pointer = 10,
    Reference = 11,
    Void = 12,
}

impl TypeKind {
    /// All kinds, in discriminant order.
    pub const ALL: [TypeKind; 13] = [
        TypeKind::Array,
        TypeKind::Class,
        TypeKind::Constructor,
        TypeKind::Destructor,
        TypeKind::Enum,
        TypeKind::Function,
        TypeKind::Member,
        TypeKind::Method,
        TypeKind::Nullptr,
        TypeKind::Number,
        TypeKind::Pointer,
        TypeKind::Reference,
        TypeKind::Void,
    ];

    /// Lower-case name used in diagnostics and logs.
    pub const fn name(self) -> &'static str {
        match self {
            TypeKind::Array => "array",
            TypeKind::Class => "class",
            TypeKind::Constructor => "constructor",
            TypeKind::Destructor => "destructor",
            TypeKind::Enum => "enum",
            TypeKind::Function => "function",
            TypeKind::Member => "member",
            TypeKind::Method => "method",
            TypeKind::Nullptr => "nullptr",
            TypeKind::Number => "number",
            TypeKind::Pointer => "pointer",
            TypeKind::Reference => "reference",
            TypeKind::Void => "void",
        }
    }

    /// Kinds whose descriptors are keyed by a Rust type rather than by structure.
    #[inline]
    pub const fn is_nominal(self) -> bool {
        matches!(self, TypeKind::Class | TypeKind::Enum)
    }

    #[inline]
    pub const fn discriminant(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
