//! Per-kind descriptor flags.
//!
//! Flags are computed once when a descriptor is created and never change.
//! Structural kinds mix their flags into the shared hash, so two pointer
//! types that differ only in constness are distinct descriptors.

use bitflags::bitflags;

bitflags! {
    /// Properties of an array type.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct ArrayFlags: u8 {
        /// Has a compile-time extent (`[T; N]`).
        const IS_BOUNDED = 1 << 0;
        /// Has no extent (a slice).
        const IS_UNBOUNDED = 1 << 1;
    }
}

bitflags! {
    /// Properties of a class type.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct ClassFlags: u8 {
        // === Layout ===

        /// Zero-sized.
        const IS_EMPTY = 1 << 0;

        // === Dynamic dispatch ===

        /// Opted into dynamic type resolution.
        const IS_POLYMORPHIC = 1 << 1;
        /// Instantiation of a generic type; see `template_argument_types`.
        const IS_TEMPLATE_INSTANTIATION = 1 << 2;

        // === Capabilities (mirror the value operation table) ===

        /// Values can be copied into a by-value parameter.
        const IS_COPYABLE = 1 << 3;
        /// Values support equality comparison.
        const IS_EQUALITY_COMPARABLE = 1 << 4;
        /// Values can be hashed.
        const IS_HASHABLE = 1 << 5;
    }
}

bitflags! {
    /// Properties of a constructor type.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct ConstructorFlags: u8 {
        /// Takes no arguments.
        const IS_DEFAULT = 1 << 0;
        /// Takes a single argument of the owner type.
        const IS_COPY = 1 << 1;
    }
}

bitflags! {
    /// Properties of a destructor type.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct DestructorFlags: u8 {
        /// Runs a registered hook instead of a plain drop.
        const IS_CUSTOM = 1 << 0;
    }
}

bitflags! {
    /// Properties of an enum type.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct EnumFlags: u8 {
        /// Enumerators live in the enum's own namespace.
        const IS_SCOPED = 1 << 0;
    }
}

bitflags! {
    /// Properties of a free function type.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct FunctionFlags: u8 {
        /// Return type is void.
        const RETURNS_VOID = 1 << 0;
    }
}

bitflags! {
    /// Properties of a member (field) type.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct MemberFlags: u8 {
        /// No setter is registered.
        const IS_READONLY = 1 << 0;
    }
}

bitflags! {
    /// Properties of a method type.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct MethodFlags: u8 {
        // === Receiver qualifiers ===

        /// Receiver is `&self`.
        const IS_CONST = 1 << 0;
        /// Receiver is `&mut self`.
        const IS_MUT = 1 << 1;
        /// Receiver is `self`.
        const IS_BY_VALUE = 1 << 2;

        // === Signature ===

        /// Return type is void.
        const RETURNS_VOID = 1 << 3;
    }
}

bitflags! {
    /// Properties of a number type.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct NumberFlags: u8 {
        const IS_SIGNED = 1 << 0;
        const IS_UNSIGNED = 1 << 1;
        const IS_INTEGRAL = 1 << 2;
        const IS_FLOATING_POINT = 1 << 3;
        const IS_BOOLEAN = 1 << 4;
        const IS_CHARACTER = 1 << 5;
    }
}

bitflags! {
    /// Properties of a pointer type.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct PointerFlags: u8 {
        /// Points to a read-only pointee.
        const IS_READONLY = 1 << 0;
    }
}

bitflags! {
    /// Properties of a reference type.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct ReferenceFlags: u8 {
        /// Refers to a read-only pointee.
        const IS_READONLY = 1 << 0;
        /// Binds lvalues.
        const IS_LVALUE = 1 << 1;
        /// Binds rvalues.
        const IS_RVALUE = 1 << 2;
    }
}

impl MethodFlags {
    /// Receiver qualifier bits only.
    #[inline]
    pub fn qualifiers(self) -> MethodFlags {
        self & (MethodFlags::IS_CONST | MethodFlags::IS_MUT | MethodFlags::IS_BY_VALUE)
    }
}

impl NumberFlags {
    /// Flags for an integral type of the given signedness.
    #[inline]
    pub const fn integral(signed: bool) -> NumberFlags {
        if signed {
            NumberFlags::IS_INTEGRAL.union(NumberFlags::IS_SIGNED)
        } else {
            NumberFlags::IS_INTEGRAL.union(NumberFlags::IS_UNSIGNED)
        }
    }

    /// Flags for a floating-point type.
    #[inline]
    pub const fn floating() -> NumberFlags {
        NumberFlags::IS_FLOATING_POINT.union(NumberFlags::IS_SIGNED)
    }
}

impl ReferenceFlags {
    /// Whether the flags describe exactly one value category.
    #[inline]
    pub fn is_well_formed(self) -> bool {
        self.contains(ReferenceFlags::IS_LVALUE) != self.contains(ReferenceFlags::IS_RVALUE)
    }
}
