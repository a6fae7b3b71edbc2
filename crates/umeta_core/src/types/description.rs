//! Descriptions returned by `Reflect::describe`.
//!
//! A `Description` is the payload of a descriptor before it is interned. The
//! registry turns it into an `AnyType` the first time the Rust type is resolved.

use crate::flags::{ClassFlags, NumberFlags};
use crate::reflect::Reflect;
use crate::value::{AnyObject, Uvalue};

use super::{AnyType, ArrayAccess, ArrayData, ClassData, EnumData, NumberData, TypeData};

/// Uninterned descriptor payload.
pub struct Description(pub(crate) TypeData);

impl Description {
    /// Class descriptor for `T`, with capability flags taken from `T::OPS`.
    pub fn class<T: Reflect>() -> Self {
        let ops = T::OPS;
        let mut flags = ClassFlags::empty();
        if std::mem::size_of::<T>() == 0 {
            flags |= ClassFlags::IS_EMPTY;
        }
        if ops.is_clonable() {
            flags |= ClassFlags::IS_COPYABLE;
        }
        if ops.is_comparable() {
            flags |= ClassFlags::IS_EQUALITY_COMPARABLE;
        }
        if ops.is_hashable() {
            flags |= ClassFlags::IS_HASHABLE;
        }
        Description(TypeData::Class(ClassData::new(
            std::any::type_name::<T>(),
            std::any::TypeId::of::<T>(),
            flags,
            std::mem::size_of::<T>(),
            std::mem::align_of::<T>(),
        )))
    }

    /// Mark a class as resolvable through its dynamic type.
    #[must_use]
    pub fn polymorphic(mut self) -> Self {
        if let TypeData::Class(data) = &mut self.0 {
            data.set_flags(ClassFlags::IS_POLYMORPHIC);
        }
        self
    }

    /// Record a generic type argument of a class.
    #[must_use]
    pub fn template_type(mut self, ty: AnyType) -> Self {
        if let TypeData::Class(data) = &mut self.0 {
            data.push_template_type(ty);
        }
        self
    }

    /// Record a generic value argument of a class.
    #[must_use]
    pub fn template_value(mut self, value: Uvalue) -> Self {
        if let TypeData::Class(data) = &mut self.0 {
            data.push_template_value(value);
        }
        self
    }

    /// Enum descriptor for `E` over `underlying`.
    pub fn enumeration<E: Reflect>(
        underlying: AnyType,
        to_underlying: fn(&AnyObject) -> Option<Uvalue>,
    ) -> Self {
        Description(TypeData::Enum(EnumData::new(
            std::any::type_name::<E>(),
            std::any::TypeId::of::<E>(),
            underlying,
            to_underlying,
        )))
    }

    /// Number descriptor for `T` under its Rust name.
    pub fn number<T: Reflect>(name: &'static str, flags: NumberFlags) -> Self {
        Description(TypeData::Number(NumberData::new(
            name,
            flags,
            std::mem::size_of::<T>(),
            std::mem::align_of::<T>(),
        )))
    }

    /// Bounded array descriptor for `[T; N]`.
    pub fn array<T: Reflect, const N: usize>(element: AnyType) -> Self {
        Description(TypeData::Array(ArrayData::bounded(
            element,
            N,
            ArrayAccess::of::<T, N>(),
        )))
    }

    pub(crate) fn nullptr() -> Self {
        Description(TypeData::Nullptr)
    }
}
