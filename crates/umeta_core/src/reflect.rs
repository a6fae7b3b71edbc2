//! The `Reflect` trait, the `reflect!` declaration macro and the built-in
//! reflected types.
//!
//! A type becomes reflectable by declaring it once:
//!
//! ```ignore
//! reflect!(class Point: Clone, PartialEq, Debug);
//! reflect!(class Circle: Clone; polymorphic);
//! reflect!(enum Color as u8: Clone, PartialEq, Hash, Debug);
//! ```
//!
//! The capability list fills the optional entries of the type's `ValueOps`;
//! accepted names are `Clone`, `PartialEq`, `PartialOrd`, `Hash` and `Debug`.
//! Besides `Reflect`, the macro emits the `Param`/`IntoUarg` implementations
//! for `T`, `&T` and `&mut T`, and for classes the `Receiver`/`IntoUinst`
//! ones, so the type can appear in bound signatures. `Option<&T>` and
//! `Option<&mut T>` are covered by blanket implementations in `arg`, since a
//! downstream crate may not implement these traits for `Option`.
//!
//! `; polymorphic` also implements `Polymorphic`, which makes the type usable
//! behind trait objects whose trait has `Polymorphic` as a supertrait.

use std::any::Any;

use crate::flags::NumberFlags;
use crate::registry::Registry;
use crate::types::{AnyType, Description};
use crate::value::{AnyObject, Scalar, Storage, ValueOps};

/// A type known to the registry.
pub trait Reflect: Any + Send + Sync + Sized {
    /// Operation table shared by every value of this type.
    const OPS: &'static ValueOps;

    /// Descriptor payload, built the first time the type is resolved.
    fn describe(registry: &Registry) -> Description;

    #[doc(hidden)]
    fn into_storage(self) -> Storage {
        Storage::boxed(self)
    }

    #[doc(hidden)]
    fn from_storage(storage: Storage) -> Result<Self, Storage> {
        storage.unbox()
    }
}

/// Access to the most derived type and object of a value.
///
/// Implemented by `reflect!(class T; polymorphic)`. Put it as a supertrait of
/// a trait to resolve `dyn Trait` values to their concrete class.
pub trait Polymorphic: Send + Sync {
    fn dynamic_type(&self, registry: &Registry) -> AnyType;

    fn as_object(&self) -> &AnyObject;

    fn as_object_mut(&mut self) -> &mut AnyObject;
}

/// The null pointer literal, as an argument value.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Nullptr;

/// Declare a type as reflectable.
#[macro_export]
macro_rules! reflect {
    (class $ty:ty $(: $($cap:ident),+)? ; polymorphic) => {
        $crate::__reflect_class!($ty; [$($($cap),+)?]; $crate::Description::class::<$ty>().polymorphic());
        $crate::__reflect_polymorphic!($ty);
    };
    (class $ty:ty $(: $($cap:ident),+)?) => {
        $crate::__reflect_class!($ty; [$($($cap),+)?]; $crate::Description::class::<$ty>());
    };
    (enum $ty:ty as $under:ty $(: $($cap:ident),+)?) => {
        impl $crate::Reflect for $ty {
            const OPS: &'static $crate::ValueOps = $crate::__reflect_ops!($ty; $($($cap),+)?);

            fn describe(registry: &$crate::Registry) -> $crate::Description {
                $crate::Description::enumeration::<$ty>(
                    registry.resolve::<$under>(),
                    |object| {
                        object
                            .downcast_ref::<$ty>()
                            .map(|value| $crate::Uvalue::new(*value as $under))
                    },
                )
            }
        }

        $crate::__reflect_params!($ty);
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __reflect_class {
    ($ty:ty; [$($cap:ident),*]; $describe:expr) => {
        impl $crate::Reflect for $ty {
            const OPS: &'static $crate::ValueOps = $crate::__reflect_ops!($ty; $($cap),*);

            fn describe(_registry: &$crate::Registry) -> $crate::Description {
                $describe
            }
        }

        $crate::__reflect_params!($ty);
        $crate::__reflect_instance!($ty);
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __reflect_ops {
    ($ty:ty; $($cap:ident),*) => {
        &{
            let ops = $crate::ValueOps::new::<$ty>();
            $(let ops = $crate::__reflect_cap!(ops, $ty, $cap);)*
            ops
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __reflect_cap {
    ($ops:expr, $ty:ty, Clone) => {
        $ops.with_clone::<$ty>()
    };
    ($ops:expr, $ty:ty, PartialEq) => {
        $ops.with_eq::<$ty>()
    };
    ($ops:expr, $ty:ty, Hash) => {
        $ops.with_hash::<$ty>()
    };
    ($ops:expr, $ty:ty, Debug) => {
        $ops.with_debug::<$ty>()
    };
    ($ops:expr, $ty:ty, PartialOrd) => {
        $ops.with_ord::<$ty>()
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __reflect_polymorphic {
    ($ty:ty) => {
        impl $crate::Polymorphic for $ty {
            fn dynamic_type(&self, registry: &$crate::Registry) -> $crate::AnyType {
                registry.resolve::<Self>()
            }

            fn as_object(&self) -> &$crate::AnyObject {
                self
            }

            fn as_object_mut(&mut self) -> &mut $crate::AnyObject {
                self
            }
        }
    };
}

/// `Param` and `IntoUarg` for a reflected type and its references and pointers.
#[doc(hidden)]
#[macro_export]
macro_rules! __reflect_params {
    ($ty:ty) => {
        $crate::__reflect_params!(impl[] $ty);
    };
    (impl[$($gen:tt)*] $ty:ty) => {
        impl<$($gen)*> $crate::Param for $ty {
            type Item<'b> = $ty;

            fn formal(registry: &$crate::Registry) -> $crate::Formal {
                $crate::Formal::value(registry.resolve::<$ty>())
            }

            fn extract<'b>(
                arg: &'b mut $crate::Uarg<'_>,
                registry: &$crate::Registry,
            ) -> $crate::MetaResult<$ty> {
                arg.cast_value::<$ty>(&<Self as $crate::Param>::formal(registry), registry)
            }
        }

        impl<'x, $($gen)*> $crate::Param for &'x $ty {
            type Item<'b> = &'b $ty;

            fn formal(registry: &$crate::Registry) -> $crate::Formal {
                $crate::Formal::new(
                    registry,
                    $crate::ParamShape::ConstLvalueRef,
                    registry.resolve::<$ty>(),
                )
            }

            fn extract<'b>(
                arg: &'b mut $crate::Uarg<'_>,
                registry: &$crate::Registry,
            ) -> $crate::MetaResult<&'b $ty> {
                arg.cast_ref::<$ty>(&<Self as $crate::Param>::formal(registry), registry)
            }
        }

        impl<'x, $($gen)*> $crate::Param for &'x mut $ty {
            type Item<'b> = &'b mut $ty;

            fn formal(registry: &$crate::Registry) -> $crate::Formal {
                $crate::Formal::new(
                    registry,
                    $crate::ParamShape::LvalueRef,
                    registry.resolve::<$ty>(),
                )
            }

            fn extract<'b>(
                arg: &'b mut $crate::Uarg<'_>,
                registry: &$crate::Registry,
            ) -> $crate::MetaResult<&'b mut $ty> {
                arg.cast_mut::<$ty>(&<Self as $crate::Param>::formal(registry), registry)
            }
        }

        impl<'a, $($gen)*> $crate::IntoUarg<'a> for $ty {
            fn type_only(registry: &$crate::Registry) -> ::core::option::Option<$crate::UargBase> {
                ::core::option::Option::Some($crate::UargBase::new(
                    $crate::RefCategory::Rvalue,
                    registry.resolve::<$ty>(),
                ))
            }

            fn into_uarg(self, registry: &$crate::Registry) -> $crate::Uarg<'a> {
                $crate::Uarg::rvalue(registry, self)
            }
        }

        impl<'a, $($gen)*> $crate::IntoUarg<'a> for &'a $ty {
            fn type_only(registry: &$crate::Registry) -> ::core::option::Option<$crate::UargBase> {
                ::core::option::Option::Some($crate::UargBase::new(
                    $crate::RefCategory::ConstLvalue,
                    registry.resolve::<$ty>(),
                ))
            }

            fn into_uarg(self, registry: &$crate::Registry) -> $crate::Uarg<'a> {
                $crate::Uarg::const_lvalue(registry, self)
            }
        }

        impl<'a, $($gen)*> $crate::IntoUarg<'a> for &'a mut $ty {
            fn type_only(registry: &$crate::Registry) -> ::core::option::Option<$crate::UargBase> {
                ::core::option::Option::Some($crate::UargBase::new(
                    $crate::RefCategory::Lvalue,
                    registry.resolve::<$ty>(),
                ))
            }

            fn into_uarg(self, registry: &$crate::Registry) -> $crate::Uarg<'a> {
                $crate::Uarg::lvalue(registry, self)
            }
        }
    };
}

/// `Receiver` and `IntoUinst` for a reflected class.
#[doc(hidden)]
#[macro_export]
macro_rules! __reflect_instance {
    ($ty:ty) => {
        $crate::__reflect_instance!(impl[] $ty);
    };
    (impl[$($gen:tt)*] $ty:ty) => {
        impl<'x, $($gen)*> $crate::Receiver for &'x $ty {
            type Class = $ty;
            type Item<'b> = &'b $ty;

            const SHAPE: $crate::ParamShape = $crate::ParamShape::ConstLvalueRef;

            fn extract<'b>(
                inst: &'b mut $crate::Uinst<'_>,
                registry: &$crate::Registry,
            ) -> $crate::MetaResult<&'b $ty> {
                inst.cast_ref::<$ty>(&<Self as $crate::Receiver>::formal(registry), registry)
            }
        }

        impl<'x, $($gen)*> $crate::Receiver for &'x mut $ty {
            type Class = $ty;
            type Item<'b> = &'b mut $ty;

            const SHAPE: $crate::ParamShape = $crate::ParamShape::MutSelf;

            fn extract<'b>(
                inst: &'b mut $crate::Uinst<'_>,
                registry: &$crate::Registry,
            ) -> $crate::MetaResult<&'b mut $ty> {
                inst.cast_mut::<$ty>(&<Self as $crate::Receiver>::formal(registry), registry)
            }
        }

        impl<$($gen)*> $crate::Receiver for $ty {
            type Class = $ty;
            type Item<'b> = $ty;

            const SHAPE: $crate::ParamShape = $crate::ParamShape::Value;

            fn extract<'b>(
                inst: &'b mut $crate::Uinst<'_>,
                registry: &$crate::Registry,
            ) -> $crate::MetaResult<$ty> {
                inst.cast_value::<$ty>(&<Self as $crate::Receiver>::formal(registry), registry)
            }
        }

        impl<'a, $($gen)*> $crate::IntoUinst<'a> for $ty {
            fn type_only(registry: &$crate::Registry) -> ::core::option::Option<$crate::UinstBase> {
                ::core::option::Option::Some($crate::UinstBase::new(
                    $crate::RefCategory::Rvalue,
                    registry.resolve::<$ty>(),
                ))
            }

            fn into_uinst(self, registry: &$crate::Registry) -> $crate::Uinst<'a> {
                $crate::Uinst::rvalue(registry, self)
            }
        }

        impl<'a, $($gen)*> $crate::IntoUinst<'a> for &'a $ty {
            fn type_only(registry: &$crate::Registry) -> ::core::option::Option<$crate::UinstBase> {
                ::core::option::Option::Some($crate::UinstBase::new(
                    $crate::RefCategory::ConstLvalue,
                    registry.resolve::<$ty>(),
                ))
            }

            fn into_uinst(self, registry: &$crate::Registry) -> $crate::Uinst<'a> {
                $crate::Uinst::const_lvalue(registry, self)
            }
        }

        impl<'a, $($gen)*> $crate::IntoUinst<'a> for &'a mut $ty {
            fn type_only(registry: &$crate::Registry) -> ::core::option::Option<$crate::UinstBase> {
                ::core::option::Option::Some($crate::UinstBase::new(
                    $crate::RefCategory::Lvalue,
                    registry.resolve::<$ty>(),
                ))
            }

            fn into_uinst(self, registry: &$crate::Registry) -> $crate::Uinst<'a> {
                $crate::Uinst::lvalue(registry, self)
            }
        }
    };
}

// === Built-in types ===

macro_rules! reflect_numbers {
    ($($ty:ident => $variant:ident, $flags:expr, [$($cap:ident),*];)*) => {$(
        impl Reflect for $ty {
            const OPS: &'static ValueOps = crate::__reflect_ops!($ty; $($cap),*);

            fn describe(_registry: &Registry) -> Description {
                Description::number::<$ty>(stringify!($ty), $flags)
            }

            fn into_storage(self) -> Storage {
                Storage::Inline(Scalar::$variant(self))
            }

            fn from_storage(storage: Storage) -> Result<Self, Storage> {
                match storage {
                    Storage::Inline(Scalar::$variant(value)) => Ok(value),
                    other => Err(other),
                }
            }
        }

        crate::__reflect_params!($ty);
    )*};
}

reflect_numbers! {
    bool => Bool, NumberFlags::IS_BOOLEAN | NumberFlags::integral(false), [Clone, PartialEq, PartialOrd, Hash, Debug];
    char => Char, NumberFlags::IS_CHARACTER | NumberFlags::integral(false), [Clone, PartialEq, PartialOrd, Hash, Debug];
    i8 => I8, NumberFlags::integral(true), [Clone, PartialEq, PartialOrd, Hash, Debug];
    i16 => I16, NumberFlags::integral(true), [Clone, PartialEq, PartialOrd, Hash, Debug];
    i32 => I32, NumberFlags::integral(true), [Clone, PartialEq, PartialOrd, Hash, Debug];
    i64 => I64, NumberFlags::integral(true), [Clone, PartialEq, PartialOrd, Hash, Debug];
    i128 => I128, NumberFlags::integral(true), [Clone, PartialEq, PartialOrd, Hash, Debug];
    isize => Isize, NumberFlags::integral(true), [Clone, PartialEq, PartialOrd, Hash, Debug];
    u8 => U8, NumberFlags::integral(false), [Clone, PartialEq, PartialOrd, Hash, Debug];
    u16 => U16, NumberFlags::integral(false), [Clone, PartialEq, PartialOrd, Hash, Debug];
    u32 => U32, NumberFlags::integral(false), [Clone, PartialEq, PartialOrd, Hash, Debug];
    u64 => U64, NumberFlags::integral(false), [Clone, PartialEq, PartialOrd, Hash, Debug];
    u128 => U128, NumberFlags::integral(false), [Clone, PartialEq, PartialOrd, Hash, Debug];
    usize => Usize, NumberFlags::integral(false), [Clone, PartialEq, PartialOrd, Hash, Debug];
    f32 => F32, NumberFlags::floating(), [Clone, PartialEq, PartialOrd, Debug];
    f64 => F64, NumberFlags::floating(), [Clone, PartialEq, PartialOrd, Debug];
}

crate::reflect!(class String: Clone, PartialEq, PartialOrd, Hash, Debug);

impl Reflect for Nullptr {
    const OPS: &'static ValueOps = crate::__reflect_ops!(Nullptr; Clone, PartialEq, Hash, Debug);

    fn describe(_registry: &Registry) -> Description {
        Description::nullptr()
    }
}

impl<'a> crate::IntoUarg<'a> for Nullptr {
    fn type_only(registry: &Registry) -> Option<crate::UargBase> {
        Some(crate::UargBase::new(
            crate::RefCategory::Rvalue,
            registry.nullptr_type().into(),
        ))
    }

    fn into_uarg(self, registry: &Registry) -> crate::Uarg<'a> {
        crate::Uarg::nullptr(registry)
    }
}

impl<T: Reflect + Clone, const N: usize> Reflect for [T; N] {
    const OPS: &'static ValueOps = &ValueOps::new::<Self>()
        .with_clone::<Self>()
        .with_index::<Self, T>();

    fn describe(registry: &Registry) -> Description {
        Description::array::<T, N>(registry.resolve::<T>())
    }
}

impl<T: Reflect + Clone> Reflect for Vec<T> {
    const OPS: &'static ValueOps = &ValueOps::new::<Self>()
        .with_clone::<Self>()
        .with_index::<Self, T>();

    fn describe(registry: &Registry) -> Description {
        Description::class::<Self>().template_type(registry.resolve::<T>())
    }
}

crate::__reflect_params!(impl[T: Reflect + Clone] Vec<T>);
crate::__reflect_instance!(impl[T: Reflect + Clone] Vec<T>);

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests can panic")]
mod tests;
