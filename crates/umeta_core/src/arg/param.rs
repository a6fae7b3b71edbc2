//! Mapping between Rust parameter types and formal parameters.
//!
//! - `Param` describes one parameter of a bound callable and extracts it from a
//!   `Uarg`. `Item<'b>` is the parameter type re-borrowed for the call.
//! - `Receiver` does the same for the `self` parameter of a method.
//! - `IntoUarg`/`IntoUargs`/`IntoUinst` turn caller values into arguments.
//!
//! Per-type implementations for reflected types come from `reflect!`; this
//! module holds the generic ones: arrays and slices, strings, typed and void
//! pointers, the rvalue reference wrappers, `Uvalue` and tuples. Typed
//! pointers are blanket implementations over `Reflect` so that types declared
//! outside this crate get them too.

use std::ops::{Deref, DerefMut};

use smallvec::{smallvec, SmallVec};

use crate::error::MetaResult;
use crate::flags::MethodFlags;
use crate::reflect::Reflect;
use crate::registry::Registry;
use crate::value::{AnyObject, Uvalue};

use super::{Formal, ParamShape, RefCategory, Uarg, UargBase, Uinst, UinstBase};

/// Argument list of one call.
pub type Uargs<'a> = SmallVec<[Uarg<'a>; 4]>;

/// Type-only argument list.
pub type UargBases = SmallVec<[UargBase; 4]>;

/// A parameter type of a bindable callable.
pub trait Param {
    /// The parameter type with its borrows tied to the call.
    type Item<'b>;

    fn formal(registry: &Registry) -> Formal;

    fn extract<'b>(arg: &'b mut Uarg<'_>, registry: &Registry) -> MetaResult<Self::Item<'b>>;
}

/// The `self` parameter of a bindable method.
pub trait Receiver {
    type Class: Reflect;
    type Item<'b>;

    const SHAPE: ParamShape;

    fn formal(registry: &Registry) -> Formal {
        Formal::new(registry, Self::SHAPE, registry.resolve::<Self::Class>())
    }

    fn qualifiers() -> MethodFlags {
        Self::SHAPE.qualifier()
    }

    fn extract<'b>(inst: &'b mut Uinst<'_>, registry: &Registry) -> MetaResult<Self::Item<'b>>;
}

/// A caller value that can be passed as one argument.
pub trait IntoUarg<'a> {
    /// Category and type of values of this Rust type, if known statically.
    fn type_only(registry: &Registry) -> Option<UargBase>;

    fn into_uarg(self, registry: &Registry) -> Uarg<'a>;
}

/// A caller value list.
pub trait IntoUargs<'a> {
    fn type_only(registry: &Registry) -> Option<UargBases>;

    fn into_uargs(self, registry: &Registry) -> Uargs<'a>;
}

/// A caller value that can be passed as a receiver.
pub trait IntoUinst<'a> {
    fn type_only(registry: &Registry) -> Option<UinstBase>;

    fn into_uinst(self, registry: &Registry) -> Uinst<'a>;
}

// === Rvalue reference wrappers ===

/// Parameter that binds a mutable rvalue reference.
///
/// Accepts non-const lvalues and rvalues, unlike `&mut T`.
#[derive(Debug)]
pub struct RvalueRef<'x, T>(pub &'x mut T);

/// Parameter that binds a read-only rvalue reference.
#[derive(Debug)]
pub struct ConstRvalueRef<'x, T>(pub &'x T);

impl<T> Deref for RvalueRef<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.0
    }
}

impl<T> DerefMut for RvalueRef<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        self.0
    }
}

impl<T> Deref for ConstRvalueRef<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.0
    }
}

impl<T: Reflect> Param for RvalueRef<'_, T> {
    type Item<'b> = RvalueRef<'b, T>;

    fn formal(registry: &Registry) -> Formal {
        Formal::new(registry, ParamShape::RvalueRef, registry.resolve::<T>())
    }

    fn extract<'b>(arg: &'b mut Uarg<'_>, registry: &Registry) -> MetaResult<RvalueRef<'b, T>> {
        arg.cast_mut::<T>(&Self::formal(registry), registry)
            .map(RvalueRef)
    }
}

impl<T: Reflect> Param for ConstRvalueRef<'_, T> {
    type Item<'b> = ConstRvalueRef<'b, T>;

    fn formal(registry: &Registry) -> Formal {
        Formal::new(registry, ParamShape::ConstRvalueRef, registry.resolve::<T>())
    }

    fn extract<'b>(
        arg: &'b mut Uarg<'_>,
        registry: &Registry,
    ) -> MetaResult<ConstRvalueRef<'b, T>> {
        arg.cast_ref::<T>(&Self::formal(registry), registry)
            .map(ConstRvalueRef)
    }
}

// === Arrays and slices ===

impl<T: Reflect + Clone, const N: usize> Param for [T; N] {
    type Item<'b> = [T; N];

    fn formal(registry: &Registry) -> Formal {
        Formal::value(registry.resolve::<[T; N]>())
    }

    fn extract<'b>(arg: &'b mut Uarg<'_>, registry: &Registry) -> MetaResult<[T; N]> {
        arg.cast_value::<[T; N]>(&Self::formal(registry), registry)
    }
}

impl<T: Reflect + Clone, const N: usize> Param for &[T; N] {
    type Item<'b> = &'b [T; N];

    fn formal(registry: &Registry) -> Formal {
        Formal::new(registry, ParamShape::ConstLvalueRef, registry.resolve::<[T; N]>())
    }

    fn extract<'b>(arg: &'b mut Uarg<'_>, registry: &Registry) -> MetaResult<&'b [T; N]> {
        arg.cast_ref::<[T; N]>(&Self::formal(registry), registry)
    }
}

impl<T: Reflect + Clone, const N: usize> Param for &mut [T; N] {
    type Item<'b> = &'b mut [T; N];

    fn formal(registry: &Registry) -> Formal {
        Formal::new(registry, ParamShape::LvalueRef, registry.resolve::<[T; N]>())
    }

    fn extract<'b>(arg: &'b mut Uarg<'_>, registry: &Registry) -> MetaResult<&'b mut [T; N]> {
        arg.cast_mut::<[T; N]>(&Self::formal(registry), registry)
    }
}

impl<T: Reflect> Param for &[T] {
    type Item<'b> = &'b [T];

    fn formal(registry: &Registry) -> Formal {
        let slice = registry.array_type(&registry.resolve::<T>(), None);
        Formal::new(registry, ParamShape::ConstLvalueRef, slice.into())
    }

    fn extract<'b>(arg: &'b mut Uarg<'_>, registry: &Registry) -> MetaResult<&'b [T]> {
        arg.cast_slice::<T>(&Self::formal(registry))
    }
}

impl<T: Reflect> Param for &mut [T] {
    type Item<'b> = &'b mut [T];

    fn formal(registry: &Registry) -> Formal {
        let slice = registry.array_type(&registry.resolve::<T>(), None);
        Formal::new(registry, ParamShape::LvalueRef, slice.into())
    }

    fn extract<'b>(arg: &'b mut Uarg<'_>, registry: &Registry) -> MetaResult<&'b mut [T]> {
        arg.cast_slice_mut::<T>(&Self::formal(registry))
    }
}

impl<'a, T: Reflect + Clone, const N: usize> IntoUarg<'a> for [T; N] {
    fn type_only(registry: &Registry) -> Option<UargBase> {
        Some(UargBase::new(RefCategory::Rvalue, registry.resolve::<[T; N]>()))
    }

    fn into_uarg(self, registry: &Registry) -> Uarg<'a> {
        Uarg::rvalue(registry, self)
    }
}

impl<'a, T: Reflect + Clone, const N: usize> IntoUarg<'a> for &'a [T; N] {
    fn type_only(registry: &Registry) -> Option<UargBase> {
        Some(UargBase::new(RefCategory::ConstLvalue, registry.resolve::<[T; N]>()))
    }

    fn into_uarg(self, registry: &Registry) -> Uarg<'a> {
        Uarg::const_lvalue(registry, self)
    }
}

impl<'a, T: Reflect + Clone, const N: usize> IntoUarg<'a> for &'a mut [T; N] {
    fn type_only(registry: &Registry) -> Option<UargBase> {
        Some(UargBase::new(RefCategory::Lvalue, registry.resolve::<[T; N]>()))
    }

    fn into_uarg(self, registry: &Registry) -> Uarg<'a> {
        Uarg::lvalue(registry, self)
    }
}

// === Strings ===

/// `&str` parameters bind `String` arguments.
impl Param for &str {
    type Item<'b> = &'b str;

    fn formal(registry: &Registry) -> Formal {
        Formal::new(registry, ParamShape::ConstLvalueRef, registry.resolve::<String>())
    }

    fn extract<'b>(arg: &'b mut Uarg<'_>, registry: &Registry) -> MetaResult<&'b str> {
        arg.cast_ref::<String>(&Self::formal(registry), registry)
            .map(String::as_str)
    }
}

/// String literals are passed as `String` rvalues.
impl<'a> IntoUarg<'a> for &str {
    fn type_only(registry: &Registry) -> Option<UargBase> {
        Some(UargBase::new(RefCategory::Rvalue, registry.resolve::<String>()))
    }

    fn into_uarg(self, registry: &Registry) -> Uarg<'a> {
        Uarg::rvalue(registry, self.to_owned())
    }
}

// === Typed pointers ===

impl<T: Reflect> Param for Option<&T> {
    type Item<'b> = Option<&'b T>;

    fn formal(registry: &Registry) -> Formal {
        Formal::new(registry, ParamShape::Pointer { readonly: true }, registry.resolve::<T>())
    }

    fn extract<'b>(arg: &'b mut Uarg<'_>, registry: &Registry) -> MetaResult<Option<&'b T>> {
        arg.cast_pointer::<T>(&Self::formal(registry), registry)
    }
}

impl<T: Reflect> Param for Option<&mut T> {
    type Item<'b> = Option<&'b mut T>;

    fn formal(registry: &Registry) -> Formal {
        Formal::new(registry, ParamShape::Pointer { readonly: false }, registry.resolve::<T>())
    }

    fn extract<'b>(arg: &'b mut Uarg<'_>, registry: &Registry) -> MetaResult<Option<&'b mut T>> {
        arg.cast_pointer_mut::<T>(&Self::formal(registry), registry)
    }
}

/// Pointers are passed by value, so the argument itself is an rvalue.
impl<'a, T: Reflect> IntoUarg<'a> for Option<&'a T> {
    fn type_only(registry: &Registry) -> Option<UargBase> {
        let pointer = registry.pointer_type(&registry.resolve::<T>(), true);
        Some(UargBase::new(RefCategory::Rvalue, pointer.into()))
    }

    fn into_uarg(self, registry: &Registry) -> Uarg<'a> {
        Uarg::pointer(registry, self)
    }
}

impl<'a, T: Reflect> IntoUarg<'a> for Option<&'a mut T> {
    fn type_only(registry: &Registry) -> Option<UargBase> {
        let pointer = registry.pointer_type(&registry.resolve::<T>(), false);
        Some(UargBase::new(RefCategory::Rvalue, pointer.into()))
    }

    fn into_uarg(self, registry: &Registry) -> Uarg<'a> {
        Uarg::pointer_mut(registry, self)
    }
}

/// Receivers are dereferenced; only class types have a by-value `Receiver`.
impl<'a, T: Reflect + Receiver<Class = T>> IntoUinst<'a> for Option<&'a T> {
    fn type_only(registry: &Registry) -> Option<UinstBase> {
        Some(UinstBase::new(RefCategory::ConstLvalue, registry.resolve::<T>()))
    }

    fn into_uinst(self, registry: &Registry) -> Uinst<'a> {
        Uinst::from_pointer(registry, self)
    }
}

impl<'a, T: Reflect + Receiver<Class = T>> IntoUinst<'a> for Option<&'a mut T> {
    fn type_only(registry: &Registry) -> Option<UinstBase> {
        Some(UinstBase::new(RefCategory::Lvalue, registry.resolve::<T>()))
    }

    fn into_uinst(self, registry: &Registry) -> Uinst<'a> {
        Uinst::from_pointer_mut(registry, self)
    }
}

// === Void pointers ===

impl Param for Option<&AnyObject> {
    type Item<'b> = Option<&'b AnyObject>;

    fn formal(registry: &Registry) -> Formal {
        Formal::new(
            registry,
            ParamShape::Pointer { readonly: true },
            registry.void_type().into(),
        )
    }

    fn extract<'b>(arg: &'b mut Uarg<'_>, registry: &Registry) -> MetaResult<Option<&'b AnyObject>> {
        arg.cast_void_pointer(&Self::formal(registry))
    }
}

impl Param for Option<&mut AnyObject> {
    type Item<'b> = Option<&'b mut AnyObject>;

    fn formal(registry: &Registry) -> Formal {
        Formal::new(
            registry,
            ParamShape::Pointer { readonly: false },
            registry.void_type().into(),
        )
    }

    fn extract<'b>(
        arg: &'b mut Uarg<'_>,
        registry: &Registry,
    ) -> MetaResult<Option<&'b mut AnyObject>> {
        arg.cast_void_pointer_mut(&Self::formal(registry))
    }
}

// === Pre-built and type-erased arguments ===

impl<'a> IntoUarg<'a> for Uarg<'a> {
    fn type_only(_registry: &Registry) -> Option<UargBase> {
        None
    }

    fn into_uarg(self, _registry: &Registry) -> Uarg<'a> {
        self
    }
}

impl<'a> IntoUarg<'a> for Uvalue {
    fn type_only(_registry: &Registry) -> Option<UargBase> {
        None
    }

    fn into_uarg(self, registry: &Registry) -> Uarg<'a> {
        Uarg::from_owned(registry, self)
    }
}

impl<'a> IntoUarg<'a> for &'a Uvalue {
    fn type_only(_registry: &Registry) -> Option<UargBase> {
        None
    }

    fn into_uarg(self, registry: &Registry) -> Uarg<'a> {
        Uarg::from_uvalue(registry, self)
    }
}

impl<'a> IntoUarg<'a> for &'a mut Uvalue {
    fn type_only(_registry: &Registry) -> Option<UargBase> {
        None
    }

    fn into_uarg(self, registry: &Registry) -> Uarg<'a> {
        Uarg::from_uvalue_mut(registry, self)
    }
}

impl<'a> IntoUinst<'a> for Uinst<'a> {
    fn type_only(_registry: &Registry) -> Option<UinstBase> {
        None
    }

    fn into_uinst(self, _registry: &Registry) -> Uinst<'a> {
        self
    }
}

impl<'a> IntoUinst<'a> for Uvalue {
    fn type_only(_registry: &Registry) -> Option<UinstBase> {
        None
    }

    fn into_uinst(self, registry: &Registry) -> Uinst<'a> {
        Uinst::from_owned(registry, self)
    }
}

impl<'a> IntoUinst<'a> for &'a Uvalue {
    fn type_only(_registry: &Registry) -> Option<UinstBase> {
        None
    }

    fn into_uinst(self, registry: &Registry) -> Uinst<'a> {
        Uinst::from_uvalue(registry, self)
    }
}

impl<'a> IntoUinst<'a> for &'a mut Uvalue {
    fn type_only(_registry: &Registry) -> Option<UinstBase> {
        None
    }

    fn into_uinst(self, registry: &Registry) -> Uinst<'a> {
        Uinst::from_uvalue_mut(registry, self)
    }
}

// === Argument lists ===

impl<'a> IntoUargs<'a> for Uargs<'a> {
    fn type_only(_registry: &Registry) -> Option<UargBases> {
        None
    }

    fn into_uargs(self, _registry: &Registry) -> Uargs<'a> {
        self
    }
}

impl<'a> IntoUargs<'a> for Vec<Uarg<'a>> {
    fn type_only(_registry: &Registry) -> Option<UargBases> {
        None
    }

    fn into_uargs(self, _registry: &Registry) -> Uargs<'a> {
        SmallVec::from_vec(self)
    }
}

macro_rules! impl_into_uargs {
    ($($arg:ident $value:ident),*) => {
        impl<'a, $($arg: IntoUarg<'a>),*> IntoUargs<'a> for ($($arg,)*) {
            fn type_only(_registry: &Registry) -> Option<UargBases> {
                Some(smallvec![$(<$arg as IntoUarg<'a>>::type_only(_registry)?),*])
            }

            fn into_uargs(self, _registry: &Registry) -> Uargs<'a> {
                let ($($value,)*) = self;
                smallvec![$($value.into_uarg(_registry)),*]
            }
        }
    };
}

impl_into_uargs!();
impl_into_uargs!(A0 a0);
impl_into_uargs!(A0 a0, A1 a1);
impl_into_uargs!(A0 a0, A1 a1, A2 a2);
impl_into_uargs!(A0 a0, A1 a1, A2 a2, A3 a3);
impl_into_uargs!(A0 a0, A1 a1, A2 a2, A3 a3, A4 a4);
impl_into_uargs!(A0 a0, A1 a1, A2 a2, A3 a3, A4 a4, A5 a5);
