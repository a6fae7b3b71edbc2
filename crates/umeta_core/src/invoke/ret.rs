//! Return values of bound callables.

use crate::reflect::Reflect;
use crate::registry::Registry;
use crate::types::AnyType;
use crate::value::Uvalue;

/// A type a bound callable may return.
///
/// `()` maps to the void type and an empty `Uvalue`; every reflected type is
/// boxed as is.
pub trait ReturnValue {
    fn return_type(registry: &Registry) -> AnyType;

    fn into_uvalue(self) -> Uvalue;
}

impl ReturnValue for () {
    fn return_type(registry: &Registry) -> AnyType {
        registry.void_type().into()
    }

    fn into_uvalue(self) -> Uvalue {
        Uvalue::empty()
    }
}

impl<T: Reflect> ReturnValue for T {
    fn return_type(registry: &Registry) -> AnyType {
        registry.resolve::<T>()
    }

    fn into_uvalue(self) -> Uvalue {
        Uvalue::new(self)
    }
}
