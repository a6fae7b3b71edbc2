//! Free callables.

use std::sync::Arc;

use crate::arg::{Formal, Param, Uarg};
use crate::error::{ErrorCode, MetaResult};
use crate::registry::Registry;
use crate::value::Uvalue;

use super::ReturnValue;

/// Erased free callable.
pub type FunctionThunk =
    Arc<dyn Fn(&Registry, &mut [Uarg<'_>]) -> MetaResult<Uvalue> + Send + Sync>;

/// A Rust callable that can be bound as a function or constructor.
///
/// `Marker` is the `fn` pointer type of the callable's signature; it only
/// disambiguates the implementations for different arities.
pub trait IntoFunction<Marker>: Send + Sync + 'static {
    type Output: ReturnValue;

    fn formals(registry: &Registry) -> Vec<Formal>;

    fn into_thunk(self) -> FunctionThunk;
}

macro_rules! impl_into_function {
    ($($param:ident $arg:ident),*) => {
        impl<F, R, $($param),*> IntoFunction<fn($($param),*) -> R> for F
        where
            F: Fn($($param),*) -> R + Send + Sync + 'static,
            F: for<'b> Fn($(<$param as Param>::Item<'b>),*) -> R,
            R: ReturnValue,
            $($param: Param,)*
        {
            type Output = R;

            fn formals(_registry: &Registry) -> Vec<Formal> {
                vec![$(<$param as Param>::formal(_registry)),*]
            }

            fn into_thunk(self) -> FunctionThunk {
                // Selects the `Item` signature among the two `Fn` bounds on `F`.
                fn call<R, $($param),*>(f: &impl Fn($($param),*) -> R, $($arg: $param),*) -> R {
                    f($($arg),*)
                }

                Arc::new(move |_registry: &Registry, args: &mut [Uarg<'_>]| {
                    let [$($arg),*] = args else {
                        return Err(ErrorCode::ArityMismatch);
                    };
                    $(let $arg = <$param as Param>::extract($arg, _registry)?;)*
                    Ok(call(&self, $($arg),*).into_uvalue())
                })
            }
        }
    };
}

impl_into_function!();
impl_into_function!(P0 a0);
impl_into_function!(P0 a0, P1 a1);
impl_into_function!(P0 a0, P1 a1, P2 a2);
impl_into_function!(P0 a0, P1 a1, P2 a2, P3 a3);
impl_into_function!(P0 a0, P1 a1, P2 a2, P3 a3, P4 a4);
impl_into_function!(P0 a0, P1 a1, P2 a2, P3 a3, P4 a4, P5 a5);
