//! Callables with a receiver.

use std::sync::Arc;

use crate::arg::{Formal, Param, Receiver, Uarg, Uinst};
use crate::error::{ErrorCode, MetaResult};
use crate::registry::Registry;
use crate::value::Uvalue;

use super::ReturnValue;

/// Erased method.
pub type MethodThunk =
    Arc<dyn Fn(&Registry, &mut Uinst<'_>, &mut [Uarg<'_>]) -> MetaResult<Uvalue> + Send + Sync>;

/// A Rust callable whose first parameter is a receiver (`&T`, `&mut T`, `T`).
pub trait IntoMethod<Marker>: Send + Sync + 'static {
    type Instance: Receiver;
    type Output: ReturnValue;

    fn formals(registry: &Registry) -> Vec<Formal>;

    fn into_thunk(self) -> MethodThunk;
}

macro_rules! impl_into_method {
    ($($param:ident $arg:ident),*) => {
        impl<F, S, R, $($param),*> IntoMethod<fn(S, $($param),*) -> R> for F
        where
            F: Fn(S, $($param),*) -> R + Send + Sync + 'static,
            F: for<'b> Fn(<S as Receiver>::Item<'b>, $(<$param as Param>::Item<'b>),*) -> R,
            S: Receiver,
            R: ReturnValue,
            $($param: Param,)*
        {
            type Instance = S;
            type Output = R;

            fn formals(_registry: &Registry) -> Vec<Formal> {
                vec![$(<$param as Param>::formal(_registry)),*]
            }

            fn into_thunk(self) -> MethodThunk {
                // Selects the `Item` signature among the two `Fn` bounds on `F`.
                fn call<R, S, $($param),*>(
                    f: &impl Fn(S, $($param),*) -> R,
                    receiver: S,
                    $($arg: $param),*
                ) -> R {
                    f(receiver, $($arg),*)
                }

                Arc::new(
                    move |registry: &Registry, inst: &mut Uinst<'_>, args: &mut [Uarg<'_>]| {
                        let [$($arg),*] = args else {
                            return Err(ErrorCode::ArityMismatch);
                        };
                        let receiver = <S as Receiver>::extract(inst, registry)?;
                        $(let $arg = <$param as Param>::extract($arg, registry)?;)*
                        Ok(call(&self, receiver, $($arg),*).into_uvalue())
                    },
                )
            }
        }
    };
}

impl_into_method!();
impl_into_method!(P0 a0);
impl_into_method!(P0 a0, P1 a1);
impl_into_method!(P0 a0, P1 a1, P2 a2);
impl_into_method!(P0 a0, P1 a1, P2 a2, P3 a3);
impl_into_method!(P0 a0, P1 a1, P2 a2, P3 a3, P4 a4);
impl_into_method!(P0 a0, P1 a1, P2 a2, P3 a3, P4 a4, P5 a5);
