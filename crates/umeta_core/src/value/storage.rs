//! Storage variants of a `Uvalue`.

use crate::reflect::Reflect;

use super::AnyObject;

/// Inline storage for built-in scalars.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Scalar {
    Bool(bool),
    Char(char),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    I128(i128),
    Isize(isize),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    U128(u128),
    Usize(usize),
    F32(f32),
    F64(f64),
}

macro_rules! scalar_object {
    ($scalar:expr, $($variant:ident),* $(,)?) => {
        match $scalar {
            $(Scalar::$variant(value) => value,)*
        }
    };
}

impl Scalar {
    pub(crate) fn object(&self) -> &AnyObject {
        scalar_object!(
            self, Bool, Char, I8, I16, I32, I64, I128, Isize, U8, U16, U32, U64, U128, Usize,
            F32, F64,
        )
    }

    pub(crate) fn object_mut(&mut self) -> &mut AnyObject {
        scalar_object!(
            self, Bool, Char, I8, I16, I32, I64, I128, Isize, U8, U16, U32, U64, U128, Usize,
            F32, F64,
        )
    }
}

/// Where a `Uvalue` keeps its value.
#[doc(hidden)]
pub enum Storage {
    /// Trivially copyable scalar, no allocation.
    Inline(Scalar),
    /// Any other value.
    Boxed(Box<AnyObject>),
}

impl Storage {
    pub fn boxed<T: Reflect>(value: T) -> Self {
        Storage::Boxed(Box::new(value))
    }

    /// Recover a boxed `T`, handing the storage back on mismatch.
    pub fn unbox<T: Reflect>(self) -> Result<T, Self> {
        match self {
            Storage::Boxed(boxed) => boxed.downcast::<T>().map(|value| *value).map_err(Storage::Boxed),
            inline @ Storage::Inline(_) => Err(inline),
        }
    }

    pub(crate) fn object(&self) -> &AnyObject {
        match self {
            Storage::Inline(scalar) => scalar.object(),
            Storage::Boxed(boxed) => &**boxed,
        }
    }

    pub(crate) fn object_mut(&mut self) -> &mut AnyObject {
        match self {
            Storage::Inline(scalar) => scalar.object_mut(),
            Storage::Boxed(boxed) => &mut **boxed,
        }
    }

    pub(crate) fn is_inline(&self) -> bool {
        matches!(self, Storage::Inline(_))
    }
}
