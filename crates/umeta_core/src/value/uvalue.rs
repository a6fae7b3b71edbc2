//! The owning value box.

use std::cmp::Ordering;
use std::fmt;
use std::hash::Hasher;

use rustc_hash::FxHasher;

use crate::error::{ErrorCode, MetaResult};
use crate::reflect::Reflect;
use crate::registry::Registry;
use crate::types::AnyType;

use super::{AnyObject, Storage, ValueOps};

struct Held {
    storage: Storage,
    ops: &'static ValueOps,
}

/// Owning, type-erased container for at most one value.
///
/// An empty `Uvalue` has no type and rejects every cast.
#[derive(Default)]
pub struct Uvalue {
    held: Option<Held>,
}

impl Uvalue {
    pub fn new<T: Reflect>(value: T) -> Self {
        Uvalue {
            held: Some(Held {
                storage: value.into_storage(),
                ops: T::OPS,
            }),
        }
    }

    /// Build a `T` from constructor arguments and box it.
    pub fn in_place<T, A>(args: A) -> Self
    where
        T: Reflect + From<A>,
    {
        Uvalue::new(T::from(args))
    }

    #[inline]
    pub const fn empty() -> Self {
        Uvalue { held: None }
    }

    pub(crate) fn from_storage(storage: Storage, ops: &'static ValueOps) -> Self {
        Uvalue {
            held: Some(Held { storage, ops }),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.held.is_none()
    }

    #[inline]
    pub fn has_value(&self) -> bool {
        self.held.is_some()
    }

    /// Whether the value is stored without allocation.
    pub fn is_inline(&self) -> bool {
        self.held.as_ref().is_some_and(|held| held.storage.is_inline())
    }

    pub fn get_type(&self, registry: &Registry) -> Option<AnyType> {
        self.held.as_ref().map(|held| held.ops.resolve(registry))
    }

    pub fn type_name(&self) -> Option<&'static str> {
        self.held.as_ref().map(|held| held.ops.type_name())
    }

    pub fn data(&self) -> Option<&AnyObject> {
        self.held.as_ref().map(|held| held.storage.object())
    }

    pub fn data_mut(&mut self) -> Option<&mut AnyObject> {
        self.held.as_mut().map(|held| held.storage.object_mut())
    }

    /// Whether the stored value is exactly a `T`.
    pub fn is<T: Reflect>(&self) -> bool {
        self.data().is_some_and(<AnyObject>::is::<T>)
    }

    /// Exact-type access; bases of the stored class do not match.
    pub fn cast<T: Reflect>(&self) -> MetaResult<&T> {
        self.data()
            .ok_or(ErrorCode::BadUvalueAccess)?
            .downcast_ref::<T>()
            .ok_or(ErrorCode::BadCast)
    }

    pub fn cast_mut<T: Reflect>(&mut self) -> MetaResult<&mut T> {
        self.data_mut()
            .ok_or(ErrorCode::BadUvalueAccess)?
            .downcast_mut::<T>()
            .ok_or(ErrorCode::BadCast)
    }

    pub fn try_cast<T: Reflect>(&self) -> Option<&T> {
        self.data()?.downcast_ref::<T>()
    }

    pub fn try_cast_mut<T: Reflect>(&mut self) -> Option<&mut T> {
        self.data_mut()?.downcast_mut::<T>()
    }

    /// Move the value out, handing `self` back when it does not hold a `T`.
    pub fn into_inner<T: Reflect>(self) -> Result<T, Self> {
        match self.held {
            Some(Held { storage, ops }) => {
                T::from_storage(storage).map_err(|storage| Uvalue::from_storage(storage, ops))
            }
            None => Err(self),
        }
    }

    /// Move the value out, leaving `self` empty.
    pub fn take(&mut self) -> Uvalue {
        std::mem::take(self)
    }

    pub fn reset(&mut self) {
        self.held = None;
    }

    /// Copy through the type's clone entry.
    pub fn try_clone(&self) -> MetaResult<Uvalue> {
        let Some(held) = &self.held else {
            return Ok(Uvalue::empty());
        };
        held.ops
            .clone_object(held.storage.object())
            .map(|storage| Uvalue::from_storage(storage, held.ops))
            .ok_or(ErrorCode::BadUvalueAccess)
    }

    /// Copy of the element at `index` of a vector or array.
    ///
    /// Empty when the value is not indexable or `index` is out of bounds.
    pub fn index(&self, index: usize) -> Uvalue {
        self.held
            .as_ref()
            .and_then(|held| held.ops.index_object(held.storage.object(), index))
            .unwrap_or_default()
    }

    /// Hash through the type's hash entry; `None` when the type is not hashable.
    pub fn try_hash(&self) -> Option<u64> {
        let held = self.held.as_ref()?;
        let mut hasher = FxHasher::default();
        held.ops
            .hash_object(held.storage.object(), &mut hasher)
            .then(|| hasher.finish())
    }
}

impl<T: Reflect> From<T> for Uvalue {
    fn from(value: T) -> Self {
        Uvalue::new(value)
    }
}

/// Values of different types, and values without an equality entry, are unequal.
impl PartialEq for Uvalue {
    fn eq(&self, other: &Self) -> bool {
        match (&self.held, &other.held) {
            (None, None) => true,
            (Some(lhs), Some(rhs)) => {
                lhs.ops.rust_type() == rhs.ops.rust_type()
                    && lhs
                        .ops
                        .eq_objects(lhs.storage.object(), rhs.storage.object())
                        .unwrap_or(false)
            }
            _ => false,
        }
    }
}

/// An empty value sorts first. Values of different types, and values without
/// an ordering entry, are unordered.
impl PartialOrd for Uvalue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (&self.held, &other.held) {
            (None, None) => Some(Ordering::Equal),
            (None, Some(_)) => Some(Ordering::Less),
            (Some(_), None) => Some(Ordering::Greater),
            (Some(lhs), Some(rhs)) if lhs.ops.rust_type() == rhs.ops.rust_type() => lhs
                .ops
                .cmp_objects(lhs.storage.object(), rhs.storage.object()),
            (Some(_), Some(_)) => None,
        }
    }
}

impl fmt::Debug for Uvalue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(held) = &self.held else {
            return f.write_str("Uvalue(<empty>)");
        };
        f.write_str("Uvalue(")?;
        match held.ops.debug_object(held.storage.object(), f) {
            Some(result) => result?,
            None => write!(f, "<{}>", held.ops.type_name())?,
        }
        f.write_str(")")
    }
}
