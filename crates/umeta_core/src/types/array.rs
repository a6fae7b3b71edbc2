//! Array descriptors.
//!
//! Bounded arrays (`[T; N]`) are value types and carry an `ArrayAccess` with
//! erased accessors for slicing and for decaying to a pointer to the first
//! element. Unbounded arrays (`[T]`) exist only as the target of slice
//! parameters and have no access table.

use crate::flags::ArrayFlags;
use crate::id::{TypeHasher, TypeId};
use crate::kind::TypeKind;
use crate::value::AnyObject;

use super::{kind_handle, AnyType};

/// Typed slice accessors for arrays of `T`, stored erased in `ArrayAccess`.
pub struct SliceViews<T: 'static> {
    pub view: for<'x> fn(&'x AnyObject) -> Option<&'x [T]>,
    pub view_mut: for<'x> fn(&'x mut AnyObject) -> Option<&'x mut [T]>,
}

/// Erased accessors of a bounded array value.
pub(crate) struct ArrayAccess {
    /// A `SliceViews<Element>`.
    pub(crate) slices: Box<AnyObject>,
    pub(crate) first: for<'x> fn(&'x AnyObject) -> Option<&'x AnyObject>,
    pub(crate) first_mut: for<'x> fn(&'x mut AnyObject) -> Option<&'x mut AnyObject>,
}

impl ArrayAccess {
    pub(crate) fn of<T: 'static + Send + Sync, const N: usize>() -> Self {
        ArrayAccess {
            slices: Box::new(SliceViews::<T> {
                view: view::<T, N>,
                view_mut: view_mut::<T, N>,
            }),
            first: first::<T, N>,
            first_mut: first_mut::<T, N>,
        }
    }
}

fn view<T: 'static, const N: usize>(object: &AnyObject) -> Option<&[T]> {
    object.downcast_ref::<[T; N]>().map(<[T; N]>::as_slice)
}

fn view_mut<T: 'static, const N: usize>(object: &mut AnyObject) -> Option<&mut [T]> {
    object.downcast_mut::<[T; N]>().map(<[T; N]>::as_mut_slice)
}

fn first<T: 'static + Send + Sync, const N: usize>(object: &AnyObject) -> Option<&AnyObject> {
    let element = object.downcast_ref::<[T; N]>()?.first()?;
    Some(element)
}

fn first_mut<T: 'static + Send + Sync, const N: usize>(
    object: &mut AnyObject,
) -> Option<&mut AnyObject> {
    let element = object.downcast_mut::<[T; N]>()?.first_mut()?;
    Some(element)
}

pub(crate) struct ArrayData {
    flags: ArrayFlags,
    extent: Option<usize>,
    element: AnyType,
    access: Option<ArrayAccess>,
}

impl ArrayData {
    pub(crate) fn bounded(element: AnyType, extent: usize, access: ArrayAccess) -> Self {
        ArrayData {
            flags: ArrayFlags::IS_BOUNDED,
            extent: Some(extent),
            element,
            access: Some(access),
        }
    }

    /// Bounded array without element access.
    pub(crate) fn sized(element: AnyType, extent: usize) -> Self {
        ArrayData {
            flags: ArrayFlags::IS_BOUNDED,
            extent: Some(extent),
            element,
            access: None,
        }
    }

    pub(crate) fn unbounded(element: AnyType) -> Self {
        ArrayData {
            flags: ArrayFlags::IS_UNBOUNDED,
            extent: None,
            element,
            access: None,
        }
    }

    pub(crate) fn extent(&self) -> Option<usize> {
        self.extent
    }

    pub(crate) fn element(&self) -> &AnyType {
        &self.element
    }

    pub(crate) fn shared_hash(&self, kind: TypeKind) -> TypeId {
        TypeHasher::new(kind)
            .mix(u64::from(self.flags.bits()))
            .mix_usize(self.extent.unwrap_or(0))
            .mix_id(self.element.id())
            .finish()
    }
}

kind_handle! {
    /// Handle to an array descriptor.
    ArrayType => Array(ArrayData)
}

impl ArrayType {
    pub fn flags(&self) -> ArrayFlags {
        self.data().flags
    }

    /// Number of elements, `None` for unbounded arrays.
    pub fn extent(&self) -> Option<usize> {
        self.data().extent
    }

    pub fn element_type(&self) -> AnyType {
        self.data().element.clone()
    }

    pub fn is_bounded(&self) -> bool {
        self.data().flags.contains(ArrayFlags::IS_BOUNDED)
    }

    /// View an array value of this type as a slice of `T`.
    pub(crate) fn slice<'o, T: 'static>(&self, object: &'o AnyObject) -> Option<&'o [T]> {
        let views = self.data().access.as_ref()?.slices.downcast_ref::<SliceViews<T>>()?;
        (views.view)(object)
    }

    pub(crate) fn slice_mut<'o, T: 'static>(
        &self,
        object: &'o mut AnyObject,
    ) -> Option<&'o mut [T]> {
        let views = self.data().access.as_ref()?.slices.downcast_ref::<SliceViews<T>>()?;
        (views.view_mut)(object)
    }

    /// Decay an array value to its first element.
    pub(crate) fn first<'o>(&self, object: &'o AnyObject) -> Option<&'o AnyObject> {
        (self.data().access.as_ref()?.first)(object)
    }

    pub(crate) fn first_mut<'o>(&self, object: &'o mut AnyObject) -> Option<&'o mut AnyObject> {
        (self.data().access.as_ref()?.first_mut)(object)
    }
}
