//! Storage of a live argument.

use crate::value::{AnyObject, Uvalue};

/// What a `Uarg` or `Uinst` refers to for the duration of one call.
pub(crate) enum ArgData<'a> {
    Ref(&'a AnyObject),
    Mut(&'a mut AnyObject),
    /// Owned rvalue; moved out at most once.
    Owned(Uvalue),
    Pointer(Option<&'a AnyObject>),
    PointerMut(Option<&'a mut AnyObject>),
    /// Null instance, empty uvalue, or an rvalue that was already consumed.
    Vacant,
}

impl<'a> ArgData<'a> {
    pub(crate) fn from_uvalue(value: &'a Uvalue) -> Self {
        value.data().map_or(ArgData::Vacant, ArgData::Ref)
    }

    pub(crate) fn from_uvalue_mut(value: &'a mut Uvalue) -> Self {
        value.data_mut().map_or(ArgData::Vacant, ArgData::Mut)
    }

    pub(crate) fn from_owned(value: Uvalue) -> Self {
        if value.is_empty() {
            ArgData::Vacant
        } else {
            ArgData::Owned(value)
        }
    }

    pub(crate) fn is_vacant(&self) -> bool {
        matches!(self, ArgData::Vacant)
    }

    /// The referenced object, for non-pointer arguments.
    pub(crate) fn object(&self) -> Option<&AnyObject> {
        match self {
            ArgData::Ref(object) => Some(*object),
            ArgData::Mut(object) => Some(&**object),
            ArgData::Owned(value) => value.data(),
            ArgData::Pointer(_) | ArgData::PointerMut(_) | ArgData::Vacant => None,
        }
    }

    pub(crate) fn object_mut(&mut self) -> Option<&mut AnyObject> {
        match self {
            ArgData::Mut(object) => Some(&mut **object),
            ArgData::Owned(value) => value.data_mut(),
            ArgData::Ref(_) | ArgData::Pointer(_) | ArgData::PointerMut(_) | ArgData::Vacant => {
                None
            }
        }
    }

    /// The pointed-to object, for pointer arguments.
    pub(crate) fn pointee(&self) -> Option<&AnyObject> {
        match self {
            ArgData::Pointer(pointee) => *pointee,
            ArgData::PointerMut(pointee) => pointee.as_deref(),
            _ => None,
        }
    }

    pub(crate) fn pointee_mut(&mut self) -> Option<&mut AnyObject> {
        match self {
            ArgData::PointerMut(pointee) => pointee.as_deref_mut(),
            _ => None,
        }
    }

    /// Move an owned rvalue out, leaving the slot vacant.
    pub(crate) fn take_owned(&mut self) -> Option<Uvalue> {
        match std::mem::replace(self, ArgData::Vacant) {
            ArgData::Owned(value) => Some(value),
            other => {
                *self = other;
                None
            }
        }
    }
}
