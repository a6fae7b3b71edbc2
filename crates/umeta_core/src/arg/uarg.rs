//! Call-duration argument wrappers.
//!
//! A `Uarg` remembers how an argument was supplied (`RefCategory`) and its
//! exact runtime type. `can_cast_to` is a pure predicate over that pair;
//! the `cast_*` family performs the conversion a formal parameter needs and
//! fails with `BadArgumentCast` whenever the predicate is false.
//!
//! `UargBase` is the type-only half, used to check invocability without live
//! values.

use crate::error::{ErrorCode, MetaResult};
use crate::reflect::{Polymorphic, Reflect};
use crate::registry::Registry;
use crate::types::AnyType;
use crate::upcast::{upcast_mut, upcast_ref};
use crate::value::{AnyObject, Uvalue};

use super::compat::can_bind;
use super::data::ArgData;
use super::{Formal, RefCategory};

/// Category and raw type of an argument, without the value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UargBase {
    category: RefCategory,
    raw_type: Option<AnyType>,
}

impl UargBase {
    pub fn new(category: RefCategory, raw_type: AnyType) -> Self {
        UargBase {
            category,
            raw_type: Some(raw_type),
        }
    }

    /// Base of an empty value: it has no type and binds to nothing.
    pub fn untyped(category: RefCategory) -> Self {
        UargBase {
            category,
            raw_type: None,
        }
    }

    #[inline]
    pub fn category(&self) -> RefCategory {
        self.category
    }

    #[inline]
    pub fn raw_type(&self) -> Option<&AnyType> {
        self.raw_type.as_ref()
    }

    pub fn can_cast_to(&self, formal: &Formal) -> bool {
        self.raw_type
            .as_ref()
            .is_some_and(|raw| can_bind(self.category, raw, formal))
    }
}

/// A live argument for one call.
pub struct Uarg<'a> {
    base: UargBase,
    data: ArgData<'a>,
}

impl<'a> Uarg<'a> {
    pub(crate) fn from_parts(base: UargBase, data: ArgData<'a>) -> Self {
        Uarg { base, data }
    }

    // === Construction ===

    pub fn lvalue<T: Reflect>(registry: &Registry, value: &'a mut T) -> Self {
        Uarg::from_parts(
            UargBase::new(RefCategory::Lvalue, registry.resolve::<T>()),
            ArgData::Mut(value),
        )
    }

    pub fn const_lvalue<T: Reflect>(registry: &Registry, value: &'a T) -> Self {
        Uarg::from_parts(
            UargBase::new(RefCategory::ConstLvalue, registry.resolve::<T>()),
            ArgData::Ref(value),
        )
    }

    pub fn rvalue<T: Reflect>(registry: &Registry, value: T) -> Self {
        Uarg::from_parts(
            UargBase::new(RefCategory::Rvalue, registry.resolve::<T>()),
            ArgData::Owned(Uvalue::new(value)),
        )
    }

    pub fn const_rvalue<T: Reflect>(registry: &Registry, value: T) -> Self {
        Uarg::from_parts(
            UargBase::new(RefCategory::ConstRvalue, registry.resolve::<T>()),
            ArgData::Owned(Uvalue::new(value)),
        )
    }

    /// `Option<&T>` argument: a pointer to a read-only `T`.
    pub fn pointer<T: Reflect>(registry: &Registry, value: Option<&'a T>) -> Self {
        let ty = registry.pointer_type(&registry.resolve::<T>(), true);
        Uarg::from_parts(
            UargBase::new(RefCategory::Rvalue, ty.into()),
            ArgData::Pointer(value.map(|value| value as &AnyObject)),
        )
    }

    /// `Option<&mut T>` argument: a pointer to a mutable `T`.
    pub fn pointer_mut<T: Reflect>(registry: &Registry, value: Option<&'a mut T>) -> Self {
        let ty = registry.pointer_type(&registry.resolve::<T>(), false);
        Uarg::from_parts(
            UargBase::new(RefCategory::Rvalue, ty.into()),
            ArgData::PointerMut(value.map(|value| value as &mut AnyObject)),
        )
    }

    /// The null pointer literal.
    pub fn nullptr(registry: &Registry) -> Self {
        Uarg::from_parts(
            UargBase::new(RefCategory::Rvalue, registry.nullptr_type().into()),
            ArgData::Pointer(None),
        )
    }

    /// Borrow the contents of a `Uvalue` as a const lvalue.
    pub fn from_uvalue(registry: &Registry, value: &'a Uvalue) -> Self {
        Uarg::from_parts(
            uvalue_base(registry, RefCategory::ConstLvalue, value),
            ArgData::from_uvalue(value),
        )
    }

    /// Borrow the contents of a `Uvalue` as an lvalue.
    pub fn from_uvalue_mut(registry: &Registry, value: &'a mut Uvalue) -> Self {
        let base = uvalue_base(registry, RefCategory::Lvalue, value);
        Uarg::from_parts(base, ArgData::from_uvalue_mut(value))
    }

    /// Hand a `Uvalue` over as an rvalue.
    pub fn from_owned(registry: &Registry, value: Uvalue) -> Self {
        Uarg::from_parts(
            uvalue_base(registry, RefCategory::Rvalue, &value),
            ArgData::from_owned(value),
        )
    }

    /// Borrow a polymorphic value under its dynamic type.
    pub fn from_dyn<P: Polymorphic + ?Sized>(registry: &Registry, value: &'a P) -> Self {
        Uarg::from_parts(
            UargBase::new(RefCategory::ConstLvalue, value.dynamic_type(registry)),
            ArgData::Ref(value.as_object()),
        )
    }

    pub fn from_dyn_mut<P: Polymorphic + ?Sized>(registry: &Registry, value: &'a mut P) -> Self {
        let raw = value.dynamic_type(registry);
        Uarg::from_parts(
            UargBase::new(RefCategory::Lvalue, raw),
            ArgData::Mut(value.as_object_mut()),
        )
    }

    // === Queries ===

    #[inline]
    pub fn base(&self) -> &UargBase {
        &self.base
    }

    #[inline]
    pub fn category(&self) -> RefCategory {
        self.base.category
    }

    #[inline]
    pub fn raw_type(&self) -> Option<&AnyType> {
        self.base.raw_type.as_ref()
    }

    pub fn can_cast_to(&self, formal: &Formal) -> bool {
        self.base.can_cast_to(formal)
    }

    pub(crate) fn is_vacant(&self) -> bool {
        self.data.is_vacant()
    }

    fn check(&self, formal: &Formal) -> MetaResult<AnyType> {
        match self.raw_type() {
            Some(raw) if self.can_cast_to(formal) => Ok(raw.clone()),
            _ => Err(ErrorCode::BadArgumentCast),
        }
    }

    // === Casts ===

    /// Move (exact rvalue) or copy the argument into a `T`.
    pub fn cast_value<T: Reflect>(&mut self, formal: &Formal, registry: &Registry) -> MetaResult<T> {
        let raw = self.check(formal)?;
        self.value_of::<T>(&raw, registry)
            .ok_or(ErrorCode::BadArgumentCast)
    }

    pub fn cast_ref<'b, T: Reflect>(
        &'b mut self,
        formal: &Formal,
        registry: &Registry,
    ) -> MetaResult<&'b T> {
        let raw = self.check(formal)?;
        self.ref_of::<T>(&raw, registry)
            .ok_or(ErrorCode::BadArgumentCast)
    }

    pub fn cast_mut<'b, T: Reflect>(
        &'b mut self,
        formal: &Formal,
        registry: &Registry,
    ) -> MetaResult<&'b mut T> {
        let raw = self.check(formal)?;
        self.mut_of::<T>(&raw, registry)
            .ok_or(ErrorCode::BadArgumentCast)
    }

    pub fn cast_pointer<'b, T: Reflect>(
        &'b mut self,
        formal: &Formal,
        registry: &Registry,
    ) -> MetaResult<Option<&'b T>> {
        let raw = self.check(formal)?;
        if raw.is_nullptr() {
            return Ok(None);
        }
        if let Some(pointer) = raw.as_pointer() {
            return match self.data.pointee() {
                Some(pointee) => upcast_ref::<T>(registry, pointer.pointee_type(), pointee)
                    .map(Some)
                    .ok_or(ErrorCode::BadArgumentCast),
                None => Ok(None),
            };
        }
        if let Some(array) = raw.as_array() {
            let object = self.data.object().ok_or(ErrorCode::BadArgumentCast)?;
            return match array.first(object) {
                Some(first) => upcast_ref::<T>(registry, &array.element_type(), first)
                    .map(Some)
                    .ok_or(ErrorCode::BadArgumentCast),
                None => Ok(None),
            };
        }
        Err(ErrorCode::BadArgumentCast)
    }

    pub fn cast_pointer_mut<'b, T: Reflect>(
        &'b mut self,
        formal: &Formal,
        registry: &Registry,
    ) -> MetaResult<Option<&'b mut T>> {
        let raw = self.check(formal)?;
        if raw.is_nullptr() {
            return Ok(None);
        }
        if let Some(pointer) = raw.as_pointer() {
            return match self.data.pointee_mut() {
                Some(pointee) => upcast_mut::<T>(registry, pointer.pointee_type(), pointee)
                    .map(Some)
                    .ok_or(ErrorCode::BadArgumentCast),
                None => Ok(None),
            };
        }
        if let Some(array) = raw.as_array() {
            let object = self.data.object_mut().ok_or(ErrorCode::BadArgumentCast)?;
            return match array.first_mut(object) {
                Some(first) => upcast_mut::<T>(registry, &array.element_type(), first)
                    .map(Some)
                    .ok_or(ErrorCode::BadArgumentCast),
                None => Ok(None),
            };
        }
        Err(ErrorCode::BadArgumentCast)
    }

    /// Untyped pointer: the pointee, or the array itself.
    pub fn cast_void_pointer<'b>(&'b mut self, formal: &Formal) -> MetaResult<Option<&'b AnyObject>> {
        let raw = self.check(formal)?;
        if raw.is_nullptr() {
            return Ok(None);
        }
        if raw.as_pointer().is_some() {
            return Ok(self.data.pointee());
        }
        self.data.object().map(Some).ok_or(ErrorCode::BadArgumentCast)
    }

    pub fn cast_void_pointer_mut<'b>(
        &'b mut self,
        formal: &Formal,
    ) -> MetaResult<Option<&'b mut AnyObject>> {
        let raw = self.check(formal)?;
        if raw.is_nullptr() {
            return Ok(None);
        }
        if raw.as_pointer().is_some() {
            return Ok(self.data.pointee_mut());
        }
        self.data.object_mut().map(Some).ok_or(ErrorCode::BadArgumentCast)
    }

    pub fn cast_slice<'b, T: Reflect>(&'b mut self, formal: &Formal) -> MetaResult<&'b [T]> {
        let raw = self.check(formal)?;
        let array = raw.as_array().ok_or(ErrorCode::BadArgumentCast)?;
        let object = self.data.object().ok_or(ErrorCode::BadArgumentCast)?;
        array.slice::<T>(object).ok_or(ErrorCode::BadArgumentCast)
    }

    pub fn cast_slice_mut<'b, T: Reflect>(
        &'b mut self,
        formal: &Formal,
    ) -> MetaResult<&'b mut [T]> {
        let raw = self.check(formal)?;
        let array = raw.as_array().ok_or(ErrorCode::BadArgumentCast)?;
        let object = self.data.object_mut().ok_or(ErrorCode::BadArgumentCast)?;
        array.slice_mut::<T>(object).ok_or(ErrorCode::BadArgumentCast)
    }

    // === Unchecked extraction, shared with `Uinst` ===

    pub(crate) fn value_of<T: Reflect>(&mut self, raw: &AnyType, registry: &Registry) -> Option<T> {
        if registry.resolve::<T>() == *raw {
            if let Some(owned) = self.data.take_owned() {
                return owned.into_inner::<T>().ok();
            }
        }
        let source = upcast_ref::<T>(registry, raw, self.data.object()?)?;
        let storage = T::OPS.clone_object(source)?;
        T::from_storage(storage).ok()
    }

    pub(crate) fn ref_of<T: Reflect>(&mut self, raw: &AnyType, registry: &Registry) -> Option<&T> {
        upcast_ref::<T>(registry, raw, self.data.object()?)
    }

    pub(crate) fn mut_of<T: Reflect>(
        &mut self,
        raw: &AnyType,
        registry: &Registry,
    ) -> Option<&mut T> {
        upcast_mut::<T>(registry, raw, self.data.object_mut()?)
    }
}

fn uvalue_base(registry: &Registry, category: RefCategory, value: &Uvalue) -> UargBase {
    match value.get_type(registry) {
        Some(ty) => UargBase::new(category, ty),
        None => UargBase::untyped(category),
    }
}
