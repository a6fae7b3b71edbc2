//! Call-duration receiver wrappers.
//!
//! `Uinst` applies the argument rules to the receiver of a method or member
//! access, restricted to class values. Pointers are dereferenced on entry, so
//! `Option<&T>` becomes a const lvalue of `T` and `Option<&mut T>` an lvalue;
//! a null pointer yields a receiver that never binds.

use crate::error::{ErrorCode, MetaResult};
use crate::reflect::{Polymorphic, Reflect};
use crate::registry::Registry;
use crate::types::AnyType;
use crate::value::Uvalue;

use super::compat::can_bind_instance;
use super::data::ArgData;
use super::{Formal, RefCategory, Uarg, UargBase};

/// Category and raw type of a receiver, without the value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UinstBase(UargBase);

impl UinstBase {
    pub fn new(category: RefCategory, raw_type: AnyType) -> Self {
        UinstBase(UargBase::new(category, raw_type))
    }

    #[inline]
    pub fn category(&self) -> RefCategory {
        self.0.category()
    }

    #[inline]
    pub fn raw_type(&self) -> Option<&AnyType> {
        self.0.raw_type()
    }

    pub fn can_cast_to(&self, formal: &Formal) -> bool {
        self.raw_type()
            .is_some_and(|raw| can_bind_instance(self.category(), raw, formal))
    }
}

/// A live receiver for one call.
pub struct Uinst<'a> {
    base: UinstBase,
    arg: Uarg<'a>,
}

impl<'a> Uinst<'a> {
    fn from_arg(arg: Uarg<'a>) -> Self {
        Uinst {
            base: UinstBase(arg.base().clone()),
            arg,
        }
    }

    // === Construction ===

    pub fn lvalue<T: Reflect>(registry: &Registry, value: &'a mut T) -> Self {
        Uinst::from_arg(Uarg::lvalue(registry, value))
    }

    pub fn const_lvalue<T: Reflect>(registry: &Registry, value: &'a T) -> Self {
        Uinst::from_arg(Uarg::const_lvalue(registry, value))
    }

    pub fn rvalue<T: Reflect>(registry: &Registry, value: T) -> Self {
        Uinst::from_arg(Uarg::rvalue(registry, value))
    }

    pub fn const_rvalue<T: Reflect>(registry: &Registry, value: T) -> Self {
        Uinst::from_arg(Uarg::const_rvalue(registry, value))
    }

    /// Dereference `Option<&T>`.
    pub fn from_pointer<T: Reflect>(registry: &Registry, value: Option<&'a T>) -> Self {
        match value {
            Some(value) => Uinst::const_lvalue(registry, value),
            None => Uinst::null::<T>(registry, RefCategory::ConstLvalue),
        }
    }

    /// Dereference `Option<&mut T>`.
    pub fn from_pointer_mut<T: Reflect>(registry: &Registry, value: Option<&'a mut T>) -> Self {
        match value {
            Some(value) => Uinst::lvalue(registry, value),
            None => Uinst::null::<T>(registry, RefCategory::Lvalue),
        }
    }

    fn null<T: Reflect>(registry: &Registry, category: RefCategory) -> Self {
        Uinst::from_arg(Uarg::from_parts(
            UargBase::new(category, registry.resolve::<T>()),
            ArgData::Vacant,
        ))
    }

    pub fn from_uvalue(registry: &Registry, value: &'a Uvalue) -> Self {
        Uinst::from_arg(Uarg::from_uvalue(registry, value))
    }

    pub fn from_uvalue_mut(registry: &Registry, value: &'a mut Uvalue) -> Self {
        Uinst::from_arg(Uarg::from_uvalue_mut(registry, value))
    }

    pub fn from_owned(registry: &Registry, value: Uvalue) -> Self {
        Uinst::from_arg(Uarg::from_owned(registry, value))
    }

    pub fn from_dyn<P: Polymorphic + ?Sized>(registry: &Registry, value: &'a P) -> Self {
        Uinst::from_arg(Uarg::from_dyn(registry, value))
    }

    pub fn from_dyn_mut<P: Polymorphic + ?Sized>(registry: &Registry, value: &'a mut P) -> Self {
        Uinst::from_arg(Uarg::from_dyn_mut(registry, value))
    }

    // === Queries ===

    #[inline]
    pub fn base(&self) -> &UinstBase {
        &self.base
    }

    #[inline]
    pub fn category(&self) -> RefCategory {
        self.base.category()
    }

    #[inline]
    pub fn raw_type(&self) -> Option<&AnyType> {
        self.base.raw_type()
    }

    /// Type check plus liveness: a null receiver never binds.
    pub fn can_cast_to(&self, formal: &Formal) -> bool {
        !self.arg.is_vacant() && self.base.can_cast_to(formal)
    }

    fn check(&self, formal: &Formal) -> MetaResult<AnyType> {
        match self.raw_type() {
            Some(raw) if self.can_cast_to(formal) => Ok(raw.clone()),
            _ => Err(ErrorCode::BadInstanceCast),
        }
    }

    // === Casts ===

    pub fn cast_value<T: Reflect>(&mut self, formal: &Formal, registry: &Registry) -> MetaResult<T> {
        let raw = self.check(formal)?;
        self.arg
            .value_of::<T>(&raw, registry)
            .ok_or(ErrorCode::BadInstanceCast)
    }

    pub fn cast_ref<'b, T: Reflect>(
        &'b mut self,
        formal: &Formal,
        registry: &Registry,
    ) -> MetaResult<&'b T> {
        let raw = self.check(formal)?;
        self.arg
            .ref_of::<T>(&raw, registry)
            .ok_or(ErrorCode::BadInstanceCast)
    }

    pub fn cast_mut<'b, T: Reflect>(
        &'b mut self,
        formal: &Formal,
        registry: &Registry,
    ) -> MetaResult<&'b mut T> {
        let raw = self.check(formal)?;
        self.arg
            .mut_of::<T>(&raw, registry)
            .ok_or(ErrorCode::BadInstanceCast)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests can panic")]
mod tests;
