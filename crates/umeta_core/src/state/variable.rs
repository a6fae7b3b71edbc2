//! Bound variables.
//!
//! A variable is a named, shared cell (`Arc<RwLock<V>>`). The registry keeps
//! one clone of the `Arc`; the binding code keeps the other and sees every
//! write made through reflection.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::arg::{Formal, IntoUarg, Uarg};
use crate::error::{raise, ErrorCode, MetaResult};
use crate::reflect::Reflect;
use crate::registry::Registry;
use crate::types::PointerType;
use crate::value::Uvalue;

use super::VariableIndex;

type GetFn = dyn Fn() -> Uvalue + Send + Sync;
type SetFn = dyn Fn(&Registry, &mut Uarg<'_>) -> MetaResult<()> + Send + Sync;

pub type Variable = Arc<VariableState>;

pub struct VariableState {
    index: VariableIndex,
    value: Formal,
    get: Box<GetFn>,
    set: Option<Box<SetFn>>,
}

impl VariableState {
    pub fn make<V: Reflect + Clone>(
        registry: &Registry,
        name: impl Into<String>,
        cell: Arc<RwLock<V>>,
    ) -> Variable {
        let target = Arc::clone(&cell);
        let set: Box<SetFn> = Box::new(move |registry: &Registry, arg: &mut Uarg<'_>| {
            let formal = Formal::value(registry.resolve::<V>());
            let value = arg.cast_value::<V>(&formal, registry)?;
            *target.write() = value;
            Ok(())
        });
        VariableState::build(registry, name, cell, Some(set))
    }

    /// Variable whose writes fail with `BadConstAccess`.
    pub fn make_readonly<V: Reflect + Clone>(
        registry: &Registry,
        name: impl Into<String>,
        cell: Arc<RwLock<V>>,
    ) -> Variable {
        VariableState::build(registry, name, cell, None)
    }

    fn build<V: Reflect + Clone>(
        registry: &Registry,
        name: impl Into<String>,
        cell: Arc<RwLock<V>>,
        set: Option<Box<SetFn>>,
    ) -> Variable {
        let value_type = registry.resolve::<V>();
        let ty = registry.pointer_type(&value_type, set.is_none());
        Arc::new(VariableState {
            index: VariableIndex::new(name, ty),
            value: Formal::value(value_type),
            get: Box::new(move || Uvalue::new(cell.read().clone())),
            set,
        })
    }

    #[inline]
    pub fn index(&self) -> &VariableIndex {
        &self.index
    }

    #[inline]
    pub fn name(&self) -> &str {
        self.index.name()
    }

    /// Pointer to the value type, read-only for read-only variables.
    #[inline]
    pub fn get_type(&self) -> &PointerType {
        self.index.get_type()
    }

    pub fn is_readonly(&self) -> bool {
        self.set.is_none()
    }

    /// Copy of the current value.
    pub fn get(&self) -> Uvalue {
        (self.get)()
    }

    #[track_caller]
    pub fn set<'a, A: IntoUarg<'a>>(&self, registry: &Registry, value: A) {
        self.try_set(registry, value)
            .unwrap_or_else(|code| raise(code));
    }

    pub fn try_set<'a, A: IntoUarg<'a>>(&self, registry: &Registry, value: A) -> MetaResult<()> {
        let Some(set) = &self.set else {
            return Err(ErrorCode::BadConstAccess);
        };
        let mut value = value.into_uarg(registry);
        if !value.can_cast_to(&self.value) {
            return Err(ErrorCode::ArgumentTypeMismatch);
        }
        set(registry, &mut value)
    }

    pub fn is_settable_with<'a, A: IntoUarg<'a>>(&self, registry: &Registry, value: A) -> bool {
        self.set.is_some() && value.into_uarg(registry).can_cast_to(&self.value)
    }
}

impl std::fmt::Debug for VariableState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VariableState")
            .field("name", &self.name())
            .field("type", self.get_type())
            .finish_non_exhaustive()
    }
}
