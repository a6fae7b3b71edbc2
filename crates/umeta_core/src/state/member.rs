//! Bound data members.

use std::sync::Arc;

use crate::arg::{Formal, IntoUarg, IntoUinst, ParamShape, Uarg, Uinst};
use crate::error::{raise, ErrorCode, MetaResult};
use crate::flags::MemberFlags;
use crate::invoke::check_instance;
use crate::reflect::Reflect;
use crate::registry::Registry;
use crate::types::{KindHandle, MemberType};
use crate::value::Uvalue;

use super::MemberIndex;

type GetFn = dyn Fn(&Registry, &mut Uinst<'_>) -> MetaResult<Uvalue> + Send + Sync;
type SetFn = dyn Fn(&Registry, &mut Uinst<'_>, &mut Uarg<'_>) -> MetaResult<()> + Send + Sync;

pub type Member = Arc<MemberState>;

/// A field of a class, reached through accessor closures.
///
/// Reads accept a receiver of any category and return a copy. Writes need a
/// mutable receiver and an argument convertible to the field type.
pub struct MemberState {
    index: MemberIndex,
    getter_receiver: Formal,
    setter_receiver: Formal,
    value: Formal,
    get: Box<GetFn>,
    set: Option<Box<SetFn>>,
}

impl MemberState {
    /// Read-write member.
    pub fn make<T, V, G, S>(
        registry: &Registry,
        name: impl Into<String>,
        getter: G,
        setter: S,
    ) -> MetaResult<Member>
    where
        T: Reflect,
        V: Reflect + Clone,
        G: for<'o> Fn(&'o T) -> &'o V + Send + Sync + 'static,
        S: for<'o> Fn(&'o mut T) -> &'o mut V + Send + Sync + 'static,
    {
        let set: Box<SetFn> = Box::new(
            move |registry: &Registry, inst: &mut Uinst<'_>, arg: &mut Uarg<'_>| {
                let formal = Formal::value(registry.resolve::<V>());
                let value = arg.cast_value::<V>(&formal, registry)?;
                let receiver = Formal::new(registry, ParamShape::LvalueRef, registry.resolve::<T>());
                *setter(inst.cast_mut::<T>(&receiver, registry)?) = value;
                Ok(())
            },
        );
        MemberState::build::<T, V, G>(registry, name, getter, Some(set))
    }

    /// Member without a setter; writes fail with `BadConstAccess`.
    pub fn make_readonly<T, V, G>(
        registry: &Registry,
        name: impl Into<String>,
        getter: G,
    ) -> MetaResult<Member>
    where
        T: Reflect,
        V: Reflect + Clone,
        G: for<'o> Fn(&'o T) -> &'o V + Send + Sync + 'static,
    {
        MemberState::build::<T, V, G>(registry, name, getter, None)
    }

    fn build<T, V, G>(
        registry: &Registry,
        name: impl Into<String>,
        getter: G,
        set: Option<Box<SetFn>>,
    ) -> MetaResult<Member>
    where
        T: Reflect,
        V: Reflect + Clone,
        G: for<'o> Fn(&'o T) -> &'o V + Send + Sync + 'static,
    {
        let owner = registry.resolve::<T>().as_class().ok_or(ErrorCode::BadCast)?;
        let flags = if set.is_some() {
            MemberFlags::empty()
        } else {
            MemberFlags::IS_READONLY
        };
        let value_type = registry.resolve::<V>();
        let ty = registry.member_type(&owner, value_type.clone(), flags);
        let get: Box<GetFn> = Box::new(move |registry: &Registry, inst: &mut Uinst<'_>| {
            let receiver = Formal::new(registry, ParamShape::ConstLvalueRef, registry.resolve::<T>());
            Ok(Uvalue::new(getter(inst.cast_ref::<T>(&receiver, registry)?).clone()))
        });
        let owner_type = owner.as_any().clone();
        Ok(Arc::new(MemberState {
            index: MemberIndex::new(name, ty),
            getter_receiver: Formal::new(registry, ParamShape::ConstLvalueRef, owner_type.clone()),
            setter_receiver: Formal::new(registry, ParamShape::LvalueRef, owner_type),
            value: Formal::value(value_type),
            get,
            set,
        }))
    }

    #[inline]
    pub fn index(&self) -> &MemberIndex {
        &self.index
    }

    #[inline]
    pub fn name(&self) -> &str {
        self.index.name()
    }

    #[inline]
    pub fn get_type(&self) -> &MemberType {
        self.index.get_type()
    }

    pub fn is_readonly(&self) -> bool {
        self.set.is_none()
    }

    #[track_caller]
    pub fn get<'a, I: IntoUinst<'a>>(&self, registry: &Registry, inst: I) -> Uvalue {
        self.try_get(registry, inst)
            .unwrap_or_else(|code| raise(code))
    }

    pub fn try_get<'a, I: IntoUinst<'a>>(&self, registry: &Registry, inst: I) -> MetaResult<Uvalue> {
        let mut inst = inst.into_uinst(registry);
        check_instance(&self.getter_receiver, inst.can_cast_to(&self.getter_receiver))?;
        (self.get)(registry, &mut inst)
    }

    #[track_caller]
    pub fn set<'i, 'a, I, A>(&self, registry: &Registry, inst: I, value: A)
    where
        I: IntoUinst<'i>,
        A: IntoUarg<'a>,
    {
        self.try_set(registry, inst, value)
            .unwrap_or_else(|code| raise(code));
    }

    /// Checks run in order: read-only, instance, value.
    pub fn try_set<'i, 'a, I, A>(&self, registry: &Registry, inst: I, value: A) -> MetaResult<()>
    where
        I: IntoUinst<'i>,
        A: IntoUarg<'a>,
    {
        let Some(set) = &self.set else {
            return Err(ErrorCode::BadConstAccess);
        };
        let mut inst = inst.into_uinst(registry);
        let mut value = value.into_uarg(registry);
        check_instance(&self.setter_receiver, inst.can_cast_to(&self.setter_receiver))?;
        if !value.can_cast_to(&self.value) {
            return Err(ErrorCode::ArgumentTypeMismatch);
        }
        set(registry, &mut inst, &mut value)
    }

    pub fn is_gettable_with<'a, I: IntoUinst<'a>>(&self, registry: &Registry, inst: I) -> bool {
        inst.into_uinst(registry).can_cast_to(&self.getter_receiver)
    }

    pub fn is_settable_with<'i, 'a, I, A>(&self, registry: &Registry, inst: I, value: A) -> bool
    where
        I: IntoUinst<'i>,
        A: IntoUarg<'a>,
    {
        self.set.is_some()
            && inst.into_uinst(registry).can_cast_to(&self.setter_receiver)
            && value.into_uarg(registry).can_cast_to(&self.value)
    }
}

impl std::fmt::Debug for MemberState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemberState")
            .field("name", &self.name())
            .field("type", self.get_type())
            .finish_non_exhaustive()
    }
}
