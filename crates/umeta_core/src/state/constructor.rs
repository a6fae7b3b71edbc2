//! Bound constructors.

use std::sync::Arc;

use crate::arg::{Formal, IntoUargs, ParamShape, Uarg};
use crate::error::{raise, ErrorCode, MetaResult};
use crate::invoke::{check_arguments, check_arity, FunctionThunk, IntoFunction};
use crate::reflect::Reflect;
use crate::registry::Registry;
use crate::types::{ClassType, ConstructorType, KindHandle};
use crate::value::Uvalue;

use super::{describe_arguments, ArgumentInfo, ConstructorIndex};

pub type Constructor = Arc<ConstructorState>;

/// A callable that produces a new value of its owner class.
pub struct ConstructorState {
    index: ConstructorIndex,
    formals: Vec<Formal>,
    arguments: Vec<ArgumentInfo>,
    thunk: FunctionThunk,
}

impl ConstructorState {
    /// Bind `callable` as a constructor of the class it returns.
    ///
    /// Fails with `BadCast` when the returned type is not a class.
    pub fn make<F, M>(registry: &Registry, callable: F) -> MetaResult<Constructor>
    where
        F: IntoFunction<M>,
        F::Output: Reflect,
    {
        ConstructorState::make_named(registry, callable, &[])
    }

    pub fn make_named<F, M>(
        registry: &Registry,
        callable: F,
        argument_names: &[&str],
    ) -> MetaResult<Constructor>
    where
        F: IntoFunction<M>,
        F::Output: Reflect,
    {
        let owner = registry
            .resolve::<F::Output>()
            .as_class()
            .ok_or(ErrorCode::BadCast)?;
        Ok(ConstructorState::from_parts(
            registry,
            &owner,
            F::formals(registry),
            argument_names,
            callable.into_thunk(),
        ))
    }

    fn from_parts(
        registry: &Registry,
        owner: &ClassType,
        formals: Vec<Formal>,
        argument_names: &[&str],
        thunk: FunctionThunk,
    ) -> Constructor {
        let declared: Vec<_> = formals.iter().map(|formal| formal.declared_type().clone()).collect();
        let ty = registry.constructor_type(owner, declared.clone());
        Arc::new(ConstructorState {
            index: ConstructorIndex::new(owner.name(), ty),
            formals,
            arguments: describe_arguments(&declared, argument_names),
            thunk,
        })
    }

    /// Constructor from `Default::default`.
    pub fn make_default<T: Reflect + Default>(registry: &Registry) -> MetaResult<Constructor> {
        ConstructorState::make(registry, T::default)
    }

    /// Constructor from `Clone::clone`, taking the source as a const lvalue reference.
    pub fn make_copy<T: Reflect + Clone>(registry: &Registry) -> MetaResult<Constructor> {
        let owner = registry.resolve::<T>().as_class().ok_or(ErrorCode::BadCast)?;
        let formal = Formal::new(registry, ParamShape::ConstLvalueRef, owner.as_any().clone());
        let thunk: FunctionThunk = Arc::new(|registry: &Registry, args: &mut [Uarg<'_>]| {
            let [source] = args else {
                return Err(ErrorCode::ArityMismatch);
            };
            let formal = Formal::new(registry, ParamShape::ConstLvalueRef, registry.resolve::<T>());
            let source = source.cast_ref::<T>(&formal, registry)?;
            Ok(Uvalue::new(source.clone()))
        });
        Ok(ConstructorState::from_parts(registry, &owner, vec![formal], &[], thunk))
    }

    #[inline]
    pub fn index(&self) -> &ConstructorIndex {
        &self.index
    }

    #[inline]
    pub fn get_type(&self) -> &ConstructorType {
        self.index.get_type()
    }

    pub fn arguments(&self) -> &[ArgumentInfo] {
        &self.arguments
    }

    pub fn check(&self, args: &[Uarg<'_>]) -> MetaResult<()> {
        check_arity(&self.formals, args.len())?;
        check_arguments(&self.formals, args.iter().map(Uarg::base))
    }

    #[track_caller]
    pub fn create<'a, A: IntoUargs<'a>>(&self, registry: &Registry, args: A) -> Uvalue {
        self.try_create(registry, args)
            .unwrap_or_else(|code| raise(code))
    }

    pub fn try_create<'a, A: IntoUargs<'a>>(
        &self,
        registry: &Registry,
        args: A,
    ) -> MetaResult<Uvalue> {
        let mut args = args.into_uargs(registry);
        self.try_create_uargs(registry, &mut args)
    }

    pub fn try_create_uargs(&self, registry: &Registry, args: &mut [Uarg<'_>]) -> MetaResult<Uvalue> {
        self.check(args)?;
        (self.thunk)(registry, args)
    }

    pub fn is_invocable_with<'a, A: IntoUargs<'a>>(&self, registry: &Registry, args: A) -> bool {
        self.check(&args.into_uargs(registry)).is_ok()
    }

    pub fn is_invocable_with_types<'a, A: IntoUargs<'a>>(&self, registry: &Registry) -> bool {
        A::type_only(registry).is_some_and(|bases| {
            check_arity(&self.formals, bases.len()).is_ok()
                && check_arguments(&self.formals, bases.iter()).is_ok()
        })
    }
}

impl std::fmt::Debug for ConstructorState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConstructorState")
            .field("type", self.get_type().as_any())
            .finish_non_exhaustive()
    }
}
