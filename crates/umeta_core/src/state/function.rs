//! Bound free functions.

use std::sync::Arc;

use crate::arg::{Formal, IntoUargs, Uarg};
use crate::error::{raise, MetaResult};
use crate::invoke::{check_arguments, check_arity, FunctionThunk, IntoFunction, ReturnValue};
use crate::registry::Registry;
use crate::types::FunctionType;
use crate::value::Uvalue;

use super::{describe_arguments, ArgumentInfo, FunctionIndex, ReturnPolicy};

pub type Function = Arc<FunctionState>;

/// A free function or associated function bound by name.
pub struct FunctionState {
    index: FunctionIndex,
    formals: Vec<Formal>,
    arguments: Vec<ArgumentInfo>,
    policy: ReturnPolicy,
    thunk: FunctionThunk,
}

impl FunctionState {
    pub fn make<F, M>(
        registry: &Registry,
        name: impl Into<String>,
        callable: F,
        policy: ReturnPolicy,
    ) -> Function
    where
        F: IntoFunction<M>,
    {
        FunctionState::make_named(registry, name, callable, policy, &[])
    }

    /// Same as `make`, naming the arguments in order.
    pub fn make_named<F, M>(
        registry: &Registry,
        name: impl Into<String>,
        callable: F,
        policy: ReturnPolicy,
        argument_names: &[&str],
    ) -> Function
    where
        F: IntoFunction<M>,
    {
        let formals = F::formals(registry);
        let declared: Vec<_> = formals.iter().map(|formal| formal.declared_type().clone()).collect();
        let ty = registry.function_type(
            <F::Output as ReturnValue>::return_type(registry),
            declared.clone(),
        );
        Arc::new(FunctionState {
            index: FunctionIndex::new(name, ty),
            formals,
            arguments: describe_arguments(&declared, argument_names),
            policy,
            thunk: callable.into_thunk(),
        })
    }

    #[inline]
    pub fn index(&self) -> &FunctionIndex {
        &self.index
    }

    #[inline]
    pub fn name(&self) -> &str {
        self.index.name()
    }

    #[inline]
    pub fn get_type(&self) -> &FunctionType {
        self.index.get_type()
    }

    pub fn arguments(&self) -> &[ArgumentInfo] {
        &self.arguments
    }

    pub fn formals(&self) -> &[Formal] {
        &self.formals
    }

    pub fn policy(&self) -> ReturnPolicy {
        self.policy
    }

    /// Arity and argument checks against live arguments.
    pub fn check(&self, args: &[Uarg<'_>]) -> MetaResult<()> {
        check_arity(&self.formals, args.len())?;
        check_arguments(&self.formals, args.iter().map(Uarg::base))
    }

    #[track_caller]
    pub fn invoke<'a, A: IntoUargs<'a>>(&self, registry: &Registry, args: A) -> Uvalue {
        self.try_invoke(registry, args)
            .unwrap_or_else(|code| raise(code))
    }

    pub fn try_invoke<'a, A: IntoUargs<'a>>(
        &self,
        registry: &Registry,
        args: A,
    ) -> MetaResult<Uvalue> {
        let mut args = args.into_uargs(registry);
        self.try_invoke_uargs(registry, &mut args)
    }

    pub fn try_invoke_uargs(&self, registry: &Registry, args: &mut [Uarg<'_>]) -> MetaResult<Uvalue> {
        self.check(args)?;
        let result = (self.thunk)(registry, args)?;
        Ok(self.policy.apply(result))
    }

    pub fn is_invocable_with<'a, A: IntoUargs<'a>>(&self, registry: &Registry, args: A) -> bool {
        self.check(&args.into_uargs(registry)).is_ok()
    }

    /// Check with argument types only; pre-built `Uarg` lists have no static types.
    pub fn is_invocable_with_types<'a, A: IntoUargs<'a>>(&self, registry: &Registry) -> bool {
        A::type_only(registry).is_some_and(|bases| {
            check_arity(&self.formals, bases.len()).is_ok()
                && check_arguments(&self.formals, bases.iter()).is_ok()
        })
    }
}

impl std::fmt::Debug for FunctionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionState")
            .field("name", &self.name())
            .field("type", self.get_type())
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
