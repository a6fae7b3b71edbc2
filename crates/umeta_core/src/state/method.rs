//! Bound methods.

use std::sync::Arc;

use crate::arg::{Formal, IntoUargs, IntoUinst, Receiver, Uarg, Uinst};
use crate::error::{raise, ErrorCode, MetaResult};
use crate::invoke::{
    check_arguments, check_arity, check_instance, IntoMethod, MethodThunk, ReturnValue,
};
use crate::registry::Registry;
use crate::types::MethodType;
use crate::value::Uvalue;

use super::{describe_arguments, ArgumentInfo, MethodIndex, ReturnPolicy};

pub type Method = Arc<MethodState>;

/// A method bound by name on its receiver class.
pub struct MethodState {
    index: MethodIndex,
    receiver: Formal,
    formals: Vec<Formal>,
    arguments: Vec<ArgumentInfo>,
    policy: ReturnPolicy,
    thunk: MethodThunk,
}

impl MethodState {
    /// Bind `callable`; fails with `BadCast` when the receiver type is not a class.
    pub fn make<F, M>(
        registry: &Registry,
        name: impl Into<String>,
        callable: F,
        policy: ReturnPolicy,
    ) -> MetaResult<Method>
    where
        F: IntoMethod<M>,
    {
        MethodState::make_named(registry, name, callable, policy, &[])
    }

    pub fn make_named<F, M>(
        registry: &Registry,
        name: impl Into<String>,
        callable: F,
        policy: ReturnPolicy,
        argument_names: &[&str],
    ) -> MetaResult<Method>
    where
        F: IntoMethod<M>,
    {
        let owner = registry
            .resolve::<<F::Instance as Receiver>::Class>()
            .as_class()
            .ok_or(ErrorCode::BadCast)?;
        let receiver = <F::Instance as Receiver>::formal(registry);
        let formals = F::formals(registry);
        let declared: Vec<_> = formals.iter().map(|formal| formal.declared_type().clone()).collect();
        let ty = registry.method_type(
            &owner,
            <F::Instance as Receiver>::qualifiers(),
            <F::Output as ReturnValue>::return_type(registry),
            declared.clone(),
        );
        Ok(Arc::new(MethodState {
            index: MethodIndex::new(name, ty),
            receiver,
            formals,
            arguments: describe_arguments(&declared, argument_names),
            policy,
            thunk: callable.into_thunk(),
        }))
    }

    #[inline]
    pub fn index(&self) -> &MethodIndex {
        &self.index
    }

    #[inline]
    pub fn name(&self) -> &str {
        self.index.name()
    }

    #[inline]
    pub fn get_type(&self) -> &MethodType {
        self.index.get_type()
    }

    pub fn arguments(&self) -> &[ArgumentInfo] {
        &self.arguments
    }

    /// Formal parameter of the receiver.
    pub fn receiver(&self) -> &Formal {
        &self.receiver
    }

    pub fn policy(&self) -> ReturnPolicy {
        self.policy
    }

    /// Arity, instance and argument checks, in that order.
    pub fn check(&self, inst: &Uinst<'_>, args: &[Uarg<'_>]) -> MetaResult<()> {
        check_arity(&self.formals, args.len())?;
        check_instance(&self.receiver, inst.can_cast_to(&self.receiver))?;
        check_arguments(&self.formals, args.iter().map(Uarg::base))
    }

    #[track_caller]
    pub fn invoke<'i, 'a, I, A>(&self, registry: &Registry, inst: I, args: A) -> Uvalue
    where
        I: IntoUinst<'i>,
        A: IntoUargs<'a>,
    {
        self.try_invoke(registry, inst, args)
            .unwrap_or_else(|code| raise(code))
    }

    pub fn try_invoke<'i, 'a, I, A>(&self, registry: &Registry, inst: I, args: A) -> MetaResult<Uvalue>
    where
        I: IntoUinst<'i>,
        A: IntoUargs<'a>,
    {
        let mut inst = inst.into_uinst(registry);
        let mut args = args.into_uargs(registry);
        self.try_invoke_uargs(registry, &mut inst, &mut args)
    }

    pub fn try_invoke_uargs(
        &self,
        registry: &Registry,
        inst: &mut Uinst<'_>,
        args: &mut [Uarg<'_>],
    ) -> MetaResult<Uvalue> {
        self.check(inst, args)?;
        let result = (self.thunk)(registry, inst, args)?;
        Ok(self.policy.apply(result))
    }

    pub fn is_invocable_with<'i, 'a, I, A>(&self, registry: &Registry, inst: I, args: A) -> bool
    where
        I: IntoUinst<'i>,
        A: IntoUargs<'a>,
    {
        self.check(&inst.into_uinst(registry), &args.into_uargs(registry))
            .is_ok()
    }

    pub fn is_invocable_with_types<'i, 'a, I, A>(&self, registry: &Registry) -> bool
    where
        I: IntoUinst<'i>,
        A: IntoUargs<'a>,
    {
        let (Some(inst), Some(args)) = (I::type_only(registry), A::type_only(registry)) else {
            return false;
        };
        check_arity(&self.formals, args.len()).is_ok()
            && check_instance(&self.receiver, inst.can_cast_to(&self.receiver)).is_ok()
            && check_arguments(&self.formals, args.iter()).is_ok()
    }
}

impl std::fmt::Debug for MethodState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MethodState")
            .field("name", &self.name())
            .field("type", self.get_type())
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
