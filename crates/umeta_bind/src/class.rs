//! Class binding.
//!
//! # Design
//!
//! Every step registers immediately. The first failing step poisons the
//! builder: later steps are skipped and `finish` reports the error. Only the
//! class check and `base` can fail, since every other step is typed against
//! `T` itself.

use std::marker::PhantomData;
use std::sync::Arc;

use parking_lot::{ReentrantMutexGuard, RwLock};
use umeta_core::{
    ClassType, ConstructorState, DestructorState, ErrorCode, FunctionState, IntoFunction,
    IntoMethod, MemberState, MetaResult, MethodState, Receiver, Reflect, Registry, ReturnPolicy,
    VariableState,
};

/// Start binding the class `T`.
///
/// The builder is poisoned with `BadCast` when `T` was declared as an enum or
/// is a built-in number.
#[must_use = "call `finish` to observe binding errors"]
pub fn class<T: Reflect>(registry: &Registry) -> ClassBind<'_, T> {
    let guard = registry.bind_lock();
    let class = registry.resolve::<T>().as_class().ok_or(ErrorCode::BadCast);
    ClassBind {
        registry,
        class,
        _guard: guard,
        _marker: PhantomData,
    }
}

/// Builder returned by [`class`].
pub struct ClassBind<'r, T: Reflect> {
    registry: &'r Registry,
    class: MetaResult<ClassType>,
    _guard: ReentrantMutexGuard<'r, ()>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Reflect> ClassBind<'_, T> {
    fn step(
        mut self,
        what: &str,
        step: impl FnOnce(&Registry, &ClassType) -> MetaResult<()>,
    ) -> Self {
        if let Ok(class) = &self.class {
            if let Err(code) = step(self.registry, class) {
                tracing::debug!(class = class.name(), what, %code, "binding step failed");
                self.class = Err(code);
            } else {
                tracing::trace!(class = class.name(), what, "bound");
            }
        }
        self
    }

    // === Hierarchy ===

    /// Register `B` as a direct base of `T`.
    #[must_use]
    pub fn base<B>(self) -> Self
    where
        T: AsRef<B> + AsMut<B>,
        B: Reflect,
    {
        self.step("base", |registry, _| registry.add_base::<T, B>())
    }

    // === Constructors and destructors ===

    #[must_use]
    pub fn constructor<F, M>(self, callable: F) -> Self
    where
        F: IntoFunction<M, Output = T>,
    {
        self.constructor_named(callable, &[])
    }

    #[must_use]
    pub fn constructor_named<F, M>(self, callable: F, argument_names: &[&str]) -> Self
    where
        F: IntoFunction<M, Output = T>,
    {
        self.step("constructor", |registry, class| {
            class.add_constructor(ConstructorState::make_named(registry, callable, argument_names)?)
        })
    }

    #[must_use]
    pub fn default_constructor(self) -> Self
    where
        T: Default,
    {
        self.step("default constructor", |registry, class| {
            class.add_constructor(ConstructorState::make_default::<T>(registry)?)
        })
    }

    #[must_use]
    pub fn copy_constructor(self) -> Self
    where
        T: Clone,
    {
        self.step("copy constructor", |registry, class| {
            class.add_constructor(ConstructorState::make_copy::<T>(registry)?)
        })
    }

    #[must_use]
    pub fn destructor(self) -> Self {
        self.step("destructor", |registry, class| {
            class.add_destructor(DestructorState::make::<T>(registry)?)
        })
    }

    /// Destructor that hands each destroyed value to `hook`.
    #[must_use]
    pub fn destructor_with<H>(self, hook: H) -> Self
    where
        H: Fn(T) + Send + Sync + 'static,
    {
        self.step("destructor", |registry, class| {
            class.add_destructor(DestructorState::make_with::<T, H>(registry, hook)?)
        })
    }

    // === Functions and methods ===

    /// Associated function, looked up through the class.
    #[must_use]
    pub fn function<F, M>(self, name: &str, callable: F) -> Self
    where
        F: IntoFunction<M>,
    {
        self.function_with(name, callable, ReturnPolicy::AsCopy, &[])
    }

    #[must_use]
    pub fn function_with<F, M>(
        self,
        name: &str,
        callable: F,
        policy: ReturnPolicy,
        argument_names: &[&str],
    ) -> Self
    where
        F: IntoFunction<M>,
    {
        self.step("function", |registry, class| {
            class.add_function(FunctionState::make_named(
                registry,
                name,
                callable,
                policy,
                argument_names,
            ));
            Ok(())
        })
    }

    #[must_use]
    pub fn method<F, M>(self, name: &str, callable: F) -> Self
    where
        F: IntoMethod<M>,
        F::Instance: Receiver<Class = T>,
    {
        self.method_with(name, callable, ReturnPolicy::AsCopy, &[])
    }

    #[must_use]
    pub fn method_with<F, M>(
        self,
        name: &str,
        callable: F,
        policy: ReturnPolicy,
        argument_names: &[&str],
    ) -> Self
    where
        F: IntoMethod<M>,
        F::Instance: Receiver<Class = T>,
    {
        self.step("method", |registry, class| {
            class.add_method(MethodState::make_named(
                registry,
                name,
                callable,
                policy,
                argument_names,
            )?)
        })
    }

    // === Data ===

    #[must_use]
    pub fn member<V, G, S>(self, name: &str, getter: G, setter: S) -> Self
    where
        V: Reflect + Clone,
        G: for<'o> Fn(&'o T) -> &'o V + Send + Sync + 'static,
        S: for<'o> Fn(&'o mut T) -> &'o mut V + Send + Sync + 'static,
    {
        self.step("member", |registry, class| {
            class.add_member(MemberState::make::<T, V, G, S>(registry, name, getter, setter)?)
        })
    }

    #[must_use]
    pub fn member_readonly<V, G>(self, name: &str, getter: G) -> Self
    where
        V: Reflect + Clone,
        G: for<'o> Fn(&'o T) -> &'o V + Send + Sync + 'static,
    {
        self.step("member", |registry, class| {
            class.add_member(MemberState::make_readonly::<T, V, G>(registry, name, getter)?)
        })
    }

    /// Class-level variable over a shared cell.
    #[must_use]
    pub fn variable<V: Reflect + Clone>(self, name: &str, cell: Arc<RwLock<V>>) -> Self {
        self.step("variable", |registry, class| {
            class.add_variable(VariableState::make(registry, name, cell));
            Ok(())
        })
    }

    #[must_use]
    pub fn variable_readonly<V: Reflect + Clone>(self, name: &str, cell: Arc<RwLock<V>>) -> Self {
        self.step("variable", |registry, class| {
            class.add_variable(VariableState::make_readonly(registry, name, cell));
            Ok(())
        })
    }

    /// Name `U` inside the class.
    #[must_use]
    pub fn typedef<U: Reflect>(self, name: &str) -> Self {
        self.step("typedef", |registry, class| {
            class.add_typedef(name, registry.resolve::<U>());
            Ok(())
        })
    }

    /// Release the bind lock and report the first failure, if any.
    pub fn finish(self) -> MetaResult<ClassType> {
        self.class
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests can panic")]
mod tests;
