//! Free functions and variables in the registry's global scope.
//!
//! Re-binding a name with the same signature replaces the earlier entry.

use std::sync::Arc;

use parking_lot::RwLock;
use umeta_core::{
    Function, FunctionState, IntoFunction, Reflect, Registry, ReturnPolicy, Variable,
    VariableState,
};

/// Bind `callable` as a free function returning by copy.
pub fn function<F, M>(registry: &Registry, name: &str, callable: F) -> Function
where
    F: IntoFunction<M>,
{
    function_with(registry, name, callable, ReturnPolicy::AsCopy, &[])
}

#[tracing::instrument(level = "debug", skip_all, fields(name = %name))]
pub fn function_with<F, M>(
    registry: &Registry,
    name: &str,
    callable: F,
    policy: ReturnPolicy,
    argument_names: &[&str],
) -> Function
where
    F: IntoFunction<M>,
{
    let _guard = registry.bind_lock();
    let function = FunctionState::make_named(registry, name, callable, policy, argument_names);
    registry.add_function(Arc::clone(&function));
    function
}

/// Bind a shared cell as a global variable.
pub fn variable<V: Reflect + Clone>(
    registry: &Registry,
    name: &str,
    cell: Arc<RwLock<V>>,
) -> Variable {
    let _guard = registry.bind_lock();
    let variable = VariableState::make(registry, name, cell);
    registry.add_variable(Arc::clone(&variable));
    variable
}

pub fn variable_readonly<V: Reflect + Clone>(
    registry: &Registry,
    name: &str,
    cell: Arc<RwLock<V>>,
) -> Variable {
    let _guard = registry.bind_lock();
    let variable = VariableState::make_readonly(registry, name, cell);
    registry.add_variable(Arc::clone(&variable));
    variable
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests can panic")]
mod tests;
