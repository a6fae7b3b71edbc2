//! Registered entities: functions, methods, constructors, destructors,
//! members, variables and enumerators.
//!
//! Each entity is an immutable `*State` shared behind an `Arc` and keyed in
//! its owner's table by a `StateIndex` (name plus descriptor). States are
//! created with `make` and attached with `ClassType::add_*`,
//! `EnumType::add_evalue` or `Registry::add_*`.

mod argument;
mod constructor;
mod destructor;
mod evalue;
mod function;
mod index;
mod member;
mod method;
mod variable;

pub use argument::ArgumentInfo;
pub use constructor::{Constructor, ConstructorState};
pub use destructor::{Destructor, DestructorState};
pub use evalue::{Evalue, EvalueState};
pub use function::{Function, FunctionState};
pub use index::{
    ConstructorIndex, DestructorIndex, EvalueIndex, FunctionIndex, MemberIndex, MethodIndex,
    StateIndex, VariableIndex,
};
pub use member::{Member, MemberState};
pub use method::{Method, MethodState};
pub use variable::{Variable, VariableState};

pub(crate) use argument::describe_arguments;

use crate::value::Uvalue;

/// What a function or method hands back to the caller.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ReturnPolicy {
    /// Box the returned value.
    #[default]
    AsCopy,
    /// Drop the returned value and yield an empty `Uvalue`.
    Discard,
}

impl ReturnPolicy {
    pub(crate) fn apply(self, result: Uvalue) -> Uvalue {
        match self {
            ReturnPolicy::AsCopy => result,
            ReturnPolicy::Discard => Uvalue::empty(),
        }
    }
}
