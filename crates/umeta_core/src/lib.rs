//! Runtime reflection core.
//!
//! - `Registry`: interned type descriptors and the global scope
//! - `Uvalue`: an owned value of any reflected type
//! - `Uarg`/`Uinst`: borrowed or owned call arguments tagged with a reference
//!   category, checked against formal parameters before any value is touched
//! - `FunctionState`, `MethodState`, ...: bound entities with `invoke`,
//!   `try_invoke` and `is_invocable_with`
//! - upcast edges registered with `Registry::add_base`, used by argument
//!   checks and by `Registry::ucast_ref`
//!
//! Types opt in with `reflect!`. Entities are usually created through the
//! `umeta_bind` builders rather than the `make` constructors here.

mod arg;
mod error;
mod flags;
mod id;
mod invoke;
mod kind;
mod logging;
mod reflect;
mod registry;
mod state;
mod types;
mod upcast;
mod value;

pub use arg::compat;
pub use arg::{
    ConstRvalueRef, Formal, IntoUarg, IntoUargs, IntoUinst, Param, ParamShape, Receiver,
    RefCategory, RvalueRef, Uarg, UargBase, UargBases, Uargs, Uinst, UinstBase,
};
pub use error::{ErrorCode, MetaResult};
pub use flags::{
    ArrayFlags, ClassFlags, ConstructorFlags, DestructorFlags, EnumFlags, FunctionFlags,
    MemberFlags, MethodFlags, NumberFlags, PointerFlags, ReferenceFlags,
};
pub use id::TypeId;
pub use invoke::{FunctionThunk, IntoFunction, IntoMethod, MethodThunk, ReturnValue};
pub use kind::TypeKind;
pub use logging::init_tracing;
pub use reflect::{Nullptr, Polymorphic, Reflect};
pub use registry::Registry;
pub use state::{
    ArgumentInfo, Constructor, ConstructorIndex, ConstructorState, Destructor, DestructorIndex,
    DestructorState, Evalue, EvalueIndex, EvalueState, Function, FunctionIndex, FunctionState,
    Member, MemberIndex, MemberState, Method, MethodIndex, MethodState, ReturnPolicy, StateIndex,
    Variable, VariableIndex, VariableState,
};
pub use types::{
    AnyType, ArrayType, ClassType, ConstructorType, Description, DestructorType, EnumType,
    FunctionType, KindHandle, MemberType, MethodType, NullptrType, NumberType, PointerType,
    ReferenceType, SliceViews, VoidType,
};
pub use upcast::UpcastEdge;
pub use value::{AnyObject, Scalar, Storage, Uvalue, ValueOps};
