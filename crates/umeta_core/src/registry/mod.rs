//! The type registry.
//!
//! A `Registry` owns every descriptor it hands out and the global scope of
//! bound functions and variables. It is caller-owned and passed explicitly to
//! every resolve, bind and invoke call.
//!
//! # Design
//!
//! Descriptors are interned by shared hash: asking twice for the same type, or
//! building the same structural type (pointer, signature, ...) twice, yields the
//! same node. Resolution of a known Rust type takes only the read lock. On a
//! miss the type is described outside any lock (descriptions may resolve other
//! types) and then interned under the write lock; a racing resolution of the
//! same type converges on the first node inserted.
//!
//! Registration (bases, bound entities) is serialized by a reentrant bind lock
//! so that one binding sequence may call into another.

use std::collections::hash_map::Entry;
use std::collections::BTreeMap;

use parking_lot::{ReentrantMutex, ReentrantMutexGuard, RwLock};
use rustc_hash::FxHashMap;

use crate::error::{ErrorCode, MetaResult};
use crate::flags::{DestructorFlags, MemberFlags, MethodFlags, ReferenceFlags};
use crate::id::TypeId;
use crate::reflect::{Nullptr, Polymorphic, Reflect};
use crate::state::{Function, FunctionIndex, Variable, VariableIndex};
use crate::types::{
    AnyType, ArrayData, ArrayType, ClassType, ConstructorData, ConstructorType, DestructorData,
    DestructorType, FunctionData, FunctionType, KindHandle, MemberData, MemberType, MethodData,
    MethodType, NullptrType, PointerData, PointerType, ReferenceData, ReferenceType, TypeData,
    VoidType,
};
use crate::upcast::{self, upcast_mut, upcast_ref};
use crate::value::ValueOps;

#[derive(Default)]
struct TypeTables {
    by_rust: FxHashMap<std::any::TypeId, AnyType>,
    by_id: FxHashMap<TypeId, AnyType>,
    /// Interning order, for stable iteration.
    order: Vec<AnyType>,
}

#[derive(Default)]
struct ScopeTables {
    functions: BTreeMap<FunctionIndex, Function>,
    variables: BTreeMap<VariableIndex, Variable>,
}

/// Owner of all type descriptors and of the global scope.
#[derive(Default)]
pub struct Registry {
    types: RwLock<TypeTables>,
    scope: RwLock<ScopeTables>,
    bind: ReentrantMutex<()>,
}

impl Registry {
    pub fn new() -> Self {
        Registry::default()
    }

    // === Resolution ===

    /// Canonical descriptor of `T`, created on first use.
    pub fn resolve<T: Reflect>(&self) -> AnyType {
        let key = std::any::TypeId::of::<T>();
        if let Some(ty) = self.types.read().by_rust.get(&key) {
            return ty.clone();
        }
        let description = T::describe(self);
        let ty = self.intern(description.0, Some(T::OPS));
        let mut tables = self.types.write();
        let ty = tables.by_rust.entry(key).or_insert(ty).clone();
        tracing::debug!(ty = %ty, kind = %ty.kind(), "resolved type");
        ty
    }

    /// Static type of `value`.
    pub fn resolve_of<T: Reflect>(&self, _value: &T) -> AnyType {
        self.resolve::<T>()
    }

    /// Most derived type of `value`, through its `Polymorphic` implementation.
    pub fn resolve_dyn<P: Polymorphic + ?Sized>(&self, value: &P) -> AnyType {
        value.dynamic_type(self)
    }

    /// Intern `data`, returning the existing node when one has the same shared hash.
    ///
    /// A node interned without an operation table (for example a bounded array
    /// built structurally) is upgraded when the Rust type is later resolved.
    fn intern(&self, data: TypeData, ops: Option<&'static ValueOps>) -> AnyType {
        let id = data.shared_hash();
        if let Some(existing) = self.types.read().by_id.get(&id) {
            if ops.is_none() || existing.value_ops().is_some() {
                return existing.clone();
            }
        }
        let mut tables = self.types.write();
        match tables.by_id.entry(id) {
            Entry::Occupied(mut slot) => {
                if ops.is_none() || slot.get().value_ops().is_some() {
                    return slot.get().clone();
                }
                let ty = AnyType::new(data, ops);
                slot.insert(ty.clone());
                if let Some(position) = tables.order.iter().position(|node| node.id() == id) {
                    tables.order[position] = ty.clone();
                }
                ty
            }
            Entry::Vacant(slot) => {
                let ty = AnyType::new(data, ops);
                slot.insert(ty.clone());
                tables.order.push(ty.clone());
                tracing::debug!(ty = %ty, id = ?id, "interned type");
                ty
            }
        }
    }

    /// Descriptor with the given id, if it was interned here.
    pub fn get_type(&self, id: TypeId) -> Option<AnyType> {
        self.types.read().by_id.get(&id).cloned()
    }

    /// Visit every interned descriptor in interning order.
    pub fn for_each_type(&self, mut f: impl FnMut(&AnyType)) {
        for ty in self.types() {
            f(&ty);
        }
    }

    /// Snapshot of every interned descriptor in interning order.
    pub fn types(&self) -> Vec<AnyType> {
        self.types.read().order.clone()
    }

    pub fn type_count(&self) -> usize {
        self.types.read().order.len()
    }

    // === Structural types ===

    pub fn void_type(&self) -> VoidType {
        VoidType::wrap(self.intern(TypeData::Void, None))
    }

    pub fn nullptr_type(&self) -> NullptrType {
        NullptrType::wrap(self.resolve::<Nullptr>())
    }

    pub fn pointer_type(&self, pointee: &AnyType, readonly: bool) -> PointerType {
        let data = PointerData::new(pointee.clone(), readonly);
        PointerType::wrap(self.intern(TypeData::Pointer(data), None))
    }

    pub fn reference_type(&self, pointee: &AnyType, flags: ReferenceFlags) -> ReferenceType {
        let data = ReferenceData::new(pointee.clone(), flags);
        ReferenceType::wrap(self.intern(TypeData::Reference(data), None))
    }

    /// Array of `element`: a slice type when `extent` is `None`.
    ///
    /// A bounded array built this way has no element access until `[T; N]` is
    /// resolved.
    pub fn array_type(&self, element: &AnyType, extent: Option<usize>) -> ArrayType {
        let data = match extent {
            Some(extent) => ArrayData::sized(element.clone(), extent),
            None => ArrayData::unbounded(element.clone()),
        };
        ArrayType::wrap(self.intern(TypeData::Array(data), None))
    }

    pub fn function_type(&self, return_type: AnyType, arguments: Vec<AnyType>) -> FunctionType {
        let data = FunctionData::new(return_type, arguments);
        FunctionType::wrap(self.intern(TypeData::Function(data), None))
    }

    pub fn method_type(
        &self,
        owner: &ClassType,
        qualifiers: MethodFlags,
        return_type: AnyType,
        arguments: Vec<AnyType>,
    ) -> MethodType {
        let data = MethodData::new(owner.clone(), qualifiers, return_type, arguments);
        MethodType::wrap(self.intern(TypeData::Method(data), None))
    }

    pub fn constructor_type(&self, owner: &ClassType, arguments: Vec<AnyType>) -> ConstructorType {
        let data = ConstructorData::new(owner.clone(), arguments);
        ConstructorType::wrap(self.intern(TypeData::Constructor(data), None))
    }

    pub fn destructor_type(&self, owner: &ClassType, flags: DestructorFlags) -> DestructorType {
        let data = DestructorData::new(owner.clone(), flags);
        DestructorType::wrap(self.intern(TypeData::Destructor(data), None))
    }

    pub fn member_type(&self, owner: &ClassType, value: AnyType, flags: MemberFlags) -> MemberType {
        let data = MemberData::new(owner.clone(), value, flags);
        MemberType::wrap(self.intern(TypeData::Member(data), None))
    }

    // === Hierarchy ===

    /// Register `B` as a direct base of `D`, using `D`'s `AsRef`/`AsMut` conversions.
    ///
    /// Both types must be classes and must differ (`BadCast` otherwise).
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(derived = std::any::type_name::<D>(), base = std::any::type_name::<B>())
    )]
    pub fn add_base<D, B>(&self) -> MetaResult<()>
    where
        D: Reflect + AsRef<B> + AsMut<B>,
        B: Reflect,
    {
        let _guard = self.bind_lock();
        let derived = self.resolve::<D>().as_class().ok_or(ErrorCode::BadCast)?;
        let base = self.resolve::<B>().as_class().ok_or(ErrorCode::BadCast)?;
        if derived == base {
            return Err(ErrorCode::BadCast);
        }
        upcast::link::<D, B>(&derived, &base);
        Ok(())
    }

    /// View a polymorphic value as `To`, which must be its dynamic type or a
    /// registered ancestor of it.
    pub fn ucast_ref<'o, To, P>(&self, value: &'o P) -> Option<&'o To>
    where
        To: Reflect,
        P: Polymorphic + ?Sized,
    {
        upcast_ref::<To>(self, &value.dynamic_type(self), value.as_object())
    }

    pub fn ucast_mut<'o, To, P>(&self, value: &'o mut P) -> Option<&'o mut To>
    where
        To: Reflect,
        P: Polymorphic + ?Sized,
    {
        let from = value.dynamic_type(self);
        upcast_mut::<To>(self, &from, value.as_object_mut())
    }

    /// Serializes registration; reentrant within one thread.
    pub fn bind_lock(&self) -> ReentrantMutexGuard<'_, ()> {
        self.bind.lock()
    }

    // === Global scope ===

    /// Register a free function; an equal name and signature replaces the old one.
    pub fn add_function(&self, function: Function) {
        tracing::debug!(name = function.name(), "added function");
        self.scope
            .write()
            .functions
            .insert(function.index().clone(), function);
    }

    /// First function named `name`, in index order.
    pub fn get_function(&self, name: &str) -> Option<Function> {
        self.scope
            .read()
            .functions
            .iter()
            .find(|(index, _)| index.name() == name)
            .map(|(_, function)| function.clone())
    }

    /// Overload of `name` whose declared argument types match exactly.
    pub fn get_function_with(&self, name: &str, arguments: &[AnyType]) -> Option<Function> {
        self.scope
            .read()
            .functions
            .iter()
            .find(|(index, _)| {
                index.name() == name && index.get_type().argument_types() == arguments
            })
            .map(|(_, function)| function.clone())
    }

    pub fn functions(&self) -> Vec<Function> {
        self.scope.read().functions.values().cloned().collect()
    }

    pub fn add_variable(&self, variable: Variable) {
        tracing::debug!(name = variable.name(), "added variable");
        self.scope
            .write()
            .variables
            .insert(variable.index().clone(), variable);
    }

    pub fn get_variable(&self, name: &str) -> Option<Variable> {
        self.scope
            .read()
            .variables
            .iter()
            .find(|(index, _)| index.name() == name)
            .map(|(_, variable)| variable.clone())
    }

    pub fn variables(&self) -> Vec<Variable> {
        self.scope.read().variables.values().cloned().collect()
    }
}

/// Class tables point back at descriptors; clear them so the nodes can be freed.
impl Drop for Registry {
    fn drop(&mut self) {
        self.scope.get_mut().functions.clear();
        self.scope.get_mut().variables.clear();
        for ty in &self.types.get_mut().order {
            ty.release();
        }
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let scope = self.scope.read();
        f.debug_struct("Registry")
            .field("types", &self.type_count())
            .field("functions", &scope.functions.len())
            .field("variables", &scope.variables.len())
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests can panic")]
mod tests;
