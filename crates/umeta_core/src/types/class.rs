//! Class descriptors.
//!
//! A class descriptor is nominal: its shared hash comes from the Rust type,
//! not from its contents. Everything that is registered after the type was
//! first resolved (bases, upcast edges, constructors, methods, ...) lives in
//! `ClassTables` behind a `RwLock`.
//!
//! Lookups by name fall back to registered bases in registration order, so a
//! method bound on a base class is found through any descendant.

use std::collections::BTreeMap;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use rustc_hash::FxHashMap;

use crate::arg::IntoUargs;
use crate::error::{raise, ErrorCode, MetaResult};
use crate::flags::ClassFlags;
use crate::id::{TypeHasher, TypeId};
use crate::kind::TypeKind;
use crate::registry::Registry;
use crate::state::{
    Constructor, ConstructorIndex, Destructor, DestructorIndex, Function, FunctionIndex, Member,
    MemberIndex, Method, MethodIndex, Variable, VariableIndex,
};
use crate::upcast::UpcastEdge;
use crate::value::Uvalue;

use super::{kind_handle, AnyType, KindHandle};

/// Everything registered on a class after its descriptor was created.
#[derive(Default)]
pub(crate) struct ClassTables {
    /// Direct bases, in registration order.
    pub(crate) bases: Vec<ClassType>,
    /// Direct descendants, in registration order.
    pub(crate) derived: Vec<ClassType>,
    /// Closure of upcast edges keyed by the ancestor's id.
    pub(crate) upcasts: FxHashMap<TypeId, UpcastEdge>,
    pub(crate) constructors: BTreeMap<ConstructorIndex, Constructor>,
    pub(crate) destructors: BTreeMap<DestructorIndex, Destructor>,
    pub(crate) functions: BTreeMap<FunctionIndex, Function>,
    pub(crate) members: BTreeMap<MemberIndex, Member>,
    pub(crate) methods: BTreeMap<MethodIndex, Method>,
    pub(crate) variables: BTreeMap<VariableIndex, Variable>,
    pub(crate) typedefs: BTreeMap<String, AnyType>,
}

pub(crate) struct ClassData {
    name: &'static str,
    rust_type: std::any::TypeId,
    flags: ClassFlags,
    size: usize,
    align: usize,
    template_types: Vec<AnyType>,
    template_values: Vec<Uvalue>,
    tables: RwLock<ClassTables>,
}

impl ClassData {
    pub(crate) fn new(
        name: &'static str,
        rust_type: std::any::TypeId,
        flags: ClassFlags,
        size: usize,
        align: usize,
    ) -> Self {
        ClassData {
            name,
            rust_type,
            flags,
            size,
            align,
            template_types: Vec::new(),
            template_values: Vec::new(),
            tables: RwLock::new(ClassTables::default()),
        }
    }

    pub(crate) fn push_template_type(&mut self, ty: AnyType) {
        self.flags |= ClassFlags::IS_TEMPLATE_INSTANTIATION;
        self.template_types.push(ty);
    }

    pub(crate) fn push_template_value(&mut self, value: Uvalue) {
        self.flags |= ClassFlags::IS_TEMPLATE_INSTANTIATION;
        self.template_values.push(value);
    }

    pub(crate) fn set_flags(&mut self, flags: ClassFlags) {
        self.flags |= flags;
    }

    pub(crate) fn name(&self) -> &'static str {
        self.name
    }

    pub(crate) fn tables_mut(&self) -> RwLockWriteGuard<'_, ClassTables> {
        self.tables.write()
    }

    pub(crate) fn shared_hash(&self, kind: TypeKind) -> TypeId {
        TypeHasher::new(kind)
            .mix_rust_type(self.rust_type)
            .mix_str(self.name)
            .finish()
    }
}

kind_handle! {
    /// Handle to a class descriptor.
    ClassType => Class(ClassData)
}

impl ClassType {
    pub fn name(&self) -> &'static str {
        self.data().name
    }

    pub fn flags(&self) -> ClassFlags {
        self.data().flags
    }

    pub fn size(&self) -> usize {
        self.data().size
    }

    pub fn align(&self) -> usize {
        self.data().align
    }

    pub fn template_argument_types(&self) -> &[AnyType] {
        &self.data().template_types
    }

    pub fn template_argument_values(&self) -> &[Uvalue] {
        &self.data().template_values
    }

    pub(crate) fn tables(&self) -> RwLockReadGuard<'_, ClassTables> {
        self.data().tables.read()
    }

    pub(crate) fn tables_mut(&self) -> RwLockWriteGuard<'_, ClassTables> {
        self.data().tables_mut()
    }

    // === Hierarchy ===

    /// Direct bases, in registration order.
    pub fn bases(&self) -> Vec<ClassType> {
        self.tables().bases.clone()
    }

    /// Every registered ancestor reachable through upcast edges.
    pub fn ancestor_ids(&self) -> Vec<TypeId> {
        let mut ids: Vec<_> = self.tables().upcasts.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn is_direct_base_of(&self, derived: &ClassType) -> bool {
        derived.tables().bases.contains(self)
    }

    /// Whether `derived` has a registered upcast path to `self`.
    pub fn is_base_of(&self, derived: &ClassType) -> bool {
        derived.tables().upcasts.contains_key(&self.id())
    }

    pub fn is_derived_from(&self, base: &ClassType) -> bool {
        base.is_base_of(self)
    }

    pub(crate) fn upcast_edge(&self, target: TypeId) -> Option<UpcastEdge> {
        self.tables().upcasts.get(&target).cloned()
    }

    // === Snapshots ===

    pub fn constructors(&self) -> Vec<Constructor> {
        self.tables().constructors.values().cloned().collect()
    }

    pub fn destructors(&self) -> Vec<Destructor> {
        self.tables().destructors.values().cloned().collect()
    }

    pub fn functions(&self) -> Vec<Function> {
        self.tables().functions.values().cloned().collect()
    }

    pub fn members(&self) -> Vec<Member> {
        self.tables().members.values().cloned().collect()
    }

    pub fn methods(&self) -> Vec<Method> {
        self.tables().methods.values().cloned().collect()
    }

    pub fn variables(&self) -> Vec<Variable> {
        self.tables().variables.values().cloned().collect()
    }

    pub fn typedefs(&self) -> Vec<(String, AnyType)> {
        self.tables()
            .typedefs
            .iter()
            .map(|(name, ty)| (name.clone(), ty.clone()))
            .collect()
    }

    // === Lookup ===

    /// Search own tables, then bases depth-first in registration order.
    fn lookup<S>(&self, pick: &dyn Fn(&ClassTables) -> Option<S>) -> Option<S> {
        let bases = {
            let tables = self.tables();
            if let Some(found) = pick(&tables) {
                return Some(found);
            }
            tables.bases.clone()
        };
        bases.iter().find_map(|base| base.lookup(pick))
    }

    pub fn get_function(&self, name: &str) -> Option<Function> {
        self.lookup(&|tables| first_named(&tables.functions, name))
    }

    pub fn get_function_with(&self, name: &str, arguments: &[AnyType]) -> Option<Function> {
        self.lookup(&|tables| {
            tables
                .functions
                .iter()
                .find(|(index, _)| {
                    index.name() == name && index.get_type().argument_types() == arguments
                })
                .map(|(_, function)| function.clone())
        })
    }

    pub fn get_method(&self, name: &str) -> Option<Method> {
        self.lookup(&|tables| first_named(&tables.methods, name))
    }

    pub fn get_method_with(&self, name: &str, arguments: &[AnyType]) -> Option<Method> {
        self.lookup(&|tables| {
            tables
                .methods
                .iter()
                .find(|(index, _)| {
                    index.name() == name && index.get_type().argument_types() == arguments
                })
                .map(|(_, method)| method.clone())
        })
    }

    pub fn get_member(&self, name: &str) -> Option<Member> {
        self.lookup(&|tables| first_named(&tables.members, name))
    }

    pub fn get_variable(&self, name: &str) -> Option<Variable> {
        self.lookup(&|tables| first_named(&tables.variables, name))
    }

    pub fn get_typedef(&self, name: &str) -> Option<AnyType> {
        self.lookup(&|tables| tables.typedefs.get(name).cloned())
    }

    /// Constructor whose argument types match exactly. Constructors are not inherited.
    pub fn get_constructor_with(&self, arguments: &[AnyType]) -> Option<Constructor> {
        self.tables()
            .constructors
            .iter()
            .find(|(index, _)| index.get_type().argument_types() == arguments)
            .map(|(_, constructor)| constructor.clone())
    }

    pub fn get_destructor(&self) -> Option<Destructor> {
        self.tables().destructors.values().next().cloned()
    }

    // === Creation ===

    /// Construct a value with the first registered constructor that accepts `args`.
    pub fn try_create<'a, A: IntoUargs<'a>>(
        &self,
        registry: &Registry,
        args: A,
    ) -> MetaResult<Uvalue> {
        let mut args = args.into_uargs(registry);
        let constructors = self.constructors();
        let mut failure = ErrorCode::ArityMismatch;
        for constructor in &constructors {
            match constructor.check(&args) {
                Ok(()) => return constructor.try_create_uargs(registry, &mut args),
                Err(code @ ErrorCode::ArgumentTypeMismatch) => failure = code,
                Err(_) => {}
            }
        }
        tracing::trace!(class = self.name(), %failure, "no constructor accepts arguments");
        Err(failure)
    }

    #[track_caller]
    pub fn create<'a, A: IntoUargs<'a>>(&self, registry: &Registry, args: A) -> Uvalue {
        self.try_create(registry, args)
            .unwrap_or_else(|code| raise(code))
    }

    // === Registration ===

    pub fn add_constructor(&self, constructor: Constructor) -> MetaResult<()> {
        self.check_owner(constructor.get_type().owner_type())?;
        self.tables_mut()
            .constructors
            .insert(constructor.index().clone(), constructor);
        Ok(())
    }

    pub fn add_destructor(&self, destructor: Destructor) -> MetaResult<()> {
        self.check_owner(destructor.get_type().owner_type())?;
        self.tables_mut()
            .destructors
            .insert(destructor.index().clone(), destructor);
        Ok(())
    }

    pub fn add_function(&self, function: Function) {
        self.tables_mut()
            .functions
            .insert(function.index().clone(), function);
    }

    pub fn add_member(&self, member: Member) -> MetaResult<()> {
        self.check_owner(member.get_type().owner_type())?;
        self.tables_mut()
            .members
            .insert(member.index().clone(), member);
        Ok(())
    }

    pub fn add_method(&self, method: Method) -> MetaResult<()> {
        self.check_owner(method.get_type().owner_type())?;
        self.tables_mut()
            .methods
            .insert(method.index().clone(), method);
        Ok(())
    }

    pub fn add_variable(&self, variable: Variable) {
        self.tables_mut()
            .variables
            .insert(variable.index().clone(), variable);
    }

    pub fn add_typedef(&self, name: impl Into<String>, ty: AnyType) {
        self.tables_mut().typedefs.insert(name.into(), ty);
    }

    fn check_owner(&self, owner: &ClassType) -> MetaResult<()> {
        if owner == self {
            Ok(())
        } else {
            Err(ErrorCode::InstanceTypeMismatch)
        }
    }
}

fn first_named<K, S>(table: &BTreeMap<crate::state::StateIndex<K>, S>, name: &str) -> Option<S>
where
    K: KindHandle,
    S: Clone,
{
    table
        .iter()
        .find(|(index, _)| index.name() == name)
        .map(|(_, state)| state.clone())
}
