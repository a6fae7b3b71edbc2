//! Per-type operation table.
//!
//! One `ValueOps` exists per reflected type, as the associated constant
//! `Reflect::OPS`. Optional entries are filled by the capability builders
//! when the type implements the matching trait. `with_index` is the exception:
//! it is filled for sequences of copyable elements.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::reflect::Reflect;
use crate::registry::Registry;
use crate::types::AnyType;

use super::{AnyObject, Storage, Uvalue};

type CloneFn = fn(&AnyObject) -> Option<Storage>;
type EqFn = fn(&AnyObject, &AnyObject) -> Option<bool>;
type HashFn = fn(&AnyObject, &mut dyn Hasher) -> bool;
type DebugFn = fn(&AnyObject, &mut fmt::Formatter<'_>) -> fmt::Result;
type OrdFn = fn(&AnyObject, &AnyObject) -> Option<Ordering>;
type IndexFn = fn(&AnyObject, usize) -> Option<Uvalue>;

/// Operation table shared by every value of one type.
pub struct ValueOps {
    type_name: fn() -> &'static str,
    rust_type: fn() -> std::any::TypeId,
    resolve: fn(&Registry) -> AnyType,
    clone: Option<CloneFn>,
    eq: Option<EqFn>,
    hash: Option<HashFn>,
    debug: Option<DebugFn>,
    ord: Option<OrdFn>,
    index: Option<IndexFn>,
}

impl ValueOps {
    /// Table with identity entries only.
    pub const fn new<T: Reflect>() -> Self {
        ValueOps {
            type_name: std::any::type_name::<T>,
            rust_type: std::any::TypeId::of::<T>,
            resolve: Registry::resolve::<T>,
            clone: None,
            eq: None,
            hash: None,
            debug: None,
            ord: None,
            index: None,
        }
    }

    #[must_use]
    pub const fn with_clone<T: Reflect + Clone>(mut self) -> Self {
        self.clone = Some(clone_erased::<T>);
        self
    }

    #[must_use]
    pub const fn with_eq<T: Reflect + PartialEq>(mut self) -> Self {
        self.eq = Some(eq_erased::<T>);
        self
    }

    #[must_use]
    pub const fn with_hash<T: Reflect + Hash>(mut self) -> Self {
        self.hash = Some(hash_erased::<T>);
        self
    }

    #[must_use]
    pub const fn with_debug<T: Reflect + fmt::Debug>(mut self) -> Self {
        self.debug = Some(debug_erased::<T>);
        self
    }

    /// Ordering entry. Also fills the equality entry, so that the two agree.
    #[must_use]
    pub const fn with_ord<T: Reflect + PartialOrd>(mut self) -> Self {
        self.eq = Some(eq_erased::<T>);
        self.ord = Some(ord_erased::<T>);
        self
    }

    /// Element access for a sequence `S` of copyable `E`.
    #[must_use]
    pub const fn with_index<S, E>(mut self) -> Self
    where
        S: Reflect + AsRef<[E]>,
        E: Reflect + Clone,
    {
        self.index = Some(index_erased::<S, E>);
        self
    }

    pub fn type_name(&self) -> &'static str {
        (self.type_name)()
    }

    pub fn resolve(&self, registry: &Registry) -> AnyType {
        (self.resolve)(registry)
    }

    pub(crate) fn rust_type(&self) -> std::any::TypeId {
        (self.rust_type)()
    }

    pub fn is_clonable(&self) -> bool {
        self.clone.is_some()
    }

    pub fn is_comparable(&self) -> bool {
        self.eq.is_some()
    }

    pub fn is_hashable(&self) -> bool {
        self.hash.is_some()
    }

    pub fn is_ordered(&self) -> bool {
        self.ord.is_some()
    }

    pub fn is_indexable(&self) -> bool {
        self.index.is_some()
    }

    pub(crate) fn clone_object(&self, object: &AnyObject) -> Option<Storage> {
        (self.clone?)(object)
    }

    pub(crate) fn eq_objects(&self, lhs: &AnyObject, rhs: &AnyObject) -> Option<bool> {
        (self.eq?)(lhs, rhs)
    }

    pub(crate) fn hash_object(&self, object: &AnyObject, state: &mut dyn Hasher) -> bool {
        self.hash.is_some_and(|hash| hash(object, state))
    }

    pub(crate) fn cmp_objects(&self, lhs: &AnyObject, rhs: &AnyObject) -> Option<Ordering> {
        (self.ord?)(lhs, rhs)
    }

    pub(crate) fn index_object(&self, object: &AnyObject, index: usize) -> Option<Uvalue> {
        (self.index?)(object, index)
    }

    pub(crate) fn debug_object(
        &self,
        object: &AnyObject,
        f: &mut fmt::Formatter<'_>,
    ) -> Option<fmt::Result> {
        self.debug.map(|debug| debug(object, f))
    }
}

impl fmt::Debug for ValueOps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueOps")
            .field("type_name", &self.type_name())
            .field("clone", &self.clone.is_some())
            .field("eq", &self.eq.is_some())
            .field("hash", &self.hash.is_some())
            .field("debug", &self.debug.is_some())
            .field("ord", &self.ord.is_some())
            .field("index", &self.index.is_some())
            .finish()
    }
}

fn clone_erased<T: Reflect + Clone>(object: &AnyObject) -> Option<Storage> {
    object
        .downcast_ref::<T>()
        .map(|value| value.clone().into_storage())
}

fn eq_erased<T: PartialEq + 'static>(lhs: &AnyObject, rhs: &AnyObject) -> Option<bool> {
    Some(lhs.downcast_ref::<T>()? == rhs.downcast_ref::<T>()?)
}

fn ord_erased<T: PartialOrd + 'static>(lhs: &AnyObject, rhs: &AnyObject) -> Option<Ordering> {
    lhs.downcast_ref::<T>()?.partial_cmp(rhs.downcast_ref::<T>()?)
}

fn index_erased<S, E>(object: &AnyObject, index: usize) -> Option<Uvalue>
where
    S: AsRef<[E]> + 'static,
    E: Reflect + Clone,
{
    let element = object.downcast_ref::<S>()?.as_ref().get(index)?;
    Some(Uvalue::new(element.clone()))
}

fn hash_erased<T: Hash + 'static>(object: &AnyObject, mut state: &mut dyn Hasher) -> bool {
    match object.downcast_ref::<T>() {
        Some(value) => {
            value.hash(&mut state);
            true
        }
        None => false,
    }
}

fn debug_erased<T: fmt::Debug + 'static>(
    object: &AnyObject,
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    match object.downcast_ref::<T>() {
        Some(value) => fmt::Debug::fmt(value, f),
        None => Err(fmt::Error),
    }
}
