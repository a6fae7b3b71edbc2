//! Polymorphic upcast registry.
//!
//! Each class keeps a table of upcast edges keyed by ancestor id. An edge is a
//! pair of erased closures that turn a reference to the class into a reference
//! to the ancestor sub-object, exactly as the native `AsRef`/`AsMut`
//! conversions registered for it do.
//!
//! # Design
//!
//! The table is the transitive closure of the registered direct edges:
//!
//! - linking `D -> B` installs `D -> B` plus `D -> B -> X` for every edge
//!   `B -> X` already known;
//! - every edge newly installed on a class is pushed down to its registered
//!   descendants, so the closure does not depend on registration order;
//! - a direct edge replaces a composed one for the same ancestor, and the
//!   replacement is pushed down as well. Emulated virtual bases are registered
//!   as direct edges on the most derived class;
//! - otherwise the first edge installed for an ancestor wins.

use std::collections::hash_map::Entry;
use std::sync::Arc;

use crate::reflect::Reflect;
use crate::registry::Registry;
use crate::types::{AnyType, ClassType, KindHandle};
use crate::value::AnyObject;

type UpFn = dyn for<'o> Fn(&'o AnyObject) -> Option<&'o AnyObject> + Send + Sync;
type UpMutFn = dyn for<'o> Fn(&'o mut AnyObject) -> Option<&'o mut AnyObject> + Send + Sync;

fn up_fn<F>(f: F) -> Arc<UpFn>
where
    F: for<'o> Fn(&'o AnyObject) -> Option<&'o AnyObject> + Send + Sync + 'static,
{
    Arc::new(f)
}

fn up_mut_fn<F>(f: F) -> Arc<UpMutFn>
where
    F: for<'o> Fn(&'o mut AnyObject) -> Option<&'o mut AnyObject> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Conversion from a class to one of its registered ancestors.
#[derive(Clone)]
pub struct UpcastEdge {
    target: crate::id::TypeId,
    direct: bool,
    up: Arc<UpFn>,
    up_mut: Arc<UpMutFn>,
}

impl UpcastEdge {
    fn direct<D, B>(target: crate::id::TypeId) -> Self
    where
        D: Reflect + AsRef<B> + AsMut<B>,
        B: Reflect,
    {
        UpcastEdge {
            target,
            direct: true,
            up: up_fn(|object| {
                let base: &AnyObject = <D as AsRef<B>>::as_ref(object.downcast_ref::<D>()?);
                Some(base)
            }),
            up_mut: up_mut_fn(|object| {
                let base: &mut AnyObject = <D as AsMut<B>>::as_mut(object.downcast_mut::<D>()?);
                Some(base)
            }),
        }
    }

    /// `self` followed by `next`.
    fn then(&self, next: &UpcastEdge) -> Self {
        let (first, second) = (Arc::clone(&self.up), Arc::clone(&next.up));
        let (first_mut, second_mut) = (Arc::clone(&self.up_mut), Arc::clone(&next.up_mut));
        UpcastEdge {
            target: next.target,
            direct: false,
            up: up_fn(move |object| second(first(object)?)),
            up_mut: up_mut_fn(move |object| second_mut(first_mut(object)?)),
        }
    }

    pub fn target(&self) -> crate::id::TypeId {
        self.target
    }

    pub fn is_direct(&self) -> bool {
        self.direct
    }

    pub fn apply<'o>(&self, object: &'o AnyObject) -> Option<&'o AnyObject> {
        (self.up)(object)
    }

    pub fn apply_mut<'o>(&self, object: &'o mut AnyObject) -> Option<&'o mut AnyObject> {
        (self.up_mut)(object)
    }
}

/// Record `base` as a direct base of `derived` and update the closure.
pub(crate) fn link<D, B>(derived: &ClassType, base: &ClassType)
where
    D: Reflect + AsRef<B> + AsMut<B>,
    B: Reflect,
{
    {
        let mut tables = derived.tables_mut();
        if !tables.bases.contains(base) {
            tables.bases.push(base.clone());
        }
    }
    {
        let mut tables = base.tables_mut();
        if !tables.derived.contains(derived) {
            tables.derived.push(derived.clone());
        }
    }

    let edge = UpcastEdge::direct::<D, B>(base.id());
    let inherited: Vec<UpcastEdge> = base.tables().upcasts.values().cloned().collect();
    let mut edges = Vec::with_capacity(inherited.len() + 1);
    edges.push((edge.clone(), false));
    edges.extend(inherited.iter().map(|next| (edge.then(next), false)));
    install(derived, edges);
}

/// Install `edges` on `class` and push accepted ones down to descendants.
///
/// The flag on each edge marks a pushed-down replacement, which may replace a
/// composed edge already present.
fn install(class: &ClassType, edges: Vec<(UpcastEdge, bool)>) {
    let mut accepted = Vec::new();
    {
        let mut tables = class.tables_mut();
        for (edge, replacing) in edges {
            match tables.upcasts.entry(edge.target) {
                Entry::Vacant(slot) => {
                    slot.insert(edge.clone());
                    accepted.push((edge, replacing));
                }
                Entry::Occupied(mut slot) => {
                    let existing = slot.get();
                    if edge.direct || (replacing && !existing.direct) {
                        slot.insert(edge.clone());
                        accepted.push((edge, true));
                    }
                }
            }
        }
    }
    if accepted.is_empty() {
        return;
    }
    tracing::debug!(class = class.name(), edges = accepted.len(), "installed upcast edges");

    let descendants = class.tables().derived.clone();
    for descendant in descendants {
        let Some(to_class) = descendant.upcast_edge(class.id()) else {
            continue;
        };
        let composed = accepted
            .iter()
            .map(|(edge, replacing)| (to_class.then(edge), *replacing))
            .collect();
        install(&descendant, composed);
    }
}

/// Downcast `object` (of runtime type `from`) to `T`, upcasting through a
/// registered edge when `from` is a descendant class of `T`.
pub(crate) fn upcast_ref<'o, T: Reflect>(
    registry: &Registry,
    from: &AnyType,
    object: &'o AnyObject,
) -> Option<&'o T> {
    if let Some(exact) = object.downcast_ref::<T>() {
        return Some(exact);
    }
    let edge = from.as_class()?.upcast_edge(registry.resolve::<T>().id())?;
    edge.apply(object)?.downcast_ref::<T>()
}

pub(crate) fn upcast_mut<'o, T: Reflect>(
    registry: &Registry,
    from: &AnyType,
    object: &'o mut AnyObject,
) -> Option<&'o mut T> {
    if object.is::<T>() {
        return object.downcast_mut::<T>();
    }
    let edge = from.as_class()?.upcast_edge(registry.resolve::<T>().id())?;
    edge.apply_mut(object)?.downcast_mut::<T>()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests can panic")]
mod tests;
