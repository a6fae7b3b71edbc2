use super::*;

use crate::types::AnyType;

struct Root {
    tag: u32,
}

struct Left {
    root: Root,
}

struct Right {
    root: Root,
}

/// Diamond with its own copy of `Root`, standing in for a virtual base.
struct Joined {
    left: Left,
    right: Right,
    shared: Root,
}

struct Outer {
    joined: Joined,
}

crate::reflect!(class Root);
crate::reflect!(class Left);
crate::reflect!(class Right);
crate::reflect!(class Joined);
crate::reflect!(class Outer);

macro_rules! as_base {
    ($derived:ty => $base:ty, $field:ident) => {
        impl AsRef<$base> for $derived {
            fn as_ref(&self) -> &$base {
                &self.$field
            }
        }

        impl AsMut<$base> for $derived {
            fn as_mut(&mut self) -> &mut $base {
                &mut self.$field
            }
        }
    };
}

as_base!(Left => Root, root);
as_base!(Right => Root, root);
as_base!(Joined => Left, left);
as_base!(Joined => Right, right);
as_base!(Joined => Root, shared);
as_base!(Outer => Joined, joined);

fn joined() -> Joined {
    Joined {
        left: Left { root: Root { tag: 1 } },
        right: Right { root: Root { tag: 2 } },
        shared: Root { tag: 3 },
    }
}

fn root_tag(registry: &Registry, from: &AnyType, object: &AnyObject) -> Option<u32> {
    upcast_ref::<Root>(registry, from, object).map(|root| root.tag)
}

#[test]
fn exact_type_needs_no_edge() {
    let registry = Registry::new();
    let root = Root { tag: 9 };
    assert_eq!(root_tag(&registry, &registry.resolve::<Root>(), &root), Some(9));
}

#[test]
fn unrelated_classes_do_not_cast() {
    let registry = Registry::new();
    let left = Left { root: Root { tag: 0 } };
    assert_eq!(root_tag(&registry, &registry.resolve::<Left>(), &left), None);
}

#[test]
fn transitive_edges_compose() {
    let registry = Registry::new();
    registry.add_base::<Left, Root>().unwrap();
    registry.add_base::<Joined, Left>().unwrap();
    let value = joined();
    assert_eq!(root_tag(&registry, &registry.resolve::<Joined>(), &value), Some(1));
}

#[test]
fn closure_is_independent_of_registration_order() {
    let forward = Registry::new();
    forward.add_base::<Left, Root>().unwrap();
    forward.add_base::<Right, Root>().unwrap();
    forward.add_base::<Joined, Left>().unwrap();
    forward.add_base::<Joined, Right>().unwrap();

    let backward = Registry::new();
    backward.add_base::<Joined, Left>().unwrap();
    backward.add_base::<Joined, Right>().unwrap();
    backward.add_base::<Left, Root>().unwrap();
    backward.add_base::<Right, Root>().unwrap();

    let value = joined();
    for registry in [&forward, &backward] {
        let from = registry.resolve::<Joined>();
        assert_eq!(root_tag(registry, &from, &value), Some(1));
        let class = from.as_class().unwrap();
        let mut ancestors = class.ancestor_ids();
        ancestors.sort();
        let mut expected = vec![
            registry.resolve::<Left>().id(),
            registry.resolve::<Right>().id(),
            registry.resolve::<Root>().id(),
        ];
        expected.sort();
        assert_eq!(ancestors, expected);
    }
}

#[test]
fn direct_edge_overrides_composed_one_in_either_order() {
    let before = Registry::new();
    before.add_base::<Joined, Root>().unwrap();
    before.add_base::<Left, Root>().unwrap();
    before.add_base::<Joined, Left>().unwrap();

    let after = Registry::new();
    after.add_base::<Left, Root>().unwrap();
    after.add_base::<Joined, Left>().unwrap();
    after.add_base::<Joined, Root>().unwrap();

    let value = joined();
    for registry in [&before, &after] {
        let from = registry.resolve::<Joined>();
        assert_eq!(root_tag(registry, &from, &value), Some(3));
        let edge = from.as_class().unwrap().upcast_edge(registry.resolve::<Root>().id()).unwrap();
        assert!(edge.is_direct());
    }
}

#[test]
fn override_reaches_descendants() {
    let registry = Registry::new();
    registry.add_base::<Left, Root>().unwrap();
    registry.add_base::<Joined, Left>().unwrap();
    registry.add_base::<Outer, Joined>().unwrap();

    let outer = Outer { joined: joined() };
    let from = registry.resolve::<Outer>();
    assert_eq!(root_tag(&registry, &from, &outer), Some(1));

    registry.add_base::<Joined, Root>().unwrap();
    assert_eq!(root_tag(&registry, &from, &outer), Some(3));
    assert_eq!(outer.joined.right.root.tag, 2);
}

#[test]
fn mutable_upcast_reaches_the_same_subobject() {
    let registry = Registry::new();
    registry.add_base::<Left, Root>().unwrap();
    registry.add_base::<Joined, Left>().unwrap();
    let mut value = joined();
    let from = registry.resolve::<Joined>();
    if let Some(root) = upcast_mut::<Root>(&registry, &from, &mut value) {
        root.tag = 10;
    }
    assert_eq!(value.left.root.tag, 10);
}

#[test]
fn relinking_keeps_single_base_entry() {
    let registry = Registry::new();
    registry.add_base::<Left, Root>().unwrap();
    registry.add_base::<Left, Root>().unwrap();
    let left = registry.resolve::<Left>().as_class().unwrap();
    assert_eq!(left.bases().len(), 1);
    let root = registry.resolve::<Root>().as_class().unwrap();
    assert!(root.is_direct_base_of(&left));
    assert!(root.is_base_of(&left));
    assert!(left.is_derived_from(&root));
}
