use super::*;

use std::sync::Arc;

use pretty_assertions::assert_eq;

use crate::state::{FunctionState, MethodState, ReturnPolicy, VariableState};

struct Named {
    label: String,
}

struct Square {
    named: Named,
    side: f64,
}

struct Plain;

impl AsRef<Named> for Square {
    fn as_ref(&self) -> &Named {
        &self.named
    }
}

impl AsMut<Named> for Square {
    fn as_mut(&mut self) -> &mut Named {
        &mut self.named
    }
}

/// Lets `add_base` be asked to link a class to itself.
impl AsRef<Square> for Square {
    fn as_ref(&self) -> &Square {
        self
    }
}

impl AsMut<Square> for Square {
    fn as_mut(&mut self) -> &mut Square {
        self
    }
}

impl Named {
    fn label(&self) -> String {
        self.label.clone()
    }
}

trait Shape: Polymorphic {
    fn area(&self) -> f64;
}

impl Shape for Square {
    fn area(&self) -> f64 {
        self.side * self.side
    }
}

crate::reflect!(class Named);
crate::reflect!(class Square; polymorphic);
crate::reflect!(class Plain);

fn square(label: &str, side: f64) -> Box<dyn Shape> {
    Box::new(Square {
        named: Named {
            label: label.to_owned(),
        },
        side,
    })
}

// === Resolution ===

#[test]
fn resolve_interns_once() {
    let registry = Registry::new();
    let first = registry.resolve::<Named>();
    let count = registry.type_count();
    let second = registry.resolve::<Named>();
    assert_eq!(first, second);
    assert_eq!(registry.type_count(), count);
    assert_eq!(registry.get_type(first.id()), Some(first.clone()));
    assert_eq!(registry.resolve_of(&Plain), registry.resolve::<Plain>());
}

#[test]
fn structural_types_are_shared() {
    let registry = Registry::new();
    let element = registry.resolve::<u16>();
    assert_eq!(registry.pointer_type(&element, true), registry.pointer_type(&element, true));
    assert_ne!(registry.pointer_type(&element, true), registry.pointer_type(&element, false));
    assert_eq!(registry.void_type(), registry.void_type());
    assert_eq!(
        registry.function_type(element.clone(), vec![element.clone()]),
        registry.function_type(element.clone(), vec![element])
    );
}

#[test]
fn iteration_follows_interning_order() {
    let registry = Registry::new();
    let named = registry.resolve::<Named>();
    let plain = registry.resolve::<Plain>();
    let mut seen = Vec::new();
    registry.for_each_type(|ty| seen.push(ty.clone()));
    assert_eq!(seen, registry.types());
    let named_at = seen.iter().position(|ty| ty == &named);
    let plain_at = seen.iter().position(|ty| ty == &plain);
    assert!(named_at < plain_at);
}

#[test]
fn unknown_id_is_absent() {
    let registry = Registry::new();
    let other = Registry::new();
    let id = other.resolve::<Plain>().id();
    assert_eq!(registry.get_type(id), None);
    registry.resolve::<Plain>();
    assert!(registry.get_type(id).is_some());
}

// === Hierarchy ===

#[test]
fn add_base_rejects_non_classes_and_self() {
    let registry = Registry::new();
    assert_eq!(registry.add_base::<Square, Named>(), Ok(()));
    assert_eq!(registry.add_base::<Square, Square>(), Err(ErrorCode::BadCast));
}

#[test]
fn polymorphic_values_resolve_to_their_class() {
    let registry = Registry::new();
    let shape = square("unit", 2.0);
    assert_eq!(registry.resolve_dyn(&*shape), registry.resolve::<Square>());
    let class = registry.resolve::<Square>().as_class().unwrap();
    assert!(class.flags().contains(crate::flags::ClassFlags::IS_POLYMORPHIC));
    assert!((shape.area() - 4.0).abs() < f64::EPSILON);
}

#[test]
fn ucast_walks_to_registered_bases() {
    let registry = Registry::new();
    let mut shape = square("unit", 1.0);
    assert!(registry.ucast_ref::<Named, _>(&*shape).is_none());

    registry.add_base::<Square, Named>().unwrap();
    let named = registry.ucast_ref::<Named, _>(&*shape).unwrap();
    assert_eq!(named.label(), "unit");
    assert!(registry.ucast_ref::<Square, _>(&*shape).is_some());
    assert!(registry.ucast_ref::<Plain, _>(&*shape).is_none());

    if let Some(named) = registry.ucast_mut::<Named, _>(&mut *shape) {
        named.label = String::from("renamed");
    }
    let label = registry.ucast_ref::<Named, _>(&*shape).map(Named::label);
    assert_eq!(label.as_deref(), Some("renamed"));
}

#[test]
fn bind_lock_is_reentrant() {
    let registry = Registry::new();
    let _outer = registry.bind_lock();
    let _inner = registry.bind_lock();
    assert_eq!(registry.add_base::<Square, Named>(), Ok(()));
}

// === Global scope ===

fn twice(value: i32) -> i32 {
    value * 2
}

fn twice_wide(value: i64) -> i64 {
    value * 2
}

#[test]
fn global_functions_by_name_and_signature() {
    let registry = Registry::new();
    registry.add_function(FunctionState::make(&registry, "twice", twice, ReturnPolicy::AsCopy));
    registry.add_function(FunctionState::make(&registry, "twice", twice_wide, ReturnPolicy::AsCopy));
    assert_eq!(registry.functions().len(), 2);

    let wide = registry
        .get_function_with("twice", &[registry.resolve::<i64>()])
        .unwrap();
    assert_eq!(wide.invoke(&registry, (4_i64,)).cast::<i64>(), Ok(&8));
    assert!(registry.get_function("twice").is_some());
    assert!(registry.get_function("thrice").is_none());
    assert!(registry.get_function_with("twice", &[registry.resolve::<u8>()]).is_none());

    registry.add_function(FunctionState::make(&registry, "twice", twice, ReturnPolicy::Discard));
    assert_eq!(registry.functions().len(), 2);
}

#[test]
fn global_variables() {
    let registry = Registry::new();
    let cell = Arc::new(parking_lot::RwLock::new(3_u32));
    registry.add_variable(VariableState::make(&registry, "count", Arc::clone(&cell)));
    let variable = registry.get_variable("count").unwrap();
    variable.set(&registry, 4_u32);
    assert_eq!(*cell.read(), 4);
    assert_eq!(registry.variables().len(), 1);
    assert!(registry.get_variable("missing").is_none());
}

// === Teardown ===

#[test]
fn drop_releases_class_tables() {
    let class = {
        let registry = Registry::new();
        let class = registry.resolve::<Named>().as_class().unwrap();
        let method =
            MethodState::make(&registry, "label", Named::label, ReturnPolicy::AsCopy).unwrap();
        class.add_method(method).unwrap();
        assert_eq!(class.methods().len(), 1);
        assert!(format!("{registry:?}").starts_with("Registry"));
        class
    };
    assert!(class.methods().is_empty());
    assert_eq!(class.name(), std::any::type_name::<Named>());
}
