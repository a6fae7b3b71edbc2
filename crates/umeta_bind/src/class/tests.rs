use super::*;

use pretty_assertions::assert_eq;
use umeta_core::{KindHandle, Uvalue};

#[derive(Clone, Debug, Default, PartialEq)]
struct Shape {
    name: String,
}

impl Shape {
    fn origin() -> Shape {
        Shape {
            name: String::from("origin"),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
struct Circle {
    shape: Shape,
    radius: f64,
}

impl Circle {
    fn new(radius: f64) -> Self {
        Circle {
            shape: Shape {
                name: String::from("circle"),
            },
            radius,
        }
    }

    fn unit() -> Circle {
        Circle::new(1.0)
    }

    fn diameter(&self) -> f64 {
        self.radius * 2.0
    }

    fn scale(&mut self, factor: f64) {
        self.radius *= factor;
    }
}

impl AsRef<Shape> for Circle {
    fn as_ref(&self) -> &Shape {
        &self.shape
    }
}

impl AsMut<Shape> for Circle {
    fn as_mut(&mut self) -> &mut Shape {
        &mut self.shape
    }
}

impl AsRef<Shape> for Shape {
    fn as_ref(&self) -> &Shape {
        self
    }
}

impl AsMut<Shape> for Shape {
    fn as_mut(&mut self) -> &mut Shape {
        self
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Hash)]
enum Tint {
    Red = 1,
}

umeta_core::reflect!(class Shape: Clone, PartialEq, Debug);
umeta_core::reflect!(class Circle: Clone, PartialEq, Debug);
umeta_core::reflect!(enum Tint as u8: Clone, PartialEq, Hash, Debug);

fn bind_circle(registry: &Registry, count: Arc<RwLock<u32>>) -> ClassType {
    class::<Circle>(registry)
        .base::<Shape>()
        .constructor_named(Circle::new, &["radius"])
        .default_constructor()
        .copy_constructor()
        .destructor()
        .function("unit", Circle::unit)
        .method("diameter", Circle::diameter)
        .method_with("scale", Circle::scale, ReturnPolicy::Discard, &["factor"])
        .member("radius", |circle| &circle.radius, |circle| &mut circle.radius)
        .member_readonly("shape", |circle| &circle.shape)
        .variable("count", count)
        .variable_readonly("limit", Arc::new(RwLock::new(8_u32)))
        .typedef::<f64>("Radius")
        .finish()
        .unwrap()
}

#[test]
fn every_step_registers_on_the_class() {
    let registry = Registry::new();
    let circle = bind_circle(&registry, Arc::new(RwLock::new(0)));

    assert_eq!(circle.constructors().len(), 3);
    assert_eq!(circle.destructors().len(), 1);
    assert_eq!(circle.functions().len(), 1);
    assert_eq!(circle.methods().len(), 2);
    assert_eq!(circle.members().len(), 2);
    assert_eq!(circle.variables().len(), 2);
    assert_eq!(circle.get_typedef("Radius"), Some(registry.resolve::<f64>()));

    let shape = registry.resolve::<Shape>().as_class().unwrap();
    assert!(shape.is_base_of(&circle));
    assert_eq!(circle.bases(), vec![shape]);
}

#[test]
fn bound_entities_are_invocable() {
    let registry = Registry::new();
    let count = Arc::new(RwLock::new(3_u32));
    let circle = bind_circle(&registry, Arc::clone(&count));

    let created = circle.create(&registry, (2.5_f64,));
    assert_eq!(created.cast::<Circle>().map(|value| value.radius), Ok(2.5));
    let empty = circle.create(&registry, ());
    assert_eq!(empty.cast::<Circle>(), Ok(&Circle::default()));

    let mut value = Circle::new(2.0);
    let scale = circle.get_method("scale").unwrap();
    assert_eq!(scale.arguments()[0].name(), "factor");
    assert!(scale.invoke(&registry, &mut value, (3.0_f64,)).is_empty());
    assert_eq!(value.radius, 6.0);

    let diameter = circle.get_method("diameter").unwrap();
    assert_eq!(diameter.invoke(&registry, &value, ()).cast::<f64>(), Ok(&12.0));

    let unit = circle.get_function("unit").unwrap();
    assert_eq!(unit.invoke(&registry, ()).cast::<Circle>(), Ok(&Circle::new(1.0)));

    let radius = circle.get_member("radius").unwrap();
    radius.set(&registry, &mut value, 0.5_f64);
    assert_eq!(value.radius, 0.5);
    let shape = circle.get_member("shape").unwrap();
    assert_eq!(
        shape.try_set(&registry, &mut value, Shape::origin()),
        Err(ErrorCode::BadConstAccess)
    );

    circle.get_variable("count").unwrap().set(&registry, 9_u32);
    assert_eq!(*count.read(), 9);
    let limit = circle.get_variable("limit").unwrap();
    assert!(limit.is_readonly());
    assert_eq!(limit.get().cast::<u32>(), Ok(&8));
}

#[test]
fn custom_destructor_receives_the_value() {
    let registry = Registry::new();
    let destroyed = Arc::new(parking_lot::Mutex::new(Vec::new()));
    let sink = Arc::clone(&destroyed);
    let circle = class::<Circle>(&registry)
        .destructor_with(move |circle: Circle| sink.lock().push(circle.radius))
        .finish()
        .unwrap();

    let destructor = circle.get_destructor().unwrap();
    destructor.destroy(Uvalue::new(Circle::new(4.0)));
    assert_eq!(*destroyed.lock(), vec![4.0]);
}

#[test]
fn first_failure_poisons_the_builder() {
    let registry = Registry::new();
    let result = class::<Shape>(&registry)
        .base::<Shape>()
        .function("origin", Shape::origin)
        .finish();
    assert_eq!(result.err(), Some(ErrorCode::BadCast));

    let shape = registry.resolve::<Shape>().as_class().unwrap();
    assert!(shape.get_function("origin").is_none());
}

#[test]
fn enums_cannot_be_bound_as_classes() {
    let registry = Registry::new();
    let result = class::<Tint>(&registry)
        .function("red", || Tint::Red)
        .finish();
    assert_eq!(result.err(), Some(ErrorCode::BadCast));
    assert!(registry.resolve::<Tint>().as_enum().is_some());
}

#[test]
fn builders_nest_on_one_thread() {
    let registry = Registry::new();
    let outer = class::<Circle>(&registry);
    let shape = class::<Shape>(&registry)
        .function("origin", Shape::origin)
        .finish()
        .unwrap();
    let circle = outer.base::<Shape>().finish().unwrap();

    let origin = circle.get_function("origin").unwrap();
    assert_eq!(origin.get_type().return_type(), shape.as_any());
    assert_eq!(
        origin.invoke(&registry, ()).cast::<Shape>().map(|value| value.name.as_str()),
        Ok("origin")
    );
}
