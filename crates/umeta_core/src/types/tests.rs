use super::*;

use pretty_assertions::assert_eq;

use crate::flags::{ArrayFlags, ClassFlags, MethodFlags, NumberFlags, ReferenceFlags};
use crate::registry::Registry;

#[derive(Clone, PartialEq, Hash)]
struct Point {
    x: i32,
    y: i32,
}

crate::reflect!(class Point: Clone, PartialEq, Hash);

struct Empty;

crate::reflect!(class Empty);

#[derive(Copy, Clone, Debug, PartialEq)]
enum Shade {
    Light = 1,
    Dark = 2,
}

crate::reflect!(enum Shade as u8: Clone, PartialEq, Debug);

// === Resolution ===

#[test]
fn resolve_is_idempotent() {
    let registry = Registry::new();
    let first = registry.resolve::<Point>();
    let count = registry.type_count();
    let second = registry.resolve::<Point>();
    assert_eq!(first, second);
    assert_eq!(registry.type_count(), count);
}

#[test]
fn ids_agree_across_registries() {
    let lhs = Registry::new();
    let rhs = Registry::new();
    assert_eq!(lhs.resolve::<Point>().id(), rhs.resolve::<Point>().id());
    assert_eq!(lhs.resolve::<u16>().id(), rhs.resolve::<u16>().id());
}

#[test]
fn kinds_of_builtins() {
    let registry = Registry::new();
    assert_eq!(registry.resolve::<i32>().kind(), TypeKind::Number);
    assert_eq!(registry.resolve::<bool>().kind(), TypeKind::Number);
    assert_eq!(registry.resolve::<String>().kind(), TypeKind::Class);
    assert_eq!(registry.resolve::<[u8; 4]>().kind(), TypeKind::Array);
    assert_eq!(registry.resolve::<Shade>().kind(), TypeKind::Enum);
    assert!(registry.void_type().as_any().is_void());
    assert!(registry.nullptr_type().as_any().is_nullptr());
}

#[test]
fn as_kind_checks_the_kind() {
    let registry = Registry::new();
    let point = registry.resolve::<Point>();
    assert!(point.as_class().is_some());
    assert!(point.as_enum().is_none());
    assert!(point.as_kind::<NumberType>().is_none());
    assert!(registry.resolve::<f32>().as_kind::<NumberType>().is_some());
}

// === Numbers ===

#[test]
fn number_flags() {
    let registry = Registry::new();
    let number = |ty: AnyType| ty.as_kind::<NumberType>().map(|number| number.flags());
    assert_eq!(number(registry.resolve::<i64>()), Some(NumberFlags::integral(true)));
    assert_eq!(number(registry.resolve::<u8>()), Some(NumberFlags::integral(false)));
    assert_eq!(number(registry.resolve::<f64>()), Some(NumberFlags::floating()));
    let boolean = number(registry.resolve::<bool>()).unwrap_or_default();
    assert!(boolean.contains(NumberFlags::IS_BOOLEAN | NumberFlags::IS_INTEGRAL));
    let character = number(registry.resolve::<char>()).unwrap_or_default();
    assert!(character.contains(NumberFlags::IS_CHARACTER));
}

#[test]
fn number_layout() {
    let registry = Registry::new();
    let number = registry.resolve::<u32>().as_kind::<NumberType>().unwrap();
    assert_eq!(number.name(), "u32");
    assert_eq!(number.size(), 4);
    assert_eq!(number.align(), std::mem::align_of::<u32>());
}

// === Classes ===

#[test]
fn class_flags_follow_capabilities() {
    let registry = Registry::new();
    let point = registry.resolve::<Point>().as_class().unwrap();
    assert!(point.flags().contains(
        ClassFlags::IS_COPYABLE | ClassFlags::IS_EQUALITY_COMPARABLE | ClassFlags::IS_HASHABLE
    ));
    assert!(!point.flags().contains(ClassFlags::IS_POLYMORPHIC));
    assert_eq!(point.size(), std::mem::size_of::<Point>());
    assert!(crate::value::Uvalue::new(Point { x: 1, y: 2 }).try_hash().is_some());

    let empty = registry.resolve::<Empty>().as_class().unwrap();
    assert!(empty.flags().contains(ClassFlags::IS_EMPTY));
    assert!(!empty.flags().contains(ClassFlags::IS_COPYABLE));
    assert!(!registry.resolve::<Empty>().is_copyable());
    assert!(crate::value::Uvalue::new(Empty).try_clone().is_err());
}

#[test]
fn generic_classes_record_arguments() {
    let registry = Registry::new();
    let list = registry.resolve::<Vec<i32>>().as_class().unwrap();
    assert!(list.flags().contains(ClassFlags::IS_TEMPLATE_INSTANTIATION));
    assert_eq!(list.template_argument_types(), &[registry.resolve::<i32>()]);
    assert_ne!(registry.resolve::<Vec<i32>>(), registry.resolve::<Vec<u32>>());
}

#[test]
fn typedefs_are_looked_up_by_name() {
    let registry = Registry::new();
    let point = registry.resolve::<Point>().as_class().unwrap();
    point.add_typedef("coordinate", registry.resolve::<i32>());
    assert_eq!(point.get_typedef("coordinate"), Some(registry.resolve::<i32>()));
    assert_eq!(point.get_typedef("missing"), None);
}

// === Enums ===

#[test]
fn enum_descriptor() {
    let registry = Registry::new();
    let shade = registry.resolve::<Shade>().as_enum().unwrap();
    assert_eq!(shade.underlying_type(), &registry.resolve::<u8>());
    let underlying = shade.underlying_of(&Shade::Dark);
    assert_eq!(underlying, Some(crate::value::Uvalue::new(2_u8)));
    assert_eq!(shade.underlying_of(&7_i32), None);
    assert_eq!(Shade::Light as u8, 1);
}

// === Structural types ===

#[test]
fn pointer_types_are_interned() {
    let registry = Registry::new();
    let int = registry.resolve::<i32>();
    let readonly = registry.pointer_type(&int, true);
    assert_eq!(readonly, registry.pointer_type(&int, true));
    assert_ne!(readonly, registry.pointer_type(&int, false));
    assert!(readonly.is_readonly());
    assert_eq!(readonly.pointee_type(), &int);
    assert_eq!(readonly.to_string(), "*const i32");
}

#[test]
fn reference_types() {
    let registry = Registry::new();
    let int = registry.resolve::<i32>();
    let shared =
        registry.reference_type(&int, ReferenceFlags::IS_LVALUE | ReferenceFlags::IS_READONLY);
    assert!(shared.is_lvalue());
    assert!(shared.is_readonly());
    assert_eq!(shared.to_string(), "&i32");
    let moved = registry.reference_type(&int, ReferenceFlags::IS_RVALUE);
    assert!(moved.is_rvalue());
    assert_eq!(moved.to_string(), "&&i32");
}

#[test]
fn array_types() {
    let registry = Registry::new();
    let bytes = registry.resolve::<[u8; 4]>().as_array().unwrap();
    assert_eq!(bytes.extent(), Some(4));
    assert!(bytes.flags().contains(ArrayFlags::IS_BOUNDED));
    assert_eq!(bytes.element_type(), registry.resolve::<u8>());
    assert_eq!(bytes.to_string(), "[u8; 4]");

    let slice = registry.array_type(&registry.resolve::<u8>(), None);
    assert!(!slice.is_bounded());
    assert_eq!(slice.extent(), None);
    assert_eq!(slice.to_string(), "[u8]");
}

#[test]
fn structural_array_is_upgraded_on_resolve() {
    let registry = Registry::new();
    let element = registry.resolve::<u16>();
    let structural = registry.array_type(&element, Some(2));
    let array = [1_u16, 2];
    assert_eq!(structural.slice::<u16>(&array), None);

    let resolved = registry.resolve::<[u16; 2]>().as_array().unwrap();
    assert_eq!(resolved, structural);
    assert_eq!(resolved.slice::<u16>(&array), Some(&[1_u16, 2][..]));
    assert_eq!(resolved.first(&array).and_then(|first| first.downcast_ref::<u16>()), Some(&1));
}

#[test]
fn signature_types() {
    let registry = Registry::new();
    let int = registry.resolve::<i32>();
    let function = registry.function_type(int.clone(), vec![int.clone(), int.clone()]);
    assert_eq!(function.arity(), 2);
    assert_eq!(function.argument_type(1), Some(&int));
    assert_eq!(function.argument_type(2), None);
    assert_eq!(function.to_string(), "fn(i32, i32) -> i32");
    assert_eq!(function, registry.function_type(int.clone(), vec![int.clone(), int.clone()]));

    let point = registry.resolve::<Point>().as_class().unwrap();
    let method = registry.method_type(&point, MethodFlags::IS_CONST, int.clone(), vec![]);
    assert!(method.is_const());
    assert_eq!(method.owner_type(), &point);
    assert_ne!(
        method,
        registry.method_type(&point, MethodFlags::IS_MUT, int.clone(), vec![])
    );
}

#[test]
fn constructor_flags() {
    use crate::flags::ConstructorFlags;

    let registry = Registry::new();
    let point = registry.resolve::<Point>().as_class().unwrap();
    let default = registry.constructor_type(&point, vec![]);
    assert!(default.flags().contains(ConstructorFlags::IS_DEFAULT));
    let copy = registry.constructor_type(&point, vec![point.as_any().clone()]);
    assert!(copy.flags().contains(ConstructorFlags::IS_COPY));
    let two = registry.constructor_type(&point, vec![registry.resolve::<i32>(); 2]);
    assert!(two.flags().is_empty());
}

#[test]
fn display_and_debug() {
    let registry = Registry::new();
    let int = registry.resolve::<i32>();
    assert_eq!(int.to_string(), "i32");
    assert_eq!(format!("{int:?}"), format!("{}(i32)", TypeKind::Number));
    assert_eq!(registry.void_type().to_string(), "()");
    assert_eq!(registry.nullptr_type().to_string(), "nullptr");
}

#[test]
fn release_clears_class_tables() {
    let registry = Registry::new();
    let point = registry.resolve::<Point>();
    let class = point.as_class().unwrap();
    class.add_typedef("self", point.clone());
    point.release();
    assert!(class.typedefs().is_empty());
}
