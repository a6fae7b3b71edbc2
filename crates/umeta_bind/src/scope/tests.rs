use super::*;

use pretty_assertions::assert_eq;
use umeta_core::ErrorCode;

fn clamp(value: i32, low: i32, high: i32) -> i32 {
    value.clamp(low, high)
}

fn clamp_unit(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

#[test]
fn functions_land_in_the_global_scope() {
    let registry = Registry::new();
    let bound = function_with(
        &registry,
        "clamp",
        clamp,
        ReturnPolicy::AsCopy,
        &["value", "low", "high"],
    );
    let found = registry.get_function("clamp").unwrap();
    assert!(Arc::ptr_eq(&bound, &found));
    let names: Vec<&str> = found.arguments().iter().map(|info| info.name()).collect();
    assert_eq!(names, vec!["value", "low", "high"]);
    assert_eq!(found.invoke(&registry, (12_i32, 0_i32, 10_i32)).cast::<i32>(), Ok(&10));
}

#[test]
fn overloads_share_a_name() {
    let registry = Registry::new();
    function(&registry, "clamp", clamp);
    function(&registry, "clamp", clamp_unit);
    assert_eq!(registry.functions().len(), 2);

    let unit = registry
        .get_function_with("clamp", &[registry.resolve::<f64>()])
        .unwrap();
    assert_eq!(unit.invoke(&registry, (1.5_f64,)).cast::<f64>(), Ok(&1.0));

    // Same name and signature replaces.
    function(&registry, "clamp", |value: f64| value);
    assert_eq!(registry.functions().len(), 2);
    let unit = registry
        .get_function_with("clamp", &[registry.resolve::<f64>()])
        .unwrap();
    assert_eq!(unit.invoke(&registry, (1.5_f64,)).cast::<f64>(), Ok(&1.5));
}

#[test]
fn variables_share_their_cell() {
    let registry = Registry::new();
    let level = Arc::new(RwLock::new(String::from("info")));
    variable(&registry, "level", Arc::clone(&level));
    variable_readonly(&registry, "version", Arc::new(RwLock::new(3_u16)));

    registry.get_variable("level").unwrap().set(&registry, "debug");
    assert_eq!(level.read().as_str(), "debug");

    let version = registry.get_variable("version").unwrap();
    assert_eq!(version.get().cast::<u16>(), Ok(&3));
    assert_eq!(version.try_set(&registry, 4_u16), Err(ErrorCode::BadConstAccess));
    assert_eq!(registry.variables().len(), 2);
}
