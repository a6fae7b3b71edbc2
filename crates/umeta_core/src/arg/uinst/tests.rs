use super::*;

use crate::arg::ParamShape;

#[derive(Clone, Debug, PartialEq)]
struct Counter {
    hits: u32,
}

crate::reflect!(class Counter: Clone, PartialEq, Debug);

fn receiver(registry: &Registry, shape: ParamShape) -> Formal {
    Formal::new(registry, shape, registry.resolve::<Counter>())
}

#[test]
fn const_receiver_accepts_every_category() {
    let registry = Registry::new();
    let formal = receiver(&registry, ParamShape::ConstLvalueRef);
    let mut counter = Counter { hits: 0 };
    assert!(Uinst::lvalue(&registry, &mut counter).can_cast_to(&formal));
    assert!(Uinst::const_lvalue(&registry, &counter).can_cast_to(&formal));
    assert!(Uinst::rvalue(&registry, counter.clone()).can_cast_to(&formal));
    assert!(Uinst::const_rvalue(&registry, counter).can_cast_to(&formal));
}

#[test]
fn mutable_receiver_needs_lvalue() {
    let registry = Registry::new();
    let formal = receiver(&registry, ParamShape::LvalueRef);
    let mut counter = Counter { hits: 0 };
    assert!(!Uinst::const_lvalue(&registry, &counter).can_cast_to(&formal));
    assert!(!Uinst::rvalue(&registry, counter.clone()).can_cast_to(&formal));
    let mut inst = Uinst::lvalue(&registry, &mut counter);
    inst.cast_mut::<Counter>(&formal, &registry).unwrap().hits += 1;
    drop(inst);
    assert_eq!(counter.hits, 1);
}

#[test]
fn mut_self_receiver_binds_temporaries() {
    let registry = Registry::new();
    let formal = receiver(&registry, ParamShape::MutSelf);
    let counter = Counter { hits: 4 };
    assert!(!Uinst::const_lvalue(&registry, &counter).can_cast_to(&formal));
    assert!(!Uinst::const_rvalue(&registry, counter.clone()).can_cast_to(&formal));
    let mut inst = Uinst::rvalue(&registry, counter);
    inst.cast_mut::<Counter>(&formal, &registry).unwrap().hits += 1;
    assert_eq!(inst.cast_ref::<Counter>(&formal, &registry).map(|c| c.hits), Ok(5));
    let mut owned = Uinst::from_owned(&registry, Uvalue::new(Counter { hits: 0 }));
    assert!(owned.cast_mut::<Counter>(&formal, &registry).is_ok());
}

#[test]
fn null_pointer_receiver_never_binds() {
    let registry = Registry::new();
    let formal = receiver(&registry, ParamShape::ConstLvalueRef);
    let mut inst = Uinst::from_pointer::<Counter>(&registry, None);
    assert_eq!(inst.raw_type(), Some(&registry.resolve::<Counter>()));
    assert!(!inst.can_cast_to(&formal));
    assert_eq!(inst.cast_ref::<Counter>(&formal, &registry).err(), Some(ErrorCode::BadInstanceCast));
}

#[test]
fn pointer_receiver_is_dereferenced() {
    let registry = Registry::new();
    let formal = receiver(&registry, ParamShape::ConstLvalueRef);
    let counter = Counter { hits: 3 };
    let mut inst = Uinst::from_pointer(&registry, Some(&counter));
    assert_eq!(inst.category(), RefCategory::ConstLvalue);
    assert_eq!(inst.cast_ref::<Counter>(&formal, &registry).map(|c| c.hits), Ok(3));
}

#[test]
fn by_value_receiver_moves_rvalue() {
    let registry = Registry::new();
    let formal = receiver(&registry, ParamShape::Value);
    let mut inst = Uinst::rvalue(&registry, Counter { hits: 5 });
    assert_eq!(inst.cast_value::<Counter>(&formal, &registry), Ok(Counter { hits: 5 }));
}

#[test]
fn uvalue_receivers() {
    let registry = Registry::new();
    let formal = receiver(&registry, ParamShape::LvalueRef);
    let mut stored = Uvalue::new(Counter { hits: 0 });
    {
        let mut inst = Uinst::from_uvalue_mut(&registry, &mut stored);
        inst.cast_mut::<Counter>(&formal, &registry).unwrap().hits = 9;
    }
    assert_eq!(stored.cast::<Counter>().map(|c| c.hits), Ok(9));

    let empty = Uvalue::empty();
    assert!(!Uinst::from_uvalue(&registry, &empty).can_cast_to(&formal));
}

#[test]
fn base_mirrors_instance() {
    let registry = Registry::new();
    let formal = receiver(&registry, ParamShape::ConstLvalueRef);
    let counter = Counter { hits: 0 };
    let inst = Uinst::const_lvalue(&registry, &counter);
    assert_eq!(inst.base().category(), RefCategory::ConstLvalue);
    assert!(inst.base().can_cast_to(&formal));
    let scalar = UinstBase::new(RefCategory::ConstLvalue, registry.resolve::<i32>());
    assert!(!scalar.can_cast_to(&formal));
}
