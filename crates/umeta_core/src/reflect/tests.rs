use super::*;

use pretty_assertions::assert_eq;

use crate::arg::{IntoUarg, IntoUinst, Param, ParamShape, Receiver, RefCategory};
use crate::flags::{ClassFlags, MethodFlags};
use crate::state::{MethodState, ReturnPolicy};
use crate::types::KindHandle;
use crate::value::Uvalue;

#[derive(Clone, PartialEq, Debug)]
struct Widget {
    size: u32,
}

crate::reflect!(class Widget: Clone, PartialEq, Debug);

struct Gadget {
    charge: u8,
}

crate::reflect!(class Gadget; polymorphic);

#[derive(Copy, Clone, PartialEq, Hash, Debug)]
enum Mode {
    Off = 0,
    On = 7,
}

crate::reflect!(enum Mode as i16: Clone, PartialEq, Hash, Debug);

#[test]
fn numbers_are_stored_inline() {
    assert!(Uvalue::new(5_u8).is_inline());
    assert!(Uvalue::new('x').is_inline());
    assert!(Uvalue::new(1.5_f64).is_inline());
    assert!(!Uvalue::new(String::from("boxed")).is_inline());
    assert_eq!(Uvalue::new(9_u64).into_inner::<u64>().ok(), Some(9));
}

#[test]
fn floats_have_no_hash_entry() {
    assert!(Uvalue::new(1_i32).try_hash().is_some());
    assert!(Uvalue::new(1.0_f32).try_hash().is_none());
    assert!(!<f64 as Reflect>::OPS.is_hashable());
    assert!(<f64 as Reflect>::OPS.is_comparable());
}

#[test]
fn capability_list_fills_class_flags() {
    let registry = Registry::new();
    let widget = registry.resolve::<Widget>().as_class().unwrap();
    assert!(widget.flags().contains(ClassFlags::IS_COPYABLE | ClassFlags::IS_EQUALITY_COMPARABLE));
    assert!(!widget.flags().contains(ClassFlags::IS_HASHABLE));
    assert!(!widget.flags().contains(ClassFlags::IS_POLYMORPHIC));
    let gadget = registry.resolve::<Gadget>().as_class().unwrap();
    assert!(!gadget.flags().contains(ClassFlags::IS_COPYABLE));
    assert!(gadget.flags().contains(ClassFlags::IS_POLYMORPHIC));
}

#[test]
fn enum_declaration_maps_to_underlying() {
    let registry = Registry::new();
    let mode = registry.resolve::<Mode>().as_enum().unwrap();
    assert_eq!(mode.underlying_type(), &registry.resolve::<i16>());
    let on = Uvalue::new(Mode::On);
    assert_eq!(on.data().and_then(|object| mode.underlying_of(object)), Some(Uvalue::new(7_i16)));
    assert_ne!(on, Uvalue::new(Mode::Off));
    assert!(on.try_hash().is_some());
}

#[test]
fn parameter_shapes_follow_reference_kind() {
    let registry = Registry::new();
    let cases = [
        (<Widget as Param>::formal(&registry).shape(), ParamShape::Value),
        (<&Widget as Param>::formal(&registry).shape(), ParamShape::ConstLvalueRef),
        (<&mut Widget as Param>::formal(&registry).shape(), ParamShape::LvalueRef),
        (
            <Option<&Widget> as Param>::formal(&registry).shape(),
            ParamShape::Pointer { readonly: true },
        ),
        (
            <Option<&mut Widget> as Param>::formal(&registry).shape(),
            ParamShape::Pointer { readonly: false },
        ),
    ];
    for (actual, expected) in cases {
        assert_eq!(actual, expected);
    }
}

#[test]
fn type_only_arguments_match_live_arguments() {
    let registry = Registry::new();
    let mut widget = Widget { size: 1 };
    assert_eq!(
        <&Widget as IntoUarg>::type_only(&registry).map(|base| base.category()),
        Some((&widget).into_uarg(&registry).category())
    );
    assert_eq!(
        <&mut Widget as IntoUarg>::type_only(&registry).map(|base| base.category()),
        Some(RefCategory::Lvalue)
    );
    let pointer = <Option<&Widget> as IntoUarg>::type_only(&registry).unwrap();
    let live = Some(&widget).into_uarg(&registry);
    assert_eq!(pointer.raw_type(), live.raw_type());
    assert!(pointer.raw_type().is_some_and(|ty| ty.as_pointer().is_some_and(|p| p.is_readonly())));
    drop(live);

    let moved = Some(&mut widget).into_uarg(&registry);
    assert_eq!(moved.category(), RefCategory::Rvalue);
}

#[test]
fn nullptr_argument() {
    let registry = Registry::new();
    let arg = Nullptr.into_uarg(&registry);
    assert_eq!(arg.category(), RefCategory::Rvalue);
    assert_eq!(arg.raw_type(), Some(&registry.resolve::<Nullptr>()));
    assert!(registry.resolve::<Nullptr>().is_nullptr());
}

#[test]
fn receivers_carry_method_qualifiers() {
    assert_eq!(<&Widget as Receiver>::SHAPE, ParamShape::ConstLvalueRef);
    assert!(<&Widget as Receiver>::qualifiers().contains(MethodFlags::IS_CONST));
    assert!(!<&mut Widget as Receiver>::qualifiers().contains(MethodFlags::IS_CONST));
    assert_eq!(<&mut Widget as Receiver>::SHAPE, ParamShape::MutSelf);
    assert_eq!(<Widget as Receiver>::SHAPE, ParamShape::Value);
}

#[test]
fn optional_receivers_bind_only_when_present() {
    let registry = Registry::new();
    let widget = Widget { size: 2 };
    let formal = <&Widget as Receiver>::formal(&registry);
    assert!(Some(&widget).into_uinst(&registry).can_cast_to(&formal));
    assert!(!None::<&Widget>.into_uinst(&registry).can_cast_to(&formal));
    assert_eq!(
        <Option<&Widget> as IntoUinst>::type_only(&registry).map(|base| base.category()),
        Some(RefCategory::ConstLvalue)
    );
    assert_eq!(widget.size, 2);
}

#[test]
fn vectors_are_generic_classes() {
    let registry = Registry::new();
    let vector = registry.resolve::<Vec<u16>>().as_class().unwrap();
    assert_eq!(vector.template_argument_types(), &[registry.resolve::<u16>()][..]);
    assert!(vector.flags().contains(ClassFlags::IS_TEMPLATE_INSTANTIATION));

    let len = MethodState::make(&registry, "len", Vec::<u16>::len, ReturnPolicy::AsCopy).unwrap();
    let values = vec![1_u16, 2, 3];
    assert_eq!(len.invoke(&registry, &values, ()).cast::<usize>(), Ok(&3));
    assert_eq!(len.get_type().owner_type().as_any(), vector.as_any());
}

#[test]
fn arrays_resolve_with_element_access() {
    let registry = Registry::new();
    let array = registry.resolve::<[u8; 4]>().as_array().unwrap();
    assert_eq!(array.extent(), Some(4));
    assert_eq!(array.element_type(), registry.resolve::<u8>());
}

#[test]
fn polymorphic_object_is_the_value_itself() {
    let registry = Registry::new();
    let gadget = Gadget { charge: 40 };
    let object = gadget.as_object();
    assert_eq!(object.downcast_ref::<Gadget>().map(|g| g.charge), Some(40));
    assert_eq!(gadget.dynamic_type(&registry), registry.resolve::<Gadget>());
}
