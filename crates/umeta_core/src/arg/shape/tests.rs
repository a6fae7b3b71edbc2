use super::*;

use RefCategory::{ConstLvalue, ConstRvalue, Lvalue, Rvalue};

/// Expected gating for every (shape, category) pair.
fn expected(shape: ParamShape, category: RefCategory) -> bool {
    match (shape, category) {
        (ParamShape::Value, _) => true,
        (ParamShape::Pointer { .. }, _) => true,
        (ParamShape::LvalueRef, Lvalue) => true,
        (ParamShape::LvalueRef, ConstLvalue | Rvalue | ConstRvalue) => false,
        (ParamShape::ConstLvalueRef, _) => true,
        (ParamShape::RvalueRef, Lvalue | Rvalue) => true,
        (ParamShape::RvalueRef, ConstLvalue | ConstRvalue) => false,
        (ParamShape::ConstRvalueRef, _) => true,
        (ParamShape::MutSelf, Lvalue | Rvalue) => true,
        (ParamShape::MutSelf, ConstLvalue | ConstRvalue) => false,
    }
}

#[test]
fn gating_table_is_total() {
    for shape in ParamShape::ALL {
        for category in RefCategory::ALL {
            assert_eq!(
                shape.accepts(category),
                expected(shape, category),
                "{shape:?} x {category}"
            );
        }
    }
}

#[test]
fn const_categories_never_bind_mutable_references() {
    for shape in ParamShape::ALL {
        if !shape.requires_mutable() || matches!(shape, ParamShape::Pointer { .. }) {
            continue;
        }
        assert!(!shape.accepts(ConstLvalue), "{shape:?}");
        assert!(!shape.accepts(ConstRvalue), "{shape:?}");
    }
}

#[test]
fn rvalues_never_bind_lvalue_references() {
    assert!(!ParamShape::LvalueRef.accepts(Rvalue));
    assert!(!ParamShape::LvalueRef.accepts(ConstRvalue));
}

#[test]
fn reference_flags_are_well_formed() {
    for shape in ParamShape::ALL {
        if let Some(flags) = shape.reference_flags() {
            assert!(flags.is_well_formed(), "{shape:?}");
        }
    }
    assert_eq!(ParamShape::Value.reference_flags(), None);
}

#[test]
fn receiver_qualifiers() {
    assert_eq!(ParamShape::ConstLvalueRef.qualifier(), MethodFlags::IS_CONST);
    assert_eq!(ParamShape::LvalueRef.qualifier(), MethodFlags::IS_MUT);
    assert_eq!(ParamShape::MutSelf.qualifier(), MethodFlags::IS_MUT);
    assert_eq!(ParamShape::Value.qualifier(), MethodFlags::IS_BY_VALUE);
}

#[test]
fn mutable_receivers_bind_temporaries() {
    assert!(ParamShape::MutSelf.accepts(Lvalue));
    assert!(ParamShape::MutSelf.accepts(Rvalue));
    assert!(!ParamShape::MutSelf.accepts(ConstLvalue));
    assert!(!ParamShape::MutSelf.accepts(ConstRvalue));
    assert_eq!(ParamShape::MutSelf.reference_flags(), Some(ReferenceFlags::IS_LVALUE));
}
