//! Type compatibility between arguments and formal parameters.
//!
//! `can_bind` combines the category gating of `ParamShape::accepts` with a
//! comparison of the argument's raw type against the formal's target:
//!
//! - exact match always succeeds;
//! - a class argument matches an ancestor class only through a registered
//!   upcast edge;
//! - bounded arrays decay to a pointer to their first element and bind to
//!   slice parameters of the same element type;
//! - void pointers accept any pointer or array;
//! - by-value parameters additionally need a copyable target unless the
//!   argument is an rvalue of exactly the target type (a move).

use crate::types::AnyType;

use super::{Formal, ParamShape, RefCategory};

/// `base` is `derived`, or a registered ancestor class of it.
pub fn is_a(base: &AnyType, derived: &AnyType) -> bool {
    if base == derived {
        return true;
    }
    match (base.as_class(), derived.as_class()) {
        (Some(base), Some(derived)) => base.is_base_of(&derived),
        _ => false,
    }
}

/// Whether an argument of `category` and type `raw` binds to `formal`.
pub fn can_bind(category: RefCategory, raw: &AnyType, formal: &Formal) -> bool {
    let target = formal.target_type();
    match formal.shape() {
        ParamShape::Pointer { readonly } => can_bind_pointer(category, raw, target, readonly),
        shape => {
            if !shape.accepts(category) {
                return false;
            }
            if let Some(slice) = target.as_array().filter(|array| !array.is_bounded()) {
                return raw
                    .as_array()
                    .is_some_and(|array| array.element_type() == slice.element_type());
            }
            if !is_a(target, raw) {
                return false;
            }
            match shape {
                ParamShape::Value => {
                    (category.is_rvalue() && target == raw) || target.is_copyable()
                }
                _ => true,
            }
        }
    }
}

fn can_bind_pointer(category: RefCategory, raw: &AnyType, target: &AnyType, readonly: bool) -> bool {
    if raw.is_nullptr() {
        return true;
    }
    if let Some(pointer) = raw.as_pointer() {
        if pointer.is_readonly() && !readonly {
            return false;
        }
        return target.is_void() || is_a(target, pointer.pointee_type());
    }
    if let Some(array) = raw.as_array().filter(|array| array.is_bounded()) {
        if category.is_const() && !readonly {
            return false;
        }
        return target.is_void() || is_a(target, &array.element_type());
    }
    false
}

/// Same as `can_bind`, restricted to class receivers.
pub fn can_bind_instance(category: RefCategory, raw: &AnyType, formal: &Formal) -> bool {
    raw.is_class()
        && !matches!(formal.shape(), ParamShape::Pointer { .. })
        && can_bind(category, raw, formal)
}
