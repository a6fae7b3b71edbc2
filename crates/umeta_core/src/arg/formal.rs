//! Formal parameters.

use crate::registry::Registry;
use crate::types::AnyType;

use super::ParamShape;

/// One formal parameter: its shape, declared type and target type.
///
/// The target is the type the argument must be compatible with: the pointee
/// for pointers and references, the parameter type itself for by-value
/// parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Formal {
    shape: ParamShape,
    declared: AnyType,
    target: AnyType,
}

impl Formal {
    pub fn new(registry: &Registry, shape: ParamShape, target: AnyType) -> Self {
        let declared = match shape {
            ParamShape::Value => target.clone(),
            ParamShape::Pointer { readonly } => registry.pointer_type(&target, readonly).into(),
            reference => registry
                .reference_type(&target, reference.reference_flags().unwrap_or_default())
                .into(),
        };
        Formal {
            shape,
            declared,
            target,
        }
    }

    /// By-value parameter of type `target`.
    pub fn value(target: AnyType) -> Self {
        Formal {
            shape: ParamShape::Value,
            declared: target.clone(),
            target,
        }
    }

    #[inline]
    pub fn shape(&self) -> ParamShape {
        self.shape
    }

    /// Type as declared in the signature (`&T`, `Option<&mut T>`, `T`, ...).
    #[inline]
    pub fn declared_type(&self) -> &AnyType {
        &self.declared
    }

    #[inline]
    pub fn target_type(&self) -> &AnyType {
        &self.target
    }
}
