//! Argument descriptors of bound callables.

use crate::types::AnyType;

/// One declared argument: position, declared type and optional name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArgumentInfo {
    position: usize,
    ty: AnyType,
    name: String,
}

impl ArgumentInfo {
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn get_type(&self) -> &AnyType {
        &self.ty
    }

    /// Name given at binding, empty when none was given.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Describe `types` in order, naming the leading ones from `names`.
pub(crate) fn describe_arguments(types: &[AnyType], names: &[&str]) -> Vec<ArgumentInfo> {
    types
        .iter()
        .enumerate()
        .map(|(position, ty)| ArgumentInfo {
            position,
            ty: ty.clone(),
            name: names.get(position).copied().unwrap_or_default().to_owned(),
        })
        .collect()
}
