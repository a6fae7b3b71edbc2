//! Enumerators.

use std::sync::Arc;

use crate::error::{ErrorCode, MetaResult};
use crate::reflect::Reflect;
use crate::registry::Registry;
use crate::types::EnumType;
use crate::value::Uvalue;

use super::EvalueIndex;

pub type Evalue = Arc<EvalueState>;

/// One named enumerator with its value and underlying number.
#[derive(Debug)]
pub struct EvalueState {
    index: EvalueIndex,
    value: Uvalue,
    underlying: Uvalue,
}

impl EvalueState {
    /// Fails with `BadCast` when `E` is not a reflected enum.
    pub fn make<E: Reflect>(registry: &Registry, name: impl Into<String>, value: E) -> MetaResult<Evalue> {
        let ty = registry.resolve::<E>().as_enum().ok_or(ErrorCode::BadCast)?;
        let value = Uvalue::new(value);
        let underlying = value
            .data()
            .and_then(|object| ty.underlying_of(object))
            .ok_or(ErrorCode::BadCast)?;
        Ok(Arc::new(EvalueState {
            index: EvalueIndex::new(name, ty),
            value,
            underlying,
        }))
    }

    #[inline]
    pub fn index(&self) -> &EvalueIndex {
        &self.index
    }

    #[inline]
    pub fn name(&self) -> &str {
        self.index.name()
    }

    #[inline]
    pub fn get_type(&self) -> &EnumType {
        self.index.get_type()
    }

    pub fn value(&self) -> &Uvalue {
        &self.value
    }

    pub fn underlying_value(&self) -> &Uvalue {
        &self.underlying
    }
}
