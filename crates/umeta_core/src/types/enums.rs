//! Enum descriptors.

use std::collections::BTreeMap;

use parking_lot::RwLock;

use crate::error::{ErrorCode, MetaResult};
use crate::flags::EnumFlags;
use crate::id::{TypeHasher, TypeId};
use crate::kind::TypeKind;
use crate::state::{Evalue, EvalueIndex};
use crate::value::{AnyObject, Uvalue};

use super::{kind_handle, AnyType};

/// Erased conversion from an enum value to its underlying number.
pub(crate) type ToUnderlying = fn(&AnyObject) -> Option<Uvalue>;

pub(crate) struct EnumData {
    name: &'static str,
    rust_type: std::any::TypeId,
    flags: EnumFlags,
    underlying: AnyType,
    to_underlying: ToUnderlying,
    evalues: RwLock<BTreeMap<EvalueIndex, Evalue>>,
}

impl EnumData {
    pub(crate) fn new(
        name: &'static str,
        rust_type: std::any::TypeId,
        underlying: AnyType,
        to_underlying: ToUnderlying,
    ) -> Self {
        EnumData {
            name,
            rust_type,
            flags: EnumFlags::IS_SCOPED,
            underlying,
            to_underlying,
            evalues: RwLock::new(BTreeMap::new()),
        }
    }

    pub(crate) fn name(&self) -> &'static str {
        self.name
    }

    pub(crate) fn clear_evalues(&self) {
        self.evalues.write().clear();
    }

    pub(crate) fn shared_hash(&self, kind: TypeKind) -> TypeId {
        TypeHasher::new(kind)
            .mix_rust_type(self.rust_type)
            .mix_str(self.name)
            .finish()
    }
}

kind_handle! {
    /// Handle to an enum descriptor.
    EnumType => Enum(EnumData)
}

impl EnumType {
    pub fn name(&self) -> &'static str {
        self.data().name
    }

    pub fn flags(&self) -> EnumFlags {
        self.data().flags
    }

    pub fn underlying_type(&self) -> &AnyType {
        &self.data().underlying
    }

    /// Underlying number of an enum value of this type.
    pub(crate) fn underlying_of(&self, object: &AnyObject) -> Option<Uvalue> {
        (self.data().to_underlying)(object)
    }

    pub fn evalues(&self) -> Vec<Evalue> {
        self.data().evalues.read().values().cloned().collect()
    }

    pub fn get_evalue(&self, name: &str) -> Option<Evalue> {
        self.data()
            .evalues
            .read()
            .iter()
            .find(|(index, _)| index.name() == name)
            .map(|(_, evalue)| evalue.clone())
    }

    /// Name of the enumerator equal to `value`, given as the enum or as its underlying number.
    pub fn value_to_name(&self, value: &Uvalue) -> Option<String> {
        self.data()
            .evalues
            .read()
            .values()
            .find(|evalue| evalue.value() == value || evalue.underlying_value() == value)
            .map(|evalue| evalue.name().to_owned())
    }

    /// Copy of the enumerator named `name`.
    pub fn name_to_value(&self, name: &str) -> Option<Uvalue> {
        self.get_evalue(name)?.value().try_clone().ok()
    }

    pub fn add_evalue(&self, evalue: Evalue) -> MetaResult<()> {
        if evalue.get_type() != self {
            return Err(ErrorCode::InstanceTypeMismatch);
        }
        self.data()
            .evalues
            .write()
            .insert(evalue.index().clone(), evalue);
        Ok(())
    }
}
