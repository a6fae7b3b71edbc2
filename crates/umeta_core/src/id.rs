//! Type identity and the shared hash.
//!
//! A `TypeId` *is* the shared hash of its descriptor. Descriptors resolved by
//! two independent registries for the same Rust type (or the same structure)
//! therefore compare equal without sharing any allocation.
//!
//! # Design
//!
//! Hashes are built with `TypeHasher`, a `hash_combine` style mixer seeded with
//! the kind discriminant. Strings go through FNV-1a so the result does not
//! depend on `std`'s randomized hashers. Nominal kinds mix in the hashed
//! `std::any::TypeId`, which is stable for the lifetime of the process.

use std::fmt;
use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

use crate::kind::TypeKind;

/// Opaque, totally ordered identity of a type descriptor.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct TypeId(u64);

impl TypeId {
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        TypeId(raw)
    }

    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeId({:#018x})", self.0)
    }
}

/// Golden-ratio constant used by `hash_combine`.
const GOLDEN: u64 = 0x9e37_79b9_7f4a_7c15;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Builder for shared hashes.
#[derive(Copy, Clone, Debug)]
#[must_use]
pub(crate) struct TypeHasher {
    seed: u64,
}

impl TypeHasher {
    pub(crate) fn new(kind: TypeKind) -> Self {
        TypeHasher { seed: 0 }.mix(u64::from(kind.discriminant()))
    }

    /// `seed ^= value + GOLDEN + (seed << 6) + (seed >> 2)`.
    pub(crate) fn mix(self, value: u64) -> Self {
        let seed = self.seed;
        let mixed = value
            .wrapping_add(GOLDEN)
            .wrapping_add(seed << 6)
            .wrapping_add(seed >> 2);
        TypeHasher {
            seed: seed ^ mixed,
        }
    }

    pub(crate) fn mix_id(self, id: TypeId) -> Self {
        self.mix(id.raw())
    }

    pub(crate) fn mix_ids(self, ids: impl IntoIterator<Item = TypeId>) -> Self {
        let mut hasher = self;
        let mut count = 0u64;
        for id in ids {
            hasher = hasher.mix_id(id);
            count += 1;
        }
        hasher.mix(count)
    }

    pub(crate) fn mix_str(self, text: &str) -> Self {
        self.mix(fnv1a(text.as_bytes()))
    }

    pub(crate) fn mix_usize(self, value: usize) -> Self {
        self.mix(value as u64)
    }

    pub(crate) fn mix_rust_type(self, id: std::any::TypeId) -> Self {
        let mut hasher = FxHasher::default();
        id.hash(&mut hasher);
        self.mix(hasher.finish())
    }

    pub(crate) fn finish(self) -> TypeId {
        TypeId(self.seed)
    }
}

fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV_OFFSET, |hash, byte| {
        (hash ^ u64::from(*byte)).wrapping_mul(FNV_PRIME)
    })
}
