//! Handle-to-index resolution for emission.
//!
//! Lookups are built once from the frozen buckets. A handle registered more
//! than once resolves to its first occurrence.

use std::collections::HashMap;

use protofreeze_core::{ArrayHandle, MsgHandle};

use super::buckets::{Slot, TypeKey};
use super::error::{EmitError, InternalFault};
use super::string_pool::StringPool;
use super::walker::Collected;

#[derive(Debug)]
pub struct Resolver<'c> {
    strings: &'c StringPool,
    values: HashMap<(TypeKey, MsgHandle), u32>,
    arrays: HashMap<(TypeKey, ArrayHandle), u32>,
    names: HashMap<TypeKey, &'c str>,
}

impl<'c> Resolver<'c> {
    pub fn new(collected: &'c Collected<'_>) -> Self {
        let mut values = HashMap::new();
        let mut arrays = HashMap::new();
        let mut names = HashMap::new();

        for bucket in collected.buckets.iter() {
            let key = bucket.key();
            names.insert(key, bucket.name());
            for (index, slot) in bucket.values().iter().enumerate() {
                if let Slot::Message(handle) = slot {
                    values.entry((key, *handle)).or_insert(index as u32);
                }
            }
            for (index, window) in bucket.arrays().iter().enumerate() {
                arrays.entry((key, window.handle)).or_insert(index as u32);
            }
        }

        Self {
            strings: &collected.strings,
            values,
            arrays,
            names,
        }
    }

    /// Pool index of a string's content.
    pub fn resolve_string(&self, bytes: &[u8]) -> Result<u32, EmitError> {
        self.strings.index_of(bytes).ok_or_else(|| {
            InternalFault::StringNotInterned(String::from_utf8_lossy(bytes).into_owned()).into()
        })
    }

    /// Position of a message in its type's bucket.
    pub fn resolve_value(&self, key: TypeKey, handle: MsgHandle) -> Result<u32, EmitError> {
        self.values.get(&(key, handle)).copied().ok_or_else(|| {
            InternalFault::ValueNotRegistered {
                bucket: self.name_of(key),
                handle: handle.index(),
            }
            .into()
        })
    }

    /// Position of an array among its type's windows.
    pub fn resolve_array(&self, key: TypeKey, handle: ArrayHandle) -> Result<u32, EmitError> {
        self.arrays.get(&(key, handle)).copied().ok_or_else(|| {
            InternalFault::ArrayNotRegistered {
                bucket: self.name_of(key),
                handle: handle.index(),
            }
            .into()
        })
    }

    /// C name of a bucket's tables.
    pub fn bucket_name(&self, key: TypeKey) -> Result<&'c str, EmitError> {
        self.names
            .get(&key)
            .copied()
            .ok_or_else(|| InternalFault::MissingBucket(format!("{key:?}")).into())
    }

    fn name_of(&self, key: TypeKey) -> String {
        self.names
            .get(&key)
            .map_or_else(|| format!("{key:?}"), |name| name.to_string())
    }
}
