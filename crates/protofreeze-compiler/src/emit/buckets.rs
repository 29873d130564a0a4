//! Per-type value buckets.
//!
//! Every value the walker registers lands in the bucket of its storage
//! type: one bucket per message type, one per scalar C type. A value's
//! position in its bucket never changes once assigned, and becomes its
//! address in the emitted data.
//!
//! Arrays are windows over a bucket's values. A window is opened at the
//! current end of `values`, filled by consecutive pushes, and closed with
//! its final length. At most one window per bucket may be open at a time,
//! so two arrays of the same type never interleave.

use indexmap::IndexMap;
use protofreeze_core::utils::to_cident;
use protofreeze_core::{
    ArrayHandle, CType, FieldKind, MessageId, MsgHandle, ScalarValue, Schema, Value,
};

use super::error::{EmitError, InternalFault};

/// Identity of a bucket: a message type or a scalar storage type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypeKey {
    Message(MessageId),
    Scalar(CType),
}

impl TypeKey {
    /// Bucket that holds elements of a field of this kind.
    ///
    /// Strings have no bucket: they live in the string pool.
    pub fn for_field(kind: &FieldKind) -> Option<TypeKey> {
        match kind {
            FieldKind::Message(id) => Some(TypeKey::Message(*id)),
            FieldKind::String | FieldKind::Bytes => None,
            _ => kind.scalar_ctype().map(TypeKey::Scalar),
        }
    }

    /// C type name, also the prefix of the bucket's tables.
    pub fn cident(&self, schema: &Schema) -> String {
        match self {
            TypeKey::Message(id) => to_cident(&schema.message(*id).name),
            TypeKey::Scalar(ctype) => ctype.c_name().to_string(),
        }
    }
}

/// One registered value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Slot {
    Message(MsgHandle),
    Scalar(ScalarValue),
}

impl Slot {
    pub fn from_value(value: &Value) -> Option<Slot> {
        match value {
            Value::Message(h) => Some(Slot::Message(*h)),
            Value::Scalar(v) => Some(Slot::Scalar(*v)),
            Value::Bytes(_) => None,
        }
    }
}

/// A closed array: `values[offset..offset + len]` of its bucket.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArrayWindow {
    pub offset: u32,
    pub len: u32,
    pub handle: ArrayHandle,
}

/// An open array window. Must be passed back to [`BucketRegistry::end_array`].
#[must_use]
#[derive(Debug)]
pub struct ArraySlot {
    key: TypeKey,
    index: u32,
}

#[derive(Clone, Debug)]
pub struct Bucket {
    key: TypeKey,
    name: String,
    values: Vec<Slot>,
    arrays: Vec<ArrayWindow>,
    /// Index into `arrays` of the window being filled.
    open: Option<u32>,
}

impl Bucket {
    fn new(key: TypeKey, name: String) -> Self {
        Self {
            key,
            name,
            values: Vec::new(),
            arrays: Vec::new(),
            open: None,
        }
    }

    pub fn key(&self) -> TypeKey {
        self.key
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[Slot] {
        &self.values
    }

    pub fn arrays(&self) -> &[ArrayWindow] {
        &self.arrays
    }

    /// Total number of array elements, across all windows.
    pub fn element_count(&self) -> u32 {
        self.arrays.iter().map(|a| a.len).sum()
    }

    fn push(&mut self, slot: Slot) -> u32 {
        let index = self.values.len() as u32;
        self.values.push(slot);
        index
    }
}

/// All buckets of one compile, in creation order.
#[derive(Debug)]
pub struct BucketRegistry<'s> {
    schema: &'s Schema,
    buckets: IndexMap<TypeKey, Bucket>,
}

impl<'s> BucketRegistry<'s> {
    pub fn new(schema: &'s Schema) -> Self {
        Self {
            schema,
            buckets: IndexMap::new(),
        }
    }

    /// Create-or-return the bucket for `key`.
    pub fn bucket_for(&mut self, key: TypeKey) -> &mut Bucket {
        let schema = self.schema;
        self.buckets
            .entry(key)
            .or_insert_with(|| Bucket::new(key, key.cident(schema)))
    }

    /// Append a value and return its permanent index.
    pub fn push_value(&mut self, key: TypeKey, slot: Slot) -> u32 {
        self.bucket_for(key).push(slot)
    }

    /// Open a window at the current end of the bucket's values.
    pub fn begin_array(
        &mut self,
        key: TypeKey,
        handle: ArrayHandle,
    ) -> Result<ArraySlot, EmitError> {
        let bucket = self.bucket_for(key);
        if bucket.open.is_some() {
            return Err(InternalFault::ArrayInterleaved {
                bucket: bucket.name.clone(),
            }
            .into());
        }

        let index = bucket.arrays.len() as u32;
        bucket.arrays.push(ArrayWindow {
            offset: bucket.values.len() as u32,
            len: 0,
            handle,
        });
        bucket.open = Some(index);
        Ok(ArraySlot { key, index })
    }

    /// Close a window after exactly `len` values were pushed into it.
    ///
    /// Returns the array's index in the bucket.
    pub fn end_array(&mut self, slot: ArraySlot, len: u32) -> Result<u32, EmitError> {
        let bucket = self.bucket_for(slot.key);
        if bucket.open != Some(slot.index) {
            return Err(InternalFault::ArrayInterleaved {
                bucket: bucket.name.clone(),
            }
            .into());
        }

        let values_len = bucket.values.len() as u32;
        let window = &mut bucket.arrays[slot.index as usize];
        let pushed = values_len - window.offset;
        if pushed != len {
            return Err(InternalFault::ArrayLengthMismatch {
                bucket: bucket.name.clone(),
                expected: len,
                found: pushed,
            }
            .into());
        }

        window.len = len;
        bucket.open = None;
        Ok(slot.index)
    }

    pub fn get(&self, key: TypeKey) -> Option<&Bucket> {
        self.buckets.get(&key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bucket> {
        self.buckets.values()
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}
