//! Instance traversal.
//!
//! One depth-first pass over the instance, fields in declaration order,
//! present fields only. Strings go to the pool, submessages and array
//! elements to their type's bucket. Nothing is rendered here.

use protofreeze_core::{
    ArrayHandle, FieldDef, FieldValue, Instance, MessageDef, MsgHandle, Schema, Value,
};
use tracing::debug;

use super::buckets::{BucketRegistry, Slot, TypeKey};
use super::error::EmitError;
use super::string_pool::{StringPool, StringPoolBuilder};

/// Everything the emitter needs, populated and frozen.
#[derive(Debug)]
pub struct Collected<'a> {
    pub schema: &'a Schema,
    pub instance: &'a Instance,
    pub strings: StringPool,
    pub buckets: BucketRegistry<'a>,
    /// Bucket of the root message. The root is value 0 there.
    pub root: TypeKey,
}

/// Register every value reachable from the instance root.
pub fn collect<'a>(
    schema: &'a Schema,
    instance: &'a Instance,
) -> Result<Collected<'a>, EmitError> {
    let mut walker = Walker {
        schema,
        instance,
        strings: StringPoolBuilder::new(),
        buckets: BucketRegistry::new(schema),
    };

    let root = TypeKey::Message(instance.root_type());
    walker.buckets.push_value(root, Slot::Message(instance.root()));
    walker.walk_message(instance.root())?;

    let strings = walker.strings.finish();
    debug!(
        strings = strings.len(),
        string_bytes = strings.total_bytes(),
        buckets = walker.buckets.len(),
        "collected instance"
    );

    Ok(Collected {
        schema,
        instance,
        strings,
        buckets: walker.buckets,
        root,
    })
}

struct Walker<'a> {
    schema: &'a Schema,
    instance: &'a Instance,
    strings: StringPoolBuilder,
    buckets: BucketRegistry<'a>,
}

impl<'a> Walker<'a> {
    fn walk_message(&mut self, handle: MsgHandle) -> Result<(), EmitError> {
        let (schema, instance) = (self.schema, self.instance);
        let value = instance.message(handle);
        let def = schema.message(value.message());

        for (field, slot) in def.fields.iter().zip(value.fields()) {
            match slot {
                None => {}
                Some(FieldValue::Single(single)) => self.walk_single(field, single)?,
                Some(FieldValue::Repeated(array)) => self.walk_array(def, field, *array)?,
            }
        }
        Ok(())
    }

    fn walk_single(&mut self, field: &FieldDef, value: &Value) -> Result<(), EmitError> {
        match value {
            Value::Scalar(_) => {}
            Value::Bytes(bytes) => {
                self.strings.intern(bytes);
            }
            Value::Message(child) => {
                let key = TypeKey::for_field(&field.kind)
                    .unwrap_or(TypeKey::Message(self.instance.message(*child).message()));
                self.buckets.push_value(key, Slot::Message(*child));
                self.walk_message(*child)?;
            }
        }
        Ok(())
    }

    /// Push the whole element run first, close the window, then descend.
    ///
    /// Descending only after the window is closed keeps the run contiguous
    /// even when an element owns another array of the same type.
    fn walk_array(
        &mut self,
        owner: &MessageDef,
        field: &FieldDef,
        handle: ArrayHandle,
    ) -> Result<(), EmitError> {
        let unsupported = || EmitError::Unsupported {
            field: format!("{}.{}", owner.name, field.name),
        };
        let key = TypeKey::for_field(&field.kind).ok_or_else(unsupported)?;
        let instance = self.instance;
        let elements = instance.array(handle).elements();

        let window = self.buckets.begin_array(key, handle)?;
        for element in elements {
            let slot = Slot::from_value(element).ok_or_else(unsupported)?;
            self.buckets.push_value(key, slot);
        }
        self.buckets.end_array(window, elements.len() as u32)?;

        for element in elements {
            if let Value::Message(child) = element {
                self.walk_message(*child)?;
            }
        }
        Ok(())
    }
}
