//! Unit tests for the bucket registry.

use protofreeze_core::{CType, FieldKind, InstanceBuilder, ScalarValue};

use super::buckets::{BucketRegistry, Slot, TypeKey};
use super::error::{EmitError, InternalFault};
use crate::test_utils::{PERSON_SCHEMA, schema};

const INT32: TypeKey = TypeKey::Scalar(CType::Int32);

fn int(v: i32) -> Slot {
    Slot::Scalar(ScalarValue::I32(v))
}

#[test]
fn push_value_indices_are_stable() {
    let schema = schema(PERSON_SCHEMA);
    let mut registry = BucketRegistry::new(&schema);

    assert_eq!(registry.push_value(INT32, int(7)), 0);
    let flag = Slot::Scalar(ScalarValue::Bool(true));
    assert_eq!(registry.push_value(TypeKey::Scalar(CType::Bool), flag), 0);
    assert_eq!(registry.push_value(INT32, int(8)), 1);

    let bucket = registry.get(INT32).unwrap();
    assert_eq!(bucket.values(), &[int(7), int(8)]);
    assert_eq!(bucket.name(), "int32_t");
}

#[test]
fn buckets_keep_creation_order() {
    let schema = schema(PERSON_SCHEMA);
    let person = TypeKey::Message(schema.message_id("demo.Person").unwrap());
    let mut registry = BucketRegistry::new(&schema);

    registry.bucket_for(TypeKey::Scalar(CType::Double));
    registry.bucket_for(person);
    registry.bucket_for(TypeKey::Scalar(CType::Double));

    let names: Vec<&str> = registry.iter().map(|b| b.name()).collect();
    assert_eq!(names, ["double", "demo_Person"]);
}

#[test]
fn array_window_covers_pushed_values() {
    let schema = schema(PERSON_SCHEMA);
    let mut handles = InstanceBuilder::new(&schema);
    let (first, second) = (handles.add_array(vec![]), handles.add_array(vec![]));
    let mut registry = BucketRegistry::new(&schema);
    registry.push_value(INT32, int(0));

    let slot = registry.begin_array(INT32, first).unwrap();
    registry.push_value(INT32, int(1));
    registry.push_value(INT32, int(2));
    assert_eq!(registry.end_array(slot, 2).unwrap(), 0);

    let slot = registry.begin_array(INT32, second).unwrap();
    assert_eq!(registry.end_array(slot, 0).unwrap(), 1);

    let arrays = registry.get(INT32).unwrap().arrays();
    assert_eq!((arrays[0].offset, arrays[0].len, arrays[0].handle), (1, 2, first));
    assert_eq!((arrays[1].offset, arrays[1].len, arrays[1].handle), (3, 0, second));
    assert_eq!(registry.get(INT32).unwrap().element_count(), 2);
}

#[test]
fn same_type_windows_cannot_interleave() {
    let schema = schema(PERSON_SCHEMA);
    let mut handles = InstanceBuilder::new(&schema);
    let (outer, inner) = (handles.add_array(vec![]), handles.add_array(vec![]));
    let mut registry = BucketRegistry::new(&schema);

    let _open = registry.begin_array(INT32, outer).unwrap();
    let err = registry.begin_array(INT32, inner).unwrap_err();

    assert_eq!(
        err,
        EmitError::Internal(InternalFault::ArrayInterleaved {
            bucket: "int32_t".to_string()
        })
    );
}

#[test]
fn different_type_windows_may_overlap_in_time() {
    let schema = schema(PERSON_SCHEMA);
    let mut handles = InstanceBuilder::new(&schema);
    let (ints, floats) = (handles.add_array(vec![]), handles.add_array(vec![]));
    let float = TypeKey::Scalar(CType::Float);
    let mut registry = BucketRegistry::new(&schema);

    let int_slot = registry.begin_array(INT32, ints).unwrap();
    let float_slot = registry.begin_array(float, floats).unwrap();
    registry.push_value(INT32, int(1));

    assert_eq!(registry.end_array(float_slot, 0).unwrap(), 0);
    assert_eq!(registry.end_array(int_slot, 1).unwrap(), 0);
}

#[test]
fn end_array_checks_length() {
    let schema = schema(PERSON_SCHEMA);
    let mut handles = InstanceBuilder::new(&schema);
    let array = handles.add_array(vec![]);
    let mut registry = BucketRegistry::new(&schema);

    let slot = registry.begin_array(INT32, array).unwrap();
    registry.push_value(INT32, int(1));
    let err = registry.end_array(slot, 3).unwrap_err();

    assert_eq!(
        err.to_string(),
        "internal error: array in bucket `int32_t` declared 3 elements but 1 were pushed"
    );
}

#[test]
fn type_key_for_field() {
    let schema = schema(
        r#"{ "messages": [ { "name": "demo.Person", "fields": [] } ],
             "enums": [ { "name": "demo.Color", "values": [] } ] }"#,
    );
    let person = schema.message_id("demo.Person").unwrap();
    let color = schema.enum_id("demo.Color").unwrap();

    assert_eq!(TypeKey::for_field(&FieldKind::Enum(color)), Some(INT32));
    assert_eq!(TypeKey::for_field(&FieldKind::String), None);
    assert_eq!(TypeKey::for_field(&FieldKind::Bytes), None);
    assert_eq!(
        TypeKey::for_field(&FieldKind::Message(person)),
        Some(TypeKey::Message(person))
    );
    assert_eq!(TypeKey::Message(person).cident(&schema), "demo_Person");
}
