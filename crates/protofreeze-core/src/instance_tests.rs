use crate::instance::{FieldValue, InstanceBuilder, InstanceError, ScalarValue, Value};
use crate::schema::Schema;

fn schema() -> Schema {
    Schema::from_json(
        r#"{ "messages": [
            { "name": "Node", "fields": [
                { "name": "label", "number": 1, "type": "string" },
                { "name": "weight", "number": 2, "type": "double" },
                { "name": "children", "number": 3, "label": "repeated",
                  "type": "message", "type_name": "Node" } ] },
            { "name": "Other", "fields": [] }
        ] }"#,
    )
    .unwrap()
}

#[test]
fn builds_bottom_up() {
    let schema = schema();
    let node = schema.message_id("Node").unwrap();
    let mut b = InstanceBuilder::new(&schema);

    let leaf = b
        .add_message(node, vec![Some(FieldValue::Single(Value::string("leaf"))), None, None])
        .unwrap();
    let children = b.add_array(vec![Value::Message(leaf)]);
    let root = b
        .add_message(
            node,
            vec![
                None,
                Some(FieldValue::Single(Value::Scalar(ScalarValue::F64(1.5)))),
                Some(FieldValue::Repeated(children)),
            ],
        )
        .unwrap();
    let instance = b.finish(root).unwrap();

    assert_eq!(instance.root(), root);
    assert_eq!(instance.root_type(), node);
    assert_eq!(instance.message_count(), 2);
    assert!(!instance.message(root).is_set(0));
    assert!(instance.message(root).is_set(2));
    assert_eq!(instance.array(children).len(), 1);
}

#[test]
fn field_count_must_match_schema() {
    let schema = schema();
    let node = schema.message_id("Node").unwrap();
    let mut b = InstanceBuilder::new(&schema);

    let err = b.add_message(node, vec![None]).unwrap_err();

    assert_eq!(
        err,
        InstanceError::FieldCount {
            message: "Node".to_string(),
            expected: 3,
            found: 1,
        }
    );
}

#[test]
fn scalar_storage_type_must_match() {
    let schema = schema();
    let node = schema.message_id("Node").unwrap();
    let mut b = InstanceBuilder::new(&schema);

    let err = b
        .add_message(
            node,
            vec![None, Some(FieldValue::Single(Value::Scalar(ScalarValue::F32(1.0)))), None],
        )
        .unwrap_err();

    assert_eq!(err.to_string(), "`Node.weight` expects double");
}

#[test]
fn submessage_type_must_match() {
    let schema = schema();
    let node = schema.message_id("Node").unwrap();
    let other = schema.message_id("Other").unwrap();
    let mut b = InstanceBuilder::new(&schema);

    let o = b.add_message(other, vec![]).unwrap();
    let arr = b.add_array(vec![Value::Message(o)]);
    let err = b
        .add_message(node, vec![None, None, Some(FieldValue::Repeated(arr))])
        .unwrap_err();

    assert!(matches!(err, InstanceError::KindMismatch { .. }));
}

#[test]
fn repeated_field_needs_array() {
    let schema = schema();
    let node = schema.message_id("Node").unwrap();
    let mut b = InstanceBuilder::new(&schema);
    let leaf = b.add_message(node, vec![None, None, None]).unwrap();

    let err = b
        .add_message(node, vec![None, None, Some(FieldValue::Single(Value::Message(leaf)))])
        .unwrap_err();

    assert_eq!(err.to_string(), "`Node.children` expects an array");
}

#[test]
fn root_must_exist() {
    let schema = schema();
    let node = schema.message_id("Node").unwrap();
    let mut other = InstanceBuilder::new(&schema);
    let foreign = other.add_message(node, vec![None, None, None]).unwrap();

    let err = InstanceBuilder::new(&schema).finish(foreign).unwrap_err();

    assert_eq!(err, InstanceError::MissingRoot(foreign));
}
