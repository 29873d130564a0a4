use indoc::indoc;

use crate::schema::{CType, FieldKind, Label, ScalarType, Schema, SchemaError};

const PERSON: &str = indoc! {r#"
    {
      "messages": [
        { "name": "demo.Person", "fields": [
          { "name": "name", "number": 1, "type": "string" },
          { "name": "age", "number": 2, "type": "int32" },
          { "name": "friends", "number": 3, "label": "repeated",
            "type": "message", "type_name": "demo.Person" },
          { "name": "color", "number": 4, "type": "enum", "type_name": ".demo.Color" }
        ] }
      ],
      "enums": [
        { "name": "demo.Color", "values": [
          { "name": "RED", "number": 0 },
          { "name": "GREEN", "number": 1 }
        ] }
      ]
    }
"#};

#[test]
fn resolves_self_referential_message() {
    let schema = Schema::from_json(PERSON).unwrap();
    let person = schema.message_id("demo.Person").unwrap();
    let def = schema.message(person);

    assert_eq!(def.fields.len(), 4);
    assert_eq!(def.fields[0].label, Label::Optional);
    assert_eq!(def.fields[0].kind, FieldKind::String);
    assert_eq!(def.fields[1].kind, FieldKind::Scalar(ScalarType::Int32));
    assert_eq!(def.fields[2].kind, FieldKind::Message(person));
    assert!(def.fields[2].is_repeated());
}

#[test]
fn leading_dot_in_type_name_is_ignored() {
    let schema = Schema::from_json(PERSON).unwrap();
    let color = schema.enum_id("demo.Color").unwrap();
    let person = schema.message(schema.message_id(".demo.Person").unwrap());

    assert_eq!(person.fields[3].kind, FieldKind::Enum(color));
    assert_eq!(schema.enum_def(color).value_by_name("GREEN"), Some(1));
}

#[test]
fn scalar_types_share_storage() {
    assert_eq!(ScalarType::Sint32.ctype(), CType::Int32);
    assert_eq!(ScalarType::Sfixed64.ctype(), CType::Int64);
    assert_eq!(ScalarType::Fixed32.ctype(), CType::Uint32);
    assert_eq!(ScalarType::Fixed64.ctype(), CType::Uint64);
    assert_eq!(CType::Uint64.c_name(), "uint64_t");
}

#[test]
fn unknown_type_name_is_rejected() {
    let json = r#"{ "messages": [ { "name": "A", "fields": [
        { "name": "b", "number": 1, "type": "message", "type_name": "B" } ] } ] }"#;

    let err = Schema::from_json(json).unwrap_err();

    assert!(matches!(err, SchemaError::UnknownType { .. }));
    assert_eq!(err.to_string(), "field `A.b` refers to unknown type `B`");
}

#[test]
fn message_field_naming_an_enum_is_rejected() {
    let json = r#"{
        "messages": [ { "name": "A", "fields": [
            { "name": "e", "number": 1, "type": "message", "type_name": "E" } ] } ],
        "enums": [ { "name": "E", "values": [] } ]
    }"#;

    let err = Schema::from_json(json).unwrap_err();

    assert!(matches!(err, SchemaError::WrongTypeKind { expected: "a message", .. }));
}

#[test]
fn missing_type_name_is_rejected() {
    let json = r#"{ "messages": [ { "name": "A", "fields": [
        { "name": "e", "number": 1, "type": "enum" } ] } ] }"#;

    let err = Schema::from_json(json).unwrap_err();

    assert!(matches!(err, SchemaError::MissingTypeName { field } if field == "A.e"));
}

#[test]
fn duplicate_names_are_rejected() {
    let types = r#"{ "messages": [ { "name": "A" } ], "enums": [ { "name": "A" } ] }"#;
    assert!(matches!(
        Schema::from_json(types),
        Err(SchemaError::DuplicateType(name)) if name == "A"
    ));

    let fields = r#"{ "messages": [ { "name": "A", "fields": [
        { "name": "x", "number": 1, "type": "bool" },
        { "name": "x", "number": 2, "type": "bool" } ] } ] }"#;
    assert!(matches!(
        Schema::from_json(fields),
        Err(SchemaError::DuplicateField { .. })
    ));
}

#[test]
fn sort_fields_by_number_reorders_declarations() {
    let json = r#"{ "messages": [ { "name": "A", "fields": [
        { "name": "c", "number": 3, "type": "bool" },
        { "name": "a", "number": 1, "type": "bool" },
        { "name": "b", "number": 2, "type": "bool" } ] } ] }"#;
    let mut schema = Schema::from_json(json).unwrap();

    schema.sort_fields_by_number();

    let (_, def) = schema.messages().next().unwrap();
    let names: Vec<_> = def.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["a", "b", "c"]);
}

#[test]
fn malformed_json_is_a_parse_error() {
    assert!(matches!(
        Schema::from_json("{ \"messages\": 3 }"),
        Err(SchemaError::Parse(_))
    ));
}
