//! Shared fixtures for compiler tests.

use indoc::indoc;
use protofreeze_core::{Instance, Schema, instance_from_json};

/// `demo.Person { name: string, age: int32, friends: repeated demo.Person }`
pub const PERSON_SCHEMA: &str = indoc! {r#"
    {
      "messages": [
        { "name": "demo.Person", "fields": [
          { "name": "name", "number": 1, "type": "string" },
          { "name": "age", "number": 2, "type": "int32" },
          { "name": "friends", "number": 3, "label": "repeated",
            "type": "message", "type_name": "demo.Person" }
        ] }
      ]
    }
"#};

/// `demo.Tree { name: string, children: repeated demo.Tree }`
pub const TREE_SCHEMA: &str = indoc! {r#"
    {
      "messages": [
        { "name": "demo.Tree", "fields": [
          { "name": "name", "number": 1, "type": "string" },
          { "name": "children", "number": 2, "label": "repeated",
            "type": "message", "type_name": "demo.Tree" }
        ] }
      ]
    }
"#};

pub fn schema(json: &str) -> Schema {
    Schema::from_json(json).unwrap()
}

pub fn instance(schema: &Schema, root_type: &str, json: serde_json::Value) -> Instance {
    let root = schema.message_id(root_type).unwrap();
    instance_from_json(schema, root, &json).unwrap()
}

/// `Person{name="Alice", friends=[Person{name="Bob"}, Person{name="Alice"}]}`
pub fn alice_and_friends(schema: &Schema) -> Instance {
    instance(
        schema,
        "demo.Person",
        serde_json::json!({
            "name": "Alice",
            "friends": [ { "name": "Bob" }, { "name": "Alice" } ]
        }),
    )
}
