//! JSON instance loader.
//!
//! Reads a protobuf-JSON-like document: objects keyed by field name, arrays
//! for repeated fields, `null` or a missing key for absent fields. 64-bit
//! integers may be given as decimal strings, floats as `"NaN"`,
//! `"Infinity"` or `"-Infinity"`, enums by value name or number.

use serde_json::Value as Json;

use crate::instance::{
    FieldValue, Instance, InstanceBuilder, InstanceError, MsgHandle, ScalarValue, Value,
};
use crate::schema::{CType, FieldDef, FieldKind, MessageId, ScalarType, Schema};

/// Load an instance of `root` from a parsed JSON document.
pub fn instance_from_json(
    schema: &Schema,
    root: MessageId,
    json: &Json,
) -> Result<Instance, InstanceError> {
    let mut loader = Loader {
        builder: InstanceBuilder::new(schema),
    };
    let root_name = schema.message(root).name.clone();
    let handle = loader.load_message(root, json, &root_name)?;
    loader.builder.finish(handle)
}

/// Load an instance of the message named `root_type` from JSON text.
pub fn instance_from_json_str(
    schema: &Schema,
    root_type: &str,
    text: &str,
) -> Result<Instance, InstanceError> {
    let root = schema
        .message_id(root_type)
        .ok_or_else(|| InstanceError::UnknownRootType(root_type.to_string()))?;
    let json: Json = serde_json::from_str(text).map_err(|e| InstanceError::InvalidValue {
        path: root_type.to_string(),
        expected: "a JSON document".to_string(),
        found: e.to_string(),
    })?;
    instance_from_json(schema, root, &json)
}

struct Loader<'s> {
    builder: InstanceBuilder<'s>,
}

impl Loader<'_> {
    fn load_message(
        &mut self,
        id: MessageId,
        json: &Json,
        path: &str,
    ) -> Result<MsgHandle, InstanceError> {
        let schema = self.builder.schema();
        let def = schema.message(id);
        let Json::Object(object) = json else {
            return Err(invalid(path, format!("an object for `{}`", def.name), json));
        };

        for key in object.keys() {
            if def.field_index(key).is_none() {
                return Err(InstanceError::UnknownField {
                    path: format!("{path}.{key}"),
                    message: def.name.clone(),
                });
            }
        }

        // Children first: a message may only reference handles that exist.
        let mut fields = Vec::with_capacity(def.fields.len());
        for field in &def.fields {
            let value = match object.get(&field.name) {
                None | Some(Json::Null) => None,
                Some(value) => {
                    let field_path = format!("{path}.{}", field.name);
                    Some(self.load_field(field, value, &field_path)?)
                }
            };
            fields.push(value);
        }

        self.builder.add_message(id, fields)
    }

    fn load_field(
        &mut self,
        field: &FieldDef,
        json: &Json,
        path: &str,
    ) -> Result<FieldValue, InstanceError> {
        if !field.is_repeated() {
            return Ok(FieldValue::Single(self.load_value(&field.kind, json, path)?));
        }

        let Json::Array(items) = json else {
            return Err(invalid(path, "an array".to_string(), json));
        };
        let mut elements = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            elements.push(self.load_value(&field.kind, item, &format!("{path}[{i}]"))?);
        }
        Ok(FieldValue::Repeated(self.builder.add_array(elements)))
    }

    fn load_value(
        &mut self,
        kind: &FieldKind,
        json: &Json,
        path: &str,
    ) -> Result<Value, InstanceError> {
        let schema = self.builder.schema();
        match kind {
            FieldKind::Scalar(t) => Ok(Value::Scalar(scalar_from_json(*t, json, path)?)),
            FieldKind::Enum(id) => {
                let def = schema.enum_def(*id);
                let number = match json {
                    Json::String(name) => {
                        def.value_by_name(name)
                            .ok_or_else(|| InstanceError::UnknownEnumValue {
                                path: path.to_string(),
                                value: name.clone(),
                                enum_name: def.name.clone(),
                            })?
                    }
                    Json::Number(n) => n
                        .as_i64()
                        .and_then(|n| i32::try_from(n).ok())
                        .ok_or_else(|| invalid(path, format!("a value of `{}`", def.name), json))?,
                    _ => return Err(invalid(path, format!("a value of `{}`", def.name), json)),
                };
                Ok(Value::Scalar(ScalarValue::I32(number)))
            }
            FieldKind::String | FieldKind::Bytes => match json {
                Json::String(s) => Ok(Value::string(s)),
                _ => Err(invalid(path, "a string".to_string(), json)),
            },
            FieldKind::Message(id) => Ok(Value::Message(self.load_message(*id, json, path)?)),
        }
    }
}

fn scalar_from_json(ty: ScalarType, json: &Json, path: &str) -> Result<ScalarValue, InstanceError> {
    let err = || invalid(path, ty.name().to_string(), json);
    let value = match ty.ctype() {
        CType::Bool => ScalarValue::Bool(json.as_bool().ok_or_else(err)?),
        CType::Int32 => ScalarValue::I32(
            integer::<i64>(json)
                .and_then(|n| i32::try_from(n).ok())
                .ok_or_else(err)?,
        ),
        CType::Uint32 => ScalarValue::U32(
            integer::<u64>(json)
                .and_then(|n| u32::try_from(n).ok())
                .ok_or_else(err)?,
        ),
        CType::Int64 => ScalarValue::I64(integer::<i64>(json).ok_or_else(err)?),
        CType::Uint64 => ScalarValue::U64(integer::<u64>(json).ok_or_else(err)?),
        CType::Float => ScalarValue::F32(float(json).ok_or_else(err)? as f32),
        CType::Double => ScalarValue::F64(float(json).ok_or_else(err)?),
    };
    Ok(value)
}

/// Integer from a JSON number or a decimal string.
fn integer<T>(json: &Json) -> Option<T>
where
    T: std::str::FromStr + TryFrom<i64> + TryFrom<u64>,
{
    match json {
        Json::Number(n) => {
            if let Some(v) = n.as_u64() {
                <T as TryFrom<u64>>::try_from(v).ok()
            } else {
                n.as_i64().and_then(|v| <T as TryFrom<i64>>::try_from(v).ok())
            }
        }
        Json::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn float(json: &Json) -> Option<f64> {
    match json {
        Json::Number(n) => n.as_f64(),
        Json::String(s) => match s.as_str() {
            "NaN" => Some(f64::NAN),
            "Infinity" => Some(f64::INFINITY),
            "-Infinity" => Some(f64::NEG_INFINITY),
            other => other.parse().ok(),
        },
        _ => None,
    }
}

fn invalid(path: &str, expected: String, found: &Json) -> InstanceError {
    InstanceError::InvalidValue {
        path: path.to_string(),
        expected,
        found: found.to_string(),
    }
}
