//! Message and enum schema.
//!
//! Two layers:
//! - **Deserialization layer**: 1:1 mapping to the JSON schema file
//! - **Analysis layer**: name-resolved definitions addressed by `MessageId`/`EnumId`
//!
//! Resolution only checks what is needed to address types. Everything else
//! (field numbers, label combinations, default values) is taken as given.

use indexmap::IndexMap;
use serde::Deserialize;

// ============================================================================
// Deserialization Layer
// ============================================================================

/// Raw schema file.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSchema {
    #[serde(default)]
    pub messages: Vec<RawMessage>,
    #[serde(default)]
    pub enums: Vec<RawEnum>,
}

/// Raw message definition.
#[derive(Debug, Clone, Deserialize)]
pub struct RawMessage {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<RawField>,
}

/// Raw field definition. `type_name` is required for enum and message fields.
#[derive(Debug, Clone, Deserialize)]
pub struct RawField {
    pub name: String,
    pub number: u32,
    #[serde(default)]
    pub label: Label,
    #[serde(rename = "type")]
    pub field_type: RawFieldType,
    #[serde(default)]
    pub type_name: Option<String>,
}

/// Field type as spelled in the schema file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RawFieldType {
    Double,
    Float,
    Int64,
    Uint64,
    Int32,
    Fixed64,
    Fixed32,
    Bool,
    String,
    Bytes,
    Uint32,
    Sfixed32,
    Sfixed64,
    Sint32,
    Sint64,
    Enum,
    Message,
}

/// Raw enum definition.
#[derive(Debug, Clone, Deserialize)]
pub struct RawEnum {
    pub name: String,
    #[serde(default)]
    pub values: Vec<EnumValue>,
}

/// Parse schema JSON into its raw form.
pub fn parse_schema(json: &str) -> Result<RawSchema, serde_json::Error> {
    serde_json::from_str(json)
}

// ============================================================================
// Common Types
// ============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    #[default]
    Optional,
    Required,
    Repeated,
}

impl Label {
    pub fn as_str(self) -> &'static str {
        match self {
            Label::Optional => "optional",
            Label::Required => "required",
            Label::Repeated => "repeated",
        }
    }
}

/// Index of a message in schema declaration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageId(u32);

impl MessageId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Index of an enum in schema declaration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnumId(u32);

impl EnumId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Numeric and boolean wire types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScalarType {
    Double,
    Float,
    Int64,
    Uint64,
    Int32,
    Fixed64,
    Fixed32,
    Bool,
    Uint32,
    Sfixed32,
    Sfixed64,
    Sint32,
    Sint64,
}

impl ScalarType {
    /// C storage type for this wire type.
    pub fn ctype(self) -> CType {
        match self {
            ScalarType::Double => CType::Double,
            ScalarType::Float => CType::Float,
            ScalarType::Int64 | ScalarType::Sfixed64 | ScalarType::Sint64 => CType::Int64,
            ScalarType::Uint64 | ScalarType::Fixed64 => CType::Uint64,
            ScalarType::Int32 | ScalarType::Sfixed32 | ScalarType::Sint32 => CType::Int32,
            ScalarType::Uint32 | ScalarType::Fixed32 => CType::Uint32,
            ScalarType::Bool => CType::Bool,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ScalarType::Double => "double",
            ScalarType::Float => "float",
            ScalarType::Int64 => "int64",
            ScalarType::Uint64 => "uint64",
            ScalarType::Int32 => "int32",
            ScalarType::Fixed64 => "fixed64",
            ScalarType::Fixed32 => "fixed32",
            ScalarType::Bool => "bool",
            ScalarType::Uint32 => "uint32",
            ScalarType::Sfixed32 => "sfixed32",
            ScalarType::Sfixed64 => "sfixed64",
            ScalarType::Sint32 => "sint32",
            ScalarType::Sint64 => "sint64",
        }
    }
}

/// In-memory storage type of a scalar. Several wire types share one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CType {
    Bool,
    Int32,
    Uint32,
    Int64,
    Uint64,
    Float,
    Double,
}

impl CType {
    pub const ALL: [CType; 7] = [
        CType::Bool,
        CType::Int32,
        CType::Uint32,
        CType::Int64,
        CType::Uint64,
        CType::Float,
        CType::Double,
    ];

    pub fn c_name(self) -> &'static str {
        match self {
            CType::Bool => "bool",
            CType::Int32 => "int32_t",
            CType::Uint32 => "uint32_t",
            CType::Int64 => "int64_t",
            CType::Uint64 => "uint64_t",
            CType::Float => "float",
            CType::Double => "double",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Scalar(ScalarType),
    Enum(EnumId),
    String,
    Bytes,
    Message(MessageId),
}

impl FieldKind {
    /// String and bytes fields both hold interned byte content.
    pub fn is_string(&self) -> bool {
        matches!(self, FieldKind::String | FieldKind::Bytes)
    }

    /// Storage type for scalar-like kinds. Enums are stored as `int32_t`.
    pub fn scalar_ctype(&self) -> Option<CType> {
        match self {
            FieldKind::Scalar(t) => Some(t.ctype()),
            FieldKind::Enum(_) => Some(CType::Int32),
            _ => None,
        }
    }
}

// ============================================================================
// Analysis Layer
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldDef {
    pub name: String,
    pub number: u32,
    pub label: Label,
    pub kind: FieldKind,
}

impl FieldDef {
    #[inline]
    pub fn is_repeated(&self) -> bool {
        self.label == Label::Repeated
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageDef {
    /// Fully qualified, dot separated.
    pub name: String,
    /// Declaration order is emission order.
    pub fields: Vec<FieldDef>,
}

impl MessageDef {
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct EnumValue {
    pub name: String,
    pub number: i32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnumDef {
    pub name: String,
    pub values: Vec<EnumValue>,
}

impl EnumDef {
    pub fn value_by_name(&self, name: &str) -> Option<i32> {
        self.values.iter().find(|v| v.name == name).map(|v| v.number)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("invalid schema file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("type `{0}` is defined more than once")]
    DuplicateType(String),

    #[error("field `{message}.{field}` is defined more than once")]
    DuplicateField { message: String, field: String },

    #[error("field `{field}` needs a `type_name`")]
    MissingTypeName { field: String },

    #[error("field `{field}` refers to unknown type `{type_name}`")]
    UnknownType { field: String, type_name: String },

    #[error("field `{field}` expects {expected} type but `{type_name}` is not one")]
    WrongTypeKind {
        field: String,
        type_name: String,
        expected: &'static str,
    },
}

/// A resolved schema.
#[derive(Clone, Debug)]
pub struct Schema {
    messages: Vec<MessageDef>,
    enums: Vec<EnumDef>,
    message_ids: IndexMap<String, MessageId>,
    enum_ids: IndexMap<String, EnumId>,
}

impl Schema {
    /// Parse and resolve a JSON schema.
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        Self::resolve(parse_schema(json)?)
    }

    /// Resolve type names to IDs.
    pub fn resolve(raw: RawSchema) -> Result<Self, SchemaError> {
        let mut message_ids = IndexMap::new();
        let mut enum_ids = IndexMap::new();

        for (i, msg) in raw.messages.iter().enumerate() {
            if message_ids
                .insert(msg.name.clone(), MessageId(i as u32))
                .is_some()
            {
                return Err(SchemaError::DuplicateType(msg.name.clone()));
            }
        }
        for (i, e) in raw.enums.iter().enumerate() {
            if message_ids.contains_key(&e.name)
                || enum_ids.insert(e.name.clone(), EnumId(i as u32)).is_some()
            {
                return Err(SchemaError::DuplicateType(e.name.clone()));
            }
        }

        let mut messages = Vec::with_capacity(raw.messages.len());
        for msg in raw.messages {
            let mut fields: Vec<FieldDef> = Vec::with_capacity(msg.fields.len());
            for field in msg.fields {
                if fields.iter().any(|f| f.name == field.name) {
                    return Err(SchemaError::DuplicateField {
                        message: msg.name,
                        field: field.name,
                    });
                }
                let path = format!("{}.{}", msg.name, field.name);
                let kind = resolve_kind(&field, &path, &message_ids, &enum_ids)?;
                fields.push(FieldDef {
                    name: field.name,
                    number: field.number,
                    label: field.label,
                    kind,
                });
            }
            messages.push(MessageDef {
                name: msg.name,
                fields,
            });
        }

        let enums = raw
            .enums
            .into_iter()
            .map(|e| EnumDef {
                name: e.name,
                values: e.values,
            })
            .collect();

        Ok(Self {
            messages,
            enums,
            message_ids,
            enum_ids,
        })
    }

    #[inline]
    pub fn message(&self, id: MessageId) -> &MessageDef {
        &self.messages[id.index()]
    }

    #[inline]
    pub fn enum_def(&self, id: EnumId) -> &EnumDef {
        &self.enums[id.index()]
    }

    pub fn message_id(&self, name: &str) -> Option<MessageId> {
        self.message_ids
            .get(name.strip_prefix('.').unwrap_or(name))
            .copied()
    }

    pub fn enum_id(&self, name: &str) -> Option<EnumId> {
        self.enum_ids
            .get(name.strip_prefix('.').unwrap_or(name))
            .copied()
    }

    pub fn messages(&self) -> impl Iterator<Item = (MessageId, &MessageDef)> {
        self.messages
            .iter()
            .enumerate()
            .map(|(i, m)| (MessageId(i as u32), m))
    }

    pub fn enums(&self) -> impl Iterator<Item = (EnumId, &EnumDef)> {
        self.enums
            .iter()
            .enumerate()
            .map(|(i, e)| (EnumId(i as u32), e))
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    pub fn enum_count(&self) -> usize {
        self.enums.len()
    }

    /// Reorder every message's fields by field number.
    ///
    /// Emitted structs follow declaration order, so a consumer whose runtime
    /// walks fields by number needs the schema sorted before compiling.
    pub fn sort_fields_by_number(&mut self) {
        for msg in &mut self.messages {
            msg.fields.sort_by_key(|f| f.number);
        }
    }

    /// Human-readable name of a field kind, for diagnostics.
    pub fn kind_name(&self, kind: &FieldKind) -> String {
        match kind {
            FieldKind::Scalar(t) => t.name().to_string(),
            FieldKind::Enum(id) => format!("enum {}", self.enum_def(*id).name),
            FieldKind::String => "string".to_string(),
            FieldKind::Bytes => "bytes".to_string(),
            FieldKind::Message(id) => format!("message {}", self.message(*id).name),
        }
    }
}

fn resolve_kind(
    field: &RawField,
    path: &str,
    message_ids: &IndexMap<String, MessageId>,
    enum_ids: &IndexMap<String, EnumId>,
) -> Result<FieldKind, SchemaError> {
    let kind = match field.field_type {
        RawFieldType::Double => FieldKind::Scalar(ScalarType::Double),
        RawFieldType::Float => FieldKind::Scalar(ScalarType::Float),
        RawFieldType::Int64 => FieldKind::Scalar(ScalarType::Int64),
        RawFieldType::Uint64 => FieldKind::Scalar(ScalarType::Uint64),
        RawFieldType::Int32 => FieldKind::Scalar(ScalarType::Int32),
        RawFieldType::Fixed64 => FieldKind::Scalar(ScalarType::Fixed64),
        RawFieldType::Fixed32 => FieldKind::Scalar(ScalarType::Fixed32),
        RawFieldType::Bool => FieldKind::Scalar(ScalarType::Bool),
        RawFieldType::Uint32 => FieldKind::Scalar(ScalarType::Uint32),
        RawFieldType::Sfixed32 => FieldKind::Scalar(ScalarType::Sfixed32),
        RawFieldType::Sfixed64 => FieldKind::Scalar(ScalarType::Sfixed64),
        RawFieldType::Sint32 => FieldKind::Scalar(ScalarType::Sint32),
        RawFieldType::Sint64 => FieldKind::Scalar(ScalarType::Sint64),
        RawFieldType::String => FieldKind::String,
        RawFieldType::Bytes => FieldKind::Bytes,
        RawFieldType::Enum | RawFieldType::Message => {
            let type_name = field
                .type_name
                .as_deref()
                .ok_or_else(|| SchemaError::MissingTypeName {
                    field: path.to_string(),
                })?;
            let name = type_name.strip_prefix('.').unwrap_or(type_name);
            let wants_message = field.field_type == RawFieldType::Message;

            if let Some(&id) = message_ids.get(name) {
                if !wants_message {
                    return Err(SchemaError::WrongTypeKind {
                        field: path.to_string(),
                        type_name: name.to_string(),
                        expected: "an enum",
                    });
                }
                FieldKind::Message(id)
            } else if let Some(&id) = enum_ids.get(name) {
                if wants_message {
                    return Err(SchemaError::WrongTypeKind {
                        field: path.to_string(),
                        type_name: name.to_string(),
                        expected: "a message",
                    });
                }
                FieldKind::Enum(id)
            } else {
                return Err(SchemaError::UnknownType {
                    field: path.to_string(),
                    type_name: name.to_string(),
                });
            }
        }
    };
    Ok(kind)
}
