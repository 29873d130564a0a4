//! Message instance arena.
//!
//! An instance is a tree of message values stored in two flat vectors.
//! Messages and arrays are addressed by `MsgHandle`/`ArrayHandle`; a handle
//! is the identity of a value, so two equal-looking submessages are still
//! distinct values.
//!
//! Instances are built bottom-up with [`InstanceBuilder`]: a message can only
//! reference handles that already exist, which makes cyclic instances
//! impossible to construct.

use crate::schema::{CType, FieldKind, MessageId, Schema};

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct MsgHandle(u32);

impl MsgHandle {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct ArrayHandle(u32);

impl ArrayHandle {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A numeric or boolean value, tagged with its storage type.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScalarValue {
    Bool(bool),
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
    F32(f32),
    F64(f64),
}

impl ScalarValue {
    pub fn ctype(&self) -> CType {
        match self {
            ScalarValue::Bool(_) => CType::Bool,
            ScalarValue::I32(_) => CType::Int32,
            ScalarValue::U32(_) => CType::Uint32,
            ScalarValue::I64(_) => CType::Int64,
            ScalarValue::U64(_) => CType::Uint64,
            ScalarValue::F32(_) => CType::Float,
            ScalarValue::F64(_) => CType::Double,
        }
    }
}

/// A singular value, or one element of an array.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Scalar(ScalarValue),
    /// Content of a string or bytes field.
    Bytes(Box<[u8]>),
    Message(MsgHandle),
}

impl Value {
    pub fn string(s: &str) -> Self {
        Value::Bytes(s.as_bytes().into())
    }
}

/// Content of a present field.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    Single(Value),
    Repeated(ArrayHandle),
}

#[derive(Clone, Debug, PartialEq)]
pub struct MessageValue {
    message: MessageId,
    /// One slot per schema field, in declaration order. `None` is absent.
    fields: Vec<Option<FieldValue>>,
}

impl MessageValue {
    #[inline]
    pub fn message(&self) -> MessageId {
        self.message
    }

    #[inline]
    pub fn fields(&self) -> &[Option<FieldValue>] {
        &self.fields
    }

    #[inline]
    pub fn field(&self, index: usize) -> Option<&FieldValue> {
        self.fields.get(index).and_then(Option::as_ref)
    }

    #[inline]
    pub fn is_set(&self, index: usize) -> bool {
        self.field(index).is_some()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ArrayValue {
    elements: Vec<Value>,
}

impl ArrayValue {
    #[inline]
    pub fn elements(&self) -> &[Value] {
        &self.elements
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// A complete, immutable message tree.
#[derive(Clone, Debug)]
pub struct Instance {
    messages: Vec<MessageValue>,
    arrays: Vec<ArrayValue>,
    root: MsgHandle,
}

impl Instance {
    #[inline]
    pub fn root(&self) -> MsgHandle {
        self.root
    }

    pub fn root_type(&self) -> MessageId {
        self.message(self.root).message
    }

    #[inline]
    pub fn message(&self, handle: MsgHandle) -> &MessageValue {
        &self.messages[handle.index()]
    }

    #[inline]
    pub fn array(&self, handle: ArrayHandle) -> &ArrayValue {
        &self.arrays[handle.index()]
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    pub fn array_count(&self) -> usize {
        self.arrays.len()
    }
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum InstanceError {
    #[error("`{message}` has {expected} fields but {found} values were given")]
    FieldCount {
        message: String,
        expected: usize,
        found: usize,
    },

    #[error("`{path}` expects {expected}")]
    KindMismatch { path: String, expected: String },

    #[error("`{path}` refers to a value that does not exist yet")]
    DanglingHandle { path: String },

    #[error("root {0:?} does not exist")]
    MissingRoot(MsgHandle),

    #[error("`{path}` is not a field of `{message}`")]
    UnknownField { path: String, message: String },

    #[error("`{path}`: expected {expected}, found `{found}`")]
    InvalidValue {
        path: String,
        expected: String,
        found: String,
    },

    #[error("`{path}`: `{value}` is not a value of enum `{enum_name}`")]
    UnknownEnumValue {
        path: String,
        value: String,
        enum_name: String,
    },

    #[error("unknown root message type `{0}`")]
    UnknownRootType(String),
}

/// Builds an [`Instance`] bottom-up, checking every value against the schema.
#[derive(Debug)]
pub struct InstanceBuilder<'s> {
    schema: &'s Schema,
    messages: Vec<MessageValue>,
    arrays: Vec<ArrayValue>,
}

impl<'s> InstanceBuilder<'s> {
    pub fn new(schema: &'s Schema) -> Self {
        Self {
            schema,
            messages: Vec::new(),
            arrays: Vec::new(),
        }
    }

    pub fn schema(&self) -> &'s Schema {
        self.schema
    }

    /// Store an array. Its elements are checked when a message adopts it.
    pub fn add_array(&mut self, elements: Vec<Value>) -> ArrayHandle {
        let handle = ArrayHandle(self.arrays.len() as u32);
        self.arrays.push(ArrayValue { elements });
        handle
    }

    /// Store a message whose fields reference only existing handles.
    pub fn add_message(
        &mut self,
        message: MessageId,
        fields: Vec<Option<FieldValue>>,
    ) -> Result<MsgHandle, InstanceError> {
        let def = self.schema.message(message);
        if fields.len() != def.fields.len() {
            return Err(InstanceError::FieldCount {
                message: def.name.clone(),
                expected: def.fields.len(),
                found: fields.len(),
            });
        }

        for (field, value) in def.fields.iter().zip(&fields) {
            let Some(value) = value else {
                continue;
            };
            let path = format!("{}.{}", def.name, field.name);
            match (field.is_repeated(), value) {
                (true, FieldValue::Repeated(array)) => {
                    let elements = self
                        .arrays
                        .get(array.index())
                        .ok_or_else(|| InstanceError::DanglingHandle { path: path.clone() })?;
                    for element in elements.elements() {
                        self.check_value(&field.kind, element, &path)?;
                    }
                }
                (false, FieldValue::Single(single)) => {
                    self.check_value(&field.kind, single, &path)?;
                }
                (repeated, _) => {
                    let expected = if repeated {
                        "an array".to_string()
                    } else {
                        format!("a single {}", self.schema.kind_name(&field.kind))
                    };
                    return Err(InstanceError::KindMismatch { path, expected });
                }
            }
        }

        let handle = MsgHandle(self.messages.len() as u32);
        self.messages.push(MessageValue { message, fields });
        Ok(handle)
    }

    pub fn finish(self, root: MsgHandle) -> Result<Instance, InstanceError> {
        if root.index() >= self.messages.len() {
            return Err(InstanceError::MissingRoot(root));
        }
        Ok(Instance {
            messages: self.messages,
            arrays: self.arrays,
            root,
        })
    }

    fn check_value(&self, kind: &FieldKind, value: &Value, path: &str) -> Result<(), InstanceError> {
        let ok = match (kind, value) {
            (FieldKind::Scalar(t), Value::Scalar(v)) => v.ctype() == t.ctype(),
            (FieldKind::Enum(_), Value::Scalar(v)) => v.ctype() == CType::Int32,
            (FieldKind::String | FieldKind::Bytes, Value::Bytes(_)) => true,
            (FieldKind::Message(expected), Value::Message(child)) => {
                let Some(child) = self.messages.get(child.index()) else {
                    return Err(InstanceError::DanglingHandle {
                        path: path.to_string(),
                    });
                };
                child.message == *expected
            }
            _ => false,
        };
        if ok {
            Ok(())
        } else {
            Err(InstanceError::KindMismatch {
                path: path.to_string(),
                expected: self.schema.kind_name(kind),
            })
        }
    }
}
