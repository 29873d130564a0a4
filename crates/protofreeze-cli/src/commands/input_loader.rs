//! Reading schema and instance files.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use protofreeze_core::{Instance, Schema, instance_from_json_str};
use tracing::debug;

/// Load and resolve a schema file.
pub fn load_schema(path: &Path, sort_fields: bool) -> Result<Schema, String> {
    let text = read_input(path)?;
    let mut schema =
        Schema::from_json(&text).map_err(|e| format!("{}: {}", path.display(), e))?;
    if sort_fields {
        schema.sort_fields_by_number();
    }
    debug!(
        path = %path.display(),
        messages = schema.message_count(),
        enums = schema.enum_count(),
        "loaded schema"
    );
    Ok(schema)
}

/// Load an instance of `root_type`, or of the schema's first message.
pub fn load_instance(
    schema: &Schema,
    path: &Path,
    root_type: Option<&str>,
) -> Result<Instance, String> {
    let root_type = resolve_root_type(schema, root_type)?;
    let text = read_input(path)?;
    let instance = instance_from_json_str(schema, &root_type, &text)
        .map_err(|e| format!("{}: {}", path.display(), e))?;
    debug!(
        path = %path.display(),
        root_type = %root_type,
        messages = instance.message_count(),
        arrays = instance.array_count(),
        "loaded instance"
    );
    Ok(instance)
}

/// Name of the root message type.
pub fn resolve_root_type(schema: &Schema, root_type: Option<&str>) -> Result<String, String> {
    if let Some(name) = root_type {
        if schema.message_id(name).is_none() {
            return Err(format!("unknown root message type `{}`", name));
        }
        return Ok(name.to_string());
    }
    schema
        .messages()
        .next()
        .map(|(_, def)| def.name.clone())
        .ok_or_else(|| "schema defines no messages; nothing to instantiate".to_string())
}

/// Read a file, or stdin when the path is `-`.
pub fn read_input(path: &Path) -> Result<String, String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| format!("failed to read stdin: {}", e))?;
        return Ok(buf);
    }
    fs::read_to_string(path).map_err(|e| format!("failed to read '{}': {}", path.display(), e))
}
