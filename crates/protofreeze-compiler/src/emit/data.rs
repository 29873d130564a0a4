//! C data artifact.
//!
//! Output order:
//! 1. banner and `#include` of the layout header
//! 2. `strdata` blob and the `strings[]` table
//! 3. per bucket: `T_values[N]` declaration, `T_array_elems[]`, `T_arrays[M]`
//! 4. per bucket: `T_values[N]` definition
//! 5. the exported root pointer, always `&Root_values[0]`
//!
//! Buckets appear in creation order. Every reference is positional, so the
//! text depends only on the instance and the configuration.

use protofreeze_core::{FieldDef, FieldValue, MessageValue, Value};
use tracing::trace;

use crate::config::CompileConfig;

use super::buckets::{Bucket, Slot, TypeKey};
use super::error::EmitError;
use super::literal::LiteralFormatter;
use super::resolve::Resolver;
use super::walker::Collected;

/// Column limit for the string blob.
const LINE_WIDTH: usize = 80;

/// Render the data artifact for a collected instance.
pub fn emit_data(
    collected: &Collected<'_>,
    config: &CompileConfig,
    root_identifier: &str,
    formatter: &dyn LiteralFormatter,
) -> Result<String, EmitError> {
    let emitter = DataEmitter {
        collected,
        resolver: Resolver::new(collected),
        formatter,
        output: String::new(),
    };
    emitter.emit(config, root_identifier)
}

struct DataEmitter<'c, 'a> {
    collected: &'c Collected<'a>,
    resolver: Resolver<'c>,
    formatter: &'c dyn LiteralFormatter,
    output: String,
}

impl DataEmitter<'_, '_> {
    fn emit(mut self, config: &CompileConfig, root_identifier: &str) -> Result<String, EmitError> {
        let collected = self.collected;
        self.emit_banner(config);
        self.emit_strings();

        self.output
            .push_str("/* Forward declarations of values, and array tables. */\n");
        for bucket in collected.buckets.iter() {
            self.emit_declarations(bucket);
        }
        for bucket in collected.buckets.iter() {
            trace!(bucket = bucket.name(), values = bucket.values().len(), "emitting bucket");
            self.emit_definitions(bucket)?;
        }

        let root = self.resolver.bucket_name(collected.root)?;
        self.output.push_str("/* The externally-visible definition. */\n");
        self.output
            .push_str(&format!("{root} *{root_identifier} = &{root}_values[0];\n"));
        Ok(self.output)
    }

    fn emit_banner(&mut self, config: &CompileConfig) {
        let out = &mut self.output;
        out.push_str("/*\n");
        out.push_str(" * This file is a data dump of a message instance into C structures.\n");
        if let Some(cmd) = &config.command_line {
            out.push_str(" * It was created by protofreeze with the following command line:\n");
            out.push_str(" *\n");
            out.push_str(&format!(" *   {}\n", cmd.replace("*/", "*\\/")));
            out.push_str(" *\n");
        }
        if let Some(input) = &config.input_name {
            out.push_str(&format!(
                " * This file is a dump of '{}'.\n",
                input.replace("*/", "*\\/")
            ));
        }
        out.push_str(" * It contains only data, no code.\n");
        out.push_str(" *\n");
        out.push_str(" * This file was auto-generated. Do not edit. */\n\n");
        out.push_str(&format!("#include \"{}\"\n\n", config.header_file_name()));
    }

    fn emit_strings(&mut self) {
        let pool = &self.collected.strings;
        if pool.is_empty() {
            return;
        }

        self.output.push_str("static char strdata[] =\n");
        for line in wrap_blob(pool.blob()) {
            self.output.push_str(&format!("  \"{line}\"\n"));
        }
        // Replace the last newline with the terminator.
        self.output.pop();
        self.output.push_str(";\n\n");

        self.output.push_str("static pf_string strings[] = {\n");
        for entry in pool.entries() {
            self.output.push_str(&format!(
                "  {{.ptr = &strdata[{}], .byte_len = {}}},   /* \"{}\" */\n",
                entry.offset,
                entry.len(),
                comment_text(&entry.content),
            ));
        }
        self.output.push_str("};\n\n");
    }

    fn emit_declarations(&mut self, bucket: &Bucket) {
        let name = bucket.name();
        let out = &mut self.output;
        if !bucket.values().is_empty() {
            out.push_str(&format!(
                "static {name} {name}_values[{}];\n\n",
                bucket.values().len()
            ));
        }
        if bucket.arrays().is_empty() {
            return;
        }

        if bucket.element_count() == 0 {
            out.push_str(&format!(
                "static {name} *{name}_array_elems[1];  /* Unused: every array is empty. */\n"
            ));
        } else {
            out.push_str(&format!("static {name} *{name}_array_elems[] = {{\n"));
            for window in bucket.arrays() {
                for k in window.offset..window.offset + window.len {
                    out.push_str(&format!("  &{name}_values[{k}],\n"));
                }
            }
            out.push_str("};\n");
        }

        out.push_str(&format!(
            "static PF_ARRAY({name}) {name}_arrays[{}] = {{\n",
            bucket.arrays().len()
        ));
        let mut first = 0;
        for window in bucket.arrays() {
            out.push_str(&format!(
                "  {{.elements = &{name}_array_elems[{first}], .len = {}}},\n",
                window.len
            ));
            first += window.len;
        }
        out.push_str("};\n\n");
    }

    fn emit_definitions(&mut self, bucket: &Bucket) -> Result<(), EmitError> {
        if bucket.values().is_empty() {
            return Ok(());
        }

        let instance = self.collected.instance;
        let name = bucket.name();
        self.output.push_str(&format!(
            "static {name} {name}_values[{}] = {{\n",
            bucket.values().len()
        ));
        for slot in bucket.values() {
            match slot {
                Slot::Message(handle) => {
                    self.emit_message(instance.message(*handle))?;
                }
                Slot::Scalar(v) => {
                    let literal = self.formatter.format(*v);
                    self.output.push_str(&format!("  {literal},\n"));
                }
            }
        }
        self.output.push_str("};\n\n");
        Ok(())
    }

    fn emit_message(&mut self, value: &MessageValue) -> Result<(), EmitError> {
        let schema = self.collected.schema;
        let def = schema.message(value.message());
        if def.fields.is_empty() {
            self.output.push_str("  {.set_flags = {.bytes = {0}}},\n");
            return Ok(());
        }

        self.output.push_str("  {\n    .set_flags = {.has = {\n");
        for (i, field) in def.fields.iter().enumerate() {
            self.output
                .push_str(&format!("      .{} = {},\n", field.name, value.is_set(i)));
        }
        self.output.push_str("    }},\n");

        for (field, slot) in def.fields.iter().zip(value.fields()) {
            let payload = match slot {
                None => "0,   /* Not set. */".to_string(),
                Some(slot) => self.payload(&def.name, field, slot)?,
            };
            self.output
                .push_str(&format!("    .{} = {payload}\n", field.name));
        }
        self.output.push_str("  },\n");
        Ok(())
    }

    fn payload(
        &self,
        owner: &str,
        field: &FieldDef,
        slot: &FieldValue,
    ) -> Result<String, EmitError> {
        let text = match slot {
            FieldValue::Single(Value::Bytes(bytes)) => {
                let index = self.resolver.resolve_string(bytes)?;
                format!("&strings[{index}],   /* \"{}\" */", comment_text(bytes))
            }
            FieldValue::Single(Value::Message(child)) => {
                let key = TypeKey::Message(self.collected.instance.message(*child).message());
                let name = self.resolver.bucket_name(key)?;
                let index = self.resolver.resolve_value(key, *child)?;
                format!("&{name}_values[{index}],")
            }
            FieldValue::Single(Value::Scalar(v)) => format!("{},", self.formatter.format(*v)),
            FieldValue::Repeated(array) => {
                let key = TypeKey::for_field(&field.kind).ok_or_else(|| {
                    EmitError::Unsupported {
                        field: format!("{owner}.{}", field.name),
                    }
                })?;
                let name = self.resolver.bucket_name(key)?;
                let index = self.resolver.resolve_array(key, *array)?;
                format!("&{name}_arrays[{index}],")
            }
        };
        Ok(text)
    }
}

/// C string-literal form of one byte.
fn escape_byte(byte: u8, prev: Option<u8>) -> String {
    match byte {
        b'"' => "\\\"".to_string(),
        b'\\' => "\\\\".to_string(),
        b'\n' => "\\n".to_string(),
        b'\t' => "\\t".to_string(),
        b'\r' => "\\r".to_string(),
        // No trigraphs.
        b'?' if prev == Some(b'?') => "\\?".to_string(),
        0x20..=0x7e => (byte as char).to_string(),
        _ => format!("\\{byte:03o}"),
    }
}

/// Escaped blob, split into string-literal bodies that fit the line width.
///
/// Each line is emitted as `  "<body>"`, so a body holds at most
/// `LINE_WIDTH - 4` columns. Escape sequences are never split.
fn wrap_blob(blob: &[u8]) -> Vec<String> {
    let max = LINE_WIDTH - 4;
    let mut lines = vec![String::new()];
    let mut prev = None;
    for &byte in blob {
        let unit = escape_byte(byte, prev);
        prev = Some(byte);
        let Some(line) = lines.last_mut() else {
            continue;
        };
        if line.len() + unit.len() > max {
            lines.push(unit);
        } else {
            line.push_str(&unit);
        }
    }
    lines
}

/// Escaped content safe inside a `/* ... */` comment.
fn comment_text(bytes: &[u8]) -> String {
    let mut prev = None;
    let mut text = String::new();
    for &byte in bytes {
        text.push_str(&escape_byte(byte, prev));
        prev = Some(byte);
    }
    text.replace("*/", "*\\/")
}
