//! Rendering of header sections.

use protofreeze_core::utils::{to_cident, to_preproc};
use protofreeze_core::{CType, EnumDef, MessageDef};

use super::Emitter;
use super::naming::{STRING_TYPE, enum_prefix};

const BANNER: &str = "/* This file was generated by protofreeze. Do not edit. */\n\n";

impl Emitter<'_> {
    pub(super) fn render_prologue(&mut self, guard: &str, includes: &[&str]) {
        self.output.push_str(BANNER);
        self.output.push_str(&format!("#ifndef {guard}\n#define {guard}\n\n"));
        for include in includes {
            self.output.push_str(&format!("#include {include}\n"));
        }
        if !includes.is_empty() {
            self.output.push('\n');
        }
        self.output.push_str("#ifdef __cplusplus\nextern \"C\" {\n#endif\n\n");
    }

    pub(super) fn render_epilogue(&mut self, guard: &str) {
        self.output
            .push_str("#ifdef __cplusplus\n}  /* extern \"C\" */\n#endif\n\n");
        self.output.push_str(&format!("#endif  /* {guard} */\n"));
    }

    /// String type, array macros, and arrays of every scalar type.
    ///
    /// Guarded separately so several generated headers can be included in
    /// one translation unit.
    pub(super) fn render_runtime_support(&mut self) {
        let out = &mut self.output;
        out.push_str("/* Runtime support. */\n\n");
        out.push_str("#ifndef PF_RUNTIME_TYPES\n#define PF_RUNTIME_TYPES\n\n");
        out.push_str(&format!(
            "typedef struct {STRING_TYPE} {{\n  const char *ptr;\n  uint32_t byte_len;\n}} {STRING_TYPE};\n\n"
        ));
        out.push_str("#define PF_ARRAY(T) struct T##_array\n");
        out.push_str("#define PF_DEFINE_ARRAY(T) \\\n");
        out.push_str("  struct T##_array {       \\\n");
        out.push_str("    T **elements;          \\\n");
        out.push_str("    uint32_t len;          \\\n");
        out.push_str("  };\n\n");
        for ctype in CType::ALL {
            out.push_str(&format!("PF_DEFINE_ARRAY({})\n", ctype.c_name()));
        }
        out.push_str(&format!("PF_DEFINE_ARRAY({STRING_TYPE})\n\n"));
        out.push_str("#endif  /* PF_RUNTIME_TYPES */\n\n");
    }

    /// Forward declarations, so messages may refer to each other recursively.
    pub(super) fn render_forward_declarations(&mut self) {
        let schema = self.schema;
        if schema.message_count() == 0 {
            return;
        }

        self.output.push_str(
            "/* Forward declarations of all message types.\n * So they can refer to each other in possibly-recursive ways. */\n\n",
        );
        for (_, def) in schema.messages() {
            let name = to_cident(&def.name);
            self.output.push_str(&format!(
                "struct {name};\ntypedef struct {name} {name};\nPF_ARRAY({name});\n\n"
            ));
        }
    }

    pub(super) fn render_root_declaration(&mut self) {
        let Some((identifier, message)) = &self.config.root else {
            return;
        };

        let name = self.message_cident(*message);
        self.output.push_str(&format!(
            "/* The externally-visible root. */\nextern {name} *{identifier};\n\n"
        ));
    }

    pub(super) fn render_message(&mut self, def: &MessageDef) {
        let name = to_cident(&def.name);
        let mut out = format!("struct {name} {{\n  union {{\n");
        out.push_str(&format!("    uint8_t bytes[{}];\n", flag_bytes(def.fields.len())));
        if !def.fields.is_empty() {
            out.push_str("    struct {\n");
            for field in &def.fields {
                out.push_str(&format!(
                    "      bool {}:1;  /* = {}, {}. */\n",
                    field.name,
                    field.number,
                    field.label.as_str()
                ));
            }
            out.push_str("    } has;\n");
        }
        out.push_str("  } set_flags;\n");

        for field in &def.fields {
            out.push_str(&format!("  {} {};\n", self.member_type(field), field.name));
        }
        out.push_str(&format!("}};\nPF_DEFINE_ARRAY({name})\n\n"));
        self.output.push_str(&out);
    }

    pub(super) fn render_enum(&mut self, def: &EnumDef) {
        let name = to_cident(&def.name);
        if def.values.is_empty() {
            self.output
                .push_str(&format!("/* {} has no values. */\n\n", def.name));
            return;
        }

        let prefix = enum_prefix(&def.name);
        let constants: Vec<String> = def
            .values
            .iter()
            .map(|v| format!("  {prefix}{} = {}", to_preproc(&v.name), v.number))
            .collect();
        self.output.push_str(&format!(
            "typedef enum {name} {{\n{}\n}} {name};\n\n",
            constants.join(",\n")
        ));
    }
}

/// Bytes needed for a one-bit-per-field presence bitmap. Never zero.
fn flag_bytes(fields: usize) -> usize {
    fields.div_ceil(8).max(1)
}
