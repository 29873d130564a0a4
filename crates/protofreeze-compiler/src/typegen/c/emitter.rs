//! Core emitter struct and top-level layout.

use protofreeze_core::Schema;

use super::Config;

/// C header emitter for one schema.
pub struct Emitter<'a> {
    pub(super) schema: &'a Schema,
    pub(super) config: Config,
    /// Output buffer
    pub(super) output: String,
}

impl<'a> Emitter<'a> {
    pub fn new(schema: &'a Schema, config: Config) -> Self {
        Self {
            schema,
            config,
            output: String::new(),
        }
    }

    /// Emit the layout header.
    pub fn emit_layout(mut self) -> String {
        let schema = self.schema;
        let guard = self.guard("_H");
        self.render_prologue(&guard, &["<math.h>", "<stdbool.h>", "<stdint.h>"]);
        self.render_runtime_support();
        self.render_forward_declarations();
        self.render_root_declaration();

        if schema.message_count() > 0 {
            self.output
                .push_str("/* The message definitions themselves. */\n\n");
        }
        for (_, def) in schema.messages() {
            self.render_message(def);
        }

        self.render_epilogue(&guard);
        self.output
    }

    /// Emit the constants header.
    pub fn emit_constants(mut self) -> String {
        let schema = self.schema;
        let guard = self.guard("_CONST_H");
        self.render_prologue(&guard, &[]);

        if schema.enum_count() > 0 {
            self.output.push_str("/* Enums. */\n\n");
        }
        for (_, def) in schema.enums() {
            self.render_enum(def);
        }

        self.render_epilogue(&guard);
        self.output
    }
}
