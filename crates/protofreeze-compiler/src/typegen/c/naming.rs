//! C names for schema entities.

use protofreeze_core::utils::{scope_of, to_cident, to_preproc};
use protofreeze_core::{CType, FieldDef, FieldKind, MessageId};

use super::Emitter;

/// Element type of string arrays and of singular string members.
pub(super) const STRING_TYPE: &str = "pf_string";

impl Emitter<'_> {
    /// Include guard derived from the output base.
    pub(super) fn guard(&self, suffix: &str) -> String {
        format!("{}{suffix}", to_preproc(&self.config.output_base))
    }

    pub(super) fn message_cident(&self, id: MessageId) -> String {
        to_cident(&self.schema.message(id).name)
    }

    /// Storage type of a struct member.
    pub(super) fn member_type(&self, field: &FieldDef) -> String {
        let element = self.element_type(&field.kind);
        if field.is_repeated() {
            return format!("PF_ARRAY({element})*");
        }
        match field.kind {
            FieldKind::String | FieldKind::Bytes | FieldKind::Message(_) => format!("{element}*"),
            _ => element,
        }
    }

    /// Type of one value of a field, ignoring its label.
    fn element_type(&self, kind: &FieldKind) -> String {
        match kind {
            FieldKind::Message(id) => self.message_cident(*id),
            FieldKind::String | FieldKind::Bytes => STRING_TYPE.to_string(),
            FieldKind::Scalar(t) => t.ctype().c_name().to_string(),
            FieldKind::Enum(_) => CType::Int32.c_name().to_string(),
        }
    }
}

/// Prefix of an enum's constants: its enclosing scope, upper-cased.
///
/// `pkg.Msg.Kind` gives `PKG_MSG_`, so value `FOO` becomes `PKG_MSG_FOO`.
pub(super) fn enum_prefix(enum_name: &str) -> String {
    to_preproc(scope_of(enum_name))
}
