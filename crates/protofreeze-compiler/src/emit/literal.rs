//! Scalar literal formatting.

use protofreeze_core::ScalarValue;

/// Renders one scalar as source text. Must be pure: the same value always
/// yields the same text.
pub trait LiteralFormatter {
    fn format(&self, value: ScalarValue) -> String;
}

/// C99 literals, matching the storage types of the layout header.
#[derive(Clone, Copy, Debug, Default)]
pub struct CLiteralFormatter;

impl LiteralFormatter for CLiteralFormatter {
    fn format(&self, value: ScalarValue) -> String {
        match value {
            ScalarValue::Bool(b) => b.to_string(),
            // The minimum cannot be written as a negated literal.
            ScalarValue::I32(i32::MIN) => "INT32_MIN".to_string(),
            ScalarValue::I32(v) => v.to_string(),
            ScalarValue::U32(v) => format!("{v}U"),
            ScalarValue::I64(i64::MIN) => "INT64_MIN".to_string(),
            ScalarValue::I64(v) => format!("INT64_C({v})"),
            ScalarValue::U64(v) => format!("UINT64_C({v})"),
            ScalarValue::F32(v) => float(v as f64).unwrap_or_else(|| format!("{v:?}f")),
            ScalarValue::F64(v) => float(v).unwrap_or_else(|| format!("{v:?}")),
        }
    }
}

fn float(v: f64) -> Option<String> {
    let text = if v.is_nan() {
        "NAN"
    } else if v == f64::INFINITY {
        "INFINITY"
    } else if v == f64::NEG_INFINITY {
        "-INFINITY"
    } else {
        return None;
    };
    Some(text.to_string())
}
