use protofreeze_core::ScalarValue;

use super::literal::{CLiteralFormatter, LiteralFormatter};

fn c(value: ScalarValue) -> String {
    CLiteralFormatter.format(value)
}

#[test]
fn integers() {
    assert_eq!(c(ScalarValue::I32(-42)), "-42");
    assert_eq!(c(ScalarValue::I32(i32::MIN)), "INT32_MIN");
    assert_eq!(c(ScalarValue::U32(7)), "7U");
    assert_eq!(c(ScalarValue::I64(-5)), "INT64_C(-5)");
    assert_eq!(c(ScalarValue::I64(i64::MIN)), "INT64_MIN");
    assert_eq!(c(ScalarValue::U64(u64::MAX)), "UINT64_C(18446744073709551615)");
}

#[test]
fn booleans() {
    assert_eq!(c(ScalarValue::Bool(true)), "true");
    assert_eq!(c(ScalarValue::Bool(false)), "false");
}

#[test]
fn floats_round_trip() {
    assert_eq!(c(ScalarValue::F32(1.0)), "1.0f");
    assert_eq!(c(ScalarValue::F32(0.1)), "0.1f");
    assert_eq!(c(ScalarValue::F64(2.5)), "2.5");
    assert_eq!(c(ScalarValue::F64(1e300)), "1e300");
}

#[test]
fn non_finite_floats() {
    assert_eq!(c(ScalarValue::F32(f32::NAN)), "NAN");
    assert_eq!(c(ScalarValue::F64(f64::INFINITY)), "INFINITY");
    assert_eq!(c(ScalarValue::F32(f32::NEG_INFINITY)), "-INFINITY");
}
