// Field value coercion: which host field values become f64 samples.

use crate::models::FieldValue;

/// Returns the sample value for a field, or `None` when the field is skipped.
///
/// Integers (signed or unsigned) convert to f64, losing precision above 2^53.
/// Floats pass only when finite; the datastore cannot encode NaN or ±Inf.
pub fn coerce_value(value: &FieldValue) -> Option<f64> {
    match value {
        FieldValue::UInt(u) => Some(*u as f64),
        FieldValue::Int(i) => Some(*i as f64),
        FieldValue::Float(f) if f.is_finite() => Some(*f),
        FieldValue::Float(_)
        | FieldValue::Bool(_)
        | FieldValue::String(_)
        | FieldValue::Null => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coerce_value_emits_unsigned_integers() {
        assert_eq!(coerce_value(&FieldValue::UInt(7)), Some(7.0));
        assert_eq!(coerce_value(&FieldValue::UInt(0)), Some(0.0));
    }

    #[test]
    fn coerce_value_emits_signed_integers() {
        assert_eq!(coerce_value(&FieldValue::Int(-3)), Some(-3.0));
    }

    #[test]
    fn coerce_value_large_unsigned_is_lossy() {
        let v = coerce_value(&FieldValue::UInt(u64::MAX)).unwrap();
        assert_eq!(v, u64::MAX as f64);
    }

    #[test]
    fn coerce_value_emits_finite_floats() {
        assert_eq!(coerce_value(&FieldValue::Float(0.5)), Some(0.5));
        assert_eq!(coerce_value(&FieldValue::Float(-1e300)), Some(-1e300));
    }

    #[test]
    fn coerce_value_skips_non_finite_floats() {
        assert_eq!(coerce_value(&FieldValue::Float(f64::NAN)), None);
        assert_eq!(coerce_value(&FieldValue::Float(f64::INFINITY)), None);
        assert_eq!(coerce_value(&FieldValue::Float(f64::NEG_INFINITY)), None);
    }

    #[test]
    fn coerce_value_skips_non_numeric() {
        assert_eq!(coerce_value(&FieldValue::Bool(true)), None);
        assert_eq!(coerce_value(&FieldValue::String("1.0".into())), None);
        assert_eq!(coerce_value(&FieldValue::Null), None);
    }
}
