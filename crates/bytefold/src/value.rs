use std::fmt;

/// A tagged numeric literal as it appears in a constant pool.
///
/// Arithmetic never validates the operand tag against the operator: the
/// evaluator coerces both operands to whichever kind the operator implies
/// via [`ConstValue::as_i32`] and friends. The coercions are the narrowing
/// and widening conversions of the source runtime — float-to-int truncates
/// toward zero, saturates at the integer bounds and maps NaN to zero,
/// which is exactly what Rust `as` casts do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConstValue {
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
}

impl ConstValue {
    pub fn as_i32(self) -> i32 {
        match self {
            Self::Int(v) => v,
            Self::Long(v) => v as i32,
            Self::Float(v) => v as i32,
            Self::Double(v) => v as i32,
        }
    }

    pub fn as_i64(self) -> i64 {
        match self {
            Self::Int(v) => i64::from(v),
            Self::Long(v) => v,
            Self::Float(v) => v as i64,
            Self::Double(v) => v as i64,
        }
    }

    pub fn as_f32(self) -> f32 {
        match self {
            Self::Int(v) => v as f32,
            Self::Long(v) => v as f32,
            Self::Float(v) => v,
            Self::Double(v) => v as f32,
        }
    }

    pub fn as_f64(self) -> f64 {
        match self {
            Self::Int(v) => f64::from(v),
            Self::Long(v) => v as f64,
            Self::Float(v) => f64::from(v),
            Self::Double(v) => v,
        }
    }

    /// Interning key: kind tag plus raw bit pattern.
    ///
    /// Bit-pattern identity (rather than `==`) keeps `0.0` and `-0.0`
    /// distinct in the pool and gives NaN a stable entry.
    pub fn bits(self) -> (u8, u64) {
        match self {
            Self::Int(v) => (0, u64::from(v as u32)),
            Self::Long(v) => (1, v as u64),
            Self::Float(v) => (2, u64::from(v.to_bits())),
            Self::Double(v) => (3, v.to_bits()),
        }
    }
}

impl fmt::Display for ConstValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Long(v) => write!(f, "{v}L"),
            Self::Float(v) => write!(f, "{v}f"),
            Self::Double(v) => write!(f, "{v}d"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_to_int_truncates_toward_zero() {
        assert_eq!(ConstValue::Float(2.9).as_i32(), 2);
        assert_eq!(ConstValue::Float(-2.9).as_i32(), -2);
        assert_eq!(ConstValue::Double(7.5).as_i64(), 7);
    }

    #[test]
    fn float_to_int_saturates_and_zeroes_nan() {
        assert_eq!(ConstValue::Float(f32::NAN).as_i32(), 0);
        assert_eq!(ConstValue::Float(1e30).as_i32(), i32::MAX);
        assert_eq!(ConstValue::Double(-1e300).as_i64(), i64::MIN);
    }

    #[test]
    fn long_to_int_wraps() {
        assert_eq!(ConstValue::Long(0x1_0000_0001).as_i32(), 1);
    }

    #[test]
    fn bits_distinguish_signed_zeroes() {
        assert_ne!(ConstValue::Float(0.0).bits(), ConstValue::Float(-0.0).bits());
        assert_ne!(ConstValue::Int(0).bits(), ConstValue::Long(0).bits());
    }

    #[test]
    fn display_round_trip_suffixes() {
        assert_eq!(ConstValue::Int(-3).to_string(), "-3");
        assert_eq!(ConstValue::Long(9).to_string(), "9L");
        assert_eq!(ConstValue::Float(2.5).to_string(), "2.5f");
        assert_eq!(ConstValue::Double(1.25).to_string(), "1.25d");
    }
}
