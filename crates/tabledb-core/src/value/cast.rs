use crate::{
    error::{CoreError, ErrorOrigin},
    types::{Float32, Float64, Number, Timestamp},
    value::{Value, ValueEnum, ValueTag},
};
use tabledb_primitives::FieldKind;

// Uniform failure for a cast the value's kind cannot satisfy.
fn cast_mismatch(operation: &str, expected: ValueTag, found: &Value) -> CoreError {
    CoreError::kind_mismatch(
        ErrorOrigin::Cast,
        operation,
        expected.label(),
        found.kind_label(),
    )
}

///
/// Casting
///
/// Widening along `int → long → float → double → number` always succeeds.
/// Narrowing is limited to integral values that fit exactly; everything
/// else is a type mismatch.
///

impl Value {
    pub fn as_int(&self) -> Result<i32, CoreError> {
        match self {
            Self::Integer(v) => Ok(*v),
            Self::Long(v) => i32::try_from(*v).map_err(|_| out_of_range("as_int", self)),
            Self::Number(v) => v.to_i32_exact().ok_or_else(|| out_of_range("as_int", self)),
            other => Err(cast_mismatch("as_int", ValueTag::Integer, other)),
        }
    }

    pub fn as_long(&self) -> Result<i64, CoreError> {
        match self {
            Self::Integer(v) => Ok(i64::from(*v)),
            Self::Long(v) => Ok(*v),
            Self::Number(v) => v.to_i64_exact().ok_or_else(|| out_of_range("as_long", self)),
            other => Err(cast_mismatch("as_long", ValueTag::Long, other)),
        }
    }

    #[allow(clippy::cast_precision_loss)]
    pub fn as_float(&self) -> Result<f32, CoreError> {
        match self {
            Self::Integer(v) => Ok(*v as f32),
            Self::Long(v) => Ok(*v as f32),
            Self::Float(v) => Ok(v.get()),
            other => Err(cast_mismatch("as_float", ValueTag::Float, other)),
        }
    }

    #[allow(clippy::cast_precision_loss)]
    pub fn as_double(&self) -> Result<f64, CoreError> {
        match self {
            Self::Integer(v) => Ok(f64::from(*v)),
            Self::Long(v) => Ok(*v as f64),
            Self::Float(v) => Ok(f64::from(v.get())),
            Self::Double(v) => Ok(v.get()),
            other => Err(cast_mismatch("as_double", ValueTag::Double, other)),
        }
    }

    /// Exact decimal form of any numeric value.
    ///
    /// NUMBER has no NaN or infinities, so those fail validation.
    pub fn as_number(&self) -> Result<Number, CoreError> {
        let exact = match self {
            Self::Integer(v) => Some(Number::from(*v)),
            Self::Long(v) => Some(Number::from(*v)),
            Self::Float(v) => Number::from_f32_exact(v.get()),
            Self::Double(v) => Number::from_f64_exact(v.get()),
            Self::Number(v) => Some(v.clone()),
            other => return Err(cast_mismatch("as_number", ValueTag::Number, other)),
        };

        exact.ok_or_else(|| {
            CoreError::validation(
                ErrorOrigin::Cast,
                format!("as_number: {self} has no decimal representation"),
            )
        })
    }

    /// Lossy double conversion of any numeric value; never fails for
    /// numeric input and saturates to the infinities.
    pub fn cast_as_double(&self) -> Result<f64, CoreError> {
        match self {
            Self::Float(v) => Ok(f64::from(v.get())),
            Self::Number(v) => Ok(v.to_f64()),
            _ => self.as_double(),
        }
    }

    /// Lossy float conversion of any numeric value; never fails for
    /// numeric input and saturates to the infinities.
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn cast_as_float(&self) -> Result<f32, CoreError> {
        match self {
            Self::Double(v) => Ok(v.get() as f32),
            Self::Number(v) => Ok(v.to_f32()),
            _ => self.as_float(),
        }
    }

    /// String payload; enum values yield their symbol.
    pub fn as_string(&self) -> Result<&str, CoreError> {
        match self {
            Self::String(v) => Ok(v),
            Self::Enum(v) => Ok(v.symbol()),
            other => Err(cast_mismatch("as_string", ValueTag::String, other)),
        }
    }

    pub fn as_bool(&self) -> Result<bool, CoreError> {
        match self {
            Self::Boolean(v) => Ok(*v),
            other => Err(cast_mismatch("as_bool", ValueTag::Boolean, other)),
        }
    }

    /// Byte payload of a binary or fixed-binary value.
    pub fn as_binary(&self) -> Result<&[u8], CoreError> {
        match self {
            Self::Binary(v) | Self::FixedBinary(v) => Ok(v),
            other => Err(cast_mismatch("as_binary", ValueTag::Binary, other)),
        }
    }

    pub fn as_fixed_binary(&self) -> Result<&[u8], CoreError> {
        match self {
            Self::FixedBinary(v) => Ok(v),
            other => Err(cast_mismatch("as_fixed_binary", ValueTag::FixedBinary, other)),
        }
    }

    pub fn as_enum(&self) -> Result<&ValueEnum, CoreError> {
        match self {
            Self::Enum(v) => Ok(v),
            other => Err(cast_mismatch("as_enum", ValueTag::Enum, other)),
        }
    }

    pub fn as_timestamp(&self) -> Result<Timestamp, CoreError> {
        match self {
            Self::Timestamp(v) => Ok(*v),
            other => Err(cast_mismatch("as_timestamp", ValueTag::Timestamp, other)),
        }
    }

    pub fn as_array(&self) -> Result<&[Self], CoreError> {
        match self {
            Self::Array(v) => Ok(v),
            other => Err(cast_mismatch("as_array", ValueTag::Array, other)),
        }
    }

    pub fn as_map(&self) -> Result<&[(String, Self)], CoreError> {
        match self {
            Self::Map(v) => Ok(v),
            other => Err(cast_mismatch("as_map", ValueTag::Map, other)),
        }
    }

    pub fn as_record(&self) -> Result<&[(String, Self)], CoreError> {
        match self {
            Self::Record(v) => Ok(v),
            other => Err(cast_mismatch("as_record", ValueTag::Record, other)),
        }
    }

    /// Convert a numeric value into the numeric kind `target`.
    ///
    /// Follows the cast rules above: widening always, narrowing only when
    /// exact. Non-numeric values and targets are a type mismatch.
    pub fn cast_numeric(&self, target: FieldKind) -> Result<Self, CoreError> {
        if !self.is_numeric() {
            return Err(CoreError::kind_mismatch(
                ErrorOrigin::Cast,
                "cast_numeric",
                target,
                self.kind_label(),
            ));
        }

        match target {
            FieldKind::Integer => self.as_int().map(Self::Integer),
            FieldKind::Long => self.as_long().map(Self::Long),
            FieldKind::Float => self.as_float().map(|v| Self::Float(Float32::new(v))),
            FieldKind::Double => self.as_double().map(|v| Self::Double(Float64::new(v))),
            FieldKind::Number => self.as_number().map(Self::Number),
            other => Err(CoreError::kind_mismatch(
                ErrorOrigin::Cast,
                "cast_numeric",
                "a numeric kind",
                other,
            )),
        }
    }
}

fn out_of_range(operation: &str, value: &Value) -> CoreError {
    CoreError::type_mismatch(
        ErrorOrigin::Cast,
        format!("{operation}: {value} is not exactly representable"),
    )
}
