use num_bigint::{BigInt, Sign};
use num_traits::{Signed, ToPrimitive, Zero};
use std::{cmp::Ordering, fmt, str::FromStr};
use thiserror::Error as ThisError;

// Plain (non-scientific) display is used while the number of padding zeros
// stays under this bound.
const PLAIN_DISPLAY_PADDING: i64 = 24;

///
/// Number
///
/// Arbitrary-precision signed decimal: `mantissa * 10^-scale`.
///
/// Invariant:
/// - the mantissa carries the sign
/// - the mantissa has no trailing decimal zeros (zero is `0` with scale `0`)
///
/// The normalized form makes derived `Eq`/`Hash` numeric equality.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Number {
    mantissa: BigInt,
    scale: i64,
}

///
/// NumberParseError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum NumberParseError {
    #[error("empty numeric literal")]
    Empty,

    #[error("invalid numeric literal '{0}'")]
    Invalid(String),

    #[error("numeric exponent out of range in '{0}'")]
    ExponentOverflow(String),
}

impl Number {
    /// Construct from a mantissa and scale, normalizing trailing zeros.
    #[must_use]
    pub fn new(mantissa: impl Into<BigInt>, scale: i64) -> Self {
        Self::normalized(mantissa.into(), scale)
    }

    #[must_use]
    pub fn zero() -> Self {
        Self {
            mantissa: BigInt::zero(),
            scale: 0,
        }
    }

    fn normalized(mut mantissa: BigInt, mut scale: i64) -> Self {
        if mantissa.is_zero() {
            return Self::zero();
        }

        let ten = BigInt::from(10u8);
        loop {
            let (quotient, remainder) = (&mantissa / &ten, &mantissa % &ten);
            if !remainder.is_zero() {
                break;
            }
            let Some(next_scale) = scale.checked_sub(1) else {
                break;
            };
            mantissa = quotient;
            scale = next_scale;
        }

        Self { mantissa, scale }
    }

    ///
    /// PARTS
    ///

    #[must_use]
    pub const fn mantissa(&self) -> &BigInt {
        &self.mantissa
    }

    #[must_use]
    pub const fn scale(&self) -> i64 {
        self.scale
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.mantissa.is_zero()
    }

    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.mantissa.is_negative()
    }

    /// Returns true if the value has no fractional component.
    #[must_use]
    pub const fn is_integral(&self) -> bool {
        self.scale <= 0
    }

    /// Significant decimal digits of `|mantissa|` as ASCII.
    #[must_use]
    pub fn significand_digits(&self) -> Vec<u8> {
        self.mantissa.magnitude().to_str_radix(10).into_bytes()
    }

    /// Exponent `e` such that `|self| = 0.d1d2..dn * 10^e`; `None` for zero.
    /// Widened past `i64` so every scale has one.
    #[must_use]
    pub fn exponent(&self) -> Option<i128> {
        (!self.is_zero()).then(|| self.wide_exponent())
    }

    /// Rebuild from sign, ASCII significand digits and exponent.
    pub(crate) fn from_digits(
        negative: bool,
        digits: &[u8],
        exponent: i128,
    ) -> Result<Self, NumberParseError> {
        let text = std::str::from_utf8(digits)
            .map_err(|_| NumberParseError::Invalid(format!("{digits:?}")))?;
        let magnitude = BigInt::parse_bytes(text.as_bytes(), 10)
            .ok_or_else(|| NumberParseError::Invalid(text.to_string()))?;
        let scale = i128::try_from(digits.len())
            .ok()
            .and_then(|len| len.checked_sub(exponent))
            .and_then(|scale| i64::try_from(scale).ok())
            .ok_or_else(|| NumberParseError::ExponentOverflow(text.to_string()))?;
        let mantissa = if negative { -magnitude } else { magnitude };

        Ok(Self::normalized(mantissa, scale))
    }

    ///
    /// CONVERSION
    ///

    /// Exact decimal expansion of a finite binary float.
    #[must_use]
    pub fn from_f64_exact(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        if value == 0.0 {
            return Some(Self::zero());
        }

        let bits = value.to_bits();
        let negative = bits >> 63 == 1;
        let exponent_bits = i64::try_from((bits >> 52) & 0x7ff).ok()?;
        let fraction = bits & 0x000f_ffff_ffff_ffff;
        let (significand, exponent) = if exponent_bits == 0 {
            (fraction, -1074)
        } else {
            (fraction | 0x0010_0000_0000_0000, exponent_bits - 1075)
        };

        let mut mantissa = BigInt::from(significand);
        let scale = if exponent >= 0 {
            mantissa <<= usize::try_from(exponent).ok()?;
            0
        } else {
            // m * 2^-k == m * 5^k / 10^k
            let k = u32::try_from(-exponent).ok()?;
            mantissa *= num_traits::pow(BigInt::from(5u8), usize::try_from(k).ok()?);
            i64::from(k)
        };
        if negative {
            mantissa = -mantissa;
        }

        Some(Self::normalized(mantissa, scale))
    }

    #[must_use]
    pub fn from_f32_exact(value: f32) -> Option<Self> {
        Self::from_f64_exact(f64::from(value))
    }

    /// Nearest double; out-of-range magnitudes become infinities.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        let text = self.scientific_text();

        text.parse::<f64>().unwrap_or_else(|_| {
            if self.is_negative() {
                f64::NEG_INFINITY
            } else {
                f64::INFINITY
            }
        })
    }

    /// Nearest float; out-of-range magnitudes become infinities.
    #[must_use]
    pub fn to_f32(&self) -> f32 {
        let text = self.scientific_text();

        text.parse::<f32>().unwrap_or_else(|_| {
            if self.is_negative() {
                f32::NEG_INFINITY
            } else {
                f32::INFINITY
            }
        })
    }

    /// Exact integral conversion; `None` if fractional or out of range.
    #[must_use]
    pub fn to_i64_exact(&self) -> Option<i64> {
        self.to_integral_bigint()?.to_i64()
    }

    #[must_use]
    pub fn to_i32_exact(&self) -> Option<i32> {
        self.to_integral_bigint()?.to_i32()
    }

    fn to_integral_bigint(&self) -> Option<BigInt> {
        if self.scale > 0 {
            return None;
        }
        let shift = usize::try_from(self.scale.checked_neg()?).ok()?;
        if shift > 64 && !self.is_zero() {
            // Far outside every fixed integer range.
            return None;
        }

        Some(&self.mantissa * num_traits::pow(BigInt::from(10u8), shift))
    }

    /// True when the shortest double representation reproduces this exact value.
    #[must_use]
    pub fn round_trips_through_f64(&self) -> bool {
        let double = self.to_f64();
        if !double.is_finite() {
            return false;
        }

        // Rust's float Display is the shortest representation that parses back.
        format!("{double:e}")
            .parse::<Self>()
            .is_ok_and(|shortest| shortest == *self)
    }

    /// Smallest step above `self` at one digit finer than its own scale.
    /// At the finest representable scale the step is one unit of that scale.
    #[must_use]
    pub fn next_up(&self) -> Self {
        match self.scale.checked_add(1) {
            Some(scale) => {
                let mantissa = &self.mantissa * BigInt::from(10u8) + BigInt::from(1u8);
                Self::normalized(mantissa, scale)
            }
            None => Self::normalized(&self.mantissa + BigInt::from(1u8), self.scale),
        }
    }

    // digits - scale, widened so it never overflows.
    fn wide_exponent(&self) -> i128 {
        i128::try_from(self.significand_digits().len()).unwrap_or(i128::MAX) - i128::from(self.scale)
    }

    fn scientific_text(&self) -> String {
        format!("{}e{}", self.mantissa, -i128::from(self.scale))
    }
}

impl Default for Number {
    fn default() -> Self {
        Self::zero()
    }
}

impl Ord for Number {
    fn cmp(&self, other: &Self) -> Ordering {
        let (left_sign, right_sign) = (self.mantissa.sign(), other.mantissa.sign());
        let sign_rank = |sign: Sign| match sign {
            Sign::Minus => 0u8,
            Sign::NoSign => 1,
            Sign::Plus => 2,
        };
        let by_sign = sign_rank(left_sign).cmp(&sign_rank(right_sign));
        if by_sign != Ordering::Equal || left_sign == Sign::NoSign {
            return by_sign;
        }

        // Same non-zero sign: magnitude order is exponent, then digit string.
        let magnitude = self
            .wide_exponent()
            .cmp(&other.wide_exponent())
            .then_with(|| self.significand_digits().cmp(&other.significand_digits()));

        if left_sign == Sign::Minus {
            magnitude.reverse()
        } else {
            magnitude
        }
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.write_str("0");
        }

        let negative = self.is_negative();
        let digits = self.mantissa.magnitude().to_str_radix(10);
        let len = i64::try_from(digits.len()).unwrap_or(i64::MAX);
        let sign = if negative { "-" } else { "" };

        if self.scale <= 0 && self.scale >= -PLAIN_DISPLAY_PADDING {
            let zeros = "0".repeat(usize::try_from(-self.scale).unwrap_or(0));
            return write!(f, "{sign}{digits}{zeros}");
        }

        if self.scale > 0 && self.scale - len <= PLAIN_DISPLAY_PADDING {
            let text = if self.scale >= len {
                let zeros = "0".repeat(usize::try_from(self.scale - len).unwrap_or(0));
                format!("0.{zeros}{digits}")
            } else {
                let split = usize::try_from(len - self.scale).unwrap_or(0);
                format!("{}.{}", &digits[..split], &digits[split..])
            };
            return write!(f, "{sign}{text}");
        }

        write!(f, "{sign}{digits}E{}", -i128::from(self.scale))
    }
}

impl FromStr for Number {
    type Err = NumberParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        if text.is_empty() {
            return Err(NumberParseError::Empty);
        }
        let invalid = || NumberParseError::Invalid(text.to_string());

        let (body, exponent) = match text.find(['e', 'E']) {
            Some(at) => {
                let exponent = text[at + 1..]
                    .parse::<i64>()
                    .map_err(|_| NumberParseError::ExponentOverflow(text.to_string()))?;
                (&text[..at], exponent)
            }
            None => (text, 0),
        };

        let (negative, unsigned) = match body.as_bytes().first() {
            Some(b'-') => (true, &body[1..]),
            Some(b'+') => (false, &body[1..]),
            _ => (false, body),
        };
        let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, ""));
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(invalid());
        }
        if !int_part.bytes().chain(frac_part.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let digits = format!("{int_part}{frac_part}");
        let magnitude = BigInt::parse_bytes(digits.as_bytes(), 10).ok_or_else(invalid)?;
        let frac_len = i64::try_from(frac_part.len())
            .map_err(|_| NumberParseError::ExponentOverflow(text.to_string()))?;
        let scale = frac_len
            .checked_sub(exponent)
            .ok_or_else(|| NumberParseError::ExponentOverflow(text.to_string()))?;
        let mantissa = if negative { -magnitude } else { magnitude };

        Ok(Self::normalized(mantissa, scale))
    }
}

macro_rules! impl_number_from_int {
    ( $( $ty:ty ),* $(,)? ) => {
        $(
            impl From<$ty> for Number {
                fn from(n: $ty) -> Self {
                    Self::normalized(BigInt::from(n), 0)
                }
            }
        )*
    };
}

impl_number_from_int!(i8, i16, i32, i64, i128, u8, u16, u32, u64, u128);

impl From<BigInt> for Number {
    fn from(n: BigInt) -> Self {
        Self::normalized(n, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(s: &str) -> Number {
        s.parse().expect("numeric literal should parse")
    }

    #[test]
    fn parse_normalizes_trailing_zeros() {
        assert_eq!(num("1.50"), num("1.5"));
        assert_eq!(num("100").scale(), -2);
        assert_eq!(num("-0.000"), Number::zero());
        assert_eq!(num("1.5e3"), Number::from(1500));
        assert_eq!(num("15E-1"), num("1.5"));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("".parse::<Number>().is_err());
        assert!("1.2.3".parse::<Number>().is_err());
        assert!("abc".parse::<Number>().is_err());
        assert!("-".parse::<Number>().is_err());
        assert!("1e".parse::<Number>().is_err());
    }

    #[test]
    fn ordering_is_numeric_across_scales() {
        let ascending = [
            "-1e40", "-12.5", "-12.4999", "-1", "-0.001", "0", "0.0001", "0.1", "0.12", "1",
            "9.99", "10", "1e40",
        ];
        for pair in ascending.windows(2) {
            assert!(num(pair[0]) < num(pair[1]), "{} < {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn display_round_trips_plain_and_scientific() {
        for text in ["0", "-1.25", "0.000123", "123000", "1E-200", "-7E300", "12345.6789"] {
            let value = num(text);
            assert_eq!(num(&value.to_string()), value, "{text}");
        }
        assert_eq!(num("1.5").to_string(), "1.5");
        assert_eq!(num("0.05").to_string(), "0.05");
    }

    #[test]
    fn exact_float_expansion() {
        assert_eq!(Number::from_f64_exact(0.5), Some(num("0.5")));
        assert_eq!(Number::from_f64_exact(-99.0), Some(Number::from(-99)));
        assert_eq!(
            Number::from_f64_exact(0.1),
            Some(num("0.1000000000000000055511151231257827021181583404541015625"))
        );
        assert_eq!(Number::from_f64_exact(f64::NAN), None);
    }

    #[test]
    fn integral_narrowing_is_exact_only() {
        assert_eq!(num("42").to_i64_exact(), Some(42));
        assert_eq!(num("4.2").to_i64_exact(), None);
        assert_eq!(num("1e30").to_i64_exact(), None);
        assert_eq!(num("3000000000").to_i32_exact(), None);
        assert_eq!(num("-2147483648").to_i32_exact(), Some(i32::MIN));
    }

    #[test]
    fn double_conversion_saturates_to_infinity() {
        assert_eq!(num("1e400").to_f64(), f64::INFINITY);
        assert_eq!(num("-1e400").to_f64(), f64::NEG_INFINITY);
        assert!((num("2.5").to_f64() - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn round_trip_through_double_detects_excess_precision() {
        assert!(num("1.5").round_trips_through_f64());
        assert!(num("0.1").round_trips_through_f64());
        assert!(!num("0.10000000000000000000001").round_trips_through_f64());
        assert!(!num("1e400").round_trips_through_f64());
    }

    #[test]
    fn next_up_is_strictly_greater() {
        for text in ["0", "-1.5", "7", "1e10", "-0.0003"] {
            let value = num(text);
            let next = value.next_up();
            assert!(next > value, "{text}");
        }
    }

    #[test]
    fn extreme_scales_keep_exponent_and_successor() {
        let finest = Number::new(7, i64::MAX);
        assert_eq!(finest.exponent(), Some(1 - i128::from(i64::MAX)));
        assert!(finest.next_up() > finest);

        let coarsest = Number::new(-3, i64::MIN);
        assert_eq!(coarsest.exponent(), Some(1 - i128::from(i64::MIN)));
        assert!(coarsest.next_up() > coarsest);
        assert!(coarsest < finest);
    }
}
