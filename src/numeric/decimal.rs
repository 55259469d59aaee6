// ============================================================================
// Arbitrary-Precision Decimal
// Signed decimal with a bit-denominated working precision
// ============================================================================

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{Signed, ToPrimitive, Zero};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// Working precision assigned to parsed literals and widened floats.
pub const DEFAULT_PRECISION_BITS: u32 = 100;

/// Largest scale `rust_decimal::Decimal` can carry.
const RUST_DECIMAL_MAX_SCALE: i64 = 28;

/// Arbitrary-precision signed decimal number.
///
/// Stores `coefficient × 10^-scale` together with a working precision in
/// bits. The precision is turned into a decimal-digit budget of
/// `floor(bits × log10 2)` and every constructed value is rounded
/// half-to-even to at most that many significant digits.
///
/// The representation is canonical: trailing zeros are stripped from the
/// coefficient and zero is always stored as `0 × 10^0`. Equality and
/// ordering compare numeric values and ignore the working precision.
///
/// # Example
/// ```
/// use precise_calc::numeric::DecimalValue;
///
/// let a: DecimalValue = "1.5".parse().unwrap();
/// let b: DecimalValue = "2.25".parse().unwrap();
/// assert_eq!((&a + &b).to_string(), "3.75");
/// assert_eq!(a.precision(), 100);
/// ```
#[derive(Clone)]
pub struct DecimalValue {
    coefficient: BigInt,
    scale: i64,
    precision: u32,
}

// ============================================================================
// Digit/Bit Budget Helpers
// ============================================================================

/// Decimal digits representable in `bits` of binary precision: floor(bits × log10 2).
pub fn digits_for_bits(bits: u32) -> usize {
    ((u64::from(bits) * 30_103) / 100_000).max(1) as usize
}

/// Binary precision needed for `digits` decimal digits: ceil(digits × log2 10).
pub fn bits_for_digits(digits: usize) -> u32 {
    let bits = (digits as u64 * 332_193).div_ceil(100_000);
    u32::try_from(bits).unwrap_or(u32::MAX)
}

pub(crate) fn pow10(exponent: u64) -> BigInt {
    BigInt::from(10u8).pow(u32::try_from(exponent).unwrap_or(u32::MAX))
}

fn digit_count(value: &BigInt) -> usize {
    if value.is_zero() {
        1
    } else {
        value.magnitude().to_str_radix(10).len()
    }
}

/// Divide by a positive divisor, rounding half-to-even.
fn div_round_half_even(numerator: &BigInt, divisor: &BigInt) -> BigInt {
    let (quotient, remainder) = numerator.abs().div_rem(divisor);
    let rounded = match (&remainder * 2u32).cmp(divisor) {
        Ordering::Greater => quotient + 1u32,
        Ordering::Equal if quotient.is_odd() => quotient + 1u32,
        _ => quotient,
    };
    if numerator.is_negative() {
        -rounded
    } else {
        rounded
    }
}

/// Round to at most `max_digits` significant digits.
fn round_to_digits(coefficient: BigInt, scale: i64, max_digits: usize) -> (BigInt, i64) {
    let digits = digit_count(&coefficient);
    if digits <= max_digits {
        return (coefficient, scale);
    }

    let drop = (digits - max_digits) as u64;
    let mut rounded = div_round_half_even(&coefficient, &pow10(drop));
    let mut scale = scale - drop as i64;

    // 999.. rounded up to 1000..
    if digit_count(&rounded) > max_digits {
        rounded /= 10u32;
        scale -= 1;
    }
    (rounded, scale)
}

fn strip_trailing_zeros(mut coefficient: BigInt, mut scale: i64) -> (BigInt, i64) {
    if coefficient.is_zero() {
        return (coefficient, 0);
    }
    let ten = BigInt::from(10u8);
    loop {
        let (quotient, remainder) = coefficient.div_rem(&ten);
        if !remainder.is_zero() {
            break;
        }
        coefficient = quotient;
        scale -= 1;
    }
    (coefficient, scale)
}

/// Bring both coefficients to the larger scale.
fn align(lhs: &DecimalValue, rhs: &DecimalValue) -> (BigInt, BigInt, i64) {
    let scale = lhs.scale.max(rhs.scale);
    let widen = |v: &DecimalValue| {
        let shift = (scale - v.scale) as u64;
        if shift == 0 {
            v.coefficient.clone()
        } else {
            &v.coefficient * pow10(shift)
        }
    };
    (widen(lhs), widen(rhs), scale)
}

impl DecimalValue {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Create `coefficient × 10^-scale` at the given working precision.
    ///
    /// The value is rounded half-to-even to the digit budget of
    /// `precision_bits`.
    pub fn new(coefficient: BigInt, scale: i64, precision_bits: u32) -> Self {
        let (coefficient, scale) =
            round_to_digits(coefficient, scale, digits_for_bits(precision_bits));
        Self::exact(coefficient, scale, precision_bits)
    }

    /// Canonicalize without rounding.
    fn exact(coefficient: BigInt, scale: i64, precision: u32) -> Self {
        let (coefficient, scale) = strip_trailing_zeros(coefficient, scale);
        Self {
            coefficient,
            scale,
            precision,
        }
    }

    /// Zero at the default working precision.
    pub fn zero() -> Self {
        Self::exact(BigInt::zero(), 0, DEFAULT_PRECISION_BITS)
    }

    /// Create from an integer at the default working precision.
    pub fn from_integer(value: i64) -> Self {
        Self::new(BigInt::from(value), 0, DEFAULT_PRECISION_BITS)
    }

    /// Exact decimal expansion of a finite `f64`.
    ///
    /// The working precision is the default, or more when the expansion
    /// needs more digits than the default budget holds. Returns `None` for
    /// NaN and infinities.
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }

        let bits = value.to_bits();
        let negative = bits >> 63 == 1;
        let biased_exponent = ((bits >> 52) & 0x7ff) as i64;
        let fraction = bits & ((1u64 << 52) - 1);

        let (mantissa, exponent) = if biased_exponent == 0 {
            (fraction, -1074)
        } else {
            (fraction | (1u64 << 52), biased_exponent - 1075)
        };

        // mantissa × 2^exponent, and 2^-k = 5^k × 10^-k
        let (coefficient, scale) = if exponent >= 0 {
            (BigInt::from(mantissa) << exponent as usize, 0)
        } else {
            let k = (-exponent) as u32;
            (BigInt::from(mantissa) * BigInt::from(5u8).pow(k), i64::from(k))
        };
        let coefficient = if negative { -coefficient } else { coefficient };

        let (coefficient, scale) = strip_trailing_zeros(coefficient, scale);
        let precision = DEFAULT_PRECISION_BITS.max(bits_for_digits(digit_count(&coefficient)));
        Some(Self::exact(coefficient, scale, precision))
    }

    /// Re-round this value to a different working precision.
    pub fn with_precision(&self, precision_bits: u32) -> Self {
        Self::new(self.coefficient.clone(), self.scale, precision_bits)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Working precision in bits.
    #[inline]
    pub fn precision(&self) -> u32 {
        self.precision
    }

    /// Significant-digit budget implied by the working precision.
    #[inline]
    pub fn digit_budget(&self) -> usize {
        digits_for_bits(self.precision)
    }

    #[inline]
    pub fn coefficient(&self) -> &BigInt {
        &self.coefficient
    }

    #[inline]
    pub fn scale(&self) -> i64 {
        self.scale
    }

    /// Number of significant digits in the canonical coefficient.
    pub fn significant_digits(&self) -> usize {
        digit_count(&self.coefficient)
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.coefficient.is_zero()
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.coefficient.is_negative()
    }

    /// -1, 0 or 1.
    pub fn signum(&self) -> i32 {
        if self.coefficient.is_zero() {
            0
        } else if self.coefficient.is_negative() {
            -1
        } else {
            1
        }
    }

    pub fn abs(&self) -> Self {
        Self {
            coefficient: self.coefficient.abs(),
            scale: self.scale,
            precision: self.precision,
        }
    }

    // ========================================================================
    // Arithmetic
    // ========================================================================

    /// Quotient rounded to the larger working precision of the operands.
    ///
    /// Returns `None` when `rhs` is zero.
    pub fn checked_div(&self, rhs: &Self) -> Option<Self> {
        if rhs.is_zero() {
            return None;
        }
        let precision = self.precision.max(rhs.precision);
        if self.is_zero() {
            return Some(Self::exact(BigInt::zero(), 0, precision));
        }

        // Two guard digits, then a sticky digit marking a nonzero remainder
        // so half-even rounding below never mistakes an inexact tail for a tie.
        let target = digits_for_bits(precision) as i64 + 2;
        let shift = (target + digit_count(&rhs.coefficient) as i64
            - digit_count(&self.coefficient) as i64)
            .max(0);

        let numerator = &self.coefficient * pow10(shift as u64);
        let (quotient, remainder) = numerator.div_rem(&rhs.coefficient);
        let mut scale = self.scale - rhs.scale + shift;

        let quotient = if remainder.is_zero() {
            quotient
        } else {
            scale += 1;
            let sticky = if self.is_negative() != rhs.is_negative() {
                -1
            } else {
                1
            };
            quotient * 10u32 + sticky
        };

        Some(Self::new(quotient, scale, precision))
    }

    // ========================================================================
    // Conversion
    // ========================================================================

    /// Nearest `f64`, correctly rounded.
    ///
    /// Zero carries no sign, so a negative zero result narrows to `+0.0`.
    ///
    /// Magnitudes beyond the `f64` range become infinite and magnitudes
    /// below the smallest subnormal become zero.
    pub fn to_f64(&self) -> f64 {
        if self.is_zero() {
            return 0.0;
        }
        format!("{}e{}", self.coefficient, -self.scale)
            .parse()
            .unwrap_or(f64::NAN)
    }

    /// Convert to `rust_decimal::Decimal` for API boundaries.
    ///
    /// Fractional digits are rounded half-to-even until the mantissa fits
    /// in 96 bits and the scale is at most 28. Returns `None` only if the
    /// integer part does not fit.
    pub fn to_decimal(&self) -> Option<rust_decimal::Decimal> {
        let (mut mantissa, mut scale) = if self.scale < 0 {
            (&self.coefficient * pow10(self.scale.unsigned_abs()), 0)
        } else if self.scale > RUST_DECIMAL_MAX_SCALE {
            let divisor = pow10((self.scale - RUST_DECIMAL_MAX_SCALE) as u64);
            (
                div_round_half_even(&self.coefficient, &divisor),
                RUST_DECIMAL_MAX_SCALE,
            )
        } else {
            (self.coefficient.clone(), self.scale)
        };

        let ten = BigInt::from(10u8);
        loop {
            let converted = mantissa.to_i128().and_then(|m| {
                rust_decimal::Decimal::try_from_i128_with_scale(m, scale as u32).ok()
            });
            if converted.is_some() || scale == 0 {
                return converted;
            }
            mantissa = div_round_half_even(&mantissa, &ten);
            scale -= 1;
        }
    }

    /// Render with exactly `fractional_digits` digits after the point,
    /// rounding half-to-even.
    pub fn to_fixed(&self, fractional_digits: usize) -> String {
        let target = fractional_digits as i64;
        let scaled = if self.scale <= target {
            &self.coefficient * pow10((target - self.scale) as u64)
        } else {
            div_round_half_even(&self.coefficient, &pow10((self.scale - target) as u64))
        };

        let sign = if scaled.is_negative() { "-" } else { "" };
        let mut digits = scaled.magnitude().to_str_radix(10);
        if digits.len() <= fractional_digits {
            let padding = fractional_digits + 1 - digits.len();
            digits.insert_str(0, &"0".repeat(padding));
        }

        if fractional_digits == 0 {
            format!("{sign}{digits}")
        } else {
            let (integer, fraction) = digits.split_at(digits.len() - fractional_digits);
            format!("{sign}{integer}.{fraction}")
        }
    }
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl Default for DecimalValue {
    fn default() -> Self {
        Self::zero()
    }
}

impl PartialEq for DecimalValue {
    fn eq(&self, other: &Self) -> bool {
        // Canonical form makes structural comparison numeric.
        self.coefficient == other.coefficient && self.scale == other.scale
    }
}

impl Eq for DecimalValue {}

impl PartialOrd for DecimalValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DecimalValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.signum().cmp(&other.signum()) {
            Ordering::Equal => {
                let (lhs, rhs, _) = align(self, other);
                lhs.cmp(&rhs)
            },
            unequal => unequal,
        }
    }
}

impl Add for &DecimalValue {
    type Output = DecimalValue;

    fn add(self, rhs: Self) -> DecimalValue {
        let (lhs, rhs_coefficient, scale) = align(self, rhs);
        DecimalValue::new(
            lhs + rhs_coefficient,
            scale,
            self.precision.max(rhs.precision),
        )
    }
}

impl Sub for &DecimalValue {
    type Output = DecimalValue;

    fn sub(self, rhs: Self) -> DecimalValue {
        let (lhs, rhs_coefficient, scale) = align(self, rhs);
        DecimalValue::new(
            lhs - rhs_coefficient,
            scale,
            self.precision.max(rhs.precision),
        )
    }
}

impl Mul for &DecimalValue {
    type Output = DecimalValue;

    fn mul(self, rhs: Self) -> DecimalValue {
        DecimalValue::new(
            &self.coefficient * &rhs.coefficient,
            self.scale + rhs.scale,
            self.precision.max(rhs.precision),
        )
    }
}

impl Neg for &DecimalValue {
    type Output = DecimalValue;

    fn neg(self) -> DecimalValue {
        DecimalValue {
            coefficient: -&self.coefficient,
            scale: self.scale,
            precision: self.precision,
        }
    }
}

impl Neg for DecimalValue {
    type Output = DecimalValue;

    fn neg(self) -> DecimalValue {
        -&self
    }
}

impl From<rust_decimal::Decimal> for DecimalValue {
    fn from(value: rust_decimal::Decimal) -> Self {
        Self::new(
            BigInt::from(value.mantissa()),
            i64::from(value.scale()),
            DEFAULT_PRECISION_BITS,
        )
    }
}

impl From<i64> for DecimalValue {
    fn from(value: i64) -> Self {
        Self::from_integer(value)
    }
}

// ============================================================================
// Display and Debug
// ============================================================================

impl fmt::Display for DecimalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.scale <= 0 {
            return write!(f, "{}", self.to_fixed(0));
        }
        write!(f, "{}", self.to_fixed(self.scale as usize))
    }
}

impl fmt::Debug for DecimalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DecimalValue({}, scale={}, prec={})",
            self, self.scale, self.precision
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
