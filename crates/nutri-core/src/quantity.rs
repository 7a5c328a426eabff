//! # Quantity Module
//!
//! Provides the `FixedPoint` type for nutrient amounts and weights, and the
//! exact rational `ScaleFactor` used to scale them.
//!
//! ## Why Integer Units?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  With binary floats:                                                    │
//! │    52.0 × (150 / 100) summed over a recipe in a different order        │
//! │    gives 78.00000000000001 one time and 77.99999999999999 the next  ❌  │
//! │                                                                         │
//! │  OUR SOLUTION: Integer units of 10^-scale                               │
//! │    calories 52.00 = 5200 units (scale 2)                               │
//! │    5200 × 15000 / 10000 = 7800 units = 78.00, exactly, every time      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Field Groups
//! | Alias         | Scale | Precision | Used for                          |
//! |---------------|-------|-----------|-----------------------------------|
//! | `MacroAmount` | 2     | 10        | kcal, grams of macro-nutrients    |
//! | `MicroAmount` | 4     | 12        | minerals, vitamins                |
//! | `Grams`       | 2     | 10        | ingredient and serving weights    |
//!
//! `Grams` is an alias of the same type as `MacroAmount`, not a distinct one.
//!
//! ## Usage
//! ```rust
//! use nutri_core::quantity::{Grams, MacroAmount, ScaleFactor};
//!
//! let calories: MacroAmount = "52.00".parse().unwrap();
//! let serving: Grams = "100".parse().unwrap();
//! let used: Grams = "150".parse().unwrap();
//!
//! let factor = ScaleFactor::per_serving(used, serving).unwrap();
//! assert_eq!(calories.scale(factor).to_string(), "78.00");
//! ```

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::marker::PhantomData;
use std::ops::{Add, AddAssign};
use std::str::FromStr;
use tracing::warn;

use crate::error::{CoreError, CoreResult, DataIntegrityError};

// =============================================================================
// Field Group Aliases
// =============================================================================

/// Macro-nutrient amount: hundredths of a gram (or kcal) per serving.
pub type MacroAmount = FixedPoint<2, 10>;

/// Mineral or vitamin amount: ten-thousandths per serving.
pub type MicroAmount = FixedPoint<4, 12>;

/// A weight in grams, to the hundredth.
pub type Grams = FixedPoint<2, 10>;

// =============================================================================
// FixedPoint Type
// =============================================================================

/// A non-negative decimal with `SCALE` fractional digits and at most
/// `PRECISION` digits in total.
///
/// ## Design Decisions
/// - **u64 (unsigned)**: quantities, never deltas; negatives are unrepresentable
/// - **Single field tuple struct**: zero-cost abstraction over u64
/// - **Const generics**: scale and precision are part of the type, so a
///   mineral amount can never be added to a macro amount by accident.
///   Weights share the macro layout, so `Grams` and `MacroAmount` are the
///   same type and nothing stops a weight being added to calories.
///
/// ```rust,compile_fail
/// use nutri_core::quantity::{MacroAmount, MicroAmount};
///
/// let mixed = MacroAmount::zero() + MicroAmount::zero();
/// ```
///
/// ## Rounding
/// Every operation that can produce digits beyond `SCALE` rounds once,
/// half-up, at the end. `+` and [`scale`](Self::scale) saturate at the
/// precision ceiling; the `checked_*` forms report it instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FixedPoint<const SCALE: u32, const PRECISION: u32>(u64);

impl<const SCALE: u32, const PRECISION: u32> FixedPoint<SCALE, PRECISION> {
    /// Number of fractional digits.
    pub const FRACTION_DIGITS: u32 = SCALE;

    /// Maximum number of digits in total.
    pub const TOTAL_DIGITS: u32 = PRECISION;

    /// Units per whole (10^SCALE).
    pub const UNIT: u64 = 10u64.pow(SCALE);

    /// Largest representable unit count (10^PRECISION - 1).
    pub const MAX_UNITS: u64 = 10u64.pow(PRECISION) - 1;

    /// Returns the zero value.
    ///
    /// ## Example
    /// ```rust
    /// use nutri_core::quantity::MacroAmount;
    ///
    /// let zero = MacroAmount::zero();
    /// assert_eq!(zero.units(), 0);
    /// assert!(zero.is_zero());
    /// ```
    #[inline]
    pub const fn zero() -> Self {
        FixedPoint(0)
    }

    /// Returns the largest representable value.
    #[inline]
    pub const fn max_value() -> Self {
        FixedPoint(Self::MAX_UNITS)
    }

    /// Creates a value from raw units of 10^-SCALE.
    ///
    /// ## Example
    /// ```rust
    /// use nutri_core::quantity::MacroAmount;
    ///
    /// let calories = MacroAmount::from_units(5200).unwrap(); // 52.00
    /// assert_eq!(calories.whole(), 52);
    /// ```
    pub fn from_units(units: u64) -> CoreResult<Self> {
        if units > Self::MAX_UNITS {
            return Err(Self::out_of_range());
        }
        Ok(FixedPoint(units))
    }

    /// Creates a value from a whole number (no fractional part).
    pub fn from_whole(whole: u64) -> CoreResult<Self> {
        whole
            .checked_mul(Self::UNIT)
            .ok_or_else(Self::out_of_range)
            .and_then(Self::from_units)
    }

    /// Returns the raw unit count.
    #[inline]
    pub const fn units(&self) -> u64 {
        self.0
    }

    /// Returns the integer part.
    #[inline]
    pub const fn whole(&self) -> u64 {
        self.0 / Self::UNIT
    }

    /// Returns the fractional part as units (always below `UNIT`).
    #[inline]
    pub const fn fraction(&self) -> u64 {
        self.0 % Self::UNIT
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is strictly positive.
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Exact addition, `None` when the result exceeds the precision ceiling.
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0
            .checked_add(other.0)
            .filter(|units| *units <= Self::MAX_UNITS)
            .map(FixedPoint)
    }

    /// Multiplies by an exact rational factor and rounds once, half-up.
    ///
    /// ## Implementation
    /// `units × numerator` is formed in 128 bits (cannot overflow: both
    /// operands are u64), divided by `denominator`, and the remainder
    /// decides the rounding: `2 × remainder ≥ denominator` rounds up.
    ///
    /// ## Example
    /// ```rust
    /// use nutri_core::quantity::{MacroAmount, ScaleFactor};
    ///
    /// let fat = MacroAmount::from_units(1).unwrap();        // 0.01
    /// let half = ScaleFactor::new(1, 2).unwrap();
    /// assert_eq!(fat.scale(half).units(), 1);               // 0.005 → 0.01
    /// ```
    pub fn scale(self, factor: ScaleFactor) -> Self {
        Self::saturate(self.scaled_units(factor), "scale")
    }

    /// Like [`scale`](Self::scale), but `None` when the rounded result
    /// exceeds the precision ceiling.
    pub fn checked_scale(self, factor: ScaleFactor) -> Option<Self> {
        u64::try_from(self.scaled_units(factor))
            .ok()
            .filter(|units| *units <= Self::MAX_UNITS)
            .map(FixedPoint)
    }

    fn scaled_units(self, factor: ScaleFactor) -> u128 {
        let product = self.0 as u128 * factor.numerator() as u128;
        let denominator = factor.denominator() as u128;
        let quotient = product / denominator;
        let remainder = product % denominator;
        if remainder * 2 >= denominator {
            quotient + 1
        } else {
            quotient
        }
    }

    fn saturate(units: u128, op: &'static str) -> Self {
        if units > Self::MAX_UNITS as u128 {
            warn!(
                op,
                scale = SCALE,
                precision = PRECISION,
                "Fixed-point result exceeds precision, saturating"
            );
            FixedPoint(Self::MAX_UNITS)
        } else {
            FixedPoint(units as u64)
        }
    }

    fn out_of_range() -> CoreError {
        CoreError::invalid_argument(
            "quantity",
            format!(
                "exceeds {} integer digits",
                PRECISION.saturating_sub(SCALE)
            ),
        )
    }

    fn malformed(input: &str) -> CoreError {
        CoreError::invalid_argument(
            "quantity",
            format!("'{}' is not a non-negative decimal number", input),
        )
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Displays exactly `SCALE` fractional digits: `52.00`, `0.0150`.
impl<const SCALE: u32, const PRECISION: u32> fmt::Display for FixedPoint<SCALE, PRECISION> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if SCALE == 0 {
            return write!(f, "{}", self.whole());
        }
        write!(
            f,
            "{}.{:0width$}",
            self.whole(),
            self.fraction(),
            width = SCALE as usize
        )
    }
}

/// Parses a plain decimal string.
///
/// Extra fractional digits are rounded half-up to `SCALE`; only the first
/// dropped digit matters for half-up rounding.
impl<const SCALE: u32, const PRECISION: u32> FromStr for FixedPoint<SCALE, PRECISION> {
    type Err = CoreError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        let (whole, fraction) = match trimmed.split_once('.') {
            Some((whole, fraction)) if !fraction.is_empty() => (whole, fraction),
            Some(_) => return Err(Self::malformed(input)),
            None => (trimmed, ""),
        };

        let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if whole.is_empty() || !all_digits(whole) || !all_digits(fraction) {
            return Err(Self::malformed(input));
        }

        let significant = whole.trim_start_matches('0');
        if significant.len() as u32 > PRECISION.saturating_sub(SCALE) {
            return Err(Self::out_of_range());
        }
        let whole: u128 = if significant.is_empty() {
            0
        } else {
            significant
                .parse::<u128>()
                .map_err(|_| Self::malformed(input))?
        };
        let whole_units = whole * Self::UNIT as u128;

        let kept: String = fraction
            .chars()
            .chain(std::iter::repeat('0'))
            .take(SCALE as usize)
            .collect();
        let fraction_units = if kept.is_empty() {
            0
        } else {
            kept.parse::<u128>().map_err(|_| Self::malformed(input))?
        };
        let round_up = fraction
            .as_bytes()
            .get(SCALE as usize)
            .map_or(false, |digit| *digit >= b'5');

        let units = whole_units + fraction_units + u128::from(round_up);
        if units > Self::MAX_UNITS as u128 {
            return Err(Self::out_of_range());
        }
        Ok(FixedPoint(units as u64))
    }
}

/// Default is zero.
impl<const SCALE: u32, const PRECISION: u32> Default for FixedPoint<SCALE, PRECISION> {
    fn default() -> Self {
        Self::zero()
    }
}

/// Exact addition; saturates at the precision ceiling.
impl<const SCALE: u32, const PRECISION: u32> Add for FixedPoint<SCALE, PRECISION> {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Self::saturate(self.0 as u128 + other.0 as u128, "add")
    }
}

/// Addition assignment (+=).
impl<const SCALE: u32, const PRECISION: u32> AddAssign for FixedPoint<SCALE, PRECISION> {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl<const SCALE: u32, const PRECISION: u32> Sum for FixedPoint<SCALE, PRECISION> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), Add::add)
    }
}

impl<const SCALE: u32, const PRECISION: u32> Serialize for FixedPoint<SCALE, PRECISION> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de, const SCALE: u32, const PRECISION: u32> Deserialize<'de>
    for FixedPoint<SCALE, PRECISION>
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(FixedPointVisitor(PhantomData))
    }
}

struct FixedPointVisitor<T>(PhantomData<T>);

impl<'de, const SCALE: u32, const PRECISION: u32> Visitor<'de>
    for FixedPointVisitor<FixedPoint<SCALE, PRECISION>>
{
    type Value = FixedPoint<SCALE, PRECISION>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "a non-negative decimal string with up to {} fractional digits",
            SCALE
        )
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        value.parse().map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        FixedPoint::from_whole(value).map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        let whole = u64::try_from(value)
            .map_err(|_| E::custom(format!("quantity must not be negative, got {}", value)))?;
        self.visit_u64(whole)
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
        Err(E::custom(format!(
            "binary float {} is not accepted, send \"{}\" as a string",
            value, value
        )))
    }
}

// =============================================================================
// Scale Factor
// =============================================================================

/// An exact, non-negative rational `numerator / denominator`.
///
/// Never pre-rounded: the only rounding happens when the factor is applied
/// to a [`FixedPoint`].
///
/// ## User Workflow
/// ```text
/// Ingredient: 150.00 g of Apple (reference serving 100.00 g)
///      │
///      ▼
/// ScaleFactor::per_serving(150.00, 100.00) ← 15000 / 10000
///      │
///      ▼
/// calories 52.00 × 15000 / 10000 = 78.00
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScaleFactor {
    numerator: u64,
    denominator: u64,
}

impl ScaleFactor {
    /// The identity factor.
    pub const ONE: ScaleFactor = ScaleFactor {
        numerator: 1,
        denominator: 1,
    };

    /// The zero factor.
    pub const ZERO: ScaleFactor = ScaleFactor {
        numerator: 0,
        denominator: 1,
    };

    /// Creates a factor from signed integers.
    ///
    /// ## Errors
    /// - Negative numerator or denominator: `InvalidArgument` (negative factor)
    /// - Zero denominator: `InvalidArgument`
    ///
    /// ## Example
    /// ```rust
    /// use nutri_core::quantity::ScaleFactor;
    ///
    /// assert!(ScaleFactor::new(3, 2).is_ok());
    /// assert!(ScaleFactor::new(-3, 2).is_err());
    /// assert!(ScaleFactor::new(3, 0).is_err());
    /// ```
    pub fn new(numerator: i64, denominator: i64) -> CoreResult<Self> {
        if numerator < 0 || denominator < 0 {
            return Err(CoreError::invalid_argument(
                "scale_factor",
                format!("{}/{} is negative", numerator, denominator),
            ));
        }
        if denominator == 0 {
            return Err(CoreError::invalid_argument(
                "scale_factor",
                "denominator must not be zero",
            ));
        }
        Ok(ScaleFactor {
            numerator: numerator as u64,
            denominator: denominator as u64,
        })
    }

    /// Creates the factor `quantity / serving`.
    ///
    /// Both weights share the same scale, so their unit counts divide
    /// exactly into the intended ratio.
    ///
    /// ## Errors
    /// A zero serving weight is [`DataIntegrityError::ZeroReferenceServing`]:
    /// a food's serving weight is positive by construction, so a zero here
    /// means the stored row is corrupt.
    pub fn per_serving(quantity: Grams, serving: Grams) -> Result<Self, DataIntegrityError> {
        if serving.is_zero() {
            return Err(DataIntegrityError::ZeroReferenceServing);
        }
        Ok(ScaleFactor {
            numerator: quantity.units(),
            denominator: serving.units(),
        })
    }

    /// Returns the numerator.
    #[inline]
    pub const fn numerator(&self) -> u64 {
        self.numerator
    }

    /// Returns the denominator (never zero).
    #[inline]
    pub const fn denominator(&self) -> u64 {
        self.denominator
    }

    /// Checks if the factor is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.numerator == 0
    }
}

impl fmt::Display for ScaleFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn macro_amount(s: &str) -> MacroAmount {
        s.parse().unwrap()
    }

    fn micro_amount(s: &str) -> MicroAmount {
        s.parse().unwrap()
    }

    #[test]
    fn test_from_units() {
        let amount = MacroAmount::from_units(1099).unwrap();
        assert_eq!(amount.units(), 1099);
        assert_eq!(amount.whole(), 10);
        assert_eq!(amount.fraction(), 99);
    }

    #[test]
    fn test_precision_ceiling() {
        assert!(MacroAmount::from_units(MacroAmount::MAX_UNITS).is_ok());
        assert!(MacroAmount::from_units(MacroAmount::MAX_UNITS + 1).is_err());
        assert!(MacroAmount::from_whole(99_999_999).is_ok());
        assert!(MacroAmount::from_whole(100_000_000).is_err());
        assert!(MicroAmount::from_whole(99_999_999).is_ok());
        assert!(MicroAmount::from_whole(u64::MAX).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(macro_amount("52").to_string(), "52.00");
        assert_eq!(macro_amount("0.5").to_string(), "0.50");
        assert_eq!(micro_amount("0.015").to_string(), "0.0150");
        assert_eq!(MacroAmount::zero().to_string(), "0.00");
    }

    #[test]
    fn test_parse_rounds_half_up() {
        assert_eq!(macro_amount("1.004").units(), 100);
        assert_eq!(macro_amount("1.005").units(), 101);
        assert_eq!(macro_amount("1.0049999").units(), 100);
        assert_eq!(micro_amount("0.00005").units(), 1);
        assert_eq!(micro_amount("0.00004").units(), 0);
        assert_eq!(macro_amount("0.999").units(), 100);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for input in ["", "-1", "+1", "1e3", "abc", "1.", ".5", "1.2.3", "1,5"] {
            let result = input.parse::<MacroAmount>();
            assert!(
                matches!(result, Err(CoreError::InvalidArgument { .. })),
                "{:?} should be rejected",
                input
            );
        }
    }

    #[test]
    fn test_parse_leading_zeros_and_ceiling() {
        assert_eq!(macro_amount("00012.30").units(), 1230);
        assert!("99999999.99".parse::<MacroAmount>().is_ok());
        assert!("100000000".parse::<MacroAmount>().is_err());
        // Rounding may push the value over the ceiling.
        assert!("99999999.995".parse::<MacroAmount>().is_err());
    }

    #[test]
    fn test_addition_is_exact() {
        let a = macro_amount("0.10");
        let b = macro_amount("0.20");
        assert_eq!((a + b).to_string(), "0.30");

        let mut total = MacroAmount::zero();
        total += a;
        total += b;
        assert_eq!(total, a + b);
    }

    #[test]
    fn test_addition_saturates() {
        let max = MacroAmount::max_value();
        assert_eq!(max + macro_amount("1"), max);
        assert_eq!(max.checked_add(macro_amount("0.01")), None);
        assert_eq!(
            macro_amount("1").checked_add(macro_amount("2")),
            Some(macro_amount("3"))
        );
    }

    #[test]
    fn test_sum() {
        let total: MacroAmount = ["1.10", "2.20", "3.30"].iter().map(|s| macro_amount(s)).sum();
        assert_eq!(total.to_string(), "6.60");
    }

    #[test]
    fn test_scale_exact() {
        let calories = macro_amount("52.00");
        let factor = ScaleFactor::per_serving(
            "150".parse().unwrap(),
            "100".parse().unwrap(),
        )
        .unwrap();
        assert_eq!(calories.scale(factor).to_string(), "78.00");
    }

    #[test]
    fn test_scale_rounds_half_up_once() {
        // 0.01 × 1/2 = 0.005 → 0.01
        assert_eq!(macro_amount("0.01").scale(ScaleFactor::new(1, 2).unwrap()).units(), 1);
        // 0.01 × 1/3 = 0.00333 → 0.00
        assert_eq!(macro_amount("0.01").scale(ScaleFactor::new(1, 3).unwrap()).units(), 0);
        // 10.00 × 1/3 = 3.3333 → 3.33
        assert_eq!(macro_amount("10").scale(ScaleFactor::new(1, 3).unwrap()).to_string(), "3.33");
        // 10.00 × 2/3 = 6.6666 → 6.67
        assert_eq!(macro_amount("10").scale(ScaleFactor::new(2, 3).unwrap()).to_string(), "6.67");
    }

    #[test]
    fn test_scale_identity_and_zero() {
        let amount = micro_amount("0.0123");
        assert_eq!(amount.scale(ScaleFactor::ONE), amount);
        assert!(amount.scale(ScaleFactor::ZERO).is_zero());
    }

    #[test]
    fn test_scale_saturates() {
        let big = MacroAmount::from_whole(50_000_000).unwrap();
        let triple = ScaleFactor::new(3, 1).unwrap();
        assert_eq!(big.scale(triple), MacroAmount::max_value());
    }

    #[test]
    fn test_checked_scale() {
        let big = MacroAmount::from_whole(50_000_000).unwrap();
        assert_eq!(big.checked_scale(ScaleFactor::new(3, 1).unwrap()), None);
        assert_eq!(
            big.checked_scale(ScaleFactor::new(1, 2).unwrap()),
            Some(MacroAmount::from_whole(25_000_000).unwrap())
        );
        let max = MacroAmount::max_value();
        assert_eq!(max.checked_scale(ScaleFactor::ONE), Some(max));
        assert_eq!(max.checked_scale(ScaleFactor::new(3, 2).unwrap()), None);
        assert_eq!(
            macro_amount("0.01").checked_scale(ScaleFactor::new(1, 2).unwrap()),
            Some(macro_amount("0.01"))
        );
    }

    #[test]
    fn test_scale_factor_rejects_negative_and_zero_denominator() {
        assert!(matches!(
            ScaleFactor::new(-1, 2),
            Err(CoreError::InvalidArgument { .. })
        ));
        assert!(matches!(
            ScaleFactor::new(1, -2),
            Err(CoreError::InvalidArgument { .. })
        ));
        assert!(matches!(
            ScaleFactor::new(1, 0),
            Err(CoreError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_per_serving_zero_serving_is_integrity_error() {
        let result = ScaleFactor::per_serving("10".parse().unwrap(), Grams::zero());
        assert_eq!(result, Err(DataIntegrityError::ZeroReferenceServing));
    }

    #[test]
    fn test_serde_uses_decimal_strings() {
        let amount = macro_amount("78.5");
        assert_eq!(serde_json::to_string(&amount).unwrap(), "\"78.50\"");

        let parsed: MacroAmount = serde_json::from_str("\"78.50\"").unwrap();
        assert_eq!(parsed, amount);

        let whole: MacroAmount = serde_json::from_str("52").unwrap();
        assert_eq!(whole.to_string(), "52.00");

        assert!(serde_json::from_str::<MacroAmount>("-1").is_err());
        assert!(serde_json::from_str::<MacroAmount>("1.5").is_err());
    }

    /// Binary floats drift on 0.1 + 0.2; integer units do not.
    #[test]
    fn test_no_float_drift_documented() {
        let tenth = macro_amount("0.1");
        let fifth = macro_amount("0.2");
        assert_eq!(tenth + fifth, macro_amount("0.3"));
        assert_ne!(0.1_f64 + 0.2_f64, 0.3_f64);
    }
}
