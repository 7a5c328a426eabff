//! # Nutrients Module
//!
//! The `NutrientProfile` value object and its three sub-groups.
//!
//! ## Structure
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         NutrientProfile                                 │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Macros      │   │    Minerals     │   │    Vitamins     │       │
//! │  │   (scale 2)     │   │   (scale 4)     │   │   (scale 4)     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  calories       │   │  calcium        │   │  A  C  D  E     │       │
//! │  │  carbohydrates  │   │  iron           │   │  B1 B2 B3       │       │
//! │  │  fats           │   │  magnesium      │   │  B6 B9 B12      │       │
//! │  │  fiber          │   │  phosphorus     │   │                 │       │
//! │  │  protein        │   │  potassium      │   │                 │       │
//! │  │  salt           │   │  selenium       │   │                 │       │
//! │  │  saturated_fats │   │  sodium         │   │                 │       │
//! │  │  sugars         │   │  zinc           │   │                 │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  Coverage { minerals: bool, vitamins: bool }                           │
//! │  └── was the sub-group actually supplied, or is it zero-filled?        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Algebra
//! - `combine` is field-wise addition: commutative, associative, `zero()` is
//!   its identity
//! - `scale_by` is field-wise multiplication by an exact [`ScaleFactor`],
//!   rounded once per field
//! - `scale_by(combine(p, q), k)` equals `combine(scale_by(p, k),
//!   scale_by(q, k))` to within one unit per field
//! - `combine` and `scale_by` saturate at the precision ceiling; the
//!   aggregation engine uses `checked_combine` and `checked_scale_by`
//!
//! ## Missing Data
//! A food without mineral (or vitamin) data contributes zeros for that
//! sub-group, and its coverage flag is `false`. `combine` ANDs the flags, so
//! a composite built from even one incomplete food reports the sub-group as
//! incomplete instead of passing unknown values off as zero.

use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::Add;

use crate::error::CoreResult;
use crate::quantity::{MacroAmount, MicroAmount, ScaleFactor};

// =============================================================================
// Sub-Group Definitions
// =============================================================================

/// Declares a nutrient sub-group struct and its field-wise operations.
macro_rules! nutrient_group {
    (
        $(#[$meta:meta])*
        $name:ident: $amount:ty {
            $( $(#[$field_meta:meta])* $field:ident ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(default)]
        pub struct $name {
            $( $(#[$field_meta])* pub $field: $amount, )+
        }

        impl $name {
            /// All fields zero.
            pub const fn zero() -> Self {
                $name { $( $field: <$amount>::zero(), )+ }
            }

            /// Field-wise addition.
            pub fn combine(&self, other: &Self) -> Self {
                $name { $( $field: self.$field + other.$field, )+ }
            }

            /// Field-wise multiplication, each field rounded half-up once.
            pub fn scale_by(&self, factor: ScaleFactor) -> Self {
                $name { $( $field: self.$field.scale(factor), )+ }
            }

            /// Field-wise addition, `None` if any field overflows.
            pub fn checked_combine(&self, other: &Self) -> Option<Self> {
                Some($name { $( $field: self.$field.checked_add(other.$field)?, )+ })
            }

            /// Field-wise multiplication, `None` if any field overflows.
            pub fn checked_scale_by(&self, factor: ScaleFactor) -> Option<Self> {
                Some($name { $( $field: self.$field.checked_scale(factor)?, )+ })
            }

            /// Checks if every field is zero.
            pub fn is_zero(&self) -> bool {
                true $( && self.$field.is_zero() )+
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::zero()
            }
        }
    };
}

nutrient_group! {
    /// Macro-nutrients per reference serving, to the hundredth.
    Macros: MacroAmount {
        /// Energy in kcal.
        calories,
        carbohydrates,
        fats,
        fiber,
        protein,
        salt,
        saturated_fats,
        sugars,
    }
}

nutrient_group! {
    /// Minerals per reference serving, to the ten-thousandth.
    Minerals: MicroAmount {
        calcium,
        iron,
        magnesium,
        phosphorus,
        potassium,
        selenium,
        sodium,
        zinc,
    }
}

nutrient_group! {
    /// Vitamins per reference serving, to the ten-thousandth.
    Vitamins: MicroAmount {
        vitamin_a,
        vitamin_c,
        vitamin_d,
        vitamin_e,
        vitamin_b1,
        vitamin_b2,
        vitamin_b3,
        vitamin_b6,
        vitamin_b9,
        vitamin_b12,
    }
}

// =============================================================================
// Coverage
// =============================================================================

/// Which micro-nutrient sub-groups hold supplied (not zero-filled) data.
///
/// Macros are always present and carry no flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coverage {
    pub minerals: bool,
    pub vitamins: bool,
}

impl Coverage {
    /// Every sub-group supplied.
    pub const FULL: Coverage = Coverage {
        minerals: true,
        vitamins: true,
    };

    /// Only macros supplied.
    pub const MACROS_ONLY: Coverage = Coverage {
        minerals: false,
        vitamins: false,
    };

    /// A composite is complete for a sub-group only if every part is.
    #[inline]
    pub const fn combine(&self, other: &Coverage) -> Coverage {
        Coverage {
            minerals: self.minerals && other.minerals,
            vitamins: self.vitamins && other.vitamins,
        }
    }

    /// Checks if all sub-groups are supplied.
    #[inline]
    pub const fn is_complete(&self) -> bool {
        self.minerals && self.vitamins
    }
}

impl Default for Coverage {
    fn default() -> Self {
        Coverage::FULL
    }
}

// =============================================================================
// Nutrient Profile
// =============================================================================

/// A full nutrient profile: macros, minerals, vitamins and their coverage.
///
/// ## Value Semantics
/// `NutrientProfile` is `Copy`; every operation returns a new profile and
/// leaves its operands untouched.
///
/// ## Example
/// ```rust
/// use nutri_core::nutrients::{Macros, NutrientProfile};
/// use nutri_core::quantity::ScaleFactor;
///
/// let apple = NutrientProfile::from_macros(Macros {
///     calories: "52".parse().unwrap(),
///     ..Macros::zero()
/// });
///
/// let one_and_a_half = apple.scale_by(ScaleFactor::new(3, 2).unwrap());
/// assert_eq!(one_and_a_half.macros().calories.to_string(), "78.00");
///
/// // Zero is the identity of combine.
/// assert_eq!(apple.combine(&NutrientProfile::zero()), apple);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "ProfileInput")]
pub struct NutrientProfile {
    macros: Macros,
    minerals: Minerals,
    vitamins: Vitamins,
    coverage: Coverage,
}

impl NutrientProfile {
    /// The identity element of [`combine`](Self::combine): all zero, full
    /// coverage.
    pub const fn zero() -> Self {
        NutrientProfile {
            macros: Macros::zero(),
            minerals: Minerals::zero(),
            vitamins: Vitamins::zero(),
            coverage: Coverage::FULL,
        }
    }

    /// Builds a profile; a `None` sub-group is zero-filled and flagged as
    /// not covered.
    pub fn new(macros: Macros, minerals: Option<Minerals>, vitamins: Option<Vitamins>) -> Self {
        NutrientProfile {
            macros,
            minerals: minerals.unwrap_or_default(),
            vitamins: vitamins.unwrap_or_default(),
            coverage: Coverage {
                minerals: minerals.is_some(),
                vitamins: vitamins.is_some(),
            },
        }
    }

    /// Builds a profile with macros only.
    pub fn from_macros(macros: Macros) -> Self {
        Self::new(macros, None, None)
    }

    /// Returns a copy with mineral data supplied.
    pub fn with_minerals(mut self, minerals: Minerals) -> Self {
        self.minerals = minerals;
        self.coverage.minerals = true;
        self
    }

    /// Returns a copy with vitamin data supplied.
    pub fn with_vitamins(mut self, vitamins: Vitamins) -> Self {
        self.vitamins = vitamins;
        self.coverage.vitamins = true;
        self
    }

    #[inline]
    pub fn macros(&self) -> &Macros {
        &self.macros
    }

    /// Mineral values; zero-filled where `coverage().minerals` is false.
    #[inline]
    pub fn minerals(&self) -> &Minerals {
        &self.minerals
    }

    /// Vitamin values; zero-filled where `coverage().vitamins` is false.
    #[inline]
    pub fn vitamins(&self) -> &Vitamins {
        &self.vitamins
    }

    #[inline]
    pub fn coverage(&self) -> Coverage {
        self.coverage
    }

    /// Field-wise addition across all three sub-groups. Total.
    pub fn combine(&self, other: &NutrientProfile) -> NutrientProfile {
        NutrientProfile {
            macros: self.macros.combine(&other.macros),
            minerals: self.minerals.combine(&other.minerals),
            vitamins: self.vitamins.combine(&other.vitamins),
            coverage: self.coverage.combine(&other.coverage),
        }
    }

    /// Field-wise multiplication by a non-negative exact factor.
    ///
    /// Negative factors cannot be expressed as a [`ScaleFactor`]; use
    /// [`scale_by_ratio`](Self::scale_by_ratio) to scale by raw integers.
    pub fn scale_by(&self, factor: ScaleFactor) -> NutrientProfile {
        NutrientProfile {
            macros: self.macros.scale_by(factor),
            minerals: self.minerals.scale_by(factor),
            vitamins: self.vitamins.scale_by(factor),
            coverage: self.coverage,
        }
    }

    /// Like [`combine`](Self::combine), but `None` if any field would
    /// exceed its precision ceiling.
    pub fn checked_combine(&self, other: &NutrientProfile) -> Option<NutrientProfile> {
        Some(NutrientProfile {
            macros: self.macros.checked_combine(&other.macros)?,
            minerals: self.minerals.checked_combine(&other.minerals)?,
            vitamins: self.vitamins.checked_combine(&other.vitamins)?,
            coverage: self.coverage.combine(&other.coverage),
        })
    }

    /// Like [`scale_by`](Self::scale_by), but `None` on overflow.
    pub fn checked_scale_by(&self, factor: ScaleFactor) -> Option<NutrientProfile> {
        Some(NutrientProfile {
            macros: self.macros.checked_scale_by(factor)?,
            minerals: self.minerals.checked_scale_by(factor)?,
            vitamins: self.vitamins.checked_scale_by(factor)?,
            coverage: self.coverage,
        })
    }

    /// Scales by `numerator / denominator`.
    ///
    /// ## Errors
    /// `InvalidArgument` for a negative ratio or a zero denominator.
    pub fn scale_by_ratio(&self, numerator: i64, denominator: i64) -> CoreResult<NutrientProfile> {
        Ok(self.scale_by(ScaleFactor::new(numerator, denominator)?))
    }

    /// Checks if every value is zero (coverage is not considered).
    pub fn is_zero(&self) -> bool {
        self.macros.is_zero() && self.minerals.is_zero() && self.vitamins.is_zero()
    }
}

impl Default for NutrientProfile {
    fn default() -> Self {
        NutrientProfile::zero()
    }
}

impl Add for NutrientProfile {
    type Output = NutrientProfile;

    fn add(self, other: NutrientProfile) -> NutrientProfile {
        self.combine(&other)
    }
}

impl Sum for NutrientProfile {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(NutrientProfile::zero(), |acc, p| acc.combine(&p))
    }
}

/// Wire shape accepted on input: sub-groups may be omitted, and an explicit
/// coverage (from a previously serialized composite) can only narrow what
/// presence implies.
#[derive(Deserialize)]
struct ProfileInput {
    #[serde(default)]
    macros: Macros,
    #[serde(default)]
    minerals: Option<Minerals>,
    #[serde(default)]
    vitamins: Option<Vitamins>,
    #[serde(default)]
    coverage: Option<Coverage>,
}

impl From<ProfileInput> for NutrientProfile {
    fn from(input: ProfileInput) -> Self {
        let profile = NutrientProfile::new(input.macros, input.minerals, input.vitamins);
        match input.coverage {
            Some(declared) => NutrientProfile {
                coverage: profile.coverage.combine(&declared),
                ..profile
            },
            None => profile,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
