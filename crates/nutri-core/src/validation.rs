//! # Validation Module
//!
//! Input validation utilities for foods, products and recipe lines.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Request handling (excluded CRUD layer)                       │
//! │  ├── Deserialization, basic shape checks                               │
//! │  └── Calls THIS MODULE before building entities                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Entity constructors (types.rs)                               │
//! │  └── Food::new, Ingredient::new, Product::add_ingredient call here too │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Aggregation engine                                           │
//! │  └── Anything that slipped through is a DataIntegrityError, not a      │
//! │      validation error: the engine never sees raw user input            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use nutri_core::validation::{validate_food_name, validate_quantity_grams};
//!
//! validate_food_name("Granny Smith apple").unwrap();
//! validate_quantity_grams("150".parse().unwrap()).unwrap();
//! ```

use crate::error::ValidationError;
use crate::quantity::Grams;
use crate::types::LetterGrade;
use crate::{MAX_INGREDIENTS_PER_PRODUCT, MAX_INGREDIENT_GRAMS, MAX_NAME_LENGTH};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(())
}

/// Validates a food name.
///
/// ## Rules
/// - Must not be empty
/// - At most 200 characters
pub fn validate_food_name(name: &str) -> ValidationResult<()> {
    validate_name("food name", name)
}

/// Validates a product name.
///
/// ## Example
/// ```rust
/// use nutri_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Apple Pie").is_ok());
/// assert!(validate_product_name("   ").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    validate_name("product name", name)
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates the quantity of a recipe line.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_INGREDIENT_GRAMS
pub fn validate_quantity_grams(quantity: Grams) -> ValidationResult<()> {
    if quantity.is_zero() {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if quantity.whole() > MAX_INGREDIENT_GRAMS
        || (quantity.whole() == MAX_INGREDIENT_GRAMS && quantity.fraction() > 0)
    {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: "0.01".to_string(),
            max: MAX_INGREDIENT_GRAMS.to_string(),
        });
    }

    Ok(())
}

/// Validates a food's reference serving weight.
///
/// ## Rules
/// - Must be positive (> 0): it is the divisor of every scale factor
pub fn validate_serving_grams(serving: Grams) -> ValidationResult<()> {
    if serving.is_zero() {
        return Err(ValidationError::MustBePositive {
            field: "reference serving".to_string(),
        });
    }

    Ok(())
}

/// Validates a processing-level grade (1 to 4).
pub fn validate_processing_level(level: u8) -> ValidationResult<()> {
    if !(1..=4).contains(&level) {
        return Err(ValidationError::OutOfRange {
            field: "processing_level".to_string(),
            min: "1".to_string(),
            max: "4".to_string(),
        });
    }

    Ok(())
}

/// Parses and validates a letter grade (A to E, case-insensitive).
///
/// ## Example
/// ```rust
/// use nutri_core::types::LetterGrade;
/// use nutri_core::validation::validate_letter_grade;
///
/// assert_eq!(validate_letter_grade("b").unwrap(), LetterGrade::B);
/// assert!(validate_letter_grade("F").is_err());
/// ```
pub fn validate_letter_grade(grade: &str) -> ValidationResult<LetterGrade> {
    match grade.trim().to_ascii_uppercase().as_str() {
        "A" => Ok(LetterGrade::A),
        "B" => Ok(LetterGrade::B),
        "C" => Ok(LetterGrade::C),
        "D" => Ok(LetterGrade::D),
        "E" => Ok(LetterGrade::E),
        _ => Err(ValidationError::NotAllowed {
            field: "letter_grade".to_string(),
            allowed: ["A", "B", "C", "D", "E"].iter().map(|s| s.to_string()).collect(),
        }),
    }
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates that one more recipe line fits in a product.
///
/// ## Rules
/// - Must not exceed MAX_INGREDIENTS_PER_PRODUCT (500)
pub fn validate_ingredient_count(current_lines: usize) -> ValidationResult<()> {
    if current_lines >= MAX_INGREDIENTS_PER_PRODUCT {
        return Err(ValidationError::OutOfRange {
            field: "ingredients".to_string(),
            min: "0".to_string(),
            max: MAX_INGREDIENTS_PER_PRODUCT.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn grams(s: &str) -> Grams {
        s.parse().unwrap()
    }

    #[test]
    fn test_validate_names() {
        assert!(validate_food_name("Apple").is_ok());
        assert!(validate_food_name("").is_err());
        assert!(validate_food_name("   ").is_err());
        assert!(validate_food_name(&"A".repeat(300)).is_err());
        assert!(validate_product_name(&"é".repeat(200)).is_ok());
    }

    #[test]
    fn test_validate_quantity_grams() {
        assert!(validate_quantity_grams(grams("0.01")).is_ok());
        assert!(validate_quantity_grams(grams("150")).is_ok());
        assert!(validate_quantity_grams(grams("100000")).is_ok());

        assert!(validate_quantity_grams(Grams::zero()).is_err());
        assert!(validate_quantity_grams(grams("100000.01")).is_err());
        assert!(validate_quantity_grams(grams("1000000")).is_err());
    }

    #[test]
    fn test_validate_serving_grams() {
        assert!(validate_serving_grams(grams("100")).is_ok());
        assert!(matches!(
            validate_serving_grams(Grams::zero()),
            Err(ValidationError::MustBePositive { .. })
        ));
    }

    #[test]
    fn test_validate_processing_level() {
        for level in 1..=4 {
            assert!(validate_processing_level(level).is_ok());
        }
        assert!(validate_processing_level(0).is_err());
        assert!(validate_processing_level(5).is_err());
    }

    #[test]
    fn test_validate_letter_grade() {
        assert_eq!(validate_letter_grade("A").unwrap(), LetterGrade::A);
        assert_eq!(validate_letter_grade(" e ").unwrap(), LetterGrade::E);
        assert!(validate_letter_grade("").is_err());
        assert!(validate_letter_grade("AB").is_err());
    }

    #[test]
    fn test_validate_ingredient_count() {
        assert!(validate_ingredient_count(0).is_ok());
        assert!(validate_ingredient_count(MAX_INGREDIENTS_PER_PRODUCT - 1).is_ok());
        assert!(validate_ingredient_count(MAX_INGREDIENTS_PER_PRODUCT).is_err());
    }
}
