//! # Error Types
//!
//! Domain-specific error types for nutri-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  nutri-core errors (this file)                                         │
//! │  ├── CoreError           - Everything the core can return              │
//! │  ├── DataIntegrityError  - Corrupted persisted state (fatal, no retry) │
//! │  └── ValidationError     - Input validation failures                   │
//! │                                                                         │
//! │  nutri-cli errors (app)                                                │
//! │  └── CliError            - What the operator sees                      │
//! │                                                                         │
//! │  Flow: ValidationError ─┐                                              │
//! │        DataIntegrity ───┼──► CoreError ──► CliError ──► stderr         │
//! │        InvalidArgument ─┤                                              │
//! │        Overflow ────────┘                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (food id, ingredient id, field)
//! 3. Errors are enum variants, never String
//! 4. The aggregation engine itself only produces `DataIntegrity` and
//!    `Overflow`; it never returns a clamped composite

use thiserror::Error;

use crate::types::{FoodId, IngredientId};

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A caller passed a value the operation is not defined for.
    ///
    /// ## When This Occurs
    /// - A negative or zero-denominator scale factor
    /// - A malformed quantity string ("-1", "1e3", "abc")
    /// - A quantity with more integer digits than its precision allows
    ///
    /// This is a local precondition violation. The excluded CRUD layer is
    /// expected to have rejected such input already.
    #[error("Invalid argument for {field}: {reason}")]
    InvalidArgument { field: String, reason: String },

    /// Persisted state is inconsistent; the composite cannot be computed.
    #[error("Data integrity violation: {0}")]
    DataIntegrity(#[from] DataIntegrityError),

    /// A product mutation targeted a recipe line the product does not have.
    #[error("Ingredient not found: {0}")]
    IngredientNotFound(IngredientId),

    /// An aggregated amount does not fit its field's precision.
    ///
    /// The composite is not returned: a clamped total would look valid.
    #[error("Aggregated {quantity} exceeds the precision ceiling")]
    Overflow { quantity: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Shorthand for building an [`CoreError::InvalidArgument`].
    pub fn invalid_argument(field: impl Into<String>, reason: impl Into<String>) -> Self {
        CoreError::InvalidArgument {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Shorthand for building an [`CoreError::Overflow`].
    pub fn overflow(quantity: impl Into<String>) -> Self {
        CoreError::Overflow {
            quantity: quantity.into(),
        }
    }

    /// Returns true if this error indicates corrupted state.
    pub fn is_data_integrity(&self) -> bool {
        matches!(self, CoreError::DataIntegrity(_))
    }
}

// =============================================================================
// Data Integrity Error
// =============================================================================

/// Referential or structural corruption detected while aggregating.
///
/// ## User Workflow
/// ```text
/// Product "Apple Pie" ──► ingredient line #3 ──► food 7f3a... (deleted?)
///      │
///      ▼
/// catalog.food(7f3a...) == None
///      │
///      ▼
/// UnresolvedFood { ingredient_id: #3, food_id: 7f3a... }
///      │
///      ▼
/// Request fails. Not retried: re-reading the same rows gives the same answer.
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataIntegrityError {
    /// An ingredient references a food the catalog does not contain.
    #[error("ingredient {ingredient_id} references unknown food {food_id}")]
    UnresolvedFood {
        ingredient_id: IngredientId,
        food_id: FoodId,
    },

    /// A food's reference serving weight is zero.
    #[error("food {food_id} has a non-positive reference serving weight")]
    NonPositiveServing { food_id: FoodId },

    /// A per-serving scale factor was requested against a zero serving.
    #[error("reference serving weight must be positive")]
    ZeroReferenceServing,
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: String, max: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., invalid UUID, invalid grade letter).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
