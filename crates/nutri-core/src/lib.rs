//! # nutri-core: Nutritional Aggregation Engine
//!
//! This crate derives a composite product's nutrient profile and allergen
//! set from the foods it is made of. Everything here is a pure function over
//! value types: no I/O, no database, no clocks on the computation path.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Nutrition Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │            Service layer (CRUD, persistence, auth)              │   │
//! │  │     loads product lines + foods in one consistent snapshot      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ Vec<Ingredient>, CatalogSnapshot       │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ nutri-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │  ┌──────────┐ ┌───────────┐ ┌──────────┐ ┌──────────────────┐  │   │
//! │  │  │ quantity │ │ nutrients │ │ allergen │ │   aggregation    │  │   │
//! │  │  │FixedPoint│ │ Profile   │ │   Set    │ │ AggregationEngine│  │   │
//! │  │  │ScaleFactr│ │ Coverage  │ │  union   │ │ CompositeNutrit. │  │   │
//! │  │  └──────────┘ └───────────┘ └──────────┘ └──────────────────┘  │   │
//! │  │  ┌──────────┐ ┌───────────┐ ┌──────────┐ ┌──────────────────┐  │   │
//! │  │  │  types   │ │  catalog  │ │validation│ │      cache       │  │   │
//! │  │  │Food, Prod│ │ Snapshot  │ │  rules   │ │ CompositeCache   │  │   │
//! │  │  └──────────┘ └───────────┘ └──────────┘ └──────────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FLOATS • NO SHARED MUTABLE STATE IN THE ENGINE   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ CompositeNutrition                     │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              Presentation (nutri-cli, label rendering)          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`quantity`] - Fixed-point decimals and exact scale factors
//! - [`nutrients`] - Macro/mineral/vitamin profiles with coverage tracking
//! - [`allergen`] - Allergen enumeration and sets
//! - [`types`] - Domain entities (Food, Ingredient, Product)
//! - [`catalog`] - Food lookup boundary and immutable snapshots
//! - [`aggregation`] - The aggregation engine
//! - [`cache`] - Optional content-keyed result cache
//! - [`validation`] - Input rules for entity construction
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same ingredients and foods in, same composite out, bit for bit
//! 2. **Integer Arithmetic**: every amount is an integer count of 0.01 or 0.0001 units
//! 3. **Round Once**: each scaled contribution is rounded half-up exactly once
//! 4. **Explicit Errors**: missing foods and corrupt servings are typed errors, never panics
//!
//! ## Example Usage
//!
//! ```rust
//! use nutri_core::{AggregationEngine, CatalogSnapshot, Food, Macros, NutrientProfile, Product};
//!
//! let apple = Food::new(
//!     "Apple",
//!     "100".parse().unwrap(),
//!     NutrientProfile::from_macros(Macros {
//!         calories: "52".parse().unwrap(),
//!         ..Macros::zero()
//!     }),
//! )
//! .unwrap();
//!
//! let mut snack = Product::new("Apple slices").unwrap();
//! snack.add_ingredient(apple.id, "150".parse().unwrap()).unwrap();
//!
//! let catalog = CatalogSnapshot::new(1, [apple]);
//! let composite = AggregationEngine::new().aggregate_product(&snack, &catalog).unwrap();
//!
//! // 150 g of a food defined per 100 g: 52.00 × 1.5
//! assert_eq!(composite.profile.macros().calories.to_string(), "78.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod aggregation;
pub mod allergen;
pub mod cache;
pub mod catalog;
pub mod error;
pub mod nutrients;
pub mod quantity;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use aggregation::{AggregationEngine, CompositeNutrition};
pub use allergen::{Allergen, AllergenSet};
pub use cache::CompositeCache;
pub use catalog::{CatalogSnapshot, FoodCatalog};
pub use error::{CoreError, CoreResult, DataIntegrityError, ValidationError};
pub use nutrients::{Coverage, Macros, Minerals, NutrientProfile, Vitamins};
pub use quantity::{Grams, MacroAmount, MicroAmount, ScaleFactor};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum recipe lines in a single product.
///
/// ## Business Reason
/// Keeps a single aggregation bounded; no real recipe comes close.
pub const MAX_INGREDIENTS_PER_PRODUCT: usize = 500;

/// Maximum whole grams of one recipe line (100 kg).
///
/// ## Business Reason
/// A full product of `MAX_INGREDIENTS_PER_PRODUCT` lines at this weight
/// still fits in [`Grams`], so a validated recipe's total weight never
/// overflows.
pub const MAX_INGREDIENT_GRAMS: u64 = 100_000;

const _: () = assert!(
    MAX_INGREDIENT_GRAMS * MAX_INGREDIENTS_PER_PRODUCT as u64 <= Grams::MAX_UNITS / Grams::UNIT
);

/// Maximum characters in a food or product name.
pub const MAX_NAME_LENGTH: usize = 200;
