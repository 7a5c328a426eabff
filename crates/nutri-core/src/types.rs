//! # Domain Types
//!
//! Entities the aggregation engine reads: foods, recipe lines, products.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   owns 0..n   ┌─────────────────┐                 │
//! │  │    Product      │──────────────►│   Ingredient    │                 │
//! │  │  ─────────────  │               │  ─────────────  │                 │
//! │  │  id (UUID)      │               │  id (UUID)      │                 │
//! │  │  name           │               │  food_id ───────┼──┐ references   │
//! │  │  revision       │               │  quantity (g)   │  │ (shared)     │
//! │  └─────────────────┘               └─────────────────┘  │              │
//! │                                                          ▼              │
//! │                                    ┌─────────────────────────────┐     │
//! │                                    │           Food              │     │
//! │                                    │  ─────────────────────────  │     │
//! │                                    │  reference_serving (g)      │     │
//! │                                    │  nutrients: NutrientProfile │     │
//! │                                    │  allergens: AllergenSet     │     │
//! │                                    │  classification (info only) │     │
//! │                                    └─────────────────────────────┘     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Derived, Never Stored
//! A product's nutrition is a function of its ingredient lines and the foods
//! they reference. Every mutation of the ingredient list bumps
//! `Product::revision`, which is the key a caller uses to know a previously
//! computed composite is stale.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::allergen::AllergenSet;
use crate::error::{CoreError, CoreResult, DataIntegrityError, ValidationError};
use crate::nutrients::NutrientProfile;
use crate::quantity::{Grams, ScaleFactor};
use crate::validation;

// =============================================================================
// Identifiers
// =============================================================================

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generates a new random (v4) identifier.
            pub fn new() -> Self {
                $name(Uuid::new_v4())
            }

            #[inline]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                $name(uuid)
            }

            #[inline]
            pub const fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s.trim())
                    .map($name)
                    .map_err(|_| ValidationError::InvalidFormat {
                        field: $field.to_string(),
                        reason: "must be a valid UUID".to_string(),
                    })
            }
        }
    };
}

entity_id! {
    /// Identifier of a [`Food`].
    FoodId, "food_id"
}

entity_id! {
    /// Identifier of a [`Product`].
    ProductId, "product_id"
}

entity_id! {
    /// Identifier of an [`Ingredient`] line.
    IngredientId, "ingredient_id"
}

// =============================================================================
// Classification
// =============================================================================

/// Processing-level grade, 1 (unprocessed) to 4 (ultra-processed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ProcessingLevel(u8);

impl ProcessingLevel {
    #[inline]
    pub const fn level(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for ProcessingLevel {
    type Error = ValidationError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        validation::validate_processing_level(level)?;
        Ok(ProcessingLevel(level))
    }
}

impl From<ProcessingLevel> for u8 {
    fn from(level: ProcessingLevel) -> u8 {
        level.0
    }
}

/// Front-of-pack letter grade, A (best) to E.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LetterGrade {
    A,
    B,
    C,
    D,
    E,
}

impl FromStr for LetterGrade {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validation::validate_letter_grade(s)
    }
}

impl fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            LetterGrade::A => "A",
            LetterGrade::B => "B",
            LetterGrade::C => "C",
            LetterGrade::D => "D",
            LetterGrade::E => "E",
        };
        f.write_str(letter)
    }
}

/// Per-food classification metrics.
///
/// Informational only: aggregation never reads these, and a composite
/// product carries no merged classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub processing_level: ProcessingLevel,
    pub letter_grade: LetterGrade,
}

// =============================================================================
// Food
// =============================================================================

/// A base ingredient with nutrition defined for a reference serving.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Food {
    /// Unique identifier (UUID v4).
    pub id: FoodId,

    /// Display name.
    pub name: String,

    /// Gram weight the nutrient values are defined for. Positive by
    /// construction; a zero read back from storage is a data integrity error.
    pub reference_serving: Grams,

    /// Nutrients per reference serving.
    pub nutrients: NutrientProfile,

    /// Allergens this food contains.
    #[serde(default)]
    pub allergens: AllergenSet,

    /// Classification metrics, if graded.
    #[serde(default)]
    pub classification: Option<Classification>,

    /// Bumped whenever nutrients, allergens or serving weight change.
    #[serde(default)]
    pub revision: u64,

    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,

    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Food {
    /// Creates a food after validating its name and serving weight.
    pub fn new(
        name: impl Into<String>,
        reference_serving: Grams,
        nutrients: NutrientProfile,
    ) -> CoreResult<Self> {
        let name = name.into();
        validation::validate_food_name(&name)?;
        validation::validate_serving_grams(reference_serving)?;

        let now = Utc::now();
        Ok(Food {
            id: FoodId::new(),
            name,
            reference_serving,
            nutrients,
            allergens: AllergenSet::zero(),
            classification: None,
            revision: 0,
            created_at: now,
            updated_at: now,
        })
    }

    /// Returns the food with the given allergens.
    pub fn with_allergens(mut self, allergens: AllergenSet) -> Self {
        self.allergens = allergens;
        self
    }

    /// Returns the food with the given classification.
    pub fn with_classification(mut self, classification: Classification) -> Self {
        self.classification = Some(classification);
        self
    }

    /// Replaces the nutrient profile.
    pub fn set_nutrients(&mut self, nutrients: NutrientProfile) {
        self.nutrients = nutrients;
        self.touch();
    }

    /// Replaces the allergen set.
    pub fn set_allergens(&mut self, allergens: AllergenSet) {
        self.allergens = allergens;
        self.touch();
    }

    /// Changes the reference serving weight.
    pub fn set_reference_serving(&mut self, serving: Grams) -> CoreResult<()> {
        validation::validate_serving_grams(serving)?;
        self.reference_serving = serving;
        self.touch();
        Ok(())
    }

    /// Factor converting this food's per-serving values to `quantity` grams.
    pub fn factor_for(&self, quantity: Grams) -> Result<ScaleFactor, DataIntegrityError> {
        ScaleFactor::per_serving(quantity, self.reference_serving)
            .map_err(|_| DataIntegrityError::NonPositiveServing { food_id: self.id })
    }

    fn touch(&mut self) {
        self.revision += 1;
        self.updated_at = Utc::now();
    }
}

// =============================================================================
// Ingredient
// =============================================================================

/// A recipe line: `quantity` grams of a food inside a product.
///
/// Does not own the food; many lines (across many products) may reference
/// the same one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    #[serde(default)]
    pub id: IngredientId,
    pub food_id: FoodId,
    #[serde(alias = "quantity_grams")]
    pub quantity: Grams,
}

impl Ingredient {
    /// Creates a recipe line after validating the quantity.
    pub fn new(food_id: FoodId, quantity: Grams) -> CoreResult<Self> {
        validation::validate_quantity_grams(quantity)?;
        Ok(Ingredient {
            id: IngredientId::new(),
            food_id,
            quantity,
        })
    }

    /// The exact factor `quantity / food.reference_serving`.
    ///
    /// ## Errors
    /// - `UnresolvedFood` if `food` is not the food this line references
    /// - `NonPositiveServing` if the food's serving weight is zero
    pub fn scale_factor(&self, food: &Food) -> Result<ScaleFactor, DataIntegrityError> {
        if food.id != self.food_id {
            return Err(DataIntegrityError::UnresolvedFood {
                ingredient_id: self.id,
                food_id: self.food_id,
            });
        }
        food.factor_for(self.quantity)
    }

    /// This line's share of the composite profile.
    pub fn contribution(&self, food: &Food) -> Result<NutrientProfile, DataIntegrityError> {
        Ok(food.nutrients.scale_by(self.scale_factor(food)?))
    }
}

// =============================================================================
// Product
// =============================================================================

/// A composite item made of ingredient lines.
///
/// ## Invariants
/// - Owns its ingredient lines exclusively
/// - `revision` increases on every ingredient-list mutation
/// - Nutrition is never stored here; see [`crate::aggregation`]
///
/// Deserialization goes through the same name, quantity and line-count
/// rules as [`Product::new`] and [`Product::add_ingredient`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ProductRecord")]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: ProductId,

    /// Display name.
    pub name: String,

    ingredients: Vec<Ingredient>,

    revision: u64,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

/// Serialized form of a [`Product`], validated on conversion.
#[derive(Deserialize)]
struct ProductRecord {
    id: ProductId,
    name: String,
    #[serde(default)]
    ingredients: Vec<Ingredient>,
    #[serde(default)]
    revision: u64,
    #[serde(default = "Utc::now")]
    created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProductRecord> for Product {
    type Error = CoreError;

    fn try_from(record: ProductRecord) -> CoreResult<Self> {
        validation::validate_product_name(&record.name)?;
        if let Some(last) = record.ingredients.len().checked_sub(1) {
            validation::validate_ingredient_count(last)?;
        }
        for line in &record.ingredients {
            validation::validate_quantity_grams(line.quantity)?;
        }

        Ok(Product {
            id: record.id,
            name: record.name,
            ingredients: record.ingredients,
            revision: record.revision,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }
}

impl Product {
    /// Creates an empty product.
    pub fn new(name: impl Into<String>) -> CoreResult<Self> {
        let name = name.into();
        validation::validate_product_name(&name)?;

        let now = Utc::now();
        Ok(Product {
            id: ProductId::new(),
            name,
            ingredients: Vec::new(),
            revision: 0,
            created_at: now,
            updated_at: now,
        })
    }

    /// The recipe lines. Order carries no meaning.
    #[inline]
    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }

    /// Ingredient-list revision.
    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Finds a recipe line by id.
    pub fn ingredient(&self, id: IngredientId) -> Option<&Ingredient> {
        self.ingredients.iter().find(|line| line.id == id)
    }

    /// Adds a recipe line and returns its id.
    pub fn add_ingredient(&mut self, food_id: FoodId, quantity: Grams) -> CoreResult<IngredientId> {
        validation::validate_ingredient_count(self.ingredients.len())?;
        let line = Ingredient::new(food_id, quantity)?;
        let id = line.id;
        self.ingredients.push(line);
        self.touch();
        Ok(id)
    }

    /// Removes a recipe line.
    pub fn remove_ingredient(&mut self, id: IngredientId) -> CoreResult<Ingredient> {
        let index = self
            .ingredients
            .iter()
            .position(|line| line.id == id)
            .ok_or(CoreError::IngredientNotFound(id))?;
        let removed = self.ingredients.swap_remove(index);
        self.touch();
        Ok(removed)
    }

    /// Changes the quantity of a recipe line.
    pub fn set_quantity(&mut self, id: IngredientId, quantity: Grams) -> CoreResult<()> {
        validation::validate_quantity_grams(quantity)?;
        let line = self
            .ingredients
            .iter_mut()
            .find(|line| line.id == id)
            .ok_or(CoreError::IngredientNotFound(id))?;
        line.quantity = quantity;
        self.touch();
        Ok(())
    }

    fn touch(&mut self) {
        self.revision += 1;
        self.updated_at = Utc::now();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
