//! # Aggregation Engine
//!
//! Derives a product's composite nutrient profile and allergen set from its
//! recipe lines.
//!
//! ## Algorithm
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      aggregate(ingredients, catalog)                    │
//! │                                                                         │
//! │  Phase 1: RESOLVE (may fail, no arithmetic yet)                        │
//! │  ─────────────────────────────────────────────                         │
//! │  for each line i:                                                       │
//! │      food_i   = catalog.food(line_i.food_id)   ── None ─► Unresolved   │
//! │      factor_i = q_i / w_i  (exact rational)    ── w=0  ─► NonPositive  │
//! │                                                                         │
//! │  Phase 2: FOLD (checked, order-independent)                            │
//! │  ─────────────────────────────────────────                             │
//! │  profile   = zero()  ⊕ scale_by(P_1, k_1) ⊕ ... ⊕ scale_by(P_n, k_n)   │
//! │  allergens = ∅       ∪ A_1 ∪ ... ∪ A_n                                 │
//! │  any field past its ceiling ──► Overflow                               │
//! │                                                                         │
//! │  Empty product ──► (zero(), ∅): valid, not an error                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each contribution is rounded once (inside `scale_by`), then summed
//! exactly, so the fold is commutative and associative and the result does
//! not depend on ingredient order. Partial sums only grow, so whether the
//! fold overflows does not depend on the order either.
//!
//! ## Concurrency
//! The engine holds no state. Calls can run on any number of threads at
//! once; see [`crate::catalog`] for the snapshot the caller must supply.

use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span};

use crate::allergen::AllergenSet;
use crate::catalog::FoodCatalog;
use crate::error::{CoreError, CoreResult, DataIntegrityError};
use crate::nutrients::{Coverage, NutrientProfile};
use crate::quantity::{Grams, ScaleFactor};
use crate::types::{Food, Ingredient, Product};

/// Grams in the normalisation basis of [`CompositeNutrition::per_100g`].
const PER_100G_BASIS: u64 = 100;

// =============================================================================
// Composite Result
// =============================================================================

/// The derived nutrition of a product.
///
/// Never a source of truth: recompute it whenever the product's revision or
/// the catalog changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositeNutrition {
    /// Sum of every line's scaled profile.
    pub profile: NutrientProfile,

    /// Union of every referenced food's allergens.
    pub allergens: AllergenSet,

    /// Number of recipe lines folded.
    pub ingredient_count: usize,

    /// Sum of the lines' gram quantities.
    pub total_weight: Grams,

    /// Product revision this was computed from, when known.
    #[serde(default)]
    pub product_revision: Option<u64>,
}

impl CompositeNutrition {
    /// The composite of a product with no recipe lines.
    pub fn empty() -> Self {
        CompositeNutrition {
            profile: NutrientProfile::zero(),
            allergens: AllergenSet::zero(),
            ingredient_count: 0,
            total_weight: Grams::zero(),
            product_revision: None,
        }
    }

    /// Which micro-nutrient groups every contributing food supplied.
    pub fn coverage(&self) -> Coverage {
        self.profile.coverage()
    }

    /// The composite profile normalised to 100 g of finished product.
    ///
    /// Returns `Ok(None)` for a product with no weight.
    ///
    /// ## Errors
    /// `Overflow` when scaling a light product up to 100 g exceeds a
    /// field's ceiling.
    ///
    /// ## Example
    /// 250 g of dough with 900.00 kcal in total ⇒ 360.00 kcal per 100 g.
    pub fn per_100g(&self) -> CoreResult<Option<NutrientProfile>> {
        if self.total_weight.is_zero() {
            return Ok(None);
        }
        let basis = Grams::from_whole(PER_100G_BASIS)?;
        let factor = ScaleFactor::per_serving(basis, self.total_weight)?;
        self.profile
            .checked_scale_by(factor)
            .map(Some)
            .ok_or_else(|| CoreError::overflow("per-100 g profile"))
    }
}

impl Default for CompositeNutrition {
    fn default() -> Self {
        Self::empty()
    }
}

// =============================================================================
// Engine
// =============================================================================

/// Stateless aggregation engine.
///
/// ## Example
/// ```rust
/// use nutri_core::aggregation::AggregationEngine;
/// use nutri_core::catalog::CatalogSnapshot;
/// use nutri_core::nutrients::{Macros, NutrientProfile};
/// use nutri_core::types::{Food, Product};
///
/// let apple = Food::new(
///     "Apple",
///     "100".parse().unwrap(),
///     NutrientProfile::from_macros(Macros {
///         calories: "52".parse().unwrap(),
///         ..Macros::zero()
///     }),
/// )
/// .unwrap();
///
/// let mut sauce = Product::new("Apple sauce").unwrap();
/// sauce.add_ingredient(apple.id, "150".parse().unwrap()).unwrap();
///
/// let catalog = CatalogSnapshot::new(1, [apple]);
/// let composite = AggregationEngine::new().aggregate_product(&sauce, &catalog).unwrap();
///
/// assert_eq!(composite.profile.macros().calories.to_string(), "78.00");
/// assert_eq!(composite.product_revision, Some(1));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct AggregationEngine;

impl AggregationEngine {
    pub fn new() -> Self {
        AggregationEngine
    }

    /// Aggregates a set of recipe lines.
    ///
    /// ## Errors
    /// - [`DataIntegrityError`] (wrapped in `CoreError`) if a line references
    ///   a food the catalog cannot resolve, or a food with a zero serving
    ///   weight. Every line is resolved before any arithmetic runs.
    /// - `CoreError::Overflow` if a contribution, a profile total or the
    ///   total weight exceeds its precision ceiling.
    ///
    /// A failure never leaves a partial result behind.
    pub fn aggregate<C>(&self, ingredients: &[Ingredient], catalog: &C) -> CoreResult<CompositeNutrition>
    where
        C: FoodCatalog + ?Sized,
    {
        let span = debug_span!("aggregate", lines = ingredients.len());
        let _guard = span.enter();

        let resolved = ingredients
            .iter()
            .map(|line| Self::resolve(line, catalog))
            .collect::<Result<Vec<_>, DataIntegrityError>>()?;

        let composite = resolved.iter().try_fold(
            CompositeNutrition::empty(),
            |acc, (line, food, factor)| -> CoreResult<CompositeNutrition> {
                let contribution = food
                    .nutrients
                    .checked_scale_by(*factor)
                    .ok_or_else(|| CoreError::overflow(format!("contribution of food {}", food.id)))?;
                Ok(CompositeNutrition {
                    profile: acc
                        .profile
                        .checked_combine(&contribution)
                        .ok_or_else(|| CoreError::overflow("nutrient profile"))?,
                    allergens: acc.allergens.union(&food.allergens),
                    ingredient_count: acc.ingredient_count + 1,
                    total_weight: acc
                        .total_weight
                        .checked_add(line.quantity)
                        .ok_or_else(|| CoreError::overflow("total weight"))?,
                    product_revision: None,
                })
            },
        )?;

        debug!(
            lines = composite.ingredient_count,
            total_weight = %composite.total_weight,
            calories = %composite.profile.macros().calories,
            allergens = composite.allergens.len(),
            complete = composite.coverage().is_complete(),
            "Aggregated composite nutrition"
        );
        Ok(composite)
    }

    /// Aggregates a product and tags the result with its revision.
    pub fn aggregate_product<C>(&self, product: &Product, catalog: &C) -> CoreResult<CompositeNutrition>
    where
        C: FoodCatalog + ?Sized,
    {
        debug!(product_id = %product.id, revision = product.revision(), "Aggregating product");
        let mut composite = self.aggregate(product.ingredients(), catalog)?;
        composite.product_revision = Some(product.revision());
        Ok(composite)
    }

    fn resolve<'a, C>(
        line: &'a Ingredient,
        catalog: &'a C,
    ) -> Result<(&'a Ingredient, &'a Food, ScaleFactor), DataIntegrityError>
    where
        C: FoodCatalog + ?Sized,
    {
        let food = catalog
            .food(&line.food_id)
            .ok_or(DataIntegrityError::UnresolvedFood {
                ingredient_id: line.id,
                food_id: line.food_id,
            })?;
        let factor = line.scale_factor(food)?;
        Ok((line, food, factor))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
