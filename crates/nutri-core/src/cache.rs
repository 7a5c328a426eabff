//! # Composite Cache
//!
//! Optional memoisation of [`CompositeNutrition`] for callers that aggregate
//! the same products repeatedly.
//!
//! ## Keying
//! ```text
//! ProductId ──► Entry { inputs, composite }
//!
//! inputs: one per recipe line, in line order
//!   (food_id, quantity, food.reference_serving, food.nutrients, food.allergens)
//!
//! get_or_compute(product, catalog):
//!   resolve every line against the catalog ── a food is missing ──► miss
//!   entry exists AND entry.inputs == inputs ──► hit
//!   otherwise ──► miss: run the engine, store on success, return
//! ```
//! The key is everything the engine reads, compared by value. Revision
//! numbers are not part of it: two snapshots or two product clones that
//! carry the same revision but differ in content get different answers.
//! A hit is tagged with the caller's product revision. Failed aggregations
//! are not stored.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};
use tracing::debug;

use crate::aggregation::{AggregationEngine, CompositeNutrition};
use crate::allergen::AllergenSet;
use crate::catalog::FoodCatalog;
use crate::error::CoreResult;
use crate::nutrients::NutrientProfile;
use crate::quantity::Grams;
use crate::types::{FoodId, Product, ProductId};

/// One recipe line and the parts of its food the engine reads.
#[derive(Debug, Clone, PartialEq, Eq)]
struct LineInput {
    food_id: FoodId,
    quantity: Grams,
    reference_serving: Grams,
    nutrients: NutrientProfile,
    allergens: AllergenSet,
}

impl LineInput {
    /// `None` if any line's food is missing from `catalog`.
    fn capture<C>(product: &Product, catalog: &C) -> Option<Vec<LineInput>>
    where
        C: FoodCatalog + ?Sized,
    {
        product
            .ingredients()
            .iter()
            .map(|line| {
                let food = catalog.food(&line.food_id)?;
                Some(LineInput {
                    food_id: line.food_id,
                    quantity: line.quantity,
                    reference_serving: food.reference_serving,
                    nutrients: food.nutrients,
                    allergens: food.allergens.clone(),
                })
            })
            .collect()
    }
}

#[derive(Debug, Clone)]
struct Entry {
    inputs: Vec<LineInput>,
    composite: CompositeNutrition,
}

/// Hit and miss counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// Thread-safe cache of derived nutrition, keyed by product id and the
/// content it was computed from.
#[derive(Debug, Default)]
pub struct CompositeCache {
    engine: AggregationEngine,
    entries: RwLock<HashMap<ProductId, Entry>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl CompositeCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached composite for `product` if it was computed from
    /// the same lines and the same food content, otherwise aggregates and
    /// stores the result.
    pub fn get_or_compute<C>(&self, product: &Product, catalog: &C) -> CoreResult<CompositeNutrition>
    where
        C: FoodCatalog + ?Sized,
    {
        let inputs = LineInput::capture(product, catalog);

        if let Some(mut composite) = inputs
            .as_deref()
            .and_then(|inputs| self.lookup(&product.id, inputs))
        {
            self.hits.fetch_add(1, Ordering::Relaxed);
            composite.product_revision = Some(product.revision());
            debug!(product_id = %product.id, revision = product.revision(), "Composite cache hit");
            return Ok(composite);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        debug!(
            product_id = %product.id,
            revision = product.revision(),
            "Composite cache miss"
        );

        let composite = self.engine.aggregate_product(product, catalog)?;

        // Aggregation succeeded, so every food resolved and `inputs` is set.
        if let Some(inputs) = inputs {
            // Cached values are immutable, so a poisoned lock holds nothing torn.
            let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
            entries.insert(
                product.id,
                Entry {
                    inputs,
                    composite: composite.clone(),
                },
            );
        }
        Ok(composite)
    }

    /// Drops the entry for `product_id`. Returns whether one existed.
    pub fn invalidate(&self, product_id: &ProductId) -> bool {
        let removed = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(product_id)
            .is_some();
        if removed {
            debug!(product_id = %product_id, "Composite cache entry invalidated");
        }
        removed
    }

    /// Drops every entry.
    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    fn lookup(&self, product_id: &ProductId, inputs: &[LineInput]) -> Option<CompositeNutrition> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries
            .get(product_id)
            .filter(|entry| entry.inputs == inputs)
            .map(|entry| entry.composite.clone())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
