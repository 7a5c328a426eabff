//! # Food Catalog
//!
//! The engine's read-only view of stored foods.
//!
//! ## Snapshot Boundary
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Caller (persistence layer, repeatable-read transaction)                │
//! │                                                                         │
//! │   BEGIN ──► read product lines ──► read referenced foods ──► COMMIT     │
//! │                     │                        │                          │
//! │                     ▼                        ▼                          │
//! │              Vec<Ingredient>          CatalogSnapshot (Arc, immutable)  │
//! │                     └──────────┬─────────────┘                          │
//! │                                ▼                                        │
//! │                  AggregationEngine::aggregate (pure, no locks)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//! The engine cannot detect a torn read. Handing it ingredients and foods
//! captured at one logical point in time is the caller's job; a
//! `CatalogSnapshot` is the in-process form of that capture.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;
use std::sync::Arc;
use tracing::warn;

use crate::types::{Food, FoodId};

// =============================================================================
// FoodCatalog Trait
// =============================================================================

/// Resolves food ids to foods.
///
/// Implementations must be consistent for the duration of one aggregation
/// call: resolving the same id twice returns the same food.
pub trait FoodCatalog {
    /// Returns the food with `id`, or `None` if it is unknown.
    fn food(&self, id: &FoodId) -> Option<&Food>;
}

impl<S: BuildHasher> FoodCatalog for HashMap<FoodId, Food, S> {
    fn food(&self, id: &FoodId) -> Option<&Food> {
        self.get(id)
    }
}

impl FoodCatalog for BTreeMap<FoodId, Food> {
    fn food(&self, id: &FoodId) -> Option<&Food> {
        self.get(id)
    }
}

impl<C: FoodCatalog + ?Sized> FoodCatalog for &C {
    fn food(&self, id: &FoodId) -> Option<&Food> {
        (**self).food(id)
    }
}

impl<C: FoodCatalog + ?Sized> FoodCatalog for Arc<C> {
    fn food(&self, id: &FoodId) -> Option<&Food> {
        (**self).food(id)
    }
}

// =============================================================================
// Catalog Snapshot
// =============================================================================

/// An immutable, cheaply clonable set of foods tagged with a revision.
///
/// Cloning shares the underlying map; "updating" produces a new snapshot
/// with a higher revision and leaves existing clones untouched.
///
/// ## Example
/// ```rust
/// use nutri_core::catalog::{CatalogSnapshot, FoodCatalog};
/// use nutri_core::nutrients::NutrientProfile;
/// use nutri_core::types::Food;
///
/// let flour = Food::new("Flour", "100".parse().unwrap(), NutrientProfile::zero()).unwrap();
/// let id = flour.id;
///
/// let snapshot = CatalogSnapshot::new(7, [flour]);
/// assert_eq!(snapshot.revision(), 7);
/// assert_eq!(snapshot.food(&id).unwrap().name, "Flour");
/// ```
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    foods: Arc<HashMap<FoodId, Food>>,
    revision: u64,
}

impl CatalogSnapshot {
    /// Builds a snapshot. If two foods share an id, the later one wins.
    pub fn new(revision: u64, foods: impl IntoIterator<Item = Food>) -> Self {
        let mut map = HashMap::new();
        for food in foods {
            if let Some(previous) = map.insert(food.id, food) {
                warn!(food_id = %previous.id, "Duplicate food id in snapshot, keeping the later one");
            }
        }
        CatalogSnapshot {
            foods: Arc::new(map),
            revision,
        }
    }

    /// Returns a new snapshot with `food` inserted or replaced and the
    /// revision bumped.
    pub fn with_food(&self, food: Food) -> Self {
        let mut foods = Arc::clone(&self.foods);
        Arc::make_mut(&mut foods).insert(food.id, food);
        CatalogSnapshot {
            foods,
            revision: self.revision + 1,
        }
    }

    /// Returns a new snapshot without `id` and the revision bumped.
    pub fn without_food(&self, id: &FoodId) -> Self {
        let mut foods = Arc::clone(&self.foods);
        Arc::make_mut(&mut foods).remove(id);
        CatalogSnapshot {
            foods,
            revision: self.revision + 1,
        }
    }

    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.foods.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.foods.is_empty()
    }

    pub fn contains(&self, id: &FoodId) -> bool {
        self.foods.contains_key(id)
    }

    /// Iterates foods in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Food> {
        self.foods.values()
    }
}

impl FoodCatalog for CatalogSnapshot {
    fn food(&self, id: &FoodId) -> Option<&Food> {
        self.foods.get(id)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nutrients::NutrientProfile;

    fn food(name: &str) -> Food {
        Food::new(name, "100".parse().unwrap(), NutrientProfile::zero()).unwrap()
    }

    #[test]
    fn test_snapshot_lookup() {
        let flour = food("Flour");
        let id = flour.id;
        let snapshot = CatalogSnapshot::new(1, [flour, food("Sugar")]);

        assert_eq!(snapshot.len(), 2);
        assert!(snapshot.contains(&id));
        assert_eq!(snapshot.food(&id).unwrap().name, "Flour");
        assert!(snapshot.food(&FoodId::new()).is_none());
    }

    #[test]
    fn test_with_food_leaves_old_snapshot_untouched() {
        let mut flour = food("Flour");
        let id = flour.id;
        let v1 = CatalogSnapshot::new(1, [flour.clone()]);

        flour.name = "Wholemeal flour".to_string();
        let v2 = v1.with_food(flour);

        assert_eq!(v1.food(&id).unwrap().name, "Flour");
        assert_eq!(v2.food(&id).unwrap().name, "Wholemeal flour");
        assert_eq!(v2.revision(), 2);

        let v3 = v2.without_food(&id);
        assert!(v3.is_empty());
        assert!(v2.contains(&id));
    }

    #[test]
    fn test_duplicate_ids_keep_later() {
        let first = food("First");
        let mut second = first.clone();
        second.name = "Second".to_string();
        let snapshot = CatalogSnapshot::new(0, [first.clone(), second]);
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.food(&first.id).unwrap().name, "Second");
    }

    #[test]
    fn test_map_catalogs() {
        let flour = food("Flour");
        let id = flour.id;

        let hash: HashMap<FoodId, Food> = [(id, flour.clone())].into_iter().collect();
        let tree: BTreeMap<FoodId, Food> = [(id, flour)].into_iter().collect();

        assert!(hash.food(&id).is_some());
        assert!(tree.food(&id).is_some());
        assert!((&tree).food(&id).is_some());
    }

    #[test]
    fn test_snapshot_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CatalogSnapshot>();
    }
}
