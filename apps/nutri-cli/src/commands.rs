//! Subcommand bodies. Everything here is free of stdout/stderr so it can be
//! tested directly; `main` does the printing.

use serde::Serialize;
use tracing::{debug, info};

use nutri_core::{CompositeCache, CompositeNutrition, NutrientProfile, ProductId};

use crate::document::{Issue, RecipeDocument};
use crate::error::{CliError, CliResult};

/// One aggregated product, as printed by `nutri aggregate`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductReport {
    pub product_id: ProductId,
    pub name: String,
    pub composite: CompositeNutrition,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_100g: Option<NutrientProfile>,
}

/// Result of `nutri check`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckReport {
    pub foods: usize,
    pub products: usize,
    pub issues: Vec<Issue>,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Aggregates every product in `document`, or only `selected`.
///
/// Products repeated in the document with identical lines are computed
/// once through `cache`.
pub fn aggregate(
    document: &RecipeDocument,
    selected: Option<ProductId>,
    per_100g: bool,
    cache: &CompositeCache,
) -> CliResult<Vec<ProductReport>> {
    let records: Vec<_> = match selected {
        Some(id) => {
            let record = document
                .products
                .iter()
                .find(|record| record.id == id)
                .ok_or(CliError::UnknownProduct(id))?;
            vec![record]
        }
        None => document.products.iter().collect(),
    };

    let catalog = document.catalog();

    let reports = records
        .into_iter()
        .map(|record| {
            let product = record.to_product()?;
            let composite = cache.get_or_compute(&product, &catalog)?;
            debug!(
                product_id = %product.id,
                calories = %composite.profile.macros().calories,
                "Product aggregated"
            );
            let normalised = if per_100g { composite.per_100g()? } else { None };
            Ok(ProductReport {
                product_id: product.id,
                name: product.name,
                per_100g: normalised,
                composite,
            })
        })
        .collect::<CliResult<Vec<_>>>()?;

    let stats = cache.stats();
    info!(
        products = reports.len(),
        cache_hits = stats.hits,
        "Aggregation complete"
    );
    Ok(reports)
}

pub fn check(document: &RecipeDocument) -> CheckReport {
    CheckReport {
        foods: document.foods.len(),
        products: document.products.len(),
        issues: document.check(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{LineRecord, ProductRecord};
    use nutri_core::{Allergen, Food, Macros};

    fn document() -> (RecipeDocument, ProductId) {
        let oats = Food::new(
            "Oats",
            "40".parse().unwrap(),
            NutrientProfile::from_macros(Macros {
                calories: "150".parse().unwrap(),
                fiber: "4".parse().unwrap(),
                ..Macros::zero()
            }),
        )
        .unwrap()
        .with_allergens([Allergen::Gluten].into_iter().collect());

        let milk = Food::new(
            "Milk",
            "250".parse().unwrap(),
            NutrientProfile::from_macros(Macros {
                calories: "103".parse().unwrap(),
                ..Macros::zero()
            }),
        )
        .unwrap()
        .with_allergens([Allergen::Milk].into_iter().collect());

        let porridge = ProductRecord {
            id: ProductId::new(),
            name: "Porridge".to_string(),
            ingredients: vec![
                LineRecord {
                    food_id: oats.id,
                    quantity_grams: "60".parse().unwrap(),
                },
                LineRecord {
                    food_id: milk.id,
                    quantity_grams: "200".parse().unwrap(),
                },
            ],
        };
        let empty = ProductRecord {
            id: ProductId::new(),
            name: "Nothing".to_string(),
            ingredients: Vec::new(),
        };
        let id = porridge.id;

        let doc = RecipeDocument {
            foods: vec![oats, milk],
            products: vec![porridge, empty],
        };
        (doc, id)
    }

    #[test]
    fn test_aggregate_all_products() {
        let (doc, porridge) = document();
        let reports = aggregate(&doc, None, false, &CompositeCache::new()).unwrap();

        assert_eq!(reports.len(), 2);
        let report = &reports[0];
        assert_eq!(report.product_id, porridge);
        // 150 × 60/40 = 225.00, 103 × 200/250 = 82.40
        assert_eq!(report.composite.profile.macros().calories.to_string(), "307.40");
        assert_eq!(report.composite.allergens.to_string(), "{gluten, milk}");
        assert!(report.per_100g.is_none());
        assert!(reports[1].composite.profile.is_zero());
    }

    #[test]
    fn test_aggregate_selected_per_100g() {
        let (doc, porridge) = document();
        let reports = aggregate(&doc, Some(porridge), true, &CompositeCache::new()).unwrap();

        assert_eq!(reports.len(), 1);
        let per_100g = reports[0].per_100g.unwrap();
        // 307.40 kcal over 260 g
        assert_eq!(per_100g.macros().calories.to_string(), "118.23");
    }

    #[test]
    fn test_empty_product_has_no_per_100g() {
        let (doc, _) = document();
        let reports = aggregate(&doc, None, true, &CompositeCache::new()).unwrap();
        assert!(reports[1].per_100g.is_none());
    }

    #[test]
    fn test_unknown_product() {
        let (doc, _) = document();
        let missing = ProductId::new();
        assert!(matches!(
            aggregate(&doc, Some(missing), false, &CompositeCache::new()),
            Err(CliError::UnknownProduct(id)) if id == missing
        ));
    }

    #[test]
    fn test_missing_food_is_core_error() {
        let (mut doc, _) = document();
        doc.foods.pop();
        assert!(matches!(
            aggregate(&doc, None, false, &CompositeCache::new()),
            Err(CliError::Core(_))
        ));
    }

    #[test]
    fn test_repeated_product_is_computed_once() {
        let (mut doc, porridge) = document();
        let repeat = doc.products[0].clone();
        doc.products.push(repeat);
        let cache = CompositeCache::new();

        let reports = aggregate(&doc, None, false, &cache).unwrap();

        assert_eq!(reports.len(), 3);
        assert_eq!(reports[2].product_id, porridge);
        assert_eq!(reports[2].composite, reports[0].composite);
        assert_eq!(cache.stats().hits, 1);
    }

    #[test]
    fn test_edited_food_is_recomputed() {
        let (mut doc, porridge) = document();
        let cache = CompositeCache::new();
        let before = aggregate(&doc, Some(porridge), false, &cache).unwrap();

        // Every document catalog has the same revision; only the content differs.
        doc.foods[1].nutrients = NutrientProfile::zero();
        let after = aggregate(&doc, Some(porridge), false, &cache).unwrap();

        assert_eq!(before[0].composite.profile.macros().calories.to_string(), "307.40");
        assert_eq!(after[0].composite.profile.macros().calories.to_string(), "225.00");
        assert_eq!(cache.stats().hits, 0);
    }

    #[test]
    fn test_check_report() {
        let (mut doc, _) = document();
        assert!(check(&doc).is_clean());

        doc.foods.pop();
        let report = check(&doc);
        assert_eq!(report.foods, 1);
        assert_eq!(report.products, 2);
        assert_eq!(report.issues.len(), 1);
    }
}
