//! # Recipe Documents
//!
//! The JSON file `nutri` reads: a list of foods and a list of products that
//! reference them by id.
//!
//! ```json
//! {
//!   "foods": [
//!     {
//!       "id": "6f1c...",
//!       "name": "Apple",
//!       "reference_serving": "100",
//!       "nutrients": { "macros": { "calories": "52" } },
//!       "allergens": []
//!     }
//!   ],
//!   "products": [
//!     {
//!       "id": "a8e2...",
//!       "name": "Apple sauce",
//!       "ingredients": [{ "food_id": "6f1c...", "quantity_grams": "150" }]
//!     }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

use nutri_core::validation;
use nutri_core::{CatalogSnapshot, FoodCatalog, Food, FoodId, Grams, Product, ProductId};

use crate::error::{CliError, CliResult};

/// Revision given to the catalog built from a document.
const DOCUMENT_CATALOG_REVISION: u64 = 1;

// =============================================================================
// Document Shape
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipeDocument {
    #[serde(default)]
    pub foods: Vec<Food>,

    #[serde(default)]
    pub products: Vec<ProductRecord>,
}

/// A product as written in a document: name plus recipe lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    #[serde(default)]
    pub id: ProductId,

    pub name: String,

    #[serde(default)]
    pub ingredients: Vec<LineRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRecord {
    pub food_id: FoodId,

    #[serde(alias = "quantity")]
    pub quantity_grams: Grams,
}

/// One problem found by [`RecipeDocument::check`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    /// What the problem is about, e.g. `food 6f1c...`.
    pub subject: String,
    pub message: String,
}

impl Issue {
    fn new(subject: &str, message: impl ToString) -> Self {
        Issue {
            subject: subject.to_string(),
            message: message.to_string(),
        }
    }
}

// =============================================================================
// Loading
// =============================================================================

impl RecipeDocument {
    pub fn load(path: &Path) -> CliResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| CliError::io(path, e))?;
        let document = Self::from_json(&contents)?;
        debug!(
            ?path,
            foods = document.foods.len(),
            products = document.products.len(),
            "Loaded recipe document"
        );
        Ok(document)
    }

    pub fn from_json(json: &str) -> CliResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Snapshot of every food in the document.
    pub fn catalog(&self) -> CatalogSnapshot {
        CatalogSnapshot::new(DOCUMENT_CATALOG_REVISION, self.foods.iter().cloned())
    }

    // =========================================================================
    // Checking
    // =========================================================================

    /// Lists every validation and integrity problem in the document.
    ///
    /// Unlike [`ProductRecord::to_product`] this does not stop at the first
    /// problem.
    pub fn check(&self) -> Vec<Issue> {
        let mut issues = Vec::new();

        let mut food_ids = HashSet::new();
        for food in &self.foods {
            let subject = format!("food {}", food.id);
            if !food_ids.insert(food.id) {
                issues.push(Issue::new(&subject, "duplicate food id"));
            }
            if let Err(e) = validation::validate_food_name(&food.name) {
                issues.push(Issue::new(&subject, e));
            }
            if let Err(e) = validation::validate_serving_grams(food.reference_serving) {
                issues.push(Issue::new(&subject, e));
            }
        }

        let catalog = self.catalog();
        let mut product_ids = HashSet::new();
        for record in &self.products {
            let subject = format!("product {}", record.id);
            if !product_ids.insert(record.id) {
                issues.push(Issue::new(&subject, "duplicate product id"));
            }
            if let Err(e) = validation::validate_product_name(&record.name) {
                issues.push(Issue::new(&subject, e));
            }
            if let Some(last) = record.ingredients.len().checked_sub(1) {
                if let Err(e) = validation::validate_ingredient_count(last) {
                    issues.push(Issue::new(&subject, e));
                }
            }

            for (index, line) in record.ingredients.iter().enumerate() {
                if let Err(e) = validation::validate_quantity_grams(line.quantity_grams) {
                    issues.push(Issue::new(&subject, format!("line {}: {}", index + 1, e)));
                }
                if catalog.food(&line.food_id).is_none() {
                    issues.push(Issue::new(
                        &subject,
                        format!("line {}: unknown food {}", index + 1, line.food_id),
                    ));
                }
            }
        }

        debug!(issues = issues.len(), "Checked recipe document");
        issues
    }
}

impl ProductRecord {
    pub fn to_product(&self) -> CliResult<Product> {
        let mut product = Product::new(self.name.clone())?;
        product.id = self.id;
        for line in &self.ingredients {
            product.add_ingredient(line.food_id, line.quantity_grams)?;
        }
        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const FLOUR: &str = "11111111-1111-4111-8111-111111111111";
    const SUGAR: &str = "22222222-2222-4222-8222-222222222222";
    const CAKE: &str = "33333333-3333-4333-8333-333333333333";

    fn sample() -> String {
        format!(
            r#"{{
                "foods": [
                    {{
                        "id": "{FLOUR}",
                        "name": "Flour",
                        "reference_serving": "100",
                        "nutrients": {{ "macros": {{ "calories": "364" }} }},
                        "allergens": ["gluten"]
                    }},
                    {{
                        "id": "{SUGAR}",
                        "name": "Sugar",
                        "reference_serving": 100,
                        "nutrients": {{ "macros": {{ "calories": "387", "sugars": "99.8" }} }}
                    }}
                ],
                "products": [
                    {{
                        "id": "{CAKE}",
                        "name": "Sponge",
                        "ingredients": [
                            {{ "food_id": "{FLOUR}", "quantity_grams": "200" }},
                            {{ "food_id": "{SUGAR}", "quantity_grams": "150.5" }}
                        ]
                    }}
                ]
            }}"#
        )
    }

    #[test]
    fn test_parse_document() {
        let doc = RecipeDocument::from_json(&sample()).unwrap();
        assert_eq!(doc.foods.len(), 2);
        assert_eq!(doc.products[0].ingredients[1].quantity_grams.to_string(), "150.50");

        let product = doc.products[0].to_product().unwrap();
        assert_eq!(product.id.to_string(), CAKE);
        assert_eq!(product.ingredients().len(), 2);
        assert_eq!(doc.catalog().len(), 2);
        assert!(doc.check().is_empty());
    }

    #[test]
    fn test_float_quantities_are_rejected() {
        let json = sample().replace(r#""quantity_grams": "200""#, r#""quantity_grams": 200.0"#);
        assert!(matches!(RecipeDocument::from_json(&json), Err(CliError::Json(_))));
    }

    #[test]
    fn test_check_reports_every_problem() {
        let json = sample()
            .replace(r#""reference_serving": 100"#, r#""reference_serving": 0"#)
            .replace(r#""name": "Sponge""#, r#""name": "  ""#);
        let mut doc = RecipeDocument::from_json(&json).unwrap();
        doc.products[0].ingredients.push(LineRecord {
            food_id: FoodId::new(),
            quantity_grams: Grams::zero(),
        });

        let issues = doc.check();
        let messages: Vec<&str> = issues.iter().map(|i| i.message.as_str()).collect();

        assert_eq!(issues.len(), 4, "{messages:?}");
        assert!(issues[0].subject.starts_with("food "));
        assert!(messages.iter().any(|m| m.contains("unknown food")));
    }

    #[test]
    fn test_product_with_zero_quantity_fails_to_build() {
        let mut doc = RecipeDocument::from_json(&sample()).unwrap();
        doc.products[0].ingredients[0].quantity_grams = Grams::zero();
        assert!(matches!(doc.products[0].to_product(), Err(CliError::Core(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(sample().as_bytes()).unwrap();

        let doc = RecipeDocument::load(file.path()).unwrap();
        assert_eq!(doc.products.len(), 1);

        assert!(matches!(
            RecipeDocument::load(Path::new("/nonexistent/recipes.json")),
            Err(CliError::Io { .. })
        ));
    }
}
