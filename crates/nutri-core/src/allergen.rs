//! # Allergen Module
//!
//! The closed set of declarable allergens and the `AllergenSet` value type.
//!
//! ## Combination
//! ```text
//! Flour   {gluten}        ─┐
//! Butter  {milk}           ├── union ──► Pie crust {gluten, milk, eggs}
//! Egg     {eggs}          ─┘
//! ```
//! Union is commutative, associative and idempotent; the empty set is its
//! identity. Sets iterate and serialize in declaration order, so output is
//! deterministic regardless of ingredient order.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

// =============================================================================
// Allergen
// =============================================================================

/// A declarable allergen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Allergen {
    Gluten,
    Crustaceans,
    Eggs,
    Fish,
    Peanuts,
    Soybeans,
    Milk,
    Nuts,
    Celery,
    Mustard,
    Sesame,
    Sulphites,
    Lupin,
    Molluscs,
}

impl Allergen {
    /// Every allergen, in declaration order.
    pub const ALL: [Allergen; 14] = [
        Allergen::Gluten,
        Allergen::Crustaceans,
        Allergen::Eggs,
        Allergen::Fish,
        Allergen::Peanuts,
        Allergen::Soybeans,
        Allergen::Milk,
        Allergen::Nuts,
        Allergen::Celery,
        Allergen::Mustard,
        Allergen::Sesame,
        Allergen::Sulphites,
        Allergen::Lupin,
        Allergen::Molluscs,
    ];

    /// The lowercase name used on the wire.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Allergen::Gluten => "gluten",
            Allergen::Crustaceans => "crustaceans",
            Allergen::Eggs => "eggs",
            Allergen::Fish => "fish",
            Allergen::Peanuts => "peanuts",
            Allergen::Soybeans => "soybeans",
            Allergen::Milk => "milk",
            Allergen::Nuts => "nuts",
            Allergen::Celery => "celery",
            Allergen::Mustard => "mustard",
            Allergen::Sesame => "sesame",
            Allergen::Sulphites => "sulphites",
            Allergen::Lupin => "lupin",
            Allergen::Molluscs => "molluscs",
        }
    }
}

impl fmt::Display for Allergen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Allergen {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Allergen::ALL
            .iter()
            .copied()
            .find(|a| a.as_str() == needle)
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "allergen".to_string(),
                allowed: Allergen::ALL.iter().map(|a| a.to_string()).collect(),
            })
    }
}

// =============================================================================
// Allergen Set
// =============================================================================

/// A set of allergens.
///
/// ## Example
/// ```rust
/// use nutri_core::allergen::{Allergen, AllergenSet};
///
/// let flour = AllergenSet::from_iter([Allergen::Gluten]);
/// let butter = AllergenSet::from_iter([Allergen::Milk]);
///
/// let crust = flour.union(&butter);
/// assert!(crust.contains(Allergen::Gluten));
/// assert!(crust.contains(Allergen::Milk));
///
/// // Idempotent, and the empty set is the identity.
/// assert_eq!(crust.union(&crust), crust);
/// assert_eq!(crust.union(&AllergenSet::zero()), crust);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AllergenSet(BTreeSet<Allergen>);

impl AllergenSet {
    /// The empty set: identity element of [`union`](Self::union).
    pub fn zero() -> Self {
        AllergenSet(BTreeSet::new())
    }

    /// Alias for [`zero`](Self::zero).
    pub fn empty() -> Self {
        Self::zero()
    }

    /// Set union. Returns a new set; neither operand is modified.
    pub fn union(&self, other: &AllergenSet) -> AllergenSet {
        if other.0.is_empty() {
            return self.clone();
        }
        AllergenSet(self.0.union(&other.0).copied().collect())
    }

    /// Returns a copy with `allergen` added.
    pub fn with(&self, allergen: Allergen) -> AllergenSet {
        let mut set = self.0.clone();
        set.insert(allergen);
        AllergenSet(set)
    }

    pub fn contains(&self, allergen: Allergen) -> bool {
        self.0.contains(&allergen)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = Allergen> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Allergen> for AllergenSet {
    fn from_iter<I: IntoIterator<Item = Allergen>>(iter: I) -> Self {
        AllergenSet(iter.into_iter().collect())
    }
}

impl Extend<Allergen> for AllergenSet {
    fn extend<I: IntoIterator<Item = Allergen>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl fmt::Display for AllergenSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.0.iter().map(Allergen::as_str).collect();
        write!(f, "{{{}}}", names.join(", "))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[Allergen]) -> AllergenSet {
        items.iter().copied().collect()
    }

    #[test]
    fn test_union_laws() {
        let a = set(&[Allergen::Gluten, Allergen::Eggs]);
        let b = set(&[Allergen::Milk]);
        let c = set(&[Allergen::Eggs, Allergen::Sesame]);

        assert_eq!(a.union(&b), b.union(&a));
        assert_eq!(a.union(&b).union(&c), a.union(&b.union(&c)));
        assert_eq!(a.union(&a), a);
        assert_eq!(a.union(&AllergenSet::zero()), a);
        assert_eq!(AllergenSet::zero().union(&a), a);
    }

    #[test]
    fn test_union_does_not_mutate_receiver() {
        let a = set(&[Allergen::Fish]);
        let _ = a.union(&set(&[Allergen::Molluscs]));
        assert_eq!(a.len(), 1);
        let _ = a.with(Allergen::Lupin);
        assert!(!a.contains(Allergen::Lupin));
    }

    #[test]
    fn test_iteration_order_is_declaration_order() {
        let s = set(&[Allergen::Molluscs, Allergen::Gluten, Allergen::Milk]);
        let order: Vec<Allergen> = s.iter().collect();
        assert_eq!(order, vec![Allergen::Gluten, Allergen::Milk, Allergen::Molluscs]);
        assert_eq!(s.to_string(), "{gluten, milk, molluscs}");
    }

    #[test]
    fn test_parse_allergen() {
        assert_eq!("gluten".parse::<Allergen>().unwrap(), Allergen::Gluten);
        assert_eq!(" Sulphites ".parse::<Allergen>().unwrap(), Allergen::Sulphites);
        assert!("shellfish".parse::<Allergen>().is_err());
        for allergen in Allergen::ALL {
            assert_eq!(allergen.as_str().parse::<Allergen>().unwrap(), allergen);
        }
    }

    #[test]
    fn test_serde_is_a_plain_list() {
        let s = set(&[Allergen::Soybeans, Allergen::Celery]);
        assert_eq!(serde_json::to_string(&s).unwrap(), r#"["soybeans","celery"]"#);

        let parsed: AllergenSet = serde_json::from_str(r#"["milk","milk","nuts"]"#).unwrap();
        assert_eq!(parsed, set(&[Allergen::Milk, Allergen::Nuts]));
    }
}
