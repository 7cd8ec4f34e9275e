//! Product recommendations keyed on the predicted condition.
//!
//! A predicted skin condition maps to a broader skin type, and a JSON
//! product catalog keyed by skin type supplies the recommendations. The
//! catalog document has the shape
//! `{"oily": [{"name": ..., "description": ...}, ...], ...}`.

use crate::core::{ClassifyError, ClassifyResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Default number of products returned for a condition lookup.
pub const DEFAULT_RECOMMENDATION_LIMIT: usize = 5;

/// Default number of products returned for a keyword refinement.
pub const DEFAULT_REFINED_LIMIT: usize = 10;

/// The skin types the product catalog is organized by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkinType {
    /// Oily skin.
    Oily,
    /// Dry skin.
    Dry,
    /// Normal skin.
    Normal,
    /// Sensitive skin.
    Sensitive,
    /// Combination skin.
    Combination,
}

impl std::fmt::Display for SkinType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkinType::Oily => write!(f, "oily"),
            SkinType::Dry => write!(f, "dry"),
            SkinType::Normal => write!(f, "normal"),
            SkinType::Sensitive => write!(f, "sensitive"),
            SkinType::Combination => write!(f, "combination"),
        }
    }
}

/// Maps a predicted condition to the skin type its products target.
///
/// Acne usually accompanies oily skin; under-eye bags and redness are signs
/// of sensitivity. Unknown conditions have no mapping.
pub fn skin_type_for_condition(condition: &str) -> Option<SkinType> {
    match condition {
        "acne" => Some(SkinType::Oily),
        "bags" => Some(SkinType::Sensitive),
        "redness" => Some(SkinType::Sensitive),
        _ => None,
    }
}

/// The conditions the deployed mapping covers.
pub fn known_conditions() -> &'static [&'static str] {
    &["acne", "bags", "redness"]
}

/// A recommendable product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Product name.
    pub name: String,
    /// Short marketing description.
    pub description: String,
}

/// Products selected for a condition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendations {
    /// The skin type the condition mapped to.
    pub skin_type: SkinType,
    /// The selected products, best first.
    pub products: Vec<Product>,
}

/// A product catalog keyed by skin type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductCatalog {
    by_skin_type: BTreeMap<SkinType, Vec<Product>>,
}

impl ProductCatalog {
    /// Loads a catalog from a JSON file.
    pub fn load(path: &Path) -> ClassifyResult<Self> {
        let file = File::open(path)?;
        serde_json::from_reader(BufReader::new(file))
            .map_err(|error| ClassifyError::artifact_parse(path, error))
    }

    /// The products listed for one skin type.
    pub fn products_for(&self, skin_type: SkinType) -> &[Product] {
        self.by_skin_type
            .get(&skin_type)
            .map_or(&[], Vec::as_slice)
    }

    /// Selects up to `limit` products for a predicted condition.
    ///
    /// Returns `None` when the condition has no skin-type mapping.
    pub fn recommendations_for(&self, condition: &str, limit: usize) -> Option<Recommendations> {
        let skin_type = skin_type_for_condition(condition)?;
        let products = self
            .products_for(skin_type)
            .iter()
            .take(limit)
            .cloned()
            .collect();
        Some(Recommendations {
            skin_type,
            products,
        })
    }

    /// Selects up to `limit` products across all skin types whose name or
    /// description contains the keyword, case-insensitively.
    ///
    /// Products appearing under several skin types are deduplicated by name.
    pub fn refine_by_keyword(&self, keyword: &str, limit: usize) -> Vec<Product> {
        let keyword = keyword.to_lowercase();
        let mut seen = std::collections::BTreeSet::new();
        let mut matches = Vec::new();

        for products in self.by_skin_type.values() {
            for product in products {
                if matches.len() == limit {
                    return matches;
                }
                if !seen.contains(&product.name)
                    && (product.name.to_lowercase().contains(&keyword)
                        || product.description.to_lowercase().contains(&keyword))
                {
                    seen.insert(product.name.clone());
                    matches.push(product.clone());
                }
            }
        }
        matches
    }
}
