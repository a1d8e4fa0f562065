//! Ingredient table: substitutes per dietary restriction, plus pairings.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Deserialize;
use tracing::debug;

use super::normalize_key;
use crate::error::AppError;

/// Substitute tag that applies regardless of restrictions.
pub const DEFAULT_TAG: &str = "default";

const EMBEDDED: &str = include_str!("../../data/ingredients.toml");

/// File shape of one ingredient.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawIngredient {
    substitutes: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pairings: Vec<String>,
}

/// One validated ingredient record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientEntry {
    /// Normalised key.
    pub name: String,
    /// Restriction tag → ordered substitutes. Always contains [`DEFAULT_TAG`].
    pub substitutes: BTreeMap<String, Vec<String>>,
    /// Commonly combined ingredients, in table order.
    pub pairings: Vec<String>,
}

/// Ingredient lookup keyed by normalised name.
#[derive(Debug, Clone, Default)]
pub struct IngredientTable {
    entries: HashMap<String, IngredientEntry>,
}

impl IngredientTable {
    /// The table compiled into the binary.
    pub fn embedded() -> Result<Self, AppError> {
        Self::from_toml(EMBEDDED)
    }

    /// Parse and validate a TOML ingredient table.
    ///
    /// Rejects blank or duplicate names (after normalisation), duplicate
    /// restriction tags, and entries without a `default` substitute list.
    pub fn from_toml(src: &str) -> Result<Self, AppError> {
        let raw: BTreeMap<String, RawIngredient> = toml::from_str(src)
            .map_err(|e| AppError::Catalog(format!("invalid ingredient table: {e}")))?;

        let mut entries = HashMap::with_capacity(raw.len());
        for (raw_name, item) in raw {
            let name = normalize_key(&raw_name);
            if name.is_empty() {
                return Err(AppError::Catalog("ingredient with blank name".into()));
            }

            let mut substitutes = BTreeMap::new();
            for (raw_tag, list) in item.substitutes {
                let tag = normalize_key(&raw_tag);
                let list: Vec<String> = list
                    .iter()
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect();
                if substitutes.insert(tag.clone(), list).is_some() {
                    return Err(AppError::Catalog(format!(
                        "ingredient '{name}' lists restriction '{tag}' twice"
                    )));
                }
            }
            if !substitutes.contains_key(DEFAULT_TAG) {
                return Err(AppError::Catalog(format!(
                    "ingredient '{name}' has no '{DEFAULT_TAG}' substitutes"
                )));
            }

            let entry = IngredientEntry {
                name: name.clone(),
                substitutes,
                pairings: item.pairings.iter().map(|s| s.trim().to_string()).collect(),
            };
            if entries.insert(name.clone(), entry).is_some() {
                return Err(AppError::Catalog(format!("duplicate ingredient '{name}'")));
            }
        }

        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, ingredient: &str) -> Option<&IngredientEntry> {
        self.entries.get(&normalize_key(ingredient))
    }

    /// Default substitutes followed by those of every requested restriction
    /// present in the entry, deduplicated. Unknown tags are skipped; an
    /// unknown ingredient yields an empty list.
    ///
    /// Callers must not rely on the order of the result.
    pub fn substitutes_for<S: AsRef<str>>(
        &self,
        ingredient: &str,
        restrictions: &[S],
    ) -> Vec<String> {
        let Some(entry) = self.get(ingredient) else {
            debug!(ingredient, "no substitutes: unknown ingredient");
            return Vec::new();
        };

        let tags = std::iter::once(DEFAULT_TAG.to_string())
            .chain(restrictions.iter().map(|r| normalize_key(r.as_ref())));

        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for tag in tags {
            let Some(list) = entry.substitutes.get(&tag) else {
                continue;
            };
            for sub in list {
                if seen.insert(sub.as_str()) {
                    out.push(sub.clone());
                }
            }
        }
        out
    }

    /// Pairings in table order; empty for an unknown ingredient.
    pub fn pairings_for(&self, ingredient: &str) -> Vec<String> {
        self.get(ingredient)
            .map(|entry| entry.pairings.clone())
            .unwrap_or_default()
    }
}
