//! Cuisine table: characteristic ingredients, techniques and flavour profile.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::normalize_key;
use crate::error::AppError;

const EMBEDDED: &str = include_str!("../../data/cuisines.toml");

/// Descriptive metadata for one culinary tradition.
///
/// The `Default` value is the "unknown cuisine" record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CuisineCharacteristics {
    #[serde(default)]
    pub common_ingredients: Vec<String>,
    #[serde(default)]
    pub common_techniques: Vec<String>,
    #[serde(default)]
    pub flavor_profile: String,
}

impl CuisineCharacteristics {
    /// `true` for the record returned for an unknown cuisine.
    pub fn is_empty(&self) -> bool {
        self.common_ingredients.is_empty()
            && self.common_techniques.is_empty()
            && self.flavor_profile.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CuisineEntry {
    pub name: String,
    pub characteristics: CuisineCharacteristics,
}

/// Cuisine lookup keyed by normalised name, iterated alphabetically.
#[derive(Debug, Clone, Default)]
pub struct CuisineTable {
    entries: BTreeMap<String, CuisineEntry>,
}

impl CuisineTable {
    pub fn embedded() -> Result<Self, AppError> {
        Self::from_toml(EMBEDDED)
    }

    /// Parse and validate a TOML cuisine table. Every cuisine needs a
    /// non-blank name and flavour profile; names must be unique after
    /// normalisation.
    pub fn from_toml(src: &str) -> Result<Self, AppError> {
        let raw: BTreeMap<String, CuisineCharacteristics> = toml::from_str(src)
            .map_err(|e| AppError::Catalog(format!("invalid cuisine table: {e}")))?;

        let mut entries = BTreeMap::new();
        for (raw_name, characteristics) in raw {
            let name = normalize_key(&raw_name);
            if name.is_empty() {
                return Err(AppError::Catalog("cuisine with blank name".into()));
            }
            if characteristics.flavor_profile.trim().is_empty() {
                return Err(AppError::Catalog(format!(
                    "cuisine '{name}' has an empty flavor_profile"
                )));
            }
            let entry = CuisineEntry { name: name.clone(), characteristics };
            if entries.insert(name.clone(), entry).is_some() {
                return Err(AppError::Catalog(format!("duplicate cuisine '{name}'")));
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

    /// All cuisine keys.
    pub fn all_cuisines(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    pub fn get(&self, cuisine: &str) -> Option<&CuisineEntry> {
        self.entries.get(&normalize_key(cuisine))
    }

    /// Characteristics of `cuisine`, or the empty record when unknown.
    pub fn characteristics_of(&self, cuisine: &str) -> CuisineCharacteristics {
        self.get(cuisine)
            .map(|entry| entry.characteristics.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn embedded_table_has_eight_cuisines() {
        let t = CuisineTable::embedded().unwrap();
        let got: HashSet<String> = t.all_cuisines().into_iter().collect();
        let expected: HashSet<String> = [
            "italian", "mexican", "indian", "chinese", "japanese", "french", "thai",
            "mediterranean",
        ]
        .into_iter()
        .map(String::from)
        .collect();
        assert_eq!(got, expected);
    }

    #[test]
    fn characteristics_lookup_is_case_insensitive() {
        let t = CuisineTable::embedded().unwrap();
        let thai = t.characteristics_of("THAI");
        assert_eq!(thai.flavor_profile, "Spicy, sour, sweet, salty balance");
        assert!(thai.common_ingredients.contains(&"lemongrass".to_string()));
        assert_eq!(thai.common_techniques, vec!["stir-frying", "pounding", "grilling"]);
    }

    #[test]
    fn unknown_cuisine_is_empty_record() {
        let t = CuisineTable::embedded().unwrap();
        let c = t.characteristics_of("martian");
        assert!(c.is_empty());
        assert_eq!(c, CuisineCharacteristics::default());
    }

    #[test]
    fn blank_flavor_profile_rejected() {
        let src = "[nordic]\ncommon_ingredients = [\"dill\"]\nflavor_profile = \" \"\n";
        let msg = CuisineTable::from_toml(src).unwrap_err().to_string();
        assert!(msg.contains("empty flavor_profile"));
    }

    #[test]
    fn case_colliding_names_rejected() {
        let src = "[Thai]\nflavor_profile = \"a\"\n[thai]\nflavor_profile = \"b\"\n";
        let msg = CuisineTable::from_toml(src).unwrap_err().to_string();
        assert!(msg.contains("duplicate cuisine 'thai'"));
    }
}
