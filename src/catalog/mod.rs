//! Static lookup tables: ingredients and cuisines.
//!
//! Both tables are parsed from TOML once at startup (embedded copies by
//! default, or files named in `[catalog]`), validated, and then shared
//! read-only behind an `Arc<Catalog>`. Lookups normalise the key to
//! lower-case; an unknown key yields an empty result, never an error.

pub mod cuisines;
pub mod ingredients;

use std::fs;
use std::path::Path;

use tracing::info;

use crate::config::CatalogConfig;
use crate::error::AppError;

pub use cuisines::{CuisineCharacteristics, CuisineEntry, CuisineTable};
pub use ingredients::{IngredientEntry, IngredientTable, DEFAULT_TAG};

/// Normalise a table key or restriction tag for lookup.
pub fn normalize_key(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Both lookup tables, immutable after construction.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub ingredients: IngredientTable,
    pub cuisines: CuisineTable,
}

impl Catalog {
    /// The tables compiled into the binary.
    pub fn embedded() -> Result<Self, AppError> {
        Ok(Self {
            ingredients: IngredientTable::embedded()?,
            cuisines: CuisineTable::embedded()?,
        })
    }

    /// Build the catalog from config, falling back to the embedded table for
    /// any path that is not set.
    pub fn load(config: &CatalogConfig) -> Result<Self, AppError> {
        let ingredients = match &config.ingredients_path {
            Some(path) => IngredientTable::from_toml(&read_table(path)?)?,
            None => IngredientTable::embedded()?,
        };
        let cuisines = match &config.cuisines_path {
            Some(path) => CuisineTable::from_toml(&read_table(path)?)?,
            None => CuisineTable::embedded()?,
        };

        info!(
            ingredients = ingredients.len(),
            cuisines = cuisines.len(),
            "catalog loaded"
        );

        Ok(Self { ingredients, cuisines })
    }
}

fn read_table(path: &Path) -> Result<String, AppError> {
    fs::read_to_string(path)
        .map_err(|e| AppError::Catalog(format!("cannot read {}: {e}", path.display())))
}
