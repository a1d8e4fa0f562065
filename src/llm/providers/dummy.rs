//! Dummy LLM provider: answers every prompt with a canned recipe.
//!
//! Picks up the `Available ingredients:` line from the prompt so responses
//! reflect the request. Used for keyless local runs and tests.

use serde_json::json;

use crate::llm::{LlmResponse, ProviderError};

const INGREDIENTS_MARKER: &str = "Available ingredients:";

#[derive(Debug, Clone)]
pub struct DummyProvider;

impl DummyProvider {
    pub async fn complete(
        &self,
        content: &str,
        _system: Option<&str>,
    ) -> Result<LlmResponse, ProviderError> {
        let ingredients: Vec<String> = content
            .lines()
            .find_map(|line| line.trim().strip_prefix(INGREDIENTS_MARKER))
            .map(|rest| {
                rest.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let title = match ingredients.first() {
            Some(first) => format!("Simple {first} skillet"),
            None => "Pantry skillet".to_string(),
        };

        let recipe = json!({
            "title": title,
            "description": "A quick one-pan dish built from what is on hand.",
            "prep_time_minutes": 10,
            "cook_time_minutes": 20,
            "difficulty": "easy",
            "ingredients": ingredients,
            "instructions": [
                "Prepare and chop all ingredients.",
                "Cook everything in a hot pan until done.",
                "Season to taste and serve.",
            ],
            "tags": ["quick", "one-pan"],
            "nutritional_info": null,
        });

        Ok(LlmResponse { text: recipe.to_string(), usage: None })
    }
}
