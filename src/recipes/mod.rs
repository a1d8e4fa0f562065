//! Recipe generator: validated requests in, LLM-written recipes out.
//!
//! [`RecipeGenerator`] owns the configured [`LlmProvider`] and a shared
//! [`Catalog`]. Recipe generation is a single provider round-trip; the
//! substitute and pairing suggestions are answered from the catalog.

pub mod prompt;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::llm::{LlmProvider, ProviderError};

pub const DEFAULT_SERVINGS: u32 = 2;

// ── Request ───────────────────────────────────────────────────────────────────

/// How involved the generated recipe may be.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Complexity {
    pub fn as_str(self) -> &'static str {
        match self {
            Complexity::Easy => "easy",
            Complexity::Medium => "medium",
            Complexity::Hard => "hard",
        }
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Complexity {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Complexity::Easy),
            "medium" => Ok(Complexity::Medium),
            "hard" => Ok(Complexity::Hard),
            _ => Err(ValidationError::InvalidComplexity),
        }
    }
}

/// Client input that cannot be turned into a [`RecipeRequest`].
///
/// The display text is the exact message returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("No ingredients provided")]
    NoIngredients,
    #[error("No ingredient provided")]
    NoIngredient,
    #[error("servings must be a positive integer")]
    InvalidServings,
    #[error("complexity must be one of: easy, medium, hard")]
    InvalidComplexity,
}

/// A validated recipe request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeRequest {
    /// Non-empty, trimmed, without duplicates.
    pub ingredients: Vec<String>,
    pub dietary_restrictions: Vec<String>,
    pub cuisine_type: Option<String>,
    /// Always at least 1.
    pub servings: u32,
    pub complexity: Complexity,
}

impl RecipeRequest {
    /// Validate raw client fields, applying defaults for absent optionals.
    ///
    /// Blank entries are dropped before the emptiness check, so
    /// `["", "  "]` counts as no ingredients.
    pub fn new(
        ingredients: Vec<String>,
        dietary_restrictions: Vec<String>,
        cuisine_type: Option<String>,
        servings: Option<i64>,
        complexity: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let ingredients = clean_list(ingredients);
        if ingredients.is_empty() {
            return Err(ValidationError::NoIngredients);
        }

        let servings = match servings {
            None => DEFAULT_SERVINGS,
            Some(n) if n >= 1 => u32::try_from(n).map_err(|_| ValidationError::InvalidServings)?,
            Some(_) => return Err(ValidationError::InvalidServings),
        };

        let complexity = match complexity {
            None => Complexity::default(),
            Some(raw) => raw.parse()?,
        };

        let cuisine_type = cuisine_type
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());

        Ok(Self {
            ingredients,
            dietary_restrictions: clean_list(dietary_restrictions),
            cuisine_type,
            servings,
            complexity,
        })
    }
}

/// Trim, drop blanks, drop repeats (first occurrence wins).
fn clean_list(items: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        let item = item.trim();
        if !item.is_empty() && !out.iter().any(|seen| seen == item) {
            out.push(item.to_string());
        }
    }
    out
}

// ── Result ────────────────────────────────────────────────────────────────────

/// The generator's recipe object, passed to clients unmodified.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RecipeResult(pub Map<String, Value>);

impl RecipeResult {
    /// Parse a model reply. Accepts a bare JSON object or one wrapped in a
    /// fenced code block; anything else is a malformed response.
    pub fn parse(reply: &str) -> Result<Self, GenerationError> {
        let body = strip_code_fence(reply);
        match serde_json::from_str::<Value>(body) {
            Ok(Value::Object(map)) => Ok(Self(map)),
            Ok(other) => Err(GenerationError::new(
                GenerationErrorKind::MalformedResponse,
                format!("expected a JSON object, got {}", json_type_name(&other)),
            )),
            Err(e) => Err(GenerationError::new(
                GenerationErrorKind::MalformedResponse,
                format!("reply is not valid JSON: {e}"),
            )),
        }
    }

    pub fn title(&self) -> Option<&str> {
        self.0.get("title").and_then(Value::as_str)
    }
}

fn strip_code_fence(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string ("json") up to the first newline.
    let rest = rest.split_once('\n').map_or("", |(_, body)| body);
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}

fn json_type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ── Errors ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationErrorKind {
    Timeout,
    Auth,
    RateLimited,
    MalformedResponse,
    Unavailable,
}

impl GenerationErrorKind {
    /// Client-facing message; never includes provider detail.
    pub fn public_message(self) -> &'static str {
        match self {
            GenerationErrorKind::Timeout => "Recipe generation timed out",
            GenerationErrorKind::Auth => {
                "Recipe generation service rejected the configured credentials"
            }
            GenerationErrorKind::RateLimited => {
                "Recipe generation service is rate limited, try again later"
            }
            GenerationErrorKind::MalformedResponse => {
                "Recipe generation service returned an unusable response"
            }
            GenerationErrorKind::Unavailable => "Recipe generation service is unavailable",
        }
    }
}

/// A failed recipe generation: a kind for clients, detail for logs.
#[derive(Debug, Clone, Error)]
#[error("{}: {detail}", .kind.public_message())]
pub struct GenerationError {
    pub kind: GenerationErrorKind,
    pub detail: String,
}

impl GenerationError {
    pub fn new(kind: GenerationErrorKind, detail: impl Into<String>) -> Self {
        Self { kind, detail: detail.into() }
    }

    pub fn public_message(&self) -> &'static str {
        self.kind.public_message()
    }
}

impl From<ProviderError> for GenerationError {
    fn from(e: ProviderError) -> Self {
        let kind = match &e {
            ProviderError::Timeout(_) => GenerationErrorKind::Timeout,
            ProviderError::Auth(_) | ProviderError::MissingApiKey(_) => GenerationErrorKind::Auth,
            ProviderError::RateLimited(_) => GenerationErrorKind::RateLimited,
            ProviderError::MalformedResponse(_) => GenerationErrorKind::MalformedResponse,
            ProviderError::Unavailable(_) | ProviderError::UnknownProvider(_) => {
                GenerationErrorKind::Unavailable
            }
        };
        Self::new(kind, e.to_string())
    }
}

// ── Generator ─────────────────────────────────────────────────────────────────

/// Stateless facade over the provider and the lookup tables.
#[derive(Debug, Clone)]
pub struct RecipeGenerator {
    provider: LlmProvider,
    catalog: Arc<Catalog>,
}

impl RecipeGenerator {
    pub fn new(provider: LlmProvider, catalog: Arc<Catalog>) -> Self {
        Self { provider, catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Ask the provider for a recipe. One attempt, no retry.
    pub async fn generate_recipe(
        &self,
        request: &RecipeRequest,
    ) -> Result<RecipeResult, GenerationError> {
        let user_prompt = prompt::build_user_prompt(request, &self.catalog);

        debug!(
            provider = self.provider.name(),
            ingredients = request.ingredients.len(),
            restrictions = request.dietary_restrictions.len(),
            cuisine = ?request.cuisine_type,
            servings = request.servings,
            complexity = %request.complexity,
            "generating recipe"
        );

        let response = self
            .provider
            .complete(&user_prompt, Some(prompt::SYSTEM_PROMPT))
            .await?;

        let recipe = RecipeResult::parse(&response.text)?;

        info!(
            provider = self.provider.name(),
            title = recipe.title().unwrap_or("<untitled>"),
            input_tokens = ?response.usage.map(|u| u.input_tokens),
            output_tokens = ?response.usage.map(|u| u.output_tokens),
            "recipe generated"
        );

        Ok(recipe)
    }

    /// Catalog substitutes for `ingredient` under `restrictions`.
    pub fn suggest_substitutes<S: AsRef<str>>(
        &self,
        ingredient: &str,
        restrictions: &[S],
    ) -> Vec<String> {
        self.catalog.ingredients.substitutes_for(ingredient, restrictions)
    }

    /// Catalog pairings for `ingredient`, in table order.
    pub fn suggest_pairings(&self, ingredient: &str) -> Vec<String> {
        self.catalog.ingredients.pairings_for(ingredient)
    }
}
