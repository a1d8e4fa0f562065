//! Axum handlers for `/api/*` routes.
//!
//! Each handler receives [`ApiState`] via [`axum::extract::State`] and
//! returns a JSON [`Response`]. Validation failures are 400 with a fixed
//! message; generation failures are 500 with a per-kind message.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::{Query, QueryRejection};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, warn};

use super::ApiState;
use crate::recipes::{GenerationError, GenerationErrorKind, RecipeRequest, ValidationError};

// ── Request types ─────────────────────────────────────────────────────────────

/// Body of `POST /api/generate-recipe`. Every field is optional here;
/// [`RecipeRequest::new`] decides what is required.
#[derive(Debug, Deserialize)]
pub(super) struct GenerateRecipeBody {
    #[serde(default)]
    ingredients: Option<Vec<String>>,
    #[serde(default)]
    dietary_restrictions: Option<Vec<String>>,
    #[serde(default)]
    cuisine_type: Option<String>,
    #[serde(default)]
    servings: Option<Value>,
    #[serde(default)]
    complexity: Option<String>,
}

/// `ingredient` may repeat in the query string; the first value wins.
#[derive(Debug, Deserialize)]
pub(super) struct SubstitutesQuery {
    #[serde(default)]
    ingredient: Vec<String>,
    #[serde(default)]
    dietary_restrictions: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct PairingsQuery {
    #[serde(default)]
    ingredient: Vec<String>,
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Build a JSON error response.
fn json_error(status: StatusCode, msg: impl std::fmt::Display) -> Response {
    (status, Json(json!({ "error": format!("{msg}") }))).into_response()
}

fn validation_error(e: ValidationError) -> Response {
    json_error(StatusCode::BAD_REQUEST, e)
}

/// Map a generation failure to a 500. Provider detail is only exposed in
/// debug mode.
fn generation_failure(state: &ApiState, e: &GenerationError) -> Response {
    let body = if state.debug {
        json!({ "error": e.public_message(), "detail": e.detail })
    } else {
        json!({ "error": e.public_message() })
    };
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}

/// The first `ingredient` query value, if present and non-blank.
fn required_ingredient(values: Vec<String>) -> Result<String, ValidationError> {
    values
        .into_iter()
        .next()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or(ValidationError::NoIngredient)
}

/// `servings` must be a JSON integer when present; `null` counts as absent.
fn servings_value(raw: Option<Value>) -> Result<Option<i64>, ValidationError> {
    match raw {
        None | Some(Value::Null) => Ok(None),
        Some(v) => v.as_i64().map(Some).ok_or(ValidationError::InvalidServings),
    }
}

fn query_error(rejection: QueryRejection) -> Response {
    debug!(error = %rejection, "rejected query string");
    json_error(StatusCode::BAD_REQUEST, "Invalid query string")
}

// ── Handlers ──────────────────────────────────────────────────────────────────

/// POST /api/generate-recipe
pub(super) async fn generate_recipe(
    State(state): State<ApiState>,
    payload: Result<Json<GenerateRecipeBody>, JsonRejection>,
) -> Response {
    let Json(body) = match payload {
        Ok(body) => body,
        Err(rejection) => {
            debug!(error = %rejection, "rejected generate-recipe body");
            return json_error(StatusCode::BAD_REQUEST, "Invalid JSON body");
        }
    };

    let request = match servings_value(body.servings).and_then(|servings| {
        RecipeRequest::new(
            body.ingredients.unwrap_or_default(),
            body.dietary_restrictions.unwrap_or_default(),
            body.cuisine_type,
            servings,
            body.complexity.as_deref(),
        )
    }) {
        Ok(request) => request,
        Err(e) => return validation_error(e),
    };

    match tokio::time::timeout(
        state.generation_timeout,
        state.generator.generate_recipe(&request),
    )
    .await
    {
        Ok(Ok(recipe)) => (StatusCode::OK, Json(recipe)).into_response(),
        Ok(Err(e)) => {
            warn!(kind = ?e.kind, detail = %e.detail, "recipe generation failed");
            generation_failure(&state, &e)
        }
        Err(_) => {
            let e = GenerationError::new(
                GenerationErrorKind::Timeout,
                format!("no reply within {}s", state.generation_timeout.as_secs_f32()),
            );
            warn!(detail = %e.detail, "recipe generation timed out");
            generation_failure(&state, &e)
        }
    }
}

/// GET /api/ingredient-substitutes
pub(super) async fn ingredient_substitutes(
    State(state): State<ApiState>,
    query: Result<Query<SubstitutesQuery>, QueryRejection>,
) -> Response {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return query_error(rejection),
    };
    let ingredient = match required_ingredient(query.ingredient) {
        Ok(i) => i,
        Err(e) => return validation_error(e),
    };

    let substitutes = state
        .generator
        .suggest_substitutes(&ingredient, query.dietary_restrictions.as_slice());
    debug!(%ingredient, count = substitutes.len(), "substitutes lookup");

    (StatusCode::OK, Json(json!({ "substitutes": substitutes }))).into_response()
}

/// GET /api/ingredient-pairings
pub(super) async fn ingredient_pairings(
    State(state): State<ApiState>,
    query: Result<Query<PairingsQuery>, QueryRejection>,
) -> Response {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return query_error(rejection),
    };
    let ingredient = match required_ingredient(query.ingredient) {
        Ok(i) => i,
        Err(e) => return validation_error(e),
    };

    let pairings = state.generator.suggest_pairings(&ingredient);
    debug!(%ingredient, count = pairings.len(), "pairings lookup");

    (StatusCode::OK, Json(json!({ "pairings": pairings }))).into_response()
}

/// GET /api/cuisines
pub(super) async fn cuisines(State(state): State<ApiState>) -> Response {
    let cuisines = state.generator.catalog().cuisines.all_cuisines();
    (StatusCode::OK, Json(json!({ "cuisines": cuisines }))).into_response()
}

/// GET /api/cuisines/{cuisine}
pub(super) async fn cuisine_detail(
    State(state): State<ApiState>,
    Path(cuisine): Path<String>,
) -> Response {
    match state.generator.catalog().cuisines.get(&cuisine) {
        Some(entry) => (
            StatusCode::OK,
            Json(json!({
                "cuisine": entry.name,
                "characteristics": entry.characteristics,
            })),
        )
            .into_response(),
        None => json_error(StatusCode::NOT_FOUND, "Unknown cuisine"),
    }
}
