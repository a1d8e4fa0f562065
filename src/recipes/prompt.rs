//! Prompt construction for recipe generation.
//!
//! The user prompt is line-oriented: one labelled line per request field,
//! then optional cuisine and substitution context pulled from the catalog.

use std::fmt::Write as _;

use crate::catalog::{Catalog, CuisineCharacteristics};

use super::RecipeRequest;

pub const SYSTEM_PROMPT: &str = "\
You are a professional chef who writes clear, reliable home-cooking recipes. \
Use mostly the ingredients the user has available; you may assume common \
pantry staples (salt, pepper, oil, water). Respect every dietary restriction \
strictly. Reply with a single JSON object and nothing else.";

const RESPONSE_SHAPE: &str = r#"Respond with a JSON object of this shape:
{
  "title": string,
  "description": string,
  "prep_time_minutes": integer,
  "cook_time_minutes": integer,
  "difficulty": "easy" | "medium" | "hard",
  "servings": integer,
  "ingredients": [string, ...],
  "instructions": [string, ...],
  "tags": [string, ...],
  "nutritional_info": {
    "calories": integer,
    "protein_g": number,
    "carbs_g": number,
    "fat_g": number,
    "fiber_g": number,
    "sugar_g": number
  }
}
Quantities belong inside each ingredient string, scaled to the servings."#;

/// Render the user prompt for `request`, enriched from `catalog`.
pub fn build_user_prompt(request: &RecipeRequest, catalog: &Catalog) -> String {
    let mut out = String::from("Create a recipe.\n");

    // Writing to a String cannot fail.
    let _ = writeln!(out, "Available ingredients: {}", request.ingredients.join(", "));
    if request.dietary_restrictions.is_empty() {
        out.push_str("Dietary restrictions: none\n");
    } else {
        let _ = writeln!(
            out,
            "Dietary restrictions: {}",
            request.dietary_restrictions.join(", ")
        );
    }
    let _ = writeln!(out, "Servings: {}", request.servings);
    let _ = writeln!(out, "Complexity: {}", request.complexity);

    if let Some(cuisine) = &request.cuisine_type {
        let _ = writeln!(out, "Cuisine: {cuisine}");
        let characteristics = catalog.cuisines.characteristics_of(cuisine);
        if !characteristics.is_empty() {
            write_cuisine_context(&mut out, &characteristics);
        }
    }

    if !request.dietary_restrictions.is_empty() {
        let mut header_written = false;
        for ingredient in &request.ingredients {
            if catalog.ingredients.get(ingredient).is_none() {
                continue;
            }
            let subs = catalog
                .ingredients
                .substitutes_for(ingredient, request.dietary_restrictions.as_slice());
            if subs.is_empty() {
                continue;
            }
            if !header_written {
                out.push_str("Known substitutions if an ingredient conflicts with the restrictions:\n");
                header_written = true;
            }
            let _ = writeln!(out, "- {ingredient}: {}", subs.join(", "));
        }
    }

    out.push('\n');
    out.push_str(RESPONSE_SHAPE);
    out
}

fn write_cuisine_context(out: &mut String, c: &CuisineCharacteristics) {
    if !c.common_ingredients.is_empty() {
        let _ = writeln!(out, "Typical ingredients: {}", c.common_ingredients.join(", "));
    }
    if !c.common_techniques.is_empty() {
        let _ = writeln!(out, "Typical techniques: {}", c.common_techniques.join(", "));
    }
    let _ = writeln!(out, "Flavor profile: {}", c.flavor_profile);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipes::Complexity;

    fn request() -> RecipeRequest {
        RecipeRequest {
            ingredients: vec!["chicken".into(), "rice".into()],
            dietary_restrictions: vec![],
            cuisine_type: None,
            servings: 4,
            complexity: Complexity::Hard,
        }
    }

    #[test]
    fn basic_fields_rendered() {
        let catalog = Catalog::embedded().unwrap();
        let prompt = build_user_prompt(&request(), &catalog);
        assert!(prompt.contains("Available ingredients: chicken, rice\n"));
        assert!(prompt.contains("Dietary restrictions: none\n"));
        assert!(prompt.contains("Servings: 4\n"));
        assert!(prompt.contains("Complexity: hard\n"));
        assert!(!prompt.contains("Cuisine:"));
        assert!(prompt.contains("\"nutritional_info\""));
    }

    #[test]
    fn known_cuisine_adds_context() {
        let catalog = Catalog::embedded().unwrap();
        let mut req = request();
        req.cuisine_type = Some("Japanese".into());
        let prompt = build_user_prompt(&req, &catalog);
        assert!(prompt.contains("Cuisine: Japanese\n"));
        assert!(prompt.contains("Flavor profile: Clean, umami, subtle\n"));
        assert!(prompt.contains("Typical techniques: grilling, simmering, raw preparation\n"));
    }

    #[test]
    fn unknown_cuisine_has_no_context() {
        let catalog = Catalog::embedded().unwrap();
        let mut req = request();
        req.cuisine_type = Some("lunar".into());
        let prompt = build_user_prompt(&req, &catalog);
        assert!(prompt.contains("Cuisine: lunar\n"));
        assert!(!prompt.contains("Flavor profile:"));
    }

    #[test]
    fn restrictions_add_substitution_hints() {
        let catalog = Catalog::embedded().unwrap();
        let mut req = request();
        req.dietary_restrictions = vec!["vegan".into()];
        let prompt = build_user_prompt(&req, &catalog);
        assert!(prompt.contains("Dietary restrictions: vegan\n"));
        assert!(prompt.contains("- chicken: "));
        assert!(prompt.contains("seitan"));
        assert!(prompt.contains("- rice: quinoa, couscous, barley\n"));
    }
}
