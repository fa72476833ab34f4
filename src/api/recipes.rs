//! Recipe handlers (`/api/recetas`).
//!
//! Recipes are stored with bare ingredient identities. Every response goes
//! through [`resolve_recipes`], which loads the referenced ingredients in one
//! query and substitutes them into the composition.

use std::collections::HashMap;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use super::dto::{MessageResponse, RecipeRequest, parse_identity};
use super::error::ApiErrorResponse;
use super::extract::JsonBody;
use super::handlers::AppState;
use crate::domain::{DocumentId, Recipe, ResolvedRecipe, Timestamp, referenced_ingredients};
use crate::infrastructure::{DocumentRepository, RepositoryError};

const INVALID_RECIPE_ID: &str = "ID de receta inválido";
const RECIPE_NOT_FOUND: &str = "Receta no encontrada";
const RECIPE_DELETED: &str = "Receta eliminada correctamente";

// =============================================================================
// Reference Expansion
// =============================================================================

/// Expands the ingredient references of `recipes`, preserving their order.
///
/// # Errors
///
/// Returns the store error if the ingredient lookup fails.
pub async fn resolve_recipes(
    state: &AppState,
    recipes: &[Recipe],
) -> Result<Vec<ResolvedRecipe>, RepositoryError> {
    let ingredient_ids = referenced_ingredients(recipes);

    let ingredients: HashMap<_, _> = if ingredient_ids.is_empty() {
        HashMap::new()
    } else {
        state
            .ingredients
            .find_many(&ingredient_ids)
            .await?
            .into_iter()
            .map(|ingredient| (ingredient.ingredient_id, ingredient))
            .collect()
    };

    Ok(recipes
        .iter()
        .map(|recipe| recipe.resolve(&ingredients))
        .collect())
}

/// Re-reads a recipe and expands it.
async fn load_resolved(
    state: &AppState,
    recipe_id: &DocumentId,
) -> Result<ResolvedRecipe, ApiErrorResponse> {
    let recipe = state
        .recipes
        .find_by_id(recipe_id)
        .await?
        .ok_or_else(|| ApiErrorResponse::not_found(RECIPE_NOT_FOUND))?;

    resolve_recipes(state, std::slice::from_ref(&recipe))
        .await?
        .pop()
        .ok_or_else(|| ApiErrorResponse::not_found(RECIPE_NOT_FOUND))
}

// =============================================================================
// Handlers
// =============================================================================

/// `GET /api/recetas`: every recipe with expanded composition.
///
/// # Errors
///
/// Returns 500 if the store fails.
pub async fn list_recipes(
    State(state): State<AppState>,
) -> Result<Json<Vec<ResolvedRecipe>>, ApiErrorResponse> {
    let recipes = state.recipes.list().await?;
    let resolved = resolve_recipes(&state, &recipes).await?;
    Ok(Json(resolved))
}

/// `POST /api/recetas`: answers 201 with the stored recipe re-read and expanded.
///
/// # Errors
///
/// Returns 400 for a blank name or malformed ingredient reference and 500 if
/// the store fails.
pub async fn create_recipe(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<RecipeRequest>,
) -> Result<(StatusCode, Json<ResolvedRecipe>), ApiErrorResponse> {
    let fields = request.validate()?;
    let recipe = Recipe::new(DocumentId::generate(), fields, Timestamp::now());

    let stored = state.recipes.insert(&recipe).await?;
    tracing::info!(
        recipe_id = %stored.recipe_id,
        entries = stored.composition.len(),
        "Recipe created"
    );

    let resolved = load_resolved(&state, &stored.recipe_id).await?;
    Ok((StatusCode::CREATED, Json(resolved)))
}

/// `GET /api/recetas/{id}`
///
/// # Errors
///
/// Returns 400 for a malformed identity, 404 if absent, 500 if the store fails.
pub async fn get_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ResolvedRecipe>, ApiErrorResponse> {
    let recipe_id = parse_identity(&id, INVALID_RECIPE_ID)?;
    let resolved = load_resolved(&state, &recipe_id).await?;
    Ok(Json(resolved))
}

/// `PUT /api/recetas/{id}`: full replacement, answered with 201 like creation.
///
/// # Errors
///
/// Returns 400 for a malformed identity, blank name or malformed ingredient
/// reference, 404 if absent, and 500 if the store fails.
pub async fn update_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(request): JsonBody<RecipeRequest>,
) -> Result<(StatusCode, Json<ResolvedRecipe>), ApiErrorResponse> {
    let recipe_id = parse_identity(&id, INVALID_RECIPE_ID)?;
    let fields = request.validate()?;

    state
        .recipes
        .update(&recipe_id, &fields)
        .await?
        .ok_or_else(|| ApiErrorResponse::not_found(RECIPE_NOT_FOUND))?;
    tracing::info!(recipe_id = %recipe_id, "Recipe updated");

    let resolved = load_resolved(&state, &recipe_id).await?;
    Ok((StatusCode::CREATED, Json(resolved)))
}

/// `DELETE /api/recetas/{id}`
///
/// # Errors
///
/// Returns 400 for a malformed identity, 404 if absent, and a masked 500 if
/// the store fails.
pub async fn delete_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiErrorResponse> {
    let recipe_id = parse_identity(&id, INVALID_RECIPE_ID)?;

    let deleted = state
        .recipes
        .delete(&recipe_id)
        .await
        .map_err(|error| ApiErrorResponse::masked(&error, "delete_recipe"))?;

    if !deleted {
        return Err(ApiErrorResponse::not_found(RECIPE_NOT_FOUND));
    }

    tracing::info!(recipe_id = %recipe_id, "Recipe deleted");
    Ok(Json(MessageResponse {
        message: RECIPE_DELETED,
    }))
}
