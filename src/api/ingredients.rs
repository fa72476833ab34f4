//! Ingredient handlers (`/api/ingredientes`).

use axum::{
    Json,
    extract::{Path, State},
};

use super::dto::{INVALID_INGREDIENT_ID, IngredientRequest, MessageResponse, parse_identity};
use super::error::ApiErrorResponse;
use super::extract::JsonBody;
use super::handlers::AppState;
use crate::domain::{DocumentId, Ingredient, Timestamp};
use crate::infrastructure::DocumentRepository;

const INGREDIENT_NOT_FOUND: &str = "Ingrediente no encontrado";
const INGREDIENT_DELETED: &str = "Ingrediente eliminado correctamente";

/// `GET /api/ingredientes`: newest first.
///
/// # Errors
///
/// Returns 500 if the store fails.
pub async fn list_ingredients(
    State(state): State<AppState>,
) -> Result<Json<Vec<Ingredient>>, ApiErrorResponse> {
    let ingredients = state.ingredients.list().await?;
    Ok(Json(ingredients))
}

/// `POST /api/ingredientes`
///
/// # Errors
///
/// Returns 400 when the name, value or weight is missing, 500 if the store fails.
pub async fn create_ingredient(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<IngredientRequest>,
) -> Result<Json<Ingredient>, ApiErrorResponse> {
    let fields = request.validate()?;
    let ingredient = Ingredient::new(DocumentId::generate(), fields, Timestamp::now());

    let stored = state.ingredients.insert(&ingredient).await?;

    tracing::info!(ingredient_id = %stored.ingredient_id, name = %stored.name, "Ingredient created");
    Ok(Json(stored))
}

/// `GET /api/ingredientes/{id}`
///
/// # Errors
///
/// Returns 400 for a malformed identity, 404 if absent, 500 if the store fails.
pub async fn get_ingredient(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Ingredient>, ApiErrorResponse> {
    let ingredient_id = parse_identity(&id, INVALID_INGREDIENT_ID)?;

    state
        .ingredients
        .find_by_id(&ingredient_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiErrorResponse::not_found(INGREDIENT_NOT_FOUND))
}

/// `PUT /api/ingredientes/{id}`: replaces supplier, name, value and weight.
///
/// The identity is checked before the body.
///
/// # Errors
///
/// Returns 400 for a malformed identity or missing field, 404 if absent,
/// and 500 if the store fails.
pub async fn update_ingredient(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(request): JsonBody<IngredientRequest>,
) -> Result<Json<Ingredient>, ApiErrorResponse> {
    let ingredient_id = parse_identity(&id, INVALID_INGREDIENT_ID)?;
    let fields = request.validate()?;

    let updated = state
        .ingredients
        .update(&ingredient_id, &fields)
        .await?
        .ok_or_else(|| ApiErrorResponse::not_found(INGREDIENT_NOT_FOUND))?;

    tracing::info!(ingredient_id = %ingredient_id, "Ingredient updated");
    Ok(Json(updated))
}

/// `DELETE /api/ingredientes/{id}`
///
/// Recipes referencing the ingredient are left as they are; their entries
/// read back with `ingrediente: null`.
///
/// # Errors
///
/// Returns 400 for a malformed identity, 404 if absent, and a masked 500 if
/// the store fails.
pub async fn delete_ingredient(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiErrorResponse> {
    let ingredient_id = parse_identity(&id, INVALID_INGREDIENT_ID)?;

    let deleted = state
        .ingredients
        .delete(&ingredient_id)
        .await
        .map_err(|error| ApiErrorResponse::masked(&error, "delete_ingredient"))?;

    if !deleted {
        return Err(ApiErrorResponse::not_found(INGREDIENT_NOT_FOUND));
    }

    tracing::info!(ingredient_id = %ingredient_id, "Ingredient deleted");
    Ok(Json(MessageResponse {
        message: INGREDIENT_DELETED,
    }))
}
