//! Contact handlers (`/api/contactos`).

use axum::{
    Json,
    extract::{Path, State},
};

use super::dto::{ContactRequest, MessageResponse, parse_identity};
use super::error::ApiErrorResponse;
use super::extract::JsonBody;
use super::handlers::AppState;
use crate::domain::{Contact, DocumentId, Timestamp};
use crate::infrastructure::DocumentRepository;

const INVALID_CONTACT_ID: &str = "ID de contacto inválido";
const CONTACT_NOT_FOUND: &str = "Contacto no encontrado";
const CONTACT_DELETED: &str = "Contacto eliminado correctamente";

/// `GET /api/contactos`: newest first.
///
/// # Errors
///
/// Returns 500 if the store fails.
pub async fn list_contacts(
    State(state): State<AppState>,
) -> Result<Json<Vec<Contact>>, ApiErrorResponse> {
    let contacts = state.contacts.list().await?;
    Ok(Json(contacts))
}

/// `POST /api/contactos`
///
/// # Errors
///
/// Returns 400 for a blank name or malformed body and 500 if the store fails.
pub async fn create_contact(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<ContactRequest>,
) -> Result<Json<Contact>, ApiErrorResponse> {
    let changes = request.validate()?;

    let contact = Contact::new(DocumentId::generate(), changes.name, Timestamp::now())
        .with_company(changes.company)
        .with_phones(changes.phones)
        .with_emails(changes.emails);

    let stored = state.contacts.insert(&contact).await?;

    tracing::info!(contact_id = %stored.contact_id, "Contact created");
    Ok(Json(stored))
}

/// `GET /api/contactos/{id}`
///
/// # Errors
///
/// Returns 400 for a malformed identity, 404 if absent, 500 if the store fails.
pub async fn get_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Contact>, ApiErrorResponse> {
    let contact_id = parse_identity(&id, INVALID_CONTACT_ID)?;

    state
        .contacts
        .find_by_id(&contact_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiErrorResponse::not_found(CONTACT_NOT_FOUND))
}

/// `PUT /api/contactos/{id}`: replaces name, company, phones and emails.
///
/// # Errors
///
/// Returns 400 for a malformed identity, blank name or malformed body,
/// 404 if absent, and 500 if the store fails.
pub async fn update_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(request): JsonBody<ContactRequest>,
) -> Result<Json<Contact>, ApiErrorResponse> {
    let contact_id = parse_identity(&id, INVALID_CONTACT_ID)?;
    let changes = request.validate()?;

    let updated = state
        .contacts
        .update(&contact_id, &changes)
        .await?
        .ok_or_else(|| ApiErrorResponse::not_found(CONTACT_NOT_FOUND))?;

    tracing::info!(contact_id = %contact_id, "Contact updated");
    Ok(Json(updated))
}

/// `DELETE /api/contactos/{id}`
///
/// # Errors
///
/// Returns 400 for a malformed identity, 404 if absent, and a masked 500 if
/// the store fails.
pub async fn delete_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiErrorResponse> {
    let contact_id = parse_identity(&id, INVALID_CONTACT_ID)?;

    let deleted = state
        .contacts
        .delete(&contact_id)
        .await
        .map_err(|error| ApiErrorResponse::masked(&error, "delete_contact"))?;

    if !deleted {
        return Err(ApiErrorResponse::not_found(CONTACT_NOT_FOUND));
    }

    tracing::info!(contact_id = %contact_id, "Contact deleted");
    Ok(Json(MessageResponse {
        message: CONTACT_DELETED,
    }))
}
