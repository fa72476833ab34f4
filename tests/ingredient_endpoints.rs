//! Endpoint tests for `/api/ingredientes`.

mod common;

use std::time::Duration;

use axum::http::StatusCode;
use rstest::rstest;
use serde_json::{Value, json};

use common::{create_failing_app, create_test_app, delete, get, id_of, post, put};

fn flour() -> Value {
    json!({ "proveedor": "Molino", "nombre": "Flour", "valor": 1000, "gr": 1000 })
}

// =============================================================================
// POST /api/ingredientes
// =============================================================================

#[rstest]
#[tokio::test]
async fn test_create_ingredient() {
    let app = create_test_app();

    let (status, ingredient) = post(&app, "/api/ingredientes", flour()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ingredient["nombre"], "Flour");
    assert_eq!(ingredient["proveedor"], "Molino");
    assert_eq!(ingredient["valor"].as_f64(), Some(1000.0));
    assert_eq!(ingredient["gr"].as_f64(), Some(1000.0));
    assert_eq!(ingredient["_id"].as_str().unwrap().len(), 24);
}

#[rstest]
#[tokio::test]
async fn test_create_ingredient_accepts_numeric_strings() {
    let app = create_test_app();

    let (status, ingredient) = post(
        &app,
        "/api/ingredientes",
        json!({ "nombre": "Sal", "valor": "12.5", "gr": "500" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ingredient["valor"].as_f64(), Some(12.5));
    assert_eq!(ingredient["gr"].as_f64(), Some(500.0));
    assert_eq!(ingredient["proveedor"], "");
}

#[rstest]
#[case(json!({ "nombre": "", "valor": 1, "gr": 1 }), "El nombre es obligatorio")]
#[case(json!({ "nombre": "Sal", "gr": 1 }), "El valor es obligatorio")]
#[case(json!({ "nombre": "Sal", "valor": 0, "gr": 1 }), "El valor es obligatorio")]
#[case(json!({ "nombre": "Sal", "valor": "abc", "gr": 1 }), "El valor debe ser numérico")]
#[case(json!({ "nombre": "Sal", "valor": 1 }), "El peso en gramos es obligatorio")]
#[case(json!({ "nombre": "Sal", "valor": 1, "gr": "" }), "El peso en gramos es obligatorio")]
#[case(json!({ "nombre": "Sal", "valor": 1, "gr": "abc" }), "El peso en gramos debe ser numérico")]
#[case(json!({ "valor": 0 }), "El nombre es obligatorio")]
#[tokio::test]
async fn test_create_ingredient_validation(#[case] body: Value, #[case] message: &str) {
    let app = create_test_app();

    let (status, error) = post(&app, "/api/ingredientes", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["error"], message);
}

// =============================================================================
// GET /api/ingredientes
// =============================================================================

#[rstest]
#[tokio::test]
async fn test_list_ingredients_newest_first() {
    let app = create_test_app();
    post(&app, "/api/ingredientes", flour()).await;
    tokio::time::sleep(Duration::from_millis(5)).await;
    post(
        &app,
        "/api/ingredientes",
        json!({ "nombre": "Azúcar", "valor": 800, "gr": 1000 }),
    )
    .await;

    let (status, ingredients) = get(&app, "/api/ingredientes").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ingredients.as_array().unwrap().len(), 2);
    assert_eq!(ingredients[0]["nombre"], "Azúcar");
    assert_eq!(ingredients[1]["nombre"], "Flour");
}

#[rstest]
#[tokio::test]
async fn test_get_ingredient_with_malformed_id_is_bad_request() {
    let app = create_test_app();

    let (status, error) = get(&app, "/api/ingredientes/abc").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["error"], "ID de ingrediente inválido");
}

// =============================================================================
// PUT /api/ingredientes/{id}
// =============================================================================

#[rstest]
#[tokio::test]
async fn test_update_ingredient() {
    let app = create_test_app();
    let (_, created) = post(&app, "/api/ingredientes", flour()).await;

    let (status, updated) = put(
        &app,
        &format!("/api/ingredientes/{}", id_of(&created)),
        json!({ "nombre": "Harina 000", "valor": 1200, "gr": 1000 }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["_id"], created["_id"]);
    assert_eq!(updated["nombre"], "Harina 000");
    assert_eq!(updated["valor"].as_f64(), Some(1200.0));
    assert_eq!(updated["proveedor"], "");
    assert_eq!(updated["fechaCreacion"], created["fechaCreacion"]);
}

#[rstest]
#[tokio::test]
async fn test_update_ingredient_checks_identity_before_body() {
    let app = create_test_app();

    let (status, error) = put(&app, "/api/ingredientes/abc", json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["error"], "ID de ingrediente inválido");
}

#[rstest]
#[tokio::test]
async fn test_update_unknown_ingredient_is_not_found() {
    let app = create_test_app();

    let (status, error) = put(&app, "/api/ingredientes/0123456789abcdef01234567", flour()).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["error"], "Ingrediente no encontrado");
}

// =============================================================================
// DELETE /api/ingredientes/{id}
// =============================================================================

#[rstest]
#[tokio::test]
async fn test_delete_ingredient() {
    let app = create_test_app();
    let (_, created) = post(&app, "/api/ingredientes", flour()).await;
    let uri = format!("/api/ingredientes/{}", id_of(&created));

    let (status, body) = delete(&app, &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Ingrediente eliminado correctamente");

    let (status, _) = delete(&app, &uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[rstest]
#[tokio::test]
async fn test_delete_ingredient_store_failure_is_masked() {
    let app = create_failing_app();

    let (status, body) = delete(&app, "/api/ingredientes/0123456789abcdef01234567").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Error interno del servidor");
}
