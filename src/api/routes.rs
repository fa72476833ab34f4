//! Routing definitions.

use axum::Router;
use axum::routing::{get, put};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::contacts::{create_contact, delete_contact, get_contact, list_contacts, update_contact};
use super::handlers::{AppState, health_check, root};
use super::ingredients::{
    create_ingredient, delete_ingredient, get_ingredient, list_ingredients, update_ingredient,
};
use super::ledger::{
    create_daily_record, create_record, delete_transaction, list_daily_records, list_records,
    update_transaction,
};
use super::recipes::{create_recipe, delete_recipe, get_recipe, list_recipes, update_recipe};

/// Creates the API router with every route and middleware.
///
/// # Examples
///
/// ```ignore
/// let router = create_router(AppState::in_memory());
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:4000").await?;
/// axum::serve(listener, router).await?;
/// ```
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        // Ledger
        .route("/api/records", get(list_records).post(create_record))
        .route(
            "/api/transactions/{id}",
            put(update_transaction).delete(delete_transaction),
        )
        .route(
            "/api/daily-records",
            get(list_daily_records).post(create_daily_record),
        )
        // Contacts
        .route("/api/contactos", get(list_contacts).post(create_contact))
        .route(
            "/api/contactos/{id}",
            get(get_contact).put(update_contact).delete(delete_contact),
        )
        // Ingredients
        .route(
            "/api/ingredientes",
            get(list_ingredients).post(create_ingredient),
        )
        .route(
            "/api/ingredientes/{id}",
            get(get_ingredient)
                .put(update_ingredient)
                .delete(delete_ingredient),
        )
        // Recipes
        .route("/api/recetas", get(list_recipes).post(create_recipe))
        .route(
            "/api/recetas/{id}",
            get(get_recipe).put(update_recipe).delete(delete_recipe),
        )
        .layer(TraceLayer::new_for_http())
        .layer(create_cors_layer())
        .with_state(state)
}

fn create_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use rstest::rstest;
    use tower::ServiceExt;

    #[rstest]
    #[tokio::test]
    async fn test_root_banner() {
        let response = create_router(AppState::in_memory())
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"API funcionando correctamente");
    }

    #[rstest]
    #[tokio::test]
    async fn test_health_check() {
        let response = create_router(AppState::in_memory())
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    }

    #[rstest]
    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let response = create_router(AppState::in_memory())
            .oneshot(
                Request::builder()
                    .uri("/api/unknown")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
