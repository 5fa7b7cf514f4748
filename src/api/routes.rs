//! API Routes
//!
//! Configures the Axum router with all cache ledger endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    count_handler, get_handler, health_handler, page_handler, replay_handler, store_handler,
    AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `POST /store` - Store a value through the instrumented store operation
/// - `GET /get/:key` - Retrieve a value, decoded per `?as=text|integer|float|raw`
/// - `GET /replay` - Call history of the store operation
/// - `GET /count/:name` - Call counter of an operation
/// - `GET /page?url=` - Fetch a page through the page cache
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/store", post(store_handler))
        .route("/get/:key", get(get_handler))
        .route("/replay", get(replay_handler))
        .route("/count/:name", get(count_handler))
        .route("/page", get(page_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::Cache;
    use crate::error::Result;
    use crate::store::{MemoryStore, SharedStore};
    use crate::web::{CountPolicy, PageFetcher, WebCache};
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use std::sync::Arc;
    use tower::util::ServiceExt;

    struct EchoFetcher;

    #[async_trait]
    impl PageFetcher for EchoFetcher {
        async fn fetch(&self, url: &str) -> Result<String> {
            Ok(url.to_string())
        }
    }

    async fn create_test_app() -> Router {
        let store: SharedStore = Arc::new(MemoryStore::new());
        let cache = Cache::new(store.clone()).await.unwrap();
        let web =
            WebCache::new(store, Arc::new(EchoFetcher), 10, CountPolicy::EveryRequest).unwrap();
        create_router(AppState::new(cache, web))
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = create_test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_store_endpoint() {
        let app = create_test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/store")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"value":"hello"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_get_not_found() {
        let app = create_test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/get/nonexistent")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_replay_endpoint_empty() {
        let app = create_test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/replay")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
