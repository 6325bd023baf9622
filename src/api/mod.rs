//! HTTP layer: one router per resource, mounted under `/api`

pub mod categories;
pub mod events;
pub mod guides;
pub mod health;
pub mod multimedia;
pub mod news;
pub mod openapi;
pub mod publications;
pub mod resources;
pub mod uploads;
pub mod verifiers;

use axum::{
    http::{header, HeaderValue},
    routing::get,
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    services::ServeDir,
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use crate::{config::CorsConfig, AppState};

/// Room for multipart framing on top of the file size limit
const MULTIPART_OVERHEAD: usize = 1024 * 1024;

/// Build the complete application router
pub fn router(state: AppState) -> Router {
    let uploads_config = &state.config.uploads;
    let max_body = uploads_config.max_file_bytes + MULTIPART_OVERHEAD;
    // Stored files are never rendered inline by the browser
    let static_files = ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::overriding(
            header::CONTENT_DISPOSITION,
            HeaderValue::from_static("attachment"),
        ))
        .service(ServeDir::new(&uploads_config.dir));
    let static_prefix = uploads_config.public_prefix.clone();
    let cors = cors_layer(&state.config.cors);

    let api = Router::new()
        .route("/", get(health::api_index))
        .nest("/publicaciones", publications::router())
        .nest("/categorias", categories::router())
        .nest("/noticias", news::router())
        .nest("/multimedia", multimedia::router())
        .nest("/eventos", events::router())
        .nest("/guias-electorales", guides::router())
        .nest("/verificadores", verifiers::router())
        .nest("/uploads", uploads::router(max_body));

    Router::new()
        .route("/", get(health::banner))
        .route("/health", get(health::health_check))
        .route("/test-db", get(health::database_check))
        .nest("/api", api)
        .nest_service(&static_prefix, static_files)
        .merge(openapi::create_openapi_router())
        .fallback(health::not_found)
        .with_state(state)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Configured origins, or any origin when none are listed
fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use serde_json::Value;
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    use super::*;
    use crate::{config::AppConfig, repository::Repository, services::Services};

    /// Config whose upload root is a fresh temp directory
    fn config_with_uploads(name: &str) -> AppConfig {
        let dir = std::env::temp_dir().join(format!(
            "coalicion-router-{}-{}",
            name,
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        let mut config = AppConfig::default();
        config.uploads.dir = dir;
        config
    }

    /// Router over a lazy pool; only requests rejected before any query
    /// can be exercised without a database
    fn app() -> Router {
        app_with(AppConfig::default())
    }

    fn app_with(config: AppConfig) -> Router {
        let pool = PgPoolOptions::new()
            .connect_lazy(&config.database.url)
            .unwrap();
        let services = Services::new(
            Repository::new(pool),
            config.pagination,
            config.uploads.clone(),
        );
        router(AppState {
            config: Arc::new(config),
            services: Arc::new(services),
        })
    }

    async fn get(uri: &str) -> (StatusCode, Value) {
        let response = app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get("/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_api_index_lists_resources() {
        let (status, body) = get("/api").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["endpoints"]["publicaciones"], "/api/publicaciones");
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let (status, body) = get("/api/nothing-here").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
        assert_eq!(body["path"], "/api/nothing-here");
        assert_eq!(body["method"], "GET");
    }

    #[tokio::test]
    async fn test_non_numeric_id_is_rejected() {
        let (status, body) = get("/api/publicaciones/abc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "ID must be a valid number");
    }

    #[tokio::test]
    async fn test_search_requires_term() {
        let (status, body) = get("/api/noticias/search").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);

        let (status, _) = get("/api/publicaciones/search-advanced?q=").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_filter_is_rejected() {
        let (status, _) = get("/api/eventos?password=x").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_invalid_path_enum_is_rejected() {
        let (status, body) = get("/api/eventos/type/concierto").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().unwrap().contains("taller"));
    }

    #[tokio::test]
    async fn test_date_range_requires_bounds() {
        let (status, _) = get("/api/noticias/date-range?startDate=2024-01-01").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_path_rejection_is_json() {
        let (status, body) = get("/api/eventos/type/%FF").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);

        let (status, body) = get("/api/verificadores/type/%FF").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_download_streams_file_as_attachment() {
        let config = config_with_uploads("download");
        let folder = config.uploads.dir.join("video/mp4");
        std::fs::create_dir_all(&folder).unwrap();
        std::fs::write(folder.join("clip.mp4"), b"0123456789").unwrap();

        let response = app_with(config)
            .oneshot(
                Request::builder()
                    .uri("/api/uploads/download/video/mp4/clip.mp4")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_LENGTH], "10");
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"clip.mp4\""
        );
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"0123456789");
    }

    #[tokio::test]
    async fn test_download_of_missing_file_is_404() {
        let config = config_with_uploads("missing");
        let response = app_with(config)
            .oneshot(
                Request::builder()
                    .uri("/api/uploads/download/video/mp4/none.mp4")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_static_uploads_are_served_as_attachments() {
        let config = config_with_uploads("static");
        let prefix = config.uploads.public_prefix.clone();
        let folder = config.uploads.dir.join("arte/svg");
        std::fs::create_dir_all(&folder).unwrap();
        std::fs::write(folder.join("logo.svg"), b"<svg></svg>").unwrap();

        let response = app_with(config)
            .oneshot(
                Request::builder()
                    .uri(format!("{}/arte/svg/logo.svg", prefix))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_DISPOSITION], "attachment");
    }
}
