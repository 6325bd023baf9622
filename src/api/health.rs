//! Service banner, health checks and the JSON 404 fallback

use axum::{
    extract::State,
    http::{Method, StatusCode, Uri},
    Json,
};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{error::AppResult, AppState};

/// Resources mounted under `/api`
pub const RESOURCES: &[&str] = &[
    "publicaciones",
    "noticias",
    "multimedia",
    "eventos",
    "guias-electorales",
    "verificadores",
    "categorias",
    "uploads",
];

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// Current status of the service
    pub status: String,
    /// Version of the service
    pub version: String,
}

#[derive(Serialize, ToSchema)]
pub struct DatabaseCheck {
    pub success: bool,
    pub message: String,
    /// Clock reported by PostgreSQL
    pub timestamp: DateTime<Utc>,
}

#[derive(Serialize)]
pub struct Banner {
    pub success: bool,
    pub message: String,
    pub version: &'static str,
    pub api: &'static str,
    pub documentation: &'static str,
}

#[derive(Serialize)]
pub struct ApiIndex {
    pub success: bool,
    pub message: String,
    pub version: &'static str,
    pub endpoints: IndexMap<&'static str, String>,
    pub crud: IndexMap<&'static str, &'static str>,
}

#[derive(Serialize)]
pub struct RouteNotFound {
    pub success: bool,
    pub message: String,
    pub path: String,
    pub method: String,
}

/// Liveness check
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness check: asks PostgreSQL for its clock
#[utoipa::path(
    get,
    path = "/test-db",
    tag = "health",
    responses(
        (status = 200, description = "Database reachable", body = DatabaseCheck),
        (status = 500, description = "Database unreachable", body = crate::error::ErrorResponse)
    )
)]
pub async fn database_check(State(state): State<AppState>) -> AppResult<Json<DatabaseCheck>> {
    let timestamp = state.services.database_time().await?;
    Ok(Json(DatabaseCheck {
        success: true,
        message: "Database connection succeeded".to_string(),
        timestamp,
    }))
}

pub async fn banner() -> Json<Banner> {
    Json(Banner {
        success: true,
        message: "Coalición backend running".to_string(),
        version: env!("CARGO_PKG_VERSION"),
        api: "/api",
        documentation: "/swagger-ui",
    })
}

/// Endpoint index served at `/api`
pub async fn api_index() -> Json<ApiIndex> {
    let endpoints = RESOURCES
        .iter()
        .map(|name| (*name, format!("/api/{}", name)))
        .collect();

    let crud = IndexMap::from([
        ("GET /{resource}", "List records (page, limit, equality filters)"),
        ("GET /{resource}/search?q=term", "Search records"),
        ("GET /{resource}/:id", "Get a record by id"),
        ("GET /{resource}/slug/:slug", "Get a record by slug"),
        ("POST /{resource}", "Create a record"),
        ("PUT /{resource}/:id", "Update a record"),
        ("DELETE /{resource}/:id", "Delete a record"),
    ]);

    Json(ApiIndex {
        success: true,
        message: "Coalición API - available endpoints".to_string(),
        version: env!("CARGO_PKG_VERSION"),
        endpoints,
        crud,
    })
}

/// JSON 404 for any unmatched route
pub async fn not_found(method: Method, uri: Uri) -> (StatusCode, Json<RouteNotFound>) {
    (
        StatusCode::NOT_FOUND,
        Json(RouteNotFound {
            success: false,
            message: "Endpoint not found".to_string(),
            path: uri.path().to_string(),
            method: method.to_string(),
        }),
    )
}
