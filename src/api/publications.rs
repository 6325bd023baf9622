//! Publication endpoints beyond the shared CRUD set

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use axum_extra::extract::WithRejection;

use super::resources::{self, LimitQuery, ListParams};
use crate::{
    error::{AppError, AppResult},
    models::{ApiResponse, Publication},
    repository::WithCategory,
    AppState,
};

/// List publications with their category name and color
#[utoipa::path(
    get,
    path = "/publicaciones/with-category",
    tag = "publicaciones",
    params(
        ("page" = Option<i64>, Query, description = "Page number, from 1"),
        ("limit" = Option<i64>, Query, description = "Page size"),
        ("categoria" = Option<String>, Query, description = "Category slug"),
    ),
    responses(
        (status = 200, description = "Publications with category", body = [Publication]),
        (status = 400, description = "Unknown filter or bad value", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_with_category(
    State(state): State<AppState>,
    mut params: ListParams,
) -> AppResult<Json<ApiResponse<Vec<WithCategory<Publication>>>>> {
    let service = &state.services.publications;
    let category = params.take("categoria");
    let filters = params.filters()?;
    let page = service
        .list_with_category(params.page_request(service), &filters, category)
        .await?;
    Ok(Json(ApiResponse::paginated("Publications retrieved", page)))
}

/// Featured published publications, newest first
#[utoipa::path(
    get,
    path = "/publicaciones/featured",
    tag = "publicaciones",
    params(LimitQuery),
    responses(
        (status = 200, description = "Featured publications", body = [Publication])
    )
)]
pub async fn featured(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<LimitQuery>, AppError>,
) -> AppResult<Json<ApiResponse<Vec<WithCategory<Publication>>>>> {
    let data = state.services.publications.featured(query.limit).await?;
    Ok(Json(ApiResponse::ok("Featured publications retrieved", data)))
}

/// Search title, description and author, combined with equality filters
#[utoipa::path(
    get,
    path = "/publicaciones/search-advanced",
    tag = "publicaciones",
    params(
        ("q" = String, Query, description = "Search term"),
        ("categoria" = Option<String>, Query, description = "Category slug"),
        ("page" = Option<i64>, Query, description = "Page number, from 1"),
        ("limit" = Option<i64>, Query, description = "Page size"),
    ),
    responses(
        (status = 200, description = "Matching publications", body = [Publication]),
        (status = 400, description = "Missing search term", body = crate::error::ErrorResponse)
    )
)]
pub async fn search_advanced(
    State(state): State<AppState>,
    mut params: ListParams,
) -> AppResult<Json<ApiResponse<Vec<WithCategory<Publication>>>>> {
    let service = &state.services.publications;
    let category = params.take("categoria");
    let filters = params.filters()?;
    let page = service
        .search_advanced(
            params.q.as_deref(),
            &filters,
            category,
            params.page_request(service),
        )
        .await?;
    Ok(Json(ApiResponse::paginated("Advanced search completed", page)))
}

pub fn router() -> Router<AppState> {
    resources::routes::<Publication>()
        .route("/with-category", get(list_with_category))
        .route("/featured", get(featured))
        .route("/search-advanced", get(search_advanced))
}
