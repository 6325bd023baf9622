//! News endpoints beyond the shared CRUD set

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use axum_extra::extract::WithRejection;

use super::resources::{self, LimitQuery, ListParams};
use crate::{
    error::{AppError, AppResult},
    models::{enums::ActivityStatus, news::NewsColumn, ApiResponse, News},
    AppState,
};

#[utoipa::path(
    get,
    path = "/noticias/status/{status}",
    tag = "noticias",
    params(("status" = ActivityStatus, Path, description = "upcoming, ongoing, completed or cancelled")),
    responses(
        (status = 200, description = "News with the status", body = [News]),
        (status = 400, description = "Unknown status", body = crate::error::ErrorResponse)
    )
)]
pub async fn by_status(
    State(state): State<AppState>,
    WithRejection(Path(status), _): WithRejection<Path<String>, AppError>,
    params: ListParams,
) -> AppResult<Json<ApiResponse<Vec<News>>>> {
    let status: ActivityStatus = status.parse()?;
    let service = &state.services.news;
    let page = service
        .list_by(NewsColumn::Status, status, params.page_request(service))
        .await?;
    Ok(Json(ApiResponse::paginated("News retrieved", page)))
}

/// Upcoming news dated in the future, soonest first
#[utoipa::path(
    get,
    path = "/noticias/upcoming",
    tag = "noticias",
    params(LimitQuery),
    responses(
        (status = 200, description = "Upcoming news", body = [News])
    )
)]
pub async fn upcoming(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<LimitQuery>, AppError>,
) -> AppResult<Json<ApiResponse<Vec<News>>>> {
    let data = state.services.news.upcoming(query.limit).await?;
    Ok(Json(ApiResponse::ok("Upcoming news retrieved", data)))
}

/// News within a date range, oldest first
#[utoipa::path(
    get,
    path = "/noticias/date-range",
    tag = "noticias",
    params(
        ("startDate" = String, Query, description = "Start, RFC 3339 or YYYY-MM-DD"),
        ("endDate" = String, Query, description = "End, RFC 3339 or YYYY-MM-DD"),
        ("page" = Option<i64>, Query, description = "Page number, from 1"),
        ("limit" = Option<i64>, Query, description = "Page size"),
    ),
    responses(
        (status = 200, description = "News in range", body = [News]),
        (status = 400, description = "Missing or invalid bounds", body = crate::error::ErrorResponse)
    )
)]
pub async fn date_range(
    State(state): State<AppState>,
    mut params: ListParams,
) -> AppResult<Json<ApiResponse<Vec<News>>>> {
    let service = &state.services.news;
    let start = params.take("startDate");
    let end = params.take("endDate");
    let page = service
        .date_range(start.as_deref(), end.as_deref(), params.page_request(service))
        .await?;
    Ok(Json(ApiResponse::paginated("News retrieved", page)))
}

#[utoipa::path(
    get,
    path = "/noticias/featured",
    tag = "noticias",
    params(LimitQuery),
    responses(
        (status = 200, description = "Featured news", body = [News])
    )
)]
pub async fn featured(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<LimitQuery>, AppError>,
) -> AppResult<Json<ApiResponse<Vec<News>>>> {
    let data = state.services.news.featured(query.limit).await?;
    Ok(Json(ApiResponse::ok("Featured news retrieved", data)))
}

pub fn router() -> Router<AppState> {
    resources::routes::<News>()
        .route("/status/:status", get(by_status))
        .route("/upcoming", get(upcoming))
        .route("/date-range", get(date_range))
        .route("/featured", get(featured))
}
