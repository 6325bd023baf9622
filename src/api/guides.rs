//! Electoral guide endpoints

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use axum_extra::extract::WithRejection;

use super::resources::{self, LimitQuery, ListParams};
use crate::{
    error::{AppError, AppResult},
    models::{
        enums::{GuideCategory, GuideFormat},
        guide::GuideColumn,
        ApiResponse, ElectoralGuide,
    },
    AppState,
};

#[utoipa::path(
    get,
    path = "/guias-electorales/category/{category}",
    tag = "guias-electorales",
    params(("category" = GuideCategory, Path, description = "manual, procedimiento, normativa or capacitacion")),
    responses(
        (status = 200, description = "Guides in the category", body = [ElectoralGuide]),
        (status = 400, description = "Unknown category", body = crate::error::ErrorResponse)
    )
)]
pub async fn by_category(
    State(state): State<AppState>,
    WithRejection(Path(category), _): WithRejection<Path<String>, AppError>,
    params: ListParams,
) -> AppResult<Json<ApiResponse<Vec<ElectoralGuide>>>> {
    let category: GuideCategory = category.parse()?;
    let service = &state.services.guides;
    let page = service
        .list_by(GuideColumn::Category, category, params.page_request(service))
        .await?;
    Ok(Json(ApiResponse::paginated("Guides retrieved", page)))
}

#[utoipa::path(
    get,
    path = "/guias-electorales/type/{type}",
    tag = "guias-electorales",
    params(("type" = GuideFormat, Path, description = "PDF, DOC or XLSX")),
    responses(
        (status = 200, description = "Guides in the format", body = [ElectoralGuide]),
        (status = 400, description = "Unknown format", body = crate::error::ErrorResponse)
    )
)]
pub async fn by_type(
    State(state): State<AppState>,
    WithRejection(Path(kind), _): WithRejection<Path<String>, AppError>,
    params: ListParams,
) -> AppResult<Json<ApiResponse<Vec<ElectoralGuide>>>> {
    let kind: GuideFormat = kind.parse()?;
    let service = &state.services.guides;
    let page = service
        .list_by(GuideColumn::Type, kind, params.page_request(service))
        .await?;
    Ok(Json(ApiResponse::paginated("Guides retrieved", page)))
}

/// Most recent guides by date
#[utoipa::path(
    get,
    path = "/guias-electorales/recent",
    tag = "guias-electorales",
    params(LimitQuery),
    responses(
        (status = 200, description = "Recent guides", body = [ElectoralGuide])
    )
)]
pub async fn recent(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<LimitQuery>, AppError>,
) -> AppResult<Json<ApiResponse<Vec<ElectoralGuide>>>> {
    let data = state.services.guides.recent(query.limit).await?;
    Ok(Json(ApiResponse::ok("Recent guides retrieved", data)))
}

pub fn router() -> Router<AppState> {
    resources::routes::<ElectoralGuide>()
        .route("/category/:category", get(by_category))
        .route("/type/:type", get(by_type))
        .route("/recent", get(recent))
}
