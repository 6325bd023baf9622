//! Multimedia endpoints beyond the shared CRUD set

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use axum_extra::extract::WithRejection;

use super::resources::{self, LimitQuery, ListParams};
use crate::{
    error::{AppError, AppResult},
    models::{enums::MultimediaType, ApiResponse, Multimedia},
    repository::WithCategory,
    AppState,
};

#[utoipa::path(
    get,
    path = "/multimedia/with-category",
    tag = "multimedia",
    params(
        ("page" = Option<i64>, Query, description = "Page number, from 1"),
        ("limit" = Option<i64>, Query, description = "Page size"),
        ("categoria" = Option<String>, Query, description = "Category slug"),
    ),
    responses(
        (status = 200, description = "Multimedia with category", body = [Multimedia])
    )
)]
pub async fn list_with_category(
    State(state): State<AppState>,
    mut params: ListParams,
) -> AppResult<Json<ApiResponse<Vec<WithCategory<Multimedia>>>>> {
    let service = &state.services.multimedia;
    let category = params.take("categoria");
    let filters = params.filters()?;
    let page = service
        .list_with_category(params.page_request(service), &filters, category)
        .await?;
    Ok(Json(ApiResponse::paginated("Multimedia retrieved", page)))
}

#[utoipa::path(
    get,
    path = "/multimedia/type/{type}",
    tag = "multimedia",
    params(("type" = MultimediaType, Path, description = "infografia, video, arte or presentacion")),
    responses(
        (status = 200, description = "Multimedia of the type", body = [Multimedia]),
        (status = 400, description = "Unknown type", body = crate::error::ErrorResponse)
    )
)]
pub async fn by_type(
    State(state): State<AppState>,
    WithRejection(Path(kind), _): WithRejection<Path<String>, AppError>,
    params: ListParams,
) -> AppResult<Json<ApiResponse<Vec<WithCategory<Multimedia>>>>> {
    let kind: MultimediaType = kind.parse()?;
    let service = &state.services.multimedia;
    let page = service
        .by_type(kind, params.page_request(service))
        .await?;
    Ok(Json(ApiResponse::paginated("Multimedia retrieved", page)))
}

#[utoipa::path(
    get,
    path = "/multimedia/featured",
    tag = "multimedia",
    params(LimitQuery),
    responses(
        (status = 200, description = "Featured multimedia", body = [Multimedia])
    )
)]
pub async fn featured(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<LimitQuery>, AppError>,
) -> AppResult<Json<ApiResponse<Vec<WithCategory<Multimedia>>>>> {
    let data = state.services.multimedia.featured(query.limit).await?;
    Ok(Json(ApiResponse::ok("Featured multimedia retrieved", data)))
}

pub fn router() -> Router<AppState> {
    resources::routes::<Multimedia>()
        .route("/with-category", get(list_with_category))
        .route("/type/:type", get(by_type))
        .route("/featured", get(featured))
}
