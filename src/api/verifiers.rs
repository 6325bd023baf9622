//! Verifier endpoints

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use axum_extra::extract::WithRejection;

use super::resources::{self, ListParams};
use crate::{
    error::{AppError, AppResult},
    models::{enums::VerifierType, verifier::VerifierColumn, ApiResponse, Verifier},
    AppState,
};

#[utoipa::path(
    get,
    path = "/verificadores/active",
    tag = "verificadores",
    responses(
        (status = 200, description = "Active verifiers", body = [Verifier])
    )
)]
pub async fn active(State(state): State<AppState>) -> AppResult<Json<ApiResponse<Vec<Verifier>>>> {
    let page = state.services.verifiers.active().await?;
    Ok(Json(ApiResponse::paginated("Active verifiers retrieved", page)))
}

#[utoipa::path(
    get,
    path = "/verificadores/type/{type}",
    tag = "verificadores",
    params(("type" = VerifierType, Path, description = "website, bot, api or tool")),
    responses(
        (status = 200, description = "Verifiers of the type", body = [Verifier]),
        (status = 400, description = "Unknown type", body = crate::error::ErrorResponse)
    )
)]
pub async fn by_type(
    State(state): State<AppState>,
    WithRejection(Path(kind), _): WithRejection<Path<String>, AppError>,
    params: ListParams,
) -> AppResult<Json<ApiResponse<Vec<Verifier>>>> {
    let kind: VerifierType = kind.parse()?;
    let service = &state.services.verifiers;
    let page = service
        .list_by(VerifierColumn::Type, kind, params.page_request(service))
        .await?;
    Ok(Json(ApiResponse::paginated("Verifiers retrieved", page)))
}

pub fn router() -> Router<AppState> {
    resources::routes::<Verifier>()
        .route("/active", get(active))
        .route("/type/:type", get(by_type))
}
