//! Category endpoints

use axum::{extract::State, routing::get, Json, Router};

use super::resources;
use crate::{
    error::AppResult,
    models::{ApiResponse, Category},
    AppState,
};

/// Active categories (single page of up to 100)
#[utoipa::path(
    get,
    path = "/categorias/active",
    tag = "categorias",
    responses(
        (status = 200, description = "Active categories", body = [Category])
    )
)]
pub async fn active(State(state): State<AppState>) -> AppResult<Json<ApiResponse<Vec<Category>>>> {
    let page = state.services.categories.active().await?;
    Ok(Json(ApiResponse::paginated("Active categories retrieved", page)))
}

pub fn router() -> Router<AppState> {
    resources::routes::<Category>().route("/active", get(active))
}
