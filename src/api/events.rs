//! Event endpoints beyond the shared CRUD set

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
        enums::{ActivityStatus, EventType},
        event::EventColumn,
        ApiResponse, Event,
    },
    AppState,
};

#[utoipa::path(
    get,
    path = "/eventos/status/{status}",
    tag = "eventos",
    params(("status" = ActivityStatus, Path, description = "upcoming, ongoing, completed or cancelled")),
    responses(
        (status = 200, description = "Events with the status", body = [Event]),
        (status = 400, description = "Unknown status", body = crate::error::ErrorResponse)
    )
)]
pub async fn by_status(
    State(state): State<AppState>,
    WithRejection(Path(status), _): WithRejection<Path<String>, AppError>,
    params: ListParams,
) -> AppResult<Json<ApiResponse<Vec<Event>>>> {
    let status: ActivityStatus = status.parse()?;
    let service = &state.services.events;
    let page = service
        .list_by(EventColumn::Status, status, params.page_request(service))
        .await?;
    Ok(Json(ApiResponse::paginated("Events retrieved", page)))
}

/// Upcoming events that have not started, soonest first
#[utoipa::path(
    get,
    path = "/eventos/upcoming",
    tag = "eventos",
    params(LimitQuery),
    responses(
        (status = 200, description = "Upcoming events", body = [Event])
    )
)]
pub async fn upcoming(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<LimitQuery>, AppError>,
) -> AppResult<Json<ApiResponse<Vec<Event>>>> {
    let data = state.services.events.upcoming(query.limit).await?;
    Ok(Json(ApiResponse::ok("Upcoming events retrieved", data)))
}

#[utoipa::path(
    get,
    path = "/eventos/type/{type}",
    tag = "eventos",
    params(("type" = EventType, Path, description = "taller, capacitacion, foro or debate")),
    responses(
        (status = 200, description = "Events of the type", body = [Event]),
        (status = 400, description = "Unknown type", body = crate::error::ErrorResponse)
    )
)]
pub async fn by_type(
    State(state): State<AppState>,
    WithRejection(Path(kind), _): WithRejection<Path<String>, AppError>,
    params: ListParams,
) -> AppResult<Json<ApiResponse<Vec<Event>>>> {
    let kind: EventType = kind.parse()?;
    let service = &state.services.events;
    let page = service
        .list_by(EventColumn::Type, kind, params.page_request(service))
        .await?;
    Ok(Json(ApiResponse::paginated("Events retrieved", page)))
}

pub fn router() -> Router<AppState> {
    resources::routes::<Event>()
        .route("/status/:status", get(by_status))
        .route("/upcoming", get(upcoming))
        .route("/type/:type", get(by_type))
}
