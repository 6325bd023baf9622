//! CRUD endpoints shared by every content resource
//!
//! Each resource router starts from [`routes`] and adds its own extra reads.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path, Query, State},
    http::{request::Parts, StatusCode},
    routing::get,
    Json, Router,
};
use axum_extra::extract::WithRejection;
use indexmap::IndexMap;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    error::{AppError, AppResult},
    models::ApiResponse,
    repository::{Column, Filters, PageRequest, Resource},
    services::{ResourceAccess, ResourceService, Services},
    AppState,
};

/// Query string of list and search endpoints: paging, search term and
/// equality filters on any remaining key
#[derive(Debug, Default)]
pub struct ListParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub q: Option<String>,
    params: IndexMap<String, String>,
}

impl ListParams {
    pub fn parse(mut params: IndexMap<String, String>) -> AppResult<Self> {
        let page = take_number(&mut params, "page")?;
        let limit = take_number(&mut params, "limit")?;
        let q = params.shift_remove("q");
        Ok(Self {
            page,
            limit,
            q,
            params,
        })
    }

    /// Remove a non-filter parameter, ignoring it when empty
    pub fn take(&mut self, key: &str) -> Option<String> {
        self.params
            .shift_remove(key)
            .filter(|v| !v.trim().is_empty())
    }

    pub fn filters<C: Column>(&self) -> AppResult<Filters<C>> {
        Filters::from_query(&self.params)
    }

    pub fn page_request<R: Resource>(&self, service: &ResourceService<R>) -> PageRequest {
        service.page_request(self.page, self.limit)
    }
}

fn take_number(params: &mut IndexMap<String, String>, key: &str) -> AppResult<Option<i64>> {
    match params.shift_remove(key) {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| AppError::Validation(format!("{} must be a number", key))),
    }
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for ListParams {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<IndexMap<String, String>>::from_request_parts(parts, state).await?;
        ListParams::parse(params)
    }
}

/// `?limit=` of the short lists (featured, upcoming, recent)
#[derive(Debug, Deserialize, IntoParams)]
pub struct LimitQuery {
    /// Maximum number of records
    pub limit: Option<i64>,
}

/// Numeric record id taken from the path
pub struct RecordId(pub i32);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for RecordId {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state).await?;
        parse_id(&raw).map(RecordId)
    }
}

/// Digits only; anything else is a client error
pub fn parse_id(raw: &str) -> AppResult<i32> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AppError::Validation("ID must be a valid number".to_string()));
    }
    raw.parse::<i32>()
        .map_err(|_| AppError::Validation("ID must be a valid number".to_string()))
}

/// List records with pagination and equality filters
pub async fn list<R>(
    State(state): State<AppState>,
    params: ListParams,
) -> AppResult<Json<ApiResponse<Vec<R>>>>
where
    R: Resource,
    Services: ResourceAccess<R>,
{
    let service: &ResourceService<R> = state.services.resource();
    let filters = params.filters::<R::Column>()?;
    let page = service.list(params.page_request(service), &filters).await?;
    Ok(Json(ApiResponse::paginated("Records retrieved", page)))
}

/// Substring search over the resource's text fields
pub async fn search<R>(
    State(state): State<AppState>,
    params: ListParams,
) -> AppResult<Json<ApiResponse<Vec<R>>>>
where
    R: Resource,
    Services: ResourceAccess<R>,
{
    let service: &ResourceService<R> = state.services.resource();
    let page = service
        .search(params.q.as_deref(), params.page_request(service))
        .await?;
    Ok(Json(ApiResponse::paginated("Search completed", page)))
}

pub async fn get_by_id<R>(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AppResult<Json<ApiResponse<R>>>
where
    R: Resource,
    Services: ResourceAccess<R>,
{
    let service: &ResourceService<R> = state.services.resource();
    let record = service.get_by_id(id).await?;
    Ok(Json(ApiResponse::ok("Record found", record)))
}

pub async fn get_by_slug<R>(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<ApiResponse<R>>>
where
    R: Resource,
    Services: ResourceAccess<R>,
{
    let service: &ResourceService<R> = state.services.resource();
    let record = service.get_by_slug(&slug).await?;
    Ok(Json(ApiResponse::ok("Record found", record)))
}

pub async fn create<R>(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<R::Create>, AppError>,
) -> AppResult<(StatusCode, Json<ApiResponse<R>>)>
where
    R: Resource,
    Services: ResourceAccess<R>,
{
    let service: &ResourceService<R> = state.services.resource();
    let record = service.create(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Record created", record)),
    ))
}

pub async fn update<R>(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    WithRejection(Json(payload), _): WithRejection<Json<R::Update>, AppError>,
) -> AppResult<Json<ApiResponse<R>>>
where
    R: Resource,
    Services: ResourceAccess<R>,
{
    let service: &ResourceService<R> = state.services.resource();
    let record = service.update(id, payload).await?;
    Ok(Json(ApiResponse::ok("Record updated", record)))
}

/// Hard delete; responds with the removed record
pub async fn delete<R>(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AppResult<Json<ApiResponse<R>>>
where
    R: Resource,
    Services: ResourceAccess<R>,
{
    let service: &ResourceService<R> = state.services.resource();
    let record = service.delete(id).await?;
    Ok(Json(ApiResponse::ok("Record deleted", record)))
}

/// Base CRUD routes of a resource, to be nested under `/api/<resource>`
pub fn routes<R>() -> Router<AppState>
where
    R: Resource,
    Services: ResourceAccess<R>,
{
    Router::new()
        .route("/", get(list::<R>).post(create::<R>))
        .route("/search", get(search::<R>))
        .route("/slug/:slug", get(get_by_slug::<R>))
        .route(
            "/:id",
            get(get_by_id::<R>).put(update::<R>).delete(delete::<R>),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("42").unwrap(), 42);
        assert!(parse_id("abc").is_err());
        assert!(parse_id("-1").is_err());
        assert!(parse_id("1.5").is_err());
        assert!(parse_id("99999999999").is_err());
    }

    #[test]
    fn test_list_params_split_paging_from_filters() {
        let mut p = ListParams::parse(params(&[
            ("page", "2"),
            ("limit", "20"),
            ("status", "upcoming"),
            ("categoria", "elecciones"),
        ]))
        .unwrap();
        assert_eq!(p.page, Some(2));
        assert_eq!(p.limit, Some(20));
        assert_eq!(p.take("categoria").as_deref(), Some("elecciones"));
        assert_eq!(p.params.len(), 1);
    }

    #[test]
    fn test_list_params_reject_non_numeric_page() {
        assert!(ListParams::parse(params(&[("page", "first")])).is_err());
    }

    #[test]
    fn test_empty_paging_values_fall_back() {
        let p = ListParams::parse(params(&[("page", ""), ("q", "voto")])).unwrap();
        assert_eq!(p.page, None);
        assert_eq!(p.q.as_deref(), Some("voto"));
    }
}
