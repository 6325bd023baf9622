//! Generic content service: pagination rules, slug derivation and the
//! not-found mapping shared by every resource

use validator::Validate;

use super::slug::slugify;
use crate::{
    config::PaginationConfig,
    error::{AppError, AppResult},
    repository::{
        Column, FieldValue, Fields, Filters, PageRequest, Paginated, Payload, Resource,
        ResourceRepository,
    },
};

/// Active listings return a single large page
pub const ACTIVE_PAGE: PageRequest = PageRequest { page: 1, limit: 100 };

pub struct ResourceService<R: Resource> {
    repository: ResourceRepository<R>,
    pagination: PaginationConfig,
}

impl<R: Resource> Clone for ResourceService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: self.repository.clone(),
            pagination: self.pagination,
        }
    }
}

impl<R: Resource> ResourceService<R> {
    pub fn new(repository: ResourceRepository<R>, pagination: PaginationConfig) -> Self {
        Self {
            repository,
            pagination,
        }
    }

    pub fn repository(&self) -> &ResourceRepository<R> {
        &self.repository
    }

    /// Clamp client-supplied paging values
    pub fn page_request(&self, page: Option<i64>, limit: Option<i64>) -> PageRequest {
        let (page, limit) = self.pagination.clamp(page, limit);
        PageRequest { page, limit }
    }

    /// Clamp a plain `limit` (lists without a pagination block)
    pub fn limit(&self, limit: Option<i64>, default: i64) -> i64 {
        limit
            .filter(|l| *l >= 1)
            .unwrap_or(default)
            .min(self.pagination.max_limit)
    }

    pub async fn list(
        &self,
        page: PageRequest,
        filters: &Filters<R::Column>,
    ) -> AppResult<Paginated<R>> {
        self.repository.list_page(page, filters).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<R> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("{} with id {} not found", R::LABEL, id)))
    }

    pub async fn get_by_slug(&self, slug: &str) -> AppResult<R> {
        self.repository
            .get_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("{} '{}' not found", R::LABEL, slug)))
    }

    pub async fn create(&self, payload: R::Create) -> AppResult<R> {
        payload.validate()?;
        let mut fields = payload.into_fields();
        derive_slug::<R>(&mut fields);

        let record = self.repository.insert(&fields).await?;
        tracing::info!(table = R::TABLE, "{} created", R::LABEL);
        Ok(record)
    }

    /// Partial update; a new title (or name) regenerates the slug unless one
    /// is supplied
    pub async fn update(&self, id: i32, payload: R::Update) -> AppResult<R> {
        payload.validate()?;
        let mut fields = payload.into_fields();
        derive_slug::<R>(&mut fields);

        self.repository
            .update(id, &fields)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("{} with id {} not found", R::LABEL, id)))
    }

    pub async fn delete(&self, id: i32) -> AppResult<R> {
        let record = self
            .repository
            .delete(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("{} with id {} not found", R::LABEL, id)))?;
        tracing::info!(table = R::TABLE, id, "{} deleted", R::LABEL);
        Ok(record)
    }

    /// Case-insensitive substring search over the resource's search columns
    pub async fn search(&self, term: Option<&str>, page: PageRequest) -> AppResult<Paginated<R>> {
        let term = require_term(term)?;
        self.repository.search(term, R::SEARCH_COLUMNS, page).await
    }

    /// Listing restricted to one value of an enumerated column
    pub async fn list_by(
        &self,
        column: R::Column,
        value: impl Into<FieldValue>,
        page: PageRequest,
    ) -> AppResult<Paginated<R>> {
        let filters = Filters::new().eq(column, value);
        self.repository.list_page(page, &filters).await
    }
}

/// Reject a missing or blank search term
pub fn require_term(term: Option<&str>) -> AppResult<&str> {
    match term.map(str::trim) {
        Some(t) if !t.is_empty() => Ok(t),
        _ => Err(AppError::Validation("Search term 'q' is required".to_string())),
    }
}

/// Fill in the slug from the slug source column when the client sent none
fn derive_slug<R: Resource>(fields: &mut Fields<R::Column>) {
    let has_slug = matches!(
        fields.get(R::SLUG),
        Some(FieldValue::Text(Some(s))) if !s.trim().is_empty()
    );
    if has_slug {
        return;
    }

    let derived = match fields.get(R::SLUG_SOURCE) {
        Some(FieldValue::Text(Some(source))) => slugify(source),
        _ => return,
    };
    if !derived.is_empty() {
        tracing::debug!(column = R::SLUG.name(), slug = %derived, "derived slug");
        fields.set(R::SLUG, derived);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        category::{Category, CategoryColumn},
        publication::{Publication, PublicationColumn},
    };

    #[test]
    fn test_slug_derived_from_title() {
        let mut fields = Fields::new();
        fields.set(PublicationColumn::Title, "Informe X");
        derive_slug::<Publication>(&mut fields);
        assert_eq!(
            fields.get(PublicationColumn::Slug),
            Some(&FieldValue::from("informe-x"))
        );
    }

    #[test]
    fn test_explicit_slug_is_kept() {
        let mut fields = Fields::new();
        fields.set(PublicationColumn::Title, "Informe X");
        fields.set(PublicationColumn::Slug, "mi-informe");
        derive_slug::<Publication>(&mut fields);
        assert_eq!(
            fields.get(PublicationColumn::Slug),
            Some(&FieldValue::from("mi-informe"))
        );
    }

    #[test]
    fn test_categories_derive_from_name() {
        let mut fields = Fields::new();
        fields.set(CategoryColumn::Name, "Observación Electoral");
        derive_slug::<Category>(&mut fields);
        assert_eq!(
            fields.get(CategoryColumn::Slug),
            Some(&FieldValue::from("observacion-electoral"))
        );
    }

    #[test]
    fn test_no_source_no_slug() {
        let mut fields = Fields::new();
        fields.set(PublicationColumn::Featured, true);
        derive_slug::<Publication>(&mut fields);
        assert!(!fields.contains(PublicationColumn::Slug));
    }

    #[tokio::test]
    async fn test_huge_page_number_is_capped() {
        let pool = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy("postgres://localhost/coalicion")
            .unwrap();
        let service: ResourceService<Publication> =
            ResourceService::new(ResourceRepository::new(pool), PaginationConfig::default());

        let page = service.page_request(Some(i64::MAX), Some(50));
        assert_eq!(page.limit, 50);
        assert!(page.offset() >= 0);
        assert!(page.offset() <= i64::MAX - page.limit);
    }

    #[test]
    fn test_require_term() {
        assert!(require_term(None).is_err());
        assert!(require_term(Some("   ")).is_err());
        assert_eq!(require_term(Some(" voto ")).unwrap(), "voto");
    }
}
