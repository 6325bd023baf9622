//! Publication-specific queries

use super::{
    query::{OrderBy, Predicate, SelectQuery},
    Filters, PageRequest, Paginated, Pagination, Resource, ResourceRepository, WithCategory,
};
use crate::{
    error::AppResult,
    models::{
        enums::PublicationStatus,
        publication::{Publication, PublicationColumn, ADVANCED_SEARCH_COLUMNS},
    },
};

impl ResourceRepository<Publication> {
    /// Featured and published publications with their category, newest first
    pub async fn featured(&self, limit: i64) -> AppResult<Vec<WithCategory<Publication>>> {
        let query = SelectQuery::new(Publication::TABLE)
            .with_category()
            .filter(Predicate::Eq(PublicationColumn::Featured, true.into()))
            .filter(Predicate::Eq(
                PublicationColumn::Status,
                PublicationStatus::Published.into(),
            ))
            .order_by(OrderBy::Desc(PublicationColumn::Date));
        self.list(&query, limit, "listing featured publications").await
    }

    /// Text search over title, description and author combined with equality
    /// filters and an optional category slug.
    ///
    /// `total` is the number of rows on the returned page, not the number of
    /// matches across all pages, and no page count is reported.
    pub async fn search_advanced(
        &self,
        term: &str,
        filters: &Filters<PublicationColumn>,
        category: Option<String>,
        page: PageRequest,
    ) -> AppResult<Paginated<WithCategory<Publication>>> {
        let mut query = SelectQuery::new(Publication::TABLE)
            .with_category()
            .filter(Predicate::Matches(
                ADVANCED_SEARCH_COLUMNS.to_vec(),
                term.to_string(),
            ))
            .filters(filters);
        if let Some(slug) = category {
            query = query.filter(Predicate::CategorySlug(slug));
        }
        let query = query.order_by(OrderBy::Desc(PublicationColumn::Date));

        let data = self
            .fetch_page::<WithCategory<Publication>>(&query, page, "searching publications")
            .await?;
        let pagination = Pagination::page_only(page, data.len());

        Ok(Paginated { data, pagination })
    }
}
