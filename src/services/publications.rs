//! Publication service

use super::resources::{require_term, ResourceService};
use crate::{
    error::AppResult,
    models::publication::{Publication, PublicationColumn},
    repository::{Filters, PageRequest, Paginated, WithCategory},
};

/// Default size of the featured list
pub const FEATURED_LIMIT: i64 = 5;

impl ResourceService<Publication> {
    /// Publications joined with their category; `category` matches the
    /// category slug
    pub async fn list_with_category(
        &self,
        page: PageRequest,
        filters: &Filters<PublicationColumn>,
        category: Option<String>,
    ) -> AppResult<Paginated<WithCategory<Publication>>> {
        self.repository()
            .list_with_category(page, filters, category)
            .await
    }

    pub async fn featured(&self, limit: Option<i64>) -> AppResult<Vec<WithCategory<Publication>>> {
        let limit = self.limit(limit, FEATURED_LIMIT);
        self.repository().featured(limit).await
    }

    pub async fn search_advanced(
        &self,
        term: Option<&str>,
        filters: &Filters<PublicationColumn>,
        category: Option<String>,
        page: PageRequest,
    ) -> AppResult<Paginated<WithCategory<Publication>>> {
        let term = require_term(term)?;
        self.repository()
            .search_advanced(term, filters, category, page)
            .await
    }
}
