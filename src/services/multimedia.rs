//! Multimedia service

use super::resources::ResourceService;
use crate::{
    error::AppResult,
    models::{
        enums::MultimediaType,
        multimedia::{Multimedia, MultimediaColumn},
    },
    repository::{Filters, PageRequest, Paginated, WithCategory},
};

pub const FEATURED_LIMIT: i64 = 5;

impl ResourceService<Multimedia> {
    pub async fn list_with_category(
        &self,
        page: PageRequest,
        filters: &Filters<MultimediaColumn>,
        category: Option<String>,
    ) -> AppResult<Paginated<WithCategory<Multimedia>>> {
        self.repository()
            .list_with_category(page, filters, category)
            .await
    }

    pub async fn by_type(
        &self,
        kind: MultimediaType,
        page: PageRequest,
    ) -> AppResult<Paginated<WithCategory<Multimedia>>> {
        self.repository().by_type(kind, page).await
    }

    pub async fn featured(&self, limit: Option<i64>) -> AppResult<Vec<WithCategory<Multimedia>>> {
        let limit = self.limit(limit, FEATURED_LIMIT);
        self.repository().featured(limit).await
    }
}
