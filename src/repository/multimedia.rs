//! Multimedia-specific queries

use super::{
    query::{Predicate, SelectQuery},
    PageRequest, Paginated, Resource, ResourceRepository, WithCategory,
};
use crate::{
    error::AppResult,
    models::{
        enums::MultimediaType,
        multimedia::{Multimedia, MultimediaColumn},
    },
};

impl ResourceRepository<Multimedia> {
    /// Items of one type with their category, newest first
    pub async fn by_type(
        &self,
        kind: MultimediaType,
        page: PageRequest,
    ) -> AppResult<Paginated<WithCategory<Multimedia>>> {
        let query = SelectQuery::new(Multimedia::TABLE)
            .with_category()
            .filter(Predicate::Eq(MultimediaColumn::Type, kind.into()));
        self.paginate(&query, page, "listing multimedia by type").await
    }

    /// Featured items with their category, newest first
    pub async fn featured(&self, limit: i64) -> AppResult<Vec<WithCategory<Multimedia>>> {
        let query = SelectQuery::new(Multimedia::TABLE)
            .with_category()
            .filter(Predicate::Eq(MultimediaColumn::Featured, true.into()));
        self.list(&query, limit, "listing featured multimedia").await
    }
}
