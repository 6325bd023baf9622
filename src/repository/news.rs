//! News-specific queries

use super::{
    query::{OrderBy, Predicate, SelectQuery},
    Resource, ResourceRepository,
};
use crate::{
    error::AppResult,
    models::{
        enums::ActivityStatus,
        news::{News, NewsColumn},
    },
};

impl ResourceRepository<News> {
    /// Upcoming items dated in the future, soonest first
    pub async fn upcoming(&self, limit: i64) -> AppResult<Vec<News>> {
        let query = SelectQuery::new(News::TABLE)
            .filter(Predicate::Eq(NewsColumn::Status, ActivityStatus::Upcoming.into()))
            .filter(Predicate::AfterNow(NewsColumn::Date))
            .order_by(OrderBy::Asc(NewsColumn::Date));
        self.list(&query, limit, "listing upcoming news").await
    }

    /// Featured items, newest first
    pub async fn featured(&self, limit: i64) -> AppResult<Vec<News>> {
        let query = SelectQuery::new(News::TABLE)
            .filter(Predicate::Eq(NewsColumn::Featured, true.into()))
            .order_by(OrderBy::Desc(NewsColumn::Date));
        self.list(&query, limit, "listing featured news").await
    }
}
