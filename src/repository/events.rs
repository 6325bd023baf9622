//! Event-specific queries

use super::{
    query::{OrderBy, Predicate, SelectQuery},
    Resource, ResourceRepository,
};
use crate::{
    error::AppResult,
    models::{
        enums::ActivityStatus,
        event::{Event, EventColumn},
    },
};

impl ResourceRepository<Event> {
    /// Upcoming events that have not started yet, soonest first
    pub async fn upcoming(&self, limit: i64) -> AppResult<Vec<Event>> {
        let query = SelectQuery::new(Event::TABLE)
            .filter(Predicate::Eq(EventColumn::Status, ActivityStatus::Upcoming.into()))
            .filter(Predicate::AfterNow(EventColumn::Date))
            .order_by(OrderBy::Asc(EventColumn::Date));
        self.list(&query, limit, "listing upcoming events").await
    }
}
