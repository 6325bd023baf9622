//! Event service

use super::{news::UPCOMING_LIMIT, resources::ResourceService};
use crate::{error::AppResult, models::event::Event};

impl ResourceService<Event> {
    /// Upcoming events that have not started yet, soonest first
    pub async fn upcoming(&self, limit: Option<i64>) -> AppResult<Vec<Event>> {
        let limit = self.limit(limit, UPCOMING_LIMIT);
        self.repository().upcoming(limit).await
    }
}
