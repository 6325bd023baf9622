//! Electoral guide service

use super::resources::ResourceService;
use crate::{
    error::AppResult,
    models::guide::{ElectoralGuide, GuideColumn},
};

pub const RECENT_LIMIT: i64 = 10;

impl ResourceService<ElectoralGuide> {
    /// Most recent guides by publication date
    pub async fn recent(&self, limit: Option<i64>) -> AppResult<Vec<ElectoralGuide>> {
        let limit = self.limit(limit, RECENT_LIMIT);
        self.repository().recent(GuideColumn::Date, limit).await
    }
}
