//! Category service

use super::resources::{ResourceService, ACTIVE_PAGE};
use crate::{
    error::AppResult,
    models::category::{Category, CategoryColumn},
    repository::Paginated,
};

impl ResourceService<Category> {
    pub async fn active(&self) -> AppResult<Paginated<Category>> {
        self.list_by(CategoryColumn::IsActive, true, ACTIVE_PAGE).await
    }
}
