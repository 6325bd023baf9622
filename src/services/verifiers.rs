//! Verifier service

use super::resources::{ResourceService, ACTIVE_PAGE};
use crate::{
    error::AppResult,
    models::verifier::{Verifier, VerifierColumn},
    repository::Paginated,
};

impl ResourceService<Verifier> {
    pub async fn active(&self) -> AppResult<Paginated<Verifier>> {
        self.list_by(VerifierColumn::IsActive, true, ACTIVE_PAGE).await
    }
}
