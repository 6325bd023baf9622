//! Fact-checking verifier model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::enums::VerifierType;
use crate::repository::Resource;

crate::resource_columns! {
    pub enum VerifierColumn {
        Name => ("name", Text),
        Description => ("description", Text),
        Type => ("type", Text),
        IsActive => ("is_active", Boolean),
        Confidence => ("confidence", Integer),
        Methodology => ("methodology", Text),
        SourceUrl => ("source_url", Text),
        VerificationUrl => ("verification_url", Text),
        Slug => ("slug", Text),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Verifier {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
    pub is_active: bool,
    /// Confidence score, 0 to 100
    pub confidence: Option<i32>,
    pub methodology: Option<String>,
    pub source_url: Option<String>,
    pub verification_url: Option<String>,
    pub slug: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateVerifier {
    #[validate(
        required(message = "name is required"),
        length(min = 1, message = "name is required")
    )]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(required(message = "type is required"))]
    #[serde(rename = "type")]
    pub kind: Option<VerifierType>,
    pub is_active: Option<bool>,
    #[validate(range(min = 0, max = 100, message = "confidence must be between 0 and 100"))]
    pub confidence: Option<i32>,
    pub methodology: Option<String>,
    pub source_url: Option<String>,
    pub verification_url: Option<String>,
    pub slug: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVerifier {
    #[validate(length(min = 1, message = "name cannot be empty"))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<VerifierType>,
    pub is_active: Option<bool>,
    #[validate(range(min = 0, max = 100, message = "confidence must be between 0 and 100"))]
    pub confidence: Option<i32>,
    pub methodology: Option<String>,
    pub source_url: Option<String>,
    pub verification_url: Option<String>,
    pub slug: Option<String>,
}

payload_fields!(CreateVerifier => VerifierColumn {
    name => Name,
    description => Description,
    kind => Type,
    is_active => IsActive,
    confidence => Confidence,
    methodology => Methodology,
    source_url => SourceUrl,
    verification_url => VerificationUrl,
    slug => Slug,
});

payload_fields!(UpdateVerifier => VerifierColumn {
    name => Name,
    description => Description,
    kind => Type,
    is_active => IsActive,
    confidence => Confidence,
    methodology => Methodology,
    source_url => SourceUrl,
    verification_url => VerificationUrl,
    slug => Slug,
});

impl Resource for Verifier {
    type Column = VerifierColumn;
    type Create = CreateVerifier;
    type Update = UpdateVerifier;

    const TABLE: &'static str = "verificadores";
    const LABEL: &'static str = "Verifier";
    const SEARCH_COLUMNS: &'static [VerifierColumn] =
        &[VerifierColumn::Name, VerifierColumn::Description];
    const SLUG: VerifierColumn = VerifierColumn::Slug;
    const SLUG_SOURCE: VerifierColumn = VerifierColumn::Name;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_range() {
        let body: CreateVerifier =
            serde_json::from_str(r#"{"name":"ChequeaBot","type":"bot","confidence":140}"#).unwrap();
        assert!(body.validate().is_err());
    }

    #[test]
    fn test_valid_verifier() {
        let body: CreateVerifier =
            serde_json::from_str(r#"{"name":"ChequeaBot","type":"bot","isActive":true}"#).unwrap();
        assert!(body.validate().is_ok());
    }
}
