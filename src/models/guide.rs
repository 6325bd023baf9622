//! Electoral guide model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::enums::{GuideCategory, GuideFormat};
use crate::repository::Resource;

crate::resource_columns! {
    pub enum GuideColumn {
        Title => ("title", Text),
        Description => ("description", Text),
        Category => ("category", Text),
        Type => ("type", Text),
        Version => ("version", Text),
        DownloadUrl => ("download_url", Text),
        Date => ("date", Date),
        Slug => ("slug", Text),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ElectoralGuide {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    /// manual, procedimiento, normativa or capacitacion
    pub category: String,
    /// Document format: PDF, DOC or XLSX
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
    pub version: Option<String>,
    pub download_url: Option<String>,
    pub date: Option<NaiveDate>,
    pub slug: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateGuide {
    #[validate(
        required(message = "title is required"),
        length(min = 1, message = "title is required")
    )]
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(required(message = "category is required"))]
    pub category: Option<GuideCategory>,
    #[validate(required(message = "type is required"))]
    #[serde(rename = "type")]
    pub kind: Option<GuideFormat>,
    pub version: Option<String>,
    pub download_url: Option<String>,
    pub date: Option<NaiveDate>,
    pub slug: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGuide {
    #[validate(length(min = 1, message = "title cannot be empty"))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<GuideCategory>,
    #[serde(rename = "type")]
    pub kind: Option<GuideFormat>,
    pub version: Option<String>,
    pub download_url: Option<String>,
    pub date: Option<NaiveDate>,
    pub slug: Option<String>,
}

payload_fields!(CreateGuide => GuideColumn {
    title => Title,
    description => Description,
    category => Category,
    kind => Type,
    version => Version,
    download_url => DownloadUrl,
    date => Date,
    slug => Slug,
});

payload_fields!(UpdateGuide => GuideColumn {
    title => Title,
    description => Description,
    category => Category,
    kind => Type,
    version => Version,
    download_url => DownloadUrl,
    date => Date,
    slug => Slug,
});

impl Resource for ElectoralGuide {
    type Column = GuideColumn;
    type Create = CreateGuide;
    type Update = UpdateGuide;

    const TABLE: &'static str = "guias_electorales";
    const LABEL: &'static str = "Electoral guide";
    const SEARCH_COLUMNS: &'static [GuideColumn] = &[GuideColumn::Title, GuideColumn::Description];
    const SLUG: GuideColumn = GuideColumn::Slug;
    const SLUG_SOURCE: GuideColumn = GuideColumn::Title;
}
