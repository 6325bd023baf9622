//! Multimedia model (infographics, videos, art, presentations)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::enums::MultimediaType;
use crate::repository::{Categorized, Resource};

crate::resource_columns! {
    pub enum MultimediaColumn {
        Title => ("title", Text),
        Description => ("description", Text),
        Type => ("type", Text),
        DownloadUrl => ("download_url", Text),
        PreviewUrl => ("preview_url", Text),
        Thumbnail => ("thumbnail", Text),
        Duration => ("duration", Text),
        Format => ("format", Text),
        Size => ("size", Text),
        Tags => ("tags", TextArray),
        Featured => ("featured", Boolean),
        Slug => ("slug", Text),
        CategoriaId => ("categoria_id", Integer),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Multimedia {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
    pub download_url: Option<String>,
    pub preview_url: Option<String>,
    pub thumbnail: Option<String>,
    /// Video duration, e.g. `12:30`
    pub duration: Option<String>,
    /// Upper-case file extension
    pub format: Option<String>,
    /// Human readable file size
    pub size: Option<String>,
    pub tags: Option<Vec<String>>,
    pub featured: bool,
    pub slug: Option<String>,
    #[serde(rename = "categoria_id")]
    pub categoria_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMultimedia {
    #[validate(
        required(message = "title is required"),
        length(min = 1, message = "title is required")
    )]
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(required(message = "type is required"))]
    #[serde(rename = "type")]
    pub kind: Option<MultimediaType>,
    pub download_url: Option<String>,
    pub preview_url: Option<String>,
    pub thumbnail: Option<String>,
    pub duration: Option<String>,
    pub format: Option<String>,
    pub size: Option<String>,
    pub tags: Option<Vec<String>>,
    pub featured: Option<bool>,
    pub slug: Option<String>,
    #[serde(rename = "categoria_id", alias = "categoriaId")]
    pub categoria_id: Option<i32>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMultimedia {
    #[validate(length(min = 1, message = "title cannot be empty"))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<MultimediaType>,
    pub download_url: Option<String>,
    pub preview_url: Option<String>,
    pub thumbnail: Option<String>,
    pub duration: Option<String>,
    pub format: Option<String>,
    pub size: Option<String>,
    pub tags: Option<Vec<String>>,
    pub featured: Option<bool>,
    pub slug: Option<String>,
    #[serde(rename = "categoria_id", alias = "categoriaId")]
    pub categoria_id: Option<i32>,
}

payload_fields!(CreateMultimedia => MultimediaColumn {
    title => Title,
    description => Description,
    kind => Type,
    download_url => DownloadUrl,
    preview_url => PreviewUrl,
    thumbnail => Thumbnail,
    duration => Duration,
    format => Format,
    size => Size,
    tags => Tags,
    featured => Featured,
    slug => Slug,
    categoria_id => CategoriaId,
});

payload_fields!(UpdateMultimedia => MultimediaColumn {
    title => Title,
    description => Description,
    kind => Type,
    download_url => DownloadUrl,
    preview_url => PreviewUrl,
    thumbnail => Thumbnail,
    duration => Duration,
    format => Format,
    size => Size,
    tags => Tags,
    featured => Featured,
    slug => Slug,
    categoria_id => CategoriaId,
});

impl Resource for Multimedia {
    type Column = MultimediaColumn;
    type Create = CreateMultimedia;
    type Update = UpdateMultimedia;

    const TABLE: &'static str = "multimedia";
    const LABEL: &'static str = "Multimedia item";
    const SEARCH_COLUMNS: &'static [MultimediaColumn] =
        &[MultimediaColumn::Title, MultimediaColumn::Description];
    const SLUG: MultimediaColumn = MultimediaColumn::Slug;
    const SLUG_SOURCE: MultimediaColumn = MultimediaColumn::Title;
}

impl Categorized for Multimedia {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{FieldValue, Payload};

    #[test]
    fn test_categoria_id_alias() {
        let body: UpdateMultimedia = serde_json::from_str(r#"{"categoriaId":2}"#).unwrap();
        assert_eq!(
            body.into_fields().get(MultimediaColumn::CategoriaId),
            Some(&FieldValue::Integer(Some(2)))
        );
    }

    #[test]
    fn test_tags_bind_as_array() {
        let body: CreateMultimedia = serde_json::from_str(
            r#"{"title":"Mapa","type":"infografia","tags":["mapa","2025"]}"#,
        )
        .unwrap();
        assert_eq!(
            body.into_fields().get(MultimediaColumn::Tags),
            Some(&FieldValue::TextArray(Some(vec!["mapa".into(), "2025".into()])))
        );
    }
}
