//! Publication model (reports, studies, monitoring, research)

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::enums::{PublicationStatus, PublicationType};
use crate::repository::{Categorized, Resource};

crate::resource_columns! {
    pub enum PublicationColumn {
        Title => ("title", Text),
        Description => ("description", Text),
        Type => ("type", Text),
        Date => ("date", Date),
        Author => ("author", Text),
        Pages => ("pages", Integer),
        DownloadUrl => ("download_url", Text),
        PreviewUrl => ("preview_url", Text),
        Thumbnail => ("thumbnail", Text),
        FileSize => ("file_size", Text),
        Tags => ("tags", TextArray),
        Featured => ("featured", Boolean),
        Slug => ("slug", Text),
        Status => ("status", Text),
        CategoriaId => ("categoria_id", Integer),
    }
}

/// Publication record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Publication {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    /// informe, estudio, monitoreo or investigacion
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
    pub date: Option<NaiveDate>,
    pub author: Option<String>,
    pub pages: Option<i32>,
    pub download_url: Option<String>,
    pub preview_url: Option<String>,
    pub thumbnail: Option<String>,
    pub file_size: Option<String>,
    pub tags: Option<Vec<String>>,
    pub featured: bool,
    pub slug: Option<String>,
    /// published, draft or archived
    pub status: String,
    #[serde(rename = "categoria_id")]
    pub categoria_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create publication request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePublication {
    #[validate(
        required(message = "title is required"),
        length(min = 1, message = "title is required")
    )]
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(required(message = "type is required"))]
    #[serde(rename = "type")]
    pub kind: Option<PublicationType>,
    pub date: Option<NaiveDate>,
    pub author: Option<String>,
    #[validate(range(min = 0, message = "pages cannot be negative"))]
    pub pages: Option<i32>,
    pub download_url: Option<String>,
    pub preview_url: Option<String>,
    pub thumbnail: Option<String>,
    pub file_size: Option<String>,
    pub tags: Option<Vec<String>>,
    pub featured: Option<bool>,
    pub slug: Option<String>,
    pub status: Option<PublicationStatus>,
    #[serde(rename = "categoria_id", alias = "categoriaId")]
    pub categoria_id: Option<i32>,
}

/// Update publication request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePublication {
    #[validate(length(min = 1, message = "title cannot be empty"))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<PublicationType>,
    pub date: Option<NaiveDate>,
    pub author: Option<String>,
    #[validate(range(min = 0, message = "pages cannot be negative"))]
    pub pages: Option<i32>,
    pub download_url: Option<String>,
    pub preview_url: Option<String>,
    pub thumbnail: Option<String>,
    pub file_size: Option<String>,
    pub tags: Option<Vec<String>>,
    pub featured: Option<bool>,
    pub slug: Option<String>,
    pub status: Option<PublicationStatus>,
    #[serde(rename = "categoria_id", alias = "categoriaId")]
    pub categoria_id: Option<i32>,
}

payload_fields!(CreatePublication => PublicationColumn {
    title => Title,
    description => Description,
    kind => Type,
    date => Date,
    author => Author,
    pages => Pages,
    download_url => DownloadUrl,
    preview_url => PreviewUrl,
    thumbnail => Thumbnail,
    file_size => FileSize,
    tags => Tags,
    featured => Featured,
    slug => Slug,
    status => Status,
    categoria_id => CategoriaId,
});

payload_fields!(UpdatePublication => PublicationColumn {
    title => Title,
    description => Description,
    kind => Type,
    date => Date,
    author => Author,
    pages => Pages,
    download_url => DownloadUrl,
    preview_url => PreviewUrl,
    thumbnail => Thumbnail,
    file_size => FileSize,
    tags => Tags,
    featured => Featured,
    slug => Slug,
    status => Status,
    categoria_id => CategoriaId,
});

impl Resource for Publication {
    type Column = PublicationColumn;
    type Create = CreatePublication;
    type Update = UpdatePublication;

    const TABLE: &'static str = "publicaciones";
    const LABEL: &'static str = "Publication";
    const SEARCH_COLUMNS: &'static [PublicationColumn] =
        &[PublicationColumn::Title, PublicationColumn::Description];
    const SLUG: PublicationColumn = PublicationColumn::Slug;
    const SLUG_SOURCE: PublicationColumn = PublicationColumn::Title;
}

impl Categorized for Publication {}

/// Columns matched by the advanced publication search
pub const ADVANCED_SEARCH_COLUMNS: &[PublicationColumn] = &[
    PublicationColumn::Title,
    PublicationColumn::Description,
    PublicationColumn::Author,
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{Column, FieldValue, Payload};

    #[test]
    fn test_create_requires_title_and_type() {
        let body: CreatePublication = serde_json::from_str("{}").unwrap();
        let errors = body.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("title"));
        assert!(fields.contains_key("kind"));
    }

    #[test]
    fn test_create_rejects_unknown_type() {
        let res = serde_json::from_str::<CreatePublication>(r#"{"title":"X","type":"blog"}"#);
        assert!(res.is_err());
    }

    #[test]
    fn test_create_maps_only_supplied_fields() {
        let body: CreatePublication = serde_json::from_str(
            r#"{"title":"Informe X","type":"informe","categoria_id":3,"downloadUrl":"/uploads/a.pdf"}"#,
        )
        .unwrap();
        assert!(body.validate().is_ok());
        let fields = body.into_fields();
        assert_eq!(fields.len(), 4);
        assert_eq!(
            fields.get(PublicationColumn::Type),
            Some(&FieldValue::from("informe"))
        );
        assert_eq!(
            fields.get(PublicationColumn::CategoriaId),
            Some(&FieldValue::Integer(Some(3)))
        );
        assert!(!fields.contains(PublicationColumn::Slug));
    }

    #[test]
    fn test_camel_case_filter_names() {
        assert_eq!(
            PublicationColumn::from_name("downloadUrl"),
            Some(PublicationColumn::DownloadUrl)
        );
        assert_eq!(
            PublicationColumn::from_name("categoria_id"),
            Some(PublicationColumn::CategoriaId)
        );
    }
}
