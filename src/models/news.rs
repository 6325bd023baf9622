//! News model (activities, workshops, press releases)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::enums::{ActivityStatus, NewsType};
use crate::repository::Resource;

crate::resource_columns! {
    pub enum NewsColumn {
        Title => ("title", Text),
        Description => ("description", Text),
        Content => ("content", Text),
        Excerpt => ("excerpt", Text),
        Type => ("type", Text),
        Author => ("author", Text),
        Date => ("date", Timestamp),
        Location => ("location", Text),
        Organizer => ("organizer", Text),
        Participants => ("participants", Text),
        Url => ("url", Text),
        Image => ("image", Text),
        Duration => ("duration", Text),
        RegistrationUrl => ("registration_url", Text),
        Status => ("status", Text),
        Featured => ("featured", Boolean),
        Slug => ("slug", Text),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct News {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
    pub author: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub organizer: Option<String>,
    pub participants: Option<String>,
    pub url: Option<String>,
    pub image: Option<String>,
    pub duration: Option<String>,
    pub registration_url: Option<String>,
    pub status: String,
    pub featured: bool,
    pub slug: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateNews {
    #[validate(
        required(message = "title is required"),
        length(min = 1, message = "title is required")
    )]
    pub title: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    #[validate(required(message = "type is required"))]
    #[serde(rename = "type")]
    pub kind: Option<NewsType>,
    pub author: Option<String>,
    #[serde(default, deserialize_with = "super::flexible_timestamp")]
    pub date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub organizer: Option<String>,
    pub participants: Option<String>,
    pub url: Option<String>,
    pub image: Option<String>,
    pub duration: Option<String>,
    pub registration_url: Option<String>,
    pub status: Option<ActivityStatus>,
    pub featured: Option<bool>,
    pub slug: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNews {
    #[validate(length(min = 1, message = "title cannot be empty"))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<NewsType>,
    pub author: Option<String>,
    #[serde(default, deserialize_with = "super::flexible_timestamp")]
    pub date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub organizer: Option<String>,
    pub participants: Option<String>,
    pub url: Option<String>,
    pub image: Option<String>,
    pub duration: Option<String>,
    pub registration_url: Option<String>,
    pub status: Option<ActivityStatus>,
    pub featured: Option<bool>,
    pub slug: Option<String>,
}

payload_fields!(CreateNews => NewsColumn {
    title => Title,
    description => Description,
    content => Content,
    excerpt => Excerpt,
    kind => Type,
    author => Author,
    date => Date,
    location => Location,
    organizer => Organizer,
    participants => Participants,
    url => Url,
    image => Image,
    duration => Duration,
    registration_url => RegistrationUrl,
    status => Status,
    featured => Featured,
    slug => Slug,
});

payload_fields!(UpdateNews => NewsColumn {
    title => Title,
    description => Description,
    content => Content,
    excerpt => Excerpt,
    kind => Type,
    author => Author,
    date => Date,
    location => Location,
    organizer => Organizer,
    participants => Participants,
    url => Url,
    image => Image,
    duration => Duration,
    registration_url => RegistrationUrl,
    status => Status,
    featured => Featured,
    slug => Slug,
});

impl Resource for News {
    type Column = NewsColumn;
    type Create = CreateNews;
    type Update = UpdateNews;

    const TABLE: &'static str = "noticias";
    const LABEL: &'static str = "News item";
    const SEARCH_COLUMNS: &'static [NewsColumn] = &[NewsColumn::Title, NewsColumn::Description];
    const SLUG: NewsColumn = NewsColumn::Slug;
    const SLUG_SOURCE: NewsColumn = NewsColumn::Title;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::Payload;

    #[test]
    fn test_type_must_be_known() {
        let res = serde_json::from_str::<CreateNews>(r#"{"title":"Taller","type":"webinar"}"#);
        assert!(res.is_err());
    }

    #[test]
    fn test_date_accepts_plain_date() {
        let body: CreateNews = serde_json::from_str(
            r#"{"title":"Taller de observación","type":"taller","date":"2025-05-10"}"#,
        )
        .unwrap();
        assert!(body.validate().is_ok());
        assert_eq!(
            body.date.unwrap().to_rfc3339(),
            "2025-05-10T00:00:00+00:00"
        );
    }

    #[test]
    fn test_update_with_status_only() {
        let body: UpdateNews = serde_json::from_str(r#"{"status":"completed"}"#).unwrap();
        let fields = body.into_fields();
        assert_eq!(fields.len(), 1);
        assert!(fields.contains(NewsColumn::Status));
    }
}
