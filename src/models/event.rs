//! Event model (workshops, trainings, forums, debates)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::enums::{ActivityStatus, EventType};
use crate::repository::Resource;

crate::resource_columns! {
    pub enum EventColumn {
        Title => ("title", Text),
        Description => ("description", Text),
        Date => ("date", Timestamp),
        EndDate => ("end_date", Timestamp),
        Location => ("location", Text),
        Type => ("type", Text),
        Status => ("status", Text),
        Organizer => ("organizer", Text),
        MaxParticipants => ("max_participants", Integer),
        RegistrationUrl => ("registration_url", Text),
        ImageUrl => ("image_url", Text),
        Slug => ("slug", Text),
    }
}

/// Event record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    /// Start of the event
    pub date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
    pub status: String,
    pub organizer: Option<String>,
    pub max_participants: Option<i32>,
    pub registration_url: Option<String>,
    pub image_url: Option<String>,
    pub slug: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create event request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEvent {
    #[validate(
        required(message = "title is required"),
        length(min = 1, message = "title is required")
    )]
    pub title: Option<String>,
    pub description: Option<String>,
    /// Start (RFC 3339 or YYYY-MM-DD)
    #[serde(default, deserialize_with = "super::flexible_timestamp")]
    pub date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "super::flexible_timestamp")]
    pub end_date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    #[validate(required(message = "type is required"))]
    #[serde(rename = "type")]
    pub kind: Option<EventType>,
    pub status: Option<ActivityStatus>,
    pub organizer: Option<String>,
    #[validate(range(min = 1, message = "maxParticipants must be positive"))]
    pub max_participants: Option<i32>,
    pub registration_url: Option<String>,
    pub image_url: Option<String>,
    pub slug: Option<String>,
}

/// Update event request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEvent {
    #[validate(length(min = 1, message = "title cannot be empty"))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "super::flexible_timestamp")]
    pub date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "super::flexible_timestamp")]
    pub end_date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<EventType>,
    pub status: Option<ActivityStatus>,
    pub organizer: Option<String>,
    #[validate(range(min = 1, message = "maxParticipants must be positive"))]
    pub max_participants: Option<i32>,
    pub registration_url: Option<String>,
    pub image_url: Option<String>,
    pub slug: Option<String>,
}

payload_fields!(CreateEvent => EventColumn {
    title => Title,
    description => Description,
    date => Date,
    end_date => EndDate,
    location => Location,
    kind => Type,
    status => Status,
    organizer => Organizer,
    max_participants => MaxParticipants,
    registration_url => RegistrationUrl,
    image_url => ImageUrl,
    slug => Slug,
});

payload_fields!(UpdateEvent => EventColumn {
    title => Title,
    description => Description,
    date => Date,
    end_date => EndDate,
    location => Location,
    kind => Type,
    status => Status,
    organizer => Organizer,
    max_participants => MaxParticipants,
    registration_url => RegistrationUrl,
    image_url => ImageUrl,
    slug => Slug,
});

impl Resource for Event {
    type Column = EventColumn;
    type Create = CreateEvent;
    type Update = UpdateEvent;

    const TABLE: &'static str = "eventos";
    const LABEL: &'static str = "Event";
    const SEARCH_COLUMNS: &'static [EventColumn] = &[EventColumn::Title, EventColumn::Description];
    const SLUG: EventColumn = EventColumn::Slug;
    const SLUG_SOURCE: EventColumn = EventColumn::Title;
}
