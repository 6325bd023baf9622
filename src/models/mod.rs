//! Data models for the Coalición content tables

/// Implements `Payload` for a request body whose optional fields map one to
/// one onto table columns
macro_rules! payload_fields {
    ($payload:ident => $column:ident { $($field:ident => $variant:ident),+ $(,)? }) => {
        impl $crate::repository::Payload<$column> for $payload {
            fn into_fields(self) -> $crate::repository::Fields<$column> {
                let mut fields = $crate::repository::Fields::new();
                $(fields.set_opt($column::$variant, self.$field);)+
                fields
            }
        }
    };
}

pub mod category;
pub mod common;
pub mod enums;
pub mod event;
pub mod guide;
pub mod multimedia;
pub mod news;
pub mod publication;
pub mod upload;
pub mod verifier;

// Re-export commonly used types
pub use category::Category;
pub use common::ApiResponse;
pub use event::Event;
pub use guide::ElectoralGuide;
pub use multimedia::Multimedia;
pub use news::News;
pub use publication::Publication;
pub use verifier::Verifier;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Deserialize an optional timestamp given either as RFC 3339 or as a plain
/// `YYYY-MM-DD` date
pub(crate) fn flexible_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(s) => crate::repository::parse_timestamp(s.trim())
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid date or timestamp '{}'", s))),
    }
}
