//! Enumerated content fields (types, statuses, categories)
//!
//! Values travel as lowercase strings in JSON and are stored as text columns.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{error::AppError, repository::FieldValue};

/// Declares a string-valued enum with its wire values
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($label:literal) {
            $($variant:ident => $value:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
        pub enum $name {
            $(
                #[serde(rename = $value)]
                $variant,
            )+
        }

        impl $name {
            pub const VALUES: &'static [&'static str] = &[$($value),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $value),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = AppError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($value => Ok($name::$variant),)+
                    _ => Err(AppError::Validation(format!(
                        "Invalid {} '{}'. Must be one of: {}",
                        $label,
                        s,
                        Self::VALUES.join(", ")
                    ))),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }

        impl From<$name> for FieldValue {
            fn from(v: $name) -> Self {
                FieldValue::Text(Some(v.as_str().to_string()))
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Publications
// ---------------------------------------------------------------------------

string_enum! {
    /// Kind of publication
    PublicationType ("type") {
        Informe => "informe",
        Estudio => "estudio",
        Monitoreo => "monitoreo",
        Investigacion => "investigacion",
    }
}

string_enum! {
    /// Editorial state of a publication
    PublicationStatus ("status") {
        Published => "published",
        Draft => "draft",
        Archived => "archived",
    }
}

// ---------------------------------------------------------------------------
// News and events
// ---------------------------------------------------------------------------

string_enum! {
    /// Kind of news item
    NewsType ("type") {
        Actividad => "actividad",
        Taller => "taller",
        Comunicado => "comunicado",
        Evento => "evento",
    }
}

string_enum! {
    /// Lifecycle of a dated activity (news item or event)
    ActivityStatus ("status") {
        Upcoming => "upcoming",
        Ongoing => "ongoing",
        Completed => "completed",
        Cancelled => "cancelled",
    }
}

string_enum! {
    /// Kind of event
    EventType ("type") {
        Taller => "taller",
        Capacitacion => "capacitacion",
        Foro => "foro",
        Debate => "debate",
    }
}

// ---------------------------------------------------------------------------
// Multimedia
// ---------------------------------------------------------------------------

string_enum! {
    /// Kind of multimedia asset, also the upload folder for its files
    MultimediaType ("type") {
        Infografia => "infografia",
        Video => "video",
        Arte => "arte",
        Presentacion => "presentacion",
    }
}

// ---------------------------------------------------------------------------
// Electoral guides
// ---------------------------------------------------------------------------

string_enum! {
    GuideCategory ("category") {
        Manual => "manual",
        Procedimiento => "procedimiento",
        Normativa => "normativa",
        Capacitacion => "capacitacion",
    }
}

string_enum! {
    /// Document format of a guide
    GuideFormat ("type") {
        Pdf => "PDF",
        Doc => "DOC",
        Xlsx => "XLSX",
    }
}

// ---------------------------------------------------------------------------
// Verifiers
// ---------------------------------------------------------------------------

string_enum! {
    VerifierType ("type") {
        Website => "website",
        Bot => "bot",
        Api => "api",
        Tool => "tool",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_values() {
        assert_eq!("informe".parse::<PublicationType>().unwrap(), PublicationType::Informe);
        assert_eq!("PDF".parse::<GuideFormat>().unwrap(), GuideFormat::Pdf);
        assert_eq!("cancelled".parse::<ActivityStatus>().unwrap(), ActivityStatus::Cancelled);
    }

    #[test]
    fn test_parse_unknown_value_lists_allowed() {
        let err = "podcast".parse::<MultimediaType>().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("infografia, video, arte, presentacion"));
    }

    #[test]
    fn test_guide_format_is_case_sensitive() {
        assert!("pdf".parse::<GuideFormat>().is_err());
    }

    #[test]
    fn test_serde_uses_wire_values() {
        let json = serde_json::to_string(&VerifierType::Website).unwrap();
        assert_eq!(json, "\"website\"");
        let t: EventType = serde_json::from_str("\"capacitacion\"").unwrap();
        assert_eq!(t, EventType::Capacitacion);
    }
}
