//! Category model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::repository::Resource;

crate::resource_columns! {
    pub enum CategoryColumn {
        Name => ("name", Text),
        Description => ("description", Text),
        Icon => ("icon", Text),
        Color => ("color", Text),
        Slug => ("slug", Text),
        IsActive => ("is_active", Boolean),
    }
}

/// Category grouping publications and multimedia
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    /// Display color, e.g. `#1d4ed8`
    pub color: Option<String>,
    pub slug: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategory {
    #[validate(
        required(message = "name is required"),
        length(min = 1, message = "name is required")
    )]
    pub name: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub slug: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategory {
    #[validate(length(min = 1, message = "name cannot be empty"))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub slug: Option<String>,
    pub is_active: Option<bool>,
}

payload_fields!(CreateCategory => CategoryColumn {
    name => Name,
    description => Description,
    icon => Icon,
    color => Color,
    slug => Slug,
    is_active => IsActive,
});

payload_fields!(UpdateCategory => CategoryColumn {
    name => Name,
    description => Description,
    icon => Icon,
    color => Color,
    slug => Slug,
    is_active => IsActive,
});

impl Resource for Category {
    type Column = CategoryColumn;
    type Create = CreateCategory;
    type Update = UpdateCategory;

    const TABLE: &'static str = "categorias";
    const LABEL: &'static str = "Category";
    const SEARCH_COLUMNS: &'static [CategoryColumn] =
        &[CategoryColumn::Name, CategoryColumn::Description];
    const SLUG: CategoryColumn = CategoryColumn::Slug;
    const SLUG_SOURCE: CategoryColumn = CategoryColumn::Name;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{FieldValue, Payload};

    #[test]
    fn test_name_is_required() {
        let body: CreateCategory = serde_json::from_str(r#"{"color":"red"}"#).unwrap();
        assert!(body.validate().is_err());
    }

    #[test]
    fn test_is_active_accepts_camel_case() {
        let body: UpdateCategory = serde_json::from_str(r#"{"isActive":false}"#).unwrap();
        let fields = body.into_fields();
        assert_eq!(
            fields.get(CategoryColumn::IsActive),
            Some(&FieldValue::Boolean(Some(false)))
        );
    }
}
