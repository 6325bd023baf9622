//! Repository layer for database operations
//!
//! Every content table goes through the same [`ResourceRepository`]. A table is
//! described by a [`Resource`] implementation: its name, its row type and an
//! enumeration of its writable columns. Column names are never taken from
//! request input, only from those enumerations, and every value is bound as a
//! query parameter.

pub mod events;
pub mod multimedia;
pub mod news;
pub mod publications;
pub mod query;
pub mod resource;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use sqlx::{postgres::PgRow, FromRow, Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        category::Category, event::Event, guide::ElectoralGuide, multimedia::Multimedia,
        news::News, publication::Publication, verifier::Verifier,
    },
};

pub use resource::{ResourceRepository, WithCategory};

/// SQL type family of a column, used to parse filter values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Integer,
    Boolean,
    Date,
    Timestamp,
    TextArray,
}

/// A value bound to a query placeholder
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(Option<String>),
    Integer(Option<i32>),
    BigInt(Option<i64>),
    Boolean(Option<bool>),
    Date(Option<NaiveDate>),
    Timestamp(Option<DateTime<Utc>>),
    TextArray(Option<Vec<String>>),
}

impl FieldValue {
    /// Parse a raw query-string value for a column of the given kind
    pub fn parse(kind: ColumnKind, raw: &str) -> Result<Self, String> {
        let raw = raw.trim();
        match kind {
            ColumnKind::Text => Ok(FieldValue::Text(Some(raw.to_string()))),
            ColumnKind::Integer => raw
                .parse::<i32>()
                .map(|v| FieldValue::Integer(Some(v)))
                .map_err(|_| format!("'{}' is not a valid integer", raw)),
            ColumnKind::Boolean => match raw.to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" => Ok(FieldValue::Boolean(Some(true))),
                "false" | "0" | "no" => Ok(FieldValue::Boolean(Some(false))),
                _ => Err(format!("'{}' is not a valid boolean", raw)),
            },
            ColumnKind::Date => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map(|d| FieldValue::Date(Some(d)))
                .map_err(|_| format!("'{}' is not a valid date (YYYY-MM-DD)", raw)),
            ColumnKind::Timestamp => parse_timestamp(raw)
                .map(|t| FieldValue::Timestamp(Some(t)))
                .ok_or_else(|| format!("'{}' is not a valid date or timestamp", raw)),
            ColumnKind::TextArray => Ok(FieldValue::TextArray(Some(
                raw.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
            ))),
        }
    }
}

/// Accepts RFC 3339 timestamps or plain dates (midnight UTC)
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN).and_utc())
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Text(Some(v))
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Text(Some(v.to_string()))
    }
}

impl From<i32> for FieldValue {
    fn from(v: i32) -> Self {
        FieldValue::Integer(Some(v))
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::BigInt(Some(v))
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        FieldValue::Boolean(Some(v))
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(v: NaiveDate) -> Self {
        FieldValue::Date(Some(v))
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(v: DateTime<Utc>) -> Self {
        FieldValue::Timestamp(Some(v))
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(v: Vec<String>) -> Self {
        FieldValue::TextArray(Some(v))
    }
}

/// Writable column of a resource table
pub trait Column: Copy + Eq + std::fmt::Debug + Send + Sync + 'static {
    /// Every column, in declaration order
    const ALL: &'static [Self];

    /// SQL column name
    fn name(self) -> &'static str;

    fn kind(self) -> ColumnKind;

    /// Resolve a client-supplied name, either the SQL name or its camelCase form
    fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.name() == name || camel_case(c.name()) == name)
    }
}

/// `download_url` -> `downloadUrl`
pub fn camel_case(snake: &str) -> String {
    let mut out = String::with_capacity(snake.len());
    let mut upper = false;
    for ch in snake.chars() {
        if ch == '_' {
            upper = true;
        } else if upper {
            out.extend(ch.to_uppercase());
            upper = false;
        } else {
            out.push(ch);
        }
    }
    out
}

/// Declares the column enumeration of a resource table
#[macro_export]
macro_rules! resource_columns {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($variant:ident => ($col:literal, $kind:ident)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $($variant),+
        }

        impl $crate::repository::Column for $name {
            const ALL: &'static [Self] = &[$($name::$variant),+];

            fn name(self) -> &'static str {
                match self {
                    $($name::$variant => $col),+
                }
            }

            fn kind(self) -> $crate::repository::ColumnKind {
                match self {
                    $($name::$variant => $crate::repository::ColumnKind::$kind),+
                }
            }
        }
    };
}

/// Ordered column/value assignments for an insert or update
#[derive(Debug, Clone, PartialEq)]
pub struct Fields<C: Column> {
    entries: Vec<(C, FieldValue)>,
}

impl<C: Column> Default for Fields<C> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<C: Column> Fields<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a column, replacing any earlier value for it
    pub fn set(&mut self, column: C, value: impl Into<FieldValue>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(c, _)| *c == column) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((column, value)),
        }
    }

    /// Set a column only when a value was supplied
    pub fn set_opt<V: Into<FieldValue>>(&mut self, column: C, value: Option<V>) {
        if let Some(v) = value {
            self.set(column, v);
        }
    }

    pub fn get(&self, column: C) -> Option<&FieldValue> {
        self.entries.iter().find(|(c, _)| *c == column).map(|(_, v)| v)
    }

    pub fn contains(&self, column: C) -> bool {
        self.get(column).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(C, FieldValue)> {
        self.entries.iter()
    }
}

/// Equality filters (`column = value`, AND-ed)
#[derive(Debug, Clone, PartialEq)]
pub struct Filters<C: Column> {
    entries: Vec<(C, FieldValue)>,
}

impl<C: Column> Default for Filters<C> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<C: Column> Filters<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, column: C, value: impl Into<FieldValue>) -> Self {
        self.entries.push((column, value.into()));
        self
    }

    /// Build filters from query-string parameters.
    ///
    /// Empty values are dropped. Unknown columns and values that do not parse
    /// for their column are rejected.
    pub fn from_query(params: &IndexMap<String, String>) -> AppResult<Self> {
        let mut filters = Self::new();
        for (key, raw) in params {
            if raw.trim().is_empty() {
                continue;
            }
            let column = C::from_name(key)
                .ok_or_else(|| AppError::Validation(format!("Unknown filter field '{}'", key)))?;
            let value = FieldValue::parse(column.kind(), raw)
                .map_err(|e| AppError::Validation(format!("Invalid value for '{}': {}", key, e)))?;
            filters.entries.push((column, value));
        }
        Ok(filters)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(C, FieldValue)> {
        self.entries.iter()
    }
}

/// A request body that maps onto a resource's columns
pub trait Payload<C: Column>:
    serde::de::DeserializeOwned + validator::Validate + Send + 'static
{
    fn into_fields(self) -> Fields<C>;
}

/// A content table served through the generic CRUD layer
pub trait Resource:
    for<'r> FromRow<'r, PgRow> + Serialize + Send + Sync + Unpin + 'static
{
    type Column: Column;
    type Create: Payload<Self::Column>;
    type Update: Payload<Self::Column>;

    const TABLE: &'static str;
    /// Human readable name used in messages
    const LABEL: &'static str;
    /// Columns matched by the default text search
    const SEARCH_COLUMNS: &'static [Self::Column];
    const SLUG: Self::Column;
    /// Column the slug is derived from when the client does not send one
    const SLUG_SOURCE: Self::Column;
}

/// A resource carrying a `categoria_id` reference to `categorias`
pub trait Categorized: Resource {}

/// Requested page after clamping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

impl PageRequest {
    pub fn offset(&self) -> i64 {
        (self.page - 1).max(0).saturating_mul(self.limit)
    }
}

/// Pagination block of the response envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    /// Absent when `total` only counts the rows of the current page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<i64>,
}

impl Pagination {
    pub fn new(request: PageRequest, total: i64) -> Self {
        let limit = request.limit.max(1);
        Self {
            page: request.page,
            limit,
            total,
            total_pages: Some(total.saturating_add(limit - 1) / limit),
        }
    }

    /// Pagination block of an uncounted query: `total` is the page's row count
    pub fn page_only(request: PageRequest, rows: usize) -> Self {
        Self {
            page: request.page,
            limit: request.limit.max(1),
            total: rows as i64,
            total_pages: None,
        }
    }
}

/// One page of rows plus its pagination block
#[derive(Debug, Clone, Serialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub publications: ResourceRepository<Publication>,
    pub categories: ResourceRepository<Category>,
    pub news: ResourceRepository<News>,
    pub multimedia: ResourceRepository<Multimedia>,
    pub events: ResourceRepository<Event>,
    pub guides: ResourceRepository<ElectoralGuide>,
    pub verifiers: ResourceRepository<Verifier>,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            publications: ResourceRepository::new(pool.clone()),
            categories: ResourceRepository::new(pool.clone()),
            news: ResourceRepository::new(pool.clone()),
            multimedia: ResourceRepository::new(pool.clone()),
            events: ResourceRepository::new(pool.clone()),
            guides: ResourceRepository::new(pool.clone()),
            verifiers: ResourceRepository::new(pool.clone()),
            pool,
        }
    }

    /// Current database time, used by the readiness check
    pub async fn now(&self) -> AppResult<DateTime<Utc>> {
        let now: DateTime<Utc> = sqlx::query_scalar("SELECT NOW()")
            .fetch_one(&self.pool)
            .await?;
        Ok(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::resource_columns! {
        enum TestColumn {
            Title => ("title", Text),
            IsActive => ("is_active", Boolean),
            Pages => ("pages", Integer),
        }
    }

    #[test]
    fn test_camel_case() {
        assert_eq!(camel_case("download_url"), "downloadUrl");
        assert_eq!(camel_case("is_active"), "isActive");
        assert_eq!(camel_case("title"), "title");
    }

    #[test]
    fn test_column_from_name_accepts_both_spellings() {
        assert_eq!(TestColumn::from_name("is_active"), Some(TestColumn::IsActive));
        assert_eq!(TestColumn::from_name("isActive"), Some(TestColumn::IsActive));
        assert_eq!(TestColumn::from_name("title; DROP TABLE x"), None);
    }

    #[test]
    fn test_filters_drop_empty_values() {
        let mut params = IndexMap::new();
        params.insert("title".to_string(), "".to_string());
        params.insert("isActive".to_string(), "true".to_string());
        let filters = Filters::<TestColumn>::from_query(&params).unwrap();
        let entries: Vec<_> = filters.iter().cloned().collect();
        assert_eq!(entries, vec![(TestColumn::IsActive, FieldValue::Boolean(Some(true)))]);
    }

    #[test]
    fn test_filters_reject_unknown_column() {
        let mut params = IndexMap::new();
        params.insert("password".to_string(), "x".to_string());
        assert!(matches!(
            Filters::<TestColumn>::from_query(&params),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_filters_reject_bad_integer() {
        let mut params = IndexMap::new();
        params.insert("pages".to_string(), "many".to_string());
        assert!(Filters::<TestColumn>::from_query(&params).is_err());
    }

    #[test]
    fn test_fields_set_replaces() {
        let mut fields = Fields::<TestColumn>::new();
        fields.set(TestColumn::Title, "a");
        fields.set(TestColumn::Title, "b");
        assert_eq!(fields.len(), 1);
        assert_eq!(fields.get(TestColumn::Title), Some(&FieldValue::from("b")));
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let req = PageRequest { page: 1, limit: 10 };
        assert_eq!(Pagination::new(req, 0).total_pages, Some(0));
        assert_eq!(Pagination::new(req, 10).total_pages, Some(1));
        assert_eq!(Pagination::new(req, 11).total_pages, Some(2));
    }

    #[test]
    fn test_offset_of_last_page_does_not_overflow() {
        let req = PageRequest { page: i64::MAX, limit: 100 };
        assert_eq!(req.offset(), i64::MAX);
        assert_eq!(PageRequest { page: 3, limit: 10 }.offset(), 20);
    }

    #[test]
    fn test_page_only_has_no_page_count() {
        let req = PageRequest { page: 1, limit: 10 };
        let pagination = Pagination::page_only(req, 4);
        assert_eq!(pagination.total, 4);
        assert_eq!(pagination.total_pages, None);
        let json = serde_json::to_value(pagination).unwrap();
        assert!(json.get("totalPages").is_none());
    }

    #[test]
    fn test_parse_timestamp_accepts_dates() {
        let ts = parse_timestamp("2025-03-01").unwrap();
        assert_eq!(ts.to_rfc3339(), "2025-03-01T00:00:00+00:00");
        assert!(parse_timestamp("2025-03-01T10:00:00Z").is_some());
        assert!(parse_timestamp("yesterday").is_none());
    }
}
