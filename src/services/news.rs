//! News service

use chrono::{DateTime, Utc};

use super::resources::ResourceService;
use crate::{
    error::{AppError, AppResult},
    models::news::{News, NewsColumn},
    repository::{parse_timestamp, PageRequest, Paginated},
};

pub const UPCOMING_LIMIT: i64 = 10;
pub const FEATURED_LIMIT: i64 = 5;

impl ResourceService<News> {
    pub async fn upcoming(&self, limit: Option<i64>) -> AppResult<Vec<News>> {
        let limit = self.limit(limit, UPCOMING_LIMIT);
        self.repository().upcoming(limit).await
    }

    pub async fn featured(&self, limit: Option<i64>) -> AppResult<Vec<News>> {
        let limit = self.limit(limit, FEATURED_LIMIT);
        self.repository().featured(limit).await
    }

    /// News dated within `[start, end]`, oldest first
    pub async fn date_range(
        &self,
        start: Option<&str>,
        end: Option<&str>,
        page: PageRequest,
    ) -> AppResult<Paginated<News>> {
        let (start, end) = parse_range(start, end)?;
        self.repository()
            .list_between(NewsColumn::Date, start.into(), end.into(), page)
            .await
    }
}

/// Both bounds are required; a plain date means midnight UTC
fn parse_range(
    start: Option<&str>,
    end: Option<&str>,
) -> AppResult<(DateTime<Utc>, DateTime<Utc>)> {
    let (Some(start), Some(end)) = (
        start.filter(|s| !s.trim().is_empty()),
        end.filter(|s| !s.trim().is_empty()),
    ) else {
        return Err(AppError::Validation(
            "startDate and endDate are required".to_string(),
        ));
    };

    let parse = |name: &str, raw: &str| {
        parse_timestamp(raw.trim())
            .ok_or_else(|| AppError::Validation(format!("{} '{}' is not a valid date", name, raw)))
    };
    Ok((parse("startDate", start)?, parse("endDate", end)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_requires_both_bounds() {
        assert!(matches!(
            parse_range(Some("2025-01-01"), None),
            Err(AppError::Validation(_))
        ));
        assert!(parse_range(None, Some("2025-01-31")).is_err());
        assert!(parse_range(Some(""), Some("2025-01-31")).is_err());
    }

    #[test]
    fn test_range_parses_dates() {
        let (start, end) = parse_range(Some("2025-01-01"), Some("2025-01-31T23:59:59Z")).unwrap();
        assert!(start < end);
    }

    #[test]
    fn test_range_rejects_garbage() {
        assert!(parse_range(Some("enero"), Some("2025-01-31")).is_err());
    }
}
