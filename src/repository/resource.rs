//! Generic CRUD repository shared by every content table

use std::marker::PhantomData;

use serde::Serialize;
use sqlx::{postgres::PgRow, FromRow, Pool, Postgres, Row};

use super::{
    query::{self, OrderBy, Predicate, SelectQuery, Statement},
    Categorized, Column, FieldValue, Fields, Filters, PageRequest, Paginated, Pagination, Resource,
};
use crate::error::{AppError, AppResult};

/// Binds every value of a statement onto a sqlx query builder
macro_rules! bind_values {
    ($builder:expr, $values:expr) => {{
        let mut builder = $builder;
        for value in $values {
            builder = match value {
                FieldValue::Text(v) => builder.bind(v.clone()),
                FieldValue::Integer(v) => builder.bind(*v),
                FieldValue::BigInt(v) => builder.bind(*v),
                FieldValue::Boolean(v) => builder.bind(*v),
                FieldValue::Date(v) => builder.bind(*v),
                FieldValue::Timestamp(v) => builder.bind(*v),
                FieldValue::TextArray(v) => builder.bind(v.clone()),
            };
        }
        builder
    }};
}

/// A row joined with the name and color of its category
#[derive(Debug, Clone, Serialize)]
pub struct WithCategory<T> {
    #[serde(flatten)]
    pub record: T,
    pub categoria_name: Option<String>,
    pub categoria_color: Option<String>,
}

impl<'r, T> FromRow<'r, PgRow> for WithCategory<T>
where
    T: FromRow<'r, PgRow>,
{
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            record: T::from_row(row)?,
            categoria_name: row.try_get("categoria_name")?,
            categoria_color: row.try_get("categoria_color")?,
        })
    }
}

pub struct ResourceRepository<R: Resource> {
    pool: Pool<Postgres>,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> Clone for ResourceRepository<R> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            _resource: PhantomData,
        }
    }
}

impl<R: Resource> ResourceRepository<R> {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            pool,
            _resource: PhantomData,
        }
    }

    fn store_error(operation: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
        move |e| AppError::from_store(R::TABLE, operation, e)
    }

    async fn fetch_all<T>(&self, stmt: &Statement, operation: &'static str) -> AppResult<Vec<T>>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        bind_values!(sqlx::query_as::<_, T>(&stmt.sql), &stmt.binds)
            .fetch_all(&self.pool)
            .await
            .map_err(Self::store_error(operation))
    }

    async fn fetch_optional(&self, stmt: &Statement, operation: &'static str) -> AppResult<Option<R>> {
        bind_values!(sqlx::query_as::<_, R>(&stmt.sql), &stmt.binds)
            .fetch_optional(&self.pool)
            .await
            .map_err(Self::store_error(operation))
    }

    async fn count(&self, stmt: &Statement, operation: &'static str) -> AppResult<i64> {
        bind_values!(sqlx::query_scalar::<_, i64>(&stmt.sql), &stmt.binds)
            .fetch_one(&self.pool)
            .await
            .map_err(Self::store_error(operation))
    }

    /// Rows of one page of `query` plus the total matching count.
    ///
    /// The count and the page are two independent statements.
    pub async fn paginate<T>(
        &self,
        query: &SelectQuery<R::Column>,
        page: PageRequest,
        operation: &'static str,
    ) -> AppResult<Paginated<T>>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let data = self.fetch_page::<T>(query, page, operation).await?;
        let total = self.count(&query.count(), operation).await?;

        Ok(Paginated {
            data,
            pagination: Pagination::new(page, total),
        })
    }

    /// Rows of one page of `query`, without counting
    pub async fn fetch_page<T>(
        &self,
        query: &SelectQuery<R::Column>,
        page: PageRequest,
        operation: &'static str,
    ) -> AppResult<Vec<T>>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let select = query.select(Some(page.limit), Some(page.offset()));
        self.fetch_all::<T>(&select, operation).await
    }

    /// Up to `limit` rows of `query`, no pagination block
    pub async fn list<T>(
        &self,
        query: &SelectQuery<R::Column>,
        limit: i64,
        operation: &'static str,
    ) -> AppResult<Vec<T>>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        self.fetch_all::<T>(&query.select(Some(limit), None), operation)
            .await
    }

    /// Paginated listing with equality filters, newest first
    pub async fn list_page(
        &self,
        page: PageRequest,
        filters: &Filters<R::Column>,
    ) -> AppResult<Paginated<R>> {
        let query = SelectQuery::new(R::TABLE).filters(filters);
        self.paginate(&query, page, "listing records").await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Option<R>> {
        let stmt = query::select_by(R::TABLE, "id", FieldValue::Integer(Some(id)));
        self.fetch_optional(&stmt, "fetching record by id").await
    }

    pub async fn get_by_slug(&self, slug: &str) -> AppResult<Option<R>> {
        let stmt = query::select_by(R::TABLE, R::SLUG.name(), FieldValue::from(slug));
        self.fetch_optional(&stmt, "fetching record by slug").await
    }

    pub async fn insert(&self, fields: &Fields<R::Column>) -> AppResult<R> {
        if fields.is_empty() {
            return Err(AppError::Validation(format!(
                "No data supplied to create {}",
                R::LABEL
            )));
        }
        let stmt = query::insert(R::TABLE, fields);
        bind_values!(sqlx::query_as::<_, R>(&stmt.sql), &stmt.binds)
            .fetch_one(&self.pool)
            .await
            .map_err(Self::store_error("creating record"))
    }

    /// Update the given fields only; `None` when no row has this id
    pub async fn update(&self, id: i32, fields: &Fields<R::Column>) -> AppResult<Option<R>> {
        if fields.is_empty() {
            return Err(AppError::Validation(format!(
                "No data supplied to update {}",
                R::LABEL
            )));
        }
        let stmt = query::update(R::TABLE, id, fields);
        self.fetch_optional(&stmt, "updating record").await
    }

    /// Hard delete; returns the removed row, `None` when no row has this id
    pub async fn delete(&self, id: i32) -> AppResult<Option<R>> {
        let stmt = query::delete(R::TABLE, id);
        self.fetch_optional(&stmt, "deleting record").await
    }

    /// Substring search (case-insensitive) over `columns`
    pub async fn search(
        &self,
        term: &str,
        columns: &[R::Column],
        page: PageRequest,
    ) -> AppResult<Paginated<R>> {
        let query = SelectQuery::new(R::TABLE)
            .filter(Predicate::Matches(columns.to_vec(), term.to_string()));
        self.paginate(&query, page, "searching records").await
    }

    /// Rows whose `column` lies in `[start, end]`, oldest first
    pub async fn list_between(
        &self,
        column: R::Column,
        start: FieldValue,
        end: FieldValue,
        page: PageRequest,
    ) -> AppResult<Paginated<R>> {
        let query = SelectQuery::new(R::TABLE)
            .filter(Predicate::Between(column, start, end))
            .order_by(OrderBy::Asc(column));
        self.paginate(&query, page, "listing records by date range").await
    }

    /// Most recent `limit` rows by `column`
    pub async fn recent(&self, column: R::Column, limit: i64) -> AppResult<Vec<R>> {
        let query = SelectQuery::new(R::TABLE).order_by(OrderBy::Desc(column));
        self.list(&query, limit, "listing recent records").await
    }
}

impl<R: Categorized> ResourceRepository<R> {
    /// Paginated listing joined with the category; `category` matches its slug
    pub async fn list_with_category(
        &self,
        page: PageRequest,
        filters: &Filters<R::Column>,
        category: Option<String>,
    ) -> AppResult<Paginated<WithCategory<R>>> {
        let mut query = SelectQuery::new(R::TABLE).with_category().filters(filters);
        if let Some(slug) = category {
            query = query.filter(Predicate::CategorySlug(slug));
        }
        self.paginate(&query, page, "listing records with category").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_category_serializes_flat() {
        #[derive(Serialize)]
        struct Row {
            id: i32,
            title: String,
        }

        let row = WithCategory {
            record: Row {
                id: 1,
                title: "Informe X".into(),
            },
            categoria_name: Some("Elecciones".into()),
            categoria_color: None,
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["title"], "Informe X");
        assert_eq!(json["categoria_name"], "Elecciones");
        assert!(json["categoria_color"].is_null());
    }
}
