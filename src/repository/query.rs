//! SQL statement building for resource tables.
//!
//! Statements are plain `(sql, binds)` pairs so they can be inspected without a
//! database. Identifiers come from [`Column`] enumerations and table constants
//! only; every value goes through a `$n` placeholder.

use super::{Column, FieldValue, Fields, Filters};

/// Alias of the main table when the category join is active
const MAIN_ALIAS: &str = "t";
const CATEGORY_TABLE: &str = "categorias";

/// A rendered statement and the values for its placeholders, in order
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub binds: Vec<FieldValue>,
}

/// Condition on a resource row
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate<C: Column> {
    /// `col = $n`
    Eq(C, FieldValue),
    /// `col BETWEEN $n AND $n+1`
    Between(C, FieldValue, FieldValue),
    /// `col > NOW()`
    AfterNow(C),
    /// `(c1 ILIKE $n OR c2 ILIKE $n ...)`, substring match
    Matches(Vec<C>, String),
    /// `categorias.slug = $n`, requires the category join
    CategorySlug(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderBy<C: Column> {
    IdDesc,
    Asc(C),
    Desc(C),
}

/// SELECT over a single resource table, optionally joined with its category
#[derive(Debug, Clone, PartialEq)]
pub struct SelectQuery<C: Column> {
    table: &'static str,
    predicates: Vec<Predicate<C>>,
    order: OrderBy<C>,
    with_category: bool,
}

impl<C: Column> SelectQuery<C> {
    pub fn new(table: &'static str) -> Self {
        Self {
            table,
            predicates: Vec::new(),
            order: OrderBy::IdDesc,
            with_category: false,
        }
    }

    pub fn filter(mut self, predicate: Predicate<C>) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub fn filters(mut self, filters: &Filters<C>) -> Self {
        for (column, value) in filters.iter() {
            self.predicates.push(Predicate::Eq(*column, value.clone()));
        }
        self
    }

    pub fn order_by(mut self, order: OrderBy<C>) -> Self {
        self.order = order;
        self
    }

    /// Join `categorias` and expose `categoria_name` / `categoria_color`
    pub fn with_category(mut self) -> Self {
        self.with_category = true;
        self
    }

    fn column(&self, column: C) -> String {
        if self.with_category {
            format!("{}.{}", MAIN_ALIAS, column.name())
        } else {
            column.name().to_string()
        }
    }

    fn from_clause(&self) -> String {
        if self.with_category {
            format!(
                "{table} {t} LEFT JOIN {cat} c ON {t}.categoria_id = c.id",
                table = self.table,
                t = MAIN_ALIAS,
                cat = CATEGORY_TABLE
            )
        } else {
            self.table.to_string()
        }
    }

    fn where_clause(&self, binds: &mut Vec<FieldValue>) -> String {
        let mut conditions = Vec::with_capacity(self.predicates.len());

        for predicate in &self.predicates {
            let condition = match predicate {
                Predicate::Eq(column, value) => {
                    binds.push(value.clone());
                    format!("{} = ${}", self.column(*column), binds.len())
                }
                Predicate::Between(column, start, end) => {
                    binds.push(start.clone());
                    binds.push(end.clone());
                    format!(
                        "{} BETWEEN ${} AND ${}",
                        self.column(*column),
                        binds.len() - 1,
                        binds.len()
                    )
                }
                Predicate::AfterNow(column) => format!("{} > NOW()", self.column(*column)),
                Predicate::Matches(columns, term) => {
                    binds.push(FieldValue::Text(Some(like_pattern(term))));
                    let idx = binds.len();
                    let parts: Vec<String> = columns
                        .iter()
                        .map(|c| format!("{} ILIKE ${}", self.column(*c), idx))
                        .collect();
                    format!("({})", parts.join(" OR "))
                }
                Predicate::CategorySlug(slug) => {
                    debug_assert!(self.with_category, "category filter without join");
                    binds.push(FieldValue::Text(Some(slug.clone())));
                    format!("c.slug = ${}", binds.len())
                }
            };
            conditions.push(condition);
        }

        if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        }
    }

    fn order_clause(&self) -> String {
        match self.order {
            OrderBy::IdDesc => {
                if self.with_category {
                    format!(" ORDER BY {}.id DESC", MAIN_ALIAS)
                } else {
                    " ORDER BY id DESC".to_string()
                }
            }
            OrderBy::Asc(c) => format!(" ORDER BY {} ASC", self.column(c)),
            OrderBy::Desc(c) => format!(" ORDER BY {} DESC", self.column(c)),
        }
    }

    /// Rows of one page; `offset` is only rendered when given
    pub fn select(&self, limit: Option<i64>, offset: Option<i64>) -> Statement {
        let mut binds = Vec::new();
        let projection = if self.with_category {
            format!(
                "{}.*, c.name AS categoria_name, c.color AS categoria_color",
                MAIN_ALIAS
            )
        } else {
            "*".to_string()
        };

        let mut sql = format!("SELECT {} FROM {}", projection, self.from_clause());
        sql.push_str(&self.where_clause(&mut binds));
        sql.push_str(&self.order_clause());

        if let Some(limit) = limit {
            binds.push(FieldValue::BigInt(Some(limit)));
            sql.push_str(&format!(" LIMIT ${}", binds.len()));
        }
        if let Some(offset) = offset {
            binds.push(FieldValue::BigInt(Some(offset)));
            sql.push_str(&format!(" OFFSET ${}", binds.len()));
        }

        Statement { sql, binds }
    }

    /// `COUNT(*)` over the same conditions
    pub fn count(&self) -> Statement {
        let mut binds = Vec::new();
        let mut sql = format!("SELECT COUNT(*) FROM {}", self.from_clause());
        sql.push_str(&self.where_clause(&mut binds));
        Statement { sql, binds }
    }
}

/// Escape LIKE wildcards and wrap the term for a substring match
pub fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

pub fn select_by(table: &'static str, column: &'static str, value: FieldValue) -> Statement {
    Statement {
        sql: format!("SELECT * FROM {} WHERE {} = $1", table, column),
        binds: vec![value],
    }
}

pub fn insert<C: Column>(table: &'static str, fields: &Fields<C>) -> Statement {
    let mut columns = Vec::with_capacity(fields.len());
    let mut placeholders = Vec::with_capacity(fields.len());
    let mut binds = Vec::with_capacity(fields.len());

    for (idx, (column, value)) in fields.iter().enumerate() {
        columns.push(column.name());
        placeholders.push(format!("${}", idx + 1));
        binds.push(value.clone());
    }

    Statement {
        sql: format!(
            "INSERT INTO {} ({}) VALUES ({}) RETURNING *",
            table,
            columns.join(", "),
            placeholders.join(", ")
        ),
        binds,
    }
}

pub fn update<C: Column>(table: &'static str, id: i32, fields: &Fields<C>) -> Statement {
    let mut sets = Vec::with_capacity(fields.len() + 1);
    let mut binds = vec![FieldValue::Integer(Some(id))];

    for (column, value) in fields.iter() {
        binds.push(value.clone());
        sets.push(format!("{} = ${}", column.name(), binds.len()));
    }
    sets.push("updated_at = NOW()".to_string());

    Statement {
        sql: format!(
            "UPDATE {} SET {} WHERE id = $1 RETURNING *",
            table,
            sets.join(", ")
        ),
        binds,
    }
}

pub fn delete(table: &'static str, id: i32) -> Statement {
    Statement {
        sql: format!("DELETE FROM {} WHERE id = $1 RETURNING *", table),
        binds: vec![FieldValue::Integer(Some(id))],
    }
}
