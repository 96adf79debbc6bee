//! DDL (Data Definition Language) support.
//!
//! Only the view statements report generation needs: `CREATE [OR REPLACE]
//! VIEW` and `DROP VIEW [IF EXISTS]`.
//!
//! # Examples
//!
//! ```ignore
//! use bve::sql::{CreateView, DropView, Dialect, Query, TableRef, col};
//!
//! let query = Query::new().column(col("id")).from(TableRef::new("sale_order"));
//! let view = CreateView::new("x_bve_sales", query).or_replace();
//!
//! println!("{}", DropView::new("x_bve_sales").if_exists().to_sql(Dialect::Postgres));
//! println!("{}", view.to_sql(Dialect::Postgres));
//! ```

use super::dialect::{Dialect, SqlDialect};
use super::query::Query;
use super::token::{Token, TokenStream};

// ============================================================================
// CREATE VIEW
// ============================================================================

/// CREATE VIEW statement.
///
/// # Example
///
/// ```ignore
/// let view = CreateView::new("x_bve_sales", query).or_replace();
///
/// // PostgreSQL: CREATE OR REPLACE VIEW "x_bve_sales" AS SELECT ...
/// ```
#[derive(Debug, Clone)]
#[must_use = "DDL statements have no effect until converted to SQL with to_sql()"]
pub struct CreateView {
    pub or_replace: bool,
    pub name: String,
    pub as_query: Box<Query>,
}

impl CreateView {
    /// Create a new CREATE VIEW statement.
    pub fn new(name: impl Into<String>, query: Query) -> Self {
        Self {
            or_replace: false,
            name: name.into(),
            as_query: Box::new(query),
        }
    }

    /// Add OR REPLACE clause.
    ///
    /// Replaces the view if it already exists.
    /// Not supported by SQLite (pair with a preceding `DropView` instead).
    pub fn or_replace(mut self) -> Self {
        self.or_replace = true;
        self
    }

    /// Convert to SQL for the given dialect.
    pub fn to_sql(&self, dialect: Dialect) -> String {
        self.to_tokens(dialect).serialize(dialect)
    }

    /// Convert to token stream.
    pub fn to_tokens(&self, dialect: Dialect) -> TokenStream {
        let mut ts = TokenStream::new();

        ts.push(Token::Create);

        if self.or_replace && dialect.supports_create_or_replace_view() {
            ts.space().push(Token::Or).space().push(Token::Replace);
        }

        ts.space()
            .push(Token::View)
            .space()
            .push(Token::Ident(self.name.clone()));

        ts.space()
            .push(Token::As)
            .space()
            .append(&self.as_query.to_tokens_for_dialect(dialect));

        ts
    }
}

// ============================================================================
// DROP VIEW
// ============================================================================

/// DROP VIEW statement.
///
/// # Example
///
/// ```ignore
/// let drop = DropView::new("x_bve_sales").if_exists().cascade();
///
/// // PostgreSQL: DROP VIEW IF EXISTS "x_bve_sales" CASCADE
/// ```
#[derive(Debug, Clone)]
#[must_use = "DDL statements have no effect until converted to SQL with to_sql()"]
pub struct DropView {
    pub if_exists: bool,
    pub name: String,
    pub cascade: bool,
}

impl DropView {
    /// Create a new DROP VIEW statement.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            if_exists: false,
            name: name.into(),
            cascade: false,
        }
    }

    /// Add IF EXISTS clause.
    pub fn if_exists(mut self) -> Self {
        self.if_exists = true;
        self
    }

    /// Add CASCADE clause.
    pub fn cascade(mut self) -> Self {
        self.cascade = true;
        self
    }

    /// Convert to SQL for the given dialect.
    pub fn to_sql(&self, dialect: Dialect) -> String {
        self.to_tokens(dialect).serialize(dialect)
    }

    /// Convert to token stream.
    pub fn to_tokens(&self, dialect: Dialect) -> TokenStream {
        let mut ts = TokenStream::new();

        ts.push(Token::Drop).space().push(Token::View);

        if self.if_exists && dialect.supports_if_exists() {
            ts.space().push(Token::If).space().push(Token::Exists);
        }

        ts.space().push(Token::Ident(self.name.clone()));

        if self.cascade && dialect.supports_drop_cascade() {
            ts.space().push(Token::Cascade);
        }

        ts
    }
}
