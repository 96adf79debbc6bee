//! SQLite SQL dialect.
//!
//! SQLite features relevant to report views:
//! - ANSI identifier quoting (`"`)
//! - The `TRUE` keyword is accepted in WHERE clauses
//! - No `CREATE OR REPLACE VIEW`; views are dropped and recreated
//! - No `CASCADE` on `DROP VIEW`

use super::helpers;
use super::SqlDialect;

/// SQLite SQL dialect.
#[derive(Debug, Clone, Copy)]
pub struct Sqlite;

impl SqlDialect for Sqlite {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        helpers::quote_double(ident)
    }

    fn supports_drop_cascade(&self) -> bool {
        false
    }

    fn supports_create_or_replace_view(&self) -> bool {
        false
    }
}
