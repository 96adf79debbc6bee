//! PostgreSQL SQL dialect.
//!
//! The reference backend for generated report views:
//! - ANSI identifier quoting (`"`)
//! - `CREATE OR REPLACE VIEW` and `DROP VIEW ... CASCADE`

use super::helpers;
use super::SqlDialect;

/// PostgreSQL SQL dialect.
#[derive(Debug, Clone, Copy)]
pub struct Postgres;

impl SqlDialect for Postgres {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        helpers::quote_double(ident)
    }
}
