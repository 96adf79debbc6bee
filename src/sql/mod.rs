//! SQL generation module.
//!
//! A small type-safe SQL builder for the statements a report view needs:
//!
//! - [`query`] - SELECT over an implicit join of several tables
//! - [`expr`] - Column references, equality and conjunction
//! - [`ddl`] - CREATE [OR REPLACE] VIEW and DROP VIEW
//! - [`token`] - Token types for SQL generation
//! - [`dialect`] - SQL dialect implementations

pub mod ddl;
pub mod dialect;
pub mod expr;
pub mod query;
pub mod token;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types at the sql module level
pub use dialect::{Dialect, SqlDialect};
pub use expr::{col, conjunction, table_col, BinaryOperator, Expr, ExprExt};
pub use query::{Query, SelectExpr, TableRef};
pub use token::{Token, TokenStream};

pub use ddl::{CreateView, DropView};
