//! Backing view SQL.
//!
//! ```text
//! DROP VIEW IF EXISTS "x_bve_sales" CASCADE
//! CREATE OR REPLACE VIEW "x_bve_sales" AS SELECT
//!   "t0"."id" AS "id", ..., "t0"."amount_total" AS "x_amount"
//! FROM "sale_order" AS "t0", "res_partner" AS "t1"
//! WHERE "t0"."partner_id" = "t1"."id" AND TRUE
//! ```

use crate::fields::ResolvedSelection;
use crate::model::view_table_name;
use crate::sql::{
    conjunction, table_col, CreateView, Dialect, DropView, Expr, ExprExt, Query, SelectExpr,
    TableRef,
};

/// Record bookkeeping columns every generated view exposes, in order.
pub const BOOKKEEPING_COLUMNS: [&str; 5] =
    ["id", "write_uid", "write_date", "create_uid", "create_date"];

/// The compiled backing view of one report.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewDefinition {
    /// Physical view name: the model name with `.` replaced by `_`.
    pub table_name: String,
    pub query: Query,
}

impl ViewDefinition {
    /// Compile the view for `model_name` over `selection`.
    pub fn build(model_name: &str, selection: &ResolvedSelection) -> Self {
        let base = selection.base_alias();

        let mut query = Query::new();
        for column in BOOKKEEPING_COLUMNS {
            query = query.column(SelectExpr::new(table_col(base, column)).with_alias(column));
        }
        for field in selection.selected() {
            query = query.column(
                SelectExpr::new(table_col(field.table_alias(), field.column()))
                    .with_alias(&field.alias()),
            );
        }

        for (table, alias) in selection.tables() {
            query = query.from(TableRef::new(table).with_alias(alias));
        }

        let predicates = selection
            .joins()
            .filter_map(|field| {
                let target = field.spec.join_target()?;
                Some(table_col(field.table_alias(), field.column()).eq(table_col(target, "id")))
            })
            .chain(std::iter::once(Expr::True));
        if let Some(filter) = conjunction(predicates) {
            query = query.filter(filter);
        }

        Self {
            table_name: view_table_name(model_name),
            query,
        }
    }

    /// Statement removing any previous version of the view.
    pub fn drop_statement(&self) -> DropView {
        drop_view(&self.table_name)
    }

    pub fn create_statement(&self) -> CreateView {
        CreateView::new(&self.table_name, self.query.clone()).or_replace()
    }

    /// The drop then the create statement, rendered for `dialect`.
    pub fn statements(&self, dialect: Dialect) -> Vec<String> {
        vec![
            self.drop_statement().to_sql(dialect),
            self.create_statement().to_sql(dialect),
        ]
    }

    /// Output column names, bookkeeping columns first.
    pub fn columns(&self) -> Vec<&str> {
        self.query.output_columns()
    }
}

/// `DROP VIEW IF EXISTS <table_name> CASCADE`.
pub fn drop_view(table_name: &str) -> DropView {
    DropView::new(table_name).if_exists().cascade()
}
