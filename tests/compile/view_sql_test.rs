//! Compiling stored selections into backing view statements.

#[path = "../common/mod.rs"]
mod common;

use bve::compile::{arch_fields, render_arch, ViewDefinition, BOOKKEEPING_COLUMNS};
use bve::fields::resolve;
use bve::model::ViewKind;
use bve::platform::SqlExecutor;
use bve::sql::Dialect;
use common::Fixture;
use insta::assert_snapshot;
use sqlparser::dialect::{PostgreSqlDialect, SQLiteDialect};
use sqlparser::parser::Parser;

// ============================================================================
// Statement text
// ============================================================================

#[test]
fn test_joined_view_postgres_statements() {
    let fx = Fixture::new();
    let data = fx.sales_by_country();
    let selection = resolve(&fx.store, Some(&data)).unwrap();
    let view = ViewDefinition::build("x_bve.salesbycountry", &selection);

    let statements = view.statements(Dialect::Postgres);
    assert_eq!(statements.len(), 2);
    assert_snapshot!(statements[0], @r#"DROP VIEW IF EXISTS "x_bve_salesbycountry" CASCADE"#);
    assert_snapshot!(statements[1], @r#"
    CREATE OR REPLACE VIEW "x_bve_salesbycountry" AS SELECT
      "t0"."id" AS "id",
      "t0"."write_uid" AS "write_uid",
      "t0"."write_date" AS "write_date",
      "t0"."create_uid" AS "create_uid",
      "t0"."create_date" AS "create_date",
      "t0"."amount_total" AS "x_amount",
      "t0"."state" AS "x_state",
      "t1"."country" AS "x_country"
    FROM "sale_order" AS "t0", "res_partner" AS "t1"
    WHERE "t0"."partner_id" = "t1"."id" AND TRUE
    "#);

    for sql in &statements {
        Parser::parse_sql(&PostgreSqlDialect {}, sql).unwrap();
    }
}

#[test]
fn test_columns_start_with_bookkeeping() {
    let fx = Fixture::new();
    let data = fx.sales_by_region();
    let selection = resolve(&fx.store, Some(&data)).unwrap();
    let view = ViewDefinition::build("x_bve.salesbyregion", &selection);

    let columns = view.columns();
    assert_eq!(&columns[..5], &BOOKKEEPING_COLUMNS[..]);
    assert_eq!(&columns[5..], &["x_amount", "x_region"]);
}

// ============================================================================
// Execution against SQLite
// ============================================================================

#[test]
fn test_sqlite_view_joins_rows() {
    let mut fx = Fixture::new();
    let data = fx.sales_by_country();
    let selection = resolve(&fx.store, Some(&data)).unwrap();
    let view = ViewDefinition::build("x_bve.salesbycountry", &selection);

    for sql in view.statements(Dialect::Sqlite) {
        Parser::parse_sql(&SQLiteDialect {}, &sql).unwrap();
        fx.store.execute(&sql).unwrap();
    }
    // Running the pair again replaces the view.
    for sql in view.statements(Dialect::Sqlite) {
        fx.store.execute(&sql).unwrap();
    }

    let rows = fx
        .store
        .query_rows(r#"SELECT "id", "x_country" FROM "x_bve_salesbycountry" ORDER BY "id""#)
        .unwrap();
    let countries: Vec<_> = rows.iter().map(|r| r["x_country"].as_str().unwrap()).collect();
    assert_eq!(countries, vec!["BE", "FR", "FR"]);
}

// ============================================================================
// Presentation arch
// ============================================================================

#[test]
fn test_arch_for_joined_selection() {
    let fx = Fixture::new();
    let data = fx.sales_by_country();
    let selection = resolve(&fx.store, Some(&data)).unwrap();
    let fields = arch_fields(&selection);

    assert_snapshot!(render_arch(ViewKind::Pivot, &fields), @r#"
    <?xml version="1.0"?>
    <pivot string="Pivot Analysis"><field name="x_amount" type="measure" /><field name="x_state" type="col" /><field name="x_country" type="row" /></pivot>
    "#);
}
