//! Resolving stored selections against the SQLite field catalog.

#[path = "../common/mod.rs"]
mod common;

use bve::fields::{resolve, FieldSpecError};
use bve::model::FieldType;
use bve::platform::PlatformError;
use common::Fixture;

#[test]
fn test_resolve_legacy_selection() {
    let fx = Fixture::new();
    let data = fx.sales_by_region();
    let selection = resolve(&fx.store, Some(&data)).unwrap();

    let fields: Vec<_> = selection
        .fields()
        .iter()
        .map(|f| (f.alias(), f.table(), f.column()))
        .collect();
    assert_eq!(
        fields,
        vec![
            ("x_amount".to_string(), "sale_order", "amount_total"),
            ("x_region".to_string(), "sale_order", "region"),
        ]
    );
    assert_eq!(selection.base_alias(), "t0");
    assert_eq!(selection.fields()[0].virtual_type(), FieldType::Float);
}

#[test]
fn test_resolve_join_selection() {
    let fx = Fixture::new();
    let data = fx.sales_by_country();
    let selection = resolve(&fx.store, Some(&data)).unwrap();

    assert_eq!(
        selection.tables(),
        vec![("sale_order", "t0"), ("res_partner", "t1")]
    );
    assert_eq!(selection.joins().count(), 1);
    assert_eq!(
        selection.selected().map(|f| f.alias()).collect::<Vec<_>>(),
        vec!["x_amount", "x_state", "x_country"]
    );
    assert_eq!(
        selection.models().into_iter().collect::<Vec<_>>(),
        vec!["res.partner", "sale.order"]
    );
    let country = selection.selected().last().unwrap();
    assert_eq!(country.description(), "Customer Country");
}

#[test]
fn test_missing_data_is_no_data() {
    let fx = Fixture::new();
    assert!(matches!(resolve(&fx.store, None), Err(FieldSpecError::NoData)));
}

#[test]
fn test_unknown_field_id() {
    let fx = Fixture::new();
    let data = r#"[{"id": 9999, "name": "ghost", "table_alias": "t0"}]"#;
    assert!(matches!(
        resolve(&fx.store, Some(data)),
        Err(FieldSpecError::Platform(PlatformError::NotFound { .. }))
    ));
}

#[test]
fn test_alias_bound_to_two_tables() {
    let fx = Fixture::new();
    let data = format!(
        r#"[{{"id": {}, "name": "amount", "table_alias": "t0"}},
            {{"id": {}, "name": "country", "table_alias": "t0"}}]"#,
        fx.amount, fx.country
    );
    assert!(matches!(
        resolve(&fx.store, Some(&data)),
        Err(FieldSpecError::AliasConflict { .. })
    ));
}

#[test]
fn test_join_to_unselected_alias() {
    let fx = Fixture::new();
    let data = format!(
        r#"[{{"id": {}, "name": "amount", "table_alias": "t0"}},
            {{"id": {}, "name": "partner_id", "table_alias": "t0", "join_node": "t9"}}]"#,
        fx.amount, fx.partner_id
    );
    assert!(matches!(
        resolve(&fx.store, Some(&data)),
        Err(FieldSpecError::UnknownJoinTarget { .. })
    ));
}
