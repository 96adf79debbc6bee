//! A report from selection to readable records.

#[path = "../common/mod.rs"]
mod common;

use bve::editor::{self, NewView};
use bve::model::{FieldState, FieldType, ViewKind, ViewState};
use bve::platform::{TypeStore, UiStore};
use bve::registrar::{VIEW_MODE, VIEW_PRIORITY};
use common::Fixture;

#[test]
fn test_sales_by_region() {
    let mut fx = Fixture::new();
    let data = fx.sales_by_region();

    let view = {
        let mut env = fx.env();
        let draft = editor::create(&mut env, NewView::new("Sales by Region").data(data)).unwrap();
        assert_eq!(draft.model_name, "x_bve.salesbyregion");
        assert_eq!(draft.state, ViewState::Draft);

        let view = editor::action_create(&mut env, draft.id).unwrap();
        assert_eq!(view.state, ViewState::Created);
        assert_eq!(editor::get(&env, view.id).unwrap(), view);
        view
    };

    // Backing view
    assert!(fx.view_exists("x_bve_salesbyregion"));
    assert_eq!(
        fx.view_columns("x_bve_salesbyregion"),
        vec!["id", "write_uid", "write_date", "create_uid", "create_date", "x_amount", "x_region"]
    );

    // Virtual type
    let registered = fx.registry.get("x_bve.salesbyregion").unwrap();
    let descriptor = &registered.descriptor;
    assert_eq!(descriptor.name, "Sales by Region");
    assert_eq!(descriptor.table, "x_bve_salesbyregion");
    assert_eq!(descriptor.field_names().collect::<Vec<_>>(), vec!["x_amount", "x_region"]);
    let amount = descriptor.field("x_amount").unwrap();
    assert_eq!(amount.ttype, FieldType::Float);
    assert_eq!(amount.field_description, "Total");
    assert_eq!(amount.state, FieldState::Manual);
    assert_eq!(descriptor.field("x_region").unwrap().ttype, FieldType::Char);
    assert_eq!(fx.store.find_types("x_bve.salesbyregion").unwrap().len(), 1);

    // Presentation
    let ids = fx.store.find_ui_views("x_bve.salesbyregion").unwrap();
    let views: Vec<_> = ids
        .iter()
        .map(|id| fx.store.ui_view(*id).unwrap().unwrap())
        .collect();
    let kinds: Vec<_> = views.iter().map(|v| v.kind).collect();
    assert_eq!(kinds, vec![ViewKind::Pivot, ViewKind::Graph, ViewKind::Tree]);
    assert!(views.iter().all(|v| v.priority == VIEW_PRIORITY));
    assert_eq!(
        views[0].arch,
        "<?xml version=\"1.0\"?>\n<pivot string=\"Pivot Analysis\">\
         <field name=\"x_amount\" type=\"measure\" /><field name=\"x_region\" type=\"row\" /></pivot>"
    );

    let action = fx.store.action(view.action_id.unwrap()).unwrap().unwrap();
    assert_eq!(action.name, "Sales by Region");
    assert_eq!(action.res_model, "x_bve.salesbyregion");
    assert_eq!(action.view_mode, VIEW_MODE);
    assert_eq!(action.view_id, view.view_id);
    assert_eq!(action.view_id, Some(ids[2]));
    assert_eq!(action.context.as_deref(), Some("{'service_name': 'Sales by Region'}"));

    // Records
    let mut env = fx.env();
    let rows = editor::read_records(&mut env, view.id).unwrap();
    assert_eq!(rows.len(), 3);
    let north: f64 = rows
        .iter()
        .filter(|r| r["x_region"] == "North")
        .map(|r| r["x_amount"].as_f64().unwrap())
        .sum();
    assert_eq!(north, 175.25);

    let descriptor = editor::open_view(&view);
    assert_eq!(descriptor.res_model, "x_bve.salesbyregion");
    assert_eq!(descriptor.view_mode, "tree,graph,pivot");
}

#[test]
fn test_selection_field_keeps_live_values() {
    let mut fx = Fixture::new();
    let data = fx.sales_by_country();
    let mut env = fx.env();

    let view = editor::create(&mut env, NewView::new("Sales by Country").data(data)).unwrap();
    editor::action_create(&mut env, view.id).unwrap();

    let descriptor = &env.registry.get("x_bve.salesbycountry").unwrap().descriptor;
    let state = descriptor.field("x_state").unwrap();
    assert_eq!(state.ttype, FieldType::Selection);
    assert_eq!(
        state.selection.as_deref(),
        Some(r#"[["draft","Quotation"],["sale","Sales Order"]]"#)
    );
    assert_eq!(
        descriptor.field("x_country").unwrap().field_description,
        "Customer Country"
    );
    assert!(descriptor.field("x_partner_id").is_none());
}

#[test]
fn test_custom_fields_stay_off_the_type() {
    let mut fx = Fixture::new();
    let data = format!(
        r#"[{{"id": {}, "name": "amount", "table_alias": "t0", "measure": true}},
            {{"id": {}, "name": "region", "table_alias": "t0", "row": true, "custom": true}}]"#,
        fx.amount, fx.region
    );
    {
        let mut env = fx.env();
        let view = editor::create(&mut env, NewView::new("Custom Region").data(data)).unwrap();
        editor::action_create(&mut env, view.id).unwrap();

        let descriptor = &env.registry.get("x_bve.customregion").unwrap().descriptor;
        assert_eq!(descriptor.field_names().collect::<Vec<_>>(), vec!["x_amount"]);
    }
    // The column is still in the backing view.
    assert!(fx
        .view_columns("x_bve_customregion")
        .contains(&"x_region".to_string()));
}
