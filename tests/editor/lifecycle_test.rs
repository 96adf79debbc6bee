//! Draft/created transitions and the guards around them.

#[path = "../common/mod.rs"]
mod common;

use bve::editor::{self, EditorError, NewView};
use bve::fields::FieldSpecError;
use bve::model::ViewState;
use bve::platform::{PlatformError, TypeStore, UiStore};
use common::Fixture;

// ============================================================================
// Draft records
// ============================================================================

#[test]
fn test_names_are_unique() {
    let mut fx = Fixture::new();
    let mut env = fx.env();

    editor::create(&mut env, NewView::new("Sales by Region")).unwrap();
    let err = editor::create(&mut env, NewView::new("Sales by Region")).unwrap_err();
    assert!(matches!(err, EditorError::DuplicateName(ref name) if name == "Sales by Region"));
    assert_eq!(
        err.to_string(),
        "Custom BI View names must be unique! ('Sales by Region' already exists)"
    );
}

#[test]
fn test_name_without_letters_is_rejected() {
    let mut fx = Fixture::new();
    let mut env = fx.env();
    assert!(matches!(
        editor::create(&mut env, NewView::new("?! --")),
        Err(EditorError::InvalidName(_))
    ));
}

#[test]
fn test_rename_moves_model_name() {
    let mut fx = Fixture::new();
    let mut env = fx.env();
    let view = editor::create(&mut env, NewView::new("Sales")).unwrap();
    editor::create(&mut env, NewView::new("Taken")).unwrap();

    let renamed = editor::rename(&mut env, view.id, "Sales by Region").unwrap();
    assert_eq!(renamed.model_name, "x_bve.salesbyregion");
    assert!(matches!(
        editor::rename(&mut env, view.id, "Taken"),
        Err(EditorError::DuplicateName(_))
    ));
}

#[test]
fn test_copy_is_a_draft_duplicate() {
    let mut fx = Fixture::new();
    let data = fx.sales_by_region();
    let sales = fx.sales;
    let mut env = fx.env();

    let view = editor::create(
        &mut env,
        NewView::new("Sales by Region")
            .data(data.clone())
            .note("Monthly")
            .groups([sales]),
    )
    .unwrap();
    let view = editor::action_create(&mut env, view.id).unwrap();

    let copied = editor::copy(&mut env, view.id).unwrap();
    assert_eq!(copied.name, "Sales by Region (copy)");
    assert_eq!(copied.model_name, "x_bve.salesbyregioncopy");
    assert_eq!(copied.state, ViewState::Draft);
    assert_eq!(copied.data.as_deref(), Some(data.as_str()));
    assert_eq!(copied.note.as_deref(), Some("Monthly"));
    assert_eq!(copied.group_ids, view.group_ids);
    assert_eq!(copied.action_id, None);
}

// ============================================================================
// Guards
// ============================================================================

#[test]
fn test_created_view_is_frozen() {
    let mut fx = Fixture::new();
    let data = fx.sales_by_region();
    let partners = fx.partners;
    let mut env = fx.env();

    let view = editor::create(&mut env, NewView::new("Sales by Region").data(data)).unwrap();
    editor::action_create(&mut env, view.id).unwrap();

    assert!(matches!(
        editor::write_data(&mut env, view.id, None),
        Err(EditorError::NotDraft(_))
    ));
    assert!(matches!(
        editor::rename(&mut env, view.id, "Other"),
        Err(EditorError::NotDraft(_))
    ));
    assert!(matches!(
        editor::set_groups(&mut env, view.id, [partners].into()),
        Err(EditorError::NotDraft(_))
    ));
    assert!(matches!(
        editor::action_create(&mut env, view.id),
        Err(EditorError::AlreadyCreated(_))
    ));

    let noted = editor::set_note(&mut env, view.id, Some("still editable".into())).unwrap();
    assert_eq!(noted.note.as_deref(), Some("still editable"));
}

#[test]
fn test_delete_requires_reset() {
    let mut fx = Fixture::new();
    let data = fx.sales_by_region();
    let mut env = fx.env();

    let view = editor::create(&mut env, NewView::new("Sales by Region").data(data)).unwrap();
    editor::action_create(&mut env, view.id).unwrap();

    let err = editor::unlink(&mut env, view.id).unwrap_err();
    assert_eq!(
        err.to_string(),
        "You cannot delete a created view! Reset the view to draft first. ('Sales by Region')"
    );
    assert_eq!(editor::list(&env).unwrap().len(), 1);

    editor::action_reset(&mut env, view.id).unwrap();
    editor::unlink(&mut env, view.id).unwrap();
    assert!(editor::list(&env).unwrap().is_empty());
    assert!(matches!(
        editor::get(&env, view.id),
        Err(EditorError::NotFound(_))
    ));
}

#[test]
fn test_model_name_collision_between_reports() {
    let mut fx = Fixture::new();
    let data = fx.sales_by_region();
    let mut env = fx.env();

    let first = editor::create(&mut env, NewView::new("Sales by Region").data(data.clone())).unwrap();
    let second = editor::create(&mut env, NewView::new("Sales-by-Region").data(data)).unwrap();
    assert_eq!(first.model_name, second.model_name);

    editor::action_create(&mut env, first.id).unwrap();
    assert!(matches!(
        editor::action_create(&mut env, second.id),
        Err(EditorError::ModelInUse { .. })
    ));
}

#[test]
fn test_reset_of_colliding_draft_keeps_owner_artifacts() {
    let mut fx = Fixture::new();
    let data = fx.sales_by_region();
    let model = "x_bve.salesbyregion";
    {
        let mut env = fx.env();
        let first =
            editor::create(&mut env, NewView::new("Sales by Region").data(data.clone())).unwrap();
        let second = editor::create(&mut env, NewView::new("Sales-by-Region").data(data)).unwrap();
        editor::action_create(&mut env, first.id).unwrap();

        let reset = editor::action_reset(&mut env, second.id).unwrap();
        assert_eq!(reset.state, ViewState::Draft);

        assert_eq!(editor::get(&env, first.id).unwrap().state, ViewState::Created);
        assert_eq!(env.host.find_types(model).unwrap().len(), 1);
        assert_eq!(env.host.find_ui_views(model).unwrap().len(), 3);
        assert!(env.registry.contains(model));
        assert_eq!(editor::read_records(&mut env, first.id).unwrap().len(), 3);
    }
    assert!(fx.view_exists("x_bve_salesbyregion"));
}

// ============================================================================
// Generation failures
// ============================================================================

#[test]
fn test_empty_selection_creates_nothing() {
    let mut fx = Fixture::new();
    {
        let mut env = fx.env();
        let empty = editor::create(&mut env, NewView::new("Empty")).unwrap();
        let err = editor::action_create(&mut env, empty.id).unwrap_err();
        assert!(matches!(err, EditorError::Data(FieldSpecError::NoData)));
        assert_eq!(err.to_string(), "No data to process.");

        let blank = editor::create(&mut env, NewView::new("Blank").data("[]")).unwrap();
        assert!(matches!(
            editor::action_create(&mut env, blank.id),
            Err(EditorError::Data(FieldSpecError::NoData))
        ));

        assert_eq!(editor::get(&env, empty.id).unwrap().state, ViewState::Draft);
        assert!(env.host.find_types("x_bve.empty").unwrap().is_empty());
        assert!(env.host.find_ui_views("x_bve.empty").unwrap().is_empty());
    }
    assert!(!fx.view_exists("x_bve_empty"));
}

#[test]
fn test_failed_registration_rolls_back() {
    let mut fx = Fixture::new();
    let data = fx.sales_by_region();
    // A source model already owns the name the report would generate.
    fx.store
        .declare_model("x_bve.broken", "x_bve_broken", "Squatter")
        .unwrap();

    {
        let mut env = fx.env();
        let view = editor::create(&mut env, NewView::new("Broken").data(data)).unwrap();
        assert!(matches!(
            editor::action_create(&mut env, view.id),
            Err(EditorError::Platform(PlatformError::Constraint(_)))
        ));
        assert_eq!(editor::get(&env, view.id).unwrap().state, ViewState::Draft);
        assert!(env.host.find_types("x_bve.broken").unwrap().is_empty());
        assert!(!env.registry.contains("x_bve.broken"));
    }
    assert!(!fx.view_exists("x_bve_broken"));
}

// ============================================================================
// Reset
// ============================================================================

#[test]
fn test_reset_removes_every_artifact() {
    let mut fx = Fixture::new();
    let data = fx.sales_by_region();
    let model = "x_bve.salesbyregion";
    {
        let mut env = fx.env();
        let view = editor::create(&mut env, NewView::new("Sales by Region").data(data)).unwrap();
        let created = editor::action_create(&mut env, view.id).unwrap();
        let action_id = created.action_id.unwrap();

        let reset = editor::action_reset(&mut env, view.id).unwrap();
        assert_eq!(reset.state, ViewState::Draft);
        assert_eq!(reset.action_id, None);
        assert_eq!(reset.view_id, None);

        assert!(env.host.action(action_id).unwrap().is_none());
        assert!(env.host.find_ui_views(model).unwrap().is_empty());
        assert!(env.host.find_types(model).unwrap().is_empty());
        assert!(!env.registry.contains(model));
    }
    assert!(!fx.view_exists("x_bve_salesbyregion"));
}

#[test]
fn test_reset_is_idempotent() {
    let mut fx = Fixture::new();
    let data = fx.sales_by_region();
    let mut env = fx.env();

    let view = editor::create(&mut env, NewView::new("Sales by Region").data(data)).unwrap();
    editor::action_reset(&mut env, view.id).unwrap();

    editor::action_create(&mut env, view.id).unwrap();
    editor::action_reset(&mut env, view.id).unwrap();
    let again = editor::action_reset(&mut env, view.id).unwrap();
    assert_eq!(again.state, ViewState::Draft);

    // Generation works again after a reset.
    let recreated = editor::action_create(&mut env, view.id).unwrap();
    assert_eq!(recreated.state, ViewState::Created);
    assert_eq!(env.host.find_ui_views(&recreated.model_name).unwrap().len(), 3);
}

#[test]
fn test_reset_tolerates_missing_artifacts() {
    let mut fx = Fixture::new();
    let data = fx.sales_by_region();
    let mut env = fx.env();

    let view = editor::create(&mut env, NewView::new("Sales by Region").data(data)).unwrap();
    let created = editor::action_create(&mut env, view.id).unwrap();

    // Someone removed the action and the type by hand.
    env.host.delete_action(created.action_id.unwrap()).unwrap();
    for type_id in env.host.find_types(&created.model_name).unwrap() {
        env.host.delete_type(type_id).unwrap();
    }

    let reset = editor::action_reset(&mut env, view.id).unwrap();
    assert_eq!(reset.state, ViewState::Draft);
    assert!(env.host.find_ui_views(&created.model_name).unwrap().is_empty());
}
