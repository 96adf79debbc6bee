//! Two processes sharing one store see each other's registry changes.

#[path = "../common/mod.rs"]
mod common;

use std::path::PathBuf;

use bve::editor::{self, NewView};
use bve::{Env, SchemaRegistry, SqliteStore};
use common::Fixture;

struct TempStore(PathBuf);

impl TempStore {
    fn new(name: &str) -> Self {
        let path = std::env::temp_dir().join(format!("bve-{name}-{}.db", std::process::id()));
        let _ = std::fs::remove_file(&path);
        Self(path)
    }
}

impl Drop for TempStore {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.0);
    }
}

#[test]
fn test_other_process_reloads_after_create_and_reset() {
    let temp = TempStore::new("signal");
    let mut fx = Fixture::with_store(SqliteStore::open(&temp.0).unwrap());
    let data = fx.sales_by_region();
    let admin = fx.admin;

    let mut other = SqliteStore::open(&temp.0).unwrap();
    let mut other_registry = SchemaRegistry::new();
    other_registry.boot(&other).unwrap();
    assert!(!other_registry.check_signaling(&other).unwrap());

    let view = {
        let mut env = fx.env();
        let view = editor::create(&mut env, NewView::new("Sales by Region").data(data)).unwrap();
        editor::action_create(&mut env, view.id).unwrap()
    };
    // The writer acknowledged its own signal.
    assert!(!fx.registry.check_signaling(&fx.store).unwrap());

    assert!(!other_registry.contains("x_bve.salesbyregion"));
    assert!(other_registry.check_signaling(&other).unwrap());
    assert!(other_registry.contains("x_bve.salesbyregion"));
    assert!(!other_registry.check_signaling(&other).unwrap());

    {
        let mut env = Env::new(&mut other, &mut other_registry, admin);
        assert_eq!(editor::read_records(&mut env, view.id).unwrap().len(), 3);
    }

    {
        let mut env = fx.env();
        editor::action_reset(&mut env, view.id).unwrap();
    }
    assert!(other_registry.check_signaling(&other).unwrap());
    assert!(!other_registry.contains("x_bve.salesbyregion"));

    let mut env = Env::new(&mut other, &mut other_registry, admin);
    assert!(matches!(
        editor::read_records(&mut env, view.id),
        Err(editor::EditorError::UnknownType(_))
    ));
}

#[test]
fn test_boot_loads_existing_types() {
    let temp = TempStore::new("boot");
    {
        let mut fx = Fixture::with_store(SqliteStore::open(&temp.0).unwrap());
        let data = fx.sales_by_region();
        let mut env = fx.env();
        let view = editor::create(&mut env, NewView::new("Sales by Region").data(data)).unwrap();
        editor::action_create(&mut env, view.id).unwrap();
    }

    let reopened = SqliteStore::open(&temp.0).unwrap();
    let mut registry = SchemaRegistry::new();
    let report = registry.boot(&reopened).unwrap();
    assert!(registry.is_ready());
    assert_eq!(report.added, vec!["x_bve.salesbyregion".to_string()]);
    assert_eq!(
        registry
            .get("x_bve.salesbyregion")
            .unwrap()
            .descriptor
            .field_names()
            .collect::<Vec<_>>(),
        vec!["x_amount", "x_region"]
    );
}
