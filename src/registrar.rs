//! Metadata Registrar.
//!
//! Persists the virtual type of a report, makes the live registry pick it
//! up, and builds the presentation views and action bound to it.

use tracing::{debug, info};

use crate::compile::{arch_fields, render_arch};
use crate::fields::{ResolvedField, ResolvedSelection};
use crate::model::{
    view_table_name, ActionId, FieldDescriptor, FieldState, FieldType, TypeDescriptor, UiView,
    UiViewId, ViewKind, WindowAction,
};
use crate::platform::{FieldCatalog, PlatformError, PlatformResult, RegistrySignal, SqlExecutor, TypeStore, UiStore};
use crate::registry::{RegistryError, ReloadReport, SchemaRegistry};

/// Priority of generated presentation views.
pub const VIEW_PRIORITY: i64 = 16;

/// View modes the generated action opens, default first.
pub const VIEW_MODE: &str = "tree,graph,pivot";

/// Errors raised while registering a type.
#[derive(Debug, thiserror::Error)]
pub enum RegistrarError {
    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

pub type RegistrarResult<T> = Result<T, RegistrarError>;

/// Presentation records created for a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presentation {
    pub action_id: ActionId,
    /// The default (tree) view.
    pub view_id: UiViewId,
    pub pivot_id: UiViewId,
    pub graph_id: UiViewId,
}

/// Build the virtual type descriptor for a report.
///
/// One field per selected non-custom field; join fields are skipped.
pub fn prepare_type(
    catalog: &impl FieldCatalog,
    name: &str,
    model_name: &str,
    selection: &ResolvedSelection,
) -> PlatformResult<TypeDescriptor> {
    let fields = selection
        .selected()
        .filter(|field| !field.spec.custom)
        .map(|field| prepare_field(catalog, model_name, field))
        .collect::<PlatformResult<Vec<_>>>()?;

    Ok(TypeDescriptor {
        name: name.to_string(),
        model: model_name.to_string(),
        table: view_table_name(model_name),
        fields,
    })
}

fn prepare_field(
    catalog: &impl FieldCatalog,
    model_name: &str,
    field: &ResolvedField,
) -> PlatformResult<FieldDescriptor> {
    let source = &field.source;

    let mut selection = source.selection.clone().filter(|s| !s.is_empty());
    if source.ttype == FieldType::Selection && selection.is_none() {
        selection = catalog.live_selection(&source.model, &source.name)?;
    }

    Ok(FieldDescriptor {
        name: field.alias(),
        complete_name: source.complete_name.clone(),
        model: model_name.to_string(),
        relation: source.relation.clone(),
        field_description: field.description().to_string(),
        ttype: field.virtual_type(),
        selection,
        size: source.size,
        state: FieldState::Manual,
    })
}

/// Make the live registry match the store, then tell other processes.
///
/// Uses a partial setup while the registry has not finished booting.
pub fn force_registry_reload<S>(
    store: &mut S,
    registry: &mut SchemaRegistry,
) -> RegistrarResult<ReloadReport>
where
    S: SqlExecutor + TypeStore + RegistrySignal,
{
    let partial = !registry.is_ready();
    let report = registry.setup_models(store.load_types()?, partial)?;

    let store_id = store.store_id().to_string();
    let sequence = store.signal_change(&store_id)?;
    registry.acknowledge(sequence);

    debug!(partial, sequence, store = %store_id, "registry reloaded and signalled");
    Ok(report)
}

/// Replace the presentation views of `model_name` and create its action.
pub fn build_presentation(
    store: &mut impl UiStore,
    name: &str,
    model_name: &str,
    selection: &ResolvedSelection,
) -> PlatformResult<Presentation> {
    for old in store.find_ui_views(model_name)? {
        store.delete_ui_view(old)?;
    }

    let fields = arch_fields(selection);
    let mut create = |label: &str, kind: ViewKind| {
        store.create_ui_view(&UiView {
            name: label.to_string(),
            kind,
            model: model_name.to_string(),
            priority: VIEW_PRIORITY,
            arch: render_arch(kind, &fields),
        })
    };
    let pivot_id = create("Pivot Analysis", ViewKind::Pivot)?;
    let graph_id = create("Graph Analysis", ViewKind::Graph)?;
    let view_id = create("Tree Analysis", ViewKind::Tree)?;

    let action_id = store.create_action(&WindowAction {
        name: name.to_string(),
        res_model: model_name.to_string(),
        view_mode: VIEW_MODE.to_string(),
        view_id: Some(view_id),
        context: Some(format!("{{'service_name': '{name}'}}")),
    })?;

    info!(%model_name, action_id, view_id, "presentation built");
    Ok(Presentation {
        action_id,
        view_id,
        pivot_id,
        graph_id,
    })
}
