//! View-Editor State Machine.
//!
//! ```text
//!            action_create
//!   draft ─────────────────▶ created
//!     ▲                         │
//!     └──────── action_reset ───┘
//! ```
//!
//! `data`, `name` and `group_ids` can only change in draft, and only draft
//! records can be deleted. `action_create` commits once its type and grants
//! are persisted, before reloading the registry; a failure after that point
//! leaves artifacts behind that `action_reset` cleans up.

use std::collections::BTreeSet;

use tracing::{debug, info, warn};

use crate::access::{compute_user_ids, grant_access};
use crate::compile::{drop_view, ViewDefinition};
use crate::env::Env;
use crate::fields::{resolve, FieldSpecError};
use crate::model::{
    model_name_for, ActionDescriptor, BveView, BveViewId, GroupId, ViewState, MODEL_NAMESPACE,
};
use crate::platform::{Host, PlatformError};
use crate::registrar::{
    build_presentation, force_registry_reload, prepare_type, RegistrarError, VIEW_MODE,
};
use crate::registry::RegistryError;

/// Errors raised by report operations.
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error(transparent)]
    Data(#[from] FieldSpecError),

    #[error("Custom BI View names must be unique! ('{0}' already exists)")]
    DuplicateName(String),

    #[error("Name '{0}' has no letters or digits to build a model name from")]
    InvalidName(String),

    #[error("You cannot delete a created view! Reset the view to draft first. ('{0}')")]
    DeleteCreated(String),

    #[error("'{0}' is created; reset it to draft before editing")]
    NotDraft(String),

    #[error("'{0}' is already created")]
    AlreadyCreated(String),

    #[error("Model '{model}' is already generated by '{owner}'")]
    ModelInUse { model: String, owner: String },

    #[error("BI view {0} not found")]
    NotFound(BveViewId),

    #[error("Model '{0}' is not registered; create the view first")]
    UnknownType(String),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Platform(#[from] PlatformError),
}

impl From<RegistrarError> for EditorError {
    fn from(err: RegistrarError) -> Self {
        match err {
            RegistrarError::Platform(e) => EditorError::Platform(e),
            RegistrarError::Registry(e) => EditorError::Registry(e),
        }
    }
}

pub type EditorResult<T> = Result<T, EditorError>;

/// Values for a new report definition.
#[derive(Debug, Clone, Default)]
pub struct NewView {
    pub name: String,
    pub data: Option<String>,
    pub note: Option<String>,
    pub group_ids: BTreeSet<GroupId>,
}

impl NewView {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn data(mut self, data: impl Into<String>) -> Self {
        self.data = Some(data.into());
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn groups(mut self, groups: impl IntoIterator<Item = GroupId>) -> Self {
        self.group_ids = groups.into_iter().collect();
        self
    }
}

// ============================================================================
// Record CRUD
// ============================================================================

pub fn get<H: Host>(env: &Env<'_, H>, id: BveViewId) -> EditorResult<BveView> {
    env.host.get_bve(id)?.ok_or(EditorError::NotFound(id))
}

pub fn find_by_name<H: Host>(env: &Env<'_, H>, name: &str) -> EditorResult<Option<BveView>> {
    Ok(env.host.find_bve_by_name(name)?)
}

pub fn list<H: Host>(env: &Env<'_, H>) -> EditorResult<Vec<BveView>> {
    Ok(env.host.list_bve()?)
}

/// Insert a draft report definition.
pub fn create<H: Host>(env: &mut Env<'_, H>, values: NewView) -> EditorResult<BveView> {
    let model_name = checked_model_name(&values.name)?;
    ensure_unique_name(env, &values.name, None)?;

    let user_ids = compute_user_ids(&*env.host, &values.group_ids)?;
    let mut view = BveView {
        id: 0,
        name: values.name,
        model_name,
        note: values.note,
        state: ViewState::Draft,
        data: values.data,
        action_id: None,
        view_id: None,
        group_ids: values.group_ids,
        user_ids,
    };
    view.id = env.host.insert_bve(&view)?;

    info!(id = view.id, name = %view.name, model = %view.model_name, "BI view created");
    Ok(view)
}

/// Replace the field selection of a draft report.
pub fn write_data<H: Host>(
    env: &mut Env<'_, H>,
    id: BveViewId,
    data: Option<String>,
) -> EditorResult<BveView> {
    let mut view = draft(env, id)?;
    view.data = data;
    env.host.update_bve(&view)?;
    debug!(id, "BI view data updated");
    Ok(view)
}

/// Rename a draft report; its model name follows.
pub fn rename<H: Host>(env: &mut Env<'_, H>, id: BveViewId, name: &str) -> EditorResult<BveView> {
    let mut view = draft(env, id)?;
    view.model_name = checked_model_name(name)?;
    ensure_unique_name(env, name, Some(id))?;
    view.name = name.to_string();
    env.host.update_bve(&view)?;
    Ok(view)
}

pub fn set_note<H: Host>(
    env: &mut Env<'_, H>,
    id: BveViewId,
    note: Option<String>,
) -> EditorResult<BveView> {
    let mut view = get(env, id)?;
    view.note = note;
    env.host.update_bve(&view)?;
    Ok(view)
}

/// Replace the read-write groups of a draft report and recompute its users.
pub fn set_groups<H: Host>(
    env: &mut Env<'_, H>,
    id: BveViewId,
    groups: BTreeSet<GroupId>,
) -> EditorResult<BveView> {
    let mut view = draft(env, id)?;
    view.user_ids = compute_user_ids(&*env.host, &groups)?;
    view.group_ids = groups;
    env.host.update_bve(&view)?;
    Ok(view)
}

/// Delete a draft report.
pub fn unlink<H: Host>(env: &mut Env<'_, H>, id: BveViewId) -> EditorResult<()> {
    let view = get(env, id)?;
    if view.is_created() {
        return Err(EditorError::DeleteCreated(view.name));
    }
    env.host.delete_bve(id)?;
    info!(id, name = %view.name, "BI view deleted");
    Ok(())
}

/// Duplicate a report as a new draft named `"<name> (copy)"`.
pub fn copy<H: Host>(env: &mut Env<'_, H>, id: BveViewId) -> EditorResult<BveView> {
    let source = get(env, id)?;
    let copied = create(
        env,
        NewView {
            name: format!("{} (copy)", source.name),
            data: source.data,
            note: source.note,
            group_ids: source.group_ids,
        },
    )?;
    info!(from = id, to = copied.id, "BI view copied");
    Ok(copied)
}

// ============================================================================
// Lifecycle
// ============================================================================

/// Generate every artifact of a draft report and mark it created.
pub fn action_create<H: Host>(env: &mut Env<'_, H>, id: BveViewId) -> EditorResult<BveView> {
    let mut view = get(env, id)?;
    if view.is_created() {
        return Err(EditorError::AlreadyCreated(view.name));
    }
    if let Some(owner) = model_owner(env, &view)? {
        return Err(EditorError::ModelInUse {
            model: view.model_name,
            owner: owner.name,
        });
    }

    let selection = resolve(&*env.host, view.data.as_deref())?;
    let definition = ViewDefinition::build(&view.model_name, &selection);

    env.transaction(|env| -> EditorResult<()> {
        let dialect = env.host.dialect();
        for sql in definition.statements(dialect) {
            debug!(%sql, "executing");
            env.host.execute(&sql)?;
        }

        let descriptor = prepare_type(&*env.host, &view.name, &view.model_name, &selection)?;
        let type_id = env.host.create_type(&descriptor)?;
        grant_access(
            env.host,
            &view.model_name,
            type_id,
            selection.models(),
            &view.group_ids,
        )?;
        Ok(())
    })?;

    force_registry_reload(env.host, env.registry)?;

    let presentation = env.transaction(|env| -> EditorResult<_> {
        let presentation =
            build_presentation(env.host, &view.name, &view.model_name, &selection)?;
        view.action_id = Some(presentation.action_id);
        view.view_id = Some(presentation.view_id);
        view.state = ViewState::Created;
        env.host.update_bve(&view)?;
        Ok(presentation)
    })?;

    info!(
        id,
        model = %view.model_name,
        action_id = presentation.action_id,
        "BI view generated"
    );
    Ok(view)
}

/// Another created report that generated the same model name.
fn model_owner<H: Host>(env: &Env<'_, H>, view: &BveView) -> EditorResult<Option<BveView>> {
    Ok(env.host.list_bve()?.into_iter().find(|other| {
        other.id != view.id && other.is_created() && other.model_name == view.model_name
    }))
}

/// Tear down the generated artifacts of a report and return it to draft.
///
/// Missing artifacts are skipped, so this also cleans up after a failed
/// `action_create`. When another created report owns the same model name,
/// only this record's own action is removed and the shared type, views and
/// backing view are left in place.
pub fn action_reset<H: Host>(env: &mut Env<'_, H>, id: BveViewId) -> EditorResult<BveView> {
    let mut view = get(env, id)?;
    let owner = model_owner(env, &view)?;

    env.transaction(|env| -> EditorResult<()> {
        if let Some(action_id) = view.action_id {
            match env.host.action(action_id)? {
                Some(action) => {
                    if let Some(tree) = action.view_id {
                        env.host.delete_ui_view(tree)?;
                    }
                    env.host.delete_action(action_id)?;
                }
                None => warn!(action_id, "action already gone"),
            }
        }

        match &owner {
            Some(owner) => warn!(
                model = %view.model_name,
                owner = %owner.name,
                "model owned by another report, keeping its artifacts"
            ),
            None => {
                for stale in env.host.find_ui_views(&view.model_name)? {
                    env.host.delete_ui_view(stale)?;
                }

                let types = env.host.find_types(&view.model_name)?;
                if types.is_empty() {
                    warn!(model = %view.model_name, "no registered type to remove");
                }
                for type_id in types {
                    env.host.delete_type(type_id)?;
                }

                let sql = drop_view(&view.table_name()).to_sql(env.host.dialect());
                debug!(%sql, "executing");
                env.host.execute(&sql)?;
            }
        }

        view.action_id = None;
        view.view_id = None;
        view.state = ViewState::Draft;
        env.host.update_bve(&view)?;
        Ok(())
    })?;

    if owner.is_none() {
        env.registry.forget(&view.model_name);
        force_registry_reload(env.host, env.registry)?;
    }

    info!(id, model = %view.model_name, "BI view reset to draft");
    Ok(view)
}

/// Descriptor opening the report's type in tree, graph and pivot modes.
pub fn open_view(view: &BveView) -> ActionDescriptor {
    ActionDescriptor {
        action_type: "ir.actions.act_window".to_string(),
        res_model: view.model_name.clone(),
        view_type: "form".to_string(),
        view_mode: VIEW_MODE.to_string(),
    }
}

/// Read every record of a created report's generated type.
pub fn read_records<H: Host>(
    env: &mut Env<'_, H>,
    id: BveViewId,
) -> EditorResult<Vec<serde_json::Map<String, serde_json::Value>>> {
    let view = get(env, id)?;
    env.registry.check_signaling(&*env.host)?;
    if !env.registry.contains(&view.model_name) {
        return Err(EditorError::UnknownType(view.model_name));
    }
    Ok(env.registry.read_records(env.host, &view.model_name)?)
}

// ============================================================================
// Helpers
// ============================================================================

fn draft<H: Host>(env: &Env<'_, H>, id: BveViewId) -> EditorResult<BveView> {
    let view = get(env, id)?;
    if view.is_created() {
        return Err(EditorError::NotDraft(view.name));
    }
    Ok(view)
}

fn checked_model_name(name: &str) -> EditorResult<String> {
    let model_name = model_name_for(name);
    if model_name.len() <= MODEL_NAMESPACE.len() + 1 {
        return Err(EditorError::InvalidName(name.to_string()));
    }
    Ok(model_name)
}

fn ensure_unique_name<H: Host>(
    env: &Env<'_, H>,
    name: &str,
    except: Option<BveViewId>,
) -> EditorResult<()> {
    match env.host.find_bve_by_name(name)? {
        Some(existing) if Some(existing.id) != except => {
            Err(EditorError::DuplicateName(name.to_string()))
        }
        _ => Ok(()),
    }
}
