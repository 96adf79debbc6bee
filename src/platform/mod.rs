//! Collaborator interfaces the report engine calls into.
//!
//! The engine never talks to a database directly. Everything it needs from
//! the host (running SQL, looking up source fields, storing type
//! descriptors, presentation records and grants, resolving users) goes
//! through these traits.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                            Host                              │
//! │  SqlExecutor     FieldCatalog   TypeStore     UiStore        │
//! │  AccessStore     Directory      ViewRecords   RegistrySignal │
//! │  HolidayStore                                                │
//! └──────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │                 SqliteStore (crate::store)                   │
//! └──────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeSet;

use crate::model::{
    AccessId, AccessMode, AccessRule, ActionId, BveView, BveViewId, CompanyId, FieldId, GroupId,
    HolidayId, HolidayLine, HolidayLineId, HolidayState, PublicHoliday, SourceField, TypeDescriptor, TypeId,
    UiView, UiViewId, UserId, WindowAction,
};
use crate::sql::Dialect;

/// Errors raised by the host platform.
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("SQL error: {0}")]
    Sql(String),

    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: i64 },

    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Corrupt {what} in store: {value}")]
    Corrupt { what: &'static str, value: String },
}

pub type PlatformResult<T> = Result<T, PlatformError>;

/// Runs SQL on the active connection and controls the transaction boundary.
pub trait SqlExecutor {
    /// Dialect generated statements must be rendered in.
    fn dialect(&self) -> Dialect;

    /// Identity of the backing store, shared by every process using it.
    fn store_id(&self) -> &str;

    /// Execute a statement that returns no rows.
    fn execute(&mut self, sql: &str) -> PlatformResult<()>;

    /// Run a query and return each row as a JSON object keyed by column name.
    fn query_rows(&mut self, sql: &str) -> PlatformResult<Vec<serde_json::Map<String, serde_json::Value>>>;

    /// Open a transaction if none is active.
    fn begin(&mut self) -> PlatformResult<()>;

    /// Commit the active transaction, if any.
    fn commit(&mut self) -> PlatformResult<()>;

    /// Roll back the active transaction, if any.
    fn rollback(&mut self) -> PlatformResult<()>;
}

/// Source-field metadata lookups.
pub trait FieldCatalog {
    fn source_field(&self, id: FieldId) -> PlatformResult<SourceField>;

    /// Enumeration currently declared for a column, as JSON `[[value, label], ...]`.
    fn live_selection(&self, model: &str, field: &str) -> PlatformResult<Option<String>>;
}

/// Persistent storage of virtual type descriptors.
pub trait TypeStore {
    fn create_type(&mut self, descriptor: &TypeDescriptor) -> PlatformResult<TypeId>;

    fn find_types(&self, model: &str) -> PlatformResult<Vec<TypeId>>;

    /// Delete a type together with its fields and grants.
    fn delete_type(&mut self, id: TypeId) -> PlatformResult<()>;

    /// Every runtime-created type, with its fields.
    fn load_types(&self) -> PlatformResult<Vec<TypeDescriptor>>;
}

/// Presentation views and window actions.
pub trait UiStore {
    fn create_ui_view(&mut self, view: &UiView) -> PlatformResult<UiViewId>;

    fn ui_view(&self, id: UiViewId) -> PlatformResult<Option<UiView>>;

    fn find_ui_views(&self, model: &str) -> PlatformResult<Vec<UiViewId>>;

    fn delete_ui_view(&mut self, id: UiViewId) -> PlatformResult<()>;

    fn create_action(&mut self, action: &WindowAction) -> PlatformResult<ActionId>;

    fn action(&self, id: ActionId) -> PlatformResult<Option<WindowAction>>;

    fn delete_action(&mut self, id: ActionId) -> PlatformResult<()>;
}

/// Per-model group grants.
pub trait AccessStore {
    /// Groups holding an active grant with `mode` on `model`.
    fn groups_with_access(&self, model: &str, mode: AccessMode) -> PlatformResult<BTreeSet<GroupId>>;

    fn create_access(&mut self, rule: &AccessRule) -> PlatformResult<AccessId>;

    fn access_rules(&self, model_id: TypeId) -> PlatformResult<Vec<AccessRule>>;
}

/// Users, groups and companies.
pub trait Directory {
    /// Union of the members of `groups`.
    fn group_members(&self, groups: &BTreeSet<GroupId>) -> PlatformResult<BTreeSet<UserId>>;

    fn all_users(&self) -> PlatformResult<BTreeSet<UserId>>;

    fn user_company(&self, user: UserId) -> PlatformResult<Option<CompanyId>>;
}

/// Persistence of report definitions.
pub trait ViewRecords {
    fn insert_bve(&mut self, view: &BveView) -> PlatformResult<BveViewId>;

    fn get_bve(&self, id: BveViewId) -> PlatformResult<Option<BveView>>;

    fn find_bve_by_name(&self, name: &str) -> PlatformResult<Option<BveView>>;

    fn update_bve(&mut self, view: &BveView) -> PlatformResult<()>;

    fn delete_bve(&mut self, id: BveViewId) -> PlatformResult<()>;

    fn list_bve(&self) -> PlatformResult<Vec<BveView>>;
}

/// Cross-process notification that the type registry changed.
///
/// Every process sharing a store compares the store's sequence with the
/// one it last loaded and reloads its registry when it advanced.
pub trait RegistrySignal {
    fn signal_change(&mut self, store_id: &str) -> PlatformResult<u64>;

    fn signal_sequence(&self) -> PlatformResult<u64>;
}

/// Persistence of public-holiday calendars and their lines.
pub trait HolidayStore {
    fn insert_holiday(&mut self, year: i32, company_id: Option<CompanyId>) -> PlatformResult<HolidayId>;

    fn get_holiday(&self, id: HolidayId) -> PlatformResult<Option<PublicHoliday>>;

    fn set_holiday_state(&mut self, id: HolidayId, state: HolidayState) -> PlatformResult<()>;

    fn add_holiday_line(&mut self, holiday: HolidayId, date: &str, name: &str) -> PlatformResult<HolidayLineId>;

    fn holiday_lines(&self, holiday: HolidayId) -> PlatformResult<Vec<HolidayLine>>;

    /// Rebuild the schedule entries that depend on a line.
    fn reinit_line(&mut self, line: HolidayLineId) -> PlatformResult<()>;

    /// Remove the schedule entries that depend on a line.
    fn reset_line(&mut self, line: HolidayLineId) -> PlatformResult<()>;
}

/// Everything the engine needs from its host.
pub trait Host:
    SqlExecutor
    + FieldCatalog
    + TypeStore
    + UiStore
    + AccessStore
    + Directory
    + ViewRecords
    + RegistrySignal
    + HolidayStore
{
}

impl<T> Host for T where
    T: SqlExecutor
        + FieldCatalog
        + TypeStore
        + UiStore
        + AccessStore
        + Directory
        + ViewRecords
        + RegistrySignal
        + HolidayStore
{
}
