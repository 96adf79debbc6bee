//! # bve
//!
//! A BI view editor: users pick fields from related source models, tag
//! them as rows, columns or measures, and bve generates a relational view,
//! a runtime record type over it, pivot/graph/tree presentations and the
//! access grants that scope who can read the result.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │          BveView.data (serialized field selection)      │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [fields]
//! ┌─────────────────────────────────────────────────────────┐
//! │     ResolvedSelection (table, column, type per field)   │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [compile]
//! ┌─────────────────────────────────────────────────────────┐
//! │      CREATE VIEW ... AS SELECT ... + arch fragments     │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [registrar, access]
//! ┌─────────────────────────────────────────────────────────┐
//! │   TypeDescriptor + registry reload + views + grants     │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! [`editor`] drives the pipeline through the draft/created lifecycle.
//! Everything touching storage goes through the [`platform`] traits;
//! [`store::SqliteStore`] implements them over one SQLite database.

pub mod access;
pub mod compile;
pub mod config;
pub mod editor;
pub mod env;
pub mod fields;
pub mod holidays;
pub mod model;
pub mod platform;
pub mod registrar;
pub mod registry;
pub mod sql;
pub mod store;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::editor::{EditorError, EditorResult, NewView};
    pub use crate::env::Env;
    pub use crate::model::{BveView, FieldSpec, FieldType, ViewState};
    pub use crate::platform::{Host, PlatformError};
    pub use crate::registry::SchemaRegistry;
    pub use crate::sql::Dialect;
    pub use crate::store::SqliteStore;
}

pub use env::Env;
pub use registry::SchemaRegistry;
pub use store::SqliteStore;
