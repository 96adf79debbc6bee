//! Field Resolver.
//!
//! Turns the serialized field selection stored on a report into resolved
//! fields carrying their physical table, column and declared type.
//!
//! ```text
//! data (legacy text) ─▶ normalize ─▶ JSON ─▶ Vec<FieldSpec> ─▶ validate
//!                                                  │
//!                                   FieldCatalog ──┴─▶ ResolvedSelection
//! ```

mod normalize;
mod resolver;

pub use normalize::{normalize_legacy, parse_field_specs};
pub use resolver::{resolve, ResolvedField, ResolvedSelection};

use crate::platform::PlatformError;

/// Errors raised while reading a field selection.
#[derive(Debug, thiserror::Error)]
pub enum FieldSpecError {
    #[error("No data to process.")]
    NoData,

    #[error("Malformed field selection: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Invalid {kind} '{value}': only letters, digits and '_' are allowed")]
    InvalidIdentifier { kind: &'static str, value: String },

    #[error("Field '{field}' joins on unknown table alias '{alias}'")]
    UnknownJoinTarget { field: String, alias: String },

    #[error("Table alias '{alias}' is used for both '{first}' and '{second}'")]
    AliasConflict {
        alias: String,
        first: String,
        second: String,
    },

    #[error("Field name '{0}' is selected more than once")]
    DuplicateField(String),

    #[error(transparent)]
    Platform(#[from] PlatformError),
}

pub type FieldSpecResult<T> = Result<T, FieldSpecError>;
