//! Plain data types shared by every stage of report generation.
//!
//! Nothing in here talks to a database; the [`crate::platform`] traits move
//! these values in and out of the host.

pub mod access;
pub mod descriptor;
pub mod field;
pub mod holiday;
pub mod ui;
pub mod view;

pub use access::{AccessMode, AccessRule};
pub use descriptor::{FieldDescriptor, FieldState, TypeDescriptor};
pub use field::{DimensionRole, FieldSpec, FieldType, SourceField};
pub use holiday::{HolidayLine, HolidayState, PublicHoliday};
pub use ui::{ActionDescriptor, UiView, ViewKind, WindowAction};
pub use view::{model_name_for, view_table_name, BveView, ViewState, MODEL_NAMESPACE};

/// Primary key of any row in the host store.
pub type RecordId = i64;

pub type BveViewId = RecordId;
pub type FieldId = RecordId;
pub type TypeId = RecordId;
pub type UiViewId = RecordId;
pub type ActionId = RecordId;
pub type AccessId = RecordId;
pub type GroupId = RecordId;
pub type UserId = RecordId;
pub type CompanyId = RecordId;
pub type HolidayId = RecordId;
pub type HolidayLineId = RecordId;
