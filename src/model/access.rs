//! Per-group access grants on a model.

use serde::{Deserialize, Serialize};

use super::{GroupId, TypeId};

/// Permission bit a grant can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessMode {
    Read,
    Write,
    Create,
    Unlink,
}

impl AccessMode {
    /// Column holding this permission in the grant table.
    pub fn column(&self) -> &'static str {
        match self {
            AccessMode::Read => "perm_read",
            AccessMode::Write => "perm_write",
            AccessMode::Create => "perm_create",
            AccessMode::Unlink => "perm_unlink",
        }
    }
}

/// A grant of permissions on one model to one group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessRule {
    pub name: String,
    pub model_id: TypeId,
    pub group_id: GroupId,
    pub perm_read: bool,
    pub perm_write: bool,
    pub perm_create: bool,
    pub perm_unlink: bool,
}

impl AccessRule {
    pub fn read_only(name: impl Into<String>, model_id: TypeId, group_id: GroupId) -> Self {
        Self {
            name: name.into(),
            model_id,
            group_id,
            perm_read: true,
            perm_write: false,
            perm_create: false,
            perm_unlink: false,
        }
    }

    pub fn read_write(name: impl Into<String>, model_id: TypeId, group_id: GroupId) -> Self {
        Self {
            perm_write: true,
            ..Self::read_only(name, model_id, group_id)
        }
    }
}
