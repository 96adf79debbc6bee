//! Virtual type descriptors.

use serde::{Deserialize, Serialize};

use super::field::FieldType;

/// Whether a type or field was declared by a module or created at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldState {
    Base,
    Manual,
}

impl FieldState {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldState::Base => "base",
            FieldState::Manual => "manual",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "base" => Some(FieldState::Base),
            "manual" => Some(FieldState::Manual),
            _ => None,
        }
    }
}

/// One field of a virtual type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    pub complete_name: Option<String>,
    pub model: String,
    pub relation: Option<String>,
    pub field_description: String,
    pub ttype: FieldType,
    pub selection: Option<String>,
    pub size: Option<i64>,
    pub state: FieldState,
}

/// A record type synthesized at runtime, backed by a relational view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    /// Human label, the report name.
    pub name: String,
    /// Type name, e.g. `x_bve.salesbyregion`.
    pub model: String,
    /// Backing relation, e.g. `x_bve_salesbyregion`.
    pub table: String,
    pub fields: Vec<FieldDescriptor>,
}

impl TypeDescriptor {
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }
}
