//! Field selections and the source-field metadata they resolve to.

use serde::{Deserialize, Serialize};

use super::FieldId;

/// Declared type of a field, as the host's metadata records it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Char,
    Text,
    Html,
    Integer,
    Float,
    Monetary,
    Boolean,
    Date,
    Datetime,
    Selection,
    Many2one,
    One2many,
    Many2many,
    Binary,
    Reference,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Char => "char",
            FieldType::Text => "text",
            FieldType::Html => "html",
            FieldType::Integer => "integer",
            FieldType::Float => "float",
            FieldType::Monetary => "monetary",
            FieldType::Boolean => "boolean",
            FieldType::Date => "date",
            FieldType::Datetime => "datetime",
            FieldType::Selection => "selection",
            FieldType::Many2one => "many2one",
            FieldType::One2many => "one2many",
            FieldType::Many2many => "many2many",
            FieldType::Binary => "binary",
            FieldType::Reference => "reference",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Some(match s {
            "char" => FieldType::Char,
            "text" => FieldType::Text,
            "html" => FieldType::Html,
            "integer" => FieldType::Integer,
            "float" => FieldType::Float,
            "monetary" => FieldType::Monetary,
            "boolean" => FieldType::Boolean,
            "date" => FieldType::Date,
            "datetime" => FieldType::Datetime,
            "selection" => FieldType::Selection,
            "many2one" => FieldType::Many2one,
            "one2many" => FieldType::One2many,
            "many2many" => FieldType::Many2many,
            "binary" => FieldType::Binary,
            "reference" => FieldType::Reference,
            _ => return None,
        })
    }

    /// The type a generated virtual type uses for this source type.
    ///
    /// Virtual types have no currency context, so monetary becomes float.
    pub fn for_virtual_type(self) -> Self {
        match self {
            FieldType::Monetary => FieldType::Float,
            other => other,
        }
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a selected field is laid out in pivot and graph presentations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DimensionRole {
    Row,
    Column,
    Measure,
}

impl DimensionRole {
    /// Value of the `type` attribute in presentation arch.
    pub fn arch_type(&self) -> &'static str {
        match self {
            DimensionRole::Row => "row",
            DimensionRole::Column => "col",
            DimensionRole::Measure => "measure",
        }
    }
}

/// One selected field, as submitted by the query builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Identity of the source field in the host's field catalog.
    pub id: FieldId,
    /// Base of the generated `x_<name>` column.
    pub name: String,
    /// Alias of the source table in the generated FROM list.
    pub table_alias: String,
    #[serde(default)]
    pub row: bool,
    #[serde(default)]
    pub column: bool,
    #[serde(default)]
    pub measure: bool,
    #[serde(default)]
    pub custom: bool,
    /// Alias of another selected table whose `id` this field must equal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub join_node: Option<String>,
    /// Label override for the generated field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl FieldSpec {
    /// Column name in the generated view and virtual type.
    pub fn alias(&self) -> String {
        format!("x_{}", self.name)
    }

    /// Target alias when this field only exists to join two tables.
    pub fn join_target(&self) -> Option<&str> {
        self.join_node.as_deref().filter(|j| !j.is_empty())
    }

    pub fn is_join(&self) -> bool {
        self.join_target().is_some()
    }

    /// Presentation role; row wins over column, column over measure.
    pub fn role(&self) -> Option<DimensionRole> {
        if self.row {
            Some(DimensionRole::Row)
        } else if self.column {
            Some(DimensionRole::Column)
        } else if self.measure {
            Some(DimensionRole::Measure)
        } else {
            None
        }
    }
}

/// Metadata of a field on a source model, as the field catalog reports it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceField {
    pub id: FieldId,
    /// Owning model, e.g. `sale.order`.
    pub model: String,
    /// Physical table of the owning model, e.g. `sale_order`.
    pub table: String,
    /// Column name.
    pub name: String,
    pub complete_name: Option<String>,
    pub field_description: String,
    pub ttype: FieldType,
    pub relation: Option<String>,
    /// Enumeration as JSON `[[value, label], ...]`, if declared on the field.
    pub selection: Option<String>,
    pub size: Option<i64>,
}
