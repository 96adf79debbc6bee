//! Presentation records: views and window actions.

use serde::{Deserialize, Serialize};

use super::UiViewId;

/// Presentation views generated for a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewKind {
    Pivot,
    Graph,
    Tree,
}

impl ViewKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewKind::Pivot => "pivot",
            ViewKind::Graph => "graph",
            ViewKind::Tree => "tree",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pivot" => Some(ViewKind::Pivot),
            "graph" => Some(ViewKind::Graph),
            "tree" => Some(ViewKind::Tree),
            _ => None,
        }
    }
}

/// A presentation view bound to a model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiView {
    pub name: String,
    pub kind: ViewKind,
    pub model: String,
    pub priority: i64,
    pub arch: String,
}

/// A window action opening a model in one or more view modes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowAction {
    pub name: String,
    pub res_model: String,
    pub view_mode: String,
    /// Default view the action opens with.
    pub view_id: Option<UiViewId>,
    pub context: Option<String>,
}

/// Client-side instruction to open a model, with no stored counterpart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionDescriptor {
    #[serde(rename = "type")]
    pub action_type: String,
    pub res_model: String,
    pub view_type: String,
    pub view_mode: String,
}
