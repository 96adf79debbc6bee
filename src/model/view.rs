//! The report definition record.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{ActionId, BveViewId, GroupId, UiViewId, UserId};

/// Namespace every generated virtual type lives under.
pub const MODEL_NAMESPACE: &str = "x_bve";

/// Lifecycle state of a report definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewState {
    /// Editable; generated artifacts are not guaranteed to exist.
    #[default]
    Draft,
    /// Backing view, virtual type, presentation and grants exist.
    Created,
}

impl ViewState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewState::Draft => "draft",
            ViewState::Created => "created",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(ViewState::Draft),
            "created" => Some(ViewState::Created),
            _ => None,
        }
    }
}

impl std::fmt::Display for ViewState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user-designed BI view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BveView {
    pub id: BveViewId,
    /// Unique, human-chosen name.
    pub name: String,
    /// Derived from `name`; see [`model_name_for`].
    pub model_name: String,
    pub note: Option<String>,
    pub state: ViewState,
    /// Serialized field selection, possibly in legacy single-quoted form.
    pub data: Option<String>,
    pub action_id: Option<ActionId>,
    pub view_id: Option<UiViewId>,
    /// Groups granted read-write access. Empty means public.
    pub group_ids: BTreeSet<GroupId>,
    /// Users able to see the report, recomputed whenever `group_ids` changes.
    pub user_ids: BTreeSet<UserId>,
}

impl BveView {
    /// Name of the backing relational view.
    pub fn table_name(&self) -> String {
        view_table_name(&self.model_name)
    }

    pub fn is_created(&self) -> bool {
        self.state == ViewState::Created
    }
}

/// Derive the virtual type name for a report name.
///
/// Lowercases, keeps alphanumerics only, maps `_` and spaces to `.`, and
/// prefixes [`MODEL_NAMESPACE`]. The separators are filtered out before the
/// mapping runs, so in practice the slug is the alphanumeric run of the name.
pub fn model_name_for(name: &str) -> String {
    let slug: String = name
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect();
    let slug = slug.replace('_', ".").replace(' ', ".");
    format!("{}.{}", MODEL_NAMESPACE, slug)
}

/// Name of the relational view backing a virtual type.
pub fn view_table_name(model_name: &str) -> String {
    model_name.replace('.', "_")
}
