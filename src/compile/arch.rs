//! Presentation arch fragments.

use crate::fields::ResolvedSelection;
use crate::model::{DimensionRole, ViewKind};

/// A field listed in a presentation fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchField {
    pub name: String,
    pub role: DimensionRole,
}

impl ArchField {
    fn render(&self) -> String {
        format!(
            r#"<field name="{}" type="{}" />"#,
            self.name,
            self.role.arch_type()
        )
    }
}

/// Dimension-tagged fields of a selection, in selection order.
///
/// Join fields and fields without a role are left out.
pub fn arch_fields(selection: &ResolvedSelection) -> Vec<ArchField> {
    selection
        .selected()
        .filter_map(|field| {
            field.role().map(|role| ArchField {
                name: field.alias(),
                role,
            })
        })
        .collect()
}

/// Render the arch of one presentation view.
pub fn render_arch(kind: ViewKind, fields: &[ArchField]) -> String {
    let body: String = fields.iter().map(ArchField::render).collect();
    let open = match kind {
        ViewKind::Pivot => r#"<pivot string="Pivot Analysis">"#,
        ViewKind::Graph => r#"<graph string="Graph Analysis" type="bar" stacked="True">"#,
        ViewKind::Tree => r#"<tree string="List Analysis" create="false">"#,
    };
    format!(
        "<?xml version=\"1.0\"?>\n{open}{body}</{}>",
        kind.as_str()
    )
}
