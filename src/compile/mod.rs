//! View-Definition Compiler.
//!
//! Turns a [`ResolvedSelection`](crate::fields::ResolvedSelection) into the
//! backing view statements and the pivot/graph/tree arch fragments bound to
//! the generated type.

mod arch;
mod view_sql;

pub use arch::{arch_fields, render_arch, ArchField};
pub use view_sql::{drop_view, ViewDefinition, BOOKKEEPING_COLUMNS};
