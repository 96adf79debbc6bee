//! Presentation views and window actions.

use rusqlite::{params, OptionalExtension};

use super::SqliteStore;
use crate::model::{ActionId, UiView, UiViewId, ViewKind, WindowAction};
use crate::platform::{PlatformError, PlatformResult, UiStore};

impl UiStore for SqliteStore {
    fn create_ui_view(&mut self, view: &UiView) -> PlatformResult<UiViewId> {
        self.conn.execute(
            "INSERT INTO ir_ui_view (name, type, model, priority, arch) VALUES (?, ?, ?, ?, ?)",
            params![view.name, view.kind.as_str(), view.model, view.priority, view.arch],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn ui_view(&self, id: UiViewId) -> PlatformResult<Option<UiView>> {
        let row = self
            .conn
            .query_row(
                "SELECT name, type, model, priority, arch FROM ir_ui_view WHERE id = ?",
                params![id],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, i64>(3)?,
                        row.get::<_, String>(4)?,
                    ))
                },
            )
            .optional()?;

        row.map(|(name, kind, model, priority, arch)| -> PlatformResult<UiView> {
            let kind = ViewKind::parse(&kind).ok_or(PlatformError::Corrupt {
                what: "view type",
                value: kind,
            })?;
            Ok(UiView {
                name,
                kind,
                model,
                priority,
                arch,
            })
        })
        .transpose()
    }

    fn find_ui_views(&self, model: &str) -> PlatformResult<Vec<UiViewId>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id FROM ir_ui_view WHERE model = ? ORDER BY id")?;
        let ids = stmt
            .query_map(params![model], |row| row.get(0))?
            .collect::<Result<Vec<UiViewId>, _>>()?;
        Ok(ids)
    }

    fn delete_ui_view(&mut self, id: UiViewId) -> PlatformResult<()> {
        self.conn
            .execute("DELETE FROM ir_ui_view WHERE id = ?", params![id])?;
        Ok(())
    }

    fn create_action(&mut self, action: &WindowAction) -> PlatformResult<ActionId> {
        self.conn.execute(
            "INSERT INTO ir_act_window (name, res_model, view_mode, view_id, context) \
             VALUES (?, ?, ?, ?, ?)",
            params![
                action.name,
                action.res_model,
                action.view_mode,
                action.view_id,
                action.context
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn action(&self, id: ActionId) -> PlatformResult<Option<WindowAction>> {
        Ok(self
            .conn
            .query_row(
                "SELECT name, res_model, view_mode, view_id, context FROM ir_act_window WHERE id = ?",
                params![id],
                |row| {
                    Ok(WindowAction {
                        name: row.get(0)?,
                        res_model: row.get(1)?,
                        view_mode: row.get(2)?,
                        view_id: row.get(3)?,
                        context: row.get(4)?,
                    })
                },
            )
            .optional()?)
    }

    fn delete_action(&mut self, id: ActionId) -> PlatformResult<()> {
        self.conn
            .execute("DELETE FROM ir_act_window WHERE id = ?", params![id])?;
        Ok(())
    }
}
