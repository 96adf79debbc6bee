//! Report definition rows.

use std::collections::BTreeSet;

use rusqlite::{params, OptionalExtension, Row};

use super::SqliteStore;
use crate::model::{BveView, BveViewId, GroupId, UserId, ViewState};
use crate::platform::{PlatformError, PlatformResult, ViewRecords};

const COLUMNS: &str = "id, name, model_name, note, state, data, action_id, view_id";

fn read_view(row: &Row<'_>) -> rusqlite::Result<(BveView, String)> {
    let view = BveView {
        id: row.get(0)?,
        name: row.get(1)?,
        model_name: row.get(2)?,
        note: row.get(3)?,
        state: ViewState::Draft,
        data: row.get(5)?,
        action_id: row.get(6)?,
        view_id: row.get(7)?,
        group_ids: BTreeSet::new(),
        user_ids: BTreeSet::new(),
    };
    Ok((view, row.get(4)?))
}

impl SqliteStore {
    fn load_view(&self, (mut view, state): (BveView, String)) -> PlatformResult<BveView> {
        view.state = ViewState::parse(&state).ok_or(PlatformError::Corrupt {
            what: "view state",
            value: state,
        })?;
        view.group_ids = self.related_ids("bve_view_group_rel", "group_id", view.id)?;
        view.user_ids = self.related_ids("bve_view_user_rel", "user_id", view.id)?;
        Ok(view)
    }

    fn related_ids(&self, table: &str, column: &str, view_id: BveViewId) -> PlatformResult<BTreeSet<i64>> {
        let sql = format!("SELECT {column} FROM {table} WHERE view_id = ?");
        let mut stmt = self.conn.prepare(&sql)?;
        let ids = stmt
            .query_map(params![view_id], |row| row.get(0))?
            .collect::<Result<BTreeSet<i64>, _>>()?;
        Ok(ids)
    }

    fn write_relations(
        &self,
        view_id: BveViewId,
        groups: &BTreeSet<GroupId>,
        users: &BTreeSet<UserId>,
    ) -> PlatformResult<()> {
        self.conn
            .execute("DELETE FROM bve_view_group_rel WHERE view_id = ?", params![view_id])?;
        self.conn
            .execute("DELETE FROM bve_view_user_rel WHERE view_id = ?", params![view_id])?;

        let mut stmt = self
            .conn
            .prepare("INSERT INTO bve_view_group_rel (view_id, group_id) VALUES (?, ?)")?;
        for group in groups {
            stmt.execute(params![view_id, group])?;
        }
        let mut stmt = self
            .conn
            .prepare("INSERT INTO bve_view_user_rel (view_id, user_id) VALUES (?, ?)")?;
        for user in users {
            stmt.execute(params![view_id, user])?;
        }
        Ok(())
    }

    fn query_view(&self, filter: &str, value: &dyn rusqlite::ToSql) -> PlatformResult<Option<BveView>> {
        let sql = format!("SELECT {COLUMNS} FROM bve_view WHERE {filter} = ?");
        let row = self
            .conn
            .query_row(&sql, [value], read_view)
            .optional()?;
        row.map(|r| self.load_view(r)).transpose()
    }
}

impl ViewRecords for SqliteStore {
    fn insert_bve(&mut self, view: &BveView) -> PlatformResult<BveViewId> {
        self.conn.execute(
            "INSERT INTO bve_view (name, model_name, note, state, data, action_id, view_id) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
            params![
                view.name,
                view.model_name,
                view.note,
                view.state.as_str(),
                view.data,
                view.action_id,
                view.view_id
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        self.write_relations(id, &view.group_ids, &view.user_ids)?;
        Ok(id)
    }

    fn get_bve(&self, id: BveViewId) -> PlatformResult<Option<BveView>> {
        self.query_view("id", &id)
    }

    fn find_bve_by_name(&self, name: &str) -> PlatformResult<Option<BveView>> {
        self.query_view("name", &name)
    }

    fn update_bve(&mut self, view: &BveView) -> PlatformResult<()> {
        let changed = self.conn.execute(
            "UPDATE bve_view SET name = ?, model_name = ?, note = ?, state = ?, data = ?, \
             action_id = ?, view_id = ? WHERE id = ?",
            params![
                view.name,
                view.model_name,
                view.note,
                view.state.as_str(),
                view.data,
                view.action_id,
                view.view_id,
                view.id
            ],
        )?;
        super::expect_row(changed, "BI view", view.id)?;
        self.write_relations(view.id, &view.group_ids, &view.user_ids)
    }

    fn delete_bve(&mut self, id: BveViewId) -> PlatformResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM bve_view WHERE id = ?", params![id])?;
        super::expect_row(changed, "BI view", id)
    }

    fn list_bve(&self) -> PlatformResult<Vec<BveView>> {
        let sql = format!("SELECT {COLUMNS} FROM bve_view ORDER BY id");
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map([], read_view)?
            .collect::<Result<Vec<_>, _>>()?;
        rows.into_iter().map(|r| self.load_view(r)).collect()
    }
}
