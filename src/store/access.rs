//! Grants, users and groups.

use std::collections::BTreeSet;

use rusqlite::{params, OptionalExtension};

use super::SqliteStore;
use crate::model::{AccessId, AccessMode, AccessRule, CompanyId, GroupId, TypeId, UserId};
use crate::platform::{AccessStore, Directory, PlatformResult};

impl AccessStore for SqliteStore {
    fn groups_with_access(&self, model: &str, mode: AccessMode) -> PlatformResult<BTreeSet<GroupId>> {
        let sql = format!(
            "SELECT a.group_id FROM ir_model_access a \
             JOIN ir_model m ON m.id = a.model_id \
             WHERE m.model = ? AND a.active = 1 AND a.group_id IS NOT NULL AND a.{} = 1",
            mode.column()
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let groups = stmt
            .query_map(params![model], |row| row.get(0))?
            .collect::<Result<BTreeSet<GroupId>, _>>()?;
        Ok(groups)
    }

    fn create_access(&mut self, rule: &AccessRule) -> PlatformResult<AccessId> {
        self.conn.execute(
            "INSERT INTO ir_model_access \
             (name, model_id, group_id, perm_read, perm_write, perm_create, perm_unlink) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
            params![
                rule.name,
                rule.model_id,
                rule.group_id,
                rule.perm_read,
                rule.perm_write,
                rule.perm_create,
                rule.perm_unlink
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn access_rules(&self, model_id: TypeId) -> PlatformResult<Vec<AccessRule>> {
        let mut stmt = self.conn.prepare(
            "SELECT name, model_id, group_id, perm_read, perm_write, perm_create, perm_unlink \
             FROM ir_model_access WHERE model_id = ? AND group_id IS NOT NULL ORDER BY id",
        )?;
        let rules = stmt
            .query_map(params![model_id], |row| {
                Ok(AccessRule {
                    name: row.get(0)?,
                    model_id: row.get(1)?,
                    group_id: row.get(2)?,
                    perm_read: row.get(3)?,
                    perm_write: row.get(4)?,
                    perm_create: row.get(5)?,
                    perm_unlink: row.get(6)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rules)
    }
}

impl Directory for SqliteStore {
    fn group_members(&self, groups: &BTreeSet<GroupId>) -> PlatformResult<BTreeSet<UserId>> {
        let mut stmt = self
            .conn
            .prepare("SELECT uid FROM res_groups_users_rel WHERE gid = ?")?;
        let mut users = BTreeSet::new();
        for group in groups {
            for user in stmt.query_map(params![group], |row| row.get(0))? {
                users.insert(user?);
            }
        }
        Ok(users)
    }

    fn all_users(&self) -> PlatformResult<BTreeSet<UserId>> {
        let mut stmt = self.conn.prepare("SELECT id FROM res_users")?;
        let users = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<BTreeSet<UserId>, _>>()?;
        Ok(users)
    }

    fn user_company(&self, user: UserId) -> PlatformResult<Option<CompanyId>> {
        let company: Option<Option<CompanyId>> = self
            .conn
            .query_row(
                "SELECT company_id FROM res_users WHERE id = ?",
                params![user],
                |row| row.get(0),
            )
            .optional()?;
        Ok(company.flatten())
    }
}

// ============================================================================
// Directory administration
// ============================================================================

impl SqliteStore {
    pub fn create_user(&mut self, login: &str, company_id: Option<CompanyId>) -> PlatformResult<UserId> {
        self.conn.execute(
            "INSERT INTO res_users (login, company_id) VALUES (?, ?)",
            params![login, company_id],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn create_group(&mut self, name: &str) -> PlatformResult<GroupId> {
        self.conn
            .execute("INSERT INTO res_groups (name) VALUES (?)", params![name])?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn add_user_to_group(&mut self, group: GroupId, user: UserId) -> PlatformResult<()> {
        self.conn.execute(
            "INSERT OR IGNORE INTO res_groups_users_rel (gid, uid) VALUES (?, ?)",
            params![group, user],
        )?;
        Ok(())
    }

    /// Disable or re-enable every grant of a model.
    pub fn set_access_active(&mut self, model_id: TypeId, active: bool) -> PlatformResult<()> {
        self.conn.execute(
            "UPDATE ir_model_access SET active = ? WHERE model_id = ?",
            params![active, model_id],
        )?;
        Ok(())
    }
}
