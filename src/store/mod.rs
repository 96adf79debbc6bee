//! SQLite host store.
//!
//! [`SqliteStore`] implements every [`crate::platform`] trait over a single
//! `rusqlite` connection. Source models, the generated types, presentation
//! records, grants, report definitions and holiday calendars all live in
//! one database, stored at `~/.bve/store.db` unless configured otherwise.
//!
//! Generated views are created in the same database, so a report's
//! backing view can read the source tables directly.

mod access;
mod catalog;
mod holidays;
mod records;
mod schema;
mod ui;

use std::path::{Path, PathBuf};

use rusqlite::types::ValueRef;
use rusqlite::{params, Connection, ErrorCode, OptionalExtension};
use serde_json::{Map, Value};
use tracing::debug;

use crate::platform::{PlatformError, PlatformResult, RegistrySignal, SqlExecutor};
use crate::sql::Dialect;

use schema::{SCHEMA, SCHEMA_VERSION};

/// Errors that can occur while opening the store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to determine home directory")]
    NoHomeDir,

    #[error("Store schema version {found} is not supported (expected {expected})")]
    SchemaVersion { found: i32, expected: i32 },
}

pub type StoreResult<T> = Result<T, StoreError>;

impl From<rusqlite::Error> for PlatformError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(e, msg) if e.code == ErrorCode::ConstraintViolation => {
                PlatformError::Constraint(msg.clone().unwrap_or_else(|| e.to_string()))
            }
            _ => PlatformError::Sql(err.to_string()),
        }
    }
}

/// A host platform backed by one SQLite database.
pub struct SqliteStore {
    conn: Connection,
    store_id: String,
}

impl SqliteStore {
    /// Open or create the store at `path`.
    ///
    /// `":memory:"` opens a private in-memory store.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        if path.as_os_str() == ":memory:" {
            return Self::open_in_memory();
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        let store = Self {
            conn,
            store_id: path.display().to_string(),
        };
        store.init()?;
        Ok(store)
    }

    /// Open the store at its default location.
    pub fn open_default() -> StoreResult<Self> {
        Self::open(Self::default_path()?)
    }

    /// Open an in-memory store (for testing).
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn,
            store_id: ":memory:".to_string(),
        };
        store.init()?;
        Ok(store)
    }

    /// `~/.bve/store.db`.
    pub fn default_path() -> StoreResult<PathBuf> {
        let base = dirs::home_dir().ok_or(StoreError::NoHomeDir)?;
        Ok(base.join(".bve").join("store.db"))
    }

    /// Create tables if needed and check the schema version.
    fn init(&self) -> StoreResult<()> {
        self.conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        self.conn.execute_batch(SCHEMA)?;

        let stored_version: Option<i32> = self
            .conn
            .query_row("SELECT value FROM meta WHERE key = 'version'", [], |row| {
                let s: String = row.get(0)?;
                Ok(s.parse().unwrap_or(0))
            })
            .optional()?;

        match stored_version {
            Some(v) if v == SCHEMA_VERSION => Ok(()),
            Some(found) => Err(StoreError::SchemaVersion {
                found,
                expected: SCHEMA_VERSION,
            }),
            None => {
                self.conn.execute(
                    "INSERT INTO meta (key, value) VALUES ('version', ?)",
                    params![SCHEMA_VERSION.to_string()],
                )?;
                Ok(())
            }
        }
    }

    /// The underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

fn value_to_json(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(n) => Value::from(n),
        ValueRef::Real(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
            Value::String(String::from_utf8_lossy(bytes).into_owned())
        }
    }
}

impl SqlExecutor for SqliteStore {
    fn dialect(&self) -> Dialect {
        Dialect::Sqlite
    }

    fn store_id(&self) -> &str {
        &self.store_id
    }

    fn execute(&mut self, sql: &str) -> PlatformResult<()> {
        self.conn.execute_batch(sql)?;
        Ok(())
    }

    fn query_rows(&mut self, sql: &str) -> PlatformResult<Vec<Map<String, Value>>> {
        let mut stmt = self.conn.prepare(sql)?;
        let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();

        let mut rows = stmt.query([])?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            let mut record = Map::new();
            for (i, column) in columns.iter().enumerate() {
                record.insert(column.clone(), value_to_json(row.get_ref(i)?));
            }
            out.push(record);
        }
        Ok(out)
    }

    fn begin(&mut self) -> PlatformResult<()> {
        if self.conn.is_autocommit() {
            self.conn.execute_batch("BEGIN")?;
        }
        Ok(())
    }

    fn commit(&mut self) -> PlatformResult<()> {
        if !self.conn.is_autocommit() {
            self.conn.execute_batch("COMMIT")?;
        }
        Ok(())
    }

    fn rollback(&mut self) -> PlatformResult<()> {
        if !self.conn.is_autocommit() {
            self.conn.execute_batch("ROLLBACK")?;
        }
        Ok(())
    }
}

impl RegistrySignal for SqliteStore {
    fn signal_change(&mut self, store_id: &str) -> PlatformResult<u64> {
        self.conn.execute(
            "UPDATE registry_signal SET sequence = sequence + 1, store_id = ? WHERE id = 1",
            params![store_id],
        )?;
        let sequence = self.signal_sequence()?;
        debug!(sequence, store = %store_id, "registry change signalled");
        Ok(sequence)
    }

    fn signal_sequence(&self) -> PlatformResult<u64> {
        let sequence: i64 = self.conn.query_row(
            "SELECT sequence FROM registry_signal WHERE id = 1",
            [],
            |row| row.get(0),
        )?;
        Ok(sequence as u64)
    }
}

/// Build a `PlatformError::NotFound` when an UPDATE or DELETE touched nothing.
pub(crate) fn expect_row(changed: usize, kind: &'static str, id: i64) -> PlatformResult<()> {
    if changed == 0 {
        Err(PlatformError::NotFound { kind, id })
    } else {
        Ok(())
    }
}
