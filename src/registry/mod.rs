//! In-process registry of runtime-created record types.
//!
//! Each process keeps its own [`SchemaRegistry`]. The store holds the
//! persisted descriptors and a change sequence; a process that registers a
//! type bumps the sequence, and every other process sharing the store
//! reloads when [`SchemaRegistry::check_signaling`] sees it advance.
//!
//! # Example
//!
//! ```ignore
//! let mut registry = SchemaRegistry::new();
//! registry.boot(&store)?;
//!
//! // Later, before serving a request:
//! if registry.check_signaling(&store)? {
//!     tracing::info!("registry reloaded");
//! }
//! ```

mod fingerprint;

pub use fingerprint::fingerprint;

use std::collections::BTreeMap;

use tracing::debug;

use crate::model::TypeDescriptor;
use crate::platform::{PlatformError, RegistrySignal, SqlExecutor, TypeStore};
use crate::sql::{table_col, Query, SelectExpr, TableRef};

/// Errors raised by the schema registry.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Model '{0}' is not registered")]
    UnknownModel(String),

    #[error("Failed to fingerprint model '{model}': {source}")]
    Fingerprint {
        model: String,
        source: serde_json::Error,
    },

    #[error(transparent)]
    Platform(#[from] PlatformError),
}

pub type RegistryResult<T> = Result<T, RegistryError>;

/// Reference to a registered type at the version it was registered with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeHandle {
    pub model: String,
    pub version: u64,
}

/// A type known to the registry.
#[derive(Debug, Clone, PartialEq)]
pub struct RegisteredType {
    pub descriptor: TypeDescriptor,
    pub fingerprint: String,
    /// Registry version at which this content was first seen.
    pub version: u64,
}

impl RegisteredType {
    pub fn handle(&self) -> TypeHandle {
        TypeHandle {
            model: self.descriptor.model.clone(),
            version: self.version,
        }
    }
}

/// What a reload changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReloadReport {
    pub added: Vec<String>,
    pub changed: Vec<String>,
    pub removed: Vec<String>,
}

impl ReloadReport {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.changed.is_empty() && self.removed.is_empty()
    }
}

/// Versioned registry of runtime types.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    types: BTreeMap<String, RegisteredType>,
    version: u64,
    ready: bool,
    /// Store signal sequence this registry was last loaded at.
    sequence: u64,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether [`boot`](Self::boot) has completed.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Add or replace one type.
    ///
    /// Re-registering identical content keeps the existing handle.
    pub fn register(&mut self, descriptor: TypeDescriptor) -> RegistryResult<TypeHandle> {
        let digest = fingerprint(&descriptor).map_err(|source| RegistryError::Fingerprint {
            model: descriptor.model.clone(),
            source,
        })?;

        if let Some(existing) = self.types.get(&descriptor.model) {
            if existing.fingerprint == digest {
                return Ok(existing.handle());
            }
        }

        self.version += 1;
        let registered = RegisteredType {
            descriptor,
            fingerprint: digest,
            version: self.version,
        };
        let handle = registered.handle();
        self.types.insert(handle.model.clone(), registered);
        Ok(handle)
    }

    /// Install a set of types.
    ///
    /// A full setup (`partial == false`) also drops every registered type
    /// missing from `types`; a partial one only adds and updates.
    pub fn setup_models(
        &mut self,
        types: Vec<TypeDescriptor>,
        partial: bool,
    ) -> RegistryResult<ReloadReport> {
        let mut report = ReloadReport::default();

        if !partial {
            let keep: Vec<&str> = types.iter().map(|t| t.model.as_str()).collect();
            let stale: Vec<String> = self
                .types
                .keys()
                .filter(|model| !keep.contains(&model.as_str()))
                .cloned()
                .collect();
            for model in stale {
                self.types.remove(&model);
                report.removed.push(model);
            }
        }

        for descriptor in types {
            let model = descriptor.model.clone();
            let before = self.types.get(&model).map(|t| t.version);
            let handle = self.register(descriptor)?;
            match before {
                None => report.added.push(model),
                Some(version) if version != handle.version => report.changed.push(model),
                Some(_) => {}
            }
        }

        if !report.removed.is_empty() {
            self.version += 1;
        }

        debug!(
            partial,
            added = report.added.len(),
            changed = report.changed.len(),
            removed = report.removed.len(),
            "registry setup"
        );
        Ok(report)
    }

    /// Load every persisted type and mark the registry ready.
    pub fn boot<S>(&mut self, store: &S) -> RegistryResult<ReloadReport>
    where
        S: TypeStore + RegistrySignal,
    {
        let sequence = store.signal_sequence()?;
        let report = self.setup_models(store.load_types()?, false)?;
        self.sequence = sequence;
        self.ready = true;
        Ok(report)
    }

    /// Reload from the store when another process signalled a change.
    ///
    /// Returns `true` when a reload happened.
    pub fn check_signaling<S>(&mut self, store: &S) -> RegistryResult<bool>
    where
        S: TypeStore + RegistrySignal,
    {
        let sequence = store.signal_sequence()?;
        if sequence == self.sequence {
            return Ok(false);
        }

        debug!(from = self.sequence, to = sequence, "registry change signalled");
        self.setup_models(store.load_types()?, false)?;
        self.sequence = sequence;
        Ok(true)
    }

    /// Record that the store sequence moved because of this process.
    pub fn acknowledge(&mut self, sequence: u64) {
        self.sequence = sequence;
    }

    pub fn get(&self, model: &str) -> Option<&RegisteredType> {
        self.types.get(model)
    }

    pub fn handle(&self, model: &str) -> Option<TypeHandle> {
        self.get(model).map(RegisteredType::handle)
    }

    pub fn contains(&self, model: &str) -> bool {
        self.types.contains_key(model)
    }

    /// Drop a type. Returns whether it was registered.
    pub fn forget(&mut self, model: &str) -> bool {
        let removed = self.types.remove(model).is_some();
        if removed {
            self.version += 1;
        }
        removed
    }

    pub fn models(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    /// Query that reads every record of a registered type.
    pub fn select_query(&self, model: &str) -> RegistryResult<Query> {
        let registered = self
            .get(model)
            .ok_or_else(|| RegistryError::UnknownModel(model.to_string()))?;
        let descriptor = &registered.descriptor;

        let mut query = Query::new()
            .column(SelectExpr::new(table_col("v", "id")))
            .from(TableRef::new(&descriptor.table).with_alias("v"));
        for name in descriptor.field_names() {
            query = query.column(SelectExpr::new(table_col("v", name)));
        }
        Ok(query)
    }

    /// Read every record of a registered type through its backing view.
    pub fn read_records<E: SqlExecutor + ?Sized>(
        &self,
        executor: &mut E,
        model: &str,
    ) -> RegistryResult<Vec<serde_json::Map<String, serde_json::Value>>> {
        let sql = self.select_query(model)?.to_sql(executor.dialect());
        debug!(%model, %sql, "reading records");
        Ok(executor.query_rows(&sql)?)
    }
}
