//! Explicit session passed to every operation.

use tracing::warn;

use crate::model::UserId;
use crate::platform::{Host, PlatformError};
use crate::registry::SchemaRegistry;

/// The active connection, the process-local registry and the acting user.
pub struct Env<'a, H: Host> {
    pub host: &'a mut H,
    pub registry: &'a mut SchemaRegistry,
    pub user: UserId,
}

impl<'a, H: Host> Env<'a, H> {
    pub fn new(host: &'a mut H, registry: &'a mut SchemaRegistry, user: UserId) -> Self {
        Self {
            host,
            registry,
            user,
        }
    }

    /// Run `f` inside a transaction; commit on success, roll back on error.
    pub fn transaction<T, E>(&mut self, f: impl FnOnce(&mut Self) -> Result<T, E>) -> Result<T, E>
    where
        E: From<PlatformError>,
    {
        self.host.begin()?;
        match f(self) {
            Ok(value) => {
                self.host.commit()?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback) = self.host.rollback() {
                    warn!(error = %rollback, "rollback failed");
                }
                Err(err)
            }
        }
    }
}
