//! # rentdesk-db
//!
//! libSQL persistence for rentdesk: users, properties and units, maintenance
//! requests, and the audit trail.
//!
//! `RentDb` owns the database and its single connection. `RentService` wraps
//! it and hosts every repository method in `impl RentService` blocks under
//! [`repos`]; lifecycle decisions come from `rentdesk_core::lifecycle` and
//! this crate only loads, persists, and audits.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod seed;
pub mod service;
pub mod updates;

mod test_support;

use error::DatabaseError;
use libsql::Builder;

/// Database handle for all rentdesk state.
pub struct RentDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl RentDb {
    /// Open a local database at `path` (`":memory:"` for an ephemeral one).
    ///
    /// Runs migrations on every open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Per-connection in SQLite.
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let rent_db = Self { db, conn };
        rent_db.run_migrations().await?;
        Ok(rent_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }
}
