//! Service layer orchestrating lifecycle checks, persistence, and audit.
//!
//! `RentService` wraps `RentDb` and the submission rules from configuration.
//! All repo methods are implemented as `impl RentService` blocks in
//! [`crate::repos`].

use rentdesk_core::lifecycle::SubmissionRules;
use tokio::sync::{Mutex, MutexGuard};

use crate::RentDb;
use crate::error::DatabaseError;

/// Orchestrates maintenance-request mutations with an audit trail.
///
/// Every mutation method follows this protocol:
/// 1. Load the current row (`NotFound` if missing)
/// 2. Plan the change with `rentdesk_core::lifecycle` (no writes on rejection)
/// 3. Execute a single INSERT/UPDATE and append an audit entry, both in one
///    transaction
pub struct RentService {
    db: RentDb,
    rules: SubmissionRules,
    write_lock: Mutex<()>,
}

impl RentService {
    /// Open a local database and wrap it.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(db_path: &str, rules: SubmissionRules) -> Result<Self, DatabaseError> {
        let db = RentDb::open_local(db_path).await?;
        Ok(Self::from_db(db, rules))
    }

    /// Create from an existing `RentDb`.
    #[must_use]
    pub fn from_db(db: RentDb, rules: SubmissionRules) -> Self {
        Self {
            db,
            rules,
            write_lock: Mutex::new(()),
        }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &RentDb {
        &self.db
    }

    #[must_use]
    pub const fn rules(&self) -> &SubmissionRules {
        &self.rules
    }

    /// Start a write transaction on the shared connection.
    ///
    /// Writers are serialized so one caller's statements never land inside
    /// another caller's transaction.
    pub(crate) async fn begin_write(&self) -> Result<WriteTx<'_>, DatabaseError> {
        let guard = self.write_lock.lock().await;
        let tx = self.db.conn().transaction().await?;
        Ok(WriteTx { _guard: guard, tx })
    }
}

/// An open transaction held under the service's write lock.
pub(crate) struct WriteTx<'a> {
    _guard: MutexGuard<'a, ()>,
    tx: libsql::Transaction,
}

impl WriteTx<'_> {
    pub(crate) fn conn(&self) -> &libsql::Connection {
        &self.tx
    }

    /// Commit if `result` is `Ok`, roll back otherwise.
    pub(crate) async fn finish<T>(
        self,
        result: Result<T, DatabaseError>,
    ) -> Result<T, DatabaseError> {
        match result {
            Ok(value) => {
                self.tx.commit().await?;
                Ok(value)
            }
            Err(error) => {
                if let Err(rollback) = self.tx.rollback().await {
                    tracing::error!(%rollback, %error, "rollback failed");
                }
                Err(error)
            }
        }
    }
}
