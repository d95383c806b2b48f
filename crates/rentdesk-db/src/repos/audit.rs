//! Audit trail repository.
//!
//! Append-only entries recording every mutation of a maintenance request.

use chrono::{DateTime, Utc};

use rentdesk_core::entities::AuditEntry;
use rentdesk_core::enums::{AuditAction, EntityType};
use rentdesk_core::identity::Actor;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, parse_datetime, parse_enum, parse_optional_json, to_sql_timestamp};
use crate::service::RentService;

/// An audit entry before it has been assigned an id.
#[derive(Debug, Clone)]
pub struct NewAuditEntry {
    pub actor: Actor,
    pub entity_type: EntityType,
    pub entity_id: i64,
    pub action: AuditAction,
    pub detail: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

/// Filter criteria for audit queries.
#[derive(Debug, Default)]
pub struct AuditFilter {
    pub entity_type: Option<EntityType>,
    pub entity_id: Option<i64>,
    pub action: Option<AuditAction>,
    pub actor_id: Option<i64>,
    pub limit: Option<u32>,
}

const SELECT_COLS: &str =
    "id, actor_id, actor_role, entity_type, entity_id, action, detail, created_at";

fn row_to_entry(row: &libsql::Row) -> Result<AuditEntry, DatabaseError> {
    Ok(AuditEntry {
        id: row.get(0)?,
        actor_id: row.get(1)?,
        actor_role: parse_enum(&row.get::<String>(2)?)?,
        entity_type: parse_enum(&row.get::<String>(3)?)?,
        entity_id: row.get(4)?,
        action: parse_enum(&row.get::<String>(5)?)?,
        detail: parse_optional_json(get_opt_string(row, 6)?.as_deref())?,
        created_at: parse_datetime(&row.get::<String>(7)?)?,
    })
}

/// Insert `entry` on `conn`, which may be an open transaction.
pub(crate) async fn insert_audit(
    conn: &libsql::Connection,
    entry: NewAuditEntry,
) -> Result<AuditEntry, DatabaseError> {
    let detail = entry.detail.as_ref().map(ToString::to_string);
    let mut rows = conn
        .query(
            "INSERT INTO audit_trail (actor_id, actor_role, entity_type, entity_id, action, detail, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7) RETURNING id",
            libsql::params![
                entry.actor.user_id,
                entry.actor.role.as_str(),
                entry.entity_type.as_str(),
                entry.entity_id,
                entry.action.as_str(),
                detail.as_deref(),
                to_sql_timestamp(&entry.created_at)
            ],
        )
        .await?;
    let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;

    Ok(AuditEntry {
        id: row.get(0)?,
        actor_id: entry.actor.user_id,
        actor_role: entry.actor.role,
        entity_type: entry.entity_type,
        entity_id: entry.entity_id,
        action: entry.action,
        detail: entry.detail,
        created_at: entry.created_at,
    })
}

impl RentService {
    /// Append a standalone audit entry. Mutation methods write theirs inside
    /// the same transaction as the row change instead.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the INSERT fails.
    pub async fn append_audit(&self, entry: NewAuditEntry) -> Result<AuditEntry, DatabaseError> {
        let tx = self.begin_write().await?;
        let result = insert_audit(tx.conn(), entry).await;
        tx.finish(result).await
    }

    /// Query audit entries with optional filters, newest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn query_audit(&self, filter: &AuditFilter) -> Result<Vec<AuditEntry>, DatabaseError> {
        let mut conditions = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        if let Some(et) = filter.entity_type {
            params.push(et.as_str().into());
            conditions.push(format!("entity_type = ?{}", params.len()));
        }
        if let Some(eid) = filter.entity_id {
            params.push(eid.into());
            conditions.push(format!("entity_id = ?{}", params.len()));
        }
        if let Some(action) = filter.action {
            params.push(action.as_str().into());
            conditions.push(format!("action = ?{}", params.len()));
        }
        if let Some(actor_id) = filter.actor_id {
            params.push(actor_id.into());
            conditions.push(format!("actor_id = ?{}", params.len()));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let limit = filter.limit.unwrap_or(100);
        let sql = format!(
            "SELECT {SELECT_COLS} FROM audit_trail {where_clause}
             ORDER BY created_at DESC, id DESC LIMIT {limit}"
        );

        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;
        let mut entries = Vec::new();
        while let Some(row) = rows.next().await? {
            entries.push(row_to_entry(&row)?);
        }
        Ok(entries)
    }

    /// Audit history of one maintenance request, newest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn request_history(&self, request_id: i64) -> Result<Vec<AuditEntry>, DatabaseError> {
        self.query_audit(&AuditFilter {
            entity_type: Some(EntityType::MaintenanceRequest),
            entity_id: Some(request_id),
            ..AuditFilter::default()
        })
        .await
    }
}
