//! Maintenance request repository: submission, status transitions, notes,
//! role-scoped listing, and per-owner stats.

use rentdesk_core::audit_detail::{NoteAddedDetail, StatusChangedDetail};
use rentdesk_core::entities::{MaintenanceListing, MaintenanceRequest};
use rentdesk_core::enums::{AuditAction, EntityType, MaintenanceStatus, Role};
use rentdesk_core::errors::CoreError;
use rentdesk_core::identity::Actor;
use rentdesk_core::lifecycle::{
    ListFilter, MaintenanceStats, NewMaintenanceRequest, TransitionFields, action_label,
    authorize_view, plan_note, plan_transition, resolve_tenant,
};

use crate::error::DatabaseError;
use crate::helpers::{
    get_count, get_opt_string, now, parse_datetime, parse_enum, parse_optional_datetime,
    to_sql_timestamp,
};
use crate::repos::audit::{NewAuditEntry, insert_audit};
use crate::service::RentService;
use crate::updates::maintenance::MaintenanceUpdate;

const SELECT_COLS: &str = "id, property_id, unit_number, tenant_id, issue, description, status, \
     priority, created_at, updated_at, scheduled_date, completed_date, assigned_to, notes";

const LISTING_COLS: &str = "m.id, m.property_id, m.unit_number, m.tenant_id, m.issue, \
     m.description, m.status, m.priority, m.created_at, m.updated_at, m.scheduled_date, \
     m.completed_date, m.assigned_to, m.notes, u.name, p.name";

fn row_to_request(row: &libsql::Row) -> Result<MaintenanceRequest, DatabaseError> {
    Ok(MaintenanceRequest {
        id: row.get(0)?,
        property_id: row.get(1)?,
        unit_number: row.get(2)?,
        tenant_id: row.get(3)?,
        issue: row.get(4)?,
        description: row.get(5)?,
        status: parse_enum(&row.get::<String>(6)?)?,
        priority: parse_enum(&row.get::<String>(7)?)?,
        created_at: parse_datetime(&row.get::<String>(8)?)?,
        updated_at: parse_datetime(&row.get::<String>(9)?)?,
        scheduled_date: parse_optional_datetime(get_opt_string(row, 10)?.as_deref())?,
        completed_date: parse_optional_datetime(get_opt_string(row, 11)?.as_deref())?,
        assigned_to: get_opt_string(row, 12)?,
        notes: get_opt_string(row, 13)?,
    })
}

fn row_to_listing(row: &libsql::Row) -> Result<MaintenanceListing, DatabaseError> {
    Ok(MaintenanceListing {
        request: row_to_request(row)?,
        tenant_name: row.get(14)?,
        property_name: row.get(15)?,
    })
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<serde_json::Value, DatabaseError> {
    serde_json::to_value(value).map_err(|e| DatabaseError::Other(e.into()))
}

impl RentService {
    /// File a new maintenance request.
    ///
    /// Text fields are checked first, then the property, the actor's right to
    /// file on it, the unit, and finally the tenant the request is for.
    ///
    /// # Errors
    ///
    /// `Validation` for bad text or an unresolvable property, unit or tenant;
    /// `Unauthorized` per [`resolve_tenant`]; storage errors otherwise.
    pub async fn submit_request(
        &self,
        actor: &Actor,
        input: &NewMaintenanceRequest,
    ) -> Result<MaintenanceRequest, DatabaseError> {
        let input = input.normalized();
        self.rules().validate(&input)?;

        let property = self.find_property(input.property_id).await?.ok_or_else(|| {
            CoreError::Validation(format!("property {} does not exist", input.property_id))
        })?;
        let tenant_id = resolve_tenant(actor, input.tenant_id, property.owner_id)?;

        if self
            .find_unit(property.id, &input.unit_number)
            .await?
            .is_none()
        {
            return Err(CoreError::Validation(format!(
                "unit {} does not exist on property {}",
                input.unit_number, property.id
            ))
            .into());
        }
        match self.find_user(tenant_id).await? {
            Some(user) if user.role == Role::Tenant => {}
            _ => {
                return Err(
                    CoreError::Validation(format!("tenant {tenant_id} does not exist")).into(),
                );
            }
        }

        let at = now();
        let tx = self.begin_write().await?;
        let inserted = async {
            let mut rows = tx
                .conn()
                .query(
                    "INSERT INTO maintenance_requests
                     (property_id, unit_number, tenant_id, issue, description, status, priority, created_at, updated_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9) RETURNING id",
                    libsql::params![
                        property.id,
                        input.unit_number.as_str(),
                        tenant_id,
                        input.issue.as_str(),
                        input.description.as_str(),
                        MaintenanceStatus::Pending.as_str(),
                        input.priority.as_str(),
                        to_sql_timestamp(&at),
                        to_sql_timestamp(&at)
                    ],
                )
                .await?;
            let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
            let id: i64 = row.get(0)?;
            insert_audit(
                tx.conn(),
                NewAuditEntry {
                    actor: *actor,
                    entity_type: EntityType::MaintenanceRequest,
                    entity_id: id,
                    action: AuditAction::Created,
                    detail: None,
                    created_at: at,
                },
            )
            .await?;
            Ok::<_, DatabaseError>(id)
        }
        .await;
        let id = tx.finish(inserted).await?;

        let request = MaintenanceRequest {
            id,
            property_id: property.id,
            unit_number: input.unit_number,
            tenant_id,
            issue: input.issue,
            description: input.description,
            status: MaintenanceStatus::Pending,
            priority: input.priority,
            created_at: at,
            updated_at: at,
            scheduled_date: None,
            completed_date: None,
            assigned_to: None,
            notes: None,
        };

        tracing::info!(
            request_id = id,
            tenant_id,
            property_id = property.id,
            priority = %request.priority,
            "maintenance request submitted"
        );
        Ok(request)
    }

    /// Load a request without any visibility check.
    ///
    /// # Errors
    ///
    /// `NotFound` if no request has this id.
    pub async fn get_request(&self, id: i64) -> Result<MaintenanceRequest, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM maintenance_requests WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or(CoreError::NotFound {
            entity_type: EntityType::MaintenanceRequest,
            id,
        })?;
        row_to_request(&row)
    }

    /// Load a request on behalf of `actor`.
    ///
    /// # Errors
    ///
    /// `NotFound` if missing, `Unauthorized` if not visible to the actor.
    pub async fn get_request_for(
        &self,
        actor: &Actor,
        id: i64,
    ) -> Result<MaintenanceRequest, DatabaseError> {
        let request = self.get_request(id).await?;
        let owner = self.get_property(request.property_id).await?.owner_id;
        authorize_view(&request, actor, owner)?;
        tracing::debug!(request_id = id, user_id = actor.user_id, "request fetched");
        Ok(request)
    }

    /// Move a request to `target`.
    ///
    /// Every check runs before the single UPDATE; a rejected transition
    /// leaves the row untouched.
    ///
    /// # Errors
    ///
    /// `NotFound`, `Unauthorized`, `InvalidTransition`, or `Validation` as
    /// decided by [`plan_transition`]; storage errors otherwise.
    pub async fn transition_request(
        &self,
        actor: &Actor,
        id: i64,
        target: MaintenanceStatus,
        fields: &TransitionFields,
    ) -> Result<MaintenanceRequest, DatabaseError> {
        let current = self.get_request(id).await?;
        let owner = self.get_property(current.property_id).await?.owner_id;

        let planned = match plan_transition(&current, actor, owner, target, fields, now()) {
            Ok(planned) => planned,
            Err(error) => {
                tracing::warn!(
                    request_id = id,
                    user_id = actor.user_id,
                    from = %current.status,
                    to = %target,
                    %error,
                    "transition rejected"
                );
                return Err(error.into());
            }
        };

        let detail = StatusChangedDetail {
            from: current.status.as_str().to_string(),
            to: target.as_str().to_string(),
            reason: action_label(current.status, target).map(String::from),
        };
        let audit = NewAuditEntry {
            actor: *actor,
            entity_type: EntityType::MaintenanceRequest,
            entity_id: id,
            action: AuditAction::StatusChanged,
            detail: Some(to_json(&detail)?),
            created_at: planned.updated_at,
        };
        self.write_with_audit(id, &MaintenanceUpdate::diff(&current, &planned), audit)
            .await?;

        tracing::info!(
            request_id = id,
            user_id = actor.user_id,
            from = %current.status,
            to = %target,
            "maintenance request transitioned"
        );
        self.get_request(id).await
    }

    /// Append a contact note to a request.
    ///
    /// # Errors
    ///
    /// `NotFound`, `Unauthorized`, or `Validation` per [`plan_note`].
    pub async fn add_note(
        &self,
        actor: &Actor,
        id: i64,
        note: &str,
    ) -> Result<MaintenanceRequest, DatabaseError> {
        let current = self.get_request(id).await?;
        let owner = self.get_property(current.property_id).await?.owner_id;
        let planned = plan_note(&current, actor, owner, note, now())?;

        let detail = NoteAddedDetail {
            author_role: actor.role.as_str().to_string(),
            note: note.trim().to_string(),
        };
        let audit = NewAuditEntry {
            actor: *actor,
            entity_type: EntityType::MaintenanceRequest,
            entity_id: id,
            action: AuditAction::NoteAdded,
            detail: Some(to_json(&detail)?),
            created_at: planned.updated_at,
        };
        self.write_with_audit(id, &MaintenanceUpdate::diff(&current, &planned), audit)
            .await?;

        tracing::info!(request_id = id, user_id = actor.user_id, "note added");
        self.get_request(id).await
    }

    /// Requests visible to `actor`, filtered and sorted by `filter`.
    ///
    /// Tenants see their own requests; managers see requests on properties
    /// they own.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_requests_for(
        &self,
        actor: &Actor,
        filter: &ListFilter,
    ) -> Result<Vec<MaintenanceListing>, DatabaseError> {
        let scope = match actor.role {
            Role::Tenant => "m.tenant_id = ?1",
            Role::Landlord | Role::PropertyManager => "p.owner_id = ?1",
        };
        let mut params: Vec<libsql::Value> = vec![actor.user_id.into()];
        let mut sql = format!(
            "SELECT {LISTING_COLS}
             FROM maintenance_requests m
             JOIN users u ON u.id = m.tenant_id
             JOIN properties p ON p.id = m.property_id
             WHERE {scope}"
        );
        if let Some(status) = filter.status {
            params.push(status.as_str().into());
            sql.push_str(" AND m.status = ?2");
        }

        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;
        let mut listings = Vec::new();
        while let Some(row) = rows.next().await? {
            listings.push(row_to_listing(&row)?);
        }

        let listings = filter.apply(actor, listings);
        tracing::debug!(
            user_id = actor.user_id,
            role = %actor.role,
            count = listings.len(),
            "requests listed"
        );
        Ok(listings)
    }

    /// Per-status counts across all properties owned by `owner_id`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn maintenance_stats(&self, owner_id: i64) -> Result<MaintenanceStats, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT m.status, COUNT(*)
                 FROM maintenance_requests m
                 JOIN properties p ON p.id = m.property_id
                 WHERE p.owner_id = ?1
                 GROUP BY m.status",
                [owner_id],
            )
            .await?;

        let mut stats = MaintenanceStats::default();
        while let Some(row) = rows.next().await? {
            let status: MaintenanceStatus = parse_enum(&row.get::<String>(0)?)?;
            stats.record(status, get_count(&row, 1)?);
        }
        Ok(stats)
    }

    /// Remove a request. Only the owning manager may delete.
    ///
    /// # Errors
    ///
    /// `NotFound` if missing, `Unauthorized` for anyone but the owner.
    pub async fn delete_request(&self, actor: &Actor, id: i64) -> Result<(), DatabaseError> {
        let current = self.get_request(id).await?;
        let owner = self.get_property(current.property_id).await?.owner_id;
        if !actor.manages(owner) {
            return Err(CoreError::unauthorized(format!(
                "user {} may not delete maintenance request {id}",
                actor.user_id
            ))
            .into());
        }

        let tx = self.begin_write().await?;
        let deleted: Result<_, DatabaseError> = async {
            tx.conn()
                .execute("DELETE FROM maintenance_requests WHERE id = ?1", [id])
                .await?;
            insert_audit(
                tx.conn(),
                NewAuditEntry {
                    actor: *actor,
                    entity_type: EntityType::MaintenanceRequest,
                    entity_id: id,
                    action: AuditAction::Deleted,
                    detail: None,
                    created_at: now(),
                },
            )
            .await
        }
        .await;
        tx.finish(deleted).await?;

        tracing::info!(request_id = id, user_id = actor.user_id, "maintenance request deleted");
        Ok(())
    }

    /// Apply `update` and record `audit` in one transaction.
    async fn write_with_audit(
        &self,
        id: i64,
        update: &MaintenanceUpdate,
        audit: NewAuditEntry,
    ) -> Result<(), DatabaseError> {
        let tx = self.begin_write().await?;
        let written: Result<_, DatabaseError> = async {
            write_update(tx.conn(), id, update).await?;
            insert_audit(tx.conn(), audit).await
        }
        .await;
        tx.finish(written).await?;
        Ok(())
    }
}

async fn write_update(
    conn: &libsql::Connection,
    id: i64,
    update: &MaintenanceUpdate,
) -> Result<(), DatabaseError> {
    let (sets, mut params) = update.assignments();
    if sets.is_empty() {
        return Ok(());
    }
    params.push(id.into());
    let sql = format!(
        "UPDATE maintenance_requests SET {} WHERE id = ?{}",
        sets.join(", "),
        params.len()
    );
    let affected = conn.execute(&sql, libsql::params_from_iter(params)).await?;
    if affected == 0 {
        return Err(CoreError::NotFound {
            entity_type: EntityType::MaintenanceRequest,
            id,
        }
        .into());
    }
    Ok(())
}
