//! User repository.

use rentdesk_core::entities::User;
use rentdesk_core::enums::{EntityType, Role};
use rentdesk_core::errors::CoreError;

use crate::error::DatabaseError;
use crate::helpers::parse_enum;
use crate::service::RentService;

const SELECT_COLS: &str = "id, name, email, role";

fn row_to_user(row: &libsql::Row) -> Result<User, DatabaseError> {
    Ok(User {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        role: parse_enum(&row.get::<String>(3)?)?,
    })
}

impl RentService {
    pub async fn create_user(
        &self,
        name: &str,
        email: &str,
        role: Role,
    ) -> Result<User, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "INSERT INTO users (name, email, role) VALUES (?1, ?2, ?3) RETURNING id",
                libsql::params![name, email, role.as_str()],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;

        Ok(User {
            id: row.get(0)?,
            name: name.to_string(),
            email: email.to_string(),
            role,
        })
    }

    pub async fn get_user(&self, id: i64) -> Result<User, DatabaseError> {
        self.find_user(id).await?.ok_or_else(|| {
            CoreError::NotFound {
                entity_type: EntityType::User,
                id,
            }
            .into()
        })
    }

    pub async fn find_user(&self, id: i64) -> Result<Option<User>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {SELECT_COLS} FROM users WHERE id = ?1"), [id])
            .await?;
        rows.next().await?.map(|row| row_to_user(&row)).transpose()
    }

    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM users WHERE email = ?1"),
                [email],
            )
            .await?;
        rows.next().await?.map(|row| row_to_user(&row)).transpose()
    }

    pub async fn list_users_by_role(&self, role: Role) -> Result<Vec<User>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM users WHERE role = ?1 ORDER BY id"),
                [role.as_str()],
            )
            .await?;

        let mut users = Vec::new();
        while let Some(row) = rows.next().await? {
            users.push(row_to_user(&row)?);
        }
        Ok(users)
    }
}
