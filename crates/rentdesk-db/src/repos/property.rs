//! Property and unit repository.

use rentdesk_core::entities::{Property, Unit};
use rentdesk_core::enums::EntityType;
use rentdesk_core::errors::CoreError;

use crate::error::DatabaseError;
use crate::helpers::get_count;
use crate::service::RentService;

const PROPERTY_COLS: &str = "id, name, address, units, owner_id";
const UNIT_COLS: &str = "id, property_id, unit_number, rent_amount, is_occupied";

fn row_to_property(row: &libsql::Row) -> Result<Property, DatabaseError> {
    Ok(Property {
        id: row.get(0)?,
        name: row.get(1)?,
        address: row.get(2)?,
        units: get_count(row, 3)?,
        owner_id: row.get(4)?,
    })
}

fn row_to_unit(row: &libsql::Row) -> Result<Unit, DatabaseError> {
    Ok(Unit {
        id: row.get(0)?,
        property_id: row.get(1)?,
        unit_number: row.get(2)?,
        rent_amount: row.get(3)?,
        is_occupied: row.get::<i64>(4)? != 0,
    })
}

impl RentService {
    pub async fn create_property(
        &self,
        name: &str,
        address: &str,
        units: u32,
        owner_id: i64,
    ) -> Result<Property, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "INSERT INTO properties (name, address, units, owner_id)
                 VALUES (?1, ?2, ?3, ?4) RETURNING id",
                libsql::params![name, address, i64::from(units), owner_id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;

        Ok(Property {
            id: row.get(0)?,
            name: name.to_string(),
            address: address.to_string(),
            units,
            owner_id,
        })
    }

    pub async fn get_property(&self, id: i64) -> Result<Property, DatabaseError> {
        self.find_property(id).await?.ok_or_else(|| {
            CoreError::NotFound {
                entity_type: EntityType::Property,
                id,
            }
            .into()
        })
    }

    pub async fn find_property(&self, id: i64) -> Result<Option<Property>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {PROPERTY_COLS} FROM properties WHERE id = ?1"),
                [id],
            )
            .await?;
        rows.next().await?.map(|row| row_to_property(&row)).transpose()
    }

    pub async fn list_properties_for_owner(
        &self,
        owner_id: i64,
    ) -> Result<Vec<Property>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {PROPERTY_COLS} FROM properties WHERE owner_id = ?1 ORDER BY id"),
                [owner_id],
            )
            .await?;

        let mut properties = Vec::new();
        while let Some(row) = rows.next().await? {
            properties.push(row_to_property(&row)?);
        }
        Ok(properties)
    }

    pub async fn create_unit(
        &self,
        property_id: i64,
        unit_number: &str,
        rent_amount: i64,
        is_occupied: bool,
    ) -> Result<Unit, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "INSERT INTO units (property_id, unit_number, rent_amount, is_occupied)
                 VALUES (?1, ?2, ?3, ?4) RETURNING id",
                libsql::params![property_id, unit_number, rent_amount, i64::from(is_occupied)],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;

        Ok(Unit {
            id: row.get(0)?,
            property_id,
            unit_number: unit_number.to_string(),
            rent_amount,
            is_occupied,
        })
    }

    /// Look up a unit by its number within a property.
    pub async fn find_unit(
        &self,
        property_id: i64,
        unit_number: &str,
    ) -> Result<Option<Unit>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {UNIT_COLS} FROM units WHERE property_id = ?1 AND unit_number = ?2"
                ),
                libsql::params![property_id, unit_number],
            )
            .await?;
        rows.next().await?.map(|row| row_to_unit(&row)).transpose()
    }

    pub async fn list_units(&self, property_id: i64) -> Result<Vec<Unit>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {UNIT_COLS} FROM units WHERE property_id = ?1 ORDER BY id"),
                [property_id],
            )
            .await?;

        let mut units = Vec::new();
        while let Some(row) = rows.next().await? {
            units.push(row_to_unit(&row)?);
        }
        Ok(units)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{LANDLORD, PROPERTY, seeded_service, test_service};
    use pretty_assertions::assert_eq;
    use rentdesk_core::enums::Role;

    #[tokio::test]
    async fn create_property_and_units() {
        let svc = test_service().await;
        let owner = svc
            .create_user("Owner", "owner@example.com", Role::Landlord)
            .await
            .unwrap();
        let property = svc
            .create_property("Westview Apartments", "123 Main St", 12, owner.id)
            .await
            .unwrap();
        let unit = svc.create_unit(property.id, "1A", 950, true).await.unwrap();

        assert_eq!(svc.get_property(property.id).await.unwrap(), property);
        assert_eq!(svc.list_units(property.id).await.unwrap(), vec![unit.clone()]);
        assert_eq!(
            svc.find_unit(property.id, "1A").await.unwrap(),
            Some(unit)
        );
        assert_eq!(svc.find_unit(property.id, "9Z").await.unwrap(), None);
    }

    #[tokio::test]
    async fn unit_numbers_unique_per_property() {
        let svc = seeded_service().await;
        let result = svc.create_unit(PROPERTY, "101", 1000, false).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn missing_property_is_not_found() {
        let svc = test_service().await;
        let err = svc.get_property(9).await.unwrap_err();
        assert!(matches!(
            err,
            DatabaseError::Core(CoreError::NotFound {
                entity_type: EntityType::Property,
                id: 9
            })
        ));
    }

    #[tokio::test]
    async fn properties_listed_per_owner() {
        let svc = seeded_service().await;
        let owned = svc.list_properties_for_owner(LANDLORD).await.unwrap();
        assert_eq!(owned.len(), 1);
        assert_eq!(owned[0].name, "Maple Court");
    }
}
