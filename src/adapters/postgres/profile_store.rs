//! PostgreSQL implementation of ProfileStore.
//!
//! Registration writes the user, farm and crops inside one transaction. An
//! uncommitted `sqlx::Transaction` rolls back when dropped, so every early
//! return below leaves the tables untouched.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{CropId, FarmId, PersistenceError, PhoneNumber, UserId};
use crate::domain::profile::{Crop, Farm, NewProfile, Profile, User};
use crate::ports::ProfileStore;

/// PostgreSQL implementation of ProfileStore.
#[derive(Clone)]
pub struct PostgresProfileStore {
    pool: PgPool,
}

impl PostgresProfileStore {
    /// Creates a new PostgresProfileStore.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileStore for PostgresProfileStore {
    async fn find_user_by_phone(
        &self,
        phone: &PhoneNumber,
    ) -> Result<Option<User>, PersistenceError> {
        let row = sqlx::query(
            r#"
            SELECT id, phone_number, name
            FROM users
            WHERE phone_number = $1
            "#,
        )
        .bind(phone.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| PersistenceError::database(format!("Failed to fetch user: {}", e)))?;

        row.as_ref().map(row_to_user).transpose()
    }

    async fn load_profile(&self, user: &User) -> Result<Profile, PersistenceError> {
        let farm_row = sqlx::query(
            r#"
            SELECT id, location, owner_id
            FROM farms
            WHERE owner_id = $1
            "#,
        )
        .bind(user.id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| PersistenceError::database(format!("Failed to fetch farm: {}", e)))?
        .ok_or(PersistenceError::IncompleteProfile(user.id))?;

        let farm = row_to_farm(&farm_row)?;

        let crop_rows = sqlx::query(
            r#"
            SELECT id, name, size, farm_id
            FROM crops
            WHERE farm_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(farm.id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| PersistenceError::database(format!("Failed to fetch crops: {}", e)))?;

        let crops = crop_rows
            .iter()
            .map(row_to_crop)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Profile {
            user: user.clone(),
            farm,
            crops,
        })
    }

    async fn create_profile(&self, profile: &NewProfile) -> Result<Profile, PersistenceError> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            PersistenceError::database(format!("Failed to start transaction: {}", e))
        })?;

        let user_id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO users (phone_number, name)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(profile.phone_number.as_str())
        .bind(&profile.name)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| PersistenceError::database(format!("Failed to insert user: {}", e)))?;

        let farm_id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO farms (location, owner_id)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(&profile.location)
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| PersistenceError::database(format!("Failed to insert farm: {}", e)))?;

        let user_id = UserId::from_i64(user_id);
        let farm_id = FarmId::from_i64(farm_id);

        let mut crops = Vec::with_capacity(profile.crops.len());
        for entry in &profile.crops {
            let crop_id: i64 = sqlx::query_scalar(
                r#"
                INSERT INTO crops (name, size, farm_id)
                VALUES ($1, $2, $3)
                RETURNING id
                "#,
            )
            .bind(&entry.name)
            .bind(entry.size)
            .bind(farm_id.as_i64())
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| PersistenceError::database(format!("Failed to insert crop: {}", e)))?;

            crops.push(Crop {
                id: CropId::from_i64(crop_id),
                farm_id,
                name: entry.name.clone(),
                size: entry.size,
            });
        }

        tx.commit().await.map_err(|e| {
            PersistenceError::database(format!("Failed to commit transaction: {}", e))
        })?;

        tracing::debug!(
            user_id = %user_id,
            farm_id = %farm_id,
            crops = crops.len(),
            "Profile created"
        );

        Ok(Profile {
            user: User {
                id: user_id,
                phone_number: profile.phone_number.clone(),
                name: profile.name.clone(),
            },
            farm: Farm {
                id: farm_id,
                owner_id: user_id,
                location: profile.location.clone(),
            },
            crops,
        })
    }
}

fn column<'r, T>(row: &'r PgRow, name: &str) -> Result<T, PersistenceError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(name)
        .map_err(|e| PersistenceError::decode(format!("column '{}': {}", name, e)))
}

fn row_to_user(row: &PgRow) -> Result<User, PersistenceError> {
    let phone: String = column(row, "phone_number")?;
    let phone_number = PhoneNumber::parse(&phone)
        .map_err(|e| PersistenceError::decode(format!("stored phone number '{}': {}", phone, e)))?;

    Ok(User {
        id: UserId::from_i64(column(row, "id")?),
        phone_number,
        name: column(row, "name")?,
    })
}

fn row_to_farm(row: &PgRow) -> Result<Farm, PersistenceError> {
    Ok(Farm {
        id: FarmId::from_i64(column(row, "id")?),
        owner_id: UserId::from_i64(column(row, "owner_id")?),
        location: column(row, "location")?,
    })
}

fn row_to_crop(row: &PgRow) -> Result<Crop, PersistenceError> {
    Ok(Crop {
        id: CropId::from_i64(column(row, "id")?),
        farm_id: FarmId::from_i64(column(row, "farm_id")?),
        name: column(row, "name")?,
        size: column(row, "size")?,
    })
}
