//! In-memory profile store.
//!
//! Mirrors the PostgreSQL schema closely enough for tests and local runs:
//! phone numbers are unique, each user owns at most one farm, and ids come
//! from per-table sequences. Registration works on a staged copy of the
//! tables that replaces the live copy only once every row has been written.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::domain::foundation::{CropId, FarmId, PersistenceError, PhoneNumber, UserId};
use crate::domain::profile::{Crop, Farm, NewProfile, Profile, User};
use crate::ports::ProfileStore;

#[derive(Debug, Clone, Default)]
struct Tables {
    users: Vec<User>,
    farms: Vec<Farm>,
    crops: Vec<Crop>,
    next_user_id: i64,
    next_farm_id: i64,
    next_crop_id: i64,
}

impl Tables {
    fn next_id(counter: &mut i64) -> i64 {
        *counter += 1;
        *counter
    }
}

#[derive(Debug, Default)]
struct Faults {
    lookups: bool,
    crop_insert_at: Option<usize>,
}

/// In-memory implementation of the ProfileStore port.
///
/// Thread-safe via internal `Mutex`. Does not persist data across restarts.
#[derive(Debug, Default)]
pub struct InMemoryProfileStore {
    tables: Mutex<Tables>,
    faults: Mutex<Faults>,
}

impl InMemoryProfileStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every lookup fail with a database error.
    pub fn fail_lookups(self) -> Self {
        self.faults.lock().unwrap().lookups = true;
        self
    }

    /// Makes registration fail when inserting the `n`-th crop (1-based).
    pub fn fail_on_crop_insert(self, n: usize) -> Self {
        self.faults.lock().unwrap().crop_insert_at = Some(n);
        self
    }

    /// Inserts a user without a farm, as a partial write from another
    /// process would leave it.
    pub fn insert_user_without_farm(&self, phone_number: PhoneNumber, name: &str) -> User {
        let mut tables = self.tables.lock().unwrap();
        let user = User {
            id: UserId::from_i64(Tables::next_id(&mut tables.next_user_id)),
            phone_number,
            name: name.to_string(),
        };
        tables.users.push(user.clone());
        user
    }

    /// Number of stored users.
    pub fn user_count(&self) -> usize {
        self.tables.lock().unwrap().users.len()
    }

    /// Number of stored farms.
    pub fn farm_count(&self) -> usize {
        self.tables.lock().unwrap().farms.len()
    }

    /// Number of stored crops.
    pub fn crop_count(&self) -> usize {
        self.tables.lock().unwrap().crops.len()
    }

    fn check_lookup_fault(&self) -> Result<(), PersistenceError> {
        if self.faults.lock().unwrap().lookups {
            return Err(PersistenceError::database("simulated lookup failure"));
        }
        Ok(())
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn find_user_by_phone(
        &self,
        phone: &PhoneNumber,
    ) -> Result<Option<User>, PersistenceError> {
        self.check_lookup_fault()?;
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .users
            .iter()
            .find(|u| &u.phone_number == phone)
            .cloned())
    }

    async fn load_profile(&self, user: &User) -> Result<Profile, PersistenceError> {
        self.check_lookup_fault()?;
        let tables = self.tables.lock().unwrap();

        let farm = tables
            .farms
            .iter()
            .find(|f| f.owner_id == user.id)
            .cloned()
            .ok_or(PersistenceError::IncompleteProfile(user.id))?;

        let crops = tables
            .crops
            .iter()
            .filter(|c| c.farm_id == farm.id)
            .cloned()
            .collect();

        Ok(Profile {
            user: user.clone(),
            farm,
            crops,
        })
    }

    async fn create_profile(&self, profile: &NewProfile) -> Result<Profile, PersistenceError> {
        let crop_fault = self.faults.lock().unwrap().crop_insert_at;
        let mut live = self.tables.lock().unwrap();
        let mut staged = live.clone();

        if staged
            .users
            .iter()
            .any(|u| u.phone_number == profile.phone_number)
        {
            return Err(PersistenceError::database(format!(
                "duplicate phone number {}",
                profile.phone_number
            )));
        }

        let user = User {
            id: UserId::from_i64(Tables::next_id(&mut staged.next_user_id)),
            phone_number: profile.phone_number.clone(),
            name: profile.name.clone(),
        };
        staged.users.push(user.clone());

        let farm = Farm {
            id: FarmId::from_i64(Tables::next_id(&mut staged.next_farm_id)),
            owner_id: user.id,
            location: profile.location.clone(),
        };
        staged.farms.push(farm.clone());

        let mut crops = Vec::with_capacity(profile.crops.len());
        for (index, entry) in profile.crops.iter().enumerate() {
            if crop_fault == Some(index + 1) {
                return Err(PersistenceError::database(format!(
                    "simulated failure inserting crop '{}'",
                    entry.name
                )));
            }
            if !(entry.size.is_finite() && entry.size > 0.0) {
                return Err(PersistenceError::database(format!(
                    "crop size {} violates check constraint",
                    entry.size
                )));
            }
            let crop = Crop {
                id: CropId::from_i64(Tables::next_id(&mut staged.next_crop_id)),
                farm_id: farm.id,
                name: entry.name.clone(),
                size: entry.size,
            };
            staged.crops.push(crop.clone());
            crops.push(crop);
        }

        *live = staged;

        Ok(Profile { user, farm, crops })
    }
}
