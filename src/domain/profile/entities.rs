//! Persisted profile entities: User, Farm and Crop.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CropId, FarmId, PhoneNumber, UserId};

/// A registered sender.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub phone_number: PhoneNumber,
    pub name: String,
}

/// The single farm owned by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Farm {
    pub id: FarmId,
    pub owner_id: UserId,
    pub location: String,
}

/// A crop planted on a farm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Crop {
    pub id: CropId,
    pub farm_id: FarmId,
    pub name: String,
    /// Planted area in acres.
    pub size: f64,
}

/// The User + Farm + Crop graph of one registered sender.
///
/// Crops keep the order in which they were registered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub user: User,
    pub farm: Farm,
    pub crops: Vec<Crop>,
}

/// A crop as typed in a registration command, before it is stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropEntry {
    pub name: String,
    pub size: f64,
}

impl CropEntry {
    pub fn new(name: impl Into<String>, size: f64) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }
}

/// The validated content of a registration command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Registration {
    pub name: String,
    pub location: String,
    pub crops: Vec<CropEntry>,
}

/// Everything the profile store needs to create a profile atomically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProfile {
    pub phone_number: PhoneNumber,
    pub name: String,
    pub location: String,
    pub crops: Vec<CropEntry>,
}

impl NewProfile {
    /// Attaches the sender's phone number to a parsed registration.
    pub fn from_registration(phone_number: PhoneNumber, registration: Registration) -> Self {
        Self {
            phone_number,
            name: registration.name,
            location: registration.location,
            crops: registration.crops,
        }
    }
}
