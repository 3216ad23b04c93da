//! Profile module - the registered farmer, their farm and its crops.

mod entities;

pub use entities::{Crop, CropEntry, Farm, NewProfile, Profile, Registration, User};
