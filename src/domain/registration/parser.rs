//! Registration command parser.
//!
//! Grammar:
//!
//! ```text
//! register, <name>, <location>, <crop>:<size>;<crop>:<size>;...
//! ```
//!
//! Whitespace around every field and sub-field is ignored. Sizes are acres and
//! must be finite positive numbers. The parser is pure: it never touches the
//! store, and it either returns a complete registration or an error.

use crate::domain::profile::{CropEntry, Registration};

use super::MalformedRegistration;

/// Keyword that starts a registration command.
pub const REGISTRATION_KEYWORD: &str = "register";

const FIELD_SEPARATOR: char = ',';
const CROP_SEPARATOR: char = ';';
const SIZE_SEPARATOR: char = ':';
const FIELD_COUNT: usize = 4;

/// Returns true when the message mentions the registration keyword anywhere,
/// ignoring case.
pub fn is_registration_request(body: &str) -> bool {
    body.to_lowercase().contains(REGISTRATION_KEYWORD)
}

/// Parses a registration command.
///
/// # Errors
///
/// Returns the first `MalformedRegistration` encountered.
pub fn parse_registration(body: &str) -> Result<Registration, MalformedRegistration> {
    let fields: Vec<&str> = body.split(FIELD_SEPARATOR).map(str::trim).collect();
    if fields.len() != FIELD_COUNT {
        return Err(MalformedRegistration::field_count(fields.len()));
    }

    let (keyword, name, location, crop_list) = (fields[0], fields[1], fields[2], fields[3]);

    if !keyword.eq_ignore_ascii_case(REGISTRATION_KEYWORD) {
        return Err(MalformedRegistration::missing_keyword(keyword));
    }
    if name.is_empty() {
        return Err(MalformedRegistration::empty_field("name"));
    }
    if location.is_empty() {
        return Err(MalformedRegistration::empty_field("location"));
    }

    let crops = crop_list
        .split(CROP_SEPARATOR)
        .map(parse_crop_entry)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Registration {
        name: name.to_string(),
        location: location.to_string(),
        crops,
    })
}

fn parse_crop_entry(entry: &str) -> Result<CropEntry, MalformedRegistration> {
    let parts: Vec<&str> = entry.split(SIZE_SEPARATOR).map(str::trim).collect();
    let [name, size] = parts.as_slice() else {
        return Err(MalformedRegistration::malformed_crop_entry(entry.trim()));
    };

    if name.is_empty() {
        return Err(MalformedRegistration::empty_field("crop name"));
    }

    match size.parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => Ok(CropEntry::new(*name, value)),
        _ => Err(MalformedRegistration::invalid_crop_size(*name, *size)),
    }
}
