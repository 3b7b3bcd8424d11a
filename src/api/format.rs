use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::sanitize::sanitize;
use crate::database::Gratitude;

/// Public wire format of a gratitude.
///
/// Field order is part of the contract: `{ id, thankful_for, did_well, achieve, soc, date_created }`.
/// Anything else stored on the row (notably `author_id`) never leaves the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GratitudeResponse {
    pub id: i32,
    pub thankful_for: String,
    pub did_well: String,
    pub achieve: String,
    pub soc: String,
    pub date_created: DateTime<Utc>,
}

/// Convert a stored row into the response shape, sanitizing every free-text field
pub fn serialize_gratitude(gratitude: &Gratitude) -> GratitudeResponse {
    GratitudeResponse {
        id: gratitude.id,
        thankful_for: sanitize(&gratitude.thankful_for),
        did_well: sanitize(&gratitude.did_well),
        achieve: sanitize(&gratitude.achieve),
        soc: sanitize(&gratitude.soc),
        date_created: gratitude.date_created,
    }
}
