use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A new election as submitted by its creator. No validation is applied
/// beyond what deserialisation requires; titles may be empty and any number
/// of options is accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElectionSpec {
    /// Display title.
    pub title: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Ordered options.
    pub options: Vec<String>,
    /// Advisory closing date.
    pub end_date: NaiveDate,
}
