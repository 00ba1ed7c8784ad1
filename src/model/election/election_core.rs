use std::ops::Deref;

use chrono::{DateTime, NaiveDate, Utc};
use mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime;
use serde::{Deserialize, Serialize};

use crate::model::mongodb::Id;

use super::code::ParticipationCode;
use super::spec::ElectionSpec;

/// Core election data, as stored in the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionCore {
    /// Display title.
    pub title: String,
    /// Free-text description; may be empty.
    #[serde(default)]
    pub description: String,
    /// Ordered options voters choose between.
    pub options: Vec<String>,
    /// Advisory closing date; nothing enforces it.
    pub end_date: NaiveDate,
    /// The code participants use to find this election.
    pub participation_code: ParticipationCode,
    /// Creation timestamp.
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    /// Lifecycle state.
    pub status: ElectionStatus,
    /// Per-option vote counters, index-aligned with `options`.
    pub votes: Vec<u64>,
}

impl ElectionCore {
    /// Create a new election from a spec, with every counter at zero.
    pub fn new(spec: ElectionSpec, code: ParticipationCode) -> Self {
        let votes = vec![0; spec.options.len()];
        Self {
            title: spec.title,
            description: spec.description,
            options: spec.options,
            end_date: spec.end_date,
            participation_code: code,
            created_at: Utc::now(),
            status: ElectionStatus::Active,
            votes,
        }
    }
}

/// Lifecycle state of an election. Every election is created `Active` and
/// nothing transitions it; the field exists for forward compatibility.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElectionStatus {
    Active,
}

/// A persisted election: an identifier plus the core data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Election {
    #[serde(rename = "_id")]
    pub id: Id,
    #[serde(flatten)]
    pub election: ElectionCore,
}

impl Deref for Election {
    type Target = ElectionCore;

    fn deref(&self) -> &Self::Target {
        &self.election
    }
}
