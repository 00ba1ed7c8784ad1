use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::code::ParticipationCode;
use super::election_core::{Election, ElectionStatus};

/// The full election record as served to the voting screen.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionView {
    pub id: String,
    pub title: String,
    pub description: String,
    pub options: Vec<String>,
    pub end_date: NaiveDate,
    pub participation_code: ParticipationCode,
    pub created_at: DateTime<Utc>,
    pub status: ElectionStatus,
    pub votes: Vec<u64>,
}

impl From<Election> for ElectionView {
    fn from(election: Election) -> Self {
        Self {
            id: election.id.to_string(),
            title: election.election.title,
            description: election.election.description,
            options: election.election.options,
            end_date: election.election.end_date,
            participation_code: election.election.participation_code,
            created_at: election.election.created_at,
            status: election.election.status,
            votes: election.election.votes,
        }
    }
}
