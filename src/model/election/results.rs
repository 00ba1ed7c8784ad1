use serde::{Deserialize, Serialize};

use super::election_core::ElectionCore;

/// Tallied results for an election: per-option counts and percentages of the
/// total, as rendered after a vote is cast.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionResults {
    pub options: Vec<OptionTally>,
    pub total_votes: u64,
}

/// The tally for a single option.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionTally {
    pub option: String,
    pub votes: u64,
    pub percentage: u8,
}

impl ElectionResults {
    /// Tally an election's counters. Percentages are rounded to the nearest
    /// whole number; with no votes at all, every option reports 0%.
    pub fn tally(election: &ElectionCore) -> Self {
        let total: u64 = election.votes.iter().sum();
        let options = election
            .options
            .iter()
            .zip(&election.votes)
            .map(|(option, &votes)| OptionTally {
                option: option.clone(),
                votes,
                percentage: percentage(votes, total),
            })
            .collect();
        Self {
            options,
            total_votes: total,
        }
    }
}

fn percentage(votes: u64, total: u64) -> u8 {
    if total == 0 {
        0
    } else {
        ((votes as f64 / total as f64) * 100.0).round() as u8
    }
}
