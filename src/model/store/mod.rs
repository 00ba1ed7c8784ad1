mod memory;
mod mongo;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

use thiserror::Error;

use crate::model::election::{Election, ElectionCore, ParticipationCode};
use crate::model::mongodb::Id;

/// Errors arising at the storage boundary.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The election's participation code is already taken.
    #[error("participation code already in use")]
    DuplicateCode,
    #[error("database did not assign an ObjectId")]
    BadInsertedId,
    #[error(transparent)]
    Db(#[from] mongodb::error::Error),
}

/// Result of attempting to record a vote.
#[derive(Debug)]
pub enum VoteUpdate {
    /// Exactly one counter was incremented; the updated record is returned.
    Applied(Election),
    /// No election with the given id exists.
    NoSuchElection,
    /// The election exists but has no option at the given index.
    NoSuchOption,
}

/// The persistence backend for elections.
///
/// This is the entire contract the application has with its hosted data
/// service: one insert, two single-record lookups, and a conditional update.
/// The update is an atomic per-index increment rather than a full-array
/// overwrite, so concurrent voters cannot overwrite each other's counts.
#[rocket::async_trait]
pub trait ElectionStore: Send + Sync {
    /// Persist a new election, rejecting duplicate participation codes.
    async fn insert(&self, election: ElectionCore) -> Result<Election, StoreError>;

    /// Find the single election with the given participation code.
    async fn find_by_code(&self, code: ParticipationCode)
        -> Result<Option<Election>, StoreError>;

    /// Find an election by id.
    async fn find_by_id(&self, id: Id) -> Result<Option<Election>, StoreError>;

    /// Increment the counter for `option` on the given election.
    async fn record_vote(&self, id: Id, option: usize) -> Result<VoteUpdate, StoreError>;
}
