use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use crate::model::election::{Election, ElectionCore, ParticipationCode};
use crate::model::mongodb::Id;

use super::{ElectionStore, StoreError, VoteUpdate};

/// In-process election storage with the same semantics as [`super::MongoStore`]:
/// unique participation codes and atomic per-option increments. Used for
/// local runs without a database, and throughout the test suite.
#[derive(Debug, Default)]
pub struct MemoryStore {
    elections: Mutex<HashMap<Id, ElectionCore>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<Id, ElectionCore>> {
        self.elections.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[rocket::async_trait]
impl ElectionStore for MemoryStore {
    async fn insert(&self, election: ElectionCore) -> Result<Election, StoreError> {
        let mut elections = self.lock();
        if elections
            .values()
            .any(|existing| existing.participation_code == election.participation_code)
        {
            return Err(StoreError::DuplicateCode);
        }
        let id = Id::new();
        elections.insert(id, election.clone());
        Ok(Election { id, election })
    }

    async fn find_by_code(
        &self,
        code: ParticipationCode,
    ) -> Result<Option<Election>, StoreError> {
        let elections = self.lock();
        Ok(elections
            .iter()
            .find(|(_, election)| election.participation_code == code)
            .map(|(&id, election)| Election {
                id,
                election: election.clone(),
            }))
    }

    async fn find_by_id(&self, id: Id) -> Result<Option<Election>, StoreError> {
        let elections = self.lock();
        Ok(elections.get(&id).map(|election| Election {
            id,
            election: election.clone(),
        }))
    }

    async fn record_vote(&self, id: Id, option: usize) -> Result<VoteUpdate, StoreError> {
        let mut elections = self.lock();
        let election = match elections.get_mut(&id) {
            Some(election) => election,
            None => return Ok(VoteUpdate::NoSuchElection),
        };
        match election.votes.get_mut(option) {
            Some(votes) => {
                *votes += 1;
                Ok(VoteUpdate::Applied(Election {
                    id,
                    election: election.clone(),
                }))
            }
            None => Ok(VoteUpdate::NoSuchOption),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    use crate::model::election::ElectionSpec;

    fn example_election(code: &str) -> ElectionCore {
        ElectionCore::new(ElectionSpec::example(), code.parse().unwrap())
    }

    #[rocket::async_test]
    async fn insert_and_look_up() {
        let store = MemoryStore::new();
        let inserted = store.insert(example_election("12345")).await.unwrap();

        let by_id = store.find_by_id(inserted.id).await.unwrap().unwrap();
        assert_eq!(by_id, inserted);

        let by_code = store
            .find_by_code("12345".parse().unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_code, inserted);
    }

    #[rocket::async_test]
    async fn duplicate_codes_are_rejected() {
        let store = MemoryStore::new();
        store.insert(example_election("12345")).await.unwrap();

        let err = store.insert(example_election("12345")).await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateCode));
    }

    #[rocket::async_test]
    async fn missing_records_are_not_found() {
        let store = MemoryStore::new();
        assert!(store.find_by_id(Id::new()).await.unwrap().is_none());
        assert!(store
            .find_by_code("99999".parse().unwrap())
            .await
            .unwrap()
            .is_none());
    }

    #[rocket::async_test]
    async fn a_vote_increments_exactly_one_counter() {
        let store = MemoryStore::new();
        let inserted = store.insert(example_election("12345")).await.unwrap();

        let update = store.record_vote(inserted.id, 1).await.unwrap();
        let election = match update {
            VoteUpdate::Applied(election) => election,
            other => panic!("expected Applied, got {other:?}"),
        };
        assert_eq!(election.votes, vec![0, 1, 0]);
    }

    #[rocket::async_test]
    async fn votes_against_unknown_elections_or_options_change_nothing() {
        let store = MemoryStore::new();
        let inserted = store.insert(example_election("12345")).await.unwrap();

        assert!(matches!(
            store.record_vote(Id::new(), 0).await.unwrap(),
            VoteUpdate::NoSuchElection
        ));
        assert!(matches!(
            store.record_vote(inserted.id, 3).await.unwrap(),
            VoteUpdate::NoSuchOption
        ));

        let election = store.find_by_id(inserted.id).await.unwrap().unwrap();
        assert_eq!(election.votes, vec![0, 0, 0]);
    }

    /// Two voters submitting at the same time from the same snapshot must
    /// both be counted. This used to be a lost-update hazard when votes were
    /// written back as a whole array; the per-index increment removes it.
    #[rocket::async_test]
    async fn simultaneous_votes_are_all_counted() {
        let store = Arc::new(MemoryStore::new());
        let inserted = store.insert(example_election("12345")).await.unwrap();
        let id = inserted.id;

        let mut handles = Vec::new();
        for _ in 0..10 {
            let store = Arc::clone(&store);
            handles.push(rocket::tokio::spawn(async move {
                store.record_vote(id, 0).await.unwrap()
            }));
        }
        for handle in handles {
            assert!(matches!(handle.await.unwrap(), VoteUpdate::Applied(_)));
        }

        let election = store.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(election.votes, vec![10, 0, 0]);
    }
}
