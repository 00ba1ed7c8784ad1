use mongodb::{
    bson::{doc, Document},
    error::{Error as DbError, ErrorKind, WriteFailure},
    options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument},
    Database, IndexModel,
};

use crate::model::election::{Election, ElectionCore, ParticipationCode};
use crate::model::mongodb::{Coll, Id};

use super::{ElectionStore, StoreError, VoteUpdate};

/// Election storage backed by a hosted MongoDB database.
pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    fn elections(&self) -> Coll<Election> {
        Coll::from_db(&self.db)
    }

    /// Ensure that the unique index on `participation_code` exists.
    ///
    /// This operation is idempotent.
    pub async fn ensure_indexes(&self) -> Result<(), DbError> {
        let unique = IndexOptions::builder().unique(true).build();
        let code_index = IndexModel::builder()
            .keys(doc! { "participation_code": 1 })
            .options(unique)
            .build();
        self.elections().create_index(code_index, None).await?;
        Ok(())
    }
}

/// Whether the error is a unique index violation.
fn is_duplicate_key(err: &DbError) -> bool {
    matches!(
        &*err.kind,
        ErrorKind::Write(WriteFailure::WriteError(write_err)) if write_err.code == 11000
    )
}

#[rocket::async_trait]
impl ElectionStore for MongoStore {
    async fn insert(&self, election: ElectionCore) -> Result<Election, StoreError> {
        let inserted = Coll::<ElectionCore>::from_db(&self.db)
            .insert_one(&election, None)
            .await
            .map_err(|err| {
                if is_duplicate_key(&err) {
                    StoreError::DuplicateCode
                } else {
                    err.into()
                }
            })?;
        let id = inserted
            .inserted_id
            .as_object_id()
            .ok_or(StoreError::BadInsertedId)?;
        Ok(Election {
            id: id.into(),
            election,
        })
    }

    async fn find_by_code(
        &self,
        code: ParticipationCode,
    ) -> Result<Option<Election>, StoreError> {
        let filter = doc! { "participation_code": code.to_string() };
        Ok(self.elections().find_one(filter, None).await?)
    }

    async fn find_by_id(&self, id: Id) -> Result<Option<Election>, StoreError> {
        Ok(self.elections().find_one(doc! { "_id": id }, None).await?)
    }

    async fn record_vote(&self, id: Id, option: usize) -> Result<VoteUpdate, StoreError> {
        // Filter on the counter existing so an out-of-range index can never
        // create a new field or match a shorter election.
        let field = format!("votes.{option}");
        let mut filter = doc! { "_id": id };
        filter.insert(field.as_str(), doc! { "$exists": true });
        let mut increment = Document::new();
        increment.insert(field.as_str(), 1_i64);
        let update = doc! { "$inc": increment };
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        match self
            .elections()
            .find_one_and_update(filter, update, options)
            .await?
        {
            Some(election) => Ok(VoteUpdate::Applied(election)),
            // Nothing matched: work out which half of the filter failed.
            None => match self.find_by_id(id).await? {
                Some(_) => Ok(VoteUpdate::NoSuchOption),
                None => Ok(VoteUpdate::NoSuchElection),
            },
        }
    }
}
