use log::warn;
use rocket::{serde::json::Json, Route, State};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::model::election::{ElectionCore, ElectionSpec, ParticipationCode};
use crate::model::store::{ElectionStore, StoreError};

pub fn routes() -> Vec<Route> {
    routes![create_election]
}

/// Create a new election and hand back its participation code.
///
/// Codes are drawn at random and the storage layer rejects collisions via a
/// unique index, so generation retries until an unused code is found or the
/// attempt budget runs out.
#[post("/create", data = "<spec>", format = "json")]
async fn create_election(
    spec: Json<ElectionSpec>,
    config: &State<Config>,
    store: &State<Box<dyn ElectionStore>>,
) -> Result<Json<CreatedElection>> {
    let spec = spec.into_inner();
    for attempt in 1..=config.max_code_attempts() {
        let code = ParticipationCode::random();
        match store.insert(ElectionCore::new(spec.clone(), code)).await {
            Ok(election) => {
                return Ok(Json(CreatedElection {
                    id: election.id.to_string(),
                    participation_code: code,
                }));
            }
            Err(StoreError::DuplicateCode) => {
                warn!("Participation code {code} already taken (attempt {attempt})");
            }
            Err(err) => return Err(err.into()),
        }
    }
    Err(Error::Unavailable(
        "Could not allocate a participation code. Please try again.".to_string(),
    ))
}

/// Confirmation of a successful creation: everything the creator needs to
/// share the election.
#[derive(Debug, Serialize, Deserialize)]
struct CreatedElection {
    id: String,
    participation_code: ParticipationCode,
}
