use rocket::{serde::json::Json, Route, State};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::election::ParticipationCode;
use crate::model::store::ElectionStore;

pub fn routes() -> Vec<Route> {
    routes![participate]
}

const INVALID_CODE: &str = "Invalid participation code. Please try again.";

/// Resolve a participation code to an election id.
///
/// The code arrives as a raw string since the entry form does not enforce a
/// format; anything that is not a valid code gets the same answer as a code
/// with no matching election.
#[post("/participate", data = "<request>", format = "json")]
async fn participate(
    request: Json<ParticipateRequest>,
    store: &State<Box<dyn ElectionStore>>,
) -> Result<Json<ParticipateResponse>> {
    let code = match request.participation_code.parse::<ParticipationCode>() {
        Ok(code) => code,
        Err(_) => return Err(Error::NotFound(INVALID_CODE.to_string())),
    };
    match store.find_by_code(code).await? {
        Some(election) => Ok(Json(ParticipateResponse {
            election_id: election.id.to_string(),
        })),
        None => Err(Error::NotFound(INVALID_CODE.to_string())),
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct ParticipateRequest {
    participation_code: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct ParticipateResponse {
    election_id: String,
}

#[cfg(test)]
mod tests {
    use rocket::{
        http::{ContentType, Status},
        local::asynchronous::Client,
        serde::json::{json, serde_json, Value},
    };

    use crate::model::election::{Election, ElectionCore, ElectionSpec};
    use crate::model::store::ElectionStore;

    use super::*;

    async fn seed_election(client: &Client, code: &str) -> Election {
        let store = client
            .rocket()
            .state::<Box<dyn ElectionStore>>()
            .unwrap();
        store
            .insert(ElectionCore::new(ElectionSpec::example(), code.parse().unwrap()))
            .await
            .unwrap()
    }

    #[rocket::async_test]
    async fn a_valid_code_resolves_to_the_election() {
        let client = crate::test_client().await;
        let election = seed_election(&client, "42424").await;

        let response = client
            .post(uri!(participate))
            .header(ContentType::JSON)
            .body(json!({ "participation_code": "42424" }).to_string())
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Ok);

        let raw_response = response.into_string().await.unwrap();
        let resolved = serde_json::from_str::<ParticipateResponse>(&raw_response).unwrap();
        assert_eq!(resolved.election_id, election.id.to_string());
    }

    #[rocket::async_test]
    async fn an_unknown_code_is_rejected() {
        let client = crate::test_client().await;
        seed_election(&client, "42424").await;

        let response = client
            .post(uri!(participate))
            .header(ContentType::JSON)
            .body(json!({ "participation_code": "24242" }).to_string())
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::NotFound);

        let raw_response = response.into_string().await.unwrap();
        let body = serde_json::from_str::<Value>(&raw_response).unwrap();
        assert_eq!(body["error"], INVALID_CODE);
    }

    #[rocket::async_test]
    async fn a_malformed_code_gets_the_same_error() {
        let client = crate::test_client().await;

        let response = client
            .post(uri!(participate))
            .header(ContentType::JSON)
            .body(json!({ "participation_code": "12a" }).to_string())
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::NotFound);

        let raw_response = response.into_string().await.unwrap();
        let body = serde_json::from_str::<Value>(&raw_response).unwrap();
        assert_eq!(body["error"], INVALID_CODE);
    }
}
