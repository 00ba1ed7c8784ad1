use rocket::{serde::json::Json, Route, State};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::election::{ElectionResults, ElectionView};
use crate::model::mongodb::Id;
use crate::model::store::{ElectionStore, VoteUpdate};

pub fn routes() -> Vec<Route> {
    routes![get_election, cast_vote]
}

const ELECTION_NOT_FOUND: &str = "Election not found";

/// Load the election behind the voting screen.
#[get("/vote/<election_id>")]
async fn get_election(
    election_id: Id,
    store: &State<Box<dyn ElectionStore>>,
) -> Result<Json<ElectionView>> {
    store
        .find_by_id(election_id)
        .await?
        .map(|election| Json(ElectionView::from(election)))
        .ok_or_else(|| Error::NotFound(ELECTION_NOT_FOUND.to_string()))
}

/// Record a single vote and return the updated tally.
#[post("/vote/<election_id>", data = "<ballot>", format = "json")]
async fn cast_vote(
    election_id: Id,
    ballot: Json<Ballot>,
    store: &State<Box<dyn ElectionStore>>,
) -> Result<Json<ElectionResults>> {
    let option = match ballot.option {
        Some(option) => option,
        None => return Err(Error::BadRequest("Please select an option".to_string())),
    };
    match store.record_vote(election_id, option).await? {
        VoteUpdate::Applied(election) => Ok(Json(ElectionResults::tally(&election))),
        VoteUpdate::NoSuchElection => Err(Error::NotFound(ELECTION_NOT_FOUND.to_string())),
        VoteUpdate::NoSuchOption => Err(Error::BadRequest(format!(
            "No option with index {option}"
        ))),
    }
}

/// A voter's selection: the index of at most one option.
#[derive(Debug, Serialize, Deserialize)]
struct Ballot {
    option: Option<usize>,
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

    async fn seed_election(client: &Client) -> Election {
        let store = client
            .rocket()
            .state::<Box<dyn ElectionStore>>()
            .unwrap();
        store
            .insert(ElectionCore::new(
                ElectionSpec::example(),
                "67890".parse().unwrap(),
            ))
            .await
            .unwrap()
    }

    fn store(client: &Client) -> &Box<dyn ElectionStore> {
        client.rocket().state::<Box<dyn ElectionStore>>().unwrap()
    }

    #[rocket::async_test]
    async fn the_voting_screen_gets_the_full_record() {
        let client = crate::test_client().await;
        let election = seed_election(&client).await;

        let response = client
            .get(uri!(get_election(election.id)))
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Ok);

        let raw_response = response.into_string().await.unwrap();
        let view = serde_json::from_str::<ElectionView>(&raw_response).unwrap();
        assert_eq!(view.id, election.id.to_string());
        assert_eq!(view.title, election.title);
        assert_eq!(view.options, election.options);
        assert_eq!(view.votes, vec![0, 0, 0]);
    }

    #[rocket::async_test]
    async fn an_unknown_election_is_not_found() {
        let client = crate::test_client().await;

        let response = client
            .get(uri!(get_election(Id::new())))
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::NotFound);

        let raw_response = response.into_string().await.unwrap();
        let body = serde_json::from_str::<Value>(&raw_response).unwrap();
        assert_eq!(body["error"], ELECTION_NOT_FOUND);
    }

    #[rocket::async_test]
    async fn a_vote_updates_the_tally() {
        let client = crate::test_client().await;
        let election = seed_election(&client).await;

        let response = client
            .post(uri!(cast_vote(election.id)))
            .header(ContentType::JSON)
            .body(json!({ "option": 1 }).to_string())
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Ok);

        let raw_response = response.into_string().await.unwrap();
        let results = serde_json::from_str::<ElectionResults>(&raw_response).unwrap();
        assert_eq!(results.total_votes, 1);
        assert_eq!(results.options[1].votes, 1);
        assert_eq!(results.options[1].percentage, 100);
        assert_eq!(results.options[0].votes, 0);

        let stored = store(&client)
            .find_by_id(election.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.votes, vec![0, 1, 0]);
    }

    #[rocket::async_test]
    async fn voting_without_a_selection_changes_nothing() {
        let client = crate::test_client().await;
        let election = seed_election(&client).await;

        let response = client
            .post(uri!(cast_vote(election.id)))
            .header(ContentType::JSON)
            .body(json!({ "option": null }).to_string())
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::BadRequest);

        let raw_response = response.into_string().await.unwrap();
        let body = serde_json::from_str::<Value>(&raw_response).unwrap();
        assert_eq!(body["error"], "Please select an option");

        let stored = store(&client)
            .find_by_id(election.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.votes, vec![0, 0, 0]);
    }

    #[rocket::async_test]
    async fn an_out_of_range_option_changes_nothing() {
        let client = crate::test_client().await;
        let election = seed_election(&client).await;

        let response = client
            .post(uri!(cast_vote(election.id)))
            .header(ContentType::JSON)
            .body(json!({ "option": 7 }).to_string())
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::BadRequest);

        let stored = store(&client)
            .find_by_id(election.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.votes, vec![0, 0, 0]);
    }

    #[rocket::async_test]
    async fn percentages_follow_the_counters() {
        let client = crate::test_client().await;
        let election = seed_election(&client).await;

        // Bring the counters to [3, 0, 0], then cast the fourth vote.
        for _ in 0..3 {
            store(&client).record_vote(election.id, 0).await.unwrap();
        }
        let response = client
            .post(uri!(cast_vote(election.id)))
            .header(ContentType::JSON)
            .body(json!({ "option": 1 }).to_string())
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Ok);

        let raw_response = response.into_string().await.unwrap();
        let results = serde_json::from_str::<ElectionResults>(&raw_response).unwrap();
        assert_eq!(results.total_votes, 4);
        assert_eq!(results.options[0].percentage, 75);
        assert_eq!(results.options[1].percentage, 25);
        assert_eq!(results.options[2].percentage, 0);
    }
}
