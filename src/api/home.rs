use rocket::{serde::json::Json, Route};
use serde::Serialize;

pub fn routes() -> Vec<Route> {
    routes![home]
}

/// The landing screen: the app's identity and its two entry actions.
#[get("/")]
fn home() -> Json<Home> {
    Json(Home {
        name: "CloudVote",
        tagline: "Create and participate in elections with live results.",
        actions: vec![
            Action {
                title: "Create Election",
                path: "/create",
            },
            Action {
                title: "Participate in Election",
                path: "/participate",
            },
        ],
    })
}

#[derive(Debug, Serialize)]
struct Home {
    name: &'static str,
    tagline: &'static str,
    actions: Vec<Action>,
}

#[derive(Debug, Serialize)]
struct Action {
    title: &'static str,
    path: &'static str,
}
