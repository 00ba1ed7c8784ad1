#[macro_use]
extern crate rocket;

use rocket::{Build, Rocket};

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;

use crate::config::{ConfigFairing, StorageFairing};
use crate::logging::LoggerFairing;

/// Assemble the server from the default figment (`Rocket.toml` plus
/// `ROCKET_*` environment variables).
pub fn build() -> Rocket<Build> {
    configure(rocket::build())
}

/// Mount the routes and attach the fairings onto the given instance.
fn configure(rocket: Rocket<Build>) -> Rocket<Build> {
    rocket
        .attach(ConfigFairing)
        .attach(StorageFairing)
        .attach(LoggerFairing)
        .mount("/", api::routes())
}

/// Build a local client backed by the in-memory store.
#[cfg(test)]
pub(crate) async fn test_client() -> rocket::local::asynchronous::Client {
    let figment = rocket::Config::figment()
        .merge(("storage", "memory"))
        .merge(("max_code_attempts", 16u32));
    rocket::local::asynchronous::Client::tracked(configure(rocket::custom(figment)))
        .await
        .expect("valid rocket instance")
}
