use log::{error, info};
use mongodb::Client as MongoClient;
use rocket::{
    fairing::{Fairing, Info, Kind},
    Build, Rocket,
};
use serde::Deserialize;

use crate::model::store::{ElectionStore, MemoryStore, MongoStore};

/// Application configuration, derived from `Rocket.toml` and `ROCKET_*`
/// environment variables. This struct becomes managed state and can be
/// inspected by any endpoint.
#[derive(Deserialize)]
pub struct Config {
    storage: StorageKind,
    #[serde(default = "default_max_code_attempts")]
    max_code_attempts: u32,
}

impl Config {
    /// Which storage backend to use.
    pub fn storage(&self) -> StorageKind {
        self.storage
    }

    /// How many participation codes to draw before giving up on creation.
    pub fn max_code_attempts(&self) -> u32 {
        self.max_code_attempts
    }
}

fn default_max_code_attempts() -> u32 {
    16
}

/// Available storage backends.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    /// In-process storage; elections do not survive a restart.
    Memory,
    /// MongoDB, configured via `db_uri`.
    MongoDb,
}

/// A fairing that loads the application config and puts it in managed state.
pub struct ConfigFairing;

#[rocket::async_trait]
impl Fairing for ConfigFairing {
    fn info(&self) -> Info {
        Info {
            name: "Config",
            kind: Kind::Ignite,
        }
    }

    async fn on_ignite(&self, mut rocket: Rocket<Build>) -> rocket::fairing::Result {
        // Load the config.
        let config = match rocket.figment().extract::<Config>() {
            Ok(config) => config,
            Err(e) => {
                error!("Failed to load application config");
                rocket::config::pretty_print_error(e);
                return Err(rocket);
            }
        };

        // Manage the state.
        rocket = rocket.manage(config);
        Ok(rocket)
    }
}

/// Configuration for the database.
#[derive(Deserialize)]
struct DbConfig {
    // secrets
    db_uri: String,
}

/// Name of the MongoDB database holding the `elections` collection.
static DATABASE: &str = "cloudvote";

/// A fairing that builds the election store selected by the config, performs
/// any setup necessary, and places it into managed state as a
/// `Box<dyn ElectionStore>`.
pub struct StorageFairing;

#[rocket::async_trait]
impl Fairing for StorageFairing {
    fn info(&self) -> Info {
        Info {
            name: "Election storage",
            kind: Kind::Ignite,
        }
    }

    async fn on_ignite(&self, mut rocket: Rocket<Build>) -> rocket::fairing::Result {
        let config = match rocket.figment().extract::<Config>() {
            Ok(config) => config,
            Err(e) => {
                error!("Failed to load storage config");
                rocket::config::pretty_print_error(e);
                return Err(rocket);
            }
        };

        let store: Box<dyn ElectionStore> = match config.storage() {
            StorageKind::Memory => {
                info!("Using in-memory election storage");
                Box::new(MemoryStore::new())
            }
            StorageKind::MongoDb => {
                let db_config = match rocket.figment().extract::<DbConfig>() {
                    Ok(db_config) => db_config,
                    Err(e) => {
                        error!("Failed to load database config");
                        rocket::config::pretty_print_error(e);
                        return Err(rocket);
                    }
                };
                info!("Loaded database config, connecting...");
                let client = match MongoClient::with_uri_str(db_config.db_uri).await {
                    Ok(client) => client,
                    Err(e) => {
                        error!("Failed to connect to database: {e}");
                        return Err(rocket);
                    }
                };
                let store = MongoStore::new(client.database(DATABASE));

                // Ensure the unique participation code index exists.
                if let Err(e) = store.ensure_indexes().await {
                    error!("Failed to connect to database: {e}");
                    return Err(rocket);
                }
                info!("...database connection online!");
                Box::new(store)
            }
        };

        // Manage the state.
        rocket = rocket.manage(store);
        Ok(rocket)
    }
}
