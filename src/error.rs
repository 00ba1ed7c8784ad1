use log::error;
use rocket::{
    http::Status,
    response::{self, Responder},
    serde::json::{json, Json},
    Request,
};
use thiserror::Error;

use crate::model::store::StoreError;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can arise while serving a request. Every variant renders as a
/// JSON body of the form `{ "error": <message> }` so that no call site fails
/// silently.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Unavailable(String),
}

impl<'r, 'o: 'r> Responder<'r, 'o> for Error {
    fn respond_to(self, req: &'r Request<'_>) -> response::Result<'o> {
        let status = match &self {
            Self::Store(_) => Status::InternalServerError,
            Self::BadRequest(_) => Status::BadRequest,
            Self::NotFound(_) => Status::NotFound,
            Self::Unavailable(_) => Status::ServiceUnavailable,
        };
        // Log backend failures but keep the details out of the response.
        let message = match &self {
            Self::Store(err) => {
                error!("Storage failure: {err}");
                "An error occurred. Please try again.".to_string()
            }
            other => other.to_string(),
        };
        let mut response = Json(json!({ "error": message })).respond_to(req)?;
        response.set_status(status);
        Ok(response)
    }
}
