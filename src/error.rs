use rocket::http::Status;
use rocket::response::{self, Responder};
use rocket::Request;
use thiserror::Error;

/// Failures a request handler reports back to the caller.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing 'terms' query parameter")]
    MissingTerms,
    #[error("Invalid request payload")]
    InvalidPayload,
    #[error("{}", cause_chain(.0))]
    Search(anyhow::Error),
    #[error("{}", cause_chain(.0))]
    Write(anyhow::Error),
}

/// Joins the cause chain with `: `, dropping causes the previous message already spells out.
fn cause_chain(err: &anyhow::Error) -> String {
    let mut out = String::new();
    let mut prev = String::new();

    for cause in err.chain() {
        let msg = cause.to_string();
        if !prev.contains(&msg) {
            if !out.is_empty() {
                out.push_str(": ");
            }
            out.push_str(&msg);
        }
        prev = msg;
    }

    out
}

impl ApiError {
    pub fn status(&self) -> Status {
        match self {
            ApiError::MissingTerms | ApiError::InvalidPayload => Status::BadRequest,
            ApiError::Search(_) | ApiError::Write(_) => Status::InternalServerError,
        }
    }
}

impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, req: &'r Request<'_>) -> response::Result<'static> {
        let status = self.status();
        if status.code >= 500 {
            tracing::error!("{} {}: {:#}", req.method(), req.uri(), self);
        }
        (status, self.to_string()).respond_to(req)
    }
}
