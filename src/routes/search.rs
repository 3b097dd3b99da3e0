use rocket::http::{ContentType, Status};
use rocket::response::{self, Responder, Response};
use rocket::serde::json::Json;
use rocket::{Request, Route, State};

use crate::error::ApiError;
use crate::models::Brand;
use crate::search::{query, response as shape};
use crate::state::AppState;

/// Outcome of a lookup. No match is still a 200, just with nothing in the body.
pub enum SearchOutcome {
    Found(Json<Brand>),
    NoMatch,
}

impl<'r> Responder<'r, 'static> for SearchOutcome {
    fn respond_to(self, req: &'r Request<'_>) -> response::Result<'static> {
        match self {
            SearchOutcome::Found(brand) => brand.respond_to(req),
            SearchOutcome::NoMatch => Response::build()
                .status(Status::Ok)
                .header(ContentType::JSON)
                .ok(),
        }
    }
}

// GET /search?terms=
#[get("/search?<terms>")]
pub async fn search(state: &State<AppState>, terms: Option<String>) -> Result<SearchOutcome, ApiError> {
    let terms = terms.filter(|t| !t.is_empty()).ok_or(ApiError::MissingTerms)?;

    let body = query::fuzzy_terms_query(&terms);
    let raw = state.engine.search(&state.index, &body).await.map_err(ApiError::Search)?;

    match shape::top_hit(raw).map_err(ApiError::Search)? {
        Some(brand) => {
            tracing::debug!("{terms:?} matched {:?}", brand.name);
            Ok(SearchOutcome::Found(Json(brand)))
        }
        None => {
            tracing::debug!("{terms:?} matched nothing");
            Ok(SearchOutcome::NoMatch)
        }
    }
}

pub fn routes() -> Vec<Route> {
    routes![search]
}
