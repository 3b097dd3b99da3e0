use rocket::http::Status;
use rocket::serde::json::{self, Json};
use rocket::{Route, State};

use crate::error::ApiError;
use crate::models::Brand;
use crate::state::AppState;

pub const CREATED_MESSAGE: &str = "Document inserted successfully";

// POST /brand
// Engine failures come back as a 500; they never take the service down.
#[post("/brand", data = "<brand>")]
pub async fn create(
    state: &State<AppState>,
    brand: Result<Json<Brand>, json::Error<'_>>,
) -> Result<(Status, &'static str), ApiError> {
    let brand = brand
        .map_err(|e| {
            tracing::debug!("rejected brand payload: {e}");
            ApiError::InvalidPayload
        })?
        .into_inner();

    state
        .engine
        .index_document(&state.index, &brand)
        .await
        .map_err(ApiError::Write)?;

    tracing::info!("indexed brand {:?}", brand.name);
    Ok((Status::Created, CREATED_MESSAGE))
}

pub fn routes() -> Vec<Route> {
    routes![create]
}
