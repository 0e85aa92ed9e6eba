//! Reference sync collection.
//!
//! An in-memory store speaking the same protocol a sync endpoint is expected
//! to speak: list with `GET`, create with `POST`, remove with
//! `DELETE /{id}`. Nothing is persisted across restarts.
use axum::{Json, http::StatusCode, response::IntoResponse};

use api_types::ErrorBody;
pub use collection::Collection;
pub use server::{router, run_with_listener, spawn_with_listener};

mod collection;
mod server;

#[derive(Debug)]
pub enum ServerError {
    NotFound(i64),
    Conflict(i64),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::NotFound(id) => (
                StatusCode::NOT_FOUND,
                format!("transaction {id} not found"),
            ),
            ServerError::Conflict(id) => (
                StatusCode::CONFLICT,
                format!("transaction {id} already present"),
            ),
        };

        (status, Json(ErrorBody { error })).into_response()
    }
}
