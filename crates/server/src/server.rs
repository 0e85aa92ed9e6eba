use api_types::transaction::TransactionPayload;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
};

use crate::{Collection, ServerError};

async fn list(State(collection): State<Collection>) -> Json<Vec<TransactionPayload>> {
    Json(collection.items().await)
}

async fn create(
    State(collection): State<Collection>,
    Json(payload): Json<TransactionPayload>,
) -> Result<StatusCode, ServerError> {
    let id = payload.id;
    collection.insert(payload).await?;
    tracing::debug!("stored transaction {id}");
    Ok(StatusCode::CREATED)
}

async fn remove(
    State(collection): State<Collection>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ServerError> {
    collection.remove(id).await?;
    tracing::debug!("removed transaction {id}");
    Ok(StatusCode::NO_CONTENT)
}

pub fn router(collection: Collection) -> Router {
    Router::new()
        .route("/transactions", get(list).post(create))
        .route("/transactions/{id}", delete(remove))
        .with_state(collection)
}

pub async fn run_with_listener(
    collection: Collection,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Sync collection listening on http://{addr}/transactions");

    axum::serve(listener, router(collection)).await
}

pub fn spawn_with_listener(
    collection: Collection,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(collection, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
