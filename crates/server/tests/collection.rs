use api_types::transaction::{TransactionPayload, TransactionType};
use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
};
use http_body_util::BodyExt;
use server::{Collection, router};
use tower::ServiceExt;

fn payload(id: i64, title: &str) -> TransactionPayload {
    TransactionPayload {
        id,
        title: title.to_string(),
        amount: 4.5,
        created_at: "2025-01-02T03:04:05Z".parse().unwrap(),
        kind: TransactionType::Expense,
        is_deleted: false,
    }
}

fn post(item: &TransactionPayload) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/transactions")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(item).unwrap()))
        .unwrap()
}

fn delete(id: &str) -> Request<Body> {
    Request::builder()
        .method(Method::DELETE)
        .uri(format!("/transactions/{id}"))
        .body(Body::empty())
        .unwrap()
}

async fn list(collection: &Collection) -> Vec<TransactionPayload> {
    let res = router(collection.clone())
        .oneshot(
            Request::builder()
                .uri("/transactions")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn post_then_list_returns_items_in_id_order() {
    let collection = Collection::default();

    for item in [payload(2, "Rent"), payload(1, "Coffee")] {
        let res = router(collection.clone()).oneshot(post(&item)).await.unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    let items = list(&collection).await;
    assert_eq!(items, vec![payload(1, "Coffee"), payload(2, "Rent")]);
}

#[tokio::test]
async fn duplicate_id_is_a_conflict() {
    let collection = Collection::default();
    collection.insert(payload(1, "Coffee")).await.unwrap();

    let res = router(collection.clone())
        .oneshot(post(&payload(1, "Tea")))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);

    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], "transaction 1 already present");
    assert_eq!(collection.items().await, vec![payload(1, "Coffee")]);
}

#[tokio::test]
async fn delete_removes_item_and_reports_missing_ones() {
    let collection = Collection::default();
    collection.insert(payload(7, "Gym")).await.unwrap();

    let res = router(collection.clone()).oneshot(delete("7")).await.unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    assert!(collection.items().await.is_empty());

    let res = router(collection.clone()).oneshot(delete("7")).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn non_numeric_id_is_rejected() {
    let collection = Collection::default();
    let res = router(collection).oneshot(delete("abc")).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}
