use actix_web::{http::StatusCode, test::TestRequest};
use subgate_engine::{db_types::PaymentStatus, StoreError};

use super::{
    mocks::{sample_payment, MockStore},
    request,
};

#[actix_web::test]
async fn payment_lookup_returns_the_stored_row() {
    let _ = env_logger::try_init();
    let mut store = MockStore::new();
    store
        .expect_payment_by_order_id()
        .withf(|order_id| order_id.as_str() == "X1")
        .returning(|_| Ok(Some(sample_payment("X1", PaymentStatus::Completed))));
    let (status, body) = request(store, TestRequest::get().uri("/payment/X1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["order_id"], "X1");
    assert_eq!(body["status"], "completed");
    assert_eq!(body["txid"], "tx-1");
    assert_eq!(body["plan_name"], "Pro");
    assert!(body["confirmed_at"].is_string());
}

#[actix_web::test]
async fn missing_payment_is_a_404() {
    let _ = env_logger::try_init();
    let mut store = MockStore::new();
    store.expect_payment_by_order_id().returning(|_| Ok(None));
    let (status, body) = request(store, TestRequest::get().uri("/payment/ghost")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Payment not found");
}

#[actix_web::test]
async fn store_failures_do_not_leak_details() {
    let _ = env_logger::try_init();
    let mut store = MockStore::new();
    store.expect_payment_by_order_id().returning(|_| Err(StoreError::Query("secret connection string".to_string())));
    let (status, body) = request(store, TestRequest::get().uri("/payment/X1")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal server error");
}
