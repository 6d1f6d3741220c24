use actix_web::{http::StatusCode, test::TestRequest};
use chrono::{Duration, Utc};
use serde_json::json;
use subgate_engine::{db_types::PaymentStatus, ConfirmOutcome, StoreError};

use super::{
    mocks::{sample_payment, MockStore},
    request,
};

#[actix_web::test]
async fn missing_order_id_is_rejected() {
    let _ = env_logger::try_init();
    let (status, body) = request(MockStore::new(), TestRequest::post().uri("/webhook")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing order_id");
}

#[actix_web::test]
async fn confirmed_callback_from_query_string() {
    let _ = env_logger::try_init();
    let mut store = MockStore::new();
    store.expect_payment_by_order_id().returning(|_| Ok(Some(sample_payment("X1", PaymentStatus::Created))));
    store
        .expect_confirm_payment()
        .withf(|order_id, txid| order_id.as_str() == "X1" && txid.as_deref() == Some("tx-9"))
        .returning(|_, _| {
            Ok(ConfirmOutcome::Confirmed {
                payment: sample_payment("X1", PaymentStatus::Completed),
                new_expiry: Some(Utc::now() + Duration::days(30)),
            })
        });
    let req = TestRequest::get().uri("/webhook?order_id=X1&status=confirmed&confirmations=2&txid_in=tx-9");
    let (status, body) = request(store, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["message"], "Payment confirmed and user activated");
}

#[actix_web::test]
async fn confirmed_callback_from_json_body() {
    let _ = env_logger::try_init();
    let mut store = MockStore::new();
    store.expect_payment_by_order_id().returning(|_| Ok(Some(sample_payment("X2", PaymentStatus::Created))));
    store.expect_confirm_payment().returning(|_, _| {
        Ok(ConfirmOutcome::Confirmed {
            payment: sample_payment("X2", PaymentStatus::Completed),
            new_expiry: Some(Utc::now() + Duration::days(7)),
        })
    });
    // JSON bodies carry confirmations as a number, not a string
    let req = TestRequest::post()
        .uri("/webhook")
        .set_json(json!({ "order_id": "X2", "status": "confirmed", "confirmations": 1, "txid_in": "tx-7" }));
    let (status, body) = request(store, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[actix_web::test]
async fn query_fields_take_precedence_over_the_body() {
    let _ = env_logger::try_init();
    let mut store = MockStore::new();
    store.expect_payment_by_order_id().returning(|_| Ok(Some(sample_payment("X3", PaymentStatus::Created))));
    // The body says pending, but the query says confirmed; confirm must win.
    store.expect_confirm_payment().returning(|_, _| {
        Ok(ConfirmOutcome::Confirmed {
            payment: sample_payment("X3", PaymentStatus::Completed),
            new_expiry: None,
        })
    });
    let req = TestRequest::post()
        .uri("/webhook?status=confirmed&confirmations=1")
        .set_json(json!({ "order_id": "X3", "status": "pending_confirmation" }));
    let (status, _body) = request(store, req).await;
    assert_eq!(status, StatusCode::OK);
}

#[actix_web::test]
async fn missing_status_defaults_to_pending_confirmation() {
    let _ = env_logger::try_init();
    let mut store = MockStore::new();
    store.expect_payment_by_order_id().returning(|_| Ok(Some(sample_payment("X4", PaymentStatus::Created))));
    store
        .expect_mark_payment_pending()
        .withf(|order_id, txid| order_id.as_str() == "X4" && txid.as_deref() == Some("tx-5"))
        .returning(|_, _| Ok(Some(sample_payment("X4", PaymentStatus::Pending))));
    let req = TestRequest::get().uri("/webhook?order_id=X4&txid_in=tx-5");
    let (status, body) = request(store, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Payment pending confirmation");
}

#[actix_web::test]
async fn unknown_order_is_a_bad_request() {
    let _ = env_logger::try_init();
    let mut store = MockStore::new();
    store.expect_payment_by_order_id().returning(|_| Ok(None));
    let req = TestRequest::get().uri("/webhook?order_id=ghost&status=confirmed&confirmations=1");
    let (status, body) = request(store, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Payment not found");
}

#[actix_web::test]
async fn unrecognized_status_is_a_bad_request() {
    let _ = env_logger::try_init();
    let mut store = MockStore::new();
    // No mutation expectations: the mock panics if the handler tries to write anything.
    store.expect_payment_by_order_id().returning(|_| Ok(Some(sample_payment("X5", PaymentStatus::Created))));
    let req = TestRequest::get().uri("/webhook?order_id=X5&status=refunded");
    let (status, body) = request(store, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid payment status");
}

#[actix_web::test]
async fn store_failures_are_masked_as_internal_errors() {
    let _ = env_logger::try_init();
    let mut store = MockStore::new();
    store.expect_payment_by_order_id().returning(|_| Err(StoreError::Query("table is on fire".to_string())));
    let req = TestRequest::get().uri("/webhook?order_id=X6");
    let (status, body) = request(store, req).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal server error");
}

// -------------------------------------------   /test-webhook  ------------------------------------------------------

#[actix_web::test]
async fn test_webhook_fills_in_the_defaults() {
    let _ = env_logger::try_init();
    let mut store = MockStore::new();
    store.expect_payment_by_order_id().returning(|_| Ok(Some(sample_payment("X7", PaymentStatus::Created))));
    store
        .expect_confirm_payment()
        .withf(|order_id, txid| order_id.as_str() == "X7" && txid.as_deref() == Some("test_tx_123"))
        .returning(|_, _| {
            Ok(ConfirmOutcome::Confirmed {
                payment: sample_payment("X7", PaymentStatus::Completed),
                new_expiry: Some(Utc::now() + Duration::days(30)),
            })
        });
    let req = TestRequest::post().uri("/test-webhook").set_json(json!({ "orderId": "X7" }));
    let (status, body) = request(store, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
}

#[actix_web::test]
async fn test_webhook_requires_an_order_id() {
    let _ = env_logger::try_init();
    let req = TestRequest::post().uri("/test-webhook").set_json(json!({}));
    let (status, body) = request(MockStore::new(), req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing orderId");
}

#[actix_web::test]
async fn test_webhook_reports_logical_failures_in_the_body() {
    let _ = env_logger::try_init();
    let mut store = MockStore::new();
    store.expect_payment_by_order_id().returning(|_| Ok(None));
    let req = TestRequest::post().uri("/test-webhook").set_json(json!({ "orderId": "ghost" }));
    let (status, body) = request(store, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Payment not found");
}
