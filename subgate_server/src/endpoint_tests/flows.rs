//! Full-stack flow tests: real routes on a real (in-memory) store, no mocks.
use actix_web::{http::StatusCode, test, test::TestRequest, web, App};
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use subgate_engine::{
    db_types::{NewPayment, OrderId, User},
    events::EventProducers,
    PaymentQuery,
    ReconciliationApi,
    SqliteStore,
};

use crate::{data_objects::ServerStartTime, routes};

async fn seeded_store() -> SqliteStore {
    let _ = env_logger::try_init();
    let store = SqliteStore::new_with_url("sqlite::memory:", 1).await.expect("Error creating in-memory store");
    let payment = NewPayment::new(OrderId("X1".to_string()), "555001", "Basic", "1 week").with_crypto("0.01", "btc");
    store.insert_payment(&payment).await.expect("Error seeding payment");
    let user = User { telegram_id: "555001".to_string(), plan_name: None, expiry: None };
    store.upsert_user(&user).await.expect("Error seeding user");
    store
}

#[actix_web::test]
async fn test_webhook_confirms_and_the_status_endpoint_reflects_it() {
    let store = seeded_store().await;
    let api = ReconciliationApi::new(store.clone(), EventProducers::default());
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(api))
            .app_data(web::Data::new(ServerStartTime::now()))
            .service(web::resource("/webhook").route(web::route().to(routes::webhook::<SqliteStore>)))
            .service(web::resource("/payment/{order_id}").route(web::get().to(routes::payment_status::<SqliteStore>)))
            .service(web::resource("/test-webhook").route(web::post().to(routes::test_webhook::<SqliteStore>))),
    )
    .await;

    // Simulate the confirmed callback via the development endpoint
    let req = TestRequest::post().uri("/test-webhook").set_json(json!({ "orderId": "X1" })).to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["success"], true);

    // The payment row now reads as completed, with the test transaction id
    let req = TestRequest::get().uri("/payment/X1").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["status"], "completed");
    assert_eq!(body["txid"], "test_tx_123");

    // And the user's entitlement is live for a week
    let user = store.user_by_telegram_id("555001").await.unwrap().expect("user should exist");
    assert_eq!(user.plan_name.as_deref(), Some("Basic"));
    let expiry = user.expiry.expect("expiry must be set");
    let drift = (expiry - (Utc::now() + Duration::days(7))).num_seconds().abs();
    assert!(drift <= 1, "expiry should be now + 7 days, but drifted by {drift}s");
}

#[actix_web::test]
async fn gateway_style_get_callback_marks_the_payment_pending() {
    let store = seeded_store().await;
    let api = ReconciliationApi::new(store.clone(), EventProducers::default());
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(api))
            .service(web::resource("/webhook").route(web::route().to(routes::webhook::<SqliteStore>)))
            .service(web::resource("/payment/{order_id}").route(web::get().to(routes::payment_status::<SqliteStore>))),
    )
    .await;

    // CryptAPI-style callback: GET with everything in the query string, no explicit status
    let req = TestRequest::get().uri("/webhook?order_id=X1&txid_in=tx-chain-1&value=0.01&confirmations=0").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);

    let req = TestRequest::get().uri("/payment/X1").to_request();
    let res = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["status"], "pending");
    assert_eq!(body["txid"], "tx-chain-1");

    // The user is untouched until the confirmation arrives
    let user = store.user_by_telegram_id("555001").await.unwrap().expect("user should exist");
    assert!(user.plan_name.is_none());
    assert!(user.expiry.is_none());
}
