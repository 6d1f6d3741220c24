mod flows;
mod health;
mod mocks;
mod payments;
mod webhook;

use actix_web::{http::StatusCode, test, test::TestRequest, web, App};
use serde_json::Value;
use subgate_engine::{events::EventProducers, ReconciliationApi};

use self::mocks::MockStore;
use crate::{data_objects::ServerStartTime, routes};

/// Runs one request against an app wired up exactly like the production server, but with a mock
/// store. Returns the response status and its JSON body.
async fn request(store: MockStore, req: TestRequest) -> (StatusCode, Value) {
    let api = ReconciliationApi::new(store, EventProducers::default());
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(api))
            .app_data(web::Data::new(ServerStartTime::now()))
            .service(routes::health)
            .service(web::resource("/webhook").route(web::route().to(routes::webhook::<MockStore>)))
            .service(web::resource("/payment/{order_id}").route(web::get().to(routes::payment_status::<MockStore>)))
            .service(web::resource("/test-webhook").route(web::post().to(routes::test_webhook::<MockStore>))),
    )
    .await;
    let res = test::call_service(&app, req.to_request()).await;
    let status = res.status();
    let body: Value = test::read_body_json(res).await;
    (status, body)
}
