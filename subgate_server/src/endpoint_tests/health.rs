use actix_web::{http::StatusCode, test::TestRequest};

use super::{mocks::MockStore, request};

#[actix_web::test]
async fn health_reports_liveness_without_touching_the_store() {
    let _ = env_logger::try_init();
    // A fresh mock with no expectations: any store call would panic the test.
    let (status, body) = request(MockStore::new(), TestRequest::get().uri("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert!(body["timestamp"].is_string());
    assert!(body["uptime"].is_u64());
}
