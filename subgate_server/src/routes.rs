//! Request handler definitions
//!
//! Handlers are generic over the store traits so endpoint tests can swap in mocks; they are
//! registered manually in [`crate::server`] with the concrete store type filled in.
use std::collections::HashMap;

use actix_web::{get, web, HttpRequest, HttpResponse, Responder};
use chrono::Utc;
use log::*;
use serde_json::{json, Value};
use subgate_engine::{
    db_types::OrderId,
    PaymentQuery,
    ReconciliationApi,
    ReconciliationError,
    ReconciliationStore,
};

use crate::{
    data_objects::{CallbackParams, HealthResponse, JsonResponse, ServerStartTime, TestWebhookParams},
    errors::ServerError,
};

/// Status assumed when a callback does not carry one: the gateway's very first report for a
/// transaction often omits it.
const DEFAULT_CALLBACK_STATUS: &str = "pending_confirmation";
const TEST_WEBHOOK_STATUS: &str = "confirmed";
const TEST_WEBHOOK_TXID: &str = "test_tx_123";

// ----------------------------------------------   Health  ----------------------------------------------------------
#[get("/health")]
pub async fn health(start: web::Data<ServerStartTime>) -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        timestamp: Utc::now().to_rfc3339(),
        uptime: start.elapsed_secs(),
    })
}

// ----------------------------------------------   Webhook  ---------------------------------------------------------
/// The gateway callback endpoint. Accepts any method, with fields in the query string, a JSON
/// body, or an urlencoded body; the query wins per field.
pub async fn webhook<B>(
    req: HttpRequest,
    body: web::Bytes,
    api: web::Data<ReconciliationApi<B>>,
) -> HttpResponse
where
    B: ReconciliationStore + PaymentQuery,
{
    debug!("💻️ Webhook received: {} {}", req.method(), req.uri());
    let query = parse_query(req.query_string());
    let body = parse_body(&body);
    let params = CallbackParams::from_sources(&query, &body);

    let Some(order_id) = params.order_id.as_deref().filter(|s| !s.is_empty()) else {
        return HttpResponse::BadRequest().json(json!({ "error": "Missing order_id" }));
    };
    let order_id = OrderId(order_id.to_string());
    let status = params.status.as_deref().unwrap_or(DEFAULT_CALLBACK_STATUS);
    let confirmations = params.confirmations_count();

    let result = api
        .process_callback(&order_id, status, params.txid_in.as_deref(), params.value.as_deref(), confirmations)
        .await;
    match result {
        Ok(outcome) => HttpResponse::Ok().json(json!({ "status": "ok", "message": outcome.message() })),
        Err(e @ (ReconciliationError::PaymentNotFound | ReconciliationError::InvalidPaymentStatus)) => {
            HttpResponse::BadRequest().json(json!({ "error": e.to_string() }))
        },
        Err(ReconciliationError::DatabaseError(e)) => {
            error!("💻️ Callback processing for {order_id} failed on the backend. {e}");
            HttpResponse::InternalServerError().json(json!({ "error": "Internal server error" }))
        },
    }
}

// -------------------------------------------   Payment status  -----------------------------------------------------
/// Read-only payment lookup; returns the stored row verbatim.
pub async fn payment_status<B>(
    path: web::Path<String>,
    api: web::Data<ReconciliationApi<B>>,
) -> Result<HttpResponse, ServerError>
where
    B: ReconciliationStore + PaymentQuery,
{
    let order_id = OrderId(path.into_inner());
    trace!("💻️ Payment status request for {order_id}");
    let payment = api.payment_status(&order_id).await.map_err(|e| ServerError::BackendError(e.to_string()))?;
    match payment {
        Some(payment) => Ok(HttpResponse::Ok().json(payment)),
        None => Err(ServerError::NoRecordFound("Payment not found".to_string())),
    }
}

// -------------------------------------------   Test webhook  -------------------------------------------------------
/// Development convenience: simulates a gateway callback with sensible defaults. Unlike
/// `/webhook`, logical failures come back as a 200 with `success: false`.
pub async fn test_webhook<B>(
    body: web::Json<TestWebhookParams>,
    api: web::Data<ReconciliationApi<B>>,
) -> HttpResponse
where
    B: ReconciliationStore + PaymentQuery,
{
    let params = body.into_inner();
    let Some(order_id) = params.order_id.filter(|s| !s.is_empty()) else {
        return HttpResponse::BadRequest().json(json!({ "error": "Missing orderId" }));
    };
    let order_id = OrderId(order_id);
    let status = params.status.as_deref().unwrap_or(TEST_WEBHOOK_STATUS);
    let txid = params.txid.as_deref().unwrap_or(TEST_WEBHOOK_TXID);
    debug!("💻️ Test webhook for {order_id} with status {status}");

    match api.process_callback(&order_id, status, Some(txid), Some("100"), 1).await {
        Ok(outcome) => HttpResponse::Ok().json(JsonResponse::success(outcome.message())),
        Err(e @ (ReconciliationError::PaymentNotFound | ReconciliationError::InvalidPaymentStatus)) => {
            HttpResponse::Ok().json(JsonResponse::failure(e))
        },
        Err(ReconciliationError::DatabaseError(e)) => {
            error!("💻️ Test webhook for {order_id} failed on the backend. {e}");
            HttpResponse::InternalServerError().json(json!({ "error": "Internal server error" }))
        },
    }
}

// -------------------------------------------   Param plumbing  -----------------------------------------------------
fn parse_query(query_string: &str) -> Value {
    web::Query::<HashMap<String, String>>::from_query(query_string)
        .ok()
        .and_then(|q| serde_json::to_value(q.into_inner()).ok())
        .unwrap_or(Value::Null)
}

/// Body fields may arrive as JSON or urlencoded. Anything else is treated as empty rather than
/// rejected; the gateway retries on non-2xx and a malformed body will never improve.
fn parse_body(body: &web::Bytes) -> Value {
    if body.is_empty() {
        return Value::Null;
    }
    if let Ok(value) = serde_json::from_slice::<Value>(body) {
        return value;
    }
    std::str::from_utf8(body)
        .ok()
        .and_then(|s| web::Query::<HashMap<String, String>>::from_query(s).ok())
        .and_then(|q| serde_json::to_value(q.into_inner()).ok())
        .unwrap_or(Value::Null)
}
