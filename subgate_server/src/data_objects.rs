use std::{fmt::Display, time::Instant};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonResponse {
    pub success: bool,
    pub message: String,
}

impl JsonResponse {
    pub fn success<S: Display>(message: S) -> Self {
        Self { success: true, message: message.to_string() }
    }

    pub fn failure<S: Display>(message: S) -> Self {
        Self { success: false, message: message.to_string() }
    }
}

/// Liveness payload for `GET /health`.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
    /// Seconds since the process started.
    pub uptime: u64,
}

/// Process start marker used to report uptime.
#[derive(Debug, Clone, Copy)]
pub struct ServerStartTime(Instant);

impl ServerStartTime {
    pub fn now() -> Self {
        Self(Instant::now())
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.0.elapsed().as_secs()
    }
}

/// The fields a payment-gateway callback may carry. The gateway is sloppy about both placement
/// (query string or body) and typing (`confirmations` is a number in JSON bodies and a string in
/// query strings), so the fields are pulled out of two untyped sources, query first.
#[derive(Debug, Clone, Default)]
pub struct CallbackParams {
    pub order_id: Option<String>,
    pub status: Option<String>,
    pub txid_in: Option<String>,
    pub value: Option<String>,
    pub confirmations: Option<serde_json::Value>,
}

impl CallbackParams {
    /// Extracts the callback fields, looking each one up in `query` first and falling back to
    /// `body`. Non-object sources (empty or unparseable payloads) simply contribute nothing.
    pub fn from_sources(query: &serde_json::Value, body: &serde_json::Value) -> Self {
        let text = |field: &str| text_field(query, field).or_else(|| text_field(body, field));
        let confirmations = query
            .get("confirmations")
            .filter(|v| !v.is_null())
            .or_else(|| body.get("confirmations").filter(|v| !v.is_null()))
            .cloned();
        Self {
            order_id: text("order_id"),
            status: text("status"),
            txid_in: text("txid_in"),
            value: text("value"),
            confirmations,
        }
    }

    /// Confirmation count with the gateway's loose typing flattened out; anything unparseable
    /// counts as zero.
    pub fn confirmations_count(&self) -> i64 {
        match &self.confirmations {
            Some(serde_json::Value::Number(n)) => n.as_i64().unwrap_or(0),
            Some(serde_json::Value::String(s)) => s.parse().unwrap_or(0),
            _ => 0,
        }
    }
}

fn text_field(source: &serde_json::Value, field: &str) -> Option<String> {
    match source.get(field) {
        Some(serde_json::Value::String(s)) => Some(s.clone()),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

/// `POST /test-webhook` body. This endpoint predates the gateway contract and uses camelCase.
#[derive(Debug, Clone, Deserialize)]
pub struct TestWebhookParams {
    #[serde(rename = "orderId")]
    pub order_id: Option<String>,
    pub status: Option<String>,
    pub txid: Option<String>,
}
