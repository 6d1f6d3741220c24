use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, Utc};
use log::error;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use thiserror::Error;

use sg_common::PlanDuration;

/// The plan label written to a user record when an upgrade payment is confirmed.
pub const UPGRADE_PLAN_NAME: &str = "Advanced";

//--------------------------------------        OrderId        --------------------------------------------------------
/// The gateway-assigned identifier of a purchase attempt. One order id maps to at most one
/// payment row.
#[derive(Debug, Clone, PartialEq, Eq, Type, Serialize, Deserialize)]
#[sqlx(transparent)]
pub struct OrderId(pub String);

impl FromStr for OrderId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

impl From<String> for OrderId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl OrderId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

//--------------------------------------     PaymentStatus     --------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// The row has been provisioned by the storefront and no callback has arrived yet.
    Created,
    /// The gateway has seen the transaction, but it is still gathering confirmations.
    Pending,
    /// The payment is confirmed and the user's entitlement has been updated.
    Completed,
}

impl Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStatus::Created => write!(f, "created"),
            PaymentStatus::Pending => write!(f, "pending"),
            PaymentStatus::Completed => write!(f, "completed"),
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("Invalid payment record status: {0}")]
pub struct PaymentStatusConversionError(String);

impl FromStr for PaymentStatus {
    type Err = PaymentStatusConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "created" => Ok(Self::Created),
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            s => Err(PaymentStatusConversionError(s.to_string())),
        }
    }
}

impl From<String> for PaymentStatus {
    fn from(value: String) -> Self {
        value.parse().unwrap_or_else(|_| {
            error!("Invalid payment status in the database: {value}. Defaulting to 'created'.");
            PaymentStatus::Created
        })
    }
}

//--------------------------------------        Payment        --------------------------------------------------------
/// A payment record, keyed by `order_id`. Rows are provisioned by the storefront before the
/// gateway ever calls back; callbacks only ever mutate them.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Payment {
    pub order_id: OrderId,
    /// Opaque identifier of the purchasing user. Foreign reference to the users table.
    pub telegram_id: String,
    pub plan_name: String,
    /// The billing period as sold, e.g. "1 month". Stored verbatim; parse with
    /// [`Payment::plan_duration`].
    pub duration: String,
    /// True when this payment changes only the plan label of an existing entitlement.
    pub is_upgrade: bool,
    pub status: PaymentStatus,
    /// Transaction id reported by the gateway. Set on the first callback and overwritten by later
    /// ones.
    pub txid: Option<String>,
    pub crypto_amount: String,
    pub crypto_type: String,
    pub confirmed_at: Option<DateTime<Utc>>,
}

impl Payment {
    pub fn plan_duration(&self) -> PlanDuration {
        PlanDuration::from_str_or_default(&self.duration)
    }
}

//--------------------------------------       NewPayment      --------------------------------------------------------
/// A payment row as provisioned by the storefront, before any gateway callback.
#[derive(Debug, Clone)]
pub struct NewPayment {
    pub order_id: OrderId,
    pub telegram_id: String,
    pub plan_name: String,
    pub duration: String,
    pub is_upgrade: bool,
    pub crypto_amount: String,
    pub crypto_type: String,
}

impl NewPayment {
    pub fn new<S1, S2, S3>(order_id: OrderId, telegram_id: S1, plan_name: S2, duration: S3) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
        S3: Into<String>,
    {
        Self {
            order_id,
            telegram_id: telegram_id.into(),
            plan_name: plan_name.into(),
            duration: duration.into(),
            is_upgrade: false,
            crypto_amount: String::default(),
            crypto_type: String::default(),
        }
    }

    pub fn as_upgrade(mut self) -> Self {
        self.is_upgrade = true;
        self
    }

    pub fn with_crypto<S1, S2>(mut self, amount: S1, crypto_type: S2) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
    {
        self.crypto_amount = amount.into();
        self.crypto_type = crypto_type.into();
        self
    }
}

//--------------------------------------         User          --------------------------------------------------------
/// A user record, keyed by `telegram_id`. Provisioned externally; this system only ever updates
/// the entitlement fields.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub telegram_id: String,
    /// The current entitlement label, if any plan has ever been activated.
    pub plan_name: Option<String>,
    /// When the entitlement lapses. Untouched by upgrade payments.
    pub expiry: Option<DateTime<Utc>>,
}
