use std::{fmt, fmt::Display, str::FromStr};

use chrono::Duration;
use thiserror::Error;

//------------------------------------    PlanDuration    -------------------------------------------------------------

/// Billing periods sold by the storefront.
///
/// Expiry offsets are naive 24-hour multiples. There is no calendar or
/// timezone arithmetic; "1 month" is always exactly 30 days.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlanDuration {
    OneWeek,
    #[default]
    OneMonth,
    ThreeMonths,
    TwelveMonths,
}

impl PlanDuration {
    /// The entitlement lifetime added to "now" when a payment is confirmed.
    pub fn expiry_offset(&self) -> Duration {
        match self {
            PlanDuration::OneWeek => Duration::days(7),
            PlanDuration::OneMonth => Duration::days(30),
            PlanDuration::ThreeMonths => Duration::days(90),
            PlanDuration::TwelveMonths => Duration::days(365),
        }
    }

    /// Lossy parse used on stored rows. Gateways and admin tooling have
    /// written free-form values into the duration column, so anything
    /// unrecognized falls back to one month rather than failing the payment.
    pub fn from_str_or_default(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Error)]
#[error("Unknown plan duration: {0}")]
pub struct PlanDurationParseError(String);

impl FromStr for PlanDuration {
    type Err = PlanDurationParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1 week" => Ok(Self::OneWeek),
            "1 month" => Ok(Self::OneMonth),
            "3 months" => Ok(Self::ThreeMonths),
            "12 months" => Ok(Self::TwelveMonths),
            other => Err(PlanDurationParseError(other.to_string())),
        }
    }
}

impl Display for PlanDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanDuration::OneWeek => write!(f, "1 week"),
            PlanDuration::OneMonth => write!(f, "1 month"),
            PlanDuration::ThreeMonths => write!(f, "3 months"),
            PlanDuration::TwelveMonths => write!(f, "12 months"),
        }
    }
}
