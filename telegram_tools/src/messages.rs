//! Notification text templates.
//!
//! Three variants: an upgrade confirmation, a regular plan confirmation, and a pending notice.
//! Inputs are plain strings so the crate stays independent of the engine's row types.
use chrono::{DateTime, Utc};

/// The payment fields that appear in notification text.
#[derive(Debug, Clone, Default)]
pub struct PaymentSummary {
    pub plan_name: String,
    pub duration: String,
    pub crypto_amount: String,
    pub crypto_type: String,
    pub txid: String,
}

pub fn upgrade_confirmed(payment: &PaymentSummary, support: Option<&str>) -> String {
    let mut text = format!(
        "✅ *Plan Upgraded Successfully!*\n\n\
         🎉 Your plan has been upgraded to Advanced!\n\n\
         *Upgrade Details:*\n\
         • New Plan: Advanced\n\
         • Duration: {}\n\
         • Transaction ID: `{}`\n\n\
         🚀 Your new limits are live right away.",
        payment.duration, payment.txid
    );
    push_footer(&mut text, support);
    text
}

pub fn plan_confirmed(payment: &PaymentSummary, expires: DateTime<Utc>, support: Option<&str>) -> String {
    let mut text = format!(
        "✅ *Payment Confirmed!*\n\n\
         🎉 Your {plan} plan has been activated!\n\n\
         *Plan Details:*\n\
         • Plan: {plan}\n\
         • Duration: {duration}\n\
         • Expires: {expires}\n\
         • Transaction ID: `{txid}`\n\n\
         🚀 Your account is now active and ready to use!",
        plan = payment.plan_name,
        duration = payment.duration,
        expires = expires.format("%Y-%m-%d"),
        txid = payment.txid
    );
    push_footer(&mut text, support);
    text
}

pub fn payment_pending(payment: &PaymentSummary, support: Option<&str>) -> String {
    let mut text = format!(
        "*Payment Received - Pending Confirmation*\n\n\
         We've received your payment and it's being confirmed on the blockchain.\n\n\
         *Details:*\n\
         • Amount: {amount} {crypto}\n\
         • Plan: {plan} ({duration})\n\
         • Transaction ID: `{txid}`\n\n\
         Your plan will be activated automatically once confirmed!",
        amount = payment.crypto_amount,
        crypto = payment.crypto_type.to_uppercase(),
        plan = payment.plan_name,
        duration = payment.duration,
        txid = payment.txid
    );
    push_footer(&mut text, support);
    text
}

fn push_footer(text: &mut String, support: Option<&str>) {
    if let Some(handle) = support {
        text.push_str(&format!("\n\n*Support:* {handle}"));
    }
}
