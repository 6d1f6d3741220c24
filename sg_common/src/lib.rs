mod plan;
mod secret;

pub use plan::{PlanDuration, PlanDurationParseError};
pub use secret::Secret;
