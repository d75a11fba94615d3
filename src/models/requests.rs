use serde::{Deserialize, Serialize};
use validator::Validate;
use super::domain::null_as_default;

/// Request to set or update a user's dietary goals
///
/// Labels are kept as sent so they can be echoed back; unknown labels are
/// resolved by the goal calculator.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SetGoalsRequest {
    #[serde(default)]
    pub goal_type: Option<String>,
    #[validate(range(min = 0.0))]
    #[serde(default, deserialize_with = "null_as_default")]
    pub current_weight: f64,
    #[validate(range(min = 0.0))]
    #[serde(default, deserialize_with = "null_as_default")]
    pub target_weight: f64,
    #[serde(default)]
    pub activity_level: Option<String>,
}
