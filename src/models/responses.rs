use serde::{Deserialize, Serialize};
use crate::models::domain::{FoodDetail, FoodSummary};

/// Response for the food search endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub success: bool,
    pub foods: Vec<FoodSummary>,
    #[serde(rename = "totalHits")]
    pub total_hits: u64,
}

/// Response for the food detail endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodDetailResponse {
    pub success: bool,
    pub food: FoodDetail,
}

/// Goals as presented to the client, macros rounded to one decimal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalsPayload {
    pub goal_type: Option<String>,
    pub target_calories: i64,
    pub target_protein: f64,
    pub target_carbs: f64,
    pub target_fat: f64,
    pub current_weight: f64,
    pub target_weight: f64,
    pub activity_level: Option<String>,
}

/// Response for the dietary goals endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetGoalsResponse {
    pub success: bool,
    pub goals: GoalsPayload,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub success: bool,
    pub message: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}
