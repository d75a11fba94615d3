// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    ClassifiedNutrient, FoodDetail, FoodSummary, NutrientCategory, SearchResult, UpstreamDetailNutrient,
    UpstreamFood, UpstreamFoodDetail, UpstreamNutrientInfo, UpstreamRecord, UpstreamSearchNutrient,
    UpstreamSearchResponse,
};
pub use requests::SetGoalsRequest;
pub use responses::{ErrorResponse, FoodDetailResponse, GoalsPayload, HealthResponse, SearchResponse, SetGoalsResponse};
