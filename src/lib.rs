//! Nutrivault Gateway - USDA FoodData Central proxy for the Nutrivault nutrition tracker
//!
//! This library throttles lookups per client with a sliding window, flattens
//! USDA nutrient records into a stable categorized shape, and derives daily
//! calorie and macro targets from a user's weight, activity and goal.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{calculate_targets, classify, GoalInput, MacroTargets, SlidingWindowLimiter};
pub use models::{ClassifiedNutrient, FoodDetail, FoodSummary, NutrientCategory, UpstreamRecord};
pub use services::{GatewayError, UsdaGateway};
