// Service exports
pub mod goal_store;
pub mod usda;

pub use goal_store::{GoalRecord, GoalStore, InMemoryGoalStore, StoreError};
pub use usda::{GatewayError, UsdaGateway, UsdaOptions};
