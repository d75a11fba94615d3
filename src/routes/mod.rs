// Route exports
pub mod foods;
pub mod goals;

use actix_web::web;
use crate::core::SlidingWindowLimiter;
use crate::services::{GoalStore, UsdaGateway};
use std::sync::Arc;

pub use goals::AuthenticatedUser;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<UsdaGateway>,
    pub limiter: Arc<SlidingWindowLimiter>,
    pub goals: Arc<dyn GoalStore>,
    pub page_size: u32,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .configure(foods::configure)
            .configure(goals::configure),
    );
}
