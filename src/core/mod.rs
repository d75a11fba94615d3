// Core algorithm exports
pub mod classifier;
pub mod goals;
pub mod limiter;
pub mod normalizer;

pub use classifier::classify;
pub use goals::{calculate_targets, round_one_decimal, ActivityLevel, GoalInput, GoalType, MacroTargets};
pub use limiter::SlidingWindowLimiter;
pub use normalizer::{detail, summarize, summarize_search};
