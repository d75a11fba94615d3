use async_trait::async_trait;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when persisting goals
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Dietary goal row as handed to the persistence layer
///
/// Macros are stored unrounded; rounding happens at presentation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalRecord {
    pub goal_type: Option<String>,
    pub target_calories: i64,
    pub target_protein: f64,
    pub target_carbs: f64,
    pub target_fat: f64,
    pub current_weight: f64,
    pub target_weight: f64,
    pub activity_level: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Persistence seam for dietary goals, keyed by the authenticated user id
#[async_trait]
pub trait GoalStore: Send + Sync {
    async fn save_goals(&self, user_id: &str, record: &GoalRecord) -> Result<(), StoreError>;
}

/// Process-local goal store keeping every record per user, newest last
#[derive(Debug, Default)]
pub struct InMemoryGoalStore {
    goals: DashMap<String, Vec<GoalRecord>>,
}

impl InMemoryGoalStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recently saved goals for a user
    pub fn latest(&self, user_id: &str) -> Option<GoalRecord> {
        self.goals.get(user_id).and_then(|records| records.last().cloned())
    }

    /// Number of goal records saved for a user
    pub fn history_len(&self, user_id: &str) -> usize {
        self.goals.get(user_id).map(|records| records.len()).unwrap_or(0)
    }
}

#[async_trait]
impl GoalStore for InMemoryGoalStore {
    async fn save_goals(&self, user_id: &str, record: &GoalRecord) -> Result<(), StoreError> {
        self.goals
            .entry(user_id.to_string())
            .or_default()
            .push(record.clone());

        tracing::debug!("Saved dietary goals for user {}", user_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(calories: i64) -> GoalRecord {
        GoalRecord {
            goal_type: Some("maintenance".to_string()),
            target_calories: calories,
            target_protein: 154.0,
            target_carbs: 293.5,
            target_fat: 66.3,
            current_weight: 70.0,
            target_weight: 70.0,
            activity_level: Some("moderate".to_string()),
            created_at: chrono::Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_latest_goal_wins() {
        let store = InMemoryGoalStore::new();

        store.save_goals("uid-1", &record(2000)).await.unwrap();
        store.save_goals("uid-1", &record(2387)).await.unwrap();

        assert_eq!(store.history_len("uid-1"), 2);
        assert_eq!(store.latest("uid-1").map(|r| r.target_calories), Some(2387));
        assert!(store.latest("uid-2").is_none());
    }
}
