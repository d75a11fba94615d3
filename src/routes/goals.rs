use actix_web::{dev::Payload, error, web, FromRequest, HttpMessage, HttpRequest, HttpResponse, Responder};
use std::future::{ready, Ready};
use validator::Validate;
use crate::core::{calculate_targets, round_one_decimal, ActivityLevel, GoalInput, GoalType};
use crate::models::{ErrorResponse, GoalsPayload, SetGoalsRequest, SetGoalsResponse};
use crate::routes::AppState;
use crate::services::{GoalRecord, StoreError};

/// Identity of a caller whose token was already verified
///
/// The authentication layer in front of these routes inserts this into the
/// request extensions; handlers only read it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub uid: String,
}

/// Raised when a protected route is hit without a verified identity
#[derive(Debug)]
pub struct MissingIdentity;

impl std::fmt::Display for MissingIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "No token provided")
    }
}

impl error::ResponseError for MissingIdentity {
    fn status_code(&self) -> actix_web::http::StatusCode {
        actix_web::http::StatusCode::UNAUTHORIZED
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::Unauthorized().json(ErrorResponse::new(self.to_string()))
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = MissingIdentity;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(req.extensions().get::<AuthenticatedUser>().cloned().ok_or(MissingIdentity))
    }
}

/// Configure dietary goal routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/dietary-goals", web::post().to(set_dietary_goals));
}

/// Set or update dietary goals
///
/// POST /api/dietary-goals
///
/// Request body:
/// ```json
/// {
///   "goal_type": "weight_loss|muscle_gain|maintenance",
///   "current_weight": 70,
///   "target_weight": 65,
///   "activity_level": "sedentary|light|moderate|active|very_active"
/// }
/// ```
async fn set_dietary_goals(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    req: web::Json<SetGoalsRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for dietary goals of {}: {:?}", user.uid, errors);
        return HttpResponse::BadRequest().json(ErrorResponse::new(errors.to_string()));
    }

    let req = req.into_inner();
    let input = GoalInput {
        goal_type: GoalType::from_label(req.goal_type.as_deref()),
        current_weight: req.current_weight,
        target_weight: req.target_weight,
        activity_level: req.activity_level.as_deref().and_then(ActivityLevel::from_label),
    };
    let targets = calculate_targets(&input);

    tracing::info!(
        "Computed goals for {}: {} kcal ({:?}, {:?})",
        user.uid,
        targets.calories,
        input.goal_type,
        input.activity_level
    );

    let record = GoalRecord {
        goal_type: req.goal_type,
        target_calories: targets.calories,
        target_protein: targets.protein,
        target_carbs: targets.carbs,
        target_fat: targets.fat,
        current_weight: req.current_weight,
        target_weight: req.target_weight,
        activity_level: req.activity_level,
        created_at: chrono::Utc::now(),
    };

    if let Err(e) = state.goals.save_goals(&user.uid, &record).await {
        tracing::error!("Failed to save dietary goals for {}: {}", user.uid, e);
        return match e {
            StoreError::UserNotFound(_) => HttpResponse::NotFound().json(ErrorResponse::new("User not found")),
            StoreError::Backend(_) => HttpResponse::InternalServerError().json(ErrorResponse::new(e.to_string())),
        };
    }

    HttpResponse::Ok().json(SetGoalsResponse {
        success: true,
        goals: GoalsPayload {
            goal_type: record.goal_type,
            target_calories: record.target_calories,
            target_protein: round_one_decimal(record.target_protein),
            target_carbs: round_one_decimal(record.target_carbs),
            target_fat: round_one_decimal(record.target_fat),
            current_weight: record.current_weight,
            target_weight: record.target_weight,
            activity_level: record.activity_level,
        },
    })
}
