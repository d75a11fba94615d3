use actix_web::{web, HttpRequest, HttpResponse, Responder};
use crate::core::normalizer;
use crate::models::{ErrorResponse, FoodDetailResponse, HealthResponse, SearchResponse};
use crate::routes::AppState;
use crate::services::GatewayError;
use std::time::Instant;

const RATE_LIMITED_MESSAGE: &str = "Too many requests. Please try again later.";
const NOT_FOUND_MESSAGE: &str = "Food item not found";

/// Configure food lookup routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/search/{query}", web::get().to(search_foods))
        .route("/food/{fdc_id}", web::get().to(get_food_details));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        success: true,
        message: "Nutrivault API is running!".to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Rate limit key for a request: the peer IP address
fn client_key(req: &HttpRequest) -> String {
    req.peer_addr()
        .map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn rate_limited() -> HttpResponse {
    HttpResponse::TooManyRequests().json(ErrorResponse::new(RATE_LIMITED_MESSAGE))
}

/// Search foods
///
/// GET /api/search/{query}
async fn search_foods(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: HttpRequest,
) -> impl Responder {
    let query = path.into_inner();
    let client = client_key(&req);

    // Admission is settled before the upstream call starts
    if !state.limiter.admit(&client, Instant::now()) {
        tracing::info!("Rejected search from {}: rate limit exceeded", client);
        return rate_limited();
    }

    match state.gateway.search(&query, state.page_size).await {
        Ok(response) => {
            let result = normalizer::summarize_search(response);

            tracing::info!("Search {:?} returned {} foods ({} hits)", query, result.foods.len(), result.total_hits);

            HttpResponse::Ok().json(SearchResponse {
                success: true,
                foods: result.foods,
                total_hits: result.total_hits,
            })
        }
        Err(e) => {
            tracing::error!("Search {:?} failed: {}", query, e);
            HttpResponse::InternalServerError().json(ErrorResponse::new(e.to_string()))
        }
    }
}

/// Get the categorized nutrient breakdown of a food
///
/// GET /api/food/{fdc_id}
async fn get_food_details(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: HttpRequest,
) -> impl Responder {
    let fdc_id = path.into_inner();
    let client = client_key(&req);

    if !state.limiter.admit(&client, Instant::now()) {
        tracing::info!("Rejected food detail from {}: rate limit exceeded", client);
        return rate_limited();
    }

    match state.gateway.fetch_detail(&fdc_id).await {
        Ok(response) => {
            let food = normalizer::detail(response);

            tracing::debug!("Food {} has {} categorized nutrients", fdc_id, food.nutrient_count());

            HttpResponse::Ok().json(FoodDetailResponse { success: true, food })
        }
        Err(GatewayError::Status { status, .. }) => {
            tracing::info!("Food {} not available upstream (status {})", fdc_id, status);
            HttpResponse::NotFound().json(ErrorResponse::new(NOT_FOUND_MESSAGE))
        }
        Err(e) => {
            tracing::error!("Fetching food {} failed: {}", fdc_id, e);
            HttpResponse::InternalServerError().json(ErrorResponse::new(e.to_string()))
        }
    }
}
