use actix_cors::Cors;
use actix_web::{web, App, HttpServer, HttpResponse, middleware, error, http::StatusCode};
use nutrivault_gateway::config::Settings;
use nutrivault_gateway::core::SlidingWindowLimiter;
use nutrivault_gateway::routes::{self, AppState};
use nutrivault_gateway::services::{InMemoryGoalStore, UsdaGateway, UsdaOptions};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, error};
use tracing_subscriber::EnvFilter;

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub success: bool,
    pub error: String,
    #[serde(skip)]
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST))
            .json(self)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        success: false,
        error: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle path extraction errors
pub fn handle_path_error(err: error::PathError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    JsonError {
        success: false,
        error: format!("Invalid path: {}", err),
        status_code: 400,
    }
    .into()
}

/// Periodically drop rate limit windows of clients that went quiet
fn spawn_limiter_sweep(limiter: Arc<SlidingWindowLimiter>, every: Duration) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        loop {
            interval.tick().await;
            let removed = limiter.purge_idle(Instant::now());
            if removed > 0 {
                tracing::debug!(
                    "Evicted {} idle rate limit windows ({} still tracked)",
                    removed,
                    limiter.tracked_clients()
                );
            }
        }
    });
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Configuration comes first so it can drive the log setup
    let settings = Settings::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;

    // Initialize logging; LOG_LEVEL / LOG_FORMAT override the config file
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| settings.logging.level.clone());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| settings.logging.format.clone());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting Nutrivault gateway...");
    info!("Configuration loaded successfully");

    let gateway = UsdaGateway::new(UsdaOptions {
        base_url: settings.usda.base_url.clone(),
        api_key: settings.usda.api_key.clone(),
        data_types: settings.usda.data_types.clone(),
        timeout: settings.usda.timeout(),
    })
    .map_err(|e| {
        error!("Failed to create USDA client: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e)
    })?;

    info!(
        "USDA client initialized ({}, timeout: {}s)",
        settings.usda.base_url, settings.usda.timeout_secs
    );

    let limiter = Arc::new(SlidingWindowLimiter::new(
        settings.rate_limit.max_requests,
        settings.rate_limit.window(),
    ));

    info!(
        "Rate limiter initialized ({} requests per {}s per client)",
        settings.rate_limit.max_requests, settings.rate_limit.window_secs
    );

    spawn_limiter_sweep(
        limiter.clone(),
        Duration::from_secs(settings.rate_limit.sweep_interval_secs.max(1)),
    );

    // Build application state
    let app_state = AppState {
        gateway: Arc::new(gateway),
        limiter,
        goals: Arc::new(InMemoryGoalStore::new()),
        page_size: settings.usda.page_size,
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::PathConfig::default().error_handler(handle_path_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
