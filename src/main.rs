mod config;
mod core;
mod models;
mod routes;
mod services;

use actix_cors::Cors;
use actix_web::{error, http::StatusCode, middleware, web, App, HttpResponse, HttpServer};
use crate::config::Settings;
use crate::core::Ranker;
use crate::models::ScoringWeights;
use crate::routes::matches::AppState;
use crate::services::{EmbeddingClient, MatchCache, MatchEngine, StoreClient};
use std::sync::Arc;
use tracing::{error, info};

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST),
        )
        .content_type("application/json")
        .json(self)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(
    err: error::JsonPayloadError,
    req: &actix_web::HttpRequest,
) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(
    err: error::QueryPayloadError,
    _req: &actix_web::HttpRequest,
) -> actix_web::Error {
    JsonError {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    }
    .into()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Initialize logging
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());

    let subscriber = tracing_subscriber::fmt().with_target(false).with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting NepLaunch match engine...");

    // Load configuration
    let settings = Settings::load().unwrap_or_else(|e| {
        error!("Failed to load configuration: {}", e);
        panic!("Configuration error: {}", e);
    });

    info!("Configuration loaded successfully");

    // Initialize profile/job store client
    let store_timeout = settings.store.timeout_secs.unwrap_or(30);
    let store = Arc::new(
        StoreClient::new(
            settings.store.base_url.clone(),
            settings.store.api_key.clone(),
            store_timeout,
        )
        .unwrap_or_else(|e| {
            error!("Failed to build store client: {}", e);
            panic!("Store client error: {}", e);
        }),
    );

    info!("Store client initialized ({})", settings.store.base_url);

    // Initialize embedding provider client
    let embed_timeout = settings.embedding.timeout_secs.unwrap_or(30);
    let embed_concurrency = settings.embedding.concurrency.unwrap_or(8);
    let embeddings = Arc::new(
        EmbeddingClient::new(
            settings.embedding.base_url.clone(),
            settings.embedding.api_key.clone(),
            embed_timeout,
        )
        .unwrap_or_else(|e| {
            error!("Failed to build embedding client: {}", e);
            panic!("Embedding client error: {}", e);
        }),
    );

    info!(
        "Embedding client initialized ({}, concurrency {})",
        settings.embedding.base_url, embed_concurrency
    );

    // Initialize the match cache
    let cache_capacity = settings.cache.capacity.unwrap_or(1000);
    let cache = MatchCache::new(cache_capacity);

    info!("Match cache initialized (capacity: {} entries)", cache_capacity);

    // Initialize the ranker with configured weights
    let weights = ScoringWeights {
        semantic: settings.scoring.weights.semantic,
        skills: settings.scoring.weights.skills,
        industry_stage: settings.scoring.weights.industry_stage,
        numeric: settings.scoring.weights.numeric,
    };

    let ranker = Ranker::new(weights);

    info!("Ranker initialized with weights: {:?}", weights);

    // Build application state
    let engine = Arc::new(MatchEngine::new(
        store,
        embeddings,
        cache,
        ranker,
        embed_concurrency,
    ));
    let app_state = AppState { engine };

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
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
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
