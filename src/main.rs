use actix_cors::Cors;
use actix_web::{error, http::StatusCode, middleware, web, App, HttpResponse, HttpServer};
use mentor_match::config::Settings;
use mentor_match::core::{build_strategy, FeatureProvider, FeatureStore, Matcher};
use mentor_match::models::{FractionWeights, PointWeights};
use mentor_match::routes::{self, matches::AppState};
use mentor_match::services::{load_embeddings, ProfileDirectory};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

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
        HttpResponse::build(StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST))
            .json(self)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle query string errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    JsonError {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle path extraction errors
pub fn handle_path_error(err: error::PathError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    JsonError {
        error: "invalid_path".to_string(),
        message: format!("Invalid path: {}", err),
        status_code: 400,
    }
    .into()
}

fn startup_error(context: &str, err: impl std::fmt::Display) -> std::io::Error {
    error!("{}: {}", context, err);
    std::io::Error::new(std::io::ErrorKind::Other, format!("{}: {}", context, err))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    // Initialize logging (RUST_LOG wins over the configured level)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if settings.logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting mentor matching service...");

    // Load profile records
    let directory = ProfileDirectory::load(&settings.data.profiles_path)
        .map_err(|e| startup_error("Failed to load profiles", e))?;

    info!(
        "Loaded {} students and {} alumni from {}",
        directory.students().len(),
        directory.alumni().len(),
        settings.data.profiles_path.display()
    );

    // Build the feature provider; embeddings are optional
    let mut features = FeatureStore::from_directory(&directory, settings.data.extract_skills);
    if let Some(path) = &settings.data.embeddings_path {
        let embeddings = load_embeddings(path)
            .map_err(|e| startup_error("Failed to load embeddings", e))?;
        features = features.with_embeddings(embeddings);
        info!("Loaded {} embeddings", features.embedding_count());
    } else {
        info!("No embeddings configured, semantic term runs in fallback mode");
    }
    let features: Arc<dyn FeatureProvider> = Arc::new(features);

    // Initialize matcher with configured strategy and weights
    let strategy = build_strategy(
        settings.matching.strategy,
        FractionWeights::from(&settings.scoring.fraction),
        PointWeights::from(&settings.scoring.points),
        features,
    )
    .map_err(|e| startup_error("Invalid scoring configuration", e))?;

    let matcher = Matcher::new(strategy);

    info!("Matcher initialized with strategy: {}", matcher.strategy_name());

    // Build application state
    let app_state = AppState {
        directory: Arc::new(directory),
        matcher,
        matching: settings.matching.clone(),
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
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
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
