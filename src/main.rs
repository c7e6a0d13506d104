use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use loan_scorer::config::Settings;
use loan_scorer::core::Predictor;
use loan_scorer::routes::{self, AppState};
use loan_scorer::scoring::load_model;
use loan_scorer::services::{PostgresClient, PredictionStore};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn init_logging(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    match settings.logging.format.as_str() {
        "pretty" => subscriber.pretty().init(),
        "compact" => subscriber.compact().init(),
        _ => subscriber.init(),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;

    init_logging(&settings);

    info!("Starting loan scoring service...");

    // The model is loaded once and shared read-only for the life of the process
    let model = load_model(&settings.model.path).map_err(|e| {
        error!("Failed to load model from {}: {}", settings.model.path, e);
        std::io::Error::new(std::io::ErrorKind::Other, e)
    })?;

    let predictor = Predictor::new(model, settings.decision.threshold);

    info!(
        "Predictor initialized with {} model, threshold {}",
        predictor.model_name(),
        predictor.threshold()
    );

    let store = if settings.database.is_memory() {
        warn!("Using in-memory prediction store; history is lost on restart");
        PredictionStore::memory()
    } else {
        let client = PostgresClient::from_settings(&settings.database)
            .await
            .map_err(|e| {
                error!("Failed to connect to PostgreSQL: {}", e);
                std::io::Error::new(std::io::ErrorKind::Other, e)
            })?;
        info!("PostgreSQL client initialized");
        PredictionStore::Postgres(Arc::new(client))
    };

    // Build application state
    let app_state = AppState {
        predictor,
        store,
        persistence_required: settings.persistence.required,
        history_default_limit: settings.history.default_limit,
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
            .app_data(routes::json_config())
            .app_data(routes::query_config())
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
