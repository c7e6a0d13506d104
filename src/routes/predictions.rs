use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::core::{PredictError, Predictor};
use crate::models::{
    ApplicantRecord, ErrorResponse, HealthResponse, HistoryQuery, HistoryResponse, NewPrediction,
    PredictResponse,
};
use crate::services::PredictionStore;

/// Plain-text banner served at the root path
pub const BANNER: &str = "Loan Eligibility Backend Running Successfully";

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub predictor: Predictor,
    pub store: PredictionStore,
    /// Abort the response when the prediction cannot be stored
    pub persistence_required: bool,
    pub history_default_limit: usize,
}

/// Configure prediction routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/", web::get().to(index))
        .route("/health", web::get().to(health_check))
        .route("/predict", web::post().to(predict))
        .route("/history", web::get().to(history));
}

async fn index() -> impl Responder {
    HttpResponse::Ok().content_type("text/plain; charset=utf-8").body(BANNER)
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let store_healthy = state.store.health_check().await;

    let status = if store_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        model: state.predictor.model_name().to_string(),
        store: state.store.backend().to_string(),
    })
}

/// Score an applicant
///
/// POST /predict
///
/// Request body is a flat object of applicant attributes:
/// ```json
/// {
///   "age": 35, "income": 50000, "loan_amount": 10000, "credit_score": 700,
///   "months_employed": 24, "num_credit_lines": 3, "interest_rate": 5.5,
///   "loan_term": 36, "dti_ratio": 0.2, "education": "PhD",
///   "employment_type": "Employed", "marital_status": "Single",
///   "has_mortgage": "No", "has_dependents": "No", "loan_purpose": "Car",
///   "has_cosigner": "No"
/// }
/// ```
async fn predict(
    state: web::Data<AppState>,
    body: web::Json<ApplicantRecord>,
) -> impl Responder {
    let request_id = uuid::Uuid::new_v4();
    let record = body.into_inner();

    tracing::info!("Received predict request {} with {} fields", request_id, record.len());
    tracing::debug!("Request {} payload: {:?}", request_id, record);

    let report = match state.predictor.predict(&record) {
        Ok(report) => report,
        Err(PredictError::Encoding(e)) => {
            tracing::info!("Rejected predict request {}: {}", request_id, e);
            return HttpResponse::BadRequest().json(ErrorResponse::new(
                "Invalid applicant record",
                e.to_string(),
            ));
        }
        Err(e) => {
            tracing::error!("Error in predict request {}: {}", request_id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse::new(
                "Internal server error",
                e.to_string(),
            ));
        }
    };

    let outcome = report.outcome;
    tracing::debug!(
        "Request {} scored with schema from {:?}",
        request_id,
        report.schema_source
    );

    match state.store.insert(NewPrediction::new(request_id, &record, &outcome)).await {
        Ok(saved) => {
            tracing::info!(
                "Inserted prediction {} for request {}; prediction={} probability={} threshold={}",
                saved.id,
                request_id,
                outcome.decision,
                outcome.probability,
                outcome.threshold
            );
        }
        Err(e) if state.persistence_required => {
            tracing::error!("Failed to persist prediction for request {}: {}", request_id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse::new(
                "Failed to persist prediction",
                e.to_string(),
            ));
        }
        Err(e) => {
            // Best-effort mode: the decision is still valid without the log entry
            tracing::warn!(
                "Prediction for request {} not persisted, returning decision anyway: {}",
                request_id,
                e
            );
        }
    }

    HttpResponse::Ok().json(PredictResponse::from(&outcome))
}

/// Recent predictions
///
/// GET /history?n={count}
///
/// Returns the `n` most recent predictions, newest first.
async fn history(
    state: web::Data<AppState>,
    query: web::Query<HistoryQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse::new(
            "Validation failed",
            errors.to_string(),
        ));
    }

    let limit = query.limit(state.history_default_limit);

    match state.store.recent(limit).await {
        Ok(history) => HttpResponse::Ok().json(HistoryResponse { history }),
        Err(e) => {
            tracing::error!("Failed to fetch prediction history: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                "Failed to fetch history",
                e.to_string(),
            ))
        }
    }
}
