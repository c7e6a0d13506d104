use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::time::Duration;
use thiserror::Error;

use crate::config::DatabaseSettings;
use crate::models::{NewPrediction, PersistedAttributes, PredictionRecord};

/// Errors that can occur when interacting with PostgreSQL
#[derive(Debug, Error)]
pub enum PostgresError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),
}

const PREDICTION_COLUMNS: &str = "id, request_id, age, income, loan_amount, credit_score, \
    months_employed, num_credit_lines, interest_rate, loan_term, dti_ratio, education, \
    employment_type, marital_status, has_mortgage, has_dependents, loan_purpose, has_cosigner, \
    prediction, probability, created_at";

/// PostgreSQL client for the prediction log
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Create a new PostgreSQL client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, PostgresError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL client from settings
    pub async fn from_settings(settings: &DatabaseSettings) -> Result<Self, PostgresError> {
        tracing::info!(
            "Connecting to PostgreSQL (max: {} connections)",
            settings.max_connections
        );

        Self::new(
            &settings.url,
            settings.max_connections,
            settings.min_connections,
            Duration::from_secs(settings.acquire_timeout_secs),
            Duration::from_secs(settings.idle_timeout_secs),
        )
        .await
    }

    /// Create a client whose pool connects on first use
    ///
    /// Migrations are not run; the schema must already exist.
    pub fn connect_lazy(database_url: &str, acquire_timeout: Duration) -> Result<Self, PostgresError> {
        let pool = PgPoolOptions::new()
            .acquire_timeout(acquire_timeout)
            .connect_lazy(database_url)?;

        Ok(Self { pool })
    }

    /// Insert one prediction and return the stored row
    pub async fn insert_prediction(
        &self,
        prediction: &NewPrediction,
    ) -> Result<PredictionRecord, PostgresError> {
        let query = r#"
            INSERT INTO predictions (
                request_id, age, income, loan_amount, credit_score, months_employed,
                num_credit_lines, interest_rate, loan_term, dti_ratio,
                education, employment_type, marital_status,
                has_mortgage, has_dependents, loan_purpose, has_cosigner,
                prediction, probability
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19)
            RETURNING id, created_at
        "#;

        let attrs = &prediction.attributes;
        let row = sqlx::query(query)
            .bind(prediction.request_id)
            .bind(attrs.age)
            .bind(attrs.income)
            .bind(attrs.loan_amount)
            .bind(attrs.credit_score)
            .bind(attrs.months_employed)
            .bind(attrs.num_credit_lines)
            .bind(attrs.interest_rate)
            .bind(attrs.loan_term)
            .bind(attrs.dti_ratio)
            .bind(&attrs.education)
            .bind(&attrs.employment_type)
            .bind(&attrs.marital_status)
            .bind(&attrs.has_mortgage)
            .bind(&attrs.has_dependents)
            .bind(&attrs.loan_purpose)
            .bind(&attrs.has_cosigner)
            .bind(prediction.prediction.as_str())
            .bind(prediction.probability)
            .fetch_one(&self.pool)
            .await?;

        let record = PredictionRecord {
            id: row.try_get("id")?,
            request_id: prediction.request_id,
            attributes: attrs.clone(),
            prediction: prediction.prediction.as_str().to_string(),
            probability: prediction.probability,
            created_at: row.try_get("created_at")?,
        };

        tracing::debug!("Inserted prediction {} ({})", record.id, record.request_id);

        Ok(record)
    }

    /// Most recent predictions, newest first
    pub async fn recent_predictions(&self, limit: usize) -> Result<Vec<PredictionRecord>, PostgresError> {
        let query = format!(
            "SELECT {} FROM predictions ORDER BY created_at DESC, id DESC LIMIT $1",
            PREDICTION_COLUMNS
        );

        let rows = sqlx::query(&query)
            .bind(i64::try_from(limit).unwrap_or(i64::MAX))
            .fetch_all(&self.pool)
            .await?;

        let records = rows
            .iter()
            .map(record_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(records)
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, PostgresError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

fn record_from_row(row: &PgRow) -> Result<PredictionRecord, sqlx::Error> {
    Ok(PredictionRecord {
        id: row.try_get("id")?,
        request_id: row.try_get("request_id")?,
        attributes: PersistedAttributes {
            age: row.try_get("age")?,
            income: row.try_get("income")?,
            loan_amount: row.try_get("loan_amount")?,
            credit_score: row.try_get("credit_score")?,
            months_employed: row.try_get("months_employed")?,
            num_credit_lines: row.try_get("num_credit_lines")?,
            interest_rate: row.try_get("interest_rate")?,
            loan_term: row.try_get("loan_term")?,
            dti_ratio: row.try_get("dti_ratio")?,
            education: row.try_get("education")?,
            employment_type: row.try_get("employment_type")?,
            marital_status: row.try_get("marital_status")?,
            has_mortgage: row.try_get("has_mortgage")?,
            has_dependents: row.try_get("has_dependents")?,
            loan_purpose: row.try_get("loan_purpose")?,
            has_cosigner: row.try_get("has_cosigner")?,
        },
        prediction: row.try_get("prediction")?,
        probability: row.try_get("probability")?,
        created_at: row.try_get("created_at")?,
    })
}
