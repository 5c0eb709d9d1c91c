use crate::domain::entities::item::ValuationRequest;
use crate::domain::entities::valuation::{ForecastPoint, Valuation, ValuationRecord};
use crate::domain::error::DomainError;
use crate::infrastructure::http::error::ApiError;
use crate::SmartVal;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Serialize, Deserialize)]
pub struct InfoResponse {
    pub message: String,
    pub model_loaded: bool,
    pub model: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ForecastParams {
    #[serde(default = "default_years")]
    pub years: u32,
}

fn default_years() -> u32 {
    5
}

pub async fn info(State(app): State<Arc<SmartVal>>) -> Json<InfoResponse> {
    Json(InfoResponse {
        message: "SmartVal valuation server is running".into(),
        model_loaded: app.model_loaded(),
        model: app.model_name().map(String::from),
    })
}

pub async fn predict(
    State(app): State<Arc<SmartVal>>,
    body: Result<Json<ValuationRequest>, JsonRejection>,
) -> Result<Json<Valuation>, ApiError> {
    let Json(request) = body?;
    let valuation = blocking(move || app.predict(&request)).await?;
    Ok(Json(valuation))
}

pub async fn forecast(
    State(app): State<Arc<SmartVal>>,
    query: Result<Query<ForecastParams>, QueryRejection>,
    body: Result<Json<ValuationRequest>, JsonRejection>,
) -> Result<Json<Vec<ForecastPoint>>, ApiError> {
    let Query(params) = query?;
    let Json(request) = body?;
    let points = blocking(move || app.forecast(&request, params.years)).await?;
    Ok(Json(points))
}

pub async fn history(State(app): State<Arc<SmartVal>>) -> Result<Json<Vec<ValuationRecord>>, ApiError> {
    let records = blocking(move || app.history()).await?;
    Ok(Json(records))
}

/// Run a synchronous core call (SQLite, tree traversal) off the async runtime.
async fn blocking<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, DomainError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError(DomainError::Io(format!("worker task failed: {e}"))))?
        .map_err(ApiError)
}
