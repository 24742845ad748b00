//! Request handlers for the projection endpoints

use log::{info, warn};
use serde_json::{json, Value};
use warp::hyper::body::Bytes;
use warp::reply::Json;
use warp::Rejection;

use super::error::ApiError;
use super::Endpoint;

/// Static description of the service, served at `/`
pub fn service_info() -> Value {
    json!({
        "message": "Finance projection API is running",
        "endpoints": {
            "income_projection": "/corporate/income-projection",
            "cash_flow_projection": "/corporate/cash-flow-projection",
            "financial_health": "/corporate/financial-health",
            "health": "/health",
        }
    })
}

pub fn health_status() -> Value {
    json!({ "status": "ok" })
}

fn reject(endpoint: Endpoint, err: ApiError) -> Rejection {
    warn!("{} rejected: {}", endpoint.path(), err);
    warp::reject::custom(err)
}

/// Run a POST endpoint over the raw request body
pub async fn respond(endpoint: Endpoint, body: Bytes) -> Result<Json, Rejection> {
    info!("Handling {} ({} bytes)", endpoint.path(), body.len());

    let text = std::str::from_utf8(&body)
        .map_err(|_| reject(endpoint, ApiError::bad_request("Request body must be UTF-8 JSON")))?;

    match endpoint.respond(text) {
        Ok(value) => Ok(warp::reply::json(&value)),
        Err(e) => Err(reject(endpoint, e)),
    }
}
