//! warp route table and rejection handling

use log::info;
use std::convert::Infallible;
use warp::http::StatusCode;
use warp::hyper::body::Bytes;
use warp::reject::Rejection;
use warp::{Filter, Reply};

use super::error::ApiError;
use super::handlers;
use super::Endpoint;

/// Largest request body accepted, in bytes
const MAX_BODY_BYTES: u64 = 64 * 1024;

fn raw_body() -> impl Filter<Extract = (Bytes,), Error = Rejection> + Clone {
    warp::body::content_length_limit(MAX_BODY_BYTES).and(warp::body::bytes())
}

// Map every rejection to a JSON error body
async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let code;
    let message;

    if err.is_not_found() {
        code = StatusCode::NOT_FOUND;
        message = "Not Found".to_string();
    } else if let Some(api_error) = err.find::<ApiError>() {
        code = api_error.status;
        message = api_error.message.clone();
    } else if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        code = StatusCode::PAYLOAD_TOO_LARGE;
        message = "Payload Too Large".to_string();
    } else if err.find::<warp::reject::LengthRequired>().is_some() {
        code = StatusCode::LENGTH_REQUIRED;
        message = "Length Required".to_string();
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        code = StatusCode::METHOD_NOT_ALLOWED;
        message = "Method Not Allowed".to_string();
    } else {
        code = StatusCode::INTERNAL_SERVER_ERROR;
        message = "Internal Server Error".to_string();
    }

    Ok(warp::reply::with_status(
        warp::reply::json(&serde_json::json!({
            "error": message,
        })),
        code,
    ))
}

pub fn routes() -> impl Filter<Extract = impl Reply, Error = Infallible> + Clone {
    info!("Configuring routes...");

    let root_route = warp::path::end()
        .and(warp::get())
        .map(|| warp::reply::json(&handlers::service_info()));

    let health_route = warp::path!("health")
        .and(warp::get())
        .map(|| warp::reply::json(&handlers::health_status()));

    let income_route = warp::path!("corporate" / "income-projection")
        .or(warp::path!("corporate" / "pyg-projection"))
        .unify()
        .map(|| Endpoint::IncomeProjection)
        .and(warp::post())
        .and(raw_body())
        .and_then(handlers::respond);

    let cash_flow_route = warp::path!("corporate" / "cash-flow-projection")
        .map(|| Endpoint::CashFlowProjection)
        .and(warp::post())
        .and(raw_body())
        .and_then(handlers::respond);

    let health_analysis_route = warp::path!("corporate" / "financial-health")
        .map(|| Endpoint::FinancialHealth)
        .and(warp::post())
        .and(raw_body())
        .and_then(handlers::respond);

    info!("All routes configured successfully.");

    root_route
        .or(health_route)
        .or(income_route)
        .or(cash_flow_route)
        .or(health_analysis_route)
        .recover(handle_rejection)
}
