//! AWS Lambda handler for the projection endpoints
//!
//! Accepts API Gateway proxy events and routes them through the same
//! endpoint dispatch the HTTP server uses.

use aws_lambda_events::encodings::Body;
use aws_lambda_events::event::apigw::{ApiGatewayProxyRequest, ApiGatewayProxyResponse};
use finance_platform::api::{handlers, ApiError, Endpoint};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use log::{info, warn};
use serde_json::{json, Value};

/// Resolve a request to a status code and JSON body
fn route(method: &str, path: &str, body: Option<&str>, is_base64_encoded: bool) -> (u16, Value) {
    match (method, path.trim_end_matches('/')) {
        ("GET", "") => return (200, handlers::service_info()),
        ("GET", "/health") => return (200, handlers::health_status()),
        _ => {}
    }

    let endpoint = match Endpoint::from_path(path) {
        Some(endpoint) => endpoint,
        None => return error_body(&ApiError::not_found("Not Found")),
    };

    if method != "POST" {
        return (405, json!({ "error": "Method Not Allowed" }));
    }
    if is_base64_encoded {
        return error_body(&ApiError::bad_request("Binary request bodies are not supported"));
    }

    match endpoint.respond(body.unwrap_or("")) {
        Ok(value) => (200, value),
        Err(e) => {
            warn!("{} rejected: {}", endpoint.path(), e);
            error_body(&e)
        }
    }
}

fn error_body(err: &ApiError) -> (u16, Value) {
    (err.status.as_u16(), json!({ "error": err.message }))
}

fn json_response(status: u16, body: Option<&Value>) -> Result<ApiGatewayProxyResponse, Error> {
    let mut response = ApiGatewayProxyResponse {
        status_code: i64::from(status),
        body: body.map(|b| Body::Text(b.to_string())),
        ..Default::default()
    };
    response.headers.insert("content-type", "application/json".parse()?);
    response.headers.insert("access-control-allow-origin", "*".parse()?);
    response.headers.insert("access-control-allow-methods", "GET, POST, OPTIONS".parse()?);
    response.headers.insert("access-control-allow-headers", "content-type".parse()?);
    Ok(response)
}

async fn handler(event: LambdaEvent<ApiGatewayProxyRequest>) -> Result<ApiGatewayProxyResponse, Error> {
    let request = event.payload;
    let method = request.http_method.as_str().to_string();
    let path = request.path.unwrap_or_default();

    // CORS preflight
    if method == "OPTIONS" {
        return json_response(200, None);
    }

    info!("Handling {} {}", method, path);
    let (status, body) = route(&method, &path, request.body.as_deref(), request.is_base64_encoded);
    json_response(status, Some(&body))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    const INCOME: &str = r#"{
        "current_revenue": 1000,
        "revenue_growth_rate": 0.1,
        "cogs_as_percent_of_revenue": 0.4,
        "operating_expenses": 100,
        "tax_rate": 0.25,
        "years": 3
    }"#;

    #[test]
    fn test_routes_projection() {
        let (status, body) = route("POST", "/corporate/income-projection", Some(INCOME), false);
        assert_eq!(status, 200);
        assert_eq!(body["projections"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_static_routes() {
        assert_eq!(route("GET", "/health", None, false), (200, json!({ "status": "ok" })));
        assert_eq!(route("GET", "/", None, false).0, 200);
    }

    #[test]
    fn test_error_statuses() {
        assert_eq!(route("POST", "/corporate/unknown", Some(INCOME), false).0, 404);
        assert_eq!(route("GET", "/corporate/income-projection", None, false).0, 405);
        assert_eq!(route("POST", "/corporate/income-projection", None, false).0, 400);
        assert_eq!(route("POST", "/corporate/income-projection", Some(INCOME), true).0, 400);

        let zero_years = INCOME.replace("\"years\": 3", "\"years\": 0");
        assert_eq!(route("POST", "/corporate/income-projection", Some(&zero_years), false).0, 422);
    }
}
