//! HTTP surface for the projection engines
//!
//! `Endpoint::respond` parses a raw body, runs the computation and maps
//! errors. `routes()` serves it with warp; the Lambda binary calls it directly.

pub mod error;
pub mod handlers;
pub mod routes;

pub use error::ApiError;
pub use routes::routes;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::analysis::analyze_financial_health;
use crate::projection::{project_cash_flow, project_income};

/// The POST endpoints backed by the projection engines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    IncomeProjection,
    CashFlowProjection,
    FinancialHealth,
}

impl Endpoint {
    /// Resolve a request path, tolerating a trailing slash
    pub fn from_path(path: &str) -> Option<Self> {
        match path.trim_end_matches('/') {
            "/corporate/income-projection" | "/corporate/pyg-projection" => {
                Some(Endpoint::IncomeProjection)
            }
            "/corporate/cash-flow-projection" => Some(Endpoint::CashFlowProjection),
            "/corporate/financial-health" => Some(Endpoint::FinancialHealth),
            _ => None,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::IncomeProjection => "/corporate/income-projection",
            Endpoint::CashFlowProjection => "/corporate/cash-flow-projection",
            Endpoint::FinancialHealth => "/corporate/financial-health",
        }
    }

    /// Parse the JSON body, run the matching computation and serialize the result
    pub fn respond(&self, body: &str) -> Result<Value, ApiError> {
        match self {
            Endpoint::IncomeProjection => to_json(project_income(&parse(body)?)?),
            Endpoint::CashFlowProjection => to_json(project_cash_flow(&parse(body)?)?),
            Endpoint::FinancialHealth => to_json(analyze_financial_health(&parse(body)?)?),
        }
    }
}

fn parse<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::bad_request(format!("Invalid JSON: {}", e)))
}

fn to_json<T: Serialize>(value: T) -> Result<Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::internal(e.to_string()))
}
