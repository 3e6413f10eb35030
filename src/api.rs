use crate::domain;
use crate::routing_utils::DomainErrorResponse;
use axum::response::ErrorResponse;
use tracing::{error, info};

pub mod assignment;
pub mod category;
pub mod swagger_main;
pub mod todo;

#[cfg(test)]
pub mod test_util;

/// Logs a failed domain operation and converts it into an API error. Only store failures
/// are logged at the error level.
fn report_failure(err: domain::Error, operation: &str) -> ErrorResponse {
    match err {
        domain::Error::RetrieveFailure { .. } => error!("Failed to {operation}: {err}"),
        _ => info!("Could not {operation}: {err}"),
    }

    DomainErrorResponse(err).into()
}
