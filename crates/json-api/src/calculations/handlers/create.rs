//! Create Calculation Handler

use std::time::Instant;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use packopt::calculation::Calculation;
use packopt_app::domain::calculations::models::CalculationRequest;

use crate::{
    calculations::{
        PackCounts,
        errors::{into_status_error, outcome},
    },
    extensions::*,
    observability::{CalculationOutcome, observe_calculation},
};

/// Calculate Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CalculateRequest {
    /// Number of items ordered
    pub amount: i64,

    /// Pack sizes to use instead of the configured ones
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sizes: Option<Vec<i64>>,
}

impl From<CalculateRequest> for CalculationRequest {
    fn from(request: CalculateRequest) -> Self {
        CalculationRequest {
            amount: request.amount,
            sizes: request.sizes,
        }
    }
}

/// Calculation Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CalculationResponse {
    /// Number of items ordered
    pub amount: i64,

    /// Items shipped across all packs
    pub total_items: u64,

    /// Number of packs shipped
    pub total_packs: u64,

    /// Items shipped beyond the amount ordered
    pub overage: u64,

    /// Pack count per size, largest size first
    #[salvo(schema(value_type = Object))]
    pub breakdown: PackCounts,
}

impl From<Calculation> for CalculationResponse {
    fn from(calculation: Calculation) -> Self {
        Self {
            amount: calculation.amount,
            total_items: calculation.total_items,
            total_packs: calculation.total_packs,
            overage: calculation.overage,
            breakdown: PackCounts::from(&calculation.breakdown),
        }
    }
}

/// Create Calculation Handler
///
/// Finds the packs that ship the fewest items covering the amount, then the
/// fewest packs among those. Sizes default to the configured set.
#[endpoint(
    tags("calculations"),
    summary = "Calculate Packs",
    responses(
        (status_code = StatusCode::OK, description = "Pack breakdown"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Calculation timed out"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "calculations.create",
    skip(json, depot),
    fields(
        amount = tracing::field::Empty,
        custom_sizes = tracing::field::Empty,
        total_items = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CalculateRequest>,
    depot: &mut Depot,
) -> Result<Json<CalculationResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let request = CalculationRequest::from(json.into_inner());

    let span = tracing::Span::current();

    span.record("amount", request.amount);
    span.record("custom_sizes", request.custom_sizes().is_some());

    let started = Instant::now();

    let calculation = match state.app.calculations.calculate(request).await {
        Ok(calculation) => calculation,
        Err(error) => {
            observe_calculation(outcome(&error), None);

            return Err(into_status_error(error));
        }
    };

    observe_calculation(
        CalculationOutcome::Solved,
        Some(started.elapsed().as_secs_f64()),
    );

    span.record("total_items", calculation.total_items);

    Ok(Json(calculation.into()))
}
