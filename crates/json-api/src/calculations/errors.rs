//! Calculation Errors

use salvo::http::StatusError;
use tracing::error;

use packopt_app::domain::calculations::CalculationsServiceError;

use crate::observability::CalculationOutcome;

pub(crate) fn outcome(error: &CalculationsServiceError) -> CalculationOutcome {
    if error.is_invalid_request() {
        CalculationOutcome::Rejected
    } else if matches!(error, CalculationsServiceError::TimedOut) {
        CalculationOutcome::TimedOut
    } else {
        CalculationOutcome::Failed
    }
}

pub(crate) fn into_status_error(error: CalculationsServiceError) -> StatusError {
    if error.is_invalid_request() {
        return StatusError::bad_request().brief(error.to_string());
    }

    match error {
        CalculationsServiceError::TimedOut => {
            StatusError::service_unavailable().brief("Calculation timed out")
        }
        error => {
            error!(error = ?error, "calculation failed");

            StatusError::internal_server_error().brief("Calculation failed")
        }
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn validation_errors_map_to_400() {
        for error in [
            CalculationsServiceError::NonPositiveAmount,
            CalculationsServiceError::AmountTooLarge { max: 1_000_000 },
            CalculationsServiceError::InvalidPackSize { size: 0, max: 10_000 },
            CalculationsServiceError::NoPackSizes,
        ] {
            assert_eq!(outcome(&error), CalculationOutcome::Rejected);
            assert_eq!(into_status_error(error).code, StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn timeouts_map_to_503() {
        let error = CalculationsServiceError::TimedOut;

        assert_eq!(outcome(&error), CalculationOutcome::TimedOut);
        assert_eq!(into_status_error(error).code, StatusCode::SERVICE_UNAVAILABLE);
    }
}
