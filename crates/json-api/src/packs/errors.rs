//! Pack Size Errors

use salvo::http::StatusError;
use tracing::error;

use packopt_app::domain::packs::PackSizesServiceError;

pub(crate) fn into_status_error(error: PackSizesServiceError) -> StatusError {
    match error {
        PackSizesServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid pack sizes")
        }
        PackSizesServiceError::Sql(source) => {
            error!("pack size storage failed: {source}");

            StatusError::internal_server_error().brief("Failed to access pack sizes")
        }
    }
}
