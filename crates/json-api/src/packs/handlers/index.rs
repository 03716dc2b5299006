//! Pack Sizes Index Handler

use salvo::prelude::*;

use crate::{
    extensions::*,
    packs::{PackSizesResponse, errors::into_status_error},
};

/// Pack Sizes Index Handler
///
/// Returns the active pack sizes.
#[endpoint(
    tags("packs"),
    summary = "List Pack Sizes",
    responses(
        (status_code = StatusCode::OK, description = "Active pack sizes"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<PackSizesResponse>, StatusError> {
    let state = depot.state_or_500()?;

    let sizes = state
        .app
        .packs
        .active_sizes()
        .await
        .map_err(into_status_error)?;

    Ok(Json(sizes.into()))
}
