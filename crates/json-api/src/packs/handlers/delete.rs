//! Remove Pack Size Handler

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    extensions::*,
    packs::{PackSizesResponse, errors::into_status_error},
};

/// Remove Pack Size Handler
///
/// Removes one size from the active set. Removing a size that is not
/// configured returns the current sizes unchanged.
#[endpoint(
    tags("packs"),
    summary = "Remove Pack Size",
    responses(
        (status_code = StatusCode::OK, description = "Remaining pack sizes"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "packs.delete", skip(size, depot), fields(size = tracing::field::Empty), err)]
pub(crate) async fn handler(
    size: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<PackSizesResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let size = size.into_inner();

    tracing::Span::current().record("size", size);

    let size = u32::try_from(size)
        .ok()
        .filter(|size| *size > 0)
        .ok_or_else(|| StatusError::bad_request().brief("size must be a positive integer"))?;

    let sizes = state
        .app
        .packs
        .remove_size(size)
        .await
        .map_err(into_status_error)?;

    Ok(Json(sizes.into()))
}
