//! Replace Pack Sizes Handler

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    packs::{PackSizesResponse, errors::into_status_error},
};

/// Replace Pack Sizes Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdatePackSizesRequest {
    /// New pack sizes; duplicates are collapsed and order is ignored
    pub sizes: Vec<i64>,
}

/// Replace Pack Sizes Handler
///
/// Stores a new set of pack sizes. An empty list is accepted.
#[endpoint(
    tags("packs"),
    summary = "Replace Pack Sizes",
    responses(
        (status_code = StatusCode::OK, description = "Pack sizes replaced"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "packs.update",
    skip(json, depot),
    fields(sizes_count = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<UpdatePackSizesRequest>,
    depot: &mut Depot,
) -> Result<Json<PackSizesResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let request = json.into_inner();

    tracing::Span::current().record("sizes_count", request.sizes.len());

    let max = state.limits.max_pack_size;

    let sizes = request
        .sizes
        .into_iter()
        .enumerate()
        .map(|(index, size)| {
            u32::try_from(size)
                .ok()
                .filter(|size| (1..=max).contains(&i64::from(*size)))
                .ok_or_else(|| {
                    StatusError::bad_request().brief(format!(
                        "sizes[{index}]: pack size {size} must be between 1 and {max}"
                    ))
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let sizes = state
        .app
        .packs
        .replace_sizes(sizes)
        .await
        .map_err(into_status_error)?;

    tracing::info!(?sizes, "replaced pack sizes");

    Ok(Json(sizes.into()))
}
