//! Pack Sizes

mod errors;
mod handlers;

pub(crate) use handlers::*;
