//! State

use std::sync::Arc;

use packopt_app::{context::AppContext, domain::calculations::models::CalculationLimits};

#[derive(Debug, Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
    pub(crate) limits: CalculationLimits,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext, limits: CalculationLimits) -> Self {
        Self { app, limits }
    }

    #[must_use]
    pub(crate) fn shared(app: AppContext, limits: CalculationLimits) -> Arc<Self> {
        Arc::new(Self::new(app, limits))
    }
}
