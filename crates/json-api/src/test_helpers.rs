//! Test helpers.

use std::sync::Arc;

use salvo::{affix_state::inject, prelude::*};

use packopt_app::{
    context::AppContext,
    domain::{
        calculations::{MockCalculationsService, models::CalculationLimits},
        packs::MockPackSizesService,
    },
};

use crate::state::State;

fn strict_packs_mock() -> MockPackSizesService {
    let mut packs = MockPackSizesService::new();

    packs.expect_active_sizes().never();
    packs.expect_replace_sizes().never();
    packs.expect_remove_size().never();
    packs.expect_current_version().never();

    packs
}

fn strict_calculations_mock() -> MockCalculationsService {
    let mut calculations = MockCalculationsService::new();

    calculations.expect_calculate().never();

    calculations
}

pub(crate) fn state_with(
    packs: MockPackSizesService,
    calculations: MockCalculationsService,
) -> Arc<State> {
    State::shared(
        AppContext {
            packs: Arc::new(packs),
            calculations: Arc::new(calculations),
        },
        CalculationLimits::default(),
    )
}

pub(crate) fn packs_service(packs: MockPackSizesService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with(packs, strict_calculations_mock())))
            .push(route),
    )
}

pub(crate) fn calculations_service(
    calculations: MockCalculationsService,
    route: Router,
) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with(strict_packs_mock(), calculations)))
            .push(route),
    )
}
