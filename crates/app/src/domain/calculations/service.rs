//! Calculations service.

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::{Duration, Instant},
};

use async_trait::async_trait;
use mockall::automock;
use packopt::calculation::Calculation;
use tracing::{debug_span, warn};

use crate::domain::{
    cache::{Cache, keys},
    calculations::{
        errors::CalculationsServiceError,
        models::{CalculationLimits, CalculationRequest},
    },
    packs::PackSizesService,
};

/// Validates requests, resolves pack sizes and runs the solver off the async runtime.
#[derive(Clone)]
pub struct PackCalculationsService {
    packs: Arc<dyn PackSizesService>,
    cache: Arc<dyn Cache>,
    limits: CalculationLimits,
    cache_ttl: Duration,
}

impl std::fmt::Debug for PackCalculationsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PackCalculationsService")
            .field("limits", &self.limits)
            .field("cache_ttl", &self.cache_ttl)
            .finish_non_exhaustive()
    }
}

impl PackCalculationsService {
    #[must_use]
    pub fn new(
        packs: Arc<dyn PackSizesService>,
        cache: Arc<dyn Cache>,
        limits: CalculationLimits,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            packs,
            cache,
            limits,
            cache_ttl,
        }
    }

    fn validate_amount(&self, amount: i64) -> Result<(), CalculationsServiceError> {
        if amount <= 0 {
            return Err(CalculationsServiceError::NonPositiveAmount);
        }

        if amount > self.limits.max_amount {
            return Err(CalculationsServiceError::AmountTooLarge {
                max: self.limits.max_amount,
            });
        }

        Ok(())
    }

    fn validate_sizes(&self, sizes: &[i64]) -> Result<(), CalculationsServiceError> {
        let max = self.limits.max_pack_size;

        match sizes.iter().find(|&&size| size <= 0 || size > max) {
            Some(&size) => Err(CalculationsServiceError::InvalidPackSize { size, max }),
            None => Ok(()),
        }
    }

    async fn cached(&self, key: &str) -> Option<Calculation> {
        let bytes = match self.cache.get(key).await {
            Ok(bytes) => bytes?,
            Err(error) => {
                warn!(%key, error = %error, "calculation cache read failed");

                return None;
            }
        };

        serde_json::from_slice(&bytes)
            .inspect_err(|error| warn!(%key, error = %error, "discarding undecodable calculation"))
            .ok()
    }

    async fn store(&self, key: &str, calculation: &Calculation) {
        let bytes = match serde_json::to_vec(calculation) {
            Ok(bytes) => bytes,
            Err(error) => {
                warn!(%key, error = %error, "failed to encode calculation for cache");

                return;
            }
        };

        if let Err(error) = self.cache.set(key, bytes, self.cache_ttl).await {
            warn!(%key, error = %error, "calculation cache write failed");
        }
    }

    /// Run the solver on the blocking pool, abandoning it once the timeout elapses.
    async fn solve(
        &self,
        amount: i64,
        sizes: Vec<i64>,
    ) -> Result<Calculation, CalculationsServiceError> {
        let interrupt = Arc::new(AtomicBool::new(false));

        let span = debug_span!(
            "packs.engine.solve",
            amount,
            sizes = sizes.len(),
            total_items = tracing::field::Empty,
            elapsed_us = tracing::field::Empty,
        );

        let worker = {
            let interrupt = Arc::clone(&interrupt);

            tokio::task::spawn_blocking(move || {
                let _entered = span.enter();
                let started = Instant::now();

                let result = Calculation::solve_with(amount, &sizes, &interrupt);

                span.record(
                    "elapsed_us",
                    u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX),
                );

                if let Ok(calculation) = &result {
                    span.record("total_items", calculation.total_items);
                }

                result
            })
        };

        if let Ok(joined) = tokio::time::timeout(self.limits.timeout, worker).await {
            Ok(joined??)
        } else {
            interrupt.store(true, Ordering::Relaxed);

            warn!(
                amount,
                timeout_ms = u64::try_from(self.limits.timeout.as_millis()).unwrap_or(u64::MAX),
                "calculation timed out"
            );

            Err(CalculationsServiceError::TimedOut)
        }
    }
}

#[async_trait]
impl CalculationsService for PackCalculationsService {
    #[tracing::instrument(
        name = "calculations.service.calculate",
        skip(self, request),
        fields(amount = request.amount, custom_sizes = request.custom_sizes().is_some()),
        err
    )]
    async fn calculate(
        &self,
        request: CalculationRequest,
    ) -> Result<Calculation, CalculationsServiceError> {
        self.validate_amount(request.amount)?;

        if let Some(sizes) = request.custom_sizes() {
            self.validate_sizes(sizes)?;

            return self.solve(request.amount, sizes.to_vec()).await;
        }

        let version = self.packs.current_version().await?;

        if let Some(calculation) = self
            .cached(&keys::calculation(version, request.amount))
            .await
        {
            return Ok(calculation);
        }

        let current = self.packs.versioned_sizes().await?;

        if current.sizes.is_empty() {
            return Err(CalculationsServiceError::NoPackSizes);
        }

        let sizes: Vec<i64> = current.sizes.into_iter().map(i64::from).collect();

        let calculation = self.solve(request.amount, sizes).await?;

        self.store(&keys::calculation(current.version, request.amount), &calculation)
            .await;

        Ok(calculation)
    }
}

#[automock]
#[async_trait]
/// Order packing.
pub trait CalculationsService: Send + Sync {
    /// Validate `request` and find its optimal packing.
    async fn calculate(
        &self,
        request: CalculationRequest,
    ) -> Result<Calculation, CalculationsServiceError>;
}
