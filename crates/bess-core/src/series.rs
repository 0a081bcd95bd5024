//! Market price series
//!
//! A [`PriceSeries`] is the immutable, time-indexed input to the dispatch
//! optimizer: one price per step in $/MWh at a uniform step duration.
//! Negative prices are legal (some markets clear below zero); it is the
//! model builder's job to handle them, not the series' job to reject them.

use crate::error::{BessError, BessResult};
use serde::{Deserialize, Serialize};

/// Ordered sequence of market prices at a uniform time resolution.
///
/// Immutable once built; the constructor is the only place validation
/// happens, so downstream code can rely on a non-empty, finite series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    prices: Vec<f64>,
    step_hours: f64,
}

impl PriceSeries {
    /// Build a price series from raw values ($/MWh) and a step duration (hours).
    pub fn new(prices: Vec<f64>, step_hours: f64) -> BessResult<Self> {
        if prices.is_empty() {
            return Err(BessError::InvalidParameter(
                "price series must contain at least one step".into(),
            ));
        }
        if !step_hours.is_finite() || step_hours <= 0.0 {
            return Err(BessError::InvalidParameter(format!(
                "step duration must be positive, got {step_hours}"
            )));
        }
        if let Some((t, value)) = prices
            .iter()
            .enumerate()
            .find(|(_, value)| !value.is_finite())
        {
            return Err(BessError::InvalidParameter(format!(
                "price at step {t} is not finite ({value})"
            )));
        }
        Ok(Self { prices, step_hours })
    }

    /// Hourly series, the common market resolution.
    pub fn hourly(prices: Vec<f64>) -> BessResult<Self> {
        Self::new(prices, 1.0)
    }

    /// Number of steps T.
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Step duration Δt in hours.
    pub fn step_hours(&self) -> f64 {
        self.step_hours
    }

    /// Price at step `t` ($/MWh).
    pub fn price(&self, t: usize) -> f64 {
        self.prices[t]
    }

    /// All prices in step order.
    pub fn prices(&self) -> &[f64] {
        &self.prices
    }

    /// True if any step clears below zero. Drives the MILP/LP choice in the
    /// model builder: with non-negative prices the mutual-exclusion binaries
    /// are redundant.
    pub fn has_negative_prices(&self) -> bool {
        self.prices.iter().any(|p| *p < 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_series() {
        assert!(matches!(
            PriceSeries::hourly(vec![]),
            Err(BessError::InvalidParameter(_))
        ));
    }

    #[test]
    fn rejects_non_positive_step() {
        assert!(PriceSeries::new(vec![50.0], 0.0).is_err());
        assert!(PriceSeries::new(vec![50.0], -1.0).is_err());
    }

    #[test]
    fn rejects_non_finite_prices() {
        assert!(PriceSeries::hourly(vec![50.0, f64::NAN]).is_err());
        assert!(PriceSeries::hourly(vec![f64::INFINITY]).is_err());
    }

    #[test]
    fn flags_negative_prices() {
        let series = PriceSeries::hourly(vec![50.0, -12.0, 80.0]).unwrap();
        assert!(series.has_negative_prices());
        assert_eq!(series.len(), 3);
        assert_eq!(series.price(1), -12.0);
    }
}
