//! Revenue/equity curve records
//!
//! Per-step cash flows are reported gross and net so a caller can audit
//! market revenue against degradation cost separately. The cumulative column
//! is a plain prefix sum of `gross - degradation`; there is no hidden
//! adjustment, so the curve is reproducible from the per-step fields.

use serde::{Deserialize, Serialize};

/// Cash flow for a single step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RevenuePoint {
    pub step: usize,
    /// price * (discharge - charge) * Δt, in $
    pub gross_cash_flow: f64,
    /// hurdle rate * (charge + discharge) * Δt, in $
    pub degradation_cost: f64,
    /// Running sum of (gross - degradation), in $
    pub cumulative_net: f64,
}

/// Equity curve over the full horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueCurve {
    pub points: Vec<RevenuePoint>,
}

impl RevenueCurve {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Net profit over the horizon (final cumulative value).
    pub fn net_profit(&self) -> f64 {
        self.points.last().map(|p| p.cumulative_net).unwrap_or(0.0)
    }

    /// Sum of per-step market cash flows, before degradation cost.
    pub fn gross_revenue(&self) -> f64 {
        self.points.iter().map(|p| p.gross_cash_flow).sum()
    }

    /// Total degradation cost charged over the horizon.
    pub fn total_degradation_cost(&self) -> f64 {
        self.points.iter().map(|p| p.degradation_cost).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curve_aggregates() {
        let curve = RevenueCurve {
            points: vec![
                RevenuePoint {
                    step: 0,
                    gross_cash_flow: -100.0,
                    degradation_cost: 10.0,
                    cumulative_net: -110.0,
                },
                RevenuePoint {
                    step: 1,
                    gross_cash_flow: 1000.0,
                    degradation_cost: 10.0,
                    cumulative_net: 880.0,
                },
            ],
        };
        assert_eq!(curve.net_profit(), 880.0);
        assert_eq!(curve.gross_revenue(), 900.0);
        assert_eq!(curve.total_degradation_cost(), 20.0);
    }

    #[test]
    fn empty_curve_is_zero() {
        let curve = RevenueCurve { points: vec![] };
        assert_eq!(curve.net_profit(), 0.0);
    }
}
