//! Schedule & revenue reporting
//!
//! Turns a usable [`SolverResult`] into the dispatch schedule and its equity
//! curve. Gross market cash flow and degradation cost are kept as separate
//! columns so gross vs net-of-degradation revenue can be audited; the
//! cumulative column is a plain prefix sum with no hidden adjustment.

use bess_core::{
    BatterySpecification, BessError, BessResult, DispatchSchedule, PriceSeries, RevenueCurve,
    RevenuePoint, SolverResult,
};

/// Build the per-step revenue curve for a solved schedule.
///
/// Fails with [`BessError::NoSchedule`] when the result carries no usable
/// schedule (infeasible, unbounded, or timed out without an incumbent).
pub fn report(
    result: &SolverResult,
    prices: &PriceSeries,
    battery: &BatterySpecification,
) -> BessResult<(DispatchSchedule, RevenueCurve)> {
    let schedule = match &result.schedule {
        Some(schedule) if result.has_schedule() => schedule.clone(),
        _ => {
            return Err(BessError::NoSchedule(format!(
                "solver finished with status '{}' and no incumbent schedule",
                result.status.as_str()
            )))
        }
    };

    if schedule.len() != prices.len() {
        return Err(BessError::NoSchedule(format!(
            "schedule has {} steps but price series has {}",
            schedule.len(),
            prices.len()
        )));
    }

    let dt = schedule.step_hours;
    let mut cumulative = 0.0;
    let points = schedule
        .decisions
        .iter()
        .map(|d| {
            let price = prices.price(d.step);
            let gross_cash_flow = price * (d.discharge_mw - d.charge_mw) * dt;
            let degradation_cost =
                battery.hurdle_rate_per_mwh * (d.charge_mw + d.discharge_mw) * dt;
            cumulative += gross_cash_flow - degradation_cost;
            RevenuePoint {
                step: d.step,
                gross_cash_flow,
                degradation_cost,
                cumulative_net: cumulative,
            }
        })
        .collect();

    Ok((schedule, RevenueCurve { points }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bess_core::{DispatchDecision, SolverStatus};
    use std::time::Duration;

    fn two_step_result() -> (SolverResult, PriceSeries, BatterySpecification) {
        let prices = PriceSeries::hourly(vec![10.0, 100.0]).unwrap();
        let battery = BatterySpecification::new(10.0, 10.0)
            .with_round_trip_efficiency(1.0)
            .with_hurdle_rate(1.0);
        let schedule = DispatchSchedule {
            decisions: vec![
                DispatchDecision {
                    step: 0,
                    charge_mw: 10.0,
                    discharge_mw: 0.0,
                    soc_mwh: 10.0,
                },
                DispatchDecision {
                    step: 1,
                    charge_mw: 0.0,
                    discharge_mw: 10.0,
                    soc_mwh: 0.0,
                },
            ],
            step_hours: 1.0,
        };
        let result = SolverResult {
            status: SolverStatus::Optimal,
            objective: Some(880.0),
            schedule: Some(schedule),
            solve_time: Duration::ZERO,
        };
        (result, prices, battery)
    }

    #[test]
    fn revenue_splits_gross_and_degradation() {
        let (result, prices, battery) = two_step_result();
        let (_, curve) = report(&result, &prices, &battery).unwrap();

        assert_eq!(curve.len(), 2);
        assert_eq!(curve.points[0].gross_cash_flow, -100.0);
        assert_eq!(curve.points[0].degradation_cost, 10.0);
        assert_eq!(curve.points[1].gross_cash_flow, 1000.0);
        assert_eq!(curve.points[1].degradation_cost, 10.0);
        assert_eq!(curve.net_profit(), 880.0);
        // The final cumulative value reconciles with the solver objective.
        assert!((curve.net_profit() - result.objective.unwrap()).abs() < 1e-9);
    }

    #[test]
    fn cumulative_is_a_plain_prefix_sum() {
        let (result, prices, battery) = two_step_result();
        let (_, curve) = report(&result, &prices, &battery).unwrap();

        let mut running = 0.0;
        for point in &curve.points {
            running += point.gross_cash_flow - point.degradation_cost;
            assert!((point.cumulative_net - running).abs() < 1e-12);
        }
    }

    #[test]
    fn refuses_results_without_a_schedule() {
        let (mut result, prices, battery) = two_step_result();
        result.status = SolverStatus::Infeasible;
        result.schedule = None;
        let err = report(&result, &prices, &battery).unwrap_err();
        assert!(matches!(err, BessError::NoSchedule(_)));
    }
}
