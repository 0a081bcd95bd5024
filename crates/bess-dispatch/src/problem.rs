//! Dispatch problem data structures
//!
//! Defines the validated input for a battery arbitrage dispatch run: one
//! price series and one battery specification. The builder is the single
//! place infeasibility is caught before any solver work happens.

use bess_core::{BatterySpecification, BessError, BessResult, PriceSeries};

/// A validated (price series, battery) pair ready for the solver.
///
/// Construction goes through [`DispatchProblemBuilder`], which rejects
/// specifications that cannot possibly yield a feasible schedule; solver
/// code may therefore assume the inputs are internally consistent.
#[derive(Debug, Clone)]
pub struct DispatchProblem {
    pub prices: PriceSeries,
    pub battery: BatterySpecification,
}

impl DispatchProblem {
    /// Number of steps T in the horizon.
    pub fn num_steps(&self) -> usize {
        self.prices.len()
    }

    /// Step duration Δt in hours.
    pub fn step_hours(&self) -> f64 {
        self.prices.step_hours()
    }

    /// True when the formulation needs mutual-exclusion binaries: with any
    /// negative price, simultaneous charge+discharge becomes profitable in
    /// the pure LP (the battery would be paid to burn energy in its own
    /// losses), so it must be forbidden explicitly.
    pub fn needs_mutual_exclusion_binaries(&self) -> bool {
        self.prices.has_negative_prices()
    }
}

/// Builder for [`DispatchProblem`] with feasibility validation.
#[derive(Debug, Clone)]
pub struct DispatchProblemBuilder {
    prices: PriceSeries,
    battery: BatterySpecification,
}

impl DispatchProblemBuilder {
    pub fn new(prices: PriceSeries, battery: BatterySpecification) -> Self {
        Self { prices, battery }
    }

    /// Validate and build.
    ///
    /// Malformed physical/financial fields are reported as
    /// [`BessError::InvalidParameter`]; state-of-charge bounds and an
    /// unreachable terminal target are [`BessError::InfeasibleSpecification`],
    /// naming the constraint class that cannot be met.
    pub fn build(self) -> BessResult<DispatchProblem> {
        // Validate everything except the SoC fields first so that range
        // errors below are classified as infeasibility, not bad parameters.
        let mut physical_only = self.battery.clone();
        physical_only.initial_soc_mwh = 0.0;
        physical_only.final_soc_target_mwh = None;
        physical_only.validate()?;

        let battery = &self.battery;
        if !(0.0..=battery.capacity_mwh).contains(&battery.initial_soc_mwh) {
            return Err(BessError::InfeasibleSpecification(format!(
                "state-of-charge bounds: initial SoC {} MWh outside [0, {}]",
                battery.initial_soc_mwh, battery.capacity_mwh
            )));
        }

        if let Some(target) = battery.final_soc_target_mwh {
            if !(0.0..=battery.capacity_mwh).contains(&target) {
                return Err(BessError::InfeasibleSpecification(format!(
                    "terminal condition: target SoC {} MWh outside [0, {}]",
                    target, battery.capacity_mwh
                )));
            }

            // The most charge the asset can add over the whole horizon.
            let horizon_hours = self.prices.len() as f64 * self.prices.step_hours();
            let max_reachable_mwh = battery.initial_soc_mwh
                + horizon_hours * battery.power_mw * battery.charge_efficiency;
            if target > max_reachable_mwh + 1e-9 {
                return Err(BessError::InfeasibleSpecification(format!(
                    "terminal condition: target SoC {target} MWh unreachable; at most \
                     {max_reachable_mwh:.3} MWh can be stored in {horizon_hours} h at \
                     {} MW",
                    battery.power_mw
                )));
            }
        }

        Ok(DispatchProblem {
            prices: self.prices,
            battery: self.battery,
        })
    }
}
