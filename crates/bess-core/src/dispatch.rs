//! Dispatch schedules and solver results
//!
//! A [`DispatchSchedule`] is produced atomically by the solver adapter, one
//! [`DispatchDecision`] per step; no partial schedule is ever exposed. The
//! [`SolverResult`] wrapping it is terminal: consumed by the reporter or
//! discarded on failure, never mutated.

use serde::{Deserialize, Serialize};

/// Charge/discharge decision for a single time step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DispatchDecision {
    /// Ordinal step index
    pub step: usize,
    /// Power drawn from the grid (MW), >= 0
    pub charge_mw: f64,
    /// Power delivered to the grid (MW), >= 0
    pub discharge_mw: f64,
    /// Stored energy at the end of the step (MWh)
    pub soc_mwh: f64,
}

/// The full time series of dispatch decisions for one solved horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchSchedule {
    pub decisions: Vec<DispatchDecision>,
    /// Step duration Δt in hours
    pub step_hours: f64,
}

impl DispatchSchedule {
    pub fn len(&self) -> usize {
        self.decisions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decisions.is_empty()
    }

    /// Total energy drawn from the grid (MWh).
    pub fn total_charge_mwh(&self) -> f64 {
        self.decisions
            .iter()
            .map(|d| d.charge_mw * self.step_hours)
            .sum()
    }

    /// Total energy delivered to the grid (MWh).
    pub fn total_discharge_mwh(&self) -> f64 {
        self.decisions
            .iter()
            .map(|d| d.discharge_mw * self.step_hours)
            .sum()
    }

    /// Total cycled energy, charge plus discharge (MWh). This is the base
    /// the hurdle rate is charged against.
    pub fn total_throughput_mwh(&self) -> f64 {
        self.total_charge_mwh() + self.total_discharge_mwh()
    }

    /// Equivalent full cycles: discharged energy over capacity.
    pub fn equivalent_cycles(&self, capacity_mwh: f64) -> f64 {
        if capacity_mwh <= 0.0 {
            return 0.0;
        }
        self.total_discharge_mwh() / capacity_mwh
    }
}

/// Classified outcome of one solver invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolverStatus {
    /// Proven optimal solution
    Optimal,
    /// Constraints cannot be satisfied
    Infeasible,
    /// Objective can grow without bound (a modelling bug, not a market state)
    Unbounded,
    /// Time limit hit; a feasible incumbent may still be attached
    TimedOut,
}

impl SolverStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SolverStatus::Optimal => "optimal",
            SolverStatus::Infeasible => "infeasible",
            SolverStatus::Unbounded => "unbounded",
            SolverStatus::TimedOut => "timed-out",
        }
    }
}

/// Terminal result of a solve: status, objective, and the schedule when one
/// exists (`Optimal`, or `TimedOut` with a feasible incumbent).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverResult {
    pub status: SolverStatus,
    /// Objective value in $ (net of hurdle cost); present when a schedule is
    pub objective: Option<f64>,
    pub schedule: Option<DispatchSchedule>,
    /// Wall-clock time spent in the solver
    pub solve_time: std::time::Duration,
}

impl SolverResult {
    /// True when the result carries a usable schedule.
    pub fn has_schedule(&self) -> bool {
        self.schedule.is_some()
            && matches!(self.status, SolverStatus::Optimal | SolverStatus::TimedOut)
    }
}
