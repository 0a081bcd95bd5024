//! Dispatch MILP solver adapter
//!
//! Builds the arbitrage optimization model from a [`DispatchProblem`] and
//! runs it on a `good_lp` backend, classifying the outcome into exactly one
//! [`SolverStatus`]. Each call owns its variables, constraints and model;
//! there is no solver-global state, so independent problems can be solved
//! concurrently.

use crate::problem::DispatchProblem;
use crate::solution::{extract_schedule, objective_of};
use bess_core::{BessError, BessResult, SolverResult, SolverStatus};
#[cfg(feature = "solver-clarabel")]
use good_lp::solvers::clarabel::clarabel;
#[cfg(feature = "solver-highs")]
use good_lp::solvers::highs::highs;
#[cfg(feature = "solver-highs")]
use good_lp::WithMipGap;
use good_lp::{constraint, variable, variables, Constraint, Expression, Variable};
use good_lp::{ResolutionError, Solution, SolverModel};
use std::str::FromStr;
use std::time::Instant;

/// Available LP/MILP backends.
///
/// Clarabel (pure Rust, the default) solves the continuous model exactly;
/// when mutual-exclusion binaries are required (negative prices) it only
/// solves their [0,1] relaxation, and relaxed assignments that actually mix
/// charge and discharge are rejected rather than returned as optimal. The
/// `solver-highs` feature adds HiGHS for exact mixed-integer solves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchBackend {
    #[cfg(feature = "solver-clarabel")]
    Clarabel,
    #[cfg(feature = "solver-highs")]
    Highs,
}

#[cfg(not(any(feature = "solver-clarabel", feature = "solver-highs")))]
compile_error!("enable at least one solver backend feature: solver-clarabel or solver-highs");

impl Default for DispatchBackend {
    fn default() -> Self {
        #[cfg(feature = "solver-clarabel")]
        return DispatchBackend::Clarabel;
        #[cfg(all(not(feature = "solver-clarabel"), feature = "solver-highs"))]
        DispatchBackend::Highs
    }
}

const AVAILABLE_BACKENDS: &[&str] = &[
    #[cfg(feature = "solver-clarabel")]
    "clarabel",
    #[cfg(feature = "solver-highs")]
    "highs",
];

impl DispatchBackend {
    pub fn available() -> &'static [&'static str] {
        AVAILABLE_BACKENDS
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            #[cfg(feature = "solver-clarabel")]
            DispatchBackend::Clarabel => "clarabel",
            #[cfg(feature = "solver-highs")]
            DispatchBackend::Highs => "highs",
        }
    }

    /// True when the backend honors integrality of binary variables.
    pub fn solves_binaries_exactly(&self) -> bool {
        match self {
            #[cfg(feature = "solver-clarabel")]
            DispatchBackend::Clarabel => false,
            #[cfg(feature = "solver-highs")]
            DispatchBackend::Highs => true,
        }
    }
}

fn unknown_backend_error(label: &str) -> BessError {
    BessError::InvalidParameter(format!(
        "unknown solver backend '{}'; supported values: {}",
        label,
        DispatchBackend::available().join(", ")
    ))
}

impl FromStr for DispatchBackend {
    type Err = BessError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.to_ascii_lowercase();
        match normalized.as_str() {
            "clarabel" => {
                #[cfg(feature = "solver-clarabel")]
                {
                    Ok(DispatchBackend::Clarabel)
                }
                #[cfg(not(feature = "solver-clarabel"))]
                {
                    Err(unknown_backend_error(&normalized))
                }
            }
            "highs" => {
                #[cfg(feature = "solver-highs")]
                {
                    Ok(DispatchBackend::Highs)
                }
                #[cfg(not(feature = "solver-highs"))]
                {
                    Err(unknown_backend_error(&normalized))
                }
            }
            other => Err(unknown_backend_error(other)),
        }
    }
}

/// Dispatch solver configuration.
///
/// `max_time_seconds`, `mip_gap` and `verbose` are applied on the HiGHS
/// backend; good_lp's Clarabel bindings expose no equivalent options, so
/// Clarabel ignores all three. Where the backend does report a time-limit
/// outcome it is classified as [`SolverStatus::TimedOut`].
#[derive(Debug, Clone)]
pub struct DispatchSolverConfig {
    pub backend: DispatchBackend,
    /// Maximum solve time (seconds)
    pub max_time_seconds: f64,
    /// MIP relative optimality gap tolerance (exact-MILP backends only)
    pub mip_gap: f64,
    /// Whether to enable verbose solver output
    pub verbose: bool,
}

impl Default for DispatchSolverConfig {
    fn default() -> Self {
        Self {
            backend: DispatchBackend::default(),
            max_time_seconds: 300.0, // 5 minutes
            mip_gap: 0.01, // 1%
            verbose: false,
        }
    }
}

/// Solve the dispatch problem.
///
/// Decision variables per step t: `charge[t], discharge[t] ∈ [0, P]`,
/// `soc[t] ∈ [0, C]`, plus one mutual-exclusion variable `b[t]` when the
/// price series contains negative prices. With non-negative prices the
/// binaries are omitted entirely: any simultaneous charge+discharge is
/// dominated by a cheaper schedule with the same state-of-charge path, so
/// the continuous LP already has an exclusive optimum. This keeps the binary
/// count at most T and the model a pure LP in the common case.
///
/// When binaries are required but the backend only solves their relaxation,
/// the extracted schedule is checked for simultaneous charge+discharge and
/// such solutions are returned as a solver error instead of `Optimal`.
///
/// # Example
///
/// ```no_run
/// use bess_core::{BatterySpecification, PriceSeries};
/// use bess_dispatch::{solve_dispatch, DispatchProblemBuilder, DispatchSolverConfig};
///
/// let prices = PriceSeries::hourly(vec![10.0, 100.0])?;
/// let battery = BatterySpecification::new(10.0, 10.0);
/// let problem = DispatchProblemBuilder::new(prices, battery).build()?;
/// let result = solve_dispatch(&problem, &DispatchSolverConfig::default())?;
/// println!("{:?}", result.status);
/// # Ok::<(), bess_core::BessError>(())
/// ```
pub fn solve_dispatch(
    problem: &DispatchProblem,
    config: &DispatchSolverConfig,
) -> BessResult<SolverResult> {
    let start = Instant::now();

    let t_count = problem.num_steps();
    let dt = problem.step_hours();
    let battery = &problem.battery;

    let mut vars = variables!();

    let charge: Vec<Variable> = (0..t_count)
        .map(|_| vars.add(variable().min(0.0).max(battery.power_mw)))
        .collect();
    let discharge: Vec<Variable> = (0..t_count)
        .map(|_| vars.add(variable().min(0.0).max(battery.power_mw)))
        .collect();
    let soc: Vec<Variable> = (0..t_count)
        .map(|_| vars.add(variable().min(0.0).max(battery.capacity_mwh)))
        .collect();

    // Mutual-exclusion variables, only when negative prices make them
    // necessary. On a relaxation-only backend they stay continuous [0,1];
    // the extracted schedule is then checked and rejected if it mixes.
    let is_charging: Option<Vec<Variable>> = problem
        .needs_mutual_exclusion_binaries()
        .then(|| {
            (0..t_count)
                .map(|_| {
                    vars.add(if config.backend.solves_binaries_exactly() {
                        variable().binary()
                    } else {
                        variable().min(0.0).max(1.0)
                    })
                })
                .collect()
        });

    // === Objective (maximize) ===
    // Σ_t price[t]·(discharge − charge)·Δt − hurdle·(charge + discharge)·Δt
    let mut objective = Expression::from(0.0);
    for t in 0..t_count {
        let price = problem.prices.price(t);
        objective += (price * dt) * discharge[t];
        objective -= (price * dt) * charge[t];
        if battery.hurdle_rate_per_mwh > 0.0 {
            objective -= (battery.hurdle_rate_per_mwh * dt) * (charge[t] + discharge[t]);
        }
    }

    // === Constraints ===
    let mut constraints: Vec<Constraint> = Vec::with_capacity(3 * t_count + 1);

    // Energy balance: losses applied once entering storage, once leaving.
    let charge_gain = battery.charge_efficiency * dt;
    let discharge_drain = dt / battery.discharge_efficiency;
    constraints.push(constraint!(
        soc[0] - charge_gain * charge[0] + discharge_drain * discharge[0]
            == battery.initial_soc_mwh
    ));
    for t in 1..t_count {
        constraints.push(constraint!(
            soc[t] - soc[t - 1] - charge_gain * charge[t] + discharge_drain * discharge[t] == 0.0
        ));
    }

    // Power limits tied to the exclusion variable:
    // charge ≤ P·b, discharge ≤ P·(1−b). Plain variable bounds cover the
    // no-binary case.
    if let Some(b) = &is_charging {
        for t in 0..t_count {
            constraints.push(constraint!(charge[t] - battery.power_mw * b[t] <= 0.0));
            constraints.push(constraint!(
                discharge[t] + battery.power_mw * b[t] <= battery.power_mw
            ));
        }
    }

    // Terminal condition (optional): end at or above the target.
    if let Some(target) = battery.final_soc_target_mwh {
        constraints.push(constraint!(soc[t_count - 1] >= target));
    }

    // Whether a returned solution could violate mutual exclusion because
    // the binaries were only solved as their continuous relaxation.
    let binaries_relaxed = is_charging.is_some() && !config.backend.solves_binaries_exactly();

    // === Solve on the configured backend ===
    let result = match config.backend {
        #[cfg(feature = "solver-clarabel")]
        DispatchBackend::Clarabel => {
            let mut model = vars.maximise(objective).using(clarabel);
            for c in constraints {
                model = model.with(c);
            }
            classify(model.solve(), problem, &charge, &discharge, &soc, start)
        }
        #[cfg(feature = "solver-highs")]
        DispatchBackend::Highs => {
            let mut model = vars
                .maximise(objective)
                .using(highs)
                .set_verbose(config.verbose)
                .set_time_limit(config.max_time_seconds)
                .with_mip_gap(config.mip_gap as f32)
                .map_err(|err| BessError::InvalidParameter(format!("mip gap: {err}")))?;
            for c in constraints {
                model = model.with(c);
            }
            classify(model.solve(), problem, &charge, &discharge, &soc, start)
        }
    }?;

    if binaries_relaxed {
        reject_mixed_schedule(&result)?;
    }
    Ok(result)
}

/// Refuse relaxed solutions the optimizer steered into simultaneous
/// charge+discharge. With negative prices the [0,1] relaxation makes burning
/// energy in round-trip losses look profitable, so such an assignment is not
/// a dispatch schedule at all and must not be reported as optimal.
fn reject_mixed_schedule(result: &SolverResult) -> BessResult<()> {
    let Some(schedule) = &result.schedule else {
        return Ok(());
    };
    for d in &schedule.decisions {
        if d.charge_mw > 0.0 && d.discharge_mw > 0.0 {
            return Err(BessError::Solver(format!(
                "relaxed mutual-exclusion solution charges {:.3} MW and discharges {:.3} MW \
                 at step {}; negative prices need an exact integer backend (enable the \
                 `solver-highs` feature and select it)",
                d.charge_mw, d.discharge_mw, d.step
            )));
        }
    }
    Ok(())
}

/// Map a backend outcome onto exactly one [`SolverStatus`].
fn classify<S: Solution>(
    outcome: Result<S, ResolutionError>,
    problem: &DispatchProblem,
    charge: &[Variable],
    discharge: &[Variable],
    soc: &[Variable],
    start: Instant,
) -> BessResult<SolverResult> {
    let solve_time = start.elapsed();
    match outcome {
        Ok(solution) => {
            let schedule = extract_schedule(
                &solution,
                charge,
                discharge,
                soc,
                &problem.battery,
                problem.step_hours(),
            );
            let objective = objective_of(&schedule, &problem.prices, &problem.battery);
            Ok(SolverResult {
                status: SolverStatus::Optimal,
                objective: Some(objective),
                schedule: Some(schedule),
                solve_time,
            })
        }
        Err(ResolutionError::Infeasible) => Ok(SolverResult {
            status: SolverStatus::Infeasible,
            objective: None,
            schedule: None,
            solve_time,
        }),
        Err(ResolutionError::Unbounded) => Ok(SolverResult {
            status: SolverStatus::Unbounded,
            objective: None,
            schedule: None,
            solve_time,
        }),
        Err(err) => {
            let message = format!("{err:?}");
            let lowered = message.to_ascii_lowercase();
            if lowered.contains("time") || lowered.contains("limit") {
                // Timed out with no incumbent exposed by the backend.
                Ok(SolverResult {
                    status: SolverStatus::TimedOut,
                    objective: None,
                    schedule: None,
                    solve_time,
                })
            } else {
                Err(BessError::Solver(message))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_labels_parse() {
        #[cfg(feature = "solver-clarabel")]
        assert_eq!(
            "Clarabel".parse::<DispatchBackend>().unwrap(),
            DispatchBackend::Clarabel
        );
        assert!("simplex".parse::<DispatchBackend>().is_err());
    }

    #[test]
    fn unknown_backend_error_lists_the_options() {
        let err = unknown_backend_error("simplex");
        let text = err.to_string();
        for label in DispatchBackend::available() {
            assert!(text.contains(label), "{text}");
        }
    }
}
