//! # bess-dispatch: Battery Arbitrage Dispatch Optimization
//!
//! Linear/mixed-integer formulation of the hour-by-hour charge/discharge
//! scheduling problem for a grid-connected battery trading on price spreads.
//!
//! ## Formulation
//!
//! ```text
//! maximize    Σ_t  p_t·(d_t − c_t)·Δt  −  h·(c_t + d_t)·Δt
//!             └───────────────────┘     └──────────────┘
//!              market cash flow          degradation cost
//!
//! subject to:
//!   e_t = e_{t−1} + c_t·Δt·η_c − d_t·Δt/η_d     Energy balance (e_{−1} = initial SoC)
//!   0 ≤ c_t ≤ P·b_t                             Charge power limit
//!   0 ≤ d_t ≤ P·(1 − b_t)                       Discharge power limit
//!   0 ≤ e_t ≤ C                                 State-of-charge bounds
//!   e_{T−1} ≥ e_target                          Terminal condition (optional)
//!   b_t ∈ {0,1}                                 Mutual exclusion (negative prices only)
//! ```
//!
//! The hurdle rate `h` ($/MWh of throughput) is a strictly additive
//! degradation charge: it suppresses trades whose spread is smaller than the
//! wear they cause, which is what prevents the LP-optimal-but-destructive
//! micro-cycling a zero-cost formulation produces.
//!
//! One binary per step is the only non-linearity, and it is only emitted
//! when the price series actually goes negative; everything else is linear,
//! so solver effort grows linearly with horizon length.
//!
//! ## Pipeline
//!
//! [`DispatchProblemBuilder`] (validation) → [`solve_dispatch`] (solver
//! adapter) → [`report`] (schedule + equity curve).

pub mod problem;
pub mod report;
pub mod solution;
pub mod solver;

pub use problem::{DispatchProblem, DispatchProblemBuilder};
pub use report::report;
pub use solution::summary;
pub use solver::{solve_dispatch, DispatchBackend, DispatchSolverConfig};
