//! # bess-core: Battery Arbitrage Data Model
//!
//! Shared types for the BESS arbitrage toolkit: market price series, battery
//! asset specifications, dispatch schedules, solver results, and revenue
//! curves, plus the unified error type used across the workspace.
//!
//! ## Design Philosophy
//!
//! Inputs ([`PriceSeries`], [`BatterySpecification`]) are immutable once
//! built and validated exactly once, in their constructors. Outputs
//! ([`DispatchSchedule`], [`RevenueCurve`]) are produced atomically by the
//! dispatch solver and reporter; no stage exposes partial state. This keeps
//! independent runs referentially independent, so Monte Carlo sweeps can
//! fan out across threads without locks.
//!
//! ## Quick Start
//!
//! ```rust
//! use bess_core::{BatterySpecification, PriceSeries};
//!
//! let prices = PriceSeries::hourly(vec![10.0, 100.0]).unwrap();
//! let battery = BatterySpecification::new(10.0, 10.0)
//!     .with_round_trip_efficiency(1.0);
//!
//! assert_eq!(prices.len(), 2);
//! battery.validate().unwrap();
//! ```

pub mod battery;
pub mod dispatch;
pub mod error;
pub mod revenue;
pub mod series;

pub use battery::{BatterySpecification, DEFAULT_ROUND_TRIP_EFFICIENCY};
pub use dispatch::{DispatchDecision, DispatchSchedule, SolverResult, SolverStatus};
pub use error::{BessError, BessResult};
pub use revenue::{RevenueCurve, RevenuePoint};
pub use series::PriceSeries;
