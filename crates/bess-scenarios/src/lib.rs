//! # bess-scenarios: Synthetic Market Scenarios
//!
//! Deterministic generation of plausible electricity price paths: a daily
//! duck-curve base shape, bounded multiplicative noise, and configurable
//! crisis spikes. These are stress inputs for backtests, not forecasts.
//!
//! ```rust
//! use bess_scenarios::{generate, ScenarioSpec, VolatilityPreset};
//!
//! let spec = ScenarioSpec::new(42).with_preset(VolatilityPreset::Normal);
//! let prices = generate(&spec).unwrap();
//! assert_eq!(prices.len(), 30 * 24);
//! ```

pub mod generate;
pub mod spec;

pub use generate::generate;
pub use spec::{CrisisConfig, DuckCurve, ScenarioSpec, VolatilityPreset};
