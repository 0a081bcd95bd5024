//! Battery asset description
//!
//! Immutable physical/financial parameters of the storage asset. Built once
//! per run, validated once, then read-only to the model builder.

use crate::error::{BessError, BessResult};
use serde::{Deserialize, Serialize};

/// Default round-trip efficiency when none is configured.
pub const DEFAULT_ROUND_TRIP_EFFICIENCY: f64 = 0.90;

/// Physical and financial parameters of a grid-connected battery.
///
/// Charge and discharge efficiencies are independent fields rather than a
/// single round-trip number; the default splits 90% round trip symmetrically
/// (each leg = sqrt(0.90)). The hurdle rate is a $/MWh cost on *throughput*
/// (charge plus discharge energy) that suppresses trades whose spread is
/// smaller than the degradation they cause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatterySpecification {
    /// Usable energy capacity (MWh)
    pub capacity_mwh: f64,
    /// Nameplate power rating, both directions (MW)
    pub power_mw: f64,
    /// Fraction of grid energy that reaches storage, in (0, 1]
    pub charge_efficiency: f64,
    /// Fraction of stored energy that reaches the grid, in (0, 1]
    pub discharge_efficiency: f64,
    /// Degradation cost per MWh of throughput ($/MWh), >= 0
    pub hurdle_rate_per_mwh: f64,
    /// Stored energy at the start of the horizon (MWh)
    pub initial_soc_mwh: f64,
    /// Optional minimum stored energy at the end of the horizon (MWh)
    pub final_soc_target_mwh: Option<f64>,
}

impl BatterySpecification {
    /// Build a specification with the default efficiency split and no hurdle
    /// rate, starting empty.
    pub fn new(capacity_mwh: f64, power_mw: f64) -> Self {
        let (charge_efficiency, discharge_efficiency) = Self::default_efficiencies();
        Self {
            capacity_mwh,
            power_mw,
            charge_efficiency,
            discharge_efficiency,
            hurdle_rate_per_mwh: 0.0,
            initial_soc_mwh: 0.0,
            final_soc_target_mwh: None,
        }
    }

    /// Symmetric split of the default 90% round-trip efficiency:
    /// each leg is sqrt(0.90).
    pub fn default_efficiencies() -> (f64, f64) {
        let leg = DEFAULT_ROUND_TRIP_EFFICIENCY.sqrt();
        (leg, leg)
    }

    /// Set both efficiency legs from a round-trip value, split symmetrically.
    pub fn with_round_trip_efficiency(mut self, round_trip: f64) -> Self {
        let leg = round_trip.sqrt();
        self.charge_efficiency = leg;
        self.discharge_efficiency = leg;
        self
    }

    pub fn with_hurdle_rate(mut self, rate_per_mwh: f64) -> Self {
        self.hurdle_rate_per_mwh = rate_per_mwh;
        self
    }

    pub fn with_initial_soc(mut self, soc_mwh: f64) -> Self {
        self.initial_soc_mwh = soc_mwh;
        self
    }

    pub fn with_final_soc_target(mut self, target_mwh: f64) -> Self {
        self.final_soc_target_mwh = Some(target_mwh);
        self
    }

    /// Combined round-trip efficiency of one full cycle.
    pub fn round_trip_efficiency(&self) -> f64 {
        self.charge_efficiency * self.discharge_efficiency
    }

    /// Check every field against its documented bounds.
    ///
    /// Range errors on the SoC fields are reported as
    /// [`BessError::InvalidParameter`]; whether a *valid* terminal target is
    /// reachable within a given horizon is the model builder's concern.
    pub fn validate(&self) -> BessResult<()> {
        if !self.capacity_mwh.is_finite() || self.capacity_mwh <= 0.0 {
            return Err(BessError::InvalidParameter(format!(
                "energy capacity must be positive, got {} MWh",
                self.capacity_mwh
            )));
        }
        if !self.power_mw.is_finite() || self.power_mw <= 0.0 {
            return Err(BessError::InvalidParameter(format!(
                "power rating must be positive, got {} MW",
                self.power_mw
            )));
        }
        for (label, eta) in [
            ("charge efficiency", self.charge_efficiency),
            ("discharge efficiency", self.discharge_efficiency),
        ] {
            if !(eta > 0.0 && eta <= 1.0) {
                return Err(BessError::InvalidParameter(format!(
                    "{label} must be in (0, 1], got {eta}"
                )));
            }
        }
        if !self.hurdle_rate_per_mwh.is_finite() || self.hurdle_rate_per_mwh < 0.0 {
            return Err(BessError::InvalidParameter(format!(
                "hurdle rate must be >= 0, got {} $/MWh",
                self.hurdle_rate_per_mwh
            )));
        }
        if !(0.0..=self.capacity_mwh).contains(&self.initial_soc_mwh) {
            return Err(BessError::InvalidParameter(format!(
                "initial state of charge {} MWh outside [0, {}]",
                self.initial_soc_mwh, self.capacity_mwh
            )));
        }
        if let Some(target) = self.final_soc_target_mwh {
            if !(0.0..=self.capacity_mwh).contains(&target) {
                return Err(BessError::InvalidParameter(format!(
                    "final state of charge target {} MWh outside [0, {}]",
                    target, self.capacity_mwh
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_split_is_symmetric_sqrt() {
        let spec = BatterySpecification::new(50.0, 10.0);
        let expected = DEFAULT_ROUND_TRIP_EFFICIENCY.sqrt();
        assert!((spec.charge_efficiency - expected).abs() < 1e-12);
        assert!((spec.discharge_efficiency - expected).abs() < 1e-12);
        assert!((spec.round_trip_efficiency() - DEFAULT_ROUND_TRIP_EFFICIENCY).abs() < 1e-12);
    }

    #[test]
    fn validate_accepts_reasonable_spec() {
        let spec = BatterySpecification::new(50.0, 10.0)
            .with_hurdle_rate(10.0)
            .with_initial_soc(25.0)
            .with_final_soc_target(10.0);
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_fields() {
        assert!(BatterySpecification::new(0.0, 10.0).validate().is_err());
        assert!(BatterySpecification::new(50.0, -1.0).validate().is_err());

        let mut spec = BatterySpecification::new(50.0, 10.0);
        spec.charge_efficiency = 1.5;
        assert!(spec.validate().is_err());

        let spec = BatterySpecification::new(50.0, 10.0).with_hurdle_rate(-1.0);
        assert!(spec.validate().is_err());

        let spec = BatterySpecification::new(50.0, 10.0).with_initial_soc(60.0);
        assert!(spec.validate().is_err());

        let spec = BatterySpecification::new(50.0, 10.0).with_final_soc_target(51.0);
        assert!(spec.validate().is_err());
    }
}
