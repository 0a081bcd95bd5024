//! Scenario specifications
//!
//! A [`ScenarioSpec`] is the full (seed, parameter set) description of one
//! synthetic market: base daily shape, volatility, and crisis-event
//! configuration. Identical specs always materialize into identical price
//! series.

use bess_core::{BessError, BessResult};
use serde::{Deserialize, Serialize};

/// Daily base price profile: a midday trough and an evening peak.
///
/// A flat base level dented by a solar-depressed dip around `trough_hour`
/// and lifted by a ramp-driven peak around `peak_hour`, the shape
/// solar-heavy grids produce. Each excursion is a smooth raised-cosine
/// bump of fixed width; outside both bumps the price sits at `base_price`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DuckCurve {
    /// Off-peak price level ($/MWh)
    #[serde(default = "default_base_price")]
    pub base_price: f64,
    /// Depth of the midday dip below base ($/MWh)
    #[serde(default = "default_trough_depth")]
    pub trough_depth: f64,
    /// Hour-of-day of the dip's bottom, in [0, 24)
    #[serde(default = "default_trough_hour")]
    pub trough_hour: f64,
    /// Height of the evening peak above base ($/MWh)
    #[serde(default = "default_peak_height")]
    pub peak_height: f64,
    /// Hour-of-day of the peak's top, in [0, 24)
    #[serde(default = "default_peak_hour")]
    pub peak_hour: f64,
}

/// Half-width of the midday dip: solar depresses prices for most of the
/// daylight hours.
const TROUGH_WIDTH_HOURS: f64 = 5.0;
/// Half-width of the evening peak: the net-load ramp is sharper.
const PEAK_WIDTH_HOURS: f64 = 4.0;

fn default_base_price() -> f64 {
    50.0
}

fn default_trough_depth() -> f64 {
    30.0
}

fn default_trough_hour() -> f64 {
    13.0
}

fn default_peak_height() -> f64 {
    30.0
}

fn default_peak_hour() -> f64 {
    19.0
}

impl Default for DuckCurve {
    fn default() -> Self {
        Self {
            base_price: default_base_price(),
            trough_depth: default_trough_depth(),
            trough_hour: default_trough_hour(),
            peak_height: default_peak_height(),
            peak_hour: default_peak_hour(),
        }
    }
}

/// Raised-cosine bump centred on `center_hour`, 1.0 at the centre and
/// falling to 0.0 at `width` hours away, measured around the 24 h clock.
fn bump(hour_of_day: f64, center_hour: f64, width: f64) -> f64 {
    let raw = (hour_of_day - center_hour).abs() % 24.0;
    let distance = raw.min(24.0 - raw);
    if distance >= width {
        return 0.0;
    }
    let angle = std::f64::consts::FRAC_PI_2 * distance / width;
    angle.cos().powi(2)
}

impl DuckCurve {
    /// Base price at a given hour-of-day in [0, 24).
    pub fn price_at(&self, hour_of_day: f64) -> f64 {
        self.base_price - self.trough_depth * bump(hour_of_day, self.trough_hour, TROUGH_WIDTH_HOURS)
            + self.peak_height * bump(hour_of_day, self.peak_hour, PEAK_WIDTH_HOURS)
    }
}

/// Grid-stress price excursions: with probability `spike_probability` per
/// step, `spike_magnitude` $/MWh is added on top of the perturbed base.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrisisConfig {
    #[serde(default)]
    pub spike_probability: f64,
    #[serde(default)]
    pub spike_magnitude: f64,
}

impl Default for CrisisConfig {
    fn default() -> Self {
        Self {
            spike_probability: 0.0,
            spike_magnitude: 0.0,
        }
    }
}

/// Named market regimes with calibrated volatility and crisis parameters.
///
/// Spike probabilities and magnitudes follow the regimes the model was
/// calibrated against, up to the Texas-2021-style crisis tail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VolatilityPreset {
    Low,
    Normal,
    Extreme,
    Crisis,
}

impl VolatilityPreset {
    /// (log-normal sigma, spike probability, spike magnitude $/MWh)
    pub fn parameters(&self) -> (f64, f64, f64) {
        match self {
            VolatilityPreset::Low => (0.10, 0.01, 50.0),
            VolatilityPreset::Normal => (0.20, 0.05, 200.0),
            VolatilityPreset::Extreme => (0.50, 0.10, 500.0),
            VolatilityPreset::Crisis => (1.00, 0.20, 2000.0),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VolatilityPreset::Low => "low",
            VolatilityPreset::Normal => "normal",
            VolatilityPreset::Extreme => "extreme",
            VolatilityPreset::Crisis => "crisis",
        }
    }
}

impl std::str::FromStr for VolatilityPreset {
    type Err = BessError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "low" => Ok(VolatilityPreset::Low),
            "normal" => Ok(VolatilityPreset::Normal),
            "extreme" => Ok(VolatilityPreset::Extreme),
            "crisis" => Ok(VolatilityPreset::Crisis),
            other => Err(BessError::InvalidParameter(format!(
                "unknown volatility preset '{other}'; supported values: low, normal, extreme, crisis"
            ))),
        }
    }
}

/// Full description of one synthetic price scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSpec {
    /// RNG seed; equal seeds (and parameters) give byte-identical series
    pub seed: u64,
    /// Horizon length in steps
    #[serde(default = "default_num_steps")]
    pub num_steps: usize,
    /// Step duration in hours
    #[serde(default = "default_step_hours")]
    pub step_hours: f64,
    #[serde(default)]
    pub shape: DuckCurve,
    /// Sigma of the multiplicative log-normal noise, >= 0
    #[serde(default = "default_volatility")]
    pub volatility: f64,
    /// Bound on the noise multiplier: clamped to [1/clamp, clamp]
    #[serde(default = "default_noise_clamp")]
    pub noise_clamp: f64,
    #[serde(default)]
    pub crisis: CrisisConfig,
    /// When false (the default) prices are clamped at zero
    #[serde(default)]
    pub allow_negative_prices: bool,
}

/// 30 days at hourly resolution, the default backtest horizon.
fn default_num_steps() -> usize {
    30 * 24
}

fn default_step_hours() -> f64 {
    1.0
}

fn default_volatility() -> f64 {
    0.20
}

fn default_noise_clamp() -> f64 {
    4.0
}

impl ScenarioSpec {
    /// A spec with default shape and horizon at the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            num_steps: default_num_steps(),
            step_hours: default_step_hours(),
            shape: DuckCurve::default(),
            volatility: default_volatility(),
            noise_clamp: default_noise_clamp(),
            crisis: CrisisConfig::default(),
            allow_negative_prices: false,
        }
    }

    /// Apply a named preset's volatility and crisis parameters.
    pub fn with_preset(mut self, preset: VolatilityPreset) -> Self {
        let (volatility, spike_probability, spike_magnitude) = preset.parameters();
        self.volatility = volatility;
        self.crisis = CrisisConfig {
            spike_probability,
            spike_magnitude,
        };
        self
    }

    pub fn with_horizon(mut self, num_steps: usize, step_hours: f64) -> Self {
        self.num_steps = num_steps;
        self.step_hours = step_hours;
        self
    }

    /// Validate every parameter against its documented range.
    pub fn validate(&self) -> BessResult<()> {
        if self.num_steps == 0 {
            return Err(BessError::InvalidParameter(
                "scenario horizon must contain at least one step".into(),
            ));
        }
        if !self.step_hours.is_finite() || self.step_hours <= 0.0 {
            return Err(BessError::InvalidParameter(format!(
                "step duration must be positive, got {}",
                self.step_hours
            )));
        }
        if !self.volatility.is_finite() || self.volatility < 0.0 {
            return Err(BessError::InvalidParameter(format!(
                "volatility must be >= 0, got {}",
                self.volatility
            )));
        }
        if self.noise_clamp < 1.0 || !self.noise_clamp.is_finite() {
            return Err(BessError::InvalidParameter(format!(
                "noise clamp must be >= 1, got {}",
                self.noise_clamp
            )));
        }
        if !(0.0..=1.0).contains(&self.crisis.spike_probability) {
            return Err(BessError::InvalidParameter(format!(
                "spike probability {} outside [0, 1]",
                self.crisis.spike_probability
            )));
        }
        if !self.crisis.spike_magnitude.is_finite() || self.crisis.spike_magnitude < 0.0 {
            return Err(BessError::InvalidParameter(format!(
                "spike magnitude must be >= 0, got {}",
                self.crisis.spike_magnitude
            )));
        }
        for (label, value) in [
            ("base price", self.shape.base_price),
            ("trough depth", self.shape.trough_depth),
            ("peak height", self.shape.peak_height),
        ] {
            if !value.is_finite() {
                return Err(BessError::InvalidParameter(format!(
                    "{label} must be finite, got {value}"
                )));
            }
        }
        for (label, hour) in [
            ("trough hour", self.shape.trough_hour),
            ("peak hour", self.shape.peak_hour),
        ] {
            if !hour.is_finite() || !(0.0..24.0).contains(&hour) {
                return Err(BessError::InvalidParameter(format!(
                    "{label} {hour} outside [0, 24)"
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
    fn duck_curve_dips_at_midday_and_peaks_in_the_evening() {
        let curve = DuckCurve::default();
        // Solar dip bottoms out at hour 13, ramp peak tops out at hour 19
        assert!((curve.price_at(13.0) - 20.0).abs() < 1e-9);
        assert!((curve.price_at(19.0) - 80.0).abs() < 1e-9);
        // Overnight, away from both excursions, the price sits at base
        assert!((curve.price_at(3.0) - 50.0).abs() < 1e-9);
        assert!(curve.price_at(19.0) > curve.price_at(13.0));
    }

    #[test]
    fn duck_curve_is_continuous_across_midnight() {
        let mut curve = DuckCurve::default();
        curve.peak_hour = 23.0;
        // The peak wraps around the clock instead of being cut off
        assert!((curve.price_at(23.0) - 80.0).abs() < 1e-9);
        assert!(curve.price_at(1.0) > curve.price_at(4.0));
    }

    #[test]
    fn presets_order_by_severity() {
        let (low, ..) = VolatilityPreset::Low.parameters();
        let (crisis, p, magnitude) = VolatilityPreset::Crisis.parameters();
        assert!(crisis > low);
        assert_eq!(p, 0.20);
        assert_eq!(magnitude, 2000.0);
    }

    #[test]
    fn preset_parse_round_trips() {
        for preset in [
            VolatilityPreset::Low,
            VolatilityPreset::Normal,
            VolatilityPreset::Extreme,
            VolatilityPreset::Crisis,
        ] {
            let parsed: VolatilityPreset = preset.as_str().parse().unwrap();
            assert_eq!(parsed, preset);
        }
        assert!("texas".parse::<VolatilityPreset>().is_err());
    }

    #[test]
    fn validate_rejects_bad_parameters() {
        let mut spec = ScenarioSpec::new(42);
        spec.num_steps = 0;
        assert!(spec.validate().is_err());

        let mut spec = ScenarioSpec::new(42);
        spec.volatility = -0.5;
        assert!(spec.validate().is_err());

        let mut spec = ScenarioSpec::new(42);
        spec.crisis.spike_probability = 1.5;
        assert!(spec.validate().is_err());

        let mut spec = ScenarioSpec::new(42);
        spec.shape.peak_hour = 24.0;
        assert!(spec.validate().is_err());

        assert!(ScenarioSpec::new(42).validate().is_ok());
    }

    #[test]
    fn partial_json_fills_in_defaults() {
        let spec: ScenarioSpec = serde_json::from_str(r#"{"seed": 7}"#).unwrap();
        assert_eq!(spec.seed, 7);
        assert_eq!(spec.num_steps, 30 * 24);
        assert_eq!(spec.shape, DuckCurve::default());
        assert!(!spec.allow_negative_prices);
        spec.validate().unwrap();
    }
}
