//! CSV import/export for price horizons and solved schedules.

use anyhow::{anyhow, Context, Result};
use bess_core::{BatterySpecification, DispatchSchedule, PriceSeries, RevenueCurve};
use std::path::Path;

/// Read a `step,price` CSV into a price series. Extra columns are ignored;
/// the price is taken from the last column of each row.
pub fn load_prices_csv(path: &Path, step_hours: f64) -> Result<PriceSeries> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("opening price CSV '{}'", path.display()))?;
    let mut prices = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("reading price CSV row {}", row + 1))?;
        let field = record
            .iter()
            .last()
            .ok_or_else(|| anyhow!("price CSV row {} is empty", row + 1))?;
        let price: f64 = field
            .trim()
            .parse()
            .with_context(|| format!("parsing price '{}' on row {}", field, row + 1))?;
        prices.push(price);
    }
    let series = PriceSeries::new(prices, step_hours)?;
    Ok(series)
}

/// Write a price series as `step,price`.
pub fn write_prices_csv(path: &Path, series: &PriceSeries) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating price CSV '{}'", path.display()))?;
    writer.write_record(["step", "price"])?;
    for (step, price) in series.prices().iter().enumerate() {
        writer.write_record([step.to_string(), format!("{price:.6}")])?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the solved schedule joined with the revenue curve, one row per step.
pub fn write_schedule_csv(
    path: &Path,
    prices: &PriceSeries,
    schedule: &DispatchSchedule,
    revenue: &RevenueCurve,
) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating schedule CSV '{}'", path.display()))?;
    writer.write_record([
        "step",
        "price",
        "charge_mw",
        "discharge_mw",
        "soc_mwh",
        "gross_cash_flow",
        "degradation_cost",
        "cumulative_net",
    ])?;
    for (decision, point) in schedule.decisions.iter().zip(&revenue.points) {
        writer.write_record([
            decision.step.to_string(),
            format!("{:.6}", prices.price(decision.step)),
            format!("{:.6}", decision.charge_mw),
            format!("{:.6}", decision.discharge_mw),
            format!("{:.6}", decision.soc_mwh),
            format!("{:.6}", point.gross_cash_flow),
            format!("{:.6}", point.degradation_cost),
            format!("{:.6}", point.cumulative_net),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Full solve output for JSON export.
#[derive(serde::Serialize)]
pub struct SolveReport<'a> {
    pub battery: &'a BatterySpecification,
    pub objective: f64,
    pub schedule: &'a DispatchSchedule,
    pub revenue: &'a RevenueCurve,
}

pub fn write_solve_json(path: &Path, payload: &SolveReport<'_>) -> Result<()> {
    let json = serde_json::to_string_pretty(payload).context("serializing solve result")?;
    std::fs::write(path, json)
        .with_context(|| format!("writing solve result '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn prices_round_trip_through_csv() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prices.csv");
        let series = PriceSeries::hourly(vec![10.0, 55.5, 100.0]).unwrap();
        write_prices_csv(&path, &series).unwrap();
        let loaded = load_prices_csv(&path, 1.0).unwrap();
        assert_eq!(loaded.len(), 3);
        assert!((loaded.price(1) - 55.5).abs() < 1e-9);
    }

    #[test]
    fn loading_a_bare_price_column_works() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prices.csv");
        std::fs::write(&path, "price\n10.0\n20.0\n").unwrap();
        let loaded = load_prices_csv(&path, 0.5).unwrap();
        assert_eq!(loaded.len(), 2);
        assert!((loaded.step_hours() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn malformed_prices_are_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prices.csv");
        std::fs::write(&path, "step,price\n0,not-a-number\n").unwrap();
        assert!(load_prices_csv(&path, 1.0).is_err());
    }
}
