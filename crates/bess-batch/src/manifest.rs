use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::job::SweepRecord;

#[derive(Debug, Serialize, Deserialize)]
pub struct SweepManifest {
    pub created_at: DateTime<Utc>,
    pub num_trials: usize,
    pub success: usize,
    pub failure: usize,
    pub mean_net_profit: Option<f64>,
    pub jobs: Vec<SweepRecord>,
}

pub fn write_sweep_manifest(path: &Path, manifest: &SweepManifest) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating manifest directory '{}'", parent.display()))?;
    }
    let json =
        serde_json::to_string_pretty(manifest).context("serializing sweep manifest to JSON")?;
    fs::write(path, json)
        .with_context(|| format!("writing sweep manifest '{}'", path.display()))?;
    Ok(())
}

pub fn load_sweep_manifest(path: &Path) -> Result<SweepManifest> {
    let file = fs::File::open(path)
        .with_context(|| format!("opening sweep manifest '{}'", path.display()))?;
    serde_json::from_reader(file)
        .with_context(|| format!("parsing sweep manifest '{}'", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn manifest_writes_and_reads_back() {
        let record = SweepRecord {
            job_id: "trial-42".into(),
            seed: 42,
            status: "ok".into(),
            error: None,
            output: "out/trial-42/result.json".into(),
            net_profit: Some(1234.5),
            gross_revenue: Some(1500.0),
            degradation_cost: Some(265.5),
            throughput_mwh: Some(88.5),
            equivalent_cycles: Some(0.885),
        };
        let manifest = SweepManifest {
            created_at: Utc::now(),
            num_trials: 1,
            success: 1,
            failure: 0,
            mean_net_profit: Some(1234.5),
            jobs: vec![record.clone()],
        };
        let tmp = NamedTempFile::new().unwrap();
        write_sweep_manifest(tmp.path(), &manifest).unwrap();
        let parsed = load_sweep_manifest(tmp.path()).unwrap();
        assert_eq!(parsed.num_trials, 1);
        assert_eq!(parsed.jobs.first().unwrap().job_id, record.job_id);
        assert_eq!(parsed.mean_net_profit, Some(1234.5));
    }
}
