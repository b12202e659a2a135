use anyhow::{Context, Result};
use chrono::Utc;
use std::{fs, path::Path};

pub fn artifacts_dir(base: &str, scenario: &str, seed: u64) -> String {
    let ts = Utc::now().format("%Y%m%dT%H%M%S");
    format!("{base}/{scenario}/seed-{seed}/{ts}")
}

/// Dump a failed iteration's session state and error chain for later inspection.
pub fn write_failure_artifacts(
    dir: &Path,
    state: &serde_json::Value,
    error_chain: &str,
) -> Result<()> {
    fs::create_dir_all(dir).context("creating artifacts dir")?;
    let payload = serde_json::to_vec_pretty(state).context("serializing session state")?;
    fs::write(dir.join("session.json"), payload).context("writing session.json")?;
    fs::write(dir.join("error.txt"), error_chain).context("writing error.txt")?;
    Ok(())
}

pub fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

pub fn slugify(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect()
}
