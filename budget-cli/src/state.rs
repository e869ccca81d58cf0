use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

pub fn budget_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".budget"))
}

pub fn ensure_budget_home() -> Result<PathBuf> {
    let dir = budget_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

pub fn dashboard_log_path() -> Result<PathBuf> {
    Ok(ensure_budget_home()?.join("dashboard.log"))
}
