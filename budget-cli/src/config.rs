use anyhow::{Context, Result};
use budget_report::{ChartSize, DocumentOptions, LabelPolicy};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::{budget_home, ensure_budget_home};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Fallback tracing filter when RUST_LOG is unset
    pub log_level: String,
    pub report: ReportSection,
    pub charts: ChartSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSection {
    pub currency_symbol: String,
    pub label_policy: LabelPolicy,
    /// Default directory for `budget export`
    pub output_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSection {
    pub width: u32,
    pub height: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            report: ReportSection::default(),
            charts: ChartSection::default(),
        }
    }
}

impl Default for ReportSection {
    fn default() -> Self {
        Self {
            currency_symbol: "$".to_string(),
            label_policy: LabelPolicy::Reject,
            output_dir: PathBuf::from("."),
        }
    }
}

impl Default for ChartSection {
    fn default() -> Self {
        let size = ChartSize::default();
        Self {
            width: size.width,
            height: size.height,
        }
    }
}

impl Config {
    pub fn document_options(&self) -> DocumentOptions {
        DocumentOptions {
            currency_symbol: self.report.currency_symbol.clone(),
            label_policy: self.report.label_policy,
        }
    }

    pub fn chart_size(&self) -> ChartSize {
        ChartSize {
            width: self.charts.width,
            height: self.charts.height,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(budget_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

pub fn load_config_from(p: &Path) -> Result<Config> {
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config_to(cfg: &Config, p: &Path) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    ensure_budget_home()?;
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config_to(&Config::default(), &p)?;
    println!("Wrote {}", p.display());
    Ok(())
}
