//! A loaded ledger plus the ingest cache it came through.

use anyhow::{Context, Result, bail};
use budget_core::Period;
use budget_ingest::{IngestCache, IngestReport};
use budget_report::default_period;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

pub struct Session {
    path: PathBuf,
    cache: IngestCache,
    report: Arc<IngestReport>,
}

impl Session {
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            bail!("CSV not found: {} (pass --csv <path>)", path.display());
        }
        let mut cache = IngestCache::new();
        let report = cache
            .load_path(path)
            .with_context(|| format!("parsing {}", path.display()))?;
        info!(path = %path.display(), records = report.records.len(), "opened ledger");

        Ok(Self {
            path: path.to_path_buf(),
            cache,
            report,
        })
    }

    /// Re-read the file. Unchanged content is served from the cache.
    pub fn reload(&mut self) -> Result<()> {
        self.report = self
            .cache
            .load_path(&self.path)
            .with_context(|| format!("parsing {}", self.path.display()))?;
        info!(
            hits = self.cache.hits(),
            misses = self.cache.misses(),
            "reloaded ledger"
        );
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn report(&self) -> &IngestReport {
        &self.report
    }

    pub fn cache(&self) -> &IngestCache {
        &self.cache
    }

    /// Print a warning line when rows were dropped.
    pub fn warn_rejected(&self) {
        let n = self.report.rejected_count();
        if n > 0 {
            warn!(rejected = n, "rows dropped during ingest");
            eprintln!(
                "warning: skipped {n} row(s) with an unparseable date or amount in {}",
                self.path.display()
            );
        }
    }

    /// Parse the requested month, or fall back to the earliest one.
    ///
    /// `None` means the ledger has no usable rows.
    pub fn resolve_period(&self, requested: Option<&str>) -> Result<Option<Period>> {
        let records = &self.report.records;
        match requested {
            None => Ok(default_period(records)),
            Some(raw) => {
                let period: Period = raw.parse()?;
                let available = budget_core::list_periods(records);
                if !available.contains(&period) {
                    let list: Vec<String> = available.iter().map(|p| p.to_string()).collect();
                    bail!(
                        "no transactions in {period}; available months: {}",
                        if list.is_empty() { "(none)".to_string() } else { list.join(", ") }
                    );
                }
                Ok(Some(period))
            }
        }
    }
}
