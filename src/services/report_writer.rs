use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::domain::AggregateReport;
use crate::errors::TenderResult;

/// Writes the report as pretty JSON, replacing whatever was there
pub struct ReportWriter {
    path: PathBuf,
}

impl ReportWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serialize, write beside the target, then rename over it
    pub fn write(&self, report: &AggregateReport) -> TenderResult<()> {
        let json = serde_json::to_string_pretty(report)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let tmp = self.temp_path();
        fs::write(&tmp, json.as_bytes())?;

        if let Err(e) = fs::rename(&tmp, &self.path) {
            fs::remove_file(&tmp).ok();
            return Err(e.into());
        }

        info!(path = %self.path.display(), tenders = report.total_energy_tenders, "report written");
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "report".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
