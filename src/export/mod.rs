mod csv;
mod json;

use crate::errors::{AppError, AppResult};
use crate::models::attendance::AttendanceRecord;
use crate::models::update::LocationUpdate;
use crate::ui::messages::success;
use crate::utils::path::{expand_tilde, is_absolute};
use std::path::{Path, PathBuf};

/// Shared completion message for export commands.
pub(crate) fn notify_export_success(label: &str, path: &Path) {
    success(format!("{label} export completed: {}", path.display()));
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn parse(raw: &str) -> AppResult<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(AppError::InvalidExportFormat(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

pub struct ExportLogic;

impl ExportLogic {
    pub fn export_history(
        records: &[AttendanceRecord],
        format: &ExportFormat,
        file: &str,
        force: bool,
    ) -> AppResult<()> {
        let path = resolve_target(file, force)?;
        match format {
            ExportFormat::Csv => csv::write_history_csv(&path, records)
                .map_err(|e| AppError::Export(e.to_string()))?,
            ExportFormat::Json => json::write_history_json(&path, records)
                .map_err(|e| AppError::Export(e.to_string()))?,
        }
        notify_export_success("History", &path);
        Ok(())
    }

    pub fn export_updates(
        updates: &[LocationUpdate],
        format: &ExportFormat,
        file: &str,
        force: bool,
    ) -> AppResult<()> {
        let path = resolve_target(file, force)?;
        match format {
            ExportFormat::Csv => csv::write_updates_csv(&path, updates)
                .map_err(|e| AppError::Export(e.to_string()))?,
            ExportFormat::Json => json::write_updates_json(&path, updates)
                .map_err(|e| AppError::Export(e.to_string()))?,
        }
        notify_export_success("Session log", &path);
        Ok(())
    }
}

fn resolve_target(file: &str, force: bool) -> AppResult<PathBuf> {
    let path = expand_tilde(file);
    if !is_absolute(&path.to_string_lossy()) {
        return Err(AppError::Export(format!(
            "output path must be absolute: {file}"
        )));
    }
    if path.exists() && !force {
        return Err(AppError::Export(format!(
            "file already exists (use --force to overwrite): {}",
            path.display()
        )));
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_known_formats() {
        assert_eq!(ExportFormat::parse("csv").unwrap(), ExportFormat::Csv);
        assert_eq!(ExportFormat::parse("JSON").unwrap(), ExportFormat::Json);
        assert!(matches!(
            ExportFormat::parse("xlsx"),
            Err(AppError::InvalidExportFormat(_))
        ));
    }

    #[test]
    fn relative_target_is_rejected() {
        let err = resolve_target("relative/out.csv", false).unwrap_err();
        assert!(matches!(err, AppError::Export(_)));
    }
}
