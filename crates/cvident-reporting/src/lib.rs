//! Export of resolution results.
//!
//! Strictly a presentation layer: the engine's contract ends at
//! [`ResolutionResult`], and these writers only render it.

use std::path::Path;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

use cvident_core::ResolutionResult;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            other => Err(format!("unknown export format: {other}")),
        }
    }
}

/// The column names downstream spreadsheets expect.
#[derive(Serialize)]
struct ExportRecord<'a> {
    #[serde(rename = "Filename")]
    filename: &'a str,
    #[serde(rename = "Selected Name")]
    selected_name: &'a str,
    #[serde(rename = "Email")]
    email: &'a str,
}

impl<'a> From<&'a ResolutionResult> for ExportRecord<'a> {
    fn from(r: &'a ResolutionResult) -> Self {
        Self {
            filename: &r.filename,
            selected_name: &r.selected_name,
            email: &r.email,
        }
    }
}

pub fn export_json(results: &[ResolutionResult]) -> Result<String, ReportError> {
    let records: Vec<ExportRecord<'_>> = results.iter().map(ExportRecord::from).collect();
    let mut out = serde_json::to_string_pretty(&records)?;
    out.push('\n');
    Ok(out)
}

fn csv_escape(s: &str) -> String {
    if s.contains('"') || s.contains(',') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

pub fn export_csv(results: &[ResolutionResult]) -> String {
    let mut out = String::from("Filename,Selected Name,Email\n");
    for r in results {
        out.push_str(&format!(
            "{},{},{}\n",
            csv_escape(&r.filename),
            csv_escape(&r.selected_name),
            csv_escape(&r.email),
        ));
    }
    out
}

/// Render `results` in `format` and write them to `path`.
pub fn export_results(
    results: &[ResolutionResult],
    format: ExportFormat,
    path: &Path,
) -> Result<(), ReportError> {
    let content = match format {
        ExportFormat::Json => export_json(results)?,
        ExportFormat::Csv => export_csv(results),
    };
    std::fs::write(path, content)?;
    Ok(())
}
