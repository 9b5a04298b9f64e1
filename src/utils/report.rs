use crate::domain::model::{MoveStatus, RunSummary};
use crate::utils::error::{LayerError, Result};
use serde::{Deserialize, Serialize};
use std::io::Write;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

pub fn render(summary: &RunSummary, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(summary)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(summary)?),
        OutputFormat::Csv => render_csv(summary),
    }
}

pub fn write_summary<W: Write>(out: &mut W, summary: &RunSummary, format: OutputFormat) -> Result<()> {
    let rendered = render(summary, format)?;
    writeln!(out, "{}", rendered.trim_end())?;
    Ok(())
}

fn render_text(summary: &RunSummary) -> String {
    let mut lines = Vec::new();
    if summary.dry_run {
        lines.push("🔍 Dry run, nothing was moved".to_string());
        for record in &summary.records {
            match (&record.status, &record.detail) {
                (MoveStatus::Blocked, Some(reason)) => {
                    lines.push(format!("  ⚠️  {} -> {} ({})", record.original, record.destination, reason))
                }
                (MoveStatus::Unchanged, _) => {}
                _ => lines.push(format!("  {} -> {}", record.original, record.destination)),
            }
        }
    }
    lines.push(format!(
        "📁 {}: scanned {}, skipped {}, moved {}, unchanged {}, planned {}, blocked {} in {}ms",
        summary.layers_dir.display(),
        summary.scanned,
        summary.skipped,
        summary.count(MoveStatus::Moved),
        summary.count(MoveStatus::Unchanged),
        summary.count(MoveStatus::Planned),
        summary.count(MoveStatus::Blocked),
        summary.elapsed_ms()
    ));
    lines.join("\n")
}

fn render_csv(summary: &RunSummary) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["original", "destination", "subdir", "status", "detail"])?;
    for record in &summary.records {
        writer.write_record([
            record.original.as_str(),
            record.destination.as_str(),
            record.subdir.as_deref().unwrap_or(""),
            record.status.as_str(),
            record.detail.as_deref().unwrap_or(""),
        ])?;
    }
    let bytes = writer.into_inner().map_err(|e| LayerError::OutputError {
        message: format!("Failed to flush CSV output: {}", e),
    })?;
    String::from_utf8(bytes).map_err(|e| LayerError::OutputError {
        message: format!("CSV output is not valid UTF-8: {}", e),
    })
}
