//! CLI output formatting

use crate::core::{Frame, PojoExport};
use console::Emoji;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

// Re-export style
pub use console::style;

// Emojis for output
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "✓ ");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "✗ ");
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "i ");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "!");

/// Spinner shown while waiting on the server
pub fn create_spinner(message: impl Into<String>) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(template) = ProgressStyle::default_spinner().template("{spinner:.green} {msg} [{elapsed}]") {
        spinner.set_style(template);
    }
    spinner.set_message(message.into());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// One-line description of a frame
pub fn format_frame(frame: &Frame) -> String {
    format!(
        "{} ({} rows x {} cols)",
        style(&frame.frame_id).bold(),
        frame.rows,
        frame.ncols()
    )
}

/// Column listing, truncated after `max_cols`
pub fn format_columns(columns: &[String], max_cols: usize) -> String {
    if columns.len() <= max_cols {
        return columns.join(", ");
    }
    format!(
        "{}, ... ({} more)",
        columns[..max_cols].join(", "),
        columns.len() - max_cols
    )
}

/// Summary of a POJO export
pub fn format_pojo_export(export: &PojoExport) -> String {
    let mut lines = vec![format!(
        "{} POJO {} ({} bytes)",
        CHECK,
        style(&export.pojo_name).bold(),
        export.source_len
    )];
    if let Some(path) = &export.source_path {
        lines.push(format!("  Source: {}", style(path.display()).cyan()));
    }
    if let Some(path) = &export.jar_path {
        lines.push(format!("  Runtime: {}", style(path.display()).cyan()));
    }
    lines.join("\n")
}
