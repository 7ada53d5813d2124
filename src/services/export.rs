//! Plain-text run export

use std::{
    fmt::Write as _,
    fs,
    path::{Path, PathBuf},
};
use chrono::{DateTime, Local};
use tracing::info;

use crate::{
    error::ExportError,
    state::RunSnapshot,
    utils::format::{format_time, ordinal},
};

/// Default artifact name, `{activity}_{YYYYMMDD_HHMMSS}.txt`
pub fn default_file_name(title: &str, at: DateTime<Local>) -> String {
    format!("{}_{}.txt", sanitize_file_stem(title), at.format("%Y%m%d_%H%M%S"))
}

/// Replace characters that cannot appear in a file name
fn sanitize_file_stem(title: &str) -> String {
    title
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

/// Destination for an export made at `at` into `dir`
pub fn default_destination(dir: &Path, title: &str, at: DateTime<Local>) -> PathBuf {
    dir.join(default_file_name(title, at))
}

/// Text content of the export artifact
pub fn render_export(run: &RunSnapshot, at: DateTime<Local>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Speedrun: {}", run.title);
    if let Some(best) = run.personal_best {
        let _ = writeln!(out, "Personal Best: {}", format_time(best));
    }
    let _ = writeln!(out, "Date: {}", at.format("%Y-%m-%d %H:%M:%S"));
    let _ = writeln!(out);
    let _ = writeln!(out, "Segment Times:");
    for segment in &run.segments {
        let _ = writeln!(
            out,
            "{} Segment: {} | Total: {}",
            ordinal(segment.index),
            format_time(segment.segment_duration),
            format_time(segment.cumulative_duration)
        );
    }
    if run.segments.is_empty() && run.final_duration > 0.0 {
        let _ = writeln!(out);
        let _ = writeln!(out, "Total Time: {}", format_time(run.final_duration));
    }
    out
}

/// Write the export artifact for `run` to `destination`
pub fn export_run(destination: &Path, run: &RunSnapshot, at: DateTime<Local>) -> Result<(), ExportError> {
    let to_export_error = |source| ExportError {
        path: destination.to_path_buf(),
        source,
    };
    if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(to_export_error)?;
    }
    fs::write(destination, render_export(run, at)).map_err(to_export_error)?;
    info!("Exported run of {} to {}", run.title, destination.display());
    Ok(())
}
