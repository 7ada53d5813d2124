//! Session screen layout

use std::time::Instant;

use crate::{
    state::SessionView,
    utils::format::{format_best, format_time, ordinal},
};

/// Help line for the reserved application keys
pub const APP_KEYS_HELP: &str = "Ctrl+K:Keys  Ctrl+L:Clear  Ctrl+Q:Quit";

/// Lines of the session screen at `now`
pub fn render_lines(view: &SessionView, now: Instant) -> Vec<String> {
    let mut lines = Vec::with_capacity(12);
    lines.push(format!("{}  [{}]", view.title, view.clock.status.label()));
    lines.push(format!("  {}", format_time(view.elapsed_at(now))));
    lines.push(format!("PB: {}", format_best(view.personal_best)));
    lines.push(String::new());

    for segment in &view.recent_segments {
        lines.push(format!(
            "{}: {} | Total: {}",
            ordinal(segment.index),
            format_time(segment.segment_duration),
            format_time(segment.cumulative_duration)
        ));
    }
    if !view.recent_segments.is_empty() {
        lines.push(String::new());
    }

    lines.push(view.keybinds.help_line());
    lines.push(APP_KEYS_HELP.to_string());

    if let Some(prompt) = &view.prompt {
        lines.push(String::new());
        lines.push(format!("> {}", prompt));
    }
    if let Some(notice) = &view.notice {
        lines.push(format!("! {}", notice));
    }
    lines
}
