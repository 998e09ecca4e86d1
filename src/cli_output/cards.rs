//! Line-based species card rendering.
//!
//! Everything writes to a caller-supplied [`Write`] so the binary can target
//! stdout and tests can target a buffer.

use std::io::{self, Write};

use serde_json::Value;

use crate::models::{INaturalist, Species};
use crate::view_state::{ExploreViewController, ViewStatus};

/// Line width for separators and wrapped text.
pub const LINE_WIDTH: usize = 60;

/// Longest Wikipedia excerpt shown on a card, in characters.
const SUMMARY_CHARS: usize = 280;

/// Status icons
pub mod icons {
    pub const SUCCESS: &str = "✓";
    pub const FAILURE: &str = "✗";
    pub const WARNING: &str = "⚠";
    pub const SAMPLE: &str = "◇";
}

/// Write a title underlined with a double rule.
///
/// ```text
/// EXPLORING: Kaziranga
/// ════════════════════════════════════════════════════════════
/// ```
pub fn write_header<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    writeln!(out, "{}", title)?;
    writeln!(out, "{}", "═".repeat(LINE_WIDTH))?;
    writeln!(out)
}

/// Write one indented status line.
///
/// ```text
///   ✓ 12 species found
/// ```
pub fn write_status_line<W: Write>(out: &mut W, icon: &str, message: &str) -> io::Result<()> {
    writeln!(out, "  {} {}", icon, message)
}

/// Write one record as a card headed by its position (1-based).
///
/// Records without the species shape are shown as indented JSON.
pub fn write_card<W: Write>(out: &mut W, position: usize, record: &Value) -> io::Result<()> {
    match Species::from_record(record) {
        Ok(species) => write_species(out, position, &species),
        Err(e) => {
            tracing::debug!("Rendering record #{} as raw JSON: {}", position, e);
            writeln!(out, "#{}  (unrecognised record)", position)?;
            writeln!(out, "{}", "─".repeat(LINE_WIDTH))?;
            let pretty =
                serde_json::to_string_pretty(record).unwrap_or_else(|_| record.to_string());
            for line in pretty.lines() {
                writeln!(out, "  {}", line)?;
            }
            writeln!(out)
        }
    }
}

/// Write one record as a single JSON line.
pub fn write_raw<W: Write>(out: &mut W, record: &Value) -> io::Result<()> {
    writeln!(out, "{}", record)
}

fn write_species<W: Write>(out: &mut W, position: usize, species: &Species) -> io::Result<()> {
    writeln!(out, "#{}  {}", position, species.name)?;
    if let Some(scientific) = species.scientific_name() {
        writeln!(out, "    {}", scientific)?;
    }
    writeln!(out, "{}", "─".repeat(LINE_WIDTH))?;

    if let Some(status) = species.conservation_status() {
        write_field(out, "Status", status)?;
    }
    if let Some(count) = species.observations() {
        write_field(out, "Observations", &count.to_string())?;
    }
    if let Some(INaturalist::Unavailable(reason)) = &species.attributes.inaturalist {
        write_field(out, "iNaturalist", reason)?;
    }
    if let Some(image) = species.primary_image() {
        write_field(out, "Image", image)?;
    }
    match species.attributes.audio.len() {
        0 => {}
        n => {
            let noun = if n == 1 { "recording" } else { "recordings" };
            let first = species.attributes.audio[0]
                .url
                .as_deref()
                .unwrap_or("no link");
            write_field(out, "Audio", &format!("{} {} ({})", n, noun, first))?;
        }
    }
    if let Some(error) = &species.attributes.error {
        write_status_line(out, icons::WARNING, error)?;
    }

    if let Some(summary) = species.summary_excerpt(SUMMARY_CHARS) {
        writeln!(out)?;
        for line in wrap(&summary, LINE_WIDTH - 4) {
            writeln!(out, "    {}", line)?;
        }
    }
    writeln!(out)
}

fn write_field<W: Write>(out: &mut W, label: &str, value: &str) -> io::Result<()> {
    writeln!(out, "  {:<14}{}", format!("{}:", label), value)
}

/// Write the closing summary for a finished (or interrupted) search.
pub fn write_footer<W: Write>(out: &mut W, view: &ExploreViewController) -> io::Result<()> {
    writeln!(out, "{}", "═".repeat(LINE_WIDTH))?;

    let count = view.len();
    match view.status() {
        ViewStatus::Loaded if view.is_showing_sample() => {
            write_status_line(out, icons::SAMPLE, &format!("{} sample species shown", count))?;
        }
        ViewStatus::Loaded => {
            let elapsed = view
                .elapsed()
                .map(|d| format!(" in {:.1}s", d.num_milliseconds() as f64 / 1000.0))
                .unwrap_or_default();
            write_status_line(
                out,
                icons::SUCCESS,
                &format!("{} species found for {}{}", count, view.search_term(), elapsed),
            )?;
        }
        ViewStatus::Empty => {
            write_status_line(
                out,
                icons::WARNING,
                &format!("No species found for {}", view.search_term()),
            )?;
        }
        ViewStatus::Error(message) => {
            write_status_line(out, icons::FAILURE, &message)?;
            if count > 0 {
                write_status_line(
                    out,
                    icons::WARNING,
                    &format!("{} species received before the failure", count),
                )?;
            }
            if let Some(hint) = view.error().map(|e| e.category().recovery_hint()) {
                writeln!(out, "    {}", hint)?;
            }
        }
        ViewStatus::Idle | ViewStatus::Loading => {}
    }

    if view.parse_failures() > 0 {
        let frames = if view.parse_failures() == 1 { "frame" } else { "frames" };
        write_status_line(
            out,
            icons::WARNING,
            &format!("{} {} could not be parsed and were skipped", view.parse_failures(), frames),
        )?;
    }
    Ok(())
}

/// Greedy word wrap; words longer than `width` get their own line.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if !line.is_empty() && line.chars().count() + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}
