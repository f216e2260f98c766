//! Day command for showing one day's activities and plans.
//!
//! This module implements `jks day`, which lays out a day from an agenda file
//! and prints it as a listing plus a column grid, or as JSON.

use std::fmt;
use std::io::Write;

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate, TimeZone};
use jks_core::{Agenda, DayBlock, DayView, Entry};

/// Options for one `jks day` invocation.
#[derive(Debug, Clone, Copy)]
pub struct DayOptions {
    pub date: NaiveDate,
    pub min_duration: i64,
    pub slot_minutes: i64,
    pub json: bool,
}

/// Parses and validates an agenda document.
pub fn parse_agenda(input: &str) -> Result<Agenda> {
    let agenda: Agenda = serde_json::from_str(input).context("invalid agenda JSON")?;
    agenda.validate().context("invalid agenda")?;
    Ok(agenda)
}

/// Runs the day command.
pub fn run<W, Tz>(writer: &mut W, agenda: &Agenda, tz: &Tz, options: DayOptions) -> Result<()>
where
    W: Write,
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let view = DayView::build(options.date, tz, agenda.entries(), options.min_duration);
    tracing::debug!(
        date = %options.date,
        blocks = view.blocks.len(),
        column_count = view.column_count,
        "day view built"
    );

    if options.json {
        let json = serde_json::to_string_pretty(&view)?;
        writeln!(writer, "{json}")?;
    } else {
        write!(writer, "{}", format_day(&view, agenda, tz, options.slot_minutes))?;
    }
    Ok(())
}

// ========== Text Formatting ==========

fn task_title(agenda: &Agenda, entry: &Entry) -> String {
    agenda.task(entry.task_id()).map_or_else(
        || format!("(unknown task {})", entry.task_id()),
        |t| t.quick_title.clone(),
    )
}

fn format_block<Tz>(block: &DayBlock, agenda: &Agenda, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let entry = &block.entry;
    let start = entry.time_start().with_timezone(tz).format("%H:%M");
    let end = entry.time_end().with_timezone(tz).format("%H:%M");
    let done = match entry {
        Entry::Activity(a) if a.done => " (done)",
        _ => "",
    };
    format!(
        "{start}-{end}  col {}  {:<8} #{:<4} {}{done}",
        block.column,
        entry.kind(),
        entry.id(),
        task_title(agenda, entry),
    )
}

/// Draws one row per slot with a letter per occupied column.
///
/// `a` marks an activity and `p` a plan.
fn format_grid<Tz>(view: &DayView, tz: &Tz, slot_minutes: i64) -> Vec<String>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let slot = slot_minutes.max(1) * 60;
    // Zero-length blocks still mark the slot they sit in.
    let extent = |b: &DayBlock| (b.offset, b.offset + b.duration.max(1));

    let Some(first) = view.blocks.iter().map(|b| extent(b).0).min() else {
        return Vec::new();
    };
    let last = view.blocks.iter().map(|b| extent(b).1).max().unwrap_or(first);

    let mut rows = Vec::new();
    let mut row_start = first.div_euclid(slot) * slot;
    while row_start < last {
        let row_end = row_start + slot;
        let mut cells = vec![' '; view.column_count];
        for block in &view.blocks {
            let (top, bottom) = extent(block);
            if top < row_end && bottom > row_start {
                cells[block.column] = match block.entry {
                    Entry::Activity(_) => 'a',
                    Entry::Plan(_) => 'p',
                };
            }
        }
        let time = (view.start + Duration::seconds(row_start))
            .with_timezone(tz)
            .format("%H:%M");
        let cells: String = cells.into_iter().collect();
        rows.push(format!("{time} |{}", cells.trim_end()));
        row_start = row_end;
    }
    rows
}

/// Formats a day view as a listing followed by a column grid.
pub fn format_day<Tz>(view: &DayView, agenda: &Agenda, tz: &Tz, slot_minutes: i64) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let mut output = String::new();
    let heading = view.date.format("%Y-%m-%d %a");

    if view.blocks.is_empty() {
        output.push_str(&format!("{heading}: no entries\n"));
        return output;
    }

    output.push_str(&format!(
        "{heading}: {} entries in {} columns\n",
        view.blocks.len(),
        view.column_count
    ));
    for block in view.blocks_by_start() {
        output.push_str(&format_block(block, agenda, tz));
        output.push('\n');
    }

    output.push('\n');
    for row in format_grid(view, tz, slot_minutes) {
        output.push_str(&row);
        output.push('\n');
    }
    output
}
