//! Shared utilities for CLI commands.

use std::fs;
use std::io::{self, Read};
use std::path::Path;
use std::sync::LazyLock;

use anyhow::Context;
use chrono::{Days, NaiveDate};
use regex::Regex;

/// Pre-compiled regex for duration parsing.
static DURATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s*(s|m|h)?$").unwrap());

/// Parse a duration as seconds.
///
/// Supports:
/// - Plain seconds: "90"
/// - With a unit: "90s", "15m", "2h"
pub fn parse_duration(s: &str) -> anyhow::Result<i64> {
    let Some(caps) = DURATION_RE.captures(s.trim()) else {
        anyhow::bail!("Invalid duration: {s}. Use seconds (e.g., 90) or a unit (e.g., 15m, 1h)");
    };

    let n: i64 = caps[1].parse().context("failed to parse number in duration")?;
    let scale = match caps.get(2).map(|m| m.as_str()) {
        None | Some("s") => 1,
        Some("m") => 60,
        Some("h") => 3600,
        Some(unit) => anyhow::bail!("Unknown time unit: {unit}"),
    };

    n.checked_mul(scale)
        .with_context(|| format!("duration too large: {s}"))
}

/// Parse a day as an ISO date or a word relative to `today`.
pub fn parse_date(s: &str, today: NaiveDate) -> anyhow::Result<NaiveDate> {
    let date = match s {
        "today" => Some(today),
        "yesterday" => today.checked_sub_days(Days::new(1)),
        "tomorrow" => today.checked_add_days(Days::new(1)),
        _ => {
            return NaiveDate::parse_from_str(s, "%Y-%m-%d").with_context(|| {
                format!("invalid date {s:?}, expected YYYY-MM-DD, today, yesterday or tomorrow")
            });
        }
    };
    date.with_context(|| format!("date out of range: {s}"))
}

/// Read a whole input file, or stdin when `path` is `None` or `-`.
pub fn read_input(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}
