//! Layout command for packing raw boxes.
//!
//! This module implements `jks layout`, which exposes the column packer
//! directly over JSON.

use std::io::Write;

use anyhow::{Context, Result};
use jks_core::{ColumnLayout, LayoutBox, pack_columns};
use serde::Deserialize;

/// A box as read from the input file.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RawBox {
    pub start: i64,
    pub duration: i64,
}

impl LayoutBox for RawBox {
    fn start(&self) -> i64 {
        self.start
    }

    fn duration(&self) -> i64 {
        self.duration
    }
}

/// Parses the input and packs it.
pub fn layout_json(input: &str, min_duration: i64) -> Result<ColumnLayout> {
    let boxes: Vec<RawBox> =
        serde_json::from_str(input).context("invalid input, expected a JSON array of boxes")?;
    if let Some((i, b)) = boxes.iter().enumerate().find(|(_, b)| b.duration < 0) {
        anyhow::bail!("box {i} has negative duration {}", b.duration);
    }
    Ok(pack_columns(&boxes, min_duration))
}

/// Runs the layout command, writing the result as one JSON line.
pub fn run<W: Write>(writer: &mut W, input: &str, min_duration: i64) -> Result<()> {
    let layout = layout_json(input, min_duration)?;
    tracing::debug!(column_count = layout.column_count, "layout computed");

    let json = serde_json::to_string(&layout)?;
    writeln!(writer, "{json}")?;
    Ok(())
}
