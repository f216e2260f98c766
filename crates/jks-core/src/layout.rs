//! Multi-column layout for overlapping time boxes.
//!
//! Used by the day view to place activities and plans side by side when they
//! overlap. Each box gets the leftmost column that is free at its start.
//!
//! # Algorithm Summary
//!
//! 1. Stable sort by effective height (`max(duration, min_duration)`), tallest first
//! 2. Stable sort by start, earliest first
//! 3. First-fit: put each box in the lowest column whose bottom is at or before its start
//!
//! The two sorts are kept separate so that boxes sharing a start keep the
//! tallest-first order from the first pass. The column order first-fit
//! produces is the expected on-screen order.

use std::cmp::Reverse;

use serde::Serialize;

/// Anything that occupies a span of time on the day view.
///
/// This trait allows layout to work with different entry kinds
/// (activities, plans, or plain test fixtures).
pub trait LayoutBox {
    /// Start offset, e.g. Unix seconds.
    fn start(&self) -> i64;

    /// Length of the box. Expected to be non-negative.
    fn duration(&self) -> i64;
}

impl<T: LayoutBox + ?Sized> LayoutBox for &T {
    fn start(&self) -> i64 {
        (**self).start()
    }

    fn duration(&self) -> i64 {
        (**self).duration()
    }
}

/// Column assignment for one layout pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ColumnLayout {
    /// Number of columns used. Zero only for empty input.
    pub column_count: usize,

    /// Column of each box, indexed like the input slice.
    pub columns: Vec<usize>,
}

impl ColumnLayout {
    /// Returns the column of the box at `index` in the input slice.
    pub fn column_of(&self, index: usize) -> Option<usize> {
        self.columns.get(index).copied()
    }

    /// Returns true if no boxes were laid out.
    pub const fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Puts boxes in a multi-column layout.
///
/// `min_duration` floors every box's height for overlap purposes only, so
/// very short boxes still reserve some room in their column.
///
/// The input is left untouched; all working state is allocated per call.
pub fn pack_columns<B: LayoutBox>(boxes: &[B], min_duration: i64) -> ColumnLayout {
    let heights: Vec<i64> = boxes
        .iter()
        .map(|b| b.duration().max(min_duration))
        .collect();

    let mut order: Vec<usize> = (0..boxes.len()).collect();
    order.sort_by_key(|&i| Reverse(heights[i]));
    order.sort_by_key(|&i| boxes[i].start());

    let mut columns = vec![0; boxes.len()];
    // Where each open column becomes free again.
    let mut bottoms: Vec<i64> = Vec::new();

    for &i in &order {
        let top = boxes[i].start();
        let bottom = top.saturating_add(heights[i]);

        let column = match bottoms.iter().position(|&b| b <= top) {
            Some(column) => {
                bottoms[column] = bottom;
                column
            }
            None => {
                bottoms.push(bottom);
                bottoms.len() - 1
            }
        };
        columns[i] = column;
    }

    tracing::trace!(
        boxes = boxes.len(),
        column_count = bottoms.len(),
        min_duration,
        "packed columns"
    );

    ColumnLayout {
        column_count: bottoms.len(),
        columns,
    }
}
