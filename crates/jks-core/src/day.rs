//! Day view assembly.
//!
//! Picks the activities and plans that fall inside one local calendar day,
//! packs them into columns and positions each one relative to midnight.

use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::Serialize;

use crate::entry::Entry;
use crate::layout::{LayoutBox, pack_columns};

/// Converts a local date at midnight to UTC.
/// Handles DST ambiguity by picking the earlier time.
fn local_midnight_to_utc<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::MIN);
    match tz.from_local_datetime(&midnight) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt.with_timezone(&Utc),
        LocalResult::None => {
            // Midnight skipped by a DST gap; 01:00 local exists in every zone we know of.
            let one_am = date.and_time(NaiveTime::MIN) + Duration::hours(1);
            tz.from_local_datetime(&one_am)
                .earliest()
                .map_or_else(|| midnight.and_utc(), |dt| dt.with_timezone(&Utc))
        }
    }
}

/// Returns the half-open UTC interval `[start, end)` covering `date` in `tz`.
pub fn day_bounds<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = local_midnight_to_utc(date, tz);
    let end = date
        .succ_opt()
        .map_or(start + Duration::days(1), |next| local_midnight_to_utc(next, tz));
    (start, end)
}

/// One positioned entry on the day view.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DayBlock {
    pub entry: Entry,

    /// Horizontal slot assigned by the packer.
    pub column: usize,

    /// Seconds from the start of the day to the start of the entry.
    pub offset: i64,

    /// True length of the entry in seconds, not floored.
    pub duration: i64,
}

/// Entries of one day, laid out in columns.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DayView {
    pub date: NaiveDate,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub column_count: usize,

    /// Blocks in the order their entries were given.
    pub blocks: Vec<DayBlock>,
}

impl DayView {
    /// Builds the view for `date` in `tz`.
    ///
    /// An entry is shown when it starts at or after midnight and ends before
    /// the next midnight. `min_duration` (seconds) only affects packing.
    pub fn build<Tz, I>(date: NaiveDate, tz: &Tz, entries: I, min_duration: i64) -> Self
    where
        Tz: TimeZone,
        I: IntoIterator<Item = Entry>,
    {
        let (start, end) = day_bounds(date, tz);

        let (selected, skipped): (Vec<Entry>, Vec<Entry>) = entries
            .into_iter()
            .partition(|e| e.time_start() >= start && e.time_end() < end);
        if !skipped.is_empty() {
            tracing::debug!(%date, skipped = skipped.len(), "entries outside the day");
        }

        let layout = pack_columns(&selected, min_duration);
        let day_start = start.timestamp();
        let blocks = selected
            .into_iter()
            .zip(layout.columns)
            .map(|(entry, column)| DayBlock {
                offset: entry.start() - day_start,
                duration: entry.duration(),
                column,
                entry,
            })
            .collect();

        Self {
            date,
            start,
            end,
            column_count: layout.column_count,
            blocks,
        }
    }

    /// Length of the day in seconds. Not always 86400 around DST changes.
    pub fn length(&self) -> i64 {
        (self.end - self.start).num_seconds()
    }

    /// Blocks in render order: by start, then column.
    pub fn blocks_by_start(&self) -> Vec<&DayBlock> {
        let mut blocks: Vec<&DayBlock> = self.blocks.iter().collect();
        blocks.sort_by_key(|b| (b.offset, b.column));
        blocks
    }

    /// Fraction of the day before the block starts.
    #[expect(
        clippy::cast_precision_loss,
        reason = "offsets within a day are far below f64's exact integer range"
    )]
    pub fn top_fraction(&self, block: &DayBlock) -> f64 {
        block.offset as f64 / self.length() as f64
    }

    /// Fraction of the day the block covers.
    #[expect(
        clippy::cast_precision_loss,
        reason = "durations within a day are far below f64's exact integer range"
    )]
    pub fn height_fraction(&self, block: &DayBlock) -> f64 {
        block.duration as f64 / self.length() as f64
    }
}
