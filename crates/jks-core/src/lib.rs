//! Core domain logic for jks.
//!
//! This crate contains the fundamental types and logic for:
//! - Entries: tasks, logged activities and plans
//! - Layout: packing overlapping time boxes into side-by-side columns
//! - Day view: selecting one day's entries and positioning them

pub mod day;
pub mod entry;
pub mod layout;
pub mod types;

pub use day::{DayBlock, DayView, day_bounds};
pub use entry::{Activity, Agenda, Entry, Plan, Task};
pub use layout::{ColumnLayout, LayoutBox, pack_columns};
pub use types::{ActivityId, PlanId, TaskId, ValidationError};
