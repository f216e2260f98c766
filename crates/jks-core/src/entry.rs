//! Tasks, activities and plans.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::layout::LayoutBox;
use crate::types::{ActivityId, PlanId, TaskId, ValidationError};

/// Something to be done.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,

    /// Short title shown on the day view.
    pub quick_title: String,

    /// Free-form description (Markdown).
    #[serde(default)]
    pub description: String,

    /// After this instant completing the task is useless.
    ///
    /// For example, studying for an exam is useless once the exam starts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<DateTime<Utc>>,

    /// When the task should be completed by.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due: Option<DateTime<Utc>>,
}

/// A logged work session against a task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Activity {
    pub id: ActivityId,
    pub task_id: TaskId,

    #[serde(default)]
    pub location: String,

    pub time_start: DateTime<Utc>,
    pub time_end: DateTime<Utc>,

    /// Whether the task was finished during this session.
    #[serde(default)]
    pub done: bool,

    #[serde(default)]
    pub note: String,
}

impl Activity {
    /// Checks that the session does not end before it starts.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.time_end < self.time_start {
            return Err(ValidationError::EndBeforeStart {
                what: "activity",
                id: self.id.get(),
            });
        }
        Ok(())
    }
}

impl LayoutBox for Activity {
    fn start(&self) -> i64 {
        self.time_start.timestamp()
    }

    fn duration(&self) -> i64 {
        (self.time_end - self.time_start).num_seconds()
    }
}

/// A window in which a task is expected to be worked on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Plan {
    pub id: PlanId,
    pub task_id: TaskId,

    /// The activity that fulfilled this plan, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_id: Option<ActivityId>,

    #[serde(default)]
    pub location: String,

    /// Work may start at or after this instant.
    pub time_at_after: DateTime<Utc>,

    /// Work should finish before this instant.
    pub time_before: DateTime<Utc>,

    /// Minimum expected effort in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ge: Option<i64>,

    /// Effort should stay below this many seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_lt: Option<i64>,
}

impl Plan {
    /// Checks the window and the effort bounds.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.time_before < self.time_at_after {
            return Err(ValidationError::EndBeforeStart {
                what: "plan",
                id: self.id.get(),
            });
        }
        if let (Some(ge), Some(lt)) = (self.duration_ge, self.duration_lt) {
            if ge > lt {
                return Err(ValidationError::DurationBoundsInverted {
                    id: self.id.get(),
                    ge,
                    lt,
                });
            }
        }
        Ok(())
    }
}

impl LayoutBox for Plan {
    fn start(&self) -> i64 {
        self.time_at_after.timestamp()
    }

    fn duration(&self) -> i64 {
        (self.time_before - self.time_at_after).num_seconds()
    }
}

/// An activity or a plan, as placed on the day view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Entry {
    Activity(Activity),
    Plan(Plan),
}

impl Entry {
    /// The task this entry belongs to.
    pub const fn task_id(&self) -> TaskId {
        match self {
            Self::Activity(a) => a.task_id,
            Self::Plan(p) => p.task_id,
        }
    }

    /// When the entry begins.
    pub const fn time_start(&self) -> DateTime<Utc> {
        match self {
            Self::Activity(a) => a.time_start,
            Self::Plan(p) => p.time_at_after,
        }
    }

    /// When the entry ends.
    pub const fn time_end(&self) -> DateTime<Utc> {
        match self {
            Self::Activity(a) => a.time_end,
            Self::Plan(p) => p.time_before,
        }
    }

    /// Short label for the entry kind.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Activity(_) => "activity",
            Self::Plan(_) => "plan",
        }
    }

    /// Raw row number of the activity or plan.
    pub const fn id(&self) -> i64 {
        match self {
            Self::Activity(a) => a.id.get(),
            Self::Plan(p) => p.id.get(),
        }
    }

    /// Validates the underlying activity or plan.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Self::Activity(a) => a.validate(),
            Self::Plan(p) => p.validate(),
        }
    }
}

impl LayoutBox for Entry {
    fn start(&self) -> i64 {
        match self {
            Self::Activity(a) => a.start(),
            Self::Plan(p) => p.start(),
        }
    }

    fn duration(&self) -> i64 {
        match self {
            Self::Activity(a) => a.duration(),
            Self::Plan(p) => p.duration(),
        }
    }
}

impl From<Activity> for Entry {
    fn from(a: Activity) -> Self {
        Self::Activity(a)
    }
}

impl From<Plan> for Entry {
    fn from(p: Plan) -> Self {
        Self::Plan(p)
    }
}

/// A set of tasks with their activities and plans.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Agenda {
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub activities: Vec<Activity>,
    #[serde(default)]
    pub plans: Vec<Plan>,
}

impl Agenda {
    /// Activities followed by plans, as one sequence.
    pub fn entries(&self) -> Vec<Entry> {
        self.activities
            .iter()
            .cloned()
            .map(Entry::Activity)
            .chain(self.plans.iter().cloned().map(Entry::Plan))
            .collect()
    }

    /// Looks up a task by ID.
    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Tasks keyed by ID.
    pub fn tasks_by_id(&self) -> HashMap<TaskId, &Task> {
        self.tasks.iter().map(|t| (t.id, t)).collect()
    }

    /// Validates every entry and its task reference.
    ///
    /// Stops at the first problem found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let tasks = self.tasks_by_id();
        for entry in self.entries() {
            entry.validate()?;
            let task_id = entry.task_id();
            if !tasks.contains_key(&task_id) {
                return Err(ValidationError::UnknownTask {
                    what: entry.kind(),
                    id: entry.id(),
                    task_id: task_id.get(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::TimeZone;

    fn ts(hour: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 6, hour, min, 0).unwrap()
    }

    fn activity(id: i64, start: DateTime<Utc>, end: DateTime<Utc>) -> Activity {
        Activity {
            id: ActivityId::new(id).unwrap(),
            task_id: TaskId::new(1).unwrap(),
            location: String::new(),
            time_start: start,
            time_end: end,
            done: false,
            note: String::new(),
        }
    }

    fn plan(id: i64, start: DateTime<Utc>, end: DateTime<Utc>) -> Plan {
        Plan {
            id: PlanId::new(id).unwrap(),
            task_id: TaskId::new(1).unwrap(),
            activity_id: None,
            location: String::new(),
            time_at_after: start,
            time_before: end,
            duration_ge: None,
            duration_lt: None,
        }
    }

    #[test]
    fn test_activity_layout_in_seconds() {
        let a = activity(1, ts(9, 0), ts(10, 30));
        assert_eq!(a.start(), ts(9, 0).timestamp());
        assert_eq!(a.duration(), 90 * 60);
    }

    #[test]
    fn test_plan_layout_uses_window() {
        let p = plan(1, ts(13, 0), ts(13, 45));
        assert_eq!(p.start(), ts(13, 0).timestamp());
        assert_eq!(p.duration(), 45 * 60);
    }

    #[test]
    fn test_activity_rejects_inverted_interval() {
        let a = activity(3, ts(10, 0), ts(9, 0));
        assert_eq!(
            a.validate(),
            Err(ValidationError::EndBeforeStart {
                what: "activity",
                id: 3
            })
        );
    }

    #[test]
    fn test_zero_length_activity_is_valid() {
        assert!(activity(1, ts(10, 0), ts(10, 0)).validate().is_ok());
    }

    #[test]
    fn test_plan_rejects_inverted_duration_bounds() {
        let mut p = plan(2, ts(8, 0), ts(12, 0));
        p.duration_ge = Some(3600);
        p.duration_lt = Some(1800);
        assert!(matches!(
            p.validate(),
            Err(ValidationError::DurationBoundsInverted { id: 2, .. })
        ));
    }

    #[test]
    fn test_entry_serializes_with_kind_tag() {
        let entry = Entry::from(plan(4, ts(8, 0), ts(9, 0)));
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["kind"], "plan");
        assert_eq!(json["id"], 4);

        let parsed: Entry = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, entry);
    }

    #[test]
    fn test_agenda_entries_put_activities_first() {
        let agenda = Agenda {
            tasks: vec![],
            activities: vec![activity(1, ts(11, 0), ts(12, 0))],
            plans: vec![plan(1, ts(9, 0), ts(10, 0))],
        };
        let kinds: Vec<_> = agenda.entries().iter().map(Entry::kind).collect();
        assert_eq!(kinds, vec!["activity", "plan"]);
    }

    #[test]
    fn test_agenda_reports_unknown_task() {
        let agenda = Agenda {
            tasks: vec![],
            activities: vec![activity(5, ts(9, 0), ts(10, 0))],
            plans: vec![],
        };
        let err = agenda.validate().unwrap_err();
        assert_eq!(err.to_string(), "activity 5 refers to unknown task 1");
    }

    #[test]
    fn test_agenda_deserializes_missing_lists() {
        let json = r#"{
            "tasks": [{"id": 1, "quick_title": "Write report"}],
            "activities": [{
                "id": 1,
                "task_id": 1,
                "time_start": "2024-05-06T09:00:00Z",
                "time_end": "2024-05-06T10:00:00Z"
            }]
        }"#;
        let agenda: Agenda = serde_json::from_str(json).unwrap();

        assert!(agenda.plans.is_empty());
        assert!(agenda.validate().is_ok());
        let task = agenda.task(TaskId::new(1).unwrap()).unwrap();
        assert_eq!(task.quick_title, "Write report");
        assert_eq!(task.deadline, None);
    }
}
