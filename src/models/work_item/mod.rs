// Work item module
// The scheduled task rectangle: project, name, tags, period, assignee, state

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::member::Member;
use crate::models::period::Period;

/// Project a work item belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Project(String);

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Pipe-delimited tag set, e.g. `design|review`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tags {
    tags: Vec<String>,
}

impl Tags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_text(text: &str) -> Self {
        let tags = text
            .split('|')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();
        Self { tags }
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }
}

impl fmt::Display for Tags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tags.join("|"))
    }
}

/// Lifecycle state of a work item. `New` is the pre-edit placeholder and is
/// never offered by editors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskState {
    #[default]
    New,
    Active,
    Background,
    Done,
}

impl TaskState {
    /// The states an editor should offer.
    pub fn selectable() -> [TaskState; 3] {
        [TaskState::Active, TaskState::Background, TaskState::Done]
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TaskState::New => "New",
            TaskState::Active => "Active",
            TaskState::Background => "Background",
            TaskState::Done => "Done",
        };
        f.write_str(text)
    }
}

impl FromStr for TaskState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "New" => Ok(TaskState::New),
            "Active" => Ok(TaskState::Active),
            "Background" => Ok(TaskState::Background),
            "Done" => Ok(TaskState::Done),
            other => Err(format!("unknown task state: {other}")),
        }
    }
}

/// One scheduled task on the grid.
///
/// Equality is structural over every field, and `Clone` yields a fully
/// independent copy; the drag machinery relies on both to snapshot and
/// compare item states.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkItem {
    pub project: Project,
    pub name: String,
    pub tags: Tags,
    pub period: Period,
    pub assigned_member: Member,
    pub state: TaskState,
    pub description: String,
}

impl WorkItem {
    pub fn new(
        project: Project,
        name: impl Into<String>,
        tags: Tags,
        period: Period,
        assigned_member: Member,
        state: TaskState,
    ) -> Self {
        Self {
            project,
            name: name.into(),
            tags,
            period,
            assigned_member,
            state,
            description: String::new(),
        }
    }
}

impl fmt::Display for WorkItem {
    /// Canonical one-line form, used for hover text and name-pattern
    /// filtering.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} {} {} {}",
            self.project, self.name, self.assigned_member, self.period, self.state
        )?;
        if !self.tags.is_empty() {
            write!(f, " {}", self.tags)?;
        }
        Ok(())
    }
}
