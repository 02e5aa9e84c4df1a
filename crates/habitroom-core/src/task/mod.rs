//! Task sessions: the units of work the focus timer is bound to.
//!
//! Sessions are kept in insertion order and persisted as one record.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::error::{StoreError, ValidationError};
use crate::storage::{keys, load_json, save_json, KvStore};

/// Task priority, always within 1 (lowest) ..= 5 (highest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "u8")]
pub struct Priority(u8);

impl Priority {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    const LABELS: [&'static str; 5] = ["lowest", "low", "medium", "high", "highest"];

    /// Out-of-range values are clamped rather than rejected.
    pub fn clamped(raw: i64) -> Self {
        Self(raw.clamp(i64::from(Self::MIN), i64::from(Self::MAX)) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn label(self) -> &'static str {
        Self::LABELS[usize::from(self.0 - Self::MIN)]
    }

    /// High and highest are rendered highlighted.
    pub fn is_urgent(self) -> bool {
        self.0 >= 4
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self(3)
    }
}

impl From<i64> for Priority {
    fn from(raw: i64) -> Self {
        Self::clamped(raw)
    }
}

impl From<Priority> for u8 {
    fn from(p: Priority) -> Self {
        p.0
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSession {
    /// Creation timestamp in epoch milliseconds.
    pub id: i64,
    pub task: String,
    #[serde(default)]
    pub tag: String,
    #[serde(default)]
    pub priority: Priority,
    /// Wall-clock `HH:MM:SS`, empty until the timer first starts.
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub notes: String,
    /// `YYYY-MM-DD` the session was created on.
    #[serde(default)]
    pub date: String,
}

impl TaskSession {
    pub fn tag_label(&self) -> &str {
        if self.tag.is_empty() {
            "untagged"
        } else {
            &self.tag
        }
    }
}

pub(crate) fn clock_time<C: Clock + ?Sized>(clock: &C) -> String {
    clock.now().format("%H:%M:%S").to_string()
}

#[derive(Debug, Clone, Default)]
pub struct TaskList {
    sessions: Vec<TaskSession>,
}

impl TaskList {
    pub fn load<S: KvStore + ?Sized>(store: &S) -> Result<Self, StoreError> {
        Ok(Self {
            sessions: load_json(store, keys::SESSIONS)?,
        })
    }

    pub fn save<S: KvStore + ?Sized>(&self, store: &mut S) -> Result<(), StoreError> {
        save_json(store, keys::SESSIONS, &self.sessions)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TaskSession> {
        self.sessions.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn get(&self, id: i64) -> Option<&TaskSession> {
        self.sessions.iter().find(|s| s.id == id)
    }

    pub fn get_mut(&mut self, id: i64) -> Option<&mut TaskSession> {
        self.sessions.iter_mut().find(|s| s.id == id)
    }

    /// Append a session. Blank text is rejected and nothing changes.
    pub fn add<C: Clock + ?Sized>(
        &mut self,
        text: &str,
        tag: &str,
        priority: Priority,
        clock: &C,
    ) -> Result<&TaskSession, ValidationError> {
        let task = text.trim();
        if task.is_empty() {
            return Err(ValidationError::BlankTask);
        }

        let mut id = clock.timestamp_ms();
        if let Some(last) = self.sessions.iter().map(|s| s.id).max() {
            id = id.max(last + 1);
        }

        self.sessions.push(TaskSession {
            id,
            task: task.to_string(),
            tag: tag.trim().to_string(),
            priority,
            start_time: String::new(),
            end_time: String::new(),
            completed: false,
            notes: String::new(),
            date: clock.today().format("%Y-%m-%d").to_string(),
        });
        tracing::info!(id, task, %priority, "task added");
        Ok(&self.sessions[self.sessions.len() - 1])
    }

    /// Remove by id. Returns whether anything was removed.
    pub fn delete(&mut self, id: i64) -> bool {
        let before = self.sessions.len();
        self.sessions.retain(|s| s.id != id);
        let removed = self.sessions.len() != before;
        if removed {
            tracing::info!(id, "task deleted");
        }
        removed
    }
}
