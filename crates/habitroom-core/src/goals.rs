//! Long-term numeric goals.
//!
//! A goal is reached when `progress >= target`; that is derived, never
//! stored. Progress only moves by +1.

use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::error::{CoreError, StoreError, ValidationError};
use crate::events::Event;
use crate::storage::{keys, load_json, save_json, KvStore};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    pub id: i64,
    pub name: String,
    pub target: u32,
    #[serde(default)]
    pub progress: u32,
}

impl Goal {
    pub fn is_reached(&self) -> bool {
        self.progress >= self.target
    }
}

#[derive(Debug, Clone, Default)]
pub struct GoalTracker {
    goals: Vec<Goal>,
}

impl GoalTracker {
    pub fn load<S: KvStore + ?Sized>(store: &S) -> Result<Self, StoreError> {
        Ok(Self {
            goals: load_json(store, keys::GOALS)?,
        })
    }

    fn save<S: KvStore + ?Sized>(&self, store: &mut S) -> Result<(), StoreError> {
        save_json(store, keys::GOALS, &self.goals)
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn get(&self, id: i64) -> Option<&Goal> {
        self.goals.iter().find(|g| g.id == id)
    }

    /// Append a goal with zero progress.
    ///
    /// # Errors
    /// A blank name or missing target aborts with no change; so does a zero
    /// target.
    pub fn add<S, C>(
        &mut self,
        store: &mut S,
        clock: &C,
        name: &str,
        target: Option<u32>,
    ) -> Result<Goal, CoreError>
    where
        S: KvStore + ?Sized,
        C: Clock + ?Sized,
    {
        let name = name.trim();
        let target = match target {
            Some(target) if !name.is_empty() => target,
            _ => return Err(ValidationError::IncompleteGoal.into()),
        };
        if target == 0 {
            return Err(ValidationError::InvalidValue {
                field: "target".into(),
                message: "must be greater than zero".into(),
            }
            .into());
        }

        let mut id = clock.timestamp_ms();
        if let Some(last) = self.goals.iter().map(|g| g.id).max() {
            id = id.max(last + 1);
        }
        let goal = Goal {
            id,
            name: name.to_string(),
            target,
            progress: 0,
        };
        self.goals.push(goal.clone());
        self.save(store)?;
        tracing::info!(id, name, target, "goal added");
        Ok(goal)
    }

    /// Add one to a goal's progress. Unknown ids are a no-op.
    ///
    /// Returns [`Event::GoalReached`] only on the increment that first brings
    /// progress up to the target.
    pub fn increment<S: KvStore + ?Sized>(
        &mut self,
        store: &mut S,
        id: i64,
    ) -> Result<Option<Event>, StoreError> {
        let Some(goal) = self.goals.iter_mut().find(|g| g.id == id) else {
            return Ok(None);
        };
        let was_reached = goal.is_reached();
        goal.progress = goal.progress.saturating_add(1);
        let event = (!was_reached && goal.is_reached()).then(|| Event::GoalReached {
            goal_id: goal.id,
            name: goal.name.clone(),
        });
        if event.is_some() {
            tracing::info!(id, name = %goal.name, "goal reached");
        }
        self.save(store)?;
        Ok(event)
    }
}
