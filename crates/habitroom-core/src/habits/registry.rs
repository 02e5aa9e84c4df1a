use serde::{Deserialize, Serialize};

use crate::error::{StoreError, ValidationError};
use crate::storage::{keys, load_json, save_json, KvStore};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub icon: String,
}

impl Habit {
    fn new(id: u32, name: &str, icon: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            icon: icon.to_string(),
        }
    }
}

/// The fixed habits every user starts with.
pub fn builtin_habits() -> Vec<Habit> {
    vec![
        Habit::new(1, "Wake up on time", "🌅"),
        Habit::new(2, "Exercise 30 minutes", "🏃"),
        Habit::new(3, "Drink enough water", "💧"),
        Habit::new(4, "Read or study", "📚"),
        Habit::new(5, "Go to bed on time", "😴"),
        Habit::new(6, "Meditate or relax", "🧘"),
    ]
}

/// Built-in habits followed by user-defined ones.
#[derive(Debug, Clone, Default)]
pub struct HabitRegistry {
    custom: Vec<Habit>,
}

impl HabitRegistry {
    pub fn load<S: KvStore + ?Sized>(store: &S) -> Result<Self, StoreError> {
        Ok(Self {
            custom: load_json(store, keys::CUSTOM_HABITS)?,
        })
    }

    pub fn all(&self) -> Vec<Habit> {
        let mut habits = builtin_habits();
        habits.extend(self.custom.iter().cloned());
        habits
    }

    pub fn find(&self, id: u32) -> Option<Habit> {
        self.all().into_iter().find(|h| h.id == id)
    }

    /// Display name for a possibly dangling id.
    pub fn display_name(&self, id: u32) -> String {
        self.find(id)
            .map(|h| h.name)
            .unwrap_or_else(|| format!("#{id}"))
    }

    /// Register a user-defined habit and persist the custom list.
    pub fn add_custom<S: KvStore + ?Sized>(
        &mut self,
        store: &mut S,
        name: &str,
        icon: &str,
    ) -> Result<Habit, crate::error::CoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::BlankHabit.into());
        }
        let id = self.all().iter().map(|h| h.id).max().unwrap_or(0) + 1;
        let habit = Habit::new(id, name, icon.trim());
        self.custom.push(habit.clone());
        save_json(store, keys::CUSTOM_HABITS, &self.custom)?;
        tracing::info!(id, name, "custom habit added");
        Ok(habit)
    }
}
