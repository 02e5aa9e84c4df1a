use chrono::NaiveDate;
use clap::Subcommand;

use super::{open_tracker, print_events, print_json, CliResult};

#[derive(Subcommand)]
pub enum HabitAction {
    /// Show every habit for a day (default today)
    List {
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Flip a habit's completion
    Toggle {
        id: u32,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Replace a habit's note
    Note {
        id: u32,
        text: String,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Register a custom habit
    Add {
        name: String,
        #[arg(long, default_value = "⭐")]
        icon: String,
    },
    /// Acknowledge the day's record
    Save {
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

pub fn run(action: HabitAction) -> CliResult {
    let mut tracker = open_tracker()?;

    match action {
        HabitAction::List { date } => {
            if let Some(date) = date {
                tracker.jump_to_date(date);
            }
            print_json(&tracker.day_view()?)?;
        }
        HabitAction::Toggle { id, date } => {
            if let Some(date) = date {
                tracker.jump_to_date(date);
            }
            print_events(&tracker.toggle_habit(id)?)?;
            print_json(&tracker.day_view()?)?;
        }
        HabitAction::Note { id, text, date } => {
            if let Some(date) = date {
                tracker.jump_to_date(date);
            }
            tracker.set_notes(id, &text)?;
            print_json(&tracker.day_view()?)?;
        }
        HabitAction::Add { name, icon } => {
            print_json(&tracker.add_habit(&name, &icon)?)?;
        }
        HabitAction::Save { date } => {
            if let Some(date) = date {
                tracker.jump_to_date(date);
            }
            print_events(&tracker.save_day())?;
        }
    }
    Ok(())
}
