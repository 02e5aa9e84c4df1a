use clap::Subcommand;

use super::{open_tracker, print_events, print_json, CliResult};

#[derive(Subcommand)]
pub enum GoalAction {
    /// Add a goal with a numeric target
    Add {
        name: String,
        target: u32,
    },
    /// List goals with progress
    List,
    /// Add one to a goal's progress
    Inc {
        id: i64,
    },
}

pub fn run(action: GoalAction) -> CliResult {
    let mut tracker = open_tracker()?;

    match action {
        GoalAction::Add { name, target } => {
            print_json(&tracker.add_goal(&name, Some(target))?)?;
        }
        GoalAction::List => {
            print_json(tracker.goals())?;
        }
        GoalAction::Inc { id } => {
            let events = tracker.increment_goal(id)?;
            print_events(&events)?;
            match tracker.goals().iter().find(|g| g.id == id) {
                Some(goal) => print_json(goal)?,
                None => println!("Goal not found: {id}"),
            }
        }
    }
    Ok(())
}
