//! Task session commands for CLI.

use clap::Subcommand;

use super::{open_tracker, print_json, CliResult};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a task session
    Add {
        /// Task text
        text: String,
        /// Optional tag
        #[arg(long, default_value = "")]
        tag: String,
        /// Priority, 1 (lowest) to 5 (highest); out-of-range values are clamped
        #[arg(long, default_value = "3", allow_negative_numbers = true)]
        priority: i64,
    },
    /// List task sessions in creation order
    List,
    /// Delete a task session
    Delete {
        /// Task session id
        id: i64,
    },
}

pub fn run(action: TaskAction) -> CliResult {
    let mut tracker = open_tracker()?;

    match action {
        TaskAction::Add {
            text,
            tag,
            priority,
        } => {
            let session = tracker.add_task(&text, &tag, priority)?;
            eprintln!("Task created: {}", session.id);
            print_json(&session)?;
        }
        TaskAction::List => {
            print_json(&tracker.timer_view().tasks)?;
        }
        TaskAction::Delete { id } => {
            if tracker.delete_task(id)? {
                println!("Task deleted: {id}");
            } else {
                println!("Task not found: {id}");
            }
        }
    }
    Ok(())
}
