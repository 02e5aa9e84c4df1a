use chrono::NaiveDate;
use clap::Subcommand;

use super::{open_tracker, print_json, CliResult};

#[derive(Subcommand)]
pub enum ReportAction {
    /// Completion overview for one Monday-to-Sunday week
    Weekly {
        /// Any date in the week (default this week)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Completed habits per day, days 1-30 of this month
    Monthly,
}

pub fn run(action: ReportAction) -> CliResult {
    let mut tracker = open_tracker()?;

    match action {
        ReportAction::Weekly { date } => {
            if let Some(date) = date {
                tracker.jump_to_week(date);
            }
            print_json(&tracker.weekly_overview()?)?;
        }
        ReportAction::Monthly => {
            print_json(&tracker.monthly_report()?)?;
        }
    }
    Ok(())
}
