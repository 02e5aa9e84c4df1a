pub mod config;
pub mod goal;
pub mod habit;
pub mod report;
pub mod task;
pub mod timer;
pub mod view;

use habitroom_core::{Config, Database, Event, SystemClock, Tracker};

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Tracker over the on-disk store and the system clock.
pub fn open_tracker() -> Result<Tracker<Database, SystemClock>, Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let db = Database::open()?;
    Ok(Tracker::new(db, SystemClock, &config)?)
}

pub fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// One compact JSON line per event, then its notification text on stderr.
pub fn print_events(events: &[Event]) -> CliResult {
    for event in events {
        println!("{}", serde_json::to_string(event)?);
        if let Some(message) = event.message() {
            eprintln!("{message}");
        }
    }
    Ok(())
}
