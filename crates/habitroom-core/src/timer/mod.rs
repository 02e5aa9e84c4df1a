mod engine;
mod ticker;

pub use engine::{format_clock, Durations, Phase, TimerEngine, TimerSnapshot, TimerState};
pub use ticker::Ticker;
