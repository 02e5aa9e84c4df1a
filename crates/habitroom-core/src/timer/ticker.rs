//! One-second tick source for interactive front ends.
//!
//! At most one countdown task exists per [`Ticker`]. Arming again aborts the
//! previous task before spawning the next, so two intervals never feed the
//! same engine.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

pub struct Ticker {
    period: Duration,
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            handle: None,
        }
    }

    pub fn every_second() -> Self {
        Self::new(Duration::from_secs(1))
    }

    /// Start ticking. The first tick arrives one period from now.
    ///
    /// Must be called from within a tokio runtime.
    pub fn arm(&mut self) -> mpsc::Receiver<()> {
        self.disarm();
        let (tx, rx) = mpsc::channel(1);
        let period = self.period;
        self.handle = Some(tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if tx.send(()).await.is_err() {
                    break;
                }
            }
        }));
        rx
    }

    pub fn disarm(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    pub fn is_armed(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.disarm();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn ticks_once_per_period() {
        let mut ticker = Ticker::every_second();
        let mut rx = ticker.arm();
        for _ in 0..3 {
            rx.recv().await.unwrap();
        }
        assert!(ticker.is_armed());
        ticker.disarm();
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn rearming_cancels_previous_countdown() {
        let mut ticker = Ticker::every_second();
        let mut first = ticker.arm();
        let mut second = ticker.arm();
        // The first task was aborted, so its sender is gone.
        assert!(first.recv().await.is_none());
        assert!(second.recv().await.is_some());
    }
}
