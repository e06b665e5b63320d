use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::Duration,
};

use thiserror::Error;
use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{self, Instant, MissedTickBehavior},
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RotatorError {
    #[error("a slideshow needs at least one image")]
    Empty,
    #[error("slide {index} is out of range for {len} images")]
    OutOfRange { index: usize, len: usize },
}

/// Cycles through a fixed list of images, advancing once per interval.
///
/// Manual moves restart the timer, so the next automatic step always comes a
/// full interval after the last user action. The timer task is aborted when
/// the rotator is dropped.
#[derive(Debug)]
pub struct SlideRotator {
    images: Arc<[String]>,
    interval: Duration,
    index: Arc<watch::Sender<usize>>,
    // Bumped under the channel lock by every manual move; a tick from an
    // older timer that races with the move sees the new value and skips.
    epoch: Arc<AtomicU64>,
    ticker: Option<JoinHandle<()>>,
}

impl SlideRotator {
    /// Starts at slide 0. Must be called from within a tokio runtime.
    pub fn start(images: Vec<String>, interval: Duration) -> Result<Self, RotatorError> {
        if images.is_empty() {
            return Err(RotatorError::Empty);
        }
        let (index, _) = watch::channel(0);
        let mut rotator = Self {
            images: images.into(),
            interval,
            index: Arc::new(index),
            epoch: Arc::default(),
            ticker: None,
        };
        rotator.restart_timer();
        Ok(rotator)
    }

    pub fn index(&self) -> usize {
        *self.index.borrow()
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    pub fn current_image(&self) -> &str {
        &self.images[self.index()]
    }

    pub fn subscribe(&self) -> watch::Receiver<usize> {
        self.index.subscribe()
    }

    pub fn next(&mut self) -> usize {
        let len = self.len();
        self.step(|index| (index + 1) % len);
        self.index()
    }

    pub fn previous(&mut self) -> usize {
        let len = self.len();
        self.step(|index| (index + len - 1) % len);
        self.index()
    }

    pub fn jump_to(&mut self, target: usize) -> Result<usize, RotatorError> {
        if target >= self.len() {
            return Err(RotatorError::OutOfRange {
                index: target,
                len: self.len(),
            });
        }
        self.step(|_| target);
        Ok(target)
    }

    /// Stops the timer. Dropping the rotator does the same.
    pub fn stop(mut self) {
        self.cancel_timer();
    }

    fn step(&mut self, to: impl FnOnce(usize) -> usize) {
        let epoch = &self.epoch;
        self.index.send_modify(|index| {
            epoch.fetch_add(1, Ordering::SeqCst);
            *index = to(*index);
        });
        self.restart_timer();
    }

    fn restart_timer(&mut self) {
        self.cancel_timer();

        let index = Arc::clone(&self.index);
        let epoch = Arc::clone(&self.epoch);
        let started_in = epoch.load(Ordering::SeqCst);
        let len = self.len();
        let period = self.interval;
        let first_tick = Instant::now() + period;
        self.ticker = Some(tokio::spawn(async move {
            let mut ticks = time::interval_at(first_tick, period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticks.tick().await;
                let advanced = index.send_if_modified(|index| {
                    if epoch.load(Ordering::SeqCst) != started_in {
                        return false;
                    }
                    *index = (*index + 1) % len;
                    true
                });
                if !advanced {
                    break;
                }
            }
        }));
    }

    fn cancel_timer(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
        }
    }
}

impl Drop for SlideRotator {
    fn drop(&mut self) {
        self.cancel_timer();
    }
}

#[cfg(test)]
#[path = "tests/rotator_tests.rs"]
mod tests;
