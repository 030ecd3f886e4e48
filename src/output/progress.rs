// Busy indicator shown while a backend request is in flight.
//
// `BusyGuard` clears the indicator when dropped, so every exit path of a
// request (success, `success: false`, transport error, early `?`) leaves the
// terminal clean.

use std::sync::Mutex;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Something that can show and hide a busy message.
pub trait Indicator: Send + Sync {
    fn show(&self, message: &str);
    fn clear(&self);
}

/// Terminal spinner backed by indicatif.
#[derive(Default)]
pub struct Spinner {
    bar: Mutex<Option<ProgressBar>>,
}

impl Spinner {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Indicator for Spinner {
    fn show(&self, message: &str) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("  {spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        if let Ok(mut slot) = self.bar.lock() {
            if let Some(previous) = slot.replace(pb) {
                previous.finish_and_clear();
            }
        }
    }

    fn clear(&self) {
        if let Ok(mut slot) = self.bar.lock() {
            if let Some(pb) = slot.take() {
                pb.finish_and_clear();
            }
        }
    }
}

/// Indicator that shows nothing (non-interactive output, tests).
pub struct NoIndicator;

impl Indicator for NoIndicator {
    fn show(&self, _message: &str) {}
    fn clear(&self) {}
}

/// Shows a message on creation and clears it on drop.
pub struct BusyGuard<'a> {
    indicator: &'a dyn Indicator,
}

impl<'a> BusyGuard<'a> {
    pub fn start(indicator: &'a dyn Indicator, message: &str) -> Self {
        indicator.show(message);
        Self { indicator }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.indicator.clear();
    }
}
