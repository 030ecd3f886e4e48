// Client-side request pacing.
//
// The backend spends per-endpoint quota on the social platform for every
// call (a handful of retweets per 15 minutes, for example). With a rate
// configured, each call books the next free slot on a shared timeline and
// sleeps until that slot comes up, so back-to-back shell commands are
// spread out instead of hitting the backend in one burst.

use std::sync::{Arc, Mutex, PoisonError};

use anyhow::{bail, Context, Result};
use tokio::time::{Duration, Instant};
use tracing::debug;

/// Longest spacing a rate may ask for. Anything slower is a typo, not a rate.
pub const MAX_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

/// Spacing between calls for a requests-per-second limit.
///
/// Zero means "no limit" and yields `Duration::ZERO`. Negative, non-finite
/// and vanishingly small rates are rejected.
pub fn min_interval(requests_per_second: f64) -> Result<Duration> {
    if requests_per_second == 0.0 {
        return Ok(Duration::ZERO);
    }
    if !requests_per_second.is_finite() || requests_per_second < 0.0 {
        bail!("request rate must be a positive number of requests per second, got {requests_per_second}");
    }

    let interval = Duration::try_from_secs_f64(requests_per_second.recip())
        .with_context(|| format!("request rate {requests_per_second}/s is too low to pace"))?;
    if interval > MAX_INTERVAL {
        bail!(
            "request rate {requests_per_second}/s means one call every {}s (limit is one per day)",
            interval.as_secs()
        );
    }
    Ok(interval)
}

/// Hands out evenly spaced call slots. Clones share one timeline.
#[derive(Debug, Clone)]
pub struct RequestPacer {
    interval: Duration,
    next_slot: Arc<Mutex<Option<Instant>>>,
}

impl RequestPacer {
    pub fn per_second(requests_per_second: f64) -> Result<Self> {
        Ok(Self {
            interval: min_interval(requests_per_second)?,
            next_slot: Arc::new(Mutex::new(None)),
        })
    }

    /// Book the next slot for `endpoint` and sleep until it arrives.
    ///
    /// Returns how long the caller was held back.
    pub async fn wait_turn(&self, endpoint: &str) -> Duration {
        let now = Instant::now();
        let slot = {
            // The guard never lives across an await, so a poisoned lock
            // still holds a consistent timestamp.
            let mut next = self.next_slot.lock().unwrap_or_else(PoisonError::into_inner);
            let slot = next.map_or(now, |booked| booked.max(now));
            *next = Some(slot + self.interval);
            slot
        };

        let held = slot.saturating_duration_since(now);
        if !held.is_zero() {
            debug!(endpoint, held_ms = held.as_millis() as u64, "Pacing request");
            tokio::time::sleep_until(slot).await;
        }
        held
    }
}
