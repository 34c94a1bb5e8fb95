//! Scheduler for refreshing the feed at regular intervals.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use time::OffsetDateTime;
use tracing::{Instrument as _, Level, event, span};

/// Configuration for periodic feed refreshes.
///
/// The scheduler allows configuring when to start refreshing and how often.
/// Refreshes are aligned to `from`, so a schedule of `every = "1d"` starting at
/// 03:00 keeps running at 03:00 after a restart.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Scheduler {
    /// An RFC3339 timestamp to start the schedule from (if omitted or empty, defaults to now)
    #[serde(with = "time::serde::rfc3339::option", default)]
    pub from: Option<time::OffsetDateTime>,
    /// How often to refresh
    #[serde(with = "humantime_serde::option", default)]
    pub every: Option<Duration>,
}

/// A schedule that would refresh continuously.
#[derive(Debug, Error)]
#[error("schedule.every must be longer than zero")]
pub struct ZeroInterval;

impl Scheduler {
    /// Reject an `every` of zero, which has no sensible meaning.
    pub fn validate(&self) -> Result<(), ZeroInterval> {
        match self.every {
            Some(every) if every.is_zero() => Err(ZeroInterval),
            _ => Ok(()),
        }
    }

    /// Schedule and execute a function at regular intervals.
    ///
    /// Returns immediately with `Ok(())` if no interval is configured or the
    /// interval is zero (see [`Scheduler::validate`]), and with the first error
    /// the function returns otherwise.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::time::Duration;
    /// use time::OffsetDateTime;
    /// use posserver::Scheduler;
    ///
    /// # fn main() -> Result<(), String> {
    /// let scheduler = Scheduler {
    ///     from: Some(OffsetDateTime::now_utc()),
    ///     every: Some(Duration::from_secs(3600)), // Every hour
    /// };
    ///
    /// # tokio_test::block_on(async {
    /// scheduler.schedule(|timestamp| async move {
    ///     println!("Refreshing at {}", timestamp);
    ///     Ok::<(), String>(())
    /// }).await?;
    /// # Ok(())
    /// # })
    /// # }
    /// ```
    pub async fn schedule<T, E>(
        &self,
        f: impl AsyncFn(OffsetDateTime) -> Result<T, E>,
    ) -> Result<(), E> {
        // extract the duration or return immediately
        let Some(delta) = self.every.filter(|every| !every.is_zero()) else {
            return Ok(());
        };

        let now = OffsetDateTime::now_utc();
        let mut anchor = next_anchor(self.from, delta, now);

        // now we align the clocks as best we can
        let sleepy: Duration = (anchor - now).try_into().unwrap_or(Duration::ZERO);
        tokio::time::sleep(sleepy).await;

        let mut interval = tokio::time::interval(delta);

        loop {
            interval.tick().await;

            let span = span!(Level::INFO, "running scheduled refresh");
            async {
                event!(Level::INFO, refresh_time = %anchor);
                f(anchor).await
            }
            .instrument(span)
            .await?;

            anchor += delta;
        }
    }
}

/// The first instant `from + k * delta` that is not before `now`.
fn next_anchor(from: Option<OffsetDateTime>, delta: Duration, now: OffsetDateTime) -> OffsetDateTime {
    match from {
        Some(mut from) if from < now => {
            let steps = ((now - from) / delta).ceil() as u32;
            from += delta * steps;
            from
        }
        Some(from) => from,
        None => now,
    }
}
