//! The wall clock that absent query parameters are resolved against.

use pos_core::models::{Day, TimeOfDay};
use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, UtcOffset};

/// Which UTC offset "now" is expressed in.
///
/// The offset is fixed rather than read from the host, so the server answers
/// the same regardless of where it is deployed.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize)]
pub struct ClockConfig {
    /// Minutes east of UTC
    #[serde(default)]
    pub utc_offset_minutes: i16,
}

impl ClockConfig {
    /// Validate the configured offset.
    pub fn offset(&self) -> Result<UtcOffset, time::error::ComponentRange> {
        UtcOffset::from_whole_seconds(i32::from(self.utc_offset_minutes) * 60)
    }
}

/// Split an instant into the day of the week and time of day at `offset`.
pub fn day_and_time(instant: OffsetDateTime, offset: UtcOffset) -> (Day, TimeOfDay) {
    let local = instant.to_offset(offset);
    let day = Day::try_from(i64::from(local.weekday().number_days_from_sunday()))
        .unwrap_or(Day::SUNDAY);
    let time = TimeOfDay::new(local.hour(), local.minute()).unwrap_or(TimeOfDay::MIDNIGHT);
    (day, time)
}
