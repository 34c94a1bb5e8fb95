use super::{Day, TimeOfDay};
use thiserror::Error;

/// The ways a caller-supplied query can be malformed.
///
/// Both variants carry the offending input verbatim so the transport layer
/// can echo it back.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// The day was not an integer in `0..=6`
    #[error("Invalid day of the week: {0}")]
    InvalidDay(String),
    /// The time did not match `H:MM` or `HH:MM`
    #[error("Invalid time format: {0}")]
    InvalidTime(String),
}

/// A validated "open at" query. Absent fields mean "now".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct QuerySpec {
    /// Day of the week, if specified
    pub day: Option<Day>,
    /// Time of day, if specified
    pub time: Option<TimeOfDay>,
}

impl QuerySpec {
    /// Validate raw query parameters as they arrive from the transport.
    ///
    /// A day that is not an integer is reported as [`QueryError::InvalidDay`]
    /// rather than coerced. The day is checked before the time.
    pub fn parse(day: Option<&str>, time: Option<&str>) -> Result<Self, QueryError> {
        let day = day
            .map(|raw| {
                raw.parse::<i64>()
                    .map_err(|_| QueryError::InvalidDay(raw.to_owned()))
            })
            .transpose()?;

        Ok(Self {
            day: Day::validate(day)?,
            time: TimeOfDay::validate(time)?,
        })
    }

    /// Fill in any absent field from `now`, which is only invoked if needed.
    pub fn resolve(self, now: impl FnOnce() -> (Day, TimeOfDay)) -> (Day, TimeOfDay) {
        match (self.day, self.time) {
            (Some(day), Some(time)) => (day, time),
            (day, time) => {
                let (today, current) = now();
                (day.unwrap_or(today), time.unwrap_or(current))
            }
        }
    }
}
