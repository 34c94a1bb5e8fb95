use super::QueryError;
use std::{fmt::Display, str::FromStr};

/// A wall-clock time with minute precision, stored as minutes since midnight.
///
/// The inner value always lies in `0..=1439`. Values render as zero-padded
/// `HH:MM` and parse from `H:MM` or `HH:MM`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct TimeOfDay(u16);

/// Number of minutes in a day.
const MINUTES_PER_DAY: u16 = 24 * 60;

impl TimeOfDay {
    /// Midnight, the first minute of the day
    pub const MIDNIGHT: Self = Self(0);
    /// 23:59, the last minute of the day
    pub const LAST_MINUTE: Self = Self(MINUTES_PER_DAY - 1);

    /// Construct a time from an hour in `0..=23` and a minute in `0..=59`.
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self(hour as u16 * 60 + minute as u16))
        } else {
            None
        }
    }

    /// Construct a time from minutes since midnight.
    pub fn from_minutes(minutes: u16) -> Option<Self> {
        (minutes < MINUTES_PER_DAY).then_some(Self(minutes))
    }

    /// Validate an optional, caller-supplied time.
    ///
    /// `None` passes through untouched. Otherwise the value must match
    /// `(2[0-3]|[01]?[0-9]):[0-5][0-9]` exactly, or the result is
    /// [`QueryError::InvalidTime`].
    pub fn validate(time: Option<&str>) -> Result<Option<Self>, QueryError> {
        time.map(str::parse).transpose()
    }

    /// Minutes since midnight.
    pub fn minutes(self) -> u16 {
        self.0
    }

    /// The hour component, `0..=23`.
    pub fn hour(self) -> u8 {
        (self.0 / 60) as u8
    }

    /// The minute component, `0..=59`.
    pub fn minute(self) -> u8 {
        (self.0 % 60) as u8
    }

    /// Parse a strictly formatted `HH:MM` value, as produced after padding.
    ///
    /// Unlike [`FromStr`], the hour must be exactly two digits.
    pub(crate) fn parse_padded(value: &str) -> Option<Self> {
        let (hour, minute) = value.split_once(':')?;
        if hour.len() != 2 {
            return None;
        }
        Self::from_parts(hour, minute)
    }

    /// Shared by both parsers: the hour has one or two digits, the minute exactly two.
    fn from_parts(hour: &str, minute: &str) -> Option<Self> {
        let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
        if !(1..=2).contains(&hour.len()) || minute.len() != 2 || !digits(hour) || !digits(minute)
        {
            return None;
        }
        Self::new(hour.parse().ok()?, minute.parse().ok()?)
    }
}

impl FromStr for TimeOfDay {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split_once(':')
            .and_then(|(hour, minute)| Self::from_parts(hour, minute))
            .ok_or_else(|| QueryError::InvalidTime(s.to_owned()))
    }
}

impl Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = QueryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}

#[cfg(feature = "schemars")]
impl schemars::JsonSchema for TimeOfDay {
    fn inline_schema() -> bool {
        true
    }

    fn schema_name() -> std::borrow::Cow<'static, str> {
        "TimeOfDay".into()
    }

    fn json_schema(_: &mut schemars::SchemaGenerator) -> schemars::Schema {
        schemars::json_schema!({
            "type": "string",
            "pattern": "^(2[0-3]|[01]?[0-9]):[0-5][0-9]$",
        })
    }
}
