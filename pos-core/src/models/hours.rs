use super::{Day, OpeningWindow, TimeOfDay};
use thiserror::Error;

/// The ways an upstream opening-hours specification can be malformed.
///
/// This is a data-quality failure of the feed, not of the caller, and is never
/// coerced into a plausible-looking window.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MalformedHours {
    /// A comma-separated range was empty
    #[error("empty range in opening hours {0:?}")]
    EmptyRange(String),
    /// A range did not split into exactly an opening and a closing time
    #[error("range {0:?} does not consist of exactly two times")]
    Separator(String),
    /// A clock time could not be parsed
    #[error("invalid clock time {0:?}")]
    Time(String),
    /// The day range is out of bounds or wraps past the end of the week
    #[error("invalid day range {from}-{to}")]
    DayRange {
        /// First day, as given
        from: i64,
        /// Last day, as given
        to: i64,
    },
    /// A single range was expected, but several were given
    #[error("expected a single range, got {0:?}")]
    MultipleRanges(String),
}

/// The canonical separator between an opening and a closing time.
const SEPARATOR: char = '-';

/// The upstream feed occasionally double-encodes an en dash as UTF-8 read as
/// Windows-1252, producing these three characters.
const MOJIBAKE_EN_DASH: &str = "\u{e2}\u{20ac}\u{201c}";

/// Dash look-alikes that the feed emits in place of a hyphen.
fn is_dash_like(c: char) -> bool {
    matches!(
        c,
        '\u{2010}'..='\u{2015}' | '\u{2212}' | '\u{fe58}' | '\u{fe63}' | '\u{ff0d}'
    )
}

/// Parse a raw opening-hours string into normalized windows.
///
/// The string may contain several ranges separated by commas, such as
/// `"10:00-18:00,20:00-22:00"`. Each range becomes one window spanning
/// `[day_from, day_to]`, in the order they appear. Within a range, any dash
/// look-alike is accepted as the separator and single-digit hours are
/// left-padded (`"9:00"` is read as `"09:00"`). Minutes must always have two
/// digits.
///
/// # Errors
///
/// Returns [`MalformedHours`] if the day range is outside `0..=6` or wraps the
/// week, or if any range is empty, lacks exactly one separator, or contains a
/// time that does not parse. One bad range fails the whole string.
pub fn parse_hours(
    raw: &str,
    day_from: i64,
    day_to: i64,
) -> Result<Vec<OpeningWindow>, MalformedHours> {
    let day_range = || MalformedHours::DayRange {
        from: day_from,
        to: day_to,
    };
    let from = Day::try_from(day_from).map_err(|_| day_range())?;
    let to = Day::try_from(day_to).map_err(|_| day_range())?;

    raw.split(',')
        .map(|token| {
            let (open, close) = split_range(token, raw)?;
            OpeningWindow::new(from, to, open, close)
        })
        .collect()
}

/// Split a single range into its two times, normalizing the separator.
fn split_range(token: &str, raw: &str) -> Result<(TimeOfDay, TimeOfDay), MalformedHours> {
    let token = token.trim();
    if token.is_empty() {
        return Err(MalformedHours::EmptyRange(raw.to_owned()));
    }

    let normalized: String = token
        .replace(MOJIBAKE_EN_DASH, "-")
        .chars()
        .map(|c| if is_dash_like(c) { SEPARATOR } else { c })
        .collect();

    let mut parts = normalized.split(SEPARATOR);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(open), Some(close), None) => Ok((parse_clock(open)?, parse_clock(close)?)),
        _ => Err(MalformedHours::Separator(token.to_owned())),
    }
}

/// Pad a single-digit hour with a leading zero and parse the result.
fn parse_clock(value: &str) -> Result<TimeOfDay, MalformedHours> {
    let value = value.trim();
    let padded = match value.find(':') {
        Some(1) => format!("0{value}"),
        _ => value.to_owned(),
    };
    TimeOfDay::parse_padded(&padded).ok_or_else(|| MalformedHours::Time(value.to_owned()))
}
