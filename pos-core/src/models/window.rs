use super::{Day, MalformedHours, TimeOfDay, parse_hours};

/// A normalized opening interval: every day in `[day_from, day_to]`, from
/// `open` to `close`, both ends inclusive.
///
/// Day ranges never wrap across the end of the week, so `day_from <= day_to`
/// always holds. The time range may wrap past midnight (`close < open`), in
/// which case the part after midnight belongs to the following day.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "OpeningWindowDto", into = "OpeningWindowDto")
)]
pub struct OpeningWindow {
    day_from: Day,
    day_to: Day,
    open: TimeOfDay,
    close: TimeOfDay,
}

impl OpeningWindow {
    /// Construct a window, rejecting day ranges that wrap the week.
    pub fn new(
        day_from: Day,
        day_to: Day,
        open: TimeOfDay,
        close: TimeOfDay,
    ) -> Result<Self, MalformedHours> {
        if day_from > day_to {
            return Err(MalformedHours::DayRange {
                from: day_from.index().into(),
                to: day_to.index().into(),
            });
        }
        Ok(Self {
            day_from,
            day_to,
            open,
            close,
        })
    }

    /// First day of the range
    pub fn day_from(&self) -> Day {
        self.day_from
    }

    /// Last day of the range (inclusive)
    pub fn day_to(&self) -> Day {
        self.day_to
    }

    /// Opening time
    pub fn open(&self) -> TimeOfDay {
        self.open
    }

    /// Closing time (inclusive)
    pub fn close(&self) -> TimeOfDay {
        self.close
    }

    /// Whether the window runs past midnight into the next day.
    pub fn is_overnight(&self) -> bool {
        self.close < self.open
    }

    /// Whether `day` lies in `[day_from, day_to]`. Never wraps.
    pub fn covers_day(&self, day: Day) -> bool {
        self.day_from <= day && day <= self.day_to
    }

    /// Whether the point of sale is open on `day` at `time` according to this window.
    ///
    /// For an ordinary window this is `day_from <= day <= day_to` and
    /// `open <= time <= close`. An overnight window is open from `open` until
    /// the end of each covered day, and from midnight until `close` on the day
    /// after each covered day.
    pub fn matches(&self, day: Day, time: TimeOfDay) -> bool {
        if self.is_overnight() {
            (self.covers_day(day) && self.open <= time)
                || (self.covers_day(day.previous()) && time <= self.close)
        } else {
            self.covers_day(day) && self.open <= time && time <= self.close
        }
    }

    /// Render the time range as `HH:MM-HH:MM`.
    pub fn hours(&self) -> String {
        format!("{}-{}", self.open, self.close)
    }
}

/// The wire shape of a window: `{"from": 1, "to": 5, "hours": "09:00-17:00"}`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OpeningWindowDto {
    /// First day of the range (0 = Sunday)
    pub from: Day,
    /// Last day of the range (inclusive)
    pub to: Day,
    /// A single `HH:MM-HH:MM` range
    pub hours: String,
}

impl From<OpeningWindow> for OpeningWindowDto {
    fn from(value: OpeningWindow) -> Self {
        Self {
            from: value.day_from,
            to: value.day_to,
            hours: value.hours(),
        }
    }
}

impl TryFrom<OpeningWindowDto> for OpeningWindow {
    type Error = MalformedHours;

    fn try_from(value: OpeningWindowDto) -> Result<Self, Self::Error> {
        let mut windows = parse_hours(
            &value.hours,
            value.from.index().into(),
            value.to.index().into(),
        )?;
        if windows.len() == 1 {
            Ok(windows.remove(0))
        } else {
            Err(MalformedHours::MultipleRanges(value.hours))
        }
    }
}

#[cfg(feature = "schemars")]
impl schemars::JsonSchema for OpeningWindow {
    fn schema_name() -> std::borrow::Cow<'static, str> {
        "OpeningWindow".into()
    }

    fn json_schema(generator: &mut schemars::SchemaGenerator) -> schemars::Schema {
        OpeningWindowDto::json_schema(generator)
    }
}
