use super::QueryError;

/// A day of the week, numbered as the upstream feed numbers them.
///
/// `0` is Sunday, `1` is Monday, and so on through `6` for Saturday. The
/// inner value is guaranteed to lie in `0..=6`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "i64", into = "u8")
)]
pub struct Day(u8);

impl Day {
    /// Sunday, the first day of the feed's week
    pub const SUNDAY: Self = Self(0);
    /// Saturday, the last day of the feed's week
    pub const SATURDAY: Self = Self(6);

    /// Validate an optional, caller-supplied day number.
    ///
    /// `None` passes through untouched (the caller resolves it to "today");
    /// anything outside `0..=6` is rejected with [`QueryError::InvalidDay`].
    pub fn validate(day: Option<i64>) -> Result<Option<Self>, QueryError> {
        day.map(Self::try_from).transpose()
    }

    /// The number of days since Sunday.
    pub fn index(self) -> u8 {
        self.0
    }

    /// The day before this one, wrapping Sunday back to Saturday.
    pub fn previous(self) -> Self {
        Self((self.0 + 6) % 7)
    }

    /// The day after this one, wrapping Saturday forward to Sunday.
    pub fn next(self) -> Self {
        Self((self.0 + 1) % 7)
    }
}

impl TryFrom<i64> for Day {
    type Error = QueryError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (0..=6).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(QueryError::InvalidDay(value.to_string()))
        }
    }
}

impl From<Day> for u8 {
    fn from(value: Day) -> Self {
        value.0
    }
}

impl std::fmt::Display for Day {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(feature = "schemars")]
impl schemars::JsonSchema for Day {
    fn inline_schema() -> bool {
        true
    }

    fn schema_name() -> std::borrow::Cow<'static, str> {
        "Day".into()
    }

    fn json_schema(_: &mut schemars::SchemaGenerator) -> schemars::Schema {
        schemars::json_schema!({
            "type": "integer",
            "minimum": 0,
            "maximum": 6,
        })
    }
}
