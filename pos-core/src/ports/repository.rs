use crate::models::{Day, JoinedRow, OpeningHoursRow, PointOfSale};

/// Base trait for storage backends, naming the error they fail with.
///
/// Storage errors are never interpreted by the core; they pass through to the
/// caller untouched.
pub trait Repository {
    /// The backend's error type
    type Error: std::error::Error + Send + Sync + 'static;
}

/// The two logical tables the write path operates on.
///
/// Rows of [`Table::OpeningHours`] reference rows of [`Table::PointsOfSale`],
/// so clearing must happen in [`Table::CLEAR_ORDER`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Table {
    /// One row per point of sale
    PointsOfSale,
    /// One row per opening window, keyed to a point of sale
    OpeningHours,
}

impl Table {
    /// Referencing tables first, so no foreign key is left dangling.
    pub const CLEAR_ORDER: [Self; 2] = [Self::OpeningHours, Self::PointsOfSale];

    /// The storage name of the table
    pub fn name(self) -> &'static str {
        match self {
            Self::PointsOfSale => "points_of_sale",
            Self::OpeningHours => "opening_hours",
        }
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Read path of the storage backend.
pub trait PointOfSaleReader: Repository {
    /// Return the joined (point of sale, window) rows that may be open on `day`.
    ///
    /// This is a coarse filter: it must include every row whose day range
    /// contains `day`, and every overnight row (`close < open`) whose day
    /// range contains the day before `day`. It may include more; the caller
    /// applies the exact time match. Rows must be ordered by point of sale
    /// insertion, then by window insertion, so that aggregation is stable.
    fn open_on(
        &self,
        day: Day,
    ) -> impl Future<Output = Result<Vec<JoinedRow>, Self::Error>> + Send;
}

/// Write path of the storage backend.
///
/// Each operation names its table explicitly, either through a [`Table`]
/// argument or through the row type it accepts.
pub trait PointOfSaleWriter: Repository {
    /// Remove every row of `table`.
    fn clear(&self, table: Table) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Insert one row into [`Table::PointsOfSale`].
    fn insert_point_of_sale(
        &self,
        row: PointOfSale,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Insert one row into [`Table::OpeningHours`].
    fn insert_opening_hours(
        &self,
        row: OpeningHoursRow,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Replace the contents of both tables with `batch`.
    ///
    /// Backends that support transactions should make this atomic. Returns the
    /// number of (points of sale, opening windows) written.
    fn replace_all(
        &self,
        batch: Vec<(PointOfSale, Vec<OpeningHoursRow>)>,
    ) -> impl Future<Output = Result<(usize, usize), Self::Error>> + Send;
}
