mod day;
pub use day::Day;

mod time;
pub use time::TimeOfDay;

mod query;
pub use query::{QueryError, QuerySpec};

mod window;
pub use window::{OpeningWindow, OpeningWindowDto};

mod hours;
pub use hours::{MalformedHours, parse_hours};

mod map;
pub use map::Map;

mod record;
pub use record::{JoinedRow, PointOfSale, PointOfSaleId, PointOfSaleRecord, aggregate};

mod feed;
pub use feed::{
    IngestPolicy, NormalizedBatch, OpeningHoursRow, RawFeedEntry, RawOpeningHours, RejectedEntry,
    Rejection, normalize, normalize_batch,
};
