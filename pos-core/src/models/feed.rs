use super::{MalformedHours, OpeningWindow, PointOfSale, PointOfSaleId, parse_hours};
use rustc_hash::FxHashSet;
use thiserror::Error;

/// One raw opening-hours specification from the feed, e.g.
/// `{"from": 1, "to": 5, "hours": "7:00-12:00,13:00–18:00"}`.
///
/// The day numbers are kept as plain integers so that out-of-range values
/// surface as [`MalformedHours`] during normalization rather than as a
/// deserialization failure of the whole feed.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawOpeningHours {
    /// First day of the range (0 = Sunday)
    pub from: i64,
    /// Last day of the range (inclusive)
    pub to: i64,
    /// One or more comma-separated time ranges
    pub hours: String,
}

/// One entry of the upstream points-of-sale feed.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawFeedEntry {
    /// The descriptive fields, which are stored as-is
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub point_of_sale: PointOfSale,
    /// The raw opening hours, which are normalized into windows
    #[cfg_attr(feature = "serde", serde(rename = "openingHours", default))]
    pub opening_hours: Vec<RawOpeningHours>,
}

/// A row of the `opening_hours` table, referencing its point of sale.
#[derive(Debug, Clone, PartialEq)]
pub struct OpeningHoursRow {
    /// The owning point of sale
    pub point_of_sale_id: PointOfSaleId,
    /// The normalized window
    pub window: OpeningWindow,
}

/// Map a raw feed entry into storable rows.
///
/// Every raw hours string is parsed with [`parse_hours`] and all resulting
/// windows are flattened, in feed order, into rows tagged with the entry's id.
/// A single malformed string fails the whole entry; whether that aborts the
/// batch is up to the caller.
pub fn normalize(
    entry: RawFeedEntry,
) -> Result<(PointOfSale, Vec<OpeningHoursRow>), MalformedHours> {
    let RawFeedEntry {
        point_of_sale,
        opening_hours,
    } = entry;

    let mut rows = Vec::with_capacity(opening_hours.len());
    for RawOpeningHours { from, to, hours } in opening_hours {
        rows.extend(
            parse_hours(&hours, from, to)?
                .into_iter()
                .map(|window| OpeningHoursRow {
                    point_of_sale_id: point_of_sale.id.clone(),
                    window,
                }),
        );
    }

    Ok((point_of_sale, rows))
}

/// What to do with a feed entry that cannot be stored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum IngestPolicy {
    /// Leave the entry out of the batch and carry on
    #[default]
    Skip,
    /// Abandon the whole batch at the first bad entry
    Abort,
}

/// Why an entry was left out of a batch.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// An earlier entry already claimed the id
    #[error("duplicate point of sale id")]
    DuplicateId,
    /// The opening hours did not parse
    #[error(transparent)]
    MalformedHours(#[from] MalformedHours),
}

/// A feed entry that did not make it into a batch.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{id}: {reason}")]
pub struct RejectedEntry {
    /// The entry's id
    pub id: PointOfSaleId,
    /// What was wrong with it
    #[source]
    pub reason: Rejection,
}

/// The outcome of [`normalize_batch`] under [`IngestPolicy::Skip`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedBatch {
    /// Accepted entries in feed order, ready for storage
    pub entries: Vec<(PointOfSale, Vec<OpeningHoursRow>)>,
    /// Entries that were left out, in feed order
    pub rejected: Vec<RejectedEntry>,
}

/// Normalize a whole feed.
///
/// The first entry with a given id wins; later ones are rejected as
/// duplicates, as are entries whose hours fail [`normalize`]. Under
/// [`IngestPolicy::Abort`] the first rejection is returned as the error and
/// nothing else is produced.
pub fn normalize_batch(
    entries: Vec<RawFeedEntry>,
    policy: IngestPolicy,
) -> Result<NormalizedBatch, RejectedEntry> {
    let mut seen = FxHashSet::default();
    let mut batch = NormalizedBatch {
        entries: Vec::with_capacity(entries.len()),
        rejected: Vec::new(),
    };

    for entry in entries {
        let id = entry.point_of_sale.id.clone();
        let outcome = if seen.insert(id.clone()) {
            normalize(entry).map_err(Rejection::from)
        } else {
            Err(Rejection::DuplicateId)
        };

        match (outcome, policy) {
            (Ok(rows), _) => batch.entries.push(rows),
            (Err(reason), IngestPolicy::Abort) => return Err(RejectedEntry { id, reason }),
            (Err(reason), IngestPolicy::Skip) => batch.rejected.push(RejectedEntry { id, reason }),
        }
    }

    Ok(batch)
}
