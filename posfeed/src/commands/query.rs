use super::Rejected;
use crate::CliError;
use pos_core::{
    models::{
        Day, JoinedRow, Map, NormalizedBatch, PointOfSaleId, PointOfSaleRecord, QuerySpec,
        RawFeedEntry, TimeOfDay, aggregate, normalize_batch,
    },
    ports::IngestPolicy,
};
use serde::Serialize;

/// The points of sale open at the requested time, plus the feed entries that
/// were not considered.
#[derive(Serialize)]
pub struct OpenAt {
    pub open: Map<PointOfSaleId, PointOfSaleRecord>,
    pub rejected: Vec<Rejected>,
}

/// Answer an "open at" query directly against a feed, without storage.
///
/// The feed goes through the same batch normalization as a refresh, so a
/// duplicate id keeps only its first entry and the answer matches what the
/// server would return after ingesting the same feed.
pub fn open_at(
    entries: Vec<RawFeedEntry>,
    day: &str,
    time: &str,
    policy: IngestPolicy,
) -> Result<OpenAt, CliError> {
    // Both parameters are supplied, so the fallback clock is never consulted.
    let (day, time) =
        QuerySpec::parse(Some(day), Some(time))?.resolve(|| (Day::SUNDAY, TimeOfDay::MIDNIGHT));

    let NormalizedBatch { entries, rejected } = normalize_batch(entries, policy)?;

    let rows = entries
        .into_iter()
        .flat_map(|(point_of_sale, rows)| {
            rows.into_iter().map(move |row| JoinedRow {
                point_of_sale: point_of_sale.clone(),
                window: row.window,
            })
        })
        .filter(|row| row.window.matches(day, time));

    Ok(OpenAt {
        open: aggregate(rows),
        rejected: rejected.into_iter().map(Rejected::from).collect(),
    })
}
