use crate::CliError;
use pos_core::{
    models::{
        NormalizedBatch, OpeningWindow, PointOfSale, PointOfSaleId, RawFeedEntry, RejectedEntry,
        normalize_batch,
    },
    ports::IngestPolicy,
};
use serde::Serialize;

/// One row of the `opening_hours` table, as the storage layer would receive it.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredWindow {
    pub point_of_sale_id: PointOfSaleId,
    #[serde(flatten)]
    pub window: OpeningWindow,
}

/// An entry left out of the batch, and why.
#[derive(Serialize)]
pub struct Rejected {
    pub id: PointOfSaleId,
    pub reason: String,
}

impl From<RejectedEntry> for Rejected {
    fn from(RejectedEntry { id, reason }: RejectedEntry) -> Self {
        Self {
            id,
            reason: reason.to_string(),
        }
    }
}

/// Everything a refresh would write, plus what it would skip.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Normalized {
    pub points_of_sale: Vec<PointOfSale>,
    pub opening_hours: Vec<StoredWindow>,
    pub rejected: Vec<Rejected>,
}

pub fn normalize_feed(
    entries: Vec<RawFeedEntry>,
    policy: IngestPolicy,
) -> Result<Normalized, CliError> {
    let NormalizedBatch { entries, rejected } = normalize_batch(entries, policy)?;

    let mut out = Normalized {
        points_of_sale: Vec::with_capacity(entries.len()),
        opening_hours: Vec::new(),
        rejected: rejected.into_iter().map(Rejected::from).collect(),
    };
    for (point_of_sale, rows) in entries {
        out.points_of_sale.push(point_of_sale);
        out.opening_hours
            .extend(rows.into_iter().map(|row| StoredWindow {
                point_of_sale_id: row.point_of_sale_id,
                window: row.window,
            }));
    }

    Ok(out)
}
