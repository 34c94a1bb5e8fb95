//! Row types for mapping query results back into `pos-core` models.

use pos_core::models::{Day, JoinedRow, OpeningWindow, PointOfSale, PointOfSaleId, TimeOfDay};
use thiserror::Error;

/// A stored row that no longer satisfies the model's invariants.
///
/// The schema's check constraints should make this unreachable; it is reported
/// as a decode error rather than silently dropped.
#[derive(Debug, Error)]
#[error("corrupt opening_hours row for {id}: {reason}")]
pub struct CorruptRow {
    /// The point of sale the row belongs to
    pub id: String,
    /// What was wrong
    pub reason: String,
}

#[derive(sqlx::FromRow)]
pub(crate) struct JoinedRecord {
    pub id: String,
    #[sqlx(rename = "type")]
    pub kind: String,
    pub name: String,
    pub address: Option<String>,
    pub lat: f64,
    pub lon: f64,
    pub services: i64,
    pub pay_methods: i64,
    pub remarks: Option<String>,
    pub link: Option<String>,
    pub day_from: i64,
    pub day_to: i64,
    pub open_time: i64,
    pub close_time: i64,
}

fn minutes(value: i64) -> Option<TimeOfDay> {
    u16::try_from(value).ok().and_then(TimeOfDay::from_minutes)
}

impl TryFrom<JoinedRecord> for JoinedRow {
    type Error = CorruptRow;

    fn try_from(record: JoinedRecord) -> Result<Self, Self::Error> {
        let corrupt = |reason: String| CorruptRow {
            id: record.id.clone(),
            reason,
        };

        let day_from = Day::try_from(record.day_from).map_err(|e| corrupt(e.to_string()))?;
        let day_to = Day::try_from(record.day_to).map_err(|e| corrupt(e.to_string()))?;
        let open = minutes(record.open_time)
            .ok_or_else(|| corrupt(format!("open_time {}", record.open_time)))?;
        let close = minutes(record.close_time)
            .ok_or_else(|| corrupt(format!("close_time {}", record.close_time)))?;
        let window =
            OpeningWindow::new(day_from, day_to, open, close).map_err(|e| corrupt(e.to_string()))?;

        Ok(JoinedRow {
            point_of_sale: PointOfSale {
                id: PointOfSaleId(record.id),
                kind: record.kind,
                name: record.name,
                address: record.address,
                lat: record.lat,
                lon: record.lon,
                services: record.services,
                pay_methods: record.pay_methods,
                remarks: record.remarks,
                link: record.link,
            },
            window,
        })
    }
}
