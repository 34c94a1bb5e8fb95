use crate::{Db, types::JoinedRecord};
use pos_core::{
    models::{Day, JoinedRow},
    ports::PointOfSaleReader,
};

impl PointOfSaleReader for Db {
    async fn open_on(&self, day: Day) -> Result<Vec<JoinedRow>, Self::Error> {
        let records = sqlx::query_as::<_, JoinedRecord>(include_str!("../../queries/open_on.sql"))
            .bind(i64::from(day.index()))
            .bind(i64::from(day.previous().index()))
            .fetch_all(&self.reader)
            .await?;

        tracing::trace!(%day, rows = records.len(), "fetched candidate opening hours");

        records
            .into_iter()
            .map(|record| JoinedRow::try_from(record).map_err(|err| sqlx::Error::Decode(err.into())))
            .collect()
    }
}
