use crate::Db;
use pos_core::{
    models::{OpeningHoursRow, PointOfSale},
    ports::{PointOfSaleWriter, Table},
};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};

/// Rows per multi-row insert; keeps the bound parameter count well under SQLite's limit.
const ROWS_PER_INSERT: usize = 500;

async fn clear_table(conn: &mut SqliteConnection, table: Table) -> Result<u64, sqlx::Error> {
    let sql = match table {
        Table::PointsOfSale => "delete from points_of_sale",
        Table::OpeningHours => "delete from opening_hours",
    };
    let result = sqlx::query(sql).execute(conn).await?;
    Ok(result.rows_affected())
}

async fn insert_points_of_sale(
    conn: &mut SqliteConnection,
    rows: &[PointOfSale],
) -> Result<u64, sqlx::Error> {
    let mut written = 0;
    for chunk in rows.chunks(ROWS_PER_INSERT) {
        let mut builder = QueryBuilder::<Sqlite>::new(
            "insert into points_of_sale (id, type, name, address, lat, lon, services, pay_methods, remarks, link) ",
        );
        builder.push_values(chunk, |mut b, row| {
            b.push_bind(row.id.0.clone())
                .push_bind(row.kind.clone())
                .push_bind(row.name.clone())
                .push_bind(row.address.clone())
                .push_bind(row.lat)
                .push_bind(row.lon)
                .push_bind(row.services)
                .push_bind(row.pay_methods)
                .push_bind(row.remarks.clone())
                .push_bind(row.link.clone());
        });
        written += builder.build().execute(&mut *conn).await?.rows_affected();
    }
    Ok(written)
}

async fn insert_opening_hours(
    conn: &mut SqliteConnection,
    rows: &[OpeningHoursRow],
) -> Result<u64, sqlx::Error> {
    let mut written = 0;
    for chunk in rows.chunks(ROWS_PER_INSERT) {
        let mut builder = QueryBuilder::<Sqlite>::new(
            "insert into opening_hours (point_of_sale_id, day_from, day_to, open_time, close_time) ",
        );
        builder.push_values(chunk, |mut b, row| {
            b.push_bind(row.point_of_sale_id.0.clone())
                .push_bind(i64::from(row.window.day_from().index()))
                .push_bind(i64::from(row.window.day_to().index()))
                .push_bind(i64::from(row.window.open().minutes()))
                .push_bind(i64::from(row.window.close().minutes()));
        });
        written += builder.build().execute(&mut *conn).await?.rows_affected();
    }
    Ok(written)
}

impl PointOfSaleWriter for Db {
    async fn clear(&self, table: Table) -> Result<(), Self::Error> {
        let mut conn = self.writer.acquire().await?;
        let removed = clear_table(&mut conn, table).await?;
        tracing::debug!(%table, removed, "cleared table");
        Ok(())
    }

    async fn insert_point_of_sale(&self, row: PointOfSale) -> Result<(), Self::Error> {
        let mut conn = self.writer.acquire().await?;
        insert_points_of_sale(&mut conn, std::slice::from_ref(&row)).await?;
        Ok(())
    }

    async fn insert_opening_hours(&self, row: OpeningHoursRow) -> Result<(), Self::Error> {
        let mut conn = self.writer.acquire().await?;
        insert_opening_hours(&mut conn, std::slice::from_ref(&row)).await?;
        Ok(())
    }

    async fn replace_all(
        &self,
        batch: Vec<(PointOfSale, Vec<OpeningHoursRow>)>,
    ) -> Result<(usize, usize), Self::Error> {
        let (points_of_sale, opening_hours): (Vec<_>, Vec<_>) = batch.into_iter().unzip();
        let opening_hours: Vec<OpeningHoursRow> = opening_hours.into_iter().flatten().collect();

        let mut tx = self.writer.begin().await?;

        for table in Table::CLEAR_ORDER {
            let removed = clear_table(&mut tx, table).await?;
            tracing::debug!(%table, removed, "cleared table");
        }

        // Parents before children, so every foreign key resolves.
        insert_points_of_sale(&mut tx, &points_of_sale).await?;
        insert_opening_hours(&mut tx, &opening_hours).await?;

        tx.commit().await?;

        tracing::info!(
            points_of_sale = points_of_sale.len(),
            opening_hours = opening_hours.len(),
            "replaced stored points of sale"
        );

        Ok((points_of_sale.len(), opening_hours.len()))
    }
}
