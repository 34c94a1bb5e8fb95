mod common;

use common::{open, point_of_sale, rows};
use pos_core::{
    models::{Day, OpeningHoursRow, PointOfSaleId},
    ports::{PointOfSaleReader as _, PointOfSaleWriter as _, Table},
};

fn day(n: i64) -> Day {
    Day::try_from(n).unwrap()
}

fn ids(rows: &[pos_core::models::JoinedRow]) -> Vec<&str> {
    rows.iter().map(|row| row.point_of_sale.id.0.as_str()).collect()
}

#[tokio::test]
async fn test_replace_all_round_trip() -> anyhow::Result<()> {
    let db = open().await?;

    let mut a = rows("a", 1, 5, "9:00-12:00,13:00-17:00");
    a.extend(rows("a", 6, 6, "10:00-14:00"));
    let mut remarked = point_of_sale("a");
    remarked.remarks = Some("closed on holidays".to_owned());

    let written = db
        .replace_all(vec![
            (remarked.clone(), a),
            (point_of_sale("b"), rows("b", 0, 6, "0:00-23:59")),
        ])
        .await?;
    assert_eq!(written, (2, 4));

    let monday = db.open_on(day(1)).await?;
    assert_eq!(ids(&monday), vec!["a", "a", "b"]);
    assert_eq!(monday[0].point_of_sale, remarked);
    assert_eq!(monday[0].window.hours(), "09:00-12:00");
    assert_eq!(monday[1].window.hours(), "13:00-17:00");
    assert_eq!(monday[2].window.hours(), "00:00-23:59");

    let saturday = db.open_on(day(6)).await?;
    assert_eq!(ids(&saturday), vec!["a", "b"]);
    assert_eq!(saturday[0].window.hours(), "10:00-14:00");

    Ok(())
}

#[tokio::test]
async fn test_open_on_preserves_insertion_order() -> anyhow::Result<()> {
    let db = open().await?;

    db.replace_all(vec![
        (point_of_sale("z"), rows("z", 0, 6, "8:00-9:00")),
        (point_of_sale("m"), rows("m", 0, 6, "8:00-9:00")),
        (point_of_sale("a"), rows("a", 0, 6, "8:00-9:00")),
    ])
    .await?;

    assert_eq!(ids(&db.open_on(day(3)).await?), vec!["z", "m", "a"]);
    Ok(())
}

#[tokio::test]
async fn test_open_on_includes_overnight_spill() -> anyhow::Result<()> {
    let db = open().await?;

    db.replace_all(vec![
        (point_of_sale("bar"), rows("bar", 5, 6, "22:00-3:00")),
        (point_of_sale("shop"), rows("shop", 1, 5, "9:00-17:00")),
    ])
    .await?;

    // Sunday only sees the bar's Saturday night window
    let sunday = db.open_on(Day::SUNDAY).await?;
    assert_eq!(ids(&sunday), vec!["bar"]);
    assert!(sunday[0].window.is_overnight());

    // Monday is covered by neither the bar nor its spill
    assert_eq!(ids(&db.open_on(day(1)).await?), vec!["shop"]);

    // Friday has both
    assert_eq!(ids(&db.open_on(day(5)).await?), vec!["bar", "shop"]);
    Ok(())
}

#[tokio::test]
async fn test_replace_all_discards_previous_data() -> anyhow::Result<()> {
    let db = open().await?;

    db.replace_all(vec![(point_of_sale("old"), rows("old", 0, 6, "8:00-20:00"))])
        .await?;
    db.replace_all(vec![(point_of_sale("new"), rows("new", 0, 6, "8:00-20:00"))])
        .await?;

    assert_eq!(ids(&db.open_on(day(2)).await?), vec!["new"]);

    // An empty batch leaves both tables empty
    assert_eq!(db.replace_all(Vec::new()).await?, (0, 0));
    assert!(db.open_on(day(2)).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_failed_replace_keeps_previous_data() -> anyhow::Result<()> {
    let db = open().await?;

    db.replace_all(vec![(point_of_sale("kept"), rows("kept", 0, 6, "8:00-20:00"))])
        .await?;

    // Duplicate primary keys fail the insert and roll the transaction back
    let result = db
        .replace_all(vec![
            (point_of_sale("dup"), Vec::new()),
            (point_of_sale("dup"), Vec::new()),
        ])
        .await;
    assert!(result.is_err());

    assert_eq!(ids(&db.open_on(day(2)).await?), vec!["kept"]);
    Ok(())
}

#[tokio::test]
async fn test_single_row_writes_respect_foreign_keys() -> anyhow::Result<()> {
    let db = open().await?;

    let orphan: OpeningHoursRow = rows("ghost", 0, 6, "8:00-9:00").remove(0);
    assert!(db.insert_opening_hours(orphan).await.is_err());

    db.insert_point_of_sale(point_of_sale("a")).await?;
    for row in rows("a", 0, 6, "8:00-9:00") {
        db.insert_opening_hours(row).await?;
    }
    assert_eq!(ids(&db.open_on(day(0)).await?), vec!["a"]);

    // Points of sale cannot be cleared while opening hours still reference them
    assert!(db.clear(Table::PointsOfSale).await.is_err());

    for table in Table::CLEAR_ORDER {
        db.clear(table).await?;
    }
    assert!(db.open_on(day(0)).await?.is_empty());

    db.insert_point_of_sale(point_of_sale("a")).await?;
    assert!(db.open_on(day(0)).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_file_database_persists() -> anyhow::Result<()> {
    let path = std::env::temp_dir().join(format!(
        "pos-sqlite-{}-{}.db",
        std::process::id(),
        line!()
    ));
    let config = pos_sqlite::config::SqliteConfig {
        database_path: Some(path.clone()),
        create_if_missing: true,
    };

    {
        let db = pos_sqlite::Db::open(&config).await?;
        db.replace_all(vec![(point_of_sale("a"), rows("a", 1, 1, "9:00-10:00"))])
            .await?;
        db.reader.close().await;
        db.writer.close().await;
    }

    let db = pos_sqlite::Db::open(&config).await?;
    let monday = db.open_on(day(1)).await?;
    assert_eq!(monday.len(), 1);
    assert_eq!(monday[0].point_of_sale.id, PointOfSaleId::from("a"));

    db.reader.close().await;
    db.writer.close().await;
    let _ = std::fs::remove_file(&path);
    Ok(())
}

#[tokio::test]
async fn test_in_memory_database_outlives_idle_readers() -> anyhow::Result<()> {
    let db = open().await?;
    db.replace_all(vec![(point_of_sale("a"), rows("a", 1, 1, "9:00-10:00"))])
        .await?;

    // Every reader connection goes away; the pinned writer keeps the tables.
    db.reader.close().await;
    assert!(db.writer.size() >= 1);

    let options = (*db.writer.connect_options()).clone();
    let reader = sqlx::sqlite::SqlitePoolOptions::new()
        .connect_with(options)
        .await?;
    let db = pos_sqlite::Db {
        reader,
        writer: db.writer,
    };

    let monday = db.open_on(day(1)).await?;
    assert_eq!(ids(&monday), vec!["a"]);
    Ok(())
}
