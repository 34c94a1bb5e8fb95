#![allow(dead_code)]

use pos_core::models::{OpeningHoursRow, PointOfSale, PointOfSaleId, parse_hours};
use pos_sqlite::{Db, config::SqliteConfig};

pub async fn open() -> anyhow::Result<Db> {
    Ok(Db::open(&SqliteConfig::default()).await?)
}

pub fn point_of_sale(id: &str) -> PointOfSale {
    PointOfSale {
        id: PointOfSaleId::from(id),
        kind: "ticket-office".to_owned(),
        name: format!("Point of sale {id}"),
        address: None,
        lat: 50.08,
        lon: 14.42,
        services: 3,
        pay_methods: 1,
        remarks: None,
        link: None,
    }
}

pub fn rows(id: &str, from: i64, to: i64, hours: &str) -> Vec<OpeningHoursRow> {
    parse_hours(hours, from, to)
        .expect("test hours should parse")
        .into_iter()
        .map(|window| OpeningHoursRow {
            point_of_sale_id: PointOfSaleId::from(id),
            window,
        })
        .collect()
}
