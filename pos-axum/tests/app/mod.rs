use pos_core::{
    models::{Day, RawFeedEntry, TimeOfDay},
    ports::{Application, FeedSource},
};
use pos_sqlite::{Db, config::SqliteConfig};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("fixture feed is not valid: {0}")]
pub struct FixtureError(String);

/// A feed that serves a JSON document held in memory.
#[derive(Clone)]
pub struct StaticFeed(Arc<str>);

impl FeedSource for StaticFeed {
    type Error = FixtureError;

    async fn fetch(&self) -> Result<Vec<RawFeedEntry>, Self::Error> {
        serde_json::from_str(&self.0).map_err(|err| FixtureError(err.to_string()))
    }
}

/// The application under test. Its clock is stuck at Wednesday noon.
#[derive(Clone)]
pub struct TestApp {
    pub db: Db,
    pub feed: StaticFeed,
}

impl TestApp {
    pub async fn new(feed: &str) -> Self {
        let db = Db::open(&SqliteConfig::default()).await.unwrap();
        Self {
            db,
            feed: StaticFeed(Arc::from(feed)),
        }
    }
}

impl Application for TestApp {
    type Repository = Db;
    type Feed = StaticFeed;

    fn database(&self) -> &Self::Repository {
        &self.db
    }

    fn feed(&self) -> &Self::Feed {
        &self.feed
    }

    fn now(&self) -> (Day, TimeOfDay) {
        (Day::try_from(3).unwrap(), TimeOfDay::new(12, 0).unwrap())
    }
}

pub const FEED: &str = include_str!("../fixtures/feed.json");
