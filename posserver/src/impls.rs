//! Application implementation backed by SQLite and the HTTP feed.

use crate::{clock::day_and_time, feed::HttpFeed};
use pos_core::{
    models::{Day, TimeOfDay},
    ports::{Application, IngestPolicy},
};
use pos_sqlite::Db;
use time::{OffsetDateTime, UtcOffset};

/// The production application.
#[derive(Clone)]
pub struct ServerApp {
    /// The SQLite backend
    pub db: Db,
    /// The upstream feed
    pub feed: HttpFeed,
    /// The offset "now" is expressed in
    pub offset: UtcOffset,
    /// How malformed feed entries are treated
    pub policy: IngestPolicy,
}

impl Application for ServerApp {
    type Repository = Db;
    type Feed = HttpFeed;

    fn database(&self) -> &Self::Repository {
        &self.db
    }

    fn feed(&self) -> &Self::Feed {
        &self.feed
    }

    fn now(&self) -> (Day, TimeOfDay) {
        day_and_time(OffsetDateTime::now_utc(), self.offset)
    }

    fn ingest_policy(&self) -> IngestPolicy {
        self.policy
    }
}
