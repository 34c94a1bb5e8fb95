use super::{FeedSource, PointOfSaleReader, PointOfSaleWriter, Repository};
use crate::models::{
    Day, IngestPolicy, MalformedHours, Map, NormalizedBatch, PointOfSaleId, PointOfSaleRecord,
    QueryError, QuerySpec, RejectedEntry, Rejection, TimeOfDay, aggregate, normalize_batch,
};
use thiserror::Error;
use tracing::{Level, event};

/// Summary of a completed ingest batch.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct IngestReport {
    /// Points of sale written
    pub points_of_sale: usize,
    /// Opening windows written
    pub opening_hours: usize,
    /// Entries left out under [`IngestPolicy::Skip`], in feed order
    pub skipped: Vec<PointOfSaleId>,
}

/// Failure of an "open at" query.
#[derive(Debug, Error)]
pub enum QueryFailure<E> {
    /// The caller's parameters were invalid; storage was not consulted
    #[error(transparent)]
    Query(#[from] QueryError),
    /// The storage backend failed
    #[error("storage failure: {0}")]
    Storage(#[source] E),
}

/// Failure of an ingest batch.
#[derive(Debug, Error)]
pub enum IngestFailure<F, E> {
    /// The feed could not be fetched or decoded
    #[error("feed failure: {0}")]
    Feed(#[source] F),
    /// An entry's opening hours were malformed and the policy is to abort
    #[error("malformed opening hours for {id}: {source}")]
    MalformedHours {
        /// The offending entry
        id: PointOfSaleId,
        /// What was wrong with it
        source: MalformedHours,
    },
    /// The same id appeared twice in the feed and the policy is to abort
    #[error("duplicate point of sale {0}")]
    DuplicateId(PointOfSaleId),
    /// The storage backend failed
    #[error("storage failure: {0}")]
    Storage(#[source] E),
}

impl<F, E> From<RejectedEntry> for IngestFailure<F, E> {
    fn from(RejectedEntry { id, reason }: RejectedEntry) -> Self {
        match reason {
            Rejection::DuplicateId => Self::DuplicateId(id),
            Rejection::MalformedHours(source) => Self::MalformedHours { id, source },
        }
    }
}

/// The application ties a storage backend, a feed and a clock together.
///
/// Implementors supply the collaborators; the provided methods implement the
/// query and ingest flows on top of them.
pub trait Application: Send + Sync {
    /// The storage backend
    type Repository: PointOfSaleReader + PointOfSaleWriter + Sync;

    /// The upstream feed
    type Feed: FeedSource + Sync;

    /// Access the storage backend
    fn database(&self) -> &Self::Repository;

    /// Access the upstream feed
    fn feed(&self) -> &Self::Feed;

    /// The current day of the week and time of day, used for absent query fields
    fn now(&self) -> (Day, TimeOfDay);

    /// How to treat malformed feed entries
    fn ingest_policy(&self) -> IngestPolicy {
        IngestPolicy::default()
    }

    /// List the points of sale open at the given day and time.
    ///
    /// Both parameters are validated before storage is consulted; absent ones
    /// default to [`Application::now`]. The backend's coarse day filter is
    /// refined with [`OpeningWindow::matches`](crate::models::OpeningWindow::matches)
    /// and the surviving rows are aggregated per point of sale.
    fn list_open(
        &self,
        day: Option<&str>,
        time: Option<&str>,
    ) -> impl Future<
        Output = Result<
            Map<PointOfSaleId, PointOfSaleRecord>,
            QueryFailure<<Self::Repository as Repository>::Error>,
        >,
    > + Send {
        let query = QuerySpec::parse(day, time);
        async move {
            let (day, time) = query?.resolve(|| self.now());
            let rows = self
                .database()
                .open_on(day)
                .await
                .map_err(QueryFailure::Storage)?;
            Ok(aggregate(
                rows.into_iter().filter(|row| row.window.matches(day, time)),
            ))
        }
    }

    /// Fetch the feed and replace the stored points of sale with it.
    ///
    /// Every entry is normalized before storage is touched, so an aborted batch
    /// leaves the previous data in place.
    fn refresh(
        &self,
    ) -> impl Future<
        Output = Result<
            IngestReport,
            IngestFailure<
                <Self::Feed as FeedSource>::Error,
                <Self::Repository as Repository>::Error,
            >,
        >,
    > + Send {
        async move {
            let entries = self.feed().fetch().await.map_err(IngestFailure::Feed)?;
            let NormalizedBatch {
                entries: batch,
                rejected,
            } = normalize_batch(entries, self.ingest_policy())?;

            let skipped: Vec<PointOfSaleId> = rejected
                .into_iter()
                .map(|RejectedEntry { id, reason }| {
                    event!(Level::WARN, %id, %reason, "skipping feed entry");
                    id
                })
                .collect();

            let (points_of_sale, opening_hours) = self
                .database()
                .replace_all(batch)
                .await
                .map_err(IngestFailure::Storage)?;

            event!(
                Level::INFO,
                points_of_sale,
                opening_hours,
                skipped = skipped.len(),
                "feed ingested"
            );

            Ok(IngestReport {
                points_of_sale,
                opening_hours,
                skipped,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::{JoinedRow, OpeningHoursRow, PointOfSale, RawFeedEntry},
        ports::Table,
    };
    use std::sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    };

    #[derive(Debug, Error)]
    #[error("storage offline")]
    struct Offline;

    /// A storage backend that keeps both tables in vectors.
    #[derive(Default)]
    struct Memory {
        points_of_sale: Mutex<Vec<PointOfSale>>,
        opening_hours: Mutex<Vec<OpeningHoursRow>>,
        offline: bool,
        reads: AtomicUsize,
    }

    impl Repository for Memory {
        type Error = Offline;
    }

    impl PointOfSaleReader for Memory {
        async fn open_on(&self, day: Day) -> Result<Vec<JoinedRow>, Self::Error> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            if self.offline {
                return Err(Offline);
            }
            let points_of_sale = self.points_of_sale.lock().unwrap();
            let opening_hours = self.opening_hours.lock().unwrap();
            Ok(points_of_sale
                .iter()
                .flat_map(|pos| {
                    opening_hours
                        .iter()
                        .filter(move |row| row.point_of_sale_id == pos.id)
                        .filter(move |row| {
                            row.window.covers_day(day)
                                || (row.window.is_overnight()
                                    && row.window.covers_day(day.previous()))
                        })
                        .map(move |row| JoinedRow {
                            point_of_sale: pos.clone(),
                            window: row.window,
                        })
                })
                .collect())
        }
    }

    impl PointOfSaleWriter for Memory {
        async fn clear(&self, table: Table) -> Result<(), Self::Error> {
            match table {
                Table::PointsOfSale => self.points_of_sale.lock().unwrap().clear(),
                Table::OpeningHours => self.opening_hours.lock().unwrap().clear(),
            }
            Ok(())
        }

        async fn insert_point_of_sale(&self, row: PointOfSale) -> Result<(), Self::Error> {
            self.points_of_sale.lock().unwrap().push(row);
            Ok(())
        }

        async fn insert_opening_hours(&self, row: OpeningHoursRow) -> Result<(), Self::Error> {
            self.opening_hours.lock().unwrap().push(row);
            Ok(())
        }

        async fn replace_all(
            &self,
            batch: Vec<(PointOfSale, Vec<OpeningHoursRow>)>,
        ) -> Result<(usize, usize), Self::Error> {
            if self.offline {
                return Err(Offline);
            }
            for table in Table::CLEAR_ORDER {
                self.clear(table).await?;
            }
            let (mut points_of_sale, mut opening_hours) = (0, 0);
            for (pos, rows) in batch {
                self.insert_point_of_sale(pos).await?;
                points_of_sale += 1;
                for row in rows {
                    self.insert_opening_hours(row).await?;
                    opening_hours += 1;
                }
            }
            Ok((points_of_sale, opening_hours))
        }
    }

    #[derive(Debug, Error)]
    #[error("feed unavailable")]
    struct Unavailable;

    struct StaticFeed(Vec<RawFeedEntry>);

    impl FeedSource for StaticFeed {
        type Error = Unavailable;

        async fn fetch(&self) -> Result<Vec<RawFeedEntry>, Self::Error> {
            Ok(self.0.clone())
        }
    }

    struct TestApp {
        db: Memory,
        feed: StaticFeed,
        policy: IngestPolicy,
    }

    impl Application for TestApp {
        type Repository = Memory;
        type Feed = StaticFeed;

        fn database(&self) -> &Self::Repository {
            &self.db
        }

        fn feed(&self) -> &Self::Feed {
            &self.feed
        }

        fn now(&self) -> (Day, TimeOfDay) {
            // Wednesday at noon
            (Day::try_from(3).unwrap(), TimeOfDay::new(12, 0).unwrap())
        }

        fn ingest_policy(&self) -> IngestPolicy {
            self.policy
        }
    }

    fn feed() -> Vec<RawFeedEntry> {
        serde_json::from_value(serde_json::json!([
            {
                "id": "a", "type": "office", "name": "A", "lat": 0.0, "lon": 0.0,
                "services": 0, "payMethods": 0,
                "openingHours": [
                    {"from": 1, "to": 5, "hours": "9:00-12:00,13:00-17:00"},
                    {"from": 6, "to": 6, "hours": "10:00-14:00"}
                ]
            },
            {
                "id": "b", "type": "machine", "name": "B", "lat": 0.0, "lon": 0.0,
                "services": 0, "payMethods": 0,
                "openingHours": [{"from": 0, "to": 6, "hours": "0:00-23:59"}]
            },
            {
                "id": "c", "type": "office", "name": "C", "lat": 0.0, "lon": 0.0,
                "services": 0, "payMethods": 0,
                "openingHours": [{"from": 1, "to": 5, "hours": "noon"}]
            },
            {
                "id": "d", "type": "bar", "name": "D", "lat": 0.0, "lon": 0.0,
                "services": 0, "payMethods": 0,
                "openingHours": [{"from": 5, "to": 6, "hours": "22:00-3:00"}]
            }
        ]))
        .unwrap()
    }

    fn app(policy: IngestPolicy) -> TestApp {
        TestApp {
            db: Memory::default(),
            feed: StaticFeed(feed()),
            policy,
        }
    }

    fn ids(records: &Map<PointOfSaleId, PointOfSaleRecord>) -> Vec<&str> {
        records.keys().map(|id| id.0.as_str()).collect()
    }

    #[tokio::test]
    async fn test_refresh_skips_malformed() {
        let app = app(IngestPolicy::Skip);
        let report = app.refresh().await.unwrap();
        assert_eq!(report.points_of_sale, 3);
        assert_eq!(report.opening_hours, 5);
        assert_eq!(report.skipped, vec![PointOfSaleId::from("c")]);
    }

    #[tokio::test]
    async fn test_refresh_aborts_without_touching_storage() {
        let app = app(IngestPolicy::Abort);
        app.db
            .insert_point_of_sale(feed()[0].point_of_sale.clone())
            .await
            .unwrap();

        let failure = app.refresh().await.unwrap_err();
        assert!(matches!(
            failure,
            IngestFailure::MalformedHours { ref id, .. } if id.0 == "c"
        ));
        assert_eq!(app.db.points_of_sale.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_refresh_duplicates() {
        let mut skipping = app(IngestPolicy::Skip);
        skipping.feed.0.push(feed()[1].clone());
        let report = skipping.refresh().await.unwrap();
        assert_eq!(report.points_of_sale, 3);
        assert_eq!(
            report.skipped,
            vec![PointOfSaleId::from("c"), PointOfSaleId::from("b")]
        );

        let mut aborting = app(IngestPolicy::Abort);
        aborting.feed.0.swap(2, 3);
        aborting.feed.0.insert(1, feed()[0].clone());
        assert!(matches!(
            aborting.refresh().await,
            Err(IngestFailure::DuplicateId(id)) if id.0 == "a"
        ));
    }

    #[tokio::test]
    async fn test_list_open() {
        let app = app(IngestPolicy::Skip);
        app.refresh().await.unwrap();

        // Wednesday at noon, from the clock
        let records = app.list_open(None, None).await.unwrap();
        assert_eq!(ids(&records), vec!["a", "b"]);
        assert_eq!(records[0].windows.len(), 1);
        assert_eq!(records[0].windows[0].hours(), "09:00-12:00");

        // Wednesday, 12:30 is between the two morning and afternoon windows
        let records = app.list_open(None, Some("12:30")).await.unwrap();
        assert_eq!(ids(&records), vec!["b"]);

        // Saturday night and its Sunday morning tail
        let records = app.list_open(Some("6"), Some("23:00")).await.unwrap();
        assert_eq!(ids(&records), vec!["b", "d"]);
        let records = app.list_open(Some("0"), Some("2:30")).await.unwrap();
        assert_eq!(ids(&records), vec!["b", "d"]);
        let records = app.list_open(Some("5"), Some("2:30")).await.unwrap();
        assert_eq!(ids(&records), vec!["b"]);
    }

    #[tokio::test]
    async fn test_list_open_validates_before_storage() {
        let app = app(IngestPolicy::Skip);

        assert!(matches!(
            app.list_open(Some("7"), None).await,
            Err(QueryFailure::Query(QueryError::InvalidDay(_)))
        ));
        assert!(matches!(
            app.list_open(None, Some("9:0")).await,
            Err(QueryFailure::Query(QueryError::InvalidTime(_)))
        ));
        assert_eq!(app.db.reads.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_storage_failures_pass_through() {
        let mut app = app(IngestPolicy::Skip);
        app.db.offline = true;

        assert!(matches!(
            app.list_open(Some("1"), Some("10:00")).await,
            Err(QueryFailure::Storage(Offline))
        ));
        assert!(matches!(
            app.refresh().await,
            Err(IngestFailure::Storage(Offline))
        ));
    }
}
