use crate::models::RawFeedEntry;

/// A source of raw point-of-sale entries, such as the upstream HTTP feed.
pub trait FeedSource {
    /// Error type for fetch or decode failures
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetch the complete current feed.
    fn fetch(&self) -> impl Future<Output = Result<Vec<RawFeedEntry>, Self::Error>> + Send;
}
