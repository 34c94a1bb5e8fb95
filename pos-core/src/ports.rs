mod application;
mod feed;
mod repository;

pub use crate::models::IngestPolicy;
pub use application::{Application, IngestFailure, IngestReport, QueryFailure};
pub use feed::FeedSource;
pub use repository::{PointOfSaleReader, PointOfSaleWriter, Repository, Table};
