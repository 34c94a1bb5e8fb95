use super::IOArgs;
use clap::{Subcommand, ValueEnum};
use pos_core::ports::IngestPolicy;

mod normalize;
mod query;

pub use normalize::{Normalized, Rejected, StoredWindow, normalize_feed};
pub use query::{OpenAt, open_at};

#[derive(Subcommand)]
pub enum Commands {
    /// Normalize a feed into the rows that would be stored, reporting rejected entries
    Normalize {
        #[command(flatten)]
        io: IOArgs,

        /// What to do with malformed or duplicate entries
        #[arg(short, long, default_value = "skip")]
        policy: Policy,
    },

    /// List the points of sale in a feed that are open at a given day and time
    Query {
        #[command(flatten)]
        io: IOArgs,

        /// Day of the week, 0 (Sunday) to 6 (Saturday)
        #[arg(short, long)]
        day: String,

        /// Time of day, H:MM or HH:MM
        #[arg(short, long)]
        time: String,

        /// What to do with entries that would not be stored
        #[arg(short, long, default_value = "skip")]
        policy: Policy,
    },
}

// Mirrors IngestPolicy, which stays free of a clap dependency
#[derive(Clone, Copy, ValueEnum)]
pub enum Policy {
    Skip,
    Abort,
}

impl From<Policy> for IngestPolicy {
    fn from(value: Policy) -> Self {
        match value {
            Policy::Skip => IngestPolicy::Skip,
            Policy::Abort => IngestPolicy::Abort,
        }
    }
}
