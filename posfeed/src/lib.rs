use clap::Parser;
use pos_core::{
    models::{QueryError, RawFeedEntry, RejectedEntry},
    ports::IngestPolicy,
};

mod io;
pub use io::*;

mod commands;
pub use commands::*;

// The top-level arguments -- presently just which subcommand to execute
#[derive(Parser)]
#[command(version, about, long_about = None)]
pub struct BaseArgs {
    #[command(subcommand)]
    pub command: Commands,
}

impl BaseArgs {
    pub fn evaluate(self) -> anyhow::Result<()> {
        match self.command {
            Commands::Normalize { io, policy } => {
                let input = io.read()?;
                let entries = serde_json::from_reader::<_, Vec<RawFeedEntry>>(input)?;
                let normalized = normalize_feed(entries, IngestPolicy::from(policy))?;
                let output = io.write()?;
                serde_json::to_writer_pretty(output, &normalized)?;
            }
            Commands::Query {
                io,
                day,
                time,
                policy,
            } => {
                let input = io.read()?;
                let entries = serde_json::from_reader::<_, Vec<RawFeedEntry>>(input)?;
                let open = open_at(entries, &day, &time, IngestPolicy::from(policy))?;
                let output = io.write()?;
                serde_json::to_writer_pretty(output, &open)?;
            }
        }

        Ok(())
    }
}

#[derive(thiserror::Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Query(#[from] QueryError),
    #[error("rejected feed entry {0}")]
    Rejected(#[from] RejectedEntry),
}
