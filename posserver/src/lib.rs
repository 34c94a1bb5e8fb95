#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

pub mod clock;
pub mod feed;
pub mod impls;

mod schedule;
pub use schedule::{Scheduler, ZeroInterval};

mod cli;
pub use cli::Cli;

mod config;
pub use config::AppConfig;
