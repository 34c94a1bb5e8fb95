#![warn(missing_docs)]
// Note: this overwrites the link in the README to point to the rust docs of the pos-core crate.
//! [pos_core]: https://docs.rs/pos_core/latest/pos_core/index.html
//! [pos_sqlite]: https://docs.rs/pos_sqlite/latest/pos_sqlite/index.html
//! [pos_axum]: https://docs.rs/pos_axum/latest/pos_axum/index.html
#![doc = include_str!("../README.md")]

/// Core domain models for points of sale and their opening hours.
///
/// This module contains the day and time primitives, the opening-hours parser,
/// the window matcher, the per-point-of-sale aggregator and the feed
/// normalizer. Everything here is a pure function over immutable inputs and
/// performs no I/O, so it may be called concurrently without locking.
pub mod models;

/// Interface traits for the points-of-sale system.
///
/// This module contains the "ports" in the hexagonal architecture pattern.
///
/// These traits define the contract between the domain logic and external adapters
/// (the storage backend, the upstream feed and the HTTP transport) without
/// specifying implementation details.
pub mod ports;
