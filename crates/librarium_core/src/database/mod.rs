//! Database library
//!
//! The library crate exposes the `Db` struct and its methods to interact with the database
//! through pre-defined queries.
pub mod queries;
pub mod types;
