//! Dump ingestion
//!
//! Streaming loaders for the Open Library data dumps: one pass over the authors dump, then one
//! pass over the works dump. The works pass resolves every referenced author identifier to a
//! display name through the author store, so the passes must run in that order.
pub mod authors;
pub mod errors;
pub mod line;
pub mod store;
pub mod works;
