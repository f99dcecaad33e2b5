//! `librarium_core`
//!
//! Core library for the Librarium dump loader. This crate holds the record types, the SQLite
//! persistence layer and the ingestion pipeline for the Open Library author and work dumps, so
//! that the same logic can back both the command-line loader and a future serving surface.

pub mod database;

pub mod ingest;
