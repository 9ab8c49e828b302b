//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - DuckDB for the KeyValueStore port (the durable default)
//! - An in-memory map for the KeyValueStore port (tests, throwaway sessions)

pub mod duckdb;
pub mod memory;
