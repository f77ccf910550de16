mod repository;

pub use repository::*;

/// SQL migration for the initial schema
pub const MIGRATION_001_INITIAL: &str = include_str!("migrations/001_initial.sql");

/// Fixed-width layout for stored timestamps, so range filters can compare text.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Last year `TIMESTAMP_FORMAT` writes with four digits.
pub const MAX_STORED_YEAR: i32 = 9999;
