//! Database schema definitions and column families.

/// Column family names for the `RocksDB` database.
pub mod cf {
    /// Every record, keyed by namespace prefix + id.
    pub const WORLD_STATE: &str = "world_state";
}

/// Returns all column family names for database initialization.
#[must_use]
pub fn all_column_families() -> Vec<&'static str> {
    vec![cf::WORLD_STATE]
}
