/// Database connection and schema management
pub mod database;

/// Reference data (operation types, users) loaded from config.toml
pub mod reference;
