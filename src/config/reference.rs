//! Reference data loading from config.toml
//!
//! Operation types and users are not created by the ledger itself. They are described in
//! a TOML file and seeded into the database at startup. Seeding only inserts rows whose
//! ID is missing, so restarting against an existing database changes nothing.
//!
//! ```toml
//! [[operation_types]]
//! id = 4
//! description = "PAYMENT"
//! amount_behavior = "CREDIT"
//!
//! [[users]]
//! id = 1
//! name = "Ana"
//! ```

use crate::{
    core::operation_type::AmountBehavior,
    entities::{OperationType, User, operation_type, user},
    errors::{Error, Result},
};
use sea_orm::{Set, TransactionTrait, prelude::*};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info, instrument};

/// Default reference data file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReferenceData {
    /// Operation types to seed
    #[serde(default)]
    pub operation_types: Vec<OperationTypeConfig>,
    /// Users to seed
    #[serde(default)]
    pub users: Vec<UserConfig>,
}

/// Configuration for a single operation type
#[derive(Debug, Clone, Deserialize)]
pub struct OperationTypeConfig {
    /// Stable identifier callers post with
    pub id: i64,
    /// Human-readable label
    pub description: String,
    /// `"CREDIT"` or `"DEBIT"`
    pub amount_behavior: String,
}

/// Configuration for a single user
#[derive(Debug, Clone, Deserialize)]
pub struct UserConfig {
    /// User identifier accounts refer to
    pub id: i64,
    /// Display name
    pub name: String,
}

impl ReferenceData {
    /// Parses reference data from TOML text and checks every amount behavior.
    ///
    /// # Errors
    /// Returns [`Error::Config`] for malformed TOML or an unknown amount behavior.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let data: Self = toml::from_str(contents).map_err(|e| Error::Config {
            message: format!("Failed to parse reference data: {e}"),
        })?;
        for operation_type in &data.operation_types {
            operation_type.amount_behavior.parse::<AmountBehavior>()?;
        }
        Ok(data)
    }
}

/// Loads reference data from a TOML file.
///
/// # Errors
/// Returns an error if the file cannot be read, the TOML syntax is invalid, or an
/// operation type has an unknown amount behavior.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ReferenceData> {
    let path = path.as_ref();
    debug!("Loading reference data from {}", path.display());
    let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path.display()),
    })?;
    ReferenceData::from_toml(&contents)
}

/// Loads reference data from `LEDGER_CONFIG`, or ./config.toml when unset.
///
/// # Errors
/// See [`load_config`].
pub fn load_default_config() -> Result<ReferenceData> {
    let path =
        std::env::var("LEDGER_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    load_config(path)
}

/// Inserts any configured users and operation types that are not in the database yet.
///
/// Existing rows are left as they are. Returns how many rows were inserted.
#[instrument(skip_all)]
pub async fn seed_reference_data(db: &DatabaseConnection, data: &ReferenceData) -> Result<usize> {
    let txn = db.begin().await?;
    let mut inserted = 0;

    for config in &data.users {
        if User::find_by_id(config.id).one(&txn).await?.is_none() {
            user::ActiveModel {
                id: Set(config.id),
                name: Set(config.name.clone()),
            }
            .insert(&txn)
            .await?;
            inserted += 1;
        }
    }

    for config in &data.operation_types {
        if OperationType::find_by_id(config.id).one(&txn).await?.is_none() {
            let behavior: AmountBehavior = config.amount_behavior.parse()?;
            operation_type::ActiveModel {
                id: Set(config.id),
                description: Set(config.description.clone()),
                amount_behavior: Set(behavior.as_str().to_string()),
            }
            .insert(&txn)
            .await?;
            inserted += 1;
        }
    }

    txn.commit().await?;
    info!(inserted, "Reference data seeded");
    Ok(inserted)
}
