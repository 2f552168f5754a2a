//! # Query Configuration
//!
//! The only thing the query layer needs from the schema layer is the set of
//! column names it renders into predicates. They are opaque tokens here and
//! can be overridden from a configuration file or the environment.

use crate::constants::batches;
use crate::error::{QueryError, Result};
use config::Source;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, warn};

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "DOWNLOAD_QUERY";

/// Characters that would change the shape of a rendered predicate
const RESERVED_COLUMN_CHARS: [char; 3] = ['?', '(', ')'];

/// Column-name tokens rendered into batch queries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnCatalog {
    /// Identity column of the batches table
    pub id: String,
    /// Internal status code column
    pub status: String,
}

impl Default for ColumnCatalog {
    fn default() -> Self {
        Self {
            id: batches::COLUMN_ID.to_string(),
            status: batches::COLUMN_STATUS.to_string(),
        }
    }
}

impl ColumnCatalog {
    /// Field names accepted under `[columns]`
    pub const FIELDS: [&'static str; 2] = ["id", "status"];

    /// Reject tokens that cannot stand alone in a rendered predicate
    ///
    /// A placeholder or parenthesis inside a column token would break the
    /// match between placeholders and arguments, or the group structure.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [("id", &self.id), ("status", &self.status)] {
            if value.is_empty() {
                return Err(QueryError::configuration(format!(
                    "column '{field}' must not be empty"
                )));
            }
            if value.chars().any(char::is_whitespace) {
                return Err(QueryError::configuration(format!(
                    "column '{field}' contains whitespace: '{value}'"
                )));
            }
            if let Some(reserved) = value.chars().find(|c| RESERVED_COLUMN_CHARS.contains(c)) {
                return Err(QueryError::configuration(format!(
                    "column '{field}' contains reserved character '{reserved}': '{value}'"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    pub columns: ColumnCatalog,
}

impl QueryConfig {
    /// Load configuration from an optional file, then apply environment overrides
    ///
    /// The file format is taken from its extension. A missing file is not an
    /// error; defaults are used for anything not set. Environment variables use
    /// the `DOWNLOAD_QUERY` prefix and `__` as the nesting separator, e.g.
    /// `DOWNLOAD_QUERY__COLUMNS__STATUS`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            debug!("Loading query configuration from {}", path.display());
            builder = builder.add_source(config::File::from(path).required(false));
        }

        let settings = builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?;

        for key in ignored_keys(&settings)? {
            warn!(key = %key, "Ignoring unknown query configuration key");
        }

        let config: Self = settings.try_deserialize()?;
        config.validate()?;

        info!(
            id_column = %config.columns.id,
            status_column = %config.columns.status,
            "Query configuration loaded"
        );

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.columns.validate()
    }
}

/// Keys present in the merged sources that map to no configuration field
fn ignored_keys(settings: &config::Config) -> Result<Vec<String>> {
    let mut ignored = Vec::new();
    for (key, value) in settings.collect()? {
        if key != "columns" {
            ignored.push(key);
            continue;
        }
        // a scalar here fails deserialization with a clearer message
        if let Ok(table) = value.into_table() {
            ignored.extend(
                table
                    .keys()
                    .filter(|field| !ColumnCatalog::FIELDS.contains(&field.as_str()))
                    .map(|field| format!("columns.{field}")),
            );
        }
    }
    ignored.sort();
    Ok(ignored)
}
