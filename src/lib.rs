#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Download Query
//!
//! Query construction for the batch persistence tier of a download manager.
//!
//! ## Overview
//!
//! Callers describe which batches they want (by identity, by public status
//! category) and how to order them (by column or by "liveness"). This crate
//! turns that request into a parameterized selection, an ordering clause and
//! an ordered argument list, ready for a separate execution layer to bind
//! positionally. It never talks to a store itself.
//!
//! ## Module Organization
//!
//! - [`query_builder`] - Expression model, criteria builder and batch query façade
//! - [`constants`] - Internal status codes, public status categories, batches columns
//! - [`config`] - Column-name catalog and configuration loading
//! - [`error`] - Structured error handling
//! - [`logging`] - Structured logging initialization
//!
//! ## Guarantees
//!
//! - Builder call sequences that would produce a leading, trailing or doubled
//!   combinator do not compile.
//! - Every atom carries exactly one argument, so the placeholder count of a
//!   rendered selection always equals the length of its argument list.
//! - Rendering is a pure function of the builder calls: identical calls give
//!   byte-identical output.
//!
//! ## Testing
//!
//! ```bash
//! cargo test --lib    # Unit tests
//! cargo test          # All tests, including SQLite execution checks
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod query_builder;

pub use config::{ColumnCatalog, QueryConfig};
pub use constants::{DownloadStatus, StatusCategory};
pub use error::{QueryError, Result};
pub use query_builder::{BatchQuery, BatchQueryBuilder, Criteria, CriteriaBuilder, StatusFilter};
