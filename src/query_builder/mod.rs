//! # Query Builder System
//!
//! Builds the `(selection, sort order, arguments)` triple that the batch
//! persistence layer hands to its store.
//!
//! ## Key Components
//!
//! - [`conditions`] - Expression model: atoms, groups and combinators
//! - [`criteria`] - Typestate criteria builder and the rendered [`Criteria`]
//! - [`status_filter`] - Public status categories expanded to internal codes
//! - [`liveness`] - Liveness ranking used for presentation order
//! - [`batch_query`] - [`BatchQueryBuilder`] façade over all of the above
//!
//! ## Rendering
//!
//! Atoms render as `column OP ?`, groups are parenthesized and combinators
//! render as ` AND ` / ` OR `. Arguments are collected in a single pass over
//! the expression tree, so their order always follows the placeholders.
//!
//! ## Example Usage
//!
//! ```rust
//! use download_query::constants::StatusCategory;
//! use download_query::query_builder::BatchQuery;
//!
//! let query = BatchQuery::builder()
//!     .with_id(7)
//!     .with_status_filter(StatusCategory::Running)
//!     .with_sort_by_liveness()
//!     .build();
//!
//! assert_eq!(query.selection(), Some("(_id = ?) AND (batch_status = ?)"));
//! assert_eq!(query.selection_arguments(), ["7", "192"]);
//! ```

pub mod batch_query;
#[cfg(feature = "sqlite")]
pub mod binding;
pub mod conditions;
pub mod criteria;
pub mod liveness;
pub mod status_filter;

pub use batch_query::{BatchQuery, BatchQueryBuilder};
pub use conditions::{Atom, Combinator, Expression, Operand, Wildcard};
pub use criteria::{
    Criteria, CriteriaBuilder, CriteriaChain, PendingArgument, PendingOperand, SortBy,
    SortDirection, SortOrder, Sortable,
};
pub use status_filter::{status_expression, CategoryPredicate, StatusFilter};
