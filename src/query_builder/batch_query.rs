use super::conditions::{Expression, Wildcard};
use super::criteria::{Criteria, CriteriaBuilder, SortOrder, Sortable};
use super::liveness;
use super::status_filter::{status_expression, StatusFilter};
use crate::config::ColumnCatalog;
use crate::error::Result;
use tracing::debug;

/// Rendered batch query: selection, ordering and positional arguments
///
/// Consumed verbatim by the execution layer, which binds
/// `selection_arguments` to the `?` placeholders of `selection` in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchQuery {
    selection: Option<String>,
    sort_order: Option<String>,
    selection_arguments: Vec<String>,
}

impl BatchQuery {
    /// No constraints and no ordering: every batch in storage order
    pub const ALL: BatchQuery = BatchQuery {
        selection: None,
        sort_order: None,
        selection_arguments: Vec::new(),
    };

    pub fn builder() -> BatchQueryBuilder {
        BatchQueryBuilder::new()
    }

    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    pub fn sort_order(&self) -> Option<&str> {
        self.sort_order.as_deref()
    }

    pub fn selection_arguments(&self) -> &[String] {
        &self.selection_arguments
    }

    /// True when nothing constrains or orders the result
    pub fn is_all(&self) -> bool {
        self.selection.is_none() && self.sort_order.is_none()
    }

    /// Render a complete `SELECT` statement over `table`
    pub fn to_select_sql(&self, table: &str) -> String {
        let mut sql = format!("SELECT * FROM {table}");

        if let Some(selection) = &self.selection {
            sql.push_str(" WHERE ");
            sql.push_str(selection);
        }

        if let Some(sort_order) = &self.sort_order {
            sql.push_str(" ORDER BY ");
            sql.push_str(sort_order);
        }

        sql
    }
}

impl From<Criteria> for BatchQuery {
    fn from(criteria: Criteria) -> Self {
        let (selection, sort_order, selection_arguments) = criteria.into_parts();
        Self {
            selection,
            sort_order,
            selection_arguments,
        }
    }
}

/// Builder for batch queries by identity, public status and ordering
///
/// Identity and status constraints are kept as separate groups and joined
/// with `AND` at build time. Setting either one again replaces it, and the
/// last ordering directive wins.
#[derive(Debug, Clone, Default)]
pub struct BatchQueryBuilder {
    columns: ColumnCatalog,
    id: Option<Expression>,
    status: Option<Expression>,
    sort: Option<SortOrder>,
}

impl BatchQueryBuilder {
    /// Create a builder over the default batches columns
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder over a custom column catalog
    ///
    /// The catalog is validated first, so no column token can add a
    /// placeholder or parenthesis of its own to the rendered selection.
    pub fn with_columns(columns: ColumnCatalog) -> Result<Self> {
        columns.validate()?;
        Ok(Self {
            columns,
            ..Self::default()
        })
    }

    /// Constrain to the batch with this identity
    pub fn with_id(mut self, id: i64) -> Self {
        let expression = CriteriaBuilder::new()
            .with_selection(self.columns.id.as_str(), Wildcard::Equals)
            .with_argument(id.to_string())
            .into_expression();
        self.id = Some(expression);
        self
    }

    /// Constrain to batches in any of the given public status categories
    ///
    /// An empty filter removes the status constraint.
    pub fn with_status_filter(mut self, filter: impl Into<StatusFilter>) -> Self {
        let filter = filter.into();
        self.status = status_expression(filter, &self.columns.status);
        self
    }

    /// Same as [`with_status_filter`](Self::with_status_filter) for a raw category mask
    pub fn with_status_flags(self, bits: u32) -> Result<Self> {
        let filter = StatusFilter::from_bits(bits)?;
        Ok(self.with_status_filter(filter))
    }

    pub fn with_sort_ascending_by(mut self, column: impl Into<String>) -> Self {
        self.sort = Some(SortOrder::ascending(column));
        self
    }

    pub fn with_sort_descending_by(mut self, column: impl Into<String>) -> Self {
        self.sort = Some(SortOrder::descending(column));
        self
    }

    /// Sort by liveness: downloading, queued, other, paused, failed, completed
    pub fn with_sort_by_liveness(mut self) -> Self {
        self.sort = Some(liveness::order_by_liveness(&self.columns.status));
        self
    }

    pub fn build(self) -> BatchQuery {
        let mut criteria = CriteriaBuilder::new();
        if let Some(order) = self.sort {
            criteria = criteria.with_sort_order(order);
        }

        let criteria = match (self.id, self.status) {
            (Some(id), Some(status)) => criteria
                .with_inner_criteria(id)
                .and()
                .with_inner_criteria(status)
                .build(),
            (Some(only), None) | (None, Some(only)) => criteria.with_inner_criteria(only).build(),
            (None, None) => criteria.build(),
        };

        let query = BatchQuery::from(criteria);
        debug!(
            selection = query.selection().unwrap_or("<all>"),
            sort_order = query.sort_order().unwrap_or("<default>"),
            argument_count = query.selection_arguments().len(),
            "Built batch query"
        );
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::StatusCategory;
    use crate::error::QueryError;

    #[test]
    fn test_all_has_no_constraints() {
        assert_eq!(BatchQuery::ALL.selection(), None);
        assert_eq!(BatchQuery::ALL.sort_order(), None);
        assert!(BatchQuery::ALL.selection_arguments().is_empty());
        assert!(BatchQuery::ALL.is_all());
        assert_eq!(BatchQuery::builder().build(), BatchQuery::ALL);
    }

    #[test]
    fn test_with_id() {
        let query = BatchQuery::builder().with_id(42).build();
        assert_eq!(query.selection(), Some("(_id = ?)"));
        assert_eq!(query.selection_arguments(), ["42"]);
    }

    #[test]
    fn test_id_and_status_are_and_joined_groups() {
        let query = BatchQuery::builder()
            .with_id(7)
            .with_status_filter(StatusCategory::Running)
            .build();
        assert_eq!(query.selection(), Some("(_id = ?) AND (batch_status = ?)"));
        assert_eq!(query.selection_arguments(), ["7", "192"]);
    }

    #[test]
    fn test_argument_order_does_not_depend_on_call_order() {
        let query = BatchQuery::builder()
            .with_status_filter(StatusCategory::Running)
            .with_id(7)
            .build();
        assert_eq!(query.selection_arguments(), ["7", "192"]);
    }

    #[test]
    fn test_empty_status_filter_removes_constraint() {
        let query = BatchQuery::builder()
            .with_status_filter(StatusCategory::Paused)
            .with_status_filter(StatusFilter::empty())
            .build();
        assert_eq!(query, BatchQuery::ALL);
    }

    #[test]
    fn test_with_status_flags_rejects_unknown_bits() {
        assert!(BatchQuery::builder().with_status_flags(1 << 7).is_err());

        let query = BatchQuery::builder()
            .with_status_flags(StatusCategory::Pending.bit())
            .unwrap()
            .build();
        assert_eq!(query.selection(), Some("(batch_status = ?)"));
        assert_eq!(query.selection_arguments(), ["190"]);
    }

    #[test]
    fn test_sort_variants() {
        let ascending = BatchQuery::builder().with_sort_ascending_by("batch_title").build();
        assert_eq!(ascending.sort_order(), Some("batch_title ASC"));
        assert_eq!(ascending.selection(), None);
        assert!(!ascending.is_all());

        let descending = BatchQuery::builder()
            .with_sort_descending_by("batch_total_bytes")
            .build();
        assert_eq!(descending.sort_order(), Some("batch_total_bytes DESC"));

        let live = BatchQuery::builder().with_sort_by_liveness().build();
        assert_eq!(
            live.sort_order(),
            Some(liveness::case_expression("batch_status").as_str())
        );
    }

    #[test]
    fn test_custom_columns() {
        let columns = ColumnCatalog {
            id: "batch_id".to_string(),
            status: "state".to_string(),
        };
        let query = BatchQueryBuilder::with_columns(columns)
            .unwrap()
            .with_id(1)
            .with_status_filter(StatusCategory::Failed)
            .with_sort_by_liveness()
            .build();
        assert_eq!(
            query.selection(),
            Some("(batch_id = ?) AND (state >= ? AND state < ?)")
        );
        assert!(query.sort_order().unwrap().starts_with("CASE state "));
    }

    #[test]
    fn test_to_select_sql() {
        let query = BatchQuery::builder()
            .with_id(3)
            .with_sort_ascending_by("_id")
            .build();
        assert_eq!(
            query.to_select_sql("batches"),
            "SELECT * FROM batches WHERE (_id = ?) ORDER BY _id ASC"
        );
        assert_eq!(BatchQuery::ALL.to_select_sql("batches"), "SELECT * FROM batches");
    }

    #[test]
    fn test_with_columns_rejects_placeholder_in_column() {
        let columns = ColumnCatalog {
            id: "a?".to_string(),
            status: "s".to_string(),
        };
        let err = BatchQueryBuilder::with_columns(columns).unwrap_err();
        assert!(matches!(err, QueryError::Configuration { .. }));
    }

    #[test]
    fn test_with_columns_rejects_parentheses_in_column() {
        let columns = ColumnCatalog {
            id: "_id".to_string(),
            status: "max(status)".to_string(),
        };
        assert!(BatchQueryBuilder::with_columns(columns).is_err());
    }
}
