//! Criteria and the builders that assemble them.
//!
//! The builder is split into typestates so that only well-formed call
//! sequences compile:
//!
//! - [`CriteriaBuilder`] has nothing appended yet and accepts an operand.
//! - [`PendingArgument`] holds a selection waiting for its single argument.
//! - [`CriteriaChain`] ends in an operand and accepts a combinator or `build()`.
//! - [`PendingOperand`] ends in a combinator and only accepts an operand.
//!
//! Leading, trailing or doubled combinators, and atoms without exactly one
//! argument, therefore have no spelling.

use super::conditions::{Atom, Combinator, Expression, Operand, Wildcard};
use crate::error::QueryError;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub const fn keyword(self) -> &'static str {
        match self {
            SortDirection::Ascending => "ASC",
            SortDirection::Descending => "DESC",
        }
    }
}

/// Ordering directive of a criteria
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortOrder {
    /// Plain column with an explicit direction
    Column {
        column: String,
        direction: SortDirection,
    },
    /// Precomputed ranking expression, sorted ascending by rank
    Ranked(String),
}

impl SortOrder {
    pub fn ascending(column: impl Into<String>) -> Self {
        SortOrder::Column {
            column: column.into(),
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(column: impl Into<String>) -> Self {
        SortOrder::Column {
            column: column.into(),
            direction: SortDirection::Descending,
        }
    }

    /// Convert to SQL string
    pub fn to_sql(&self) -> String {
        match self {
            SortOrder::Column { column, direction } => {
                format!("{} {}", column, direction.keyword())
            }
            SortOrder::Ranked(expression) => expression.clone(),
        }
    }
}

/// Immutable, rendered selection + ordering + positional arguments
///
/// `selection` is `None` when nothing constrains the result and `sort` is
/// `None` when the store's default order applies. The number of `?`
/// placeholders in `selection` always equals `selection_arguments().len()`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Criteria {
    expression: Option<Expression>,
    selection: Option<String>,
    sort: Option<String>,
    arguments: Vec<String>,
}

impl Criteria {
    fn from_parts(expression: Option<Expression>, sort: Option<SortOrder>) -> Self {
        let (selection, arguments) = match &expression {
            Some(expression) => {
                let (sql, arguments) = expression.render();
                (Some(sql), arguments)
            }
            None => (None, Vec::new()),
        };
        let sort = sort.map(|order| order.to_sql());

        debug!(
            selection = selection.as_deref().unwrap_or("<all>"),
            sort = sort.as_deref().unwrap_or("<default>"),
            argument_count = arguments.len(),
            "Built criteria"
        );

        Self {
            expression,
            selection,
            sort,
            arguments,
        }
    }

    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    pub fn sort(&self) -> Option<&str> {
        self.sort.as_deref()
    }

    pub fn selection_arguments(&self) -> &[String] {
        &self.arguments
    }

    /// The expression tree behind `selection`, for embedding as a group elsewhere
    pub fn expression(&self) -> Option<&Expression> {
        self.expression.as_ref()
    }

    /// Number of positional placeholders in the selection text
    pub fn placeholder_count(&self) -> usize {
        self.selection
            .as_deref()
            .map_or(0, |selection| selection.matches('?').count())
    }

    /// Split into `(selection, sort, arguments)`
    pub fn into_parts(self) -> (Option<String>, Option<String>, Vec<String>) {
        (self.selection, self.sort, self.arguments)
    }
}

/// Take the expression of a built criteria, for embedding as a group
///
/// Fails for a criteria with no selection; an empty group has no rendering.
impl TryFrom<Criteria> for Expression {
    type Error = QueryError;

    fn try_from(criteria: Criteria) -> Result<Self, Self::Error> {
        criteria.expression.ok_or(QueryError::EmptyCriteria)
    }
}

/// Builders that can carry an ordering directive
pub trait Sortable: Sized {
    /// Replace the ordering directive
    fn with_sort_order(self, order: SortOrder) -> Self;

    /// Start a column ordering; finish it with `ascending()` or `descending()`
    fn sort_by(self, column: impl Into<String>) -> SortBy<Self> {
        SortBy {
            builder: self,
            column: column.into(),
        }
    }
}

/// A column ordering waiting for its direction
#[derive(Debug)]
pub struct SortBy<B> {
    builder: B,
    column: String,
}

impl<B: Sortable> SortBy<B> {
    pub fn ascending(self) -> B {
        self.builder.with_sort_order(SortOrder::ascending(self.column))
    }

    pub fn descending(self) -> B {
        self.builder.with_sort_order(SortOrder::descending(self.column))
    }
}

/// Empty criteria builder
#[derive(Debug, Clone, Default)]
pub struct CriteriaBuilder {
    sort: Option<SortOrder>,
}

impl CriteriaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a `column OP ?` atom; its value must follow with `with_argument`
    pub fn with_selection(self, column: impl Into<String>, wildcard: Wildcard) -> PendingArgument {
        PendingArgument {
            head: None,
            column: column.into(),
            wildcard,
            sort: self.sort,
        }
    }

    /// Append a previously assembled expression as a parenthesized group
    ///
    /// Accepts an [`Expression`] or an unfinished [`CriteriaChain`]; a built
    /// [`Criteria`] converts with `Expression::try_from`.
    pub fn with_inner_criteria(self, inner: impl Into<Expression>) -> CriteriaChain {
        CriteriaChain {
            expression: Expression::new(Operand::Group(Box::new(inner.into()))),
            sort: self.sort,
        }
    }

    /// Finish with no selection: matches every row
    pub fn build(self) -> Criteria {
        Criteria::from_parts(None, self.sort)
    }
}

impl Sortable for CriteriaBuilder {
    fn with_sort_order(mut self, order: SortOrder) -> Self {
        self.sort = Some(order);
        self
    }
}

/// A selection waiting for the value bound to its placeholder
#[derive(Debug, Clone)]
pub struct PendingArgument {
    head: Option<(Expression, Combinator)>,
    column: String,
    wildcard: Wildcard,
    sort: Option<SortOrder>,
}

impl PendingArgument {
    pub fn with_argument(self, value: impl Into<String>) -> CriteriaChain {
        let atom = Atom::new(self.column, self.wildcard, value);
        let expression = match self.head {
            Some((mut expression, combinator)) => {
                expression.push(combinator, atom);
                expression
            }
            None => Expression::new(atom),
        };
        CriteriaChain {
            expression,
            sort: self.sort,
        }
    }
}

/// Criteria builder whose last appended node is an operand
#[derive(Debug, Clone)]
pub struct CriteriaChain {
    expression: Expression,
    sort: Option<SortOrder>,
}

impl CriteriaChain {
    pub fn and(self) -> PendingOperand {
        self.combine(Combinator::And)
    }

    pub fn or(self) -> PendingOperand {
        self.combine(Combinator::Or)
    }

    fn combine(self, combinator: Combinator) -> PendingOperand {
        PendingOperand {
            expression: self.expression,
            combinator,
            sort: self.sort,
        }
    }

    /// Finish, rendering selection text and arguments
    pub fn build(self) -> Criteria {
        Criteria::from_parts(Some(self.expression), self.sort)
    }

    /// Finish as a bare expression, ready to embed as a group
    ///
    /// Any ordering directive is dropped; groups carry no ordering.
    pub fn into_expression(self) -> Expression {
        self.expression
    }
}

impl From<CriteriaChain> for Expression {
    fn from(chain: CriteriaChain) -> Self {
        chain.into_expression()
    }
}

impl Sortable for CriteriaChain {
    fn with_sort_order(mut self, order: SortOrder) -> Self {
        self.sort = Some(order);
        self
    }
}

/// Criteria builder whose last appended node is a combinator
#[derive(Debug, Clone)]
pub struct PendingOperand {
    expression: Expression,
    combinator: Combinator,
    sort: Option<SortOrder>,
}

impl PendingOperand {
    pub fn with_selection(self, column: impl Into<String>, wildcard: Wildcard) -> PendingArgument {
        PendingArgument {
            head: Some((self.expression, self.combinator)),
            column: column.into(),
            wildcard,
            sort: self.sort,
        }
    }

    pub fn with_inner_criteria(mut self, inner: impl Into<Expression>) -> CriteriaChain {
        self.expression
            .push(self.combinator, Operand::Group(Box::new(inner.into())));
        CriteriaChain {
            expression: self.expression,
            sort: self.sort,
        }
    }
}
