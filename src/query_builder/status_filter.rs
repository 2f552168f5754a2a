//! Public status categories → predicates over the internal status column.
//!
//! | category   | predicate                                                    |
//! |------------|--------------------------------------------------------------|
//! | pending    | `status = PENDING`                                           |
//! | running    | `status = RUNNING`                                           |
//! | paused     | `status = PAUSED_BY_APP OR ... OR status = QUEUED_FOR_WIFI`  |
//! | successful | `status = SUCCESS`                                           |
//! | failed     | `(status >= 400 AND status < 600)`                           |
//!
//! Categories present in a filter are joined with `OR` in the declaration
//! order of [`StatusCategory::ALL`], which fixes the argument order.

use super::conditions::{Atom, Combinator, Expression, Operand, Wildcard};
use crate::constants::{DownloadStatus, StatusCategory, FAILED_STATUS_RANGE};
use crate::error::{QueryError, Result};
use std::ops::{BitOr, Range};
use tracing::trace;

/// Set of public status categories, one bit per category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct StatusFilter {
    bits: u32,
}

impl StatusFilter {
    /// Every bit owned by some category
    pub const KNOWN_BITS: u32 = {
        let mut bits = 0;
        let mut i = 0;
        while i < StatusCategory::ALL.len() {
            bits |= StatusCategory::ALL[i].bit();
            i += 1;
        }
        bits
    };

    pub const fn empty() -> Self {
        Self { bits: 0 }
    }

    pub const fn all() -> Self {
        Self {
            bits: Self::KNOWN_BITS,
        }
    }

    /// Accept a raw mask, rejecting bits that belong to no category
    pub fn from_bits(bits: u32) -> Result<Self> {
        let unknown = bits & !Self::KNOWN_BITS;
        if unknown != 0 {
            return Err(QueryError::UnknownStatusFlags { bits: unknown });
        }
        Ok(Self { bits })
    }

    pub const fn bits(self) -> u32 {
        self.bits
    }

    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }

    pub const fn contains(self, category: StatusCategory) -> bool {
        self.bits & category.bit() != 0
    }

    pub const fn with(self, category: StatusCategory) -> Self {
        Self {
            bits: self.bits | category.bit(),
        }
    }

    /// Categories present in the filter, in expansion order
    pub fn categories(self) -> impl Iterator<Item = StatusCategory> {
        StatusCategory::ALL
            .into_iter()
            .filter(move |category| self.contains(*category))
    }
}

impl From<StatusCategory> for StatusFilter {
    fn from(category: StatusCategory) -> Self {
        Self::empty().with(category)
    }
}

impl FromIterator<StatusCategory> for StatusFilter {
    fn from_iter<I: IntoIterator<Item = StatusCategory>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), Self::with)
    }
}

impl BitOr for StatusFilter {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self {
            bits: self.bits | rhs.bits,
        }
    }
}

impl BitOr<StatusCategory> for StatusFilter {
    type Output = Self;

    fn bitor(self, rhs: StatusCategory) -> Self::Output {
        self.with(rhs)
    }
}

impl BitOr for StatusCategory {
    type Output = StatusFilter;

    fn bitor(self, rhs: Self) -> Self::Output {
        StatusFilter::from(self).with(rhs)
    }
}

/// What a single category matches in the status column
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryPredicate {
    /// Equality with any of these statuses
    AnyOf(&'static [DownloadStatus]),
    /// Half-open numeric range of raw codes
    Range(Range<i32>),
}

const PENDING_STATUSES: &[DownloadStatus] = &[DownloadStatus::Pending];
const RUNNING_STATUSES: &[DownloadStatus] = &[DownloadStatus::Running];
const PAUSED_STATUSES: &[DownloadStatus] = &[
    DownloadStatus::PausedByApp,
    DownloadStatus::WaitingToRetry,
    DownloadStatus::WaitingForNetwork,
    DownloadStatus::QueuedForWifi,
];
const SUCCESSFUL_STATUSES: &[DownloadStatus] = &[DownloadStatus::Success];

impl CategoryPredicate {
    pub fn of(category: StatusCategory) -> Self {
        match category {
            StatusCategory::Pending => Self::AnyOf(PENDING_STATUSES),
            StatusCategory::Running => Self::AnyOf(RUNNING_STATUSES),
            StatusCategory::Paused => Self::AnyOf(PAUSED_STATUSES),
            StatusCategory::Successful => Self::AnyOf(SUCCESSFUL_STATUSES),
            StatusCategory::Failed => Self::Range(FAILED_STATUS_RANGE),
        }
    }

    /// Evaluate against a raw status code
    pub fn matches(&self, code: i32) -> bool {
        match self {
            Self::AnyOf(statuses) => statuses.iter().any(|status| status.code() == code),
            Self::Range(range) => range.contains(&code),
        }
    }

    /// Operands contributed at the filter's `OR` level
    ///
    /// Equalities join the surrounding `OR` directly; a range becomes one
    /// parenthesized `AND` group.
    fn operands(&self, status_column: &str) -> Vec<Operand> {
        match self {
            Self::AnyOf(statuses) => statuses
                .iter()
                .map(|status| {
                    Operand::from(Atom::new(
                        status_column,
                        Wildcard::Equals,
                        status.code().to_string(),
                    ))
                })
                .collect(),
            Self::Range(range) => {
                let bounds = Expression::join(
                    Combinator::And,
                    [
                        Atom::new(status_column, Wildcard::MoreThanEqual, range.start.to_string()),
                        Atom::new(status_column, Wildcard::LessThan, range.end.to_string()),
                    ],
                );
                bounds.map(Operand::from).into_iter().collect()
            }
        }
    }
}

/// Expand a status filter into a predicate over `status_column`
///
/// Returns `None` for an empty filter: no categories means no status
/// constraint, not an always-false predicate.
pub fn status_expression(filter: StatusFilter, status_column: &str) -> Option<Expression> {
    let operands: Vec<Operand> = filter
        .categories()
        .flat_map(|category| {
            let predicate = CategoryPredicate::of(category);
            trace!(category = %category, predicate = ?predicate, "Expanding status category");
            predicate.operands(status_column)
        })
        .collect();

    // a lone failed range gains nothing from its parentheses
    Expression::join(Combinator::Or, operands).map(Expression::ungroup)
}
