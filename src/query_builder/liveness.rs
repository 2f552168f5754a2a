//! Liveness ranking of batches for presentation order.
//!
//! Batches sort as: running, queued (pending and any unlisted status),
//! paused, failed, completed. The ranking is evaluated by the store through a
//! `CASE` expression over the status column, and [`rank`] gives the same
//! answer in Rust for any code.

use super::criteria::SortOrder;
use crate::constants::DownloadStatus;

/// Rank of every status not listed in [`LIVENESS_RANKS`]
pub const DEFAULT_RANK: u8 = 2;

/// Explicit ranks, lower sorts first
pub const LIVENESS_RANKS: [(DownloadStatus, u8); 5] = [
    (DownloadStatus::Running, 1),
    (DownloadStatus::Pending, 2),
    (DownloadStatus::PausedByApp, 3),
    (DownloadStatus::BatchFailed, 4),
    (DownloadStatus::Success, 5),
];

/// Liveness rank of a raw status code
pub fn rank(code: i32) -> u8 {
    LIVENESS_RANKS
        .iter()
        .find(|(status, _)| status.code() == code)
        .map_or(DEFAULT_RANK, |(_, rank)| *rank)
}

/// Render the ranking as a `CASE` expression over `status_column`
pub fn case_expression(status_column: &str) -> String {
    let mut sql = format!("CASE {status_column} ");
    for (status, rank) in LIVENESS_RANKS {
        sql.push_str(&format!("WHEN {} THEN {} ", status.code(), rank));
    }
    sql.push_str(&format!("ELSE {DEFAULT_RANK} END"));
    sql
}

/// Ordering directive that sorts by liveness, most live first
pub fn order_by_liveness(status_column: &str) -> SortOrder {
    SortOrder::Ranked(case_expression(status_column))
}
