//! # Status and Schema Constants
//!
//! Internal status codes stored in the batches table, the public status
//! categories callers filter by, and the column-name catalog of the batches
//! table.
//!
//! Internal codes follow the HTTP-like numbering used by the download
//! service: 1xx informational codes for in-flight work, 200 for success and
//! the open range `[400, 600)` for failures.

use crate::error::{QueryError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// Inclusive lower bound of the failure code range
pub const LOW_END_FAILED_STATUS_CODE: i32 = 400;

/// Exclusive upper bound of the failure code range
pub const HIGH_END_FAILED_STATUS_CODE: i32 = 600;

/// Every status code in this range is reported publicly as failed
pub const FAILED_STATUS_RANGE: Range<i32> = LOW_END_FAILED_STATUS_CODE..HIGH_END_FAILED_STATUS_CODE;

/// Check whether a raw status code falls in the failure range
pub fn is_failed_code(code: i32) -> bool {
    FAILED_STATUS_RANGE.contains(&code)
}

/// Internal batch status codes as persisted in the status column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DownloadStatus {
    /// Queued, not yet started
    Pending,
    /// Currently transferring
    Running,
    /// Paused explicitly by the application
    PausedByApp,
    /// Waiting to retry after a transient error
    WaitingToRetry,
    /// Waiting for any network connection
    WaitingForNetwork,
    /// Waiting for an unmetered connection
    QueuedForWifi,
    /// Finished successfully
    Success,
    /// At least one download in the batch failed
    BatchFailed,
}

impl DownloadStatus {
    /// All internal statuses in code order
    pub const ALL: [Self; 8] = [
        Self::Pending,
        Self::Running,
        Self::PausedByApp,
        Self::WaitingToRetry,
        Self::WaitingForNetwork,
        Self::QueuedForWifi,
        Self::Success,
        Self::BatchFailed,
    ];

    /// Integer code stored in the status column
    pub const fn code(self) -> i32 {
        match self {
            Self::Pending => 190,
            Self::Running => 192,
            Self::PausedByApp => 193,
            Self::WaitingToRetry => 194,
            Self::WaitingForNetwork => 195,
            Self::QueuedForWifi => 196,
            Self::Success => 200,
            Self::BatchFailed => 498,
        }
    }

    /// Look up a status by its stored code
    pub fn from_code(code: i32) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|status| status.code() == code)
            .ok_or_else(|| QueryError::UnknownDownloadStatus {
                value: code.to_string(),
            })
    }

    fn name(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::PausedByApp => "paused_by_app",
            Self::WaitingToRetry => "waiting_to_retry",
            Self::WaitingForNetwork => "waiting_for_network",
            Self::QueuedForWifi => "queued_for_wifi",
            Self::Success => "success",
            Self::BatchFailed => "batch_failed",
        }
    }
}

impl fmt::Display for DownloadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for DownloadStatus {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|status| status.name() == s)
            .ok_or_else(|| QueryError::UnknownDownloadStatus {
                value: s.to_string(),
            })
    }
}

/// Public, coarse status categories exposed to callers
///
/// Each category owns one bit of a status filter mask. The declaration order
/// is the order in which categories are expanded into predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusCategory {
    Pending,
    Running,
    Paused,
    Successful,
    Failed,
}

impl StatusCategory {
    /// All categories in expansion order
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::Running,
        Self::Paused,
        Self::Successful,
        Self::Failed,
    ];

    /// Flag bit of this category in a status mask
    pub const fn bit(self) -> u32 {
        match self {
            Self::Pending => 1 << 0,
            Self::Running => 1 << 1,
            Self::Paused => 1 << 2,
            Self::Successful => 1 << 3,
            Self::Failed => 1 << 4,
        }
    }

    /// Translate a stored status code into its public category
    ///
    /// Returns `None` for codes that no category filter would match.
    pub fn of_code(code: i32) -> Option<Self> {
        if is_failed_code(code) {
            return Some(Self::Failed);
        }
        match DownloadStatus::from_code(code).ok()? {
            DownloadStatus::Pending => Some(Self::Pending),
            DownloadStatus::Running => Some(Self::Running),
            DownloadStatus::PausedByApp
            | DownloadStatus::WaitingToRetry
            | DownloadStatus::WaitingForNetwork
            | DownloadStatus::QueuedForWifi => Some(Self::Paused),
            DownloadStatus::Success => Some(Self::Successful),
            // batch_failed sits inside the failure range and is handled above
            DownloadStatus::BatchFailed => Some(Self::Failed),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Paused => "paused",
            Self::Successful => "successful",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for StatusCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for StatusCategory {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|category| category.name() == s)
            .ok_or_else(|| QueryError::UnknownStatusCategory {
                value: s.to_string(),
            })
    }
}

/// Column and table names of the batches table
pub mod batches {
    pub const TABLE_NAME: &str = "batches";

    pub const COLUMN_ID: &str = "_id";
    pub const COLUMN_TITLE: &str = "batch_title";
    pub const COLUMN_DESCRIPTION: &str = "batch_description";
    pub const COLUMN_BIG_PICTURE: &str = "batch_big_picture";
    pub const COLUMN_STATUS: &str = "batch_status";
    pub const COLUMN_VISIBILITY: &str = "visibility";
    pub const COLUMN_DELETED: &str = "batch_deleted";
    pub const COLUMN_TOTAL_BYTES: &str = "batch_total_bytes";
    pub const COLUMN_CURRENT_BYTES: &str = "batch_current_bytes";
}
