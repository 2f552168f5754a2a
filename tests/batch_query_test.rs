//! Tests for the batch query façade

use download_query::constants::batches;
use download_query::query_builder::liveness;
use download_query::{BatchQuery, DownloadStatus, StatusCategory, StatusFilter};

fn code(status: DownloadStatus) -> String {
    status.code().to_string()
}

#[test]
fn test_paused_filter_is_four_way_or_group() {
    let query = BatchQuery::builder()
        .with_status_filter(StatusCategory::Paused)
        .build();

    let selection = query.selection().unwrap();
    assert_eq!(
        selection,
        "(batch_status = ? OR batch_status = ? OR batch_status = ? OR batch_status = ?)"
    );
    assert_eq!(selection.matches(" OR ").count(), 3);
    assert_eq!(
        query.selection_arguments(),
        [
            code(DownloadStatus::PausedByApp),
            code(DownloadStatus::WaitingToRetry),
            code(DownloadStatus::WaitingForNetwork),
            code(DownloadStatus::QueuedForWifi),
        ]
    );
}

#[test]
fn test_failed_filter_is_range_check() {
    let query = BatchQuery::builder()
        .with_status_filter(StatusCategory::Failed)
        .build();

    assert_eq!(
        query.selection(),
        Some("(batch_status >= ? AND batch_status < ?)")
    );
    assert_eq!(query.selection_arguments(), ["400", "600"]);
}

#[test]
fn test_pending_or_successful_in_enumeration_order() {
    // declaration order decides, not call order
    let query = BatchQuery::builder()
        .with_status_filter(StatusCategory::Successful | StatusCategory::Pending)
        .build();

    assert_eq!(
        query.selection(),
        Some("(batch_status = ? OR batch_status = ?)")
    );
    assert_eq!(
        query.selection_arguments(),
        [code(DownloadStatus::Pending), code(DownloadStatus::Success)]
    );
}

#[test]
fn test_id_and_running_status() {
    let query = BatchQuery::builder()
        .with_id(7)
        .with_status_filter(StatusCategory::Running)
        .build();

    assert_eq!(
        query.selection(),
        Some(format!("({} = ?) AND ({} = ?)", batches::COLUMN_ID, batches::COLUMN_STATUS).as_str())
    );
    assert_eq!(
        query.selection_arguments(),
        ["7".to_string(), code(DownloadStatus::Running)]
    );
}

#[test]
fn test_every_category_at_once() {
    let query = BatchQuery::builder()
        .with_status_filter(StatusFilter::all())
        .build();

    assert_eq!(
        query.selection(),
        Some(
            "(batch_status = ? OR batch_status = ? OR batch_status = ? OR batch_status = ? \
             OR batch_status = ? OR batch_status = ? OR batch_status = ? \
             OR (batch_status >= ? AND batch_status < ?))"
        )
    );
    assert_eq!(
        query.selection_arguments(),
        ["190", "192", "193", "194", "195", "196", "200", "400", "600"]
    );
}

#[test]
fn test_liveness_sort_order() {
    let query = BatchQuery::builder().with_sort_by_liveness().build();

    assert_eq!(query.selection(), None);
    assert_eq!(
        query.sort_order(),
        Some(
            "CASE batch_status WHEN 192 THEN 1 WHEN 190 THEN 2 WHEN 193 THEN 3 \
             WHEN 498 THEN 4 WHEN 200 THEN 5 ELSE 2 END"
        )
    );
    assert!(
        liveness::rank(DownloadStatus::Running.code())
            < liveness::rank(DownloadStatus::Pending.code())
    );
    assert_eq!(liveness::rank(777), liveness::rank(DownloadStatus::Pending.code()));
}

#[test]
fn test_all_query() {
    assert_eq!(BatchQuery::ALL.selection(), None);
    assert_eq!(BatchQuery::ALL.sort_order(), None);
    assert!(BatchQuery::ALL.selection_arguments().is_empty());
    assert_eq!(BatchQuery::default(), BatchQuery::ALL);
}

#[test]
fn test_identical_calls_render_identically() {
    let build = || {
        BatchQuery::builder()
            .with_id(99)
            .with_status_filter(StatusCategory::Paused | StatusCategory::Failed)
            .with_sort_descending_by(batches::COLUMN_TOTAL_BYTES)
            .build()
    };

    assert_eq!(build(), build());
}

#[test]
fn test_last_sort_directive_wins() {
    let query = BatchQuery::builder()
        .with_sort_by_liveness()
        .with_sort_ascending_by(batches::COLUMN_TITLE)
        .build();

    assert_eq!(query.sort_order(), Some("batch_title ASC"));
}
