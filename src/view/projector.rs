//! Filter-then-sort projection.

use std::cmp::Ordering;

use super::{SortDirection, SortKey, ViewQuery};
use crate::records::ScanRecord;

/// Apply `query` to `records`.
///
/// 1. Records without a channel are dropped, whatever the band filter.
/// 2. Records outside the requested band are dropped.
/// 3. The rest is stably sorted by the query key, so equal keys keep their
///    input order.
#[must_use]
pub fn project(records: &[ScanRecord], query: &ViewQuery) -> Vec<ScanRecord> {
    let mut view: Vec<ScanRecord> = records
        .iter()
        .filter(|record| record.band().is_some_and(|band| query.band.admits(band)))
        .cloned()
        .collect();

    // slice::sort_by is stable
    view.sort_by(|a, b| compare(a, b, query.sort_key, query.sort_dir));

    log::trace!(
        "Projected {} of {} records (band {}, {} {})",
        view.len(),
        records.len(),
        query.band,
        query.sort_key,
        query.sort_dir
    );
    view
}

fn compare(a: &ScanRecord, b: &ScanRecord, key: SortKey, dir: SortDirection) -> Ordering {
    let ordering = match key {
        // Only records with a channel survive the filter
        SortKey::Channel => a.channel.cmp(&b.channel),
        SortKey::Signal => a.signal_dbm.cmp(&b.signal_dbm),
    };

    match dir {
        SortDirection::Ascending => ordering,
        SortDirection::Descending => ordering.reverse(),
    }
}
