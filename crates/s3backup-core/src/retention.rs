//! Retention selection for grouped backups.

use crate::object::ObjectRecord;

/// Splits `records` into the ones to keep and the ones to retire.
///
/// Records are ordered oldest first by last modification time. Records
/// without a timestamp count as the oldest; ties keep their listing order.
/// The newest `keep` records are retained and every older one is returned
/// for deletion, so exactly `records.len().saturating_sub(keep)` records
/// are selected.
pub fn select_expired(mut records: Vec<ObjectRecord>, keep: usize) -> Vec<ObjectRecord> {
    records.sort_by_key(|record| record.last_modified);

    let expired = records.len().saturating_sub(keep);
    records.truncate(expired);
    records
}
