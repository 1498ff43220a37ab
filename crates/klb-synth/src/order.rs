//! Deterministic output ordering.

use klb_core::Record;

/// Sort records by identity (name, then set identifier; none first).
///
/// The sort is stable, so records sharing an identity keep emission order.
pub fn sort_records(records: &mut [Record]) {
    records.sort_by_cached_key(Record::key);
}
