//! Create-or-update of records against the previously published set.

use std::collections::HashMap;

use klb_core::{Record, RecordKey, RecordType};
use tracing::trace;

/// Hands out records for emission, reusing previously published ones.
///
/// A previous record is reused at most once. When several previous records
/// share an identity (an address record and an alias at one name), an
/// emission takes the one with its own record type first.
#[derive(Debug, Default)]
pub struct RecordMerger {
    previous: HashMap<RecordKey, Vec<Record>>,
    emitted: Vec<Record>,
    index: HashMap<(RecordKey, RecordType), usize>,
    reused: usize,
}

impl RecordMerger {
    /// Index the previous records by identity.
    pub fn new(previous: Vec<Record>) -> Self {
        let mut by_key: HashMap<RecordKey, Vec<Record>> = HashMap::new();
        for record in previous {
            by_key.entry(record.key()).or_default().push(record);
        }
        Self {
            previous: by_key,
            ..Default::default()
        }
    }

    /// Emit a record, updating type, targets and TTL of an existing one
    /// when the identity is known. Provider attributes and labels of a
    /// reused record are left alone.
    ///
    /// Emitting the same identity and record type twice in one run updates
    /// the record emitted first rather than adding a second copy. This
    /// deliberately folds the catch-all geo record into the geo record when
    /// an unlabelled gateway's sentinel geo equals the policy default: one
    /// `klb.<host> [default]` record is produced, carrying `geo-code = *`.
    pub fn upsert(
        &mut self,
        dns_name: &str,
        targets: Vec<String>,
        record_type: RecordType,
        set_identifier: Option<&str>,
        ttl: u32,
    ) -> &mut Record {
        let key = RecordKey::new(dns_name, set_identifier);

        let slot = match self.index.get(&(key.clone(), record_type)) {
            Some(&slot) => slot,
            None => {
                let record = match self.take_previous(&key, record_type) {
                    Some(existing) => {
                        trace!(record = %key, "reusing previous record");
                        self.reused += 1;
                        existing
                    }
                    None => {
                        let mut fresh = Record::new(dns_name, record_type, Vec::new(), ttl);
                        fresh.set_identifier = key.set_identifier.clone();
                        fresh
                    }
                };
                self.emitted.push(record);
                let slot = self.emitted.len() - 1;
                self.index.insert((key, record_type), slot);
                slot
            }
        };

        let record = &mut self.emitted[slot];
        record.dns_name = dns_name.to_string();
        record.record_type = record_type;
        record.targets = targets;
        record.ttl = ttl;
        record
    }

    fn take_previous(&mut self, key: &RecordKey, record_type: RecordType) -> Option<Record> {
        let candidates = self.previous.get_mut(key)?;
        let record = match candidates.iter().position(|r| r.record_type == record_type) {
            Some(at) => candidates.remove(at),
            None => candidates.pop()?,
        };
        if candidates.is_empty() {
            self.previous.remove(key);
        }
        Some(record)
    }

    pub fn is_empty(&self) -> bool {
        self.emitted.is_empty()
    }

    pub fn len(&self) -> usize {
        self.emitted.len()
    }

    /// Number of emitted records that came from the previous set.
    pub fn reused(&self) -> usize {
        self.reused
    }

    /// Emitted records, in emission order.
    pub fn into_records(self) -> Vec<Record> {
        self.emitted
    }
}
