//! Following alias chains through a synthesized record set.
//!
//! Used to check that a record tree actually leads from the client-facing
//! hostname down to the gateway addresses.

use std::collections::{BTreeSet, HashMap, HashSet};

use klb_core::{Record, RecordType};

/// Terminal targets reachable from `name`.
///
/// Alias targets are followed; address record values and alias targets with
/// no record of their own are terminal. Cycles are visited once.
pub fn resolve<'a>(records: &'a [Record], name: &'a str) -> BTreeSet<String> {
    let mut by_name: HashMap<&str, Vec<&Record>> = HashMap::new();
    for record in records {
        by_name.entry(record.dns_name.as_str()).or_default().push(record);
    }

    let mut terminals = BTreeSet::new();
    let mut visited = HashSet::new();
    let mut pending = vec![name];

    while let Some(current) = pending.pop() {
        if !visited.insert(current) {
            continue;
        }
        let Some(found) = by_name.get(current) else {
            if current != name {
                terminals.insert(current.to_string());
            }
            continue;
        };
        for record in found {
            match record.record_type {
                RecordType::A => terminals.extend(record.targets.iter().cloned()),
                RecordType::Cname => pending.extend(record.targets.iter().map(String::as_str)),
            }
        }
    }

    terminals
}

/// True when every expected target is reachable from `host`.
pub fn is_traversable(records: &[Record], host: &str, expected: &[&str]) -> bool {
    let reached = resolve(records, host);
    expected.iter().all(|target| reached.contains(*target))
}
