//! DNS record abstraction produced by synthesis.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// TTL for address records and weighted aliases.
pub const DEFAULT_TTL: u32 = 60;

/// TTL for the geo and client-facing alias layers.
pub const DEFAULT_CNAME_TTL: u32 = 300;

/// Provider attribute carrying a weighted-routing weight.
pub const ATTRIBUTE_WEIGHT: &str = "weight";

/// Provider attribute carrying a geo code.
pub const ATTRIBUTE_GEO_CODE: &str = "geo-code";

/// Record type of a synthesized record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordType {
    /// Address record.
    A,
    /// Alias record.
    #[serde(rename = "CNAME")]
    Cname,
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordType::A => f.write_str("A"),
            RecordType::Cname => f.write_str("CNAME"),
        }
    }
}

/// Identity of a record: its name plus optional set identifier.
///
/// An empty set identifier is the same as none.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordKey {
    pub dns_name: String,
    pub set_identifier: Option<String>,
}

impl RecordKey {
    pub fn new(dns_name: impl Into<String>, set_identifier: Option<&str>) -> Self {
        Self {
            dns_name: dns_name.into(),
            set_identifier: set_identifier
                .filter(|id| !id.is_empty())
                .map(str::to_string),
        }
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.set_identifier {
            Some(id) => write!(f, "{} [{}]", self.dns_name, id),
            None => f.write_str(&self.dns_name),
        }
    }
}

/// A DNS record as handed to the provider layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub dns_name: String,
    pub record_type: RecordType,
    #[serde(default)]
    pub targets: Vec<String>,
    #[serde(rename = "recordTTL", default)]
    pub ttl: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set_identifier: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub provider_attributes: BTreeMap<String, String>,
    /// Metadata attached by other collaborators (health checks, owners).
    /// Synthesis never reads or writes it.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
}

impl Record {
    pub fn new(
        dns_name: impl Into<String>,
        record_type: RecordType,
        targets: Vec<String>,
        ttl: u32,
    ) -> Self {
        Self {
            dns_name: dns_name.into(),
            record_type,
            targets,
            ttl,
            set_identifier: None,
            provider_attributes: BTreeMap::new(),
            labels: BTreeMap::new(),
        }
    }

    pub fn key(&self) -> RecordKey {
        RecordKey::new(self.dns_name.clone(), self.set_identifier.as_deref())
    }

    /// Set one provider attribute, leaving the others in place.
    pub fn set_provider_attribute(&mut self, name: &str, value: impl Into<String>) {
        self.provider_attributes
            .insert(name.to_string(), value.into());
    }

    pub fn provider_attribute(&self, name: &str) -> Option<&str> {
        self.provider_attributes.get(name).map(String::as_str)
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.key(),
            self.ttl,
            self.record_type,
            self.targets.join(",")
        )?;
        for (name, value) in &self.provider_attributes {
            write!(f, " {name}={value}")?;
        }
        Ok(())
    }
}
