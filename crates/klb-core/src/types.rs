//! Gateway and label selector types shared across klb crates.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Label set attached to a gateway.
pub type Labels = HashMap<String, String>;

/// Label carrying the geographic code of a gateway.
pub const LABEL_GEO_CODE: &str = "kuadrant.io/lb-attribute-geo-code";

/// Geo code used when a gateway carries no geo label.
pub const DEFAULT_GEO: &str = "default";

/// Geo code providers treat as "any location".
pub const WILDCARD_GEO: &str = "*";

// ── Gateway ────────────────────────────────────────────────────────

/// How a gateway address is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AddressType {
    #[serde(rename = "IPAddress")]
    IpAddress,
    Hostname,
}

/// A network-reachable address published by a gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayAddress {
    #[serde(rename = "type")]
    pub address_type: AddressType,
    pub value: String,
}

impl GatewayAddress {
    pub fn ip(value: impl Into<String>) -> Self {
        Self {
            address_type: AddressType::IpAddress,
            value: value.into(),
        }
    }

    pub fn hostname(value: impl Into<String>) -> Self {
        Self {
            address_type: AddressType::Hostname,
            value: value.into(),
        }
    }

    pub fn is_ip(&self) -> bool {
        self.address_type == AddressType::IpAddress
    }
}

/// Observed state of one gateway instance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Gateway {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub namespace: String,
    #[serde(default)]
    pub labels: Labels,
    #[serde(default)]
    pub addresses: Vec<GatewayAddress>,
}

impl Gateway {
    /// Geo code from the gateway labels, if one is set.
    pub fn geo_code(&self) -> Option<&str> {
        self.labels.get(LABEL_GEO_CODE).map(String::as_str)
    }

    /// Split addresses into (IP values, hostname values), each sorted and
    /// deduplicated so record targets do not depend on address order.
    pub fn partition_addresses(&self) -> (Vec<String>, Vec<String>) {
        let mut ips = BTreeSet::new();
        let mut hosts = BTreeSet::new();
        for address in &self.addresses {
            if address.is_ip() {
                ips.insert(address.value.clone());
            } else {
                hosts.insert(address.value.clone());
            }
        }
        (ips.into_iter().collect(), hosts.into_iter().collect())
    }
}

// ── Label selectors ────────────────────────────────────────────────

/// Set-based operator of a selector requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectorOperator {
    In,
    NotIn,
    Exists,
    DoesNotExist,
}

/// A single `key <operator> values` requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelSelectorRequirement {
    pub key: String,
    pub operator: SelectorOperator,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
}

/// Label selector with equality labels and set-based expressions.
///
/// `None` and an empty collection are distinct: a selector with both parts
/// absent is rejected by policy validation, while a present but empty
/// selector matches every label set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelSelector {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_labels: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_expressions: Option<Vec<LabelSelectorRequirement>>,
}

impl LabelSelector {
    /// Selector requiring every given label to be present with that value.
    pub fn from_labels<K, V>(labels: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            match_labels: Some(
                labels
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
            match_expressions: None,
        }
    }

    /// Selector built from set-based requirements only.
    pub fn from_expressions(expressions: Vec<LabelSelectorRequirement>) -> Self {
        Self {
            match_labels: None,
            match_expressions: Some(expressions),
        }
    }

    /// True when neither match labels nor match expressions are present.
    pub fn is_unset(&self) -> bool {
        self.match_labels.is_none() && self.match_expressions.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partition_sorts_and_dedupes() {
        let gw = Gateway {
            addresses: vec![
                GatewayAddress::ip("192.0.2.2"),
                GatewayAddress::hostname("edge.example.net"),
                GatewayAddress::ip("192.0.2.1"),
                GatewayAddress::ip("192.0.2.2"),
            ],
            ..Default::default()
        };
        let (ips, hosts) = gw.partition_addresses();
        assert_eq!(ips, vec!["192.0.2.1", "192.0.2.2"]);
        assert_eq!(hosts, vec!["edge.example.net"]);
    }

    #[test]
    fn geo_code_from_label() {
        let mut gw = Gateway::default();
        assert_eq!(gw.geo_code(), None);
        gw.labels.insert(LABEL_GEO_CODE.to_string(), "IE".to_string());
        assert_eq!(gw.geo_code(), Some("IE"));
    }

    #[test]
    fn address_type_uses_gateway_api_names() {
        let json = serde_json::to_string(&GatewayAddress::ip("192.0.2.1")).unwrap();
        assert_eq!(json, r#"{"type":"IPAddress","value":"192.0.2.1"}"#);
    }

    #[test]
    fn empty_selector_is_not_unset() {
        assert!(LabelSelector::default().is_unset());
        let empty = LabelSelector {
            match_labels: Some(BTreeMap::new()),
            match_expressions: None,
        };
        assert!(!empty.is_unset());
    }

    #[test]
    fn selector_parses_camel_case() {
        let selector: LabelSelector = serde_json::from_str(
            r#"{"matchExpressions":[{"key":"tier","operator":"In","values":["gold"]}]}"#,
        )
        .unwrap();
        let exprs = selector.match_expressions.unwrap();
        assert_eq!(exprs[0].operator, SelectorOperator::In);
        assert_eq!(exprs[0].values, vec!["gold"]);
    }
}
