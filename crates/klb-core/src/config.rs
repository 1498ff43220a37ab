//! klb.toml synthesis request parser.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::record::Record;
use crate::types::{Gateway, GatewayAddress, LABEL_GEO_CODE, LabelSelector};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KlbConfig {
    /// Listener hostname clients resolve, possibly `*.`-prefixed.
    pub hostname: Option<String>,
    pub gateway: Gateway,
    pub routing: RoutingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// `simple` or `geo-weighted`.
    pub strategy: String,
    pub cluster_id: Option<String>,
    pub default_geo_code: Option<String>,
    pub default_weight: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_weights: Vec<CustomWeightConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomWeightConfig {
    pub weight: u32,
    #[serde(default)]
    pub selector: LabelSelector,
}

impl KlbConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: KlbConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Scaffold a geo-weighted request for one gateway with a single IP.
    pub fn scaffold(hostname: &str, cluster_id: &str, geo_code: &str) -> Self {
        KlbConfig {
            hostname: Some(hostname.to_string()),
            gateway: Gateway {
                name: "gateway".to_string(),
                namespace: "default".to_string(),
                labels: [(LABEL_GEO_CODE.to_string(), geo_code.to_string())]
                    .into_iter()
                    .collect(),
                addresses: vec![GatewayAddress::ip("192.0.2.1")],
            },
            routing: RoutingConfig {
                strategy: "geo-weighted".to_string(),
                cluster_id: Some(cluster_id.to_string()),
                default_geo_code: Some(geo_code.to_string()),
                default_weight: Some(120),
                custom_weights: Vec::new(),
            },
        }
    }
}

/// Load a JSON array of previously published records.
pub fn load_records(path: &Path) -> anyhow::Result<Vec<Record>> {
    let content = std::fs::read_to_string(path)?;
    let records: Vec<Record> = serde_json::from_str(&content)?;
    Ok(records)
}
