//! Routing policy: strategy selection, defaults, and validation.

use std::fmt;
use std::str::FromStr;

use klb_core::LabelSelector;
use klb_core::config::RoutingConfig;
use serde::{Deserialize, Serialize};

use crate::error::{PolicyError, PolicyResult};

/// How records are laid out for a hostname.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RoutingStrategy {
    /// Records point straight at the gateway addresses.
    Simple,
    /// Geo split first, then weighted selection within the geo.
    GeoWeighted,
}

impl RoutingStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoutingStrategy::Simple => "simple",
            RoutingStrategy::GeoWeighted => "geo-weighted",
        }
    }
}

impl FromStr for RoutingStrategy {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "simple" => Ok(RoutingStrategy::Simple),
            "geo-weighted" | "loadbalanced" => Ok(RoutingStrategy::GeoWeighted),
            other => Err(PolicyError::UnknownStrategy(other.to_string())),
        }
    }
}

impl TryFrom<String> for RoutingStrategy {
    type Error = PolicyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RoutingStrategy> for String {
    fn from(strategy: RoutingStrategy) -> Self {
        strategy.as_str().to_string()
    }
}

impl fmt::Display for RoutingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A weight applied to gateways whose labels match `selector`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomWeight {
    pub selector: LabelSelector,
    pub weight: u32,
}

impl CustomWeight {
    pub fn new(selector: LabelSelector, weight: u32) -> Self {
        Self { selector, weight }
    }
}

/// Everything needed to lay out records for one gateway.
///
/// Fields are public so callers can carry policies around freely; synthesis
/// re-runs [`RoutingPolicy::validate`] before using one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingPolicy {
    pub strategy: RoutingStrategy,
    pub cluster_id: String,
    pub default_geo_code: String,
    pub default_weight: u32,
    pub custom_weights: Vec<CustomWeight>,
}

impl RoutingPolicy {
    pub fn builder() -> RoutingPolicyBuilder {
        RoutingPolicyBuilder::new()
    }

    /// Check the fields the strategy depends on.
    ///
    /// The simple strategy ignores everything but itself.
    pub fn validate(&self) -> PolicyResult<()> {
        if self.strategy == RoutingStrategy::Simple {
            return Ok(());
        }

        if self.cluster_id.is_empty() {
            return Err(PolicyError::MissingClusterId);
        }
        if self.default_weight == 0 {
            return Err(PolicyError::MissingDefaultWeight);
        }
        if self.default_geo_code.is_empty() {
            return Err(PolicyError::MissingDefaultGeoCode);
        }

        for (index, custom) in self.custom_weights.iter().enumerate() {
            if custom.weight == 0 {
                return Err(PolicyError::ZeroCustomWeight { index });
            }
            if custom.selector.is_unset() {
                return Err(PolicyError::EmptyCustomWeightSelector { index });
            }
        }
        Ok(())
    }

    /// Build a validated policy from the `[routing]` section of klb.toml.
    pub fn from_config(config: &RoutingConfig) -> PolicyResult<Self> {
        let builder = RoutingPolicyBuilder::new().with_strategy_name(&config.strategy);
        let builder = match config.strategy.parse() {
            Ok(RoutingStrategy::GeoWeighted) => builder.with_load_balanced_strategy(
                config.cluster_id.clone().unwrap_or_default(),
                config.default_geo_code.clone().unwrap_or_default(),
                config.default_weight.unwrap_or_default(),
            ),
            _ => builder,
        };
        builder
            .with_custom_weights(
                config
                    .custom_weights
                    .iter()
                    .map(|c| CustomWeight::new(c.selector.clone(), c.weight))
                    .collect(),
            )
            .build()
    }
}

/// Builder for [`RoutingPolicy`]; `build` validates.
#[derive(Debug, Clone)]
pub struct RoutingPolicyBuilder {
    policy: RoutingPolicy,
    unknown_strategy: Option<String>,
}

impl RoutingPolicyBuilder {
    pub fn new() -> Self {
        Self {
            policy: RoutingPolicy {
                strategy: RoutingStrategy::Simple,
                cluster_id: String::new(),
                default_geo_code: String::new(),
                default_weight: 0,
                custom_weights: Vec::new(),
            },
            unknown_strategy: None,
        }
    }

    pub fn with_simple_strategy(mut self) -> Self {
        self.policy.strategy = RoutingStrategy::Simple;
        self.unknown_strategy = None;
        self
    }

    pub fn with_load_balanced_strategy(
        mut self,
        cluster_id: impl Into<String>,
        default_geo: impl Into<String>,
        default_weight: u32,
    ) -> Self {
        self.policy.strategy = RoutingStrategy::GeoWeighted;
        self.policy.cluster_id = cluster_id.into();
        self.policy.default_geo_code = default_geo.into();
        self.policy.default_weight = default_weight;
        self.unknown_strategy = None;
        self
    }

    /// Select the strategy by name. An unrecognised name fails at `build`.
    pub fn with_strategy_name(mut self, name: &str) -> Self {
        match name.parse() {
            Ok(strategy) => {
                self.policy.strategy = strategy;
                self.unknown_strategy = None;
            }
            Err(_) => self.unknown_strategy = Some(name.to_string()),
        }
        self
    }

    pub fn with_custom_weights(mut self, weights: Vec<CustomWeight>) -> Self {
        self.policy.custom_weights = weights;
        self
    }

    pub fn build(self) -> PolicyResult<RoutingPolicy> {
        if let Some(name) = self.unknown_strategy {
            return Err(PolicyError::UnknownStrategy(name));
        }
        self.policy.validate()?;
        Ok(self.policy)
    }
}

impl Default for RoutingPolicyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use klb_core::config::CustomWeightConfig;

    fn custom() -> CustomWeight {
        CustomWeight::new(
            LabelSelector::from_labels([("kuadrant.io/my-custom-weight-attr", "FOO")]),
            100,
        )
    }

    fn valid() -> RoutingPolicy {
        RoutingPolicy::builder()
            .with_load_balanced_strategy("C1", "IE", 120)
            .with_custom_weights(vec![custom()])
            .build()
            .unwrap()
    }

    #[test]
    fn simple_ignores_other_fields() {
        let policy = RoutingPolicy::builder()
            .with_simple_strategy()
            .with_custom_weights(vec![CustomWeight::new(LabelSelector::default(), 0)])
            .build()
            .unwrap();
        assert_eq!(policy.strategy, RoutingStrategy::Simple);
    }

    #[test]
    fn geo_weighted_accepts_complete_policy() {
        let policy = valid();
        assert_eq!(policy.strategy, RoutingStrategy::GeoWeighted);
        assert_eq!(policy.default_weight, 120);
        assert!(policy.validate().is_ok());
    }

    #[test]
    fn each_violation_has_its_own_error() {
        let mut p = valid();
        p.cluster_id.clear();
        assert_eq!(p.validate(), Err(PolicyError::MissingClusterId));

        let mut p = valid();
        p.default_weight = 0;
        assert_eq!(p.validate(), Err(PolicyError::MissingDefaultWeight));

        let mut p = valid();
        p.default_geo_code.clear();
        assert_eq!(p.validate(), Err(PolicyError::MissingDefaultGeoCode));

        let mut p = valid();
        p.custom_weights[0].weight = 0;
        assert_eq!(p.validate(), Err(PolicyError::ZeroCustomWeight { index: 0 }));

        let mut p = valid();
        p.custom_weights[0].selector = LabelSelector::default();
        assert_eq!(
            p.validate(),
            Err(PolicyError::EmptyCustomWeightSelector { index: 0 })
        );
    }

    #[test]
    fn error_messages() {
        assert_eq!(PolicyError::MissingClusterId.to_string(), "cluster ID is required");
        assert_eq!(
            PolicyError::MissingDefaultWeight.to_string(),
            "default weight is required"
        );
        assert!(
            PolicyError::EmptyCustomWeightSelector { index: 2 }
                .to_string()
                .contains("non-empty selector")
        );
    }

    #[test]
    fn build_rejects_invalid_policy() {
        let err = RoutingPolicy::builder()
            .with_load_balanced_strategy("", "IE", 120)
            .build()
            .unwrap_err();
        assert_eq!(err, PolicyError::MissingClusterId);
    }

    #[test]
    fn unknown_strategy_name() {
        let err = RoutingPolicy::builder()
            .with_strategy_name("cat")
            .build()
            .unwrap_err();
        assert_eq!(err, PolicyError::UnknownStrategy("cat".to_string()));
        assert!(err.to_string().contains("unknown routing strategy"));
    }

    #[test]
    fn strategy_names() {
        assert_eq!("simple".parse::<RoutingStrategy>().unwrap(), RoutingStrategy::Simple);
        assert_eq!(
            "loadbalanced".parse::<RoutingStrategy>().unwrap(),
            RoutingStrategy::GeoWeighted
        );
        assert_eq!(RoutingStrategy::GeoWeighted.to_string(), "geo-weighted");
        let json = serde_json::to_string(&RoutingStrategy::GeoWeighted).unwrap();
        assert_eq!(json, "\"geo-weighted\"");
        assert!(serde_json::from_str::<RoutingStrategy>("\"cat\"").is_err());
    }

    #[test]
    fn from_config_builds_geo_weighted() {
        let config = RoutingConfig {
            strategy: "geo-weighted".to_string(),
            cluster_id: Some("C1".to_string()),
            default_geo_code: Some("IE".to_string()),
            default_weight: Some(120),
            custom_weights: vec![CustomWeightConfig {
                weight: 100,
                selector: LabelSelector::from_labels([("tier", "gold")]),
            }],
        };
        let policy = RoutingPolicy::from_config(&config).unwrap();
        assert_eq!(policy.cluster_id, "C1");
        assert_eq!(policy.custom_weights.len(), 1);
    }

    #[test]
    fn from_config_reports_missing_fields() {
        let config = RoutingConfig {
            strategy: "geo-weighted".to_string(),
            cluster_id: Some("C1".to_string()),
            default_geo_code: None,
            default_weight: Some(120),
            custom_weights: Vec::new(),
        };
        assert_eq!(
            RoutingPolicy::from_config(&config),
            Err(PolicyError::MissingDefaultGeoCode)
        );
    }
}
