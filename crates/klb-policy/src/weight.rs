//! Effective weight of a gateway under a routing policy.

use klb_core::Labels;
use tracing::{debug, warn};

use crate::policy::RoutingPolicy;
use crate::selector::{LabelSelectorMatcher, SelectorMatcher};

/// Resolves the weight attached to a gateway's weighted records.
///
/// Custom weights are tried in declaration order and the first matching
/// selector wins. A malformed selector stops the search and yields the
/// default weight: bad selectors degrade routing precision, they never fail
/// synthesis.
#[derive(Debug, Clone, Default)]
pub struct WeightResolver<M = LabelSelectorMatcher> {
    matcher: M,
}

impl WeightResolver<LabelSelectorMatcher> {
    pub fn new() -> Self {
        Self {
            matcher: LabelSelectorMatcher,
        }
    }
}

impl<M: SelectorMatcher> WeightResolver<M> {
    pub fn with_matcher(matcher: M) -> Self {
        Self { matcher }
    }

    pub fn resolve(&self, policy: &RoutingPolicy, labels: &Labels) -> u32 {
        for (index, custom) in policy.custom_weights.iter().enumerate() {
            match self.matcher.matches(&custom.selector, labels) {
                Ok(true) => {
                    debug!(index, weight = custom.weight, "custom weight matched");
                    return custom.weight;
                }
                Ok(false) => continue,
                Err(e) => {
                    warn!(index, error = %e, "invalid custom weight selector, using default weight");
                    return policy.default_weight;
                }
            }
        }
        policy.default_weight
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SelectorError;
    use crate::policy::CustomWeight;
    use klb_core::LabelSelector;

    fn labels(pairs: &[(&str, &str)]) -> Labels {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn policy(weights: Vec<CustomWeight>) -> RoutingPolicy {
        RoutingPolicy::builder()
            .with_load_balanced_strategy("C1", "IE", 120)
            .with_custom_weights(weights)
            .build()
            .unwrap()
    }

    #[test]
    fn default_when_nothing_matches() {
        let p = policy(vec![CustomWeight::new(
            LabelSelector::from_labels([("tier", "gold")]),
            200,
        )]);
        assert_eq!(WeightResolver::new().resolve(&p, &labels(&[("tier", "bronze")])), 120);
    }

    #[test]
    fn first_match_wins() {
        let p = policy(vec![
            CustomWeight::new(LabelSelector::from_labels([("tier", "silver")]), 50),
            CustomWeight::new(LabelSelector::from_labels([("tier", "gold")]), 200),
            CustomWeight::new(LabelSelector::from_labels([("region", "eu")]), 10),
        ]);
        let gw = labels(&[("tier", "gold"), ("region", "eu")]);
        assert_eq!(WeightResolver::new().resolve(&p, &gw), 200);
    }

    #[test]
    fn non_matching_order_does_not_change_winner() {
        let winner = CustomWeight::new(LabelSelector::from_labels([("tier", "gold")]), 200);
        let a = CustomWeight::new(LabelSelector::from_labels([("tier", "silver")]), 50);
        let b = CustomWeight::new(LabelSelector::from_labels([("zone", "b")]), 70);
        let gw = labels(&[("tier", "gold")]);
        let resolver = WeightResolver::new();
        let one = policy(vec![a.clone(), b.clone(), winner.clone()]);
        let two = policy(vec![winner, b, a]);
        assert_eq!(resolver.resolve(&one, &gw), resolver.resolve(&two, &gw));
    }

    #[test]
    fn malformed_selector_falls_back_to_default() {
        let p = policy(vec![
            CustomWeight::new(LabelSelector::from_labels([("-bad key", "x")]), 50),
            CustomWeight::new(LabelSelector::from_labels([("tier", "gold")]), 200),
        ]);
        assert_eq!(WeightResolver::new().resolve(&p, &labels(&[("tier", "gold")])), 120);
    }

    #[test]
    fn injected_matcher_is_used() {
        let p = policy(vec![CustomWeight::new(
            LabelSelector::from_labels([("tier", "gold")]),
            7,
        )]);
        let always = |_: &LabelSelector, _: &Labels| -> Result<bool, SelectorError> { Ok(true) };
        let resolver = WeightResolver::with_matcher(always);
        assert_eq!(resolver.resolve(&p, &Labels::new()), 7);
    }
}
