//! klb-policy: routing policy for multi-cluster DNS synthesis.
//!
//! A [`RoutingPolicy`] selects between the `simple` strategy (records point
//! straight at the gateway) and the `geo-weighted` strategy (records form a
//! geo, then weighted, indirection tree). Policies are built through
//! [`RoutingPolicyBuilder`], which validates eagerly.
//!
//! Weight resolution matches gateway labels against the policy's custom
//! weights through the [`SelectorMatcher`] capability; [`LabelSelectorMatcher`]
//! implements Kubernetes label selector semantics.

pub mod error;
pub mod policy;
pub mod selector;
pub mod weight;

pub use error::{PolicyError, PolicyResult, SelectorError};
pub use policy::{CustomWeight, RoutingPolicy, RoutingPolicyBuilder, RoutingStrategy};
pub use selector::{LabelSelectorMatcher, SelectorMatcher};
pub use weight::WeightResolver;
