//! Record tree synthesis for the simple and geo-weighted strategies.

use klb_core::{
    ATTRIBUTE_GEO_CODE, ATTRIBUTE_WEIGHT, DEFAULT_CNAME_TTL, DEFAULT_GEO, DEFAULT_TTL, Gateway,
    KlbConfig, Record, RecordType, WILDCARD_GEO,
};
use klb_policy::{
    LabelSelectorMatcher, RoutingPolicy, RoutingStrategy, SelectorMatcher, WeightResolver,
};
use tracing::debug;

use crate::error::{SynthesisError, SynthesisResult};
use crate::merge::RecordMerger;
use crate::order::sort_records;
use crate::shortcode::{SHORT_CODE_LEN, short_code};

/// Leading label of every generated load-balancer name.
pub const LB_LABEL: &str = "klb";

/// Set identifier of the catch-all geo record.
pub const CATCH_ALL_SET_IDENTIFIER: &str = "default";

/// Inputs for one synthesis run.
///
/// `previous` is moved in: records found there are updated and returned
/// rather than copied. An empty vector means "nothing published yet";
/// `None` is a caller error.
#[derive(Debug)]
pub struct SynthesisRequest<'a> {
    pub hostname: Option<&'a str>,
    pub gateway: &'a Gateway,
    pub policy: &'a RoutingPolicy,
    pub previous: Option<Vec<Record>>,
}

/// Builds the record set for one gateway.
#[derive(Debug, Clone, Default)]
pub struct EndpointSynthesizer<M = LabelSelectorMatcher> {
    weights: WeightResolver<M>,
}

impl EndpointSynthesizer<LabelSelectorMatcher> {
    pub fn new() -> Self {
        Self {
            weights: WeightResolver::new(),
        }
    }
}

impl<M: SelectorMatcher> EndpointSynthesizer<M> {
    /// Use a custom selector matcher for weight resolution.
    pub fn with_matcher(matcher: M) -> Self {
        Self {
            weights: WeightResolver::with_matcher(matcher),
        }
    }

    /// Produce the ordered record set replacing `request.previous`.
    ///
    /// Fails without partial output when the hostname or previous set is
    /// missing, or when the policy does not validate.
    pub fn synthesize(&self, request: SynthesisRequest<'_>) -> SynthesisResult<Vec<Record>> {
        let hostname = request
            .hostname
            .filter(|h| !h.is_empty())
            .ok_or(SynthesisError::MissingListenerHost)?;
        let previous = request
            .previous
            .ok_or(SynthesisError::MissingPreviousState)?;
        request.policy.validate()?;

        let mut merger = RecordMerger::new(previous);
        match request.policy.strategy {
            RoutingStrategy::Simple => simple(hostname, request.gateway, &mut merger),
            RoutingStrategy::GeoWeighted => {
                self.geo_weighted(hostname, request.gateway, request.policy, &mut merger)
            }
        }

        debug!(
            hostname,
            strategy = %request.policy.strategy,
            records = merger.len(),
            reused = merger.reused(),
            "synthesized records"
        );

        let mut records = merger.into_records();
        sort_records(&mut records);
        Ok(records)
    }

    /// Lay out the four-level geo/weight tree:
    /// host → klb.host → geo.klb.host → (cluster A record | gateway hostnames).
    fn geo_weighted(
        &self,
        hostname: &str,
        gateway: &Gateway,
        policy: &RoutingPolicy,
        merger: &mut RecordMerger,
    ) {
        let base = hostname.strip_prefix("*.").unwrap_or(hostname);
        let lb_name = format!("{LB_LABEL}.{base}").to_lowercase();
        let geo_code = gateway.geo_code().unwrap_or(DEFAULT_GEO);
        let geo_lb_name = format!("{geo_code}.{lb_name}").to_lowercase();

        let (ips, mut hosts) = gateway.partition_addresses();

        if !ips.is_empty() {
            let cluster_lb_name = cluster_lb_name(policy, gateway, &lb_name);
            merger.upsert(&cluster_lb_name, ips, RecordType::A, None, DEFAULT_TTL);
            hosts.push(cluster_lb_name);
        }

        if hosts.is_empty() {
            debug!(hostname, "gateway has no addresses, nothing to route to");
            return;
        }

        let weight = self.weights.resolve(policy, &gateway.labels).to_string();
        for host in hosts {
            merger
                .upsert(
                    &geo_lb_name,
                    vec![host.clone()],
                    RecordType::Cname,
                    Some(host.as_str()),
                    DEFAULT_TTL,
                )
                .set_provider_attribute(ATTRIBUTE_WEIGHT, weight.as_str());
        }

        let geo_record = merger.upsert(
            &lb_name,
            vec![geo_lb_name.clone()],
            RecordType::Cname,
            Some(geo_code),
            DEFAULT_CNAME_TTL,
        );
        // An unlabelled gateway gets no geo attribute.
        if geo_code != DEFAULT_GEO {
            geo_record.set_provider_attribute(ATTRIBUTE_GEO_CODE, geo_code);
        }

        // Folds into the geo record above when both use the `default` id.
        if geo_code == policy.default_geo_code {
            merger
                .upsert(
                    &lb_name,
                    vec![geo_lb_name.clone()],
                    RecordType::Cname,
                    Some(CATCH_ALL_SET_IDENTIFIER),
                    DEFAULT_CNAME_TTL,
                )
                .set_provider_attribute(ATTRIBUTE_GEO_CODE, WILDCARD_GEO);
        }

        merger.upsert(
            hostname,
            vec![lb_name],
            RecordType::Cname,
            None,
            DEFAULT_CNAME_TTL,
        );
    }
}

/// Point the hostname straight at the gateway: one address record for the
/// IPs and one alias record for the hostnames, whichever exist.
fn simple(hostname: &str, gateway: &Gateway, merger: &mut RecordMerger) {
    let (ips, hosts) = gateway.partition_addresses();

    if !ips.is_empty() {
        merger.upsert(hostname, ips, RecordType::A, None, DEFAULT_TTL);
    }
    if !hosts.is_empty() {
        merger.upsert(hostname, hosts, RecordType::Cname, None, DEFAULT_TTL);
    }
}

/// `<cluster code>-<gateway code>.<lb name>`, stable per cluster and gateway.
fn cluster_lb_name(policy: &RoutingPolicy, gateway: &Gateway, lb_name: &str) -> String {
    let cluster = short_code(&policy.cluster_id, SHORT_CODE_LEN);
    let gateway_code = short_code(
        &format!("{}-{}", gateway.name, gateway.namespace),
        SHORT_CODE_LEN,
    );
    format!("{cluster}-{gateway_code}.{lb_name}").to_lowercase()
}

/// Synthesize with the default label selector matcher.
pub fn synthesize(request: SynthesisRequest<'_>) -> SynthesisResult<Vec<Record>> {
    EndpointSynthesizer::new().synthesize(request)
}

/// Build the policy from a klb.toml request and synthesize.
///
/// Unknown strategy names surface as [`SynthesisError::UnknownRoutingStrategy`].
pub fn synthesize_config(
    config: &KlbConfig,
    previous: Option<Vec<Record>>,
) -> SynthesisResult<Vec<Record>> {
    let policy = RoutingPolicy::from_config(&config.routing)?;
    synthesize(SynthesisRequest {
        hostname: config.hostname.as_deref(),
        gateway: &config.gateway,
        policy: &policy,
        previous,
    })
}
