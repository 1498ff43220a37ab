use std::path::Path;

use klb_core::KlbConfig;
use klb_policy::RoutingPolicy;

pub fn validate(config: &str) -> anyhow::Result<()> {
    let config = KlbConfig::from_file(Path::new(config))?;
    let policy = RoutingPolicy::from_config(&config.routing)?;

    if config.hostname.as_deref().is_none_or(str::is_empty) {
        anyhow::bail!("hostname is required");
    }

    println!(
        "✓ {} policy for {} ({} custom weights)",
        policy.strategy,
        config.hostname.as_deref().unwrap_or_default(),
        policy.custom_weights.len()
    );
    Ok(())
}
