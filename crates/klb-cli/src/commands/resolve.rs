use anyhow::Context;

use super::load_inputs;

pub fn resolve(config: &str, previous: Option<&str>, name: Option<&str>) -> anyhow::Result<()> {
    let (config, previous) = load_inputs(config, previous)?;
    let records = klb_synth::synthesize_config(&config, Some(previous))?;

    let start = match name {
        Some(name) => name.to_string(),
        None => config.hostname.clone().context("no --name and no hostname configured")?,
    };

    let targets = klb_synth::chain::resolve(&records, &start);
    if targets.is_empty() {
        anyhow::bail!("{start} does not resolve to any target");
    }
    for target in targets {
        println!("{start} → {target}");
    }
    Ok(())
}
