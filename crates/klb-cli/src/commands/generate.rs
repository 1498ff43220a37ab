use klb_core::Record;
use tracing::info;

use super::load_inputs;

pub fn generate(config: &str, previous: Option<&str>, format: &str) -> anyhow::Result<()> {
    let (config, previous) = load_inputs(config, previous)?;
    let records = klb_synth::synthesize_config(&config, Some(previous))?;
    info!(records = records.len(), "generated record set");

    println!("{}", render(&records, format)?);
    Ok(())
}

pub(crate) fn render(records: &[Record], format: &str) -> anyhow::Result<String> {
    match format {
        "json" => Ok(serde_json::to_string_pretty(records)?),
        _ => Ok(records
            .iter()
            .map(Record::to_string)
            .collect::<Vec<_>>()
            .join("\n")),
    }
}
