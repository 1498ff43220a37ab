pub mod generate;
pub mod init;
pub mod resolve;
pub mod validate;

use std::path::Path;

use klb_core::{KlbConfig, Record, config::load_records};

/// Load the request and the previous record set. A missing `--previous`
/// means nothing has been published yet.
pub(crate) fn load_inputs(
    config: &str,
    previous: Option<&str>,
) -> anyhow::Result<(KlbConfig, Vec<Record>)> {
    let config = KlbConfig::from_file(Path::new(config))?;
    let previous = match previous {
        Some(path) => load_records(Path::new(path))?,
        None => Vec::new(),
    };
    Ok((config, previous))
}
