use std::path::Path;

use klb_core::KlbConfig;

pub fn init(hostname: &str, cluster_id: &str, geo_code: &str, output: &str) -> anyhow::Result<()> {
    let output = Path::new(output);
    if output.exists() {
        anyhow::bail!("{} already exists", output.display());
    }
    let config = KlbConfig::scaffold(hostname, cluster_id, geo_code);
    std::fs::write(output, config.to_toml_string()?)?;
    println!("✓ Generated {}", output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_writes_loadable_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("klb.toml");
        let path_str = path.to_str().unwrap();
        init("www.example.com", "C1", "IE", path_str).unwrap();

        let config = KlbConfig::from_file(&path).unwrap();
        assert_eq!(config.hostname.as_deref(), Some("www.example.com"));
        assert!(init("www.example.com", "C1", "IE", path_str).is_err());
    }
}
