//! Types for the configuration file usable by loupe
use std::{env::current_dir, fs::read_to_string, io::ErrorKind, path::PathBuf};

use anyhow::Context;
use etcetera::{choose_base_strategy, BaseStrategy};
use loupe_query::Options;
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
/// The config for the CLI usage of loupe
pub struct Config {
    /// The options documents are loaded with, before any flags are applied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Options>,
}

impl Config {
    fn load_local() -> Option<PathBuf> {
        let mut path = current_dir().ok()?;
        path.push("loupe.json");
        Some(path)
    }

    fn load_base() -> Option<PathBuf> {
        let mut path = choose_base_strategy().ok()?.config_dir();
        path.push("loupe");
        path.push("config.json");
        Some(path)
    }

    /// Tries loading the configuration from well-known paths, `./loupe.json` first and
    /// then `loupe/config.json` of the user's config directory.
    ///
    /// # Errors
    /// When a config exists but cannot be read or parsed
    pub fn load() -> anyhow::Result<Option<Self>> {
        for path in [Self::load_local(), Self::load_base()].into_iter().flatten() {
            let file = match read_to_string(&path) {
                Ok(file) => file,
                Err(err) if err.kind() == ErrorKind::NotFound => continue,
                Err(err) => {
                    return Err(err)
                        .with_context(|| format!("Cannot read config at {}", path.display()))
                }
            };
            log::debug!("loading config from {}", path.display());
            let config = serde_json::from_str(&file).with_context(|| {
                format!("Configuration at {} cannot be parsed", path.display())
            })?;
            return Ok(Some(config));
        }
        Ok(None)
    }
}

#[test]
fn serde() -> anyhow::Result<()> {
    let config: Config = serde_json::from_str(
        r#"{
        "options": {
            "xmlMode": true
        }
    }"#,
    )?;

    let options = config.options.unwrap_or_default();
    assert!(options.xml_mode);
    assert!(!options.ignore_whitespace, "missing options should be default");

    assert_eq!(serde_json::to_string(&Config::default())?, "{}");
    Ok(())
}
