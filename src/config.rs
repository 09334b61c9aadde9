use std::path::{Path, PathBuf};

use anyhow::Context;
use ::config::{Config, Environment, File};
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "cryptograph";
pub const ENV_PREFIX: &str = "CRYPTOGRAPH";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub fetch: FetchSettings,
    pub output: OutputSettings,
    /// Fixed RNG seed; drawn from entropy when absent.
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FetchSettings {
    pub base_url: String,
    pub vs_currency: String,
    pub per_page: u32,
    pub max_pages: u32,
    pub page_delay_ms: u64,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.coingecko.com/api/v3".into(),
            vs_currency: "usd".into(),
            per_page: 250,
            max_pages: 4,
            page_delay_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub dir: PathBuf,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self { dir: PathBuf::from("fast_output") }
    }
}

impl Settings {
    /// Layering: struct defaults < config file < `CRYPTOGRAPH__*` env vars.
    /// An explicit `path` must exist; the default `cryptograph.{toml,yaml,json}` is optional.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let file = match path {
            Some(p) => File::from(p).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };
        Config::builder()
            .add_source(file)
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()
            .context("failed to read configuration")?
            .try_deserialize()
            .context("invalid configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.fetch.per_page, 250);
        assert_eq!(settings.fetch.max_pages, 4);
        assert_eq!(settings.output.dir, PathBuf::from("fast_output"));
        assert_eq!(settings.seed, None);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "seed = 17\n[fetch]\nmax_pages = 2\n[output]\ndir = \"out\"").unwrap();

        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.seed, Some(17));
        assert_eq!(settings.fetch.max_pages, 2);
        assert_eq!(settings.fetch.per_page, 250);
        assert_eq!(settings.output.dir, PathBuf::from("out"));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        assert!(Settings::load(Some(Path::new("/nonexistent/cryptograph.toml"))).is_err());
    }
}
