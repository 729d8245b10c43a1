use crate::{Locale, Zone};
use anyhow::{Context, Result};
use figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use serde::Deserialize;

const CONFIG_FILE: &str = "localtime.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_reference_zone")]
    pub reference_zone: String,

    /// Unset means the process local zone.
    pub ambient_zone: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            reference_zone: default_reference_zone(),
            ambient_zone: None,
        }
    }
}

fn default_reference_zone() -> String {
    crate::ZONE.to_string()
}

/// Load configuration from localtime.toml and `LOCALTIME_*` environment
/// variables
pub fn load() -> Result<Config> {
    Figment::new()
        .merge(Toml::file(CONFIG_FILE))
        .merge(Env::prefixed("LOCALTIME_"))
        .extract()
        .context("Failed to load localtime configuration")
}

/// Validate configuration and return a user-friendly error
pub fn validate(config: &Config) -> Result<(), String> {
    if config.reference_zone.parse::<chrono_tz::Tz>().is_err() {
        return Err(format!(
            "reference_zone {:?} is not a known time zone",
            config.reference_zone
        ));
    }

    if let Some(ref ambient) = config.ambient_zone {
        if ambient.parse::<Zone>().is_err() {
            return Err(format!(
                "ambient_zone {ambient:?} must be \"Local\" or a known time zone"
            ));
        }
    }

    Ok(())
}

/// Load, validate and build a [`Locale`] in one step.
pub fn load_locale() -> Result<Locale> {
    let config = load()?;
    validate(&config).map_err(anyhow::Error::msg)?;
    Locale::from_config(&config).context("Failed to build locale from configuration")
}
