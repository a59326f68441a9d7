use crate::changes::DEFAULT_MAX_ITEMS;
use sendme_catalog::ChargeSchedule;
use sendme_core::DeepLinkChannel;
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub business_rules: BusinessRules,
    #[serde(default)]
    pub channel: ChannelConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BusinessRules {
    #[serde(default = "default_max_items")]
    pub max_items: usize,
    #[serde(default)]
    pub charges: ChargeSchedule,
}

fn default_max_items() -> usize { DEFAULT_MAX_ITEMS }

impl Default for BusinessRules {
    fn default() -> Self {
        Self {
            max_items: default_max_items(),
            charges: ChargeSchedule::default(),
        }
    }
}

/// Where submitted orders are sent
#[derive(Debug, Deserialize, Clone)]
pub struct ChannelConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_recipient")]
    pub recipient: String,
}

fn default_base_url() -> String { "https://wa.me".to_string() }
fn default_recipient() -> String { "260979013006".to_string() }

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            recipient: default_recipient(),
        }
    }
}

impl ChannelConfig {
    pub fn deep_link_channel(&self) -> DeepLinkChannel {
        DeepLinkChannel::new(self.base_url.clone(), self.recipient.clone())
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            // Per-environment overrides are optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Never checked in
            .add_source(config::File::with_name("config/local").required(false))
            // e.g. `SENDME__BUSINESS_RULES__MAX_ITEMS=10`
            .add_source(config::Environment::with_prefix("SENDME").separator("__"))
            .build()?;

        s.try_deserialize()
    }

    pub fn from_toml_str(toml: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}
