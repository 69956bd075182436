use clap::Parser;
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/remitrax.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the insight-generation service.
    pub insight_base_url: String,
    /// Bearer token for the insight service, if it requires one.
    pub insight_api_key: Option<String>,
    /// Device node used for the biometric preview feed.
    pub camera_device: String,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            insight_base_url: "http://127.0.0.1:8787".to_string(),
            insight_api_key: None,
            camera_device: engine::DEFAULT_CAMERA_DEVICE.to_string(),
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "remitrax_tui", disable_version_flag = true)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override the insight service base URL.
    #[arg(long)]
    insight_base_url: Option<String>,
    /// Override the camera device node (API keys are never read from CLI).
    #[arg(long)]
    camera_device: Option<String>,
    /// Override the log level filter.
    #[arg(long)]
    log_level: Option<String>,
}

pub fn load() -> Result<AppConfig> {
    let args = Args::parse();

    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("REMITRAX_TUI"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(insight_base_url) = args.insight_base_url {
        settings.insight_base_url = insight_base_url;
    }
    if let Some(camera_device) = args.camera_device {
        settings.camera_device = camera_device;
    }
    if let Some(log_level) = args.log_level {
        settings.log_level = log_level;
    }

    Ok(settings)
}
