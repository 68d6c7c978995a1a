// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, path::PathBuf, str::FromStr, time::Duration};

use tokio::fs;

use habitual_core::{APP_NAME, Config as CoreConfig, get_config_dir};
use habitual_dnd::DragConfig;

const HABITUAL_CONFIG_ENV: &str = "HABITUAL_CONFIG";
const HABITUAL_DEV_ENV: &str = "HABITUAL_DEV";

const HABITUAL_DEV_VALID_TRUE: &[&str] = &["1", "true", "yes"];
const HABITUAL_DEV_VALID_FALSE: &[&str] = &["0", "false", "no"];

#[tracing::instrument]
pub async fn parse_config(path: Option<PathBuf>) -> Result<(CoreConfig, Config), Box<dyn Error>> {
    let path = if let Some(path) = path {
        path
    } else if let Ok(env_path) = std::env::var(HABITUAL_CONFIG_ENV) {
        PathBuf::from(env_path)
    } else {
        if let Some(true) = is_dev_mode() {
            return Err(format!(
                "Development environment detected ({HABITUAL_DEV_ENV} is set): config must be explicitly specified via --config or {HABITUAL_CONFIG_ENV} environment variable",
            ).into());
        }

        let config = get_config_dir()?.join(format!("{APP_NAME}/config.toml"));
        if !config.exists() {
            tracing::debug!(path = %config.display(), "no config file, using defaults");
            return Ok((CoreConfig::default(), Config::default()));
        }
        config
    };

    let raw = fs::read_to_string(&path)
        .await
        .map_err(|e| format!("Failed to read config file at {}: {}", path.display(), e))?
        .parse::<ConfigRaw>()?;

    let config = Config {
        arrange: arrange_config(raw.arrange)?,
    };
    Ok((raw.core, config))
}

/// Configuration of the command-line interface.
#[derive(Debug, Clone, Copy)]
pub struct Config {
    /// Drag engine tuning for the arrange screen, in terminal rows.
    pub arrange: DragConfig,
}

impl Default for Config {
    fn default() -> Self {
        let duration = Duration::from_millis(120);
        Self {
            arrange: DragConfig::default()
                .with_thresholds(1.0, 1.0)
                .with_max_speed(0.25)
                .with_durations(duration, duration)
                .with_item_gap(0.0),
        }
    }
}

#[derive(Debug, serde::Deserialize)]
struct ConfigRaw {
    #[serde(default)]
    core: CoreConfig,

    #[serde(default)]
    arrange: toml::Table,
}

impl FromStr for ConfigRaw {
    type Err = Box<dyn Error>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}

/// Reads the `[arrange]` table over the terminal defaults, so missing keys
/// keep those rather than the engine's touch-screen ones.
fn arrange_config(overrides: toml::Table) -> Result<DragConfig, Box<dyn Error>> {
    let toml::Value::Table(mut table) = toml::Value::try_from(Config::default().arrange)? else {
        return Err("Failed to encode the default arrange configuration".into());
    };
    table.extend(overrides);

    let config: DragConfig = toml::Value::Table(table)
        .try_into()
        .map_err(|e| format!("Invalid [arrange] configuration: {e}"))?;
    Ok(config)
}

fn is_dev_mode() -> Option<bool> {
    if let Ok(val) = std::env::var(HABITUAL_DEV_ENV) {
        let lower = val.to_lowercase();
        if HABITUAL_DEV_VALID_TRUE.contains(&lower.as_str()) {
            Some(true)
        } else if HABITUAL_DEV_VALID_FALSE.contains(&lower.as_str()) {
            Some(false)
        } else {
            tracing::warn!(
                "Unrecognized value for {}: '{}'. Expected one of: {}. Treating as unset.",
                HABITUAL_DEV_ENV,
                val,
                format!(
                    "true: {}, false: {}",
                    HABITUAL_DEV_VALID_TRUE.join(", "),
                    HABITUAL_DEV_VALID_FALSE.join(", ")
                )
            );
            None
        }
    } else {
        None
    }
}
