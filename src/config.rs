use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::scoring::{ChillConfig, PersonalConfig, PricingConfig, TodayConfig, TrendingConfig};

/// Coefficients for every feed recipe. Defaults are the production values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    pub trending: TrendingConfig,
    pub personal: PersonalConfig,
    pub chill: ChillConfig,
    pub today: TodayConfig,
    pub pricing: PricingConfig,
}

impl RankingConfig {
    pub fn load(path: Option<PathBuf>) -> Result<(Self, Option<PathBuf>), String> {
        let config_path = path.or_else(default_config_path);
        let mut config = match config_path.as_ref() {
            Some(path) if path.exists() => Self::from_file(path)?,
            _ => RankingConfig::default(),
        };

        config.apply_env_overrides();
        Ok((config, config_path))
    }

    pub fn from_file(path: &Path) -> Result<Self, String> {
        let contents = std::fs::read_to_string(path)
            .map_err(|err| format!("failed to read config {}: {}", path.display(), err))?;
        toml::from_str(&contents)
            .map_err(|err| format!("failed to parse config {}: {}", path.display(), err))
    }

    pub fn write(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|err| format!("failed to create config dir: {}", err))?;
        }
        std::fs::write(path, self.to_toml()?)
            .map_err(|err| format!("failed to write config: {}", err))?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|err| format!("failed to serialize config: {}", err))
    }

    fn apply_env_overrides(&mut self) {
        if let Some(value) = env_f64("CHILL_HYPE_THRESHOLD") {
            self.chill.hype_threshold = value;
        }
        if let Some(value) = env_f64("CHILL_HYPE_PENALTY") {
            self.chill.hype_penalty = value.clamp(0.0, 1.0);
        }
        if let Some(value) = env_f64("TRENDING_DECAY_HOURS") {
            if value > 0.0 {
                self.trending.decay_hours = value;
            }
        }
        if let Some(value) = env_f64("FOLLOW_BONUS") {
            self.personal.follow_bonus = value;
        }
    }
}

fn env_f64(key: &str) -> Option<f64> {
    env::var(key)
        .ok()
        .and_then(|value| value.trim().parse::<f64>().ok())
        .filter(|value| value.is_finite())
}

fn default_config_path() -> Option<PathBuf> {
    env::var("RANKING_CONFIG_PATH")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .or_else(|| Some(PathBuf::from("config/ranking.toml")))
}
