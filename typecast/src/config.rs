use std::path::{Path, PathBuf};

use derive_more::From;
use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use web_time::Duration;

pub use banner::{BannerConfig, Overrides};

pub mod banner;
pub mod theme;

/// Environment variables with this prefix override `settings.toml`
pub const ENV_PREFIX: &str = "TYPECAST_";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub theme: theme::Theme,
    pub banners: Vec<BannerConfig>,
    /// Milliseconds between two cursor blinks
    pub cursor_blink_ms: u64,
    /// Upper bound for redraws per second
    pub frame_rate: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: theme::Theme::default(),
            banners: vec![BannerConfig::default()],
            cursor_blink_ms: 530,
            frame_rate: 60,
        }
    }
}

impl Settings {
    /// Loads the settings from defaults, `settings.toml` in `config_dir`, and the environment
    pub fn load(config_dir: &Path) -> Result<Self, ConfigError> {
        let mut settings = Figment::from(Serialized::defaults(Self::default()));

        let settings_toml = config_dir.join("settings.toml");
        if settings_toml.exists() {
            settings = settings.merge(Toml::file(settings_toml));
        }

        let mut settings: Self = settings
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()
            .map_err(Box::new)?;

        if settings.banners.is_empty() {
            settings.banners.push(BannerConfig::default());
        }

        for banner in &settings.banners {
            banner
                .typewriter
                .validate()
                .map_err(|error| ConfigError::InvalidBanner {
                    name: banner.name.clone(),
                    error,
                })?;
        }

        Ok(settings)
    }

    pub fn cursor_blink(&self) -> Duration {
        Duration::from_millis(self.cursor_blink_ms.max(1))
    }

    /// Shortest time between two redraws
    pub fn frame_time(&self) -> Duration {
        Duration::from_secs(1) / u32::from(self.frame_rate.max(1))
    }
}

#[derive(Debug, From, Error)]
pub enum ConfigError {
    #[error(
        "Failed to get configuration directory. Please specify the location using the `--config <path>` flag"
    )]
    NoDirectory,

    #[error("Failed to create config directory: {0}")]
    CreateDirectory(std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(Box<figment::Error>),

    #[error("No banner named '{0}'")]
    #[from(skip)]
    UnknownBanner(String),

    #[error("Invalid banner '{name}': {error}")]
    #[from(skip)]
    InvalidBanner {
        name: String,
        error: typewriter::Error,
    },
}

#[derive(Debug)]
pub struct Config {
    pub settings: Settings,
    /// Where `settings.toml` is looked up
    pub directory: PathBuf,
    /// Command line overrides, re-applied on every reload
    pub overrides: Overrides,
}

impl Config {
    pub fn get(override_path: Option<PathBuf>, overrides: Overrides) -> Result<Self, ConfigError> {
        // Check for toml file location
        let directory = override_path
            .or_else(|| {
                ProjectDirs::from("com", "Typecast", "Typecast")
                    .map(|dirs| dirs.config_dir().to_path_buf())
            })
            .ok_or(ConfigError::NoDirectory)?;

        // Ensure path exists
        if !directory.exists() {
            std::fs::create_dir_all(&directory)?;
        }

        let settings = Settings::load(&directory)?;

        Ok(Self {
            settings,
            directory,
            overrides,
        })
    }

    /// Reads the settings from disk again
    pub fn reload(&mut self) -> Result<(), ConfigError> {
        self.settings = Settings::load(&self.directory)?;
        Ok(())
    }

    /// The configured banners, with the command line overrides applied
    pub fn banners(&self) -> Vec<BannerConfig> {
        self.overrides.apply(self.settings.banners.clone())
    }

    /// Index of the banner named `name` in [`Self::banners`]
    pub fn banner_index(&self, name: &str) -> Result<usize, ConfigError> {
        self.banners()
            .iter()
            .position(|banner| banner.name == name)
            .ok_or_else(|| ConfigError::UnknownBanner(name.to_string()))
    }
}
