use serde::{Deserialize, Serialize};
use typewriter::Texts;

/// Name of the banner created from texts given on the command line
pub const CLI_BANNER: &str = "cli";

/// A named typewriter animation
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BannerConfig {
    pub name: String,
    #[serde(flatten)]
    pub typewriter: typewriter::Config,
}

impl BannerConfig {
    pub fn new(name: impl Into<String>, typewriter: typewriter::Config) -> Self {
        Self {
            name: name.into(),
            typewriter,
        }
    }
}

impl Default for BannerConfig {
    fn default() -> Self {
        Self::new(
            "welcome",
            typewriter::Config::new([
                "Hello, world!",
                "Welcome to typecast",
                "Press <Tab> to switch banners",
            ])
            .with_speed(80)
            .with_initial_delay(500)
            .with_loop(true),
        )
    }
}

/// Settings given on the command line, layered on top of every banner
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    /// Texts for an extra banner that is put first
    pub texts: Vec<String>,
    pub speed: Option<u64>,
    pub initial_delay: Option<u64>,
    pub loop_delay: Option<u64>,
    pub looping: Option<bool>,
    pub show_cursor: Option<bool>,
}

impl Overrides {
    /// Applies the overrides to a list of banners
    ///
    /// With texts given, a banner named [`CLI_BANNER`] is inserted in front,
    /// based on the timings of the first banner.
    pub fn apply(&self, mut banners: Vec<BannerConfig>) -> Vec<BannerConfig> {
        if !self.texts.is_empty() {
            let base = banners
                .first()
                .map_or_else(BannerConfig::default, Clone::clone)
                .typewriter;

            let typewriter = typewriter::Config {
                texts: Texts::new(self.texts.iter().cloned()),
                ..base
            };
            banners.retain(|banner| banner.name != CLI_BANNER);
            banners.insert(0, BannerConfig::new(CLI_BANNER, typewriter));
        }

        for banner in &mut banners {
            self.apply_timings(&mut banner.typewriter);
        }

        banners
    }

    fn apply_timings(&self, config: &mut typewriter::Config) {
        if let Some(speed) = self.speed {
            config.speed = speed;
        }
        if let Some(initial_delay) = self.initial_delay {
            config.initial_delay = initial_delay;
        }
        if let Some(loop_delay) = self.loop_delay {
            config.loop_delay = loop_delay;
        }
        if let Some(looping) = self.looping {
            config.looping = looping;
        }
        if let Some(show_cursor) = self.show_cursor {
            config.show_cursor = show_cursor;
        }
    }
}
