use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::assets::AssetPaths;
use crate::error::ConfigError;

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Root for every asset path that is given relative
    #[serde(default = "default_assets_dir")]
    pub assets_dir: PathBuf,

    #[serde(default)]
    pub backgrounds_dir: Option<PathBuf>,

    #[serde(default)]
    pub fonts_manifest: Option<PathBuf>,

    #[serde(default)]
    pub words_dir: Option<PathBuf>,

    #[serde(default)]
    pub palettes_dir: Option<PathBuf>,

    /// Where rendered samples go when `save_to_disk` is set
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    #[serde(default)]
    pub save_to_disk: bool,

    /// Margin in pixels kept around the text inside the crop
    #[serde(default = "default_padding")]
    pub padding: u32,

    /// Candidate divisors of the background height for the initial font size
    #[serde(default = "default_font_divisors")]
    pub font_divisors: Vec<u32>,

    #[serde(default = "default_max_layout_iterations")]
    pub max_layout_iterations: u32,

    /// Full sample+render attempts per request
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    #[serde(default = "default_max_phrase_words")]
    pub max_phrase_words: usize,

    /// Known colors consulted per contrast lookup
    #[serde(default = "default_neighbors")]
    pub neighbors: usize,

    /// Scripts drawn from when a request does not name any
    #[serde(default = "default_scripts")]
    pub default_scripts: Vec<String>,

    #[serde(default = "default_shuffle_on_start")]
    pub shuffle_on_start: bool,
}

fn default_assets_dir() -> PathBuf {
    PathBuf::from("assets")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("generated_images")
}

fn default_padding() -> u32 {
    30
}

fn default_font_divisors() -> Vec<u32> {
    vec![5, 7, 10]
}

fn default_max_layout_iterations() -> u32 {
    64
}

fn default_max_attempts() -> u32 {
    5
}

fn default_max_phrase_words() -> usize {
    8
}

fn default_neighbors() -> usize {
    10
}

fn default_scripts() -> Vec<String> {
    ["latin", "devanagari", "arabic", "cyrillic", "korean"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_shuffle_on_start() -> bool {
    true
}

impl AppConfig {
    /// Load configuration from a YAML file.
    ///
    /// A missing file is not an error: defaults apply and a warning is logged.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(path = %path.display(), "Config file not found, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let mut config = Self::from_yaml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate();

        tracing::info!(
            path = %path.display(),
            assets_dir = %config.assets_dir.display(),
            save_to_disk = config.save_to_disk,
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Load from `CONFIG_FILE` (default `config.yaml`), then apply `ASSETS_DIR`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.yaml".to_string());
        let mut config = Self::load(Path::new(&path))?;
        if let Ok(dir) = std::env::var("ASSETS_DIR") {
            config.assets_dir = PathBuf::from(dir);
        }
        Ok(config)
    }

    fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        // An empty document deserializes as unit, not as an empty mapping
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    /// Clamp values that would make generation impossible or unbounded.
    pub fn validate(&mut self) {
        let before = self.font_divisors.len();
        self.font_divisors.retain(|&d| d > 0);
        if self.font_divisors.len() != before {
            tracing::warn!("Dropped zero entries from font_divisors");
        }
        if self.font_divisors.is_empty() {
            self.font_divisors = default_font_divisors();
        }
        self.max_attempts = self.max_attempts.max(1);
        self.max_layout_iterations = self.max_layout_iterations.max(1);
        self.max_phrase_words = self.max_phrase_words.max(1);
        self.neighbors = self.neighbors.max(1);
    }

    /// Asset locations with relative entries resolved under `assets_dir`.
    pub fn asset_paths(&self) -> AssetPaths {
        let resolve = |custom: &Option<PathBuf>, fallback: &str| match custom {
            Some(path) => self.assets_dir.join(path),
            None => self.assets_dir.join(fallback),
        };

        AssetPaths {
            backgrounds: resolve(&self.backgrounds_dir, "backgrounds"),
            fonts_manifest: resolve(&self.fonts_manifest, "fonts/google-fonts.json"),
            words: resolve(&self.words_dir, "scripts"),
            palettes: resolve(&self.palettes_dir, "palettes"),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            assets_dir: default_assets_dir(),
            backgrounds_dir: None,
            fonts_manifest: None,
            words_dir: None,
            palettes_dir: None,
            output_dir: default_output_dir(),
            save_to_disk: false,
            padding: default_padding(),
            font_divisors: default_font_divisors(),
            max_layout_iterations: default_max_layout_iterations(),
            max_attempts: default_max_attempts(),
            max_phrase_words: default_max_phrase_words(),
            neighbors: default_neighbors(),
            default_scripts: default_scripts(),
            shuffle_on_start: default_shuffle_on_start(),
        }
    }
}
