//! Test fixtures: a small asset tree in a temporary directory.

use image::{Rgb, RgbImage};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use scenetext::assets::{AssetLoader, AssetPaths};
use scenetext::models::{AppConfig, Catalog};

/// Words in the default fixture, all latin/english
pub const WORDS: &[&str] = &["hi", "world"];

/// The only palette in the default fixture
pub const PALETTE: &str = "#ffffff,#000000";

/// Colors a sample from the default fixture may use for its text
pub const TEXT_COLORS: &[&str] = &["#ffffff", "#000000"];

/// Directory holding the DejaVu fonts checked into the repository
pub fn font_fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/fonts")
}

const MANIFEST: &str = r#"{
  "info": [
    {
      "name": "DejaVu Sans",
      "category": "sans-serif",
      "subsets": ["latin"],
      "files_path": "dejavu",
      "fonts": [
        {"name": "DejaVu Sans", "full_name": "DejaVu Sans", "filename": "DejaVuSans.ttf", "weight": 400, "style": "normal"},
        {"name": "DejaVu Sans", "full_name": "DejaVu Sans Bold", "filename": "DejaVuSans-Bold.ttf", "weight": "700", "style": "normal"}
      ]
    }
  ]
}"#;

/// An asset tree on disk, removed when dropped.
pub struct FixtureAssets {
    dir: TempDir,
}

impl FixtureAssets {
    /// One 800x600 background, latin/english words, a black and white palette.
    pub fn new() -> Self {
        Self::with_background(800, 600)
    }

    pub fn with_background(width: u32, height: u32) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let root = dir.path();

        let backgrounds = root.join("backgrounds");
        fs::create_dir_all(&backgrounds).unwrap();
        gradient(width, height)
            .save(backgrounds.join("gradient.png"))
            .expect("Failed to write background");

        let fonts = root.join("fonts").join("dejavu");
        fs::create_dir_all(&fonts).unwrap();
        for file in ["DejaVuSans.ttf", "DejaVuSans-Bold.ttf"] {
            fs::copy(font_fixture_dir().join(file), fonts.join(file)).expect("Failed to copy font");
        }
        fs::write(root.join("fonts").join("google-fonts.json"), MANIFEST).unwrap();

        let fixture = Self { dir };
        fixture.write_words("latin", "english", &WORDS.join("\n"));
        fixture.write_palettes("basic.csv", &format!("{PALETTE}\n"));
        fixture
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn paths(&self) -> AssetPaths {
        AssetPaths::under(self.root())
    }

    /// Default configuration pointed at this tree, with shuffling off so
    /// seeded runs are reproducible.
    pub fn config(&self) -> AppConfig {
        AppConfig {
            assets_dir: self.root().to_path_buf(),
            output_dir: self.root().join("out"),
            shuffle_on_start: false,
            ..Default::default()
        }
    }

    pub fn catalog(&self) -> Catalog {
        AssetLoader::new(self.paths())
            .load()
            .expect("Fixture catalog should load")
    }

    pub fn write_words(&self, script: &str, language: &str, content: &str) {
        let dir = self.root().join("scripts").join(script);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(language), content).unwrap();
    }

    pub fn write_palettes(&self, name: &str, content: &str) {
        let dir = self.root().join("palettes");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(name), content).unwrap();
    }

    pub fn write_manifest(&self, content: &str) {
        fs::write(self.root().join("fonts").join("google-fonts.json"), content).unwrap();
    }
}

impl Default for FixtureAssets {
    fn default() -> Self {
        Self::new()
    }
}

/// Diagonal color gradient so crops differ by position
fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        let r = (x * 255 / width.max(1)) as u8;
        let g = (y * 255 / height.max(1)) as u8;
        Rgb([r, g, 128])
    })
}
