//! Asset catalog loading
//!
//! Reads the on-disk asset tree once at startup:
//!
//! - `backgrounds/`: every regular, non-hidden file is a background image
//! - `fonts/google-fonts.json`: font families per script, files next to it
//! - `scripts/<script>/<language>`: one word per line
//! - `palettes/*`: one comma-separated hex palette per line
//!
//! At least one script must end up with both words and fonts.
//! Any problem is fatal and reported as [`AssetLoadError`].

use resvg::usvg::fontdb;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use wcag_palette::{ContrastTable, ContrastTableBuilder, Rgb8};

use crate::error::AssetLoadError;
use crate::models::{
    Catalog, FontDescriptor, FontManifest, LanguageWords, MAX_WORD_CHARS,
};

/// Locations of the four asset kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetPaths {
    pub backgrounds: PathBuf,
    pub fonts_manifest: PathBuf,
    pub words: PathBuf,
    pub palettes: PathBuf,
}

impl AssetPaths {
    /// Standard layout below one root directory.
    pub fn under(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            backgrounds: root.join("backgrounds"),
            fonts_manifest: root.join("fonts").join("google-fonts.json"),
            words: root.join("scripts"),
            palettes: root.join("palettes"),
        }
    }
}

/// Builds a [`Catalog`] from an [`AssetPaths`] layout.
pub struct AssetLoader {
    paths: AssetPaths,
}

impl AssetLoader {
    pub fn new(paths: AssetPaths) -> Self {
        Self { paths }
    }

    pub fn load(&self) -> Result<Catalog, AssetLoadError> {
        let backgrounds = self.load_backgrounds()?;
        let (fonts, fontdb) = self.load_fonts()?;
        let words = self.load_words()?;
        let contrast = self.load_palettes()?;

        for script in words.keys() {
            if fonts.get(script).map_or(true, Vec::is_empty) {
                tracing::warn!(script = %script, "Script has words but no fonts, it will never be drawn");
            }
        }

        let catalog = Catalog::new(backgrounds, fonts, words, contrast, Arc::new(fontdb))?;
        tracing::info!(
            backgrounds = catalog.backgrounds().len(),
            fonts = catalog.font_count(),
            words = catalog.word_count(),
            colors = catalog.contrast().len(),
            scripts = ?catalog.scripts().collect::<Vec<_>>(),
            "Asset catalog ready"
        );
        Ok(catalog)
    }

    fn load_backgrounds(&self) -> Result<Vec<PathBuf>, AssetLoadError> {
        let backgrounds = visible_files(&self.paths.backgrounds)?;
        for path in &backgrounds {
            tracing::trace!(path = %path.display(), "Found background");
        }
        if backgrounds.is_empty() {
            return Err(AssetLoadError::Empty("backgrounds"));
        }

        tracing::info!(count = backgrounds.len(), "Loaded backgrounds");
        Ok(backgrounds)
    }

    fn load_fonts(
        &self,
    ) -> Result<(BTreeMap<String, Vec<FontDescriptor>>, fontdb::Database), AssetLoadError> {
        let manifest_path = &self.paths.fonts_manifest;
        let content =
            fs::read_to_string(manifest_path).map_err(|e| AssetLoadError::io(manifest_path, e))?;
        let manifest: FontManifest =
            serde_json::from_str(&content).map_err(|source| AssetLoadError::Manifest {
                path: manifest_path.clone(),
                source,
            })?;
        let fonts_root = manifest_path.parent().unwrap_or_else(|| Path::new("."));

        let mut db = fontdb::Database::new();
        // Face family name per loaded file, so each file enters the database once
        let mut loaded: HashMap<PathBuf, String> = HashMap::new();
        let mut fonts: BTreeMap<String, Vec<FontDescriptor>> = BTreeMap::new();

        for family in &manifest.info {
            for variant in &family.fonts {
                let path = fonts_root.join(&family.files_path).join(&variant.filename);
                let weight = variant.weight.value().ok_or_else(|| AssetLoadError::FontEntry {
                    path: manifest_path.clone(),
                    message: format!("{}: weight {:?} is not a number", variant.full_name, variant.weight),
                })?;

                let face_family = match loaded.get(&path) {
                    Some(name) => name.clone(),
                    None => {
                        let name = load_face(&mut db, &path, manifest_path)?
                            .unwrap_or_else(|| family.name.clone());
                        tracing::debug!(font = %path.display(), family = %name, "Loaded font");
                        loaded.insert(path.clone(), name.clone());
                        name
                    }
                };

                for script in &family.subsets {
                    fonts.entry(script.clone()).or_default().push(FontDescriptor {
                        path: path.clone(),
                        family: face_family.clone(),
                        full_name: variant.full_name.clone(),
                        category: family.category.clone(),
                        weight,
                        style: variant.style.clone(),
                        script: script.clone(),
                    });
                }
            }
        }

        let total: usize = fonts.values().map(Vec::len).sum();
        if total == 0 {
            return Err(AssetLoadError::Empty("fonts"));
        }

        tracing::info!(
            fonts = total,
            files = loaded.len(),
            scripts = fonts.len(),
            "Loaded fonts"
        );
        Ok((fonts, db))
    }

    fn load_words(&self) -> Result<BTreeMap<String, LanguageWords>, AssetLoadError> {
        let root = &self.paths.words;
        let mut words = BTreeMap::new();
        let mut total = 0;

        for script_dir in visible_entries(root)? {
            if !script_dir.is_dir() {
                continue;
            }
            let Some(script) = file_name(&script_dir) else {
                continue;
            };

            let mut languages = LanguageWords::new();
            for language_file in visible_files(&script_dir)? {
                let Some(language) = file_name(&language_file) else {
                    continue;
                };
                let content = fs::read_to_string(&language_file)
                    .map_err(|e| AssetLoadError::io(&language_file, e))?;
                let list = parse_words(&content);
                if list.is_empty() {
                    tracing::warn!(path = %language_file.display(), "No usable words, skipping language");
                    continue;
                }

                tracing::debug!(script = %script, language = %language, words = list.len(), "Loaded words");
                total += list.len();
                languages.insert(language, list);
            }

            if languages.is_empty() {
                tracing::warn!(script = %script, "Script has no languages, skipping");
                continue;
            }
            words.insert(script, languages);
        }

        if total == 0 {
            return Err(AssetLoadError::Empty("words"));
        }

        tracing::info!(words = total, scripts = words.len(), "Loaded words");
        Ok(words)
    }

    fn load_palettes(&self) -> Result<ContrastTable, AssetLoadError> {
        let mut builder = ContrastTableBuilder::new();
        let mut passing = 0;

        for path in visible_files(&self.paths.palettes)? {
            let content = fs::read_to_string(&path).map_err(|e| AssetLoadError::io(&path, e))?;
            for (i, line) in content.lines().enumerate() {
                if line.trim().is_empty() {
                    continue;
                }
                let palette = parse_palette(line).map_err(|source| AssetLoadError::Palette {
                    path: path.clone(),
                    line: i + 1,
                    source,
                })?;
                passing += builder.add_palette(&palette);
            }
            tracing::debug!(path = %path.display(), "Loaded palette file");
        }

        let palettes = builder.palettes();
        let table = builder.build();
        if table.is_empty() {
            return Err(AssetLoadError::Empty("contrast pairs"));
        }

        tracing::info!(
            palettes,
            pairs = passing,
            colors = table.len(),
            "Loaded color combinations"
        );
        Ok(table)
    }
}

/// Load one font file, returning the family name of its first face.
fn load_face(
    db: &mut fontdb::Database,
    path: &Path,
    manifest_path: &Path,
) -> Result<Option<String>, AssetLoadError> {
    fs::metadata(path).map_err(|e| AssetLoadError::io(path, e))?;

    let ids = db.load_font_source(fontdb::Source::File(path.to_path_buf()));
    let Some(&id) = ids.first() else {
        return Err(AssetLoadError::FontEntry {
            path: manifest_path.to_path_buf(),
            message: format!("{} contains no usable font face", path.display()),
        });
    };

    Ok(db
        .face(id)
        .and_then(|face| face.families.first())
        .map(|(name, _)| name.clone()))
}

/// Trimmed, non-empty words of at most [`MAX_WORD_CHARS`] characters.
pub(crate) fn parse_words(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|word| !word.is_empty() && word.chars().count() <= MAX_WORD_CHARS)
        .map(String::from)
        .collect()
}

pub(crate) fn parse_palette(line: &str) -> Result<Vec<Rgb8>, wcag_palette::ParseColorError> {
    line.split(',')
        .map(str::trim)
        .filter(|hex| !hex.is_empty())
        .map(str::parse)
        .collect()
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.'))
}

fn file_name(path: &Path) -> Option<String> {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(String::from)
}

/// Non-hidden entries of `dir`, sorted by path.
fn visible_entries(dir: &Path) -> Result<Vec<PathBuf>, AssetLoadError> {
    let entries = fs::read_dir(dir).map_err(|e| AssetLoadError::io(dir, e))?;
    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| AssetLoadError::io(dir, e))?;
        let path = entry.path();
        if !is_hidden(&path) {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

fn visible_files(dir: &Path) -> Result<Vec<PathBuf>, AssetLoadError> {
    Ok(visible_entries(dir)?
        .into_iter()
        .filter(|p| p.is_file())
        .collect())
}
