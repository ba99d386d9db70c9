use serde::Deserialize;
use std::path::PathBuf;

/// One renderable font variant, recorded once per script it supports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontDescriptor {
    pub path: PathBuf,
    pub family: String,
    /// Face name as reported in the manifest, e.g. "Noto Sans Bold Italic"
    pub full_name: String,
    pub category: String,
    pub weight: u16,
    /// "normal" or "italic"
    pub style: String,
    pub script: String,
}

impl FontDescriptor {
    pub fn is_italic(&self) -> bool {
        self.style.eq_ignore_ascii_case("italic")
    }
}

/// Top level of `google-fonts.json`
#[derive(Debug, Deserialize)]
pub struct FontManifest {
    pub info: Vec<FontFamilyEntry>,
}

#[derive(Debug, Deserialize)]
pub struct FontFamilyEntry {
    pub name: String,
    pub category: String,
    /// Scripts this family covers
    pub subsets: Vec<String>,
    /// Directory of the variant files, relative to the manifest
    pub files_path: PathBuf,
    pub fonts: Vec<FontVariantEntry>,
}

#[derive(Debug, Deserialize)]
pub struct FontVariantEntry {
    pub name: String,
    pub full_name: String,
    pub filename: String,
    pub weight: FontWeight,
    pub style: String,
}

/// The manifest writes weights both as numbers and as strings.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FontWeight {
    Number(u16),
    Text(String),
}

impl FontWeight {
    pub fn value(&self) -> Option<u16> {
        match self {
            FontWeight::Number(n) => Some(*n),
            FontWeight::Text(s) => s.trim().parse().ok(),
        }
    }
}
