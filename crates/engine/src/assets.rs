//! Asset loading with progress reporting.
//!
//! A terminal host has no sprites or audio files; its "assets" are the
//! colour/glyph theme for the three categories and the title banner. Each
//! asset comes either from the built-in defaults or from a file. Loading is
//! incremental, one asset per [`AssetLoader::step`], so the host can draw a
//! progress bar between steps.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::types::Category;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryStyle {
    pub label: String,
    pub color: [u8; 3],
    /// One glyph per item variant. Variants past the end reuse the last one.
    pub glyphs: Vec<char>,
}

impl CategoryStyle {
    fn new(label: &str, color: [u8; 3], glyphs: &[char]) -> Self {
        Self {
            label: label.to_string(),
            color,
            glyphs: glyphs.to_vec(),
        }
    }

    /// Glyph for a 1-based variant.
    pub fn glyph(&self, variant: u8) -> char {
        let idx = usize::from(variant.max(1)) - 1;
        self.glyphs
            .get(idx)
            .or_else(|| self.glyphs.last())
            .copied()
            .unwrap_or('#')
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub recyclable: CategoryStyle,
    pub organic: CategoryStyle,
    pub hazardous: CategoryStyle,
    pub background: [u8; 3],
    pub accent: [u8; 3],
}

impl Theme {
    pub fn style(&self, category: Category) -> &CategoryStyle {
        match category {
            Category::Recyclable => &self.recyclable,
            Category::Organic => &self.organic,
            Category::Hazardous => &self.hazardous,
        }
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let theme: Theme = serde_json::from_str(text).context("invalid theme JSON")?;
        Ok(theme)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            recyclable: CategoryStyle::new("Recyclable", [66, 135, 245], &['B', 'C', 'P']),
            organic: CategoryStyle::new("Organic", [76, 175, 80], &['A', 'L', 'F']),
            hazardous: CategoryStyle::new("Hazardous", [229, 57, 53], &['X', 'Z', 'T']),
            background: [18, 22, 28],
            accent: [255, 213, 79],
        }
    }
}

const BUILTIN_TITLE: &str = r"
 _ _ _         _          ___
| | | |___ ___| |_ ___   |   \ ___ ___ ___
| | | | .'|_ -|  _| -_|  | |) |  _| . | . |
|_____|__,|___|_| |___|  |___/|_| |___|  _|
                                      |_|";

fn banner_lines(text: &str) -> Vec<String> {
    text.lines()
        .skip_while(|l| l.trim().is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKey {
    Theme,
    Title,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetSource {
    Builtin,
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRequest {
    pub key: AssetKey,
    pub source: AssetSource,
}

/// Everything the renderer needs once loading finished.
#[derive(Debug, Clone, PartialEq)]
pub struct Assets {
    pub theme: Theme,
    pub title: Vec<String>,
}

impl Default for Assets {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            title: banner_lines(BUILTIN_TITLE),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AssetLoader {
    requests: Vec<AssetRequest>,
    loaded: usize,
    assets: Assets,
}

impl AssetLoader {
    pub fn new(requests: Vec<AssetRequest>) -> Self {
        Self {
            requests,
            loaded: 0,
            assets: Assets::default(),
        }
    }

    /// Standard manifest: the theme (optionally from a file) and the banner.
    pub fn standard(theme_path: Option<PathBuf>) -> Self {
        let theme = theme_path.map_or(AssetSource::Builtin, AssetSource::File);
        Self::new(vec![
            AssetRequest {
                key: AssetKey::Theme,
                source: theme,
            },
            AssetRequest {
                key: AssetKey::Title,
                source: AssetSource::Builtin,
            },
        ])
    }

    pub fn total(&self) -> usize {
        self.requests.len()
    }

    pub fn progress(&self) -> f32 {
        if self.requests.is_empty() {
            return 1.0;
        }
        self.loaded as f32 / self.requests.len() as f32
    }

    pub fn is_complete(&self) -> bool {
        self.loaded >= self.requests.len()
    }

    /// Load the next asset and return the new progress in `0.0..=1.0`.
    pub fn step(&mut self) -> Result<f32> {
        let Some(request) = self.requests.get(self.loaded) else {
            return Ok(1.0);
        };
        match (&request.key, &request.source) {
            (AssetKey::Theme, AssetSource::Builtin) => self.assets.theme = Theme::default(),
            (AssetKey::Theme, AssetSource::File(path)) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("failed to read theme {}", path.display()))?;
                self.assets.theme = Theme::from_json(&text)
                    .with_context(|| format!("failed to parse theme {}", path.display()))?;
            }
            (AssetKey::Title, AssetSource::Builtin) => {
                self.assets.title = banner_lines(BUILTIN_TITLE);
            }
            (AssetKey::Title, AssetSource::File(path)) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("failed to read title {}", path.display()))?;
                self.assets.title = banner_lines(&text);
            }
        }
        log::debug!("loaded asset {:?}", request.key);
        self.loaded += 1;
        Ok(self.progress())
    }

    /// Finish loading everything that is left.
    pub fn load_all(mut self) -> Result<Assets> {
        while !self.is_complete() {
            self.step()?;
        }
        Ok(self.assets)
    }

    pub fn into_assets(self) -> Assets {
        self.assets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_manifest_loads_stepwise() {
        let mut loader = AssetLoader::standard(None);
        assert_eq!(loader.total(), 2);
        assert_eq!(loader.progress(), 0.0);
        assert_eq!(loader.step().unwrap(), 0.5);
        assert_eq!(loader.step().unwrap(), 1.0);
        assert!(loader.is_complete());
        assert_eq!(loader.step().unwrap(), 1.0);
        let assets = loader.into_assets();
        assert!(!assets.title.is_empty());
    }

    #[test]
    fn test_missing_theme_file_errors() {
        let loader = AssetLoader::standard(Some(PathBuf::from("/nonexistent/theme.json")));
        let err = loader.load_all().unwrap_err();
        assert!(format!("{:#}", err).contains("failed to read theme"));
    }

    #[test]
    fn test_partial_theme_json_uses_defaults() {
        let theme = Theme::from_json(r#"{"accent": [1, 2, 3]}"#).unwrap();
        assert_eq!(theme.accent, [1, 2, 3]);
        assert_eq!(theme.organic, Theme::default().organic);
    }

    #[test]
    fn test_glyph_per_variant() {
        let style = Theme::default().recyclable;
        assert_eq!(style.glyph(1), 'B');
        assert_eq!(style.glyph(3), 'P');
        assert_eq!(style.glyph(9), 'P');
        assert_eq!(style.glyph(0), 'B');
        let empty = CategoryStyle::new("x", [0, 0, 0], &[]);
        assert_eq!(empty.glyph(1), '#');
    }
}
