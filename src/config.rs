use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::layout::LayoutConfig;
use crate::library::LibraryFilter;
use crate::render::RenderOptions;

/// Everything the collage pipeline can be tuned with. Every section and
/// field is optional in the config file; missing values take their defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CollageConfig {
    pub layout: LayoutConfig,
    pub library: LibraryFilter,
    pub render: RenderOptions,
}

impl CollageConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: CollageConfig = serde_json::from_str(json).context("Invalid collage config")?;
        Ok(config.validated())
    }

    pub fn validated(mut self) -> Self {
        self.layout = self.layout.validated();
        self
    }
}

/// Load the config file at `path`, or the defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<CollageConfig> {
    let Some(path) = path else {
        return Ok(CollageConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config = CollageConfig::from_json(&text)
        .with_context(|| format!("Failed to load config file {}", path.display()))?;
    tracing::debug!("Loaded config from {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::free_rects::SplitStrategy;
    use crate::layout::size::SizeScale;
    use crate::layout::LayoutMode;

    #[test]
    fn empty_object_is_default() {
        let config = CollageConfig::from_json("{}").unwrap();
        assert_eq!(config.layout.mode, LayoutMode::Packed);
        assert_eq!(config.library, LibraryFilter::default());
        assert_eq!(config.render, RenderOptions::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let json = r#"{
            "layout": {"mode": "grid", "split": "max_remainder", "size": {"scale": "linear"}},
            "library": {"max_items": 50},
            "render": {"show_playtime": false}
        }"#;
        let config = CollageConfig::from_json(json).unwrap();
        assert_eq!(config.layout.mode, LayoutMode::Grid);
        assert_eq!(config.layout.split, SplitStrategy::MaxRemainder);
        assert_eq!(config.layout.size.scale, SizeScale::Linear);
        assert_eq!(config.layout.size.tiers, 8);
        assert_eq!(config.library.max_items, Some(50));
        assert!(config.library.include_unplayed);
        assert!(!config.render.show_playtime);
        assert_eq!(config.render.min_badge_width, 80.0);
    }

    #[test]
    fn bad_values_are_repaired() {
        let config = CollageConfig::from_json(r#"{"layout": {"aspect_ratio": 0.0}}"#).unwrap();
        assert!((config.layout.aspect_ratio - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn unknown_enum_value_is_an_error() {
        assert!(CollageConfig::from_json(r#"{"layout": {"mode": "spiral"}}"#).is_err());
    }

    #[test]
    fn no_path_means_defaults() {
        let config = load_config(None).unwrap();
        assert_eq!(config.render, RenderOptions::default());
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_config(Some(Path::new("/nonexistent/collage.json"))).is_err());
    }
}
