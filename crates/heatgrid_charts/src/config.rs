//! Heatmap configuration (heatgrid.toml)
//!
//! Every field has a default, so an empty document is a valid configuration.

use std::fs;
use std::path::{Path, PathBuf};

use heatgrid_core::Color;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("at least one color threshold is required")]
    EmptyThresholds,

    #[error("{thresholds} thresholds but {colors} colors; they must pair up")]
    LengthMismatch { thresholds: usize, colors: usize },

    #[error("threshold {0} is outside [0, 1]")]
    ThresholdOutOfRange(f64),

    #[error("thresholds must be sorted ascending")]
    ThresholdsNotAscending,

    #[error("band padding must be in [0, 1), got {0}")]
    InvalidPadding(f32),

    #[error("margins must be finite and non-negative")]
    InvalidMargin,

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Space between the surface edge and the plotting bounds.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margin {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 10.0,
            right: 10.0,
            bottom: 30.0,
            left: 60.0,
        }
    }
}

/// What to draw for records whose value is null.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NullCellPolicy {
    /// Emit nothing for the record.
    #[default]
    Skip,
    /// Emit a cell with the placeholder fill.
    Placeholder,
}

/// Layout of stacked heatmap blocks.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub primary_title: String,
    pub secondary_title: String,
    pub title_font_size: f32,
    /// Space between a title line and its chart surface.
    pub title_gap: f32,
    /// Space after each block.
    pub block_gap: f32,
    /// Vertical allowance reserved under each surface for the color legend.
    pub legend_height: f32,
    pub legend_width: f32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            primary_title: "Daily Averages Heatmap".to_string(),
            secondary_title: "Second Heatmap".to_string(),
            title_font_size: 16.0,
            title_gap: 10.0,
            block_gap: 40.0,
            legend_height: 50.0,
            legend_width: 200.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HeatmapConfig {
    /// Inter-band padding fraction for both axes.
    #[serde(default = "default_padding")]
    pub padding: f32,
    /// Color stop positions as fractions of the dataset maximum.
    #[serde(default = "default_thresholds")]
    pub thresholds: Vec<f64>,
    #[serde(default = "default_colors")]
    pub colors: Vec<Color>,
    /// Fill for cells whose value is zero (and null cells under
    /// [`NullCellPolicy::Placeholder`]).
    #[serde(default = "default_placeholder_color")]
    pub placeholder_color: Color,
    #[serde(default = "default_label_color")]
    pub label_color: Color,
    #[serde(default = "default_label_font_size")]
    pub label_font_size: f32,
    #[serde(default)]
    pub null_cells: NullCellPolicy,
    #[serde(default)]
    pub margin: Margin,
    #[serde(default)]
    pub board: BoardConfig,
}

fn default_padding() -> f32 {
    0.1
}

fn default_thresholds() -> Vec<f64> {
    vec![0.0, 0.25, 0.5, 0.75, 1.0]
}

fn default_colors() -> Vec<Color> {
    [0xE0F3F8, 0xABD9E9, 0x74ADD1, 0x4575B4, 0x313695]
        .into_iter()
        .map(Color::from_hex)
        .collect()
}

fn default_placeholder_color() -> Color {
    Color::from_hex(0xF8F8F8)
}

fn default_label_color() -> Color {
    Color::BLACK
}

fn default_label_font_size() -> f32 {
    10.0
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            padding: default_padding(),
            thresholds: default_thresholds(),
            colors: default_colors(),
            placeholder_color: default_placeholder_color(),
            label_color: default_label_color(),
            label_font_size: default_label_font_size(),
            null_cells: NullCellPolicy::default(),
            margin: Margin::default(),
            board: BoardConfig::default(),
        }
    }
}

impl HeatmapConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.thresholds.is_empty() {
            return Err(ConfigError::EmptyThresholds);
        }
        if self.thresholds.len() != self.colors.len() {
            return Err(ConfigError::LengthMismatch {
                thresholds: self.thresholds.len(),
                colors: self.colors.len(),
            });
        }
        if let Some(&t) = self
            .thresholds
            .iter()
            .find(|t| !(0.0..=1.0).contains(*t))
        {
            return Err(ConfigError::ThresholdOutOfRange(t));
        }
        if self.thresholds.windows(2).any(|w| w[1] < w[0]) {
            return Err(ConfigError::ThresholdsNotAscending);
        }
        if !(0.0..1.0).contains(&self.padding) {
            return Err(ConfigError::InvalidPadding(self.padding));
        }
        let m = self.margin;
        if [m.top, m.right, m.bottom, m.left]
            .iter()
            .any(|v| !v.is_finite() || *v < 0.0)
        {
            return Err(ConfigError::InvalidMargin);
        }
        Ok(())
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: HeatmapConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a file, or from `heatgrid.toml` inside a directory.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let config_path = if path.is_dir() {
            path.join("heatgrid.toml")
        } else {
            path.to_path_buf()
        };

        let content = fs::read_to_string(&config_path).map_err(|source| ConfigError::Read {
            path: config_path.clone(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = HeatmapConfig::from_toml_str("").unwrap();
        assert_eq!(config, HeatmapConfig::default());
        assert_eq!(config.placeholder_color.to_rgb8(), [0xF8, 0xF8, 0xF8]);
        assert_eq!(config.null_cells, NullCellPolicy::Skip);
    }

    #[test]
    fn partial_document_overrides_fields() {
        let config = HeatmapConfig::from_toml_str(
            r##"
padding = 0.05
thresholds = [0.0, 1.0]
colors = ["#ffffff", "#000000"]
null_cells = "placeholder"

[margin]
left = 80.0

[board]
legend_height = 40.0
"##,
        )
        .unwrap();
        assert_eq!(config.padding, 0.05);
        assert_eq!(config.colors[1], Color::from_hex(0x000000));
        assert_eq!(config.margin.left, 80.0);
        assert_eq!(config.margin.top, 10.0);
        assert_eq!(config.board.legend_height, 40.0);
        assert_eq!(config.board.legend_width, 200.0);
        assert_eq!(config.null_cells, NullCellPolicy::Placeholder);
    }

    #[test]
    fn validation_rejects_inconsistent_stops() {
        let mut config = HeatmapConfig::default();
        config.colors.pop();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::LengthMismatch {
                thresholds: 5,
                colors: 4
            })
        ));

        let mut config = HeatmapConfig::default();
        config.thresholds = vec![0.0, 0.6, 0.5, 0.75, 1.0];
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ThresholdsNotAscending)
        ));

        let mut config = HeatmapConfig::default();
        config.thresholds[4] = 1.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ThresholdOutOfRange(_))
        ));
    }

    #[test]
    fn validation_rejects_bad_padding() {
        let mut config = HeatmapConfig::default();
        config.padding = 1.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidPadding(_))
        ));
    }

    #[test]
    fn toml_round_trips() {
        let config = HeatmapConfig::default();
        let text = config.to_toml().unwrap();
        assert_eq!(HeatmapConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = HeatmapConfig::load_from_path(Path::new("/nonexistent/heatgrid.toml"))
            .unwrap_err();
        assert!(err.to_string().contains("/nonexistent/heatgrid.toml"));
    }
}
