//! heatgrid_charts
//!
//! Categorical heatmaps: a cell grid over string-labelled x and y axes, colored
//! by a threshold color scale derived from the dataset maximum.
//!
//! Design goals:
//! - Pure models that render into any [`heatgrid_core::DrawContext`]
//! - Derived layout cached on `(data revision, width, height)`; pointer events never rebuild it
//! - One hover slot per chart, pushed synchronously to tooltip and legend collaborators
//!
//! # Example
//!
//! ```rust
//! use heatgrid_charts::prelude::*;
//!
//! let data = vec![
//!     DataPoint::new("2024-01-05", "r", Some(12.345)),
//!     DataPoint::new("2024-02-01", "r", Some(4.0)),
//! ];
//! let mut chart = HeatmapChartModel::new(data, 300.0, 120.0, HeatmapConfig::default())?;
//! chart.pointer_enter_cell(0);
//! assert_eq!(chart.hover().current().and_then(|h| h.value), Some(12.35));
//!
//! let svg = render_chart_svg(&mut chart);
//! assert!(svg.contains("Feb 2024"));
//! # Ok::<(), anyhow::Error>(())
//! ```

mod format;

pub mod axis;
pub mod board;
pub mod config;
pub mod data;
pub mod heatmap;
pub mod hover;
pub mod scale;
pub mod svg;
pub mod ticks;

pub use format::{format_hover_value, round_half_up, round_hundredths};

/// Common imports for chart users.
pub mod prelude {
    pub use crate::board::{BlockLayout, ColorLegend, HeatmapBlock, HeatmapBoard, Tooltip};
    pub use crate::config::{BoardConfig, ConfigError, HeatmapConfig, Margin, NullCellPolicy};
    pub use crate::data::{
        dataset_from_json, dataset_from_reader, max_value, AxisCategories, DataPoint, Dataset,
    };
    pub use crate::heatmap::{HeatmapCell, HeatmapChartModel, HeatmapLayout};
    pub use crate::hover::{HoverController, HoverEvent, ListenerId};
    pub use crate::scale::{BandScale, CategoryScale, ColorScale};
    pub use crate::svg::{render_board_svg, render_chart_svg, SvgDocument};
    pub use crate::ticks::{AxisError, DatedAxis, MonthTick, MonthTicks};
}
