//! heatgrid board demo: renders one or two heatmaps to SVG
//!
//! Run with:
//! `cargo run -p heatgrid_charts --example render_board -- [primary.json] [secondary.json]`
//!
//! Optional:
//! - `HEATGRID_CONFIG` path to a heatgrid.toml (file or directory)
//! - `HEATGRID_OUT` output path (default: heatgrid.svg)
//! - `RUST_LOG` log filter, e.g. `heatgrid_charts=debug`
//!
//! Without arguments a synthetic 120-day dataset is rendered.

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};
use heatgrid_charts::prelude::*;
use heatgrid_core::{Event, Size};
use tracing_subscriber::EnvFilter;

struct LogTooltip;

impl Tooltip for LogTooltip {
    fn update(&mut self, hover: Option<&HoverEvent>, surface: Size) {
        match hover {
            Some(h) => tracing::info!(
                x = %h.x_label,
                y = %h.y_label,
                value = %h.value_text(),
                anchor_x = h.x_pos,
                anchor_y = h.y_pos,
                surface_w = surface.width,
                "tooltip"
            ),
            None => tracing::info!("tooltip hidden"),
        }
    }
}

fn synthetic(rows: &[&str], days: i64, scale: f64) -> Dataset {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default();
    let mut out = Vec::with_capacity(rows.len() * days as usize);
    for (r, row) in rows.iter().enumerate() {
        for d in 0..days {
            let date = start + Duration::days(d);
            let phase = d as f64 / 9.0 + r as f64;
            // every 17th day has no reading
            let value = (d % 17 != 16).then(|| (phase.sin() + 1.0) * 0.5 * scale);
            out.push(DataPoint::new(date.format("%Y-%m-%d").to_string(), *row, value));
        }
    }
    out
}

fn load(path: &Path) -> Result<Dataset> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    dataset_from_reader(file)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match std::env::var_os("HEATGRID_CONFIG") {
        Some(path) => HeatmapConfig::load_from_path(Path::new(&path))?,
        None => HeatmapConfig::default(),
    };

    let args: Vec<PathBuf> = std::env::args_os().skip(1).map(PathBuf::from).collect();
    let (primary, secondary) = match args.as_slice() {
        [] => (
            synthetic(&["north", "east", "south", "west"], 120, 40.0),
            Some(synthetic(&["north", "east", "south", "west"], 120, 4.0)),
        ),
        [p] => (load(p)?, None),
        [p, s, ..] => (load(p)?, Some(load(s)?)),
    };

    let mut board = HeatmapBoard::compose(960.0, 260.0, primary, secondary, &config)?;
    if let Some(block) = board.block_mut(0) {
        block.set_tooltip(LogTooltip);
    }

    // one synthetic pointer pass over the first block
    let surface = board.layouts()[0].surface;
    let probe = (
        surface.x() + config.margin.left + 2.0,
        surface.y() + config.margin.top + 2.0,
    );
    board.handle_event(&Event::pointer_move(probe.0, probe.1));
    board.handle_event(&Event::pointer_leave());

    let out = std::env::var_os("HEATGRID_OUT")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("heatgrid.svg"));
    let svg = render_board_svg(&mut board);
    std::fs::write(&out, svg).with_context(|| format!("writing {}", out.display()))?;
    tracing::info!(path = %out.display(), height = board.total_height(), "board written");
    Ok(())
}
