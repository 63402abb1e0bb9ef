use heatgrid_core::events::event_types::{POINTER_ENTER, POINTER_LEAVE, POINTER_MOVE};
use heatgrid_core::{Brush, Color, DrawContext, Event, Rect, Size};
use rustc_hash::FxHashMap;

use crate::axis::{
    build_category_labels, build_month_labels, draw_bottom_labels, draw_left_labels, AxisLabel,
};
use crate::config::{HeatmapConfig, Margin, NullCellPolicy};
use crate::data::{AxisCategories, DataPoint, Dataset};
use crate::format::round_hundredths;
use crate::hover::{HoverController, HoverEvent};
use crate::scale::{CategoryScale, ColorScale};
use crate::ticks::DatedAxis;

/// One rendered cell, in plotting-bounds coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct HeatmapCell {
    /// Index of the source record in the dataset.
    pub record: usize,
    pub x_index: usize,
    pub y_index: usize,
    pub rect: Rect,
    pub fill: Color,
    pub value: Option<f64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct LayoutKey {
    revision: u64,
    width: u32,
    height: u32,
}

impl LayoutKey {
    fn new(revision: u64, width: f32, height: f32) -> Self {
        Self {
            revision,
            width: width.to_bits(),
            height: height.to_bits(),
        }
    }
}

/// Everything derived from `(dataset, width, height)`.
#[derive(Clone, Debug)]
pub struct HeatmapLayout {
    key: LayoutKey,
    bounds: Size,
    x: CategoryScale,
    y: CategoryScale,
    dated: Option<DatedAxis>,
    cells: Vec<HeatmapCell>,
    // (x_index, y_index) -> cell; later records win like later shapes on top
    cell_at: FxHashMap<(usize, usize), usize>,
    x_labels: Vec<AxisLabel>,
    y_labels: Vec<AxisLabel>,
}

impl HeatmapLayout {
    pub fn bounds(&self) -> Size {
        self.bounds
    }

    pub fn x_scale(&self) -> &CategoryScale {
        &self.x
    }

    pub fn y_scale(&self) -> &CategoryScale {
        &self.y
    }

    /// Parsed x axis, `None` when the x categories are not dates.
    pub fn dated_axis(&self) -> Option<&DatedAxis> {
        self.dated.as_ref()
    }

    pub fn cells(&self) -> &[HeatmapCell] {
        &self.cells
    }

    pub fn cell_at(&self, x_index: usize, y_index: usize) -> Option<&HeatmapCell> {
        self.cell_at
            .get(&(x_index, y_index))
            .and_then(|&i| self.cells.get(i))
    }

    pub fn x_labels(&self) -> &[AxisLabel] {
        &self.x_labels
    }

    pub fn y_labels(&self) -> &[AxisLabel] {
        &self.y_labels
    }
}

// Zero and NaN count as "no data" for fills and hover values.
fn has_signal(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0 && !v.is_nan())
}

/// A single heatmap surface: grid renderer plus its hover state.
pub struct HeatmapChartModel {
    data: Dataset,
    revision: u64,
    width: f32,
    height: f32,
    config: HeatmapConfig,
    color_scale: ColorScale,
    layout: Option<HeatmapLayout>,
    layout_builds: u64,
    hover: HoverController,
}

impl HeatmapChartModel {
    pub fn new(
        data: Dataset,
        width: f32,
        height: f32,
        config: HeatmapConfig,
    ) -> anyhow::Result<Self> {
        config.validate()?;
        anyhow::ensure!(
            width.is_finite() && height.is_finite() && width >= 0.0 && height >= 0.0,
            "HeatmapChartModel requires a finite, non-negative surface size"
        );
        let color_scale = ColorScale::for_dataset(&data, &config.thresholds, &config.colors)?;
        Ok(Self {
            data,
            revision: 0,
            width,
            height,
            config,
            color_scale,
            layout: None,
            layout_builds: 0,
            hover: HoverController::new(),
        })
    }

    pub fn data(&self) -> &[DataPoint] {
        &self.data
    }

    /// Replace the dataset. Layout and color scale are rebuilt lazily.
    pub fn set_data(&mut self, data: Dataset) -> anyhow::Result<()> {
        let color_scale =
            ColorScale::for_dataset(&data, &self.config.thresholds, &self.config.colors)?;
        self.data = data;
        self.color_scale = color_scale;
        self.revision += 1;
        tracing::debug!(
            records = self.data.len(),
            max = self.color_scale.max(),
            "heatmap color scale rebuilt"
        );
        Ok(())
    }

    pub fn config(&self) -> &HeatmapConfig {
        &self.config
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn set_size(&mut self, width: f32, height: f32) {
        if width.is_finite() && height.is_finite() {
            self.width = width.max(0.0);
            self.height = height.max(0.0);
        }
    }

    /// Drawing area inside the margins.
    pub fn bounds(&self) -> Size {
        let m = self.config.margin;
        Size::new(
            (self.width - m.left - m.right).max(0.0),
            (self.height - m.top - m.bottom).max(0.0),
        )
    }

    pub fn color_scale(&self) -> &ColorScale {
        &self.color_scale
    }

    pub fn hover(&self) -> &HoverController {
        &self.hover
    }

    pub fn hover_mut(&mut self) -> &mut HoverController {
        &mut self.hover
    }

    /// How many times the layout has been (re)built.
    pub fn layout_builds(&self) -> u64 {
        self.layout_builds
    }

    pub fn layout(&mut self) -> &HeatmapLayout {
        let key = self.layout_key();
        let layout = match self.layout.take() {
            Some(layout) if layout.key == key => layout,
            _ => self.build_layout(key),
        };
        self.layout.insert(layout)
    }

    fn layout_key(&self) -> LayoutKey {
        LayoutKey::new(self.revision, self.width, self.height)
    }

    fn refresh_layout(&mut self) {
        let _ = self.layout();
    }

    fn build_layout(&mut self, key: LayoutKey) -> HeatmapLayout {
        let bounds = self.bounds();
        let padding = self.config.padding;
        let x = CategoryScale::new(AxisCategories::x_of(&self.data), 0.0, bounds.width, padding);
        let y = CategoryScale::new(AxisCategories::y_of(&self.data), 0.0, bounds.height, padding);

        let dated = match DatedAxis::parse(x.categories()) {
            Ok(axis) => Some(axis),
            Err(err) => {
                tracing::debug!(%err, "x categories are not dates; month labels disabled");
                None
            }
        };

        let mut cells = Vec::with_capacity(self.data.len());
        let mut cell_at = FxHashMap::default();
        for (record, d) in self.data.iter().enumerate() {
            if d.value.is_none() && self.config.null_cells == NullCellPolicy::Skip {
                continue;
            }

            let x_pos = x.index_of(&d.x).and_then(|i| Some((i, x.band().band_start(i)?)));
            let y_pos = y.index_of(&d.y).and_then(|i| Some((i, y.band().band_start(i)?)));
            let (Some((x_index, px)), Some((y_index, py))) = (x_pos, y_pos) else {
                tracing::warn!(record, x = %d.x, y = %d.y, "skipping record with unresolved position");
                continue;
            };

            let fill = match has_signal(d.value) {
                Some(v) => self.color_scale.map(v),
                None => self.config.placeholder_color,
            };

            cell_at.insert((x_index, y_index), cells.len());
            cells.push(HeatmapCell {
                record,
                x_index,
                y_index,
                rect: Rect::new(px, py, x.bandwidth(), y.bandwidth()),
                fill,
                value: d.value,
            });
        }

        let x_labels = dated
            .as_ref()
            .map(|axis| build_month_labels(axis, &x, bounds.height))
            .unwrap_or_default();
        let y_labels = build_category_labels(&y);

        self.layout_builds += 1;
        tracing::debug!(
            records = self.data.len(),
            x_categories = x.categories().len(),
            y_categories = y.categories().len(),
            cells = cells.len(),
            "heatmap layout rebuilt"
        );

        HeatmapLayout {
            key,
            bounds,
            x,
            y,
            dated,
            cells,
            cell_at,
            x_labels,
            y_labels,
        }
    }

    fn hover_event(
        data: &[DataPoint],
        layout: &HeatmapLayout,
        cell: &HeatmapCell,
        margin: Margin,
    ) -> HoverEvent {
        let bw_x = layout.x.bandwidth();
        let (x_label, y_label) = data
            .get(cell.record)
            .map(|d| (d.x.clone(), d.y.clone()))
            .unwrap_or_default();
        HoverEvent {
            x_label,
            y_label,
            x_pos: cell.rect.x() + bw_x + margin.left,
            // the y anchor is offset by half the x bandwidth as well
            y_pos: cell.rect.y() + bw_x / 2.0 + margin.top,
            value: has_signal(cell.value).map(round_hundredths),
        }
    }

    /// Pointer entered the cell at `cell_index` in [`HeatmapLayout::cells`].
    pub fn pointer_enter_cell(&mut self, cell_index: usize) -> bool {
        self.refresh_layout();
        let Some(layout) = self.layout.as_ref() else {
            return false;
        };
        let Some(cell) = layout.cells.get(cell_index) else {
            return false;
        };
        let event = Self::hover_event(&self.data, layout, cell, self.config.margin);
        self.hover.set_hover(event)
    }

    /// Surface-local pointer position. Gaps and margins leave the hover state alone.
    pub fn on_mouse_move(&mut self, local_x: f32, local_y: f32) -> bool {
        self.refresh_layout();
        let Some(layout) = self.layout.as_ref() else {
            return false;
        };
        let m = self.config.margin;
        let (Some(xi), Some(yi)) = (
            layout.x.index_at(local_x - m.left),
            layout.y.index_at(local_y - m.top),
        ) else {
            return false;
        };
        let Some(cell) = layout.cell_at(xi, yi) else {
            return false;
        };
        let event = Self::hover_event(&self.data, layout, cell, m);
        self.hover.set_hover(event)
    }

    /// Pointer left the whole surface.
    pub fn on_mouse_leave(&mut self) -> bool {
        self.hover.clear()
    }

    /// Route a host pointer event. Returns `true` when the hover state changed.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        match event.event_type {
            POINTER_MOVE | POINTER_ENTER => match event.position() {
                Some((x, y)) => self.on_mouse_move(x, y),
                None => false,
            },
            POINTER_LEAVE => self.on_mouse_leave(),
            _ => false,
        }
    }

    pub fn render(&mut self, ctx: &mut dyn DrawContext) {
        self.refresh_layout();
        let Some(layout) = self.layout.as_ref() else {
            return;
        };
        let config = &self.config;

        ctx.push_translate(config.margin.left, config.margin.top);
        for cell in &layout.cells {
            ctx.fill_rect(cell.rect, 0.0.into(), Brush::Solid(cell.fill));
        }
        draw_bottom_labels(ctx, &layout.x_labels, config.label_font_size, config.label_color);
        draw_left_labels(ctx, &layout.y_labels, config.label_font_size, config.label_color);
        ctx.pop_transform();
    }
}
