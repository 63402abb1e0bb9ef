//! Stacked heatmap blocks.
//!
//! Each block owns its own chart model, color scale and hover slot. Nothing is
//! shared between blocks: hovering one never touches the other.

use heatgrid_core::events::event_types::{POINTER_ENTER, POINTER_LEAVE, POINTER_MOVE};
use heatgrid_core::{DrawContext, Event, FontWeight, Point, Rect, Size, TextBaseline, TextStyle};

use crate::config::HeatmapConfig;
use crate::data::Dataset;
use crate::heatmap::HeatmapChartModel;
use crate::hover::HoverEvent;
use crate::scale::ColorScale;

/// Receives the hover state of one block together with its surface size.
pub trait Tooltip {
    fn update(&mut self, hover: Option<&HoverEvent>, surface: Size);
}

/// Receives a block's color scale and hover state, plus the legend's own size.
pub trait ColorLegend {
    fn update(&mut self, scale: &ColorScale, hover: Option<&HoverEvent>, size: Size);
}

/// Where a block's parts sit in board coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlockLayout {
    pub title_origin: Point,
    pub surface: Rect,
    pub legend: Rect,
}

pub struct HeatmapBlock {
    title: String,
    chart: HeatmapChartModel,
    tooltip: Option<Box<dyn Tooltip + Send>>,
    legend: Option<Box<dyn ColorLegend + Send>>,
}

impl HeatmapBlock {
    pub fn new(title: impl Into<String>, chart: HeatmapChartModel) -> Self {
        Self {
            title: title.into(),
            chart,
            tooltip: None,
            legend: None,
        }
    }

    pub fn with_tooltip(mut self, tooltip: impl Tooltip + Send + 'static) -> Self {
        self.set_tooltip(tooltip);
        self
    }

    pub fn with_legend(mut self, legend: impl ColorLegend + Send + 'static) -> Self {
        self.set_legend(legend);
        self
    }

    /// Attach a tooltip. It immediately receives the current hover state.
    pub fn set_tooltip(&mut self, tooltip: impl Tooltip + Send + 'static) {
        self.tooltip = Some(Box::new(tooltip));
        self.sync_tooltip();
    }

    /// Attach a legend. It immediately receives the block's color scale.
    pub fn set_legend(&mut self, legend: impl ColorLegend + Send + 'static) {
        self.legend = Some(Box::new(legend));
        self.sync_legend();
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn chart(&self) -> &HeatmapChartModel {
        &self.chart
    }

    /// Direct access to the chart. Hover changes made here bypass the
    /// collaborators; use the block's pointer methods for those.
    pub fn chart_mut(&mut self) -> &mut HeatmapChartModel {
        &mut self.chart
    }

    pub fn hover(&self) -> Option<&HoverEvent> {
        self.chart.hover().current()
    }

    /// Replace the dataset and refresh the collaborators with the new scale.
    pub fn set_data(&mut self, data: Dataset) -> anyhow::Result<()> {
        self.chart.set_data(data)?;
        self.sync_collaborators();
        Ok(())
    }

    /// Surface-local pointer event. Collaborators hear about every change.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        let changed = self.chart.handle_event(event);
        if changed {
            self.sync_collaborators();
        }
        changed
    }

    /// Host-side hit testing: hover the cell at `cell_index` and notify the
    /// collaborators when the state changed.
    pub fn pointer_enter_cell(&mut self, cell_index: usize) -> bool {
        let changed = self.chart.pointer_enter_cell(cell_index);
        if changed {
            self.sync_collaborators();
        }
        changed
    }

    /// Pointer left the surface.
    pub fn pointer_leave(&mut self) -> bool {
        let changed = self.chart.on_mouse_leave();
        if changed {
            self.sync_collaborators();
        }
        changed
    }

    fn sync_collaborators(&mut self) {
        self.sync_tooltip();
        self.sync_legend();
    }

    fn sync_tooltip(&mut self) {
        if let Some(tooltip) = self.tooltip.as_mut() {
            tooltip.update(self.chart.hover().current(), self.chart.size());
        }
    }

    fn sync_legend(&mut self) {
        let hover = self.chart.hover().current();
        if let Some(legend) = self.legend.as_mut() {
            let board = &self.chart.config().board;
            legend.update(
                self.chart.color_scale(),
                hover,
                Size::new(board.legend_width, board.legend_height),
            );
        }
    }
}

/// One or two heatmap blocks stacked vertically.
pub struct HeatmapBoard {
    width: f32,
    blocks: Vec<HeatmapBlock>,
    layouts: Vec<BlockLayout>,
    total_height: f32,
    title_style: TextStyle,
}

impl HeatmapBoard {
    /// Build a block per dataset. `height` is the per-block height including
    /// the legend allowance.
    pub fn compose(
        width: f32,
        height: f32,
        primary: Dataset,
        secondary: Option<Dataset>,
        config: &HeatmapConfig,
    ) -> anyhow::Result<Self> {
        let board = &config.board;
        anyhow::ensure!(
            width.is_finite() && width > 0.0,
            "HeatmapBoard requires a positive width"
        );
        anyhow::ensure!(
            height.is_finite() && height > board.legend_height,
            "HeatmapBoard height {height} leaves no room above the {} px legend",
            board.legend_height
        );

        let surface_height = height - board.legend_height;
        let mut blocks = Vec::with_capacity(2);
        blocks.push(HeatmapBlock::new(
            board.primary_title.clone(),
            HeatmapChartModel::new(primary, width, surface_height, config.clone())?,
        ));
        if let Some(secondary) = secondary {
            blocks.push(HeatmapBlock::new(
                board.secondary_title.clone(),
                HeatmapChartModel::new(secondary, width, surface_height, config.clone())?,
            ));
        }

        let title_style = TextStyle::new(board.title_font_size)
            .with_color(config.label_color)
            .with_weight(FontWeight::Bold)
            .with_baseline(TextBaseline::Hanging);

        let mut y = 0.0;
        let mut layouts = Vec::with_capacity(blocks.len());
        for _ in &blocks {
            let title_origin = Point::new(0.0, y);
            y += board.title_font_size + board.title_gap;
            let surface = Rect::new(0.0, y, width, surface_height);
            y += surface_height;
            let legend = Rect::new(
                ((width - board.legend_width) * 0.5).max(0.0),
                y,
                board.legend_width,
                board.legend_height,
            );
            y += board.legend_height + board.block_gap;
            layouts.push(BlockLayout {
                title_origin,
                surface,
                legend,
            });
        }

        tracing::debug!(blocks = blocks.len(), total_height = y, "heatmap board composed");

        Ok(Self {
            width,
            blocks,
            layouts,
            total_height: y,
            title_style,
        })
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn total_height(&self) -> f32 {
        self.total_height
    }

    pub fn layouts(&self) -> &[BlockLayout] {
        &self.layouts
    }

    pub fn blocks(&self) -> &[HeatmapBlock] {
        &self.blocks
    }

    pub fn block_mut(&mut self, index: usize) -> Option<&mut HeatmapBlock> {
        self.blocks.get_mut(index)
    }

    /// Board-coordinate pointer event.
    ///
    /// The block under the pointer gets a surface-local move; every other
    /// block sees the pointer leave its surface.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        let leave = Event::pointer_leave();
        let mut changed = false;
        for (block, layout) in self.blocks.iter_mut().zip(&self.layouts) {
            let local = match (event.event_type, event.position()) {
                (POINTER_MOVE | POINTER_ENTER, Some((x, y)))
                    if layout.surface.contains(Point::new(x, y)) =>
                {
                    Some(Event::pointer_move(
                        x - layout.surface.x(),
                        y - layout.surface.y(),
                    ))
                }
                (POINTER_MOVE | POINTER_ENTER | POINTER_LEAVE, _) => None,
                _ => continue,
            };
            changed |= block.handle_event(local.as_ref().unwrap_or(&leave));
        }
        changed
    }

    /// Titles and chart surfaces. Legend areas are left to the legend collaborator.
    pub fn render(&mut self, ctx: &mut dyn DrawContext) {
        for (block, layout) in self.blocks.iter_mut().zip(&self.layouts) {
            ctx.draw_text(&block.title, layout.title_origin, &self.title_style);
            ctx.push_translate(layout.surface.x(), layout.surface.y());
            block.chart.render(ctx);
            ctx.pop_transform();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use heatgrid_core::DrawCommands;

    use super::*;
    use crate::data::DataPoint;

    fn dataset(max: f64) -> Dataset {
        vec![
            DataPoint::new("2024-01-01", "a", Some(max)),
            DataPoint::new("2024-01-02", "a", Some(10.0)),
        ]
    }

    #[test]
    fn layouts_stack_title_surface_and_legend() {
        let config = HeatmapConfig::default();
        let board =
            HeatmapBoard::compose(400.0, 250.0, dataset(100.0), Some(dataset(10.0)), &config)
                .unwrap();

        let layouts = board.layouts();
        assert_eq!(layouts.len(), 2);
        assert_eq!(layouts[0].title_origin, Point::new(0.0, 0.0));
        assert_eq!(layouts[0].surface, Rect::new(0.0, 26.0, 400.0, 200.0));
        assert_eq!(layouts[0].legend, Rect::new(100.0, 226.0, 200.0, 50.0));
        assert_eq!(layouts[1].title_origin, Point::new(0.0, 316.0));
        assert_eq!(board.total_height(), 632.0);
        assert_eq!(board.blocks()[1].title(), "Second Heatmap");
    }

    #[test]
    fn single_block_without_secondary() {
        let board = HeatmapBoard::compose(
            400.0,
            250.0,
            dataset(1.0),
            None,
            &HeatmapConfig::default(),
        )
        .unwrap();
        assert_eq!(board.blocks().len(), 1);
        assert_eq!(board.blocks()[0].title(), "Daily Averages Heatmap");
    }

    #[test]
    fn height_must_exceed_legend() {
        let config = HeatmapConfig::default();
        assert!(HeatmapBoard::compose(400.0, 50.0, dataset(1.0), None, &config).is_err());
    }

    #[test]
    fn blocks_keep_independent_color_scales_and_hover() {
        let config = HeatmapConfig::default();
        let mut board =
            HeatmapBoard::compose(400.0, 250.0, dataset(100.0), Some(dataset(10.0)), &config)
                .unwrap();

        let first = board.blocks()[0].chart().color_scale().map(10.0);
        let second = board.blocks()[1].chart().color_scale().map(10.0);
        assert_ne!(first, second);

        let cell = {
            let block = board.block_mut(0).unwrap();
            block.chart_mut().layout().cells()[0].rect.center()
        };
        let surface = board.layouts()[0].surface;
        let margin = config.margin;
        let at = Event::pointer_move(
            surface.x() + margin.left + cell.x,
            surface.y() + margin.top + cell.y,
        );
        assert!(board.handle_event(&at));
        assert!(board.blocks()[0].hover().is_some());
        assert!(board.blocks()[1].hover().is_none());

        // moving into the second block's surface leaves the first
        let second_surface = board.layouts()[1].surface;
        board.handle_event(&Event::pointer_move(1.0, second_surface.y() + 1.0));
        assert!(board.blocks()[0].hover().is_none());

        board.handle_event(&Event::pointer_leave());
        assert!(board.blocks().iter().all(|b| b.hover().is_none()));
    }

    #[derive(Clone, Default)]
    struct Recorder(Arc<Mutex<Vec<(Option<String>, Size)>>>);

    impl Tooltip for Recorder {
        fn update(&mut self, hover: Option<&HoverEvent>, surface: Size) {
            self.0
                .lock()
                .unwrap()
                .push((hover.map(|h| h.x_label.clone()), surface));
        }
    }

    impl ColorLegend for Recorder {
        fn update(&mut self, scale: &ColorScale, hover: Option<&HoverEvent>, size: Size) {
            assert_eq!(scale.max(), 100.0);
            self.0
                .lock()
                .unwrap()
                .push((hover.and_then(|h| h.value).map(|v| v.to_string()), size));
        }
    }

    #[test]
    fn collaborators_follow_hover_changes() {
        let config = HeatmapConfig::default();
        let chart = HeatmapChartModel::new(dataset(100.0), 300.0, 200.0, config).unwrap();
        let tooltip = Recorder::default();
        let legend = Recorder::default();
        let mut block = HeatmapBlock::new("t", chart)
            .with_tooltip(tooltip.clone())
            .with_legend(legend.clone());

        let cell = block.chart_mut().layout().cells()[1].rect.center();
        assert!(block.handle_event(&Event::pointer_move(cell.x + 60.0, cell.y + 10.0)));
        assert!(!block.handle_event(&Event::pointer_move(cell.x + 60.0, cell.y + 10.0)));
        assert!(block.handle_event(&Event::pointer_leave()));

        let tooltip = tooltip.0.lock().unwrap();
        assert_eq!(
            *tooltip,
            vec![
                (None, Size::new(300.0, 200.0)),
                (Some("2024-01-02".to_string()), Size::new(300.0, 200.0)),
                (None, Size::new(300.0, 200.0)),
            ]
        );
        let legend = legend.0.lock().unwrap();
        assert_eq!(legend[1], (Some("10".to_string()), Size::new(200.0, 50.0)));
        assert_eq!(legend.len(), 3);
    }

    #[test]
    fn attached_legend_receives_scale_before_any_hover() {
        let config = HeatmapConfig::default();
        let chart = HeatmapChartModel::new(dataset(100.0), 300.0, 200.0, config).unwrap();
        let legend = Recorder::default();
        let mut block = HeatmapBlock::new("t", chart);
        block.set_legend(legend.clone());

        // Recorder::update asserts the scale max is the dataset max
        assert_eq!(
            *legend.0.lock().unwrap(),
            vec![(None, Size::new(200.0, 50.0))]
        );
    }

    #[test]
    fn host_hit_testing_reaches_collaborators() {
        let config = HeatmapConfig::default();
        let chart = HeatmapChartModel::new(dataset(100.0), 300.0, 200.0, config).unwrap();
        let tooltip = Recorder::default();
        let legend = Recorder::default();
        let mut block = HeatmapBlock::new("t", chart)
            .with_tooltip(tooltip.clone())
            .with_legend(legend.clone());

        assert!(block.pointer_enter_cell(0));
        assert!(!block.pointer_enter_cell(0));
        assert!(!block.pointer_enter_cell(99));
        assert_eq!(block.hover().and_then(|h| h.value), Some(100.0));

        assert_eq!(
            tooltip.0.lock().unwrap().last(),
            Some(&(Some("2024-01-01".to_string()), Size::new(300.0, 200.0)))
        );
        assert_eq!(
            legend.0.lock().unwrap().last(),
            Some(&(Some("100".to_string()), Size::new(200.0, 50.0)))
        );

        assert!(block.pointer_leave());
        assert_eq!(tooltip.0.lock().unwrap().len(), 3);
        assert_eq!(legend.0.lock().unwrap().last(), Some(&(None, Size::new(200.0, 50.0))));
    }

    #[test]
    fn render_draws_bold_titles_and_translated_surfaces() {
        let config = HeatmapConfig::default();
        let mut board =
            HeatmapBoard::compose(400.0, 250.0, dataset(100.0), Some(dataset(10.0)), &config)
                .unwrap();
        let mut cmds = DrawCommands::new();
        board.render(&mut cmds);

        assert_eq!(cmds.depth(), 0);
        let titles: Vec<_> = cmds
            .texts()
            .filter(|(_, _, style)| style.weight == FontWeight::Bold)
            .map(|(text, _, _)| text)
            .collect();
        assert_eq!(titles, vec!["Daily Averages Heatmap", "Second Heatmap"]);
        assert_eq!(cmds.rects().count(), 4);
    }
}
