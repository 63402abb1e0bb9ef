//! SVG output.
//!
//! `SvgDocument` is a [`DrawContext`] that writes SVG markup. Translations
//! become nested `<g transform>` groups.

use std::fmt::Write as _;

use heatgrid_core::{
    Brush, CornerRadius, DrawContext, FontWeight, Point, Rect, TextAnchor, TextBaseline,
    TextStyle,
};

use crate::board::HeatmapBoard;
use crate::format::format_px;
use crate::heatmap::HeatmapChartModel;

#[derive(Clone, Debug)]
pub struct SvgDocument {
    width: f32,
    height: f32,
    body: String,
    depth: usize,
}

impl SvgDocument {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            body: String::new(),
            depth: 0,
        }
    }

    fn indent(&mut self) {
        for _ in 0..=self.depth {
            self.body.push_str("  ");
        }
    }

    /// Close any open groups and wrap the body in an `<svg>` element.
    pub fn finish(mut self) -> String {
        while self.depth > 0 {
            self.pop_transform();
        }
        let (w, h) = (format_px(self.width), format_px(self.height));
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n{}</svg>\n",
            self.body
        )
    }
}

fn anchor_attr(anchor: TextAnchor) -> &'static str {
    match anchor {
        TextAnchor::Start => "start",
        TextAnchor::Middle => "middle",
        TextAnchor::End => "end",
    }
}

fn baseline_attr(baseline: TextBaseline) -> &'static str {
    match baseline {
        TextBaseline::Alphabetic => "alphabetic",
        TextBaseline::Middle => "middle",
        TextBaseline::Hanging => "hanging",
    }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

impl DrawContext for SvgDocument {
    fn push_translate(&mut self, dx: f32, dy: f32) {
        self.indent();
        let _ = writeln!(
            self.body,
            "<g transform=\"translate({},{})\">",
            format_px(dx),
            format_px(dy)
        );
        self.depth += 1;
    }

    fn pop_transform(&mut self) {
        if self.depth == 0 {
            tracing::warn!("unbalanced pop_transform ignored");
            return;
        }
        self.depth -= 1;
        self.indent();
        self.body.push_str("</g>\n");
    }

    fn fill_rect(&mut self, rect: Rect, radius: CornerRadius, brush: Brush) {
        self.indent();
        let _ = write!(
            self.body,
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"",
            format_px(rect.x()),
            format_px(rect.y()),
            format_px(rect.width()),
            format_px(rect.height())
        );
        if radius.0 > 0.0 {
            let _ = write!(self.body, " rx=\"{}\"", format_px(radius.0));
        }
        let _ = writeln!(self.body, " fill=\"{}\"/>", brush.color().to_css());
    }

    fn draw_text(&mut self, text: &str, origin: Point, style: &TextStyle) {
        self.indent();
        let _ = write!(
            self.body,
            "<text x=\"{}\" y=\"{}\" text-anchor=\"{}\" dominant-baseline=\"{}\" font-size=\"{}\" fill=\"{}\"",
            format_px(origin.x),
            format_px(origin.y),
            anchor_attr(style.anchor),
            baseline_attr(style.baseline),
            format_px(style.size),
            style.color.to_css()
        );
        if style.weight == FontWeight::Bold {
            self.body.push_str(" font-weight=\"bold\"");
        }
        let _ = writeln!(self.body, ">{}</text>", escape_xml(text));
    }
}

/// One chart surface as a standalone SVG document.
pub fn render_chart_svg(chart: &mut HeatmapChartModel) -> String {
    let size = chart.size();
    let mut doc = SvgDocument::new(size.width, size.height);
    chart.render(&mut doc);
    doc.finish()
}

/// The whole board, sized to its stacked height.
pub fn render_board_svg(board: &mut HeatmapBoard) -> String {
    let mut doc = SvgDocument::new(board.width(), board.total_height());
    board.render(&mut doc);
    doc.finish()
}
