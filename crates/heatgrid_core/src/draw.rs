//! Drawing primitives
//!
//! Charts render through [`DrawContext`] so the same layout code can target an
//! SVG writer, a GPU canvas, or the [`DrawCommands`] recorder used in tests.
//! The primitive set is deliberately small: translated groups, filled
//! rectangles and text runs.

use crate::color::Color;
use crate::geometry::{Point, Rect};

/// Brush for filling shapes
#[derive(Clone, Debug, PartialEq)]
pub enum Brush {
    Solid(Color),
}

impl Brush {
    pub fn color(&self) -> Color {
        match self {
            Brush::Solid(c) => *c,
        }
    }
}

impl From<Color> for Brush {
    fn from(color: Color) -> Self {
        Brush::Solid(color)
    }
}

/// Corner radius for rounded rectangles
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CornerRadius(pub f32);

impl From<f32> for CornerRadius {
    fn from(radius: f32) -> Self {
        CornerRadius(radius)
    }
}

/// Horizontal text anchoring relative to the text origin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAnchor {
    #[default]
    Start,
    Middle,
    End,
}

/// Vertical text anchoring relative to the text origin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextBaseline {
    #[default]
    Alphabetic,
    Middle,
    Hanging,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub color: Color,
    pub weight: FontWeight,
    pub anchor: TextAnchor,
    pub baseline: TextBaseline,
}

impl TextStyle {
    pub fn new(size: f32) -> Self {
        Self {
            size,
            color: Color::BLACK,
            weight: FontWeight::Normal,
            anchor: TextAnchor::Start,
            baseline: TextBaseline::Alphabetic,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_weight(mut self, weight: FontWeight) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn with_baseline(mut self, baseline: TextBaseline) -> Self {
        self.baseline = baseline;
        self
    }
}

/// A 2D drawing surface.
///
/// Transforms nest: every `push_translate` must be matched by a
/// `pop_transform`.
pub trait DrawContext {
    fn push_translate(&mut self, dx: f32, dy: f32);

    fn pop_transform(&mut self);

    fn fill_rect(&mut self, rect: Rect, radius: CornerRadius, brush: Brush);

    fn draw_text(&mut self, text: &str, origin: Point, style: &TextStyle);
}

/// A single recorded drawing operation.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    PushTranslate { dx: f32, dy: f32 },
    PopTransform,
    FillRect {
        rect: Rect,
        radius: CornerRadius,
        brush: Brush,
    },
    Text {
        text: String,
        origin: Point,
        style: TextStyle,
    },
}

/// Records draw calls in emission order.
#[derive(Clone, Debug, Default)]
pub struct DrawCommands {
    commands: Vec<DrawCommand>,
    depth: usize,
}

impl DrawCommands {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Current transform nesting depth.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn clear(&mut self) {
        self.commands.clear();
        self.depth = 0;
    }

    /// Replay every recorded command onto another context.
    pub fn replay(&self, ctx: &mut dyn DrawContext) {
        for cmd in &self.commands {
            match cmd {
                DrawCommand::PushTranslate { dx, dy } => ctx.push_translate(*dx, *dy),
                DrawCommand::PopTransform => ctx.pop_transform(),
                DrawCommand::FillRect {
                    rect,
                    radius,
                    brush,
                } => ctx.fill_rect(*rect, *radius, brush.clone()),
                DrawCommand::Text {
                    text,
                    origin,
                    style,
                } => ctx.draw_text(text, *origin, style),
            }
        }
    }

    pub fn rects(&self) -> impl Iterator<Item = (&Rect, &Brush)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::FillRect { rect, brush, .. } => Some((rect, brush)),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = (&str, &Point, &TextStyle)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text {
                text,
                origin,
                style,
            } => Some((text.as_str(), origin, style)),
            _ => None,
        })
    }
}

impl DrawContext for DrawCommands {
    fn push_translate(&mut self, dx: f32, dy: f32) {
        self.depth += 1;
        self.commands.push(DrawCommand::PushTranslate { dx, dy });
    }

    fn pop_transform(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.commands.push(DrawCommand::PopTransform);
    }

    fn fill_rect(&mut self, rect: Rect, radius: CornerRadius, brush: Brush) {
        self.commands.push(DrawCommand::FillRect {
            rect,
            radius,
            brush,
        });
    }

    fn draw_text(&mut self, text: &str, origin: Point, style: &TextStyle) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            origin,
            style: style.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recorder_tracks_depth_and_order() {
        let mut cmds = DrawCommands::new();
        cmds.push_translate(5.0, 6.0);
        assert_eq!(cmds.depth(), 1);
        cmds.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), 0.0.into(), Color::WHITE.into());
        cmds.draw_text("a", Point::ZERO, &TextStyle::new(10.0));
        cmds.pop_transform();
        assert_eq!(cmds.depth(), 0);

        assert_eq!(cmds.commands().len(), 4);
        assert_eq!(cmds.rects().count(), 1);
        assert_eq!(cmds.texts().next().map(|(t, _, _)| t), Some("a"));
    }

    #[test]
    fn replay_reproduces_commands() {
        let mut a = DrawCommands::new();
        a.push_translate(1.0, 2.0);
        a.draw_text("x", Point::new(3.0, 4.0), &TextStyle::new(12.0));
        a.pop_transform();

        let mut b = DrawCommands::new();
        a.replay(&mut b);
        assert_eq!(a.commands(), b.commands());
    }
}
