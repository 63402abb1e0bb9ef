use heatgrid_core::{Color, DrawContext, Point, TextAnchor, TextBaseline, TextStyle};

use crate::scale::CategoryScale;
use crate::ticks::DatedAxis;

// Distance from the bottom of the grid to the top of the x labels.
const X_LABEL_OFFSET_PX: f32 = 15.0;
// Distance from the left edge of the grid to the end of the y labels.
const Y_LABEL_OFFSET_PX: f32 = 5.0;

/// A positioned axis label in plotting-bounds coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisLabel {
    pub text: String,
    pub origin: Point,
}

/// One "Mon YYYY" label per month tick, centered under its band.
pub fn build_month_labels(
    axis: &DatedAxis,
    x_scale: &CategoryScale,
    bounds_height: f32,
) -> Vec<AxisLabel> {
    let half = x_scale.bandwidth() * 0.5;
    axis.ticks()
        .filter_map(|tick| {
            let x = x_scale.position(tick.label)?;
            Some(AxisLabel {
                text: tick.display(),
                origin: Point::new(x + half, bounds_height + X_LABEL_OFFSET_PX),
            })
        })
        .collect()
}

/// One label per y category, right-aligned just left of the grid.
pub fn build_category_labels(y_scale: &CategoryScale) -> Vec<AxisLabel> {
    let half = y_scale.bandwidth() * 0.5;
    y_scale
        .categories()
        .iter()
        .filter_map(|name| {
            let y = y_scale.position(name)?;
            Some(AxisLabel {
                text: name.to_string(),
                origin: Point::new(-Y_LABEL_OFFSET_PX, y + half),
            })
        })
        .collect()
}

pub fn draw_bottom_labels(
    ctx: &mut dyn DrawContext,
    labels: &[AxisLabel],
    font_size: f32,
    color: Color,
) {
    let style = TextStyle::new(font_size)
        .with_color(color)
        .with_anchor(TextAnchor::Middle)
        .with_baseline(TextBaseline::Hanging);
    for label in labels {
        ctx.draw_text(&label.text, label.origin, &style);
    }
}

pub fn draw_left_labels(
    ctx: &mut dyn DrawContext,
    labels: &[AxisLabel],
    font_size: f32,
    color: Color,
) {
    let style = TextStyle::new(font_size)
        .with_color(color)
        .with_anchor(TextAnchor::End)
        .with_baseline(TextBaseline::Middle);
    for label in labels {
        ctx.draw_text(&label.text, label.origin, &style);
    }
}

#[cfg(test)]
mod tests {
    use heatgrid_core::DrawCommands;

    use super::*;
    use crate::data::AxisCategories;

    #[test]
    fn month_labels_center_under_first_band_of_each_month() {
        let cats = AxisCategories::from_labels(["2024-01-30", "2024-01-31", "2024-02-01"]);
        let axis = DatedAxis::parse(&cats).unwrap();
        let x = CategoryScale::new(cats, 0.0, 300.0, 0.0);

        let labels = build_month_labels(&axis, &x, 200.0);
        assert_eq!(labels.len(), 2);
        assert_eq!(labels[0].text, "Jan 2024");
        assert_eq!(labels[0].origin, Point::new(50.0, 215.0));
        assert_eq!(labels[1].text, "Feb 2024");
        assert_eq!(labels[1].origin, Point::new(250.0, 215.0));
    }

    #[test]
    fn category_labels_sit_left_of_grid() {
        let y = CategoryScale::new(AxisCategories::from_labels(["r1", "r2"]), 0.0, 100.0, 0.0);
        let labels = build_category_labels(&y);
        assert_eq!(labels[1].text, "r2");
        assert_eq!(labels[1].origin, Point::new(-5.0, 75.0));
    }

    #[test]
    fn drawn_labels_carry_alignment() {
        let labels = vec![AxisLabel {
            text: "r".to_string(),
            origin: Point::new(-5.0, 10.0),
        }];
        let mut cmds = DrawCommands::new();
        draw_left_labels(&mut cmds, &labels, 10.0, Color::BLACK);
        let (_, _, style) = cmds.texts().next().unwrap();
        assert_eq!(style.anchor, TextAnchor::End);
        assert_eq!(style.baseline, TextBaseline::Middle);
    }
}
