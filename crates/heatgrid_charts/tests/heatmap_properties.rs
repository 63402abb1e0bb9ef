use heatgrid_charts::prelude::*;
use heatgrid_core::{DrawCommands, Event};

fn cfg() -> HeatmapConfig {
    HeatmapConfig::default()
}

#[test]
fn band_scale_covers_range_in_domain_order() {
    for n in 1..12 {
        let cats = AxisCategories::from_labels((0..n).map(|i| format!("c{i}")));
        let scale = CategoryScale::new(cats, 0.0, 480.0, 0.1);
        let band = scale.band();
        let step = band.step();
        let bw = scale.bandwidth();

        assert!((step * n as f32 - 480.0).abs() < 1e-3);
        assert!((band.band_start(0).unwrap() - step * 0.05).abs() < 1e-3);
        let last_end = band.band_start(n - 1).unwrap() + bw;
        assert!((480.0 - last_end - step * 0.05).abs() < 1e-3);

        for i in 1..n {
            let prev = band.band_start(i - 1).unwrap();
            let cur = band.band_start(i).unwrap();
            assert!(cur >= prev + bw - 1e-4, "bands {i} and {} overlap", i - 1);
        }
    }
}

#[test]
fn color_scale_hits_stops_and_moves_monotonically() {
    let config = cfg();
    let scale = ColorScale::from_thresholds(&config.thresholds, &config.colors, 100.0).unwrap();

    for (t, color) in config.thresholds.iter().zip(&config.colors) {
        assert_eq!(scale.map(t * 100.0).to_rgb8(), color.to_rgb8());
    }

    let (t, c) = (&config.thresholds, &config.colors);
    for i in 0..t.len() - 1 {
        let (a, b) = (c[i].to_array(), c[i + 1].to_array());
        let mut prev = a;
        for k in 1..=20 {
            let v = (t[i] + (t[i + 1] - t[i]) * k as f64 / 20.0) * 100.0;
            let cur = scale.map(v).to_array();
            for ch in 0..3 {
                let dir = (b[ch] - a[ch]).signum();
                assert!((cur[ch] - prev[ch]) * dir >= -1e-6, "channel {ch} reversed at {v}");
            }
            prev = cur;
        }
    }
}

#[test]
fn null_values_never_reach_the_max() {
    let data = dataset_from_json(
        r#"[{"x":"a","y":"r","value":10},{"x":"b","y":"r","value":null}]"#,
    )
    .unwrap();
    assert_eq!(max_value(&data), 10.0);

    let chart = HeatmapChartModel::new(data, 200.0, 100.0, cfg()).unwrap();
    assert_eq!(chart.color_scale().max(), 10.0);
}

#[test]
fn all_null_dataset_degenerates_to_first_color() {
    let data = vec![DataPoint::new("a", "r", None)];
    let config = cfg();
    let chart = HeatmapChartModel::new(data, 200.0, 100.0, config.clone()).unwrap();
    assert_eq!(chart.color_scale().max(), 0.0);
    assert_eq!(chart.color_scale().map(5.0), config.colors[0]);
}

#[test]
fn month_ticks_at_transitions() {
    let cats = AxisCategories::from_labels([
        "2024-01-05",
        "2024-01-20",
        "2024-02-01",
        "2024-02-15",
        "2025-02-01",
    ]);
    let axis = DatedAxis::parse(&cats).unwrap();
    let ticks: Vec<usize> = axis.ticks().map(|t| t.index).collect();
    assert_eq!(ticks, vec![0, 2, 4]);
}

#[test]
fn zero_value_renders_placeholder_not_scale_color() {
    let data = vec![
        DataPoint::new("2024-01-01", "r", Some(0.0)),
        DataPoint::new("2024-01-02", "r", Some(50.0)),
    ];
    let mut chart = HeatmapChartModel::new(data, 200.0, 100.0, cfg()).unwrap();
    let mut cmds = DrawCommands::new();
    chart.render(&mut cmds);

    let fills: Vec<_> = cmds.rects().map(|(_, brush)| brush.color()).collect();
    assert_eq!(fills[0].to_hex_string(), "#f8f8f8");
    assert_ne!(fills[0], chart.color_scale().map(0.0));
    assert_eq!(fills[1], chart.color_scale().map(50.0));
}

#[test]
fn hover_round_trip() {
    let data = vec![
        DataPoint::new("2024-01-05", "r", Some(12.345)),
        DataPoint::new("2024-01-06", "r", Some(3.0)),
    ];
    let mut chart = HeatmapChartModel::new(data, 300.0, 120.0, cfg()).unwrap();

    let center = chart.layout().cells()[0].rect.center();
    let margin = chart.config().margin;
    assert!(chart.handle_event(&Event::pointer_enter(
        center.x + margin.left,
        center.y + margin.top
    )));

    let hover = chart.hover().current().cloned().unwrap();
    assert_eq!(hover.x_label, "2024-01-05");
    assert_eq!(hover.y_label, "r");
    assert_eq!(hover.value, Some(12.35));
    assert_eq!(hover.value_text(), "12.35");

    assert!(chart.handle_event(&Event::pointer_leave()));
    assert!(chart.hover().current().is_none());
}

#[test]
fn two_datasets_scale_independently() {
    let primary = vec![
        DataPoint::new("2024-01-01", "r", Some(100.0)),
        DataPoint::new("2024-01-02", "r", Some(10.0)),
    ];
    let secondary = vec![
        DataPoint::new("2024-01-01", "r", Some(10.0)),
        DataPoint::new("2024-01-02", "r", Some(1.0)),
    ];
    let board = HeatmapBoard::compose(400.0, 250.0, primary, Some(secondary), &cfg()).unwrap();
    let blocks = board.blocks();

    assert_eq!(blocks[0].chart().color_scale().max(), 100.0);
    assert_eq!(blocks[1].chart().color_scale().max(), 10.0);
    assert_ne!(
        blocks[0].chart().color_scale().map(10.0),
        blocks[1].chart().color_scale().map(10.0)
    );
}

#[test]
fn board_svg_contains_both_blocks() {
    let data = dataset_from_json(
        r#"[
            {"x":"2024-01-30","y":"north","value":4.5},
            {"x":"2024-02-01","y":"north","value":0},
            {"x":"2024-01-30","y":"south","value":null},
            {"x":"2024-02-01","y":"south","value":9.25}
        ]"#,
    )
    .unwrap();
    let mut board =
        HeatmapBoard::compose(400.0, 250.0, data.clone(), Some(data), &cfg()).unwrap();
    let svg = render_board_svg(&mut board);

    assert!(svg.contains("height=\"632\""));
    assert_eq!(svg.matches("<rect ").count(), 6);
    assert_eq!(svg.matches(">Feb 2024</text>").count(), 2);
    assert!(svg.contains(">Daily Averages Heatmap</text>"));
    assert!(svg.contains(">Second Heatmap</text>"));
}

#[test]
fn config_file_drives_the_model() {
    let config = HeatmapConfig::from_toml_str(
        r##"
null_cells = "placeholder"
placeholder_color = "#eeeeee"
"##,
    )
    .unwrap();
    let data = vec![
        DataPoint::new("a", "r", None),
        DataPoint::new("b", "r", Some(2.0)),
    ];
    let mut chart = HeatmapChartModel::new(data, 200.0, 100.0, config).unwrap();
    let cells = chart.layout().cells();
    assert_eq!(cells.len(), 2);
    assert_eq!(cells[0].fill.to_hex_string(), "#eeeeee");
}
