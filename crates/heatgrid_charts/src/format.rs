/// Round half toward positive infinity, matching browser `Math.round`.
pub fn round_half_up(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// Round to two decimal places the way hover values are reported.
pub fn round_hundredths(value: f64) -> f64 {
    round_half_up(value * 100.0) / 100.0
}

pub fn format_fixed(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return if value.is_nan() {
            "NaN".to_string()
        } else if value.is_sign_positive() {
            "Inf".to_string()
        } else {
            "-Inf".to_string()
        };
    }
    format!("{value:.decimals$}")
}

/// Tooltip text for a hover value: up to two decimals, "n/a" when absent.
pub fn format_hover_value(value: Option<f64>) -> String {
    match value {
        Some(v) => trim_trailing_zeroes(format_fixed(v, 2)),
        None => "n/a".to_string(),
    }
}

/// Pixel coordinate for SVG attributes: at most three decimals, no trailing zeroes.
pub fn format_px(value: f32) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let s = trim_trailing_zeroes(format!("{value:.3}"));
    if s == "-0" {
        "0".to_string()
    } else {
        s
    }
}

fn trim_trailing_zeroes(mut s: String) -> String {
    if let Some(dot) = s.find('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.len() == dot + 1 {
            s.pop();
        }
    }
    s
}
