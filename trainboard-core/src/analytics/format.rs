/// Shown wherever a value is missing.
pub const PLACEHOLDER: &str = "-";

/// Three-decimal score; missing or non-finite scores render as `0.000`.
pub fn format_score(value: f64) -> String {
    if value.is_finite() {
        format!("{:.3}", value)
    } else {
        "0.000".to_string()
    }
}

/// A ratio in [0, 1] as a one-decimal percentage.
pub fn format_percent(ratio: f64) -> String {
    if ratio.is_finite() {
        format!("{:.1}%", ratio * 100.0)
    } else {
        PLACEHOLDER.to_string()
    }
}

pub fn format_seconds(seconds: f64) -> String {
    if seconds.is_finite() && seconds >= 0.0 {
        format!("{:.2}s", seconds)
    } else {
        PLACEHOLDER.to_string()
    }
}
