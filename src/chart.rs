//! SVG polyline geometry for the session line charts.

pub const CHART_WIDTH: f64 = 560.0;
pub const CHART_HEIGHT: f64 = 220.0;

#[derive(Debug, Clone, PartialEq)]
pub struct ChartGeometry {
    /// One `points` attribute per input line, same order.
    pub lines: Vec<String>,
    pub min_value: f64,
    pub max_value: f64,
}

/// Lays out several equally long series on a shared y-scale.
///
/// Returns `None` for fewer than two samples. A flat chart is drawn at
/// mid-height.
pub fn compute_chart_geometry(series: &[&[f64]], width: f64, height: f64) -> Option<ChartGeometry> {
    let samples = series.iter().map(|values| values.len()).max()?;
    if samples < 2 || width <= 0.0 || height <= 0.0 {
        return None;
    }

    let finite = || series.iter().flat_map(|values| values.iter().copied()).filter(|v| v.is_finite());
    let min_value = finite().fold(f64::INFINITY, f64::min);
    let max_value = finite().fold(f64::NEG_INFINITY, f64::max);
    if !min_value.is_finite() || !max_value.is_finite() {
        return None;
    }

    let span = max_value - min_value;
    let x_step = width / (samples - 1) as f64;
    let lines = series
        .iter()
        .map(|values| {
            values
                .iter()
                .enumerate()
                .filter(|(_, v)| v.is_finite())
                .map(|(i, v)| {
                    let x = i as f64 * x_step;
                    let y = if span.abs() < f64::EPSILON {
                        height / 2.0
                    } else {
                        height - ((v - min_value) / span) * height
                    };
                    format!("{x:.2},{y:.2}")
                })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect();

    Some(ChartGeometry {
        lines,
        min_value,
        max_value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_scale_spans_all_lines() {
        let sh = [3000.0, 3010.0, 3020.0];
        let sz = [9000.0, 9100.0, 9050.0];
        let geometry = compute_chart_geometry(&[&sh[..], &sz[..]], 100.0, 50.0).expect("geometry");

        assert_eq!(geometry.min_value, 3000.0);
        assert_eq!(geometry.max_value, 9100.0);
        assert_eq!(geometry.lines.len(), 2);
        assert!(geometry.lines[0].starts_with("0.00,50.00"));
        assert!(geometry.lines[1].contains("50.00,0.00"));
    }

    #[test]
    fn flat_series_sits_mid_height() {
        let flat = [42.0, 42.0];
        let geometry = compute_chart_geometry(&[&flat[..]], 100.0, 50.0).expect("geometry");
        assert_eq!(geometry.lines[0], "0.00,25.00 100.00,25.00");
    }

    #[test]
    fn needs_two_samples() {
        let single = [1.0];
        assert!(compute_chart_geometry(&[&single[..]], 100.0, 50.0).is_none());
        assert!(compute_chart_geometry(&[], 100.0, 50.0).is_none());
    }
}
