//! Progress Math
//!
//! Percent-of-target and overall project progress for metrics and
//! deliverables.

use crate::models::Metric;

/// Metric whose current value is the project completion figure
pub const OVERALL_METRIC: &str = "Overall Project Completion";

const CHART_NAME_PREFIXES: &[&str] = &["Drawing Parsing ", "Time Reduction ", "Estimator ", "Projects "];

/// Radial chart colors, cycled
pub const RADIAL_COLORS: &[&str] = &["#3b82f6", "#10b981", "#f59e0b"];

/// Bar width for any percentage.
pub fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

/// `current / target` as a percentage capped at 100; a zero target is 0%.
pub fn percent_of_target(current: f64, target: f64) -> f64 {
    if target == 0.0 {
        return 0.0;
    }
    clamp_percent(current / target * 100.0)
}

/// `min(current / target, 1) * 100` with no lower bound, as averaged into
/// overall progress. A zero target is 0%.
pub fn capped_ratio(current: f64, target: f64) -> f64 {
    if target == 0.0 {
        return 0.0;
    }
    (current / target * 100.0).min(100.0)
}

/// Raw ratio for color thresholds; `None` when there is no target.
pub fn raw_percent(current: f64, target: f64) -> Option<f64> {
    (target != 0.0).then(|| current / target * 100.0)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverallProgress {
    pub percent: f64,
    /// Whether the completion metric supplied the figure
    pub from_completion_metric: bool,
}

pub fn overall_progress(metrics: &[Metric]) -> OverallProgress {
    if let Some(metric) = metrics.iter().find(|m| m.name == OVERALL_METRIC) {
        return OverallProgress { percent: clamp_percent(metric.current), from_completion_metric: true };
    }
    let percent = if metrics.is_empty() {
        0.0
    } else {
        metrics.iter().map(|m| capped_ratio(m.current, m.target)).sum::<f64>() / metrics.len() as f64
    };
    OverallProgress { percent, from_completion_metric: false }
}

/// Metric name with the common category prefixes removed
pub fn chart_label(name: &str) -> String {
    CHART_NAME_PREFIXES
        .iter()
        .fold(name.to_string(), |label, prefix| label.replacen(prefix, "", 1))
}

#[derive(Debug, Clone, PartialEq)]
pub struct RadialPoint {
    pub name: String,
    pub value: f64,
    pub color: &'static str,
}

/// One point per percent-unit metric
pub fn radial_points(metrics: &[Metric]) -> Vec<RadialPoint> {
    metrics
        .iter()
        .filter(|m| m.unit == "percent")
        .enumerate()
        .map(|(i, m)| RadialPoint {
            name: m.name.split(' ').next().unwrap_or_default().to_string(),
            value: percent_of_target(m.current, m.target),
            color: RADIAL_COLORS[i % RADIAL_COLORS.len()],
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metric(name: &str, current: f64, target: f64, unit: &str) -> Metric {
        Metric {
            id: 1,
            name: name.to_string(),
            current,
            target,
            unit: unit.to_string(),
            notes: String::new(),
            updated_at: None,
        }
    }

    #[test]
    fn test_zero_target_is_zero() {
        assert_eq!(percent_of_target(50.0, 0.0), 0.0);
        assert_eq!(raw_percent(50.0, 0.0), None);
    }

    #[test]
    fn test_percent_is_capped() {
        assert_eq!(percent_of_target(150.0, 100.0), 100.0);
        assert_eq!(percent_of_target(-5.0, 100.0), 0.0);
        assert_eq!(percent_of_target(45.0, 90.0), 50.0);
    }

    #[test]
    fn test_clamp_percent() {
        assert_eq!(clamp_percent(120.0), 100.0);
        assert_eq!(clamp_percent(-1.0), 0.0);
        assert_eq!(clamp_percent(f64::NAN), 0.0);
    }

    #[test]
    fn test_overall_is_mean_of_capped_ratios() {
        let metrics = vec![metric("A", 50.0, 100.0, "percent"), metric("B", 300.0, 100.0, "count"), metric("C", 5.0, 0.0, "count")];
        let overall = overall_progress(&metrics);
        assert_eq!(overall.percent, 50.0);
        assert!(!overall.from_completion_metric);
    }

    #[test]
    fn test_overall_keeps_negative_ratios() {
        let metrics = vec![metric("A", -50.0, 100.0, "count"), metric("B", 100.0, 100.0, "count")];
        assert_eq!(overall_progress(&metrics).percent, 25.0);
        assert_eq!(capped_ratio(-50.0, 100.0), -50.0);
        assert_eq!(capped_ratio(250.0, 100.0), 100.0);
        assert_eq!(capped_ratio(5.0, 0.0), 0.0);
    }

    #[test]
    fn test_overall_uses_completion_metric() {
        let metrics = vec![metric("A", 10.0, 100.0, "percent"), metric(OVERALL_METRIC, 82.0, 100.0, "percent")];
        assert_eq!(overall_progress(&metrics), OverallProgress { percent: 82.0, from_completion_metric: true });
        assert_eq!(overall_progress(&[]).percent, 0.0);
    }

    #[test]
    fn test_chart_label() {
        assert_eq!(chart_label("Drawing Parsing Accuracy"), "Accuracy");
        assert_eq!(chart_label("Projects Completed"), "Completed");
        assert_eq!(chart_label("Uptime"), "Uptime");
    }

    #[test]
    fn test_radial_points_only_percent_units() {
        let metrics = vec![metric("Accuracy Rate", 90.0, 100.0, "percent"), metric("Hours", 1.0, 2.0, "hours")];
        let points = radial_points(&metrics);
        assert_eq!(points, vec![RadialPoint { name: "Accuracy".into(), value: 90.0, color: "#3b82f6" }]);
    }
}
