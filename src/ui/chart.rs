//! Text rendering of chart specifications.
//!
//! Charts arrive as declarative [`ChartSpec`] data; this module turns them
//! into styled terminal lines. Bar charts render one scaled bar per row and
//! series; line and area charts render a sparkline per series.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::models::{ChartSpec, ChartType};

use super::theme::{COLOR_CHART, COLOR_DIM};

/// Maximum bar length in cells.
const BAR_WIDTH: usize = 30;

/// Sparkline glyphs from lowest to highest.
const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Number of cells a bar occupies for `value` when the largest value in
/// the series gets the full [`BAR_WIDTH`]. Non-positive maxima render
/// nothing.
fn bar_cells(value: f64, max: f64) -> usize {
    if max <= 0.0 || value <= 0.0 {
        return 0;
    }
    ((value / max) * BAR_WIDTH as f64).round() as usize
}

/// Sparkline glyph for `value` within `[min, max]`.
fn spark_char(value: f64, min: f64, max: f64) -> char {
    if max <= min {
        return SPARK_LEVELS[0];
    }
    let ratio = (value - min) / (max - min);
    let index = (ratio * (SPARK_LEVELS.len() - 1) as f64).round() as usize;
    SPARK_LEVELS[index.min(SPARK_LEVELS.len() - 1)]
}

/// Render a chart specification into terminal lines.
pub fn chart_lines(spec: &ChartSpec) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    lines.push(Line::from(Span::styled(
        format!("▌ {} [{}]", spec.display_title(), spec.chart_type.as_str()),
        Style::default()
            .fg(COLOR_CHART)
            .add_modifier(Modifier::BOLD),
    )));

    let labels = spec.x_labels();
    let label_width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);

    for series in &spec.series {
        let values = spec.series_values(&series.data_key);
        if values.is_empty() {
            // Series/data mismatch: nothing to draw for this series.
            continue;
        }
        lines.push(Line::from(Span::styled(
            format!("  {}", series.data_key),
            Style::default().fg(COLOR_DIM),
        )));

        match spec.chart_type {
            ChartType::Bar => {
                let max = values.iter().cloned().fold(f64::MIN, f64::max);
                for (i, value) in values.iter().enumerate() {
                    let label = labels.get(i).cloned().unwrap_or_default();
                    let bar = "█".repeat(bar_cells(*value, max));
                    lines.push(Line::from(vec![
                        Span::styled(
                            format!("  {:>width$} ", label, width = label_width),
                            Style::default().fg(Color::Gray),
                        ),
                        Span::styled(bar, Style::default().fg(COLOR_CHART)),
                        Span::styled(format!(" {:.1}", value), Style::default().fg(COLOR_DIM)),
                    ]));
                }
            }
            ChartType::Line | ChartType::Area => {
                let min = values.iter().cloned().fold(f64::MAX, f64::min);
                let max = values.iter().cloned().fold(f64::MIN, f64::max);
                let spark: String = values.iter().map(|v| spark_char(*v, min, max)).collect();
                lines.push(Line::from(vec![
                    Span::raw("  "),
                    Span::styled(spark, Style::default().fg(COLOR_CHART)),
                    Span::styled(
                        format!("  min {:.1} / max {:.1}", min, max),
                        Style::default().fg(COLOR_DIM),
                    ),
                ]));
            }
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn spec(chart_type: &str) -> ChartSpec {
        serde_json::from_value(json!({
            "type": chart_type,
            "title": "Revenue",
            "xKey": "month",
            "data": [
                {"month": "Jan", "revenue": 100.0},
                {"month": "Feb", "revenue": 50.0},
                {"month": "Mar", "revenue": 0.0}
            ],
            "series": [{"dataKey": "revenue", "color": "#6366f1"}]
        }))
        .unwrap()
    }

    #[test]
    fn test_bar_cells_scaling() {
        assert_eq!(bar_cells(100.0, 100.0), BAR_WIDTH);
        assert_eq!(bar_cells(50.0, 100.0), BAR_WIDTH / 2);
        assert_eq!(bar_cells(0.0, 100.0), 0);
    }

    #[test]
    fn test_bar_cells_degenerate_max() {
        assert_eq!(bar_cells(10.0, 0.0), 0);
        assert_eq!(bar_cells(10.0, -5.0), 0);
    }

    #[test]
    fn test_spark_char_bounds() {
        assert_eq!(spark_char(0.0, 0.0, 100.0), '▁');
        assert_eq!(spark_char(100.0, 0.0, 100.0), '█');
    }

    #[test]
    fn test_spark_char_flat_series() {
        assert_eq!(spark_char(5.0, 5.0, 5.0), '▁');
    }

    #[test]
    fn test_bar_chart_renders_one_line_per_row() {
        let lines = chart_lines(&spec("bar"));
        // header + series label + 3 data rows
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn test_line_chart_renders_sparkline() {
        let lines = chart_lines(&spec("line"));
        // header + series label + sparkline
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_missing_series_key_renders_nothing() {
        let mut chart = spec("bar");
        chart.series[0].data_key = "profit".to_string();
        let lines = chart_lines(&chart);
        // header only: the mismatched series is silently skipped
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn test_header_contains_title_and_type() {
        let lines = chart_lines(&spec("area"));
        let header: String = lines[0]
            .spans
            .iter()
            .map(|s| s.content.as_ref())
            .collect();
        assert!(header.contains("Revenue"));
        assert!(header.contains("area"));
    }
}
