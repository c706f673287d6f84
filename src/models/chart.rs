//! Declarative chart specification returned by the analyst backend.
//!
//! A [`ChartSpec`] describes a chart (type, data rows, axes, series) for the
//! rendering layer. It is data, not executable code: the backend's chart
//! agent produces it and the client only draws it.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Chart family to render. Unknown values fall back to [`ChartType::Bar`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartType {
    #[default]
    Bar,
    Line,
    Area,
}

impl ChartType {
    /// Parse a wire value, defaulting to bar for anything unrecognized.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "line" => ChartType::Line,
            "area" => ChartType::Area,
            _ => ChartType::Bar,
        }
    }

    /// Wire representation of this chart type.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartType::Bar => "bar",
            ChartType::Line => "line",
            ChartType::Area => "area",
        }
    }
}

impl Serialize for ChartType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ChartType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(ChartType::parse(&raw))
    }
}

/// One plotted series: which field of each data row to read, and its color.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartSeries {
    /// Field name looked up in every data row
    #[serde(rename = "dataKey")]
    pub data_key: String,
    /// Display color (CSS-style string from the backend)
    #[serde(default)]
    pub color: Option<String>,
}

/// Declarative chart description.
///
/// Every `data_key` in `series` is expected to exist in every row of `data`;
/// the client does not validate this, and a missing key simply renders
/// nothing for that series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartSpec {
    /// Chart family (bar, line, area)
    #[serde(rename = "type", default)]
    pub chart_type: ChartType,
    /// Optional chart title
    #[serde(default)]
    pub title: Option<String>,
    /// Ordered data rows, each a mapping from field name to value
    #[serde(default)]
    pub data: Vec<serde_json::Map<String, serde_json::Value>>,
    /// Field name used for the category axis
    #[serde(rename = "xKey", default)]
    pub x_key: String,
    /// Ordered plotted series
    #[serde(default)]
    pub series: Vec<ChartSeries>,
}

impl ChartSpec {
    /// Category-axis label for each data row, in order.
    ///
    /// Non-string values are stringified; rows missing the x key get an
    /// empty label.
    pub fn x_labels(&self) -> Vec<String> {
        self.data
            .iter()
            .map(|row| match row.get(&self.x_key) {
                Some(serde_json::Value::String(s)) => s.clone(),
                Some(other) => other.to_string(),
                None => String::new(),
            })
            .collect()
    }

    /// Numeric values of one series across all data rows, in row order.
    ///
    /// Rows where the key is absent or not numeric are skipped, which is
    /// how a series/data mismatch ends up rendering nothing.
    pub fn series_values(&self, data_key: &str) -> Vec<f64> {
        self.data
            .iter()
            .filter_map(|row| row.get(data_key).and_then(|v| v.as_f64()))
            .collect()
    }

    /// Title to display, falling back to a generic heading.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("Data Visualization")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_spec() -> ChartSpec {
        serde_json::from_value(json!({
            "type": "bar",
            "title": "Monthly Revenue",
            "xKey": "month",
            "data": [
                {"month": "Jan", "revenue": 120.5, "orders": 40},
                {"month": "Feb", "revenue": 98.0, "orders": 31}
            ],
            "series": [
                {"dataKey": "revenue", "color": "#6366f1"},
                {"dataKey": "orders", "color": "#a855f7"}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_chart_type_parse_known_values() {
        assert_eq!(ChartType::parse("bar"), ChartType::Bar);
        assert_eq!(ChartType::parse("line"), ChartType::Line);
        assert_eq!(ChartType::parse("area"), ChartType::Area);
    }

    #[test]
    fn test_chart_type_unknown_falls_back_to_bar() {
        assert_eq!(ChartType::parse("pie"), ChartType::Bar);
        assert_eq!(ChartType::parse(""), ChartType::Bar);
    }

    #[test]
    fn test_chart_type_deserialize_unknown() {
        let spec: ChartSpec = serde_json::from_value(json!({
            "type": "scatter",
            "xKey": "x",
            "data": [],
            "series": []
        }))
        .unwrap();
        assert_eq!(spec.chart_type, ChartType::Bar);
    }

    #[test]
    fn test_chart_type_serialize_roundtrip() {
        let json = serde_json::to_string(&ChartType::Line).unwrap();
        assert_eq!(json, r#""line""#);
        let back: ChartType = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ChartType::Line);
    }

    #[test]
    fn test_x_labels_in_row_order() {
        let spec = sample_spec();
        assert_eq!(spec.x_labels(), vec!["Jan", "Feb"]);
    }

    #[test]
    fn test_series_values() {
        let spec = sample_spec();
        assert_eq!(spec.series_values("revenue"), vec![120.5, 98.0]);
        assert_eq!(spec.series_values("orders"), vec![40.0, 31.0]);
    }

    #[test]
    fn test_missing_data_key_yields_no_values() {
        let spec = sample_spec();
        assert!(spec.series_values("profit").is_empty());
    }

    #[test]
    fn test_display_title_fallback() {
        let mut spec = sample_spec();
        assert_eq!(spec.display_title(), "Monthly Revenue");
        spec.title = None;
        assert_eq!(spec.display_title(), "Data Visualization");
    }

    #[test]
    fn test_wire_field_names_are_camel_case() {
        let spec = sample_spec();
        let json = serde_json::to_value(&spec).unwrap();
        assert!(json.get("xKey").is_some());
        assert!(json["series"][0].get("dataKey").is_some());
    }
}
