//! Chart specification assembly.
//!
//! [`build_chart_spec`] wraps the series list and axis titles into a
//! declarative [`ChartSpec`]. Presentation policy (marker, tooltip, legend)
//! comes from an explicit [`Presentation`] value, never from global state.
//! [`ChartSpec::to_highcharts`] lowers the spec to a Highcharts option tree.

use crate::series::Series;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

// =============================================================================
// Presentation options
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerStyle {
    #[serde(default = "default_marker_radius")]
    pub radius: f64,
    /// Marker outline drawn while a point is hovered
    #[serde(default = "default_hover_line_color")]
    pub hover_line_color: String,
    /// Highlight the hovered point
    #[serde(default = "default_true")]
    pub hover_enabled: bool,
    /// Highlight every marker of the hovered series
    #[serde(default)]
    pub series_hover_marker: bool,
}

fn default_marker_radius() -> f64 { 5.0 }
fn default_hover_line_color() -> String { "rgb(100,100,100)".to_string() }
fn default_true() -> bool { true }

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            radius: default_marker_radius(),
            hover_line_color: default_hover_line_color(),
            hover_enabled: true,
            series_hover_marker: false,
        }
    }
}

/// Tooltip templates. `{series.name}`, `{point.x}` and `{point.y}` are
/// interpolated by the rendering library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TooltipFormat {
    #[serde(default = "default_header_format")]
    pub header_format: String,
    #[serde(default = "default_point_format")]
    pub point_format: String,
}

fn default_header_format() -> String { "<b>{series.name}</b><br>".to_string() }
fn default_point_format() -> String { "{point.x}, {point.y}".to_string() }

impl Default for TooltipFormat {
    fn default() -> Self {
        Self {
            header_format: default_header_format(),
            point_format: default_point_format(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LegendLayout {
    Horizontal,
    #[default]
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HorizontalAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlign {
    #[default]
    Top,
    Middle,
    Bottom,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendOptions {
    #[serde(default)]
    pub layout: LegendLayout,
    #[serde(default)]
    pub align: HorizontalAlign,
    #[serde(default)]
    pub vertical_align: VerticalAlign,
    #[serde(default = "default_legend_x")]
    pub x: i32,
    #[serde(default = "default_legend_y")]
    pub y: i32,
    #[serde(default = "default_true")]
    pub floating: bool,
    #[serde(default = "default_border_width")]
    pub border_width: u32,
    /// Background used when the theme does not provide one
    #[serde(default = "default_legend_background")]
    pub background_fallback: String,
}

fn default_legend_x() -> i32 { 100 }
fn default_legend_y() -> i32 { 70 }
fn default_border_width() -> u32 { 1 }
fn default_legend_background() -> String { "#FFFFFF".to_string() }

impl Default for LegendOptions {
    fn default() -> Self {
        Self {
            layout: LegendLayout::Vertical,
            align: HorizontalAlign::Left,
            vertical_align: VerticalAlign::Top,
            x: default_legend_x(),
            y: default_legend_y(),
            floating: true,
            border_width: default_border_width(),
            background_fallback: default_legend_background(),
        }
    }
}

/// Theme values that override presentation defaults when present
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    #[serde(default)]
    pub legend_background_color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Presentation {
    #[serde(default)]
    pub title: String,
    #[serde(default = "default_zoom_type")]
    pub zoom_type: String,
    #[serde(default)]
    pub marker: MarkerStyle,
    #[serde(default)]
    pub tooltip: TooltipFormat,
    #[serde(default)]
    pub legend: LegendOptions,
    #[serde(default)]
    pub theme: Theme,
}

fn default_zoom_type() -> String { "xy".to_string() }

impl Default for Presentation {
    fn default() -> Self {
        Self {
            title: String::new(),
            zoom_type: default_zoom_type(),
            marker: MarkerStyle::default(),
            tooltip: TooltipFormat::default(),
            legend: LegendOptions::default(),
            theme: Theme::default(),
        }
    }
}

// =============================================================================
// Chart spec
// =============================================================================

/// Legend position and look after theme resolution
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendPlacement {
    pub layout: LegendLayout,
    pub align: HorizontalAlign,
    pub vertical_align: VerticalAlign,
    pub x: i32,
    pub y: i32,
    pub floating: bool,
    pub border_width: u32,
    pub background_color: String,
}

/// Declarative, library-agnostic description of a grouped scatter chart
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSpec {
    pub title: String,
    pub zoom_type: String,
    pub x_axis_title: String,
    pub y_axis_title: String,
    pub series: Vec<Series>,
    pub marker_style: MarkerStyle,
    pub tooltip_format: TooltipFormat,
    pub legend_placement: LegendPlacement,
}

/// Assemble the chart spec.
///
/// `_category_name` is accepted alongside the axis names but not used: legend
/// entries are the series names, i.e. the raw category values.
pub fn build_chart_spec(
    x_axis_name: &str,
    y_axis_name: &str,
    _category_name: &str,
    series: Vec<Series>,
    presentation: &Presentation,
) -> ChartSpec {
    let legend = &presentation.legend;
    let background_color = presentation
        .theme
        .legend_background_color
        .clone()
        .unwrap_or_else(|| legend.background_fallback.clone());

    ChartSpec {
        title: presentation.title.clone(),
        zoom_type: presentation.zoom_type.clone(),
        x_axis_title: x_axis_name.to_string(),
        y_axis_title: y_axis_name.to_string(),
        series,
        marker_style: presentation.marker.clone(),
        tooltip_format: presentation.tooltip.clone(),
        legend_placement: LegendPlacement {
            layout: legend.layout,
            align: legend.align,
            vertical_align: legend.vertical_align,
            x: legend.x,
            y: legend.y,
            floating: legend.floating,
            border_width: legend.border_width,
            background_color,
        },
    }
}

impl ChartSpec {
    /// Lower to a Highcharts scatter option tree. NaN coordinates become `null`.
    pub fn to_highcharts(&self) -> Value {
        let series: Vec<Value> = self
            .series
            .iter()
            .map(|s| {
                json!({
                    "name": s.name,
                    "color": s.color.to_string(),
                    "data": s.points.iter().map(|&(x, y)| json!([x, y])).collect::<Vec<_>>(),
                })
            })
            .collect();

        let marker = &self.marker_style;
        let legend = &self.legend_placement;

        json!({
            "chart": { "type": "scatter", "zoomType": self.zoom_type },
            "title": { "text": self.title },
            "xAxis": {
                "title": { "text": self.x_axis_title, "enable": true },
                "startOnTick": true,
                "endOnTick": true,
                "showLastLabel": true,
            },
            "yAxis": {
                "title": { "text": self.y_axis_title },
            },
            "plotOptions": {
                "scatter": {
                    "marker": {
                        "radius": marker.radius,
                        "states": {
                            "hover": {
                                "enabled": marker.hover_enabled,
                                "lineColor": marker.hover_line_color,
                            }
                        }
                    },
                    "states": {
                        "hover": {
                            "marker": { "enabled": marker.series_hover_marker }
                        }
                    },
                    "tooltip": {
                        "headerFormat": self.tooltip_format.header_format,
                        "pointFormat": self.tooltip_format.point_format,
                    }
                }
            },
            "legend": {
                "layout": legend.layout,
                "align": legend.align,
                "verticalAlign": legend.vertical_align,
                "x": legend.x,
                "y": legend.y,
                "floating": legend.floating,
                "backgroundColor": legend.background_color,
                "borderWidth": legend.border_width,
            },
            "series": series,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::ColorValue;

    fn sample_series() -> Vec<Series> {
        vec![
            Series {
                name: "X".to_string(),
                color: ColorValue::rgba(10, 20, 30, 0.2),
                points: vec![(1.0, 2.0), (3.0, f64::NAN)],
            },
            Series {
                name: "Y".to_string(),
                color: ColorValue::rgba(40, 50, 60, 0.2),
                points: vec![(2.0, 3.0)],
            },
        ]
    }

    #[test]
    fn test_spec_defaults() {
        let spec = build_chart_spec("height", "weight", "gender", sample_series(), &Presentation::default());
        assert_eq!(spec.x_axis_title, "height");
        assert_eq!(spec.y_axis_title, "weight");
        assert_eq!(spec.series.len(), 2);
        assert_eq!(spec.marker_style.radius, 5.0);
        assert_eq!(spec.tooltip_format.header_format, "<b>{series.name}</b><br>");
        assert_eq!(spec.tooltip_format.point_format, "{point.x}, {point.y}");
        assert_eq!(spec.legend_placement.align, HorizontalAlign::Left);
        assert_eq!(spec.legend_placement.vertical_align, VerticalAlign::Top);
        assert_eq!((spec.legend_placement.x, spec.legend_placement.y), (100, 70));
        assert!(spec.legend_placement.floating);
        assert_eq!(spec.legend_placement.background_color, "#FFFFFF");
    }

    #[test]
    fn test_category_name_not_used() {
        let a = build_chart_spec("x", "y", "gender", sample_series(), &Presentation::default());
        let b = build_chart_spec("x", "y", "something else", sample_series(), &Presentation::default());
        // NaN != NaN, compare serialized forms instead
        assert_eq!(a.to_highcharts(), b.to_highcharts());
        assert!(!a.to_highcharts().to_string().contains("gender"));
    }

    #[test]
    fn test_theme_overrides_legend_background() {
        let presentation = Presentation {
            theme: Theme {
                legend_background_color: Some("#202020".to_string()),
            },
            ..Default::default()
        };
        let spec = build_chart_spec("x", "y", "c", vec![], &presentation);
        assert_eq!(spec.legend_placement.background_color, "#202020");
    }

    #[test]
    fn test_presentation_partial_json() {
        let presentation: Presentation = serde_json::from_str(
            r#"{ "marker": { "radius": 8 }, "legend": { "align": "right", "x": -10 } }"#,
        )
        .unwrap();
        assert_eq!(presentation.marker.radius, 8.0);
        assert_eq!(presentation.marker.hover_line_color, "rgb(100,100,100)");
        assert_eq!(presentation.legend.align, HorizontalAlign::Right);
        assert_eq!(presentation.legend.x, -10);
        assert_eq!(presentation.legend.y, 70);
        assert_eq!(presentation.zoom_type, "xy");
    }

    #[test]
    fn test_highcharts_option_tree() {
        let spec = build_chart_spec("height", "weight", "gender", sample_series(), &Presentation::default());
        let options = spec.to_highcharts();

        assert_eq!(options["chart"]["type"], "scatter");
        assert_eq!(options["chart"]["zoomType"], "xy");
        assert_eq!(options["title"]["text"], "");
        assert_eq!(options["xAxis"]["title"]["text"], "height");
        assert_eq!(options["xAxis"]["startOnTick"], true);
        assert_eq!(options["yAxis"]["title"]["text"], "weight");

        let scatter = &options["plotOptions"]["scatter"];
        assert_eq!(scatter["marker"]["radius"], 5.0);
        assert_eq!(scatter["marker"]["states"]["hover"]["lineColor"], "rgb(100,100,100)");
        assert_eq!(scatter["states"]["hover"]["marker"]["enabled"], false);
        assert_eq!(scatter["tooltip"]["pointFormat"], "{point.x}, {point.y}");

        assert_eq!(options["legend"]["layout"], "vertical");
        assert_eq!(options["legend"]["align"], "left");
        assert_eq!(options["legend"]["verticalAlign"], "top");
        assert_eq!(options["legend"]["borderWidth"], 1);

        let series = options["series"].as_array().unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series[0]["name"], "X");
        assert_eq!(series[0]["color"], "rgba(10, 20, 30, 0.2)");
        assert_eq!(series[0]["data"][0], json!([1.0, 2.0]));
        assert_eq!(series[0]["data"][1], json!([3.0, null]));
    }
}
