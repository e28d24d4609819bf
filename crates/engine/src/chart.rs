//! Income/expense line chart.
//!
//! [`ChartLayout::compute`] turns a bucketed series into plain geometry
//! (points, paths, ticks, labels) so any frontend can draw it, and
//! [`render_svg`] draws that geometry as a standalone SVG document. Both
//! are pure functions of the series and the requested height.

use serde::Serialize;

use crate::{
    Money,
    money::format_compact,
    stats::{BucketKey, FinancialPoint, Granularity},
};

/// Canvas width in pixels. The height is chosen by the caller.
pub const CHART_WIDTH: f64 = 800.0;
/// Number of intervals on the value axis (so there are `Y_TICKS + 1` labels).
pub const Y_TICKS: u32 = 5;

const PADDING_TOP: f64 = 40.0;
const PADDING_RIGHT: f64 = 40.0;
const PADDING_BOTTOM: f64 = 60.0;
const PADDING_LEFT: f64 = 80.0;

const INCOME_COLOR: &str = "#6366f1";
const EXPENSE_COLOR: &str = "#ec4899";
const NEGATIVE_COLOR: &str = "#ef4444";
const GRID_COLOR: &str = "#374151";
const LABEL_COLOR: &str = "#a5f3fc";

const TOOLTIP_WIDTH: f64 = 140.0;
const TOOLTIP_HEIGHT: f64 = 80.0;

const MONTHS_SHORT: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
const MONTHS_LONG: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlotPoint {
    pub key: BucketKey,
    pub x: f64,
    pub income_y: f64,
    pub expenses_y: f64,
    pub income: Money,
    pub expenses: Money,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AxisTick {
    pub value: f64,
    pub y: f64,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Tooltip {
    pub title: String,
    pub income: String,
    pub expenses: String,
    pub net: String,
    /// Net is shown in the income colour when `true`, in red otherwise.
    pub net_positive: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartLayout {
    pub granularity: Granularity,
    pub width: f64,
    pub height: f64,
    pub plot_top: f64,
    pub plot_bottom: f64,
    pub plot_left: f64,
    pub plot_right: f64,
    /// Top of the shared value scale, in major units.
    pub max_value: f64,
    pub points: Vec<PlotPoint>,
    pub y_ticks: Vec<AxisTick>,
    /// `None` when there is a single point: nothing to connect.
    pub income_path: Option<String>,
    pub expenses_path: Option<String>,
    pub income_area: Option<String>,
}

impl ChartLayout {
    /// Lays out `series` on a canvas of [`CHART_WIDTH`] x `height`.
    ///
    /// Returns `None` for an empty series; callers show
    /// [`placeholder_message`] instead.
    #[must_use]
    pub fn compute(series: &[FinancialPoint], granularity: Granularity, height: f64) -> Option<Self> {
        if series.is_empty() {
            return None;
        }

        let plot_top = PADDING_TOP;
        let plot_height = (height - PADDING_TOP - PADDING_BOTTOM).max(1.0);
        let plot_bottom = plot_top + plot_height;
        let plot_left = PADDING_LEFT;
        let plot_right = CHART_WIDTH - PADDING_RIGHT;
        let plot_width = plot_right - plot_left;

        let max_value = series
            .iter()
            .map(|p| p.income.max(p.expenses))
            .max()
            .unwrap_or(Money::ZERO)
            .units();
        // An all-zero series still needs a non-zero range.
        let range = if max_value > 0.0 { max_value } else { 1.0 };
        let y_of = |value: f64| plot_bottom - (value / range) * plot_height;

        let last = series.len() - 1;
        let points: Vec<PlotPoint> = series
            .iter()
            .enumerate()
            .map(|(index, point)| {
                let x = if last == 0 {
                    plot_left + plot_width / 2.0
                } else {
                    plot_left + (index as f64 / last as f64) * plot_width
                };
                PlotPoint {
                    key: point.key,
                    x,
                    income_y: y_of(point.income.units()),
                    expenses_y: y_of(point.expenses.units()),
                    income: point.income,
                    expenses: point.expenses,
                }
            })
            .collect();

        let y_ticks = (0..=Y_TICKS)
            .map(|i| {
                let value = max_value * f64::from(i) / f64::from(Y_TICKS);
                AxisTick {
                    value,
                    y: plot_bottom - plot_height * f64::from(i) / f64::from(Y_TICKS),
                    label: format_compact(value),
                }
            })
            .collect();

        let (income_path, expenses_path, income_area) = if points.len() > 1 {
            let income = line_path(points.iter().map(|p| (p.x, p.income_y)));
            let expenses = line_path(points.iter().map(|p| (p.x, p.expenses_y)));
            let area = format!(
                "{income} L {} {} L {} {} Z",
                num(points[last].x),
                num(plot_bottom),
                num(points[0].x),
                num(plot_bottom)
            );
            (Some(income), Some(expenses), Some(area))
        } else {
            (None, None, None)
        };

        Some(Self {
            granularity,
            width: CHART_WIDTH,
            height,
            plot_top,
            plot_bottom,
            plot_left,
            plot_right,
            max_value,
            points,
            y_ticks,
            income_path,
            expenses_path,
            income_area,
        })
    }

    /// Tooltip content for the point at `index`.
    #[must_use]
    pub fn tooltip(&self, index: usize) -> Option<Tooltip> {
        let point = self.points.get(index)?;
        let net = point.income - point.expenses;
        Some(Tooltip {
            title: tooltip_title(point.key),
            income: point.income.compact(),
            expenses: point.expenses.compact(),
            net: net.compact(),
            net_positive: !net.is_negative(),
        })
    }
}

fn line_path(points: impl Iterator<Item = (f64, f64)>) -> String {
    points
        .enumerate()
        .map(|(index, (x, y))| {
            let cmd = if index == 0 { "M" } else { "L" };
            format!("{cmd} {} {}", num(x), num(y))
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Two decimals at most, no trailing zeros.
fn num(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    format!("{rounded}")
}

/// Axis label under a point: month abbreviation, or the raw key otherwise.
#[must_use]
pub fn x_label(key: BucketKey) -> String {
    match key.granularity {
        Granularity::Monthly => month_name(&MONTHS_SHORT, key.period)
            .map(str::to_string)
            .unwrap_or_else(|| key.to_string()),
        Granularity::Quarterly | Granularity::Yearly => key.to_string(),
    }
}

#[must_use]
pub fn tooltip_title(key: BucketKey) -> String {
    match key.granularity {
        Granularity::Monthly => match month_name(&MONTHS_LONG, key.period) {
            Some(month) => format!("{month} {}", key.year),
            None => key.to_string(),
        },
        Granularity::Quarterly => format!("{} Q{}", key.year, key.period),
        Granularity::Yearly => format!("Year {}", key.year),
    }
}

fn month_name(names: &[&'static str; 12], month: u32) -> Option<&'static str> {
    let index = usize::try_from(month).ok()?.checked_sub(1)?;
    names.get(index).copied()
}

#[must_use]
pub fn placeholder_message(granularity: Granularity) -> String {
    format!(
        "No data available for {} view",
        granularity.label().to_lowercase()
    )
}

/// Renders the chart as an SVG document.
///
/// Every point is wrapped in a `point` group whose tooltip becomes visible
/// on hover. An empty series renders the placeholder text.
#[must_use]
pub fn render_svg(series: &[FinancialPoint], granularity: Granularity, height: f64) -> String {
    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = num(CHART_WIDTH),
        h = num(height)
    );
    svg.push_str(
        "<style>.tooltip{visibility:hidden}.point:hover .tooltip{visibility:visible}\
         text{font-family:sans-serif;font-size:12px}</style>",
    );

    let Some(layout) = ChartLayout::compute(series, granularity, height) else {
        svg.push_str(&format!(
            r##"<text x="{}" y="{}" text-anchor="middle" fill="#fcd34d">{}</text></svg>"##,
            num(CHART_WIDTH / 2.0),
            num(height / 2.0),
            placeholder_message(granularity)
        ));
        return svg;
    };

    svg.push_str(&format!(
        r#"<defs><linearGradient id="incomeGradient" x1="0%" y1="0%" x2="0%" y2="100%"><stop offset="0%" stop-color="{INCOME_COLOR}" stop-opacity="0.3"/><stop offset="100%" stop-color="{INCOME_COLOR}" stop-opacity="0"/></linearGradient></defs>"#
    ));

    svg.push_str(r#"<g class="grid" opacity="0.2">"#);
    for tick in &layout.y_ticks {
        svg.push_str(&format!(
            r#"<line x1="{}" y1="{y}" x2="{}" y2="{y}" stroke="{GRID_COLOR}" stroke-dasharray="2,2"/>"#,
            num(layout.plot_left),
            num(layout.plot_right),
            y = num(tick.y)
        ));
    }
    for point in &layout.points {
        svg.push_str(&format!(
            r#"<line x1="{x}" y1="{}" x2="{x}" y2="{}" stroke="{GRID_COLOR}" stroke-dasharray="2,2"/>"#,
            num(layout.plot_top),
            num(layout.plot_bottom),
            x = num(point.x)
        ));
    }
    svg.push_str("</g>");

    for tick in &layout.y_ticks {
        svg.push_str(&format!(
            r#"<text x="{}" y="{}" text-anchor="end" fill="{LABEL_COLOR}">{}</text>"#,
            num(layout.plot_left - 10.0),
            num(tick.y + 4.0),
            tick.label
        ));
    }

    if let Some(area) = &layout.income_area {
        svg.push_str(&format!(r#"<path d="{area}" fill="url(#incomeGradient)"/>"#));
    }
    if let Some(path) = &layout.income_path {
        svg.push_str(&format!(
            r#"<path class="income" d="{path}" fill="none" stroke="{INCOME_COLOR}" stroke-width="3"/>"#
        ));
    }
    if let Some(path) = &layout.expenses_path {
        svg.push_str(&format!(
            r#"<path class="expenses" d="{path}" fill="none" stroke="{EXPENSE_COLOR}" stroke-width="3"/>"#
        ));
    }

    for point in &layout.points {
        svg.push_str(&format!(
            r#"<text x="{}" y="{}" text-anchor="middle" fill="{LABEL_COLOR}">{}</text>"#,
            num(point.x),
            num(layout.plot_bottom + 20.0),
            x_label(point.key)
        ));
    }

    for (index, point) in layout.points.iter().enumerate() {
        let Some(tooltip) = layout.tooltip(index) else {
            continue;
        };
        let x = num(point.x);
        let box_x = (point.x - TOOLTIP_WIDTH / 2.0).clamp(0.0, CHART_WIDTH - TOOLTIP_WIDTH);
        let net_color = if tooltip.net_positive {
            INCOME_COLOR
        } else {
            NEGATIVE_COLOR
        };

        svg.push_str(r#"<g class="point">"#);
        svg.push_str(&format!(
            r#"<circle cx="{x}" cy="{}" r="4" fill="{INCOME_COLOR}"/><circle cx="{x}" cy="{}" r="4" fill="{EXPENSE_COLOR}"/>"#,
            num(point.income_y),
            num(point.expenses_y)
        ));
        svg.push_str(&format!(
            r#"<g class="tooltip"><line x1="{x}" y1="{}" x2="{x}" y2="{}" stroke="{INCOME_COLOR}" stroke-width="2" stroke-dasharray="4,4"/>"#,
            num(layout.plot_top),
            num(layout.plot_bottom)
        ));
        svg.push_str(&format!(
            r##"<rect x="{bx}" y="{by}" width="{TOOLTIP_WIDTH}" height="{TOOLTIP_HEIGHT}" rx="8" fill="#1f2937" stroke="#4b5563"/>"##,
            bx = num(box_x),
            by = num(layout.plot_top)
        ));
        let text_x = num(box_x + 10.0);
        let lines = [
            (LABEL_COLOR, tooltip.title.clone()),
            (INCOME_COLOR, format!("Income {}", tooltip.income)),
            (EXPENSE_COLOR, format!("Expenses {}", tooltip.expenses)),
            (net_color, format!("Net {}", tooltip.net)),
        ];
        for (row, (color, text)) in lines.iter().enumerate() {
            svg.push_str(&format!(
                r#"<text x="{text_x}" y="{}" fill="{color}">{text}</text>"#,
                num(layout.plot_top + 18.0 + 17.0 * row as f64)
            ));
        }
        svg.push_str("</g></g>");
    }

    svg.push_str("</svg>");
    svg
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(year: i32, month: u32, income: i64, expenses: i64) -> FinancialPoint {
        FinancialPoint {
            key: BucketKey {
                year,
                period: month,
                granularity: Granularity::Monthly,
            },
            income: Money::new(income * 100),
            expenses: Money::new(expenses * 100),
            net: Money::new((income - expenses) * 100),
        }
    }

    #[test]
    fn empty_series_has_no_layout() {
        assert!(ChartLayout::compute(&[], Granularity::Monthly, 300.0).is_none());
        let svg = render_svg(&[], Granularity::Quarterly, 300.0);
        assert!(svg.contains(
            r##"<text x="400" y="150" text-anchor="middle" fill="#fcd34d">No data available for quarterly view</text></svg>"##
        ));
        assert!(svg.ends_with("</svg>"));
        assert!(!svg.contains("<path"));
    }

    #[test]
    fn points_share_one_scale_and_spread_evenly() {
        let series = [point(2024, 1, 1000, 500), point(2024, 2, 0, 250), point(2024, 3, 500, 1000)];
        let layout = ChartLayout::compute(&series, Granularity::Monthly, 300.0).unwrap();

        assert_eq!(layout.max_value, 1000.0);
        assert_eq!(layout.plot_top, 40.0);
        assert_eq!(layout.plot_bottom, 240.0);
        let xs: Vec<f64> = layout.points.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![80.0, 420.0, 760.0]);
        // The maximum of either series touches the top, zero sits on the baseline.
        assert_eq!(layout.points[0].income_y, 40.0);
        assert_eq!(layout.points[2].expenses_y, 40.0);
        assert_eq!(layout.points[1].income_y, 240.0);
        assert_eq!(layout.points[0].expenses_y, 140.0);
    }

    #[test]
    fn paths_and_area() {
        let series = [point(2024, 1, 1000, 0), point(2024, 2, 0, 1000)];
        let layout = ChartLayout::compute(&series, Granularity::Monthly, 300.0).unwrap();

        assert_eq!(layout.income_path.as_deref(), Some("M 80 40 L 760 240"));
        assert_eq!(layout.expenses_path.as_deref(), Some("M 80 240 L 760 40"));
        assert_eq!(
            layout.income_area.as_deref(),
            Some("M 80 40 L 760 240 L 760 240 L 80 240 Z")
        );
    }

    #[test]
    fn single_point_is_centred_without_lines() {
        let layout =
            ChartLayout::compute(&[point(2024, 5, 300, 100)], Granularity::Monthly, 300.0).unwrap();

        assert_eq!(layout.points.len(), 1);
        assert_eq!(layout.points[0].x, 420.0);
        assert!(layout.points[0].x.is_finite());
        assert!(layout.income_path.is_none());
        assert!(layout.expenses_path.is_none());
        assert!(layout.income_area.is_none());

        let svg = render_svg(&[point(2024, 5, 300, 100)], Granularity::Monthly, 300.0);
        assert!(svg.contains("<circle"));
        assert!(!svg.contains("<path"));
    }

    #[test]
    fn all_zero_series_stays_finite() {
        let layout =
            ChartLayout::compute(&[point(2024, 1, 0, 0), point(2024, 2, 0, 0)], Granularity::Monthly, 300.0)
                .unwrap();
        assert!(layout.points.iter().all(|p| p.income_y == layout.plot_bottom));
        assert!(layout.y_ticks.iter().all(|t| t.label == "$0"));
    }

    #[test]
    fn six_ticks_at_equal_intervals() {
        let layout =
            ChartLayout::compute(&[point(2024, 1, 5000, 0), point(2024, 2, 0, 0)], Granularity::Monthly, 300.0)
                .unwrap();
        let labels: Vec<&str> = layout.y_ticks.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["$0", "$1k", "$2k", "$3k", "$4k", "$5k"]);
        let ys: Vec<f64> = layout.y_ticks.iter().map(|t| t.y).collect();
        assert_eq!(ys, vec![240.0, 200.0, 160.0, 120.0, 80.0, 40.0]);
    }

    #[test]
    fn tooltip_shows_net_by_sign() {
        let series = [point(2024, 3, 1500, 500), point(2024, 4, 200, 700)];
        let layout = ChartLayout::compute(&series, Granularity::Monthly, 300.0).unwrap();

        let first = layout.tooltip(0).unwrap();
        assert_eq!(first.title, "March 2024");
        assert_eq!(first.income, "$2k");
        assert_eq!(first.expenses, "$500");
        assert_eq!(first.net, "$1k");
        assert!(first.net_positive);

        let second = layout.tooltip(1).unwrap();
        assert_eq!(second.net, "-$500");
        assert!(!second.net_positive);

        assert!(layout.tooltip(2).is_none());
    }

    #[test]
    fn labels_per_granularity() {
        let month = BucketKey { year: 2024, period: 11, granularity: Granularity::Monthly };
        let quarter = BucketKey { year: 2024, period: 2, granularity: Granularity::Quarterly };
        let year = BucketKey { year: 2023, period: 0, granularity: Granularity::Yearly };

        assert_eq!(x_label(month), "Nov");
        assert_eq!(x_label(quarter), "2024-Q2");
        assert_eq!(x_label(year), "2023");
        assert_eq!(tooltip_title(month), "November 2024");
        assert_eq!(tooltip_title(quarter), "2024 Q2");
        assert_eq!(tooltip_title(year), "Year 2023");
    }

    #[test]
    fn svg_has_hover_tooltips_for_every_point() {
        let series = [point(2024, 1, 100, 50), point(2024, 2, 80, 120), point(2024, 3, 10, 0)];
        let svg = render_svg(&series, Granularity::Monthly, 300.0);

        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains(".point:hover .tooltip{visibility:visible}"));
        assert_eq!(svg.matches(r#"<g class="point">"#).count(), 3);
        assert!(svg.contains("February 2024"));
        assert!(svg.contains(NEGATIVE_COLOR));
    }
}
