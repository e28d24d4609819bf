use engine::{FinancialPoint, Granularity, chart, format_compact};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::Style,
    symbols,
    text::Span,
    widgets::{Axis, Chart, Dataset, GraphType, Paragraph},
};

use crate::ui::{components::card::Card, theme::Theme};

/// Line coordinates for the terminal chart, `x` being the bucket index and
/// `y` the amount in major units.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub income: Vec<(f64, f64)>,
    pub expenses: Vec<(f64, f64)>,
    /// Top of the shared scale; 1 when every value is zero.
    pub max: f64,
}

impl ChartData {
    pub fn from_series(series: &[FinancialPoint]) -> Self {
        let income: Vec<_> = series
            .iter()
            .enumerate()
            .map(|(i, point)| (i as f64, point.income.units()))
            .collect();
        let expenses: Vec<_> = series
            .iter()
            .enumerate()
            .map(|(i, point)| (i as f64, point.expenses.units()))
            .collect();
        let max = income
            .iter()
            .chain(&expenses)
            .map(|(_, y)| *y)
            .fold(0.0, f64::max);

        Self {
            income,
            expenses,
            max: if max > 0.0 { max } else { 1.0 },
        }
    }
}

/// Income/expense line chart with the period label as title.
pub fn render_financial_chart(
    frame: &mut Frame<'_>,
    area: Rect,
    series: &[FinancialPoint],
    granularity: Granularity,
    theme: &Theme,
) {
    let title = format!("Income vs Expenses ({})", granularity.label());
    let card = Card::new(&title, theme);

    if series.is_empty() {
        card.render_with(
            frame,
            area,
            Paragraph::new(Span::styled(
                chart::placeholder_message(granularity),
                Style::default().fg(theme.dim),
            ))
            .alignment(Alignment::Center),
        );
        return;
    }

    let data = ChartData::from_series(series);
    let datasets = vec![
        Dataset::default()
            .name("Income")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(theme.positive))
            .data(&data.income),
        Dataset::default()
            .name("Expenses")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(theme.negative))
            .data(&data.expenses),
    ];

    let x_labels: Vec<String> = series.iter().map(|point| chart::x_label(point.key)).collect();
    let last = (series.len().saturating_sub(1)).max(1) as f64;
    let y_labels: Vec<String> = (0..=chart::Y_TICKS)
        .map(|i| format_compact(data.max * f64::from(i) / f64::from(chart::Y_TICKS)))
        .collect();

    let widget = Chart::new(datasets)
        .x_axis(
            Axis::default()
                .style(Style::default().fg(theme.dim))
                .bounds([0.0, last])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(theme.dim))
                .bounds([0.0, data.max])
                .labels(y_labels),
        );

    card.render_with(frame, area, widget);
}

#[cfg(test)]
mod tests {
    use engine::{BucketKey, Money};

    use super::*;

    fn point(month: u32, income: i64, expenses: i64) -> FinancialPoint {
        let date = chrono::NaiveDate::from_ymd_opt(2024, month, 1).unwrap();
        FinancialPoint {
            key: BucketKey::for_date(date, Granularity::Monthly),
            income: Money::new(income),
            expenses: Money::new(expenses),
            net: Money::new(income - expenses),
        }
    }

    #[test]
    fn shares_one_scale() {
        let data = ChartData::from_series(&[point(1, 10_000, 2_500), point(2, 5_000, 30_000)]);
        assert_eq!(data.income, vec![(0.0, 100.0), (1.0, 50.0)]);
        assert_eq!(data.expenses, vec![(0.0, 25.0), (1.0, 300.0)]);
        assert_eq!(data.max, 300.0);
    }

    #[test]
    fn all_zero_uses_unit_scale() {
        let data = ChartData::from_series(&[point(1, 0, 0)]);
        assert_eq!(data.max, 1.0);
    }
}
