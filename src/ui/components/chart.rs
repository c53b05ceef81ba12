use crate::logic::DaySeries;
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    symbols::Marker,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph, Widget},
};

/// Hourly line chart with a dual scale: temperature in °C drives the
/// visible y axis, precipitation probability (always 0-100 %) is
/// rescaled onto the same plot. Left labels carry both readings.
pub struct HourlyChart<'a> {
    title: &'a str,
    series: &'a DaySeries,
}

impl<'a> HourlyChart<'a> {
    pub fn new(title: &'a str, series: &'a DaySeries) -> Self {
        Self { title, series }
    }
}

impl Widget for HourlyChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled(self.title, Theme::header()))
            .borders(Borders::ALL)
            .border_style(Theme::border());

        if self.series.is_empty() {
            let inner = block.inner(area);
            block.render(area, buf);
            Paragraph::new(Span::styled("No hourly data for this day", Theme::dim()))
                .render(inner, buf);
            return;
        }

        let temps = &self.series.temperatures;
        let t_min = temps.iter().cloned().fold(f64::INFINITY, f64::min);
        let t_max = temps.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        // Pad the band so flat series still produce a visible line.
        let y_min = (t_min - 2.0).floor();
        let y_max = (t_max + 2.0).ceil();
        let y_span = y_max - y_min;

        let temp_points: Vec<(f64, f64)> = temps
            .iter()
            .enumerate()
            .map(|(i, t)| (i as f64, *t))
            .collect();

        // Probability clamped to [0,100] and projected into the °C band.
        let prob_points: Vec<(f64, f64)> = self
            .series
            .precip_probabilities
            .iter()
            .enumerate()
            .map(|(i, p)| (i as f64, y_min + p.clamp(0.0, 100.0) / 100.0 * y_span))
            .collect();

        let datasets = vec![
            Dataset::default()
                .name("Temp °C")
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Theme::TEMP_HOT))
                .data(&temp_points),
            Dataset::default()
                .name("Rain %")
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Theme::RAIN))
                .data(&prob_points),
        ];

        let x_max = (self.series.len().saturating_sub(1)).max(1) as f64;
        let x_labels = x_axis_labels(&self.series.hour_labels);

        // Each y label pairs the temperature with the probability that
        // maps to the same height.
        let y_labels: Vec<String> = [0.0, 0.5, 1.0]
            .iter()
            .map(|f| format!("{:.0}°C/{:.0}%", y_min + f * y_span, f * 100.0))
            .collect();

        let chart = Chart::new(datasets)
            .block(block)
            .x_axis(
                Axis::default()
                    .style(Theme::dim())
                    .bounds([0.0, x_max])
                    .labels(x_labels),
            )
            .y_axis(
                Axis::default()
                    .style(Theme::dim())
                    .bounds([y_min, y_max])
                    .labels(y_labels),
            );

        chart.render(area, buf);
    }
}

fn x_axis_labels(hour_labels: &[String]) -> Vec<String> {
    let first = hour_labels.first().cloned().unwrap_or_default();
    let last = hour_labels.last().cloned().unwrap_or_default();
    if hour_labels.len() < 3 {
        return vec![first, last];
    }
    let mid = hour_labels[hour_labels.len() / 2].clone();
    vec![first, mid, last]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_labels_take_first_middle_last() {
        let labels: Vec<String> = (0..24).map(|h| format!("{:02}:00", h)).collect();
        assert_eq!(x_axis_labels(&labels), vec!["00:00", "12:00", "23:00"]);
    }

    #[test]
    fn short_series_label_set_degrades() {
        let labels = vec!["08:00".to_string(), "09:00".to_string()];
        assert_eq!(x_axis_labels(&labels), vec!["08:00", "09:00"]);
    }
}
