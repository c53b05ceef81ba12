use crate::logic::DaySeries;
use crate::ui::components::HourlyChart;
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// Two stacked dual-axis hourly charts: today on top, tomorrow below.
pub struct ForecastScreen<'a> {
    pub today: &'a DaySeries,
    pub tomorrow: &'a DaySeries,
}

impl<'a> ForecastScreen<'a> {
    pub fn new(today: &'a DaySeries, tomorrow: &'a DaySeries) -> Self {
        Self { today, tomorrow }
    }
}

impl Widget for ForecastScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Min(8),    // Today
                Constraint::Min(8),    // Tomorrow
                Constraint::Length(1), // Nav
            ])
            .split(area);

        let title = Line::from(vec![
            Span::styled("Hourly Forecast", Theme::title()),
            Span::styled(
                " - temperature (red) vs. rain probability (blue)",
                Theme::dim(),
            ),
        ]);
        Paragraph::new(title).render(chunks[0], buf);

        HourlyChart::new("Today", self.today).render(chunks[1], buf);
        HourlyChart::new("Tomorrow", self.tomorrow).render(chunks[2], buf);

        let nav = Line::from(vec![
            Span::styled("[r]", Theme::nav_key()),
            Span::styled("Reload ", Theme::nav_label()),
            Span::styled("[1-4]", Theme::nav_key()),
            Span::styled("Screens ", Theme::nav_label()),
            Span::styled("[Esc]", Theme::nav_key()),
            Span::styled("Back", Theme::nav_label()),
        ]);
        Paragraph::new(nav).render(chunks[3], buf);
    }
}
