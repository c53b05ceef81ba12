use crate::models::{DailyForecast, ForecastBundle};
use crate::ui::components::{humidity_gauge, rain_probability_gauge, temperature_gauge, InputWidget};
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

pub struct DashboardScreen<'a> {
    pub bundle: Option<&'a ForecastBundle>,
    /// Daytime mean humidity for today/tomorrow; `None` renders "–".
    pub today_humidity: Option<f64>,
    pub tomorrow_humidity: Option<f64>,
    pub location_query: &'a str,
    pub input_value: Option<&'a str>,
    pub status_message: Option<&'a str>,
}

impl<'a> DashboardScreen<'a> {
    pub fn new(bundle: Option<&'a ForecastBundle>, location_query: &'a str) -> Self {
        Self {
            bundle,
            today_humidity: None,
            tomorrow_humidity: None,
            location_query,
            input_value: None,
            status_message: None,
        }
    }

    pub fn with_humidity(mut self, today: Option<f64>, tomorrow: Option<f64>) -> Self {
        self.today_humidity = today;
        self.tomorrow_humidity = tomorrow;
        self
    }

    /// Show the location input in editing state with the given buffer.
    pub fn editing_location(mut self, buffer: Option<&'a str>) -> Self {
        self.input_value = buffer;
        self
    }

    pub fn with_status(mut self, status: Option<&'a str>) -> Self {
        self.status_message = status;
        self
    }
}

impl Widget for DashboardScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),  // Header
                Constraint::Length(3),  // Location input
                Constraint::Min(11),    // Today / tomorrow boxes
                Constraint::Length(1),  // Status message
                Constraint::Length(1),  // Nav bar
            ])
            .split(area);

        self.render_header(chunks[0], buf);

        let (label, value, focused) = match self.input_value {
            Some(buffer) => ("Location (editing, Enter to load)", buffer, true),
            None => ("Location", self.location_query, false),
        };
        InputWidget::new(label, value)
            .focused(focused)
            .render(chunks[1], buf);

        let days = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[2]);

        let today = self.bundle.and_then(|b| b.today());
        let tomorrow = self.bundle.and_then(|b| b.tomorrow());
        render_day_box("Today", today, self.today_humidity, days[0], buf);
        render_day_box("Tomorrow", tomorrow, self.tomorrow_humidity, days[1], buf);

        if let Some(msg) = self.status_message {
            Paragraph::new(Span::styled(msg, Theme::warning())).render(chunks[3], buf);
        }

        let nav = Line::from(vec![
            Span::styled("[l]", Theme::nav_key()),
            Span::styled("Location ", Theme::nav_label()),
            Span::styled("[r]", Theme::nav_key()),
            Span::styled("Reload ", Theme::nav_label()),
            Span::styled("[1-4]", Theme::nav_key()),
            Span::styled("Screens ", Theme::nav_label()),
            Span::styled("[q]", Theme::nav_key()),
            Span::styled("Quit", Theme::nav_label()),
        ]);
        Paragraph::new(nav).render(chunks[4], buf);
    }
}

impl DashboardScreen<'_> {
    fn render_header(&self, area: Rect, buf: &mut Buffer) {
        let title = match self.bundle {
            Some(b) => format!("Harvestcast - {}", b.location.name),
            None => "Harvestcast - No forecast loaded".to_string(),
        };

        let block = Block::default()
            .title(Span::styled(title, Theme::title()))
            .borders(Borders::BOTTOM)
            .border_style(Theme::border());

        let fetched = self
            .bundle
            .map(|b| b.fetched_at.format("%Y-%m-%d %H:%M UTC").to_string())
            .unwrap_or_else(|| "Never".to_string());

        let info = format!("Last loaded: {}", fetched);
        Paragraph::new(Span::styled(info, Theme::dim()))
            .block(block)
            .render(area, buf);
    }
}

fn render_day_box(
    title: &str,
    day: Option<&DailyForecast>,
    mean_humidity: Option<f64>,
    area: Rect,
    buf: &mut Buffer,
) {
    let block = Block::default()
        .title(Span::styled(title, Theme::header()))
        .borders(Borders::ALL)
        .border_style(Theme::border());

    let inner = block.inner(area);
    block.render(area, buf);

    let day = match day {
        Some(d) => d,
        None => {
            Paragraph::new(Span::styled("No data", Theme::dim())).render(inner, buf);
            return;
        }
    };

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(3)])
        .split(inner);

    let hum_avg = mean_humidity
        .map(|h| format!("{:.0}", h))
        .unwrap_or_else(|| "–".to_string());
    let hum_max = day
        .relative_humidity_max
        .map(|h| format!("{:.0}", h))
        .unwrap_or_else(|| "–".to_string());

    let lines = vec![
        Line::from(vec![
            Span::styled(day.date.format("%A, %d.%m.").to_string(), Theme::normal()),
        ]),
        Line::from(vec![
            Span::styled("Temp: ", Theme::dim()),
            Span::styled(
                format!("{:.1}°C / {:.1}°C", day.temp_max_c, day.temp_min_c),
                ratatui::style::Style::default().fg(Theme::temp_color(day.temp_max_c)),
            ),
        ]),
        Line::from(vec![
            Span::styled("Precipitation: ", Theme::dim()),
            Span::styled(format!("{:.1} mm", day.precipitation_sum_mm), Theme::normal()),
        ]),
        Line::from(vec![
            Span::styled("Rain probability: ", Theme::dim()),
            Span::styled(
                format!("{:.0}%", day.precipitation_prob_max),
                Theme::normal(),
            ),
        ]),
        Line::from(vec![
            Span::styled("Humidity: ", Theme::dim()),
            Span::styled(format!("Ø {}% (max {}%)", hum_avg, hum_max), Theme::normal()),
        ]),
    ];
    Paragraph::new(lines).render(sections[0], buf);

    let gauges = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(sections[1]);

    temperature_gauge("Max Temp", Some(day.temp_max_c)).render(gauges[0], buf);
    humidity_gauge("Ø Humidity", mean_humidity).render(gauges[1], buf);
    rain_probability_gauge("Rain", Some(day.precipitation_prob_max)).render(gauges[2], buf);
}
