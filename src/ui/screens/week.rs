use crate::models::ForecastBundle;
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Forward-looking strip: the seven days starting the day after
/// tomorrow (offsets 2..=8 of the daily series).
pub struct WeekScreen<'a> {
    pub bundle: Option<&'a ForecastBundle>,
}

const STRIP_START_OFFSET: usize = 2;
const STRIP_DAYS: usize = 7;

impl<'a> WeekScreen<'a> {
    pub fn new(bundle: Option<&'a ForecastBundle>) -> Self {
        Self { bundle }
    }
}

impl Widget for WeekScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Min(9),    // Day boxes
                Constraint::Length(1), // Nav
            ])
            .split(area);

        let title = Line::from(vec![
            Span::styled("7-Day Outlook", Theme::title()),
            Span::styled(" - starting the day after tomorrow", Theme::dim()),
        ]);
        Paragraph::new(title).render(chunks[0], buf);

        match self.bundle {
            Some(bundle) => render_strip(bundle, chunks[1], buf),
            None => {
                Paragraph::new(Span::styled("No forecast loaded", Theme::dim()))
                    .render(chunks[1], buf);
            }
        }

        let nav = Line::from(vec![
            Span::styled("[r]", Theme::nav_key()),
            Span::styled("Reload ", Theme::nav_label()),
            Span::styled("[1-4]", Theme::nav_key()),
            Span::styled("Screens ", Theme::nav_label()),
            Span::styled("[Esc]", Theme::nav_key()),
            Span::styled("Back", Theme::nav_label()),
        ]);
        Paragraph::new(nav).render(chunks[2], buf);
    }
}

fn render_strip(bundle: &ForecastBundle, area: Rect, buf: &mut Buffer) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, STRIP_DAYS as u32); STRIP_DAYS])
        .split(area);

    for (i, column) in columns.iter().enumerate() {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Theme::border());
        let inner = block.inner(*column);
        block.render(*column, buf);

        // Short daily series simply leave trailing boxes empty.
        let day = match bundle.day(STRIP_START_OFFSET + i) {
            Some(d) => d,
            None => {
                Paragraph::new(Span::styled("–", Theme::dim())).render(inner, buf);
                continue;
            }
        };

        let glyph = if day.precipitation_sum_mm > 0.0 {
            "🌧"
        } else {
            "☀"
        };

        let lines = vec![
            Line::from(Span::styled(
                day.date.format("%a %d.%m.").to_string(),
                Theme::header(),
            )),
            Line::from(Span::raw(glyph)),
            Line::from(Span::styled(
                format!("{:.0}°/{:.0}°C", day.temp_max_c, day.temp_min_c),
                ratatui::style::Style::default().fg(Theme::temp_color(day.temp_max_c)),
            )),
            Line::from(Span::styled(
                format!("{:.1} mm", day.precipitation_sum_mm),
                Theme::normal(),
            )),
            Line::from(Span::styled(
                format!("{:.0}%", day.precipitation_prob_max),
                Theme::dim(),
            )),
        ];
        Paragraph::new(lines).render(inner, buf);
    }
}
