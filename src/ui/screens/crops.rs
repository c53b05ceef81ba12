use crate::logic::{CropAssessment, HumiditySignal};
use crate::models::{Crop, CropSelection, SelectionMode};
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget, Wrap},
};

/// Crop picker plus the status card for the highlighted crop.
pub struct CropsScreen<'a> {
    pub assessments: &'a [CropAssessment],
    pub selection: &'a CropSelection,
    pub selected_index: usize,
}

impl<'a> CropsScreen<'a> {
    pub fn new(assessments: &'a [CropAssessment], selection: &'a CropSelection) -> Self {
        Self {
            assessments,
            selection,
            selected_index: 0,
        }
    }

    pub fn with_selection(mut self, index: usize) -> Self {
        self.selected_index = index;
        self
    }

    fn assessment_for(&self, crop: Crop) -> Option<&CropAssessment> {
        self.assessments.iter().find(|a| a.crop == crop)
    }
}

impl Widget for CropsScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Min(10),   // Content
                Constraint::Length(1), // Nav
            ])
            .split(area);

        let title = Line::from(vec![
            Span::styled("Crops", Theme::title()),
            Span::styled(
                format!(
                    " - mode: {} ({} selected)",
                    self.selection.mode().as_str(),
                    self.selection.selected().len()
                ),
                Theme::dim(),
            ),
        ]);
        Paragraph::new(title).render(chunks[0], buf);

        let content = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
            .split(chunks[1]);

        self.render_list(content[0], buf);
        self.render_card(content[1], buf);

        let nav = Line::from(vec![
            Span::styled("[↑↓]", Theme::nav_key()),
            Span::styled("Navigate ", Theme::nav_label()),
            Span::styled("[Space]", Theme::nav_key()),
            Span::styled("Toggle ", Theme::nav_label()),
            Span::styled("[m]", Theme::nav_key()),
            Span::styled("Mode ", Theme::nav_label()),
            Span::styled("[Esc]", Theme::nav_key()),
            Span::styled("Back", Theme::nav_label()),
        ]);
        Paragraph::new(nav).render(chunks[2], buf);
    }
}

impl CropsScreen<'_> {
    fn render_list(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title("Registry")
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        let locked = self.selection.mode() == SelectionMode::All;

        let items: Vec<ListItem> = Crop::ALL
            .iter()
            .enumerate()
            .map(|(i, crop)| {
                let style = if i == self.selected_index {
                    Theme::selected()
                } else {
                    Style::default()
                };

                let checkbox = if self.selection.contains(*crop) {
                    "[x] "
                } else {
                    "[ ] "
                };
                let checkbox_style = if locked { Theme::dim() } else { Theme::normal() };

                let mut spans = vec![
                    Span::styled(checkbox, checkbox_style),
                    Span::raw(crop.as_str()),
                ];
                if let Some(a) = self.assessment_for(*crop) {
                    spans.push(Span::raw(" "));
                    spans.push(Span::styled(
                        a.status.symbol(),
                        Style::default().fg(a.status.color()),
                    ));
                }

                ListItem::new(Line::from(spans)).style(style)
            })
            .collect();

        List::new(items).render(inner, buf);
    }

    fn render_card(&self, area: Rect, buf: &mut Buffer) {
        let crop = match Crop::ALL.get(self.selected_index) {
            Some(c) => *c,
            None => return,
        };
        let profile = crop.profile();

        let (border_style, title_span) = match self.assessment_for(crop) {
            Some(a) => (
                Style::default().fg(a.status.color()),
                Span::styled(
                    format!("{} {}", a.status.symbol(), crop.as_str()),
                    Style::default().fg(a.status.color()),
                ),
            ),
            None => (Theme::border(), Span::styled(crop.as_str(), Theme::header())),
        };

        let block = Block::default()
            .title(title_span)
            .borders(Borders::ALL)
            .border_style(border_style);

        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines = Vec::new();

        match self.assessment_for(crop) {
            Some(a) => {
                lines.push(Line::from(vec![
                    Span::styled("Status: ", Theme::dim()),
                    Span::styled(a.status.as_str(), Style::default().fg(a.status.color())),
                ]));
                lines.push(Line::from(vec![
                    Span::styled("Next recommended harvest day: ", Theme::dim()),
                    Span::styled(a.next_optimal.to_string(), Theme::header()),
                ]));
                let humidity = match a.today_humidity {
                    HumiditySignal::DaytimeMean(h) => format!("Ø {:.0}% (daytime mean)", h),
                    HumiditySignal::DailyMax(h) => format!("{:.0}% (daily max)", h),
                    HumiditySignal::Missing => "–".to_string(),
                };
                lines.push(Line::from(vec![
                    Span::styled("Today's humidity: ", Theme::dim()),
                    Span::styled(humidity, Theme::normal()),
                ]));
            }
            None => {
                lines.push(Line::from(Span::styled(
                    "Not selected - no assessment",
                    Theme::dim(),
                )));
            }
        }

        lines.push(Line::from(vec![]));
        lines.push(Line::from(vec![
            Span::styled("Optimal temperature: ", Theme::dim()),
            Span::styled(
                format!(
                    "{:.0}°C – {:.0}°C",
                    profile.optimal_temp_min, profile.optimal_temp_max
                ),
                Theme::normal(),
            ),
        ]));
        lines.push(Line::from(vec![
            Span::styled("Max humidity: ", Theme::dim()),
            Span::styled(
                format!("{:.0}%", profile.optimal_humidity_max),
                Theme::normal(),
            ),
        ]));
        lines.push(Line::from(vec![]));
        lines.push(Line::from(Span::styled(profile.advisory, Theme::dim())));

        Paragraph::new(lines).wrap(Wrap { trim: true }).render(inner, buf);
    }
}
