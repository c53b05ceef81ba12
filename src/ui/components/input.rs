use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Single-line text entry with a block cursor, used for the place name.
pub struct InputWidget<'a> {
    label: &'a str,
    value: &'a str,
    focused: bool,
}

impl<'a> InputWidget<'a> {
    pub fn new(label: &'a str, value: &'a str) -> Self {
        Self {
            label,
            value,
            focused: false,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for InputWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Theme::border_focused()
        } else {
            Theme::border()
        };

        let block = Block::default()
            .title(self.label)
            .borders(Borders::ALL)
            .border_style(border_style);

        let inner = block.inner(area);
        block.render(area, buf);

        if self.focused {
            // Cursor always sits at the end of the buffer.
            let display_value = Line::from(vec![
                Span::raw(self.value),
                Span::styled(" ", Theme::selected()),
            ]);
            let para = Paragraph::new(display_value);
            para.render(inner, buf);
        } else {
            let para = Paragraph::new(self.value);
            para.render(inner, buf);
        }
    }
}
