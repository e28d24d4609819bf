use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::Style,
    widgets::Paragraph,
};

use crate::ui::{screens::centered_box, theme::Theme};

pub fn render(frame: &mut Frame<'_>, area: Rect) {
    let theme = Theme::default();
    frame.render_widget(
        Paragraph::new("Loading...")
            .style(Style::default().fg(theme.text_muted))
            .alignment(Alignment::Center),
        centered_box(area.width, 1, area),
    );
}
