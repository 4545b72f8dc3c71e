//! 动态流：带语气着色圆点的事件列表。

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::App;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let block = Block::default()
        .title(Span::styled(" Activity Stream ", theme.text_style()))
        .borders(Borders::ALL)
        .border_style(theme.border_style());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let lines: Vec<Line> = app
        .snapshot
        .activity
        .iter()
        .take(inner.height as usize)
        .map(|event| {
            Line::from(vec![
                Span::styled(" ● ", theme.tone(event.tone)),
                Span::styled(event.text.clone(), theme.text_style()),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}
