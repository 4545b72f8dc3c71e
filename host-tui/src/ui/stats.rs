//! 统计卡片行：四张卡片横排，数值来自各自的计数动画。

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use nova_runtime::StatCard;

use crate::app::App;
use crate::ui::progress_line;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let count = app.snapshot.stats.len().max(1) as u32;
    let constraints: Vec<Constraint> =
        (0..count).map(|_| Constraint::Ratio(1, count)).collect();
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (i, (chunk, card)) in columns.iter().zip(app.snapshot.stats.iter()).enumerate() {
        render_card(f, *chunk, app, card, app.counter_value(i));
    }
}

fn render_card(f: &mut Frame, area: Rect, app: &App, card: &StatCard, animated: f64) {
    let theme = &app.theme;
    let block = Block::default()
        .title(Span::styled(format!(" {} ", card.title), theme.text_dim()))
        .borders(Borders::ALL)
        .border_style(theme.border_style());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut lines = vec![
        Line::from(Span::styled(
            format!(" {}", card.formatted(animated)),
            theme.stat_value(),
        )),
        Line::from(""),
    ];

    // 进度条随动画值走，没有进度条的卡片留空行
    match card.progress_percent(animated) {
        Some(percent) => lines.push(progress_line(theme, percent, inner.width, false)),
        None => lines.push(Line::from("")),
    }

    lines.push(Line::from(Span::styled(
        format!(" {}", card.footnote),
        theme.text_dim(),
    )));

    f.render_widget(Paragraph::new(lines), inner);
}
