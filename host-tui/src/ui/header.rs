//! 顶栏：页面标题、Live 徽标、刷新旋转、通知角标和用户名。

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::app::App;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(32)])
        .split(inner);

    // 左：页面标题 + Live 徽标
    let left = Line::from(vec![
        Span::styled(format!(" {} ", app.page_title()), theme.title()),
        Span::styled(" Live ", theme.live_tag()),
    ]);
    f.render_widget(Paragraph::new(left), halves[0]);

    // 右：同步状态 + 通知角标 + 用户名
    let sync = match app.spinner_frame() {
        Some(frame) => Span::styled(format!("{frame} syncing"), theme.warning_style()),
        None => Span::styled("synced", theme.text_dim()),
    };
    let right = Line::from(vec![
        sync,
        Span::styled(
            format!("  🔔{}", app.snapshot.notification_count),
            theme.text_style(),
        ),
        Span::styled(format!("  {} ", app.snapshot.username), theme.text_dim()),
    ]);
    f.render_widget(Paragraph::new(right).alignment(Alignment::Right), halves[1]);
}
