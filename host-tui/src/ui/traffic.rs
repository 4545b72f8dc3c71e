//! 流量条形图：一周七天，每天两条文本条，用户数和订单数各一。

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use nova_runtime::group_thousands;

use crate::app::App;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let block = Block::default()
        .title(Span::styled(" Traffic & Orders ", theme.text_style()))
        .borders(Borders::ALL)
        .border_style(theme.border_style());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let traffic = &app.snapshot.traffic;
    let max_users = traffic.iter().map(|p| p.users).max().unwrap_or(1).max(1);
    let max_orders = traffic.iter().map(|p| p.orders).max().unwrap_or(1).max(1);

    // 数字列之外剩下的宽度分给两段条体，用户条占大头
    let avail = inner.width.saturating_sub(22) as usize;
    let users_track = avail * 2 / 3;
    let orders_track = avail - users_track;

    let mut lines = vec![Line::from(vec![
        Span::styled(" ■ users", theme.info_style()),
        Span::styled("  ■ orders", theme.success_style()),
    ])];

    for point in traffic.iter().take(inner.height.saturating_sub(1) as usize) {
        lines.push(Line::from(vec![
            Span::styled(format!(" {:<4}", point.day), theme.text_dim()),
            Span::styled(
                format!("{:>6} ", group_thousands(point.users as i64)),
                theme.text_style(),
            ),
            Span::styled(bar(point.users, max_users, users_track), theme.info_style()),
            Span::styled(format!(" {:>3} ", point.orders), theme.text_style()),
            Span::styled(
                bar(point.orders, max_orders, orders_track),
                theme.success_style(),
            ),
        ]));
    }

    f.render_widget(Paragraph::new(lines), inner);
}

/// 长度与数值成比例的条体
fn bar(value: u32, max: u32, track: usize) -> String {
    let len = (value as usize * track) / max as usize;
    "█".repeat(len)
}
