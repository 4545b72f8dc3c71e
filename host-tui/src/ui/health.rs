//! 系统健康面板：API 延迟、可用率和错误率三个指标盒。

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::app::App;
use crate::theme::Theme;
use crate::ui::progress_line;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let health = &app.snapshot.health;

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    // API 延迟：数值 + 负载条
    let latency_inner = metric_block(f, columns[0], theme, " API Latency ");
    let latency_lines = vec![
        Line::from(Span::styled(
            format!(" {} ms", health.api_latency_ms),
            theme.stat_value(),
        )),
        progress_line(theme, health.api_progress, latency_inner.width, true),
    ];
    f.render_widget(Paragraph::new(latency_lines), latency_inner);

    // 可用率
    let uptime_inner = metric_block(f, columns[1], theme, " Uptime ");
    let uptime_lines = vec![
        Line::from(Span::styled(
            format!(" {:.2}%", health.uptime_percent),
            theme.success_style(),
        )),
        Line::from(Span::styled(
            format!(" {}", health.uptime_note),
            theme.text_dim(),
        )),
    ];
    f.render_widget(Paragraph::new(uptime_lines), uptime_inner);

    // 错误率：超过 1% 转为警告色
    let error_style = if health.error_rate_percent <= 1.0 {
        theme.success_style()
    } else {
        theme.warning_style()
    };
    let error_inner = metric_block(f, columns[2], theme, " Error Rate ");
    let error_lines = vec![
        Line::from(Span::styled(
            format!(" {:.2}%", health.error_rate_percent),
            error_style,
        )),
        Line::from(Span::styled(
            format!(" {}", health.error_note),
            theme.text_dim(),
        )),
    ];
    f.render_widget(Paragraph::new(error_lines), error_inner);
}

/// 画指标盒的边框，返回内容区域
fn metric_block(f: &mut Frame, area: Rect, theme: &Theme, title: &'static str) -> Rect {
    let block = Block::default()
        .title(Span::styled(title, theme.text_dim()))
        .borders(Borders::ALL)
        .border_style(theme.border_style());
    let inner = block.inner(area);
    f.render_widget(block, area);
    inner
}
