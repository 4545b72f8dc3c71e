//! # UI 模块
//!
//! 仪表盘各区块的渲染组件。每个组件一个 `render` 函数，输入
//! Frame、区域和应用状态，组件自身不持有状态。
//!
//! ## 布局
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ 顶栏：标题 + Live + 刷新旋转 + 角标 + 用户   │
//! ├────────┬─────────────────────────────────────┤
//! │        │ 统计卡片 × 4（计数动画）            │
//! │ 侧边栏 ├──────────────────────┬──────────────┤
//! │  菜单  │ 流量条形图           │ 动态流       │
//! │        ├──────────────────────┴──────────────┤
//! │        │ Recent Orders | System Health       │
//! ├────────┴─────────────────────────────────────┤
//! │ 按键提示                                     │
//! └──────────────────────────────────────────────┘
//! ```

pub mod activity;
pub mod header;
pub mod health;
pub mod orders;
pub mod sidebar;
pub mod stats;
pub mod traffic;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Tabs},
};

use crate::app::{App, LowerTab};
use crate::theme::Theme;

/// 侧边栏展开宽度
const SIDEBAR_WIDTH: u16 = 20;
/// 侧边栏折叠宽度
const SIDEBAR_COLLAPSED_WIDTH: u16 = 5;

/// 绘制整个界面
pub fn render(f: &mut Frame, app: &App) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(1),
        ])
        .split(f.area());

    header::render(f, root[0], app);
    render_body(f, root[1], app);
    render_footer(f, root[2], app);
}

fn render_body(f: &mut Frame, area: Rect, app: &App) {
    let width = if app.sidebar_collapsed {
        SIDEBAR_COLLAPSED_WIDTH
    } else {
        SIDEBAR_WIDTH
    };
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(width), Constraint::Min(40)])
        .split(area);

    sidebar::render(f, columns[0], app);
    render_content(f, columns[1], app);
}

fn render_content(f: &mut Frame, area: Rect, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7),
            Constraint::Min(8),
            Constraint::Length(9),
        ])
        .split(area);

    stats::render(f, rows[0], app);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(66), Constraint::Percentage(34)])
        .split(rows[1]);
    traffic::render(f, middle[0], app);
    activity::render(f, middle[1], app);

    render_lower(f, rows[2], app);
}

/// 下方面板：标签栏 + 当前标签页内容
fn render_lower(f: &mut Frame, area: Rect, app: &App) {
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(5)])
        .split(area);

    let titles: Vec<Line> = LowerTab::ALL
        .iter()
        .map(|tab| {
            let style = if *tab == app.lower_tab {
                app.theme.tab_active()
            } else {
                app.theme.tab_inactive()
            };
            Line::from(Span::styled(format!(" {} ", tab.label()), style))
        })
        .collect();
    let tabs = Tabs::new(titles)
        .select(app.lower_tab.index())
        .divider(Span::styled("|", app.theme.text_dim()));
    f.render_widget(tabs, parts[0]);

    match app.lower_tab {
        LowerTab::RecentOrders => orders::render(f, parts[1], app),
        LowerTab::SystemHealth => health::render(f, parts[1], app),
    }
}

/// 底部按键提示
fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let hints = [
        ("q", "quit"),
        ("←→/1-4", "menu"),
        ("Tab", "panel"),
        ("r", "sync"),
        ("c", "sidebar"),
        ("d", "replay"),
    ];

    let mut spans = Vec::with_capacity(hints.len() * 2 + 1);
    spans.push(Span::raw(" "));
    for (key, desc) in hints {
        spans.push(Span::styled(key, theme.key_hint()));
        spans.push(Span::styled(format!(" {desc}   "), theme.text_dim()));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// 文本进度条（"██████░░░░ 78%"），统计卡片和健康面板共用
///
/// `tiered` 为真时条体颜色按百分比分档（健康面板），否则用强调色。
pub(crate) fn progress_line(
    theme: &Theme,
    percent: u16,
    width: u16,
    tiered: bool,
) -> Line<'static> {
    let percent = percent.min(100);
    let track = width.saturating_sub(6) as usize;
    let filled = track * percent as usize / 100;

    let bar_style = if tiered {
        theme.health_bar(percent)
    } else {
        theme.accent_style()
    };

    let mut bar = "█".repeat(filled);
    bar.push_str(&"░".repeat(track - filled));
    Line::from(vec![
        Span::styled(bar, bar_style),
        Span::styled(format!(" {percent}%"), theme.text_dim()),
    ])
}
