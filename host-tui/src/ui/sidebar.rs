//! 侧边栏：品牌名和菜单。折叠时只留首字母窄条。

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::app::{App, MenuItem};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let brand = if app.sidebar_collapsed {
        " 🚀".to_string()
    } else {
        format!(" 🚀 {}", app.snapshot.brand)
    };

    let mut lines = vec![Line::from(Span::styled(brand, theme.title())), Line::from("")];

    for (i, item) in MenuItem::ALL.iter().enumerate() {
        let style = if *item == app.menu {
            theme.menu_selected()
        } else {
            theme.text_dim()
        };
        let label = if app.sidebar_collapsed {
            let initial = item.label().chars().next().unwrap_or(' ');
            format!(" {initial} ")
        } else {
            format!(" {} {} ", i + 1, item.label())
        };
        lines.push(Line::from(Span::styled(label, style)));
    }

    f.render_widget(Paragraph::new(lines), inner);
}
