//! 最近订单表：客户、订单号、金额、状态和操作列。

use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    widgets::{Block, Borders, Cell, Row, Table},
};

use crate::app::App;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;

    let header = Row::new(vec![
        Cell::from("Customer").style(theme.table_header()),
        Cell::from("Order ID").style(theme.table_header()),
        Cell::from("Total").style(theme.table_header()),
        Cell::from("Status").style(theme.table_header()),
        Cell::from("Action").style(theme.table_header()),
    ]);

    let rows: Vec<Row> = app
        .snapshot
        .orders
        .iter()
        .map(|order| {
            Row::new(vec![
                Cell::from(order.customer.clone()).style(theme.text_style()),
                Cell::from(order.order_id.clone()).style(theme.text_dim()),
                Cell::from(order.total_display()).style(theme.text_style()),
                Cell::from(order.status.label()).style(theme.order_status(order.status)),
                Cell::from("View").style(theme.accent_style()),
            ])
        })
        .collect();

    let widths = [
        Constraint::Min(14),
        Constraint::Length(12),
        Constraint::Length(10),
        Constraint::Length(12),
        Constraint::Length(6),
    ];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border_style()),
    );
    f.render_widget(table, area);
}
