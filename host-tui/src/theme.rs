//! # Theme 模块
//!
//! 终端配色方案。dark / light 两套，语义化样式集中在这里，
//! 组件代码只引用语义样式，不直接碰颜色值。

use nova_runtime::{ActivityTone, OrderStatus};
use ratatui::style::{Color, Modifier, Style};

/// 主题
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    // ===== 基础色 =====
    /// 品牌强调色
    pub accent: Color,
    /// 正文
    pub text: Color,
    /// 次要文本
    pub dim: Color,
    /// 边框
    pub border: Color,
    /// 选中项的前景
    pub selected_fg: Color,

    // ===== 语义色 =====
    /// 成功 / 正向
    pub success: Color,
    /// 信息
    pub info: Color,
    /// 警告
    pub warning: Color,
    /// 错误
    pub error: Color,
    /// 例行 / 灰
    pub muted: Color,
}

impl Theme {
    /// 深色主题
    pub fn dark() -> Self {
        Self {
            accent: Color::Rgb(22, 119, 255),
            text: Color::Rgb(235, 235, 245),
            dim: Color::Rgb(130, 130, 150),
            border: Color::Rgb(70, 70, 90),
            selected_fg: Color::Rgb(255, 255, 255),
            success: Color::Rgb(82, 196, 26),
            info: Color::Rgb(22, 119, 255),
            warning: Color::Rgb(250, 173, 20),
            error: Color::Rgb(255, 77, 79),
            muted: Color::Rgb(120, 120, 140),
        }
    }

    /// 浅色主题
    pub fn light() -> Self {
        Self {
            accent: Color::Rgb(22, 119, 255),
            text: Color::Rgb(30, 30, 40),
            dim: Color::Rgb(110, 110, 130),
            border: Color::Rgb(180, 180, 200),
            selected_fg: Color::Rgb(255, 255, 255),
            success: Color::Rgb(56, 158, 13),
            info: Color::Rgb(9, 88, 217),
            warning: Color::Rgb(212, 136, 6),
            error: Color::Rgb(207, 19, 34),
            muted: Color::Rgb(140, 140, 160),
        }
    }

    /// 按名称选择主题，未知名称回落到深色
    pub fn by_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            _ => Self::dark(),
        }
    }

    // ===== 语义样式 =====

    /// 页面标题
    pub fn title(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    /// 正文
    pub fn text_style(&self) -> Style {
        Style::default().fg(self.text)
    }

    /// 次要文本
    pub fn text_dim(&self) -> Style {
        Style::default().fg(self.dim)
    }

    /// 统计值（大数字）
    pub fn stat_value(&self) -> Style {
        Style::default().fg(self.text).add_modifier(Modifier::BOLD)
    }

    /// 边框
    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// 强调（链接、操作入口）
    pub fn accent_style(&self) -> Style {
        Style::default().fg(self.accent)
    }

    /// 选中的菜单项
    pub fn menu_selected(&self) -> Style {
        Style::default()
            .bg(self.accent)
            .fg(self.selected_fg)
            .add_modifier(Modifier::BOLD)
    }

    /// 激活的标签页
    pub fn tab_active(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    /// 未激活的标签页
    pub fn tab_inactive(&self) -> Style {
        Style::default().fg(self.dim)
    }

    /// 表头
    pub fn table_header(&self) -> Style {
        Style::default().fg(self.dim).add_modifier(Modifier::BOLD)
    }

    /// Live 徽标
    pub fn live_tag(&self) -> Style {
        Style::default().fg(self.success).add_modifier(Modifier::BOLD)
    }

    /// 成功
    pub fn success_style(&self) -> Style {
        Style::default().fg(self.success)
    }

    /// 信息
    pub fn info_style(&self) -> Style {
        Style::default().fg(self.info)
    }

    /// 警告
    pub fn warning_style(&self) -> Style {
        Style::default().fg(self.warning)
    }

    /// 错误
    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error)
    }

    /// 按键提示里的按键名
    pub fn key_hint(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    /// 动态流的语气颜色
    pub fn tone(&self, tone: ActivityTone) -> Style {
        let color = match tone {
            ActivityTone::Success => self.success,
            ActivityTone::Info => self.info,
            ActivityTone::Warning => self.warning,
            ActivityTone::Muted => self.muted,
        };
        Style::default().fg(color)
    }

    /// 订单状态颜色
    pub fn order_status(&self, status: OrderStatus) -> Style {
        let color = match status {
            OrderStatus::Shipped => self.success,
            OrderStatus::Processing => self.info,
            OrderStatus::Pending => self.warning,
            OrderStatus::Cancelled => self.error,
        };
        Style::default().fg(color)
    }

    /// 健康指标条的颜色，按占比分档
    pub fn health_bar(&self, percent: u16) -> Style {
        let color = if percent >= 90 {
            self.success
        } else if percent >= 60 {
            self.warning
        } else {
            self.error
        };
        Style::default().fg(color)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
