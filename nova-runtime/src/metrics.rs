//! # Metrics 模块
//!
//! 仪表盘的固定数据模型。所有业务数字都是内联常量：没有抓取、
//! 没有持久化、没有真实采集，宿主和测试共享同一份快照。
//!
//! ## 设计原则
//!
//! - 数据与展示分离：卡片只描述目标值和格式元信息（前后缀、小数位、
//!   进度条），怎么画全是宿主的事。
//! - 一位小数的百分比卡片按约定放大 10 倍做动画（动画核心只产整数），
//!   展示时由 [`StatCard::formatted`] 按 `decimals` 缩回去。
//! - [`verify_snapshot`] 提供纯函数自检，宿主在调试构建启动时跑一遍。

use serde::{Deserialize, Serialize};

// ========== 统计卡片 ==========

/// 统计卡片种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatKind {
    /// 今日活跃用户
    UsersToday,
    /// 订单数
    Orders,
    /// 营收
    Revenue,
    /// 转化率
    ConversionRate,
}

/// 单张统计卡片
///
/// `target` 是动画目标值，已按 `decimals` 预放大；展示时除以
/// `10^decimals` 还原（例如转化率 4.8% 存成 48，decimals = 1）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatCard {
    /// 卡片种类
    pub kind: StatKind,
    /// 标题
    pub title: String,
    /// 动画目标值（已预放大）
    pub target: f64,
    /// 展示保留的小数位数
    pub decimals: u32,
    /// 数值前缀（如 "$"）
    pub prefix: Option<String>,
    /// 数值后缀（如 "%"、" / today"）
    pub suffix: Option<String>,
    /// 固定进度条百分比（0-100）
    pub progress: Option<u16>,
    /// 达成目标（展示尺度）；设置后进度条按当前值动态计算
    pub goal: Option<f64>,
    /// 脚注
    pub footnote: String,
}

impl StatCard {
    /// 创建新卡片
    pub fn new(kind: StatKind, title: impl Into<String>, target: f64) -> Self {
        Self {
            kind,
            title: title.into(),
            target,
            decimals: 0,
            prefix: None,
            suffix: None,
            progress: None,
            goal: None,
            footnote: String::new(),
        }
    }

    /// 设置小数位数（目标值按 10^decimals 预放大）
    pub fn with_decimals(mut self, decimals: u32) -> Self {
        self.decimals = decimals;
        self
    }

    /// 设置前缀
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// 设置后缀
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    /// 设置固定进度条
    pub fn with_progress(mut self, percent: u16) -> Self {
        self.progress = Some(percent);
        self
    }

    /// 设置达成目标（进度条改为按当前值动态计算）
    pub fn with_goal(mut self, goal: f64) -> Self {
        self.goal = Some(goal);
        self
    }

    /// 设置脚注
    pub fn with_footnote(mut self, footnote: impl Into<String>) -> Self {
        self.footnote = footnote.into();
        self
    }

    /// 把动画值换算到展示尺度
    pub fn display_value(&self, animated: f64) -> f64 {
        animated / 10_f64.powi(self.decimals as i32)
    }

    /// 格式化动画值：缩放、小数位、千分位、前后缀
    pub fn formatted(&self, animated: f64) -> String {
        let scaled = self.display_value(animated);
        let body = if self.decimals == 0 {
            group_thousands(scaled as i64)
        } else {
            format!("{:.*}", self.decimals as usize, scaled)
        };

        let mut out = String::new();
        if let Some(prefix) = &self.prefix {
            out.push_str(prefix);
        }
        out.push_str(&body);
        if let Some(suffix) = &self.suffix {
            out.push_str(suffix);
        }
        out
    }

    /// 进度条百分比
    ///
    /// 设置了 `goal` 的卡片按当前动画值动态计算（转化率卡片随动画
    /// 一起爬升），否则用固定值；没有进度条的卡片返回 None。
    pub fn progress_percent(&self, animated: f64) -> Option<u16> {
        if let Some(goal) = self.goal {
            let percent = (self.display_value(animated) / goal * 100.0).clamp(0.0, 100.0);
            return Some(percent.round() as u16);
        }
        self.progress
    }
}

/// 千分位分组（2431 -> "2,431"）
pub fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if n < 0 { format!("-{grouped}") } else { grouped }
}

// ========== 流量 / 订单 / 动态 ==========

/// 一天的流量数据点
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficPoint {
    /// 星期几标签
    pub day: String,
    /// 用户数
    pub users: u32,
    /// 订单数
    pub orders: u32,
}

impl TrafficPoint {
    /// 创建数据点
    pub fn new(day: impl Into<String>, users: u32, orders: u32) -> Self {
        Self {
            day: day.into(),
            users,
            orders,
        }
    }
}

/// 订单状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    /// 已发货
    Shipped,
    /// 处理中
    Processing,
    /// 待处理
    Pending,
    /// 已取消
    Cancelled,
}

impl OrderStatus {
    /// 展示文本
    pub fn label(&self) -> &'static str {
        match self {
            Self::Shipped => "Shipped",
            Self::Processing => "Processing",
            Self::Pending => "Pending",
            Self::Cancelled => "Cancelled",
        }
    }
}

/// 一条最近订单记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    /// 客户名
    pub customer: String,
    /// 订单号
    pub order_id: String,
    /// 金额（美元）
    pub total: f64,
    /// 状态
    pub status: OrderStatus,
}

impl OrderRecord {
    /// 创建订单记录
    pub fn new(
        customer: impl Into<String>,
        order_id: impl Into<String>,
        total: f64,
        status: OrderStatus,
    ) -> Self {
        Self {
            customer: customer.into(),
            order_id: order_id.into(),
            total,
            status,
        }
    }

    /// 金额展示文本（"$149.99"）
    pub fn total_display(&self) -> String {
        format!("${:.2}", self.total)
    }
}

/// 动态条目的色调
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityTone {
    /// 正向（新订单）
    Success,
    /// 中性信息
    Info,
    /// 需要关注
    Warning,
    /// 例行事务
    Muted,
}

/// 一条动态
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEvent {
    /// 色调
    pub tone: ActivityTone,
    /// 文本
    pub text: String,
}

impl ActivityEvent {
    /// 创建动态条目
    pub fn new(tone: ActivityTone, text: impl Into<String>) -> Self {
        Self {
            tone,
            text: text.into(),
        }
    }
}

/// 系统健康面板数据
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    /// API 延迟（毫秒）
    pub api_latency_ms: u32,
    /// API 延迟健康度（0-100）
    pub api_progress: u16,
    /// 可用率（百分比）
    pub uptime_percent: f64,
    /// 可用率备注
    pub uptime_note: String,
    /// 错误率（百分比）
    pub error_rate_percent: f64,
    /// 错误率备注
    pub error_note: String,
}

// ========== 快照 ==========

/// 整个仪表盘的一份数据快照
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    /// 品牌名
    pub brand: String,
    /// 当前登录用户
    pub username: String,
    /// 未读通知数
    pub notification_count: u8,
    /// 统计卡片
    pub stats: Vec<StatCard>,
    /// 一周流量
    pub traffic: Vec<TrafficPoint>,
    /// 最近订单
    pub orders: Vec<OrderRecord>,
    /// 动态流
    pub activity: Vec<ActivityEvent>,
    /// 系统健康
    pub health: HealthReport,
}

impl DashboardSnapshot {
    /// 演示数据集
    pub fn demo() -> Self {
        Self {
            brand: "NovaAdmin".to_string(),
            username: "Admin".to_string(),
            notification_count: 5,
            stats: vec![
                StatCard::new(StatKind::UsersToday, "Active Users", 2431.0)
                    .with_suffix(" / today")
                    .with_progress(78)
                    .with_footnote("+18% vs yesterday"),
                StatCard::new(StatKind::Orders, "Orders", 87.0)
                    .with_progress(62)
                    .with_footnote("Conversion funnel improving"),
                StatCard::new(StatKind::Revenue, "Revenue", 12490.0)
                    .with_prefix("$")
                    .with_footnote("Today • USD"),
                // 4.8% 放大 10 倍做动画，进度条按 6.0% 目标动态计算
                StatCard::new(StatKind::ConversionRate, "Conversion Rate", 48.0)
                    .with_decimals(1)
                    .with_suffix("%")
                    .with_goal(6.0)
                    .with_footnote("Goal: 6.0%"),
            ],
            traffic: vec![
                TrafficPoint::new("Mon", 1200, 32),
                TrafficPoint::new("Tue", 1700, 55),
                TrafficPoint::new("Wed", 1400, 43),
                TrafficPoint::new("Thu", 2100, 72),
                TrafficPoint::new("Fri", 2600, 91),
                TrafficPoint::new("Sat", 2300, 77),
                TrafficPoint::new("Sun", 1900, 60),
            ],
            orders: vec![
                OrderRecord::new("John Doe", "#ORD-1023", 149.99, OrderStatus::Shipped),
                OrderRecord::new("Sarah Smith", "#ORD-1024", 89.00, OrderStatus::Processing),
                OrderRecord::new("Ali Hassan", "#ORD-1025", 240.33, OrderStatus::Pending),
                OrderRecord::new("Maria Lopez", "#ORD-1026", 61.40, OrderStatus::Cancelled),
            ],
            activity: vec![
                ActivityEvent::new(ActivityTone::Success, "New order #1026 from Germany"),
                ActivityEvent::new(ActivityTone::Info, "3 new users signed up"),
                ActivityEvent::new(ActivityTone::Warning, "Inventory low on Product X"),
                ActivityEvent::new(ActivityTone::Muted, "Nightly backup completed"),
            ],
            health: HealthReport {
                api_latency_ms: 144,
                api_progress: 92,
                uptime_percent: 99.98,
                uptime_note: "Last 30 days".to_string(),
                error_rate_percent: 0.17,
                error_note: "Within safe limits".to_string(),
            },
        }
    }

    /// 序列化为 JSON 字符串（headless 输出用）
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// 从 JSON 字符串反序列化
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

// ========== 快照自检 ==========

/// 自检发现的级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FindingLevel {
    /// 信息提示
    Info,
    /// 警告（建议修复）
    Warn,
    /// 错误（必须修复）
    Error,
}

impl std::fmt::Display for FindingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warn => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

/// 一条自检发现
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    /// 级别
    pub level: FindingLevel,
    /// 消息
    pub message: String,
}

impl Finding {
    /// 创建错误发现
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: FindingLevel::Error,
            message: message.into(),
        }
    }

    /// 创建警告发现
    pub fn warn(message: impl Into<String>) -> Self {
        Self {
            level: FindingLevel::Warn,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.level, self.message)
    }
}

/// 检查快照数据的一致性
///
/// 纯函数，宿主在调试构建启动时跑一遍，把发现写进日志。
///
/// # 返回
///
/// 发现列表，空列表表示数据无异常
pub fn verify_snapshot(snapshot: &DashboardSnapshot) -> Vec<Finding> {
    let mut findings = Vec::new();

    if snapshot.stats.is_empty() {
        findings.push(Finding::error("统计卡片列表为空"));
    }
    for card in &snapshot.stats {
        if !card.target.is_finite() {
            findings.push(Finding::error(format!("卡片 {} 的目标值不是有限数", card.title)));
        }
        if let Some(progress) = card.progress {
            if progress > 100 {
                findings.push(Finding::error(format!(
                    "卡片 {} 的进度条超出 100: {progress}",
                    card.title
                )));
            }
        }
        if let Some(goal) = card.goal {
            if goal <= 0.0 {
                findings.push(Finding::error(format!(
                    "卡片 {} 的目标必须为正: {goal}",
                    card.title
                )));
            }
        }
        if card.decimals > 3 {
            findings.push(Finding::warn(format!(
                "卡片 {} 保留 {} 位小数，展示会很拥挤",
                card.title, card.decimals
            )));
        }
    }

    if snapshot.traffic.is_empty() {
        findings.push(Finding::error("流量数据为空"));
    } else if snapshot.traffic.len() != 7 {
        findings.push(Finding::warn(format!(
            "周流量数据应有 7 天，实际 {} 天",
            snapshot.traffic.len()
        )));
    }

    if snapshot.orders.is_empty() {
        findings.push(Finding::warn("最近订单列表为空"));
    }

    if snapshot.health.api_progress > 100 {
        findings.push(Finding::error(format!(
            "API 健康度超出 100: {}",
            snapshot.health.api_progress
        )));
    }
    if !(0.0..=100.0).contains(&snapshot.health.uptime_percent) {
        findings.push(Finding::error(format!(
            "可用率超出范围: {}",
            snapshot.health.uptime_percent
        )));
    }
    if snapshot.health.error_rate_percent < 0.0 {
        findings.push(Finding::error(format!(
            "错误率为负: {}",
            snapshot.health.error_rate_percent
        )));
    }

    findings
}
