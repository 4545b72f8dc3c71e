//! # Nova Runtime
//!
//! NovaAdmin 仪表盘的核心运行时库。
//!
//! ## 架构概述
//!
//! `nova-runtime` 是纯逻辑核心，不依赖任何 IO 或渲染引擎。
//! 数值动画通过 **注入的帧调度器** 与宿主层（Host）协作：
//!
//! ```text
//! Host                             Runtime
//!   │                                 │
//!   │  Rc<dyn FrameScheduler> ──────► │  CountUp::new(scheduler)
//!   │                                 │
//!   │ ──── start(target) ───────────► │  登记帧回调
//!   │                                 │
//!   │  每帧执行回调 ────────────────► │  value 按缓动曲线更新
//!   │                                 │
//!   │ ──── value() ─────────────────► │  读最新插值
//! ```
//!
//! 核心不拥有时间：真实宿主给它挂钟（每 ~16ms 一帧），测试给它
//! 虚拟时钟（[`ManualScheduler`]），动画因此是纯确定性计算。
//!
//! ## 核心类型
//!
//! - [`CountUp`]：数值动画句柄，每张统计卡片一个
//! - [`FrameScheduler`]：宿主注入的帧调度抽象
//! - [`ManualScheduler`]：手动推进的确定性调度器
//! - [`DashboardSnapshot`]：仪表盘固定数据快照
//!
//! ## 使用示例
//!
//! ```ignore
//! use std::rc::Rc;
//! use std::time::Duration;
//! use nova_runtime::{CountUp, ManualScheduler};
//!
//! let scheduler = Rc::new(ManualScheduler::new());
//! let counter = CountUp::new(scheduler.clone());
//!
//! // 0 -> 2431 的计数动画，默认 800ms 三次缓出
//! counter.start(2431.0);
//!
//! while counter.is_running() {
//!     scheduler.advance(Duration::from_millis(16));
//! }
//! assert_eq!(counter.value(), 2431.0);
//! ```
//!
//! ## 模块结构
//!
//! - [`countup`]：数值动画句柄
//! - [`easing`]：缓动函数库
//! - [`scheduler`]：帧调度抽象与确定性实现
//! - [`metrics`]：仪表盘数据模型与自检

pub mod countup;
pub mod easing;
pub mod metrics;
pub mod scheduler;

// 重导出核心类型
pub use countup::{CountUp, DEFAULT_DURATION};
pub use easing::EasingFunction;
pub use metrics::{
    ActivityEvent, ActivityTone, DashboardSnapshot, Finding, FindingLevel, HealthReport,
    OrderRecord, OrderStatus, StatCard, StatKind, TrafficPoint, group_thousands, verify_snapshot,
};
pub use scheduler::{FrameScheduler, ManualScheduler, TickCallback, TickToken};
