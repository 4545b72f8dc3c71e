//! # Easing 模块
//!
//! 缓动函数库，用于数值动画的时间插值。

use serde::{Deserialize, Serialize};

/// 缓动函数类型
///
/// 配置文件按名称选择曲线，默认三次缓出（先快后慢，减速落向目标值）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EasingFunction {
    /// 线性（匀速）
    Linear,
    /// 三次缓入
    EaseInCubic,
    /// 三次缓出
    #[default]
    EaseOutCubic,
    /// 三次缓入缓出
    EaseInOutCubic,
    /// 二次缓出
    EaseOutQuad,
}

impl EasingFunction {
    /// 计算缓动值
    ///
    /// # 参数
    /// - `t`: 时间进度 (0.0 - 1.0)
    ///
    /// # 返回
    /// - 缓动后的进度值 (0.0 - 1.0)
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);

        match self {
            EasingFunction::Linear => t,
            EasingFunction::EaseInCubic => t * t * t,
            EasingFunction::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            EasingFunction::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            EasingFunction::EaseOutQuad => 1.0 - (1.0 - t) * (1.0 - t),
        }
    }
}
