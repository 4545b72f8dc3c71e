//! # Config 模块
//!
//! 宿主配置管理，负责加载、校验和持久化应用配置。
//!
//! ## 配置优先级
//!
//! 1. 命令行参数（最高）
//! 2. 配置文件 `config.json`
//! 3. 内置默认值（最低）
//!
//! 配置文件缺失或损坏时回落到默认值，启动永远不会因为配置失败而中断。
//! 校验失败是例外：显式写出的非法值应该被用户看到，而不是被悄悄修正。

use std::fs;
use std::path::Path;
use std::time::Duration;

use nova_runtime::EasingFunction;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 配置错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// 序列化失败
    #[error("配置序列化失败: {0}")]
    SerializationFailed(String),

    /// 写入失败
    #[error("配置写入失败: {0}")]
    WriteFailed(String),

    /// 校验失败
    #[error("配置校验失败: {0}")]
    ValidationFailed(String),
}

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// 动画配置
    #[serde(default)]
    pub animation: AnimationConfig,

    /// 界面配置
    #[serde(default)]
    pub ui: UiConfig,

    /// 调试配置
    #[serde(default)]
    pub debug: DebugConfig,
}

/// 动画配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationConfig {
    /// 计数动画时长（毫秒）
    #[serde(default = "default_count_up_ms")]
    pub count_up_ms: u64,

    /// 缓动函数
    #[serde(default)]
    pub easing: EasingFunction,

    /// 帧间隔（毫秒），终端环境里充当帧率
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,

    /// 模拟刷新的旋转时长（毫秒）
    #[serde(default = "default_refresh_spin_ms")]
    pub refresh_spin_ms: u64,
}

/// 界面配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// 主题名称（dark / light）
    #[serde(default = "default_theme")]
    pub theme: String,

    /// 启动时侧边栏是否折叠
    #[serde(default)]
    pub sidebar_collapsed: bool,
}

/// 调试配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugConfig {
    /// 启动时是否自检演示数据
    ///
    /// 自检结果只写日志，不阻塞启动。debug 构建默认开启。
    #[serde(default = "default_fixture_check")]
    pub fixture_check: bool,
}

// 默认值函数
fn default_count_up_ms() -> u64 {
    800
}

fn default_tick_ms() -> u64 {
    16
}

fn default_refresh_spin_ms() -> u64 {
    900
}

fn default_theme() -> String {
    "dark".to_string()
}

fn default_fixture_check() -> bool {
    cfg!(debug_assertions)
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            count_up_ms: default_count_up_ms(),
            easing: EasingFunction::default(),
            tick_ms: default_tick_ms(),
            refresh_spin_ms: default_refresh_spin_ms(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            sidebar_collapsed: false,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            fixture_check: default_fixture_check(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            animation: AnimationConfig::default(),
            ui: UiConfig::default(),
            debug: DebugConfig::default(),
        }
    }
}

impl AppConfig {
    /// 从配置文件加载配置
    ///
    /// 文件不存在或解析失败时返回默认配置。
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            println!("⚠️ 配置文件不存在，使用默认配置: {}", path.display());
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(config) => {
                    println!("✅ 已加载配置: {}", path.display());
                    config
                }
                Err(e) => {
                    println!("⚠️ 配置文件解析失败，使用默认配置: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                println!("⚠️ 配置文件读取失败，使用默认配置: {}", e);
                Self::default()
            }
        }
    }

    /// 保存配置到文件
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializationFailed(e.to_string()))?;
        fs::write(path.as_ref(), content).map_err(|e| ConfigError::WriteFailed(e.to_string()))?;
        Ok(())
    }

    /// 校验配置合法性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.animation.count_up_ms == 0 {
            return Err(ConfigError::ValidationFailed(
                "count_up_ms 不能为 0".to_string(),
            ));
        }
        if self.animation.tick_ms == 0 {
            return Err(ConfigError::ValidationFailed("tick_ms 不能为 0".to_string()));
        }
        if self.animation.tick_ms > self.animation.count_up_ms {
            return Err(ConfigError::ValidationFailed(format!(
                "tick_ms ({}) 不应大于 count_up_ms ({})，动画将只剩终点帧",
                self.animation.tick_ms, self.animation.count_up_ms
            )));
        }
        if self.ui.theme != "dark" && self.ui.theme != "light" {
            return Err(ConfigError::ValidationFailed(format!(
                "未知主题: {}（支持 dark / light）",
                self.ui.theme
            )));
        }
        Ok(())
    }

    /// 计数动画时长
    pub fn count_up_duration(&self) -> Duration {
        Duration::from_millis(self.animation.count_up_ms)
    }

    /// 帧间隔
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.animation.tick_ms)
    }

    /// 模拟刷新的旋转时长
    pub fn refresh_spin(&self) -> Duration {
        Duration::from_millis(self.animation.refresh_spin_ms)
    }
}
