//! # Headless 模块
//!
//! 无终端冒烟模式：在确定性调度器上用虚拟帧把四个计数动画推到
//! 收敛，打印采样轨迹和最终值。CI 和调试用，不需要 TTY。

use std::rc::Rc;
use std::time::Duration;

use tracing::debug;

use nova_runtime::{CountUp, DashboardSnapshot, FrameScheduler, ManualScheduler};

use crate::config::AppConfig;

/// 采样间隔（虚拟毫秒）
const SAMPLE_EVERY: Duration = Duration::from_millis(200);

/// 运行 headless 冒烟
///
/// # 参数
/// - `config`: 应用配置
/// - `max_frames`: 虚拟帧数上限，超出视为动画失控
/// - `as_json`: 结束后把数据快照以 JSON 打到 stdout
pub fn run(config: &AppConfig, max_frames: u32, as_json: bool) -> anyhow::Result<()> {
    let snapshot = DashboardSnapshot::demo();
    let scheduler = Rc::new(ManualScheduler::new());
    let tick = config.tick_interval();

    let counters: Vec<CountUp> = snapshot
        .stats
        .iter()
        .map(|card| {
            let counter = CountUp::new(scheduler.clone()).with_easing(config.animation.easing);
            counter.start_with_duration(card.target, config.count_up_duration());
            counter
        })
        .collect();

    println!("📦 NovaAdmin headless 冒烟");
    println!(
        "   动画时长 {}ms，帧间隔 {}ms，缓动 {:?}",
        config.animation.count_up_ms, config.animation.tick_ms, config.animation.easing
    );

    // t=0 采样：首帧之前全是 0
    print_sample(&scheduler, &counters, &snapshot);
    let mut next_sample = SAMPLE_EVERY;

    let mut frames = 0u32;
    while counters.iter().any(|c| c.is_running()) && frames < max_frames {
        scheduler.advance(tick);
        frames += 1;
        if scheduler.now() >= next_sample {
            print_sample(&scheduler, &counters, &snapshot);
            next_sample += SAMPLE_EVERY;
        }
    }

    if counters.iter().any(|c| c.is_running()) {
        anyhow::bail!("动画未在 {max_frames} 帧内收敛");
    }

    println!(
        "✅ 全部收敛：{} 帧，虚拟 {}ms",
        frames,
        scheduler.now().as_millis()
    );
    for (counter, card) in counters.iter().zip(&snapshot.stats) {
        println!("   {:<16} {}", card.title, card.formatted(counter.value()));
        debug!("{} 终值 {}", card.title, counter.value());
    }

    if as_json {
        // 机器可读输出
        println!("{}", snapshot.to_json()?);
    }
    Ok(())
}

/// 打印一行采样：虚拟时刻 + 各卡片的格式化当前值
fn print_sample(
    scheduler: &Rc<ManualScheduler>,
    counters: &[CountUp],
    snapshot: &DashboardSnapshot,
) {
    let values = counters
        .iter()
        .zip(&snapshot.stats)
        .map(|(counter, card)| card.formatted(counter.value()))
        .collect::<Vec<_>>()
        .join("  ");
    println!("   t={:>4}ms  {}", scheduler.now().as_millis(), values);
}
