//! # CountUp 模块
//!
//! 数值动画核心：把一个离散的目标值变成一串平滑收敛的中间值。
//!
//! ## 设计原则
//!
//! - 每个被展示的统计值持有一个独立句柄 [`CountUp`]，句柄之间没有任何
//!   共享状态，也不需要协调。
//! - 每次 [`start`](CountUp::start) 都是一次全新的运行：从 0 起步重新
//!   播放（刻意行为，目标值没变也会重播，对应视图的重复挂载语义），
//!   并按代次作废上一次运行。
//! - 被取代的运行可能还有回调滞留在调度器队列里。回调执行时核对代次，
//!   不匹配就放弃写入；正确性不依赖调度器真的把回调移出队列。
//! - 回调只持有弱引用。宿主销毁句柄或调度器后，滞留的回调静默失效，
//!   这不是错误，也不上报。
//!
//! ## 插值公式
//!
//! ```text
//! progress = clamp((now - start_time) / duration, 0, 1)
//! eased    = easing(progress)          默认 1 - (1 - p)^3
//! value    = round(target * eased)     四舍五入，远离零
//! ```
//!
//! progress 达到 1 的那一帧直接写入精确的 target，不经过舍入，
//! 保证最终显示值恰好落在目标上。

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use crate::easing::EasingFunction;
use crate::scheduler::{FrameScheduler, TickToken};

/// 默认动画时长
pub const DEFAULT_DURATION: Duration = Duration::from_millis(800);

/// 一次运行的全部内部状态
struct CountUpState {
    /// 当前可观测值，唯一对外暴露的属性
    value: f64,
    /// 本次运行的目标值
    target: f64,
    /// 本次运行的时长
    duration: Duration,
    /// start() 调用时刻（调度器时钟）
    start_time: Duration,
    /// 代次，每次 start() / cancel() 递增
    generation: u64,
    /// 挂起的帧回调
    pending: Option<TickToken>,
    /// 缓动函数
    easing: EasingFunction,
}

/// 数值动画句柄
///
/// 对外只有两类操作：读当前值、取消。启动新目标会作废进行中的运行，
/// 同一句柄上不会有两次运行同时写入观测值。
///
/// # 示例
///
/// ```ignore
/// let scheduler = Rc::new(ManualScheduler::new());
/// let counter = CountUp::new(scheduler.clone());
///
/// counter.start(2431.0);
/// while counter.is_running() {
///     scheduler.advance(Duration::from_millis(16));
/// }
/// assert_eq!(counter.value(), 2431.0);
/// ```
pub struct CountUp {
    state: Rc<RefCell<CountUpState>>,
    scheduler: Rc<dyn FrameScheduler>,
}

impl CountUp {
    /// 创建新句柄，尚未启动任何运行
    pub fn new(scheduler: Rc<dyn FrameScheduler>) -> Self {
        Self {
            state: Rc::new(RefCell::new(CountUpState {
                value: 0.0,
                target: 0.0,
                duration: DEFAULT_DURATION,
                start_time: Duration::ZERO,
                generation: 0,
                pending: None,
                easing: EasingFunction::default(),
            })),
            scheduler,
        }
    }

    /// 设置缓动函数
    pub fn with_easing(self, easing: EasingFunction) -> Self {
        self.state.borrow_mut().easing = easing;
        self
    }

    /// 以默认时长（800ms）启动一次新的运行
    pub fn start(&self, target: f64) {
        self.start_with_duration(target, DEFAULT_DURATION);
    }

    /// 启动一次新的运行，目标值与时长只作用于本次运行
    ///
    /// 立即作废进行中的运行（若有），观测值回到 0，然后逐帧向
    /// `target` 收敛。零时长没有中间帧，直接落在目标值上。
    pub fn start_with_duration(&self, target: f64, duration: Duration) {
        {
            let mut state = self.state.borrow_mut();
            // 1. 作废上一次运行：代次递增后，滞留的旧回调会自行放弃
            state.generation += 1;
            if let Some(token) = state.pending.take() {
                self.scheduler.cancel(token);
            }

            // 2. 总是从 0 重新起步，不从上一次显示值继续
            state.value = 0.0;
            state.target = target;
            state.duration = duration;
            state.start_time = self.scheduler.now();

            // 3. 零时长直接完成，不调度
            if duration.is_zero() {
                state.value = target;
                return;
            }
        }

        let generation = self.state.borrow().generation;
        let token = schedule_tick(&self.scheduler, &self.state, generation);
        self.state.borrow_mut().pending = Some(token);
    }

    /// 读取最新计算值
    ///
    /// 一次运行的首帧触发前读到的是 0。
    pub fn value(&self) -> f64 {
        self.state.borrow().value
    }

    /// 是否还有挂起的帧回调
    pub fn is_running(&self) -> bool {
        self.state.borrow().pending.is_some()
    }

    /// 取消当前运行
    ///
    /// 幂等：对已完成或已取消的句柄再调用是无操作。取消只停住更新，
    /// 不改变已经写入的观测值。
    pub fn cancel(&self) {
        let mut state = self.state.borrow_mut();
        state.generation += 1;
        if let Some(token) = state.pending.take() {
            self.scheduler.cancel(token);
        }
    }
}

impl Drop for CountUp {
    fn drop(&mut self) {
        // 句柄销毁后不允许再有回调写入
        self.cancel();
    }
}

/// 登记下一帧回调
///
/// 回调持有状态和调度器的弱引用，二者任一已销毁则静默退出；
/// 代次不匹配说明所属运行已被取代，同样静默退出。
fn schedule_tick(
    scheduler: &Rc<dyn FrameScheduler>,
    state: &Rc<RefCell<CountUpState>>,
    generation: u64,
) -> TickToken {
    let weak_state: Weak<RefCell<CountUpState>> = Rc::downgrade(state);
    let weak_scheduler: Weak<dyn FrameScheduler> = Rc::downgrade(scheduler);

    scheduler.schedule(Box::new(move || {
        let (Some(state), Some(scheduler)) = (weak_state.upgrade(), weak_scheduler.upgrade())
        else {
            return;
        };

        {
            let mut st = state.borrow_mut();
            if st.generation != generation {
                return;
            }
            st.pending = None;

            let elapsed = scheduler.now().saturating_sub(st.start_time);
            let progress =
                (elapsed.as_secs_f64() / st.duration.as_secs_f64()).clamp(0.0, 1.0);

            if progress >= 1.0 {
                // 最后一帧精确落在目标值上，不舍入
                st.value = st.target;
                return;
            }

            st.value = (st.target * st.easing.apply(progress)).round();
        }

        // 借用释放后再登记下一帧
        let token = schedule_tick(&scheduler, &state, generation);
        state.borrow_mut().pending = Some(token);
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::{ManualScheduler, TickCallback};

    const FRAME: Duration = Duration::from_millis(16);

    /// 驱动到收敛，返回每帧采样值
    fn run_to_completion(scheduler: &Rc<ManualScheduler>, counter: &CountUp) -> Vec<f64> {
        let mut samples = Vec::new();
        // 上限防御失控循环
        for _ in 0..500 {
            if !counter.is_running() {
                break;
            }
            scheduler.advance(FRAME);
            samples.push(counter.value());
        }
        assert!(!counter.is_running(), "动画未在上限帧数内收敛");
        samples
    }

    #[test]
    fn test_initial_value_is_zero() {
        let scheduler = Rc::new(ManualScheduler::new());
        let counter = CountUp::new(scheduler.clone());

        assert_eq!(counter.value(), 0.0);
        assert!(!counter.is_running());
    }

    #[test]
    fn test_value_is_zero_before_first_tick() {
        let scheduler = Rc::new(ManualScheduler::new());
        let counter = CountUp::new(scheduler.clone());

        counter.start(2431.0);
        // 首帧还没触发
        assert_eq!(counter.value(), 0.0);
        assert!(counter.is_running());
    }

    #[test]
    fn test_converges_to_exact_target() {
        let scheduler = Rc::new(ManualScheduler::new());
        let counter = CountUp::new(scheduler.clone());

        counter.start_with_duration(2431.0, Duration::from_millis(800));
        run_to_completion(&scheduler, &counter);

        assert_eq!(counter.value(), 2431.0);
        assert_eq!(scheduler.pending_count(), 0);
    }

    #[test]
    fn test_monotonic_for_nonnegative_target() {
        let scheduler = Rc::new(ManualScheduler::new());
        let counter = CountUp::new(scheduler.clone());

        counter.start(2431.0);
        let samples = run_to_completion(&scheduler, &counter);

        for pair in samples.windows(2) {
            assert!(pair[1] >= pair[0], "序列必须单调不减: {pair:?}");
        }
        assert_eq!(*samples.last().unwrap(), 2431.0);
    }

    #[test]
    fn test_zero_target_still_schedules_and_settles_on_zero() {
        let scheduler = Rc::new(ManualScheduler::new());
        let counter = CountUp::new(scheduler.clone());

        counter.start_with_duration(0.0, Duration::from_millis(500));
        // 不允许把 target=0 优化成"不用动画"而跳过调度
        assert!(counter.is_running());

        let samples = run_to_completion(&scheduler, &counter);
        assert!(samples.iter().all(|v| *v == 0.0));
        assert_eq!(counter.value(), 0.0);
    }

    #[test]
    fn test_restart_from_zero_after_convergence() {
        let scheduler = Rc::new(ManualScheduler::new());
        let counter = CountUp::new(scheduler.clone());

        counter.start_with_duration(500.0, Duration::from_millis(400));
        run_to_completion(&scheduler, &counter);
        assert_eq!(counter.value(), 500.0);

        // 同一目标再来一次：观测值回到 0，重新播放整条曲线
        counter.start_with_duration(500.0, Duration::from_millis(400));
        assert_eq!(counter.value(), 0.0);

        scheduler.advance(FRAME);
        let first_tick = counter.value();
        assert!(first_tick > 0.0);
        assert!(first_tick < 500.0);

        run_to_completion(&scheduler, &counter);
        assert_eq!(counter.value(), 500.0);
    }

    #[test]
    fn test_supersession_before_first_tick() {
        let scheduler = Rc::new(ManualScheduler::new());
        let counter = CountUp::new(scheduler.clone());

        // 第一次 start 的首帧还没执行就被第二次取代
        counter.start(1_000_000.0);
        counter.start_with_duration(10.0, Duration::from_millis(160));

        let samples = run_to_completion(&scheduler, &counter);
        // 任何一帧都不允许出现来自旧目标的计算结果
        assert!(samples.iter().all(|v| *v <= 10.0), "{samples:?}");
        assert_eq!(counter.value(), 10.0);
    }

    /// cancel 故意不移除队列里的回调，逼出代次防线
    struct LeakyScheduler {
        inner: ManualScheduler,
    }

    impl FrameScheduler for LeakyScheduler {
        fn now(&self) -> Duration {
            self.inner.now()
        }

        fn schedule(&self, callback: TickCallback) -> TickToken {
            self.inner.schedule(callback)
        }

        fn cancel(&self, _token: TickToken) {}
    }

    #[test]
    fn test_supersession_survives_leaky_scheduler() {
        let scheduler = Rc::new(LeakyScheduler {
            inner: ManualScheduler::new(),
        });
        let counter = CountUp::new(scheduler.clone());

        counter.start(1_000_000.0);
        counter.start_with_duration(10.0, Duration::from_millis(160));

        // 旧运行的回调仍在队列里，第一帧会执行两个回调
        assert_eq!(scheduler.inner.advance(FRAME), 2);
        // 但旧回调核对代次后放弃写入
        assert!(counter.value() <= 10.0);

        for _ in 0..20 {
            if !counter.is_running() {
                break;
            }
            scheduler.inner.advance(FRAME);
            assert!(counter.value() <= 10.0);
        }
        assert_eq!(counter.value(), 10.0);
    }

    #[test]
    fn test_cancel_freezes_value_and_is_idempotent() {
        let scheduler = Rc::new(ManualScheduler::new());
        let counter = CountUp::new(scheduler.clone());

        counter.start_with_duration(100.0, Duration::from_millis(800));
        for _ in 0..10 {
            scheduler.advance(FRAME);
        }
        let frozen = counter.value();
        assert!(frozen > 0.0);
        assert!(frozen < 100.0);

        counter.cancel();
        assert!(!counter.is_running());
        assert_eq!(scheduler.pending_count(), 0);

        // 取消后时钟继续走，观测值不再变化
        for _ in 0..10 {
            scheduler.advance(FRAME);
        }
        assert_eq!(counter.value(), frozen);

        // 重复取消是无操作
        counter.cancel();
        counter.cancel();
        assert_eq!(counter.value(), frozen);
    }

    #[test]
    fn test_cancel_after_finish_is_noop() {
        let scheduler = Rc::new(ManualScheduler::new());
        let counter = CountUp::new(scheduler.clone());

        counter.start_with_duration(42.0, Duration::from_millis(160));
        run_to_completion(&scheduler, &counter);

        counter.cancel();
        assert_eq!(counter.value(), 42.0);
    }

    #[test]
    fn test_drop_cancels_pending_tick() {
        let scheduler = Rc::new(ManualScheduler::new());
        {
            let counter = CountUp::new(scheduler.clone());
            counter.start(2431.0);
            assert_eq!(scheduler.pending_count(), 1);
        }
        // 句柄销毁时挂起的回调一并撤销
        assert_eq!(scheduler.pending_count(), 0);
        assert_eq!(scheduler.advance(FRAME), 0);
    }

    #[test]
    fn test_zero_duration_completes_immediately() {
        let scheduler = Rc::new(ManualScheduler::new());
        let counter = CountUp::new(scheduler.clone());

        counter.start_with_duration(777.0, Duration::ZERO);
        assert_eq!(counter.value(), 777.0);
        assert!(!counter.is_running());
        assert_eq!(scheduler.pending_count(), 0);
    }

    #[test]
    fn test_duration_applies_per_run() {
        let scheduler = Rc::new(ManualScheduler::new());
        let counter = CountUp::new(scheduler.clone());

        counter.start_with_duration(100.0, Duration::from_millis(200));
        run_to_completion(&scheduler, &counter);
        assert_eq!(counter.value(), 100.0);

        // 第二次运行用自己的时长，不混用上一次的
        counter.start_with_duration(100.0, Duration::from_millis(800));
        for _ in 0..15 {
            scheduler.advance(FRAME);
        }
        // 240ms 远不到 800ms，还在进行中
        assert!(counter.is_running());
        assert!(counter.value() < 100.0);

        run_to_completion(&scheduler, &counter);
        assert_eq!(counter.value(), 100.0);
    }

    #[test]
    fn test_negative_target() {
        let scheduler = Rc::new(ManualScheduler::new());
        let counter = CountUp::new(scheduler.clone());

        counter.start_with_duration(-500.0, Duration::from_millis(320));
        let samples = run_to_completion(&scheduler, &counter);

        for pair in samples.windows(2) {
            assert!(pair[1] <= pair[0], "负目标下序列单调不增: {pair:?}");
        }
        assert_eq!(counter.value(), -500.0);
    }

    #[test]
    fn test_intermediate_values_are_rounded_integers() {
        let scheduler = Rc::new(ManualScheduler::new());
        let counter = CountUp::new(scheduler.clone());

        counter.start_with_duration(4.8, Duration::from_millis(160));
        let samples = run_to_completion(&scheduler, &counter);

        // 中间帧全程取整，最后一帧落在精确目标上
        for v in &samples[..samples.len() - 1] {
            assert_eq!(v.fract(), 0.0, "中间值必须是整数: {v}");
        }
        assert_eq!(counter.value(), 4.8);
    }

    #[test]
    fn test_scaled_percentage_display() {
        let scheduler = Rc::new(ManualScheduler::new());
        let counter = CountUp::new(scheduler.clone());

        // 一位小数的百分比：放大 10 倍做动画，展示时再除回去
        counter.start(48.0);
        run_to_completion(&scheduler, &counter);

        let displayed = counter.value() / 10.0;
        assert_eq!(format!("{displayed:.1}"), "4.8");
    }

    #[test]
    fn test_sampled_trace_follows_ease_out_cubic() {
        let scheduler = Rc::new(ManualScheduler::new());
        let counter = CountUp::new(scheduler.clone());

        counter.start_with_duration(2431.0, Duration::from_millis(800));

        let mut trace = vec![(0u64, counter.value() as i64)];
        for _ in 0..4 {
            scheduler.advance(Duration::from_millis(200));
            trace.push((scheduler.now().as_millis() as u64, counter.value() as i64));
        }
        assert!(!counter.is_running());

        let rendered = trace
            .iter()
            .map(|(at, value)| format!("t={at}ms value={value}"))
            .collect::<Vec<_>>()
            .join("\n");
        insta::assert_snapshot!(rendered, @r"
        t=0ms value=0
        t=200ms value=1405
        t=400ms value=2127
        t=600ms value=2393
        t=800ms value=2431
        ");
    }

    #[test]
    fn test_restart_generation_isolated_per_handle() {
        let scheduler = Rc::new(ManualScheduler::new());
        let users = CountUp::new(scheduler.clone());
        let orders = CountUp::new(scheduler.clone());

        // 四张卡片各自独立句柄的缩影：互不干扰
        users.start_with_duration(2431.0, Duration::from_millis(800));
        orders.start_with_duration(87.0, Duration::from_millis(800));

        users.cancel();
        assert!(!users.is_running());
        assert!(orders.is_running());

        for _ in 0..60 {
            if !orders.is_running() {
                break;
            }
            scheduler.advance(FRAME);
        }
        assert_eq!(orders.value(), 87.0);
        assert_eq!(users.value(), 0.0);
    }
}
