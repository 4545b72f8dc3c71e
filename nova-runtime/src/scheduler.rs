//! # Scheduler 模块
//!
//! 帧调度抽象。核心不拥有时间：何时执行一帧回调、时钟走到哪里，
//! 全部由宿主注入的调度器决定（真实宿主用挂钟，测试用虚拟时钟）。
//!
//! ## 设计原则
//!
//! - 单线程协作式：`schedule` 只是登记"下一帧之前执行一次"的回调，
//!   不会产生线程，也不会在登记时执行。
//! - 实现者通过内部可变性在 `&self` 上工作，句柄侧以 `Rc<dyn FrameScheduler>`
//!   共享同一个调度器。

use std::cell::RefCell;
use std::mem;
use std::time::Duration;

/// 帧回调，至多执行一次
pub type TickCallback = Box<dyn FnOnce()>;

/// 已登记回调的凭据
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickToken(pub u64);

impl TickToken {
    /// 创建新的凭据
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

/// 帧调度抽象
///
/// 核心对宿主调度机制的全部依赖就是这三个操作。
pub trait FrameScheduler {
    /// 调度器自身时钟的当前时刻
    fn now(&self) -> Duration;

    /// 登记一个回调，在下一帧之前执行一次
    fn schedule(&self, callback: TickCallback) -> TickToken;

    /// 撤销一个已登记的回调
    ///
    /// 未知或已执行的凭据静默忽略，不是错误。
    fn cancel(&self, token: TickToken);
}

/// 内部队列状态
struct ManualInner {
    now: Duration,
    next_token: u64,
    pending: Vec<(TickToken, TickCallback)>,
}

/// 手动推进的确定性调度器
///
/// 虚拟时钟由 [`advance`](ManualScheduler::advance) 显式推进，每次推进执行
/// 当前已入队的一批回调。测试和 headless 模式用它把动画变成纯确定性计算。
pub struct ManualScheduler {
    inner: RefCell<ManualInner>,
}

impl ManualScheduler {
    /// 创建新的调度器，时钟从零开始
    pub fn new() -> Self {
        Self {
            inner: RefCell::new(ManualInner {
                now: Duration::ZERO,
                next_token: 0,
                pending: Vec::new(),
            }),
        }
    }

    /// 推进虚拟时钟并执行当前批次的回调
    ///
    /// 回调按登记顺序执行；回调里新登记的回调属于下一帧，
    /// 本次推进不会执行。
    ///
    /// # 返回
    /// - 本帧实际执行的回调数量
    pub fn advance(&self, dt: Duration) -> usize {
        // 先整批取出再执行，回调重新 schedule 时不会撞上未释放的借用
        let batch = {
            let mut inner = self.inner.borrow_mut();
            inner.now += dt;
            mem::take(&mut inner.pending)
        };

        let count = batch.len();
        for (_token, callback) in batch {
            callback();
        }
        count
    }

    /// 当前挂起的回调数量
    pub fn pending_count(&self) -> usize {
        self.inner.borrow().pending.len()
    }
}

impl Default for ManualScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameScheduler for ManualScheduler {
    fn now(&self) -> Duration {
        self.inner.borrow().now
    }

    fn schedule(&self, callback: TickCallback) -> TickToken {
        let mut inner = self.inner.borrow_mut();
        let token = TickToken::new(inner.next_token);
        inner.next_token += 1;
        inner.pending.push((token, callback));
        token
    }

    fn cancel(&self, token: TickToken) {
        self.inner.borrow_mut().pending.retain(|(t, _)| *t != token);
    }
}
