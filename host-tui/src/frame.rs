//! # Frame 模块
//!
//! 真实时钟上的帧调度器。
//!
//! 事件循环每转一圈调用一次 [`FrameClock::run_due`]，把上一圈登记的
//! 回调批量执行掉。调度语义与 `ManualScheduler` 一致：回调属于
//! "下一帧"，批内新登记的回调留到下一圈，同一圈内不会连跑两次。

use std::cell::RefCell;
use std::mem;
use std::time::{Duration, Instant};

use nova_runtime::{FrameScheduler, TickCallback, TickToken};

/// 内部队列状态
struct ClockInner {
    next_token: u64,
    pending: Vec<(TickToken, TickCallback)>,
}

/// Instant 锚定的帧时钟
///
/// `now()` 返回自创建以来的时长，单调不回退。
pub struct FrameClock {
    started: Instant,
    inner: RefCell<ClockInner>,
}

impl FrameClock {
    /// 创建帧时钟，时间零点为创建时刻
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            inner: RefCell::new(ClockInner {
                next_token: 0,
                pending: Vec::new(),
            }),
        }
    }

    /// 执行当前批次的回调
    ///
    /// 先整批取出再执行，回调里重新登记的进入下一批。
    ///
    /// # 返回
    /// - 本圈实际执行的回调数量
    pub fn run_due(&self) -> usize {
        let batch = {
            let mut inner = self.inner.borrow_mut();
            mem::take(&mut inner.pending)
        };

        let count = batch.len();
        for (_token, callback) in batch {
            callback();
        }
        count
    }

    /// 当前等待执行的回调数量
    pub fn pending_count(&self) -> usize {
        self.inner.borrow().pending.len()
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameScheduler for FrameClock {
    fn now(&self) -> Duration {
        self.started.elapsed()
    }

    fn schedule(&self, callback: TickCallback) -> TickToken {
        let mut inner = self.inner.borrow_mut();
        let token = TickToken::new(inner.next_token);
        inner.next_token += 1;
        inner.pending.push((token, callback));
        token
    }

    fn cancel(&self, token: TickToken) {
        let mut inner = self.inner.borrow_mut();
        inner.pending.retain(|(t, _)| *t != token);
    }
}
