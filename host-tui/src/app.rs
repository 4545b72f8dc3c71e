//! # App 模块
//!
//! TUI 应用状态与事件循环。
//!
//! ## 交互语义
//!
//! - 菜单选择只切换页面标题，内容始终是仪表盘
//! - 重新选择 Dashboard 等同重新挂载：四张卡片的计数动画从 0 重播
//! - 模拟刷新只转旋转图标，不触碰计数动画
//! - 每张卡片持有独立的计数句柄，互不同步

use std::io;
use std::rc::Rc;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{debug, info};

use nova_runtime::{CountUp, DashboardSnapshot, FindingLevel, FrameScheduler, verify_snapshot};

use crate::config::AppConfig;
use crate::frame::FrameClock;
use crate::theme::Theme;
use crate::ui;

// ========== 菜单 ==========

/// 侧边栏菜单项
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Dashboard,
    Orders,
    Analytics,
    Settings,
}

impl MenuItem {
    /// 全部菜单项，按侧边栏顺序
    pub const ALL: [MenuItem; 4] = [
        MenuItem::Dashboard,
        MenuItem::Orders,
        MenuItem::Analytics,
        MenuItem::Settings,
    ];

    /// 展示文本
    pub fn label(&self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Orders => "Orders",
            Self::Analytics => "Analytics",
            Self::Settings => "Settings",
        }
    }

    /// 在菜单里的序号
    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|item| item == self).unwrap_or(0)
    }

    /// 按序号取菜单项，越界回绕
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }
}

/// 下方面板的标签页
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LowerTab {
    RecentOrders,
    SystemHealth,
}

impl LowerTab {
    /// 全部标签页
    pub const ALL: [LowerTab; 2] = [LowerTab::RecentOrders, LowerTab::SystemHealth];

    /// 展示文本
    pub fn label(&self) -> &'static str {
        match self {
            Self::RecentOrders => "Recent Orders",
            Self::SystemHealth => "System Health",
        }
    }

    /// 在标签栏里的序号
    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|tab| tab == self).unwrap_or(0)
    }

    /// 另一个标签页
    pub fn toggle(&self) -> Self {
        match self {
            Self::RecentOrders => Self::SystemHealth,
            Self::SystemHealth => Self::RecentOrders,
        }
    }
}

// ========== 应用状态 ==========

/// 旋转图标帧序列
const SPINNER_FRAMES: [char; 4] = ['|', '/', '-', '\\'];

/// 应用状态
pub struct App {
    // ===== 数据 =====
    /// 仪表盘数据快照
    pub snapshot: DashboardSnapshot,
    /// 主题
    pub theme: Theme,

    // ===== 交互状态 =====
    /// 当前菜单项（只影响标题）
    pub menu: MenuItem,
    /// 下方面板当前标签页
    pub lower_tab: LowerTab,
    /// 侧边栏是否折叠
    pub sidebar_collapsed: bool,
    /// 模拟刷新结束时刻（调度器时钟），None 表示未在刷新
    refresh_until: Option<Duration>,

    // ===== 动画 =====
    /// 每张统计卡片一个计数句柄，与 `snapshot.stats` 同序
    counters: Vec<CountUp>,
    /// 计数动画时长
    count_up: Duration,
    /// 模拟刷新的旋转时长
    refresh_spin: Duration,
    /// 注入的帧调度器
    scheduler: Rc<dyn FrameScheduler>,
}

impl App {
    /// 创建应用并完成首次挂载
    pub fn new(
        snapshot: DashboardSnapshot,
        config: &AppConfig,
        scheduler: Rc<dyn FrameScheduler>,
    ) -> Self {
        let counters = snapshot
            .stats
            .iter()
            .map(|_| CountUp::new(scheduler.clone()).with_easing(config.animation.easing))
            .collect();

        let mut app = Self {
            snapshot,
            theme: Theme::by_name(&config.ui.theme),
            menu: MenuItem::Dashboard,
            lower_tab: LowerTab::RecentOrders,
            sidebar_collapsed: config.ui.sidebar_collapsed,
            refresh_until: None,
            counters,
            count_up: config.count_up_duration(),
            refresh_spin: config.refresh_spin(),
            scheduler,
        };
        app.mount_dashboard();
        app
    }

    /// 挂载仪表盘：四个计数动画从 0 重播
    pub fn mount_dashboard(&mut self) {
        for (counter, card) in self.counters.iter().zip(&self.snapshot.stats) {
            counter.start_with_duration(card.target, self.count_up);
        }
        debug!("仪表盘挂载，{} 个计数动画启动", self.counters.len());
    }

    /// 选择菜单项
    ///
    /// 内容始终是仪表盘；重新选择 Dashboard 触发重新挂载。
    pub fn select_menu(&mut self, item: MenuItem) {
        if item == MenuItem::Dashboard && self.menu == MenuItem::Dashboard {
            self.mount_dashboard();
            return;
        }
        self.menu = item;
    }

    /// 下一个菜单项（右方向键）
    pub fn next_menu(&mut self) {
        self.select_menu(MenuItem::from_index(self.menu.index() + 1));
    }

    /// 上一个菜单项（左方向键）
    pub fn prev_menu(&mut self) {
        let count = MenuItem::ALL.len();
        self.select_menu(MenuItem::from_index(self.menu.index() + count - 1));
    }

    /// 切换下方面板标签页
    pub fn toggle_lower_tab(&mut self) {
        self.lower_tab = self.lower_tab.toggle();
    }

    /// 折叠 / 展开侧边栏
    pub fn toggle_sidebar(&mut self) {
        self.sidebar_collapsed = !self.sidebar_collapsed;
    }

    /// 触发模拟刷新：只转图标，不重启计数动画
    pub fn trigger_refresh(&mut self) {
        self.refresh_until = Some(self.scheduler.now() + self.refresh_spin);
        info!("模拟刷新开始");
    }

    /// 刷新是否进行中
    pub fn is_refreshing(&self) -> bool {
        match self.refresh_until {
            Some(until) => self.scheduler.now() < until,
            None => false,
        }
    }

    /// 清理已结束的刷新状态，事件循环每圈调用
    pub fn tick_ui(&mut self) {
        if let Some(until) = self.refresh_until {
            if self.scheduler.now() >= until {
                self.refresh_until = None;
                info!("模拟刷新结束");
            }
        }
    }

    /// 旋转图标当前帧，未在刷新时返回 None
    pub fn spinner_frame(&self) -> Option<char> {
        if !self.is_refreshing() {
            return None;
        }
        let index = (self.scheduler.now().as_millis() / 100) as usize % SPINNER_FRAMES.len();
        Some(SPINNER_FRAMES[index])
    }

    /// 第 index 张卡片的动画当前值
    pub fn counter_value(&self, index: usize) -> f64 {
        self.counters.get(index).map(|c| c.value()).unwrap_or(0.0)
    }

    /// 是否还有计数动画在跑
    pub fn any_animation_running(&self) -> bool {
        self.counters.iter().any(|c| c.is_running())
    }

    /// 页面标题，由菜单选择决定
    pub fn page_title(&self) -> &'static str {
        self.menu.label()
    }

    /// 处理按键，返回 false 表示退出
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        // 退出键优先，Ctrl-C 在普通 'c' 之前判掉
        if key.code == KeyCode::Char('q')
            || key.code == KeyCode::Esc
            || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
        {
            return false;
        }

        match key.code {
            KeyCode::Right => self.next_menu(),
            KeyCode::Left => self.prev_menu(),
            KeyCode::Char('1') => self.select_menu(MenuItem::Dashboard),
            KeyCode::Char('2') => self.select_menu(MenuItem::Orders),
            KeyCode::Char('3') => self.select_menu(MenuItem::Analytics),
            KeyCode::Char('4') => self.select_menu(MenuItem::Settings),
            KeyCode::Tab => self.toggle_lower_tab(),
            KeyCode::Char('r') => self.trigger_refresh(),
            KeyCode::Char('c') => self.toggle_sidebar(),
            KeyCode::Char('d') => self.mount_dashboard(),
            _ => {}
        }
        true
    }
}

// ========== 事件循环 ==========

/// 启动仪表盘，阻塞直到用户退出（q / Esc / Ctrl-C）
pub fn run_dashboard(config: &AppConfig) -> anyhow::Result<()> {
    let snapshot = DashboardSnapshot::demo();

    // 演示数据自检：发现只写日志，不阻塞启动
    if config.debug.fixture_check {
        for finding in verify_snapshot(&snapshot) {
            match finding.level {
                FindingLevel::Error => tracing::error!("{finding}"),
                FindingLevel::Warn => tracing::warn!("{finding}"),
                FindingLevel::Info => tracing::info!("{finding}"),
            }
        }
    }

    let clock = Rc::new(FrameClock::new());
    let mut app = App::new(snapshot, config, clock.clone());

    // 终端初始化
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_event_loop(&mut terminal, &mut app, &clock, config.tick_interval());

    // 恢复终端
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// 事件循环主体
///
/// 每圈做三件事：
/// 1. 执行到期的帧回调（计数动画在这里推进）
/// 2. 绘制
/// 3. 以 tick 间隔轮询按键
fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    clock: &Rc<FrameClock>,
    tick: Duration,
) -> anyhow::Result<()> {
    loop {
        clock.run_due();
        app.tick_ui();

        terminal.draw(|f| ui::render(f, app))?;

        if event::poll(tick)? {
            if let Event::Key(key) = event::read()? {
                if !app.handle_key(key) {
                    info!("用户退出");
                    return Ok(());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use nova_runtime::ManualScheduler;

    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    fn make_app() -> (Rc<ManualScheduler>, App) {
        let scheduler = Rc::new(ManualScheduler::new());
        let app = App::new(
            DashboardSnapshot::demo(),
            &AppConfig::default(),
            scheduler.clone(),
        );
        (scheduler, app)
    }

    fn advance_to_idle(scheduler: &Rc<ManualScheduler>, app: &App) {
        for _ in 0..500 {
            if !app.any_animation_running() {
                return;
            }
            scheduler.advance(FRAME);
        }
        panic!("动画未收敛");
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_new_mounts_dashboard() {
        let (_scheduler, app) = make_app();

        assert_eq!(app.menu, MenuItem::Dashboard);
        assert!(app.any_animation_running());
        // 首帧前所有卡片都是 0
        for i in 0..app.snapshot.stats.len() {
            assert_eq!(app.counter_value(i), 0.0);
        }
    }

    #[test]
    fn test_counters_converge_to_targets() {
        let (scheduler, app) = make_app();
        advance_to_idle(&scheduler, &app);

        for (i, card) in app.snapshot.stats.iter().enumerate() {
            assert_eq!(app.counter_value(i), card.target);
        }
    }

    #[test]
    fn test_menu_changes_title_without_restarting() {
        let (scheduler, mut app) = make_app();
        advance_to_idle(&scheduler, &app);
        let settled = app.counter_value(0);

        app.select_menu(MenuItem::Orders);

        assert_eq!(app.page_title(), "Orders");
        // 内容还是仪表盘，动画不重播
        assert!(!app.any_animation_running());
        assert_eq!(app.counter_value(0), settled);
    }

    #[test]
    fn test_reselect_dashboard_remounts() {
        let (scheduler, mut app) = make_app();
        advance_to_idle(&scheduler, &app);
        assert!(app.counter_value(0) > 0.0);

        // 已经在 Dashboard 上再选一次，等同重新挂载
        app.select_menu(MenuItem::Dashboard);

        assert!(app.any_animation_running());
        assert_eq!(app.counter_value(0), 0.0);
    }

    #[test]
    fn test_return_to_dashboard_does_not_remount() {
        let (scheduler, mut app) = make_app();
        advance_to_idle(&scheduler, &app);

        app.select_menu(MenuItem::Orders);
        app.select_menu(MenuItem::Dashboard);

        // 从别的菜单项回来只是改标题
        assert_eq!(app.page_title(), "Dashboard");
        assert!(!app.any_animation_running());
    }

    #[test]
    fn test_refresh_spins_without_touching_counters() {
        let (scheduler, mut app) = make_app();
        advance_to_idle(&scheduler, &app);
        let settled = app.counter_value(0);

        app.trigger_refresh();

        assert!(app.is_refreshing());
        assert!(app.spinner_frame().is_some());
        assert!(!app.any_animation_running());
        assert_eq!(app.counter_value(0), settled);

        // 900ms 后旋转自动结束
        scheduler.advance(Duration::from_millis(901));
        app.tick_ui();
        assert!(!app.is_refreshing());
        assert!(app.spinner_frame().is_none());
        assert_eq!(app.counter_value(0), settled);
    }

    #[test]
    fn test_spinner_frame_rotates_with_clock() {
        let (scheduler, mut app) = make_app();
        app.trigger_refresh();

        let first = app.spinner_frame();
        scheduler.advance(Duration::from_millis(100));
        let second = app.spinner_frame();

        assert!(first.is_some());
        assert!(second.is_some());
        assert_ne!(first, second);
    }

    #[test]
    fn test_arrow_keys_cycle_menu() {
        let (_scheduler, mut app) = make_app();

        app.handle_key(key(KeyCode::Right));
        assert_eq!(app.menu, MenuItem::Orders);
        app.handle_key(key(KeyCode::Right));
        assert_eq!(app.menu, MenuItem::Analytics);
        app.handle_key(key(KeyCode::Left));
        assert_eq!(app.menu, MenuItem::Orders);

        // 左到头回绕
        app.handle_key(key(KeyCode::Left));
        app.handle_key(key(KeyCode::Left));
        assert_eq!(app.menu, MenuItem::Settings);
    }

    #[test]
    fn test_number_keys_jump_to_menu() {
        let (_scheduler, mut app) = make_app();

        app.handle_key(key(KeyCode::Char('4')));
        assert_eq!(app.menu, MenuItem::Settings);
        app.handle_key(key(KeyCode::Char('2')));
        assert_eq!(app.menu, MenuItem::Orders);
    }

    #[test]
    fn test_tab_toggles_lower_pane() {
        let (_scheduler, mut app) = make_app();

        assert_eq!(app.lower_tab, LowerTab::RecentOrders);
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.lower_tab, LowerTab::SystemHealth);
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.lower_tab, LowerTab::RecentOrders);
    }

    #[test]
    fn test_c_toggles_sidebar() {
        let (_scheduler, mut app) = make_app();

        assert!(!app.sidebar_collapsed);
        app.handle_key(key(KeyCode::Char('c')));
        assert!(app.sidebar_collapsed);
        app.handle_key(key(KeyCode::Char('c')));
        assert!(!app.sidebar_collapsed);
    }

    #[test]
    fn test_d_remounts_dashboard() {
        let (scheduler, mut app) = make_app();
        advance_to_idle(&scheduler, &app);

        app.handle_key(key(KeyCode::Char('d')));

        assert!(app.any_animation_running());
        assert_eq!(app.counter_value(0), 0.0);
    }

    #[test]
    fn test_quit_keys() {
        let (_scheduler, mut app) = make_app();

        assert!(!app.handle_key(key(KeyCode::Char('q'))));
        assert!(!app.handle_key(key(KeyCode::Esc)));
        assert!(!app.handle_key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        // 普通按键不退出
        assert!(app.handle_key(key(KeyCode::Char('x'))));
    }

    #[test]
    fn test_counters_are_independent() {
        let (scheduler, app) = make_app();

        // 推进到动画中段，各卡片凑各自的目标，互不共享状态
        for _ in 0..25 {
            scheduler.advance(FRAME);
        }
        let values: Vec<f64> = (0..app.snapshot.stats.len())
            .map(|i| app.counter_value(i))
            .collect();

        for (value, card) in values.iter().zip(&app.snapshot.stats) {
            assert!(*value > 0.0);
            assert!(*value < card.target);
        }
    }
}
