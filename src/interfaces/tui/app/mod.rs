//! App state definition and basic state management
//!
//! 包含核心 App 结构、屏幕枚举以及后台任务回传的事件

mod navigation;
mod operations;

use ratatui::widgets::TableState;
use tokio::sync::{mpsc, watch};

use crate::client::ServiceContext;
use crate::flows::{
    AnalyticsState, AnalyticsView, CreateForm, CreatedLink, DeleteOutcome, ProfileOutcome,
    ScreenScope,
};
use crate::errors::Result;
use crate::session::{GuardDecision, OAuthProvider, Route, Session, SessionSnapshot};

/// 当前屏幕
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrentScreen {
    Login,
    Home,
    CreateUrl,
    Analytics,
    Settings,
}

impl From<Route> for CurrentScreen {
    fn from(route: Route) -> Self {
        match route {
            Route::Login => Self::Login,
            Route::Home => Self::Home,
            Route::CreateUrl => Self::CreateUrl,
            Route::Analytics => Self::Analytics,
            Route::Settings => Self::Settings,
        }
    }
}

impl From<CurrentScreen> for Route {
    fn from(screen: CurrentScreen) -> Self {
        match screen {
            CurrentScreen::Login => Self::Login,
            CurrentScreen::Home => Self::Home,
            CurrentScreen::CreateUrl => Self::CreateUrl,
            CurrentScreen::Analytics => Self::Analytics,
            CurrentScreen::Settings => Self::Settings,
        }
    }
}

/// 创建页当前编辑的字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CreateField {
    #[default]
    Url,
    Alias,
}

impl CreateField {
    pub fn next(self) -> Self {
        match self {
            Self::Url => Self::Alias,
            Self::Alias => Self::Url,
        }
    }
}

/// 登录页状态
#[derive(Debug, Clone)]
pub struct LoginState {
    pub provider: OAuthProvider,
    pub token_input: String,
    pub pending: bool,
}

impl Default for LoginState {
    fn default() -> Self {
        Self {
            provider: OAuthProvider::Github,
            token_input: String::new(),
            pending: false,
        }
    }
}

/// 后台任务完成后回传给事件循环的结果
///
/// `activation` 标记任务所属的屏幕激活，过期的结果直接丢弃。
#[derive(Debug)]
pub enum AppEvent {
    Guard {
        activation: u64,
        decision: GuardDecision,
    },
    Created {
        activation: u64,
        outcome: Result<CreatedLink>,
    },
    AnalyticsLoaded {
        activation: u64,
        view: AnalyticsView,
    },
    Deleted {
        activation: u64,
        outcome: DeleteOutcome,
    },
    ProfileUpdated {
        activation: u64,
        outcome: ProfileOutcome,
    },
    LoggedIn {
        activation: u64,
        outcome: Result<Session>,
    },
}

pub struct App {
    pub ctx: ServiceContext,
    pub current_screen: CurrentScreen,
    pub session: Option<Session>,
    /// 路由守卫检查进行中
    pub checking: bool,
    pub exiting: bool,

    // Login
    pub login: LoginState,

    // Create URL
    pub form: CreateForm,
    pub create_field: CreateField,

    // Analytics
    pub analytics: AnalyticsState,
    pub analytics_busy: bool,
    pub selected_index: usize,
    pub table_state: TableState,
    pub confirm_delete: Option<String>,

    // Settings
    pub profile_pending: bool,

    // UI state
    pub status_message: String,
    pub error_message: String,

    scope: ScreenScope,
    activation: u64,
    tx: mpsc::UnboundedSender<AppEvent>,
    rx: mpsc::UnboundedReceiver<AppEvent>,
    session_rx: watch::Receiver<SessionSnapshot>,
}

impl App {
    pub fn new(ctx: ServiceContext) -> App {
        let (tx, rx) = mpsc::unbounded_channel();
        let session_rx = ctx.session().subscribe();
        let copy_delay = ctx.analytics().copy_delay();

        let mut table_state = TableState::default();
        table_state.select(Some(0));

        App {
            session: ctx.current_session(),
            ctx,
            current_screen: CurrentScreen::Login,
            checking: false,
            exiting: false,
            login: LoginState::default(),
            form: CreateForm::new(),
            create_field: CreateField::default(),
            analytics: AnalyticsState::new(copy_delay),
            analytics_busy: false,
            selected_index: 0,
            table_state,
            confirm_delete: None,
            profile_pending: false,
            status_message: String::new(),
            error_message: String::new(),
            scope: ScreenScope::new(),
            activation: 0,
            tx,
            rx,
            session_rx,
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        self.error_message.clear();
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error_message = message.into();
        self.status_message.clear();
    }

    pub fn clear_messages(&mut self) {
        self.status_message.clear();
        self.error_message.clear();
    }

    /// Activation counter of the current screen
    pub fn activation(&self) -> u64 {
        self.activation
    }

    pub fn selected_code(&self) -> Option<&str> {
        self.analytics
            .view
            .links()
            .get(self.selected_index)
            .map(|link| link.short_code.as_str())
    }

    /// 处理所有已到达的后台结果，不阻塞
    pub fn drain_events(&mut self) {
        while let Ok(event) = self.rx.try_recv() {
            self.apply_event(event);
        }
    }

    /// 等待并处理下一个后台结果
    pub async fn process_next_event(&mut self) -> bool {
        match self.rx.recv().await {
            Some(event) => {
                self.apply_event(event);
                true
            }
            None => false,
        }
    }
}
