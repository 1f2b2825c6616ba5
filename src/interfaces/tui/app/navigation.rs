//! Navigation, guarded screen activation and selection logic

use std::time::Instant;

use tracing::debug;

use super::{App, AppEvent, CreateField, CurrentScreen};
use crate::flows::{CreateForm, ScreenScope};
use crate::flows::analytics::{MSG_COPIED, MSG_LOGIN_FIRST};
use crate::session::{GuardDecision, Route};

impl App {
    /// Leave the current screen and activate `route`
    ///
    /// Requests of the previous activation are cancelled. Protected routes
    /// go through the session guard before they render.
    pub fn navigate(&mut self, route: Route) {
        self.scope.cancel();
        self.scope = ScreenScope::new();
        self.activation += 1;
        self.confirm_delete = None;
        self.clear_messages();

        if !route.is_protected() {
            self.checking = false;
            self.enter(CurrentScreen::from(route));
            return;
        }

        self.checking = true;
        self.current_screen = CurrentScreen::from(route);

        let guard = self.ctx.guard().clone();
        let scope = self.scope.clone();
        let tx = self.tx.clone();
        let activation = self.activation;
        tokio::spawn(async move {
            if let Ok(decision) = scope.guard(guard.activate(route)).await {
                let _ = tx.send(AppEvent::Guard {
                    activation,
                    decision,
                });
            }
        });
    }

    /// Screen-specific work once a screen may render
    fn enter(&mut self, screen: CurrentScreen) {
        self.current_screen = screen;
        match screen {
            CurrentScreen::Login => {
                self.login.pending = false;
                self.login.token_input.clear();
            }
            CurrentScreen::CreateUrl => {
                self.form = CreateForm::new();
                self.create_field = CreateField::default();
            }
            CurrentScreen::Analytics => {
                self.selected_index = 0;
                self.table_state.select(Some(0));
                self.analytics.action_message = None;
                self.start_analytics_load();
            }
            CurrentScreen::Home | CurrentScreen::Settings => {}
        }
    }

    pub(super) fn apply_event(&mut self, event: AppEvent) {
        let activation = match &event {
            AppEvent::Guard { activation, .. }
            | AppEvent::Created { activation, .. }
            | AppEvent::AnalyticsLoaded { activation, .. }
            | AppEvent::Deleted { activation, .. }
            | AppEvent::ProfileUpdated { activation, .. }
            | AppEvent::LoggedIn { activation, .. } => *activation,
        };
        if activation != self.activation {
            debug!(
                "Dropping result of activation {} (current {})",
                activation, self.activation
            );
            return;
        }

        match event {
            AppEvent::Guard { decision, .. } => {
                self.checking = false;
                match decision {
                    GuardDecision::Allow { route, session } => {
                        self.session = session;
                        self.enter(CurrentScreen::from(route));
                    }
                    GuardDecision::RedirectToLogin => {
                        self.session = None;
                        self.navigate(Route::Login);
                        self.set_error(MSG_LOGIN_FIRST);
                    }
                }
            }
            AppEvent::Created { outcome, .. } => {
                self.form.finish(&outcome);
            }
            AppEvent::AnalyticsLoaded { view, .. } => {
                self.analytics_busy = false;
                self.analytics.apply_view(view);
                self.clamp_selection();
            }
            AppEvent::Deleted { outcome, .. } => {
                self.analytics_busy = false;
                match &outcome.message {
                    Some(message) => self.set_error(message.clone()),
                    None => self.set_status("Short link deleted"),
                }
                self.analytics.apply_delete(outcome);
                self.clamp_selection();
            }
            AppEvent::ProfileUpdated { outcome, .. } => {
                self.profile_pending = false;
                if outcome.success {
                    self.set_status(outcome.message);
                } else {
                    self.set_error(outcome.message);
                }
            }
            AppEvent::LoggedIn { outcome, .. } => {
                self.login.pending = false;
                match outcome {
                    Ok(session) => {
                        let name = session.display_name().to_string();
                        self.session = Some(session);
                        self.navigate(Route::Home);
                        self.set_status(format!("Logged in as {}", name));
                    }
                    Err(e) => self.set_error(e.message().to_string()),
                }
            }
        }
    }

    /// Follow identity changes published by any flow
    pub fn sync_session(&mut self) {
        if !self.session_rx.has_changed().unwrap_or(false) {
            return;
        }
        let snapshot = self.session_rx.borrow_and_update().clone();
        self.session = snapshot.session;

        if self.session.is_none()
            && !self.checking
            && Route::from(self.current_screen).is_protected()
        {
            self.navigate(Route::Login);
            self.set_error(MSG_LOGIN_FIRST);
        }
    }

    /// 定时刷新：过期的复制提示
    /// 复制提示到期后同时清掉状态栏里的同一条消息
    pub fn tick(&mut self, now: Instant) {
        if self.analytics.tick(now) && self.status_message == MSG_COPIED {
            self.status_message.clear();
        }
    }

    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
        self.table_state.select(Some(self.selected_index));
    }

    pub fn move_selection_down(&mut self) {
        let len = self.analytics.view.links().len();
        if self.selected_index < len.saturating_sub(1) {
            self.selected_index += 1;
        }
        self.table_state.select(Some(self.selected_index));
    }

    fn clamp_selection(&mut self) {
        let len = self.analytics.view.links().len();
        if self.selected_index >= len {
            self.selected_index = len.saturating_sub(1);
        }
        self.table_state.select(Some(self.selected_index));
    }
}
