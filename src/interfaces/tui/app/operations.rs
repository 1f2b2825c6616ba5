//! User actions that talk to the backend
//!
//! 每个请求都在当前屏幕的 scope 内后台执行，结果经 channel 回到事件循环

use std::future::Future;

use tracing::warn;

use super::{App, AppEvent};
use crate::errors::ShortyError;
use crate::flows::create::feedback_message;

impl App {
    /// Run `fut` in the current screen scope and forward its event
    fn spawn_scoped<F>(&self, fut: F)
    where
        F: Future<Output = AppEvent> + Send + 'static,
    {
        let scope = self.scope.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            if let Ok(event) = scope.guard(fut).await {
                let _ = tx.send(event);
            }
        });
    }

    pub fn start_analytics_load(&mut self) {
        self.analytics.begin_loading();
        self.analytics_busy = true;
        let flow = self.ctx.analytics().clone();
        let activation = self.activation;
        self.spawn_scoped(async move {
            AppEvent::AnalyticsLoaded {
                activation,
                view: flow.load().await,
            }
        });
    }

    /// Submit the create form; a pending form or bad input sends nothing
    pub fn submit_create(&mut self) {
        let payload = match self.form.begin_submit(self.session.as_ref()) {
            Ok(payload) => payload,
            Err(ShortyError::Busy(_)) => return,
            Err(e) => {
                self.set_error(feedback_message(&e));
                return;
            }
        };
        self.clear_messages();

        let flow = self.ctx.creation().clone();
        let activation = self.activation;
        self.spawn_scoped(async move {
            AppEvent::Created {
                activation,
                outcome: flow.send(&payload).await,
            }
        });
    }

    pub fn reset_create(&mut self) {
        if !self.form.is_pending() {
            self.form.reset();
            self.clear_messages();
        }
    }

    /// Ask for confirmation before deleting the selected link
    pub fn request_delete(&mut self) {
        if self.analytics_busy {
            return;
        }
        if let Some(code) = self.selected_code() {
            self.confirm_delete = Some(code.to_string());
        }
    }

    pub fn confirm_delete(&mut self) {
        let Some(code) = self.confirm_delete.take() else {
            return;
        };
        self.analytics_busy = true;
        self.analytics.begin_loading();
        let flow = self.ctx.analytics().clone();
        let activation = self.activation;
        self.spawn_scoped(async move {
            AppEvent::Deleted {
                activation,
                outcome: flow.delete(&code).await,
            }
        });
    }

    pub fn copy_selected(&mut self) {
        let Some(code) = self.selected_code().map(String::from) else {
            return;
        };
        match self.ctx.analytics().copy(&code) {
            Ok(notice) => {
                self.set_status(notice.message.clone());
                self.analytics.show_notice(notice);
            }
            Err(e) => {
                warn!("Copy failed: {}", e);
                self.set_error(e.format_simple());
            }
        }
    }

    pub fn update_profile(&mut self) {
        if self.profile_pending {
            return;
        }
        self.profile_pending = true;
        let flow = self.ctx.profile().clone();
        let session = self.session.clone();
        let activation = self.activation;
        self.spawn_scoped(async move {
            AppEvent::ProfileUpdated {
                activation,
                outcome: flow.update(session.as_ref()).await,
            }
        });
    }

    pub fn submit_login(&mut self) {
        if self.login.pending {
            return;
        }
        let token = self.login.token_input.trim().to_string();
        if token.is_empty() {
            self.set_error("Please paste a session token");
            return;
        }
        self.login.pending = true;
        self.clear_messages();

        let guard = self.ctx.guard().clone();
        let activation = self.activation;
        self.spawn_scoped(async move {
            AppEvent::LoggedIn {
                activation,
                outcome: guard.login_with_token(&token).await,
            }
        });
    }

    pub fn login_url(&self) -> String {
        self.ctx.guard().login_url(self.login.provider)
    }

    pub fn logout(&mut self) {
        match self.ctx.guard().logout() {
            Ok(()) => {
                self.session = None;
                self.navigate(crate::session::Route::Login);
                self.set_status("Logged out");
            }
            Err(e) => self.set_error(e.format_simple()),
        }
    }
}
