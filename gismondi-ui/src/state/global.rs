//! Global Application State
//!
//! Reactive state shared through context: the session (read once at mount)
//! and the toast queue fed by every form and workflow.

use leptos::*;
use leptos_router::NavigateOptions;

use gismondi::auth::FormOutcome;
use gismondi::nav::Route;
use gismondi::notify::{Notification, NotificationKind, Notifier};
use gismondi::session::{Session, SessionState};

use super::storage::LocalStorage;

/// How long a toast stays visible
const SUCCESS_TOAST_MS: u32 = 3000;
const ERROR_TOAST_MS: u32 = 5000;

/// A queued toast
#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub notification: Notification,
}

/// Global application state provided to all components
#[derive(Clone, Copy)]
pub struct GlobalState {
    /// `Loading` until local storage has been read
    pub session: RwSignal<SessionState>,
    /// Visible toasts, oldest first
    pub toasts: RwSignal<Vec<Toast>>,
    next_toast: StoredValue<u64>,
}

/// Provide global state to the component tree
pub fn provide_global_state() -> GlobalState {
    let state = GlobalState {
        session: create_rw_signal(SessionState::Loading),
        toasts: create_rw_signal(Vec::new()),
        next_toast: store_value(0),
    };

    provide_context(state);
    state
}

impl GlobalState {
    /// Read the session from local storage
    pub fn load_session(&self) {
        let session = Session::load(&mut LocalStorage);
        self.session.set(SessionState::Loaded(session));
    }

    /// Current session, if loaded
    pub fn current_session(&self) -> Option<Session> {
        self.session.with(|s| s.session().cloned())
    }

    /// Remove all session keys and forget the loaded session
    pub fn sign_out(&self) {
        if let Err(e) = Session::clear(&mut LocalStorage) {
            web_sys::console::error_1(&format!("Failed to clear session: {}", e).into());
        }
        self.session.set(SessionState::Loaded(Session::default()));
    }

    /// Show a toast; it clears itself after a timeout
    pub fn push(&self, notification: Notification) {
        let id = self.next_toast.get_value();
        self.next_toast.set_value(id + 1);

        let timeout = match notification.kind {
            NotificationKind::Error => ERROR_TOAST_MS,
            NotificationKind::Success | NotificationKind::Info => SUCCESS_TOAST_MS,
        };

        self.toasts.update(|toasts| toasts.push(Toast { id, notification }));

        let toasts = self.toasts;
        gloo_timers::callback::Timeout::new(timeout, move || {
            toasts.update(|t| t.retain(|toast| toast.id != id));
        })
        .forget();
    }

    pub fn push_all(&self, notifications: Vec<Notification>) {
        for notification in notifications {
            self.push(notification);
        }
    }

    pub fn dismiss(&self, id: u64) {
        self.toasts.update(|t| t.retain(|toast| toast.id != id));
    }

    /// Show the outcome's toasts and schedule its redirect. A redirect to the
    /// dashboard re-reads the session the login just stored.
    pub fn apply_outcome<N>(&self, outcome: FormOutcome, navigate: N)
    where
        N: Fn(&str, NavigateOptions) + 'static,
    {
        self.push_all(outcome.notifications);

        let Some(redirect) = outcome.redirect else {
            return;
        };
        if redirect.route == Route::Dashboard {
            self.load_session();
        }

        let delay = redirect.delay.as_millis() as u32;
        gloo_timers::callback::Timeout::new(delay, move || {
            navigate(redirect.route.path(), NavigateOptions::default());
        })
        .forget();
    }
}

impl Notifier for GlobalState {
    fn notify(&mut self, notification: Notification) {
        self.push(notification);
    }
}
