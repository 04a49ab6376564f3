//! Toast Notification Component
//!
//! Renders the global notification queue.

use leptos::*;

use gismondi::notify::NotificationKind;

use crate::state::GlobalState;

/// Toast notification container
#[component]
pub fn Toasts() -> impl IntoView {
    let state = expect_context::<GlobalState>();

    view! {
        <div class="fixed bottom-4 right-4 z-50 space-y-2 max-w-sm">
            <For
                each=move || state.toasts.get()
                key=|toast| toast.id
                children=move |toast| {
                    let (icon, bg_class) = match toast.notification.kind {
                        NotificationKind::Success => ("✓", "bg-green-600"),
                        NotificationKind::Error => ("✕", "bg-red-600"),
                        NotificationKind::Info => ("ℹ", "bg-blue-600"),
                    };
                    let id = toast.id;

                    view! {
                        <div
                            class=format!(
                                "flex items-start space-x-3 {} text-white px-4 py-3 rounded-lg shadow-lg \
                                 animate-slide-in cursor-pointer",
                                bg_class
                            )
                            on:click=move |_| state.dismiss(id)
                        >
                            <span class="text-lg">{icon}</span>
                            <div>
                                <p class="text-sm font-medium">{toast.notification.title.clone()}</p>
                                {toast.notification.description.clone().map(|d| view! {
                                    <p class="text-xs opacity-90">{d}</p>
                                })}
                            </div>
                        </div>
                    }
                }
            />
        </div>
    }
}
