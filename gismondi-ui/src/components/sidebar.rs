//! Dashboard Sidebar
//!
//! Role-filtered navigation plus the signed-in user card.

use leptos::*;
use leptos_router::*;

use gismondi::nav::{filter_by_role, NavItem, Route, MAIN_NAV, SECONDARY_NAV};

use crate::state::GlobalState;

#[component]
pub fn Sidebar() -> impl IntoView {
    let state = expect_context::<GlobalState>();
    let role = move || state.current_session().and_then(|s| s.role);

    view! {
        <aside class="w-72 shrink-0 bg-white border-r border-gray-200 flex flex-col min-h-screen">
            // Brand
            <A href=Route::Dashboard.path() class="flex items-center space-x-2 px-6 h-16 border-b border-gray-200">
                <img src="/logo-gismondi.webp" alt="Logotipo Gismondi" class="h-8 w-8" />
                <span class="text-xl font-bold">"Gismondi"</span>
            </A>

            <nav class="flex-1 flex flex-col px-3 py-4">
                <NavSection items=Signal::derive(move || filter_by_role(MAIN_NAV, role())) />
                <div class="mt-auto">
                    <NavSection items=Signal::derive(move || filter_by_role(SECONDARY_NAV, role())) />
                </div>
            </nav>

            <UserCard />
        </aside>
    }
}

#[component]
fn NavSection(#[prop(into)] items: Signal<Vec<NavItem>>) -> impl IntoView {
    view! {
        <ul class="space-y-1">
            {move || items.get().into_iter().map(|item| view! {
                <li>
                    <A
                        href=item.url
                        exact=true
                        class="flex items-center space-x-3 px-3 py-2 rounded-lg text-gray-600 \
                               hover:bg-gray-100 hover:text-gray-900 transition-colors"
                        active_class="bg-gray-100 text-gray-900 font-medium"
                    >
                        <span>{item.icon.glyph()}</span>
                        <span>{item.title}</span>
                    </A>
                </li>
            }).collect_view()}
        </ul>
    }
}

/// Footer card with avatar, name, email and logout
#[component]
fn UserCard() -> impl IntoView {
    let state = expect_context::<GlobalState>();
    let navigate = use_navigate();

    let card = move || state.current_session().unwrap_or_default().display_user();

    let logout = move |_| {
        state.sign_out();
        state.push(gismondi::notify::Notification::info("Sesión cerrada"));
        navigate(Route::Login.path(), Default::default());
    };

    view! {
        <div class="border-t border-gray-200 p-4 flex items-center space-x-3">
            <img src=move || card().avatar alt="Avatar" class="h-9 w-9 rounded-full object-cover" />
            <div class="flex-1 min-w-0">
                <p class="text-sm font-medium truncate">{move || card().name}</p>
                <p class="text-xs text-gray-500 truncate">{move || card().email}</p>
            </div>
            <button
                on:click=logout
                title="Cerrar sesión"
                class="text-gray-500 hover:text-red-600 transition-colors"
            >
                "⎋"
            </button>
        </div>
    }
}
