//! Landing Navigation Component
//!
//! Top bar with section anchors and the login link.

use leptos::*;
use leptos_router::*;

use gismondi::nav::Route;

use crate::pages::landing::content::NAV_LINKS;

#[component]
pub fn Navbar() -> impl IntoView {
    let (open, set_open) = create_signal(false);

    view! {
        <nav class="fixed top-0 inset-x-0 z-40 bg-white/80 backdrop-blur border-b border-gray-200">
            <div class="container mx-auto px-4">
                <div class="flex items-center justify-between h-16">
                    <a href="/#home" class="flex items-center space-x-3">
                        <img src="/logo-gismondi.webp" alt="Logotipo Gismondi" class="h-8 w-8" />
                        <span class="text-xl font-bold">"Gismondi"</span>
                    </a>

                    <div class="hidden md:flex items-center space-x-1">
                        {NAV_LINKS.iter().map(|(href, label)| view! {
                            <a href=*href class="px-4 py-2 rounded-lg text-gray-600 hover:text-gray-900 hover:bg-gray-100 transition-colors">
                                {*label}
                            </a>
                        }).collect_view()}
                        <A href=Route::Login.path() class="ml-2 px-4 py-2 bg-primary-600 hover:bg-primary-700 text-white rounded-lg font-medium transition-colors">
                            "Iniciar sesión"
                        </A>
                    </div>

                    <button
                        class="md:hidden p-2 rounded-lg hover:bg-gray-100"
                        on:click=move |_| set_open.update(|o| *o = !*o)
                    >
                        {move || if open.get() { "✕" } else { "☰" }}
                    </button>
                </div>

                <Show when=move || open.get()>
                    <div class="md:hidden pb-4 flex flex-col space-y-1">
                        {NAV_LINKS.iter().map(|(href, label)| view! {
                            <a
                                href=*href
                                on:click=move |_| set_open.set(false)
                                class="px-4 py-2 rounded-lg text-gray-600 hover:bg-gray-100"
                            >
                                {*label}
                            </a>
                        }).collect_view()}
                        <A href=Route::Login.path() class="px-4 py-2 bg-primary-600 text-white rounded-lg font-medium text-center">
                            "Iniciar sesión"
                        </A>
                    </div>
                </Show>
            </div>
        </nav>
    }
}
