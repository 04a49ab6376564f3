//! App Root Component
//!
//! Routing, global providers and the authenticated dashboard shell.

use leptos::*;
use leptos_router::*;

use gismondi::nav::Route as Page;

use crate::components::{Loading, Sidebar, Toasts};
use crate::pages::{
    Classifier, Dashboard, Diagnoses, Help, Landing, Login, MedicalHistory, Register, Settings,
};
use crate::state::provide_global_state;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    let state = provide_global_state();

    // Session is read once after mount; until then it stays `Loading`
    create_effect(move |_| state.load_session());

    view! {
        <Router>
            <Routes>
                <Route path="/" view=Landing />
                <Route path="/login" view=Login />
                <Route path="/register" view=Register />
                <Route path="/dashboard" view=DashboardLayout>
                    <Route path="" view=Dashboard />
                    <Route path="classifier" view=Classifier />
                    <Route path="medical-history" view=MedicalHistory />
                    <Route path="diagnoses" view=Diagnoses />
                    <Route path="settings" view=Settings />
                    <Route path="help" view=Help />
                </Route>
                <Route path="/*any" view=NotFound />
            </Routes>
            <Toasts />
        </Router>
    }
}

/// Sidebar shell around every dashboard page. Pages the session role may
/// not open are replaced by a notice; nothing renders until the session
/// has been read.
#[component]
fn DashboardLayout() -> impl IntoView {
    let state = expect_context::<crate::state::GlobalState>();
    let location = use_location();

    let page = move || Page::from_path(&location.pathname.get());
    let loaded = move || state.session.with(|s| s.is_loaded());
    let authenticated = move || {
        state
            .current_session()
            .map(|s| s.is_authenticated())
            .unwrap_or(false)
    };
    let allowed = move || {
        let role = state.current_session().and_then(|s| s.role);
        page().map(|p| p.allows(role)).unwrap_or(false)
    };

    create_effect(move |_| {
        if let Some(page) = page() {
            document().set_title(page.title());
        }
    });

    view! {
        <Show when=loaded fallback=|| view! { <Loading /> }>
            <Show when=authenticated fallback=|| view! { <SignInPrompt /> }>
                <div class="min-h-screen flex bg-gray-50 text-gray-900">
                    <Sidebar />
                    <div class="flex-1 flex flex-col min-w-0">
                        <header class="h-16 flex items-center px-8 border-b border-gray-200 bg-white">
                            <h1 class="text-lg font-semibold">
                                {move || {
                                    page()
                                        .map(|p| p.title().trim_start_matches("Dashboard: "))
                                        .unwrap_or("Dashboard")
                                }}
                            </h1>
                        </header>
                        <main class="flex-1 p-8">
                            <Show when=allowed fallback=|| view! { <Restricted /> }>
                                <Outlet />
                            </Show>
                        </main>
                    </div>
                </div>
            </Show>
        </Show>
    }
}

#[component]
fn SignInPrompt() -> impl IntoView {
    view! {
        <div class="min-h-screen flex flex-col items-center justify-center text-center gap-4">
            <div class="text-6xl">"🔒"</div>
            <h1 class="text-2xl font-bold">"Inicia sesión para continuar"</h1>
            <A
                href=Page::Login.path()
                class="px-6 py-3 bg-primary-600 hover:bg-primary-700 text-white rounded-lg font-medium"
            >
                "Iniciar sesión"
            </A>
        </div>
    }
}

#[component]
fn Restricted() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center min-h-[60vh] text-center gap-3">
            <div class="text-6xl">"⛔"</div>
            <h2 class="text-2xl font-bold">"Acceso restringido"</h2>
            <p class="text-gray-600">"Tu rol no tiene acceso a esta sección."</p>
            <A href=Page::Dashboard.path() class="text-primary-600 font-medium">"Volver al inicio"</A>
        </div>
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center min-h-screen text-center">
            <div class="text-6xl mb-4">"🔍"</div>
            <h1 class="text-3xl font-bold mb-2">"Página no encontrada"</h1>
            <p class="text-gray-600 mb-6">"La página que buscas no existe."</p>
            <A
                href=Page::Landing.path()
                class="px-6 py-3 bg-primary-600 hover:bg-primary-700 text-white rounded-lg font-medium transition-colors"
            >
                "Ir al inicio"
            </A>
        </div>
    }
}
