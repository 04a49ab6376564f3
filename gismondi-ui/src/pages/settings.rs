//! Settings Page
//!
//! API endpoint configuration and the current session.

use leptos::*;
use leptos_router::*;

use gismondi::api::DEFAULT_API_BASE;
use gismondi::nav::Route;
use gismondi::notify::Notification;

use super::medical_history::InfoRow;
use crate::state::{get_api_base, set_api_base, GlobalState};

#[component]
pub fn Settings() -> impl IntoView {
    view! {
        <div class="space-y-8">
            <div>
                <h1 class="text-3xl font-bold">"Configuración"</h1>
                <p class="text-gray-600 mt-1">"Preferencias de la aplicación"</p>
            </div>

            <ApiSettings />
            <SessionInfo />
        </div>
    }
}

#[component]
fn ApiSettings() -> impl IntoView {
    let state = expect_context::<GlobalState>();
    let (api_url, set_api_url) = create_signal(get_api_base());

    let save = move |_| {
        set_api_base(&api_url.get_untracked());
        set_api_url.set(get_api_base());
        state.push(Notification::success("URL de la API guardada"));
    };

    let restore = move |_| {
        set_api_base("");
        set_api_url.set(get_api_base());
        state.push(Notification::info("Se restauró la URL por defecto"));
    };

    view! {
        <section class="bg-white rounded-xl border p-6 space-y-4">
            <h2 class="text-xl font-semibold">"Conexión con la API"</h2>
            <div class="space-y-2">
                <label class="block text-sm font-medium">"URL de la API"</label>
                <div class="flex gap-2">
                    <input
                        type="text"
                        placeholder=DEFAULT_API_BASE
                        prop:value=move || api_url.get()
                        on:input=move |ev| set_api_url.set(event_target_value(&ev))
                        class="flex-1 rounded-lg border border-gray-300 px-4 py-3"
                    />
                    <button
                        on:click=save
                        class="px-4 py-3 bg-primary-600 hover:bg-primary-700 text-white rounded-lg font-medium"
                    >
                        "Guardar"
                    </button>
                    <button on:click=restore class="px-4 py-3 border rounded-lg font-medium hover:bg-gray-100">
                        "Restaurar"
                    </button>
                </div>
            </div>
        </section>
    }
}

#[component]
fn SessionInfo() -> impl IntoView {
    let state = expect_context::<GlobalState>();
    let navigate = use_navigate();
    let session = move || state.current_session().unwrap_or_default();

    let logout = move |_| {
        state.sign_out();
        state.push(Notification::info("Sesión cerrada"));
        navigate(Route::Login.path(), Default::default());
    };

    view! {
        <section class="bg-white rounded-xl border p-6 space-y-4">
            <h2 class="text-xl font-semibold">"Sesión"</h2>
            {move || {
                let session = session();
                let card = session.display_user();
                let role = session.role.map(|r| r.label()).unwrap_or("Desconocido");
                view! {
                    <div>
                        <InfoRow label="Nombre" value=card.name />
                        <InfoRow label="Email" value=card.email />
                        <InfoRow label="Rol" value=role.to_string() />
                    </div>
                }
            }}
            <button
                on:click=logout
                class="px-4 py-3 bg-red-600 hover:bg-red-700 text-white rounded-lg font-medium"
            >
                "Cerrar sesión"
            </button>
        </section>
    }
}
