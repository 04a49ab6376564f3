//! Dashboard Page
//!
//! Welcome screen with quick links to the pages the role can open.

use leptos::*;
use leptos_router::*;

use gismondi::nav::{filter_by_role, Route, MAIN_NAV};

use crate::state::GlobalState;

fn blurb(route: Route) -> &'static str {
    match route {
        Route::Classifier => "Clasifica imágenes de fondo de ojo y genera reportes",
        Route::MedicalHistory => "Consulta el historial médico de tus pacientes",
        Route::Diagnoses => "Revisa los diagnósticos registrados por tus médicos",
        _ => "",
    }
}

#[component]
pub fn Dashboard() -> impl IntoView {
    let state = expect_context::<GlobalState>();
    let session = move || state.current_session().unwrap_or_default();

    // The dashboard link itself is not a quick action
    let shortcuts = move || {
        filter_by_role(MAIN_NAV, session().role)
            .into_iter()
            .filter(|item| item.url != Route::Dashboard.path())
            .collect::<Vec<_>>()
    };

    view! {
        <div class="space-y-8">
            <div>
                <h1 class="text-3xl font-bold">
                    {move || format!("Bienvenido, {}", session().display_user().name)}
                </h1>
                <p class="text-gray-600 mt-1">
                    {move || match session().role {
                        Some(role) => format!("Has iniciado sesión como {}", role.label()),
                        None => "Panel de la Clínica Gismondi".to_string(),
                    }}
                </p>
            </div>

            <section class="grid md:grid-cols-2 lg:grid-cols-3 gap-6">
                {move || shortcuts().into_iter().map(|item| {
                    let description = Route::from_path(item.url).map(blurb).unwrap_or("");
                    view! {
                        <A
                            href=item.url
                            class="block bg-white rounded-xl border p-6 space-y-2 hover:shadow-lg transition-shadow"
                        >
                            <div class="text-3xl">{item.icon.glyph()}</div>
                            <h2 class="text-lg font-semibold">{item.title}</h2>
                            <p class="text-sm text-gray-600">{description}</p>
                        </A>
                    }
                }).collect_view()}
            </section>
        </div>
    }
}
