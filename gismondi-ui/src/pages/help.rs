//! Help Page

use leptos::*;

use gismondi::classify::DrLabel;

use super::landing::content::{CONTACT_INFO, FAQS};

#[component]
pub fn Help() -> impl IntoView {
    view! {
        <div class="space-y-8">
            <div>
                <h1 class="text-3xl font-bold">"Ayuda"</h1>
                <p class="text-gray-600 mt-1">"Preguntas frecuentes y datos de contacto"</p>
            </div>

            <section class="bg-white rounded-xl border p-6 space-y-3">
                <h2 class="text-xl font-semibold">"Escala de Retinopatía Diabética"</h2>
                <ul class="space-y-2 text-sm">
                    {DrLabel::KNOWN.iter().map(|label| view! {
                        <li class="flex items-center gap-3">
                            <span class=format!("w-3 h-3 rounded-full {}", label.color().bg_class()) />
                            <span class="font-medium">{label.display_text().to_string()}</span>
                            <span class="text-gray-600">{label.description().to_string()}</span>
                        </li>
                    }).collect_view()}
                </ul>
            </section>

            <section class="bg-white rounded-xl border p-6 space-y-4">
                <h2 class="text-xl font-semibold">"Preguntas Frecuentes"</h2>
                {FAQS.iter().map(|(question, answer)| view! {
                    <details class="rounded-lg border p-4">
                        <summary class="font-medium cursor-pointer">{*question}</summary>
                        <p class="mt-2 text-gray-600">{*answer}</p>
                    </details>
                }).collect_view()}
            </section>

            <section class="grid sm:grid-cols-2 gap-4">
                {CONTACT_INFO.iter().map(|info| view! {
                    <a href=info.link class="bg-white rounded-xl border p-6 space-y-1">
                        <div class="text-2xl">{info.glyph}</div>
                        <h3 class="font-semibold">{info.title}</h3>
                        {info.details.iter().map(|d| view! { <p class="text-sm text-gray-600">{*d}</p> }).collect_view()}
                    </a>
                }).collect_view()}
            </section>
        </div>
    }
}
