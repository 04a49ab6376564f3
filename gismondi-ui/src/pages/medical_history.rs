//! Medical History Page
//!
//! Doctors look up a patient's history by DNI.

use leptos::*;

use gismondi::api::{Diagnosis, Patient};
use gismondi::history::{
    age_from_str, format_api_date, format_api_datetime, time_ago_str, DiagnosisSummary,
    LookupStatus, MedicalHistorySearch,
};
use gismondi::notify::Notification;

use crate::api::WebClient;
use crate::components::InlineLoading;
use crate::state::GlobalState;

fn now() -> chrono::NaiveDateTime {
    chrono::Utc::now().naive_utc()
}

#[component]
pub fn MedicalHistory() -> impl IntoView {
    let state = expect_context::<GlobalState>();
    let search = create_rw_signal(MedicalHistorySearch::new());

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let Some(session) = state.current_session() else {
            return;
        };

        let mut notifications: Vec<Notification> = Vec::new();
        let request = search
            .try_update(|s| s.begin(&session, &mut notifications))
            .flatten();
        state.push_all(notifications);
        let Some(request) = request else {
            return;
        };

        spawn_local(async move {
            let result = match session.bearer() {
                Ok(token) => {
                    WebClient::from_storage()
                        .medical_history_by_dni(token, &request)
                        .await
                }
                Err(e) => Err(e),
            };
            let mut notifications: Vec<Notification> = Vec::new();
            search.update(|s| s.finish(result, &mut notifications));
            state.push_all(notifications);
        });
    };

    let loading = move || search.with(|s| s.is_loading());
    let patient = move || search.with(|s| s.patient().cloned());

    view! {
        <div class="space-y-8">
            <div>
                <h1 class="text-3xl font-bold">"Historiales Médicos"</h1>
                <p class="text-gray-600 mt-1">"Consulta el historial médico de un paciente por su DNI"</p>
            </div>

            <section class="bg-white rounded-xl border p-6">
                <h2 class="text-xl font-semibold mb-4">"Buscar Historial Médico"</h2>
                <form on:submit=on_submit class="flex gap-3">
                    <input
                        type="text"
                        placeholder="Ingresa el DNI del paciente"
                        class="flex-1 rounded-lg border border-gray-300 px-4 py-3"
                        prop:value=move || search.with(|s| s.dni.clone())
                        on:input=move |ev| {
                            let dni = event_target_value(&ev);
                            search.update(|s| s.dni = dni);
                        }
                    />
                    <button
                        type="submit"
                        disabled=loading
                        class="flex items-center gap-2 px-6 py-3 bg-primary-600 hover:bg-primary-700 \
                               disabled:bg-gray-400 text-white rounded-lg font-medium"
                    >
                        <Show when=loading>
                            <InlineLoading />
                        </Show>
                        {move || if loading() { "Buscando..." } else { "Buscar" }}
                    </button>
                </form>
            </section>

            {move || match patient() {
                Some(patient) => view! { <PatientRecord patient=patient /> }.into_view(),
                None if search.with(|s| s.status() == LookupStatus::NotFound) => view! {
                    <div class="text-center text-gray-500 py-12">
                        <div class="text-4xl mb-2">"📭"</div>
                        <p>"No se encontró historial médico para este DNI"</p>
                    </div>
                }.into_view(),
                None => ().into_view(),
            }}
        </div>
    }
}

#[component]
fn PatientRecord(patient: Patient) -> impl IntoView {
    let today = chrono::Utc::now().date_naive();
    let age = age_from_str(&patient.birth_date, today)
        .map(|years| format!("{} años", years))
        .unwrap_or_else(|| "N/A".to_string());
    let diagnoses = patient.diagnoses().to_vec();
    let summary = DiagnosisSummary::from_diagnoses(&diagnoses);
    let created = patient
        .medical_history
        .as_ref()
        .map(|h| format_api_datetime(&h.created_at))
        .unwrap_or_else(|| "N/A".to_string());

    view! {
        <div class="grid lg:grid-cols-3 gap-8">
            <section class="bg-white rounded-xl border p-6 space-y-3">
                <h2 class="text-xl font-semibold">"Información del Paciente"</h2>
                <InfoRow label="DNI" value=patient.dni.clone() />
                <InfoRow label="Fecha de Nacimiento" value=format_api_date(&patient.birth_date) />
                <InfoRow label="Edad" value=age />
                <InfoRow
                    label="Historial"
                    value=patient
                        .medical_history
                        .as_ref()
                        .map(|h| format!("#{}", h.id))
                        .unwrap_or_else(|| "Sin historial".to_string())
                />
            </section>

            <section class="lg:col-span-2 bg-white rounded-xl border p-6 space-y-4">
                <h2 class="text-xl font-semibold">"Diagnósticos"</h2>
                {if diagnoses.is_empty() {
                    view! {
                        <p class="text-gray-500">"Este paciente no tiene diagnósticos registrados"</p>
                    }.into_view()
                } else {
                    diagnoses
                        .into_iter()
                        .map(|diagnosis| view! { <DiagnosisEntry diagnosis=diagnosis /> })
                        .collect_view()
                }}
            </section>

            <section class="lg:col-span-3 bg-white rounded-xl border p-6">
                <h2 class="text-xl font-semibold mb-4">"Resumen"</h2>
                <div class="grid sm:grid-cols-3 gap-4 text-center">
                    <Stat label="Total de Diagnósticos" value=summary.total.to_string() />
                    <Stat label="Historial Creado" value=created />
                    <Stat label="Médicos Involucrados" value=summary.distinct_doctors.to_string() />
                </div>
            </section>
        </div>
    }
}

#[component]
fn DiagnosisEntry(diagnosis: Diagnosis) -> impl IntoView {
    let ago = time_ago_str(&diagnosis.diagnosis_date, now()).unwrap_or_default();
    let doctor = diagnosis
        .doctor
        .as_ref()
        .map(|d| format!("CMP {} · {}", d.cmp, d.specialty));

    view! {
        <article class="rounded-lg border p-4 space-y-2">
            <div class="flex justify-between text-sm text-gray-500">
                <span>{format_api_date(&diagnosis.diagnosis_date)}</span>
                <span>{ago}</span>
            </div>
            <p>{diagnosis.description.clone()}</p>
            {doctor.map(|d| view! {
                <p class="text-sm text-gray-600">
                    <span class="font-medium">"Médico Tratante: "</span>
                    {d}
                </p>
            })}
        </article>
    }
}

#[component]
pub(crate) fn InfoRow(label: &'static str, value: String) -> impl IntoView {
    view! {
        <div class="flex justify-between border-b last:border-0 py-2">
            <span class="text-gray-600">{label}</span>
            <span class="font-medium">{value}</span>
        </div>
    }
}

#[component]
pub(crate) fn Stat(label: &'static str, value: String) -> impl IntoView {
    view! {
        <div class="rounded-lg bg-gray-50 p-4">
            <p class="text-2xl font-bold">{value}</p>
            <p class="text-sm text-gray-600">{label}</p>
        </div>
    }
}
