//! Diagnoses Page
//!
//! The signed-in patient's own diagnoses, loaded once on mount.

use leptos::*;

use gismondi::api::Diagnosis;
use gismondi::history::{format_api_date, time_ago_str, DiagnosisSummary, PatientDiagnoses};
use gismondi::notify::Notification;

use super::medical_history::Stat;
use crate::api::WebClient;
use crate::components::loading::ListSkeleton;
use crate::state::GlobalState;

#[component]
pub fn Diagnoses() -> impl IntoView {
    let state = expect_context::<GlobalState>();
    let lookup = create_rw_signal(PatientDiagnoses::new());

    if let Some(session) = state.current_session() {
        let mut notifications: Vec<Notification> = Vec::new();
        let patient_id = lookup
            .try_update(|l| l.begin(&session, &mut notifications))
            .flatten();
        state.push_all(notifications);

        if let Some(patient_id) = patient_id {
            spawn_local(async move {
                let result = match session.bearer() {
                    Ok(token) => {
                        WebClient::from_storage()
                            .diagnoses_for_patient(token, &patient_id)
                            .await
                    }
                    Err(e) => Err(e),
                };
                let mut notifications: Vec<Notification> = Vec::new();
                lookup.update(|l| l.finish(result, &mut notifications));
                state.push_all(notifications);
            });
        }
    }

    let loading = move || lookup.with(|l| l.is_loading());
    let diagnoses = move || lookup.with(|l| l.diagnoses().to_vec());
    let summary = Signal::derive(move || lookup.with(|l| l.summary()));

    view! {
        <div class="space-y-8">
            <div>
                <h1 class="text-3xl font-bold">"Mis Diagnósticos"</h1>
                <p class="text-gray-600 mt-1">"Revisa tu historial de diagnósticos oftalmológicos"</p>
            </div>

            <Show when=move || !loading() fallback=|| view! { <ListSkeleton /> }>
                <SummaryStats summary=summary />

                {move || {
                    let diagnoses = diagnoses();
                    if diagnoses.is_empty() {
                        view! {
                            <div class="bg-white rounded-xl border p-12 text-center text-gray-500">
                                <div class="text-4xl mb-2">"🩺"</div>
                                <p class="font-medium">"No hay diagnósticos"</p>
                                <p class="text-sm">"Aún no tienes diagnósticos registrados"</p>
                            </div>
                        }.into_view()
                    } else {
                        view! {
                            <section class="bg-white rounded-xl border p-6 space-y-4">
                                <h2 class="text-xl font-semibold">"Historial de Diagnósticos"</h2>
                                {diagnoses
                                    .into_iter()
                                    .map(|diagnosis| view! { <DiagnosisCard diagnosis=diagnosis /> })
                                    .collect_view()}
                            </section>
                        }.into_view()
                    }
                }}

                <SpecialtyBreakdown summary=summary />
            </Show>
        </div>
    }
}

#[component]
fn SummaryStats(summary: Signal<DiagnosisSummary>) -> impl IntoView {
    move || {
        let summary = summary.get();
        let now = chrono::Utc::now().naive_utc();
        view! {
            <div class="grid sm:grid-cols-3 gap-4 text-center">
                <Stat label="Diagnósticos Totales" value=summary.total.to_string() />
                <Stat label="Médicos Diferentes" value=summary.distinct_doctors.to_string() />
                <Stat label="Última Consulta" value=summary.last_visit_label(now) />
            </div>
        }
    }
}

#[component]
fn DiagnosisCard(diagnosis: Diagnosis) -> impl IntoView {
    let ago = time_ago_str(&diagnosis.diagnosis_date, chrono::Utc::now().naive_utc())
        .unwrap_or_default();

    view! {
        <article class="rounded-lg border p-4 space-y-3">
            <div class="flex justify-between text-sm text-gray-500">
                <span>{format_api_date(&diagnosis.diagnosis_date)}</span>
                <span>{ago}</span>
            </div>
            <p>{diagnosis.description.clone()}</p>
            {diagnosis.doctor.map(|doctor| view! {
                <div class="grid grid-cols-2 gap-2 text-sm text-gray-600">
                    <p><span class="font-medium">"CMP: "</span>{doctor.cmp}</p>
                    <p><span class="font-medium">"Especialidad: "</span>{doctor.specialty}</p>
                </div>
            })}
        </article>
    }
}

#[component]
fn SpecialtyBreakdown(summary: Signal<DiagnosisSummary>) -> impl IntoView {
    move || {
        let shares = summary.with(|s| s.by_specialty.clone());
        (!shares.is_empty()).then(|| view! {
            <section class="bg-white rounded-xl border p-6 space-y-4">
                <h2 class="text-xl font-semibold">"Resumen por Especialidad"</h2>
                {shares.into_iter().map(|share| view! {
                    <div class="space-y-1">
                        <div class="flex justify-between text-sm">
                            <span class="font-medium">{share.specialty.clone()}</span>
                            <span class="text-gray-600">{share.count_label()}</span>
                        </div>
                        <div class="h-2 bg-gray-200 rounded-full overflow-hidden">
                            <div class="h-full bg-primary-600" style=format!("width: {}%", share.percent) />
                        </div>
                    </div>
                }).collect_view()}
            </section>
        })
    }
}
