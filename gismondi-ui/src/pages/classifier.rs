//! Classifier Page
//!
//! Doctors upload a fundus image, classify it and optionally file a report
//! for a patient. All state transitions go through the core
//! [`ClassificationWorkflow`]; this page only renders it and performs the
//! requests it asks for.

use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, File, HtmlInputElement};

use gismondi::classify::{
    ClassificationWorkflow, DrLabel, ImageCandidate, SelectionSource, WorkflowState,
};
use gismondi::notify::Notification;

use crate::api::WebClient;
use crate::components::InlineLoading;
use crate::state::{GlobalState, ObjectUrls};

type Workflow = ClassificationWorkflow<File, ObjectUrls>;

/// Run `f` on the workflow, then show whatever it notified
fn with_workflow<R>(
    workflow: RwSignal<Workflow>,
    state: GlobalState,
    f: impl FnOnce(&mut Workflow, &mut Vec<Notification>) -> R,
) -> Option<R> {
    let mut notifications = Vec::new();
    let result = workflow.try_update(|w| f(w, &mut notifications));
    state.push_all(notifications);
    result
}

fn format_size(bytes: u64) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.2} MB", bytes as f64 / (1024.0 * 1024.0))
    } else {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    }
}

#[component]
pub fn Classifier() -> impl IntoView {
    let state = expect_context::<GlobalState>();
    let workflow = create_rw_signal(Workflow::new(ObjectUrls));

    // Release the preview when leaving the page
    on_cleanup(move || {
        workflow.try_update(|w| w.reset());
    });

    let select = move |file: File, source: SelectionSource| {
        let candidate = ImageCandidate::new(file.name(), file.type_(), file.size() as u64);
        with_workflow(workflow, state, |w, n| w.select_image(candidate, file, source, n));
    };

    let classify = move |_| {
        let Some(session) = state.current_session() else {
            return;
        };
        let Some(request) = with_workflow(workflow, state, |w, n| w.begin_classify(n)).flatten()
        else {
            return;
        };

        spawn_local(async move {
            let result = match session.bearer() {
                Ok(token) => WebClient::from_storage().classify_image(token, request).await,
                Err(e) => Err(e),
            };
            with_workflow(workflow, state, |w, n| w.finish_classify(result, n));
        });
    };

    let reset = move |_| {
        with_workflow(workflow, state, |w, _| w.reset());
    };

    let busy = move || workflow.with(|w| w.is_busy());

    view! {
        <div class="space-y-8">
            <div>
                <h1 class="text-3xl font-bold">"Clasificador de Retinopatía Diabética"</h1>
                <p class="text-gray-600 mt-1">
                    "Sube una imagen de fondo de ojo para obtener una clasificación automática"
                </p>
            </div>

            <div class="grid lg:grid-cols-2 gap-8">
                <section class="bg-white rounded-xl border p-6 space-y-4">
                    <h2 class="text-xl font-semibold">"Imagen"</h2>
                    <DropZone workflow=workflow on_select=select />

                    <div class="flex gap-3">
                        <button
                            on:click=classify
                            disabled=move || busy() || workflow.with(|w| w.image().is_none())
                            class="flex-1 flex items-center justify-center gap-2 px-4 py-3 bg-primary-600 \
                                   hover:bg-primary-700 disabled:bg-gray-400 text-white rounded-lg font-medium"
                        >
                            <Show when=move || workflow.with(|w| w.state() == WorkflowState::Classifying)>
                                <InlineLoading />
                            </Show>
                            {move || if workflow.with(|w| w.state() == WorkflowState::Classifying) {
                                "Clasificando..."
                            } else {
                                "Clasificar imagen"
                            }}
                        </button>
                        <button
                            on:click=reset
                            disabled=busy
                            class="px-4 py-3 border rounded-lg font-medium hover:bg-gray-100 disabled:opacity-50"
                        >
                            "Limpiar"
                        </button>
                    </div>
                </section>

                <section class="bg-white rounded-xl border p-6">
                    <PredictionPanel workflow=workflow />
                </section>
            </div>

            <ReportDialog workflow=workflow />
            <AboutClassifier />
        </div>
    }
}

/// File picker and drop target; both go through the same selection path
#[component]
fn DropZone<F>(workflow: RwSignal<Workflow>, on_select: F) -> impl IntoView
where
    F: Fn(File, SelectionSource) + Copy + 'static,
{
    let (dragging, set_dragging) = create_signal(false);

    let on_change = move |ev: ev::Event| {
        let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
        else {
            return;
        };
        if let Some(file) = input.files().and_then(|files| files.get(0)) {
            on_select(file, SelectionSource::Picker);
        }
        // Allow picking the same file again
        input.set_value("");
    };

    let on_drop = move |ev: DragEvent| {
        ev.prevent_default();
        set_dragging.set(false);
        if let Some(file) = ev
            .data_transfer()
            .and_then(|dt| dt.files())
            .and_then(|files| files.get(0))
        {
            on_select(file, SelectionSource::Drop);
        }
    };

    let preview = move || workflow.with(|w| w.preview_url().map(str::to_string));
    let details = move || {
        workflow.with(|w| {
            w.image()
                .map(|img| format!("{} · {}", img.candidate.name, format_size(img.candidate.size)))
        })
    };

    view! {
        <label
            class=move || {
                let base = "flex flex-col items-center justify-center min-h-64 rounded-xl border-2 \
                            border-dashed cursor-pointer transition-colors p-4";
                if dragging.get() {
                    format!("{} border-primary-500 bg-primary-50", base)
                } else {
                    format!("{} border-gray-300 hover:border-primary-500", base)
                }
            }
            on:dragover=move |ev: DragEvent| {
                ev.prevent_default();
                set_dragging.set(true);
            }
            on:dragleave=move |_| set_dragging.set(false)
            on:drop=on_drop
        >
            <input type="file" accept="image/*" class="hidden" on:change=on_change />
            {move || match preview() {
                Some(url) => view! {
                    <img src=url alt="Vista previa" class="max-h-64 rounded-lg object-contain" />
                }.into_view(),
                None => view! {
                    <div class="text-center text-gray-500 space-y-2">
                        <div class="text-4xl">"📤"</div>
                        <p class="font-medium">"Haz clic o arrastra una imagen aquí"</p>
                        <p class="text-xs">"PNG, JPG o WEBP · máximo 10MB"</p>
                    </div>
                }.into_view(),
            }}
            {move || details().map(|d| view! { <p class="mt-3 text-sm text-gray-600">{d}</p> })}
        </label>
    }
}

#[component]
fn PredictionPanel(workflow: RwSignal<Workflow>) -> impl IntoView {
    let state = expect_context::<GlobalState>();
    let prediction = move || workflow.with(|w| w.prediction().cloned());

    let open_report = move |_| {
        with_workflow(workflow, state, |w, n| w.open_report_dialog(n));
    };

    view! {
        <h2 class="text-xl font-semibold mb-4">"Resultado"</h2>
        {move || match prediction() {
            None => view! {
                <div class="h-64 flex flex-col items-center justify-center text-gray-500 text-center">
                    <div class="text-4xl mb-2">"🔍"</div>
                    <p>"Sube y clasifica una imagen para ver el resultado"</p>
                </div>
            }.into_view(),
            Some(prediction) => {
                let label = prediction.label.clone();
                let confidence = prediction.confidence.clamp(0.0, 100.0);
                view! {
                    <div class="space-y-5">
                        <div class="flex items-center gap-3">
                            <span class=format!("w-3 h-3 rounded-full {}", label.color().bg_class()) />
                            <span class="text-2xl font-bold">{label.display_text().to_string()}</span>
                            <span class="px-2 py-1 rounded bg-gray-100 text-xs font-mono">
                                {label.code().to_string()}
                            </span>
                        </div>
                        <p class="text-gray-600">{label.description().to_string()}</p>

                        <div class="space-y-1">
                            <div class="flex justify-between text-sm">
                                <span>"Confianza"</span>
                                <span class="font-medium">{prediction.confidence_text()}</span>
                            </div>
                            <div class="h-2 bg-gray-200 rounded-full overflow-hidden">
                                <div
                                    class=format!("h-full {}", prediction.confidence_color().bg_class())
                                    style=format!("width: {:.2}%", confidence)
                                />
                            </div>
                        </div>

                        <Recommendations label=label />

                        <button
                            on:click=open_report
                            class="w-full px-4 py-3 bg-gray-900 hover:bg-gray-800 text-white rounded-lg font-medium"
                        >
                            "Generar reporte"
                        </button>
                    </div>
                }.into_view()
            }
        }}
    }
}

#[component]
fn Recommendations(label: DrLabel) -> impl IntoView {
    let lines = label.recommendations();
    (!lines.is_empty()).then(|| view! {
        <div class="rounded-lg bg-gray-50 p-4">
            <p class="font-medium mb-2">"Recomendaciones:"</p>
            <ul class="space-y-1 text-sm">
                {lines.iter().map(|line| view! { <li>{*line}</li> }).collect_view()}
            </ul>
        </div>
    })
}

/// Patient DNI prompt for filing the report
#[component]
fn ReportDialog(workflow: RwSignal<Workflow>) -> impl IntoView {
    let state = expect_context::<GlobalState>();

    let submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let Some(session) = state.current_session() else {
            return;
        };
        let Some(request) =
            with_workflow(workflow, state, |w, n| w.begin_report(&session, n)).flatten()
        else {
            return;
        };

        spawn_local(async move {
            let result = match session.bearer() {
                Ok(token) => WebClient::from_storage().generate_report(token, &request).await,
                Err(e) => Err(e),
            };
            with_workflow(workflow, state, |w, n| w.finish_report(result, n));
        });
    };

    let pending = move || workflow.with(|w| w.state() == WorkflowState::ReportPending);
    let summary = move || {
        workflow.with(|w| {
            w.prediction()
                .map(|p| (p.label.display_text().to_string(), p.label.code().to_string(), p.confidence_text()))
        })
    };

    view! {
        <Show when=move || workflow.with(|w| w.report_dialog_open())>
            <div class="fixed inset-0 z-40 bg-black/50 flex items-center justify-center p-4">
                <form on:submit=submit class="w-full max-w-md bg-white rounded-2xl shadow-xl p-6 space-y-5">
                    <h2 class="text-xl font-semibold">"Generar reporte"</h2>

                    {move || summary().map(|(text, code, confidence)| view! {
                        <div class="rounded-lg bg-gray-50 p-4 text-sm space-y-1">
                            <p class="font-medium">"Resumen del Diagnóstico"</p>
                            <p>"Resultado: " {text}</p>
                            <p>"Código: " {code}</p>
                            <p>"Confianza: " {confidence}</p>
                        </div>
                    })}

                    <div class="space-y-2">
                        <label class="block text-sm font-medium">"DNI del Paciente"</label>
                        <input
                            type="text"
                            placeholder="Ej: 18007564"
                            class="w-full rounded-lg border border-gray-300 px-4 py-3"
                            prop:value=move || workflow.with(|w| w.report_dni().to_string())
                            on:input=move |ev| {
                                let dni = event_target_value(&ev);
                                workflow.update(|w| w.set_report_dni(dni));
                            }
                        />
                    </div>

                    <div class="flex justify-end gap-3">
                        <button
                            type="button"
                            disabled=pending
                            on:click=move |_| workflow.update(|w| w.close_report_dialog())
                            class="px-4 py-2 border rounded-lg hover:bg-gray-100 disabled:opacity-50"
                        >
                            "Cancelar"
                        </button>
                        <button
                            type="submit"
                            disabled=pending
                            class="flex items-center gap-2 px-4 py-2 bg-primary-600 hover:bg-primary-700 \
                                   disabled:bg-gray-400 text-white rounded-lg font-medium"
                        >
                            <Show when=pending>
                                <InlineLoading />
                            </Show>
                            {move || if pending() { "Generando..." } else { "Generar" }}
                        </button>
                    </div>
                </form>
            </div>
        </Show>
    }
}

#[component]
fn AboutClassifier() -> impl IntoView {
    view! {
        <section class="bg-white rounded-xl border p-6 space-y-3">
            <h2 class="text-xl font-semibold">"Acerca del Clasificador"</h2>
            <p class="text-gray-600">"Escala de clasificación:"</p>
            <ul class="space-y-1 text-sm">
                {DrLabel::KNOWN.iter().map(|label| view! {
                    <li>
                        <span class="font-mono font-medium">{label.code().to_string()}</span>
                        " - "
                        {label.description().to_string()}
                    </li>
                }).collect_view()}
            </ul>
        </section>
    }
}
