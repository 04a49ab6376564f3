//! Register Page

use leptos::*;
use leptos_router::*;

use gismondi::auth::{RegisterForm, RoleFields, DEFAULT_REDIRECT_DELAY};
use gismondi::nav::Route;
use gismondi::session::Role;

use super::login::AuthCard;
use crate::api::WebClient;
use crate::components::{InlineLoading, RoleSelect, TextField};
use crate::state::GlobalState;

/// One of the two role-specific inputs
#[derive(Clone, Copy, PartialEq)]
enum Slot {
    First,
    Second,
}

fn slot_value(fields: &RoleFields, slot: Slot) -> String {
    let [first, second] = fields.labelled();
    match slot {
        Slot::First => first.1.to_string(),
        Slot::Second => second.1.to_string(),
    }
}

fn set_slot(fields: &mut RoleFields, slot: Slot, value: String) {
    let target = match (fields, slot) {
        (RoleFields::Patient { dni, .. }, Slot::First) => dni,
        (RoleFields::Patient { birth_date, .. }, Slot::Second) => birth_date,
        (RoleFields::Doctor { cmp, .. }, Slot::First) => cmp,
        (RoleFields::Doctor { specialty, .. }, Slot::Second) => specialty,
        (RoleFields::Admin { position, .. }, Slot::First) => position,
        (RoleFields::Admin { responsible_area, .. }, Slot::Second) => responsible_area,
    };
    *target = value;
}

/// (placeholder, input type) of each role-specific input
fn slot_input(role: Role, slot: Slot) -> (&'static str, &'static str) {
    match (role, slot) {
        (Role::Patient, Slot::First) => ("Número de DNI", "text"),
        (Role::Patient, Slot::Second) => ("", "date"),
        (Role::Doctor, Slot::First) => ("Número de Colegiatura", "text"),
        (Role::Doctor, Slot::Second) => ("Ej: Oftalmología", "text"),
        (Role::Admin, Slot::First) => ("Ej: Gerente General", "text"),
        (Role::Admin, Slot::Second) => ("Ej: Administración", "text"),
    }
}

#[component]
pub fn Register() -> impl IntoView {
    let state = expect_context::<GlobalState>();
    let navigate = use_navigate();

    let form = create_rw_signal(RegisterForm::default());
    let (submitting, set_submitting) = create_signal(false);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }

        let current = form.get_untracked();
        let request = match current.validate() {
            Ok(request) => request,
            Err(notification) => {
                state.push(notification);
                return;
            }
        };

        set_submitting.set(true);
        let navigate = navigate.clone();
        spawn_local(async move {
            let result = WebClient::from_storage().register(&request).await;
            let outcome = current.complete(result, DEFAULT_REDIRECT_DELAY);
            state.apply_outcome(outcome, navigate);
            set_submitting.set(false);
        });
    };

    // Inputs for the selected role; rebuilt only when the role changes
    let role = create_memo(move |_| form.with(|f| f.role()));
    let role_inputs = move || {
        let role = role.get();
        [Slot::First, Slot::Second]
            .into_iter()
            .map(|slot| {
                let label = form.with_untracked(|f| {
                    let [first, second] = f.fields.labelled();
                    if slot == Slot::First { first.0 } else { second.0 }
                });
                let (placeholder, input_type) = slot_input(role, slot);
                view! {
                    <TextField
                        label=label
                        placeholder=placeholder
                        input_type=input_type
                        value=Signal::derive(move || form.with(|f| slot_value(&f.fields, slot)))
                        on_input=move |v| form.update(|f| set_slot(&mut f.fields, slot, v))
                    />
                }
            })
            .collect_view()
    };

    view! {
        <AuthCard title="Crear cuenta" subtitle="Completa tus datos para registrarte">
            <form on:submit=on_submit class="space-y-5">
                <div class="grid sm:grid-cols-2 gap-4">
                    <TextField
                        label="Nombres"
                        placeholder="Tus nombres"
                        value=Signal::derive(move || form.with(|f| f.first_name.clone()))
                        on_input=move |v| form.update(|f| f.first_name = v)
                    />
                    <TextField
                        label="Apellidos"
                        placeholder="Tus apellidos"
                        value=Signal::derive(move || form.with(|f| f.last_name.clone()))
                        on_input=move |v| form.update(|f| f.last_name = v)
                    />
                </div>
                <TextField
                    label="Email"
                    placeholder="m@example.com"
                    input_type="email"
                    value=Signal::derive(move || form.with(|f| f.email.clone()))
                    on_input=move |v| form.update(|f| f.email = v)
                />
                <div class="grid sm:grid-cols-2 gap-4">
                    <TextField
                        label="Contraseña"
                        placeholder="Mínimo 8 caracteres"
                        input_type="password"
                        value=Signal::derive(move || form.with(|f| f.password.clone()))
                        on_input=move |v| form.update(|f| f.password = v)
                    />
                    <TextField
                        label="Confirmar Contraseña"
                        placeholder="Repite tu contraseña"
                        input_type="password"
                        value=Signal::derive(move || form.with(|f| f.password_confirmation.clone()))
                        on_input=move |v| form.update(|f| f.password_confirmation = v)
                    />
                </div>

                <RoleSelect
                    value=role
                    on_change=move |role| form.update(|f| f.select_role(role))
                />

                <div class="grid sm:grid-cols-2 gap-4">{role_inputs}</div>

                <button
                    type="submit"
                    disabled=move || submitting.get()
                    class="w-full flex items-center justify-center gap-2 px-6 py-3 bg-primary-600 \
                           hover:bg-primary-700 disabled:bg-gray-400 text-white rounded-lg font-medium"
                >
                    <Show when=move || submitting.get()>
                        <InlineLoading />
                    </Show>
                    {move || if submitting.get() { "Creando cuenta..." } else { "Crear cuenta" }}
                </button>
            </form>

            <p class="text-center text-sm text-gray-600">
                "¿Ya tienes una cuenta? "
                <A href=Route::Login.path() class="font-medium text-primary-600">"Inicia sesión"</A>
            </p>
        </AuthCard>
    }
}
