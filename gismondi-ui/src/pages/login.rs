//! Login Page

use leptos::*;
use leptos_router::*;

use gismondi::auth::{LoginForm, DEFAULT_REDIRECT_DELAY};
use gismondi::nav::Route;

use crate::api::WebClient;
use crate::components::{InlineLoading, RoleSelect, TextField};
use crate::state::{GlobalState, LocalStorage};

#[component]
pub fn Login() -> impl IntoView {
    let state = expect_context::<GlobalState>();
    let navigate = use_navigate();

    let form = create_rw_signal(LoginForm::default());
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
            let result = WebClient::from_storage().login(&request).await;
            let outcome = current.complete(&mut LocalStorage, result, DEFAULT_REDIRECT_DELAY);
            state.apply_outcome(outcome, navigate);
            set_submitting.set(false);
        });
    };

    view! {
        <AuthCard title="Inicia sesión en tu cuenta" subtitle="Ingresa tu email y contraseña para continuar">
            <form on:submit=on_submit class="space-y-5">
                <TextField
                    label="Email"
                    placeholder="m@example.com"
                    input_type="email"
                    value=Signal::derive(move || form.with(|f| f.email.clone()))
                    on_input=move |v| form.update(|f| f.email = v)
                />
                <TextField
                    label="Contraseña"
                    placeholder="Mínimo 8 caracteres"
                    input_type="password"
                    value=Signal::derive(move || form.with(|f| f.password.clone()))
                    on_input=move |v| form.update(|f| f.password = v)
                />
                <RoleSelect
                    value=Signal::derive(move || form.with(|f| f.role))
                    on_change=move |role| form.update(|f| f.role = role)
                />

                <button
                    type="submit"
                    disabled=move || submitting.get()
                    class="w-full flex items-center justify-center gap-2 px-6 py-3 bg-primary-600 \
                           hover:bg-primary-700 disabled:bg-gray-400 text-white rounded-lg font-medium"
                >
                    <Show when=move || submitting.get()>
                        <InlineLoading />
                    </Show>
                    {move || if submitting.get() { "Ingresando..." } else { "Iniciar sesión" }}
                </button>
            </form>

            <p class="text-center text-sm text-gray-600">
                "¿No tienes una cuenta? "
                <A href=Route::Register.path() class="font-medium text-primary-600">"Regístrate"</A>
            </p>
        </AuthCard>
    }
}

/// Centered card shared by the login and register pages
#[component]
pub fn AuthCard(
    title: &'static str,
    subtitle: &'static str,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="min-h-screen flex items-center justify-center bg-gray-50 px-4 py-12">
            <div class="w-full max-w-lg bg-white rounded-2xl border shadow-xl p-8 space-y-6">
                <A href=Route::Landing.path() class="flex items-center justify-center space-x-2">
                    <img src="/logo-gismondi.webp" alt="Logotipo Gismondi" class="h-10 w-10" />
                    <span class="text-2xl font-bold">"Gismondi"</span>
                </A>
                <div class="text-center space-y-1">
                    <h1 class="text-2xl font-bold">{title}</h1>
                    <p class="text-sm text-gray-600">{subtitle}</p>
                </div>
                {children()}
            </div>
        </div>
    }
}
