//! Form Inputs
//!
//! Labelled inputs shared by the landing, auth and dashboard forms.

use leptos::*;

use gismondi::session::Role;

/// Labelled text input bound to a signal
#[component]
pub fn TextField<F>(
    label: &'static str,
    #[prop(default = "")]
    placeholder: &'static str,
    #[prop(default = "text")]
    input_type: &'static str,
    #[prop(into)] value: Signal<String>,
    on_input: F,
) -> impl IntoView
where
    F: Fn(String) + 'static,
{
    view! {
        <div class="space-y-2">
            <label class="block text-sm font-medium">{label}</label>
            <input
                type=input_type
                placeholder=placeholder
                class="w-full rounded-lg border border-gray-300 px-4 py-3 \
                       focus:border-primary-500 focus:outline-none"
                prop:value=move || value.get()
                on:input=move |ev| on_input(event_target_value(&ev))
            />
        </div>
    }
}

/// "Selecciona tu rol" dropdown
#[component]
pub fn RoleSelect<F>(#[prop(into)] value: Signal<Role>, on_change: F) -> impl IntoView
where
    F: Fn(Role) + 'static,
{
    view! {
        <div class="space-y-2">
            <label class="block text-sm font-medium">"Selecciona tu rol"</label>
            <select
                class="w-full rounded-lg border border-gray-300 px-4 py-3"
                on:change=move |ev| {
                    match event_target_value(&ev).parse::<Role>() {
                        Ok(role) => on_change(role),
                        Err(e) => web_sys::console::warn_1(&e.to_string().into()),
                    }
                }
            >
                {Role::ALL.into_iter().map(|role| view! {
                    <option value=role.as_str() selected=move || value.get() == role>
                        {format!("{} {}", role.icon(), role.label())}
                    </option>
                }).collect_view()}
            </select>
        </div>
    }
}
