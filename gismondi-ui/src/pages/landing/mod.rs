//! Landing Page
//!
//! Public marketing page: hero, services, values, FAQs and contact.

pub mod content;

use leptos::*;
use leptos_router::*;

use gismondi::nav::Route;

use crate::components::{Navbar, TextField};
use content::{CONTACT_INFO, CONTACT_SERVICES, FAQS, HERO_FEATURES, SERVICES, VALUES};

#[component]
pub fn Landing() -> impl IntoView {
    view! {
        <div class="min-h-screen bg-white text-gray-900">
            <Navbar />
            <main>
                <Hero />
                <Services />
                <Values />
                <Faq />
                <Contact />
            </main>
            <Footer />
        </div>
    }
}

#[component]
fn Hero() -> impl IntoView {
    view! {
        <section id="home" class="relative min-h-screen flex items-center pt-20">
            <div class="container mx-auto px-4 grid lg:grid-cols-2 gap-12 items-center">
                <div class="space-y-8">
                    <span class="inline-flex items-center gap-2 px-4 py-2 rounded-full border text-sm font-medium">
                        "✨ Más de 20 años de excelencia oftalmológica"
                    </span>
                    <h1 class="text-5xl lg:text-6xl font-bold tracking-tight">
                        "Cuidamos tu "
                        <span class="text-primary-600">"salud visual"</span>
                        " con tecnología de vanguardia"
                    </h1>
                    <p class="text-xl text-gray-600">
                        "Expertos en oftalmología comprometidos con tu bienestar visual. "
                        "Diagnóstico preciso, tratamientos avanzados y atención personalizada."
                    </p>
                    <ul class="space-y-2">
                        {HERO_FEATURES.iter().map(|feature| view! {
                            <li class="flex items-center gap-2">
                                <span class="text-green-600">"✓"</span>
                                <span>{*feature}</span>
                            </li>
                        }).collect_view()}
                    </ul>
                    <div class="flex flex-wrap gap-4">
                        <a href="#contacto" class="px-6 py-3 bg-primary-600 hover:bg-primary-700 text-white rounded-lg font-medium transition-colors">
                            "Agendar Cita Ahora →"
                        </a>
                        <a href="#servicios" class="px-6 py-3 border border-gray-300 hover:bg-gray-100 rounded-lg font-medium transition-colors">
                            "Ver Servicios"
                        </a>
                    </div>
                </div>
                <div class="hidden lg:flex items-center justify-center text-9xl">"👁️"</div>
            </div>
        </section>
    }
}

#[component]
fn Services() -> impl IntoView {
    view! {
        <section id="servicios" class="py-24 bg-gray-50">
            <div class="container mx-auto px-4">
                <div class="text-center mb-16 space-y-4">
                    <span class="text-sm font-medium text-primary-600">"Servicios Especializados"</span>
                    <h2 class="text-4xl font-bold">"Nuestros Servicios"</h2>
                </div>
                <div class="grid md:grid-cols-2 lg:grid-cols-3 gap-8">
                    {SERVICES.iter().map(|service| view! {
                        <article class="bg-white rounded-2xl border p-8 space-y-4 hover:shadow-xl transition-shadow">
                            <div class="text-4xl">{service.glyph}</div>
                            <h3 class="text-xl font-semibold">{service.title}</h3>
                            <p class="text-gray-600">{service.description}</p>
                            <ul class="flex flex-wrap gap-2">
                                {service.features.iter().map(|f| view! {
                                    <li class="px-3 py-1 rounded-full bg-gray-100 text-xs">{*f}</li>
                                }).collect_view()}
                            </ul>
                            <a href="#contacto" class="text-sm font-medium text-primary-600">"Más información →"</a>
                        </article>
                    }).collect_view()}
                </div>
                <p class="text-center mt-12 text-gray-600">
                    "¿No encuentras lo que buscas? "
                    <a href="#contacto" class="text-primary-600 font-medium">"Contáctanos"</a>
                </p>
            </div>
        </section>
    }
}

#[component]
fn Values() -> impl IntoView {
    view! {
        <section id="nosotros" class="py-24">
            <div class="container mx-auto px-4">
                <div class="text-center mb-16 space-y-4">
                    <span class="text-sm font-medium text-primary-600">"Excelencia en Oftalmología"</span>
                    <h2 class="text-4xl font-bold">"¿Por qué elegirnos?"</h2>
                    <p class="text-xl text-gray-600 max-w-3xl mx-auto">
                        "Combinamos experiencia médica, tecnología de vanguardia y un enfoque "
                        "centrado en el paciente para ofrecer la mejor atención oftalmológica."
                    </p>
                </div>
                <div class="grid md:grid-cols-2 lg:grid-cols-3 gap-8">
                    {VALUES.iter().map(|(title, description)| view! {
                        <div class="rounded-2xl border p-8 space-y-3">
                            <h3 class="text-lg font-semibold">{*title}</h3>
                            <p class="text-gray-600">{*description}</p>
                        </div>
                    }).collect_view()}
                </div>
                <div class="mt-16 rounded-2xl bg-primary-600 text-white p-10 text-center space-y-4">
                    <h3 class="text-2xl font-bold">"¿Listo para cuidar tu salud visual?"</h3>
                    <p>"Agenda una consulta y descubre cómo podemos ayudarte."</p>
                    <a href="#contacto" class="inline-block px-6 py-3 bg-white text-primary-700 rounded-lg font-medium">
                        "Solicitar Información"
                    </a>
                </div>
            </div>
        </section>
    }
}

/// Accordion; the first answer starts open
#[component]
fn Faq() -> impl IntoView {
    let (open, set_open) = create_signal(Some(0usize));

    view! {
        <section id="faqs" class="py-24 bg-gray-50">
            <div class="container mx-auto px-4 grid lg:grid-cols-2 gap-16 items-start">
                <div class="space-y-6 lg:sticky lg:top-32">
                    <span class="inline-flex px-4 py-2 rounded-full border text-sm font-medium">"Centro de Ayuda"</span>
                    <h2 class="text-4xl font-bold">"Preguntas Frecuentes"</h2>
                    <p class="text-xl text-gray-600">
                        "Resolvemos las dudas más comunes sobre nuestros servicios, "
                        "procedimientos y atención oftalmológica."
                    </p>
                    <div class="p-8 rounded-2xl border space-y-3">
                        <h3 class="font-semibold text-lg">"¿No encuentras tu respuesta?"</h3>
                        <a href="tel:+51043123456" class="block text-sm">"Teléfono: +51 043 123 456"</a>
                        <a href="mailto:contacto@clinicagismondi.com" class="block text-sm">
                            "Email: contacto@clinicagismondi.com"
                        </a>
                    </div>
                </div>

                <div class="space-y-4">
                    {FAQS.iter().enumerate().map(|(index, (question, answer))| {
                        let is_open = move || open.get() == Some(index);
                        view! {
                            <div class="bg-white rounded-xl border">
                                <button
                                    class="w-full flex items-center justify-between p-6 text-left font-medium"
                                    on:click=move |_| set_open.update(|o| {
                                        *o = if *o == Some(index) { None } else { Some(index) };
                                    })
                                >
                                    <span>{*question}</span>
                                    <span>{move || if is_open() { "−" } else { "+" }}</span>
                                </button>
                                <Show when=is_open>
                                    <p class="px-6 pb-6 text-gray-600">{*answer}</p>
                                </Show>
                            </div>
                        }
                    }).collect_view()}
                </div>
            </div>
        </section>
    }
}

/// Contact form contents; submitting only logs locally
#[derive(Clone, Debug, Default, serde::Serialize)]
struct ContactMessage {
    name: String,
    email: String,
    phone: String,
    service: String,
    message: String,
}

#[component]
fn Contact() -> impl IntoView {
    let form = create_rw_signal(ContactMessage::default());

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let message = form.get_untracked();
        let json = serde_json::to_string(&message).unwrap_or_default();
        web_sys::console::log_1(&format!("Form submitted: {}", json).into());
    };

    view! {
        <section id="contacto" class="py-24">
            <div class="container mx-auto px-4">
                <div class="text-center mb-16 space-y-4">
                    <h2 class="text-4xl font-bold">"Contáctanos"</h2>
                    <p class="text-xl text-gray-600">
                        "Estamos listos para atenderte. Completa el formulario o contáctanos "
                        "directamente por teléfono o email."
                    </p>
                </div>

                <div class="grid lg:grid-cols-2 gap-12 max-w-7xl mx-auto">
                    <form on:submit=on_submit class="rounded-2xl border shadow-xl p-8 space-y-6">
                        <div class="space-y-2">
                            <h3 class="text-2xl font-bold">"Envíanos un Mensaje"</h3>
                            <p class="text-gray-600">"Completa el formulario y te responderemos lo antes posible."</p>
                        </div>

                        <TextField label="Nombre completo *" placeholder="Juan Pérez García" input_type="text"
                            value=Signal::derive(move || form.with(|f| f.name.clone()))
                            on_input=move |v| form.update(|f| f.name = v) />
                        <div class="grid sm:grid-cols-2 gap-4">
                            <TextField label="Email *" placeholder="juan@ejemplo.com" input_type="email"
                                value=Signal::derive(move || form.with(|f| f.email.clone()))
                                on_input=move |v| form.update(|f| f.email = v) />
                            <TextField label="Teléfono" placeholder="+51 987 654 321" input_type="tel"
                                value=Signal::derive(move || form.with(|f| f.phone.clone()))
                                on_input=move |v| form.update(|f| f.phone = v) />
                        </div>

                        <div class="space-y-2">
                            <label class="text-sm font-medium">"Servicio de interés"</label>
                            <select
                                class="w-full rounded-lg border px-4 py-3"
                                on:change=move |ev| {
                                    let value = event_target_value(&ev);
                                    form.update(|f| f.service = value);
                                }
                            >
                                <option value="">"Selecciona un servicio"</option>
                                {CONTACT_SERVICES.iter().map(|s| view! {
                                    <option value=*s>{*s}</option>
                                }).collect_view()}
                            </select>
                        </div>

                        <div class="space-y-2">
                            <label class="text-sm font-medium">"Mensaje *"</label>
                            <textarea
                                rows="4"
                                placeholder="Cuéntanos cómo podemos ayudarte..."
                                class="w-full rounded-lg border px-4 py-3"
                                prop:value=move || form.with(|f| f.message.clone())
                                on:input=move |ev| {
                                    let value = event_target_value(&ev);
                                    form.update(|f| f.message = value);
                                }
                            />
                        </div>

                        <button type="submit" class="w-full px-6 py-3 bg-primary-600 hover:bg-primary-700 text-white rounded-lg font-medium">
                            "Enviar Mensaje"
                        </button>
                    </form>

                    <div class="grid sm:grid-cols-2 gap-6 content-start">
                        {CONTACT_INFO.iter().map(|info| view! {
                            <a href=info.link class="rounded-2xl border p-6 space-y-2 hover:shadow-lg transition-shadow">
                                <div class="text-2xl">{info.glyph}</div>
                                <h3 class="font-semibold">{info.title}</h3>
                                {info.details.iter().map(|d| view! {
                                    <p class="text-sm text-gray-600">{*d}</p>
                                }).collect_view()}
                            </a>
                        }).collect_view()}
                    </div>
                </div>
            </div>
        </section>
    }
}

#[component]
fn Footer() -> impl IntoView {
    view! {
        <footer class="border-t py-10">
            <div class="container mx-auto px-4 flex flex-col md:flex-row items-center justify-between gap-4 text-sm text-gray-600">
                <span class="font-semibold text-gray-900">"Clínica Gismondi"</span>
                <span>"Av. Principal 123, Chimbote, Ancash, Perú"</span>
                <A href=Route::Login.path() class="hover:text-gray-900">"Acceso para pacientes y médicos"</A>
            </div>
        </footer>
    }
}
