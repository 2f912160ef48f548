use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api;
use crate::export::peso;
use crate::models::{Announcement, Inquiry, ProofKind, ProofOfTransaction, Service, Transaction};

use super::{bind_input, bind_select, error_banner, FIELD_CLASS};

#[derive(Clone, Copy, PartialEq)]
enum Section {
    Home,
    Services,
    Announcements,
    Proofs,
    Appointment,
}

#[derive(Properties, PartialEq)]
pub struct PublicProps {
    pub on_admin_login: Callback<()>,
}

#[function_component(PublicSite)]
pub fn public_site(props: &PublicProps) -> Html {
    let section = use_state(|| Section::Home);
    let services = use_state(Vec::<Service>::new);
    let announcements = use_state(Vec::<Announcement>::new);
    let proofs = use_state(Vec::<ProofOfTransaction>::new);

    {
        let services = services.clone();
        let announcements = announcements.clone();
        let proofs = proofs.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    if let Ok(list) = api::fetch_services_public().await {
                        services.set(list);
                    }
                    if let Ok(list) = api::fetch_announcements().await {
                        announcements.set(list);
                    }
                    if let Ok(list) = api::fetch_proofs().await {
                        proofs.set(list);
                    }
                });
                || ()
            },
            (),
        );
    }

    let nav_button = |label: &'static str, target: Section| {
        let section = section.clone();
        let is_active = *section == target;
        let class = if is_active {
            "px-4 py-2 rounded-xl text-sm font-bold bg-[#173E63] text-white"
        } else {
            "px-4 py-2 rounded-xl text-sm font-medium text-[#173E63] hover:bg-[#B2CBDE]"
        };
        html! {
            <button class={class} onclick={Callback::from(move |_| section.set(target))}>
                { label }
            </button>
        }
    };

    let body = match *section {
        Section::Home => html! {
            <div class="text-center py-20">
                <h1 class="text-4xl font-black text-[#173E63] tracking-tight">{"W&E Guarantee"}</h1>
                <p class="mt-4 text-lg text-slate-600 max-w-2xl mx-auto">
                    {"Bookkeeping, tax filing, and business registration services in Batangas City. We handle the paperwork so you can run your business."}
                </p>
                <div class="mt-8">
                    { nav_button("Book an Appointment", Section::Appointment) }
                </div>
                <div class="mt-12 text-sm text-slate-500 space-y-1">
                    <p>{"Phone: 0916-286-5399 / 0915-113-3693"}</p>
                    <p>{"Email: webs.sanjuanbatangas@gmail.com"}</p>
                    <p>{"Location: Pastor Avenue, Pallocan West, Batangas City"}</p>
                </div>
            </div>
        },
        Section::Services => html! {
            <div class="grid grid-cols-1 md:grid-cols-2 gap-6 py-10">
                { for services.iter().map(|service| html! {
                    <div key={service.id} class="bg-white rounded-2xl border border-slate-200 p-6 shadow-sm">
                        <h3 class="font-bold text-[#173E63] text-lg">{ &service.service }</h3>
                        <ul class="mt-3 text-sm text-slate-600 space-y-2">
                            { for service.forms.iter().enumerate().map(|(index, form)| html! {
                                <li key={index} class="flex items-center justify-between">
                                    <span>{ &form.name }</span>
                                    <span class="font-semibold">{ peso(form.price.trim().parse::<f64>().unwrap_or(0.0)) }</span>
                                </li>
                            }) }
                        </ul>
                    </div>
                }) }
            </div>
        },
        Section::Announcements => html! {
            <div class="grid grid-cols-1 md:grid-cols-2 gap-6 py-10">
                { for announcements.iter().map(|announcement| html! {
                    <div key={announcement.id} class="bg-white rounded-2xl border border-slate-200 p-6 shadow-sm">
                        <h3 class="font-bold text-[#173E63] text-lg">{ &announcement.title }</h3>
                        <p class="text-xs text-slate-400 mt-1">{ &announcement.date }</p>
                        <p class="text-sm text-slate-600 mt-3">{ &announcement.description }</p>
                    </div>
                }) }
            </div>
        },
        Section::Proofs => html! {
            <div class="grid grid-cols-1 md:grid-cols-3 gap-6 py-10">
                { for proofs.iter().map(|proof| html! {
                    <div key={proof.id} class="bg-white rounded-2xl border border-slate-200 overflow-hidden shadow-sm">
                        {
                            match proof.kind {
                                ProofKind::Image => html! {
                                    <img src={proof.content.clone()} alt={proof.title.clone()} class="w-full h-48 object-cover" />
                                },
                                ProofKind::Video => html! {
                                    <video src={proof.content.clone()} controls=true class="w-full h-48 object-cover"></video>
                                },
                                ProofKind::Embed => html! {
                                    <iframe src={proof.content.clone()} class="w-full h-48 border-0"></iframe>
                                },
                            }
                        }
                        <div class="p-4">
                            <h3 class="font-bold text-[#173E63]">{ &proof.title }</h3>
                            <p class="text-sm text-slate-600 mt-1">{ &proof.description }</p>
                        </div>
                    </div>
                }) }
            </div>
        },
        Section::Appointment => html! {
            <AppointmentForm services={(*services).clone()} />
        },
    };

    let on_admin = {
        let on_admin_login = props.on_admin_login.clone();
        Callback::from(move |_: MouseEvent| on_admin_login.emit(()))
    };

    html! {
        <div class="min-h-screen bg-[#F3F7FA]">
            <header class="bg-[#D8E1E8] border-b border-slate-200">
                <div class="max-w-6xl mx-auto px-6 h-16 flex items-center justify-between">
                    <span class="text-[#173E63] text-xl font-black tracking-tight">{"W&E Guarantee"}</span>
                    <nav class="flex items-center gap-1">
                        { nav_button("Home", Section::Home) }
                        { nav_button("Services", Section::Services) }
                        { nav_button("Announcements", Section::Announcements) }
                        { nav_button("Our Work", Section::Proofs) }
                        { nav_button("Book", Section::Appointment) }
                        <button class="px-4 py-2 rounded-xl text-sm font-medium text-slate-500 hover:text-[#173E63]" onclick={on_admin}>
                            {"Admin"}
                        </button>
                    </nav>
                </div>
            </header>
            <main class="max-w-6xl mx-auto px-6">
                { body }
            </main>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct AppointmentFormProps {
    services: Vec<Service>,
}

/// Appointment intake. Submits without a session; the transaction lands as
/// Pending / In Progress for the admins to pick up.
#[function_component(AppointmentForm)]
fn appointment_form(props: &AppointmentFormProps) -> Html {
    let name = use_state(|| "".to_string());
    let date = use_state(|| "".to_string());
    let business_name = use_state(|| "".to_string());
    let tin = use_state(|| "".to_string());
    let selected_service = use_state(|| "".to_string());
    let selected_form = use_state(|| "".to_string());
    let inquiries = use_state(Vec::<Inquiry>::new);
    let error = use_state(|| None::<String>);
    let success = use_state(|| None::<String>);
    let submitting = use_state(|| false);

    let current_service = props
        .services
        .iter()
        .find(|s| s.service == *selected_service);

    let on_add_inquiry = {
        let services = props.services.clone();
        let selected_service = selected_service.clone();
        let selected_form = selected_form.clone();
        let inquiries = inquiries.clone();
        let error = error.clone();
        Callback::from(move |_: MouseEvent| {
            let Some(service) = services.iter().find(|s| s.service == *selected_service) else {
                error.set(Some("Pick a service first.".to_string()));
                return;
            };
            let Some(form) = service.forms.iter().find(|f| f.name == *selected_form) else {
                error.set(Some("Pick a form for that service.".to_string()));
                return;
            };
            error.set(None);
            let mut next = (*inquiries).clone();
            next.push(Inquiry {
                name: form.name.clone(),
                price: form.price.clone(),
                service: service.service.clone(),
            });
            inquiries.set(next);
        })
    };

    let on_remove_inquiry = |index: usize| {
        let inquiries = inquiries.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = (*inquiries).clone();
            next.remove(index);
            inquiries.set(next);
        })
    };

    let on_submit = {
        let name = name.clone();
        let date = date.clone();
        let business_name = business_name.clone();
        let tin = tin.clone();
        let inquiries = inquiries.clone();
        let error = error.clone();
        let success = success.clone();
        let submitting = submitting.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if name.trim().is_empty() || date.trim().is_empty() {
                error.set(Some("Name and date are required.".to_string()));
                return;
            }
            if inquiries.is_empty() {
                error.set(Some("Add at least one inquiry.".to_string()));
                return;
            }

            let transaction = Transaction {
                name: name.trim().to_string(),
                date: date.trim().to_string(),
                business_name: business_name.trim().to_string(),
                tin_id: tin.trim().to_string(),
                inquiries: (*inquiries).clone(),
                ..Default::default()
            };

            error.set(None);
            submitting.set(true);

            let name = name.clone();
            let date = date.clone();
            let business_name = business_name.clone();
            let tin = tin.clone();
            let inquiries = inquiries.clone();
            let error = error.clone();
            let success = success.clone();
            let submitting = submitting.clone();
            spawn_local(async move {
                match api::add_transaction(&transaction).await {
                    Ok(_) => {
                        name.set("".to_string());
                        date.set("".to_string());
                        business_name.set("".to_string());
                        tin.set("".to_string());
                        inquiries.set(Vec::new());
                        success.set(Some(
                            "Appointment booked. We will get in touch shortly.".to_string(),
                        ));
                    }
                    Err(err) => error.set(Some(err.to_string())),
                }
                submitting.set(false);
            });
        })
    };

    let total: f64 = inquiries.iter().map(Inquiry::price_value).sum();

    html! {
        <div class="max-w-2xl mx-auto py-10">
            <div class="bg-white rounded-2xl border border-slate-200 p-8 shadow-sm">
                <h2 class="text-2xl font-bold text-[#173E63]">{"Book an Appointment"}</h2>
                <p class="text-sm text-slate-500 mt-1">{"Tell us who you are and what you need done."}</p>

                <form class="mt-6 space-y-4" onsubmit={on_submit}>
                    <div class="grid grid-cols-1 md:grid-cols-2 gap-3">
                        <div class="space-y-1">
                            <label class="text-sm font-medium text-foreground">{"Full Name"}</label>
                            <input class={FIELD_CLASS} value={(*name).clone()} oninput={bind_input(&name)} />
                        </div>
                        <div class="space-y-1">
                            <label class="text-sm font-medium text-foreground">{"Preferred Date"}</label>
                            <input type="date" class={FIELD_CLASS} value={(*date).clone()} oninput={bind_input(&date)} />
                        </div>
                        <div class="space-y-1">
                            <label class="text-sm font-medium text-foreground">{"Business Name (optional)"}</label>
                            <input class={FIELD_CLASS} value={(*business_name).clone()} oninput={bind_input(&business_name)} />
                        </div>
                        <div class="space-y-1">
                            <label class="text-sm font-medium text-foreground">{"TIN (optional)"}</label>
                            <input class={FIELD_CLASS} value={(*tin).clone()} oninput={bind_input(&tin)} />
                        </div>
                    </div>

                    <div class="border border-slate-200 rounded-xl p-4 space-y-3">
                        <h4 class="text-sm font-bold text-foreground">{"Inquiries"}</h4>
                        <div class="grid grid-cols-1 md:grid-cols-2 gap-3">
                            <select class={FIELD_CLASS} value={(*selected_service).clone()} onchange={bind_select(&selected_service)}>
                                <option value="" selected={selected_service.is_empty()}>{"Select a service"}</option>
                                { for props.services.iter().map(|service| html! {
                                    <option value={service.service.clone()} selected={service.service == *selected_service}>
                                        { &service.service }
                                    </option>
                                }) }
                            </select>
                            <select class={FIELD_CLASS} value={(*selected_form).clone()} onchange={bind_select(&selected_form)}>
                                <option value="" selected={selected_form.is_empty()}>{"Select a form"}</option>
                                {
                                    match current_service {
                                        Some(service) => html! {
                                            { for service.forms.iter().map(|form| html! {
                                                <option value={form.name.clone()} selected={form.name == *selected_form}>
                                                    { format!("{} ({})", form.name, peso(form.price.trim().parse::<f64>().unwrap_or(0.0))) }
                                                </option>
                                            }) }
                                        },
                                        None => html! {},
                                    }
                                }
                            </select>
                        </div>
                        <button type="button" class="text-sm text-primary font-semibold" onclick={on_add_inquiry}>
                            {"+ Add Inquiry"}
                        </button>

                        {
                            if inquiries.is_empty() {
                                html! { <p class="text-sm text-slate-400">{"Nothing added yet."}</p> }
                            } else {
                                html! {
                                    <ul class="divide-y divide-slate-100">
                                        { for inquiries.iter().enumerate().map(|(index, inquiry)| html! {
                                            <li key={index} class="py-2 flex items-center justify-between text-sm">
                                                <span>{ format!("{} ({})", inquiry.name, inquiry.service) }</span>
                                                <span class="flex items-center gap-3">
                                                    <span class="font-semibold">{ peso(inquiry.price_value()) }</span>
                                                    <button type="button" class="text-red-500 text-xs font-semibold" onclick={on_remove_inquiry(index)}>{"Remove"}</button>
                                                </span>
                                            </li>
                                        }) }
                                    </ul>
                                }
                            }
                        }
                        <p class="text-right text-sm font-bold text-foreground">{ format!("Total: {}", peso(total)) }</p>
                    </div>

                    { error_banner(&error) }
                    {
                        if let Some(msg) = &*success {
                            html! { <div class="bg-green-50 border border-green-200 text-green-700 text-sm rounded-lg px-4 py-3">{ msg.clone() }</div> }
                        } else {
                            html! {}
                        }
                    }

                    <button type="submit" disabled={*submitting}
                        class="w-full bg-primary text-primary-foreground py-2 rounded-lg font-semibold hover:opacity-90 transition-opacity">
                        { if *submitting { "Booking..." } else { "Book Appointment" } }
                    </button>
                </form>
            </div>
        </div>
    }
}
