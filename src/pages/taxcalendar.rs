use chrono::Utc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api;
use crate::loader;
use crate::models::{Frequency, Service, TaxForm};
use crate::store::{ResourceAction, ResourceState};

use super::{
    bind_input, bind_select, error_banner, icon_pencil, icon_plus, icon_trash, modal, page_shell,
    PageProps, FIELD_CLASS,
};

fn frequency_from_value(value: &str) -> Frequency {
    Frequency::ALL
        .into_iter()
        .find(|f| f.label() == value)
        .unwrap_or(Frequency::Manual)
}

fn due_badge(form: &TaxForm) -> Html {
    let today = Utc::now().date_naive();
    match form.days_until_due(today) {
        Some(days) if days < 0 => html! {
            <span class="px-3 py-1 rounded-full text-[10px] font-bold bg-red-400 text-red-800">
                { format!("Overdue by {} day(s)", -days) }
            </span>
        },
        Some(days) if days <= 3 => html! {
            <span class="px-3 py-1 rounded-full text-[10px] font-bold bg-yellow-400 text-yellow-800">
                { format!("Due in {} day(s)", days) }
            </span>
        },
        Some(days) => html! {
            <span class="px-3 py-1 rounded-full text-[10px] font-bold bg-green-400 text-green-800">
                { format!("{} day(s) left", days) }
            </span>
        },
        None => html! {
            <span class="px-3 py-1 rounded-full text-[10px] font-bold bg-slate-300 text-slate-700">
                {"No due date"}
            </span>
        },
    }
}

#[function_component(TaxCalendarPage)]
pub fn tax_calendar_page(props: &PageProps) -> Html {
    let state = use_reducer(ResourceState::<TaxForm>::default);
    let services = use_state(Vec::<Service>::new);
    let loading = use_state(|| true);
    let show_modal = use_state(|| false);
    let editing_id = use_state(|| None::<i32>);
    let form_error = use_state(|| None::<String>);
    let saving = use_state(|| false);

    let form_no = use_state(|| "".to_string());
    let due_date = use_state(|| "".to_string());
    let frequency = use_state(|| Frequency::Manual.label().to_string());

    {
        let state = state.clone();
        let services = services.clone();
        let loading = loading.clone();
        let token = props.token.clone();
        use_effect_with_deps(
            move |_| {
                state.dispatch(ResourceAction::FetchStarted);
                spawn_local(async move {
                    let data = loader::load_tax_calendar(token.as_deref()).await;
                    state.dispatch(ResourceAction::Loaded(data.tax_forms));
                    services.set(data.services);
                    loading.set(false);
                });
                || ()
            },
            (),
        );
    }

    {
        let state = state.clone();
        let token = props.token.clone();
        let reload = state.reload;
        use_effect_with_deps(
            move |reload| {
                if *reload {
                    spawn_local(async move {
                        match api::fetch_tax_forms(token.as_deref()).await {
                            Ok(list) => state.dispatch(ResourceAction::Loaded(list)),
                            Err(err) => state.dispatch(ResourceAction::Failed(err.to_string())),
                        }
                    });
                }
                || ()
            },
            reload,
        );
    }

    let open_add = {
        let show_modal = show_modal.clone();
        let editing_id = editing_id.clone();
        let form_no = form_no.clone();
        let due_date = due_date.clone();
        let frequency = frequency.clone();
        let form_error = form_error.clone();
        Callback::from(move |_: MouseEvent| {
            editing_id.set(None);
            form_no.set("".to_string());
            due_date.set("".to_string());
            frequency.set(Frequency::Manual.label().to_string());
            form_error.set(None);
            show_modal.set(true);
        })
    };

    let open_edit = |form: &TaxForm| {
        let show_modal = show_modal.clone();
        let editing_id = editing_id.clone();
        let form_no = form_no.clone();
        let due_date = due_date.clone();
        let frequency = frequency.clone();
        let form_error = form_error.clone();
        let form = form.clone();
        Callback::from(move |_: MouseEvent| {
            editing_id.set(Some(form.id));
            form_no.set(form.form_no.clone());
            due_date.set(form.due_date.clone());
            frequency.set(form.frequency.label().to_string());
            form_error.set(None);
            show_modal.set(true);
        })
    };

    let on_close = {
        let show_modal = show_modal.clone();
        Callback::from(move |_: MouseEvent| show_modal.set(false))
    };

    let on_save = {
        let state = state.clone();
        let token = props.token.clone();
        let show_modal = show_modal.clone();
        let editing_id = editing_id.clone();
        let form_error = form_error.clone();
        let saving = saving.clone();
        let form_no = form_no.clone();
        let due_date = due_date.clone();
        let frequency = frequency.clone();
        Callback::from(move |_: MouseEvent| {
            if form_no.trim().is_empty() || due_date.trim().is_empty() {
                form_error.set(Some("Form number and due date are required.".to_string()));
                return;
            }

            let form = TaxForm {
                id: editing_id.unwrap_or(0),
                form_no: form_no.trim().to_string(),
                due_date: due_date.trim().to_string(),
                frequency: frequency_from_value(&frequency),
            };

            form_error.set(None);
            saving.set(true);

            let state = state.clone();
            let token = token.clone();
            let show_modal = show_modal.clone();
            let form_error = form_error.clone();
            let saving = saving.clone();
            let is_edit = editing_id.is_some();
            spawn_local(async move {
                let result = if is_edit {
                    api::update_tax_form(token.as_deref(), &form).await
                } else {
                    api::add_tax_form(token.as_deref(), &form).await
                };
                match result {
                    Ok(saved) => {
                        if is_edit {
                            state.dispatch(ResourceAction::Updated(saved));
                        } else {
                            state.dispatch(ResourceAction::Added(saved));
                        }
                        show_modal.set(false);
                    }
                    Err(err) => form_error.set(Some(err.to_string())),
                }
                saving.set(false);
            });
        })
    };

    let on_delete = |id: i32| {
        let state = state.clone();
        let token = props.token.clone();
        Callback::from(move |_: MouseEvent| {
            let state = state.clone();
            let token = token.clone();
            spawn_local(async move {
                match api::delete_tax_form(token.as_deref(), id).await {
                    Ok(id) => state.dispatch(ResourceAction::Removed(id)),
                    Err(err) => state.dispatch(ResourceAction::Failed(err.to_string())),
                }
            });
        })
    };

    html! {
        { page_shell(
            "Tax Calendar",
            html! {
                <button onclick={open_add} class="flex items-center gap-2 bg-primary text-primary-foreground px-4 py-2 rounded-xl font-bold text-sm hover:opacity-90 transition-all">
                    { icon_plus() }
                    {"Add Tax Form"}
                </button>
            },
            html! {
                <>
                    { error_banner(&state.error) }

                    <div class="bg-card rounded-[10px] shadow-sm border border-border overflow-hidden">
                        <div class="overflow-x-auto">
                            <table class="w-full text-left border-collapse">
                                <thead>
                                    <tr class="bg-muted/50 text-muted-foreground text-[10px] uppercase tracking-widest">
                                        <th class="px-8 py-4 font-bold">{"Form No."}</th>
                                        <th class="px-8 py-4 font-bold">{"Due Date"}</th>
                                        <th class="px-8 py-4 font-bold">{"Frequency"}</th>
                                        <th class="px-8 py-4 font-bold">{"Countdown"}</th>
                                        <th class="px-8 py-4 font-bold text-right">{"Actions"}</th>
                                    </tr>
                                </thead>
                                <tbody class="divide-y divide-border">
                                    {
                                        if *loading {
                                            html! { <tr><td class="px-8 py-4 text-muted-foreground" colspan="5">{"Loading..."}</td></tr> }
                                        } else if state.items.is_empty() {
                                            html! { <tr><td class="px-8 py-4 text-muted-foreground" colspan="5">{"No tax forms yet."}</td></tr> }
                                        } else {
                                            html! {
                                                { for state.items.iter().map(|form| html! {
                                                    <tr key={form.id} class="text-sm hover:bg-muted/30 transition-colors">
                                                        <td class="px-8 py-4 text-foreground font-medium">{ &form.form_no }</td>
                                                        <td class="px-8 py-4 text-muted-foreground">{ &form.due_date }</td>
                                                        <td class="px-8 py-4 text-muted-foreground">{ form.frequency.label() }</td>
                                                        <td class="px-8 py-4">{ due_badge(form) }</td>
                                                        <td class="px-8 py-4 text-right">
                                                            <div class="flex justify-end gap-2">
                                                                <button class="p-2 hover:bg-slate-100 rounded-lg" aria-label="Edit" onclick={open_edit(form)}>{ icon_pencil() }</button>
                                                                <button class="p-2 hover:bg-red-50 text-red-500 rounded-lg" aria-label="Delete" onclick={on_delete(form.id)}>{ icon_trash() }</button>
                                                            </div>
                                                        </td>
                                                    </tr>
                                                }) }
                                            }
                                        }
                                    }
                                </tbody>
                            </table>
                        </div>
                    </div>

                    <div class="bg-card rounded-[10px] p-6 border border-border">
                        <h3 class="font-bold text-foreground text-lg mb-3">{"Service Forms Reference"}</h3>
                        {
                            if (*services).is_empty() {
                                html! { <p class="text-sm text-muted-foreground">{"No services available."}</p> }
                            } else {
                                html! {
                                    <ul class="text-sm text-muted-foreground space-y-1">
                                        { for (*services).iter().map(|service| html! {
                                            <li key={service.id}>
                                                { format!("{} ({} form(s))", service.service, service.forms.len()) }
                                            </li>
                                        }) }
                                    </ul>
                                }
                            }
                        }
                    </div>

                    {
                        if *show_modal {
                            modal(
                                if editing_id.is_some() { "Edit Tax Form" } else { "Add Tax Form" },
                                &on_close,
                                html! {
                                    <>
                                        <div class="space-y-1">
                                            <label class="text-sm font-medium text-foreground">{"Form Number"}</label>
                                            <input class={FIELD_CLASS} value={(*form_no).clone()} oninput={bind_input(&form_no)} />
                                        </div>
                                        <div class="space-y-1">
                                            <label class="text-sm font-medium text-foreground">{"Due Date"}</label>
                                            <input type="date" class={FIELD_CLASS} value={(*due_date).clone()} oninput={bind_input(&due_date)} />
                                        </div>
                                        <div class="space-y-1">
                                            <label class="text-sm font-medium text-foreground">{"Frequency"}</label>
                                            <select class={FIELD_CLASS} value={(*frequency).clone()} onchange={bind_select(&frequency)}>
                                                { for Frequency::ALL.iter().map(|f| html! {
                                                    <option value={f.label()} selected={f.label() == frequency.as_str()}>{ f.label() }</option>
                                                }) }
                                            </select>
                                        </div>
                                        { error_banner(&form_error) }
                                        <button onclick={on_save} disabled={*saving}
                                            class="w-full bg-primary text-primary-foreground py-2 rounded-lg font-semibold hover:opacity-90 transition-opacity">
                                            { if *saving { "Saving..." } else { "Save" } }
                                        </button>
                                    </>
                                },
                            )
                        } else {
                            html! {}
                        }
                    }
                </>
            }
        ) }
    }
}
