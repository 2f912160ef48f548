use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api;
use crate::models::{Business, Client};
use crate::store::{ResourceAction, ResourceState};

use super::{
    bind_input, error_banner, icon_pencil, icon_plus, icon_trash, modal, page_shell, PageProps,
    FIELD_CLASS,
};

fn bind_business_field(
    businesses: &UseStateHandle<Vec<Business>>,
    index: usize,
    set: fn(&mut Business, String),
) -> Callback<InputEvent> {
    let businesses = businesses.clone();
    Callback::from(move |e: InputEvent| {
        let input: web_sys::HtmlInputElement = e.target_unchecked_into();
        let mut next = (*businesses).clone();
        if let Some(business) = next.get_mut(index) {
            set(business, input.value());
        }
        businesses.set(next);
    })
}

#[function_component(ClientsPage)]
pub fn clients_page(props: &PageProps) -> Html {
    let state = use_reducer(ResourceState::<Client>::default);
    let show_modal = use_state(|| false);
    let editing_id = use_state(|| None::<i32>);
    let form_error = use_state(|| None::<String>);
    let saving = use_state(|| false);

    let firstname = use_state(|| "".to_string());
    let middlename = use_state(|| "".to_string());
    let lastname = use_state(|| "".to_string());
    let birthday = use_state(|| "".to_string());
    let email = use_state(|| "".to_string());
    let contact = use_state(|| "".to_string());
    let businesses = use_state(Vec::<Business>::new);

    {
        let state = state.clone();
        let token = props.token.clone();
        use_effect_with_deps(
            move |_| {
                state.dispatch(ResourceAction::FetchStarted);
                let state = state.clone();
                spawn_local(async move {
                    match api::fetch_clients(token.as_deref()).await {
                        Ok(list) => state.dispatch(ResourceAction::Loaded(list)),
                        Err(err) => state.dispatch(ResourceAction::Failed(err.to_string())),
                    }
                });
                || ()
            },
            (),
        );
    }

    // deletions flip the reload flag; re-fetch so the list matches the server
    {
        let state = state.clone();
        let token = props.token.clone();
        let reload = state.reload;
        use_effect_with_deps(
            move |reload| {
                if *reload {
                    spawn_local(async move {
                        match api::fetch_clients(token.as_deref()).await {
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
        let form_error = form_error.clone();
        let firstname = firstname.clone();
        let middlename = middlename.clone();
        let lastname = lastname.clone();
        let birthday = birthday.clone();
        let email = email.clone();
        let contact = contact.clone();
        let businesses = businesses.clone();
        Callback::from(move |_: MouseEvent| {
            editing_id.set(None);
            firstname.set("".to_string());
            middlename.set("".to_string());
            lastname.set("".to_string());
            birthday.set("".to_string());
            email.set("".to_string());
            contact.set("".to_string());
            businesses.set(Vec::new());
            form_error.set(None);
            show_modal.set(true);
        })
    };

    // Edit re-fetches the record so the form starts from the server's copy,
    // not a row the cache may have drifted on; the cached row is the fallback.
    let open_edit = |client: &Client| {
        let show_modal = show_modal.clone();
        let editing_id = editing_id.clone();
        let form_error = form_error.clone();
        let firstname = firstname.clone();
        let middlename = middlename.clone();
        let lastname = lastname.clone();
        let birthday = birthday.clone();
        let email = email.clone();
        let contact = contact.clone();
        let businesses = businesses.clone();
        let token = props.token.clone();
        let client = client.clone();
        Callback::from(move |_: MouseEvent| {
            let fallback = client.clone();
            let show_modal = show_modal.clone();
            let editing_id = editing_id.clone();
            let form_error = form_error.clone();
            let firstname = firstname.clone();
            let middlename = middlename.clone();
            let lastname = lastname.clone();
            let birthday = birthday.clone();
            let email = email.clone();
            let contact = contact.clone();
            let businesses = businesses.clone();
            let token = token.clone();
            spawn_local(async move {
                let fresh = match fallback.id {
                    Some(id) => api::get_client(token.as_deref(), id)
                        .await
                        .unwrap_or(fallback),
                    None => fallback,
                };
                editing_id.set(fresh.id);
                firstname.set(fresh.firstname.clone());
                middlename.set(fresh.middlename.clone().unwrap_or_default());
                lastname.set(fresh.lastname.clone());
                birthday.set(fresh.birthday.clone());
                email.set(fresh.email.clone().unwrap_or_default());
                contact.set(fresh.contact_number.clone().unwrap_or_default());
                businesses.set(fresh.business);
                form_error.set(None);
                show_modal.set(true);
            });
        })
    };

    let on_close = {
        let show_modal = show_modal.clone();
        Callback::from(move |_: MouseEvent| show_modal.set(false))
    };

    let on_add_business = {
        let businesses = businesses.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = (*businesses).clone();
            next.push(Business::default());
            businesses.set(next);
        })
    };

    let on_remove_business = |index: usize| {
        let businesses = businesses.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = (*businesses).clone();
            next.remove(index);
            businesses.set(next);
        })
    };

    let on_save = {
        let state = state.clone();
        let token = props.token.clone();
        let show_modal = show_modal.clone();
        let editing_id = editing_id.clone();
        let form_error = form_error.clone();
        let saving = saving.clone();
        let firstname = firstname.clone();
        let middlename = middlename.clone();
        let lastname = lastname.clone();
        let birthday = birthday.clone();
        let email = email.clone();
        let contact = contact.clone();
        let businesses = businesses.clone();
        Callback::from(move |_: MouseEvent| {
            if firstname.trim().is_empty() || lastname.trim().is_empty() {
                form_error.set(Some("First and last name are required.".to_string()));
                return;
            }

            let optional = |value: &str| {
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            };
            let client = Client {
                id: *editing_id,
                firstname: firstname.trim().to_string(),
                middlename: optional(&middlename),
                lastname: lastname.trim().to_string(),
                birthday: (*birthday).clone(),
                email: optional(&email),
                contact_number: optional(&contact),
                business: (*businesses).clone(),
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
                    api::update_client(token.as_deref(), &client).await
                } else {
                    api::add_client(token.as_deref(), &client).await
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
                match api::delete_client(token.as_deref(), id).await {
                    Ok(id) => state.dispatch(ResourceAction::Removed(id)),
                    Err(err) => state.dispatch(ResourceAction::Failed(err.to_string())),
                }
            });
        })
    };

    html! {
        { page_shell(
            "Clients",
            html! {
                <button onclick={open_add} class="flex items-center gap-2 bg-primary text-primary-foreground px-4 py-2 rounded-xl font-bold text-sm hover:opacity-90 transition-all">
                    { icon_plus() }
                    {"Add Client"}
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
                                        <th class="px-8 py-4 font-bold">{"Name"}</th>
                                        <th class="px-8 py-4 font-bold">{"Birthday"}</th>
                                        <th class="px-8 py-4 font-bold">{"Email"}</th>
                                        <th class="px-8 py-4 font-bold">{"Contact"}</th>
                                        <th class="px-8 py-4 font-bold">{"Businesses"}</th>
                                        <th class="px-8 py-4 font-bold text-right">{"Actions"}</th>
                                    </tr>
                                </thead>
                                <tbody class="divide-y divide-border">
                                    {
                                        if state.loading {
                                            html! { <tr><td class="px-8 py-4 text-muted-foreground" colspan="6">{"Loading..."}</td></tr> }
                                        } else if state.items.is_empty() {
                                            html! { <tr><td class="px-8 py-4 text-muted-foreground" colspan="6">{"No clients yet."}</td></tr> }
                                        } else {
                                            html! {
                                                { for state.items.iter().map(|client| {
                                                    let id = client.id.unwrap_or(0);
                                                    html! {
                                                        <tr key={id} class="text-sm hover:bg-muted/30 transition-colors">
                                                            <td class="px-8 py-4 text-foreground font-medium">{ client.full_name() }</td>
                                                            <td class="px-8 py-4 text-muted-foreground">{ &client.birthday }</td>
                                                            <td class="px-8 py-4 text-muted-foreground">{ client.email.clone().unwrap_or_else(|| "—".to_string()) }</td>
                                                            <td class="px-8 py-4 text-muted-foreground">{ client.contact_number.clone().unwrap_or_else(|| "—".to_string()) }</td>
                                                            <td class="px-8 py-4 text-muted-foreground">
                                                                { client.business.iter().map(|b| b.business_name.clone()).collect::<Vec<_>>().join(", ") }
                                                            </td>
                                                            <td class="px-8 py-4 text-right">
                                                                <div class="flex justify-end gap-2">
                                                                    <button class="p-2 hover:bg-slate-100 rounded-lg" aria-label="Edit" onclick={open_edit(client)}>{ icon_pencil() }</button>
                                                                    {
                                                                        if let Some(id) = client.id {
                                                                            html! { <button class="p-2 hover:bg-red-50 text-red-500 rounded-lg" aria-label="Delete" onclick={on_delete(id)}>{ icon_trash() }</button> }
                                                                        } else {
                                                                            html! {}
                                                                        }
                                                                    }
                                                                </div>
                                                            </td>
                                                        </tr>
                                                    }
                                                }) }
                                            }
                                        }
                                    }
                                </tbody>
                            </table>
                        </div>
                    </div>

                    {
                        if *show_modal {
                            modal(
                                if editing_id.is_some() { "Edit Client" } else { "Add Client" },
                                &on_close,
                                html! {
                                    <>
                                        <div class="grid grid-cols-1 md:grid-cols-3 gap-3">
                                            <div class="space-y-1">
                                                <label class="text-sm font-medium text-foreground">{"First Name"}</label>
                                                <input class={FIELD_CLASS} value={(*firstname).clone()} oninput={bind_input(&firstname)} />
                                            </div>
                                            <div class="space-y-1">
                                                <label class="text-sm font-medium text-foreground">{"Middle Name"}</label>
                                                <input class={FIELD_CLASS} value={(*middlename).clone()} oninput={bind_input(&middlename)} />
                                            </div>
                                            <div class="space-y-1">
                                                <label class="text-sm font-medium text-foreground">{"Last Name"}</label>
                                                <input class={FIELD_CLASS} value={(*lastname).clone()} oninput={bind_input(&lastname)} />
                                            </div>
                                        </div>
                                        <div class="grid grid-cols-1 md:grid-cols-3 gap-3">
                                            <div class="space-y-1">
                                                <label class="text-sm font-medium text-foreground">{"Birthday"}</label>
                                                <input type="date" class={FIELD_CLASS} value={(*birthday).clone()} oninput={bind_input(&birthday)} />
                                            </div>
                                            <div class="space-y-1">
                                                <label class="text-sm font-medium text-foreground">{"Email"}</label>
                                                <input type="email" class={FIELD_CLASS} value={(*email).clone()} oninput={bind_input(&email)} />
                                            </div>
                                            <div class="space-y-1">
                                                <label class="text-sm font-medium text-foreground">{"Contact Number"}</label>
                                                <input class={FIELD_CLASS} value={(*contact).clone()} oninput={bind_input(&contact)} />
                                            </div>
                                        </div>

                                        <div class="flex items-center justify-between pt-2">
                                            <h4 class="text-sm font-bold text-foreground">{"Businesses"}</h4>
                                            <button class="flex items-center gap-1 text-sm text-primary font-semibold" onclick={on_add_business}>
                                                { icon_plus() }
                                                {"Add Business"}
                                            </button>
                                        </div>
                                        { for (*businesses).iter().enumerate().map(|(index, business)| html! {
                                            <div key={index} class="border border-border rounded-xl p-4 space-y-3">
                                                <div class="flex items-center justify-between">
                                                    <span class="text-xs font-bold text-muted-foreground uppercase tracking-widest">{ format!("Business {}", index + 1) }</span>
                                                    <button class="p-1 hover:bg-red-50 text-red-500 rounded-lg" aria-label="Remove" onclick={on_remove_business(index)}>{ icon_trash() }</button>
                                                </div>
                                                <div class="grid grid-cols-1 md:grid-cols-2 gap-3">
                                                    <input placeholder="Business name" class={FIELD_CLASS} value={business.business_name.clone()}
                                                        oninput={bind_business_field(&businesses, index, |b, v| b.business_name = v)} />
                                                    <input placeholder="Line of business" class={FIELD_CLASS} value={business.line_of_business.clone()}
                                                        oninput={bind_business_field(&businesses, index, |b, v| b.line_of_business = v)} />
                                                    <input placeholder="Registered address" class={FIELD_CLASS} value={business.registered_address.clone()}
                                                        oninput={bind_business_field(&businesses, index, |b, v| b.registered_address = v)} />
                                                    <input type="date" placeholder="Started date" class={FIELD_CLASS} value={business.started_date.clone()}
                                                        oninput={bind_business_field(&businesses, index, |b, v| b.started_date = v)} />
                                                    <input placeholder="TIN" class={FIELD_CLASS} value={business.tin.clone()}
                                                        oninput={bind_business_field(&businesses, index, |b, v| b.tin = v)} />
                                                    <input placeholder="ZIP code" class={FIELD_CLASS} value={business.zip_code.clone()}
                                                        oninput={bind_business_field(&businesses, index, |b, v| b.zip_code = v)} />
                                                </div>
                                            </div>
                                        }) }

                                        { error_banner(&form_error) }

                                        <button onclick={on_save} disabled={*saving}
                                            class="w-full bg-primary text-primary-foreground py-2 rounded-lg font-semibold hover:opacity-90 transition-opacity">
                                            { if *saving { "Saving..." } else { "Save Client" } }
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
