use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api::{self, NewService};
use crate::models::{Service, ServiceForm};
use crate::store::{ResourceAction, ResourceState};

use super::{
    bind_input, error_banner, icon_pencil, icon_plus, icon_trash, modal, page_shell, PageProps,
    FIELD_CLASS,
};

fn bind_form_field(
    forms: &UseStateHandle<Vec<ServiceForm>>,
    index: usize,
    set: fn(&mut ServiceForm, String),
) -> Callback<InputEvent> {
    let forms = forms.clone();
    Callback::from(move |e: InputEvent| {
        let input: web_sys::HtmlInputElement = e.target_unchecked_into();
        let mut next = (*forms).clone();
        if let Some(form) = next.get_mut(index) {
            set(form, input.value());
        }
        forms.set(next);
    })
}

#[function_component(ServicesPage)]
pub fn services_page(props: &PageProps) -> Html {
    let state = use_reducer(ResourceState::<Service>::default);
    let show_add = use_state(|| false);
    let rename_target = use_state(|| None::<Service>);
    let rename_value = use_state(|| "".to_string());
    let form_error = use_state(|| None::<String>);
    let saving = use_state(|| false);

    let new_name = use_state(|| "".to_string());
    let new_forms = use_state(Vec::<ServiceForm>::new);

    {
        let state = state.clone();
        let token = props.token.clone();
        use_effect_with_deps(
            move |_| {
                state.dispatch(ResourceAction::FetchStarted);
                let state = state.clone();
                spawn_local(async move {
                    match api::fetch_services(token.as_deref()).await {
                        Ok(list) => state.dispatch(ResourceAction::Loaded(list)),
                        Err(err) => state.dispatch(ResourceAction::Failed(err.to_string())),
                    }
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
                        match api::fetch_services(token.as_deref()).await {
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
        let show_add = show_add.clone();
        let new_name = new_name.clone();
        let new_forms = new_forms.clone();
        let form_error = form_error.clone();
        Callback::from(move |_: MouseEvent| {
            new_name.set("".to_string());
            new_forms.set(vec![ServiceForm::default()]);
            form_error.set(None);
            show_add.set(true);
        })
    };

    let close_add = {
        let show_add = show_add.clone();
        Callback::from(move |_: MouseEvent| show_add.set(false))
    };

    let on_add_form_row = {
        let new_forms = new_forms.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = (*new_forms).clone();
            next.push(ServiceForm::default());
            new_forms.set(next);
        })
    };

    let on_remove_form_row = |index: usize| {
        let new_forms = new_forms.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = (*new_forms).clone();
            next.remove(index);
            new_forms.set(next);
        })
    };

    let on_save_new = {
        let state = state.clone();
        let token = props.token.clone();
        let show_add = show_add.clone();
        let form_error = form_error.clone();
        let saving = saving.clone();
        let new_name = new_name.clone();
        let new_forms = new_forms.clone();
        Callback::from(move |_: MouseEvent| {
            if new_name.trim().is_empty() {
                form_error.set(Some("Service name is required.".to_string()));
                return;
            }
            let forms: Vec<ServiceForm> = (*new_forms)
                .iter()
                .filter(|f| !f.name.trim().is_empty())
                .cloned()
                .collect();

            form_error.set(None);
            saving.set(true);

            let payload = NewService {
                service: new_name.trim().to_string(),
                forms,
            };
            let state = state.clone();
            let token = token.clone();
            let show_add = show_add.clone();
            let form_error = form_error.clone();
            let saving = saving.clone();
            spawn_local(async move {
                match api::add_service(token.as_deref(), &payload).await {
                    Ok(saved) => {
                        state.dispatch(ResourceAction::Added(saved));
                        show_add.set(false);
                    }
                    Err(err) => form_error.set(Some(err.to_string())),
                }
                saving.set(false);
            });
        })
    };

    let open_rename = |service: &Service| {
        let rename_target = rename_target.clone();
        let rename_value = rename_value.clone();
        let form_error = form_error.clone();
        let service = service.clone();
        Callback::from(move |_: MouseEvent| {
            rename_value.set(service.service.clone());
            form_error.set(None);
            rename_target.set(Some(service.clone()));
        })
    };

    let close_rename = {
        let rename_target = rename_target.clone();
        Callback::from(move |_: MouseEvent| rename_target.set(None))
    };

    let on_save_rename = {
        let state = state.clone();
        let token = props.token.clone();
        let rename_target = rename_target.clone();
        let rename_value = rename_value.clone();
        let form_error = form_error.clone();
        let saving = saving.clone();
        Callback::from(move |_: MouseEvent| {
            let Some(target) = (*rename_target).clone() else {
                return;
            };
            if rename_value.trim().is_empty() {
                form_error.set(Some("Service name is required.".to_string()));
                return;
            }
            saving.set(true);
            let name = rename_value.trim().to_string();
            let state = state.clone();
            let token = token.clone();
            let rename_target = rename_target.clone();
            let form_error = form_error.clone();
            let saving = saving.clone();
            spawn_local(async move {
                match api::update_service_name(token.as_deref(), target.id, &name).await {
                    Ok(saved) => {
                        state.dispatch(ResourceAction::Updated(saved));
                        rename_target.set(None);
                    }
                    Err(err) => form_error.set(Some(err.to_string())),
                }
                saving.set(false);
            });
        })
    };

    let on_delete_service = |id: i32| {
        let state = state.clone();
        let token = props.token.clone();
        Callback::from(move |_: MouseEvent| {
            let state = state.clone();
            let token = token.clone();
            spawn_local(async move {
                match api::delete_service(token.as_deref(), id).await {
                    Ok(id) => state.dispatch(ResourceAction::Removed(id)),
                    Err(err) => state.dispatch(ResourceAction::Failed(err.to_string())),
                }
            });
        })
    };

    // removing one form keeps the rest; patch the row in place on success
    let on_delete_form = |service: &Service, index: usize| {
        let state = state.clone();
        let token = props.token.clone();
        let service = service.clone();
        Callback::from(move |_: MouseEvent| {
            let state = state.clone();
            let token = token.clone();
            let mut updated = service.clone();
            spawn_local(async move {
                match api::delete_form(token.as_deref(), updated.id, index).await {
                    Ok(()) => {
                        if index < updated.forms.len() {
                            updated.forms.remove(index);
                        }
                        state.dispatch(ResourceAction::Updated(updated));
                    }
                    Err(err) => state.dispatch(ResourceAction::Failed(err.to_string())),
                }
            });
        })
    };

    html! {
        { page_shell(
            "Services",
            html! {
                <button onclick={open_add} class="flex items-center gap-2 bg-primary text-primary-foreground px-4 py-2 rounded-xl font-bold text-sm hover:opacity-90 transition-all">
                    { icon_plus() }
                    {"Add Service"}
                </button>
            },
            html! {
                <>
                    { error_banner(&state.error) }

                    {
                        if state.loading {
                            html! { <p class="text-sm text-muted-foreground">{"Loading..."}</p> }
                        } else if state.items.is_empty() {
                            html! { <p class="text-sm text-muted-foreground">{"No services yet."}</p> }
                        } else {
                            html! {
                                { for state.items.iter().map(|service| html! {
                                    <div key={service.id} class="bg-card rounded-[10px] shadow-sm border border-border overflow-hidden">
                                        <div class="p-6 flex justify-between items-center border-b border-border">
                                            <h3 class="font-bold text-foreground text-lg">{ &service.service }</h3>
                                            <div class="flex gap-2">
                                                <button class="p-2 hover:bg-slate-100 rounded-lg" aria-label="Rename" onclick={open_rename(service)}>{ icon_pencil() }</button>
                                                <button class="p-2 hover:bg-red-50 text-red-500 rounded-lg" aria-label="Delete" onclick={on_delete_service(service.id)}>{ icon_trash() }</button>
                                            </div>
                                        </div>
                                        {
                                            if service.forms.is_empty() {
                                                html! { <p class="px-6 py-4 text-sm text-muted-foreground">{"No forms uploaded."}</p> }
                                            } else {
                                                html! {
                                                    <table class="w-full text-left border-collapse">
                                                        <thead>
                                                            <tr class="bg-muted/50 text-muted-foreground text-[10px] uppercase tracking-widest">
                                                                <th class="px-6 py-3 font-bold">{"Form"}</th>
                                                                <th class="px-6 py-3 font-bold">{"Price"}</th>
                                                                <th class="px-6 py-3 font-bold">{"Description"}</th>
                                                                <th class="px-6 py-3 font-bold text-right">{"Actions"}</th>
                                                            </tr>
                                                        </thead>
                                                        <tbody class="divide-y divide-border">
                                                            { for service.forms.iter().enumerate().map(|(index, form)| html! {
                                                                <tr key={index} class="text-sm hover:bg-muted/30 transition-colors">
                                                                    <td class="px-6 py-3 text-foreground">{ &form.name }</td>
                                                                    <td class="px-6 py-3 text-muted-foreground">{ &form.price }</td>
                                                                    <td class="px-6 py-3 text-muted-foreground">{ &form.description }</td>
                                                                    <td class="px-6 py-3 text-right">
                                                                        <button class="p-2 hover:bg-red-50 text-red-500 rounded-lg" aria-label="Delete form" onclick={on_delete_form(service, index)}>{ icon_trash() }</button>
                                                                    </td>
                                                                </tr>
                                                            }) }
                                                        </tbody>
                                                    </table>
                                                }
                                            }
                                        }
                                    </div>
                                }) }
                            }
                        }
                    }

                    {
                        if *show_add {
                            modal(
                                "Add Service",
                                &close_add,
                                html! {
                                    <>
                                        <div class="space-y-1">
                                            <label class="text-sm font-medium text-foreground">{"Service Name"}</label>
                                            <input class={FIELD_CLASS} value={(*new_name).clone()} oninput={bind_input(&new_name)} />
                                        </div>

                                        <div class="flex items-center justify-between pt-2">
                                            <h4 class="text-sm font-bold text-foreground">{"Forms"}</h4>
                                            <button class="flex items-center gap-1 text-sm text-primary font-semibold" onclick={on_add_form_row}>
                                                { icon_plus() }
                                                {"Add Form"}
                                            </button>
                                        </div>
                                        { for (*new_forms).iter().enumerate().map(|(index, form)| html! {
                                            <div key={index} class="border border-border rounded-xl p-4 space-y-3">
                                                <div class="flex items-center justify-between">
                                                    <span class="text-xs font-bold text-muted-foreground uppercase tracking-widest">{ format!("Form {}", index + 1) }</span>
                                                    <button class="p-1 hover:bg-red-50 text-red-500 rounded-lg" aria-label="Remove" onclick={on_remove_form_row(index)}>{ icon_trash() }</button>
                                                </div>
                                                <div class="grid grid-cols-1 md:grid-cols-2 gap-3">
                                                    <input placeholder="Form name" class={FIELD_CLASS} value={form.name.clone()}
                                                        oninput={bind_form_field(&new_forms, index, |f, v| f.name = v)} />
                                                    <input placeholder="Price" class={FIELD_CLASS} value={form.price.clone()}
                                                        oninput={bind_form_field(&new_forms, index, |f, v| f.price = v)} />
                                                    <input placeholder="File reference" class={FIELD_CLASS} value={form.file.clone()}
                                                        oninput={bind_form_field(&new_forms, index, |f, v| f.file = v)} />
                                                    <input placeholder="Description" class={FIELD_CLASS} value={form.description.clone()}
                                                        oninput={bind_form_field(&new_forms, index, |f, v| f.description = v)} />
                                                </div>
                                            </div>
                                        }) }

                                        { error_banner(&form_error) }

                                        <button onclick={on_save_new} disabled={*saving}
                                            class="w-full bg-primary text-primary-foreground py-2 rounded-lg font-semibold hover:opacity-90 transition-opacity">
                                            { if *saving { "Saving..." } else { "Save Service" } }
                                        </button>
                                    </>
                                },
                            )
                        } else {
                            html! {}
                        }
                    }

                    {
                        if rename_target.is_some() {
                            modal(
                                "Rename Service",
                                &close_rename,
                                html! {
                                    <>
                                        <div class="space-y-1">
                                            <label class="text-sm font-medium text-foreground">{"Service Name"}</label>
                                            <input class={FIELD_CLASS} value={(*rename_value).clone()} oninput={bind_input(&rename_value)} />
                                        </div>
                                        { error_banner(&form_error) }
                                        <button onclick={on_save_rename} disabled={*saving}
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
