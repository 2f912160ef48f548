use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api;
use crate::models::Announcement;
use crate::store::{ResourceAction, ResourceState};

use super::{
    bind_input, bind_textarea, error_banner, icon_pencil, icon_plus, icon_trash, modal, page_shell,
    PageProps, FIELD_CLASS,
};

#[function_component(AnnouncementsPage)]
pub fn announcements_page(props: &PageProps) -> Html {
    let state = use_reducer(ResourceState::<Announcement>::default);
    let show_modal = use_state(|| false);
    let editing_id = use_state(|| None::<i32>);
    let form_error = use_state(|| None::<String>);
    let saving = use_state(|| false);

    let title = use_state(|| "".to_string());
    let description = use_state(|| "".to_string());
    let date = use_state(|| "".to_string());

    {
        let state = state.clone();
        use_effect_with_deps(
            move |_| {
                state.dispatch(ResourceAction::FetchStarted);
                let state = state.clone();
                spawn_local(async move {
                    match api::fetch_announcements().await {
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
        let reload = state.reload;
        use_effect_with_deps(
            move |reload| {
                if *reload {
                    spawn_local(async move {
                        match api::fetch_announcements().await {
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
        let title = title.clone();
        let description = description.clone();
        let date = date.clone();
        let form_error = form_error.clone();
        Callback::from(move |_: MouseEvent| {
            editing_id.set(None);
            title.set("".to_string());
            description.set("".to_string());
            date.set("".to_string());
            form_error.set(None);
            show_modal.set(true);
        })
    };

    let open_edit = |announcement: &Announcement| {
        let show_modal = show_modal.clone();
        let editing_id = editing_id.clone();
        let title = title.clone();
        let description = description.clone();
        let date = date.clone();
        let form_error = form_error.clone();
        let announcement = announcement.clone();
        Callback::from(move |_: MouseEvent| {
            editing_id.set(Some(announcement.id));
            title.set(announcement.title.clone());
            description.set(announcement.description.clone());
            date.set(announcement.date.clone());
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
        let title = title.clone();
        let description = description.clone();
        let date = date.clone();
        Callback::from(move |_: MouseEvent| {
            if title.trim().is_empty() || date.trim().is_empty() {
                form_error.set(Some("Title and date are required.".to_string()));
                return;
            }

            let announcement = Announcement {
                id: editing_id.unwrap_or(0),
                title: title.trim().to_string(),
                description: (*description).clone(),
                date: date.trim().to_string(),
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
                    api::update_announcement(token.as_deref(), &announcement).await
                } else {
                    api::add_announcement(token.as_deref(), &announcement).await
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
                match api::delete_announcement(token.as_deref(), id).await {
                    Ok(id) => state.dispatch(ResourceAction::Removed(id)),
                    Err(err) => state.dispatch(ResourceAction::Failed(err.to_string())),
                }
            });
        })
    };

    html! {
        { page_shell(
            "Announcements",
            html! {
                <button onclick={open_add} class="flex items-center gap-2 bg-primary text-primary-foreground px-4 py-2 rounded-xl font-bold text-sm hover:opacity-90 transition-all">
                    { icon_plus() }
                    {"Add Announcement"}
                </button>
            },
            html! {
                <>
                    { error_banner(&state.error) }

                    {
                        if state.loading {
                            html! { <p class="text-sm text-muted-foreground">{"Loading..."}</p> }
                        } else if state.items.is_empty() {
                            html! { <p class="text-sm text-muted-foreground">{"No announcements yet."}</p> }
                        } else {
                            html! {
                                <div class="grid grid-cols-1 md:grid-cols-2 gap-6">
                                    { for state.items.iter().map(|announcement| html! {
                                        <div key={announcement.id} class="bg-card rounded-[10px] p-6 border border-border">
                                            <div class="flex items-start justify-between">
                                                <div>
                                                    <h3 class="font-bold text-foreground text-lg">{ &announcement.title }</h3>
                                                    <p class="text-xs text-muted-foreground mt-1">{ &announcement.date }</p>
                                                </div>
                                                <div class="flex gap-2">
                                                    <button class="p-2 hover:bg-slate-100 rounded-lg" aria-label="Edit" onclick={open_edit(announcement)}>{ icon_pencil() }</button>
                                                    <button class="p-2 hover:bg-red-50 text-red-500 rounded-lg" aria-label="Delete" onclick={on_delete(announcement.id)}>{ icon_trash() }</button>
                                                </div>
                                            </div>
                                            <p class="text-sm text-muted-foreground mt-3">{ &announcement.description }</p>
                                        </div>
                                    }) }
                                </div>
                            }
                        }
                    }

                    {
                        if *show_modal {
                            modal(
                                if editing_id.is_some() { "Edit Announcement" } else { "Add Announcement" },
                                &on_close,
                                html! {
                                    <>
                                        <div class="space-y-1">
                                            <label class="text-sm font-medium text-foreground">{"Title"}</label>
                                            <input class={FIELD_CLASS} value={(*title).clone()} oninput={bind_input(&title)} />
                                        </div>
                                        <div class="space-y-1">
                                            <label class="text-sm font-medium text-foreground">{"Date"}</label>
                                            <input type="date" class={FIELD_CLASS} value={(*date).clone()} oninput={bind_input(&date)} />
                                        </div>
                                        <div class="space-y-1">
                                            <label class="text-sm font-medium text-foreground">{"Description"}</label>
                                            <textarea class={FIELD_CLASS} rows="4" value={(*description).clone()} oninput={bind_textarea(&description)}></textarea>
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
