use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api;
use crate::models::{ProofKind, ProofOfTransaction};
use crate::store::{ResourceAction, ResourceState};

use super::{
    bind_input, bind_select, bind_textarea, error_banner, icon_pencil, icon_plus, icon_trash,
    modal, page_shell, PageProps, FIELD_CLASS,
};

const KIND_CHOICES: [(ProofKind, &str); 3] = [
    (ProofKind::Image, "image"),
    (ProofKind::Video, "video"),
    (ProofKind::Embed, "embed"),
];

fn kind_from_value(value: &str) -> ProofKind {
    KIND_CHOICES
        .into_iter()
        .find(|(_, label)| *label == value)
        .map(|(kind, _)| kind)
        .unwrap_or(ProofKind::Image)
}

fn kind_label(kind: ProofKind) -> &'static str {
    KIND_CHOICES
        .into_iter()
        .find(|(k, _)| *k == kind)
        .map(|(_, label)| label)
        .unwrap_or("image")
}

#[function_component(ProofsPage)]
pub fn proofs_page(props: &PageProps) -> Html {
    let state = use_reducer(ResourceState::<ProofOfTransaction>::default);
    let show_modal = use_state(|| false);
    let editing_id = use_state(|| None::<i32>);
    let form_error = use_state(|| None::<String>);
    let saving = use_state(|| false);

    let title = use_state(|| "".to_string());
    let description = use_state(|| "".to_string());
    let kind = use_state(|| "image".to_string());
    let content = use_state(|| "".to_string());

    {
        let state = state.clone();
        use_effect_with_deps(
            move |_| {
                state.dispatch(ResourceAction::FetchStarted);
                let state = state.clone();
                spawn_local(async move {
                    match api::fetch_proofs().await {
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
                        match api::fetch_proofs().await {
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
        let kind = kind.clone();
        let content = content.clone();
        let form_error = form_error.clone();
        Callback::from(move |_: MouseEvent| {
            editing_id.set(None);
            title.set("".to_string());
            description.set("".to_string());
            kind.set("image".to_string());
            content.set("".to_string());
            form_error.set(None);
            show_modal.set(true);
        })
    };

    let open_edit = |proof: &ProofOfTransaction| {
        let show_modal = show_modal.clone();
        let editing_id = editing_id.clone();
        let title = title.clone();
        let description = description.clone();
        let kind = kind.clone();
        let content = content.clone();
        let form_error = form_error.clone();
        let proof = proof.clone();
        Callback::from(move |_: MouseEvent| {
            editing_id.set(Some(proof.id));
            title.set(proof.title.clone());
            description.set(proof.description.clone());
            kind.set(kind_label(proof.kind).to_string());
            content.set(proof.content.clone());
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
        let kind = kind.clone();
        let content = content.clone();
        Callback::from(move |_: MouseEvent| {
            if title.trim().is_empty() || content.trim().is_empty() {
                form_error.set(Some("Title and content are required.".to_string()));
                return;
            }

            let proof = ProofOfTransaction {
                id: editing_id.unwrap_or(0),
                title: title.trim().to_string(),
                description: (*description).clone(),
                kind: kind_from_value(&kind),
                content: content.trim().to_string(),
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
                    api::update_proof(token.as_deref(), &proof).await
                } else {
                    api::add_proof(token.as_deref(), &proof).await
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
                match api::delete_proof(token.as_deref(), id).await {
                    Ok(id) => state.dispatch(ResourceAction::Removed(id)),
                    Err(err) => state.dispatch(ResourceAction::Failed(err.to_string())),
                }
            });
        })
    };

    html! {
        { page_shell(
            "Proof of Transactions",
            html! {
                <button onclick={open_add} class="flex items-center gap-2 bg-primary text-primary-foreground px-4 py-2 rounded-xl font-bold text-sm hover:opacity-90 transition-all">
                    { icon_plus() }
                    {"Add Proof"}
                </button>
            },
            html! {
                <>
                    { error_banner(&state.error) }

                    {
                        if state.loading {
                            html! { <p class="text-sm text-muted-foreground">{"Loading..."}</p> }
                        } else if state.items.is_empty() {
                            html! { <p class="text-sm text-muted-foreground">{"No proofs yet."}</p> }
                        } else {
                            html! {
                                <div class="grid grid-cols-1 md:grid-cols-3 gap-6">
                                    { for state.items.iter().map(|proof| html! {
                                        <div key={proof.id} class="bg-card rounded-[10px] border border-border overflow-hidden">
                                            {
                                                match proof.kind {
                                                    ProofKind::Image => html! {
                                                        <img src={proof.content.clone()} alt={proof.title.clone()} class="w-full h-40 object-cover" />
                                                    },
                                                    ProofKind::Video => html! {
                                                        <video src={proof.content.clone()} controls=true class="w-full h-40 object-cover"></video>
                                                    },
                                                    ProofKind::Embed => html! {
                                                        <iframe src={proof.content.clone()} class="w-full h-40 border-0"></iframe>
                                                    },
                                                }
                                            }
                                            <div class="p-4">
                                                <div class="flex items-start justify-between">
                                                    <div>
                                                        <h3 class="font-bold text-foreground">{ &proof.title }</h3>
                                                        <span class="text-[10px] uppercase tracking-widest text-muted-foreground font-bold">{ kind_label(proof.kind) }</span>
                                                    </div>
                                                    <div class="flex gap-1">
                                                        <button class="p-2 hover:bg-slate-100 rounded-lg" aria-label="Edit" onclick={open_edit(proof)}>{ icon_pencil() }</button>
                                                        <button class="p-2 hover:bg-red-50 text-red-500 rounded-lg" aria-label="Delete" onclick={on_delete(proof.id)}>{ icon_trash() }</button>
                                                    </div>
                                                </div>
                                                <p class="text-sm text-muted-foreground mt-2">{ &proof.description }</p>
                                            </div>
                                        </div>
                                    }) }
                                </div>
                            }
                        }
                    }

                    {
                        if *show_modal {
                            modal(
                                if editing_id.is_some() { "Edit Proof" } else { "Add Proof" },
                                &on_close,
                                html! {
                                    <>
                                        <div class="space-y-1">
                                            <label class="text-sm font-medium text-foreground">{"Title"}</label>
                                            <input class={FIELD_CLASS} value={(*title).clone()} oninput={bind_input(&title)} />
                                        </div>
                                        <div class="space-y-1">
                                            <label class="text-sm font-medium text-foreground">{"Type"}</label>
                                            <select class={FIELD_CLASS} value={(*kind).clone()} onchange={bind_select(&kind)}>
                                                { for KIND_CHOICES.iter().map(|(_, label)| html! {
                                                    <option value={*label} selected={*label == kind.as_str()}>{ *label }</option>
                                                }) }
                                            </select>
                                        </div>
                                        <div class="space-y-1">
                                            <label class="text-sm font-medium text-foreground">{"Content URL"}</label>
                                            <input class={FIELD_CLASS} value={(*content).clone()} oninput={bind_input(&content)} />
                                        </div>
                                        <div class="space-y-1">
                                            <label class="text-sm font-medium text-foreground">{"Description"}</label>
                                            <textarea class={FIELD_CLASS} rows="3" value={(*description).clone()} oninput={bind_textarea(&description)}></textarea>
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
