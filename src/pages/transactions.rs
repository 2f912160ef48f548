use chrono::Utc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api::{self, TransactionFilter};
use crate::export::{
    self, download_bytes, download_text, match_client, peso, receipt_filename, transaction_total,
    CSV_FILENAME, HISTORY_PDF_FILENAME,
};
use crate::loader;
use crate::models::{Client, Inquiry, Service, TransactProgress, Transaction, TransactionStatus};
use crate::store::{
    filter_locally, search_transactions, ResourceAction, TransactionAction, TransactionState,
};

use super::{
    bind_input, bind_select, error_banner, icon_download, icon_eye, icon_filter, icon_pencil,
    icon_plus, icon_receipt, icon_search, icon_trash, icon_warning, modal, page_shell,
    progress_badge, status_badge, PageProps, FIELD_CLASS,
};

fn today_iso() -> String {
    Utc::now().date_naive().format("%Y-%m-%d").to_string()
}

/// Rows the table actually shows: the history-filter result when one is
/// active, otherwise the searched main list. The search box never narrows an
/// active filter view.
fn visible_rows(
    show_filtered: bool,
    filtered: &[Transaction],
    items: &[Transaction],
    search: &str,
) -> Vec<Transaction> {
    if show_filtered {
        filtered.to_vec()
    } else {
        search_transactions(items, search)
    }
}

#[derive(Clone, PartialEq)]
enum ActiveModal {
    None,
    View(Transaction),
    Status(Transaction),
    Progress(Transaction),
    Add,
    Filter,
}

#[function_component(TransactionsPage)]
pub fn transactions_page(props: &PageProps) -> Html {
    let state = use_reducer(TransactionState::default);
    let clients = use_state(Vec::<Client>::new);
    let services = use_state(Vec::<Service>::new);
    let loading = use_state(|| true);
    let search = use_state(|| "".to_string());
    let active_modal = use_state(|| ActiveModal::None);
    let show_filtered = use_state(|| false);

    {
        let state = state.clone();
        let clients = clients.clone();
        let services = services.clone();
        let loading = loading.clone();
        let token = props.token.clone();
        use_effect_with_deps(
            move |_| {
                state.dispatch(TransactionAction::Resource(ResourceAction::FetchStarted));
                spawn_local(async move {
                    let data = loader::load_transactions_page(token.as_deref()).await;
                    state.dispatch(TransactionAction::Resource(ResourceAction::Loaded(
                        data.transactions,
                    )));
                    clients.set(data.clients);
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
        let reload = state.inner.reload;
        use_effect_with_deps(
            move |reload| {
                if *reload {
                    spawn_local(async move {
                        match api::fetch_transactions(token.as_deref()).await {
                            Ok(list) => state.dispatch(TransactionAction::Resource(
                                ResourceAction::Loaded(list),
                            )),
                            Err(err) => state.dispatch(TransactionAction::Resource(
                                ResourceAction::Failed(err.to_string()),
                            )),
                        }
                    });
                }
                || ()
            },
            reload,
        );
    }

    let displayed = visible_rows(
        *show_filtered,
        &state.filtered,
        &state.inner.items,
        &search,
    );

    let close_modal = {
        let active_modal = active_modal.clone();
        Callback::from(move |_: MouseEvent| active_modal.set(ActiveModal::None))
    };

    let open_modal = |target: ActiveModal| {
        let active_modal = active_modal.clone();
        Callback::from(move |_: MouseEvent| active_modal.set(target.clone()))
    };

    // View fetches the record fresh so the detail modal reflects edits made
    // elsewhere; the cached row stands in if the request fails.
    let on_view = |transaction: &Transaction| {
        let transaction = transaction.clone();
        let state = state.clone();
        let token = props.token.clone();
        let active_modal = active_modal.clone();
        Callback::from(move |_: MouseEvent| {
            let fallback = transaction.clone();
            let state = state.clone();
            let token = token.clone();
            let active_modal = active_modal.clone();
            spawn_local(async move {
                let fresh = api::get_transaction(token.as_deref(), fallback.id)
                    .await
                    .unwrap_or(fallback);
                state.dispatch(TransactionAction::Resource(ResourceAction::LoadedOne(
                    fresh.clone(),
                )));
                active_modal.set(ActiveModal::View(fresh));
            });
        })
    };

    let on_saved = {
        let state = state.clone();
        let active_modal = active_modal.clone();
        Callback::from(move |saved: Transaction| {
            state.dispatch(TransactionAction::Resource(ResourceAction::Updated(saved)));
            active_modal.set(ActiveModal::None);
        })
    };

    let on_added = {
        let state = state.clone();
        let active_modal = active_modal.clone();
        Callback::from(move |saved: Transaction| {
            state.dispatch(TransactionAction::Resource(ResourceAction::Added(saved)));
            active_modal.set(ActiveModal::None);
        })
    };

    let on_filtered = {
        let state = state.clone();
        let active_modal = active_modal.clone();
        let show_filtered = show_filtered.clone();
        Callback::from(move |list: Vec<Transaction>| {
            state.dispatch(TransactionAction::Filtered(list));
            show_filtered.set(true);
            active_modal.set(ActiveModal::None);
        })
    };

    let on_delete = |id: i32| {
        let state = state.clone();
        let token = props.token.clone();
        Callback::from(move |_: MouseEvent| {
            let state = state.clone();
            let token = token.clone();
            spawn_local(async move {
                match api::delete_transaction(token.as_deref(), id).await {
                    Ok(id) => {
                        state.dispatch(TransactionAction::Resource(ResourceAction::Removed(id)))
                    }
                    Err(err) => state.dispatch(TransactionAction::Resource(
                        ResourceAction::Failed(err.to_string()),
                    )),
                }
            });
        })
    };

    let on_receipt = |transaction: &Transaction| {
        let transaction = transaction.clone();
        let clients = clients.clone();
        Callback::from(move |_: MouseEvent| {
            let matched = match_client(&clients, &transaction.name);
            if let Ok(bytes) = export::receipt_pdf(&transaction, matched) {
                download_bytes(&bytes, "application/pdf", &receipt_filename(transaction.id));
            }
        })
    };

    let on_export_csv = {
        let rows = displayed.clone();
        Callback::from(move |_: MouseEvent| {
            let csv = export::transactions_csv(&rows);
            download_text(&csv, "text/csv;charset=utf-8", CSV_FILENAME);
        })
    };

    let on_download_invoice = {
        let state = state.clone();
        let clients = clients.clone();
        Callback::from(move |_: MouseEvent| {
            if let Ok(bytes) = export::invoice_pdf(&state.filtered, &clients, &today_iso()) {
                download_bytes(&bytes, "application/pdf", HISTORY_PDF_FILENAME);
            }
        })
    };

    let on_clear_filter = {
        let state = state.clone();
        let show_filtered = show_filtered.clone();
        Callback::from(move |_: MouseEvent| {
            state.dispatch(TransactionAction::Filtered(Vec::new()));
            show_filtered.set(false);
        })
    };

    let transaction_row = |transaction: &Transaction| {
        let tx = transaction.clone();
        html! {
            <tr key={tx.id} class="text-sm hover:bg-muted/30 transition-colors">
                <td class="px-6 py-4 text-muted-foreground">{ tx.id }</td>
                <td class="px-6 py-4 text-foreground font-medium">{ tx.name.clone() }</td>
                <td class="px-6 py-4 text-muted-foreground">{ tx.date.clone() }</td>
                <td class="px-6 py-4">
                    <div class="flex items-center gap-2">
                        { status_badge(tx.status) }
                        {
                            if !tx.status_pair_is_consistent() {
                                html! { <span class="text-yellow-500" title="Status and progress disagree">{ icon_warning() }</span> }
                            } else {
                                html! {}
                            }
                        }
                    </div>
                </td>
                <td class="px-6 py-4">{ progress_badge(tx.transact) }</td>
                <td class="px-6 py-4 text-right font-semibold text-foreground">{ peso(transaction_total(&tx)) }</td>
                <td class="px-6 py-4 text-right">
                    <div class="flex justify-end gap-1">
                        <button class="p-2 hover:bg-slate-100 rounded-lg" aria-label="View" onclick={on_view(&tx)}>{ icon_eye() }</button>
                        <button class="p-2 hover:bg-slate-100 rounded-lg" aria-label="Receipt" onclick={on_receipt(&tx)}>{ icon_receipt() }</button>
                        <button class="p-2 hover:bg-slate-100 rounded-lg" aria-label="Update status" onclick={open_modal(ActiveModal::Status(tx.clone()))}>{ icon_pencil() }</button>
                        <button class="p-2 hover:bg-slate-100 rounded-lg" aria-label="Update progress" onclick={open_modal(ActiveModal::Progress(tx.clone()))}>{ icon_pencil() }</button>
                        <button class="p-2 hover:bg-red-50 text-red-500 rounded-lg" aria-label="Delete" onclick={on_delete(tx.id)}>{ icon_trash() }</button>
                    </div>
                </td>
            </tr>
        }
    };

    let modal_view = match &*active_modal {
        ActiveModal::None => html! {},
        ActiveModal::View(transaction) => {
            let matched = match_client(&clients, &transaction.name);
            modal(
                "Transaction Details",
                &close_modal,
                html! {
                    <>
                        <div class="grid grid-cols-2 gap-3 text-sm">
                            <p><span class="font-bold">{"Client: "}</span>{ transaction.name.clone() }</p>
                            <p><span class="font-bold">{"Date: "}</span>{ transaction.date.clone() }</p>
                            <p><span class="font-bold">{"Business: "}</span>{ if transaction.business_name.is_empty() { "—".to_string() } else { transaction.business_name.clone() } }</p>
                            <p><span class="font-bold">{"TIN: "}</span>{ if transaction.tin_id.is_empty() { "—".to_string() } else { transaction.tin_id.clone() } }</p>
                            <p><span class="font-bold">{"Email: "}</span>{ matched.and_then(|c| c.email.clone()).unwrap_or_else(|| "—".to_string()) }</p>
                            <p><span class="font-bold">{"Contact: "}</span>{ matched.and_then(|c| c.contact_number.clone()).unwrap_or_else(|| "—".to_string()) }</p>
                        </div>
                        <div class="flex items-center gap-2">
                            { status_badge(transaction.status) }
                            { progress_badge(transaction.transact) }
                        </div>
                        <div class="border border-border rounded-xl divide-y divide-border">
                            {
                                if transaction.inquiries.is_empty() {
                                    html! { <p class="p-3 text-sm text-muted-foreground">{"No inquiries on this transaction."}</p> }
                                } else {
                                    html! {
                                        { for transaction.inquiries.iter().enumerate().map(|(index, inquiry)| html! {
                                            <div key={index} class="p-3 flex items-center justify-between text-sm">
                                                <span>{ format!("{} ({})", inquiry.name, inquiry.service) }</span>
                                                <span class="font-semibold">{ peso(inquiry.price_value()) }</span>
                                            </div>
                                        }) }
                                    }
                                }
                            }
                        </div>
                        <p class="text-right font-bold text-foreground">{ format!("Total: {}", peso(transaction_total(transaction))) }</p>
                    </>
                },
            )
        }
        ActiveModal::Status(transaction) => html! {
            <StatusModal
                transaction={transaction.clone()}
                token={props.token.clone()}
                on_close={close_modal.clone()}
                on_saved={on_saved.clone()}
            />
        },
        ActiveModal::Progress(transaction) => html! {
            <ProgressModal
                transaction={transaction.clone()}
                token={props.token.clone()}
                on_close={close_modal.clone()}
                on_saved={on_saved.clone()}
            />
        },
        ActiveModal::Add => html! {
            <AddTransactionModal
                clients={(*clients).clone()}
                services={(*services).clone()}
                on_close={close_modal.clone()}
                on_added={on_added.clone()}
            />
        },
        ActiveModal::Filter => html! {
            <FilterModal
                token={props.token.clone()}
                transactions={state.inner.items.clone()}
                on_close={close_modal.clone()}
                on_filtered={on_filtered.clone()}
            />
        },
    };

    html! {
        { page_shell(
            "Transactions",
            html! {
                <div class="flex items-center gap-2">
                    <button onclick={open_modal(ActiveModal::Filter)} class="flex items-center gap-2 bg-card border border-border text-foreground px-4 py-2 rounded-xl font-bold text-sm hover:bg-muted/50 transition-all">
                        { icon_filter() }
                        {"History"}
                    </button>
                    <button onclick={on_export_csv} class="flex items-center gap-2 bg-card border border-border text-foreground px-4 py-2 rounded-xl font-bold text-sm hover:bg-muted/50 transition-all">
                        { icon_download() }
                        {"Export CSV"}
                    </button>
                    <button onclick={open_modal(ActiveModal::Add)} class="flex items-center gap-2 bg-primary text-primary-foreground px-4 py-2 rounded-xl font-bold text-sm hover:opacity-90 transition-all">
                        { icon_plus() }
                        {"Add Transaction"}
                    </button>
                </div>
            },
            html! {
                <>
                    { error_banner(&state.inner.error) }

                    <div class="relative">
                        <span class="absolute left-3 top-1/2 -translate-y-1/2 text-muted-foreground">{ icon_search() }</span>
                        <input
                            placeholder="Search by client, business, TIN, or date..."
                            class={classes!(FIELD_CLASS, "pl-10")}
                            value={(*search).clone()}
                            oninput={bind_input(&search)}
                        />
                    </div>

                    {
                        if *show_filtered {
                            html! {
                                <div class="bg-card rounded-[10px] border border-border p-4 flex items-center justify-between">
                                    <p class="text-sm text-foreground">
                                        { format!("Filter matched {} transaction(s).", state.filtered.len()) }
                                    </p>
                                    <div class="flex gap-2">
                                        <button onclick={on_download_invoice} class="flex items-center gap-2 bg-primary text-primary-foreground px-3 py-2 rounded-lg text-sm font-bold hover:opacity-90">
                                            { icon_download() }
                                            {"Invoice PDF"}
                                        </button>
                                        <button onclick={on_clear_filter} class="px-3 py-2 rounded-lg text-sm font-bold text-muted-foreground hover:bg-muted/50">
                                            {"Clear"}
                                        </button>
                                    </div>
                                </div>
                            }
                        } else {
                            html! {}
                        }
                    }

                    <div class="bg-card rounded-[10px] shadow-sm border border-border overflow-hidden">
                        <div class="overflow-x-auto">
                            <table class="w-full text-left border-collapse">
                                <thead>
                                    <tr class="bg-muted/50 text-muted-foreground text-[10px] uppercase tracking-widest">
                                        <th class="px-6 py-4 font-bold">{"ID"}</th>
                                        <th class="px-6 py-4 font-bold">{"Client"}</th>
                                        <th class="px-6 py-4 font-bold">{"Date"}</th>
                                        <th class="px-6 py-4 font-bold">{"Status"}</th>
                                        <th class="px-6 py-4 font-bold">{"Progress"}</th>
                                        <th class="px-6 py-4 font-bold text-right">{"Total"}</th>
                                        <th class="px-6 py-4 font-bold text-right">{"Actions"}</th>
                                    </tr>
                                </thead>
                                <tbody class="divide-y divide-border">
                                    {
                                        if *loading {
                                            html! { <tr><td class="px-6 py-4 text-muted-foreground" colspan="7">{"Loading..."}</td></tr> }
                                        } else if displayed.is_empty() {
                                            html! { <tr><td class="px-6 py-4 text-muted-foreground" colspan="7">{"No transactions found."}</td></tr> }
                                        } else {
                                            html! { { for displayed.iter().map(&transaction_row) } }
                                        }
                                    }
                                </tbody>
                            </table>
                        </div>
                    </div>

                    { modal_view }
                </>
            }
        ) }
    }
}

#[derive(Properties, PartialEq)]
struct StatusModalProps {
    transaction: Transaction,
    token: Option<String>,
    on_close: Callback<MouseEvent>,
    on_saved: Callback<Transaction>,
}

#[function_component(StatusModal)]
fn status_modal(props: &StatusModalProps) -> Html {
    let choice = use_state(|| props.transaction.status.label().to_string());
    let error = use_state(|| None::<String>);
    let saving = use_state(|| false);

    let selected = TransactionStatus::ALL
        .into_iter()
        .find(|s| s.label() == choice.as_str())
        .unwrap_or(props.transaction.status);
    let incompatible = !selected.accepts(props.transaction.transact);

    let on_save = {
        let token = props.token.clone();
        let id = props.transaction.id;
        let error = error.clone();
        let saving = saving.clone();
        let on_saved = props.on_saved.clone();
        Callback::from(move |_: MouseEvent| {
            saving.set(true);
            let token = token.clone();
            let error = error.clone();
            let saving = saving.clone();
            let on_saved = on_saved.clone();
            spawn_local(async move {
                match api::update_status(token.as_deref(), id, selected).await {
                    Ok(saved) => on_saved.emit(saved),
                    Err(err) => error.set(Some(err.to_string())),
                }
                saving.set(false);
            });
        })
    };

    modal(
        "Update Payment Status",
        &props.on_close,
        html! {
            <>
                <select class={FIELD_CLASS} value={(*choice).clone()} onchange={bind_select(&choice)}>
                    { for TransactionStatus::ALL.iter().map(|status| html! {
                        <option value={status.label()} selected={status.label() == choice.as_str()}>{ status.label() }</option>
                    }) }
                </select>
                {
                    if incompatible {
                        html! {
                            <div class="bg-yellow-50 border border-yellow-300 text-yellow-700 text-sm rounded-lg px-4 py-3">
                                { format!("\"{}\" does not normally pair with progress \"{}\". Saving anyway is allowed.", selected.label(), props.transaction.transact.label()) }
                            </div>
                        }
                    } else {
                        html! {}
                    }
                }
                { error_banner(&error) }
                <button onclick={on_save} disabled={*saving}
                    class="w-full bg-primary text-primary-foreground py-2 rounded-lg font-semibold hover:opacity-90 transition-opacity">
                    { if *saving { "Saving..." } else { "Save" } }
                </button>
            </>
        },
    )
}

#[derive(Properties, PartialEq)]
struct ProgressModalProps {
    transaction: Transaction,
    token: Option<String>,
    on_close: Callback<MouseEvent>,
    on_saved: Callback<Transaction>,
}

#[function_component(ProgressModal)]
fn progress_modal(props: &ProgressModalProps) -> Html {
    let choice = use_state(|| props.transaction.transact.label().to_string());
    let error = use_state(|| None::<String>);
    let saving = use_state(|| false);

    let selected = TransactProgress::ALL
        .into_iter()
        .find(|p| p.label() == choice.as_str())
        .unwrap_or(props.transaction.transact);
    let incompatible = !props.transaction.status.accepts(selected);

    let on_save = {
        let token = props.token.clone();
        let id = props.transaction.id;
        let error = error.clone();
        let saving = saving.clone();
        let on_saved = props.on_saved.clone();
        Callback::from(move |_: MouseEvent| {
            saving.set(true);
            let token = token.clone();
            let error = error.clone();
            let saving = saving.clone();
            let on_saved = on_saved.clone();
            spawn_local(async move {
                match api::update_transact(token.as_deref(), id, selected).await {
                    Ok(saved) => on_saved.emit(saved),
                    Err(err) => error.set(Some(err.to_string())),
                }
                saving.set(false);
            });
        })
    };

    modal(
        "Update Progress",
        &props.on_close,
        html! {
            <>
                <select class={FIELD_CLASS} value={(*choice).clone()} onchange={bind_select(&choice)}>
                    { for TransactProgress::ALL.iter().map(|progress| html! {
                        <option value={progress.label()} selected={progress.label() == choice.as_str()}>{ progress.label() }</option>
                    }) }
                </select>
                {
                    if incompatible {
                        html! {
                            <div class="bg-yellow-50 border border-yellow-300 text-yellow-700 text-sm rounded-lg px-4 py-3">
                                { format!("Status \"{}\" does not normally pair with \"{}\". Saving anyway is allowed.", props.transaction.status.label(), selected.label()) }
                            </div>
                        }
                    } else {
                        html! {}
                    }
                }
                { error_banner(&error) }
                <button onclick={on_save} disabled={*saving}
                    class="w-full bg-primary text-primary-foreground py-2 rounded-lg font-semibold hover:opacity-90 transition-opacity">
                    { if *saving { "Saving..." } else { "Save" } }
                </button>
            </>
        },
    )
}

#[derive(Properties, PartialEq)]
struct AddTransactionModalProps {
    clients: Vec<Client>,
    services: Vec<Service>,
    on_close: Callback<MouseEvent>,
    on_added: Callback<Transaction>,
}

#[function_component(AddTransactionModal)]
fn add_transaction_modal(props: &AddTransactionModalProps) -> Html {
    let client_name = use_state(|| "".to_string());
    let business_name = use_state(|| "".to_string());
    let date = use_state(today_iso);
    let selected_service = use_state(|| "".to_string());
    let selected_form = use_state(|| "".to_string());
    let inquiries = use_state(Vec::<Inquiry>::new);
    let error = use_state(|| None::<String>);
    let saving = use_state(|| false);

    let current_client = props
        .clients
        .iter()
        .find(|c| c.full_name() == *client_name);
    let current_business = current_client
        .and_then(|c| c.business.iter().find(|b| b.business_name == *business_name));
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

    let on_save = {
        let client_name = client_name.clone();
        let business_name = business_name.clone();
        let date = date.clone();
        let inquiries = inquiries.clone();
        let error = error.clone();
        let saving = saving.clone();
        let on_added = props.on_added.clone();
        let tin = current_business.map(|b| b.tin.clone()).unwrap_or_default();
        Callback::from(move |_: MouseEvent| {
            if client_name.is_empty() {
                error.set(Some("Pick a client.".to_string()));
                return;
            }
            if inquiries.is_empty() {
                error.set(Some("Add at least one inquiry.".to_string()));
                return;
            }

            let transaction = Transaction {
                name: (*client_name).clone(),
                date: (*date).clone(),
                business_name: (*business_name).clone(),
                tin_id: tin.clone(),
                inquiries: (*inquiries).clone(),
                ..Default::default()
            };

            error.set(None);
            saving.set(true);

            let error = error.clone();
            let saving = saving.clone();
            let on_added = on_added.clone();
            spawn_local(async move {
                match api::add_transaction(&transaction).await {
                    Ok(saved) => on_added.emit(saved),
                    Err(err) => error.set(Some(err.to_string())),
                }
                saving.set(false);
            });
        })
    };

    let total: f64 = inquiries.iter().map(Inquiry::price_value).sum();

    modal(
        "Add Transaction",
        &props.on_close,
        html! {
            <>
                <div class="grid grid-cols-1 md:grid-cols-2 gap-3">
                    <div class="space-y-1">
                        <label class="text-sm font-medium text-foreground">{"Client"}</label>
                        <select class={FIELD_CLASS} value={(*client_name).clone()} onchange={bind_select(&client_name)}>
                            <option value="" selected={client_name.is_empty()}>{"Select a client"}</option>
                            { for props.clients.iter().map(|client| {
                                let full = client.full_name();
                                html! {
                                    <option value={full.clone()} selected={full == *client_name}>{ full.clone() }</option>
                                }
                            }) }
                        </select>
                    </div>
                    <div class="space-y-1">
                        <label class="text-sm font-medium text-foreground">{"Business"}</label>
                        <select class={FIELD_CLASS} value={(*business_name).clone()} onchange={bind_select(&business_name)}>
                            <option value="" selected={business_name.is_empty()}>{"No business"}</option>
                            {
                                match current_client {
                                    Some(client) => html! {
                                        { for client.business.iter().map(|business| html! {
                                            <option value={business.business_name.clone()} selected={business.business_name == *business_name}>
                                                { &business.business_name }
                                            </option>
                                        }) }
                                    },
                                    None => html! {},
                                }
                            }
                        </select>
                    </div>
                </div>
                <div class="space-y-1">
                    <label class="text-sm font-medium text-foreground">{"Date"}</label>
                    <input type="date" class={FIELD_CLASS} value={(*date).clone()} oninput={bind_input(&date)} />
                </div>

                <div class="border border-border rounded-xl p-4 space-y-3">
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
                            html! { <p class="text-sm text-muted-foreground">{"Nothing added yet."}</p> }
                        } else {
                            html! {
                                <ul class="divide-y divide-border">
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

                <button onclick={on_save} disabled={*saving}
                    class="w-full bg-primary text-primary-foreground py-2 rounded-lg font-semibold hover:opacity-90 transition-opacity">
                    { if *saving { "Saving..." } else { "Save Transaction" } }
                </button>
            </>
        },
    )
}

#[derive(Properties, PartialEq)]
struct FilterModalProps {
    token: Option<String>,
    transactions: Vec<Transaction>,
    on_close: Callback<MouseEvent>,
    on_filtered: Callback<Vec<Transaction>>,
}

/// Transaction history filter. "Now" means today only; a specific range uses
/// both bounds inclusively. The server endpoint does the filtering; if it is
/// unreachable the same rules run locally over the loaded list.
#[function_component(FilterModal)]
fn filter_modal(props: &FilterModalProps) -> Html {
    let name = use_state(|| "".to_string());
    let mode = use_state(|| "now".to_string());
    let date_from = use_state(|| "".to_string());
    let date_to = use_state(|| "".to_string());
    let error = use_state(|| None::<String>);
    let applying = use_state(|| false);

    let on_apply = {
        let token = props.token.clone();
        let transactions = props.transactions.clone();
        let name = name.clone();
        let mode = mode.clone();
        let date_from = date_from.clone();
        let date_to = date_to.clone();
        let error = error.clone();
        let applying = applying.clone();
        let on_filtered = props.on_filtered.clone();
        Callback::from(move |_: MouseEvent| {
            let optional = |value: &str| {
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            };
            let (from, to) = if mode.as_str() == "now" {
                let today = today_iso();
                (Some(today.clone()), Some(today))
            } else {
                (optional(&date_from), optional(&date_to))
            };
            let filter = TransactionFilter {
                name: optional(&name),
                date_from: from,
                date_to: to,
            };

            error.set(None);
            applying.set(true);

            let token = token.clone();
            let transactions = transactions.clone();
            let error = error.clone();
            let applying = applying.clone();
            let on_filtered = on_filtered.clone();
            spawn_local(async move {
                let list = match api::filter_transactions(token.as_deref(), &filter).await {
                    Ok(list) => list,
                    Err(_) => filter_locally(&transactions, &filter),
                };
                if list.is_empty() {
                    error.set(Some("No transactions matched that filter.".to_string()));
                } else {
                    on_filtered.emit(list);
                }
                applying.set(false);
            });
        })
    };

    modal(
        "Transaction History",
        &props.on_close,
        html! {
            <>
                <div class="space-y-1">
                    <label class="text-sm font-medium text-foreground">{"Client Name"}</label>
                    <input class={FIELD_CLASS} placeholder="Exact full name" value={(*name).clone()} oninput={bind_input(&name)} />
                </div>
                <div class="space-y-1">
                    <label class="text-sm font-medium text-foreground">{"Period"}</label>
                    <select class={FIELD_CLASS} value={(*mode).clone()} onchange={bind_select(&mode)}>
                        <option value="now" selected={mode.as_str() == "now"}>{"Today"}</option>
                        <option value="range" selected={mode.as_str() == "range"}>{"Specific range"}</option>
                    </select>
                </div>
                {
                    if mode.as_str() == "range" {
                        html! {
                            <div class="grid grid-cols-2 gap-3">
                                <div class="space-y-1">
                                    <label class="text-sm font-medium text-foreground">{"From"}</label>
                                    <input type="date" class={FIELD_CLASS} value={(*date_from).clone()} oninput={bind_input(&date_from)} />
                                </div>
                                <div class="space-y-1">
                                    <label class="text-sm font-medium text-foreground">{"To"}</label>
                                    <input type="date" class={FIELD_CLASS} value={(*date_to).clone()} oninput={bind_input(&date_to)} />
                                </div>
                            </div>
                        }
                    } else {
                        html! {}
                    }
                }
                { error_banner(&error) }
                <button onclick={on_apply} disabled={*applying}
                    class="w-full bg-primary text-primary-foreground py-2 rounded-lg font-semibold hover:opacity-90 transition-opacity">
                    { if *applying { "Filtering..." } else { "Apply Filter" } }
                </button>
            </>
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(id: i32, name: &str) -> Transaction {
        Transaction {
            id,
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_search_narrows_the_main_list() {
        let items = vec![tx(1, "Juan Dela Cruz"), tx(2, "Maria Santos")];
        let rows = visible_rows(false, &[], &items, "maria");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, 2);
    }

    #[test]
    fn test_active_filter_view_ignores_the_search_text() {
        let items = vec![tx(1, "Juan Dela Cruz")];
        let filtered = vec![tx(3, "Maria Santos")];
        // Search text that matches nothing in the main list must not blank
        // out the filter result.
        let rows = visible_rows(true, &filtered, &items, "zzz");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, 3);
    }
}
