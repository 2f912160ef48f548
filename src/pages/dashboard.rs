use chrono::Utc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::loader::{self, DashboardData};
use crate::models::{TransactProgress, TransactionStatus};

use super::{
    icon_bell, icon_briefcase, icon_calendar, icon_receipt, icon_users, icon_x, page_shell,
    progress_badge, status_badge, PageProps,
};

const DUE_SOON_WINDOW_DAYS: i64 = 3;

fn stat_card(title: &'static str, value: u32, icon: Html) -> Html {
    html! {
        <div class="bg-card p-6 rounded-[10px] shadow-sm border border-border flex justify-between items-start">
            <div>
                <p class="text-muted-foreground text-[10px] font-bold mb-1 tracking-widest">{ title }</p>
                <h3 class="text-2xl font-bold text-[#1D617A] tracking-tight">{ value }</h3>
            </div>
            <div class="p-3 bg-[#eef4f9] rounded-[10px]">{ icon }</div>
        </div>
    }
}

#[function_component(DashboardPage)]
pub fn dashboard_page(props: &PageProps) -> Html {
    let data = use_state(DashboardData::default);
    let loading = use_state(|| true);
    let show_due_popup = use_state(|| true);

    {
        let data = data.clone();
        let loading = loading.clone();
        let token = props.token.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    data.set(loader::load_dashboard(token.as_deref()).await);
                    loading.set(false);
                });
                || ()
            },
            (),
        );
    }

    let today = Utc::now().date_naive();
    let due_soon: Vec<_> = data
        .tax_forms
        .iter()
        .filter(|form| form.due_within(today, DUE_SOON_WINDOW_DAYS))
        .cloned()
        .collect();

    let on_dismiss_popup = {
        let show_due_popup = show_due_popup.clone();
        Callback::from(move |_| show_due_popup.set(false))
    };

    let stats = &data.stats;
    let recent: Vec<_> = data.transactions.iter().take(5).cloned().collect();

    html! {
        { page_shell(
            "Dashboard",
            html! {},
            html! {
                <>
                    {
                        if *show_due_popup && !due_soon.is_empty() {
                            html! {
                                <div class="bg-yellow-50 border border-yellow-300 rounded-xl p-4 flex items-start justify-between">
                                    <div>
                                        <p class="font-bold text-yellow-800 text-sm flex items-center gap-2">{ icon_bell() }{"Tax filings due soon"}</p>
                                        <ul class="mt-1 text-sm text-yellow-700 space-y-1">
                                            { for due_soon.iter().map(|form| {
                                                let days = form.days_until_due(today).unwrap_or(0);
                                                let when = match days {
                                                    d if d < 0 => format!("overdue by {} day(s)", -d),
                                                    0 => "due today".to_string(),
                                                    d => format!("due in {} day(s)", d),
                                                };
                                                html! { <li key={form.id}>{ format!("Form {} is {} ({})", form.form_no, when, form.due_date) }</li> }
                                            }) }
                                        </ul>
                                    </div>
                                    <button class="p-1 hover:bg-yellow-100 rounded-full" aria-label="Dismiss" onclick={on_dismiss_popup}>
                                        { icon_x() }
                                    </button>
                                </div>
                            }
                        } else {
                            html! {}
                        }
                    }

                    <div class="grid grid-cols-1 md:grid-cols-4 gap-6">
                        { stat_card("Clients", stats.total_clients, icon_users()) }
                        { stat_card("Services", stats.total_services, icon_briefcase()) }
                        { stat_card("Tax Forms", stats.total_tax_forms, icon_calendar()) }
                        { stat_card("Transactions", stats.total_transactions, icon_receipt()) }
                    </div>

                    <div class="grid grid-cols-1 lg:grid-cols-2 gap-6">
                        <div class="bg-card rounded-[10px] p-6 border border-border">
                            <h3 class="font-bold text-foreground text-lg mb-4">{"Payment Status"}</h3>
                            <div class="space-y-3">
                                { for TransactionStatus::ALL.iter().map(|status| {
                                    let count = stats.status_counts.get(status.label()).copied().unwrap_or(0);
                                    html! {
                                        <div class="flex items-center justify-between text-sm">
                                            { status_badge(*status) }
                                            <span class="font-semibold text-foreground">{ count }</span>
                                        </div>
                                    }
                                }) }
                            </div>
                        </div>
                        <div class="bg-card rounded-[10px] p-6 border border-border">
                            <h3 class="font-bold text-foreground text-lg mb-4">{"Fulfilment Progress"}</h3>
                            <div class="space-y-3">
                                { for TransactProgress::ALL.iter().map(|progress| {
                                    let count = stats.transact_counts.get(progress.label()).copied().unwrap_or(0);
                                    html! {
                                        <div class="flex items-center justify-between text-sm">
                                            { progress_badge(*progress) }
                                            <span class="font-semibold text-foreground">{ count }</span>
                                        </div>
                                    }
                                }) }
                            </div>
                        </div>
                    </div>

                    <div class="bg-card rounded-[10px] shadow-sm border border-border overflow-hidden">
                        <div class="p-6 flex justify-between items-center border-b border-border">
                            <h3 class="font-bold text-foreground text-lg">{"Recent Transactions"}</h3>
                        </div>
                        <div class="overflow-x-auto">
                            <table class="w-full text-left border-collapse">
                                <thead>
                                    <tr class="bg-muted/50 text-muted-foreground text-[10px] uppercase tracking-widest">
                                        <th class="px-8 py-4 font-bold">{"Date"}</th>
                                        <th class="px-8 py-4 font-bold">{"Client"}</th>
                                        <th class="px-8 py-4 font-bold">{"Status"}</th>
                                        <th class="px-8 py-4 font-bold">{"Progress"}</th>
                                    </tr>
                                </thead>
                                <tbody class="divide-y divide-border">
                                    {
                                        if *loading {
                                            html! { <tr><td class="px-8 py-4 text-muted-foreground" colspan="4">{"Loading..."}</td></tr> }
                                        } else if recent.is_empty() {
                                            html! { <tr><td class="px-8 py-4 text-muted-foreground" colspan="4">{"No transactions yet."}</td></tr> }
                                        } else {
                                            html! {
                                                { for recent.iter().map(|tx| html! {
                                                    <tr key={tx.id} class="text-sm hover:bg-muted/30 transition-colors">
                                                        <td class="px-8 py-4 text-muted-foreground">{ &tx.date }</td>
                                                        <td class="px-8 py-4 text-foreground">{ &tx.name }</td>
                                                        <td class="px-8 py-4">{ status_badge(tx.status) }</td>
                                                        <td class="px-8 py-4">{ progress_badge(tx.transact) }</td>
                                                    </tr>
                                                }) }
                                            }
                                        }
                                    }
                                </tbody>
                            </table>
                        </div>
                    </div>
                </>
            }
        ) }
    }
}
