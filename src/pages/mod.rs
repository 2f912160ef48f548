//! Page components plus the small bits of markup they share.

use yew::prelude::*;

use crate::models::{TransactProgress, TransactionStatus};

pub mod announcements;
pub mod clients;
pub mod dashboard;
pub mod login;
pub mod proofs;
pub mod public;
pub mod services;
pub mod taxcalendar;
pub mod transactions;

/// Admin pages receive the session token from the app shell instead of
/// reading the cookie themselves.
#[derive(Properties, PartialEq)]
pub struct PageProps {
    pub token: Option<String>,
}

pub fn page_shell(title: &'static str, actions: Html, children: Html) -> Html {
    html! {
        <div class="p-6 max-w-7xl mx-auto">
            <div class="flex items-center justify-between pb-4 border-b border-border">
                <h1 class="text-2xl font-bold text-foreground">{ title }</h1>
                { actions }
            </div>
            <div class="pt-5 space-y-6">
                { children }
            </div>
        </div>
    }
}

pub fn modal(title: &str, on_close: &Callback<MouseEvent>, body: Html) -> Html {
    html! {
        <div class="fixed inset-0 bg-black/50 flex items-center justify-center z-50 p-4">
            <div class="bg-white rounded-2xl shadow-lg w-full max-w-lg max-h-[90vh] overflow-y-auto">
                <div class="flex items-center justify-between px-6 py-4 border-b border-border">
                    <h3 class="text-lg font-bold text-foreground">{ title.to_string() }</h3>
                    <button class="p-1 hover:bg-slate-100 rounded-full" aria-label="Close" onclick={on_close.clone()}>
                        { icon_x() }
                    </button>
                </div>
                <div class="p-6 space-y-4">{ body }</div>
            </div>
        </div>
    }
}

pub const FIELD_CLASS: &str = "w-full px-4 py-2 bg-input border border-input rounded-lg text-foreground focus:outline-none focus:ring-2 focus:ring-primary";

pub fn bind_input(state: &UseStateHandle<String>) -> Callback<InputEvent> {
    let state = state.clone();
    Callback::from(move |e: InputEvent| {
        let input: web_sys::HtmlInputElement = e.target_unchecked_into();
        state.set(input.value());
    })
}

pub fn bind_textarea(state: &UseStateHandle<String>) -> Callback<InputEvent> {
    let state = state.clone();
    Callback::from(move |e: InputEvent| {
        let area: web_sys::HtmlTextAreaElement = e.target_unchecked_into();
        state.set(area.value());
    })
}

pub fn bind_select(state: &UseStateHandle<String>) -> Callback<Event> {
    let state = state.clone();
    Callback::from(move |e: Event| {
        let select: web_sys::HtmlSelectElement = e.target_unchecked_into();
        state.set(select.value());
    })
}

pub fn error_banner(error: &Option<String>) -> Html {
    match error {
        Some(msg) => html! {
            <div class="bg-red-50 border border-red-200 text-red-700 text-sm rounded-lg px-4 py-3">
                { msg.clone() }
            </div>
        },
        None => html! {},
    }
}

pub fn status_badge(status: TransactionStatus) -> Html {
    html! {
        <span class={format!("px-3 py-1 rounded-full text-[10px] font-bold {}", status.badge_class())}>
            { status.label() }
        </span>
    }
}

pub fn progress_badge(progress: TransactProgress) -> Html {
    html! {
        <span class={format!("px-3 py-1 rounded-full text-[10px] font-bold {}", progress.badge_class())}>
            { progress.label() }
        </span>
    }
}

pub fn icon_base(path: &'static str) -> Html {
    html! {
        <svg width="20" height="20" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round" class="text-foreground">
            <path d={path}></path>
        </svg>
    }
}

pub fn icon_layout_grid() -> Html {
    icon_base("M3 3h8v8H3zM13 3h8v8h-8zM3 13h8v8H3zM13 13h8v8h-8z")
}
pub fn icon_receipt() -> Html {
    icon_base("M4 2v20l2-1 2 1 2-1 2 1 2-1 2 1 2-1 2 1V2l-2 1-2-1-2 1-2-1-2 1-2-1-2 1zM8 7h8M8 11h8M8 15h5")
}
pub fn icon_users() -> Html {
    icon_base("M17 21v-2a4 4 0 00-4-4H5a4 4 0 00-4 4v2M9 11a4 4 0 100-8 4 4 0 000 8M23 21v-2a4 4 0 00-3-3.87M16 3.13a4 4 0 010 7.75")
}
pub fn icon_briefcase() -> Html {
    icon_base("M3 7h18v13H3zM16 7V5a2 2 0 00-2-2h-4a2 2 0 00-2 2v2")
}
pub fn icon_calendar() -> Html {
    icon_base("M3 5h18v16H3zM16 3v4M8 3v4M3 11h18")
}
pub fn icon_megaphone() -> Html {
    icon_base("M3 11l18-7v12L3 13zM11.6 16.8a3 3 0 11-5.8-1.6")
}
pub fn icon_image() -> Html {
    icon_base("M3 3h18v18H3zM8.5 10a1.5 1.5 0 100-3 1.5 1.5 0 000 3M21 15l-5-5L5 21")
}
pub fn icon_log_out() -> Html {
    icon_base("M9 21H5a2 2 0 01-2-2V5a2 2 0 012-2h4M16 17l5-5-5-5M21 12H9")
}
pub fn icon_plus() -> Html {
    icon_base("M12 5v14M5 12h14")
}
pub fn icon_x() -> Html {
    icon_base("M18 6L6 18M6 6l12 12")
}
pub fn icon_eye() -> Html {
    icon_base("M1 12s4-8 11-8 11 8 11 8-4 8-11 8-11-8-11-8zM12 12m-3 0a3 3 0 106 0 3 3 0 10-6 0")
}
pub fn icon_pencil() -> Html {
    icon_base("M17 3a2.8 2.8 0 114 4L7.5 20.5 2 22l1.5-5.5z")
}
pub fn icon_trash() -> Html {
    icon_base("M3 6h18M8 6V4a2 2 0 012-2h4a2 2 0 012 2v2M19 6v14a2 2 0 01-2 2H7a2 2 0 01-2-2V6")
}
pub fn icon_download() -> Html {
    icon_base("M21 15v4a2 2 0 01-2 2H5a2 2 0 01-2-2v-4M7 10l5 5 5-5M12 15V3")
}
pub fn icon_filter() -> Html {
    icon_base("M22 3H2l8 9.5V19l4 2v-8.5z")
}
pub fn icon_warning() -> Html {
    icon_base("M10.3 3.9L1.8 18a2 2 0 001.7 3h17a2 2 0 001.7-3L13.7 3.9a2 2 0 00-3.4 0zM12 9v4M12 17h.01")
}
pub fn icon_search() -> Html {
    icon_base("M11 11m-8 0a8 8 0 1016 0 8 8 0 10-16 0M21 21l-4.35-4.35")
}
pub fn icon_bell() -> Html {
    icon_base("M18 8a6 6 0 10-12 0c0 7-3 7-3 7h18s-3 0-3-7")
}
