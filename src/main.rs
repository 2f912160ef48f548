use yew::prelude::*;

mod api;
mod auth;
mod error;
mod export;
mod loader;
mod models;
mod pages;
mod store;

use pages::announcements::AnnouncementsPage;
use pages::clients::ClientsPage;
use pages::dashboard::DashboardPage;
use pages::login::LoginPage;
use pages::proofs::ProofsPage;
use pages::public::PublicSite;
use pages::services::ServicesPage;
use pages::taxcalendar::TaxCalendarPage;
use pages::transactions::TransactionsPage;
use pages::{
    icon_briefcase, icon_calendar, icon_image, icon_layout_grid, icon_log_out, icon_megaphone,
    icon_receipt, icon_users,
};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum AdminPage {
    Dashboard,
    Transactions,
    Clients,
    Services,
    TaxCalendar,
    Announcements,
    Proofs,
}

impl AdminPage {
    fn path(self) -> &'static str {
        match self {
            AdminPage::Dashboard => "/admin/dashboard",
            AdminPage::Transactions => "/admin/transactions",
            AdminPage::Clients => "/admin/clients",
            AdminPage::Services => "/admin/services",
            AdminPage::TaxCalendar => "/admin/taxcalendar",
            AdminPage::Announcements => "/admin/announcements",
            AdminPage::Proofs => "/admin/prooftransactions",
        }
    }

    fn from_path(path: &str) -> AdminPage {
        match path.trim_end_matches('/') {
            "/admin/transactions" => AdminPage::Transactions,
            "/admin/clients" => AdminPage::Clients,
            "/admin/services" => AdminPage::Services,
            "/admin/taxcalendar" => AdminPage::TaxCalendar,
            "/admin/announcements" => AdminPage::Announcements,
            "/admin/prooftransactions" => AdminPage::Proofs,
            _ => AdminPage::Dashboard,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum View {
    Public,
    Login,
    Admin(AdminPage),
}

fn view_for_path(path: &str) -> View {
    if path.starts_with("/admin") {
        View::Admin(AdminPage::from_path(path))
    } else if path == "/auth" {
        View::Login
    } else {
        View::Public
    }
}

fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

fn replace_path(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(path));
        }
    }
}

/// Applies the access rules once on startup: admin paths need a session,
/// and a logged-in user never sees the login screen.
fn initial_view() -> View {
    let path = current_path();
    let has_token = auth::token().is_some();
    match auth::redirect_for(&path, has_token) {
        Some(target) => {
            replace_path(target);
            view_for_path(target)
        }
        None => view_for_path(&path),
    }
}

struct NavItem {
    label: &'static str,
    page: AdminPage,
    icon: fn() -> Html,
}

#[derive(Properties, PartialEq)]
struct LayoutProps {
    children: Children,
    active_page: AdminPage,
    on_select: Callback<AdminPage>,
    on_logout: Callback<()>,
}

#[function_component(Layout)]
fn layout(props: &LayoutProps) -> Html {
    html! {
        <div class="flex h-screen bg-background">
            <div class="hidden md:flex">
                <Sidebar
                    active_page={props.active_page}
                    on_select={props.on_select.clone()}
                    on_logout={props.on_logout.clone()}
                />
            </div>

            <div class="flex-1 flex flex-col overflow-hidden">
                <Header />
                <main class="flex-1 overflow-y-auto">
                    { for props.children.iter() }
                </main>
            </div>
        </div>
    }
}

#[function_component(Header)]
fn header() -> Html {
    html! {
        <header class="bg-[#D8E1E8] border-b border-border h-16 flex items-center justify-between px-6">
            <div class="flex-1"></div>
            <span class="text-sm font-bold text-[#173E63]">{"Admin Dashboard"}</span>
        </header>
    }
}

#[derive(Properties, PartialEq)]
struct SidebarProps {
    active_page: AdminPage,
    on_select: Callback<AdminPage>,
    on_logout: Callback<()>,
}

#[function_component(Sidebar)]
fn sidebar(props: &SidebarProps) -> Html {
    let nav_items = vec![
        NavItem {
            label: "Dashboard",
            page: AdminPage::Dashboard,
            icon: icon_layout_grid,
        },
        NavItem {
            label: "Transactions",
            page: AdminPage::Transactions,
            icon: icon_receipt,
        },
        NavItem {
            label: "Clients",
            page: AdminPage::Clients,
            icon: icon_users,
        },
        NavItem {
            label: "Services",
            page: AdminPage::Services,
            icon: icon_briefcase,
        },
        NavItem {
            label: "Tax Calendar",
            page: AdminPage::TaxCalendar,
            icon: icon_calendar,
        },
        NavItem {
            label: "Announcements",
            page: AdminPage::Announcements,
            icon: icon_megaphone,
        },
        NavItem {
            label: "Proof of Work",
            page: AdminPage::Proofs,
            icon: icon_image,
        },
    ];

    let on_logout = {
        let on_logout = props.on_logout.clone();
        Callback::from(move |_: MouseEvent| on_logout.emit(()))
    };

    html! {
        <div class="w-[220px] h-screen bg-[#D8E1E8] p-4 flex flex-col">
            <div class="flex items-center gap-3 px-2 mb-8">
                <div class="w-12 h-12 bg-[#173E63] rounded-full flex items-center justify-center">
                    <span class="text-white font-black text-lg">{"WE"}</span>
                </div>
                <span class="text-[#173E63] text-2xl font-black tracking-tight">{"W&E"}</span>
            </div>

            <div class="flex-1 bg-[#173E63] rounded-[24px] flex flex-col py-6 px-3 shadow-lg">
                <nav class="flex-1 space-y-2">
                    { for nav_items.iter().map(|item| {
                        let is_active = item.page == props.active_page;
                        let class_name = if is_active {
                            "flex items-center gap-3 px-4 py-3 rounded-xl transition-all text-[13px] font-medium bg-[#B2CBDE] text-[#173E63] w-full"
                        } else {
                            "flex items-center gap-3 px-4 py-3 rounded-xl transition-all text-[13px] font-medium text-slate-300 hover:bg-white/5 hover:text-white w-full"
                        };
                        let on_select = props.on_select.clone();
                        let page = item.page;

                        html! {
                            <button type="button" class={class_name} onclick={Callback::from(move |_| on_select.emit(page))}>
                                <span class="shrink-0">{ (item.icon)() }</span>
                                <span class="truncate whitespace-nowrap text-left">{ item.label }</span>
                            </button>
                        }
                    }) }
                </nav>

                <div class="mt-auto pt-4">
                    <button onclick={on_logout} class="flex items-center gap-3 w-full px-4 py-3 rounded-xl hover:bg-white/10 transition-colors text-[13px] font-medium text-slate-300">
                        { icon_log_out() }
                        <span>{"Log Out"}</span>
                    </button>
                </div>
            </div>
        </div>
    }
}

#[function_component(App)]
fn app() -> Html {
    let view = use_state(initial_view);
    let token = use_state(auth::token);

    let on_select = {
        let view = view.clone();
        Callback::from(move |page: AdminPage| {
            replace_path(page.path());
            view.set(View::Admin(page));
        })
    };

    let on_logout = {
        let view = view.clone();
        let token = token.clone();
        Callback::from(move |_| {
            auth::clear_token();
            token.set(None);
            replace_path("/auth");
            view.set(View::Login);
        })
    };

    let on_authenticated = {
        let view = view.clone();
        let token = token.clone();
        Callback::from(move |_| {
            token.set(auth::token());
            replace_path(AdminPage::Dashboard.path());
            view.set(View::Admin(AdminPage::Dashboard));
        })
    };

    let on_admin_login = {
        let view = view.clone();
        Callback::from(move |_| {
            // the guard bounces logged-in users straight to the dashboard
            let target = if auth::token().is_some() {
                View::Admin(AdminPage::Dashboard)
            } else {
                View::Login
            };
            replace_path(match target {
                View::Admin(page) => page.path(),
                _ => "/auth",
            });
            view.set(target);
        })
    };

    match *view {
        View::Public => html! { <PublicSite on_admin_login={on_admin_login} /> },
        View::Login => html! { <LoginPage on_authenticated={on_authenticated} /> },
        View::Admin(page) => {
            let content = match page {
                AdminPage::Dashboard => html! { <DashboardPage token={(*token).clone()} /> },
                AdminPage::Transactions => html! { <TransactionsPage token={(*token).clone()} /> },
                AdminPage::Clients => html! { <ClientsPage token={(*token).clone()} /> },
                AdminPage::Services => html! { <ServicesPage token={(*token).clone()} /> },
                AdminPage::TaxCalendar => html! { <TaxCalendarPage token={(*token).clone()} /> },
                AdminPage::Announcements => html! { <AnnouncementsPage token={(*token).clone()} /> },
                AdminPage::Proofs => html! { <ProofsPage token={(*token).clone()} /> },
            };
            html! {
                <Layout active_page={page} on_select={on_select} on_logout={on_logout}>
                    { content }
                </Layout>
            }
        }
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_path_round_trip() {
        for page in [
            AdminPage::Dashboard,
            AdminPage::Transactions,
            AdminPage::Clients,
            AdminPage::Services,
            AdminPage::TaxCalendar,
            AdminPage::Announcements,
            AdminPage::Proofs,
        ] {
            assert_eq!(AdminPage::from_path(page.path()), page);
        }
    }

    #[test]
    fn test_unknown_admin_slug_falls_back_to_dashboard() {
        assert_eq!(
            AdminPage::from_path("/admin/unknown"),
            AdminPage::Dashboard
        );
        assert_eq!(AdminPage::from_path("/admin"), AdminPage::Dashboard);
    }

    #[test]
    fn test_view_for_path() {
        assert_eq!(view_for_path("/"), View::Public);
        assert_eq!(view_for_path("/auth"), View::Login);
        assert_eq!(
            view_for_path("/admin/clients"),
            View::Admin(AdminPage::Clients)
        );
    }
}
