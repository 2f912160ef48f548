use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::{api, auth};

use super::{bind_input, error_banner, FIELD_CLASS};

#[derive(Properties, PartialEq)]
pub struct LoginProps {
    pub on_authenticated: Callback<()>,
}

#[function_component(LoginPage)]
pub fn login_page(props: &LoginProps) -> Html {
    let email = use_state(|| "".to_string());
    let password = use_state(|| "".to_string());
    let error = use_state(|| None::<String>);
    let loading = use_state(|| false);

    let on_submit = {
        let email = email.clone();
        let password = password.clone();
        let error = error.clone();
        let loading = loading.clone();
        let on_authenticated = props.on_authenticated.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let email_val = email.trim().to_string();
            let password_val = (*password).clone();

            if email_val.is_empty() || password_val.is_empty() {
                error.set(Some("Email and password are required".to_string()));
                return;
            }

            loading.set(true);
            error.set(None);

            let error = error.clone();
            let loading = loading.clone();
            let on_authenticated = on_authenticated.clone();
            spawn_local(async move {
                match api::login(&email_val, &password_val).await {
                    Ok(token) => {
                        auth::store_token(&token);
                        on_authenticated.emit(());
                    }
                    Err(err) => error.set(Some(err.to_string())),
                }
                loading.set(false);
            });
        })
    };

    html! {
        <div class="min-h-screen flex items-center justify-center bg-background">
            <div class="w-full max-w-md bg-card border border-border rounded-2xl shadow-lg p-8">
                <div class="text-center mb-6">
                    <h1 class="text-2xl font-bold text-foreground">{"W&E Guarantee"}</h1>
                    <p class="text-sm text-muted-foreground mt-2">{"Sign in to the admin dashboard."}</p>
                </div>

                <form class="space-y-4" onsubmit={on_submit}>
                    <div class="space-y-1">
                        <label class="text-sm font-medium text-foreground">{"Email"}</label>
                        <input type="email" class={FIELD_CLASS} value={(*email).clone()} oninput={bind_input(&email)} />
                    </div>
                    <div class="space-y-1">
                        <label class="text-sm font-medium text-foreground">{"Password"}</label>
                        <input type="password" class={FIELD_CLASS} value={(*password).clone()} oninput={bind_input(&password)} />
                    </div>

                    { error_banner(&error) }

                    <button
                        type="submit"
                        class="w-full bg-primary text-primary-foreground py-2 rounded-lg font-semibold hover:opacity-90 transition-opacity"
                        disabled={*loading}
                    >
                        { if *loading { "Please wait..." } else { "Login" } }
                    </button>
                </form>
            </div>
        </div>
    }
}
