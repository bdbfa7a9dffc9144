use leptos::prelude::*;
use leptos_router::components::Redirect;
use tracing::{info, warn};

use crate::api::ApiClient;
use crate::config::AppConfig;
use crate::error::ApiError;
use crate::guard::home_path;
use crate::session::SessionContext;
use crate::tasks::TaskScope;

fn login_error_message(err: &ApiError) -> String {
    if err.is_transport() {
        return "Server did not respond. Check your internet connection".to_string();
    }
    err.user_message("Invalid login or password")
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let config = expect_context::<AppConfig>();
    let session = expect_context::<SessionContext>();
    let tasks = TaskScope::new();
    let api = StoredValue::new(ApiClient::anonymous(&config));

    let (login, set_login) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (submitting, set_submitting) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        let login_value = login.get_untracked().trim().to_string();
        let password_value = password.get_untracked();
        if login_value.is_empty() || password_value.is_empty() {
            set_error.set(Some("Enter your login and password".to_string()));
            return;
        }

        set_submitting.set(true);
        set_error.set(None);
        let client = api.get_value();
        tasks.spawn(async move {
            match client.login(&login_value, &password_value).await {
                Ok(Some(token)) => {
                    session.sign_in(token);
                    match session.role() {
                        Some(role) => info!("Logged in as {}", role),
                        None => {
                            warn!("Login token could not be decoded");
                            session.sign_out();
                            set_error.set(Some("Server returned an unreadable token".to_string()));
                        }
                    }
                }
                Ok(None) => {
                    warn!("Login response carried no token");
                    set_error.set(Some("Server did not return a token".to_string()));
                }
                Err(e) => set_error.set(Some(login_error_message(&e))),
            }
            set_submitting.set(false);
        });
    };

    // Signed in, now or from an earlier visit: leave for the role's home.
    let signed_in_home = move || session.role().map(|r| home_path(&r));

    view! {
        {move || signed_in_home().map(|path| view! { <Redirect path=path /> })}
        <div class="login-page">
            <form class="login-card" on:submit=on_submit>
                <h1 class="login-title">"Orange Fitness"</h1>
                <p class="login-subtitle">"Sign in to continue"</p>

                <label class="form-field">
                    <span>"Login"</span>
                    <input
                        type="text"
                        autocomplete="username"
                        prop:value=move || login.get()
                        on:input=move |ev| set_login.set(event_target_value(&ev))
                    />
                </label>
                <label class="form-field">
                    <span>"Password"</span>
                    <input
                        type="password"
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                    />
                </label>

                {move || error.get().map(|e| view! { <div class="form-error" role="alert">{e}</div> })}

                <button type="submit" class="btn btn-primary btn-block" disabled=move || submitting.get()>
                    {move || if submitting.get() { "Signing in..." } else { "Sign in" }}
                </button>
            </form>
        </div>
    }
}
