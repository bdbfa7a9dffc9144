use leptos::prelude::*;

#[component]
pub fn AccessDenied() -> impl IntoView {
    view! {
        <div class="status-page">
            <h2 class="status-title">"Access denied"</h2>
            <p class="status-text">
                "Your account does not have permission to open this page."
            </p>
            <a href="/" class="btn btn-primary">"Go home"</a>
        </div>
    }
}
