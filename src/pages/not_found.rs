use leptos::prelude::*;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    let go_back = move |_| {
        if let Some(history) = web_sys::window().and_then(|w| w.history().ok()) {
            let _ = history.back();
        }
    };

    view! {
        <div class="status-page">
            <h1 class="status-code">"404"</h1>
            <h2 class="status-title">"Page not found"</h2>
            <p class="status-text">"The page you are looking for does not exist or was moved."</p>
            <div class="status-actions">
                <button class="btn btn-secondary" on:click=go_back>"Go back"</button>
                <a href="/" class="btn btn-primary">"Home"</a>
            </div>
        </div>
    }
}
