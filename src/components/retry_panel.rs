use leptos::prelude::*;

/// Error banner with a manual retry button.
#[component]
pub fn RetryPanel(
    #[prop(into)] message: String,
    #[prop(into)] on_retry: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="error-banner" role="alert">
            <span class="error-text">{message}</span>
            <button class="btn btn-secondary" on:click=move |_| on_retry.run(())>
                "Try again"
            </button>
        </div>
    }
}
