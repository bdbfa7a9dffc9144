use leptos::prelude::*;

/// Horizontal bar filled to `value` percent, with the number beside it.
#[component]
pub fn ProgressBar(
    #[prop(into)] value: Signal<u8>,
    #[prop(optional, into)] label: Option<String>,
) -> impl IntoView {
    let pct = move || value.get().min(100);

    view! {
        <div class="progress">
            {label.map(|l| view! { <span class="progress-label">{l}</span> })}
            <div class="progress-track">
                <div
                    class="progress-fill"
                    class:progress-done=move || pct() == 100
                    style:width=move || format!("{}%", pct())
                ></div>
            </div>
            <span class="progress-value">{move || format!("{}%", pct())}</span>
        </div>
    }
}
