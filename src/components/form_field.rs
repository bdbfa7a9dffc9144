use leptos::prelude::*;

/// Labelled input bound to a string signal pair.
pub fn form_field(
    label: &'static str,
    input_type: &'static str,
    value: ReadSignal<String>,
    set_value: WriteSignal<String>,
) -> impl IntoView {
    view! {
        <label class="form-field">
            <span class="form-label">{label}</span>
            <input
                type=input_type
                class="form-input"
                prop:value=move || value.get()
                on:input=move |ev| set_value.set(event_target_value(&ev))
            />
        </label>
    }
}

pub fn text_area(
    label: &'static str,
    value: ReadSignal<String>,
    set_value: WriteSignal<String>,
) -> impl IntoView {
    view! {
        <label class="form-field">
            <span class="form-label">{label}</span>
            <textarea
                class="form-input"
                rows="3"
                prop:value=move || value.get()
                on:input=move |ev| set_value.set(event_target_value(&ev))
            ></textarea>
        </label>
    }
}
