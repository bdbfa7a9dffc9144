use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeTone {
    Neutral,
    Accent,
    Success,
}

impl BadgeTone {
    fn class(self) -> &'static str {
        match self {
            BadgeTone::Neutral => "badge badge-neutral",
            BadgeTone::Accent => "badge badge-accent",
            BadgeTone::Success => "badge badge-success",
        }
    }
}

#[component]
pub fn Badge(
    /// The label text, e.g. "Trainer"
    #[prop(into)]
    label: String,
    #[prop(default = BadgeTone::Neutral)] tone: BadgeTone,
) -> impl IntoView {
    view! { <span class=tone.class()>{label}</span> }
}
