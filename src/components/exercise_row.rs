use leptos::prelude::*;

use crate::progress::ExerciseProgress;

/// One exercise of an assigned training. `on_toggle` is left out when the
/// row is read-only.
#[component]
pub fn ExerciseRow(
    exercise: ExerciseProgress,
    #[prop(optional, into)] on_toggle: Option<Callback<()>>,
) -> impl IntoView {
    let readonly = on_toggle.is_none();
    let details = format!("{} sets \u{00b7} {} \u{00b7} {} kcal", exercise.sets, exercise.duration_reps, exercise.calories);
    let video = (!exercise.video_link.is_empty()).then(|| exercise.video_link.clone());

    view! {
        <li class="exercise-row" class:exercise-done=exercise.completed>
            <input
                type="checkbox"
                prop:checked=exercise.completed
                disabled=readonly
                on:change=move |_| {
                    if let Some(cb) = on_toggle {
                        cb.run(());
                    }
                }
            />
            <div class="exercise-info">
                <div class="exercise-name">{exercise.name.clone()}</div>
                <div class="exercise-meta">{details}</div>
                {(!exercise.description.is_empty()).then(|| view! {
                    <div class="exercise-description">{exercise.description.clone()}</div>
                })}
            </div>
            {video.map(|href| view! {
                <a class="exercise-video" href=href target="_blank" rel="noopener">"Video"</a>
            })}
        </li>
    }
}
