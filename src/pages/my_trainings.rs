use leptos::prelude::*;
use tracing::{info, warn};

use crate::api::use_api;
use crate::components::exercise_row::ExerciseRow;
use crate::components::progress_bar::ProgressBar;
use crate::components::retry_panel::RetryPanel;
use crate::format;
use crate::progress::{apply, partition, ExerciseAction, TrainingProgress};
use crate::session::SessionContext;
use crate::tasks::TaskScope;

/// Banner text once a reload finished. A load error wins; otherwise the
/// notice that caused the reload stays on screen.
fn banner_after_reload(load_error: Option<String>, notice: Option<String>) -> Option<String> {
    load_error.or(notice)
}

#[component]
pub fn MyTrainingsPage() -> impl IntoView {
    let api = use_api();
    let session = expect_context::<SessionContext>();
    let tasks = TaskScope::new();

    let (trainings, set_trainings) = signal::<Vec<TrainingProgress>>(vec![]);
    let (is_loading, set_is_loading) = signal(true);
    let (error, set_error) = signal::<Option<String>>(None);
    let (expanded, set_expanded) = signal::<Vec<i64>>(vec![]);

    let load_trainings = move |notice: Option<String>| {
        let Some(user_id) = untrack(|| session.user_id()) else {
            warn!("Session token carries no user id");
            set_error.set(Some("Your session has no user id. Please log in again.".to_string()));
            set_is_loading.set(false);
            return;
        };
        set_is_loading.set(true);
        let client = api.get_value();
        tasks.spawn(async move {
            match client.user_assignments(user_id).await {
                Ok(list) => {
                    info!("Loaded {} assigned workouts", list.len());
                    set_trainings.set(list.into_iter().map(TrainingProgress::from).collect());
                    set_error.set(banner_after_reload(None, notice));
                }
                Err(e) => {
                    let message = e.user_message("Could not load your workouts");
                    set_error.set(banner_after_reload(Some(message), notice));
                }
            }
            set_is_loading.set(false);
        });
    };

    Effect::new(move |_| {
        load_trainings(None);
    });

    let confirm_completed = move |assignment_id: i64| {
        let client = api.get_value();
        tasks.spawn(async move {
            match client.complete_assignment(assignment_id).await {
                Ok(()) => info!("Workout {} marked completed", assignment_id),
                Err(e) => {
                    warn!("Completion of {} was not saved: {}", assignment_id, e);
                    load_trainings(Some(e.user_message("Could not save your progress")));
                }
            }
        });
    };

    let toggle_exercise = move |training_id: i64, exercise_id: i64| {
        let current = trainings.get_untracked();
        let Some(before) = current.iter().find(|t| t.id == training_id) else {
            return;
        };
        if before.completed {
            return;
        }
        let next = apply(&current, training_id, ExerciseAction::Toggle(exercise_id));
        let finished = next.iter().any(|t| t.id == training_id && t.completed);
        set_trainings.set(next);
        if finished {
            confirm_completed(training_id);
        }
    };

    let toggle_expanded = move |id: i64| {
        set_expanded.update(|list| {
            if let Some(pos) = list.iter().position(|e| *e == id) {
                list.remove(pos);
            } else {
                list.push(id);
            }
        });
    };

    let card = move |t: TrainingProgress| {
        let id = t.id;
        let completed = t.completed;
        let is_open = move || expanded.with(|e| e.contains(&id));
        let exercises = t.exercises.clone();

        view! {
            <div class="card training-card" class:training-done=completed>
                <div class="card-header" on:click=move |_| toggle_expanded(id)>
                    <div>
                        <h3 class="card-title">{t.name.clone()}</h3>
                        <div class="card-meta">
                            <span>{format::weekday_date(&t.date)}</span>
                            <span>{t.time.clone()}</span>
                            <span>{t.duration.clone()}</span>
                            <span>{t.location.clone()}</span>
                        </div>
                    </div>
                    <span class="expand-icon">{move || if is_open() { "\u{25B2}" } else { "\u{25BC}" }}</span>
                </div>
                <ProgressBar value=t.progress />
                <Show when=is_open>
                    <ul class="exercise-list">
                        {exercises.clone().into_iter().map(|ex| {
                            let exercise_id = ex.id;
                            if completed {
                                view! { <ExerciseRow exercise=ex /> }.into_any()
                            } else {
                                view! {
                                    <ExerciseRow
                                        exercise=ex
                                        on_toggle=move |_| toggle_exercise(id, exercise_id)
                                    />
                                }.into_any()
                            }
                        }).collect::<Vec<_>>()}
                    </ul>
                </Show>
            </div>
        }
    };

    let sections = move || {
        if is_loading.get() {
            return view! { <div class="loading">"Loading your workouts..."</div> }.into_any();
        }
        let (upcoming, done) = partition(&trainings.get());
        view! {
            <section class="training-section">
                <h3 class="section-title">{format!("Upcoming ({})", upcoming.len())}</h3>
                {if upcoming.is_empty() {
                    view! { <p class="hint">"Nothing planned. Enjoy the rest!"</p> }.into_any()
                } else {
                    upcoming.into_iter().map(card).collect::<Vec<_>>().into_any()
                }}
            </section>
            <section class="training-section">
                <h3 class="section-title">{format!("Completed ({})", done.len())}</h3>
                {if done.is_empty() {
                    view! { <p class="hint">"No completed workouts yet."</p> }.into_any()
                } else {
                    done.into_iter().map(card).collect::<Vec<_>>().into_any()
                }}
            </section>
        }
        .into_any()
    };

    view! {
        <div class="page">
            <div class="page-header">
                <h2 class="page-title">"My trainings"</h2>
            </div>
            {move || error.get().map(|message| view! {
                <RetryPanel message=message on_retry=move |_: ()| load_trainings(None) />
            })}
            {sections}
        </div>
    }
}
