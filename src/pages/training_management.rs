use leptos::prelude::*;
use tracing::info;

use crate::api::use_api;
use crate::components::badge::{Badge, BadgeTone};
use crate::components::form_field::{form_field, text_area};
use crate::components::modal::ConfirmDialog;
use crate::components::retry_panel::RetryPanel;
use crate::drafts::{ExerciseBuilder, ExerciseForm, WorkoutForm};
use crate::models::Workout;
use crate::retry::{Failures, Operation};
use crate::tasks::TaskScope;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    List,
    Create,
    Edit(i64),
    Details(i64),
}

#[component]
pub fn TrainingManagementPage() -> impl IntoView {
    let api = use_api();
    let tasks = TaskScope::new();

    // List state
    let (workouts, set_workouts) = signal::<Vec<Workout>>(vec![]);
    let (is_loading, set_is_loading) = signal(true);
    let (mode, set_mode) = signal(Mode::List);
    let failures = RwSignal::new(Failures::default());
    let (pending_delete, set_pending_delete) = signal::<Option<Workout>>(None);
    let (saving, set_saving) = signal(false);

    // Workout form
    let (name, set_name) = signal(String::new());
    let (kind, set_kind) = signal(String::new());
    let (description, set_description) = signal(String::new());
    let (duration, set_duration) = signal(String::new());
    let (place, set_place) = signal(String::new());
    let (form_error, set_form_error) = signal::<Option<String>>(None);

    // Exercise builder
    let builder = RwSignal::new(ExerciseBuilder::default());
    let (ex_name, set_ex_name) = signal(String::new());
    let (ex_description, set_ex_description) = signal(String::new());
    let (ex_duration, set_ex_duration) = signal(String::new());
    let (ex_sets, set_ex_sets) = signal(String::new());
    let (ex_calories, set_ex_calories) = signal(String::new());
    let (ex_video, set_ex_video) = signal(String::new());
    let (exercise_error, set_exercise_error) = signal::<Option<String>>(None);

    let load_workouts = move || {
        set_is_loading.set(true);
        let client = api.get_value();
        tasks.spawn(async move {
            match client.list_workouts().await {
                Ok(list) => {
                    info!("Loaded {} workout templates", list.len());
                    set_workouts.set(list);
                    failures.update(|f| f.succeeded(Operation::Load));
                }
                Err(e) => {
                    let message = e.user_message("Could not load workouts");
                    failures.update(|f| f.fail(Operation::Load, message));
                }
            }
            set_is_loading.set(false);
        });
    };

    Effect::new(move |_| {
        load_workouts();
    });

    let fill_exercise_form = move |form: ExerciseForm| {
        set_ex_name.set(form.name);
        set_ex_description.set(form.description);
        set_ex_duration.set(form.duration_reps);
        set_ex_sets.set(form.sets);
        set_ex_calories.set(form.calories);
        set_ex_video.set(form.video_link);
        set_exercise_error.set(None);
    };

    let fill_workout_form = move |form: WorkoutForm| {
        set_name.set(form.name);
        set_kind.set(form.kind);
        set_description.set(form.description);
        set_duration.set(form.duration);
        set_place.set(form.place);
        set_form_error.set(None);
    };

    let open_create = move || {
        fill_workout_form(WorkoutForm::default());
        fill_exercise_form(ExerciseForm::default());
        builder.set(ExerciseBuilder::default());
        failures.update(|f| f.form_closed());
        set_mode.set(Mode::Create);
    };

    let open_edit = move |workout: Workout| {
        fill_workout_form(WorkoutForm::from_workout(&workout));
        fill_exercise_form(ExerciseForm::default());
        builder.set(ExerciseBuilder::new(workout.exercises.clone()));
        failures.update(|f| f.form_closed());
        set_mode.set(Mode::Edit(workout.id));
    };

    let close_form = move || {
        failures.update(|f| f.form_closed());
        set_mode.set(Mode::List);
    };

    let save_exercise = move || {
        let form = ExerciseForm {
            name: ex_name.get_untracked(),
            description: ex_description.get_untracked(),
            duration_reps: ex_duration.get_untracked(),
            sets: ex_sets.get_untracked(),
            calories: ex_calories.get_untracked(),
            video_link: ex_video.get_untracked(),
        };
        let mut outcome = Ok(());
        builder.update(|b| outcome = b.save(&form));
        match outcome {
            Ok(()) => fill_exercise_form(ExerciseForm::default()),
            Err(e) => set_exercise_error.set(Some(e.to_string())),
        }
    };

    let edit_exercise = move |id: i64| {
        let mut form = None;
        builder.update(|b| form = b.edit(id));
        if let Some(form) = form {
            fill_exercise_form(form);
        }
    };

    let remove_exercise = move |id: i64| {
        let mut was_editing = false;
        builder.update(|b| was_editing = b.remove(id));
        if was_editing {
            fill_exercise_form(ExerciseForm::default());
        }
    };

    let cancel_exercise_edit = move || {
        builder.update(|b| b.cancel_edit());
        fill_exercise_form(ExerciseForm::default());
    };

    let submit = move || {
        if saving.get_untracked() {
            return;
        }
        let form = WorkoutForm {
            name: name.get_untracked(),
            kind: kind.get_untracked(),
            description: description.get_untracked(),
            duration: duration.get_untracked(),
            place: place.get_untracked(),
        };
        let payload = match builder.with_untracked(|b| b.to_payload(&form)) {
            Ok(p) => p,
            Err(e) => {
                set_form_error.set(Some(e.to_string()));
                return;
            }
        };
        let operation = match mode.get_untracked() {
            Mode::Create => Operation::Create,
            Mode::Edit(id) => Operation::Update(id),
            Mode::List | Mode::Details(_) => return,
        };

        set_form_error.set(None);
        set_saving.set(true);
        let client = api.get_value();
        tasks.spawn(async move {
            let result = match operation {
                Operation::Update(id) => client.update_workout(id, &payload).await,
                _ => client.create_workout(&payload).await,
            };
            match result {
                Ok(()) => {
                    info!("Saved workout '{}'", payload.name);
                    failures.update(|f| f.succeeded(operation));
                    set_mode.set(Mode::List);
                    load_workouts();
                }
                Err(e) => {
                    let message = e.user_message("Could not save the workout");
                    failures.update(|f| f.fail(operation, message));
                }
            }
            set_saving.set(false);
        });
    };

    let delete_workout = move |id: i64| {
        set_pending_delete.set(None);
        let client = api.get_value();
        tasks.spawn(async move {
            match client.delete_workout(id).await {
                Ok(()) => {
                    info!("Deleted workout {}", id);
                    failures.update(|f| f.succeeded(Operation::Delete(id)));
                    if mode.get_untracked() == Mode::Details(id) {
                        set_mode.set(Mode::List);
                    }
                    load_workouts();
                }
                Err(e) => {
                    let message = e.user_message("Could not delete the workout");
                    failures.update(|f| f.fail(Operation::Delete(id), message));
                }
            }
        });
    };

    let retry = move |operation: Operation| match failures.with_untracked(|f| f.retry(operation)) {
        Some(Operation::Load) => load_workouts(),
        Some(Operation::Create | Operation::Update(_)) => submit(),
        Some(Operation::Delete(id)) => delete_workout(id),
        Some(Operation::Assignments(_) | Operation::Remove(_)) | None => {}
    };

    let list_view = move || {
        if is_loading.get() && workouts.with(|w| w.is_empty()) {
            return view! { <div class="loading">"Loading workouts..."</div> }.into_any();
        }
        let list = workouts.get();
        if failures.with(|f| f.hides_list(list.is_empty())) {
            return view! { <span></span> }.into_any();
        }
        if list.is_empty() {
            return view! {
                <div class="empty-state">
                    <p>"No workouts yet."</p>
                    <button class="btn btn-primary" on:click=move |_| open_create()>
                        "Create the first workout"
                    </button>
                </div>
            }
            .into_any();
        }

        view! {
            <div class="card-grid">
                {list.into_iter().map(|w| {
                    let id = w.id;
                    let for_edit = w.clone();
                    let for_delete = w.clone();
                    view! {
                        <div class="card workout-card">
                            <div class="card-header">
                                <h3 class="card-title">{w.name.clone()}</h3>
                                {(!w.kind.is_empty()).then(|| view! {
                                    <Badge label=w.kind.clone() tone=BadgeTone::Accent />
                                })}
                            </div>
                            <p class="card-text">{w.description.clone()}</p>
                            <div class="card-meta">
                                <span>{format!("\u{23F1} {}", w.duration)}</span>
                                <span>{format!("\u{1F4CD} {}", w.place)}</span>
                                <span>{format!("{} exercises", w.exercises.len())}</span>
                            </div>
                            <div class="card-actions">
                                <button class="btn btn-secondary" on:click=move |_| set_mode.set(Mode::Details(id))>
                                    "Details"
                                </button>
                                <button class="btn btn-secondary" on:click=move |_| open_edit(for_edit.clone())>
                                    "Edit"
                                </button>
                                <button class="btn btn-danger" on:click=move |_| set_pending_delete.set(Some(for_delete.clone()))>
                                    "Delete"
                                </button>
                            </div>
                        </div>
                    }
                }).collect::<Vec<_>>()}
            </div>
        }
        .into_any()
    };

    let details_view = move |id: i64| {
        let Some(w) = workouts.with(|list| list.iter().find(|w| w.id == id).cloned()) else {
            return view! {
                <div class="empty-state">
                    <p>"This workout no longer exists."</p>
                    <button class="btn btn-secondary" on:click=move |_| set_mode.set(Mode::List)>
                        "Back to list"
                    </button>
                </div>
            }
            .into_any();
        };
        let for_edit = w.clone();

        view! {
            <div class="panel">
                <div class="panel-header">
                    <h3>{w.name.clone()}</h3>
                    <div class="card-actions">
                        <button class="btn btn-secondary" on:click=move |_| open_edit(for_edit.clone())>
                            "Edit"
                        </button>
                        <button class="btn btn-secondary" on:click=move |_| set_mode.set(Mode::List)>
                            "Back to list"
                        </button>
                    </div>
                </div>
                <dl class="detail-list">
                    <dt>"Type"</dt><dd>{w.kind.clone()}</dd>
                    <dt>"Duration"</dt><dd>{w.duration.clone()}</dd>
                    <dt>"Place"</dt><dd>{w.place.clone()}</dd>
                    <dt>"Description"</dt><dd>{w.description.clone()}</dd>
                </dl>
                <h4>{format!("Exercises ({})", w.exercises.len())}</h4>
                <ol class="exercise-list">
                    {w.exercises.iter().map(|ex| view! {
                        <li class="exercise-row">
                            <div class="exercise-info">
                                <div class="exercise-name">{ex.name.clone()}</div>
                                <div class="exercise-meta">
                                    {format!("{} sets \u{00b7} {} \u{00b7} {} kcal", ex.approach, ex.duration_repeat, ex.calories)}
                                </div>
                                <div class="exercise-description">{ex.description.clone()}</div>
                            </div>
                            {(!ex.demonstration_exercise.is_empty()).then(|| view! {
                                <a class="exercise-video" href=ex.demonstration_exercise.clone() target="_blank" rel="noopener">"Video"</a>
                            })}
                        </li>
                    }).collect::<Vec<_>>()}
                </ol>
            </div>
        }
        .into_any()
    };

    let form_view = move |editing: bool| {
        let title = if editing { "Edit workout" } else { "New workout" };
        view! {
            <div class="panel">
                <div class="panel-header">
                    <h3>{title}</h3>
                    <button class="btn btn-secondary" on:click=move |_| close_form()>
                        "Cancel"
                    </button>
                </div>

                <div class="form-grid">
                    {form_field("Name", "text", name, set_name)}
                    {form_field("Type", "text", kind, set_kind)}
                    {form_field("Duration", "text", duration, set_duration)}
                    {form_field("Place", "text", place, set_place)}
                </div>
                {text_area("Description", description, set_description)}

                <h4>"Exercises"</h4>
                <ol class="exercise-list">
                    <For
                        each=move || builder.with(|b| b.exercises.clone())
                        key=|ex| (ex.id, ex.name.clone(), ex.duration_repeat.clone(), ex.approach, ex.calories)
                        children=move |ex| {
                            let id = ex.id;
                            let is_editing = move || builder.with(|b| b.editing == Some(id));
                            view! {
                                <li class="exercise-row" class:exercise-editing=is_editing>
                                    <div class="exercise-info">
                                        <div class="exercise-name">{ex.name.clone()}</div>
                                        <div class="exercise-meta">
                                            {format!("{} sets \u{00b7} {} \u{00b7} {} kcal", ex.approach, ex.duration_repeat, ex.calories)}
                                        </div>
                                    </div>
                                    <button class="btn-icon" title="Edit" on:click=move |_| edit_exercise(id)>"Edit"</button>
                                    <button class="btn-icon btn-danger" title="Remove" on:click=move |_| remove_exercise(id)>"Remove"</button>
                                </li>
                            }
                        }
                    />
                </ol>
                <Show when=move || builder.with(|b| b.exercises.is_empty())>
                    <p class="hint">"Add at least one exercise to save the workout."</p>
                </Show>

                <div class="exercise-editor">
                    <div class="form-grid">
                        {form_field("Exercise name", "text", ex_name, set_ex_name)}
                        {form_field("Duration / reps", "text", ex_duration, set_ex_duration)}
                        {form_field("Sets", "number", ex_sets, set_ex_sets)}
                        {form_field("Calories", "number", ex_calories, set_ex_calories)}
                        {form_field("Video link", "url", ex_video, set_ex_video)}
                    </div>
                    {text_area("Exercise description", ex_description, set_ex_description)}
                    {move || exercise_error.get().map(|e| view! { <div class="form-error">{e}</div> })}
                    <div class="form-actions">
                        <button class="btn btn-secondary" on:click=move |_| save_exercise()>
                            {move || if builder.with(|b| b.editing.is_some()) { "Update exercise" } else { "Add exercise" }}
                        </button>
                        <Show when=move || builder.with(|b| b.editing.is_some())>
                            <button class="btn btn-secondary" on:click=move |_| cancel_exercise_edit()>
                                "Cancel edit"
                            </button>
                        </Show>
                    </div>
                </div>

                {move || form_error.get().map(|e| view! { <div class="form-error">{e}</div> })}
                <div class="form-actions">
                    <button
                        class="btn btn-primary"
                        disabled=move || saving.get() || !builder.with(|b| b.can_submit())
                        on:click=move |_| submit()
                    >
                        {move || if saving.get() { "Saving..." } else if editing { "Save changes" } else { "Create workout" }}
                    </button>
                </div>
            </div>
        }
        .into_any()
    };

    view! {
        <div class="page">
            <div class="page-header">
                <h2 class="page-title">"Trainings"</h2>
                <Show when=move || mode.get() == Mode::List>
                    <button class="btn btn-primary" on:click=move |_| open_create()>
                        "New workout"
                    </button>
                </Show>
            </div>

            {move || failures.with(|f| f.iter().map(|failure| {
                let operation = failure.operation;
                view! {
                    <RetryPanel message=failure.message.clone() on_retry=move |_: ()| retry(operation) />
                }
            }).collect::<Vec<_>>())}

            {move || match mode.get() {
                Mode::List => list_view(),
                Mode::Create => form_view(false),
                Mode::Edit(_) => form_view(true),
                Mode::Details(id) => details_view(id),
            }}

            {move || pending_delete.get().map(|w| {
                let id = w.id;
                view! {
                    <ConfirmDialog
                        title="Delete workout?"
                        message=format!("\"{}\" will be removed for good. Assignments that use it may stop working.", w.name)
                        on_confirm=move |_| delete_workout(id)
                        on_cancel=move |_| set_pending_delete.set(None)
                    />
                }
            })}
        </div>
    }
}
