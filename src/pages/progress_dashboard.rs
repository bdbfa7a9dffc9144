use leptos::prelude::*;
use tracing::{debug, info};

use crate::api::use_api;
use crate::components::badge::{Badge, BadgeTone};
use crate::components::exercise_row::ExerciseRow;
use crate::components::modal::Modal;
use crate::components::progress_bar::ProgressBar;
use crate::components::retry_panel::RetryPanel;
use crate::format;
use crate::models::{User, UserWorkout, Workout};
use crate::progress::{overall_progress, TrainingProgress};
use crate::retry::{Failures, Operation};
use crate::schedule::{build_assignments, filter_users, filter_workouts, role_badge, toggle_selection};
use crate::tasks::TaskScope;

#[component]
pub fn ProgressDashboardPage() -> impl IntoView {
    let api = use_api();
    let tasks = TaskScope::new();

    // Roster
    let (users, set_users) = signal::<Vec<User>>(vec![]);
    let (workouts, set_workouts) = signal::<Vec<Workout>>(vec![]);
    let (is_loading, set_is_loading) = signal(true);
    let (search, set_search) = signal(String::new());
    let failures = RwSignal::new(Failures::default());

    // Selected user
    let (selected, set_selected) = signal::<Option<User>>(None);
    let (assignments, set_assignments) = signal::<Vec<UserWorkout>>(vec![]);
    let (assignments_loading, set_assignments_loading) = signal(false);
    let (removing, set_removing) = signal::<Option<i64>>(None);

    // Assign dialog
    let (assign_open, set_assign_open) = signal(false);
    let (workout_search, set_workout_search) = signal(String::new());
    let (chosen, set_chosen) = signal::<Vec<i64>>(vec![]);
    let (date, set_date) = signal(String::new());
    let (time, set_time) = signal(String::new());
    let (assign_error, set_assign_error) = signal::<Option<String>>(None);
    let (assigning, set_assigning) = signal(false);

    let load_roster = move || {
        set_is_loading.set(true);
        let client = api.get_value();
        tasks.spawn(async move {
            let (user_result, workout_result) =
                futures::join!(client.list_users(), client.list_workouts());
            let mut errors = Vec::new();
            match user_result {
                Ok(list) => set_users.set(list),
                Err(e) => errors.push(e.user_message("Could not load users")),
            }
            match workout_result {
                Ok(list) => set_workouts.set(list),
                Err(e) => errors.push(e.user_message("Could not load workouts")),
            }
            if errors.is_empty() {
                failures.update(|f| f.succeeded(Operation::Load));
            } else {
                failures.update(|f| f.fail(Operation::Load, errors.join(". ")));
            }
            set_is_loading.set(false);
        });
    };

    Effect::new(move |_| {
        load_roster();
    });

    let is_current = move |user_id: i64| {
        selected.with_untracked(|s| s.as_ref().map(|u| u.id) == Some(user_id))
    };

    let load_assignments = move |user_id: i64| {
        set_assignments_loading.set(true);
        let client = api.get_value();
        tasks.spawn(async move {
            let result = client.user_assignments(user_id).await;
            if !is_current(user_id) {
                debug!("Dropping assignments of user {}, selection changed", user_id);
                return;
            }
            match result {
                Ok(list) => {
                    set_assignments.set(list);
                    failures.update(|f| f.succeeded(Operation::Assignments(user_id)));
                }
                Err(e) => {
                    let message = e.user_message("Could not load assigned workouts");
                    failures.update(|f| f.fail(Operation::Assignments(user_id), message));
                }
            }
            set_assignments_loading.set(false);
        });
    };

    let select_user = move |user: User| {
        let id = user.id;
        set_selected.set(Some(user));
        set_assignments.set(vec![]);
        set_assign_open.set(false);
        // failures of the previous selection no longer apply
        failures.update(|f| {
            f.succeeded(Operation::Assignments(id));
            f.succeeded(Operation::Remove(id));
        });
        load_assignments(id);
    };

    let open_assign = move || {
        set_workout_search.set(String::new());
        set_chosen.set(vec![]);
        set_date.set(String::new());
        set_time.set(String::new());
        set_assign_error.set(None);
        set_assign_open.set(true);
    };

    let submit_assign = move || {
        let Some(user_id) = selected.with_untracked(|s| s.as_ref().map(|u| u.id)) else {
            return;
        };
        if assigning.get_untracked() {
            return;
        }
        let batch = match build_assignments(
            user_id,
            &chosen.get_untracked(),
            &date.get_untracked(),
            &time.get_untracked(),
        ) {
            Ok(batch) => batch,
            Err(e) => {
                set_assign_error.set(Some(e.to_string()));
                return;
            }
        };

        set_assign_error.set(None);
        set_assigning.set(true);
        let client = api.get_value();
        tasks.spawn(async move {
            let count = batch.len();
            match client.assign_workouts(batch).await {
                Ok(()) => {
                    info!("Assigned {} workout(s) to user {}", count, user_id);
                    set_assign_open.set(false);
                    if is_current(user_id) {
                        load_assignments(user_id);
                    }
                }
                Err(e) => set_assign_error.set(Some(e.user_message("Could not assign workouts"))),
            }
            set_assigning.set(false);
        });
    };

    let remove_assignment = move |assignment_id: i64| {
        let Some(user_id) = selected.with_untracked(|s| s.as_ref().map(|u| u.id)) else {
            return;
        };
        set_removing.set(Some(assignment_id));
        let client = api.get_value();
        tasks.spawn(async move {
            match client.delete_assignment(assignment_id).await {
                Ok(()) => {
                    info!("Removed assignment {}", assignment_id);
                    failures.update(|f| f.succeeded(Operation::Remove(assignment_id)));
                    if is_current(user_id) {
                        load_assignments(user_id);
                    }
                }
                Err(e) => {
                    let message = e.user_message("Could not remove the workout");
                    failures.update(|f| f.fail(Operation::Remove(assignment_id), message));
                }
            }
            set_removing.set(None);
        });
    };

    let retry = move |operation: Operation| match failures.with_untracked(|f| f.retry(operation)) {
        Some(Operation::Load) => load_roster(),
        Some(Operation::Assignments(id)) => {
            if is_current(id) {
                load_assignments(id);
            }
        }
        Some(Operation::Remove(id)) => remove_assignment(id),
        _ => {}
    };

    let visible_users = Memo::new(move |_| users.with(|list| filter_users(list, &search.get())));
    let visible_workouts =
        Memo::new(move |_| workouts.with(|list| filter_workouts(list, &workout_search.get())));

    let roster_view = move || {
        if is_loading.get() {
            return view! { <div class="loading">"Loading users..."</div> }.into_any();
        }
        let list = visible_users.get();
        if failures.with(|f| f.hides_list(users.with(|u| u.is_empty()))) {
            return view! { <span></span> }.into_any();
        }
        if list.is_empty() {
            return view! { <div class="empty-state"><p>"No users match the search."</p></div> }
                .into_any();
        }
        list.into_iter()
            .map(|u| {
                let id = u.id;
                let for_select = u.clone();
                let is_selected = move || selected.with(|s| s.as_ref().map(|s| s.id) == Some(id));
                view! {
                    <div
                        class="roster-item"
                        class:selected=is_selected
                        on:click=move |_| select_user(for_select.clone())
                    >
                        <div class="roster-name">{u.full_name.clone()}</div>
                        <div class="roster-email">{u.email.clone()}</div>
                        <Badge label=role_badge(u.role_id) />
                    </div>
                }
            })
            .collect::<Vec<_>>()
            .into_any()
    };

    let detail_view = move || {
        let Some(user) = selected.get() else {
            return view! {
                <div class="empty-state"><p>"Select a user to see their workouts."</p></div>
            }
            .into_any();
        };

        let list = assignments.get();
        let overall = overall_progress(&list);
        let trainings: Vec<TrainingProgress> = list.iter().cloned().map(TrainingProgress::from).collect();

        view! {
            <div class="panel">
                <div class="panel-header">
                    <div>
                        <h3>{user.full_name.clone()}</h3>
                        <div class="panel-subtitle">{user.email.clone()}</div>
                    </div>
                    <button class="btn btn-primary" on:click=move |_| open_assign()>
                        "Assign workouts"
                    </button>
                </div>

                <ProgressBar value=overall label="Overall progress" />

                <Show when=move || assignments_loading.get()>
                    <div class="loading">"Loading workouts..."</div>
                </Show>

                <h4>"Assigned workouts"</h4>
                {if list.is_empty() {
                    view! { <p class="hint">"No workouts assigned yet."</p> }.into_any()
                } else {
                    view! {
                        <table class="data-table">
                            <thead>
                                <tr>
                                    <th>"Workout"</th>
                                    <th>"Date"</th>
                                    <th>"Time"</th>
                                    <th>"Status"</th>
                                    <th></th>
                                </tr>
                            </thead>
                            <tbody>
                                {list.iter().map(|a| {
                                    let id = a.assignment_id;
                                    let is_removing = move || removing.get() == Some(id);
                                    view! {
                                        <tr>
                                            <td>{a.workout_name.clone()}</td>
                                            <td>{format::weekday_date(&a.assigned_date_time)}</td>
                                            <td>{format::time_of_day(&a.assigned_date_time)}</td>
                                            <td>
                                                {if a.is_completed {
                                                    view! { <Badge label="Done" tone=BadgeTone::Success /> }.into_any()
                                                } else {
                                                    view! { <Badge label="Planned" /> }.into_any()
                                                }}
                                            </td>
                                            <td class="row-actions">
                                                <button
                                                    class="btn btn-danger"
                                                    disabled=is_removing
                                                    on:click=move |_| remove_assignment(id)
                                                >
                                                    {move || if is_removing() { "Removing..." } else { "Remove" }}
                                                </button>
                                            </td>
                                        </tr>
                                    }
                                }).collect::<Vec<_>>()}
                            </tbody>
                        </table>
                    }.into_any()
                }}

                <h4>"Progress by workout"</h4>
                <div class="training-list">
                    {trainings.into_iter().map(|t| view! {
                        <div class="card training-card">
                            <div class="card-header">
                                <h3 class="card-title">{t.name.clone()}</h3>
                                <span class="card-meta">{format!("{} {}", format::day_month(&t.date), t.time)}</span>
                            </div>
                            <ProgressBar value=t.progress />
                            <ul class="exercise-list">
                                {t.exercises.into_iter().map(|ex| view! { <ExerciseRow exercise=ex /> }).collect::<Vec<_>>()}
                            </ul>
                        </div>
                    }).collect::<Vec<_>>()}
                </div>
            </div>
        }
        .into_any()
    };

    let assign_view = move || {
        view! {
            <Modal title="Assign workouts" on_close=move |_| set_assign_open.set(false)>
                <input
                    type="search"
                    class="form-input"
                    placeholder="Search workouts..."
                    prop:value=move || workout_search.get()
                    on:input=move |ev| set_workout_search.set(event_target_value(&ev))
                />
                <div class="pick-list">
                    {move || {
                        let list = visible_workouts.get();
                        if list.is_empty() && failures.with(|f| f.load_failed()) {
                            return view! {
                                <p class="hint">"The workout catalog did not load. Close this dialog and try again."</p>
                            }.into_any();
                        }
                        if list.is_empty() {
                            return view! { <p class="hint">"No workouts found."</p> }.into_any();
                        }
                        list.into_iter().map(|w| {
                            let id = w.id;
                            let is_chosen = move || chosen.with(|c| c.contains(&id));
                            view! {
                                <label class="pick-item" class:selected=is_chosen>
                                    <input
                                        type="checkbox"
                                        prop:checked=is_chosen
                                        on:change=move |_| set_chosen.update(|c| toggle_selection(c, id))
                                    />
                                    <span class="pick-name">{w.name.clone()}</span>
                                    <span class="pick-meta">{format!("{} \u{00b7} {}", w.kind, w.duration)}</span>
                                </label>
                            }
                        }).collect::<Vec<_>>().into_any()
                    }}
                </div>
                <div class="form-grid">
                    <label class="form-field">
                        <span class="form-label">"Date"</span>
                        <input
                            type="date"
                            class="form-input"
                            prop:value=move || date.get()
                            on:input=move |ev| set_date.set(event_target_value(&ev))
                        />
                    </label>
                    <label class="form-field">
                        <span class="form-label">"Time"</span>
                        <input
                            type="time"
                            class="form-input"
                            prop:value=move || time.get()
                            on:input=move |ev| set_time.set(event_target_value(&ev))
                        />
                    </label>
                </div>
                {move || assign_error.get().map(|e| view! { <div class="form-error">{e}</div> })}
                <div class="modal-actions">
                    <span class="hint">{move || format!("{} selected", chosen.with(|c| c.len()))}</span>
                    <button class="btn btn-secondary" on:click=move |_| set_assign_open.set(false)>
                        "Cancel"
                    </button>
                    <button class="btn btn-primary" disabled=move || assigning.get() on:click=move |_| submit_assign()>
                        {move || if assigning.get() { "Assigning..." } else { "Assign" }}
                    </button>
                </div>
            </Modal>
        }
    };

    view! {
        <div class="page">
            <div class="page-header">
                <h2 class="page-title">"Schedule"</h2>
            </div>

            {move || failures.with(|f| f.iter().map(|failure| {
                let operation = failure.operation;
                view! {
                    <RetryPanel message=failure.message.clone() on_retry=move |_: ()| retry(operation) />
                }
            }).collect::<Vec<_>>())}

            <div class="split-layout">
                <div class="roster-panel">
                    <input
                        type="search"
                        class="form-input"
                        placeholder="Search by name or email..."
                        prop:value=move || search.get()
                        on:input=move |ev| set_search.set(event_target_value(&ev))
                    />
                    <div class="roster-list">{roster_view}</div>
                </div>
                <div class="detail-panel">{detail_view}</div>
            </div>

            <Show when=move || assign_open.get()>
                {assign_view}
            </Show>
        </div>
    }
}
