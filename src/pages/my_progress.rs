use chrono::Local;
use leptos::prelude::*;
use tracing::info;

use crate::api::use_api;
use crate::components::badge::{Badge, BadgeTone};
use crate::components::retry_panel::RetryPanel;
use crate::format;
use crate::models::{CompletedWorkout, DailyStats, UserStatistics};
use crate::stats::{date_range, recent_history, scale, weekly_series, DayPoint};
use crate::tasks::TaskScope;

#[component]
pub fn MyProgressPage() -> impl IntoView {
    let api = use_api();
    let tasks = TaskScope::new();

    let (statistics, set_statistics) = signal(UserStatistics::default());
    let (weekly, set_weekly) = signal::<Vec<DailyStats>>(vec![]);
    let (history, set_history) = signal::<Vec<CompletedWorkout>>(vec![]);
    let (is_loading, set_is_loading) = signal(true);
    let (error, set_error) = signal::<Option<String>>(None);

    let load_stats = move || {
        set_is_loading.set(true);
        let client = api.get_value();
        tasks.spawn(async move {
            let result = futures::try_join!(
                client.statistics(),
                client.weekly_stats(),
                client.completed_workouts()
            );
            match result {
                Ok((summary, days, completed)) => {
                    info!(
                        "Loaded statistics: {} workouts, {} days, {} completed",
                        summary.total_workouts_completed,
                        days.len(),
                        completed.len()
                    );
                    set_statistics.set(summary);
                    set_weekly.set(days);
                    set_history.set(completed);
                    set_error.set(None);
                }
                Err(e) => set_error.set(Some(e.user_message("Could not load your statistics"))),
            }
            set_is_loading.set(false);
        });
    };

    Effect::new(move |_| {
        load_stats();
    });

    let summary_view = move || {
        let s = statistics.get();
        view! {
            <div class="stat-grid">
                <div class="stat-card">
                    <div class="stat-label">"Workouts completed"</div>
                    <div class="stat-value">{s.total_workouts_completed}</div>
                    <div class="stat-secondary">{format!("{} this week", s.weekly_workouts_completed)}</div>
                </div>
                <div class="stat-card">
                    <div class="stat-label">"Calories this month"</div>
                    <div class="stat-value">{format!("{} kcal", format::calories(s.monthly_calories_burned))}</div>
                    <div class="stat-secondary">
                        {format!("{} kcal this week", format::calories(s.weekly_calories_burned))}
                    </div>
                </div>
            </div>
        }
    };

    let chart_view = move || {
        let today = Local::now().date_naive();
        let points: Vec<DayPoint> = weekly.with(|days| weekly_series(today, days));
        let range = date_range(&points);
        let body = if points.is_empty() {
            view! { <p class="hint">"No data to display"</p> }.into_any()
        } else {
            let max = points.iter().map(|p| p.calories).fold(0.0_f64, f64::max);
            view! {
                <div class="bar-chart">
                    {points.into_iter().map(|p| {
                        let height = scale(p.calories, max);
                        let title = format!("{}: {} kcal, {} workout(s)", p.date.format("%-d %b"), format::calories(p.calories), p.workouts);
                        view! {
                            <div class="bar-column" title=title>
                                <div class="bar-value">{format::calories(p.calories)}</div>
                                <div class="bar-track">
                                    <div class="bar-fill" style:height=format!("{}%", height)></div>
                                </div>
                                <div class="bar-label">{p.label}</div>
                            </div>
                        }
                    }).collect::<Vec<_>>()}
                </div>
            }
            .into_any()
        };

        view! {
            <div class="panel">
                <div class="panel-header">
                    <h3>"Weekly activity"</h3>
                    {range.map(|r| view! { <span class="panel-subtitle">{r}</span> })}
                </div>
                {body}
            </div>
        }
    };

    let history_view = move || {
        let recent = history.with(|h| recent_history(h));
        view! {
            <div class="panel">
                <div class="panel-header">
                    <h3>"Recent workouts"</h3>
                </div>
                {if recent.is_empty() {
                    view! { <p class="hint">"No completed workouts yet."</p> }.into_any()
                } else {
                    view! {
                        <ul class="history-list">
                            {recent.into_iter().map(|w| view! {
                                <li class="history-item">
                                    <div>
                                        <div class="history-name">{w.workout_name.clone()}</div>
                                        <div class="history-meta">
                                            {format!("{} \u{00b7} {}", format::long_date(&w.assigned_date_time), w.duration)}
                                        </div>
                                    </div>
                                    <Badge
                                        label=format!("{} kcal", format::calories(w.calories_burned))
                                        tone=BadgeTone::Success
                                    />
                                </li>
                            }).collect::<Vec<_>>()}
                        </ul>
                    }.into_any()
                }}
            </div>
        }
    };

    view! {
        <div class="page">
            <div class="page-header">
                <h2 class="page-title">"My progress"</h2>
            </div>
            {move || error.get().map(|message| view! {
                <RetryPanel message=message on_retry=move |_| load_stats() />
            })}
            {move || {
                if is_loading.get() {
                    return view! { <div class="loading">"Loading statistics..."</div> }.into_any();
                }
                if error.with(|e| e.is_some()) {
                    return view! { <span></span> }.into_any();
                }
                view! {
                    {summary_view}
                    {chart_view}
                    {history_view}
                }
                .into_any()
            }}
        </div>
    }
}
