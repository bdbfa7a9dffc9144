#![recursion_limit = "256"]

mod api;
mod app;
mod components;
mod config;
mod drafts;
mod error;
mod format;
mod guard;
mod logging;
mod models;
mod pages;
mod progress;
mod retry;
mod schedule;
mod session;
mod stats;
mod tasks;

use app::App;
use config::AppConfig;
use tracing::info;

fn main() {
    let config = AppConfig::load();
    logging::init(&config.log_filter);
    info!("Starting Orange Fitness against {}", config.api_base_url);

    leptos::mount::mount_to_body(move || leptos::view! { <App config=config /> });
}
