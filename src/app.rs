use std::sync::Arc;

use leptos::prelude::*;
use leptos_router::components::*;
use leptos_router::path;

use crate::config::AppConfig;
use crate::guard::{RoleGuard, ADMIN_ONLY, EVERYONE, STAFF};
use crate::pages::login::LoginPage;
use crate::pages::my_progress::MyProgressPage;
use crate::pages::my_trainings::MyTrainingsPage;
use crate::pages::not_found::NotFoundPage;
use crate::pages::progress_dashboard::ProgressDashboardPage;
use crate::pages::training_management::TrainingManagementPage;
use crate::pages::user_management::UserManagementPage;
use crate::session::{BrowserStorage, SessionContext};

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    let session = SessionContext::new(Arc::new(BrowserStorage::new(config.token_storage_key)));
    provide_context(config);
    provide_context(session);

    view! {
        <Router>
            <div class="app-layout">
                <Routes fallback=|| view! { <NotFoundPage /> }>
                    <Route path=path!("/") view=LoginPage />
                    <Route
                        path=path!("/users")
                        view=|| view! { <RoleGuard allowed=ADMIN_ONLY><UserManagementPage /></RoleGuard> }
                    />
                    <Route
                        path=path!("/dashboard")
                        view=|| view! { <RoleGuard allowed=STAFF><ProgressDashboardPage /></RoleGuard> }
                    />
                    <Route
                        path=path!("/trainings")
                        view=|| view! { <RoleGuard allowed=STAFF><TrainingManagementPage /></RoleGuard> }
                    />
                    <Route
                        path=path!("/my-trainings")
                        view=|| view! { <RoleGuard allowed=EVERYONE><MyTrainingsPage /></RoleGuard> }
                    />
                    <Route
                        path=path!("/my-progress")
                        view=|| view! { <RoleGuard allowed=EVERYONE><MyProgressPage /></RoleGuard> }
                    />
                </Routes>
            </div>
        </Router>
    }
}
