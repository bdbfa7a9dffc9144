use std::sync::Arc;

use leptos::prelude::*;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error, warn};

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::models::{
    AssignmentBatch, CompleteAssignment, CompletedWorkout, CreateAssignment, DailyStats,
    LoginRequest, LoginResponse, RoleInfo, User, UserForm, UserStatistics, UserWorkout, Workout,
    WorkoutPayload,
};
use crate::session::SessionContext;

type UnauthorizedHook = Arc<dyn Fn() + Send + Sync>;

/// HTTP client for the training API.
///
/// Carries the bearer token it was built with. Screens build one on mount
/// with [`use_api`].
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: AppConfig,
    token: Option<String>,
    on_unauthorized: Option<UnauthorizedHook>,
}

impl ApiClient {
    /// Client without credentials, for the login call.
    pub fn anonymous(config: &AppConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config: config.clone(),
            token: None,
            on_unauthorized: None,
        }
    }

    /// Client carrying the session's token. A 401 answer logs the session out.
    pub fn for_session(config: &AppConfig, session: SessionContext) -> Self {
        Self {
            token: session.token_untracked(),
            on_unauthorized: Some(Arc::new(move || session.force_logout())),
            ..Self::anonymous(config)
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.config.endpoint(path);
        debug!("{} {}", method, url);
        let builder = self.http.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn execute(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let response = builder.send().await.map_err(|e| {
            error!("Request failed without a response: {}", e);
            ApiError::Transport(e)
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response.text().await.unwrap_or_default();
        warn!("API returned {}: {}", status.as_u16(), message);
        if status == StatusCode::UNAUTHORIZED {
            if let Some(hook) = &self.on_unauthorized {
                hook();
            }
        }
        Err(ApiError::from_status(status.as_u16(), message))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.execute(self.request(Method::GET, path)).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn send_json<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<Response, ApiError> {
        self.execute(self.request(method, path).json(body)).await
    }

    async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.execute(self.request(Method::DELETE, path)).await?;
        Ok(())
    }

    // -- Session --

    /// Exchange credentials for a bearer token.
    pub async fn login(&self, login: &str, password: &str) -> Result<Option<String>, ApiError> {
        let body = LoginRequest {
            login: login.to_string(),
            password: password.to_string(),
        };
        let response = self.send_json(Method::POST, "/api/login", &body).await?;
        let parsed: LoginResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(parsed.token.filter(|t| !t.is_empty()))
    }

    // -- Users and roles --

    pub async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        self.get_json("/api/User").await
    }

    pub async fn list_roles(&self) -> Result<Vec<RoleInfo>, ApiError> {
        self.get_json("/api/Role").await
    }

    pub async fn create_user(&self, form: &UserForm) -> Result<(), ApiError> {
        let builder = self
            .request(Method::POST, "/api/User")
            .multipart(multipart_form(form));
        self.execute(builder).await?;
        Ok(())
    }

    pub async fn update_user(&self, id: i64, form: &UserForm) -> Result<(), ApiError> {
        let builder = self
            .request(Method::PUT, &format!("/api/User/{}", id))
            .multipart(multipart_form(form));
        self.execute(builder).await?;
        Ok(())
    }

    pub async fn delete_user(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/api/User/{}", id)).await
    }

    // -- Workout templates --

    pub async fn list_workouts(&self) -> Result<Vec<Workout>, ApiError> {
        self.get_json("/api/Workout").await
    }

    pub async fn create_workout(&self, payload: &WorkoutPayload) -> Result<(), ApiError> {
        self.send_json(Method::POST, "/api/Workout", payload).await?;
        Ok(())
    }

    pub async fn update_workout(&self, id: i64, payload: &WorkoutPayload) -> Result<(), ApiError> {
        self.send_json(Method::PUT, &format!("/api/Workout/{}", id), payload)
            .await?;
        Ok(())
    }

    pub async fn delete_workout(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/api/Workout/{}", id)).await
    }

    // -- Assignments --

    pub async fn user_assignments(&self, user_id: i64) -> Result<Vec<UserWorkout>, ApiError> {
        self.get_json(&format!("/api/WorkoutAssignment/user/{}", user_id))
            .await
    }

    /// Post all assignments in one request.
    pub async fn assign_workouts(&self, assignments: Vec<CreateAssignment>) -> Result<(), ApiError> {
        let batch = AssignmentBatch { assignments };
        self.send_json(Method::POST, "/api/WorkoutAssignment", &batch)
            .await?;
        Ok(())
    }

    pub async fn complete_assignment(&self, assignment_id: i64) -> Result<(), ApiError> {
        let body = CompleteAssignment { is_completed: true };
        self.send_json(
            Method::PUT,
            &format!("/api/WorkoutAssignment/complete/{}", assignment_id),
            &body,
        )
        .await?;
        Ok(())
    }

    pub async fn delete_assignment(&self, assignment_id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/api/WorkoutAssignment/{}", assignment_id))
            .await
    }

    // -- Statistics --

    pub async fn statistics(&self) -> Result<UserStatistics, ApiError> {
        self.get_json("/api/Stats").await
    }

    pub async fn weekly_stats(&self) -> Result<Vec<DailyStats>, ApiError> {
        self.get_json("/api/Stats/weekly-calories").await
    }

    pub async fn completed_workouts(&self) -> Result<Vec<CompletedWorkout>, ApiError> {
        self.get_json("/api/Stats/completed-workouts").await
    }
}

fn multipart_form(form: &UserForm) -> reqwest::multipart::Form {
    form.fields()
        .into_iter()
        .fold(reqwest::multipart::Form::new(), |acc, (name, value)| {
            acc.text(name, value)
        })
}

/// Build a client for the current screen from context.
///
/// Returned as a `StoredValue` so event handlers can share it by copy.
pub fn use_api() -> StoredValue<ApiClient> {
    let config = expect_context::<AppConfig>();
    let session = expect_context::<SessionContext>();
    StoredValue::new(ApiClient::for_session(&config, session))
}
