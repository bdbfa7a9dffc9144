//! Request and response shapes of the training API.
//!
//! Optional fields default when the server leaves them out.

use serde::{Deserialize, Deserializer, Serialize};

/// Treat an explicit `null` like a missing field.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub login: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    #[serde(default, deserialize_with = "nullable")]
    pub full_name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub login: String,
    #[serde(default, deserialize_with = "nullable")]
    pub email: String,
    #[serde(default)]
    pub role_id: i64,
}

/// Fields sent as `multipart/form-data` when creating or updating a user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserForm {
    pub full_name: String,
    pub login: String,
    /// Only sent on create.
    pub password: Option<String>,
    pub email: String,
    pub role_id: i64,
}

impl UserForm {
    pub fn from_user(user: &User) -> Self {
        Self {
            full_name: user.full_name.clone(),
            login: user.login.clone(),
            password: None,
            email: user.email.clone(),
            role_id: user.role_id,
        }
    }

    /// `(field, value)` pairs in the order the server expects.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![("Login", self.login.clone())];
        if let Some(password) = &self.password {
            fields.push(("Password", password.clone()));
        }
        fields.push(("FullName", self.full_name.clone()));
        fields.push(("Email", self.email.clone()));
        fields.push(("RoleId", self.role_id.to_string()));
        fields
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RoleInfo {
    pub id: i64,
    pub name: String,
}

/// Used when `/api/Role` is unavailable.
pub fn fallback_roles() -> Vec<RoleInfo> {
    vec![
        RoleInfo { id: 1, name: "Администратор".to_string() },
        RoleInfo { id: 2, name: "Тренер".to_string() },
        RoleInfo { id: 3, name: "Пользователь".to_string() },
    ]
}

pub fn role_name(roles: &[RoleInfo], role_id: i64) -> String {
    roles
        .iter()
        .find(|r| r.id == role_id)
        .map(|r| r.name.clone())
        .unwrap_or_else(|| "Unknown".to_string())
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    #[serde(default)]
    pub id: i64,
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub description: String,
    /// Duration or repetitions, free text ("10 min", "15 reps").
    #[serde(default, deserialize_with = "nullable")]
    pub duration_repeat: String,
    /// Number of sets.
    #[serde(default)]
    pub approach: i64,
    #[serde(default)]
    pub calories: i64,
    /// Link to a demonstration video.
    #[serde(default, deserialize_with = "nullable")]
    pub demonstration_exercise: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    pub id: i64,
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(rename = "type", default, deserialize_with = "nullable")]
    pub kind: String,
    #[serde(default, deserialize_with = "nullable")]
    pub description: String,
    #[serde(default, deserialize_with = "nullable")]
    pub duration: String,
    #[serde(default, deserialize_with = "nullable")]
    pub place: String,
    #[serde(default, deserialize_with = "nullable")]
    pub exercises: Vec<Exercise>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExercisePayload {
    pub name: String,
    pub description: String,
    pub duration_repeat: String,
    pub approach: i64,
    pub calories: i64,
    pub demonstration_exercise: String,
}

impl From<&Exercise> for ExercisePayload {
    fn from(ex: &Exercise) -> Self {
        Self {
            name: ex.name.clone(),
            description: ex.description.clone(),
            duration_repeat: ex.duration_repeat.clone(),
            approach: ex.approach,
            calories: ex.calories,
            demonstration_exercise: ex.demonstration_exercise.clone(),
        }
    }
}

/// Body of workout create and update calls. Exercise ids are left out.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutPayload {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub place: String,
    pub duration: String,
    pub description: String,
    pub exercises: Vec<ExercisePayload>,
}

/// A workout assigned to one user.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserWorkout {
    pub assignment_id: i64,
    #[serde(default, deserialize_with = "nullable")]
    pub workout_name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub assigned_date_time: String,
    #[serde(default, deserialize_with = "nullable")]
    pub place: String,
    #[serde(default, deserialize_with = "nullable")]
    pub duration: String,
    #[serde(default, deserialize_with = "nullable")]
    pub description: String,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default, deserialize_with = "nullable")]
    pub exercises: Vec<Exercise>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAssignment {
    pub user_id: i64,
    pub workout_template_id: i64,
    /// Local wall time, `YYYY-MM-DDTHH:MM:SS`, no zone suffix.
    pub assigned_date_time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignmentBatch {
    pub assignments: Vec<CreateAssignment>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteAssignment {
    pub is_completed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserStatistics {
    pub total_workouts_completed: i64,
    pub weekly_workouts_completed: i64,
    pub monthly_calories_burned: f64,
    pub weekly_calories_burned: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DailyStats {
    pub day_of_week: String,
    pub date: String,
    pub calories_burned: f64,
    pub workouts_completed: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompletedWorkout {
    pub assignment_id: i64,
    pub workout_name: String,
    pub assigned_date_time: String,
    pub duration: String,
    pub calories_burned: f64,
    pub is_completed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workout_missing_exercises_defaults_empty() {
        let json = r#"{"id":5,"name":"Leg day","type":"Strength","place":"Gym","duration":"1h","description":"Squats"}"#;
        let workout: Workout = serde_json::from_str(json).unwrap();
        assert_eq!(workout.kind, "Strength");
        assert!(workout.exercises.is_empty());
    }

    #[test]
    fn test_null_exercises_and_strings_default() {
        let json = r#"{"id":2,"name":"Yoga","type":null,"description":null,"exercises":null}"#;
        let workout: Workout = serde_json::from_str(json).unwrap();
        assert_eq!(workout.kind, "");
        assert_eq!(workout.description, "");
        assert!(workout.exercises.is_empty());
    }

    #[test]
    fn test_workout_requires_id() {
        let json = r#"{"name":"No id"}"#;
        assert!(serde_json::from_str::<Workout>(json).is_err());
    }

    #[test]
    fn test_user_workout_deserialize() {
        let json = r#"{
            "assignmentId": 9,
            "workoutName": "Morning run",
            "assignedDateTime": "2025-05-01T07:30:00",
            "isCompleted": false,
            "exercises": [
                {"id": 1, "name": "Warm-up", "durationRepeat": "5 min", "approach": 1, "calories": 20, "demonstrationExercise": ""}
            ]
        }"#;
        let uw: UserWorkout = serde_json::from_str(json).unwrap();
        assert_eq!(uw.assignment_id, 9);
        assert_eq!(uw.exercises.len(), 1);
        assert_eq!(uw.exercises[0].duration_repeat, "5 min");
        assert_eq!(uw.place, "");
    }

    #[test]
    fn test_workout_payload_serializes_type_and_camel_case() {
        let payload = WorkoutPayload {
            name: "Core".into(),
            kind: "Pilates".into(),
            place: "Studio".into(),
            duration: "45 min".into(),
            description: "Abs".into(),
            exercises: vec![ExercisePayload {
                name: "Plank".into(),
                description: String::new(),
                duration_repeat: "60 s".into(),
                approach: 3,
                calories: 15,
                demonstration_exercise: String::new(),
            }],
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["type"], "Pilates");
        assert_eq!(json["exercises"][0]["durationRepeat"], "60 s");
        assert!(json["exercises"][0].get("id").is_none());
    }

    #[test]
    fn test_assignment_batch_shape() {
        let batch = AssignmentBatch {
            assignments: vec![CreateAssignment {
                user_id: 4,
                workout_template_id: 8,
                assigned_date_time: "2025-06-02T18:00:00".into(),
            }],
        };
        let json = serde_json::to_value(&batch).unwrap();
        assert_eq!(json["assignments"][0]["workoutTemplateId"], 8);
        assert_eq!(json["assignments"][0]["assignedDateTime"], "2025-06-02T18:00:00");
    }

    #[test]
    fn test_statistics_default_missing_fields() {
        let stats: UserStatistics = serde_json::from_str(r#"{"totalWorkoutsCompleted": 12}"#).unwrap();
        assert_eq!(stats.total_workouts_completed, 12);
        assert_eq!(stats.monthly_calories_burned, 0.0);
    }

    #[test]
    fn test_user_form_fields_order() {
        let form = UserForm {
            full_name: "Ivan Petrov".into(),
            login: "ivan".into(),
            password: Some("secret".into()),
            email: "ivan@example.com".into(),
            role_id: 3,
        };
        let names: Vec<_> = form.fields().into_iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["Login", "Password", "FullName", "Email", "RoleId"]);

        let update = UserForm { password: None, ..form };
        assert!(update.fields().iter().all(|(k, _)| *k != "Password"));
    }

    #[test]
    fn test_role_name_lookup() {
        let roles = fallback_roles();
        assert_eq!(role_name(&roles, 2), "Тренер");
        assert_eq!(role_name(&roles, 99), "Unknown");
    }
}
