//! Helpers for the assignment dashboard.

use thiserror::Error;

use crate::models::{CreateAssignment, User, Workout};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Select at least one workout")]
    NoWorkouts,
    #[error("Pick a date")]
    MissingDate,
    #[error("Pick a time")]
    MissingTime,
}

/// Users whose full name or email contains `query`, ignoring case.
pub fn filter_users(users: &[User], query: &str) -> Vec<User> {
    let needle = query.trim().to_lowercase();
    users
        .iter()
        .filter(|u| {
            needle.is_empty()
                || u.full_name.to_lowercase().contains(&needle)
                || u.email.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

pub fn filter_workouts(workouts: &[Workout], query: &str) -> Vec<Workout> {
    let needle = query.trim().to_lowercase();
    workouts
        .iter()
        .filter(|w| needle.is_empty() || w.name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Add `id` if absent, remove it if present.
pub fn toggle_selection(selected: &mut Vec<i64>, id: i64) {
    if let Some(pos) = selected.iter().position(|s| *s == id) {
        selected.remove(pos);
    } else {
        selected.push(id);
    }
}

/// One assignment per selected workout at `{date}T{time}:00`.
pub fn build_assignments(
    user_id: i64,
    workout_ids: &[i64],
    date: &str,
    time: &str,
) -> Result<Vec<CreateAssignment>, ScheduleError> {
    if workout_ids.is_empty() {
        return Err(ScheduleError::NoWorkouts);
    }
    let date = date.trim();
    if date.is_empty() {
        return Err(ScheduleError::MissingDate);
    }
    let time = time.trim();
    if time.is_empty() {
        return Err(ScheduleError::MissingTime);
    }

    let assigned_date_time = format!("{}T{}:00", date, time);
    Ok(workout_ids
        .iter()
        .map(|&workout_template_id| CreateAssignment {
            user_id,
            workout_template_id,
            assigned_date_time: assigned_date_time.clone(),
        })
        .collect())
}

pub fn role_badge(role_id: i64) -> &'static str {
    if role_id == 2 {
        "Trainer"
    } else {
        "Trainee"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: i64, name: &str, email: &str) -> User {
        User {
            id,
            full_name: name.into(),
            login: String::new(),
            email: email.into(),
            role_id: 3,
        }
    }

    #[test]
    fn test_filter_users_by_name_or_email() {
        let users = vec![
            user(1, "Anna Smirnova", "anna@mail.ru"),
            user(2, "Boris Ivanov", "boris@gym.com"),
        ];
        assert_eq!(filter_users(&users, "ANNA").len(), 1);
        assert_eq!(filter_users(&users, "gym.com")[0].id, 2);
        assert_eq!(filter_users(&users, "").len(), 2);
        assert!(filter_users(&users, "zzz").is_empty());
    }

    #[test]
    fn test_filter_workouts_by_name() {
        let workouts = vec![
            Workout {
                id: 1,
                name: "Leg Day".into(),
                kind: String::new(),
                description: String::new(),
                duration: String::new(),
                place: String::new(),
                exercises: Vec::new(),
            },
        ];
        assert_eq!(filter_workouts(&workouts, "leg").len(), 1);
        assert!(filter_workouts(&workouts, "arms").is_empty());
    }

    #[test]
    fn test_toggle_selection() {
        let mut selected = vec![];
        toggle_selection(&mut selected, 4);
        toggle_selection(&mut selected, 7);
        toggle_selection(&mut selected, 4);
        assert_eq!(selected, vec![7]);
    }

    #[test]
    fn test_build_assignments_format() {
        let built = build_assignments(5, &[1, 2], "2025-06-02", "18:30").unwrap();
        assert_eq!(built.len(), 2);
        assert_eq!(built[0].assigned_date_time, "2025-06-02T18:30:00");
        assert_eq!(built[1].workout_template_id, 2);
        assert!(built.iter().all(|a| a.user_id == 5));
    }

    #[test]
    fn test_build_assignments_rejects_incomplete() {
        assert_eq!(
            build_assignments(5, &[], "2025-06-02", "18:30"),
            Err(ScheduleError::NoWorkouts)
        );
        assert_eq!(
            build_assignments(5, &[1], "", "18:30"),
            Err(ScheduleError::MissingDate)
        );
        assert_eq!(
            build_assignments(5, &[1], "2025-06-02", " "),
            Err(ScheduleError::MissingTime)
        );
    }

    #[test]
    fn test_role_badge() {
        assert_eq!(role_badge(2), "Trainer");
        assert_eq!(role_badge(3), "Trainee");
        assert_eq!(role_badge(1), "Trainee");
    }
}
