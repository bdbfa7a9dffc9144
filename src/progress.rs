//! Completion progress of assigned trainings.
//!
//! Exercise check-offs are applied locally first; the screen confirms a
//! fully completed training with the server afterwards.

use crate::format;
use crate::models::UserWorkout;

/// Rounded share of completed items, 0 when there are none.
pub fn completion_percent(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let pct = (completed.min(total) as f64 / total as f64 * 100.0).round();
    pct as u8
}

/// Overall progress across a user's assignments.
pub fn overall_progress(assignments: &[UserWorkout]) -> u8 {
    let completed = assignments.iter().filter(|a| a.is_completed).count();
    completion_percent(completed, assignments.len())
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseProgress {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub duration_reps: String,
    pub sets: i64,
    pub calories: i64,
    pub video_link: String,
    pub completed: bool,
}

/// An assignment as shown in the personal training list.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingProgress {
    /// Assignment id.
    pub id: i64,
    pub name: String,
    pub date: String,
    pub time: String,
    pub duration: String,
    pub location: String,
    pub progress: u8,
    pub completed: bool,
    pub exercises: Vec<ExerciseProgress>,
}

impl From<UserWorkout> for TrainingProgress {
    fn from(a: UserWorkout) -> Self {
        let completed = a.is_completed;
        let name = if a.workout_name.trim().is_empty() {
            "Workout".to_string()
        } else {
            a.workout_name
        };
        let exercises = a
            .exercises
            .into_iter()
            .map(|ex| ExerciseProgress {
                id: ex.id,
                name: if ex.name.is_empty() { "Exercise".to_string() } else { ex.name },
                description: ex.description,
                duration_reps: ex.duration_repeat,
                sets: ex.approach,
                calories: ex.calories,
                video_link: ex.demonstration_exercise,
                completed,
            })
            .collect();

        Self {
            id: a.assignment_id,
            name,
            date: format::date_part(&a.assigned_date_time),
            time: format::time_of_day(&a.assigned_date_time),
            duration: a.duration,
            location: a.place,
            progress: if completed { 100 } else { 0 },
            completed,
            exercises,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExerciseAction {
    Toggle(i64),
}

impl ExerciseAction {
    fn exercise_id(self) -> i64 {
        match self {
            ExerciseAction::Toggle(id) => id,
        }
    }

    fn next(self, current: bool) -> bool {
        match self {
            ExerciseAction::Toggle(_) => !current,
        }
    }
}

/// Apply `action` to one exercise of training `training_id`, recomputing that
/// training's progress and completion flag. Other trainings are untouched.
pub fn apply(
    trainings: &[TrainingProgress],
    training_id: i64,
    action: ExerciseAction,
) -> Vec<TrainingProgress> {
    trainings
        .iter()
        .map(|t| {
            if t.id != training_id {
                return t.clone();
            }
            let exercises: Vec<ExerciseProgress> = t
                .exercises
                .iter()
                .map(|ex| {
                    if ex.id == action.exercise_id() {
                        ExerciseProgress {
                            completed: action.next(ex.completed),
                            ..ex.clone()
                        }
                    } else {
                        ex.clone()
                    }
                })
                .collect();
            let done = exercises.iter().filter(|ex| ex.completed).count();
            let progress = completion_percent(done, exercises.len());
            TrainingProgress {
                progress,
                completed: progress == 100,
                exercises,
                ..t.clone()
            }
        })
        .collect()
}

/// Split into (upcoming, completed), keeping order.
pub fn partition(trainings: &[TrainingProgress]) -> (Vec<TrainingProgress>, Vec<TrainingProgress>) {
    trainings.iter().cloned().partition(|t| !t.completed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Exercise;

    fn exercise(id: i64) -> Exercise {
        Exercise {
            id,
            name: format!("Exercise {}", id),
            description: String::new(),
            duration_repeat: "10 reps".into(),
            approach: 3,
            calories: 10,
            demonstration_exercise: String::new(),
        }
    }

    fn assignment(id: i64, completed: bool, exercise_ids: &[i64]) -> UserWorkout {
        UserWorkout {
            assignment_id: id,
            workout_name: format!("Workout {}", id),
            assigned_date_time: "2025-05-01T07:30:00".into(),
            place: "Gym".into(),
            duration: "1h".into(),
            description: String::new(),
            is_completed: completed,
            exercises: exercise_ids.iter().copied().map(exercise).collect(),
        }
    }

    #[test]
    fn test_completion_percent_rounds() {
        assert_eq!(completion_percent(1, 3), 33);
        assert_eq!(completion_percent(2, 3), 67);
        assert_eq!(completion_percent(3, 3), 100);
    }

    #[test]
    fn test_completion_percent_zero_total() {
        assert_eq!(completion_percent(0, 0), 0);
        assert_eq!(overall_progress(&[]), 0);
    }

    #[test]
    fn test_overall_progress_counts_completed_assignments() {
        let list = vec![
            assignment(1, true, &[]),
            assignment(2, false, &[]),
            assignment(3, true, &[]),
            assignment(4, false, &[]),
        ];
        assert_eq!(overall_progress(&list), 50);
    }

    #[test]
    fn test_from_assignment_defaults() {
        let mut a = assignment(5, false, &[1, 2]);
        a.workout_name = String::new();
        let t = TrainingProgress::from(a);
        assert_eq!(t.name, "Workout");
        assert_eq!(t.date, "2025-05-01");
        assert_eq!(t.time, "07:30");
        assert_eq!(t.progress, 0);
        assert!(t.exercises.iter().all(|e| !e.completed));

        let done = TrainingProgress::from(assignment(6, true, &[1]));
        assert_eq!(done.progress, 100);
        assert!(done.exercises[0].completed);
    }

    #[test]
    fn test_toggling_all_exercises_completes_training() {
        let trainings = vec![TrainingProgress::from(assignment(1, false, &[10, 11, 12]))];

        let step1 = apply(&trainings, 1, ExerciseAction::Toggle(10));
        assert_eq!(step1[0].progress, 33);
        assert!(!step1[0].completed);

        let step2 = apply(&step1, 1, ExerciseAction::Toggle(11));
        let step3 = apply(&step2, 1, ExerciseAction::Toggle(12));
        assert_eq!(step3[0].progress, 100);
        assert!(step3[0].completed);

        let back = apply(&step3, 1, ExerciseAction::Toggle(11));
        assert_eq!(back[0].progress, 67);
        assert!(!back[0].completed);
    }

    #[test]
    fn test_apply_leaves_other_trainings_untouched() {
        let trainings = vec![
            TrainingProgress::from(assignment(1, false, &[10])),
            TrainingProgress::from(assignment(2, false, &[10])),
        ];
        let next = apply(&trainings, 1, ExerciseAction::Toggle(10));
        assert!(next[0].completed);
        assert_eq!(next[1], trainings[1]);
        // input collection is not mutated
        assert!(!trainings[0].completed);
    }

    #[test]
    fn test_toggle_twice_restores_state() {
        let trainings = vec![TrainingProgress::from(assignment(1, false, &[10, 11]))];
        let once = apply(&trainings, 1, ExerciseAction::Toggle(10));
        assert_eq!(once[0].progress, 50);
        let twice = apply(&once, 1, ExerciseAction::Toggle(10));
        assert_eq!(twice, trainings);
    }

    #[test]
    fn test_unknown_exercise_id_changes_nothing() {
        let trainings = vec![TrainingProgress::from(assignment(1, false, &[10]))];
        let next = apply(&trainings, 1, ExerciseAction::Toggle(999));
        assert_eq!(next, trainings);
    }

    #[test]
    fn test_partition_splits_by_completion() {
        let trainings = vec![
            TrainingProgress::from(assignment(1, false, &[])),
            TrainingProgress::from(assignment(2, true, &[])),
            TrainingProgress::from(assignment(3, false, &[])),
        ];
        let (upcoming, done) = partition(&trainings);
        assert_eq!(upcoming.iter().map(|t| t.id).collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(done.iter().map(|t| t.id).collect::<Vec<_>>(), vec![2]);
    }
}
