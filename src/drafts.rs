//! Workout template form with its exercise list builder.

use thiserror::Error;

use crate::models::{Exercise, ExercisePayload, Workout, WorkoutPayload};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DraftError {
    #[error("Workout name is required")]
    MissingWorkoutName,
    #[error("Exercise name is required")]
    MissingName,
    #[error("Duration or repetitions are required")]
    MissingDuration,
    #[error("Add at least one exercise")]
    NoExercises,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkoutForm {
    pub name: String,
    pub kind: String,
    pub description: String,
    pub duration: String,
    pub place: String,
}

impl WorkoutForm {
    pub fn from_workout(workout: &Workout) -> Self {
        Self {
            name: workout.name.clone(),
            kind: workout.kind.clone(),
            description: workout.description.clone(),
            duration: workout.duration.clone(),
            place: workout.place.clone(),
        }
    }
}

/// Exercise inputs as typed; numbers are parsed on save.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExerciseForm {
    pub name: String,
    pub description: String,
    pub duration_reps: String,
    pub sets: String,
    pub calories: String,
    pub video_link: String,
}

impl ExerciseForm {
    fn from_exercise(ex: &Exercise) -> Self {
        Self {
            name: ex.name.clone(),
            description: ex.description.clone(),
            duration_reps: ex.duration_repeat.clone(),
            sets: ex.approach.to_string(),
            calories: ex.calories.to_string(),
            video_link: ex.demonstration_exercise.clone(),
        }
    }

    fn validate(&self) -> Result<(), DraftError> {
        if self.name.trim().is_empty() {
            return Err(DraftError::MissingName);
        }
        if self.duration_reps.trim().is_empty() {
            return Err(DraftError::MissingDuration);
        }
        Ok(())
    }

    fn to_exercise(&self, id: i64) -> Exercise {
        Exercise {
            id,
            name: self.name.trim().to_string(),
            description: self.description.clone(),
            duration_repeat: self.duration_reps.trim().to_string(),
            approach: parse_count(&self.sets),
            calories: parse_count(&self.calories),
            demonstration_exercise: self.video_link.trim().to_string(),
        }
    }
}

/// Integer field, 0 when blank or not a number.
fn parse_count(raw: &str) -> i64 {
    raw.trim().parse().unwrap_or(0)
}

/// Exercise list of the template being created or edited.
///
/// Exercises added here get negative ids so they never collide with ids
/// assigned by the server.
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseBuilder {
    pub exercises: Vec<Exercise>,
    pub editing: Option<i64>,
    next_local_id: i64,
}

impl Default for ExerciseBuilder {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl ExerciseBuilder {
    pub fn new(exercises: Vec<Exercise>) -> Self {
        Self {
            exercises,
            editing: None,
            next_local_id: -1,
        }
    }

    /// Add a new exercise, or replace the one being edited.
    pub fn save(&mut self, form: &ExerciseForm) -> Result<(), DraftError> {
        form.validate()?;
        match self.editing.take() {
            Some(id) => {
                if let Some(slot) = self.exercises.iter_mut().find(|ex| ex.id == id) {
                    *slot = form.to_exercise(id);
                }
            }
            None => {
                let id = self.next_local_id;
                self.next_local_id -= 1;
                self.exercises.push(form.to_exercise(id));
            }
        }
        Ok(())
    }

    /// Start editing exercise `id`, returning its values for the form.
    pub fn edit(&mut self, id: i64) -> Option<ExerciseForm> {
        let form = self
            .exercises
            .iter()
            .find(|ex| ex.id == id)
            .map(ExerciseForm::from_exercise)?;
        self.editing = Some(id);
        Some(form)
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Remove exercise `id`. Returns true when it was the one being edited,
    /// in which case the caller clears the exercise form.
    pub fn remove(&mut self, id: i64) -> bool {
        self.exercises.retain(|ex| ex.id != id);
        if self.editing == Some(id) {
            self.editing = None;
            return true;
        }
        false
    }

    pub fn can_submit(&self) -> bool {
        !self.exercises.is_empty()
    }

    pub fn to_payload(&self, form: &WorkoutForm) -> Result<WorkoutPayload, DraftError> {
        if form.name.trim().is_empty() {
            return Err(DraftError::MissingWorkoutName);
        }
        if !self.can_submit() {
            return Err(DraftError::NoExercises);
        }
        Ok(WorkoutPayload {
            name: form.name.trim().to_string(),
            kind: form.kind.clone(),
            place: form.place.clone(),
            duration: form.duration.clone(),
            description: form.description.clone(),
            exercises: self.exercises.iter().map(ExercisePayload::from).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plank() -> ExerciseForm {
        ExerciseForm {
            name: "Plank".into(),
            duration_reps: "60 s".into(),
            sets: "3".into(),
            calories: "abc".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_save_requires_name_and_duration() {
        let mut builder = ExerciseBuilder::default();
        let no_name = ExerciseForm { name: "  ".into(), ..plank() };
        assert_eq!(builder.save(&no_name), Err(DraftError::MissingName));
        let no_duration = ExerciseForm { duration_reps: String::new(), ..plank() };
        assert_eq!(builder.save(&no_duration), Err(DraftError::MissingDuration));
        assert!(builder.exercises.is_empty());
    }

    #[test]
    fn test_save_parses_counts() {
        let mut builder = ExerciseBuilder::default();
        builder.save(&plank()).unwrap();
        let ex = &builder.exercises[0];
        assert_eq!(ex.approach, 3);
        assert_eq!(ex.calories, 0);
        assert!(ex.id < 0);
    }

    #[test]
    fn test_local_ids_do_not_collide() {
        let existing = Exercise {
            id: 1,
            name: "Squat".into(),
            description: String::new(),
            duration_repeat: "10".into(),
            approach: 4,
            calories: 30,
            demonstration_exercise: String::new(),
        };
        let mut builder = ExerciseBuilder::new(vec![existing]);
        builder.save(&plank()).unwrap();
        builder.save(&plank()).unwrap();
        let mut ids: Vec<_> = builder.exercises.iter().map(|e| e.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn test_edit_replaces_in_place() {
        let mut builder = ExerciseBuilder::default();
        builder.save(&plank()).unwrap();
        let id = builder.exercises[0].id;

        let mut form = builder.edit(id).unwrap();
        assert_eq!(form.sets, "3");
        form.name = "Side plank".into();
        builder.save(&form).unwrap();

        assert_eq!(builder.exercises.len(), 1);
        assert_eq!(builder.exercises[0].name, "Side plank");
        assert_eq!(builder.editing, None);
    }

    #[test]
    fn test_remove_edited_exercise_resets_editing() {
        let mut builder = ExerciseBuilder::default();
        builder.save(&plank()).unwrap();
        builder.save(&plank()).unwrap();
        let first = builder.exercises[0].id;
        let second = builder.exercises[1].id;

        builder.edit(first);
        assert!(!builder.remove(second));
        assert_eq!(builder.editing, Some(first));
        assert!(builder.remove(first));
        assert_eq!(builder.editing, None);
        assert!(!builder.can_submit());
    }

    #[test]
    fn test_payload_requires_exercises() {
        let form = WorkoutForm { name: "Core".into(), ..Default::default() };
        let mut builder = ExerciseBuilder::default();
        assert_eq!(builder.to_payload(&form), Err(DraftError::NoExercises));

        builder.save(&plank()).unwrap();
        let payload = builder.to_payload(&form).unwrap();
        assert_eq!(payload.name, "Core");
        assert_eq!(payload.exercises.len(), 1);

        let unnamed = WorkoutForm::default();
        assert_eq!(builder.to_payload(&unnamed), Err(DraftError::MissingWorkoutName));
    }
}
