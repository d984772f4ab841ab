//! Core domain types for the coaching workout tracker.
//!
//! This module defines the fundamental types used throughout the system:
//! - Typed identifiers
//! - Sets, exercises and workouts
//! - Clients and their progress figures
//! - History entries and the input shapes used by store operations

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Identifiers
// ============================================================================

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }
    };
}

id_type!(
    /// Identifier of an exercise, unique within its workout
    ExerciseId
);
id_type!(
    /// Identifier of a workout
    WorkoutId
);
id_type!(
    /// Identifier of a client in the trainer's roster
    ClientId
);
id_type!(
    /// Identifier of a trainer
    TrainerId
);
id_type!(
    /// Identifier of a history entry
    HistoryId
);

// ============================================================================
// Perceived Effort
// ============================================================================

/// Subjective exertion rating, always within 1..=10
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(try_from = "u8", into = "u8")]
pub struct PerceivedEffort(u8);

impl PerceivedEffort {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    pub fn new(value: u8) -> crate::Result<Self> {
        Self::try_from(value)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for PerceivedEffort {
    type Error = crate::Error;

    fn try_from(value: u8) -> crate::Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(crate::Error::Validation(format!(
                "perceived effort must be between {} and {}, got {}",
                Self::MIN,
                Self::MAX,
                value
            )))
        }
    }
}

impl From<PerceivedEffort> for u8 {
    fn from(effort: PerceivedEffort) -> Self {
        effort.0
    }
}

impl fmt::Display for PerceivedEffort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Sets and Exercises
// ============================================================================

/// One planned repetition block with target and actual results
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WorkoutSet {
    pub set_number: u32,
    pub planned_reps: u32,
    pub planned_weight: f64,
    pub completed_reps: Option<u32>,
    pub completed_weight: Option<f64>,
    pub completed: bool,
}

impl WorkoutSet {
    /// A not-yet-performed set
    pub fn planned(set_number: u32, reps: u32, weight: f64) -> Self {
        Self {
            set_number,
            planned_reps: reps,
            planned_weight: weight,
            completed_reps: None,
            completed_weight: None,
            completed: false,
        }
    }

    /// This set with the given result recorded and marked completed
    pub fn logged(&self, reps: u32, weight: f64) -> Self {
        Self {
            completed_reps: Some(reps),
            completed_weight: Some(weight),
            completed: true,
            ..self.clone()
        }
    }

    /// Reps to show: the logged value, falling back to the plan
    pub fn display_reps(&self) -> u32 {
        self.completed_reps.unwrap_or(self.planned_reps)
    }

    /// Weight to show: the logged value, falling back to the plan
    pub fn display_weight(&self) -> f64 {
        self.completed_weight.unwrap_or(self.planned_weight)
    }

    /// Clear any recorded result
    pub fn reset(&mut self) {
        self.completed_reps = None;
        self.completed_weight = None;
        self.completed = false;
    }
}

/// Derived progress state of an exercise
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ExerciseStatus {
    /// No set completed yet
    #[default]
    #[serde(rename = "pending")]
    NotStarted,
    InProgress,
    Completed,
}

impl ExerciseStatus {
    pub fn label(self) -> &'static str {
        match self {
            ExerciseStatus::NotStarted => "Not started",
            ExerciseStatus::InProgress => "In progress",
            ExerciseStatus::Completed => "Completed",
        }
    }
}

/// A named movement with planned and completed sets
///
/// Status is not stored: it is derived from `sets` on every read (see
/// [`Exercise::status`]). The serialized form carries a computed `status`
/// field for JSON consumers, which is ignored when deserializing.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(into = "ExerciseRecord", from = "ExerciseRecord")]
pub struct Exercise {
    pub id: ExerciseId,
    pub name: String,
    pub category: String,
    pub muscle_groups: Vec<String>,
    pub image: String,
    pub sets: Vec<WorkoutSet>,
    pub notes: String,
    pub perceived_effort: Option<PerceivedEffort>,
    /// Seconds spent, as recorded from the exercise stopwatch
    pub time_spent: u64,
}

#[derive(Serialize, Deserialize)]
struct ExerciseRecord {
    id: ExerciseId,
    name: String,
    category: String,
    muscle_groups: Vec<String>,
    image: String,
    sets: Vec<WorkoutSet>,
    #[serde(default)]
    notes: String,
    perceived_effort: Option<PerceivedEffort>,
    #[serde(default)]
    time_spent: u64,
    #[serde(default)]
    status: ExerciseStatus,
}

impl From<Exercise> for ExerciseRecord {
    fn from(exercise: Exercise) -> Self {
        let status = exercise.status();
        ExerciseRecord {
            id: exercise.id,
            name: exercise.name,
            category: exercise.category,
            muscle_groups: exercise.muscle_groups,
            image: exercise.image,
            sets: exercise.sets,
            notes: exercise.notes,
            perceived_effort: exercise.perceived_effort,
            time_spent: exercise.time_spent,
            status,
        }
    }
}

impl From<ExerciseRecord> for Exercise {
    fn from(record: ExerciseRecord) -> Self {
        Exercise {
            id: record.id,
            name: record.name,
            category: record.category,
            muscle_groups: record.muscle_groups,
            image: record.image,
            sets: record.sets,
            notes: record.notes,
            perceived_effort: record.perceived_effort,
            time_spent: record.time_spent,
        }
    }
}

/// Partial update merged into an exercise by the store
///
/// Every `Some` field replaces the exercise's value; `None` leaves it alone.
#[derive(Clone, Debug, Default)]
pub struct ExercisePatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub muscle_groups: Option<Vec<String>>,
    pub image: Option<String>,
    pub sets: Option<Vec<WorkoutSet>>,
    pub notes: Option<String>,
    pub perceived_effort: Option<PerceivedEffort>,
    pub time_spent: Option<u64>,
}

impl ExercisePatch {
    /// Patch replacing the full set list with that of `exercise`
    pub fn sets_of(exercise: &Exercise) -> Self {
        Self {
            sets: Some(exercise.sets.clone()),
            ..Self::default()
        }
    }

    pub(crate) fn apply_to(self, exercise: &mut Exercise) {
        if let Some(name) = self.name {
            exercise.name = name;
        }
        if let Some(category) = self.category {
            exercise.category = category;
        }
        if let Some(muscle_groups) = self.muscle_groups {
            exercise.muscle_groups = muscle_groups;
        }
        if let Some(image) = self.image {
            exercise.image = image;
        }
        if let Some(sets) = self.sets {
            exercise.sets = sets;
        }
        if let Some(notes) = self.notes {
            exercise.notes = notes;
        }
        if let Some(effort) = self.perceived_effort {
            exercise.perceived_effort = Some(effort);
        }
        if let Some(time_spent) = self.time_spent {
            exercise.time_spent = time_spent;
        }
    }
}

// ============================================================================
// Workouts
// ============================================================================

/// A dated collection of exercises assigned to one client
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Workout {
    pub id: WorkoutId,
    pub date: NaiveDate,
    pub name: String,
    pub exercises: Vec<Exercise>,
    pub client_id: ClientId,
    pub trainer_id: TrainerId,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Workout {
    pub fn exercise(&self, id: ExerciseId) -> Option<&Exercise> {
        self.exercises.iter().find(|e| e.id == id)
    }

    pub fn exercise_mut(&mut self, id: ExerciseId) -> Option<&mut Exercise> {
        self.exercises.iter_mut().find(|e| e.id == id)
    }

    /// Total seconds recorded across all exercises
    pub fn time_spent(&self) -> u64 {
        self.exercises.iter().map(|e| e.time_spent).sum()
    }
}

/// Input for creating a workout on behalf of a client
#[derive(Clone, Debug)]
pub struct WorkoutDraft {
    pub name: String,
    pub date: NaiveDate,
    pub trainer_id: TrainerId,
    pub exercises: Vec<Exercise>,
}

// ============================================================================
// Clients
// ============================================================================

/// Aggregate progress figures shown on the trainer dashboard
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct ClientProgress {
    pub workouts_completed: u32,
    pub average_effort: f64,
    /// Percentage of scheduled sessions attended
    pub consistency: u32,
}

/// An end user whose workouts and progress a trainer manages
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Client {
    pub id: ClientId,
    pub name: String,
    pub email: String,
    pub join_date: NaiveDate,
    pub current_program: String,
    pub progress: ClientProgress,
}

/// Fields supplied when adding a client; the store assigns the id
#[derive(Clone, Debug, PartialEq)]
pub struct NewClient {
    pub name: String,
    pub email: String,
    pub join_date: NaiveDate,
    pub current_program: String,
    pub progress: ClientProgress,
}

// ============================================================================
// History
// ============================================================================

/// Summary of a past workout, newest first in the store's history list
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    pub id: HistoryId,
    pub date: NaiveDate,
    pub name: String,
    pub exercises_completed: u32,
    pub total_exercises: u32,
    pub duration_minutes: u32,
    pub notes: String,
    pub completed_at: Option<DateTime<Utc>>,
    /// Full snapshot, present when the entry was produced by completing a workout
    pub workout: Option<Workout>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise_with_sets(sets: Vec<WorkoutSet>) -> Exercise {
        Exercise {
            id: ExerciseId(1),
            name: "Barbell Squat".into(),
            category: "Legs".into(),
            muscle_groups: vec!["Quadriceps".into()],
            image: String::new(),
            sets,
            notes: String::new(),
            perceived_effort: None,
            time_spent: 0,
        }
    }

    #[test]
    fn test_perceived_effort_bounds() {
        assert!(PerceivedEffort::new(0).is_err());
        assert!(PerceivedEffort::new(11).is_err());
        assert_eq!(PerceivedEffort::new(1).unwrap().value(), 1);
        assert_eq!(PerceivedEffort::new(10).unwrap().value(), 10);
    }

    #[test]
    fn test_perceived_effort_rejected_when_deserializing() {
        let result: std::result::Result<PerceivedEffort, _> = serde_json::from_str("12");
        assert!(result.is_err());
        let ok: PerceivedEffort = serde_json::from_str("7").unwrap();
        assert_eq!(ok.value(), 7);
    }

    #[test]
    fn test_logged_set_keeps_plan() {
        let set = WorkoutSet::planned(2, 10, 60.0);
        let logged = set.logged(8, 62.5);
        assert_eq!(logged.set_number, 2);
        assert_eq!(logged.planned_reps, 10);
        assert_eq!(logged.completed_reps, Some(8));
        assert_eq!(logged.completed_weight, Some(62.5));
        assert!(logged.completed);
        assert_eq!(set.display_reps(), 10);
        assert_eq!(logged.display_weight(), 62.5);
    }

    #[test]
    fn test_exercise_json_carries_computed_status() {
        let exercise = exercise_with_sets(vec![
            WorkoutSet::planned(1, 10, 60.0).logged(10, 60.0),
            WorkoutSet::planned(2, 10, 60.0),
        ]);
        let json = serde_json::to_value(&exercise).unwrap();
        assert_eq!(json["status"], "in-progress");

        let pending = exercise_with_sets(vec![WorkoutSet::planned(1, 10, 60.0)]);
        let json = serde_json::to_value(&pending).unwrap();
        assert_eq!(json["status"], "pending");
    }

    #[test]
    fn test_stale_status_in_json_is_ignored() {
        let mut json = serde_json::to_value(exercise_with_sets(vec![WorkoutSet::planned(
            1, 10, 60.0,
        )]))
        .unwrap();
        json["status"] = "completed".into();

        let parsed: Exercise = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.status(), ExerciseStatus::NotStarted);
    }

    #[test]
    fn test_patch_merges_only_present_fields() {
        let mut exercise = exercise_with_sets(vec![WorkoutSet::planned(1, 10, 60.0)]);
        let patch = ExercisePatch {
            notes: Some("felt strong".into()),
            time_spent: Some(90),
            ..ExercisePatch::default()
        };
        patch.apply_to(&mut exercise);

        assert_eq!(exercise.notes, "felt strong");
        assert_eq!(exercise.time_spent, 90);
        assert_eq!(exercise.name, "Barbell Squat");
        assert_eq!(exercise.sets.len(), 1);
    }
}
