//! Progress aggregation over the data model.
//!
//! Everything here is a pure function of its input and is recomputed on
//! every read:
//! - Exercise status and set completion
//! - Workout completion (fully completed exercises over all exercises)
//! - Roster and history headline figures
//! - Elapsed time formatting

use crate::{Client, Exercise, ExerciseStatus, HistoryEntry, Workout};
use serde::Serialize;

/// A completed-out-of-total count
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

impl Progress {
    pub fn new(completed: usize, total: usize) -> Self {
        Self { completed, total }
    }

    /// Completion as a fraction in `0.0..=1.0`; an empty total counts as 0
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.completed as f64 / self.total as f64
        }
    }

    /// Completion percentage rounded to the nearest integer
    pub fn percent(&self) -> u32 {
        (self.fraction() * 100.0).round() as u32
    }

    /// True once everything is done; an empty total is never complete
    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.completed == self.total
    }
}

impl std::fmt::Display for Progress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.completed, self.total)
    }
}

/// Classify a completed-set count against the set total
///
/// An exercise with no sets has nothing left to do and counts as completed.
pub fn classify(completed_sets: usize, total_sets: usize) -> ExerciseStatus {
    if completed_sets >= total_sets {
        ExerciseStatus::Completed
    } else if completed_sets == 0 {
        ExerciseStatus::NotStarted
    } else {
        ExerciseStatus::InProgress
    }
}

impl Exercise {
    /// Completed sets out of all sets
    pub fn progress(&self) -> Progress {
        let completed = self.sets.iter().filter(|s| s.completed).count();
        Progress::new(completed, self.sets.len())
    }

    /// Status derived from the set list
    pub fn status(&self) -> ExerciseStatus {
        let progress = self.progress();
        classify(progress.completed, progress.total)
    }

    pub fn is_completed(&self) -> bool {
        self.sets.iter().all(|s| s.completed)
    }

    /// One-line plan summary from the first set, e.g. `3 × 10 @ 60kg`
    pub fn summary(&self, weight_unit: &str) -> ExerciseSummary {
        ExerciseSummary {
            set_count: self.sets.len(),
            reps: self.sets.first().map(|s| s.planned_reps),
            weight: self.sets.first().map(|s| s.planned_weight),
            unit: weight_unit.to_string(),
        }
    }
}

impl Workout {
    /// Fully completed exercises out of all exercises
    pub fn progress(&self) -> Progress {
        let completed = self.exercises.iter().filter(|e| e.is_completed()).count();
        Progress::new(completed, self.exercises.len())
    }

    pub fn all_exercises_completed(&self) -> bool {
        self.progress().is_complete()
    }
}

/// Plan summary shown on an exercise card
#[derive(Clone, Debug, PartialEq)]
pub struct ExerciseSummary {
    pub set_count: usize,
    pub reps: Option<u32>,
    pub weight: Option<f64>,
    pub unit: String,
}

impl std::fmt::Display for ExerciseSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.reps, self.weight) {
            (Some(reps), Some(weight)) => write!(
                f,
                "{} × {} @ {}{}",
                self.set_count,
                reps,
                format_weight(weight),
                self.unit
            ),
            _ => write!(f, "{} sets", self.set_count),
        }
    }
}

/// Render a weight without a trailing `.0` for whole numbers
pub fn format_weight(weight: f64) -> String {
    if weight.fract() == 0.0 {
        format!("{:.0}", weight)
    } else {
        format!("{}", weight)
    }
}

/// Format elapsed seconds as `m:ss`
pub fn format_elapsed(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

// ============================================================================
// Dashboard figures
// ============================================================================

/// Headline figures across a trainer's roster
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RosterSummary {
    pub active_clients: usize,
    pub total_workouts_completed: u32,
    /// Mean of client consistency percentages, rounded
    pub average_consistency: u32,
    /// Mean of client average efforts, one decimal
    pub average_effort: f64,
}

pub fn roster_summary(clients: &[Client]) -> RosterSummary {
    let count = clients.len();
    if count == 0 {
        return RosterSummary {
            active_clients: 0,
            total_workouts_completed: 0,
            average_consistency: 0,
            average_effort: 0.0,
        };
    }

    let consistency: u32 = clients.iter().map(|c| c.progress.consistency).sum();
    let effort: f64 = clients.iter().map(|c| c.progress.average_effort).sum();

    RosterSummary {
        active_clients: count,
        total_workouts_completed: clients.iter().map(|c| c.progress.workouts_completed).sum(),
        average_consistency: (consistency as f64 / count as f64).round() as u32,
        average_effort: round_one_decimal(effort / count as f64),
    }
}

/// Headline figures across the workout history
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HistorySummary {
    pub total_workouts: usize,
    pub total_minutes: u32,
    pub average_completion: u32,
    /// Mean effort over snapshotted exercises that recorded one
    pub average_effort: Option<f64>,
}

pub fn history_summary(history: &[HistoryEntry]) -> HistorySummary {
    let total_workouts = history.len();
    let average_completion = if total_workouts == 0 {
        0
    } else {
        let sum: u32 = history.iter().map(|h| h.completion().percent()).sum();
        (sum as f64 / total_workouts as f64).round() as u32
    };

    let efforts: Vec<f64> = history
        .iter()
        .filter_map(|h| h.workout.as_ref())
        .flat_map(|w| w.exercises.iter())
        .filter_map(|e| e.perceived_effort)
        .map(|e| f64::from(e.value()))
        .collect();
    let average_effort = if efforts.is_empty() {
        None
    } else {
        Some(round_one_decimal(
            efforts.iter().sum::<f64>() / efforts.len() as f64,
        ))
    };

    HistorySummary {
        total_workouts,
        total_minutes: history.iter().map(|h| h.duration_minutes).sum(),
        average_completion,
        average_effort,
    }
}

impl HistoryEntry {
    pub fn completion(&self) -> Progress {
        Progress::new(
            self.exercises_completed as usize,
            self.total_exercises as usize,
        )
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::{ExerciseId, PerceivedEffort, WorkoutSet};
    use chrono::NaiveDate;

    fn exercise(set_count: u32) -> Exercise {
        Exercise {
            id: ExerciseId(1),
            name: "Leg Extension".into(),
            category: "Legs".into(),
            muscle_groups: vec!["Quadriceps".into()],
            image: String::new(),
            sets: (1..=set_count)
                .map(|n| WorkoutSet::planned(n, 15, 40.0))
                .collect(),
            notes: String::new(),
            perceived_effort: None,
            time_spent: 0,
        }
    }

    fn complete_set(exercise: &mut Exercise, set_number: u32) {
        let set = exercise
            .sets
            .iter_mut()
            .find(|s| s.set_number == set_number)
            .unwrap();
        *set = set.logged(set.planned_reps, set.planned_weight);
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify(0, 3), ExerciseStatus::NotStarted);
        assert_eq!(classify(1, 3), ExerciseStatus::InProgress);
        assert_eq!(classify(3, 3), ExerciseStatus::Completed);
        assert_eq!(classify(0, 0), ExerciseStatus::Completed);
    }

    #[test]
    fn test_two_of_three_sets_in_progress() {
        let mut ex = exercise(3);
        complete_set(&mut ex, 1);
        complete_set(&mut ex, 2);

        assert_eq!(ex.status(), ExerciseStatus::InProgress);
        assert_eq!(ex.progress(), Progress::new(2, 3));
        assert!((ex.progress().fraction() - 2.0 / 3.0).abs() < f64::EPSILON);
        assert_eq!(ex.progress().percent(), 67);
    }

    #[test]
    fn test_status_matches_set_flags() {
        let mut ex = exercise(4);
        assert_eq!(ex.status(), ExerciseStatus::NotStarted);
        for n in 1..=4 {
            complete_set(&mut ex, n);
            let all = ex.sets.iter().all(|s| s.completed);
            let none = ex.sets.iter().all(|s| !s.completed);
            assert_eq!(ex.status() == ExerciseStatus::Completed, all);
            assert_eq!(ex.status() == ExerciseStatus::NotStarted, none);
        }
        assert_eq!(ex.status(), ExerciseStatus::Completed);
    }

    #[test]
    fn test_workout_percentage_monotonic() {
        let mut workout = fixtures::sample_workout(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        let mut last = workout.progress().percent();
        assert_eq!(last, 0);

        for idx in 0..workout.exercises.len() {
            let numbers: Vec<u32> = workout.exercises[idx]
                .sets
                .iter()
                .map(|s| s.set_number)
                .collect();
            for n in numbers {
                complete_set(&mut workout.exercises[idx], n);
                let now = workout.progress().percent();
                assert!(now >= last, "percentage dropped from {} to {}", last, now);
                last = now;
            }
        }
        assert_eq!(last, 100);
        assert!(workout.all_exercises_completed());
    }

    #[test]
    fn test_workout_percentage_rounds() {
        let mut workout = fixtures::sample_workout(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        for n in 1..=3 {
            complete_set(&mut workout.exercises[0], n);
        }
        assert_eq!(workout.progress(), Progress::new(1, 3));
        assert_eq!(workout.progress().percent(), 33);
    }

    #[test]
    fn test_empty_progress_is_zero() {
        let progress = Progress::new(0, 0);
        assert_eq!(progress.fraction(), 0.0);
        assert_eq!(progress.percent(), 0);
        assert!(!progress.is_complete());
    }

    #[test]
    fn test_workout_without_exercises_is_not_done() {
        let mut workout = fixtures::sample_workout(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        workout.exercises.clear();
        assert_eq!(workout.progress().percent(), 0);
        assert!(!workout.all_exercises_completed());
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(0), "0:00");
        assert_eq!(format_elapsed(65), "1:05");
        assert_eq!(format_elapsed(600), "10:00");
    }

    #[test]
    fn test_exercise_summary() {
        let ex = exercise(4);
        assert_eq!(ex.summary("kg").to_string(), "4 × 15 @ 40kg");

        let mut half = exercise(1);
        half.sets[0].planned_weight = 62.5;
        assert_eq!(half.summary("kg").to_string(), "1 × 15 @ 62.5kg");

        assert_eq!(exercise(0).summary("kg").to_string(), "0 sets");
    }

    #[test]
    fn test_roster_summary() {
        let summary = roster_summary(&fixtures::sample_clients());
        assert_eq!(summary.active_clients, 2);
        assert_eq!(summary.total_workouts_completed, 42);
        assert_eq!(summary.average_consistency, 89);
        assert!((summary.average_effort - 7.9).abs() < 1e-9);

        assert_eq!(roster_summary(&[]).active_clients, 0);
    }

    #[test]
    fn test_history_summary() {
        let mut history = fixtures::sample_history();
        let summary = history_summary(&history);
        assert_eq!(summary.total_workouts, 2);
        assert_eq!(summary.total_minutes, 95);
        assert_eq!(summary.average_completion, 100);
        assert_eq!(summary.average_effort, None);

        let mut workout = fixtures::sample_workout(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        workout.exercises[0].perceived_effort = Some(PerceivedEffort::new(8).unwrap());
        workout.exercises[1].perceived_effort = Some(PerceivedEffort::new(6).unwrap());
        history[0].workout = Some(workout);
        assert_eq!(history_summary(&history).average_effort, Some(7.0));
    }
}
