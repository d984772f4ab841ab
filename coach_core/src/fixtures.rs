//! Built-in sample data used to seed a new store.
//!
//! This module provides the sample exercises, workout, history and client
//! roster the application starts with.

use crate::types::*;
use chrono::NaiveDate;
use once_cell::sync::Lazy;

/// Cached sample exercises - built once and cloned into each new workout
static SAMPLE_EXERCISES: Lazy<Vec<Exercise>> = Lazy::new(build_sample_exercises);

/// Get a reference to the cached sample exercises
pub fn sample_exercises() -> &'static [Exercise] {
    &SAMPLE_EXERCISES
}

fn build_sample_exercises() -> Vec<Exercise> {
    vec![
        exercise(
            1,
            "Barbell Squat",
            "Legs",
            &["Quadriceps", "Glutes", "Hamstrings"],
            "https://images.unsplash.com/photo-1571019613454-1cb2f99b2d8b?w=400&h=300&fit=crop",
            3,
            10,
            60.0,
        ),
        exercise(
            2,
            "Dumbbell Shoulder Press",
            "Shoulders",
            &["Deltoids", "Triceps"],
            "https://images.unsplash.com/photo-1581009146145-b5ef050c2e1e?w=400&h=300&fit=crop",
            3,
            12,
            15.0,
        ),
        exercise(
            3,
            "Leg Extension",
            "Legs",
            &["Quadriceps"],
            "https://images.unsplash.com/photo-1434682881908-b43d0467b798?w=400&h=300&fit=crop",
            4,
            15,
            40.0,
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn exercise(
    id: u64,
    name: &str,
    category: &str,
    muscle_groups: &[&str],
    image: &str,
    set_count: u32,
    reps: u32,
    weight: f64,
) -> Exercise {
    Exercise {
        id: ExerciseId(id),
        name: name.into(),
        category: category.into(),
        muscle_groups: muscle_groups.iter().map(|m| m.to_string()).collect(),
        image: image.into(),
        sets: (1..=set_count)
            .map(|n| WorkoutSet::planned(n, reps, weight))
            .collect(),
        notes: String::new(),
        perceived_effort: None,
        time_spent: 0,
    }
}

/// The sample workout for client 1, dated `date`
pub fn sample_workout(date: NaiveDate) -> Workout {
    Workout {
        id: WorkoutId(1),
        date,
        name: "Upper Body Strength".into(),
        exercises: sample_exercises().to_vec(),
        client_id: ClientId(1),
        trainer_id: TrainerId(1),
        completed: false,
        completed_at: None,
    }
}

/// Past workout summaries, newest first
pub fn sample_history() -> Vec<HistoryEntry> {
    vec![
        HistoryEntry {
            id: HistoryId(1),
            date: ymd(2024, 1, 15),
            name: "Upper Body Strength".into(),
            exercises_completed: 3,
            total_exercises: 3,
            duration_minutes: 45,
            notes: "Great session, felt strong".into(),
            completed_at: None,
            workout: None,
        },
        HistoryEntry {
            id: HistoryId(2),
            date: ymd(2024, 1, 12),
            name: "Lower Body Power".into(),
            exercises_completed: 4,
            total_exercises: 4,
            duration_minutes: 50,
            notes: "Legs were tired but pushed through".into(),
            completed_at: None,
            workout: None,
        },
    ]
}

/// The sample trainer roster
pub fn sample_clients() -> Vec<Client> {
    vec![
        Client {
            id: ClientId(1),
            name: "John Doe".into(),
            email: "john@example.com".into(),
            join_date: ymd(2024, 1, 1),
            current_program: "Strength Building".into(),
            progress: ClientProgress {
                workouts_completed: 24,
                average_effort: 7.5,
                consistency: 85,
            },
        },
        Client {
            id: ClientId(2),
            name: "Jane Smith".into(),
            email: "jane@example.com".into(),
            join_date: ymd(2024, 1, 15),
            current_program: "Weight Loss".into(),
            progress: ClientProgress {
                workouts_completed: 18,
                average_effort: 8.2,
                consistency: 92,
            },
        },
    ]
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}
