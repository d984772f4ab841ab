//! In-memory workout state store.
//!
//! The store is the single source of truth for the current workout, the
//! trainer's client roster, workouts assigned to clients and the workout
//! history. It is constructed explicitly and handed to whoever renders it;
//! nothing here is global.
//!
//! Every fallible operation leaves the store untouched when it returns an
//! error.

use crate::{
    Client, ClientId, Error, Exercise, ExerciseId, ExercisePatch, HistoryEntry, HistoryId,
    NewClient, PerceivedEffort, Result, Workout, WorkoutDraft, WorkoutId, WorkoutSet,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

#[derive(Clone, Debug, Default, Serialize)]
pub struct WorkoutStore {
    current: Option<Workout>,
    history: Vec<HistoryEntry>,
    clients: Vec<Client>,
    assigned: Vec<Workout>,
    #[serde(skip)]
    last_client_id: u64,
    #[serde(skip)]
    last_workout_id: u64,
    #[serde(skip)]
    last_history_id: u64,
}

impl WorkoutStore {
    /// An empty store: no workout, no clients, no history
    pub fn new() -> Self {
        Self::default()
    }

    /// A store seeded with the built-in sample data; the current workout is dated `today`
    pub fn with_sample_data(today: NaiveDate) -> Self {
        let current = crate::fixtures::sample_workout(today);
        let history = crate::fixtures::sample_history();
        let clients = crate::fixtures::sample_clients();

        let store = Self {
            last_client_id: clients.iter().map(|c| c.id.0).max().unwrap_or(0),
            last_workout_id: current.id.0,
            last_history_id: history.iter().map(|h| h.id.0).max().unwrap_or(0),
            current: Some(current),
            history,
            clients,
            assigned: Vec::new(),
        };

        tracing::debug!(
            "Seeded store with {} clients and {} history entries",
            store.clients.len(),
            store.history.len()
        );
        store
    }

    // ------------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------------

    pub fn current_workout(&self) -> Option<&Workout> {
        self.current.as_ref()
    }

    /// Look up an exercise in the current workout
    pub fn exercise(&self, id: ExerciseId) -> Option<&Exercise> {
        self.current.as_ref().and_then(|w| w.exercise(id))
    }

    /// Workout history, newest first
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    pub fn client(&self, id: ClientId) -> Option<&Client> {
        self.clients.iter().find(|c| c.id == id)
    }

    /// Workouts created for clients and not yet started, oldest first
    pub fn assigned_workouts(&self) -> &[Workout] {
        &self.assigned
    }

    // ------------------------------------------------------------------------
    // Exercise and set mutation
    // ------------------------------------------------------------------------

    /// Merge `patch` into the matching exercise of the current workout
    pub fn update_exercise(&mut self, id: ExerciseId, patch: ExercisePatch) -> Result<&Exercise> {
        let workout = self.current.as_mut().ok_or_else(|| {
            tracing::warn!("Ignoring update for exercise {}: no current workout", id);
            Error::NoCurrentWorkout
        })?;

        let exercise = workout.exercise_mut(id).ok_or_else(|| {
            tracing::warn!("Ignoring update for unknown exercise {}", id);
            Error::ExerciseNotFound(id)
        })?;

        patch.apply_to(exercise);
        tracing::debug!(
            "Updated exercise {} ({}), status now {:?}",
            exercise.id,
            exercise.name,
            exercise.status()
        );
        Ok(&*exercise)
    }

    /// Record a set result: the set is stamped completed with the given reps and weight
    pub fn log_set(
        &mut self,
        exercise_id: ExerciseId,
        set_number: u32,
        reps: u32,
        weight: f64,
    ) -> Result<&Exercise> {
        if !weight.is_finite() || weight < 0.0 {
            return Err(Error::Validation(format!(
                "weight must be a non-negative number, got {}",
                weight
            )));
        }

        let exercise = self
            .exercise(exercise_id)
            .ok_or_else(|| self.missing_exercise(exercise_id))?;
        let set = exercise
            .sets
            .iter()
            .find(|s| s.set_number == set_number)
            .ok_or(Error::SetNotFound {
                exercise: exercise_id,
                set_number,
            })?;

        let updated = update_set(exercise, set.logged(reps, weight))?;
        tracing::info!(
            "Logged set {} of {}: {} reps @ {}",
            set_number,
            updated.name,
            reps,
            weight
        );
        self.update_exercise(exercise_id, ExercisePatch::sets_of(&updated))
    }

    /// Save notes, effort and time spent for an exercise
    ///
    /// `notes: None` keeps whatever notes the exercise already has.
    pub fn save_exercise_notes(
        &mut self,
        exercise_id: ExerciseId,
        notes: Option<String>,
        effort: PerceivedEffort,
        time_spent: u64,
    ) -> Result<&Exercise> {
        self.update_exercise(
            exercise_id,
            ExercisePatch {
                notes,
                perceived_effort: Some(effort),
                time_spent: Some(time_spent),
                ..ExercisePatch::default()
            },
        )
    }

    fn missing_exercise(&self, id: ExerciseId) -> Error {
        if self.current.is_none() {
            Error::NoCurrentWorkout
        } else {
            Error::ExerciseNotFound(id)
        }
    }

    // ------------------------------------------------------------------------
    // Workout lifecycle
    // ------------------------------------------------------------------------

    /// Stamp the current workout completed and move a snapshot into history
    ///
    /// Completion is user-asserted: unfinished exercises do not block it.
    /// Returns `None` without touching history when there is no current workout.
    pub fn complete_workout(&mut self, now: DateTime<Utc>) -> Option<&HistoryEntry> {
        let Some(mut workout) = self.current.take() else {
            tracing::warn!("complete_workout called with no current workout");
            return None;
        };

        workout.completed = true;
        workout.completed_at = Some(now);

        let progress = workout.progress();
        self.last_history_id += 1;
        let entry = HistoryEntry {
            id: HistoryId(self.last_history_id),
            date: workout.date,
            name: workout.name.clone(),
            exercises_completed: progress.completed as u32,
            total_exercises: progress.total as u32,
            duration_minutes: seconds_to_minutes(workout.time_spent()),
            notes: collect_notes(&workout),
            completed_at: Some(now),
            workout: Some(workout),
        };

        tracing::info!(
            "Completed workout \"{}\" ({} exercises finished)",
            entry.name,
            progress
        );

        self.history.insert(0, entry);
        self.history.first()
    }

    /// Create a workout owned by `client_id` and queue it for that client
    pub fn create_workout_for_client(
        &mut self,
        client_id: ClientId,
        draft: WorkoutDraft,
    ) -> Result<WorkoutId> {
        if self.client(client_id).is_none() {
            tracing::warn!("Cannot create workout: client {} not found", client_id);
            return Err(Error::ClientNotFound(client_id));
        }
        if draft.name.trim().is_empty() {
            return Err(Error::Validation("workout name must not be empty".into()));
        }
        if draft.exercises.is_empty() {
            return Err(Error::Validation("workout needs at least one exercise".into()));
        }

        let exercises = draft
            .exercises
            .into_iter()
            .enumerate()
            .map(|(idx, mut exercise)| {
                exercise.id = ExerciseId(idx as u64 + 1);
                exercise.sets.iter_mut().for_each(WorkoutSet::reset);
                exercise.perceived_effort = None;
                exercise.time_spent = 0;
                exercise
            })
            .collect();

        self.last_workout_id += 1;
        let id = WorkoutId(self.last_workout_id);
        let workout = Workout {
            id,
            date: draft.date,
            name: draft.name.trim().to_string(),
            exercises,
            client_id,
            trainer_id: draft.trainer_id,
            completed: false,
            completed_at: None,
        };

        tracing::info!(
            "Assigned workout {} \"{}\" to client {} for {}",
            id,
            workout.name,
            client_id,
            workout.date
        );
        self.assigned.push(workout);
        Ok(id)
    }

    /// Move the oldest workout assigned to `client_id` into the current slot
    pub fn start_assigned_workout(&mut self, client_id: ClientId) -> Result<&Workout> {
        if self.current.is_some() {
            return Err(Error::WorkoutInProgress);
        }
        let idx = self
            .assigned
            .iter()
            .position(|w| w.client_id == client_id)
            .ok_or(Error::NoAssignedWorkout(client_id))?;

        let workout = self.assigned.remove(idx);
        tracing::info!("Started workout {} \"{}\"", workout.id, workout.name);
        Ok(&*self.current.insert(workout))
    }

    // ------------------------------------------------------------------------
    // Roster
    // ------------------------------------------------------------------------

    /// Add a client to the roster with a freshly issued id
    pub fn add_client(&mut self, client: NewClient) -> &Client {
        self.last_client_id += 1;
        let client = Client {
            id: ClientId(self.last_client_id),
            name: client.name,
            email: client.email,
            join_date: client.join_date,
            current_program: client.current_program,
            progress: client.progress,
        };
        tracing::info!("Added client {} ({})", client.id, client.name);
        self.clients.push(client);
        self.clients.last().expect("client was just pushed")
    }
}

/// Return `exercise` with the set of matching number replaced by `updated`
///
/// Status needs no bookkeeping here since it is derived from the sets.
/// The caller persists the result through [`WorkoutStore::update_exercise`].
pub fn update_set(exercise: &Exercise, updated: WorkoutSet) -> Result<Exercise> {
    let idx = exercise
        .sets
        .iter()
        .position(|s| s.set_number == updated.set_number)
        .ok_or(Error::SetNotFound {
            exercise: exercise.id,
            set_number: updated.set_number,
        })?;

    let mut next = exercise.clone();
    next.sets[idx] = updated;
    Ok(next)
}

fn seconds_to_minutes(seconds: u64) -> u32 {
    ((seconds + 30) / 60) as u32
}

fn collect_notes(workout: &Workout) -> String {
    workout
        .exercises
        .iter()
        .filter(|e| !e.notes.trim().is_empty())
        .map(|e| format!("{}: {}", e.name, e.notes.trim()))
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ClientProgress, ExerciseStatus, TrainerId};
    use chrono::TimeZone;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()
    }

    fn seeded() -> WorkoutStore {
        crate::logging::init_test();
        WorkoutStore::with_sample_data(today())
    }

    fn new_client(name: &str, email: &str) -> NewClient {
        NewClient {
            name: name.into(),
            email: email.into(),
            join_date: today(),
            current_program: "Mobility".into(),
            progress: ClientProgress::default(),
        }
    }

    fn draft(name: &str) -> WorkoutDraft {
        WorkoutDraft {
            name: name.into(),
            date: NaiveDate::from_ymd_opt(2024, 2, 3).unwrap(),
            trainer_id: TrainerId(1),
            exercises: crate::fixtures::sample_exercises()[..2].to_vec(),
        }
    }

    #[test]
    fn test_seeded_store() {
        let store = seeded();
        let workout = store.current_workout().unwrap();
        assert_eq!(workout.name, "Upper Body Strength");
        assert_eq!(workout.date, today());
        assert_eq!(store.clients().len(), 2);
        assert_eq!(store.history().len(), 2);
        assert!(store.assigned_workouts().is_empty());
    }

    #[test]
    fn test_update_exercise_merges_fields() {
        let mut store = seeded();
        let updated = store
            .update_exercise(
                ExerciseId(2),
                ExercisePatch {
                    notes: Some("elbows in".into()),
                    ..ExercisePatch::default()
                },
            )
            .unwrap();
        assert_eq!(updated.notes, "elbows in");
        assert_eq!(updated.name, "Dumbbell Shoulder Press");
        assert_eq!(store.exercise(ExerciseId(2)).unwrap().notes, "elbows in");
    }

    #[test]
    fn test_update_unknown_exercise_is_not_found() {
        let mut store = seeded();
        let before = store.current_workout().cloned();
        let err = store
            .update_exercise(ExerciseId(99), ExercisePatch::default())
            .unwrap_err();
        assert!(matches!(err, Error::ExerciseNotFound(ExerciseId(99))));
        assert_eq!(store.current_workout().cloned(), before);
    }

    #[test]
    fn test_update_without_current_workout() {
        let mut store = WorkoutStore::new();
        let err = store
            .update_exercise(ExerciseId(1), ExercisePatch::default())
            .unwrap_err();
        assert!(matches!(err, Error::NoCurrentWorkout));
    }

    #[test]
    fn test_update_set_replaces_matching_number() {
        let store = seeded();
        let exercise = store.exercise(ExerciseId(1)).unwrap();
        let logged = exercise.sets[1].logged(9, 57.5);

        let next = update_set(exercise, logged.clone()).unwrap();
        assert_eq!(next.sets[1], logged);
        assert!(!next.sets[0].completed);
        assert_eq!(next.status(), ExerciseStatus::InProgress);
        // the input is untouched until the caller persists the result
        assert_eq!(exercise.status(), ExerciseStatus::NotStarted);
    }

    #[test]
    fn test_update_set_unknown_number() {
        let store = seeded();
        let exercise = store.exercise(ExerciseId(1)).unwrap();
        let err = update_set(exercise, WorkoutSet::planned(7, 1, 1.0)).unwrap_err();
        assert!(matches!(err, Error::SetNotFound { set_number: 7, .. }));
    }

    #[test]
    fn test_log_set_drives_status() {
        let mut store = seeded();
        store.log_set(ExerciseId(1), 1, 10, 60.0).unwrap();
        store.log_set(ExerciseId(1), 2, 8, 60.0).unwrap();

        let ex = store.exercise(ExerciseId(1)).unwrap();
        assert_eq!(ex.status(), ExerciseStatus::InProgress);
        assert_eq!(ex.sets[1].completed_reps, Some(8));

        store.log_set(ExerciseId(1), 3, 10, 60.0).unwrap();
        assert_eq!(
            store.exercise(ExerciseId(1)).unwrap().status(),
            ExerciseStatus::Completed
        );
        assert_eq!(store.current_workout().unwrap().progress().completed, 1);
    }

    #[test]
    fn test_log_set_rejects_bad_input() {
        let mut store = seeded();
        assert!(matches!(
            store.log_set(ExerciseId(1), 1, 10, -5.0),
            Err(Error::Validation(_))
        ));
        assert!(matches!(
            store.log_set(ExerciseId(1), 9, 10, 60.0),
            Err(Error::SetNotFound { .. })
        ));
        assert!(matches!(
            store.log_set(ExerciseId(42), 1, 10, 60.0),
            Err(Error::ExerciseNotFound(_))
        ));
        assert_eq!(
            store.exercise(ExerciseId(1)).unwrap().status(),
            ExerciseStatus::NotStarted
        );
    }

    #[test]
    fn test_save_exercise_notes() {
        let mut store = seeded();
        let effort = PerceivedEffort::new(8).unwrap();
        store
            .save_exercise_notes(ExerciseId(3), Some("burned".into()), effort, 125)
            .unwrap();
        let ex = store.exercise(ExerciseId(3)).unwrap();
        assert_eq!(ex.notes, "burned");
        assert_eq!(ex.perceived_effort, Some(effort));
        assert_eq!(ex.time_spent, 125);
    }

    #[test]
    fn test_save_effort_only_keeps_notes() {
        let mut store = seeded();
        store
            .save_exercise_notes(ExerciseId(3), Some("burned".into()), PerceivedEffort::new(8).unwrap(), 60)
            .unwrap();
        let ex = store
            .save_exercise_notes(ExerciseId(3), None, PerceivedEffort::new(9).unwrap(), 90)
            .unwrap();
        assert_eq!(ex.notes, "burned");
        assert_eq!(ex.perceived_effort.map(|e| e.value()), Some(9));
        assert_eq!(ex.time_spent, 90);
    }

    #[test]
    fn test_complete_workout_moves_to_history() {
        let mut store = seeded();
        store.log_set(ExerciseId(2), 1, 12, 15.0).unwrap();
        store
            .save_exercise_notes(ExerciseId(2), Some("easy".into()), PerceivedEffort::new(4).unwrap(), 150)
            .unwrap();
        let now = Utc.with_ymd_and_hms(2024, 2, 1, 18, 30, 0).unwrap();

        let entry = store.complete_workout(now).unwrap().clone();
        assert_eq!(entry.name, "Upper Body Strength");
        assert_eq!(entry.total_exercises, 3);
        assert_eq!(entry.exercises_completed, 0);
        assert_eq!(entry.duration_minutes, 3);
        assert_eq!(entry.notes, "Dumbbell Shoulder Press: easy");
        assert_eq!(entry.completed_at, Some(now));
        assert_eq!(entry.id, HistoryId(3));

        let snapshot = entry.workout.unwrap();
        assert!(snapshot.completed);
        assert_eq!(snapshot.completed_at, Some(now));

        assert!(store.current_workout().is_none());
        assert_eq!(store.history().len(), 3);
        assert_eq!(store.history()[0].id, HistoryId(3));
    }

    #[test]
    fn test_complete_workout_twice_inserts_once() {
        let mut store = seeded();
        assert!(store.complete_workout(Utc::now()).is_some());
        assert!(store.complete_workout(Utc::now()).is_none());
        assert_eq!(store.history().len(), 3);
        assert!(store.current_workout().is_none());
    }

    #[test]
    fn test_add_client_assigns_unique_id() {
        let mut store = seeded();
        let existing: Vec<ClientId> = store.clients().iter().map(|c| c.id).collect();

        let added = store.add_client(new_client("A", "a@x.com")).clone();
        assert!(!existing.contains(&added.id));
        assert_eq!(added.name, "A");
        assert_eq!(added.email, "a@x.com");
        assert_eq!(added.current_program, "Mobility");

        let roster = store.clients();
        assert_eq!(roster.len(), existing.len() + 1);
        assert_eq!(roster.iter().filter(|c| c.id == added.id).count(), 1);

        let second = store.add_client(new_client("B", "b@x.com")).id;
        assert!(second > added.id);
    }

    #[test]
    fn test_add_client_to_empty_store() {
        let mut store = WorkoutStore::new();
        assert_eq!(store.add_client(new_client("A", "a@x.com")).id, ClientId(1));
    }

    #[test]
    fn test_create_workout_for_client() {
        let mut store = seeded();
        let mut d = draft("  Pull Day ");
        d.exercises[0].sets[0].completed = true;
        d.exercises[1].id = ExerciseId(1);

        let id = store.create_workout_for_client(ClientId(2), d).unwrap();
        assert_eq!(id, WorkoutId(2));

        let assigned = &store.assigned_workouts()[0];
        assert_eq!(assigned.client_id, ClientId(2));
        assert_eq!(assigned.name, "Pull Day");
        assert_eq!(assigned.exercises[0].id, ExerciseId(1));
        assert_eq!(assigned.exercises[1].id, ExerciseId(2));
        assert!(assigned.exercises.iter().all(|e| e.status() == ExerciseStatus::NotStarted));
        // the current workout is not displaced
        assert_eq!(store.current_workout().unwrap().id, WorkoutId(1));
    }

    #[test]
    fn test_create_workout_validation() {
        let mut store = seeded();
        assert!(matches!(
            store.create_workout_for_client(ClientId(9), draft("Legs")),
            Err(Error::ClientNotFound(ClientId(9)))
        ));
        assert!(matches!(
            store.create_workout_for_client(ClientId(1), draft("   ")),
            Err(Error::Validation(_))
        ));
        let mut empty = draft("Rest");
        empty.exercises.clear();
        assert!(matches!(
            store.create_workout_for_client(ClientId(1), empty),
            Err(Error::Validation(_))
        ));
        assert!(store.assigned_workouts().is_empty());
    }

    #[test]
    fn test_start_assigned_workout() {
        let mut store = seeded();
        let first = store.create_workout_for_client(ClientId(2), draft("Day A")).unwrap();
        store.create_workout_for_client(ClientId(2), draft("Day B")).unwrap();

        assert!(matches!(
            store.start_assigned_workout(ClientId(2)),
            Err(Error::WorkoutInProgress)
        ));

        store.complete_workout(Utc::now());
        assert!(matches!(
            store.start_assigned_workout(ClientId(1)),
            Err(Error::NoAssignedWorkout(ClientId(1)))
        ));

        let started = store.start_assigned_workout(ClientId(2)).unwrap();
        assert_eq!(started.id, first);
        assert_eq!(store.assigned_workouts().len(), 1);
        assert_eq!(store.assigned_workouts()[0].name, "Day B");
    }
}
