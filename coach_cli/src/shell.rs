//! Interactive shell: one line of input is one UI event.
//!
//! Each command is parsed with clap, applied to the store synchronously, and
//! the affected view is re-rendered. An open exercise view owns a running
//! [`StopwatchTask`], which is stopped as soon as the view is left.

use crate::screens;
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use coach_core::*;
use std::io::{self, BufRead, Write};

#[derive(Parser)]
#[command(no_binary_name = true, disable_version_flag = true)]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand)]
enum ShellCommand {
    /// Show today's workout
    #[command(alias = "today")]
    Overview,

    /// Open an exercise by id
    Open { id: u64 },

    /// Leave the current view for the role's home view
    Back,

    /// Log a result for a set of the open exercise (defaults to the plan)
    Log {
        set: u32,
        reps: Option<u32>,
        weight: Option<f64>,
    },

    /// Start or pause the exercise stopwatch
    Timer,

    /// Save notes, effort and elapsed time for the open exercise
    Notes {
        /// Perceived effort, 1-10
        #[arg(long, short)]
        effort: Option<u8>,

        #[arg(trailing_var_arg = true)]
        text: Vec<String>,
    },

    /// Finish the current workout and move it to history
    Complete,

    /// Show workout history
    History,

    /// Show the trainer dashboard
    Clients,

    /// Show the profile view
    Profile,

    /// Add a client to the roster
    AddClient {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "General Fitness")]
        program: String,
        /// Join date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        joined: Option<NaiveDate>,
    },

    /// Create a workout for a client from sample exercises
    Assign {
        client: u64,
        #[arg(long)]
        name: String,
        /// Workout date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Sample exercise id to include (repeatable), defaults to all
        #[arg(long = "exercise")]
        exercises: Vec<u64>,
    },

    /// Start the next workout assigned to a client
    Start { client: u64 },

    /// Switch role presentation, or toggle when none is given
    Role { role: Option<Role> },

    /// Show navigation items for the current role
    Nav,

    /// Go to a route such as /history or /exercise/2
    Go { route: String },

    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
}

struct ExerciseView {
    id: ExerciseId,
    stopwatch: Option<StopwatchTask>,
}

pub struct Session {
    store: WorkoutStore,
    config: Config,
    role: Role,
    view: View,
    detail: Option<ExerciseView>,
    today: NaiveDate,
}

enum Flow {
    Continue,
    Quit,
}

impl Session {
    pub fn new(store: WorkoutStore, config: Config, role: Role, today: NaiveDate) -> Self {
        Self {
            store,
            config,
            role,
            view: role.home(),
            detail: None,
            today,
        }
    }

    /// Read commands from `input` until EOF or `quit`
    pub fn run(&mut self, input: impl BufRead) -> Result<()> {
        self.render();
        prompt()?;

        for line in input.lines() {
            let line = line?;
            let words: Vec<&str> = line.split_whitespace().collect();
            if words.is_empty() {
                prompt()?;
                continue;
            }

            match ShellLine::try_parse_from(words) {
                Ok(parsed) => match self.dispatch(parsed.command) {
                    Ok(Flow::Quit) => break,
                    Ok(Flow::Continue) => {}
                    Err(e) => {
                        tracing::debug!("Command failed: {}", e);
                        println!("  ! {}", e);
                    }
                },
                // help requests and usage errors are rendered by clap
                Err(e) => println!("{}", e.render()),
            }
            prompt()?;
        }

        self.leave_exercise();
        println!("\nBye.");
        Ok(())
    }

    fn dispatch(&mut self, command: ShellCommand) -> Result<Flow> {
        match command {
            ShellCommand::Overview => self.navigate(View::Overview),
            ShellCommand::Open { id } => self.navigate(View::ExerciseDetail(ExerciseId(id))),
            ShellCommand::Back => self.navigate(self.role.home()),
            ShellCommand::History => self.navigate(View::History),
            ShellCommand::Clients => self.navigate(View::TrainerDashboard),
            ShellCommand::Profile => self.navigate(View::Profile),
            ShellCommand::Go { route } => {
                let view = View::from_route(&route)
                    .ok_or_else(|| Error::Validation(format!("unknown route: {}", route)))?;
                self.navigate(view);
            }

            ShellCommand::Log { set, reps, weight } => self.log(set, reps, weight)?,
            ShellCommand::Timer => self.toggle_timer()?,
            ShellCommand::Notes { effort, text } => {
                let notes = (!text.is_empty()).then(|| text.join(" "));
                self.save_notes(effort, notes)?
            }

            ShellCommand::Complete => self.complete(),
            ShellCommand::AddClient {
                name,
                email,
                program,
                joined,
            } => {
                let client = self.store.add_client(NewClient {
                    name,
                    email,
                    join_date: joined.unwrap_or(self.today),
                    current_program: program,
                    progress: ClientProgress::default(),
                });
                println!("  ✓ Added client {} ({})", client.id, client.name);
            }
            ShellCommand::Assign {
                client,
                name,
                date,
                exercises,
            } => self.assign(ClientId(client), name, date, exercises)?,
            ShellCommand::Start { client } => {
                let workout = self.store.start_assigned_workout(ClientId(client))?;
                println!("  ✓ Started \"{}\"", workout.name);
                self.navigate(View::Overview);
            }

            ShellCommand::Role { role } => {
                self.role = role.unwrap_or_else(|| self.role.toggle());
                tracing::info!("Switched to {} view", self.role);
                self.navigate(self.role.home());
            }
            ShellCommand::Nav => screens::nav_bar(self.role, self.view),
            ShellCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn navigate(&mut self, view: View) {
        if self.view != view {
            self.leave_exercise();
        }
        if let View::ExerciseDetail(id) = view {
            if self.detail.is_none() {
                self.enter_exercise(id);
            }
        }
        self.view = view;
        self.render();
    }

    fn enter_exercise(&mut self, id: ExerciseId) {
        let stopwatch = self
            .store
            .exercise(id)
            .map(|_| StopwatchTask::spawn(self.config.tick_interval()));
        if stopwatch.is_none() {
            tracing::warn!("Exercise {} not found in the current workout", id);
        }
        self.detail = Some(ExerciseView { id, stopwatch });
    }

    /// Tear down the open exercise view and its stopwatch
    fn leave_exercise(&mut self) {
        if let Some(mut detail) = self.detail.take() {
            if let Some(task) = detail.stopwatch.as_mut() {
                let final_state = task.stop();
                tracing::debug!(
                    "Left exercise {} with stopwatch at {}",
                    detail.id,
                    final_state.display()
                );
            }
        }
    }

    fn open_exercise(&self) -> Result<&ExerciseView> {
        self.detail
            .as_ref()
            .ok_or_else(|| Error::Validation("open an exercise first (`open <id>`)".into()))
    }

    fn log(&mut self, set: u32, reps: Option<u32>, weight: Option<f64>) -> Result<()> {
        let id = self.open_exercise()?.id;
        let planned = self
            .store
            .exercise(id)
            .ok_or(Error::ExerciseNotFound(id))?
            .sets
            .iter()
            .find(|s| s.set_number == set)
            .ok_or(Error::SetNotFound {
                exercise: id,
                set_number: set,
            })?;
        let reps = reps.unwrap_or_else(|| planned.display_reps());
        let weight = weight.unwrap_or_else(|| planned.display_weight());

        self.store.log_set(id, set, reps, weight)?;
        self.render();
        Ok(())
    }

    fn toggle_timer(&mut self) -> Result<()> {
        let detail = self.open_exercise()?;
        let task = detail
            .stopwatch
            .as_ref()
            .ok_or(Error::ExerciseNotFound(detail.id))?;
        let running = task.toggle();
        println!(
            "  ⏱ {} {}",
            task.snapshot().display(),
            if running { "started" } else { "paused" }
        );
        Ok(())
    }

    /// Without note text only the effort and elapsed time change
    fn save_notes(&mut self, effort: Option<u8>, notes: Option<String>) -> Result<()> {
        let detail = self.open_exercise()?;
        let id = detail.id;
        let elapsed = detail
            .stopwatch
            .as_ref()
            .map(|t| t.snapshot().elapsed_secs())
            .unwrap_or(0);
        let effort = match effort {
            Some(value) => PerceivedEffort::new(value)?,
            None => self
                .store
                .exercise(id)
                .and_then(|e| e.perceived_effort)
                .map(Ok)
                .unwrap_or_else(|| self.config.default_effort())?,
        };

        self.store.save_exercise_notes(id, notes, effort, elapsed)?;
        println!("  ✓ Notes saved");
        self.render();
        Ok(())
    }

    fn complete(&mut self) {
        let unfinished = self
            .store
            .current_workout()
            .map(|w| !w.all_exercises_completed())
            .unwrap_or(false);

        match self.store.complete_workout(Utc::now()) {
            Some(entry) => {
                println!(
                    "  ✓ Workout \"{}\" completed ({} exercises)",
                    entry.name,
                    entry.completion()
                );
                if unfinished {
                    println!("    Some exercises were left unfinished.");
                }
                self.navigate(View::Overview);
            }
            None => println!("  Nothing to complete: no workout in progress."),
        }
    }

    fn assign(
        &mut self,
        client: ClientId,
        name: String,
        date: Option<NaiveDate>,
        exercise_ids: Vec<u64>,
    ) -> Result<()> {
        let catalog = coach_core::fixtures::sample_exercises();
        let exercises = if exercise_ids.is_empty() {
            catalog.to_vec()
        } else {
            exercise_ids
                .iter()
                .map(|id| {
                    catalog
                        .iter()
                        .find(|e| e.id.0 == *id)
                        .cloned()
                        .ok_or_else(|| Error::Validation(format!("no sample exercise {}", id)))
                })
                .collect::<Result<Vec<_>>>()?
        };

        let trainer_id = self
            .store
            .current_workout()
            .map(|w| w.trainer_id)
            .unwrap_or(TrainerId(1));
        let id = self.store.create_workout_for_client(
            client,
            WorkoutDraft {
                name,
                date: date.unwrap_or(self.today),
                trainer_id,
                exercises,
            },
        )?;
        println!("  ✓ Created workout #{} for client {}", id, client);
        Ok(())
    }

    fn render(&self) {
        let unit = self.config.display.weight_unit.as_str();
        match self.view {
            View::Overview => screens::overview(&self.store, unit),
            View::ExerciseDetail(id) => {
                let stopwatch = self
                    .detail
                    .as_ref()
                    .and_then(|d| d.stopwatch.as_ref())
                    .map(|t| t.snapshot())
                    .unwrap_or_default();
                screens::exercise_detail(self.store.exercise(id), id, stopwatch, unit)
            }
            View::History => screens::history(&self.store),
            View::TrainerDashboard => screens::trainer_dashboard(&self.store),
            View::Profile => screens::profile(&self.store, self.role),
        }
    }
}

fn prompt() -> Result<()> {
    print!("> ");
    io::stdout().flush()?;
    Ok(())
}
