//! Text rendering of the application's views.

use chrono::NaiveDate;
use coach_core::progress::{format_weight, history_summary, roster_summary};
use coach_core::*;

const BAR_WIDTH: usize = 20;

fn header(title: &str) {
    println!("\n╭─────────────────────────────────────────╮");
    println!("│  {}", title);
    println!("╰─────────────────────────────────────────╯");
}

fn progress_bar(progress: Progress) -> String {
    let filled = ((progress.fraction() * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH);
    format!(
        "[{}{}] {}%",
        "█".repeat(filled),
        "░".repeat(BAR_WIDTH - filled),
        progress.percent()
    )
}

fn status_marker(status: ExerciseStatus) -> &'static str {
    match status {
        ExerciseStatus::Completed => "✓",
        ExerciseStatus::InProgress => "~",
        ExerciseStatus::NotStarted => " ",
    }
}

fn long_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d").to_string()
}

fn short_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

pub fn overview(store: &WorkoutStore, unit: &str) {
    header("TODAY'S WORKOUT");

    let Some(workout) = store.current_workout() else {
        println!();
        println!("  No workout scheduled for today.");
        println!("  Check back later or ask your trainer.");
        return;
    };

    let progress = workout.progress();
    println!();
    println!("  {}", workout.name);
    println!("  {}", long_date(workout.date));
    println!("  {} exercises done  {}", progress, progress_bar(progress));
    println!();

    for exercise in &workout.exercises {
        let status = exercise.status();
        print!(
            "  [{}] {}. {} ({})  {}",
            status_marker(status),
            exercise.id,
            exercise.name,
            exercise.category,
            exercise.summary(unit)
        );
        if status == ExerciseStatus::InProgress {
            print!("  {} sets", exercise.progress());
        }
        println!();
        println!("        {}", exercise.muscle_groups.join(", "));
    }

    if workout.all_exercises_completed() {
        println!();
        println!("  All exercises done! Run `complete` to finish the workout.");
    }
}

pub fn exercise_detail(exercise: Option<&Exercise>, id: ExerciseId, stopwatch: Stopwatch, unit: &str) {
    let Some(exercise) = exercise else {
        header("EXERCISE");
        println!();
        println!("  Exercise {} is not part of the current workout.", id);
        return;
    };

    header(&format!("{} ({})", exercise.name, exercise.category));
    println!();
    println!(
        "  ⏱ {}  [{}]",
        stopwatch.display(),
        if stopwatch.is_running() { "running" } else { "paused" }
    );
    println!("  Muscles: {}", exercise.muscle_groups.join(", "));
    println!(
        "  Status:  {} ({} sets)",
        exercise.status().label(),
        exercise.progress()
    );
    println!();

    for set in &exercise.sets {
        print!(
            "  Set {}: {} reps @ {}{}  (target {} @ {}{})",
            set.set_number,
            set.display_reps(),
            format_weight(set.display_weight()),
            unit,
            set.planned_reps,
            format_weight(set.planned_weight),
            unit
        );
        if set.completed {
            print!("  ✓ Done");
        }
        println!();
    }

    println!();
    if let Some(effort) = exercise.perceived_effort {
        println!("  Perceived effort: {}/10", effort);
    }
    if !exercise.notes.is_empty() {
        println!("  Notes: {}", exercise.notes);
    }
    if exercise.time_spent > 0 {
        println!("  Time spent: {}", format_elapsed(exercise.time_spent));
    }
}

pub fn history(store: &WorkoutStore) {
    header("WORKOUT HISTORY");

    let summary = history_summary(store.history());
    println!();
    println!("  Total workouts: {}", summary.total_workouts);
    println!("  Total time:     {} min", summary.total_minutes);
    println!("  Avg. completion: {}%", summary.average_completion);
    if let Some(effort) = summary.average_effort {
        println!("  Avg. effort:    {}", effort);
    }
    println!();

    if store.history().is_empty() {
        println!("  No workouts recorded yet.");
        return;
    }

    for entry in store.history() {
        println!(
            "  {}  {}  {} min  {}  {}%",
            short_date(entry.date),
            entry.name,
            entry.duration_minutes,
            entry.completion(),
            entry.completion().percent()
        );
        if !entry.notes.is_empty() {
            println!("      {}", entry.notes);
        }
    }
}

pub fn trainer_dashboard(store: &WorkoutStore) {
    header("TRAINER DASHBOARD");

    let summary = roster_summary(store.clients());
    println!();
    println!("  Active clients: {}", summary.active_clients);
    println!("  Avg. progress:  {}%", summary.average_consistency);
    println!("  Avg. effort:    {}", summary.average_effort);
    println!();

    if store.clients().is_empty() {
        println!("  No clients yet. Use `add-client` to add one.");
    }
    for client in store.clients() {
        println!(
            "  {}. {} <{}>  {}  joined {}",
            client.id,
            client.name,
            client.email,
            client.current_program,
            client.join_date
        );
        println!(
            "      workouts {}  effort {}  consistency {}%",
            client.progress.workouts_completed,
            client.progress.average_effort,
            client.progress.consistency
        );
    }

    if !store.assigned_workouts().is_empty() {
        println!();
        println!("  Assigned workouts:");
        for workout in store.assigned_workouts() {
            println!(
                "    #{} {} for client {} on {} ({} exercises)",
                workout.id,
                workout.name,
                workout.client_id,
                workout.date,
                workout.exercises.len()
            );
        }
    }
}

pub fn profile(store: &WorkoutStore, role: Role) {
    header("PROFILE");
    println!();
    println!("  Viewing as: {}", role);

    let client = store
        .current_workout()
        .and_then(|w| store.client(w.client_id))
        .or_else(|| store.clients().first());
    match client {
        Some(client) => {
            println!("  Name:    {}", client.name);
            println!("  Email:   {}", client.email);
            println!("  Program: {}", client.current_program);
            println!("  Workouts completed: {}", client.progress.workouts_completed);
            println!("  Avg. effort:        {}", client.progress.average_effort);
        }
        None => println!("  No profile available."),
    }
}

pub fn nav_bar(role: Role, view: View) {
    let route = view.route();
    let items: Vec<String> = role
        .nav_items()
        .iter()
        .map(|item| {
            if item.route == route {
                format!("[{}]", item.label)
            } else {
                item.label.to_string()
            }
        })
        .collect();
    println!(
        "\n  {}  |  switch to {}",
        items.join("  "),
        role.toggle()
    );
}
