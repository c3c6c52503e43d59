//! Terminal UI helpers for task display.
//!
//! This module uses println! for CLI output, which is appropriate
//! for terminal user interfaces.

#![allow(clippy::disallowed_macros)]

use colored::Colorize;
use comfy_table::{Cell, Color, ContentArrangement, Table};

use crate::entities::{StatusFilter, Task};

const SHORT_ID_LEN: usize = 8;

/// Get colored completion string
pub fn completion_colored(task: &Task) -> String {
    if task.is_completed {
        "done".green().to_string()
    } else {
        "open".yellow().to_string()
    }
}

/// First characters of the id, enough to tell rows apart
pub fn short_id(task: &Task) -> String {
    task.id.simple().to_string()[..SHORT_ID_LEN].to_string()
}

/// Create a table for displaying tasks
pub fn task_table(tasks: &[Task]) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    // Header
    table.set_header(vec![
        Cell::new("ID").fg(Color::Cyan),
        Cell::new("Title").fg(Color::Cyan),
        Cell::new("Description").fg(Color::Cyan),
        Cell::new("Completed").fg(Color::Cyan),
        Cell::new("Created").fg(Color::Cyan),
    ]);

    for task in tasks {
        let completed_color = if task.is_completed {
            Color::Green
        } else {
            Color::Yellow
        };

        table.add_row(vec![
            Cell::new(short_id(task)).fg(Color::DarkGrey),
            Cell::new(&task.title),
            Cell::new(task.description_text()),
            Cell::new(task.completed_label()).fg(completed_color),
            Cell::new(task.created_at.format("%Y-%m-%d %H:%M").to_string()),
        ]);
    }

    table
}

/// One-line summary under the table
pub fn list_summary(shown: usize, total: usize, filter: StatusFilter) -> String {
    if filter == StatusFilter::All {
        format!("{total} task(s) total")
    } else {
        format!("{shown} of {total} task(s) shown ({filter})")
    }
}

/// Display task details in a formatted way
pub fn display_task_details(task: &Task) {
    println!("{}", "═".repeat(60).dimmed());
    println!(
        "{} {} {}",
        "Task".cyan().bold(),
        task.id.to_string().cyan().bold(),
        format!("[{}]", completion_colored(task))
    );
    println!("{}", "═".repeat(60).dimmed());
    println!();

    println!("{}: {}", "Title".bold(), task.title);
    println!("{}: {}", "Completed".bold(), task.completed_label());
    println!(
        "{}: {}",
        "Created".bold(),
        task.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    );

    if let Some(description) = &task.description {
        println!();
        println!("{}", "Description".bold().underline());
        println!("{description}");
    }

    println!();
}

/// Print success message
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

/// Print error message
pub fn print_error(message: &str) {
    println!("{} {}", "✗".red().bold(), message);
}

/// Print info message
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

/// Print warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow().bold(), message);
}
