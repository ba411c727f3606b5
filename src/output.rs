//! Output formatting for human and JSON modes
//!
//! Every CLI result implements [`Render`], so it can be printed either as
//! human-readable text or machine-parseable JSON.

use colored::Colorize;
use serde::Serialize;

use crate::core::models::{Board, Priority, Task, TaskStatus};
use crate::core::services::progress::round_for_display;
use crate::core::services::{Inconsistency, IntegrityReport, UsageStats};
use crate::service::{BoardDetail, RepairOutcome};

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

/// Something the CLI can print
pub trait Render: Serialize {
    /// Print for a terminal
    fn render_human(&self);

    /// Render the result based on output mode
    fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => {
                println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
            },
        }
    }
}

/// Boards in display order
#[derive(Debug, Serialize)]
pub struct BoardList {
    /// Boards, ascending by ordering key
    pub boards: Vec<Board>,
}

/// Tasks of one column
#[derive(Debug, Serialize)]
pub struct TaskList {
    /// Column status
    pub status: TaskStatus,
    /// Tasks, ascending by ordering key
    pub tasks: Vec<Task>,
}

/// Outcome of repairing one or more boards
#[derive(Debug, Serialize)]
pub struct RepairSummary {
    /// One entry per board
    pub boards: Vec<RepairOutcome>,
}

/// Generic operation result for simple commands
#[derive(Debug, Serialize)]
pub struct OperationResult {
    /// Whether the operation succeeded
    pub success: bool,
    /// Human-readable message
    pub message: String,
}

fn priority_label(priority: Priority) -> String {
    let text = priority.to_string();
    match priority {
        Priority::Urgent => text.red().bold().to_string(),
        Priority::High => text.yellow().to_string(),
        Priority::Medium => text.cyan().to_string(),
        Priority::Low => text.dimmed().to_string(),
    }
}

fn board_line(board: &Board) {
    let sets = board.sets();
    println!(
        "  {:<22} {:>6.2}%  {:<8} {} open / {} done  {}",
        board.title.bold(),
        round_for_display(board.progress()),
        priority_label(board.priority),
        sets.open().len(),
        sets.completed().len(),
        board.id.to_string().dimmed()
    );
}

fn task_line(task: &Task) {
    let due = task
        .due_date
        .map(|d| format!(" due {}", d.format("%Y-%m-%d")))
        .unwrap_or_default();
    println!(
        "    {:<8} {:<22} {}{}",
        task.label.as_str().cyan(),
        task.title,
        priority_label(task.priority),
        due.dimmed()
    );
}

impl Render for Board {
    fn render_human(&self) {
        println!("{} {}", "Board:".green().bold(), self.title);
        println!("  ID:          {}", self.id);
        println!("  Description: {}", self.description);
        println!("  Priority:    {}", priority_label(self.priority));
        println!("  Progress:    {:.2}%", round_for_display(self.progress()));
    }
}

impl Render for BoardList {
    fn render_human(&self) {
        if self.boards.is_empty() {
            println!("No boards yet. Create one with: sprintboard board create <title> -d <description>");
            return;
        }
        println!("Boards:\n");
        for board in &self.boards {
            board_line(board);
        }
    }
}

impl Render for BoardDetail {
    fn render_human(&self) {
        board_line(&self.board);
        for column in &self.columns {
            println!("\n  {} ({})", column.status.heading().bold(), column.tasks.len());
            for task in &column.tasks {
                task_line(task);
            }
        }
    }
}

impl Render for Task {
    fn render_human(&self) {
        println!("{} {}", self.label.as_str().cyan().bold(), self.title);
        println!("  ID:          {}", self.id);
        println!("  Board:       {}", self.board_id);
        println!("  Status:      {}", self.status().heading());
        println!("  Priority:    {}", priority_label(self.priority));
        println!("  Description: {}", self.description);
        if let Some(start) = self.start_date {
            println!("  Start:       {}", start.format("%Y-%m-%d"));
        }
        if let Some(due) = self.due_date {
            println!("  Due:         {}", due.format("%Y-%m-%d"));
        }
    }
}

impl Render for TaskList {
    fn render_human(&self) {
        println!("{} ({})", self.status.heading().bold(), self.tasks.len());
        for task in &self.tasks {
            task_line(task);
        }
    }
}

impl Render for UsageStats {
    fn render_human(&self) {
        println!("{}", "Usage".bold());
        println!("  Boards: {}", self.total_boards);
        println!("  Tasks:  {}\n", self.total_tasks);

        println!("  {:<16} {}", "To do", self.by_status.todo);
        println!("  {:<16} {}", "In progress", self.by_status.in_progress);
        println!("  {:<16} {}", "Done", self.by_status.done);
        println!("  {:<16} {}\n", "Saved for later", self.by_status.saved_for_later);

        println!("  {:<16} {:>5} {:>8} {:>5}", "Priority", "Total", "Pending", "Done");
        for row in &self.by_priority {
            println!(
                "  {:<16} {:>5} {:>8} {:>5}",
                row.priority.to_string(),
                row.total,
                row.pending,
                row.done
            );
        }
    }
}

fn describe(issue: &Inconsistency) -> String {
    match issue {
        Inconsistency::Missing { task_id, status } => {
            format!("task {task_id} ({status}) is in neither set")
        },
        Inconsistency::Duplicated { task_id } => format!("task {task_id} is in both sets"),
        Inconsistency::WrongSet { task_id, status } => {
            format!("task {task_id} ({status}) is in the wrong set")
        },
        Inconsistency::Orphaned { task_id } => format!("set entry {task_id} has no task"),
        Inconsistency::StaleProgress { stored, expected } => {
            format!("progress is {stored:.2}, expected {expected:.2}")
        },
    }
}

impl Render for IntegrityReport {
    fn render_human(&self) {
        if self.is_consistent() {
            println!("{} Board {} is consistent", "OK".green().bold(), self.board_id);
            return;
        }
        println!("{} Board {} has {} issue(s):", "Warning:".yellow().bold(), self.board_id, self.issues.len());
        for issue in &self.issues {
            println!("  - {}", describe(issue));
        }
    }
}

impl Render for RepairSummary {
    fn render_human(&self) {
        if self.boards.is_empty() {
            println!("No boards to repair.");
            return;
        }
        for outcome in &self.boards {
            if outcome.repaired() {
                println!(
                    "{} {} ({} issue(s) fixed, progress {:.2}%)",
                    "Repaired".yellow().bold(),
                    outcome.board.title,
                    outcome.report.issues.len(),
                    round_for_display(outcome.board.progress())
                );
                for issue in &outcome.report.issues {
                    println!("  - {}", describe(issue));
                }
            } else {
                println!("{} {}", "OK".green().bold(), outcome.board.title);
            }
        }
    }
}

impl Render for OperationResult {
    fn render_human(&self) {
        println!("{}", self.message);
    }
}
