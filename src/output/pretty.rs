use colored::Colorize;

use crate::core::Snapshot;
use crate::features::focus::SessionType;
use crate::features::tasks::Task;

/// Format a task list as a pretty table
pub fn format_tasks_pretty(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return "Tasks (0 items)\n  No tasks".to_string();
    }

    let mut output = format!("Tasks ({} items)\n", tasks.len());
    output.push_str(&"─".repeat(50));
    output.push('\n');

    for task in tasks {
        output.push_str(&format_task_line(task));
        output.push('\n');
    }

    output
}

/// Format a single task as one line
pub fn format_task_line(task: &Task) -> String {
    let estimate = format!(
        "{} pomodoro{}",
        task.pomodoros_needed,
        if task.pomodoros_needed == 1 { "" } else { "s" }
    );

    format!(
        "{}  {}  {}",
        task.short_id().dimmed(),
        task.name.bold(),
        estimate.yellow()
    )
}

/// Format the timer state
pub fn format_status_pretty(snapshot: &Snapshot) -> String {
    let session = match snapshot.session_type {
        SessionType::Focus => snapshot.session_type.display_name().red(),
        SessionType::ShortBreak => snapshot.session_type.display_name().blue(),
        SessionType::LongBreak => snapshot.session_type.display_name().green(),
    };

    let mut output = Vec::new();
    output.push(format!("{session}  {}", snapshot.formatted_time.bold()));
    output.push("─".repeat(40));
    output.push(format!(
        "Today's Pomodoros: {}",
        snapshot.daily_count.to_string().bold()
    ));
    output.push(format!(
        "Dark mode:         {}",
        if snapshot.dark_mode_enabled { "on" } else { "off" }
    ));
    output.push(String::new());
    output.push(format_tasks_pretty(&snapshot.tasks));

    output.join("\n")
}
