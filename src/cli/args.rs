use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "pomofocus")]
#[command(about = "A Pomodoro focus timer with task tracking for the terminal")]
#[command(long_about = "pomofocus - A Pomodoro focus timer

Alternate 25-minute focus sessions with short breaks, and take a long
break after every fourth session. Keep up to three tasks with pomodoro
estimates next to the timer.

QUICK START:
  pomofocus                       Open the timer
  pomofocus task add \"Write report\" -p 3
  pomofocus status                Today's count and tasks

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    #[arg(short, long, value_enum, default_value = "pretty", global = true)]
    pub output: OutputFormat,

    /// Directory holding config, database and logs
    ///
    /// Defaults to ~/.pomofocus
    #[arg(long, global = true, env = "POMOFOCUS_HOME")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the interactive timer (default)
    ///
    /// Keys: space start/pause, 1/2/3 pick session, s skip, a add task,
    /// d delete task, t toggle dark mode, ? help, q quit.
    Tui,

    /// Show today's focus count, settings and tasks
    Status,

    /// Manage tasks
    Task(TaskArgs),

    /// Set or toggle dark mode
    ///
    /// Examples:
    ///   pomofocus dark-mode on
    ///   pomofocus dark-mode        Toggle
    DarkMode {
        /// New state; toggles when omitted
        #[arg(value_enum)]
        state: Option<Toggle>,
    },

    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// On/off switch value.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Toggle {
    /// Enable.
    On,
    /// Disable.
    Off,
}

impl From<Toggle> for bool {
    fn from(toggle: Toggle) -> Self {
        toggle == Toggle::On
    }
}

#[derive(Args)]
pub struct TaskArgs {
    #[command(subcommand)]
    pub command: TaskCommands,
}

/// Task subcommands.
#[derive(Subcommand)]
pub enum TaskCommands {
    /// List tasks
    List,

    /// Add a task
    ///
    /// Examples:
    ///   pomofocus task add "Write report" --pomodoros 3
    Add {
        /// Task name
        name: String,

        /// Estimated pomodoros (1-10)
        #[arg(long, short = 'p', default_value_t = 1)]
        pomodoros: u8,
    },

    /// Delete a task by id (a unique prefix is enough)
    Delete {
        /// Task id or id prefix
        id: String,
    },
}
