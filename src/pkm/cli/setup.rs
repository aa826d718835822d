use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pkm", bin_name = "pkm", version)]
#[command(about = "Capture notes and tasks now, organize them later", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding data.json and config.json (default: $PKM_DATA_DIR or ~/.pkm)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, help_heading = "Options")]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Quick capture into the inbox or straight into a course
    #[command(subcommand, alias = "a")]
    Add(AddCommands),

    /// Show filtered views of notes and tasks
    #[command(subcommand, alias = "v")]
    View(ViewCommands),

    /// Organize, tag or delete a note
    #[command(subcommand)]
    Note(NoteCommands),

    /// Complete, schedule or break down a task
    #[command(subcommand)]
    Task(TaskCommands),

    /// Get or set configuration
    Config {
        /// Configuration key (e.g. default-priority)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },

    /// Initialize the data directory
    Init,
}

#[derive(Subcommand, Debug)]
pub enum AddCommands {
    /// Capture a note
    #[command(alias = "n")]
    Note {
        /// Note text
        content: String,

        /// File under a course instead of the inbox
        #[arg(short, long)]
        course: Option<String>,

        /// Topic tag (repeatable)
        #[arg(short, long = "topic", value_name = "TOPIC")]
        topics: Vec<String>,
    },

    /// Capture a task
    #[command(alias = "t")]
    Task {
        /// Task title
        title: String,

        /// Due date: today, tomorrow, YYYY-MM-DD or "YYYY-MM-DD HH:MM"
        #[arg(short, long)]
        due: Option<String>,

        /// high, medium or low (default from config)
        #[arg(short, long)]
        priority: Option<String>,

        /// File under a course instead of the inbox
        #[arg(short, long)]
        course: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ViewCommands {
    /// Unorganized notes and tasks
    Inbox,
    /// Open tasks due today
    Today,
    /// Open tasks due in the coming week
    Week,
    /// Open tasks past their due date
    Overdue,
    /// Everything filed under a course
    Course { name: String },
    /// Notes tagged with a topic
    Topic { name: String },
    /// A single note
    Note { id: String },
    /// A single task with its subtasks
    Task { id: String },
}

#[derive(Subcommand, Debug)]
pub enum NoteCommands {
    /// Move a note into a course
    Organize { id: String, course: String },

    /// Add topics to a note
    Tag {
        id: String,
        #[arg(required = true, num_args = 1..)]
        topics: Vec<String>,
    },

    /// Delete a note
    #[command(alias = "rm")]
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum TaskCommands {
    /// Mark a task completed
    #[command(alias = "done")]
    Complete { id: String },

    /// Append a subtask
    AddSubtask { id: String, title: String },

    /// Mark a subtask completed
    CheckSubtask {
        id: String,
        /// Subtask number as shown by `view task`
        subtask: u32,
    },

    /// Set the due date, or `none` to clear it
    Due { id: String, when: String },

    /// Move a task into a course
    Organize { id: String, course: String },

    /// Link a note to a task
    Link { task_id: String, note_id: String },
}
