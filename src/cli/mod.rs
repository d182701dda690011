//! CLI 模块

pub mod tasks;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::model::{Filter, TaskId};

#[derive(Parser)]
#[command(name = "taskpad")]
#[command(version)]
#[command(about = "A small terminal to-do list")]
pub struct Cli {
    /// Data directory (defaults to ~/.taskpad)
    #[arg(long, global = true, value_name = "PATH")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Open the interactive task list (default)
    Tui,
    /// Print tasks
    List {
        /// Which tasks to show: all, active or completed
        #[arg(short, long, default_value_t = Filter::All)]
        filter: Filter,
    },
    /// Add a task
    Add {
        /// Task text
        text: String,
        /// Due date (YYYY-MM-DD)
        #[arg(short, long, default_value = "")]
        date: String,
    },
    /// Mark a task done, or undone again
    Toggle {
        /// Task id (see `taskpad list`)
        id: TaskId,
    },
    /// Delete a task
    Delete {
        /// Task id (see `taskpad list`)
        id: TaskId,
    },
}
