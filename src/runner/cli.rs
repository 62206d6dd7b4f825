//! Command-line definition and the one-shot subcommands.

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::app::{DeleteOutcome, Explorer};
use crate::fs_op::FsOpError;
use crate::ui::format::{render_listing, search_line};
use crate::ui::Theme;

/// Interactive, menu-driven file manager.
///
/// Without a subcommand an interactive session starts in `--dir` (or the
/// current directory). Subcommands run a single operation and exit.
#[derive(Parser, Debug)]
#[command(name = "filetrek", version, about)]
pub struct Cli {
    /// Directory to start in.
    #[arg(long, short = 'd', global = true, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Color theme: default, dark or light.
    #[arg(long, global = true, value_name = "NAME")]
    pub theme: Option<Theme>,

    /// Settings file to use instead of the one in the config directory.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log at debug level.
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List a directory, directories first.
    Ls {
        /// Directory to list, relative to --dir.
        path: Option<String>,
        /// Detailed listing with permissions, owner, size and mtime.
        #[arg(long, short = 'l')]
        long: bool,
        /// Include hidden entries.
        #[arg(long, short = 'a')]
        all: bool,
    },
    /// Recursively search file names below --dir.
    Search {
        term: String,
        /// Treat TERM as a regular expression instead of a substring.
        #[arg(long)]
        regex: bool,
    },
    /// Copy a file or directory tree. Never overwrites.
    Cp { src: String, dst: String },
    /// Move a file or directory, across filesystems if needed.
    Mv { src: String, dst: String },
    /// Delete a file, link or directory.
    Rm {
        path: String,
        /// Delete a non-empty directory with all of its contents.
        #[arg(long, short = 'r')]
        recursive: bool,
    },
    /// Create a directory.
    Mkdir { path: String },
    /// Change permission bits using octal notation.
    Chmod { mode: String, path: String },
}

/// Run one subcommand against `ex`, printing results to `out`.
pub fn execute(cmd: &Command, ex: &mut Explorer, out: &mut dyn Write) -> anyhow::Result<()> {
    match cmd {
        Command::Ls { path, long, all } => {
            if let Some(path) = path {
                ex.change_dir(path)?;
            }
            ex.settings.show_hidden |= *all;
            let entries = ex.list()?;
            writeln!(out, "{}", render_listing(ex.cwd(), &entries, *long, &ex.theme.palette()))?;
        }
        Command::Search { term, regex } => {
            let hits = if *regex { ex.search_regex(term)? } else { ex.search(term) };
            for hit in &hits {
                writeln!(out, "{}", search_line(hit))?;
            }
        }
        Command::Cp { src, dst } => {
            let target = ex.copy(src, dst)?;
            writeln!(out, "{}", target.display())?;
        }
        Command::Mv { src, dst } => {
            let target = ex.move_item(src, dst)?;
            writeln!(out, "{}", target.display())?;
        }
        Command::Rm { path, recursive } => match ex.delete(path)? {
            DeleteOutcome::Deleted { path, .. } => writeln!(out, "removed {}", path.display())?,
            DeleteOutcome::NeedsConfirmation(path) if *recursive => {
                let path = ex.delete_recursive(&path)?;
                writeln!(out, "removed {}", path.display())?;
            }
            DeleteOutcome::NeedsConfirmation(path) => return Err(FsOpError::DirectoryNotEmpty(path).into()),
        },
        Command::Mkdir { path } => {
            let path = ex.create_dir(path)?;
            writeln!(out, "{}", path.display())?;
        }
        Command::Chmod { mode, path } => {
            let applied = ex.chmod(path, mode)?;
            writeln!(out, "{applied:o} {}", path.trim())?;
        }
    }
    Ok(())
}
