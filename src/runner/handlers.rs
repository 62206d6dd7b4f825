//! Menu actions, split by area. Each handler prompts for what it needs,
//! runs one session operation and prints the outcome.
//!
//! Filesystem failures are returned as errors wrapping [`FsOpError`];
//! the menu loop prints those and keeps going.

pub mod browse;
pub mod extras;
pub mod files;
pub mod permissions;

use std::io::Write;

use crate::app::Explorer;
use crate::runner::prompt::Prompter;
use crate::ui::theme::{success_style, warning_style};
use crate::ui::MenuChoice;

pub(crate) type Out<'a> = &'a mut dyn Write;

/// Run the action behind a menu choice. `Exit` is handled by the caller.
pub fn handle_choice(ex: &mut Explorer, choice: MenuChoice, p: &mut dyn Prompter, out: Out) -> anyhow::Result<()> {
    match choice {
        MenuChoice::Exit => Ok(()),
        MenuChoice::List => browse::list(ex, false, out),
        MenuChoice::ListDetailed => browse::list(ex, true, out),
        MenuChoice::ChangeDir => browse::change_dir(ex, p, out),
        MenuChoice::Parent => browse::parent(ex, out),
        MenuChoice::Search => browse::search(ex, p, out),
        MenuChoice::CurrentPath => browse::current_path(ex, out),
        MenuChoice::Recent => browse::recent(ex, out),
        MenuChoice::Help => browse::help(out),
        MenuChoice::Theme => browse::theme(ex, p, out),
        MenuChoice::CreateFile => files::create_file(ex, p, out),
        MenuChoice::CreateDir => files::create_dir(ex, p, out),
        MenuChoice::Delete => files::delete(ex, p, out),
        MenuChoice::Copy => files::copy(ex, p, out),
        MenuChoice::Move => files::move_item(ex, p, out),
        MenuChoice::Rename => files::rename(ex, p, out),
        MenuChoice::ViewPermissions => permissions::view(ex, p, out),
        MenuChoice::Chmod => permissions::chmod(ex, p, out),
        MenuChoice::Chown => permissions::chown(ex, p, out),
        MenuChoice::Batch => extras::batch(ex, p, out),
        MenuChoice::Zip => extras::zip(ex, p, out),
        MenuChoice::Unzip => extras::unzip(ex, p, out),
    }
}

pub(crate) fn success(out: Out, msg: impl std::fmt::Display) -> anyhow::Result<()> {
    writeln!(out, "{}", success_style().apply_to(msg))?;
    Ok(())
}

pub(crate) fn warning(out: Out, msg: impl std::fmt::Display) -> anyhow::Result<()> {
    writeln!(out, "{}", warning_style().apply_to(msg))?;
    Ok(())
}

pub(crate) fn cancelled(out: Out) -> anyhow::Result<()> {
    warning(out, "Operation cancelled.")
}
