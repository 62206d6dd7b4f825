use super::{cancelled, success, Out};
use crate::app::{DeleteOutcome, Explorer};
use crate::fs_op::EntryKind;
use crate::runner::prompt::Prompter;

pub fn create_file(ex: &mut Explorer, p: &mut dyn Prompter, out: Out) -> anyhow::Result<()> {
    let name = p.input("Enter filename to create")?;
    let path = ex.create_file(&name)?;
    success(out, format!("File created successfully: {}", path.display()))
}

pub fn create_dir(ex: &mut Explorer, p: &mut dyn Prompter, out: Out) -> anyhow::Result<()> {
    let name = p.input("Enter directory name to create")?;
    let path = ex.create_dir(&name)?;
    success(out, format!("Directory created successfully: {}", path.display()))
}

pub fn delete(ex: &mut Explorer, p: &mut dyn Prompter, out: Out) -> anyhow::Result<()> {
    let name = p.input("Enter file/directory name to delete")?;
    if !p.confirm("Are you sure?")? {
        return cancelled(out);
    }
    delete_confirmed(ex, &name, p, out)
}

/// Delete `name`, asking once more before removing a populated directory.
pub(crate) fn delete_confirmed(ex: &mut Explorer, name: &str, p: &mut dyn Prompter, out: Out) -> anyhow::Result<()> {
    match ex.delete(name)? {
        DeleteOutcome::Deleted { path, kind } => {
            let what = if kind == EntryKind::Directory { "Directory" } else { "File" };
            success(out, format!("{what} deleted successfully: {}", path.display()))
        }
        DeleteOutcome::NeedsConfirmation(path) => {
            let prompt = format!("{} is not empty. Delete recursively?", path.display());
            if !p.confirm(&prompt)? {
                return cancelled(out);
            }
            let path = ex.delete_recursive(&path)?;
            success(out, format!("Directory and all contents deleted successfully: {}", path.display()))
        }
    }
}

pub fn copy(ex: &mut Explorer, p: &mut dyn Prompter, out: Out) -> anyhow::Result<()> {
    let src = p.input("Enter source file/directory name")?;
    let dst = p.input("Enter destination path")?;
    writeln!(out, "Copying {src} to {dst}...")?;
    let target = ex.copy(&src, &dst)?;
    success(out, format!("Copied successfully to {}", target.display()))
}

pub fn move_item(ex: &mut Explorer, p: &mut dyn Prompter, out: Out) -> anyhow::Result<()> {
    let src = p.input("Enter source file/directory name")?;
    let dst = p.input("Enter destination path")?;
    writeln!(out, "Moving {src} to {dst}...")?;
    let target = ex.move_item(&src, &dst)?;
    success(out, format!("Moved successfully to {}", target.display()))
}

pub fn rename(ex: &mut Explorer, p: &mut dyn Prompter, out: Out) -> anyhow::Result<()> {
    let old = p.input("Enter current name")?;
    let new = p.input("Enter new name")?;
    let renamed = ex.rename(&old, &new)?;
    success(out, format!("Renamed '{}' to '{}'", old.trim(), renamed.display()))
}
