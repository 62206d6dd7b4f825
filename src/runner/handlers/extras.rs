use super::files::delete_confirmed;
use super::{cancelled, success, warning, Out};
use crate::app::{BatchItem, BatchKind, Explorer};
use crate::errors::describe;
use crate::fs_op::FsOpError;
use crate::runner::prompt::Prompter;
use crate::ui::theme::error_style;

const BATCH_KINDS: [(&str, BatchKind); 3] = [
    ("Delete multiple files", BatchKind::Delete),
    ("Copy multiple files", BatchKind::Copy),
    ("Move multiple files", BatchKind::Move),
];

pub fn batch(ex: &mut Explorer, p: &mut dyn Prompter, out: Out) -> anyhow::Result<()> {
    let labels: Vec<&str> = BATCH_KINDS.iter().map(|(l, _)| *l).collect();
    let kind = BATCH_KINDS[p.select("Batch operation type", &labels)?].1;

    let count = p.input("Enter number of files/directories")?;
    let count: usize = count
        .trim()
        .parse()
        .map_err(|_| FsOpError::Message(format!("not a number: `{}`", count.trim())))?;
    let mut items = Vec::with_capacity(count);
    for i in 1..=count {
        items.push(p.input(&format!("Enter item {i}"))?);
    }

    match kind {
        BatchKind::Delete => {
            if !p.confirm(&format!("Are you sure you want to delete {count} items?"))? {
                return cancelled(out);
            }
            for item in &items {
                // Each item is independent; report and move on.
                if let Err(e) = delete_confirmed(ex, item, p, out) {
                    match e.downcast::<FsOpError>() {
                        Ok(fs) => report_failure(out, item, &fs)?,
                        Err(other) => return Err(other),
                    }
                }
            }
            success(out, "Batch delete completed!")
        }
        BatchKind::Copy | BatchKind::Move => {
            let dest = p.input("Enter destination directory")?;
            let report = if kind == BatchKind::Copy {
                ex.batch_copy(&items, &dest)?
            } else {
                ex.batch_move(&items, &dest)?
            };
            print_report(out, &report)?;
            let verb = if kind == BatchKind::Copy { "copy" } else { "move" };
            success(out, format!("Batch {verb} completed!"))
        }
    }
}

fn report_failure(out: Out, item: &str, err: &FsOpError) -> anyhow::Result<()> {
    writeln!(out, "{}", error_style().apply_to(format!("{item}: {}", describe(err))))?;
    Ok(())
}

fn print_report(out: Out, report: &[BatchItem]) -> anyhow::Result<()> {
    for item in report {
        match &item.result {
            Ok(path) => writeln!(out, "  {} -> {}", item.name, path.display())?,
            Err(e) => report_failure(out, &item.name, e)?,
        }
    }
    let failed = report.iter().filter(|i| !i.succeeded()).count();
    if failed > 0 {
        warning(out, format!("{failed} of {} items failed", report.len()))?;
    }
    Ok(())
}

pub fn zip(ex: &mut Explorer, p: &mut dyn Prompter, out: Out) -> anyhow::Result<()> {
    let src = p.input("Enter source file/folder to zip")?;
    let archive = p.input("Enter zip filename (e.g. archive.zip)")?;
    let archive = ex.zip(&src, &archive)?;
    success(out, format!("Successfully created: {}", archive.display()))
}

pub fn unzip(ex: &mut Explorer, p: &mut dyn Prompter, out: Out) -> anyhow::Result<()> {
    let archive = p.input("Enter zip file to extract")?;
    let dest = p.input("Enter destination folder (or '.' for current)")?;
    let dest = ex.unzip(&archive, &dest)?;
    success(out, format!("Successfully extracted to: {}", dest.display()))
}
