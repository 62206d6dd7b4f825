//! Zip/unzip by shelling out to the system `zip` and `unzip` tools.
//!
//! Process spawning sits behind [`CommandRunner`] so the argument lists can
//! be checked without the tools installed. None of this touches the tree
//! walker.

use std::ffi::{OsStr, OsString};
use std::fs::DirBuilder;
use std::io;
use std::os::unix::fs::DirBuilderExt;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use crate::fs_op::error::{FsOpError, FsResult, IoContext};

/// Outcome of one finished subprocess.
#[derive(Debug, Clone)]
pub struct ToolRun {
    pub program: String,
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

/// A single invocation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<OsString>,
    pub cwd: Option<PathBuf>,
}

pub trait CommandRunner {
    /// Run to completion and capture its output. Spawn failures are errors;
    /// a non-zero exit is not (see [`check_status`]).
    fn run(&self, inv: &Invocation) -> FsResult<ToolRun>;
}

/// Runs commands with `std::process::Command`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, inv: &Invocation) -> FsResult<ToolRun> {
        let mut cmd = Command::new(&inv.program);
        cmd.args(&inv.args);
        if let Some(dir) = &inv.cwd {
            cmd.current_dir(dir);
        }
        tracing::debug!(program = %inv.program, args = ?inv.args, "spawning");
        let output = cmd.output().map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => FsOpError::ToolMissing(inv.program.clone()),
            _ => FsOpError::Message(format!("failed to run {}: {e}", inv.program)),
        })?;
        Ok(ToolRun {
            program: inv.program.clone(),
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}

/// Turn a non-zero exit into `ToolFailed`.
pub fn check_status(run: ToolRun) -> FsResult<ToolRun> {
    if run.status.success() {
        Ok(run)
    } else {
        Err(FsOpError::ToolFailed {
            program: run.program,
            status: run.status,
            stderr: run.stderr,
        })
    }
}

/// Build the `zip -r` invocation for `source` into `archive`.
///
/// `zip` runs inside the parent of `source` so entries are stored under
/// the source's own name rather than its absolute path.
pub fn zip_invocation(source: &Path, archive: &Path) -> FsResult<Invocation> {
    let name = source
        .file_name()
        .ok_or_else(|| FsOpError::Message(format!("cannot zip {}", source.display())))?;
    let parent = source.parent().filter(|p| !p.as_os_str().is_empty());
    Ok(Invocation {
        program: "zip".to_string(),
        args: vec![
            OsString::from("-r"),
            OsString::from("-q"),
            archive.as_os_str().to_os_string(),
            name.to_os_string(),
        ],
        cwd: parent.map(Path::to_path_buf),
    })
}

pub fn unzip_invocation(archive: &Path, dest: &Path) -> Invocation {
    Invocation {
        program: "unzip".to_string(),
        args: vec![
            OsString::from("-o"),
            OsString::from("-q"),
            archive.as_os_str().to_os_string(),
            OsString::from("-d"),
            dest.as_os_str().to_os_string(),
        ],
        cwd: None,
    }
}

/// Compress `source` (file or directory) into `archive`. Both paths should
/// be absolute.
pub fn zip_path(runner: &dyn CommandRunner, source: &Path, archive: &Path) -> FsResult<ToolRun> {
    std::fs::symlink_metadata(source).at(source)?;
    let inv = zip_invocation(source, archive)?;
    check_status(runner.run(&inv)?)
}

/// Extract `archive` into `dest`, creating `dest` (mode 0755) if needed.
/// Existing files in `dest` are overwritten by `unzip -o`.
pub fn unzip_archive(runner: &dyn CommandRunner, archive: &Path, dest: &Path) -> FsResult<ToolRun> {
    std::fs::symlink_metadata(archive).at(archive)?;
    DirBuilder::new().recursive(true).mode(0o755).create(dest).at(dest)?;
    check_status(runner.run(&unzip_invocation(archive, dest))?)
}

/// `true` when `name` looks like a zip archive by extension.
pub fn has_zip_extension(name: &OsStr) -> bool {
    Path::new(name)
        .extension()
        .map(|e| e.eq_ignore_ascii_case("zip"))
        .unwrap_or(false)
}
