//! User-facing rendering of errors raised during a session.

use crate::fs_op::FsOpError;

/// One-line message for an operation error, with a hint where the fix is
/// usually outside the program.
pub fn describe(err: &FsOpError) -> String {
    match err {
        FsOpError::ToolMissing(tool) => {
            format!("{err}. Install the '{tool}' package to use this feature.")
        }
        FsOpError::PermissionDenied(_) => format!("{err} (may require root privileges)"),
        FsOpError::DirectoryNotEmpty(_) => format!("{err}; delete it recursively to remove its contents"),
        _ => err.to_string(),
    }
}

/// Render any error with its cause chain, preferring [`describe`] for
/// filesystem errors.
pub fn render(err: &anyhow::Error) -> String {
    if let Some(fs) = err.downcast_ref::<FsOpError>() {
        return format!("Error: {}", describe(fs));
    }
    let mut out = format!("Error: {err}");
    for cause in err.chain().skip(1) {
        out.push_str(&format!("\n  caused by: {cause}"));
    }
    out
}
