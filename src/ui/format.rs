//! Plain-text rendering of listings, permission reports and search results.
//!
//! Functions here return strings; printing is left to the runner.

use std::fmt::Write as _;
use std::path::Path;
use std::time::SystemTime;

use chrono::{DateTime, Local};

use crate::fs_op::permissions::{format_unix_mode, group_name, owner_name, PermissionInfo};
use crate::fs_op::{DirectoryEntry, EntryKind, SearchHit};
use crate::ui::theme::Palette;

const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Human readable size: whole bytes below 1 KiB, otherwise two decimals
/// in the largest unit that keeps the value under 1024 (capped at TB).
pub fn format_size(bytes: u64) -> String {
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.2} {}", UNITS[unit])
    }
}

/// Local time as `%Y-%m-%d %H:%M:%S`; `-` when the platform has no mtime.
pub fn format_mtime(modified: Option<SystemTime>) -> String {
    match modified {
        Some(t) => DateTime::<Local>::from(t).format("%Y-%m-%d %H:%M:%S").to_string(),
        None => "-".to_string(),
    }
}

/// Entry name with its type suffix: `/` for directories, `*` for
/// executables.
pub fn display_name(entry: &DirectoryEntry) -> String {
    if entry.is_dir() {
        format!("{}/", entry.name)
    } else if entry.is_executable() {
        format!("{}*", entry.name)
    } else {
        entry.name.clone()
    }
}

pub fn styled_name(entry: &DirectoryEntry, palette: &Palette) -> String {
    let style = if entry.is_dir() {
        &palette.directory
    } else if entry.is_executable() {
        &palette.executable
    } else {
        &palette.regular
    };
    style.apply_to(display_name(entry)).to_string()
}

pub fn detailed_header() -> String {
    format!(
        "{:<12}{:<10}{:<10}{:<12}{:<20}{}",
        "Permissions", "Owner", "Group", "Size", "Modified", "Name"
    )
}

/// Columns before the name in a detailed listing row.
pub fn detailed_columns(entry: &DirectoryEntry) -> String {
    format!(
        "{:<12}{:<10}{:<10}{:<12}{:<20}",
        format_unix_mode(entry.mode),
        owner_name(entry.uid),
        group_name(entry.gid),
        format_size(entry.size),
        format_mtime(entry.modified),
    )
}

/// Full listing block for `dir`. `entries` should already be sorted.
pub fn render_listing(dir: &Path, entries: &[DirectoryEntry], detailed: bool, palette: &Palette) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Current Directory: {}", dir.display());
    let _ = writeln!(out, "{}", "=".repeat(80));
    if detailed {
        let _ = writeln!(out, "{}", detailed_header());
        let _ = writeln!(out, "{}", "-".repeat(80));
    }
    for entry in entries {
        if detailed {
            out.push_str(&detailed_columns(entry));
        }
        let _ = writeln!(out, "{}", styled_name(entry, palette));
    }
    let _ = write!(out, "\nTotal items: {}", entries.len());
    out
}

pub fn render_permissions(info: &PermissionInfo) -> String {
    let name = info
        .path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| info.path.display().to_string());
    let mut out = String::new();
    let _ = writeln!(out, "File Permissions for: {name}");
    let _ = writeln!(out, "{}", "=".repeat(50));
    let _ = writeln!(out, "Permissions: {}", info.mode_string);
    let _ = writeln!(out, "Octal: {:o}", info.octal);
    let _ = writeln!(out, "Owner: {}", info.owner);
    let _ = writeln!(out, "Group: {}", info.group);
    let _ = writeln!(out, "Size: {}", format_size(info.size));
    let _ = write!(out, "Last Modified: {}", format_mtime(info.modified));
    out
}

/// One search result line; directories get a trailing `/`.
pub fn search_line(hit: &SearchHit) -> String {
    match hit.kind {
        EntryKind::Directory => format!("{}/", hit.path.display()),
        _ => hit.path.display().to_string(),
    }
}

pub fn render_search(term: &str, hits: &[SearchHit]) -> String {
    if hits.is_empty() {
        return format!("No files found matching: {term}");
    }
    let mut out = String::new();
    let _ = writeln!(out, "Search results for '{term}':");
    let _ = writeln!(out, "{}", "-".repeat(80));
    for hit in hits {
        let _ = writeln!(out, "{}", search_line(hit));
    }
    let _ = write!(out, "\nTotal matches: {}", hits.len());
    out
}

pub fn render_recent<'a>(items: impl IntoIterator<Item = &'a Path>) -> String {
    let lines: Vec<String> = items
        .into_iter()
        .enumerate()
        .map(|(i, p)| format!("{}. {}", i + 1, p.display()))
        .collect();
    if lines.is_empty() {
        return "No recent files accessed yet.".to_string();
    }
    let rule = "=".repeat(60);
    format!("Recent Files History:\n{rule}\n{}\n{rule}", lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::Theme;
    use std::path::PathBuf;

    fn entry(name: &str, kind: EntryKind, mode: u32) -> DirectoryEntry {
        DirectoryEntry {
            name: name.to_string(),
            path: PathBuf::from("/data").join(name),
            kind,
            size: 2048,
            modified: None,
            mode,
            uid: 0,
            gid: 0,
        }
    }

    #[test]
    fn sizes_use_binary_units() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(1023), "1023 B");
        assert_eq!(format_size(1024), "1.00 KB");
        assert_eq!(format_size(1536), "1.50 KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.00 MB");
        assert_eq!(format_size(3 * 1024u64.pow(5)), "3072.00 TB");
    }

    #[test]
    fn mtime_uses_fixed_layout() {
        let s = format_mtime(Some(SystemTime::now()));
        assert_eq!(s.len(), 19);
        assert_eq!(&s[4..5], "-");
        assert_eq!(&s[13..14], ":");
        assert_eq!(format_mtime(None), "-");
    }

    #[test]
    fn names_carry_type_suffixes() {
        assert_eq!(display_name(&entry("src", EntryKind::Directory, 0o40755)), "src/");
        assert_eq!(display_name(&entry("run.sh", EntryKind::File, 0o100755)), "run.sh*");
        assert_eq!(display_name(&entry("notes", EntryKind::File, 0o100644)), "notes");
    }

    #[test]
    fn simple_listing_text() {
        console::set_colors_enabled(false);
        let entries = vec![
            entry("docs", EntryKind::Directory, 0o40755),
            entry("build.sh", EntryKind::File, 0o100755),
            entry("readme.md", EntryKind::File, 0o100644),
        ];
        let text = render_listing(Path::new("/data"), &entries, false, &Theme::Default.palette());
        insta::assert_snapshot!(text, @r"
        Current Directory: /data
        ================================================================================
        docs/
        build.sh*
        readme.md

        Total items: 3
        ");
    }

    #[test]
    fn empty_search_and_history_messages() {
        assert_eq!(render_search("zzz", &[]), "No files found matching: zzz");
        assert_eq!(render_recent(Vec::<&Path>::new()), "No recent files accessed yet.");
    }

    #[test]
    fn search_marks_directories() {
        let hits = vec![
            SearchHit { path: "/r/sub".into(), kind: EntryKind::Directory },
            SearchHit { path: "/r/sub/b.txt".into(), kind: EntryKind::File },
        ];
        let text = render_search("b", &hits);
        assert!(text.contains("/r/sub/\n"));
        assert!(text.ends_with("Total matches: 2"));
    }
}
