use std::fmt::Write as _;
use std::path::Path;

use crate::ui::theme::{error_style, Palette};

/// Main menu entries, numbered as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Exit,
    List,
    ListDetailed,
    ChangeDir,
    Parent,
    CreateFile,
    CreateDir,
    Delete,
    Copy,
    Move,
    Rename,
    Search,
    ViewPermissions,
    Chmod,
    Chown,
    CurrentPath,
    Recent,
    Batch,
    Zip,
    Unzip,
    Theme,
    Help,
}

impl MenuChoice {
    const ORDERED: [MenuChoice; 22] = [
        MenuChoice::Exit,
        MenuChoice::List,
        MenuChoice::ListDetailed,
        MenuChoice::ChangeDir,
        MenuChoice::Parent,
        MenuChoice::CreateFile,
        MenuChoice::CreateDir,
        MenuChoice::Delete,
        MenuChoice::Copy,
        MenuChoice::Move,
        MenuChoice::Rename,
        MenuChoice::Search,
        MenuChoice::ViewPermissions,
        MenuChoice::Chmod,
        MenuChoice::Chown,
        MenuChoice::CurrentPath,
        MenuChoice::Recent,
        MenuChoice::Batch,
        MenuChoice::Zip,
        MenuChoice::Unzip,
        MenuChoice::Theme,
        MenuChoice::Help,
    ];

    pub fn from_number(n: usize) -> Option<Self> {
        Self::ORDERED.get(n).copied()
    }

    /// Parse the number typed at the menu prompt.
    pub fn parse(input: &str) -> Option<Self> {
        input.trim().parse::<usize>().ok().and_then(Self::from_number)
    }

    pub fn number(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuChoice::Exit => "Exit",
            MenuChoice::List => "List files (simple)",
            MenuChoice::ListDetailed => "List files (detailed)",
            MenuChoice::ChangeDir => "Change directory",
            MenuChoice::Parent => "Go to parent directory",
            MenuChoice::CreateFile => "Create file",
            MenuChoice::CreateDir => "Create directory",
            MenuChoice::Delete => "Delete file/directory",
            MenuChoice::Copy => "Copy file/directory",
            MenuChoice::Move => "Move file/directory",
            MenuChoice::Rename => "Rename file/directory",
            MenuChoice::Search => "Search files",
            MenuChoice::ViewPermissions => "View file permissions",
            MenuChoice::Chmod => "Change permissions (chmod)",
            MenuChoice::Chown => "Change owner/group (chown)",
            MenuChoice::CurrentPath => "Display current path",
            MenuChoice::Recent => "Recent files history",
            MenuChoice::Batch => "Batch operations (multiple files)",
            MenuChoice::Zip => "Zip files/folders",
            MenuChoice::Unzip => "Unzip files",
            MenuChoice::Theme => "Change color theme",
            MenuChoice::Help => "Help/Documentation",
        }
    }
}

const SECTIONS: [(&str, &[MenuChoice]); 6] = [
    (
        "Navigation & Listing",
        &[MenuChoice::List, MenuChoice::ListDetailed, MenuChoice::ChangeDir, MenuChoice::Parent],
    ),
    (
        "File Operations",
        &[
            MenuChoice::CreateFile,
            MenuChoice::CreateDir,
            MenuChoice::Delete,
            MenuChoice::Copy,
            MenuChoice::Move,
            MenuChoice::Rename,
        ],
    ),
    ("Search", &[MenuChoice::Search]),
    (
        "Permissions Management",
        &[MenuChoice::ViewPermissions, MenuChoice::Chmod, MenuChoice::Chown],
    ),
    ("Other", &[MenuChoice::CurrentPath]),
    (
        "Extras",
        &[
            MenuChoice::Recent,
            MenuChoice::Batch,
            MenuChoice::Zip,
            MenuChoice::Unzip,
            MenuChoice::Theme,
            MenuChoice::Help,
        ],
    ),
];

pub fn render_menu(cwd: &Path, palette: &Palette) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", palette.title.apply_to("FILE TREK"));
    let _ = writeln!(
        out,
        "{}{}",
        palette.header.apply_to("  Current Directory: "),
        palette.path.apply_to(cwd.display())
    );
    let _ = writeln!(out, "{}", "=".repeat(58));
    for (title, items) in SECTIONS {
        let _ = writeln!(out, "\n{}", palette.section.apply_to(format!("{title}:")));
        for item in items {
            let num = format!("{}.", item.number());
            let _ = writeln!(
                out,
                "  {} {}",
                palette.option.apply_to(format!("{num:<3}")),
                palette.text.apply_to(item.label())
            );
        }
    }
    let exit = error_style();
    let _ = writeln!(out, "\n  {} {}", exit.apply_to("0. "), exit.apply_to(MenuChoice::Exit.label()));
    let _ = write!(out, "\n{}", "-".repeat(58));
    out
}

pub fn help_text() -> &'static str {
    "\
NAVIGATION & LISTING:
  - List files (simple/detailed): view all entries in the current directory
  - Change directory: absolute, relative or ~ paths
  - Go to parent: move up one level

FILE OPERATIONS:
  - Create: new empty files or directories
  - Delete: files, links or directories (asks before deleting a non-empty directory)
  - Copy: files or whole directory trees; never overwrites an existing destination
  - Move: to another location; moving onto a directory places the item inside it
  - Rename: within the same directory

SEARCH:
  - Recursive, case-insensitive file name matching
  - Symbolic links are listed but never followed

PERMISSIONS:
  - View: mode string, octal, owner, group, size and modification time
  - chmod: octal notation (e.g. 755, 644)
  - chown: owner and optional group (usually requires root)

EXTRAS:
  - Recent files: most recently created, copied, moved or renamed paths
  - Batch operations: copy, move or delete several items at once
  - Zip/Unzip: uses the system 'zip' and 'unzip' tools
  - Color themes: default, dark or light

TIPS:
  - Directories end with / and executables with *
  - Press Ctrl-C during a long copy or delete to stop it after the current entry"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::Theme;

    #[test]
    fn numbers_match_menu_positions() {
        assert_eq!(MenuChoice::parse("0"), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::parse(" 11 "), Some(MenuChoice::Search));
        assert_eq!(MenuChoice::parse("21"), Some(MenuChoice::Help));
        assert_eq!(MenuChoice::parse("22"), None);
        assert_eq!(MenuChoice::parse("x"), None);
        for n in 0..=21 {
            assert_eq!(MenuChoice::from_number(n).unwrap().number(), n);
        }
    }

    #[test]
    fn every_choice_is_rendered() {
        console::set_colors_enabled(false);
        let text = render_menu(Path::new("/srv"), &Theme::Dark.palette());
        assert!(text.contains("Current Directory: /srv"));
        for n in 1..=21 {
            let choice = MenuChoice::from_number(n).unwrap();
            assert!(text.contains(choice.label()), "missing {choice:?}");
        }
        assert!(text.contains("0.  Exit"));
    }
}
