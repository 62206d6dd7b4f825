//! Console presentation: themes, menu text and formatted listings.

pub mod format;
pub mod menu;
pub mod theme;

pub use menu::MenuChoice;
pub use theme::{Palette, Theme};
