pub mod core;
pub mod recent;
pub mod settings;
pub mod types;

pub use self::core::Explorer;
pub use recent::RecentFiles;
pub use settings::Settings;
pub use types::{BatchItem, BatchKind, DeleteOutcome};
