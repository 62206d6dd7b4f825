pub mod cli;
pub mod event_loop_main;
pub mod handlers;
pub mod prompt;

pub use event_loop_main::{run_app, run_session};
pub use prompt::{DialoguerPrompter, Prompter, ScriptedPrompter};
