use std::io::Write;

use anyhow::Context;

use crate::app::Explorer;
use crate::errors;
use crate::fs_op::FsOpError;
use crate::runner::handlers;
use crate::runner::prompt::{DialoguerPrompter, Prompter};
use crate::ui::menu::render_menu;
use crate::ui::theme::error_style;
use crate::ui::MenuChoice;

/// Run the interactive menu on the terminal until the user exits.
pub fn run_app(mut explorer: Explorer) -> anyhow::Result<()> {
    // Ctrl-C stops the running tree operation instead of the process.
    let token = explorer.cancel_token();
    ctrlc::set_handler(move || token.cancel()).context("installing Ctrl-C handler")?;

    let mut prompter = DialoguerPrompter::default();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    tracing::info!(cwd = %explorer.cwd().display(), "session started");
    run_session(&mut explorer, &mut prompter, &mut out)?;
    tracing::info!("session ended");
    Ok(())
}

/// The menu loop. Filesystem errors are printed and the loop continues;
/// prompt failures (for example a closed stdin) end the session.
pub fn run_session(ex: &mut Explorer, p: &mut dyn Prompter, out: &mut dyn Write) -> anyhow::Result<()> {
    loop {
        writeln!(out, "\n{}", render_menu(ex.cwd(), &ex.theme.palette()))?;
        let answer = p.input("Enter your choice")?;
        let Some(choice) = MenuChoice::parse(&answer) else {
            writeln!(
                out,
                "{}",
                error_style().apply_to("Invalid choice! Please select a valid option (0-21).")
            )?;
            continue;
        };
        if choice == MenuChoice::Exit {
            writeln!(out, "Thank you for using File Trek!")?;
            return Ok(());
        }

        tracing::debug!(?choice, "menu choice");
        if let Err(e) = handlers::handle_choice(ex, choice, p, out) {
            if e.downcast_ref::<FsOpError>().is_none() {
                return Err(e);
            }
            tracing::warn!(error = %e, ?choice, "operation failed");
            writeln!(out, "{}", error_style().apply_to(errors::render(&e)))?;
        }
        p.pause()?;
    }
}
