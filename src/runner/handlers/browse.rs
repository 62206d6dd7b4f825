use super::{success, Out};
use crate::app::Explorer;
use crate::runner::prompt::Prompter;
use crate::ui::format::{render_listing, render_recent, render_search};
use crate::ui::menu::help_text;
use crate::ui::Theme;

pub fn list(ex: &Explorer, detailed: bool, out: Out) -> anyhow::Result<()> {
    let entries = ex.list()?;
    writeln!(out, "{}", render_listing(ex.cwd(), &entries, detailed, &ex.theme.palette()))?;
    Ok(())
}

pub fn change_dir(ex: &mut Explorer, p: &mut dyn Prompter, out: Out) -> anyhow::Result<()> {
    let input = p.input("Enter directory path")?;
    let now = ex.change_dir(&input)?;
    success(out, format!("Changed directory to: {}", now.display()))
}

pub fn parent(ex: &mut Explorer, out: Out) -> anyhow::Result<()> {
    let now = ex.go_up();
    success(out, format!("Changed directory to: {}", now.display()))
}

pub fn search(ex: &Explorer, p: &mut dyn Prompter, out: Out) -> anyhow::Result<()> {
    let term = p.input("Enter search term (prefix with re: for a regex)")?;
    let (label, hits) = match term.strip_prefix("re:") {
        Some(expr) => (expr, ex.search_regex(expr)?),
        None => (term.as_str(), ex.search(&term)),
    };
    writeln!(out, "{}", render_search(label, &hits))?;
    Ok(())
}

pub fn current_path(ex: &Explorer, out: Out) -> anyhow::Result<()> {
    writeln!(out, "Current path: {}", ex.theme.palette().path.apply_to(ex.cwd().display()))?;
    Ok(())
}

pub fn recent(ex: &Explorer, out: Out) -> anyhow::Result<()> {
    writeln!(out, "{}", render_recent(ex.recent.iter()))?;
    Ok(())
}

pub fn help(out: Out) -> anyhow::Result<()> {
    writeln!(out, "{}", help_text())?;
    Ok(())
}

pub fn theme(ex: &mut Explorer, p: &mut dyn Prompter, out: Out) -> anyhow::Result<()> {
    let labels: Vec<String> = Theme::ALL.iter().map(|t| format!("{t} ({})", t.blurb())).collect();
    let items: Vec<&str> = labels.iter().map(String::as_str).collect();
    let idx = p.select("Choose a theme", &items)?;
    let theme = ex.set_theme(Theme::ALL[idx].name())?;
    success(out, format!("Theme changed to: {theme}"))
}
