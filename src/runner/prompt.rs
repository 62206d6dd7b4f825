//! User prompts behind a trait so the menu loop can run from a script.

use std::collections::VecDeque;

use anyhow::{anyhow, Context};
use console::Term;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};

pub trait Prompter {
    /// Free text; may be empty.
    fn input(&mut self, prompt: &str) -> anyhow::Result<String>;
    /// Yes/no question, defaulting to no.
    fn confirm(&mut self, prompt: &str) -> anyhow::Result<bool>;
    /// Pick one of `items`, returning its index.
    fn select(&mut self, prompt: &str, items: &[&str]) -> anyhow::Result<usize>;
    /// Wait before the menu is shown again.
    fn pause(&mut self) -> anyhow::Result<()>;
}

/// Terminal prompts rendered with dialoguer.
pub struct DialoguerPrompter {
    theme: ColorfulTheme,
    term: Term,
}

impl Default for DialoguerPrompter {
    fn default() -> Self {
        DialoguerPrompter {
            theme: ColorfulTheme::default(),
            term: Term::stderr(),
        }
    }
}

impl Prompter for DialoguerPrompter {
    fn input(&mut self, prompt: &str) -> anyhow::Result<String> {
        let text: String = Input::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text_on(&self.term)
            .context("reading input")?;
        Ok(text)
    }

    fn confirm(&mut self, prompt: &str) -> anyhow::Result<bool> {
        Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(false)
            .interact_on(&self.term)
            .context("reading confirmation")
    }

    fn select(&mut self, prompt: &str, items: &[&str]) -> anyhow::Result<usize> {
        Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact_on(&self.term)
            .context("reading selection")
    }

    fn pause(&mut self) -> anyhow::Result<()> {
        self.term.write_str("Press Enter to continue...")?;
        self.term.read_line()?;
        Ok(())
    }
}

/// Answers prompts from a fixed list. Used by tests and for piping a
/// sequence of menu choices.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    /// Every prompt shown, in order.
    pub asked: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScriptedPrompter {
            answers: answers.into_iter().map(Into::into).collect(),
            asked: Vec::new(),
        }
    }

    fn next(&mut self, prompt: &str) -> anyhow::Result<String> {
        self.asked.push(prompt.to_string());
        self.answers
            .pop_front()
            .ok_or_else(|| anyhow!("script exhausted at prompt `{prompt}`"))
    }
}

impl Prompter for ScriptedPrompter {
    fn input(&mut self, prompt: &str) -> anyhow::Result<String> {
        self.next(prompt)
    }

    fn confirm(&mut self, prompt: &str) -> anyhow::Result<bool> {
        let answer = self.next(prompt)?;
        Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
    }

    fn select(&mut self, prompt: &str, items: &[&str]) -> anyhow::Result<usize> {
        let answer = self.next(prompt)?;
        let answer = answer.trim();
        answer
            .parse::<usize>()
            .ok()
            .filter(|i| *i < items.len())
            .or_else(|| items.iter().position(|item| *item == answer))
            .ok_or_else(|| anyhow!("`{answer}` is not one of {items:?}"))
    }

    fn pause(&mut self) -> anyhow::Result<()> {
        Ok(())
    }
}
