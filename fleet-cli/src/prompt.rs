//! Interactive prompts and piped input.
//!
//! Commands never touch the terminal directly: they go through [`Prompter`]
//! and [`InputSource`] so the same action code runs against scripted input in
//! tests.

use std::io::{self, BufRead, IsTerminal, Read, Write};

use anyhow::{Context, Result};
use tracing::debug;

use crate::{error::CliError, server::Platform};

pub trait Prompter: Send + Sync {
    /// Ask a yes/no question. Anything but `y`/`yes` counts as no.
    fn confirm(&self, message: &str) -> Result<bool>;

    /// Ask the user to pick one of `choices`, returning its index.
    fn select(&self, message: &str, choices: &[String]) -> Result<usize>;
}

pub trait InputSource: Send + Sync {
    /// Content piped into the process, `None` when stdin is a terminal.
    fn read_piped(&self) -> Result<Option<String>>;
}

/// Confirm unless `skip` is set (the `--yes` flag).
pub fn confirm(prompter: &dyn Prompter, skip: bool, message: &str) -> Result<bool> {
    if skip {
        debug!("confirmation skipped: {}", message);
        return Ok(true);
    }
    prompter.confirm(message)
}

/// Offer the platform's supported device types and return the chosen slug.
pub async fn select_device_type(
    platform: &dyn Platform,
    prompter: &dyn Prompter,
) -> Result<String> {
    let mut device_types = platform.supported_device_types().await?;
    if device_types.is_empty() {
        anyhow::bail!("The platform did not report any supported device types");
    }
    device_types.sort_by(|a, b| a.name.cmp(&b.name));
    let choices: Vec<String> = device_types
        .iter()
        .map(|t| format!("{} ({})", t.name, t.slug))
        .collect();
    let index = prompter.select("Device Type", &choices)?;
    device_types
        .into_iter()
        .nth(index)
        .map(|t| t.slug)
        .context("Selected device type is out of range")
}

/// Prompts on stderr and reads answers from stdin.
pub struct TerminalPrompter;

impl TerminalPrompter {
    fn read_answer(&self) -> Result<Option<String>> {
        let mut line = String::new();
        let n = io::stdin()
            .lock()
            .read_line(&mut line)
            .context("Failed to read answer from stdin")?;
        if n == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

impl Prompter for TerminalPrompter {
    fn confirm(&self, message: &str) -> Result<bool> {
        if !io::stdin().is_terminal() {
            return Err(CliError::NotInteractive("Pass --yes to skip the confirmation.").into());
        }
        eprint!("{message} [y/N] ");
        io::stderr().flush()?;
        let answer = self.read_answer()?.unwrap_or_default().to_lowercase();
        Ok(answer == "y" || answer == "yes")
    }

    fn select(&self, message: &str, choices: &[String]) -> Result<usize> {
        if !io::stdin().is_terminal() {
            return Err(CliError::NotInteractive("Pass the value as an option instead.").into());
        }
        eprintln!("{message}:");
        for (i, choice) in choices.iter().enumerate() {
            eprintln!("  {:>2}) {}", i + 1, choice);
        }
        loop {
            eprint!("Select [1-{}]: ", choices.len());
            io::stderr().flush()?;
            let Some(answer) = self.read_answer()? else {
                return Err(CliError::Aborted.into());
            };
            match parse_choice(&answer, choices.len()) {
                Some(index) => return Ok(index),
                None => eprintln!("Please enter a number between 1 and {}", choices.len()),
            }
        }
    }
}

/// Parse a 1-based menu answer into a 0-based index.
fn parse_choice(answer: &str, len: usize) -> Option<usize> {
    match answer.trim().parse::<usize>() {
        Ok(n) if (1..=len).contains(&n) => Some(n - 1),
        _ => None,
    }
}

/// Reads the whole of stdin when it is not a terminal.
pub struct PipedStdin;

impl InputSource for PipedStdin {
    fn read_piped(&self) -> Result<Option<String>> {
        let stdin = io::stdin();
        if stdin.is_terminal() {
            return Ok(None);
        }
        let mut content = String::new();
        stdin
            .lock()
            .read_to_string(&mut content)
            .context("Failed to read stdin")?;
        Ok(Some(content))
    }
}
