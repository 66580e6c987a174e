//! # Projection Interactive Prompts
//!
//! File: cli/src/common/ui/prompts.rs
//!
//! ## Overview
//!
//! Line-based prompts used by the `generate` commands when they run
//! interactively: a section banner, validated questions with defaults, and a
//! yes/no confirmation. [`Prompter`] is generic over its input and output so the
//! commands use stdin/stdout while tests feed scripted answers.
//!
//! ## Behaviour
//!
//! - `Question [default]: ` is printed; an empty answer takes the default.
//! - Invalid answers print the validator's message and ask again, without limit.
//! - Closed input (EOF) aborts with `ProjectionError::UserAborted`.
//! - Confirmations accept anything starting with `y`/`Y` as yes; an empty answer
//!   takes the default.
//!
use crate::core::error::{ProjectionError, ProjectionResult};
use std::io::{self, BufRead, Write};

/// Validation function applied to an answer; returns the normalized value.
pub type Validator = fn(&str) -> ProjectionResult<String>;

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl Prompter<io::StdinLock<'static>, io::Stdout> {
    /// A prompter reading from stdin and writing to stdout.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Prints a highlighted section title surrounded by blank lines.
    pub fn section(&mut self, title: &str) -> io::Result<()> {
        let rule = "=".repeat(title.chars().count() + 4);
        writeln!(self.output)?;
        writeln!(self.output, "{}", rule)?;
        writeln!(self.output, "  {}  ", title)?;
        writeln!(self.output, "{}", rule)?;
        writeln!(self.output)
    }

    /// Prints plain lines of explanatory text.
    pub fn text(&mut self, lines: &[&str]) -> io::Result<()> {
        for line in lines {
            writeln!(self.output, "{}", line)?;
        }
        Ok(())
    }

    /// Asks `question` until `validator` accepts the answer.
    pub fn ask_and_validate(
        &mut self,
        question: &str,
        default: Option<&str>,
        validator: Validator,
    ) -> ProjectionResult<String> {
        loop {
            let answer = self.ask(&format_question(question, default, ":"))?;
            let value = if answer.is_empty() {
                default.unwrap_or_default()
            } else {
                answer.as_str()
            };
            match validator(value) {
                Ok(valid) => return Ok(valid),
                Err(e) => {
                    writeln!(self.output, "{}", e).map_err(|_| ProjectionError::UserAborted)?;
                }
            }
        }
    }

    /// Asks a yes/no `question`.
    pub fn confirm(&mut self, question: &str, default: bool) -> ProjectionResult<bool> {
        let shown = if default { "yes" } else { "no" };
        let answer = self.ask(&format_question(question, Some(shown), "?"))?;
        if answer.is_empty() {
            return Ok(default);
        }
        Ok(answer.starts_with(['y', 'Y']))
    }

    fn ask(&mut self, prompt: &str) -> ProjectionResult<String> {
        write!(self.output, "{}", prompt).map_err(|_| ProjectionError::UserAborted)?;
        self.output.flush().map_err(|_| ProjectionError::UserAborted)?;

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => Err(ProjectionError::UserAborted),
            Ok(_) => Ok(line.trim().to_string()),
        }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}

/// `Question [default]: ` or `Question: ` when there is no default.
pub fn format_question(question: &str, default: Option<&str>, separator: &str) -> String {
    match default {
        Some(value) if !value.is_empty() => format!("{} [{}]{} ", question, value, separator),
        _ => format!("{}{} ", question, separator),
    }
}
