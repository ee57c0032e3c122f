use super::selection::{ChoiceError, IndexSupplier, OptionsRequest};
use crate::error::AppResult;
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// Interactive supplier reading one answer per line
pub struct TerminalSupplier<R, W> {
    input: R,
    output: W,
}

impl TerminalSupplier<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalSupplier<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Write failures on the prompt are not worth aborting a batch for
    fn print(&mut self, text: &str) {
        let _ = self.output.write_all(text.as_bytes());
        let _ = self.output.flush();
    }
}

impl<R: BufRead, W: Write> IndexSupplier for TerminalSupplier<R, W> {
    fn present(&mut self, request: &OptionsRequest) {
        let mut text = format!("\n{}\n", request.heading);
        if let Some(zero) = &request.zero_option {
            text.push_str(&format!("0. {}\n", zero));
        }
        for (i, label) in request.options.iter().enumerate() {
            text.push_str(&format!("{}. {}\n", i + 1, label));
        }
        self.print(&text);
    }

    fn answer(&mut self, request: &OptionsRequest) -> AppResult<Option<String>> {
        self.print(&format!("{}: ", request.prompt));
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn reject(&mut self, _input: &str, reason: &ChoiceError) {
        self.print(&format!(
            "Invalid input ({}). Please enter a valid number.\n",
            reason
        ));
    }
}

/// Supplier replaying a fixed list of answers, e.g. from an answers file
#[derive(Debug, Default)]
pub struct ScriptedSupplier {
    answers: VecDeque<String>,
    presented: Vec<OptionsRequest>,
    rejected: Vec<String>,
}

impl ScriptedSupplier {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// One answer per line, blank lines and `#` comments ignored
    pub fn from_lines(contents: &str) -> Self {
        Self::new(
            contents
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty() && !l.starts_with('#')),
        )
    }

    pub fn presented(&self) -> &[OptionsRequest] {
        &self.presented
    }

    /// Rejected answers in the order they were given, reported by the caller
    pub fn rejected(&self) -> &[String] {
        &self.rejected
    }
}

impl IndexSupplier for ScriptedSupplier {
    fn present(&mut self, request: &OptionsRequest) {
        self.presented.push(request.clone());
    }

    fn answer(&mut self, _request: &OptionsRequest) -> AppResult<Option<String>> {
        Ok(self.answers.pop_front())
    }

    fn reject(&mut self, input: &str, _reason: &ChoiceError) {
        self.rejected.push(input.to_string());
    }
}
