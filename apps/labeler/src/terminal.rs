//! Line-oriented terminal adapter for the review controller.

use std::io::{self, BufRead, Write};

use client_core::{Action, ReviewView, Screen, ScreenRenderer};
use tracing::debug;

use crate::commands::LabelField;

const PROMPT: &str = "> ";

/// Label inputs as currently typed by the annotator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelForm {
    pub critical: String,
    pub popular: String,
    pub commercial: String,
}

impl LabelForm {
    pub fn set(&mut self, field: LabelField, value: String) {
        match field {
            LabelField::Critical => self.critical = value,
            LabelField::Popular => self.popular = value,
            LabelField::Commercial => self.commercial = value,
        }
    }
}

pub struct TerminalView<R, W> {
    input: R,
    output: W,
    form: LabelForm,
    range_inputs: (i64, i64),
    write_error: Option<io::Error>,
}

impl<R: BufRead, W: Write> TerminalView<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            form: LabelForm::default(),
            range_inputs: (0, 0),
            write_error: None,
        }
    }

    pub fn form(&self) -> &LabelForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut LabelForm {
        &mut self.form
    }

    pub fn range_inputs(&self) -> (i64, i64) {
        self.range_inputs
    }

    pub fn set_range_inputs(&mut self, start: i64, end: i64) {
        self.range_inputs = (start, end);
    }

    #[cfg(test)]
    pub fn output(&self) -> &W {
        &self.output
    }

    /// Prompts and reads one line; `None` at end of input.
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        write!(self.output, "{PROMPT}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    pub fn print(&mut self, text: &str) {
        let result = writeln!(self.output, "{text}");
        self.keep_error(result);
    }

    /// First write failure since the last call, if any.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.write_error.take()
    }

    fn keep_error(&mut self, result: io::Result<()>) {
        if let Err(err) = result {
            self.write_error.get_or_insert(err);
        }
    }

    fn write_screen(&mut self, screen: &Screen) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "#{}  {}", screen.index_label(), screen.title())?;
        for group in screen.groups() {
            writeln!(self.output, "## {}", group.title)?;
            for line in &group.lines {
                writeln!(self.output, "  {}: {}", line.key, line.value)?;
            }
        }
        self.output.flush()
    }
}

impl<R: BufRead, W: Write> ScreenRenderer for TerminalView<R, W> {
    fn render(&mut self, screen: &Screen) {
        let result = self.write_screen(screen);
        self.keep_error(result);
    }
}

impl<R: BufRead, W: Write> ReviewView for TerminalView<R, W> {
    fn show_progress(&mut self, text: &str) {
        self.print(text);
    }

    fn seed_range(&mut self, start: i64, end: i64) {
        self.set_range_inputs(start, end);
        self.print(&format!("range: {start}..{end}"));
    }

    fn clear_labels(&mut self) {
        self.form = LabelForm::default();
    }

    fn alert(&mut self, message: &str) {
        self.print(&format!("! {message}"));
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        let asked = write!(self.output, "? {prompt} [y/N] ").and_then(|()| self.output.flush());
        self.keep_error(asked);

        let mut answer = String::new();
        match self.input.read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            Err(err) => {
                debug!(error = %err, "confirmation read failed");
                false
            }
        }
    }

    fn set_action_enabled(&mut self, action: Action, enabled: bool) {
        debug!(?action, enabled, "action availability changed");
    }
}

#[cfg(test)]
#[path = "tests/terminal_tests.rs"]
mod tests;
