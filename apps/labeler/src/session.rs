//! Dispatches parsed commands to the review controller.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use client_core::{LabelInputs, LabelingApi, RangeRequest, ReviewController};
use tracing::{debug, info};

use crate::{
    commands::{parse_command, Command, CommandError, HELP_TEXT},
    config::Settings,
    terminal::TerminalView,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Session<A, R, W> {
    controller: ReviewController<A, TerminalView<R, W>>,
    annotator: String,
    skip_labeled: bool,
    show_labeled: bool,
}

impl<A: LabelingApi, R: BufRead, W: Write> Session<A, R, W> {
    pub fn new(controller: ReviewController<A, TerminalView<R, W>>, settings: &Settings) -> Self {
        Self {
            controller,
            annotator: settings.annotator.clone(),
            skip_labeled: settings.skip_labeled,
            show_labeled: settings.show_labeled,
        }
    }

    #[cfg(test)]
    pub fn controller(&self) -> &ReviewController<A, TerminalView<R, W>> {
        &self.controller
    }

    pub async fn run(&mut self) -> Result<()> {
        self.controller.initial_load().await;
        self.check_output()?;

        loop {
            let Some(line) = self
                .controller
                .view_mut()
                .read_line()
                .context("failed to read command")?
            else {
                break;
            };

            let flow = match parse_command(&line) {
                Ok(command) => self.execute(command).await,
                Err(CommandError::Empty) => Flow::Continue,
                Err(err) => {
                    self.controller.view_mut().print(&format!("! {err}"));
                    Flow::Continue
                }
            };
            self.check_output()?;
            if flow == Flow::Quit {
                break;
            }
        }

        info!("labeling session finished");
        Ok(())
    }

    pub async fn execute(&mut self, command: Command) -> Flow {
        debug!(?command, "executing command");
        match command {
            Command::Load { start, end } => {
                let (typed_start, typed_end) = self.controller.view().range_inputs();
                let start = start.unwrap_or(typed_start);
                let end = end.unwrap_or(typed_end);
                self.controller.view_mut().set_range_inputs(start, end);
                self.controller
                    .load_range(RangeRequest {
                        start,
                        end,
                        skip_labeled: self.skip_labeled,
                        show_labeled: self.show_labeled,
                    })
                    .await;
            }
            Command::Next => self.controller.next(),
            Command::Prev => self.controller.previous(),
            Command::Set { field, value } => {
                self.controller.view_mut().form_mut().set(field, value)
            }
            Command::Annotator(name) => self.annotator = name,
            Command::Skip(on) => self.skip_labeled = on,
            Command::Show(on) => self.show_labeled = on,
            Command::Save => {
                let inputs = self.label_inputs();
                self.controller.save(&inputs).await;
            }
            Command::Help => self.controller.view_mut().print(HELP_TEXT),
            Command::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    fn label_inputs(&self) -> LabelInputs {
        let form = self.controller.view().form();
        LabelInputs {
            critical_success_label: form.critical.clone(),
            popular_success_label: form.popular.clone(),
            commercial_success_label: form.commercial.clone(),
            annotator: self.annotator.clone(),
        }
    }

    fn check_output(&mut self) -> Result<()> {
        match self.controller.view_mut().take_error() {
            Some(err) => Err(err).context("failed to write to terminal"),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
