//! The seam between the engine and whoever answers its questions.
//!
//! The engine only builds a [`Question`] and awaits an [`Action`]; rendering
//! the question is entirely up to the [`Prompt`] implementation.

use crate::domain::action::Action;
use crate::domain::file::File;
use crate::errors::{ConflictError, Result};
use derive_new::new;
use dialoguer::Select;
use is_terminal::IsTerminal;
use std::collections::VecDeque;
use std::future::Future;
use std::io::{BufRead, Stderr, StdinLock, Write};

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Choice {
    pub key: char,
    pub name: &'static str,
    pub value: Action,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub name: &'static str,
    pub message: String,
    pub default: char,
    pub choices: Vec<Choice>,
}

impl Question {
    pub fn for_file(proposed: &File) -> Self {
        Question {
            name: "conflicts",
            message: format!("File exists, want to overwrite {}?", proposed.relative()),
            default: 'x',
            choices: vec![
                Choice::new('y', "Yes, overwrite this file", Action::Yes),
                Choice::new('n', "No, do not overwrite this file", Action::No),
                Choice::new('a', "Overwrite this file and all remaining files", Action::All),
                Choice::new('x', "Abort", Action::Abort),
                Choice::new(
                    'd',
                    "Show the difference between the existing and the new",
                    Action::Diff,
                ),
            ],
        }
    }

    pub fn keys(&self) -> String {
        self.choices.iter().map(|choice| choice.key).collect()
    }

    pub fn choice_for(&self, input: &str) -> Option<&Choice> {
        let input = input.trim();
        if input.is_empty() {
            return self.choices.iter().find(|choice| choice.key == self.default);
        }

        let action = Action::lookup(input)?;
        self.choices.iter().find(|choice| choice.value == action)
    }
}

pub trait Prompt {
    fn run(&mut self, question: &Question) -> impl Future<Output = Result<Action>>;
}

/// Answers from a fixed queue; handy for automation and tests.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPrompt {
    answers: VecDeque<Action>,
    asked: Vec<String>,
}

impl ScriptedPrompt {
    pub fn new(answers: impl IntoIterator<Item = Action>) -> Self {
        ScriptedPrompt {
            answers: answers.into_iter().collect(),
            asked: Vec::new(),
        }
    }

    /// Unknown tokens degrade to `no`.
    pub fn from_tokens<'t>(tokens: impl IntoIterator<Item = &'t str>) -> Self {
        Self::new(tokens.into_iter().map(Action::from_token))
    }

    /// Messages of every question asked so far.
    pub fn asked(&self) -> &[String] {
        &self.asked
    }
}

impl Prompt for ScriptedPrompt {
    async fn run(&mut self, question: &Question) -> Result<Action> {
        self.asked.push(question.message.clone());
        self.answers.pop_front().ok_or_else(|| {
            ConflictError::Prompt(format!("no scripted answer for: {}", question.message))
        })
    }
}

/// Arrow-key menu on the controlling terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectPrompt;

impl SelectPrompt {
    /// Menu labels and the position of the default choice.
    pub fn items(question: &Question) -> (Vec<String>, usize) {
        let labels = question
            .choices
            .iter()
            .map(|choice| format!("{}) {}", choice.key, choice.name))
            .collect();
        let default = question
            .choices
            .iter()
            .position(|choice| choice.key == question.default)
            .unwrap_or_default();

        (labels, default)
    }
}

impl Prompt for SelectPrompt {
    async fn run(&mut self, question: &Question) -> Result<Action> {
        let (labels, default) = Self::items(question);

        let picked = Select::new()
            .with_prompt(&question.message)
            .items(&labels[..])
            .default(default)
            .interact_opt()
            .map_err(|e| ConflictError::Prompt(e.to_string()))?;

        // escape leaves the menu with the default answer
        let index = picked.unwrap_or(default);
        question
            .choices
            .get(index)
            .map(|choice| choice.value)
            .ok_or_else(|| ConflictError::Prompt(format!("no choice at position {index}")))
    }
}

/// Expand-style prompt over a line reader/writer pair, for piped input.
#[derive(Debug, new)]
pub struct LinePrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    fn ask(&mut self, question: &Question) -> Result<Action> {
        loop {
            write!(
                self.output,
                "? {} ({}h) ",
                question.message,
                question.keys()
            )
            .and_then(|_| self.output.flush())
            .map_err(ConflictError::Output)?;

            let mut line = String::new();
            let read = self
                .input
                .read_line(&mut line)
                .map_err(|e| ConflictError::Prompt(e.to_string()))?;
            if read == 0 {
                return Err(ConflictError::Prompt("input closed".to_string()));
            }

            let answer = line.trim().to_ascii_lowercase();
            if answer == "h" || answer == "help" {
                self.print_help(question)?;
                continue;
            }

            match question.choice_for(&answer) {
                Some(choice) => return Ok(choice.value),
                None => writeln!(self.output, ">> Please enter a valid command")
                    .map_err(ConflictError::Output)?,
            }
        }
    }

    fn print_help(&mut self, question: &Question) -> Result<()> {
        for choice in &question.choices {
            writeln!(self.output, "  {}) {}", choice.key, choice.name)
                .map_err(ConflictError::Output)?;
        }
        writeln!(self.output, "  h) Help, list all options").map_err(ConflictError::Output)
    }
}

impl<R: BufRead, W: Write> Prompt for LinePrompt<R, W> {
    async fn run(&mut self, question: &Question) -> Result<Action> {
        self.ask(question)
    }
}

/// What the CLI asks with: a menu when a person is at the terminal, plain
/// lines when answers are piped in.
#[derive(Debug)]
pub enum TerminalPrompt<R, W> {
    Select(SelectPrompt),
    Lines(LinePrompt<R, W>),
}

impl TerminalPrompt<StdinLock<'static>, Stderr> {
    pub fn stdio() -> Self {
        if std::io::stdin().is_terminal() && std::io::stderr().is_terminal() {
            TerminalPrompt::Select(SelectPrompt)
        } else {
            TerminalPrompt::Lines(LinePrompt::new(std::io::stdin().lock(), std::io::stderr()))
        }
    }
}

impl<R: BufRead, W: Write> Prompt for TerminalPrompt<R, W> {
    async fn run(&mut self, question: &Question) -> Result<Action> {
        match self {
            TerminalPrompt::Select(prompt) => prompt.run(question).await,
            TerminalPrompt::Lines(prompt) => prompt.run(question).await,
        }
    }
}
