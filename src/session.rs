use std::io::Write;

use anyhow::Result;
use tracing::debug;

use crate::action::{self, Flow, MenuAction};
use crate::console::LineSource;
use crate::store::RecipeStore;

/// The interactive menu loop.
///
/// Owns the book and an ordered action registry; menu numbers are the
/// 1-based positions in that registry. [`Session::new`] wires up the
/// standard six-entry menu, [`Session::with_actions`] takes a custom one.
pub struct Session {
    book: RecipeStore,
    actions: Vec<Box<dyn MenuAction>>,
}

impl Session {
    /// Session with the standard menu (see [`action::default_actions`]).
    pub fn new(book: RecipeStore) -> Self {
        Self::with_actions(book, action::default_actions())
    }

    pub fn with_actions(book: RecipeStore, actions: Vec<Box<dyn MenuAction>>) -> Self {
        Self { book, actions }
    }

    /// Run the menu loop until save-and-exit or end of input.
    ///
    /// An unknown choice is reported and the loop continues; a `None`
    /// from the source at the menu prompt ends the loop without saving.
    pub fn run(&mut self, input: &mut dyn LineSource, out: &mut dyn Write) -> Result<()> {
        loop {
            self.print_menu(out)?;
            out.flush()?;

            let prompt = format!("\nYour choice (1-{}): ", self.actions.len());
            let Some(choice) = input.read_line(&prompt)? else {
                debug!("input ended; leaving menu loop");
                break;
            };

            let picked = choice
                .trim()
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| self.actions.get(i));
            let Some(action) = picked else {
                writeln!(
                    out,
                    "\nInvalid choice! Please enter 1-{}.",
                    self.actions.len()
                )?;
                continue;
            };

            match action.run(input, out, &mut self.book)? {
                Flow::Continue => {}
                Flow::Exit => break,
            }
        }
        Ok(())
    }

    fn print_menu(&self, out: &mut dyn Write) -> std::io::Result<()> {
        action::banner(out, "RECIPE BOOK MANAGER")?;
        for (i, entry) in self.actions.iter().enumerate() {
            writeln!(out, "{}. {}", i + 1, entry.label())?;
        }
        action::rule(out)
    }

    /// The book, for callers that want to look at it after the loop.
    pub fn book(&self) -> &RecipeStore {
        &self.book
    }
}
