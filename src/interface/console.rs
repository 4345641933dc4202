//! Text console: log lines, card lists and validated integer input.

use std::collections::VecDeque;
use std::fmt;
use std::io::{BufRead, Write};
use std::ops::RangeInclusive;

use crate::cards::CardType;
use crate::error::SyncError;
use crate::sync::CardView;

/// Whitespace-separated integer input and line output.
#[derive(Debug)]
pub struct Console<R, W> {
    input: R,
    output: W,
    pending: VecDeque<String>,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            pending: VecDeque::new(),
        }
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// `[*] <user> : <text>`
    pub fn log(&mut self, user: &str, text: fmt::Arguments<'_>) -> Result<(), SyncError> {
        writeln!(self.output, "[*] {user} : {text}")?;
        Ok(())
    }

    pub fn line(&mut self, text: fmt::Arguments<'_>) -> Result<(), SyncError> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    pub fn show_cards(&mut self, cards: &[CardView]) -> Result<(), SyncError> {
        for card in cards {
            self.show_card(card)?;
        }
        Ok(())
    }

    /// Field slots; empty slots are shown as such.
    pub fn show_slots(&mut self, slots: &[Option<CardView>]) -> Result<(), SyncError> {
        for (position, slot) in slots.iter().enumerate() {
            write!(self.output, "{position}: ")?;
            match slot {
                Some(card) => self.show_card(card)?,
                None => writeln!(self.output, "(empty)")?,
            }
        }
        Ok(())
    }

    fn show_card(&mut self, card: &CardView) -> Result<(), SyncError> {
        write!(self.output, "[{}({} / {})] ", card.name, card.card_type, card.cost)?;
        if card.card_type == CardType::Minion {
            write!(self.output, "(ATK {}/HP {})", card.attack, card.health)?;
        }
        writeln!(self.output)?;
        Ok(())
    }

    /// Prompt until a number in `range` is entered.
    ///
    /// Anything else restates the range and prompts again. End of input
    /// is `InputClosed`.
    pub fn read_index(&mut self, prompt: fmt::Arguments<'_>, range: RangeInclusive<usize>) -> Result<usize, SyncError> {
        loop {
            write!(self.output, "{prompt}")?;
            self.output.flush()?;

            let token = self.next_token()?;
            match token.parse::<usize>() {
                Ok(value) if range.contains(&value) => return Ok(value),
                _ => {
                    tracing::debug!(%token, "rejected input");
                    writeln!(
                        self.output,
                        "Invalid input {token:?}, expected {} ~ {}",
                        range.start(),
                        range.end()
                    )?;
                }
            }
        }
    }

    fn next_token(&mut self) -> Result<String, SyncError> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(token);
            }
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(SyncError::InputClosed);
            }
            self.pending.extend(line.split_whitespace().map(str::to_string));
        }
    }
}
