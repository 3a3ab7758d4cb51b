//! Whitespace-delimited reading of user input.

use std::collections::VecDeque;
use std::io::{self, BufRead};

/// Hands out one whitespace-separated token at a time from a line source.
///
/// Several tokens typed on a single line are consumed by successive calls,
/// so `1 8.8.8.8` answers both the menu and the follow-up prompt.
pub struct Tokens<R> {
  reader: R,
  pending: VecDeque<String>,
}

impl<R: BufRead> Tokens<R> {
  pub const fn new(reader: R) -> Self {
    Self {
      reader,
      pending: VecDeque::new(),
    }
  }

  /// Next token, or `None` once the input is exhausted.
  ///
  /// # Errors
  /// Returns any error raised while reading from the underlying source.
  pub fn next_token(&mut self) -> io::Result<Option<String>> {
    loop {
      if let Some(token) = self.pending.pop_front() {
        return Ok(Some(token));
      }
      let mut line = String::new();
      if self.reader.read_line(&mut line)? == 0 {
        return Ok(None);
      }
      self
        .pending
        .extend(line.split_whitespace().map(str::to_string));
    }
  }
}
