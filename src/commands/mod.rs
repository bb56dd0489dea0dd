pub mod browse;
pub mod preview;
pub mod shell;
pub mod submit;
pub mod tasks;
pub mod watch;

use std::fmt::Display;
use std::io::Write;

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, BufReader, Lines, Stdin};

use crate::app::Confirm;

pub type Input = Lines<BufReader<Stdin>>;

pub fn stdin_lines() -> Input {
    use tokio::io::AsyncBufReadExt;
    BufReader::new(tokio::io::stdin()).lines()
}

/// Asks on stdout and reads the answer from the shared input.
pub struct Prompt<'a, R> {
    pub lines: &'a mut Lines<R>,
}

#[async_trait]
impl<'a, R: AsyncBufRead + Unpin + Send> Confirm for Prompt<'a, R> {
    async fn confirm(&mut self, prompt: &str) -> bool {
        print!("{prompt} [y/N] ");
        let _ = std::io::stdout().flush();
        match self.lines.next_line().await {
            Ok(Some(answer)) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            _ => false,
        }
    }
}

/// Reports a failure to the user; the caller carries on.
pub fn alert(err: &impl Display) {
    eprintln!("Error: {err}");
}
