use anyhow::{Context, Result};
use std::io::{BufRead, Write};

/// Line-oriented prompts over any reader/writer pair.
///
/// With `hide_secrets` set, passwords are read from the terminal without echo
/// through `rpassword`; otherwise they are read like any other line so the
/// session can be scripted.
pub struct Prompter<I, O> {
    input: I,
    output: O,
    hide_secrets: bool,
}

impl<I: BufRead, O: Write> Prompter<I, O> {
    pub fn new(input: I, output: O, hide_secrets: bool) -> Self {
        Self {
            input,
            output,
            hide_secrets,
        }
    }

    /// Print a block of text followed by a newline
    pub fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{}", text).context("Failed to write output")
    }

    /// Prompt and return the trimmed reply, or `None` at end of input
    pub fn line(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.output, "{}", message).context("Failed to write prompt")?;
        self.output.flush().context("Failed to flush output")?;

        let mut reply = String::new();
        let read = self
            .input
            .read_line(&mut reply)
            .context("Failed to read input")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(reply.trim().to_string()))
    }

    /// Prompt for a password. Surrounding whitespace is kept.
    pub fn secret(&mut self, message: &str) -> Result<Option<String>> {
        if self.hide_secrets {
            self.output.flush().context("Failed to flush output")?;
            let password =
                rpassword::prompt_password(message).context("Failed to read password")?;
            return Ok(Some(password));
        }

        write!(self.output, "{}", message).context("Failed to write prompt")?;
        self.output.flush().context("Failed to flush output")?;

        let mut reply = String::new();
        let read = self
            .input
            .read_line(&mut reply)
            .context("Failed to read input")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(reply.trim_end_matches(['\r', '\n']).to_string()))
    }

    pub fn into_output(self) -> O {
        self.output
    }
}
