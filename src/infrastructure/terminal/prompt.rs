use std::io::{self, BufRead, Write};

/// Interactive input source
pub trait Prompter: Send + Sync {
    /// Print `prompt` and read one line, without the trailing newline
    fn read_line(&self, prompt: &str) -> io::Result<String>;

    /// Print `prompt` and read one line with echo suppressed
    fn read_secret(&self, prompt: &str) -> io::Result<String>;
}

/// Reads from the controlling terminal
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl TerminalPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for TerminalPrompter {
    fn read_line(&self, prompt: &str) -> io::Result<String> {
        print!("{}", prompt);
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed before an answer was given",
            ));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn read_secret(&self, prompt: &str) -> io::Result<String> {
        rpassword::prompt_password(prompt)
    }
}
