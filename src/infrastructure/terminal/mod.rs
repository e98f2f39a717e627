pub mod prompt;

pub use prompt::{Prompter, TerminalPrompter};
