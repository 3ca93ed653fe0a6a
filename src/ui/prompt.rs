//! Line prompts for the console forms

use std::fmt::Display;
use std::str::FromStr;

use rustyline::DefaultEditor;

use crate::settings::parse_bool;

/// Source of form answers
pub trait Prompter {
    /// Ask for one line, pre-filled with `initial`
    fn ask(&mut self, prompt: &str, initial: &str) -> rustyline::Result<String>;

    /// Ask for a command at the main prompt
    fn ask_command(&mut self, prompt: &str) -> rustyline::Result<String> {
        self.ask(prompt, "")
    }
}

/// Interactive terminal backed by rustyline
pub struct Terminal {
    editor: DefaultEditor,
}

impl Terminal {
    pub fn new() -> rustyline::Result<Self> {
        Ok(Self {
            editor: DefaultEditor::new()?,
        })
    }
}

impl Prompter for Terminal {
    fn ask(&mut self, prompt: &str, initial: &str) -> rustyline::Result<String> {
        self.editor.readline_with_initial(prompt, (initial, ""))
    }

    fn ask_command(&mut self, prompt: &str) -> rustyline::Result<String> {
        let line = self.editor.readline(prompt)?;
        if !line.trim().is_empty() {
            let _ = self.editor.add_history_entry(line.trim());
        }
        Ok(line)
    }
}

/// Ask until the answer parses, printing the parse error each time
pub fn ask_parsed<T>(p: &mut impl Prompter, prompt: &str, initial: &str) -> rustyline::Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    loop {
        match p.ask(prompt, initial)?.parse() {
            Ok(value) => return Ok(value),
            Err(e) => println!("{e}"),
        }
    }
}

/// Ask a yes/no question; any config boolean literal is accepted
pub fn ask_yes_no(p: &mut impl Prompter, prompt: &str, initial: bool) -> rustyline::Result<bool> {
    let initial = if initial { "yes" } else { "no" };
    loop {
        let answer = p.ask(prompt, initial)?;
        match parse_bool(&answer) {
            Some(value) => return Ok(value),
            None => println!("Please answer yes or no."),
        }
    }
}

/// Ask for a path, dropping surrounding whitespace and quotes
pub fn ask_path(p: &mut impl Prompter, prompt: &str, initial: &str) -> rustyline::Result<String> {
    let answer = p.ask(prompt, initial)?;
    Ok(answer.trim().trim_matches('"').to_string())
}

#[cfg(test)]
pub(crate) mod scripted {
    use super::*;
    use rustyline::error::ReadlineError;
    use std::collections::VecDeque;

    /// Replays canned answers; runs out with Eof
    pub struct Scripted {
        answers: VecDeque<String>,
        pub prompts: Vec<String>,
    }

    impl Scripted {
        pub fn new(answers: &[&str]) -> Self {
            Self {
                answers: answers.iter().map(|a| a.to_string()).collect(),
                prompts: Vec::new(),
            }
        }
    }

    impl Prompter for Scripted {
        fn ask(&mut self, prompt: &str, _initial: &str) -> rustyline::Result<String> {
            self.prompts.push(prompt.to_string());
            self.answers.pop_front().ok_or(ReadlineError::Eof)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::scripted::Scripted;
    use super::*;
    use crate::core::Bitrate;
    use rustyline::error::ReadlineError;

    #[test]
    fn test_ask_parsed_reprompts_until_valid() {
        let mut p = Scripted::new(&["64", "lots", "256"]);
        let bitrate: Bitrate = ask_parsed(&mut p, "Bitrate: ", "Default").unwrap();
        assert_eq!(bitrate, Bitrate::K256);
        assert_eq!(p.prompts.len(), 3);
    }

    #[test]
    fn test_ask_yes_no_accepts_literals() {
        let mut p = Scripted::new(&["perhaps", "On"]);
        assert!(ask_yes_no(&mut p, "Mono? ", false).unwrap());
    }

    #[test]
    fn test_ask_path_strips_quotes() {
        let mut p = Scripted::new(&["  \"/my music/a.flac\" "]);
        assert_eq!(ask_path(&mut p, "Input: ", "").unwrap(), "/my music/a.flac");
    }

    #[test]
    fn test_exhausted_script_ends_with_eof() {
        let mut p = Scripted::new(&[]);
        let err = ask_yes_no(&mut p, "Mono? ", false).unwrap_err();
        assert!(matches!(err, ReadlineError::Eof));
    }
}
